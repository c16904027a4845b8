//! TileJSON metadata for raster layers
//!
//! A raster layer is added by asking a tile server for the TileJSON document
//! of a cloud-optimized GeoTIFF and turning its first tile template into a
//! tile layer restricted to the reported bounds.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{
    core::{
        constants::{HTTP_CONNECT_TIMEOUT_SECS, HTTP_TIMEOUT_SECS, MAX_TILE_ZOOM, TITILER_TILEJSON_URL},
        geo::LatLngBounds,
    },
    MapError, Result,
};

/// Shared HTTP client with a User-Agent so public tile servers don't reject
/// the request. Building it once avoids TLS and pool setup per request.
pub(crate) static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent(concat!("crimpy/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
        .build()
        .unwrap_or_default()
});

/// The subset of a TileJSON document a raster layer needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileJson {
    /// `[west, south, east, north]`
    pub bounds: [f64; 4],
    /// Never empty
    pub tiles: Vec<String>,
    pub minzoom: Option<u8>,
    pub maxzoom: Option<u8>,
    pub attribution: Option<String>,
}

impl TileJson {
    /// Validate a raw response body.
    ///
    /// `bounds` must hold exactly four numbers and `tiles` at least one
    /// string; anything else is a malformed response. Zoom levels are
    /// clamped to `MAX_TILE_ZOOM`.
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| MapError::MalformedTileResponse("response is not a JSON object".into()))?;

        let raw_bounds = object
            .get("bounds")
            .and_then(|b| b.as_array())
            .ok_or_else(|| MapError::MalformedTileResponse("missing `bounds` array".into()))?;
        if raw_bounds.len() != 4 {
            return Err(MapError::MalformedTileResponse(format!(
                "`bounds` has {} elements, expected 4",
                raw_bounds.len()
            )));
        }
        let mut bounds = [0.0; 4];
        for (slot, raw) in bounds.iter_mut().zip(raw_bounds) {
            *slot = raw
                .as_f64()
                .ok_or_else(|| MapError::MalformedTileResponse(format!("non-numeric bound {}", raw)))?;
        }

        let tiles: Vec<String> = object
            .get("tiles")
            .and_then(|t| t.as_array())
            .ok_or_else(|| MapError::MalformedTileResponse("missing `tiles` array".into()))?
            .iter()
            .map(|t| {
                t.as_str().map(str::to_string).ok_or_else(|| {
                    MapError::MalformedTileResponse(format!("non-string tile template {}", t))
                })
            })
            .collect::<Result<_>>()?;
        if tiles.is_empty() {
            return Err(MapError::MalformedTileResponse("`tiles` is empty".into()));
        }

        let zoom = |key: &str| {
            object
                .get(key)
                .and_then(|z| z.as_u64())
                .map(|z| z.min(MAX_TILE_ZOOM as u64) as u8)
        };

        Ok(Self {
            bounds,
            tiles,
            minzoom: zoom("minzoom"),
            maxzoom: zoom("maxzoom"),
            attribution: object
                .get("attribution")
                .and_then(|a| a.as_str())
                .map(str::to_string),
        })
    }

    pub fn lat_lng_bounds(&self) -> LatLngBounds {
        LatLngBounds::from_wsen(self.bounds)
    }

    /// First tile template; `tiles` is never empty after validation.
    pub fn tile_template(&self) -> &str {
        &self.tiles[0]
    }
}

/// Anything that can produce TileJSON for a raster URL.
#[async_trait]
pub trait TileMetadataSource: Send + Sync {
    async fn tilejson(&self, raster_url: &str) -> Result<TileJson>;
}

/// TiTiler-compatible COG endpoint.
#[derive(Debug, Clone)]
pub struct TitilerClient {
    endpoint: String,
}

impl TitilerClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Default for TitilerClient {
    fn default() -> Self {
        Self::new(TITILER_TILEJSON_URL)
    }
}

#[async_trait]
impl TileMetadataSource for TitilerClient {
    async fn tilejson(&self, raster_url: &str) -> Result<TileJson> {
        log::debug!("fetching tilejson for {} from {}", raster_url, self.endpoint);

        let response = HTTP_CLIENT
            .get(&self.endpoint)
            .query(&[("url", raster_url)])
            .send()
            .await?
            .error_for_status()?;

        let body: serde_json::Value = response.json().await?;
        TileJson::from_value(&body)
    }
}
