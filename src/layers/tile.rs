//! Raster tile layers built from XYZ URL templates

use serde::{Deserialize, Serialize};

use crate::{
    core::geo::{LatLngBounds, TileCoord},
    layers::base::{next_layer_id, LayerProperties, LayerTrait, LayerType},
    tiles::{
        basemap::Basemap,
        source::{TileSource, UrlTemplate},
    },
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileLayerOptions {
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub opacity: f32,
    pub subdomains: Vec<String>,
    /// Restrict requests to this extent
    pub bounds: Option<LatLngBounds>,
    /// Base layers are mutually exclusive in the layers control
    pub base: bool,
}

impl Default for TileLayerOptions {
    fn default() -> Self {
        Self {
            min_zoom: 0,
            max_zoom: 18,
            opacity: 1.0,
            subdomains: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            bounds: None,
            base: false,
        }
    }
}

pub struct TileLayer {
    properties: LayerProperties,
    source: UrlTemplate,
    attribution: String,
    options: TileLayerOptions,
}

impl TileLayer {
    pub fn new(id: String, url: String, name: String) -> Self {
        Self::with_options(id, url, name, String::new(), TileLayerOptions::default())
    }

    pub fn with_options(
        id: String,
        url: String,
        name: String,
        attribution: String,
        options: TileLayerOptions,
    ) -> Self {
        let mut properties = LayerProperties::new(id, name, LayerType::Tile);
        properties.opacity = options.opacity.clamp(0.0, 1.0);
        // Base layers draw beneath every overlay
        if options.base {
            properties.z_index = -1;
        }
        let source = UrlTemplate::new(url).with_subdomains(options.subdomains.clone());

        Self {
            properties,
            source,
            attribution,
            options,
        }
    }

    /// Tile layer for a resolved basemap, flagged as a base layer.
    pub fn from_basemap(basemap: &Basemap) -> Self {
        let options = TileLayerOptions {
            base: true,
            max_zoom: basemap.max_zoom,
            subdomains: basemap.subdomains.clone(),
            ..Default::default()
        };
        Self::with_options(
            next_layer_id(LayerType::Tile),
            basemap.url_template.clone(),
            basemap.name.clone(),
            basemap.attribution.clone(),
            options,
        )
    }

    pub fn url_template(&self) -> &str {
        self.source.template()
    }

    pub fn attribution(&self) -> &str {
        &self.attribution
    }

    pub fn is_base(&self) -> bool {
        self.options.base
    }

    pub fn tile_options(&self) -> &TileLayerOptions {
        &self.options
    }

    /// Concrete URL of one tile, `None` outside the zoom range or bounds.
    pub fn tile_url(&self, coord: TileCoord) -> Option<String> {
        if coord.z < self.options.min_zoom || coord.z > self.options.max_zoom || !coord.is_valid() {
            return None;
        }
        if let Some(bounds) = &self.options.bounds {
            if !bounds.intersects(&coord.bounds()) {
                return None;
            }
        }
        Some(self.source.url(coord))
    }
}

impl LayerTrait for TileLayer {
    crate::impl_layer_trait!(TileLayer, properties);

    fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "url": self.source.template(),
            "attribution": self.attribution,
            "min_zoom": self.options.min_zoom,
            "max_zoom": self.options.max_zoom,
            "subdomains": self.options.subdomains,
            "bounds": self.options.bounds.as_ref().map(|b| b.to_corners()),
            "base": self.options.base,
        })
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        self.options.bounds.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_layer_defaults() {
        let layer = TileLayer::new(
            "osm".into(),
            "https://tile.openstreetmap.org/{z}/{x}/{y}.png".into(),
            "OpenStreetMap".into(),
        );
        assert_eq!(layer.name(), "OpenStreetMap");
        assert_eq!(layer.attribution(), "");
        assert!(!layer.is_base());
        assert_eq!(layer.layer_type(), LayerType::Tile);
        assert_eq!(
            layer.tile_url(TileCoord::new(1, 2, 3)).as_deref(),
            Some("https://tile.openstreetmap.org/3/1/2.png")
        );
    }

    #[test]
    fn test_tile_url_respects_zoom_range() {
        let options = TileLayerOptions {
            min_zoom: 2,
            max_zoom: 4,
            ..Default::default()
        };
        let layer = TileLayer::with_options(
            "t".into(),
            "https://t/{z}/{x}/{y}.png".into(),
            "T".into(),
            String::new(),
            options,
        );
        assert!(layer.tile_url(TileCoord::new(0, 0, 1)).is_none());
        assert!(layer.tile_url(TileCoord::new(0, 0, 5)).is_none());
        assert!(layer.tile_url(TileCoord::new(4, 0, 2)).is_none());
        assert!(layer.tile_url(TileCoord::new(3, 3, 2)).is_some());
    }

    #[test]
    fn test_tile_url_respects_bounds() {
        let options = TileLayerOptions {
            // Western hemisphere, north of the equator
            bounds: Some(LatLngBounds::from_coords(10.0, -100.0, 40.0, -80.0)),
            ..Default::default()
        };
        let layer = TileLayer::with_options(
            "t".into(),
            "https://t/{z}/{x}/{y}.png".into(),
            "T".into(),
            String::new(),
            options,
        );
        assert!(layer.tile_url(TileCoord::new(0, 0, 1)).is_some());
        assert!(layer.tile_url(TileCoord::new(1, 0, 1)).is_none());
        assert!(layer.tile_url(TileCoord::new(0, 1, 1)).is_none());
    }

    #[test]
    fn test_deep_zoom_request_is_rejected() {
        let options = TileLayerOptions {
            max_zoom: 100,
            ..Default::default()
        };
        let layer = TileLayer::with_options(
            "t".into(),
            "https://t/{z}/{x}/{y}.png".into(),
            "T".into(),
            String::new(),
            options,
        );
        assert!(layer.tile_url(TileCoord::new(0, 0, 70)).is_none());
    }

    #[test]
    fn test_base_flag_sets_z_index() {
        let base = TileLayer::with_options(
            "b".into(),
            "https://t/{z}/{x}/{y}.png".into(),
            "B".into(),
            String::new(),
            TileLayerOptions {
                base: true,
                ..Default::default()
            },
        );
        assert_eq!(base.z_index(), -1);
        let overlay = TileLayer::new("o".into(), "https://t/{z}/{x}/{y}.png".into(), "O".into());
        assert_eq!(overlay.z_index(), 0);
    }

    #[test]
    fn test_options_json() {
        let options = TileLayerOptions {
            bounds: Some(LatLngBounds::from_coords(1.0, 2.0, 3.0, 4.0)),
            opacity: 0.5,
            ..Default::default()
        };
        let layer = TileLayer::with_options(
            "t".into(),
            "https://t/{z}/{x}/{y}.png".into(),
            "T".into(),
            "© T".into(),
            options,
        );
        let json = layer.options();
        assert_eq!(json["attribution"], "© T");
        assert_eq!(json["bounds"], serde_json::json!([[1.0, 2.0], [3.0, 4.0]]));
        assert_eq!(layer.opacity(), 0.5);
    }
}
