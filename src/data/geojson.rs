use crate::{
    core::geo::{LatLng, LatLngBounds},
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// `[lng, lat]` or `[lng, lat, elevation]`
pub type Position = Vec<f64>;

/// GeoJSON geometry types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point {
        coordinates: Position,
    },
    LineString {
        coordinates: Vec<Position>,
    },
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPoint {
        coordinates: Vec<Position>,
    },
    MultiLineString {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Position>>>,
    },
    GeometryCollection {
        geometries: Vec<GeoJsonGeometry>,
    },
}

/// GeoJSON feature with geometry and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonFeature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    pub geometry: Option<GeoJsonGeometry>,
    #[serde(default)]
    pub properties: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Root GeoJSON object
#[derive(Debug, Clone, PartialEq)]
pub enum GeoJson {
    Feature(GeoJsonFeature),
    FeatureCollection { features: Vec<GeoJsonFeature> },
    Geometry(GeoJsonGeometry),
}

/// Where GeoJSON data comes from
#[derive(Debug, Clone, PartialEq)]
pub enum GeoJsonSource {
    /// A file on disk
    Path(PathBuf),
    /// Raw JSON text
    Text(String),
    /// Already-parsed JSON
    Value(serde_json::Value),
}

impl GeoJsonSource {
    pub fn path(path: impl AsRef<Path>) -> Self {
        Self::Path(path.as_ref().to_path_buf())
    }

    /// Read and parse the source.
    pub fn load(&self) -> Result<GeoJson> {
        match self {
            GeoJsonSource::Path(path) => {
                log::debug!("reading geojson from {}", path.display());
                let text = std::fs::read_to_string(path)?;
                GeoJson::from_str(&text)
            }
            GeoJsonSource::Text(text) => GeoJson::from_str(text),
            GeoJsonSource::Value(value) => GeoJson::from_value(value.clone()),
        }
    }
}

impl From<serde_json::Value> for GeoJsonSource {
    fn from(value: serde_json::Value) -> Self {
        Self::Value(value)
    }
}

fn parse_error(e: serde_json::Error) -> MapError {
    MapError::ParseError(format!("Invalid GeoJSON: {}", e))
}

impl GeoJson {
    /// Parses GeoJSON text
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(geojson_str: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(geojson_str).map_err(parse_error)?;
        Self::from_value(value)
    }

    /// Interprets a JSON value as a Feature, FeatureCollection or bare geometry
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let kind = value
            .get("type")
            .and_then(|t| t.as_str())
            .ok_or_else(|| MapError::ParseError("Invalid GeoJSON: missing `type`".into()))?
            .to_string();

        match kind.as_str() {
            "Feature" => Ok(GeoJson::Feature(
                serde_json::from_value(value).map_err(parse_error)?,
            )),
            "FeatureCollection" => {
                let features = value
                    .get("features")
                    .cloned()
                    .ok_or_else(|| MapError::ParseError("Invalid GeoJSON: missing `features`".into()))?;
                Ok(GeoJson::FeatureCollection {
                    features: serde_json::from_value(features).map_err(parse_error)?,
                })
            }
            _ => Ok(GeoJson::Geometry(
                serde_json::from_value(value).map_err(parse_error)?,
            )),
        }
    }

    pub fn to_value(&self) -> serde_json::Value {
        match self {
            GeoJson::Feature(feature) => feature_value(feature),
            GeoJson::FeatureCollection { features } => serde_json::json!({
                "type": "FeatureCollection",
                "features": features.iter().map(feature_value).collect::<Vec<_>>(),
            }),
            GeoJson::Geometry(geometry) => {
                serde_json::to_value(geometry).unwrap_or(serde_json::Value::Null)
            }
        }
    }

    /// All features; a bare geometry yields none
    pub fn features(&self) -> Vec<&GeoJsonFeature> {
        match self {
            GeoJson::Feature(feature) => vec![feature],
            GeoJson::FeatureCollection { features } => features.iter().collect(),
            GeoJson::Geometry(_) => Vec::new(),
        }
    }

    /// Bounding box of every position in the document
    pub fn bounds(&self) -> Option<LatLngBounds> {
        let points: Vec<LatLng> = match self {
            GeoJson::Geometry(geometry) => geometry.to_lat_lng_points(),
            _ => self
                .features()
                .into_iter()
                .filter_map(|f| f.geometry.as_ref())
                .flat_map(|g| g.to_lat_lng_points())
                .collect(),
        };
        LatLngBounds::from_points(points)
    }
}

fn feature_value(feature: &GeoJsonFeature) -> serde_json::Value {
    let mut value = serde_json::to_value(feature).unwrap_or(serde_json::Value::Null);
    if let Some(object) = value.as_object_mut() {
        object.insert("type".into(), "Feature".into());
    }
    value
}

fn to_lat_lng(position: &Position) -> Option<LatLng> {
    match position.as_slice() {
        [lng, lat, ..] => Some(LatLng::new(*lat, *lng)),
        _ => None,
    }
}

impl GeoJsonGeometry {
    /// Converts coordinates to LatLng points, skipping malformed positions
    pub fn to_lat_lng_points(&self) -> Vec<LatLng> {
        match self {
            GeoJsonGeometry::Point { coordinates } => to_lat_lng(coordinates).into_iter().collect(),
            GeoJsonGeometry::LineString { coordinates }
            | GeoJsonGeometry::MultiPoint { coordinates } => {
                coordinates.iter().filter_map(to_lat_lng).collect()
            }
            GeoJsonGeometry::Polygon { coordinates }
            | GeoJsonGeometry::MultiLineString { coordinates } => coordinates
                .iter()
                .flatten()
                .filter_map(to_lat_lng)
                .collect(),
            GeoJsonGeometry::MultiPolygon { coordinates } => coordinates
                .iter()
                .flatten()
                .flatten()
                .filter_map(to_lat_lng)
                .collect(),
            GeoJsonGeometry::GeometryCollection { geometries } => geometries
                .iter()
                .flat_map(|g| g.to_lat_lng_points())
                .collect(),
        }
    }
}
