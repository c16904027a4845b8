//! Vector data loading

pub mod geojson;

pub use geojson::{GeoJson, GeoJsonFeature, GeoJsonGeometry, GeoJsonSource};
