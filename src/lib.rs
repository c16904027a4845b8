//! # crimpy
//!
//! Pre-configured map surfaces for notebook-style mapping.
//!
//! The crate models a map as plain Rust state: a center, a zoom level, an
//! ordered collection of layers, a set of controls and widgets, and an event
//! queue. Two surfaces are provided, an interactive [`Map`] and a
//! document-style [`folium::Map`], both implementing [`MapSurface`] so that
//! helpers like [`add_locations_to_map`] work against either.

pub mod controls;
pub mod core;
pub mod data;
pub mod events;
pub mod folium;
pub mod layers;
pub mod locations;
pub mod random;
pub mod tiles;
pub mod traits;

pub mod prelude;

pub use crate::core::constants;

// Re-export public API
pub use core::{
    builder::MapBuilder,
    config::MapOptions,
    geo::{LatLng, LatLngBounds, Location, Point, TileCoord},
    map::Map,
};

pub use layers::{
    base::LayerTrait,
    cluster::MarkerCluster,
    geojson::{FeatureStyle, GeoJsonLayer},
    image::ImageOverlay,
    marker::Marker,
    tile::{TileLayer, TileLayerOptions},
};

pub use data::geojson::{GeoJson, GeoJsonSource};

pub use controls::{Control, ControlKind, DrawOptions, Position, SearchOptions};

pub use events::{MapEvent, WidgetEvent};

pub use locations::{add_locations_to_map, add_locations_to_map_with, mean_center, ClusterMode};

pub use random::{generate_lucky_number, generate_random_string, RandomStringOptions};

pub use tiles::{
    basemap::{available_basemaps, resolve_basemap, Basemap},
    tilejson::{TileJson, TileMetadataSource, TitilerClient},
};

pub use traits::MapSurface;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid basemap name: {name:?}")]
    InvalidBasemapName { name: String },

    #[error("{name:?} is a basemap provider family, pick one of: {}", variants.join(", "))]
    UnknownBasemapProvider { name: String, variants: Vec<String> },

    #[error("Malformed tile response: {0}")]
    MalformedTileResponse(String),

    #[error("cannot center on zero points")]
    EmptyLocations,

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Widget error: {0}")]
    Widget(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

impl MapError {
    /// Whether retrying the same call later could succeed.
    ///
    /// Only transport failures qualify; every other variant describes bad
    /// input or bad data and will fail the same way again.
    pub fn is_transient(&self) -> bool {
        matches!(self, MapError::Network(_))
    }
}

/// Error type alias for convenience
pub type Error = MapError;

/// Initialise `env_logger` once, honouring `RUST_LOG`.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(false).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_input() {
        let err = MapError::InvalidBasemapName {
            name: "Nowhere.Tiles".to_string(),
        };
        assert!(err.to_string().contains("Nowhere.Tiles"));

        let err = MapError::UnknownBasemapProvider {
            name: "Esri".to_string(),
            variants: vec!["Esri.WorldImagery".to_string(), "Esri.WorldTopoMap".to_string()],
        };
        let message = err.to_string();
        assert!(message.contains("Esri.WorldImagery, Esri.WorldTopoMap"));
    }

    #[test]
    fn test_only_network_errors_are_transient() {
        assert!(!MapError::EmptyLocations.is_transient());
        assert!(!MapError::MalformedTileResponse("no tiles".into()).is_transient());
        assert!(!MapError::InvalidBasemapName { name: "x".into() }.is_transient());
    }
}
