//! Prelude module for common crimpy types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use crimpy::prelude::*;`

pub use crate::core::{
    builder::MapBuilder,
    config::MapOptions,
    geo::{LatLng, LatLngBounds, Location, Point, TileCoord},
    map::Map,
};

pub use crate::layers::{
    base::LayerTrait,
    cluster::{ClusteringConfig, MarkerCluster},
    geojson::{FeatureStyle, GeoJsonLayer},
    image::ImageOverlay,
    manager::LayerManager,
    marker::Marker,
    tile::{TileLayer, TileLayerOptions},
};

pub use crate::data::geojson::{GeoJson, GeoJsonFeature, GeoJsonSource};

pub use crate::controls::{
    Control, ControlKind, DrawOptions, DrawShape, Dropdown, Position, SearchOptions, Toolbar,
};

pub use crate::events::{MapEvent, WidgetEvent};

pub use crate::locations::{add_locations_to_map, add_locations_to_map_with, mean_center, ClusterMode};

pub use crate::random::{generate_lucky_number, generate_random_string, RandomStringOptions};

pub use crate::tiles::{
    basemap::{available_basemaps, resolve_basemap, Basemap},
    tilejson::{TileJson, TileMetadataSource, TitilerClient},
};

pub use crate::traits::MapSurface;

pub use crate::{MapError, Result};

// Fast hash maps keyed by layer and control ids
pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
