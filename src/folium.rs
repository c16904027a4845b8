//! Document-style map surface
//!
//! Unlike [`crate::Map`] there are no controls, widgets or events: the map
//! is a location, a starting zoom and the children added to it, kept in the
//! order they were added.

use crate::{
    core::{
        config::MapOptions,
        constants::{DEFAULT_CENTER, DEFAULT_ZOOM},
        geo::LatLng,
    },
    layers::{
        base::{next_layer_id, LayerTrait, LayerType},
        tile::{TileLayer, TileLayerOptions},
    },
    tiles::basemap::resolve_basemap,
    traits::MapSurface,
    MapError, Result,
};

pub struct Map {
    location: LatLng,
    zoom_start: f64,
    children: Vec<Box<dyn LayerTrait>>,
}

impl Map {
    pub fn new(location: LatLng, zoom_start: f64) -> Result<Self> {
        MapOptions::default().check_zoom(zoom_start)?;
        if !location.is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "location ({}, {}) is out of range",
                location.lat, location.lng
            )));
        }
        Ok(Self {
            location,
            zoom_start,
            children: Vec::new(),
        })
    }

    pub fn location(&self) -> LatLng {
        self.location
    }

    pub fn zoom_start(&self) -> f64 {
        self.zoom_start
    }

    pub fn add_child(&mut self, child: Box<dyn LayerTrait>) -> Result<()> {
        if self.children.iter().any(|c| c.id() == child.id()) {
            return Err(MapError::Layer(format!("child {:?} already added", child.id())));
        }
        log::debug!("adding {} child {:?}", child.layer_type(), child.id());
        self.children.push(child);
        Ok(())
    }

    /// Children in insertion order
    pub fn children(&self) -> Vec<&dyn LayerTrait> {
        self.children.iter().map(|c| c.as_ref()).collect()
    }

    pub fn add_tile_layer(&mut self, url: &str, name: &str, attribution: &str) -> Result<String> {
        let id = next_layer_id(LayerType::Tile);
        let layer = TileLayer::with_options(
            id.clone(),
            url.to_string(),
            name.to_string(),
            attribution.to_string(),
            TileLayerOptions::default(),
        );
        self.add_child(Box::new(layer))?;
        Ok(id)
    }

    pub fn add_basemap(&mut self, name: &str) -> Result<String> {
        let layer = TileLayer::from_basemap(&resolve_basemap(name)?);
        let id = layer.id().to_string();
        self.add_child(Box::new(layer))?;
        Ok(id)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "location": [self.location.lat, self.location.lng],
            "zoom_start": self.zoom_start,
            "children": self.children.iter().map(|c| c.describe()).collect::<Vec<_>>(),
        })
    }
}

impl Default for Map {
    fn default() -> Self {
        Self {
            location: LatLng::from(DEFAULT_CENTER),
            zoom_start: DEFAULT_ZOOM,
            children: Vec::new(),
        }
    }
}

impl MapSurface for Map {
    fn add_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        self.add_child(layer)
    }

    fn has_layer(&self, layer_id: &str) -> bool {
        self.children.iter().any(|c| c.id() == layer_id)
    }

    fn center(&self) -> LatLng {
        self.location
    }

    fn set_center(&mut self, center: LatLng) -> Result<()> {
        if !center.is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "location ({}, {}) is out of range",
                center.lat, center.lng
            )));
        }
        log::info!("map recentered on ({}, {})", center.lat, center.lng);
        self.location = center;
        Ok(())
    }
}
