//! Map builder for fluent API configuration

use crate::{
    controls::Position,
    core::{
        config::MapOptions,
        constants::{DEFAULT_CENTER, DEFAULT_ZOOM},
        geo::LatLng,
        map::Map,
    },
    Result,
};

/// Builder for creating and configuring Map instances
pub struct MapBuilder {
    center: LatLng,
    zoom: f64,
    map_options: MapOptions,
    /// Basemap added once the map exists
    basemap: Option<String>,
}

impl MapBuilder {
    /// Create a new MapBuilder with default settings
    pub fn new() -> Self {
        Self {
            center: LatLng::from(DEFAULT_CENTER),
            zoom: DEFAULT_ZOOM,
            map_options: MapOptions::default(),
            basemap: None,
        }
    }

    pub fn center(mut self, center: LatLng) -> Self {
        self.center = center;
        self
    }

    pub fn zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    /// Replace all map options at once
    pub fn options(mut self, options: MapOptions) -> Self {
        self.map_options = options;
        self
    }

    /// Enable or disable scroll wheel zoom
    pub fn scroll_wheel_zoom(mut self, enabled: bool) -> Self {
        self.map_options.scroll_wheel_zoom = enabled;
        self
    }

    /// Attach the layers control, or not
    pub fn layers_control(mut self, enabled: bool) -> Self {
        self.map_options.layers_control = enabled;
        self
    }

    pub fn layers_control_position(mut self, position: Position) -> Self {
        self.map_options.layers_control_position = position;
        self
    }

    /// Attach the fullscreen control, or not
    pub fn fullscreen_control(mut self, enabled: bool) -> Self {
        self.map_options.fullscreen_control = enabled;
        self
    }

    pub fn zoom_limits(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.map_options.min_zoom = min_zoom;
        self.map_options.max_zoom = max_zoom;
        self
    }

    /// Basemap to add as the first layer
    pub fn basemap(mut self, name: impl Into<String>) -> Self {
        self.basemap = Some(name.into());
        self
    }

    /// Build the map
    pub fn build(self) -> Result<Map> {
        let mut map = Map::with_options(self.center, self.zoom, self.map_options)?;
        if let Some(name) = self.basemap {
            map.add_basemap(&name)?;
        }
        Ok(map)
    }
}

impl Default for MapBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MapError;

    #[test]
    fn test_builder_defaults() {
        let map = MapBuilder::new().build().unwrap();
        assert_eq!(map.center(), LatLng::new(20.0, 0.0));
        assert_eq!(map.zoom(), 2.0);
        assert_eq!(map.controls().len(), 2);
        assert!(map.layers().is_empty());
    }

    #[test]
    fn test_builder_chain() {
        let map = MapBuilder::new()
            .center(LatLng::new(35.96, -83.92))
            .zoom(10.0)
            .scroll_wheel_zoom(false)
            .fullscreen_control(false)
            .layers_control_position(Position::BottomLeft)
            .basemap("CartoDB.DarkMatter")
            .build()
            .unwrap();

        assert!(!map.options().scroll_wheel_zoom);
        assert_eq!(map.controls().len(), 1);
        assert_eq!(map.controls()[0].position, Position::BottomLeft);
        assert_eq!(map.layers()[0].name(), "CartoDB.DarkMatter");
    }

    #[test]
    fn test_builder_rejects_bad_input() {
        assert!(matches!(
            MapBuilder::new().basemap("Stamen.Watercolour").build(),
            Err(MapError::InvalidBasemapName { .. })
        ));
        assert!(matches!(
            MapBuilder::new().zoom_limits(3.0, 8.0).zoom(2.0).build(),
            Err(MapError::InvalidArgument(_))
        ));
    }
}
