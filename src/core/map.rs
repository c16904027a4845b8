//! The interactive map surface

use std::path::Path;

use crate::{
    controls::{
        widgets::ToolbarTool, Control, ControlKind, ControlManager, DrawOptions, Dropdown,
        Position, SearchOptions, Toolbar,
    },
    core::{
        config::MapOptions,
        constants::{DEFAULT_CENTER, DEFAULT_ZOOM},
        geo::{LatLng, LatLngBounds},
    },
    data::geojson::GeoJsonSource,
    events::{EventManager, MapEvent, WidgetEvent},
    layers::{
        base::{next_layer_id, LayerTrait, LayerType},
        geojson::{FeatureStyle, GeoJsonLayer},
        image::ImageOverlay,
        manager::LayerManager,
        tile::{TileLayer, TileLayerOptions},
    },
    prelude::HashMap,
    tiles::{
        basemap::resolve_basemap,
        tilejson::{TileMetadataSource, TitilerClient},
    },
    traits::MapSurface,
    MapError, Result,
};

/// Dropdown change callback, called with the new value
pub type DropdownCallback = Box<dyn Fn(&str) + Send + Sync>;

pub struct Map {
    center: LatLng,
    zoom: f64,
    options: MapOptions,
    layer_manager: LayerManager,
    control_manager: ControlManager,
    event_manager: EventManager,
    dropdown_callbacks: HashMap<String, Vec<DropdownCallback>>,
}

impl Map {
    /// Map with default options; attaches the layers and fullscreen controls.
    pub fn new(center: LatLng, zoom: f64) -> Result<Self> {
        Self::with_options(center, zoom, MapOptions::default())
    }

    pub fn with_options(center: LatLng, zoom: f64, options: MapOptions) -> Result<Self> {
        options.validate()?;
        options.check_zoom(zoom)?;
        check_center(center)?;

        let mut map = Self::empty(center, zoom, options);
        map.attach_default_controls()?;
        Ok(map)
    }

    fn empty(center: LatLng, zoom: f64, options: MapOptions) -> Self {
        Self {
            center,
            zoom,
            options,
            layer_manager: LayerManager::new(),
            control_manager: ControlManager::new(),
            event_manager: EventManager::new(),
            dropdown_callbacks: HashMap::default(),
        }
    }

    fn attach_default_controls(&mut self) -> Result<()> {
        if self.options.layers_control {
            self.add_layers_control(self.options.layers_control_position)?;
        }
        if self.options.fullscreen_control {
            self.add_fullscreen_control(self.options.fullscreen_control_position)?;
        }
        Ok(())
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn set_center(&mut self, center: LatLng) -> Result<()> {
        check_center(center)?;
        if center != self.center {
            self.center = center;
            log::info!("map recentered on ({}, {})", center.lat, center.lng);
            self.emit_view_changed();
        }
        Ok(())
    }

    pub fn set_zoom(&mut self, zoom: f64) -> Result<()> {
        self.options.check_zoom(zoom)?;
        if zoom != self.zoom {
            self.zoom = zoom;
            self.emit_view_changed();
        }
        Ok(())
    }

    /// Center on the middle of `bounds`, keeping the zoom
    pub fn fit_bounds(&mut self, bounds: &LatLngBounds) -> Result<()> {
        self.set_center(bounds.center())
    }

    fn emit_view_changed(&mut self) {
        self.event_manager.emit(MapEvent::ViewChanged {
            center: self.center,
            zoom: self.zoom,
        });
    }

    // Layers

    pub fn add_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        let layer_id = layer.id().to_string();
        log::debug!("adding {} layer {:?}", layer.layer_type(), layer_id);
        self.layer_manager.add_layer(layer)?;
        self.event_manager.emit(MapEvent::LayerAdd { layer_id });
        Ok(())
    }

    pub fn remove_layer(&mut self, layer_id: &str) -> Option<Box<dyn LayerTrait>> {
        let removed = self.layer_manager.remove_layer(layer_id);
        if removed.is_some() {
            self.event_manager.emit(MapEvent::LayerRemove {
                layer_id: layer_id.to_string(),
            });
        }
        removed
    }

    pub fn layer(&self, layer_id: &str) -> Option<&dyn LayerTrait> {
        self.layer_manager.get_layer(layer_id)
    }

    /// Layers in draw order
    pub fn layers(&self) -> Vec<&dyn LayerTrait> {
        self.layer_manager.layers()
    }

    /// Ids of the tile layers flagged as base layers
    pub fn base_layer_ids(&self) -> Vec<String> {
        self.layers()
            .into_iter()
            .filter(|l| {
                l.as_any()
                    .downcast_ref::<TileLayer>()
                    .is_some_and(|t| t.is_base())
            })
            .map(|l| l.id().to_string())
            .collect()
    }

    /// Adds an XYZ tile layer and returns its id.
    pub fn add_tile_layer(
        &mut self,
        url: &str,
        name: &str,
        attribution: &str,
        options: TileLayerOptions,
    ) -> Result<String> {
        let id = next_layer_id(LayerType::Tile);
        let layer = TileLayer::with_options(
            id.clone(),
            url.to_string(),
            name.to_string(),
            attribution.to_string(),
            options,
        );
        self.add_layer(Box::new(layer))?;
        Ok(id)
    }

    /// Resolves `name` and adds it as a base tile layer.
    pub fn add_basemap(&mut self, name: &str) -> Result<String> {
        let basemap = resolve_basemap(name)?;
        let layer = TileLayer::from_basemap(&basemap);
        let id = layer.id().to_string();
        self.add_layer(Box::new(layer))?;
        Ok(id)
    }

    /// Replaces every base layer with the basemap `name`.
    ///
    /// The map is left untouched if `name` does not resolve.
    pub fn set_basemap(&mut self, name: &str) -> Result<String> {
        let basemap = resolve_basemap(name)?;
        for id in self.base_layer_ids() {
            self.remove_layer(&id);
        }
        let layer = TileLayer::from_basemap(&basemap);
        let layer_id = layer.id().to_string();
        self.add_layer(Box::new(layer))?;
        self.event_manager.emit(MapEvent::BaseLayerChange {
            layer_id: layer_id.clone(),
        });
        Ok(layer_id)
    }

    pub fn add_geojson(
        &mut self,
        source: GeoJsonSource,
        name: &str,
        style: FeatureStyle,
    ) -> Result<String> {
        let layer = GeoJsonLayer::from_source(&source, name)?.with_style(style);
        let id = layer.id().to_string();
        self.add_layer(Box::new(layer))?;
        Ok(id)
    }

    /// Adds a vector file. Only GeoJSON (`.geojson`, `.json`) is read.
    pub fn add_vector(&mut self, path: impl AsRef<Path>, name: &str) -> Result<String> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "geojson" | "json" => {
                self.add_geojson(GeoJsonSource::path(path), name, FeatureStyle::default())
            }
            _ => Err(MapError::InvalidArgument(format!(
                "unsupported vector format {:?} for {}",
                extension,
                path.display()
            ))),
        }
    }

    /// Adds a raster served as tiles by `source` and returns its extent.
    pub async fn add_raster<S>(&mut self, source: &S, url: &str, name: &str) -> Result<LatLngBounds>
    where
        S: TileMetadataSource + ?Sized,
    {
        let tilejson = source.tilejson(url).await?;
        let bounds = tilejson.lat_lng_bounds();
        log::info!("raster {} covers {:?}", url, bounds.to_corners());

        let defaults = TileLayerOptions::default();
        let options = TileLayerOptions {
            min_zoom: tilejson.minzoom.unwrap_or(defaults.min_zoom),
            max_zoom: tilejson.maxzoom.unwrap_or(defaults.max_zoom),
            subdomains: Vec::new(),
            bounds: Some(bounds.clone()),
            ..defaults
        };
        self.add_tile_layer(
            tilejson.tile_template(),
            name,
            tilejson.attribution.as_deref().unwrap_or(""),
            options,
        )?;
        Ok(bounds)
    }

    /// `add_raster` against the public TiTiler endpoint.
    pub async fn add_cog(&mut self, url: &str, name: &str) -> Result<LatLngBounds> {
        self.add_raster(&TitilerClient::default(), url, name).await
    }

    pub fn add_image(&mut self, url: &str, bounds: LatLngBounds, name: &str) -> Result<String> {
        let overlay = ImageOverlay::with_generated_id(url, bounds, name);
        let id = overlay.id().to_string();
        self.add_layer(Box::new(overlay))?;
        Ok(id)
    }

    // Controls

    pub fn add_control(&mut self, control: Control) -> Result<String> {
        log::debug!("adding {} control at {}", control.kind.name(), control.position);
        let control_id = self.control_manager.add(control)?;
        self.event_manager.emit(MapEvent::ControlAdd {
            control_id: control_id.clone(),
        });
        Ok(control_id)
    }

    pub fn control(&self, control_id: &str) -> Option<&Control> {
        self.control_manager.get(control_id)
    }

    pub fn controls(&self) -> &[Control] {
        self.control_manager.controls()
    }

    pub fn add_search_control(&mut self, position: Position, options: SearchOptions) -> Result<String> {
        self.add_control(Control::new(ControlKind::Search(options), position))
    }

    pub fn add_draw_control(&mut self, options: DrawOptions) -> Result<String> {
        self.add_control(Control::new(ControlKind::Draw(options), Position::TopLeft))
    }

    pub fn add_layers_control(&mut self, position: Position) -> Result<String> {
        self.add_control(Control::new(ControlKind::Layers, position))
    }

    pub fn add_fullscreen_control(&mut self, position: Position) -> Result<String> {
        self.add_control(Control::new(ControlKind::Fullscreen, position))
    }

    /// Adds a dropdown widget and returns its id.
    pub fn add_dropdown<I, S>(&mut self, options: I, position: Position) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let dropdown = Dropdown::new(options)?;
        self.add_control(Control::new(ControlKind::Dropdown(dropdown), position))
    }

    /// Register a callback for value changes of dropdown `widget_id`.
    pub fn on_dropdown_change<F>(&mut self, widget_id: &str, callback: F) -> Result<()>
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        match self.control_manager.get(widget_id).map(|c| &c.kind) {
            Some(ControlKind::Dropdown(_)) => {
                self.dropdown_callbacks
                    .entry(widget_id.to_string())
                    .or_default()
                    .push(Box::new(callback));
                Ok(())
            }
            _ => Err(MapError::Widget(format!("no dropdown {:?}", widget_id))),
        }
    }

    pub fn add_toolbar(&mut self, position: Position) -> Result<String> {
        let toolbar = Toolbar::new()?;
        self.add_control(Control::new(ControlKind::Toolbar(toolbar), position))
    }

    /// Apply a front-end event to the widget it addresses.
    pub fn handle_widget_event(&mut self, event: WidgetEvent) -> Result<()> {
        match event {
            WidgetEvent::ValueChanged { widget_id, value } => self.change_widget_value(widget_id, value),
            WidgetEvent::ButtonClicked { widget_id, button } => {
                let tool = button.parse::<ToolbarTool>()?;
                match self.control_manager.get_mut(&widget_id).map(|c| &mut c.kind) {
                    Some(ControlKind::Toolbar(toolbar)) => {
                        toolbar.click(tool);
                        Ok(())
                    }
                    _ => Err(MapError::Widget(format!("no toolbar {:?}", widget_id))),
                }
            }
        }
    }

    fn change_widget_value(&mut self, widget_id: String, value: String) -> Result<()> {
        let control = self
            .control_manager
            .get_mut(&widget_id)
            .ok_or_else(|| MapError::Widget(format!("no widget {:?}", widget_id)))?;

        let swap_basemap = match &mut control.kind {
            ControlKind::Dropdown(dropdown) => {
                dropdown.select(&value)?;
                false
            }
            ControlKind::Toolbar(toolbar) => {
                let selector = toolbar.basemap_selector_mut();
                if !selector.options().contains(&value) {
                    return Err(MapError::Widget(format!("{:?} is not a basemap option", value)));
                }
                resolve_basemap(&value)?;
                selector.select(&value)?;
                true
            }
            kind => {
                return Err(MapError::Widget(format!(
                    "{} control {:?} has no value",
                    kind.name(),
                    widget_id
                )));
            }
        };

        if swap_basemap {
            self.set_basemap(&value)?;
        } else if let Some(callbacks) = self.dropdown_callbacks.get(&widget_id) {
            for callback in callbacks {
                callback(&value);
            }
        }
        self.event_manager
            .emit(MapEvent::WidgetChange { widget_id, value });
        Ok(())
    }

    // Events

    pub fn on<F>(&mut self, event_type: &str, callback: F)
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.event_manager.on(event_type, callback);
    }

    pub fn process_events(&mut self) -> Vec<MapEvent> {
        self.event_manager.process_events()
    }

    /// Snapshot of the map state for a front end
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "center": [self.center.lat, self.center.lng],
            "zoom": self.zoom,
            "options": self.options,
            "layers": self.layers().iter().map(|l| l.describe()).collect::<Vec<_>>(),
            "controls": self.controls(),
        })
    }
}

impl Default for Map {
    fn default() -> Self {
        let mut map = Self::empty(LatLng::from(DEFAULT_CENTER), DEFAULT_ZOOM, MapOptions::default());
        if let Err(e) = map.attach_default_controls() {
            log::warn!("default controls not attached: {}", e);
        }
        map
    }
}

impl MapSurface for Map {
    fn add_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        Map::add_layer(self, layer)
    }

    fn has_layer(&self, layer_id: &str) -> bool {
        self.layer(layer_id).is_some()
    }

    fn center(&self) -> LatLng {
        Map::center(self)
    }

    fn set_center(&mut self, center: LatLng) -> Result<()> {
        Map::set_center(self, center)
    }
}

fn check_center(center: LatLng) -> Result<()> {
    if !center.is_valid() {
        return Err(MapError::InvalidCoordinates(format!(
            "center ({}, {}) is out of range",
            center.lat, center.lng
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::geo::TileCoord, layers::marker::Marker, tiles::tilejson::TileJson};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    struct StaticTileJson(serde_json::Value);

    #[async_trait]
    impl TileMetadataSource for StaticTileJson {
        async fn tilejson(&self, _raster_url: &str) -> Result<TileJson> {
            TileJson::from_value(&self.0)
        }
    }

    fn bare_map() -> Map {
        let options = MapOptions {
            layers_control: false,
            fullscreen_control: false,
            ..Default::default()
        };
        Map::with_options(LatLng::new(20.0, 0.0), 2.0, options).unwrap()
    }

    #[test]
    fn test_default_controls() {
        let map = Map::new(LatLng::new(20.0, 0.0), 2.0).unwrap();
        let kinds: Vec<_> = map.controls().iter().map(|c| (c.kind.name(), c.position)).collect();
        assert_eq!(
            kinds,
            vec![("layers", Position::TopRight), ("fullscreen", Position::TopLeft)]
        );
        assert!(map.options().scroll_wheel_zoom);

        let default = Map::default();
        assert_eq!(default.center(), LatLng::new(20.0, 0.0));
        assert_eq!(default.zoom(), 2.0);
        assert_eq!(default.controls().len(), 2);
    }

    #[test]
    fn test_disabled_controls() {
        assert!(bare_map().controls().is_empty());
    }

    #[test]
    fn test_invalid_construction() {
        assert!(matches!(
            Map::new(LatLng::new(0.0, 0.0), 30.0),
            Err(MapError::InvalidArgument(_))
        ));
        assert!(matches!(
            Map::new(LatLng::new(95.0, 0.0), 2.0),
            Err(MapError::InvalidCoordinates(_))
        ));
    }

    #[test]
    fn test_view_changes_emit_events() {
        let mut map = bare_map();
        map.set_center(LatLng::new(1.0, 2.0)).unwrap();
        map.set_zoom(5.0).unwrap();
        map.set_zoom(5.0).unwrap();
        assert!(map.set_zoom(-1.0).is_err());
        assert_eq!(map.zoom(), 5.0);

        let events = map.process_events();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[1],
            MapEvent::ViewChanged {
                center: LatLng::new(1.0, 2.0),
                zoom: 5.0
            }
        );
    }

    #[test]
    fn test_search_and_draw_controls() {
        let mut map = bare_map();
        let search = map
            .add_search_control(Position::TopLeft, SearchOptions::default())
            .unwrap();
        let draw = map.add_draw_control(DrawOptions::default()).unwrap();

        match &map.control(&search).unwrap().kind {
            ControlKind::Search(options) => {
                assert_eq!(options.url, crate::core::constants::NOMINATIM_SEARCH_URL)
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(map.control(&draw).unwrap().kind.name(), "draw");
    }

    #[test]
    fn test_add_tile_layer_and_basemap() {
        let mut map = bare_map();
        let tile = map
            .add_tile_layer(
                "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
                "OSM",
                "",
                TileLayerOptions::default(),
            )
            .unwrap();
        let base = map.add_basemap("CartoDB.Positron").unwrap();

        // Base layers draw beneath overlays
        let order: Vec<_> = map.layers().iter().map(|l| l.id().to_string()).collect();
        assert_eq!(order, vec![base.clone(), tile]);
        assert_eq!(map.base_layer_ids(), vec![base]);

        assert!(matches!(
            map.add_basemap("Nowhere.Tiles"),
            Err(MapError::InvalidBasemapName { .. })
        ));
        assert_eq!(map.layers().len(), 2);
    }

    #[test]
    fn test_set_basemap_replaces_base_layer() {
        let mut map = bare_map();
        map.add_basemap("OpenStreetMap").unwrap();
        let satellite = map.set_basemap("satellite").unwrap();
        assert_eq!(map.base_layer_ids(), vec![satellite.clone()]);
        assert_eq!(map.layer(&satellite).unwrap().name(), "Google Satellite");

        assert!(map.set_basemap("Esri").is_err());
        assert_eq!(map.base_layer_ids(), vec![satellite]);
    }

    #[test]
    fn test_add_geojson_from_value() {
        let mut map = bare_map();
        let id = map
            .add_geojson(
                json!({"type": "Point", "coordinates": [-83.92, 35.96]}).into(),
                "Knoxville",
                FeatureStyle::default(),
            )
            .unwrap();
        let layer = map.layer(&id).unwrap();
        assert_eq!(layer.layer_type(), LayerType::GeoJson);
        assert_eq!(layer.bounds().unwrap().center(), LatLng::new(35.96, -83.92));

        assert!(matches!(
            map.add_geojson(GeoJsonSource::Text("{".into()), "bad", FeatureStyle::default()),
            Err(MapError::ParseError(_))
        ));
    }

    #[test]
    fn test_add_vector_rejects_shapefiles() {
        let mut map = bare_map();
        assert!(matches!(
            map.add_vector("countries.shp", "Countries"),
            Err(MapError::InvalidArgument(_))
        ));
        assert!(matches!(
            map.add_vector("/no/such/countries.geojson", "Countries"),
            Err(MapError::Io(_))
        ));
        assert!(map.layers().is_empty());
    }

    #[tokio::test]
    async fn test_add_raster() {
        let mut map = bare_map();
        let source = StaticTileJson(json!({
            "bounds": [-75.0, 40.0, -73.0, 41.0],
            "tiles": ["https://tiles.example/{z}/{x}/{y}.png"],
            "minzoom": 8,
            "maxzoom": 14
        }));
        let bounds = map
            .add_raster(&source, "https://data.example/dem.tif", "DEM")
            .await
            .unwrap();
        assert_eq!(bounds, LatLngBounds::from_coords(40.0, -75.0, 41.0, -73.0));

        let layer = map.layers()[0];
        let tile = layer.as_any().downcast_ref::<TileLayer>().unwrap();
        assert_eq!(tile.url_template(), "https://tiles.example/{z}/{x}/{y}.png");
        assert_eq!(tile.tile_options().min_zoom, 8);
        assert_eq!(tile.bounds(), Some(bounds));
    }

    #[tokio::test]
    async fn test_add_raster_with_excessive_maxzoom() {
        let mut map = bare_map();
        let source = StaticTileJson(json!({
            "bounds": [-180.0, -85.0, 180.0, 85.0],
            "tiles": ["https://tiles.example/{z}/{x}/{y}.png"],
            "maxzoom": 100
        }));
        map.add_raster(&source, "https://data.example/deep.tif", "Deep")
            .await
            .unwrap();

        let tile = map.layers()[0].as_any().downcast_ref::<TileLayer>().unwrap();
        assert_eq!(tile.tile_options().max_zoom, crate::core::constants::MAX_TILE_ZOOM);
        assert!(tile.tile_url(TileCoord::new(0, 0, 70)).is_none());
        assert!(tile.tile_url(TileCoord::new(0, 0, 3)).is_some());
    }

    #[tokio::test]
    async fn test_add_raster_malformed_leaves_map_untouched() {
        let mut map = bare_map();
        let source = StaticTileJson(json!({ "bounds": [1, 2, 3], "tiles": [] }));
        let result = map.add_raster(&source, "x.tif", "X").await;
        assert!(matches!(result, Err(MapError::MalformedTileResponse(_))));
        assert!(map.layers().is_empty());
    }

    #[test]
    fn test_add_image() {
        let mut map = bare_map();
        let id = map
            .add_image(
                "https://example.com/img.png",
                LatLngBounds::from_coords(0.0, 0.0, 1.0, 1.0),
                "Image",
            )
            .unwrap();
        assert_eq!(map.layer(&id).unwrap().layer_type(), LayerType::Image);
    }

    #[test]
    fn test_dropdown_callbacks() {
        let mut map = bare_map();
        let id = map.add_dropdown(["Apple", "Banana"], Position::BottomRight).unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        map.on_dropdown_change(&id, move |value| sink.lock().unwrap().push(value.to_string()))
            .unwrap();

        map.handle_widget_event(WidgetEvent::ValueChanged {
            widget_id: id.clone(),
            value: "Banana".into(),
        })
        .unwrap();
        assert!(map
            .handle_widget_event(WidgetEvent::ValueChanged {
                widget_id: id.clone(),
                value: "Cherry".into(),
            })
            .is_err());

        assert_eq!(*seen.lock().unwrap(), vec!["Banana".to_string()]);
        match &map.control(&id).unwrap().kind {
            ControlKind::Dropdown(dropdown) => assert_eq!(dropdown.value(), "Banana"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(map.on_dropdown_change("missing", |_| {}).is_err());
        assert!(matches!(
            map.add_dropdown(Vec::<String>::new(), Position::TopLeft),
            Err(MapError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_toolbar_switches_basemap() {
        let mut map = bare_map();
        map.add_basemap("OpenStreetMap").unwrap();
        let toolbar = map.add_toolbar(Position::TopRight).unwrap();

        map.handle_widget_event(WidgetEvent::ButtonClicked {
            widget_id: toolbar.clone(),
            button: "toggle".into(),
        })
        .unwrap();
        map.handle_widget_event(WidgetEvent::ValueChanged {
            widget_id: toolbar.clone(),
            value: "Esri.WorldImagery".into(),
        })
        .unwrap();

        let bases = map.base_layer_ids();
        assert_eq!(bases.len(), 1);
        assert_eq!(map.layer(&bases[0]).unwrap().name(), "Esri.WorldImagery");

        let events: Vec<_> = map
            .process_events()
            .into_iter()
            .map(|e| e.event_type())
            .collect();
        assert!(events.contains(&"baselayerchange"));
        assert!(events.contains(&"widgetchange"));

        assert!(map
            .handle_widget_event(WidgetEvent::ButtonClicked {
                widget_id: toolbar,
                button: "explode".into(),
            })
            .is_err());
    }

    #[test]
    fn test_listeners_and_json_snapshot() {
        let mut map = bare_map();
        let added = Arc::new(Mutex::new(Vec::new()));
        let sink = added.clone();
        map.on("layeradd", move |event| {
            if let MapEvent::LayerAdd { layer_id } = event {
                sink.lock().unwrap().push(layer_id.clone());
            }
        });

        let marker = Marker::new("m1".into(), LatLng::new(1.0, 1.0));
        map.add_layer(Box::new(marker)).unwrap();
        map.process_events();
        assert_eq!(*added.lock().unwrap(), vec!["m1".to_string()]);

        let json = map.to_json();
        assert_eq!(json["center"], json!([20.0, 0.0]));
        assert_eq!(json["layers"][0]["id"], "m1");
        assert_eq!(json["layers"][0]["type"], "marker");
        assert_eq!(json["options"]["layers_control_position"], "topright");
    }
}
