use crate::{
    core::geo::{LatLng, LatLngBounds},
    layers::base::{next_layer_id, LayerProperties, LayerTrait, LayerType},
};

#[derive(Debug, Clone)]
pub struct Marker {
    properties: LayerProperties,
    position: LatLng,
    title: Option<String>,
    popup_text: Option<String>,
    draggable: bool,
}

impl Marker {
    pub fn new(id: String, position: LatLng) -> Self {
        let properties = LayerProperties::new(id, "Marker".to_string(), LayerType::Marker);
        Self {
            properties,
            position,
            title: None,
            popup_text: None,
            draggable: false,
        }
    }

    /// Marker with a generated id.
    pub fn at(position: LatLng) -> Self {
        Self::new(next_layer_id(LayerType::Marker), position)
    }

    /// Hover title; also used as the layer name.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        self.properties.name = title.clone();
        self.title = Some(title);
        self
    }

    pub fn with_popup(mut self, text: String) -> Self {
        self.popup_text = Some(text);
        self
    }

    pub fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn set_position(&mut self, position: LatLng) {
        self.position = position;
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

impl LayerTrait for Marker {
    crate::impl_layer_trait!(Marker, properties);

    fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "location": [self.position.lat, self.position.lng],
            "title": self.title,
            "popup": self.popup_text,
            "draggable": self.draggable,
        })
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        Some(LatLngBounds::new(self.position, self.position))
    }
}
