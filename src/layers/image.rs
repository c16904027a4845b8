use crate::{
    core::geo::LatLngBounds,
    layers::base::{next_layer_id, LayerProperties, LayerTrait, LayerType},
};

/// An image stretched over a geographic extent
pub struct ImageOverlay {
    properties: LayerProperties,
    url: String,
    bounds: LatLngBounds,
}

impl ImageOverlay {
    pub fn new(id: String, url: String, bounds: LatLngBounds, name: String) -> Self {
        let properties = LayerProperties::new(id, name, LayerType::Image);
        Self {
            properties,
            url,
            bounds,
        }
    }

    pub fn with_generated_id(url: impl Into<String>, bounds: LatLngBounds, name: impl Into<String>) -> Self {
        Self::new(next_layer_id(LayerType::Image), url.into(), bounds, name.into())
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl LayerTrait for ImageOverlay {
    crate::impl_layer_trait!(ImageOverlay, properties);

    fn bounds(&self) -> Option<LatLngBounds> {
        Some(self.bounds.clone())
    }

    fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "url": self.url,
            "bounds": self.bounds.to_corners(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_overlay_options() {
        let overlay = ImageOverlay::new(
            "img".into(),
            "https://example.com/flood.png".into(),
            LatLngBounds::from_coords(10.0, 20.0, 11.0, 21.0),
            "Flood extent".into(),
        );
        assert_eq!(overlay.name(), "Flood extent");
        assert_eq!(overlay.layer_type(), LayerType::Image);
        assert_eq!(
            overlay.options()["bounds"],
            serde_json::json!([[10.0, 20.0], [11.0, 21.0]])
        );
        assert!(overlay.intersects_bounds(&LatLngBounds::from_coords(10.5, 20.5, 12.0, 22.0)));
        assert!(!overlay.intersects_bounds(&LatLngBounds::from_coords(-1.0, -1.0, 0.0, 0.0)));
    }
}
