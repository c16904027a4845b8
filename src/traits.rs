//! Shared trait abstractions
//!
//! Both map surfaces and every layer kind meet at these traits, so helpers
//! such as the location aggregator are written once.

use crate::{
    core::geo::{LatLng, LatLngBounds},
    layers::base::LayerType,
    Result,
};

/// Trait for layer-like objects owned by a map
pub trait LayerOperations: Send + Sync {
    /// Get layer ID
    fn id(&self) -> &str;

    /// Get layer name
    fn name(&self) -> &str;

    /// Get layer type
    fn layer_type(&self) -> LayerType;

    /// Check if layer is visible
    fn is_visible(&self) -> bool;

    /// Set layer visibility
    fn set_visible(&mut self, visible: bool);

    /// Get layer opacity (0.0 to 1.0)
    fn opacity(&self) -> f32;

    /// Set layer opacity
    fn set_opacity(&mut self, opacity: f32);

    /// Get layer z-index for ordering
    fn z_index(&self) -> i32;

    /// Set layer z-index
    fn set_z_index(&mut self, z_index: i32);

    /// Get layer bounds if applicable
    fn bounds(&self) -> Option<LatLngBounds> {
        None
    }

    /// Check if layer intersects with given bounds
    fn intersects_bounds(&self, bounds: &LatLngBounds) -> bool {
        match self.bounds() {
            Some(layer_bounds) => layer_bounds.intersects(bounds),
            None => true,
        }
    }

    /// Layer-specific options, as the front end consumes them
    fn options(&self) -> serde_json::Value;

    /// Full description: shared properties plus `options()`
    fn describe(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.id(),
            "name": self.name(),
            "type": self.layer_type().to_string(),
            "visible": self.is_visible(),
            "opacity": self.opacity(),
            "z_index": self.z_index(),
            "options": self.options(),
        })
    }

    /// Dynamic casting support
    fn as_any(&self) -> &dyn std::any::Any;
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}

/// A map that can receive layers and be recentered.
///
/// Implemented by both [`crate::Map`] and [`crate::folium::Map`].
pub trait MapSurface {
    fn add_layer(&mut self, layer: Box<dyn LayerOperations>) -> Result<()>;

    fn has_layer(&self, layer_id: &str) -> bool;

    fn center(&self) -> LatLng;

    fn set_center(&mut self, center: LatLng) -> Result<()>;
}
