use crate::{layers::base::LayerTrait, prelude::HashMap, MapError, Result};

/// Owns the layers of a map, keeping them in draw order
pub struct LayerManager {
    /// All layers indexed by ID
    layers: HashMap<String, Box<dyn LayerTrait>>,
    /// Ordered list of layer IDs (sorted by z-index, insertion order within a z-index)
    render_order: Vec<String>,
}

impl LayerManager {
    pub fn new() -> Self {
        Self {
            layers: HashMap::default(),
            render_order: Vec::new(),
        }
    }

    /// Adds a layer to the manager
    pub fn add_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        let layer_id = layer.id().to_string();
        if self.layers.contains_key(&layer_id) {
            return Err(MapError::Layer(format!("layer {:?} already added", layer_id)));
        }
        let z_index = layer.z_index();

        self.layers.insert(layer_id.clone(), layer);

        // Insert in sorted order by z-index
        let insert_pos = self
            .render_order
            .iter()
            .position(|id| {
                self.layers
                    .get(id)
                    .map(|l| l.z_index() > z_index)
                    .unwrap_or(false)
            })
            .unwrap_or(self.render_order.len());

        self.render_order.insert(insert_pos, layer_id);
        Ok(())
    }

    /// Removes a layer from the manager
    pub fn remove_layer(&mut self, layer_id: &str) -> Option<Box<dyn LayerTrait>> {
        self.render_order.retain(|id| id != layer_id);
        self.layers.remove(layer_id)
    }

    /// Gets a reference to a layer by ID
    pub fn get_layer(&self, layer_id: &str) -> Option<&dyn LayerTrait> {
        self.layers.get(layer_id).map(|l| l.as_ref())
    }

    /// Applies a function to a specific layer mutably
    pub fn with_layer_mut<F, R>(&mut self, layer_id: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut dyn LayerTrait) -> R,
    {
        self.layers.get_mut(layer_id).map(|layer| f(layer.as_mut()))
    }

    /// Lists all layer IDs in draw order
    pub fn list_layers(&self) -> Vec<String> {
        self.render_order.clone()
    }

    /// Gets all layers in draw order
    pub fn layers(&self) -> Vec<&dyn LayerTrait> {
        self.render_order
            .iter()
            .filter_map(|id| self.layers.get(id).map(|l| l.as_ref()))
            .collect()
    }

    /// Gets the number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Checks if the manager is empty
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Default for LayerManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::geo::LatLng, layers::marker::Marker, layers::tile::TileLayer};

    #[test]
    fn test_layers_keep_z_then_insertion_order() {
        let mut manager = LayerManager::new();
        manager
            .add_layer(Box::new(Marker::new("m1".into(), LatLng::new(1.0, 1.0))))
            .unwrap();
        manager
            .add_layer(Box::new(Marker::new("m2".into(), LatLng::new(2.0, 2.0))))
            .unwrap();

        let mut base = TileLayer::new("base".into(), "https://t/{z}/{x}/{y}.png".into(), "Base".into());
        base.set_z_index(-1);
        manager.add_layer(Box::new(base)).unwrap();

        assert_eq!(manager.list_layers(), vec!["base", "m1", "m2"]);
        assert_eq!(manager.len(), 3);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut manager = LayerManager::new();
        let marker = || Box::new(Marker::new("same".into(), LatLng::new(0.0, 0.0)));
        manager.add_layer(marker()).unwrap();
        assert!(matches!(manager.add_layer(marker()), Err(MapError::Layer(_))));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_remove_layer() {
        let mut manager = LayerManager::new();
        manager
            .add_layer(Box::new(Marker::new("m".into(), LatLng::new(0.0, 0.0))))
            .unwrap();
        assert!(manager.remove_layer("m").is_some());
        assert!(manager.remove_layer("m").is_none());
        assert!(manager.is_empty());
        assert!(manager.get_layer("m").is_none());
    }
}
