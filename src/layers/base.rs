// LayerTrait is unified with LayerOperations in shared traits
pub use crate::traits::LayerOperations as LayerTrait;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerType {
    Tile,
    Marker,
    MarkerCluster,
    GeoJson,
    Image,
}

impl std::fmt::Display for LayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerType::Tile => write!(f, "tile"),
            LayerType::Marker => write!(f, "marker"),
            LayerType::MarkerCluster => write!(f, "marker_cluster"),
            LayerType::GeoJson => write!(f, "geojson"),
            LayerType::Image => write!(f, "image"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LayerProperties {
    pub id: String,
    pub name: String,
    pub layer_type: LayerType,
    pub z_index: i32,
    pub opacity: f32,
    pub visible: bool,
}

impl LayerProperties {
    pub fn new(id: String, name: String, layer_type: LayerType) -> Self {
        Self {
            id,
            name,
            layer_type,
            z_index: 0,
            opacity: 1.0,
            visible: true,
        }
    }
}

/// Generates a layer id unique within the process, e.g. `marker-17`.
pub fn next_layer_id(layer_type: LayerType) -> String {
    use std::sync::atomic::{AtomicU64, Ordering};

    static NEXT_ID: AtomicU64 = AtomicU64::new(1);
    format!("{}-{}", layer_type, NEXT_ID.fetch_add(1, Ordering::Relaxed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_properties() {
        let props = LayerProperties::new(
            "test".to_string(),
            "Test Layer".to_string(),
            LayerType::GeoJson,
        );

        assert_eq!(props.id, "test");
        assert_eq!(props.name, "Test Layer");
        assert_eq!(props.layer_type, LayerType::GeoJson);
        assert_eq!(props.z_index, 0);
        assert_eq!(props.opacity, 1.0);
        assert!(props.visible);
    }

    #[test]
    fn test_layer_type_display() {
        assert_eq!(LayerType::Tile.to_string(), "tile");
        assert_eq!(LayerType::MarkerCluster.to_string(), "marker_cluster");
        assert_eq!(LayerType::Marker.to_string(), "marker");
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let a = next_layer_id(LayerType::Marker);
        let b = next_layer_id(LayerType::Marker);
        assert_ne!(a, b);
        assert!(a.starts_with("marker-"));
    }
}
