use crate::{
    core::{
        constants::CLUSTER_GRID_SIZE,
        geo::{LatLng, LatLngBounds},
    },
    layers::{
        base::{next_layer_id, LayerProperties, LayerTrait, LayerType},
        marker::Marker,
    },
    prelude::HashMap,
};

/// Configuration for clustering
#[derive(Debug, Clone)]
pub struct ClusteringConfig {
    /// Grid cell size in pixels at the zoom being clustered
    pub grid_size: f64,
    /// At or above this zoom every marker is its own cluster
    pub disable_clustering_at_zoom: Option<f64>,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            grid_size: CLUSTER_GRID_SIZE,
            disable_clustering_at_zoom: None,
        }
    }
}

/// A group of markers that share a grid cell at some zoom level
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// Mean position of the members
    pub center: LatLng,
    /// Ids of the member markers, in insertion order
    pub marker_ids: Vec<String>,
    pub zoom_level: f64,
}

impl Cluster {
    pub fn count(&self) -> usize {
        self.marker_ids.len()
    }

    pub fn is_single(&self) -> bool {
        self.marker_ids.len() == 1
    }
}

/// Layer that visually groups nearby markers at low zoom levels
pub struct MarkerCluster {
    properties: LayerProperties,
    markers: Vec<Marker>,
    config: ClusteringConfig,
}

impl MarkerCluster {
    pub fn new(id: String) -> Self {
        let properties =
            LayerProperties::new(id, "Marker Cluster".to_string(), LayerType::MarkerCluster);
        Self {
            properties,
            markers: Vec::new(),
            config: ClusteringConfig::default(),
        }
    }

    /// Empty cluster with a generated id.
    pub fn empty() -> Self {
        Self::new(next_layer_id(LayerType::MarkerCluster))
    }

    pub fn with_config(mut self, config: ClusteringConfig) -> Self {
        self.config = config;
        self
    }

    pub fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Group the markers into grid clusters as they would appear at `zoom`.
    ///
    /// Markers are projected to Web Mercator pixels and bucketed into square
    /// cells of `grid_size` pixels. Output is ordered by cell, row-major.
    pub fn clusters_at(&self, zoom: f64) -> Vec<Cluster> {
        let unclustered = self
            .config
            .disable_clustering_at_zoom
            .is_some_and(|limit| zoom >= limit);

        if unclustered {
            return self
                .markers
                .iter()
                .map(|m| Cluster {
                    center: m.position(),
                    marker_ids: vec![m.id().to_string()],
                    zoom_level: zoom,
                })
                .collect();
        }

        let grid_size = self.config.grid_size;
        let mut cells: HashMap<(i64, i64), Vec<&Marker>> = HashMap::default();
        for marker in &self.markers {
            let pixel = marker.position().project(zoom);
            let cell = (
                (pixel.x / grid_size).floor() as i64,
                (pixel.y / grid_size).floor() as i64,
            );
            cells.entry(cell).or_default().push(marker);
        }

        let mut keys: Vec<_> = cells.keys().copied().collect();
        keys.sort_by_key(|&(x, y)| (y, x));

        keys.into_iter()
            .filter_map(|key| cells.remove(&key))
            .map(|members| {
                let n = members.len() as f64;
                let lat = members.iter().map(|m| m.position().lat).sum::<f64>() / n;
                let lng = members.iter().map(|m| m.position().lng).sum::<f64>() / n;
                Cluster {
                    center: LatLng::new(lat, lng),
                    marker_ids: members.iter().map(|m| m.id().to_string()).collect(),
                    zoom_level: zoom,
                }
            })
            .collect()
    }
}

impl LayerTrait for MarkerCluster {
    crate::impl_layer_trait!(MarkerCluster, properties);

    fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "markers": self.markers.iter().map(|m| m.describe()).collect::<Vec<_>>(),
        })
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        LatLngBounds::from_points(self.markers.iter().map(|m| m.position()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(id: &str, lat: f64, lng: f64) -> Marker {
        Marker::new(id.to_string(), LatLng::new(lat, lng))
    }

    #[test]
    fn test_empty_cluster() {
        let cluster = MarkerCluster::empty();
        assert!(cluster.is_empty());
        assert!(cluster.bounds().is_none());
        assert!(cluster.clusters_at(3.0).is_empty());
        assert_eq!(cluster.options()["markers"], serde_json::json!([]));
    }

    #[test]
    fn test_nearby_markers_merge_at_low_zoom() {
        let mut layer = MarkerCluster::new("c".into());
        layer.add_marker(marker("a", 48.85, 2.35));
        layer.add_marker(marker("b", 48.86, 2.34));
        layer.add_marker(marker("c", -33.86, 151.21));

        let clusters = layer.clusters_at(2.0);
        assert_eq!(clusters.len(), 2);

        let paris = clusters.iter().find(|c| c.count() == 2).unwrap();
        assert_eq!(paris.marker_ids, vec!["a", "b"]);
        assert!((paris.center.lat - 48.855).abs() < 1e-9);
        assert!((paris.center.lng - 2.345).abs() < 1e-9);

        let sydney = clusters.iter().find(|c| c.is_single()).unwrap();
        assert_eq!(sydney.marker_ids, vec!["c"]);
    }

    #[test]
    fn test_nearby_markers_split_at_high_zoom() {
        let mut layer = MarkerCluster::new("c".into());
        layer.add_marker(marker("a", 48.85, 2.35));
        layer.add_marker(marker("b", 48.86, 2.34));

        assert_eq!(layer.clusters_at(16.0).len(), 2);
    }

    #[test]
    fn test_disable_clustering_at_zoom() {
        let mut layer = MarkerCluster::new("c".into()).with_config(ClusteringConfig {
            disable_clustering_at_zoom: Some(5.0),
            ..Default::default()
        });
        layer.add_marker(marker("a", 0.0, 0.0));
        layer.add_marker(marker("b", 0.0, 0.0));

        assert_eq!(layer.clusters_at(4.0).len(), 1);
        assert_eq!(layer.clusters_at(5.0).len(), 2);
    }
}
