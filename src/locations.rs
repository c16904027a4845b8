//! Plotting a list of named points
//!
//! One marker per location plus a marker-cluster layer, then the map is
//! recentered on the arithmetic mean of the coordinates. Works against any
//! [`MapSurface`].

use crate::{
    core::geo::{LatLng, Location},
    layers::{base::LayerTrait, cluster::MarkerCluster, marker::Marker},
    traits::MapSurface,
    MapError, Result,
};

/// Where the markers of `add_locations_to_map_with` end up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClusterMode {
    /// Markers go straight onto the map; the cluster layer is added empty.
    #[default]
    Detached,
    /// Markers go into the cluster layer, which is the only layer added.
    Grouped,
}

/// Mean latitude and mean longitude of `locations`.
///
/// ```
/// use crimpy::{mean_center, LatLng, Location};
///
/// let center = mean_center(&[Location::new(10.0, 20.0), Location::new(30.0, 40.0)]).unwrap();
/// assert_eq!(center, LatLng::new(20.0, 30.0));
/// ```
pub fn mean_center(locations: &[Location]) -> Result<LatLng> {
    if locations.is_empty() {
        return Err(MapError::EmptyLocations);
    }
    let n = locations.len() as f64;
    let (lat_sum, lng_sum) = locations
        .iter()
        .fold((0.0, 0.0), |(lat, lng), l| (lat + l.latitude, lng + l.longitude));
    Ok(LatLng::new(lat_sum / n, lng_sum / n))
}

/// Same as [`add_locations_to_map_with`] in [`ClusterMode::Detached`].
pub fn add_locations_to_map<M>(map: &mut M, locations: &[Location]) -> Result<()>
where
    M: MapSurface + ?Sized,
{
    add_locations_to_map_with(map, locations, ClusterMode::default())
}

/// Add a marker for each location and recenter on their mean.
///
/// Input is checked before the map is touched: an empty slice is
/// `EmptyLocations` and an out-of-range coordinate is `InvalidCoordinates`.
/// If a generated layer id is already on the map nothing is added and the
/// error is `Layer`.
pub fn add_locations_to_map_with<M>(
    map: &mut M,
    locations: &[Location],
    mode: ClusterMode,
) -> Result<()>
where
    M: MapSurface + ?Sized,
{
    let center = mean_center(locations)?;
    if let Some(bad) = locations.iter().find(|l| !l.lat_lng().is_valid()) {
        return Err(MapError::InvalidCoordinates(format!(
            "({}, {}) is out of range",
            bad.latitude, bad.longitude
        )));
    }

    let markers = locations.iter().map(|location| {
        let marker = Marker::at(location.lat_lng());
        match &location.name {
            Some(name) => marker.with_title(name.clone()).with_popup(name.clone()),
            None => marker,
        }
    });

    let mut cluster = MarkerCluster::empty();
    let mut layers: Vec<Box<dyn LayerTrait>> = Vec::with_capacity(locations.len() + 1);
    match mode {
        ClusterMode::Detached => {
            layers.extend(markers.map(|m| Box::new(m) as Box<dyn LayerTrait>));
        }
        ClusterMode::Grouped => {
            for marker in markers {
                cluster.add_marker(marker);
            }
        }
    }
    layers.push(Box::new(cluster));

    // Nothing is added if any id is already taken
    if let Some(taken) = layers.iter().find(|l| map.has_layer(l.id())) {
        return Err(MapError::Layer(format!("layer {:?} already added", taken.id())));
    }
    for layer in layers {
        map.add_layer(layer)?;
    }

    log::info!(
        "plotted {} locations, centering on ({}, {})",
        locations.len(),
        center.lat,
        center.lng
    );
    map.set_center(center)
}
