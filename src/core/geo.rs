use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::core::constants::{MAX_TILE_ZOOM, TILE_SIZE};

/// Web Mercator projection constants
const MAX_LATITUDE: f64 = 85.0511287798;

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }

    /// Clamps latitude to the range Web Mercator can project
    pub fn clamp_lat(lat: f64) -> f64 {
        lat.clamp(-MAX_LATITUDE, MAX_LATITUDE)
    }

    /// Projects to global pixel coordinates at `zoom` (EPSG:3857, 256px tiles)
    pub fn project(&self, zoom: f64) -> Point {
        let scale = TILE_SIZE as f64 * 2_f64.powf(zoom);
        let lat_rad = Self::clamp_lat(self.lat).to_radians();
        let x = (self.lng + 180.0) / 360.0 * scale;
        let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * scale;
        Point::new(x, y)
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

/// A named point supplied by the caller for plotting.
///
/// Deserializes from objects shaped like
/// `{"name": "Knoxville", "latitude": 35.96, "longitude": -83.92}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            name: None,
            latitude,
            longitude,
        }
    }

    pub fn named(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: Some(name.into()),
            latitude,
            longitude,
        }
    }

    pub fn lat_lng(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}

/// Represents a point in screen or projected coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a bounding box of geographical coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Creates bounds from individual coordinates
    pub fn from_coords(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self::new(LatLng::new(south, west), LatLng::new(north, east))
    }

    /// Creates bounds from a `[west, south, east, north]` array, the order
    /// TileJSON and GeoJSON use.
    pub fn from_wsen(wsen: [f64; 4]) -> Self {
        Self::from_coords(wsen[1], wsen[0], wsen[3], wsen[2])
    }

    /// Smallest bounds containing every point, `None` for an empty iterator.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = LatLng>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self::new(first, first);
        for point in iter {
            bounds.extend(&point);
        }
        Some(bounds)
    }

    /// Checks if the bounds contain a point
    pub fn contains(&self, point: &LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }

    /// Checks if the bounds intersect with another bounds
    pub fn intersects(&self, other: &LatLngBounds) -> bool {
        !(other.north_east.lat < self.south_west.lat
            || other.south_west.lat > self.north_east.lat
            || other.north_east.lng < self.south_west.lng
            || other.south_west.lng > self.north_east.lng)
    }

    /// Extends the bounds to include a point
    pub fn extend(&mut self, point: &LatLng) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }

    /// Gets the center point of the bounds
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }

    /// `[[south, west], [north, east]]`, the corner order leaflet expects.
    pub fn to_corners(&self) -> [[f64; 2]; 2] {
        [
            [self.south_west.lat, self.south_west.lng],
            [self.north_east.lat, self.north_east.lng],
        ]
    }
}

/// Represents a tile coordinate in the slippy map tile system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl TileCoord {
    pub fn new(x: u32, y: u32, z: u8) -> Self {
        Self { x, y, z }
    }

    /// Creates a tile coordinate from a LatLng and zoom level
    pub fn from_lat_lng(lat_lng: &LatLng, zoom: u8) -> Self {
        let lat_rad = LatLng::clamp_lat(lat_lng.lat).to_radians();
        let n = 2_f64.powi(zoom as i32);
        let max = (n as u32).saturating_sub(1);

        let x = (((lat_lng.lng + 180.0) / 360.0 * n).floor() as u32).min(max);
        let y = (((1.0 - lat_rad.tan().asinh() / PI) / 2.0 * n).floor() as u32).min(max);

        Self::new(x, y, zoom)
    }

    /// Checks if the tile is valid for the given zoom level
    pub fn is_valid(&self) -> bool {
        if self.z > MAX_TILE_ZOOM {
            return false;
        }
        let max_coord = 1_u64 << self.z;
        (self.x as u64) < max_coord && (self.y as u64) < max_coord
    }

    /// Geographic extent covered by the tile
    pub fn bounds(&self) -> LatLngBounds {
        let n = 2_f64.powi(self.z as i32);
        let lng = |x: f64| x / n * 360.0 - 180.0;
        let lat = |y: f64| (PI * (1.0 - 2.0 * y / n)).sinh().atan().to_degrees();
        let (x, y) = (self.x as f64, self.y as f64);
        LatLngBounds::from_coords(lat(y + 1.0), lng(x), lat(y), lng(x + 1.0))
    }
}
