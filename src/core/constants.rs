//! Engine-wide defaults and fixed endpoints.
//! Keeping them in a single place makes it easier to tweak them.

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Map center used when the caller does not pick one, as `(lat, lng)`.
pub const DEFAULT_CENTER: (f64, f64) = (20.0, 0.0);

/// Zoom level used when the caller does not pick one.
pub const DEFAULT_ZOOM: f64 = 2.0;

/// Deepest slippy-map zoom a tile request may use.
pub const MAX_TILE_ZOOM: u8 = 30;

pub const DEFAULT_MIN_ZOOM: f64 = 0.0;
pub const DEFAULT_MAX_ZOOM: f64 = 24.0;

/// Geocoding endpoint queried by the search control; `{s}` is the query.
pub const NOMINATIM_SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search?format=json&q={s}";

/// Basemap the toolbar selector starts on.
pub const DEFAULT_BASEMAP: &str = "OpenStreetMap.Mapnik";

pub const GOOGLE_ROADMAP_URL: &str = "https://mt1.google.com/vt/lyrs=m&x={x}&y={y}&z={z}";
pub const GOOGLE_SATELLITE_URL: &str = "https://mt1.google.com/vt/lyrs=y&x={x}&y={y}&z={z}";

/// TiTiler endpoint returning TileJSON for a cloud-optimized GeoTIFF.
pub const TITILER_TILEJSON_URL: &str = "https://titiler.xyz/cog/tilejson.json";

/// Whole-request timeout for TileJSON lookups, in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;
pub const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Pixel size of a marker-cluster grid cell.
pub const CLUSTER_GRID_SIZE: f64 = 80.0;

/// Length of `generate_random_string` output when unspecified.
pub const DEFAULT_RANDOM_STRING_LENGTH: usize = 10;

/// Length of `generate_lucky_number` output when unspecified.
pub const DEFAULT_LUCKY_NUMBER_LENGTH: usize = 1;

/// Longest digit run that always fits in a `u64`.
pub const MAX_LUCKY_NUMBER_LENGTH: usize = 19;
