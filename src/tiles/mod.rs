pub mod basemap;
pub mod providers;
pub mod source;
pub mod tilejson;

pub use basemap::{available_basemaps, resolve_basemap, Basemap};
pub use source::{TileSource, UrlTemplate};
pub use tilejson::{TileJson, TileMetadataSource, TitilerClient};
