pub mod base;
pub mod cluster;
pub mod geojson;
pub mod image;
pub mod macros;
pub mod manager;
pub mod marker;
pub mod tile;
