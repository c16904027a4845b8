//! Basemap name resolution
//!
//! `roadmap` and `satellite` are special-cased to Google tiles; every other
//! name is looked up in the static provider registry. Names are never
//! evaluated, only matched.

use serde::{Deserialize, Serialize};

use crate::{
    core::{
        constants::{GOOGLE_ROADMAP_URL, GOOGLE_SATELLITE_URL},
        geo::TileCoord,
    },
    tiles::{
        providers::{self, Lookup, TileProvider},
        source::{TileSource, UrlTemplate},
    },
    MapError, Result,
};

/// A resolved basemap. Derived on each call, never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Basemap {
    pub url_template: String,
    pub name: String,
    pub attribution: String,
    pub max_zoom: u8,
    pub subdomains: Vec<String>,
}

impl Basemap {
    fn google(url: &str, name: &str) -> Self {
        Self {
            url_template: url.to_string(),
            name: name.to_string(),
            attribution: String::new(),
            max_zoom: 22,
            subdomains: Vec::new(),
        }
    }

    fn from_provider(provider: &TileProvider) -> Self {
        Self {
            url_template: provider.url.to_string(),
            name: provider.name(),
            attribution: provider.attribution.to_string(),
            max_zoom: provider.max_zoom,
            subdomains: provider.subdomains.chars().map(String::from).collect(),
        }
    }

    /// Concrete URL of one tile of this basemap.
    pub fn tile_url(&self, coord: TileCoord) -> String {
        UrlTemplate::new(self.url_template.as_str())
            .with_subdomains(self.subdomains.iter().cloned())
            .url(coord)
    }
}

/// Resolve a case-insensitive basemap name to its tile template and attribution.
///
/// ```
/// let roadmap = crimpy::resolve_basemap("ROADMAP").unwrap();
/// assert_eq!(roadmap.attribution, "");
/// ```
pub fn resolve_basemap(name: &str) -> Result<Basemap> {
    let key = name.trim();

    let basemap = match key.to_lowercase().as_str() {
        "roadmap" => Basemap::google(GOOGLE_ROADMAP_URL, "Google Roadmap"),
        "satellite" => Basemap::google(GOOGLE_SATELLITE_URL, "Google Satellite"),
        _ => match providers::lookup(key) {
            Lookup::Provider(provider) => Basemap::from_provider(provider),
            Lookup::Family(family) => {
                log::warn!("basemap {:?} names a provider family", name);
                return Err(MapError::UnknownBasemapProvider {
                    name: name.to_string(),
                    variants: family.variants.iter().map(|p| p.name()).collect(),
                });
            }
            Lookup::Missing => {
                log::warn!("unknown basemap {:?}", name);
                return Err(MapError::InvalidBasemapName {
                    name: name.to_string(),
                });
            }
        },
    };

    log::info!("resolved basemap {:?} to {}", name, basemap.name);
    Ok(basemap)
}

/// Every name `resolve_basemap` accepts as a concrete provider, sorted.
pub fn available_basemaps() -> Vec<String> {
    let mut names: Vec<String> = providers::all().iter().map(|p| p.name()).collect();
    names.push("roadmap".to_string());
    names.push("satellite".to_string());
    names.sort_by_key(|n| n.to_lowercase());
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roadmap_any_case() {
        let lower = resolve_basemap("roadmap").unwrap();
        let upper = resolve_basemap("ROADMAP").unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower.url_template, GOOGLE_ROADMAP_URL);
        assert_eq!(lower.attribution, "");
    }

    #[test]
    fn test_satellite() {
        let satellite = resolve_basemap(" Satellite ").unwrap();
        assert_eq!(satellite.url_template, GOOGLE_SATELLITE_URL);
        assert_eq!(satellite.attribution, "");
        assert_eq!(
            satellite.tile_url(TileCoord::new(1, 2, 3)),
            "https://mt1.google.com/vt/lyrs=y&x=1&y=2&z=3"
        );
    }

    #[test]
    fn test_registry_provider() {
        let positron = resolve_basemap("CartoDB.Positron").unwrap();
        assert_eq!(positron.name, "CartoDB.Positron");
        assert!(positron.attribution.contains("CARTO"));
        assert_eq!(positron.subdomains, vec!["a", "b", "c", "d"]);
        assert_eq!(
            positron.tile_url(TileCoord::new(0, 0, 0)),
            "https://a.basemaps.cartocdn.com/light_all/0/0/0.png"
        );
    }

    #[test]
    fn test_unknown_name_is_invalid_basemap_name() {
        for name in ["Nowhere.Tiles", "", "   ", "OpenStreetMap.", ".Mapnik", "__import__('os')"] {
            match resolve_basemap(name) {
                Err(MapError::InvalidBasemapName { name: reported }) => assert_eq!(reported, name),
                other => panic!("{:?} resolved to {:?}", name, other),
            }
        }
    }

    #[test]
    fn test_family_without_default_lists_variants() {
        match resolve_basemap("esri") {
            Err(MapError::UnknownBasemapProvider { name, variants }) => {
                assert_eq!(name, "esri");
                assert!(variants.contains(&"Esri.WorldImagery".to_string()));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_available_basemaps_all_resolve() {
        let names = available_basemaps();
        assert!(names.contains(&"roadmap".to_string()));
        for name in names {
            assert!(resolve_basemap(&name).is_ok(), "{} failed to resolve", name);
        }
    }
}
