//! Static registry of known XYZ tile providers
//!
//! Providers are addressed by a dotted `Family.Variant` path, or by a single
//! segment for providers without variants. Lookups are case-insensitive. The
//! registry is built once, on first use.

use once_cell::sync::Lazy;

use crate::prelude::HashMap;

/// One concrete tile provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileProvider {
    pub family: &'static str,
    /// `None` for single-provider families such as `OpenTopoMap`
    pub variant: Option<&'static str>,
    pub url: &'static str,
    pub attribution: &'static str,
    pub max_zoom: u8,
    pub subdomains: &'static str,
}

impl TileProvider {
    /// Canonical dotted name, e.g. `CartoDB.Positron`.
    pub fn name(&self) -> String {
        match self.variant {
            Some(variant) => format!("{}.{}", self.family, variant),
            None => self.family.to_string(),
        }
    }
}

/// A provider family and the variants registered under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderFamily {
    pub name: &'static str,
    /// Variant a bare family name resolves to, if any
    pub default_variant: Option<&'static str>,
    pub variants: Vec<&'static TileProvider>,
}

/// Result of looking a dotted name up in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Provider(&'static TileProvider),
    /// The name addresses a family that has no single provider
    Family(&'static ProviderFamily),
    Missing,
}

const OSM_ATTRIBUTION: &str = "© OpenStreetMap contributors";
const CARTO_ATTRIBUTION: &str = "© OpenStreetMap contributors © CARTO";
const STADIA_ATTRIBUTION: &str = "© Stadia Maps © OpenMapTiles © OpenStreetMap contributors";
const STAMEN_ATTRIBUTION: &str =
    "© Stadia Maps © Stamen Design © OpenMapTiles © OpenStreetMap contributors";
const USGS_ATTRIBUTION: &str = "Tiles courtesy of the U.S. Geological Survey";

const fn provider(
    family: &'static str,
    variant: Option<&'static str>,
    url: &'static str,
    attribution: &'static str,
    max_zoom: u8,
    subdomains: &'static str,
) -> TileProvider {
    TileProvider {
        family,
        variant,
        url,
        attribution,
        max_zoom,
        subdomains,
    }
}

static PROVIDERS: &[TileProvider] = &[
    provider(
        "OpenStreetMap",
        Some("Mapnik"),
        "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
        OSM_ATTRIBUTION,
        19,
        "",
    ),
    provider(
        "OpenStreetMap",
        Some("DE"),
        "https://tile.openstreetmap.de/{z}/{x}/{y}.png",
        OSM_ATTRIBUTION,
        18,
        "",
    ),
    provider(
        "OpenStreetMap",
        Some("France"),
        "https://{s}.tile.openstreetmap.fr/osmfr/{z}/{x}/{y}.png",
        "© OpenStreetMap France | © OpenStreetMap contributors",
        20,
        "abc",
    ),
    provider(
        "OpenStreetMap",
        Some("HOT"),
        "https://{s}.tile.openstreetmap.fr/hot/{z}/{x}/{y}.png",
        "© OpenStreetMap contributors, Tiles style by Humanitarian OpenStreetMap Team hosted by OpenStreetMap France",
        19,
        "abc",
    ),
    provider(
        "OpenTopoMap",
        None,
        "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
        "Map data: © OpenStreetMap contributors, SRTM | Map style: © OpenTopoMap (CC-BY-SA)",
        17,
        "abc",
    ),
    provider(
        "Esri",
        Some("WorldStreetMap"),
        "https://server.arcgisonline.com/ArcGIS/rest/services/World_Street_Map/MapServer/tile/{z}/{y}/{x}",
        "Tiles © Esri — Source: Esri, DeLorme, NAVTEQ, USGS, Intermap, iPC, NRCAN, Esri Japan, METI, Esri China (Hong Kong), Esri (Thailand), TomTom, 2012",
        18,
        "",
    ),
    provider(
        "Esri",
        Some("WorldImagery"),
        "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
        "Tiles © Esri — Source: Esri, i-cubed, USDA, USGS, AEX, GeoEye, Getmapping, Aerogrid, IGN, IGP, UPR-EGP, and the GIS User Community",
        18,
        "",
    ),
    provider(
        "Esri",
        Some("WorldTopoMap"),
        "https://server.arcgisonline.com/ArcGIS/rest/services/World_Topo_Map/MapServer/tile/{z}/{y}/{x}",
        "Tiles © Esri — Esri, DeLorme, NAVTEQ, TomTom, Intermap, iPC, USGS, FAO, NPS, NRCAN, GeoBase, Kadaster NL, Ordnance Survey, Esri Japan, METI, Esri China (Hong Kong), and the GIS User Community",
        18,
        "",
    ),
    provider(
        "Esri",
        Some("WorldGrayCanvas"),
        "https://server.arcgisonline.com/ArcGIS/rest/services/Canvas/World_Light_Gray_Base/MapServer/tile/{z}/{y}/{x}",
        "Tiles © Esri — Esri, DeLorme, NAVTEQ",
        16,
        "",
    ),
    provider(
        "Esri",
        Some("NatGeoWorldMap"),
        "https://server.arcgisonline.com/ArcGIS/rest/services/NatGeo_World_Map/MapServer/tile/{z}/{y}/{x}",
        "Tiles © Esri — National Geographic, Esri, DeLorme, NAVTEQ, UNEP-WCMC, USGS, NASA, ESA, METI, NRCAN, GEBCO, NOAA, iPC",
        16,
        "",
    ),
    provider(
        "CartoDB",
        Some("Positron"),
        "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png",
        CARTO_ATTRIBUTION,
        20,
        "abcd",
    ),
    provider(
        "CartoDB",
        Some("DarkMatter"),
        "https://{s}.basemaps.cartocdn.com/dark_all/{z}/{x}/{y}{r}.png",
        CARTO_ATTRIBUTION,
        20,
        "abcd",
    ),
    provider(
        "CartoDB",
        Some("Voyager"),
        "https://{s}.basemaps.cartocdn.com/rastertiles/voyager/{z}/{x}/{y}{r}.png",
        CARTO_ATTRIBUTION,
        20,
        "abcd",
    ),
    provider(
        "Stadia",
        Some("AlidadeSmooth"),
        "https://tiles.stadiamaps.com/tiles/alidade_smooth/{z}/{x}/{y}{r}.png",
        STADIA_ATTRIBUTION,
        20,
        "",
    ),
    provider(
        "Stadia",
        Some("AlidadeSmoothDark"),
        "https://tiles.stadiamaps.com/tiles/alidade_smooth_dark/{z}/{x}/{y}{r}.png",
        STADIA_ATTRIBUTION,
        20,
        "",
    ),
    provider(
        "Stadia",
        Some("StamenTerrain"),
        "https://tiles.stadiamaps.com/tiles/stamen_terrain/{z}/{x}/{y}{r}.png",
        STAMEN_ATTRIBUTION,
        18,
        "",
    ),
    provider(
        "Stadia",
        Some("StamenToner"),
        "https://tiles.stadiamaps.com/tiles/stamen_toner/{z}/{x}/{y}{r}.png",
        STAMEN_ATTRIBUTION,
        20,
        "",
    ),
    provider(
        "USGS",
        Some("USTopo"),
        "https://basemap.nationalmap.gov/arcgis/rest/services/USGSTopo/MapServer/tile/{z}/{y}/{x}",
        USGS_ATTRIBUTION,
        20,
        "",
    ),
    provider(
        "USGS",
        Some("USImagery"),
        "https://basemap.nationalmap.gov/arcgis/rest/services/USGSImageryOnly/MapServer/tile/{z}/{y}/{x}",
        USGS_ATTRIBUTION,
        20,
        "",
    ),
    provider(
        "Gaode",
        Some("Normal"),
        "http://webrd0{s}.is.autonavi.com/appmaptile?lang=zh_cn&size=1&scale=1&style=8&x={x}&y={y}&z={z}",
        "© Gaode.com",
        19,
        "1234",
    ),
    provider(
        "Gaode",
        Some("Satellite"),
        "http://webst0{s}.is.autonavi.com/appmaptile?style=6&x={x}&y={y}&z={z}",
        "© Gaode.com",
        19,
        "1234",
    ),
];

/// Families that resolve to one of their variants when named alone.
const FAMILY_DEFAULTS: &[(&str, &str)] = &[("OpenStreetMap", "Mapnik")];

struct Registry {
    providers: HashMap<String, &'static TileProvider>,
    families: HashMap<String, ProviderFamily>,
}

static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let mut providers = HashMap::default();
    let mut grouped: HashMap<&'static str, Vec<&'static TileProvider>> = HashMap::default();

    for p in PROVIDERS {
        providers.insert(p.name().to_lowercase(), p);
        if p.variant.is_some() {
            grouped.entry(p.family).or_default().push(p);
        }
    }

    let mut families = HashMap::default();
    for (name, variants) in grouped {
        let default_variant = FAMILY_DEFAULTS
            .iter()
            .find(|(family, _)| *family == name)
            .map(|(_, variant)| *variant);
        families.insert(
            name.to_lowercase(),
            ProviderFamily {
                name,
                default_variant,
                variants,
            },
        );
    }

    log::debug!(
        "tile provider registry built: {} providers, {} families",
        providers.len(),
        families.len()
    );

    Registry {
        providers,
        families,
    }
});

/// Look a dotted provider path up. `name` must already be trimmed.
pub fn lookup(name: &str) -> Lookup {
    let key = name.to_lowercase();
    let registry: &'static Registry = &REGISTRY;

    if let Some(provider) = registry.providers.get(&key) {
        return Lookup::Provider(provider);
    }

    match registry.families.get(&key) {
        Some(family) => match family.default_variant {
            Some(variant) => {
                let default_key = format!("{}.{}", key, variant.to_lowercase());
                match registry.providers.get(&default_key) {
                    Some(provider) => Lookup::Provider(provider),
                    None => Lookup::Family(family),
                }
            }
            None => Lookup::Family(family),
        },
        None => Lookup::Missing,
    }
}

/// Every registered provider, in registration order.
pub fn all() -> &'static [TileProvider] {
    PROVIDERS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let a = lookup("CartoDB.Positron");
        let b = lookup("cartodb.POSITRON");
        assert_eq!(a, b);
        match a {
            Lookup::Provider(p) => assert_eq!(p.name(), "CartoDB.Positron"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_family_default_variant() {
        match lookup("openstreetmap") {
            Lookup::Provider(p) => assert_eq!(p.name(), "OpenStreetMap.Mapnik"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_family_without_default() {
        match lookup("Esri") {
            Lookup::Family(family) => {
                assert_eq!(family.name, "Esri");
                assert_eq!(family.default_variant, None);
                assert_eq!(family.variants.len(), 5);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_single_provider_family() {
        assert!(matches!(lookup("OpenTopoMap"), Lookup::Provider(_)));
    }

    #[test]
    fn test_missing() {
        assert_eq!(lookup("Nowhere.Tiles"), Lookup::Missing);
        assert_eq!(lookup(""), Lookup::Missing);
        assert_eq!(lookup("Esri."), Lookup::Missing);
    }

    #[test]
    fn test_registry_names_are_unique() {
        let mut names: Vec<_> = all().iter().map(|p| p.name().to_lowercase()).collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }
}
