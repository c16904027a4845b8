use crate::core::geo::TileCoord;

/// Trait representing anything that can produce tile URLs for a given coordinate.
pub trait TileSource: Send + Sync {
    /// Build a URL for the requested `coord`.
    fn url(&self, coord: TileCoord) -> String;
}

/// XYZ URL template such as `https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png`.
///
/// Recognised placeholders: `{s}` (subdomain), `{z}`, `{x}`, `{y}`, `{r}`
/// (retina suffix, always empty here).
#[derive(Debug, Clone, PartialEq)]
pub struct UrlTemplate {
    template: String,
    subdomains: Vec<String>,
}

impl UrlTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            subdomains: vec!["a".to_string(), "b".to_string(), "c".to_string()],
        }
    }

    pub fn with_subdomains<I, S>(mut self, subdomains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subdomains = subdomains.into_iter().map(Into::into).collect();
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn subdomains(&self) -> &[String] {
        &self.subdomains
    }
}

impl TileSource for UrlTemplate {
    fn url(&self, coord: TileCoord) -> String {
        let mut url = self
            .template
            .replace("{z}", &coord.z.to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{y}", &coord.y.to_string())
            .replace("{r}", "");

        if url.contains("{s}") {
            let sub = if self.subdomains.is_empty() {
                ""
            } else {
                let idx = ((coord.x as u64 + coord.y as u64) % self.subdomains.len() as u64) as usize;
                self.subdomains[idx].as_str()
            };
            url = url.replace("{s}", sub);
        }

        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expands_xyz() {
        let source = UrlTemplate::new("https://mt1.google.com/vt/lyrs=m&x={x}&y={y}&z={z}");
        assert_eq!(
            source.url(TileCoord::new(3, 5, 4)),
            "https://mt1.google.com/vt/lyrs=m&x=3&y=5&z=4"
        );
    }

    #[test]
    fn test_rotates_subdomains() {
        let source = UrlTemplate::new("https://{s}.tile.example.org/{z}/{x}/{y}{r}.png");
        assert_eq!(source.url(TileCoord::new(0, 0, 1)), "https://a.tile.example.org/1/0/0.png");
        assert_eq!(source.url(TileCoord::new(1, 0, 1)), "https://b.tile.example.org/1/1/0.png");
        assert_eq!(source.url(TileCoord::new(1, 1, 1)), "https://c.tile.example.org/1/1/1.png");
    }
}
