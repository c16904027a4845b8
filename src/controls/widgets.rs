//! Widget state for dropdowns and the toolbar

use serde::{Deserialize, Serialize};

use crate::{
    core::constants::DEFAULT_BASEMAP, tiles::basemap::available_basemaps, MapError, Result,
};

/// Selection from a fixed list of options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dropdown {
    options: Vec<String>,
    value: String,
    description: Option<String>,
}

impl Dropdown {
    /// The first option is selected initially.
    pub fn new<I, S>(options: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        let value = options
            .first()
            .cloned()
            .ok_or_else(|| MapError::InvalidArgument("dropdown needs at least one option".into()))?;
        Ok(Self {
            options,
            value,
            description: None,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Select `value`, returning the previous selection.
    pub fn select(&mut self, value: &str) -> Result<String> {
        if !self.options.iter().any(|o| o == value) {
            return Err(MapError::Widget(format!("{:?} is not a dropdown option", value)));
        }
        Ok(std::mem::replace(&mut self.value, value.to_string()))
    }
}

/// Buttons on the toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolbarTool {
    /// Expands or collapses the tool grid
    Toggle,
    /// Shows or hides the basemap selector
    Basemap,
}

impl std::str::FromStr for ToolbarTool {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "toggle" => Ok(ToolbarTool::Toggle),
            "basemap" => Ok(ToolbarTool::Basemap),
            _ => Err(MapError::Widget(format!("unknown toolbar button {:?}", s))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toolbar {
    open: bool,
    basemap_selector_visible: bool,
    basemap_selector: Dropdown,
}

impl Toolbar {
    pub fn new() -> Result<Self> {
        let mut basemap_selector =
            Dropdown::new(available_basemaps())?.with_description("Basemaps");
        // Start on the usual default rather than whatever sorts first
        basemap_selector.select(DEFAULT_BASEMAP)?;

        Ok(Self {
            open: false,
            basemap_selector_visible: false,
            basemap_selector,
        })
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn basemap_selector_visible(&self) -> bool {
        self.basemap_selector_visible
    }

    pub fn basemap_selector(&self) -> &Dropdown {
        &self.basemap_selector
    }

    pub fn basemap_selector_mut(&mut self) -> &mut Dropdown {
        &mut self.basemap_selector
    }

    pub fn click(&mut self, tool: ToolbarTool) {
        match tool {
            ToolbarTool::Toggle => {
                self.open = !self.open;
                if !self.open {
                    self.basemap_selector_visible = false;
                }
            }
            ToolbarTool::Basemap => {
                self.basemap_selector_visible = !self.basemap_selector_visible;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dropdown_initial_value() {
        let dropdown = Dropdown::new(["a", "b", "c"]).unwrap();
        assert_eq!(dropdown.value(), "a");
        assert_eq!(dropdown.options().len(), 3);
    }

    #[test]
    fn test_empty_dropdown_rejected() {
        assert!(matches!(
            Dropdown::new(Vec::<String>::new()),
            Err(MapError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_select() {
        let mut dropdown = Dropdown::new(["a", "b"]).unwrap();
        assert_eq!(dropdown.select("b").unwrap(), "a");
        assert_eq!(dropdown.value(), "b");
        assert!(matches!(dropdown.select("z"), Err(MapError::Widget(_))));
        assert_eq!(dropdown.value(), "b");
    }

    #[test]
    fn test_default_basemap_is_registered() {
        assert!(available_basemaps().iter().any(|name| name == DEFAULT_BASEMAP));
        assert_eq!(
            crate::tiles::basemap::resolve_basemap(DEFAULT_BASEMAP).unwrap().name,
            "OpenStreetMap.Mapnik"
        );
    }

    #[test]
    fn test_toolbar_buttons() {
        let mut toolbar = Toolbar::new().unwrap();
        assert_eq!(toolbar.basemap_selector().value(), DEFAULT_BASEMAP);
        assert!(!toolbar.is_open());

        toolbar.click(ToolbarTool::Toggle);
        toolbar.click(ToolbarTool::Basemap);
        assert!(toolbar.is_open());
        assert!(toolbar.basemap_selector_visible());

        toolbar.click(ToolbarTool::Toggle);
        assert!(!toolbar.is_open());
        assert!(!toolbar.basemap_selector_visible());
    }
}
