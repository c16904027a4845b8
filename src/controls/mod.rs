//! Map controls and widgets
//!
//! A control is a value pinned to a corner of the map. Built-in controls
//! (layers, fullscreen, search, draw) carry their configuration; widget
//! controls (dropdown, toolbar) also carry mutable state that widget events
//! update.

pub mod draw;
pub mod widgets;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::{core::constants::NOMINATIM_SEARCH_URL, prelude::HashMap, MapError, Result};

pub use draw::{DrawOptions, DrawShape, ShapeStyle};
pub use widgets::{Dropdown, Toolbar, ToolbarTool};

/// Corner a control is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::TopLeft => write!(f, "topleft"),
            Position::TopRight => write!(f, "topright"),
            Position::BottomLeft => write!(f, "bottomleft"),
            Position::BottomRight => write!(f, "bottomright"),
        }
    }
}

impl std::str::FromStr for Position {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "topleft" => Ok(Position::TopLeft),
            "topright" => Ok(Position::TopRight),
            "bottomleft" => Ok(Position::BottomLeft),
            "bottomright" => Ok(Position::BottomRight),
            _ => Err(MapError::InvalidArgument(format!("unknown control position {:?}", s))),
        }
    }
}

/// Geocoding search box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Query endpoint; `{s}` is replaced by the search text
    pub url: String,
    /// Zoom level to fly to on a hit
    pub zoom: Option<f64>,
    /// Drop a marker on the result
    pub marker: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            url: NOMINATIM_SEARCH_URL.to_string(),
            zoom: None,
            marker: true,
        }
    }
}

impl SearchOptions {
    /// Concrete query URL for `text`.
    ///
    /// The query parameter whose value is `{s}` receives the text; a template
    /// without one gets a `q` parameter appended.
    pub fn query_url(&self, text: &str) -> Result<String> {
        let mut url = Url::parse(&self.url).map_err(|e| {
            MapError::InvalidArgument(format!("bad search url {:?}: {}", self.url, e))
        })?;

        let mut substituted = false;
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(key, value)| {
                if value == "{s}" {
                    substituted = true;
                    (key.into_owned(), text.to_string())
                } else {
                    (key.into_owned(), value.into_owned())
                }
            })
            .collect();

        {
            let mut query = url.query_pairs_mut();
            query.clear().extend_pairs(pairs);
            if !substituted {
                query.append_pair("q", text);
            }
        }
        Ok(url.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ControlKind {
    Layers,
    Fullscreen,
    Search(SearchOptions),
    Draw(DrawOptions),
    Dropdown(Dropdown),
    Toolbar(Toolbar),
}

impl ControlKind {
    pub fn name(&self) -> &'static str {
        match self {
            ControlKind::Layers => "layers",
            ControlKind::Fullscreen => "fullscreen",
            ControlKind::Search(_) => "search",
            ControlKind::Draw(_) => "draw",
            ControlKind::Dropdown(_) => "dropdown",
            ControlKind::Toolbar(_) => "toolbar",
        }
    }

    pub fn is_widget(&self) -> bool {
        matches!(self, ControlKind::Dropdown(_) | ControlKind::Toolbar(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Control {
    pub id: String,
    pub position: Position,
    #[serde(flatten)]
    pub kind: ControlKind,
}

impl Control {
    /// Control with a generated id, e.g. `search-4`.
    pub fn new(kind: ControlKind, position: Position) -> Self {
        Self {
            id: next_control_id(&kind),
            position,
            kind,
        }
    }
}

fn next_control_id(kind: &ControlKind) -> String {
    use std::sync::atomic::{AtomicU64, Ordering};

    static NEXT_ID: AtomicU64 = AtomicU64::new(1);
    format!("{}-{}", kind.name(), NEXT_ID.fetch_add(1, Ordering::Relaxed))
}

/// Owns the controls of a map in the order they were added
pub struct ControlManager {
    controls: Vec<Control>,
    index: HashMap<String, usize>,
}

impl ControlManager {
    pub fn new() -> Self {
        Self {
            controls: Vec::new(),
            index: HashMap::default(),
        }
    }

    /// Adds a control and returns its id
    pub fn add(&mut self, control: Control) -> Result<String> {
        if self.index.contains_key(&control.id) {
            return Err(MapError::Widget(format!("control {:?} already added", control.id)));
        }
        let id = control.id.clone();
        self.index.insert(id.clone(), self.controls.len());
        self.controls.push(control);
        Ok(id)
    }

    pub fn get(&self, id: &str) -> Option<&Control> {
        self.index.get(id).map(|&i| &self.controls[i])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Control> {
        match self.index.get(id) {
            Some(&i) => self.controls.get_mut(i),
            None => None,
        }
    }

    /// Whether a control of the same kind name is already present
    pub fn has_kind(&self, name: &str) -> bool {
        self.controls.iter().any(|c| c.kind.name() == name)
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}

impl Default for ControlManager {
    fn default() -> Self {
        Self::new()
    }
}
