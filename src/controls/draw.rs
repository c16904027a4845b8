use serde::{Deserialize, Serialize};

use crate::prelude::HashSet;

/// Shapes a draw control can offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawShape {
    Polyline,
    Polygon,
    Rectangle,
    Circle,
    Marker,
    CircleMarker,
}

impl DrawShape {
    pub const ALL: [DrawShape; 6] = [
        DrawShape::Polyline,
        DrawShape::Polygon,
        DrawShape::Rectangle,
        DrawShape::Circle,
        DrawShape::Marker,
        DrawShape::CircleMarker,
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeStyle {
    pub color: String,
    pub fill_color: String,
    pub weight: f32,
    pub opacity: f32,
    pub fill_opacity: f32,
    pub dash_array: Option<String>,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            color: "#ff0000".to_string(),
            fill_color: "#ff0000".to_string(),
            weight: 2.0,
            opacity: 1.0,
            fill_opacity: 0.25,
            dash_array: None,
        }
    }
}

/// Configuration of a draw control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawOptions {
    pub shapes: HashSet<DrawShape>,
    pub style: ShapeStyle,
    pub allow_editing: bool,
    pub allow_deleting: bool,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            shapes: [DrawShape::Polyline, DrawShape::Polygon, DrawShape::CircleMarker]
                .into_iter()
                .collect(),
            style: ShapeStyle::default(),
            allow_editing: true,
            allow_deleting: true,
        }
    }
}

impl DrawOptions {
    /// Every shape enabled
    pub fn all() -> Self {
        Self {
            shapes: DrawShape::ALL.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn with_shape(mut self, shape: DrawShape) -> Self {
        self.shapes.insert(shape);
        self
    }

    pub fn without_shape(mut self, shape: DrawShape) -> Self {
        self.shapes.remove(&shape);
        self
    }

    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn is_enabled(&self, shape: DrawShape) -> bool {
        self.shapes.contains(&shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_shapes() {
        let options = DrawOptions::default();
        assert!(options.is_enabled(DrawShape::Polyline));
        assert!(options.is_enabled(DrawShape::Polygon));
        assert!(options.is_enabled(DrawShape::CircleMarker));
        assert!(!options.is_enabled(DrawShape::Rectangle));
    }

    #[test]
    fn test_shape_toggles() {
        let options = DrawOptions::default()
            .with_shape(DrawShape::Rectangle)
            .without_shape(DrawShape::Polyline);
        assert!(options.is_enabled(DrawShape::Rectangle));
        assert!(!options.is_enabled(DrawShape::Polyline));
        assert_eq!(DrawOptions::all().shapes.len(), 6);
    }

    #[test]
    fn test_partial_json() {
        let options: DrawOptions =
            serde_json::from_value(serde_json::json!({ "shapes": ["circle"] })).unwrap();
        assert_eq!(options.shapes.len(), 1);
        assert!(options.is_enabled(DrawShape::Circle));
        assert_eq!(options.style, ShapeStyle::default());
    }
}
