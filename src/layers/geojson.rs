//! GeoJSON overlay layer

use serde::{Deserialize, Serialize};

use crate::{
    core::geo::{LatLng, LatLngBounds},
    data::geojson::{GeoJson, GeoJsonFeature, GeoJsonSource},
    layers::base::{next_layer_id, LayerProperties, LayerTrait, LayerType},
    Result,
};

/// Style properties for features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureStyle {
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub stroke_opacity: Option<f64>,
    pub fill: Option<String>,
    pub fill_opacity: Option<f64>,
    pub marker_color: Option<String>,
}

impl Default for FeatureStyle {
    fn default() -> Self {
        Self {
            stroke: Some("#3388ff".to_string()),
            stroke_width: Some(3.0),
            stroke_opacity: Some(1.0),
            fill: Some("#3388ff".to_string()),
            fill_opacity: Some(0.2),
            marker_color: Some("#3388ff".to_string()),
        }
    }
}

type StyleFn = Box<dyn Fn(&GeoJsonFeature) -> FeatureStyle + Send + Sync>;
type FilterFn = Box<dyn Fn(&GeoJsonFeature) -> bool + Send + Sync>;

/// GeoJSON layer for displaying geographic data
pub struct GeoJsonLayer {
    properties: LayerProperties,
    data: GeoJson,
    style: FeatureStyle,
    hover_style: Option<FeatureStyle>,
    style_function: Option<StyleFn>,
    filter: Option<FilterFn>,
}

impl GeoJsonLayer {
    /// Creates a new GeoJSON layer from parsed GeoJSON
    pub fn new(id: String, name: String, data: GeoJson) -> Self {
        Self {
            properties: LayerProperties::new(id, name, LayerType::GeoJson),
            data,
            style: FeatureStyle::default(),
            hover_style: None,
            style_function: None,
            filter: None,
        }
    }

    /// Loads `source` into a layer with a generated id.
    pub fn from_source(source: &GeoJsonSource, name: impl Into<String>) -> Result<Self> {
        let data = source.load()?;
        Ok(Self::new(next_layer_id(LayerType::GeoJson), name.into(), data))
    }

    /// Sets the default style for all features
    pub fn with_style(mut self, style: FeatureStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_hover_style(mut self, style: FeatureStyle) -> Self {
        self.hover_style = Some(style);
        self
    }

    /// Sets a function to style features individually
    pub fn with_style_function<F>(mut self, style_fn: F) -> Self
    where
        F: Fn(&GeoJsonFeature) -> FeatureStyle + Send + Sync + 'static,
    {
        self.style_function = Some(Box::new(style_fn));
        self
    }

    /// Sets a function to filter which features are shown
    pub fn with_filter<F>(mut self, filter_fn: F) -> Self
    where
        F: Fn(&GeoJsonFeature) -> bool + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(filter_fn));
        self
    }

    pub fn data(&self) -> &GeoJson {
        &self.data
    }

    pub fn style(&self) -> &FeatureStyle {
        &self.style
    }

    /// Features that pass the filter
    pub fn features(&self) -> Vec<&GeoJsonFeature> {
        self.data
            .features()
            .into_iter()
            .filter(|f| self.filter.as_ref().map_or(true, |filter| filter(f)))
            .collect()
    }

    /// Style applied to one feature
    pub fn feature_style(&self, feature: &GeoJsonFeature) -> FeatureStyle {
        match &self.style_function {
            Some(style_fn) => style_fn(feature),
            None => self.style.clone(),
        }
    }

    /// Every visible coordinate as a LatLng
    pub fn to_lat_lng_points(&self) -> Vec<LatLng> {
        match &self.data {
            GeoJson::Geometry(geometry) => geometry.to_lat_lng_points(),
            _ => self
                .features()
                .into_iter()
                .filter_map(|f| f.geometry.as_ref())
                .flat_map(|g| g.to_lat_lng_points())
                .collect(),
        }
    }
}

impl LayerTrait for GeoJsonLayer {
    crate::impl_layer_trait!(GeoJsonLayer, properties);

    fn options(&self) -> serde_json::Value {
        let data = match &self.data {
            GeoJson::Geometry(_) => self.data.to_value(),
            _ => GeoJson::FeatureCollection {
                features: self.features().into_iter().cloned().collect(),
            }
            .to_value(),
        };
        // Per-feature styles only when a style function can make them differ
        let feature_styles: Option<Vec<FeatureStyle>> = self.style_function.as_ref().map(|_| {
            self.features()
                .into_iter()
                .map(|f| self.feature_style(f))
                .collect()
        });

        serde_json::json!({
            "data": data,
            "style": self.style,
            "hover_style": self.hover_style,
            "feature_styles": feature_styles,
        })
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        LatLngBounds::from_points(self.to_lat_lng_points())
    }
}
