//! Map events and the listener registry

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::{core::geo::LatLng, prelude::HashMap};

/// Map event types that can be emitted by the map
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MapEvent {
    /// Center or zoom changed
    ViewChanged { center: LatLng, zoom: f64 },
    /// Layer was added to the map
    LayerAdd { layer_id: String },
    /// Layer was removed from the map
    LayerRemove { layer_id: String },
    /// Base layer was swapped
    BaseLayerChange { layer_id: String },
    /// Control or widget was attached
    ControlAdd { control_id: String },
    /// A widget's value changed
    WidgetChange { widget_id: String, value: String },
}

impl MapEvent {
    /// Name listeners register under
    pub fn event_type(&self) -> &'static str {
        match self {
            MapEvent::ViewChanged { .. } => "viewchanged",
            MapEvent::LayerAdd { .. } => "layeradd",
            MapEvent::LayerRemove { .. } => "layerremove",
            MapEvent::BaseLayerChange { .. } => "baselayerchange",
            MapEvent::ControlAdd { .. } => "controladd",
            MapEvent::WidgetChange { .. } => "widgetchange",
        }
    }
}

/// Input from a front end addressed at one widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetEvent {
    ValueChanged { widget_id: String, value: String },
    ButtonClicked { widget_id: String, button: String },
}

impl WidgetEvent {
    pub fn widget_id(&self) -> &str {
        match self {
            WidgetEvent::ValueChanged { widget_id, .. }
            | WidgetEvent::ButtonClicked { widget_id, .. } => widget_id,
        }
    }
}

/// Event listener callback type
pub type EventCallback = Box<dyn Fn(&MapEvent) + Send + Sync>;

/// Event management system for the map
#[derive(Default)]
pub struct EventManager {
    /// Event listeners by event type
    listeners: HashMap<String, Vec<EventCallback>>,
    /// Event queue for processing
    event_queue: VecDeque<MapEvent>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event listener
    pub fn on<F>(&mut self, event_type: &str, callback: F)
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.listeners
            .entry(event_type.to_string())
            .or_default()
            .push(Box::new(callback));
    }

    /// Emit an event to the queue
    pub fn emit(&mut self, event: MapEvent) {
        self.event_queue.push_back(event);
    }

    /// Dispatch all queued events to their listeners and return them
    pub fn process_events(&mut self) -> Vec<MapEvent> {
        let events: Vec<_> = self.event_queue.drain(..).collect();

        for event in &events {
            log::debug!("dispatching {:?}", event);
            if let Some(callbacks) = self.listeners.get(event.event_type()) {
                for callback in callbacks {
                    callback(event);
                }
            }
        }

        events
    }

    /// Get number of pending events
    pub fn pending_events(&self) -> usize {
        self.event_queue.len()
    }
}
