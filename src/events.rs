//! Event bus between the engine and the bridge.
//!
//! A first-class listener registry: handlers are registered under an
//! event name, keyed by id, and the whole registry can be atomically
//! disposed during teardown. Dispatch after disposal is a silent no-op
//! so late engine callbacks cannot fire into a dead element.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

use crate::types::ScalePreset;

/// Identifies one registered listener for later removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(Uuid);

/// What the surface click handler saw at the click target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurfaceNode {
    /// CSS-style class name of the node, empty if none
    pub class_name: String,
    /// Link destination if the node is an anchor
    pub href: Option<String>,
}

/// Payload carried by a dispatched event.
#[derive(Clone, Debug)]
pub enum EventPayload {
    /// The engine settled on a page
    PageChange { page_number: u16 },
    /// The engine settled on a scale
    ScaleChange {
        preset_value: Option<String>,
        scale: f32,
    },
    /// A click inside the render surface, with the node path from the
    /// clicked target up to the surface root
    SurfaceClick { path: Vec<SurfaceNode> },
}

impl EventPayload {
    /// Classify a scale-change payload's preset
    pub fn scale_preset(&self) -> Option<ScalePreset> {
        match self {
            EventPayload::ScaleChange { preset_value, .. } => {
                Some(ScalePreset::from_value(preset_value.as_deref()))
            }
            _ => None,
        }
    }
}

type Handler = Arc<dyn Fn(&EventPayload) + Send + Sync>;

/// Listener registry shared between the bridge and the engine.
pub struct EventBus {
    listeners: RwLock<HashMap<String, Vec<(ListenerId, Handler)>>>,
    disposed: AtomicBool,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(HashMap::new()),
            disposed: AtomicBool::new(false),
        }
    }

    /// Register a handler for `event`. Returns an id usable with
    /// [`EventBus::off`]. Registration on a disposed bus is accepted
    /// but the handler will never fire.
    pub fn on<F>(&self, event: &str, handler: F) -> ListenerId
    where
        F: Fn(&EventPayload) + Send + Sync + 'static,
    {
        let id = ListenerId(Uuid::new_v4());
        self.listeners
            .write()
            .entry(event.to_string())
            .or_default()
            .push((id, Arc::new(handler)));
        id
    }

    /// Remove one listener. Unknown ids are ignored.
    pub fn off(&self, event: &str, id: ListenerId) {
        let mut listeners = self.listeners.write();
        if let Some(handlers) = listeners.get_mut(event) {
            handlers.retain(|(handler_id, _)| *handler_id != id);
            if handlers.is_empty() {
                listeners.remove(event);
            }
        }
    }

    /// Invoke every handler registered for `event`, in registration
    /// order. No-op after [`EventBus::dispose`].
    pub fn dispatch(&self, event: &str, payload: &EventPayload) {
        if self.disposed.load(Ordering::Acquire) {
            return;
        }
        // Clone handlers out so a handler can re-enter the bus.
        let handlers: Vec<Handler> = {
            let listeners = self.listeners.read();
            match listeners.get(event) {
                Some(entries) => entries.iter().map(|(_, h)| h.clone()).collect(),
                None => return,
            }
        };
        for handler in handlers {
            handler(payload);
        }
    }

    /// Atomically drop every listener and refuse all further dispatch.
    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::Release);
        self.listeners.write().clear();
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    /// Number of listeners currently registered for `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners
            .read()
            .get(event)
            .map(|handlers| handlers.len())
            .unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
