//! DOM Events
//!
//! Document-level event listeners with synchronous dispatch. Window-level
//! events (`pageshow`, `pagehide`) and framework custom events are
//! delivered through the same registry.

use std::fmt;
use std::rc::Rc;

use crate::{Document, NodeId};

/// DOM event types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DomEventType {
    /// Committed change to a form control
    Change,
    /// Page became visible (`persisted` tells bfcache restore from fresh load)
    PageShow,
    /// Page is being hidden
    PageHide,
    DOMContentLoaded,
    /// Framework-defined event such as `turbo:load`
    Custom(String),
}

impl DomEventType {
    /// Event type from its name
    pub fn from_name(name: &str) -> Self {
        match name {
            "change" => Self::Change,
            "pageshow" => Self::PageShow,
            "pagehide" => Self::PageHide,
            "DOMContentLoaded" => Self::DOMContentLoaded,
            other => Self::Custom(other.to_string()),
        }
    }

    /// Event name as used by `addEventListener`
    pub fn name(&self) -> &str {
        match self {
            Self::Change => "change",
            Self::PageShow => "pageshow",
            Self::PageHide => "pagehide",
            Self::DOMContentLoaded => "DOMContentLoaded",
            Self::Custom(name) => name,
        }
    }
}

impl fmt::Display for DomEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// DOM event
#[derive(Debug, Clone)]
pub struct DomEvent {
    pub event_type: DomEventType,
    pub target: NodeId,
    /// `PageTransitionEvent.persisted`
    pub persisted: bool,
    pub bubbles: bool,
    pub cancelable: bool,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl DomEvent {
    /// Create an event of any type
    pub fn new(event_type: DomEventType, target: NodeId) -> Self {
        Self {
            event_type,
            target,
            persisted: false,
            bubbles: false,
            cancelable: false,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Create a `change` event fired at a form control (or form)
    pub fn change(target: NodeId) -> Self {
        Self {
            bubbles: true,
            ..Self::new(DomEventType::Change, target)
        }
    }

    /// Create a `pageshow` event
    pub fn page_show(persisted: bool) -> Self {
        Self {
            persisted,
            ..Self::new(DomEventType::PageShow, NodeId::ROOT)
        }
    }

    /// Create a `pagehide` event
    pub fn page_hide(persisted: bool) -> Self {
        Self {
            persisted,
            ..Self::new(DomEventType::PageHide, NodeId::ROOT)
        }
    }

    /// Create a framework custom event dispatched on the document
    pub fn custom(name: &str) -> Self {
        Self {
            bubbles: true,
            cancelable: true,
            ..Self::new(DomEventType::Custom(name.to_string()), NodeId::ROOT)
        }
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Stop remaining listeners from running
    pub fn stop_immediate_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Event listener callback
pub type EventListener = Rc<dyn Fn(&mut Document, &mut DomEvent)>;

/// Handle returned by `add_event_listener`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Registered listeners in registration order
#[derive(Default)]
pub(crate) struct EventListeners {
    next_id: u64,
    entries: Vec<(ListenerId, DomEventType, EventListener)>,
}

impl EventListeners {
    pub(crate) fn add(&mut self, event_type: DomEventType, listener: EventListener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, event_type, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _, _)| *entry != id);
        self.entries.len() != before
    }

    /// Snapshot of listeners for a type; listeners added during dispatch don't run
    pub(crate) fn matching(&self, event_type: &DomEventType) -> Vec<(ListenerId, EventListener)> {
        self.entries
            .iter()
            .filter(|(_, ty, _)| ty == event_type)
            .map(|(id, _, listener)| (*id, Rc::clone(listener)))
            .collect()
    }

    pub(crate) fn contains(&self, id: ListenerId) -> bool {
        self.entries.iter().any(|(entry, _, _)| *entry == id)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Debug for EventListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventListeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_names() {
        assert_eq!(DomEventType::from_name("change"), DomEventType::Change);
        assert_eq!(
            DomEventType::from_name("turbo:load"),
            DomEventType::Custom("turbo:load".into())
        );
        assert_eq!(DomEventType::PageShow.name(), "pageshow");
    }

    #[test]
    fn test_prevent_default_requires_cancelable() {
        let mut event = DomEvent::change(NodeId(3));
        event.prevent_default();
        assert!(!event.is_default_prevented());

        let mut event = DomEvent::custom("turbo:before-cache");
        event.prevent_default();
        assert!(event.is_default_prevented());
    }

    #[test]
    fn test_page_show_persisted_flag() {
        assert!(DomEvent::page_show(true).persisted);
        assert!(!DomEvent::page_show(false).persisted);
    }
}
