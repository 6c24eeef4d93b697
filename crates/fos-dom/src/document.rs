//! Document - High-level document API

use crate::events::EventListeners;
use crate::{DomError, DomEvent, DomEventType, DomTree, EventListener, ListenerId, NodeId};

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
    /// Focused element (NONE means the body)
    active_element: NodeId,
    listeners: EventListeners,
}

impl Document {
    /// Create a new document with an `<html><head><body>` skeleton
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        tree.link_child(tree.root(), html);
        tree.link_child(html, head);
        tree.link_child(html, body);

        Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
            active_element: NodeId::NONE,
            listeners: EventListeners::default(),
        }
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    // === Building ===

    /// Create an element with attributes and append it to `parent`
    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        attrs: &[(&str, &str)],
    ) -> Result<NodeId, DomError> {
        let id = self.tree.create_element(tag);
        for (name, value) in attrs {
            self.tree.set_attribute(id, name, value)?;
        }
        self.tree.append_child(parent, id)?;
        Ok(id)
    }

    /// Append a text node to `parent`
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> Result<NodeId, DomError> {
        let id = self.tree.create_text(text);
        self.tree.append_child(parent, id)?;
        Ok(id)
    }

    // === Queries ===

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.find_element_by_id(id)
    }

    /// First element under `<head>` whose `name` attribute equals `name`
    pub fn head_element_named(&self, name: &str) -> Option<NodeId> {
        if !self.head_element.is_valid() {
            return None;
        }
        self.tree
            .descendants(self.head_element)
            .find(|&id| self.tree.get_attribute(id, "name") == Some(name))
    }

    /// All elements carrying `attribute`, in document order
    pub fn elements_with_attribute(&self, attribute: &str) -> Vec<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .filter(|&id| self.tree.has_attribute(id, attribute))
            .collect()
    }

    /// All elements with tag `tag`, in document order
    pub fn elements_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .filter(|&id| self.tree.is_element_named(id, tag))
            .collect()
    }

    /// `element.closest(...)` with a predicate as the selector
    pub fn closest(&self, id: NodeId, mut matches: impl FnMut(&DomTree, NodeId) -> bool) -> Option<NodeId> {
        self.tree
            .ancestors(id)
            .filter(|&a| self.tree.element(a).is_some())
            .find(|&a| matches(&self.tree, a))
    }

    // === Focus ===

    /// Focus an element; returns false for non-elements
    pub fn focus(&mut self, id: NodeId) -> bool {
        if self.tree.element(id).is_none() {
            return false;
        }
        self.active_element = id;
        true
    }

    pub fn blur(&mut self) {
        self.active_element = NodeId::NONE;
    }

    /// Focused element, `None` when focus is on the body
    pub fn active_element(&self) -> Option<NodeId> {
        self.active_element.is_valid().then_some(self.active_element)
    }

    // === Events ===

    /// Register a listener; listeners run in registration order
    pub fn add_event_listener(&mut self, event_type: DomEventType, listener: EventListener) -> ListenerId {
        self.listeners.add(event_type, listener)
    }

    /// Remove a listener; returns whether it was registered
    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Dispatch an event synchronously
    ///
    /// Returns false if a listener called `prevent_default` on a cancelable
    /// event.
    pub fn dispatch_event(&mut self, mut event: DomEvent) -> bool {
        let listeners = self.listeners.matching(&event.event_type);
        tracing::trace!("Dispatching {} to {} listeners", event.event_type, listeners.len());

        for (id, listener) in listeners {
            // Removed by an earlier listener during this dispatch
            if !self.listeners.contains(id) {
                continue;
            }
            listener(self, &mut event);
            if event.is_propagation_stopped() {
                break;
            }
        }
        !event.is_default_prevented()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
