//! Lifecycle controller
//!
//! Bridges navigation lifecycle events to the caching engine:
//!
//! | Event | Handler |
//! |---|---|
//! | `turbo:load` | restore every element carrying a cached value |
//! | `turbo:before-cache` | cache the focused field (no `change` fired yet) |
//! | `pageshow` (not persisted) | re-cache every form of a freshly loaded page |
//! | `change` | cache the changed field or form |
//!
//! `turbo:before-cache` has to be dispatched before the page leaves the live
//! document, otherwise the last in-progress edit is lost.
//!
//! The page-level `no-cache` marker only stops `change` from writing. Values
//! already in the DOM are still restored and the focused field is still
//! snapshotted before caching.

use std::collections::HashSet;
use std::rc::Rc;

use fos_dom::{Document, DomEvent, DomEventType, ListenerId};

use crate::{CacheControl, ElementClassifier, FormCacheConfig, Outcome};

/// Drives cache/restore from lifecycle events
#[derive(Debug, Clone, Default)]
pub struct FormCacheController {
    config: Rc<FormCacheConfig>,
}

impl FormCacheController {
    pub fn new(config: FormCacheConfig) -> Self {
        Self {
            config: Rc::new(config),
        }
    }

    pub fn config(&self) -> &FormCacheConfig {
        &self.config
    }

    pub fn classifier(&self) -> ElementClassifier<'_> {
        ElementClassifier::new(&self.config)
    }

    pub fn cache_control(&self) -> CacheControl<'_> {
        CacheControl::new(&self.config)
    }

    // === Handlers ===

    /// Restore every element carrying a cached value; returns how many were applied
    ///
    /// A group (radio set, select options) is restored once even when
    /// several of its members carry a value.
    pub fn on_page_loaded(&self, doc: &mut Document) -> usize {
        let classifier = self.classifier();
        let cached = doc.elements_with_attribute(&self.config.cache_attribute);
        let mut handled = HashSet::new();
        let mut restored = 0;
        for element in cached {
            if handled.contains(&element) {
                continue;
            }
            let strategy = classifier.classify(doc, element);
            handled.extend(strategy.elements(doc));
            restored += strategy.restore(doc, &classifier).count();
        }
        tracing::debug!("Restored {} cached form value(s) on {}", restored, doc.url());
        restored
    }

    /// Cache the focused field if it belongs to a form
    pub fn on_before_page_cached(&self, doc: &mut Document) -> Outcome {
        let Some(active) = doc.active_element() else {
            return Outcome::Skipped;
        };
        if doc.tree().form_owner(active).is_none() {
            return Outcome::Skipped;
        }
        tracing::debug!("Caching focused field {} before snapshot", active);
        self.classifier().cache(doc, active)
    }

    /// Re-cache every form when the page came from the network
    ///
    /// Returns the number of values written; a persisted (bfcache) show does
    /// nothing.
    pub fn on_page_shown(&self, doc: &mut Document, persisted: bool) -> usize {
        if persisted {
            return 0;
        }
        let classifier = self.classifier();
        let forms = doc.elements_by_tag("form");
        tracing::debug!("Page shown from network, re-caching {} form(s)", forms.len());
        forms
            .into_iter()
            .map(|form| classifier.cache(doc, form).count())
            .sum()
    }

    /// Cache the target of a `change` event
    pub fn on_field_changed(&self, doc: &mut Document, event: &DomEvent) -> Outcome {
        let target = event.target;
        let tree = doc.tree();
        let owner = tree.form_owner(target);
        let is_form = tree.is_element_named(target, "form");
        if owner.is_none() && !is_form {
            return Outcome::Skipped;
        }
        if !self.cache_control().allow_cache(doc) {
            return Outcome::Disabled;
        }

        let form = owner.unwrap_or(target);
        tracing::trace!("Change on {} in form {}", target, form);
        self.classifier().cache(doc, target)
    }

    // === Registration ===

    /// Register the four handlers on `doc`
    pub fn attach(&self, doc: &mut Document) -> Attachment {
        let mut listeners = Vec::with_capacity(4);

        let this = self.clone();
        listeners.push(doc.add_event_listener(
            DomEventType::from_name(&self.config.load_event),
            Rc::new(move |doc: &mut Document, _event: &mut DomEvent| {
                this.on_page_loaded(doc);
            }),
        ));

        let this = self.clone();
        listeners.push(doc.add_event_listener(
            DomEventType::from_name(&self.config.before_cache_event),
            Rc::new(move |doc: &mut Document, _event: &mut DomEvent| {
                this.on_before_page_cached(doc);
            }),
        ));

        let this = self.clone();
        listeners.push(doc.add_event_listener(
            DomEventType::PageShow,
            Rc::new(move |doc: &mut Document, event: &mut DomEvent| {
                this.on_page_shown(doc, event.persisted);
            }),
        ));

        let this = self.clone();
        listeners.push(doc.add_event_listener(
            DomEventType::Change,
            Rc::new(move |doc: &mut Document, event: &mut DomEvent| {
                this.on_field_changed(doc, event);
            }),
        ));

        tracing::debug!("Form cache attached to {}", doc.url());
        Attachment { listeners }
    }
}

/// Registered listeners; pass back to [`Attachment::detach`] to remove them
#[derive(Debug)]
#[must_use = "dropping an Attachment leaves its listeners registered"]
pub struct Attachment {
    listeners: Vec<ListenerId>,
}

impl Attachment {
    pub fn listener_ids(&self) -> &[ListenerId] {
        &self.listeners
    }

    /// Remove the listeners from `doc`; returns how many were still registered
    pub fn detach(self, doc: &mut Document) -> usize {
        let removed = self
            .listeners
            .into_iter()
            .filter(|&id| doc.remove_event_listener(id))
            .count();
        tracing::debug!("Form cache detached from {} ({} listener(s))", doc.url(), removed);
        removed
    }
}
