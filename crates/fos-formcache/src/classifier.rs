//! Element classification
//!
//! Maps an element to the strategy for its field category. Matchers are
//! tried in table order and the first hit wins, so specific categories must
//! precede the ones that would also accept them:
//! - checkbox, radio and password before the generic input matcher
//! - option before the select matchers
//! - the generic matcher last; it accepts anything

use fos_dom::{Document, DomTree, NodeId};

use crate::strategy::{FieldKind, FieldStrategy, Outcome};
use crate::FormCacheConfig;

type Matcher = fn(&DomTree, NodeId) -> bool;

/// Ordered (kind, predicate) table
pub const FIELD_MATCHERS: [(FieldKind, Matcher); 9] = [
    (FieldKind::Form, is_form),
    (FieldKind::Checkbox, is_checkbox),
    (FieldKind::Radio, is_radio),
    (FieldKind::Password, is_password),
    (FieldKind::Input, is_input),
    (FieldKind::SelectOption, is_option),
    (FieldKind::SelectOne, is_select_one),
    (FieldKind::SelectMultiple, is_select_multiple),
    (FieldKind::Generic, is_anything),
];

fn is_form(tree: &DomTree, id: NodeId) -> bool {
    tree.is_element_named(id, "form")
}

fn is_checkbox(tree: &DomTree, id: NodeId) -> bool {
    tree.control_type(id) == Some("checkbox")
}

fn is_radio(tree: &DomTree, id: NodeId) -> bool {
    tree.control_type(id) == Some("radio")
}

fn is_password(tree: &DomTree, id: NodeId) -> bool {
    tree.is_element_named(id, "input") && tree.control_type(id) == Some("password")
}

fn is_input(tree: &DomTree, id: NodeId) -> bool {
    tree.is_element_named(id, "input")
}

fn is_option(tree: &DomTree, id: NodeId) -> bool {
    tree.is_element_named(id, "option")
}

fn is_select_one(tree: &DomTree, id: NodeId) -> bool {
    tree.is_element_named(id, "select") && tree.control_type(id) == Some("select-one")
}

fn is_select_multiple(tree: &DomTree, id: NodeId) -> bool {
    tree.is_element_named(id, "select") && tree.control_type(id) == Some("select-multiple")
}

fn is_anything(_tree: &DomTree, _id: NodeId) -> bool {
    true
}

/// Resolves the strategy for an element
#[derive(Debug, Clone, Copy)]
pub struct ElementClassifier<'a> {
    config: &'a FormCacheConfig,
}

impl<'a> ElementClassifier<'a> {
    pub fn new(config: &'a FormCacheConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &'a FormCacheConfig {
        self.config
    }

    /// Check for an opt-out marker on the element or any ancestor
    pub fn is_opted_out(&self, doc: &Document, element: NodeId) -> bool {
        doc.closest(element, |tree, id| self.config.is_opt_out(tree, id))
            .is_some()
    }

    /// Strategy for `element`; never fails
    pub fn classify(&self, doc: &Document, element: NodeId) -> FieldStrategy {
        if self.is_opted_out(doc, element) {
            tracing::trace!("Element {} is opted out of form caching", element);
            return FieldStrategy::Disabled;
        }
        let tree = doc.tree();
        let kind = FIELD_MATCHERS
            .iter()
            .find(|(_, matches)| matches(tree, element))
            .map_or(FieldKind::Generic, |(kind, _)| *kind);
        FieldStrategy::new(kind, element)
    }

    /// Classify and cache
    pub fn cache(&self, doc: &mut Document, element: NodeId) -> Outcome {
        self.classify(doc, element).cache(doc, self)
    }

    /// Classify and restore
    pub fn restore(&self, doc: &mut Document, element: NodeId) -> Outcome {
        self.classify(doc, element).restore(doc, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(doc: &Document, element: NodeId) -> Option<FieldKind> {
        let config = FormCacheConfig::default();
        ElementClassifier::new(&config).classify(doc, element).kind()
    }

    #[test]
    fn test_generic_matcher_is_last() {
        let (last, matcher) = FIELD_MATCHERS[FIELD_MATCHERS.len() - 1];
        assert_eq!(last, FieldKind::Generic);
        assert!(matcher(&DomTree::new(), NodeId::NONE));
    }

    #[test]
    fn test_specific_inputs_precede_generic_input() {
        let position = |kind| FIELD_MATCHERS.iter().position(|(k, _)| *k == kind).unwrap();
        let input = position(FieldKind::Input);
        assert!(position(FieldKind::Checkbox) < input);
        assert!(position(FieldKind::Radio) < input);
        assert!(position(FieldKind::Password) < input);
        assert!(position(FieldKind::SelectOption) < position(FieldKind::SelectOne));
        assert!(position(FieldKind::SelectOption) < position(FieldKind::SelectMultiple));
    }

    #[test]
    fn test_classify_each_kind() {
        let mut doc = Document::default();
        let body = doc.body();
        let form = doc.append_element(body, "form", &[]).unwrap();
        let text = doc.append_element(form, "input", &[("type", "email")]).unwrap();
        let checkbox = doc.append_element(form, "input", &[("type", "checkbox")]).unwrap();
        let radio = doc.append_element(form, "input", &[("type", "radio")]).unwrap();
        let password = doc.append_element(form, "input", &[("type", "password")]).unwrap();
        let select = doc.append_element(form, "select", &[]).unwrap();
        let option = doc.append_element(select, "option", &[]).unwrap();
        let multi = doc.append_element(form, "select", &[("multiple", "")]).unwrap();
        let textarea = doc.append_element(form, "textarea", &[]).unwrap();

        assert_eq!(classify(&doc, form), Some(FieldKind::Form));
        assert_eq!(classify(&doc, text), Some(FieldKind::Input));
        assert_eq!(classify(&doc, checkbox), Some(FieldKind::Checkbox));
        assert_eq!(classify(&doc, radio), Some(FieldKind::Radio));
        assert_eq!(classify(&doc, password), Some(FieldKind::Password));
        assert_eq!(classify(&doc, select), Some(FieldKind::SelectOne));
        assert_eq!(classify(&doc, option), Some(FieldKind::SelectOption));
        assert_eq!(classify(&doc, multi), Some(FieldKind::SelectMultiple));
        assert_eq!(classify(&doc, textarea), Some(FieldKind::Generic));
    }

    #[test]
    fn test_non_elements_fall_back_to_generic() {
        let mut doc = Document::default();
        let body = doc.body();
        let text = doc.append_text(body, "hello").unwrap();

        assert_eq!(classify(&doc, text), Some(FieldKind::Generic));
        assert_eq!(classify(&doc, NodeId::NONE), Some(FieldKind::Generic));
    }

    #[test]
    fn test_opt_out_on_self_or_ancestor() {
        let mut doc = Document::default();
        let body = doc.body();
        let local = doc.append_element(body, "form", &[("data-turbo-bfcache-form", "false")]).unwrap();
        let framework = doc.append_element(body, "div", &[("data-turbo", "false")]).unwrap();
        let enabled = doc.append_element(body, "form", &[("data-turbo", "true")]).unwrap();

        let a = doc.append_element(local, "input", &[]).unwrap();
        let b = doc.append_element(framework, "input", &[]).unwrap();
        let c = doc.append_element(enabled, "input", &[]).unwrap();
        let d = doc.append_element(enabled, "input", &[("data-turbo-bfcache-form", "false")]).unwrap();

        assert_eq!(classify(&doc, a), None);
        assert_eq!(classify(&doc, b), None);
        assert_eq!(classify(&doc, c), Some(FieldKind::Input));
        assert_eq!(classify(&doc, d), None);
        assert_eq!(classify(&doc, local), None);
    }
}
