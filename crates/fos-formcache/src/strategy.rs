//! Field strategies
//!
//! One variant per field category. A strategy decides which elements take
//! part in a cache/restore pass, which live property represents the field's
//! state, and any special rule for that category.

use fos_dom::{Document, NodeId, Property, PropertyValue};

use crate::value::CachedValue;
use crate::{ElementClassifier, FormCacheError};

/// Field category, in classification order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// `<form>`: caching delegates to each listed element
    Form,
    Checkbox,
    /// Radio plus every same-named radio in its form (or document)
    Radio,
    /// Never cached
    Password,
    /// Any other `<input>`
    Input,
    /// A single `<option>`
    SelectOption,
    /// `<select>` without `multiple`
    SelectOne,
    /// `<select multiple>`
    SelectMultiple,
    /// Fallback for every other element (textarea, button, ...)
    Generic,
}

impl FieldKind {
    /// Live property holding the field's state
    pub fn tracked_property(self) -> Option<Property> {
        match self {
            Self::Form | Self::Password => None,
            Self::Input | Self::Generic => Some(Property::Value),
            Self::Checkbox | Self::Radio => Some(Property::Checked),
            Self::SelectOption | Self::SelectOne | Self::SelectMultiple => Some(Property::Selected),
        }
    }
}

/// Tracked property → property holding its declared default
const DEFAULT_PROPERTIES: [(Property, Property); 3] = [
    (Property::Value, Property::DefaultValue),
    (Property::Checked, Property::DefaultChecked),
    (Property::Selected, Property::DefaultSelected),
];

/// Default counterpart of a tracked property
pub fn default_property(tracked: Property) -> Option<Property> {
    DEFAULT_PROPERTIES
        .iter()
        .find(|(property, _)| *property == tracked)
        .map(|(_, default)| *default)
}

/// Result of a cache or restore pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Opted out: no cached value was read or written
    Disabled,
    /// The strategy left the DOM untouched on purpose
    Skipped,
    /// Elements whose cached value was written (cache) or applied (restore)
    Applied(usize),
}

impl Outcome {
    /// Number of elements written or restored
    pub fn count(self) -> usize {
        match self {
            Self::Applied(n) => n,
            Self::Disabled | Self::Skipped => 0,
        }
    }

    pub fn is_disabled(self) -> bool {
        self == Self::Disabled
    }
}

/// Strategy bound to one element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStrategy {
    /// Element sits inside an opt-out scope
    Disabled,
    Field { kind: FieldKind, element: NodeId },
}

impl FieldStrategy {
    pub fn new(kind: FieldKind, element: NodeId) -> Self {
        Self::Field { kind, element }
    }

    pub fn kind(&self) -> Option<FieldKind> {
        match self {
            Self::Disabled => None,
            Self::Field { kind, .. } => Some(*kind),
        }
    }

    /// Elements a cache/restore pass acts on
    pub fn elements(&self, doc: &Document) -> Vec<NodeId> {
        let Self::Field { kind, element } = *self else {
            return Vec::new();
        };
        let tree = doc.tree();
        match kind {
            FieldKind::Form => tree.form_elements(element),
            FieldKind::Radio => {
                let Some(name) = tree.get_attribute(element, "name").filter(|n| !n.is_empty()) else {
                    return vec![element];
                };
                let scope = tree.form_owner(element).unwrap_or(tree.root());
                let group = tree.radios_named(scope, name);
                if group.is_empty() { vec![element] } else { group }
            }
            FieldKind::SelectOne | FieldKind::SelectMultiple => tree.options(element),
            _ => vec![element],
        }
    }

    /// Snapshot the field's live state into cache attributes
    pub fn cache(&self, doc: &mut Document, classifier: &ElementClassifier<'_>) -> Outcome {
        let Self::Field { kind, element } = *self else {
            return Outcome::Disabled;
        };
        let attribute = classifier.config().cache_attribute.as_str();

        match kind {
            FieldKind::Form => {
                let written: usize = self
                    .elements(doc)
                    .into_iter()
                    .map(|field| classifier.cache(doc, field).count())
                    .sum();
                Outcome::Applied(written)
            }
            FieldKind::Password => Outcome::Skipped,
            FieldKind::SelectOne if first_option_auto_selected(doc, element) => {
                // Untouched dropdown: clean, so only drop stale values
                for option in self.elements(doc) {
                    doc.tree_mut().remove_attribute(option, attribute);
                }
                tracing::trace!("Select {} shows its implicit first option, not caching", element);
                Outcome::Skipped
            }
            _ => {
                let Some(tracked) = kind.tracked_property() else {
                    return Outcome::Skipped;
                };
                let written = self
                    .elements(doc)
                    .into_iter()
                    .filter(|&field| cache_element(doc, field, tracked, attribute))
                    .count();
                tracing::debug!("Cached {:?} {}: {} value(s) written", kind, element, written);
                Outcome::Applied(written)
            }
        }
    }

    /// Write cached attribute values back into live properties
    ///
    /// Elements with malformed or mistyped values are logged and left alone.
    pub fn restore(&self, doc: &mut Document, classifier: &ElementClassifier<'_>) -> Outcome {
        let Self::Field { kind, element } = *self else {
            return Outcome::Disabled;
        };
        let Some(tracked) = kind.tracked_property() else {
            return Outcome::Skipped;
        };
        let attribute = classifier.config().cache_attribute.as_str();

        let mut restored = 0;
        for field in self.elements(doc) {
            match restore_element(doc, field, tracked, attribute) {
                Ok(true) => restored += 1,
                Ok(false) => {}
                Err(err) => tracing::warn!("Skipping restore: {}", err),
            }
        }
        tracing::debug!("Restored {:?} {}: {} value(s)", kind, element, restored);
        Outcome::Applied(restored)
    }
}

/// Browser picked the first option and nothing declares a default
fn first_option_auto_selected(doc: &Document, select: NodeId) -> bool {
    let tree = doc.tree();
    tree.selected_index(select) == Some(0)
        && tree
            .options(select)
            .iter()
            .all(|&option| tree.default_selected(option) == Some(false))
}

/// Clear, then write the tracked value if it differs from its default
fn cache_element(doc: &mut Document, element: NodeId, tracked: Property, attribute: &str) -> bool {
    let tree = doc.tree_mut();
    tree.remove_attribute(element, attribute);

    let Some(default) = default_property(tracked) else {
        return false;
    };
    let (Some(current), Some(default_value)) = (tree.property(element, tracked), tree.property(element, default))
    else {
        return false;
    };
    if current == default_value {
        return false;
    }

    match CachedValue::from(current).encode() {
        Ok(encoded) => tree.set_attribute(element, attribute, &encoded).is_ok(),
        Err(err) => {
            tracing::warn!("Cannot encode value of {}: {}", element, err);
            false
        }
    }
}

fn restore_element(
    doc: &mut Document,
    element: NodeId,
    tracked: Property,
    attribute: &str,
) -> Result<bool, FormCacheError> {
    let tree = doc.tree_mut();
    let Some(raw) = tree.get_attribute(element, attribute).map(str::to_owned) else {
        return Ok(false);
    };

    let value: PropertyValue = CachedValue::decode(element, &raw)?.into();
    if !tree.set_property(element, tracked, &value) {
        return Err(FormCacheError::UnexpectedValue {
            node: element,
            property: tracked,
            value: raw,
        });
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FormCacheConfig;

    #[test]
    fn test_default_property_table() {
        assert_eq!(default_property(Property::Value), Some(Property::DefaultValue));
        assert_eq!(default_property(Property::Checked), Some(Property::DefaultChecked));
        assert_eq!(default_property(Property::Selected), Some(Property::DefaultSelected));
        assert_eq!(default_property(Property::DefaultValue), None);
    }

    #[test]
    fn test_tracked_properties() {
        assert_eq!(FieldKind::Generic.tracked_property(), Some(Property::Value));
        assert_eq!(FieldKind::Radio.tracked_property(), Some(Property::Checked));
        assert_eq!(FieldKind::SelectMultiple.tracked_property(), Some(Property::Selected));
        assert_eq!(FieldKind::Password.tracked_property(), None);
    }

    #[test]
    fn test_disabled_does_nothing() {
        let config = FormCacheConfig::default();
        let classifier = ElementClassifier::new(&config);
        let mut doc = Document::default();

        assert_eq!(FieldStrategy::Disabled.cache(&mut doc, &classifier), Outcome::Disabled);
        assert_eq!(FieldStrategy::Disabled.restore(&mut doc, &classifier), Outcome::Disabled);
        assert!(FieldStrategy::Disabled.elements(&doc).is_empty());
    }

    #[test]
    fn test_cache_clears_when_clean_again() {
        let config = FormCacheConfig::default();
        let classifier = ElementClassifier::new(&config);
        let mut doc = Document::default();
        let body = doc.body();
        let input = doc.append_element(body, "input", &[("value", "start")]).unwrap();
        let strategy = FieldStrategy::new(FieldKind::Input, input);

        doc.tree_mut().set_value(input, "edited");
        assert_eq!(strategy.cache(&mut doc, &classifier), Outcome::Applied(1));
        assert_eq!(
            doc.tree().get_attribute(input, &config.cache_attribute),
            Some(r#""edited""#)
        );

        doc.tree_mut().set_value(input, "start");
        assert_eq!(strategy.cache(&mut doc, &classifier), Outcome::Applied(0));
        assert!(!doc.tree().has_attribute(input, &config.cache_attribute));
    }

    #[test]
    fn test_restore_skips_mistyped_value() {
        let config = FormCacheConfig::default();
        let classifier = ElementClassifier::new(&config);
        let mut doc = Document::default();
        let body = doc.body();
        let checkbox = doc
            .append_element(body, "input", &[("type", "checkbox"), (config.cache_attribute.as_str(), r#""yes""#)])
            .unwrap();

        let outcome = FieldStrategy::new(FieldKind::Checkbox, checkbox).restore(&mut doc, &classifier);
        assert_eq!(outcome, Outcome::Applied(0));
        assert_eq!(doc.tree().checked(checkbox), Some(false));
    }

    #[test]
    fn test_element_without_property_is_inert() {
        let config = FormCacheConfig::default();
        let classifier = ElementClassifier::new(&config);
        let mut doc = Document::default();
        let body = doc.body();
        let div = doc.append_element(body, "div", &[]).unwrap();

        assert_eq!(FieldStrategy::new(FieldKind::Generic, div).cache(&mut doc, &classifier), Outcome::Applied(0));
        assert!(!doc.tree().has_attribute(div, &config.cache_attribute));
    }
}
