//! Control properties (value / checked / selected and their defaults)

use super::{ControlState, InputType, Property, PropertyValue};
use crate::{DomTree, NodeId};

impl DomTree {
    fn control_mut(&mut self, id: NodeId) -> Option<&mut ControlState> {
        self.element_mut(id)?.control.as_mut()
    }

    fn control(&self, id: NodeId) -> Option<&ControlState> {
        self.element(id)?.control.as_ref()
    }

    /// Parsed input type, for `input` elements only
    pub fn input_type(&self, id: NodeId) -> Option<InputType> {
        let elem = self.element(id)?;
        (elem.name == "input").then(|| InputType::parse(elem.get_attr("type").unwrap_or("")))
    }

    /// The control's `type` IDL value
    ///
    /// `None` for elements that have no `type` property.
    pub fn control_type(&self, id: NodeId) -> Option<&'static str> {
        let elem = self.element(id)?;
        match elem.name.as_str() {
            "input" => self.input_type(id).map(InputType::as_str),
            "select" if elem.has_attr("multiple") => Some("select-multiple"),
            "select" => Some("select-one"),
            "textarea" => Some("textarea"),
            "button" => Some(match elem.get_attr("type").map(str::to_ascii_lowercase).as_deref() {
                Some("reset") => "reset",
                Some("button") => "button",
                _ => "submit",
            }),
            _ => None,
        }
    }

    // === value ===

    /// Current value
    pub fn value(&self, id: NodeId) -> Option<String> {
        let elem = self.element(id)?;
        match elem.name.as_str() {
            "input" | "textarea" => match &self.control(id)?.value {
                Some(value) => Some(value.clone()),
                None => self.default_value(id),
            },
            "select" => {
                let selected = self
                    .selected_index(id)
                    .and_then(|i| self.options(id).get(i).copied());
                Some(selected.and_then(|o| self.value(o)).unwrap_or_default())
            }
            "option" => Some(match elem.get_attr("value") {
                Some(v) => v.to_string(),
                None => collapse_whitespace(&self.text_content(id)),
            }),
            "button" => Some(elem.get_attr("value").unwrap_or("").to_string()),
            _ => None,
        }
    }

    /// Default value (`value` attribute, or text content for textarea)
    pub fn default_value(&self, id: NodeId) -> Option<String> {
        let elem = self.element(id)?;
        match elem.name.as_str() {
            "input" => Some(elem.get_attr("value").unwrap_or("").to_string()),
            "textarea" => Some(self.text_content(id)),
            _ => None,
        }
    }

    /// Set the current value; returns false if the element has no value
    pub fn set_value(&mut self, id: NodeId, value: &str) -> bool {
        match self.tag_name(id) {
            Some("input") | Some("textarea") => match self.control_mut(id) {
                Some(control) => {
                    control.value = Some(value.to_string());
                    true
                }
                None => false,
            },
            Some("select") => {
                self.select_by_value(id, value);
                true
            }
            Some("option") | Some("button") => self.set_attribute(id, "value", value).is_ok(),
            _ => false,
        }
    }

    pub fn set_default_value(&mut self, id: NodeId, value: &str) -> bool {
        match self.tag_name(id) {
            Some("input") => self.set_attribute(id, "value", value).is_ok(),
            Some("textarea") => self.set_text_content(id, value).is_ok(),
            _ => false,
        }
    }

    // === checked ===

    /// Current checkedness (inputs only)
    pub fn checked(&self, id: NodeId) -> Option<bool> {
        let elem = self.element(id)?;
        if elem.name != "input" {
            return None;
        }
        let control = elem.control.as_ref()?;
        Some(control.checkedness.unwrap_or_else(|| elem.has_attr("checked")))
    }

    pub fn default_checked(&self, id: NodeId) -> Option<bool> {
        let elem = self.element(id)?;
        (elem.name == "input").then(|| elem.has_attr("checked"))
    }

    /// Set checkedness; checking a radio unchecks the rest of its group
    pub fn set_checked(&mut self, id: NodeId, checked: bool) -> bool {
        if !self.is_element_named(id, "input") {
            return false;
        }
        let others = if checked && self.input_type(id) == Some(InputType::Radio) {
            self.radio_group(id)
        } else {
            Vec::new()
        };
        for other in others.into_iter().filter(|&o| o != id) {
            if let Some(control) = self.control_mut(other) {
                control.checkedness = Some(false);
            }
        }
        match self.control_mut(id) {
            Some(control) => {
                control.checkedness = Some(checked);
                true
            }
            None => false,
        }
    }

    pub fn set_default_checked(&mut self, id: NodeId, checked: bool) -> bool {
        if !self.is_element_named(id, "input") {
            return false;
        }
        if checked {
            self.set_attribute(id, "checked", "").is_ok()
        } else {
            self.remove_attribute(id, "checked");
            true
        }
    }

    // === selected ===

    /// Current selectedness (options only)
    pub fn selected(&self, id: NodeId) -> Option<bool> {
        let elem = self.element(id)?;
        if elem.name != "option" {
            return None;
        }
        let control = elem.control.as_ref()?;
        Some(control.selectedness.unwrap_or_else(|| elem.has_attr("selected")))
    }

    pub fn default_selected(&self, id: NodeId) -> Option<bool> {
        let elem = self.element(id)?;
        (elem.name == "option").then(|| elem.has_attr("selected"))
    }

    /// Set selectedness; selecting in a single-select deselects siblings
    pub fn set_selected(&mut self, id: NodeId, selected: bool) -> bool {
        if !self.is_element_named(id, "option") {
            return false;
        }
        if selected {
            if let Some(select) = self.owning_select(id).filter(|&s| !self.is_multiple(s)) {
                for option in self.options(select) {
                    self.set_selectedness(option, option == id);
                }
                return true;
            }
        }
        self.set_selectedness(id, selected);
        true
    }

    pub fn set_default_selected(&mut self, id: NodeId, selected: bool) -> bool {
        if !self.is_element_named(id, "option") {
            return false;
        }
        if selected {
            self.set_attribute(id, "selected", "").is_ok()
        } else {
            self.remove_attribute(id, "selected");
            true
        }
    }

    pub(crate) fn set_selectedness(&mut self, id: NodeId, selected: bool) {
        if let Some(control) = self.control_mut(id) {
            control.selectedness = Some(selected);
        }
    }

    // === Generic property access ===

    /// Read a property; `None` when the element does not expose it
    pub fn property(&self, id: NodeId, property: Property) -> Option<PropertyValue> {
        match property {
            Property::Value => self.value(id).map(PropertyValue::Text),
            Property::DefaultValue => self.default_value(id).map(PropertyValue::Text),
            Property::Checked => self.checked(id).map(PropertyValue::Bool),
            Property::DefaultChecked => self.default_checked(id).map(PropertyValue::Bool),
            Property::Selected => self.selected(id).map(PropertyValue::Bool),
            Property::DefaultSelected => self.default_selected(id).map(PropertyValue::Bool),
        }
    }

    /// Write a property; returns false on a type mismatch or unsupported element
    pub fn set_property(&mut self, id: NodeId, property: Property, value: &PropertyValue) -> bool {
        match (property, value) {
            (Property::Value, PropertyValue::Text(v)) => self.set_value(id, v),
            (Property::DefaultValue, PropertyValue::Text(v)) => self.set_default_value(id, v),
            (Property::Checked, PropertyValue::Bool(b)) => self.set_checked(id, *b),
            (Property::DefaultChecked, PropertyValue::Bool(b)) => self.set_default_checked(id, *b),
            (Property::Selected, PropertyValue::Bool(b)) => self.set_selected(id, *b),
            (Property::DefaultSelected, PropertyValue::Bool(b)) => self.set_default_selected(id, *b),
            _ => false,
        }
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_ascii_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(tree: &mut DomTree, attrs: &[(&str, &str)]) -> NodeId {
        let id = tree.create_element("input");
        for (name, value) in attrs {
            tree.set_attribute(id, name, value).unwrap();
        }
        tree.append_child(tree.root(), id).unwrap();
        id
    }

    #[test]
    fn test_value_follows_default_until_dirty() {
        let mut tree = DomTree::new();
        let id = input(&mut tree, &[("value", "a")]);
        assert_eq!(tree.value(id).as_deref(), Some("a"));

        tree.set_default_value(id, "b");
        assert_eq!(tree.value(id).as_deref(), Some("b"));

        tree.set_value(id, "typed");
        tree.set_default_value(id, "c");
        assert_eq!(tree.value(id).as_deref(), Some("typed"));
        assert_eq!(tree.default_value(id).as_deref(), Some("c"));
    }

    #[test]
    fn test_checked_follows_attribute() {
        let mut tree = DomTree::new();
        let id = input(&mut tree, &[("type", "checkbox"), ("checked", "")]);
        assert_eq!(tree.checked(id), Some(true));
        assert_eq!(tree.default_checked(id), Some(true));

        tree.set_checked(id, false);
        assert_eq!(tree.checked(id), Some(false));
        assert_eq!(tree.default_checked(id), Some(true));
    }

    #[test]
    fn test_control_type() {
        let mut tree = DomTree::new();
        let text = input(&mut tree, &[]);
        let pass = input(&mut tree, &[("type", "Password")]);
        let select = tree.create_element("select");
        let div = tree.create_element("div");

        assert_eq!(tree.control_type(text), Some("text"));
        assert_eq!(tree.control_type(pass), Some("password"));
        assert_eq!(tree.control_type(select), Some("select-one"));
        tree.set_attribute(select, "multiple", "").unwrap();
        assert_eq!(tree.control_type(select), Some("select-multiple"));
        assert_eq!(tree.control_type(div), None);
    }

    #[test]
    fn test_property_type_mismatch() {
        let mut tree = DomTree::new();
        let id = input(&mut tree, &[]);
        assert!(!tree.set_property(id, Property::Value, &PropertyValue::Bool(true)));
        assert!(!tree.set_property(id, Property::Selected, &PropertyValue::Bool(true)));
        assert!(tree.set_property(id, Property::Value, &"x".into()));
        assert_eq!(tree.property(id, Property::Value), Some(PropertyValue::Text("x".into())));
    }

    #[test]
    fn test_div_has_no_value() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        assert_eq!(tree.value(div), None);
        assert!(!tree.set_value(div, "x"));
    }
}
