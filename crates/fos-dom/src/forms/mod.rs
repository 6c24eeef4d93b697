//! Form Elements Module
//!
//! Live form-control state layered over the element tree: values,
//! checkedness, option selectedness, form owners and select options.
//!
//! Defaults come from content attributes (`value`, `checked`, `selected`)
//! or text content (`textarea`); the live side is kept in [`ControlState`]
//! and only diverges from the default once script or the user sets it.

mod input;
mod select;
mod form;
mod control;

use std::fmt;

pub use input::InputType;

/// Elements that carry live control state
const CONTROL_TAGS: &[&str] = &["input", "textarea", "select", "option", "button"];

/// Listed form-associated elements (`form.elements` membership)
pub const LISTED_TAGS: &[&str] = &[
    "button", "fieldset", "input", "object", "output", "select", "textarea",
];

/// Live (dirty) state of a form control
///
/// `None` means "follow the default".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlState {
    pub(crate) value: Option<String>,
    pub(crate) checkedness: Option<bool>,
    pub(crate) selectedness: Option<bool>,
}

impl ControlState {
    pub(crate) fn for_tag(tag: &str) -> Option<Self> {
        CONTROL_TAGS.contains(&tag).then(Self::default)
    }

    /// Value was set by script or the user
    pub fn is_value_dirty(&self) -> bool {
        self.value.is_some()
    }

    /// Checkedness was set by script or the user
    pub fn is_checkedness_dirty(&self) -> bool {
        self.checkedness.is_some()
    }
}

/// IDL properties of form controls that carry state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Value,
    DefaultValue,
    Checked,
    DefaultChecked,
    Selected,
    DefaultSelected,
}

impl Property {
    /// IDL name
    pub fn name(self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::DefaultValue => "defaultValue",
            Self::Checked => "checked",
            Self::DefaultChecked => "defaultChecked",
            Self::Selected => "selected",
            Self::DefaultSelected => "defaultSelected",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value of a [`Property`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Text(String),
    Bool(bool),
}

impl PropertyValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Bool(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Text(_) => None,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}
