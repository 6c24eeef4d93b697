//! Form owner and form element collections

use super::{InputType, LISTED_TAGS};
use crate::{DomTree, NodeId};

impl DomTree {
    /// Check if `id` is a listed form-associated element
    pub fn is_listed(&self, id: NodeId) -> bool {
        self.tag_name(id).is_some_and(|tag| LISTED_TAGS.contains(&tag))
    }

    /// The element's form owner (`element.form`)
    ///
    /// An explicit `form` attribute must reference a `form` by id; otherwise
    /// the nearest ancestor form is used. Options report the owner of their
    /// select.
    pub fn form_owner(&self, id: NodeId) -> Option<NodeId> {
        if self.is_element_named(id, "option") {
            return self.owning_select(id).and_then(|select| self.form_owner(select));
        }
        if !self.is_listed(id) {
            return None;
        }
        if let Some(form_id) = self.get_attribute(id, "form") {
            return self
                .find_element_by_id(form_id)
                .filter(|&form| self.is_element_named(form, "form"));
        }
        self.ancestors(id)
            .skip(1)
            .find(|&a| self.is_element_named(a, "form"))
    }

    /// `form.elements`: listed elements owned by `form`, in document order
    ///
    /// Image buttons are excluded.
    pub fn form_elements(&self, form: NodeId) -> Vec<NodeId> {
        if !self.is_element_named(form, "form") {
            return Vec::new();
        }
        self.descendants(self.root())
            .filter(|&id| self.is_listed(id))
            .filter(|&id| self.input_type(id) != Some(InputType::Image))
            .filter(|&id| self.form_owner(id) == Some(form))
            .collect()
    }

    /// `input[type=radio][name=...]` elements under `scope`, in document order
    pub fn radios_named(&self, scope: NodeId, name: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .filter(|&id| self.is_element_named(id, "input"))
            .filter(|&id| {
                self.get_attribute(id, "type")
                    .is_some_and(|t| t.eq_ignore_ascii_case("radio"))
            })
            .filter(|&id| self.get_attribute(id, "name") == Some(name))
            .collect()
    }

    /// Radio button group of `id`: same form owner, same non-empty name
    ///
    /// A radio without a name is alone in its group.
    pub fn radio_group(&self, id: NodeId) -> Vec<NodeId> {
        let name = match self.get_attribute(id, "name") {
            Some(name) if !name.is_empty() => name,
            _ => return vec![id],
        };
        let owner = self.form_owner(id);
        let root = self.ancestors(id).last().unwrap_or(id);
        self.descendants(root)
            .filter(|&other| self.input_type(other) == Some(InputType::Radio))
            .filter(|&other| self.get_attribute(other, "name") == Some(name))
            .filter(|&other| self.form_owner(other) == owner)
            .collect()
    }
}
