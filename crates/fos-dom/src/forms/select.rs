//! Select and Option Element Implementation
//!
//! Dropdown and list selection.

use crate::{DomTree, NodeId};

impl DomTree {
    /// Check the `multiple` attribute of a select
    pub fn is_multiple(&self, select: NodeId) -> bool {
        self.has_attribute(select, "multiple")
    }

    /// The select's list of options (direct children and optgroup children)
    pub fn options(&self, select: NodeId) -> Vec<NodeId> {
        if !self.is_element_named(select, "select") {
            return Vec::new();
        }
        let mut options = Vec::new();
        for (child, _) in self.children(select) {
            match self.tag_name(child) {
                Some("option") => options.push(child),
                Some("optgroup") => options.extend(
                    self.children(child)
                        .map(|(id, _)| id)
                        .filter(|&id| self.is_element_named(id, "option")),
                ),
                _ => {}
            }
        }
        options
    }

    /// Index of the first selected option
    pub fn selected_index(&self, select: NodeId) -> Option<usize> {
        self.options(select)
            .iter()
            .position(|&o| self.selected(o) == Some(true))
    }

    /// The select whose option list contains `option`
    pub fn owning_select(&self, option: NodeId) -> Option<NodeId> {
        let parent = self.parent(option)?;
        match self.tag_name(parent)? {
            "select" => Some(parent),
            "optgroup" => self.parent(parent).filter(|&p| self.is_element_named(p, "select")),
            _ => None,
        }
    }

    /// `select.value = value`: select the first matching option, deselect the rest
    pub(crate) fn select_by_value(&mut self, select: NodeId, value: &str) {
        let mut matched = false;
        for option in self.options(select) {
            let hit = !matched && self.value(option).as_deref() == Some(value);
            matched |= hit;
            self.set_selectedness(option, hit);
        }
    }

    /// Selectedness setting algorithm for single-selects with display size 1
    ///
    /// No selected option selects the first enabled one; several selected
    /// options keep only the last.
    pub(crate) fn reset_selectedness(&mut self, select: NodeId) {
        if self.is_multiple(select) || self.display_size(select) > 1 {
            return;
        }
        let options = self.options(select);
        let selected: Vec<NodeId> = options
            .iter()
            .copied()
            .filter(|&o| self.selected(o) == Some(true))
            .collect();

        match selected.as_slice() {
            [] => {
                let first = options
                    .iter()
                    .copied()
                    .find(|&o| !self.has_attribute(o, "disabled"));
                if let Some(first) = first {
                    self.set_selectedness(first, true);
                }
            }
            [rest @ .., _last] => {
                for &option in rest {
                    self.set_selectedness(option, false);
                }
            }
        }
    }

    fn display_size(&self, select: NodeId) -> u32 {
        self.get_attribute(select, "size")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select_with(tree: &mut DomTree, values: &[&str]) -> (NodeId, Vec<NodeId>) {
        let select = tree.create_element("select");
        tree.append_child(tree.root(), select).unwrap();
        let options = values
            .iter()
            .map(|v| {
                let option = tree.create_element("option");
                tree.set_attribute(option, "value", v).unwrap();
                tree.append_child(select, option).unwrap();
                option
            })
            .collect();
        (select, options)
    }

    #[test]
    fn test_first_option_auto_selected() {
        let mut tree = DomTree::new();
        let (select, options) = select_with(&mut tree, &["a", "b", "c"]);

        assert_eq!(tree.selected_index(select), Some(0));
        assert_eq!(tree.selected(options[0]), Some(true));
        assert_eq!(tree.default_selected(options[0]), Some(false));
        assert_eq!(tree.value(select).as_deref(), Some("a"));
    }

    #[test]
    fn test_default_selected_wins_over_auto() {
        let mut tree = DomTree::new();
        let select = tree.create_element("select");
        tree.append_child(tree.root(), select).unwrap();
        let a = tree.create_element("option");
        let b = tree.create_element("option");
        tree.set_attribute(b, "selected", "").unwrap();
        tree.append_child(select, a).unwrap();
        tree.append_child(select, b).unwrap();

        assert_eq!(tree.selected_index(select), Some(1));
        assert_eq!(tree.selected(a), Some(false));
    }

    #[test]
    fn test_selected_attribute_change_resets_select() {
        let mut tree = DomTree::new();
        let (select, options) = select_with(&mut tree, &["a", "b"]);

        tree.set_default_selected(options[1], true);
        assert_eq!(tree.selected_index(select), Some(1));
        assert_eq!(tree.selected(options[0]), Some(false));

        tree.set_default_selected(options[1], false);
        assert_eq!(tree.selected_index(select), Some(0));
        assert_eq!(tree.value(select).as_deref(), Some("a"));
    }

    #[test]
    fn test_dropping_multiple_keeps_last_selected() {
        let mut tree = DomTree::new();
        let (select, options) = select_with(&mut tree, &["a", "b", "c"]);
        tree.set_attribute(select, "multiple", "").unwrap();
        tree.set_selected(options[1], true);

        assert!(tree.remove_attribute(select, "multiple"));
        assert_eq!(tree.selected_index(select), Some(1));
        assert_eq!(tree.selected(options[0]), Some(false));
    }

    #[test]
    fn test_select_change() {
        let mut tree = DomTree::new();
        let (select, options) = select_with(&mut tree, &["a", "b"]);

        tree.set_value(select, "b");
        assert_eq!(tree.value(select).as_deref(), Some("b"));
        assert_eq!(tree.selected(options[0]), Some(false));

        tree.set_value(select, "missing");
        assert_eq!(tree.selected_index(select), None);
        assert_eq!(tree.value(select).as_deref(), Some(""));
    }

    #[test]
    fn test_single_select_is_exclusive() {
        let mut tree = DomTree::new();
        let (select, options) = select_with(&mut tree, &["a", "b", "c"]);

        tree.set_selected(options[2], true);
        assert_eq!(tree.selected_index(select), Some(2));
        assert_eq!(tree.selected(options[0]), Some(false));
    }

    #[test]
    fn test_multiple_select_keeps_set() {
        let mut tree = DomTree::new();
        let (select, options) = select_with(&mut tree, &["a", "b", "c"]);
        tree.set_attribute(select, "multiple", "").unwrap();

        tree.set_selected(options[0], false);
        tree.set_selected(options[1], true);
        tree.set_selected(options[2], true);

        let selected: Vec<bool> = options.iter().map(|&o| tree.selected(o).unwrap()).collect();
        assert_eq!(selected, vec![false, true, true]);
    }

    #[test]
    fn test_optgroup_options() {
        let mut tree = DomTree::new();
        let (select, mut options) = select_with(&mut tree, &["a"]);
        let group = tree.create_element("optgroup");
        let inner = tree.create_element("option");
        tree.append_child(group, inner).unwrap();
        tree.append_child(select, group).unwrap();
        options.push(inner);

        assert_eq!(tree.options(select), options);
        assert_eq!(tree.owning_select(inner), Some(select));
    }
}
