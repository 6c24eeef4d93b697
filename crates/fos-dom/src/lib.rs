//! fOS DOM - Document Object Model
//!
//! Arena-backed DOM tree with live form-control state and synchronous,
//! document-level event dispatch.
//!
//! Nodes are addressed by [`NodeId`] (an index into the arena) instead of
//! pointers, so callers can hold ids across mutations without borrowing
//! the tree.

mod node;
mod tree;
mod document;
mod events;
mod error;
pub mod forms;

pub use node::{Attribute, ElementData, Node, NodeData, TextData};
pub use tree::{Ancestors, Children, Descendants, DomTree};
pub use document::Document;
pub use events::{DomEvent, DomEventType, EventListener, ListenerId};
pub use error::DomError;
pub use forms::{ControlState, InputType, Property, PropertyValue};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node" (missing parent, sibling, child)
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check that this id refers to a node slot
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            write!(f, "#{}", self.0)
        } else {
            f.write_str("#none")
        }
    }
}
