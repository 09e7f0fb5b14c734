use alloc::string::String;

use super::handle::Handle;
use crate::Contact;

/// A binary search tree node.
///
/// `key` is the folded form of `contact.name()` and is what the tree orders by.
/// Each child handle is referenced by exactly one link in the tree.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    key: String,
    contact: Contact,
    left: Option<Handle>,
    right: Option<Handle>,
}

/// Which side of a parent a child hangs from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Node {
    /// Creates a leaf.
    pub(crate) fn new(key: String, contact: Contact) -> Self {
        Self {
            key,
            contact,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub(crate) fn contact(&self) -> &Contact {
        &self.contact
    }

    #[inline]
    pub(crate) fn contact_mut(&mut self) -> &mut Contact {
        &mut self.contact
    }

    #[inline]
    pub(crate) fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn child_mut(&mut self, side: Side) -> &mut Option<Handle> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    #[cfg(test)]
    pub(crate) fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Moves another node's payload into this one, keeping this node's links.
    /// Returns the payload it replaced.
    pub(crate) fn replace_payload(&mut self, key: String, contact: Contact) -> (String, Contact) {
        let key = core::mem::replace(&mut self.key, key);
        let contact = core::mem::replace(&mut self.contact, contact);
        (key, contact)
    }

    /// Splits the node into its payload and its single remaining child, if any.
    ///
    /// # Panics
    ///
    /// Panics if the node has two children; those are removed by successor splicing.
    pub(crate) fn into_parts(self) -> (String, Contact, Option<Handle>) {
        assert!(
            self.left.is_none() || self.right.is_none(),
            "`Node::into_parts()` - node still owns two subtrees!"
        );
        (self.key, self.contact, self.left.or(self.right))
    }
}
