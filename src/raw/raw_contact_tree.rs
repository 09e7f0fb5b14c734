use core::cmp::Ordering;

use alloc::string::String;
use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Node, Side};
use crate::Contact;

/// The unbalanced binary search tree backing `ContactIndex`.
///
/// Keys are already folded by the caller; this layer only compares them with
/// `str::cmp`. Every walk is iterative so that a degenerate (sorted insertion)
/// tree does not grow the call stack.
#[derive(Clone, Debug)]
pub(crate) struct RawContactTree {
    /// Arena storing all tree nodes.
    nodes: Arena<Node>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
}

/// An owning link: either the root pointer or one side of a node.
///
/// Mutations rewrite exactly one link, so a subtree always has a single owner.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Link {
    Root,
    Child(Handle, Side),
}

impl RawContactTree {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Returns the number of nodes in the tree.
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    pub(crate) fn root(&self) -> Option<Handle> {
        self.root
    }

    pub(crate) fn node(&self, handle: Handle) -> &Node {
        self.nodes.get(handle)
    }

    fn link(&self, link: Link) -> Option<Handle> {
        match link {
            Link::Root => self.root,
            Link::Child(parent, side) => self.nodes.get(parent).child(side),
        }
    }

    fn link_mut(&mut self, link: Link) -> &mut Option<Handle> {
        match link {
            Link::Root => &mut self.root,
            Link::Child(parent, side) => self.nodes.get_mut(parent).child_mut(side),
        }
    }

    /// Descends to the link that holds `key`, or to the empty link where a node
    /// for `key` would be attached.
    fn locate(&self, key: &str) -> Link {
        let mut link = Link::Root;
        while let Some(handle) = self.link(link) {
            link = match key.cmp(self.nodes.get(handle).key()) {
                Ordering::Less => Link::Child(handle, Side::Left),
                Ordering::Greater => Link::Child(handle, Side::Right),
                Ordering::Equal => return link,
            };
        }
        link
    }

    /// Returns the handle of the node stored under `key`.
    pub(crate) fn search(&self, key: &str) -> Option<Handle> {
        self.link(self.locate(key))
    }

    pub(crate) fn get(&self, key: &str) -> Option<&Contact> {
        self.search(key).map(|handle| self.nodes.get(handle).contact())
    }

    /// Inserts `contact` under `key`.
    ///
    /// An existing node only has its phone overwritten; its position and the
    /// stored spelling of the name are unchanged. Returns the replaced phone in
    /// that case, `None` when a new leaf was attached.
    pub(crate) fn insert(&mut self, key: String, contact: Contact) -> Option<String> {
        let link = self.locate(&key);
        if let Some(existing) = self.link(link) {
            let phone = contact.into_phone();
            return Some(self.nodes.get_mut(existing).contact_mut().replace_phone(phone));
        }

        let leaf = self.nodes.insert(Node::new(key, contact));
        *self.link_mut(link) = Some(leaf);
        None
    }

    /// Removes the node stored under `key` and returns its contact.
    ///
    /// A node with two children is not unlinked: it receives the payload of its
    /// in-order successor (the minimum of its right subtree) and the successor's
    /// original slot, which has no left child, is spliced out instead.
    pub(crate) fn remove(&mut self, key: &str) -> Option<Contact> {
        let link = self.locate(key);
        let target = self.link(link)?;

        let right = match (self.nodes.get(target).left(), self.nodes.get(target).right()) {
            (Some(_), Some(right)) => right,
            _ => {
                let (_, contact, child) = self.nodes.remove(target).into_parts();
                *self.link_mut(link) = child;
                return Some(contact);
            }
        };

        let mut successor_link = Link::Child(target, Side::Right);
        let mut successor = right;
        while let Some(left) = self.nodes.get(successor).left() {
            successor_link = Link::Child(successor, Side::Left);
            successor = left;
        }

        let (successor_key, successor_contact, successor_child) = self.nodes.remove(successor).into_parts();
        *self.link_mut(successor_link) = successor_child;

        let (_, removed) = self.nodes.get_mut(target).replace_payload(successor_key, successor_contact);
        Some(removed)
    }

    /// Number of nodes on the longest root-to-leaf path; zero for an empty tree.
    pub(crate) fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: SmallVec<[(Handle, usize); 32]> = SmallVec::new();
        stack.extend(self.root.map(|root| (root, 1)));

        while let Some((handle, depth)) = stack.pop() {
            height = height.max(depth);
            let node = self.nodes.get(handle);
            stack.extend(node.left().map(|left| (left, depth + 1)));
            stack.extend(node.right().map(|right| (right, depth + 1)));
        }

        height
    }
}
