use core::fmt;
use core::iter::FusedIterator;

use alloc::string::String;

use super::{Stack, Step};
use crate::Contact;
use crate::raw::RawContactTree;

/// The contacts whose name starts with a prefix, sorted by name.
///
/// This `struct` is created by [`ContactIndex::prefix_search`]. See its
/// documentation for more.
///
/// Names that start with a prefix form one contiguous run of the sorted order,
/// so the walk is an in-order scan restricted to that run: a node below the
/// prefix can only have matches on its right, and a non-matching node above the
/// prefix can only have matches on its left.
///
/// [`ContactIndex::prefix_search`]: crate::ContactIndex::prefix_search
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct PrefixMatches<'a> {
    tree: &'a RawContactTree,
    prefix: String,
    stack: Stack,
}

impl<'a> PrefixMatches<'a> {
    /// `prefix` must already be folded.
    pub(crate) fn new(tree: &'a RawContactTree, prefix: String) -> Self {
        let mut stack = Stack::new();
        stack.extend(tree.root().map(Step::Expand));
        Self { tree, prefix, stack }
    }
}

impl<'a> Iterator for PrefixMatches<'a> {
    type Item = &'a Contact;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(step) = self.stack.pop() {
            let handle = match step {
                Step::Visit(handle) => return Some(self.tree.node(handle).contact()),
                Step::Expand(handle) => handle,
            };

            let node = self.tree.node(handle);
            let key = node.key();
            if key.starts_with(self.prefix.as_str()) {
                self.stack.extend(node.right().map(Step::Expand));
                self.stack.push(Step::Visit(handle));
                self.stack.extend(node.left().map(Step::Expand));
            } else if key < self.prefix.as_str() {
                self.stack.extend(node.right().map(Step::Expand));
            } else {
                self.stack.extend(node.left().map(Step::Expand));
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.tree.len()))
    }
}

impl FusedIterator for PrefixMatches<'_> {}

impl fmt::Debug for PrefixMatches<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefixMatches").field("prefix", &self.prefix).finish_non_exhaustive()
    }
}
