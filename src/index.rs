use core::fmt;
use core::iter::FusedIterator;

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use smallvec::SmallVec;
use tracing::trace;

use crate::raw::{Handle, RawContactTree};
use crate::{CaseFolding, Contact, Order, UnicodeLowercase};

mod capacity;
mod prefix;
mod structure;

pub use prefix::PrefixMatches;
pub use structure::Structure;

/// An ordered contact list keyed by case-insensitive name.
///
/// Contacts are stored in an unbalanced [binary search tree]. Names are compared
/// after mapping them through a [`CaseFolding`] (by default [`UnicodeLowercase`]),
/// so `"Ana"`, `"ANA"` and `"ana"` are one key. The tree is never rebalanced:
/// inserting names in sorted order produces a tree whose height equals its
/// length. Every operation walks the tree iteratively, so deep trees cost time
/// but never native stack.
///
/// `ContactIndex` has no interior synchronization. Share it across threads
/// behind a lock, or keep it owned by a single thread.
///
/// # Examples
///
/// ```
/// use contact_index::{Contact, ContactIndex, Order};
///
/// let mut contacts = ContactIndex::new();
/// contacts.insert(Contact::new("Carlos", "1"));
/// contacts.insert(Contact::new("Ana", "2"));
/// contacts.insert(Contact::new("Beto", "3"));
/// contacts.insert(Contact::new("Diego", "4"));
///
/// // Re-inserting a name only updates the phone.
/// assert_eq!(contacts.insert(Contact::new("ana", "9")), Some("2".to_string()));
/// assert_eq!(contacts.len(), 4);
/// assert_eq!(contacts.search("ANA").map(Contact::phone), Some("9"));
///
/// let names: Vec<_> = contacts.traverse(Order::InOrder).map(Contact::name).collect();
/// assert_eq!(names, ["Ana", "Beto", "Carlos", "Diego"]);
///
/// contacts.delete("carlos");
/// let names: Vec<_> = contacts.iter().map(Contact::name).collect();
/// assert_eq!(names, ["Ana", "Beto", "Diego"]);
/// ```
///
/// [binary search tree]: https://en.wikipedia.org/wiki/Binary_search_tree
#[derive(Clone)]
pub struct ContactIndex<F = UnicodeLowercase> {
    raw: RawContactTree,
    folding: F,
}

/// A walk over every contact of a [`ContactIndex`] in a chosen [`Order`].
///
/// This `struct` is created by [`ContactIndex::traverse`] and
/// [`ContactIndex::iter`]. It borrows the index and keeps its own explicit
/// stack, so it is lazy, but its exact length is always known up front.
///
/// # Examples
///
/// ```
/// use contact_index::{Contact, ContactIndex, Order};
///
/// let contacts: ContactIndex = [("b", "2"), ("a", "1"), ("c", "3")].into_iter().collect();
/// let mut walk = contacts.traverse(Order::PreOrder);
/// assert_eq!(walk.len(), 3);
/// assert_eq!(walk.next().map(Contact::name), Some("b"));
/// assert_eq!(walk.len(), 2);
/// ```
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Traverse<'a> {
    tree: &'a RawContactTree,
    order: Order,
    stack: Stack,
    remaining: usize,
}

/// Pending work on an explicit traversal stack.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Step {
    /// Push this node's children and itself according to the walk.
    Expand(Handle),
    /// Emit this node's contact.
    Visit(Handle),
}

pub(crate) type Stack = SmallVec<[Step; 32]>;

impl ContactIndex<UnicodeLowercase> {
    /// Makes a new, empty `ContactIndex` using [`UnicodeLowercase`] folding.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use contact_index::ContactIndex;
    ///
    /// let contacts = ContactIndex::new();
    /// assert!(contacts.is_empty());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self::with_folding(UnicodeLowercase)
    }
}

impl<F> ContactIndex<F> {
    /// Makes a new, empty `ContactIndex` that compares names with `folding`.
    ///
    /// # Examples
    ///
    /// ```
    /// use contact_index::{AsciiLowercase, Contact, ContactIndex};
    ///
    /// let mut contacts = ContactIndex::with_folding(AsciiLowercase);
    /// contacts.insert(Contact::new("Émile", "1"));
    /// assert!(!contacts.contains("émile"));
    /// assert!(contacts.contains("ÉMILE"));
    /// ```
    #[must_use]
    pub const fn with_folding(folding: F) -> Self {
        Self {
            raw: RawContactTree::new(),
            folding,
        }
    }

    /// Returns the folding this index compares names with.
    pub fn folding(&self) -> &F {
        &self.folding
    }

    /// Returns the number of contacts stored.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the index holds no contacts.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Removes every contact.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Number of nodes on the longest root-to-leaf path, zero when empty.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Walks every contact in the given `order`.
    ///
    /// [`Order::InOrder`] is the sorted listing. Collect the walk (or use
    /// [`to_vec`](Self::to_vec)) when the whole sequence is needed at once.
    ///
    /// # Examples
    ///
    /// ```
    /// use contact_index::{Contact, ContactIndex, Order};
    ///
    /// let contacts: ContactIndex = [("m", "1"), ("c", "2"), ("x", "3")].into_iter().collect();
    /// let post: Vec<_> = contacts.traverse(Order::PostOrder).map(Contact::name).collect();
    /// assert_eq!(post, ["c", "x", "m"]);
    /// ```
    pub fn traverse(&self, order: Order) -> Traverse<'_> {
        Traverse::new(&self.raw, order)
    }

    /// Walks every contact sorted by case-insensitive name.
    pub fn iter(&self) -> Traverse<'_> {
        self.traverse(Order::InOrder)
    }

    /// Returns owned copies of every contact in the given `order`.
    #[must_use]
    pub fn to_vec(&self, order: Order) -> Vec<Contact> {
        self.traverse(order).cloned().collect()
    }

    /// Returns a [`Display`](fmt::Display) view of the tree shape.
    ///
    /// See [`Structure`] for the format.
    pub fn structure(&self) -> Structure<'_> {
        Structure::new(&self.raw)
    }

    /// Renders the tree shape as text, one line per node or empty child.
    ///
    /// # Examples
    ///
    /// ```
    /// use contact_index::ContactIndex;
    ///
    /// let contacts: ContactIndex = [("Beto", "2"), ("Ana", "1")].into_iter().collect();
    /// assert_eq!(
    ///     contacts.render_structure(),
    ///     "Beto (2)\n    Ana (1)\n        <empty>\n        <empty>\n    <empty>"
    /// );
    /// ```
    #[must_use]
    pub fn render_structure(&self) -> String {
        self.structure().to_string()
    }
}

impl<F: CaseFolding> ContactIndex<F> {
    /// Inserts a contact, or updates the phone of the contact already stored
    /// under the same case-insensitive name.
    ///
    /// An update leaves the node where it is and keeps the stored spelling of
    /// the name. Returns the phone it replaced, or `None` if a new contact was
    /// added. Names are not validated: an empty name is a valid key.
    ///
    /// # Examples
    ///
    /// ```
    /// use contact_index::{Contact, ContactIndex};
    ///
    /// let mut contacts = ContactIndex::new();
    /// assert_eq!(contacts.insert(Contact::new("Ana", "111")), None);
    /// assert_eq!(contacts.insert(Contact::new("Beto", "222")), None);
    /// assert_eq!(contacts.insert(Contact::new("ana", "999")), Some("111".to_string()));
    ///
    /// assert_eq!(contacts.len(), 2);
    /// assert_eq!(contacts.search("ANA"), Some(&Contact::new("Ana", "999")));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(height)
    pub fn insert(&mut self, contact: Contact) -> Option<String> {
        let key = self.folding.fold(contact.name()).into_owned();
        let previous = self.raw.insert(key, contact);
        match &previous {
            Some(_) => trace!(len = self.raw.len(), "updated contact phone"),
            None => trace!(len = self.raw.len(), "inserted contact"),
        }
        previous
    }

    /// Returns the contact stored under `name`, ignoring case.
    ///
    /// # Complexity
    ///
    /// O(height)
    #[must_use]
    pub fn search(&self, name: &str) -> Option<&Contact> {
        self.raw.get(&self.folding.fold(name))
    }

    /// Returns `true` if a contact is stored under `name`, ignoring case.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.search(name).is_some()
    }

    /// Removes the contact stored under `name`, ignoring case, and returns it.
    ///
    /// Deleting an absent name does nothing and returns `None`. A node with two
    /// children takes the payload of its in-order successor (the leftmost node
    /// of its right subtree), whose original node is removed instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use contact_index::{Contact, ContactIndex};
    ///
    /// let mut contacts: ContactIndex = [("Carlos", "1"), ("Ana", "2"), ("Diego", "4")].into_iter().collect();
    /// assert_eq!(contacts.delete("CARLOS"), Some(Contact::new("Carlos", "1")));
    /// assert_eq!(contacts.delete("Zara"), None);
    /// assert_eq!(contacts.len(), 2);
    /// assert_eq!(contacts.search("carlos"), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(height)
    pub fn delete(&mut self, name: &str) -> Option<Contact> {
        let removed = self.raw.remove(&self.folding.fold(name));
        match &removed {
            Some(_) => trace!(len = self.raw.len(), "deleted contact"),
            None => trace!("delete of absent contact ignored"),
        }
        removed
    }

    /// Returns every contact whose name starts with `prefix`, ignoring case,
    /// sorted by name. An empty prefix matches every contact.
    ///
    /// Only subtrees that can hold a match are visited.
    ///
    /// # Examples
    ///
    /// ```
    /// use contact_index::{Contact, ContactIndex};
    ///
    /// let contacts: ContactIndex =
    ///     [("Carlos", "1"), ("Ana", "2"), ("Beto", "3"), ("Diego", "4"), ("Carla", "5")].into_iter().collect();
    ///
    /// let hits: Vec<_> = contacts.prefix_search("CAR").map(Contact::name).collect();
    /// assert_eq!(hits, ["Carla", "Carlos"]);
    /// assert_eq!(contacts.prefix_search("").count(), 5);
    /// assert_eq!(contacts.prefix_search("z").count(), 0);
    /// ```
    pub fn prefix_search(&self, prefix: &str) -> PrefixMatches<'_> {
        PrefixMatches::new(&self.raw, self.folding.fold(prefix).into_owned())
    }

    /// Inserts every contact from `contacts` in arrival order and returns how
    /// many were read.
    pub fn load<I>(&mut self, contacts: I) -> usize
    where
        I: IntoIterator<Item = Contact>,
    {
        let mut count = 0;
        for contact in contacts {
            self.insert(contact);
            count += 1;
        }
        count
    }
}

impl<F: Default> Default for ContactIndex<F> {
    fn default() -> Self {
        Self::with_folding(F::default())
    }
}

impl<F> fmt::Debug for ContactIndex<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<F: CaseFolding, C: Into<Contact>> Extend<C> for ContactIndex<F> {
    fn extend<I: IntoIterator<Item = C>>(&mut self, iter: I) {
        self.load(iter.into_iter().map(Into::into));
    }
}

impl<F: CaseFolding + Default, C: Into<Contact>> FromIterator<C> for ContactIndex<F> {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        let mut index = Self::default();
        index.extend(iter);
        index
    }
}

impl<'a, F> IntoIterator for &'a ContactIndex<F> {
    type Item = &'a Contact;
    type IntoIter = Traverse<'a>;

    fn into_iter(self) -> Traverse<'a> {
        self.iter()
    }
}

impl<'a> Traverse<'a> {
    fn new(tree: &'a RawContactTree, order: Order) -> Self {
        let mut stack = Stack::new();
        stack.extend(tree.root().map(Step::Expand));
        Self {
            tree,
            order,
            stack,
            remaining: tree.len(),
        }
    }

    /// The order this walk follows.
    #[must_use]
    pub fn order(&self) -> Order {
        self.order
    }
}

impl<'a> Iterator for Traverse<'a> {
    type Item = &'a Contact;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(step) = self.stack.pop() {
            let handle = match step {
                Step::Visit(handle) => {
                    self.remaining -= 1;
                    return Some(self.tree.node(handle).contact());
                }
                Step::Expand(handle) => handle,
            };

            // Pushed in reverse of the order they must come off the stack.
            let node = self.tree.node(handle);
            let left = node.left().map(Step::Expand);
            let right = node.right().map(Step::Expand);
            let visit = Some(Step::Visit(handle));
            let pending = match self.order {
                Order::InOrder => [right, visit, left],
                Order::PreOrder => [right, left, visit],
                Order::PostOrder => [visit, right, left],
            };
            self.stack.extend(pending.into_iter().flatten());
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Traverse<'_> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl FusedIterator for Traverse<'_> {}

impl Clone for Traverse<'_> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            order: self.order,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl fmt::Debug for Traverse<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Traverse").field("order", &self.order).field("remaining", &self.remaining).finish()
    }
}
