use super::ContactIndex;
use crate::UnicodeLowercase;
use crate::raw::RawContactTree;

impl ContactIndex<UnicodeLowercase> {
    /// Creates an empty index with room for at least `capacity` contacts
    /// before its node storage reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use contact_index::ContactIndex;
    ///
    /// let contacts = ContactIndex::with_capacity(32);
    /// assert!(contacts.is_empty());
    /// assert!(contacts.capacity() >= 32);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_folding(capacity, UnicodeLowercase)
    }
}

impl<F> ContactIndex<F> {
    /// Creates an empty index with room for `capacity` contacts that compares
    /// names with `folding`.
    #[must_use]
    pub fn with_capacity_and_folding(capacity: usize, folding: F) -> Self {
        ContactIndex {
            raw: RawContactTree::with_capacity(capacity),
            folding,
        }
    }

    /// Returns how many contacts fit before the node storage reallocates.
    ///
    /// Slots freed by [`delete`](ContactIndex::delete) are reused first.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
