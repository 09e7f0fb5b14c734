//! Case folding used to order and compare contact names.
//!
//! The index never compares raw names. Every name (and every search, delete or
//! prefix argument) is first mapped through a [`CaseFolding`], and the folded
//! strings are compared byte-wise. Two names are the same key exactly when
//! their folded forms are equal.

use alloc::borrow::Cow;

/// Maps a name to the form the index orders and compares by.
///
/// Implementations must be deterministic: folding the same input twice must
/// give the same output, or lookups will miss.
///
/// # Examples
///
/// A folding that also ignores surrounding punctuation:
///
/// ```
/// use std::borrow::Cow;
/// use contact_index::{CaseFolding, Contact, ContactIndex};
///
/// #[derive(Default)]
/// struct LooseFolding;
///
/// impl CaseFolding for LooseFolding {
///     fn fold<'a>(&self, name: &'a str) -> Cow<'a, str> {
///         Cow::Owned(name.trim_matches(|c: char| c.is_ascii_punctuation()).to_lowercase())
///     }
/// }
///
/// let mut index = ContactIndex::with_folding(LooseFolding);
/// index.insert(Contact::new("'Ana'", "111"));
/// assert_eq!(index.search("ANA").map(Contact::phone), Some("111"));
/// ```
pub trait CaseFolding {
    /// Returns the folded form of `name`.
    fn fold<'a>(&self, name: &'a str) -> Cow<'a, str>;
}

/// Full Unicode lowercase mapping (`str::to_lowercase`). The default.
///
/// No locale tailoring and no normalization: `"É"` and `"é"` fold together,
/// but a precomposed `"é"` and `"e\u{301}"` stay distinct.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UnicodeLowercase;

impl CaseFolding for UnicodeLowercase {
    fn fold<'a>(&self, name: &'a str) -> Cow<'a, str> {
        if name.chars().any(|c| !c.to_lowercase().eq(core::iter::once(c))) {
            Cow::Owned(name.to_lowercase())
        } else {
            Cow::Borrowed(name)
        }
    }
}

/// Lowercases ASCII letters only; every other character compares exactly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AsciiLowercase;

impl CaseFolding for AsciiLowercase {
    fn fold<'a>(&self, name: &'a str) -> Cow<'a, str> {
        if name.bytes().any(|b| b.is_ascii_uppercase()) {
            Cow::Owned(name.to_ascii_lowercase())
        } else {
            Cow::Borrowed(name)
        }
    }
}

impl<F: CaseFolding + ?Sized> CaseFolding for &F {
    fn fold<'a>(&self, name: &'a str) -> Cow<'a, str> {
        (**self).fold(name)
    }
}
