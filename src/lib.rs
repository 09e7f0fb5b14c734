//! A case-insensitive, name-keyed contact index for Rust.
//!
//! This crate provides [`ContactIndex`], an ordered address book backed by an
//! unbalanced binary search tree. It supports:
//!
//! - [`insert`](ContactIndex::insert) - Add a contact, or update the phone of an existing name
//! - [`search`](ContactIndex::search) - Exact lookup, ignoring case
//! - [`delete`](ContactIndex::delete) - Removal with in-order successor splicing
//! - [`traverse`](ContactIndex::traverse) - In-order, pre-order and post-order walks
//! - [`prefix_search`](ContactIndex::prefix_search) - Every name starting with a prefix
//! - [`structure`](ContactIndex::structure) - A text dump of the tree's shape
//!
//! # Example
//!
//! ```
//! use contact_index::{Contact, ContactIndex, Order};
//!
//! let mut book = ContactIndex::new();
//! book.insert(Contact::new("Carlos", "1"));
//! book.insert(Contact::new("Ana", "2"));
//! book.insert(Contact::new("Beto", "3"));
//! book.insert(Contact::new("Diego", "4"));
//!
//! assert_eq!(book.search("ana").map(Contact::phone), Some("2"));
//!
//! let pre: Vec<_> = book.traverse(Order::PreOrder).map(Contact::name).collect();
//! assert_eq!(pre, ["Carlos", "Ana", "Beto", "Diego"]);
//!
//! let d: Vec<_> = book.prefix_search("d").map(Contact::name).collect();
//! assert_eq!(d, ["Diego"]);
//! ```
//!
//! # Features
//!
//! - **`std`** (default) - Enables `std` support in dependencies. Without it the
//!   crate only requires `alloc`.
//! - **`csv`** (default) - The [`csv_io`] module: loading contacts from, and
//!   exporting traversals to, two-column `name,phone` CSV files.
//!
//! # Implementation
//!
//! Nodes live in an arena and link to their children by integer handle. No
//! operation recurses: searches and mutations walk down one owning link at a
//! time, and traversals keep an explicit stack, so the sorted insertion order
//! that degrades the tree into a list costs O(n) time per operation but never
//! native stack depth. Mutations log through [`tracing`] at `TRACE` level.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod contact;
mod folding;
mod order;
mod raw;

pub mod index;
#[cfg(feature = "csv")]
pub mod csv_io;
#[cfg(feature = "csv")]
mod error;

pub use contact::Contact;
pub use index::ContactIndex;
#[cfg(feature = "csv")]
pub use error::{Error, Result};
pub use folding::{AsciiLowercase, CaseFolding, UnicodeLowercase};
pub use order::{Order, ParseOrderError};
