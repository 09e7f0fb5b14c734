use core::fmt;
use core::str::FromStr;

use alloc::string::{String, ToString};
use thiserror::Error;

/// The order in which [`ContactIndex::traverse`](crate::ContactIndex::traverse)
/// visits the tree.
///
/// Every order yields each stored contact exactly once; they differ only in
/// where a node is emitted relative to its subtrees.
///
/// # Examples
///
/// ```
/// use contact_index::Order;
///
/// assert_eq!("preorder".parse::<Order>(), Ok(Order::PreOrder));
/// assert_eq!(Order::PostOrder.to_string(), "postorder");
/// assert_eq!(Order::InOrder.export_file_name(), "contacts_inorder.csv");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Order {
    /// Left subtree, node, right subtree. Sorted by case-insensitive name.
    #[default]
    InOrder,
    /// Node, left subtree, right subtree. The shape used by the structure dump.
    PreOrder,
    /// Left subtree, right subtree, node.
    PostOrder,
}

impl Order {
    /// All three orders, in export order.
    pub const ALL: [Order; 3] = [Order::InOrder, Order::PreOrder, Order::PostOrder];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Order::InOrder => "inorder",
            Order::PreOrder => "preorder",
            Order::PostOrder => "postorder",
        }
    }

    /// File name of the export artifact for this order.
    #[must_use]
    pub const fn export_file_name(self) -> &'static str {
        match self {
            Order::InOrder => "contacts_inorder.csv",
            Order::PreOrder => "contacts_preorder.csv",
            Order::PostOrder => "contacts_postorder.csv",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names none of the traversal orders.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown traversal order `{0}`, expected one of: inorder, preorder, postorder")]
pub struct ParseOrderError(String);

impl FromStr for Order {
    type Err = ParseOrderError;

    /// Accepts `inorder`, `preorder` and `postorder`, ignoring ASCII case and an
    /// optional `-` or `_` before `order`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', '_'], "");
        Order::ALL
            .into_iter()
            .find(|order| order.as_str() == normalized)
            .ok_or_else(|| ParseOrderError(s.to_string()))
    }
}
