use core::fmt;

use smallvec::SmallVec;

use crate::raw::{Handle, RawContactTree};

/// Indentation added per level of depth.
const INDENT: &str = "    ";
/// Line printed in place of an absent child.
const EMPTY: &str = "<empty>";

/// A printable view of the tree's shape.
///
/// This `struct` is created by [`ContactIndex::structure`]. Its [`Display`]
/// output is a pre-order dump: one line per node as `name (phone)`, indented
/// four spaces per level, and an `<empty>` line wherever a child is absent.
/// The markers make the topology recoverable from the text, including which
/// side a lone child hangs from. An empty index prints a single `<empty>`.
///
/// # Examples
///
/// ```
/// use contact_index::{Contact, ContactIndex};
///
/// let mut contacts = ContactIndex::new();
/// contacts.insert(Contact::new("Carlos", "1"));
/// contacts.insert(Contact::new("Diego", "4"));
///
/// let expected = "\
/// Carlos (1)
///     <empty>
///     Diego (4)
///         <empty>
///         <empty>";
/// assert_eq!(contacts.structure().to_string(), expected);
/// ```
///
/// [`ContactIndex::structure`]: crate::ContactIndex::structure
/// [`Display`]: fmt::Display
#[derive(Clone, Copy)]
pub struct Structure<'a> {
    tree: &'a RawContactTree,
}

impl<'a> Structure<'a> {
    pub(crate) fn new(tree: &'a RawContactTree) -> Self {
        Self { tree }
    }
}

impl fmt::Display for Structure<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack: SmallVec<[(Option<Handle>, usize); 32]> = SmallVec::new();
        stack.push((self.tree.root(), 0));

        let mut first = true;
        while let Some((link, depth)) = stack.pop() {
            if !first {
                f.write_str("\n")?;
            }
            first = false;

            for _ in 0..depth {
                f.write_str(INDENT)?;
            }

            let Some(handle) = link else {
                f.write_str(EMPTY)?;
                continue;
            };

            let node = self.tree.node(handle);
            let contact = node.contact();
            write!(f, "{} ({})", contact.name(), contact.phone())?;
            stack.push((node.right(), depth + 1));
            stack.push((node.left(), depth + 1));
        }

        Ok(())
    }
}

impl fmt::Debug for Structure<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
