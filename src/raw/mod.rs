mod arena;
mod handle;
mod node;
mod raw_contact_tree;

pub(crate) use handle::Handle;
pub(crate) use raw_contact_tree::RawContactTree;
