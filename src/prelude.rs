pub use crate::{
    HookFn, IconFn, Node, NodeId, NodeSpec, ParentLink, StyleFn, Tree, TreeAction, TreeEvent,
    TreeGlyphs, TreeStyle, TreeView,
};

#[cfg(feature = "keymap")]
pub use crate::{KeymapProfile, TreeKeyBindings};
