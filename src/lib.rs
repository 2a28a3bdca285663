//! Interactive tree view widget for ratatui with windowed rendering and lazy
//! child loading.
//!
//! The tree owns its nodes in an arena and hands out stable [`NodeId`]
//! handles. Consumers build the forest with [`NodeSpec`] and
//! [`Tree::attach_children`], drive it with [`TreeAction`]s (or raw key
//! events with the `keymap` feature), and draw it with [`TreeView`] or
//! [`Tree::view`]. An `on_open` hook per node defers child loading until the
//! node is first expanded.
//!
//! Feature flags:
//! - `keymap`: crossterm-based key bindings and `Tree::handle_key*` helpers.

mod action;
mod glyphs;
#[cfg(feature = "keymap")]
mod keymap;
mod node;
pub mod prelude;
mod style;
mod tree;
mod widget;

pub use action::{TreeAction, TreeEvent};
pub use glyphs::TreeGlyphs;
#[cfg(feature = "keymap")]
pub use keymap::{KeymapProfile, TreeKeyBindings};
pub use node::{HookFn, IconFn, Node, NodeId, NodeSpec, ParentLink, StyleFn};
pub use style::TreeStyle;
pub use tree::Tree;
pub use widget::TreeView;
