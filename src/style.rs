use ratatui::style::{Color, Style};

/// Base row styles for the tree view.
///
/// Styles are opaque attribute bags; per-node icon and label styles are
/// layered on top of the focus/unfocus base with [`Style::patch`].
#[derive(Clone, Copy, Debug)]
pub struct TreeStyle {
    /// Base style for the row holding the focused node.
    pub focused: Style,
    /// Base style for every other row.
    pub unfocused: Style,
}

impl Default for TreeStyle {
    fn default() -> Self {
        Self {
            focused: Style::new().bg(Color::Indexed(62)),
            unfocused: Style::new(),
        }
    }
}
