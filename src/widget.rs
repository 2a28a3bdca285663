use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::Widget;

use crate::glyphs::TreeGlyphs;
use crate::node::NodeId;
use crate::style::TreeStyle;
use crate::tree::Tree;

impl<P> Tree<P> {
    /// Renders the visible slice of the forest as one line per row.
    ///
    /// A single pre-order traversal carries a line counter seeded at
    /// `-viewport_top`: rows above the window are counted but not
    /// materialized, and the recursion stops outright once the counter
    /// passes the bottom of the window. Before the first resize the output
    /// is empty.
    pub fn view<'a>(&'a self, style: &TreeStyle, glyphs: &TreeGlyphs<'a>) -> Text<'a> {
        if !self.initialized() || self.height() == 0 {
            return Text::default();
        }
        let bottom = self.height() as isize;
        let mut line = -(self.viewport_top() as isize);
        let mut rows = Vec::with_capacity(usize::from(self.height()));
        for &root in self.roots() {
            if line >= bottom {
                break;
            }
            self.push_rows(root, 0, &mut line, bottom, style, glyphs, &mut rows);
        }
        Text::from(rows)
    }

    #[allow(clippy::too_many_arguments)]
    fn push_rows<'a>(
        &'a self,
        id: NodeId,
        depth: usize,
        line: &mut isize,
        bottom: isize,
        style: &TreeStyle,
        glyphs: &TreeGlyphs<'a>,
        out: &mut Vec<Line<'a>>,
    ) {
        let Some(node) = self.node(id) else {
            return;
        };
        if *line >= 0 {
            let base = if self.focused() == Some(id) {
                style.focused
            } else {
                style.unfocused
            };
            let indicator = if node.can_expand() {
                if node.is_open() {
                    glyphs.expanded
                } else {
                    glyphs.collapsed
                }
            } else {
                glyphs.leaf
            };
            let mut spans = Vec::with_capacity(5);
            if depth > 0 {
                spans.push(Span::styled(glyphs.indent.repeat(depth), base));
            }
            spans.push(Span::styled(indicator, base));
            spans.push(Span::styled(node.icon(), base.patch(node.icon_style())));
            spans.push(Span::styled(" ", base));
            spans.push(Span::styled(node.name(), base.patch(node.label_style())));
            out.push(Line::from(spans));
        }
        *line += 1;
        if *line >= bottom {
            return;
        }
        if node.is_open() {
            for &child in node.children() {
                self.push_rows(child, depth + 1, line, bottom, style, glyphs, out);
                if *line >= bottom {
                    break;
                }
            }
        }
    }
}

/// Thin ratatui widget drawing a [`Tree`] into a buffer.
///
/// The tree's own viewport (set by [`Tree::resize`]) decides which rows are
/// produced; the widget only places them at `area`.
pub struct TreeView<'a, P> {
    tree: &'a Tree<P>,
    style: TreeStyle,
    glyphs: TreeGlyphs<'a>,
}

impl<'a, P> TreeView<'a, P> {
    pub fn new(tree: &'a Tree<P>) -> Self {
        Self {
            tree,
            style: TreeStyle::default(),
            glyphs: TreeGlyphs::unicode(),
        }
    }

    #[must_use]
    pub const fn style(mut self, style: TreeStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub const fn glyphs(mut self, glyphs: TreeGlyphs<'a>) -> Self {
        self.glyphs = glyphs;
        self
    }
}

impl<P> Widget for TreeView<'_, P> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.tree.view(&self.style, &self.glyphs).render(area, buf);
    }
}
