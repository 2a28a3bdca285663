// Minimal example: a small static tree rendered into an in-memory buffer.
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

use tui_treeview::{NodeSpec, ParentLink, Tree, TreeGlyphs, TreeView};

fn main() {
    // Build root -> {alpha, beta} and open the root.
    let mut tree = Tree::<()>::new();
    tree.attach_children(
        ParentLink::Root,
        [NodeSpec::new("root").children([NodeSpec::new("alpha"), NodeSpec::new("beta")])],
    );
    tree.toggle(tree.roots()[0]);

    // The viewport comes from resize events, not from the render call.
    tree.resize(40, 8);

    // Render into a buffer (no terminal required for the example).
    let area = Rect::new(0, 0, 40, 8);
    let mut buffer = Buffer::empty(area);
    TreeView::new(&tree)
        .glyphs(TreeGlyphs::ascii())
        .render(area, &mut buffer);

    for row in 0..area.height {
        let line: String = (0..area.width)
            .map(|col| buffer[(col, row)].symbol())
            .collect();
        println!("{}", line.trim_end());
    }
}
