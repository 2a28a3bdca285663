// Filesystem browser: directories are listed lazily from their open hooks.
//
// Keys: arrows/`j`/`k` move, space toggles, `r` re-reads the directory
// holding the selection, enter prints the selected path and exits, `q`
// quits.
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;
use ratatui::style::{Color, Style};

use tui_treeview::{
    Node, NodeId, NodeSpec, ParentLink, Tree, TreeAction, TreeEvent, TreeGlyphs, TreeView,
};

const ICON_FOLDER: &str = "\u{f024b}";
const ICON_FILE: &str = "\u{f0214}";
const ICON_SOURCE: &str = "\u{f07d3}";

struct Entry {
    is_dir: bool,
}

fn is_dir(node: &Node<Entry>) -> bool {
    node.payload().is_some_and(|entry| entry.is_dir)
}

fn entry_icon(node: &Node<Entry>) -> &'static str {
    if is_dir(node) {
        ICON_FOLDER
    } else if node.name().ends_with(".rs") {
        ICON_SOURCE
    } else {
        ICON_FILE
    }
}

fn entry_color(node: &Node<Entry>) -> Style {
    let color = if is_dir(node) {
        Color::Rgb(0xff, 0xcf, 0x00)
    } else if node.name().ends_with(".rs") {
        Color::Rgb(0x00, 0xff, 0xff)
    } else {
        Color::Rgb(0x7f, 0xff, 0x7f)
    };
    Style::new().fg(color)
}

fn text_color(_node: &Node<Entry>) -> Style {
    Style::new().fg(Color::White)
}

// The browser is rooted at the working directory, so a node's absolute
// path is cwd plus its name path.
fn absolute(tree: &Tree<Entry>, id: NodeId) -> PathBuf {
    let mut path = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    for name in tree.path(id) {
        path.push(name);
    }
    path
}

// Open hook: populate once, cache until refreshed.
fn load_dir(tree: &mut Tree<Entry>, id: NodeId) {
    if tree.node(id).is_some_and(Node::has_children) {
        return;
    }
    let specs = list_dir(&absolute(tree, id));
    tree.attach_children(ParentLink::Node(id), specs);
}

fn list_dir(path: &Path) -> Vec<NodeSpec<Entry>> {
    // A directory that fails to list stays childless and collapsed.
    let Ok(read_dir) = fs::read_dir(path) else {
        return Vec::new();
    };
    let mut entries: Vec<(String, bool)> = read_dir
        .filter_map(Result::ok)
        .map(|entry| {
            let is_dir = entry.file_type().is_ok_and(|kind| kind.is_dir());
            (entry.file_name().to_string_lossy().into_owned(), is_dir)
        })
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    entries
        .into_iter()
        .map(|(name, is_dir)| {
            let spec = NodeSpec::new(name)
                .payload(Entry { is_dir })
                .icon(entry_icon)
                .icon_style(entry_color)
                .label_style(text_color);
            if is_dir {
                spec.expandable().on_open(load_dir)
            } else {
                spec
            }
        })
        .collect()
}

enum Cmd {
    Pick,
    Refresh,
}

fn refresh_parent(tree: &mut Tree<Entry>) {
    let Some(id) = tree.focused() else {
        return;
    };
    match tree.node(id).map(Node::parent) {
        Some(ParentLink::Node(parent)) => tree.refresh(ParentLink::Node(parent)),
        _ => {
            // Top-level selection: re-list the working directory itself.
            tree.refresh(ParentLink::Root);
            let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            tree.attach_children(ParentLink::Root, list_dir(&cwd));
        }
    }
}

fn run(mut terminal: DefaultTerminal) -> io::Result<Option<PathBuf>> {
    let mut tree = Tree::new();
    let cwd = env::current_dir()?;
    tree.attach_children(ParentLink::Root, list_dir(&cwd));

    let size = terminal.size()?;
    tree.resize(size.width, size.height);

    loop {
        terminal.draw(|frame| {
            frame.render_widget(
                TreeView::new(&tree).glyphs(TreeGlyphs::nerd_font()),
                frame.area(),
            );
        })?;

        match event::read()? {
            Event::Resize(width, height) => tree.resize(width, height),
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                // Enter is claimed here, so it picks instead of activating.
                let event = tree.handle_key_with(key, |key| match key.code {
                    KeyCode::Enter => Some(Cmd::Pick),
                    KeyCode::Char('r') => Some(Cmd::Refresh),
                    _ => None,
                });
                match event {
                    TreeEvent::Quit => return Ok(None),
                    TreeEvent::Action(TreeAction::Custom(Cmd::Pick)) => {
                        return Ok(tree.focused().map(|id| absolute(&tree, id)));
                    }
                    TreeEvent::Action(TreeAction::Custom(Cmd::Refresh)) => {
                        refresh_parent(&mut tree);
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    }
}

fn main() -> io::Result<()> {
    let terminal = ratatui::init();
    let picked = run(terminal);
    ratatui::restore();
    if let Some(path) = picked? {
        println!("{}", path.display());
    }
    Ok(())
}
