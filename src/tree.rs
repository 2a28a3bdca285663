use std::mem;

use smallvec::SmallVec;

use crate::action::{TreeAction, TreeEvent};
use crate::node::{Node, NodeId, NodeSpec, ParentLink};

#[cfg(feature = "keymap")]
use crate::keymap::TreeKeyBindings;
#[cfg(feature = "keymap")]
use crossterm::event::KeyEvent;

/// The tree container: arena of nodes, top-level forest, focus, viewport.
///
/// All operations are infallible; conditions like toggling a leaf, navigating
/// an empty tree, or rendering before the first resize degrade to no-ops so
/// the input/render loop is always safe to keep calling.
///
/// Lazy population runs synchronously: an `on_open` hook fires inside
/// [`Tree::toggle`] on the caller's thread and may call
/// [`Tree::attach_children`] right away. A slow hook simply delays the next
/// frame; there is no timeout or cancellation path.
pub struct Tree<P> {
    arena: Vec<Node<P>>,
    // Slots returned by refresh, reused before the arena grows.
    free: Vec<NodeId>,
    roots: SmallVec<[NodeId; 8]>,
    focused: Option<NodeId>,
    // Viewport row the focused node sits on, in [0, height).
    focused_line: u16,
    // Index of the first drawn row in the flattened visible list.
    viewport_top: usize,
    width: u16,
    height: u16,
    initialized: bool,
    #[cfg(feature = "keymap")]
    keymap: TreeKeyBindings,
}

impl<P> Default for Tree<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Tree<P> {
    /// Creates an empty tree with an unset viewport.
    pub fn new() -> Self {
        Self {
            arena: Vec::new(),
            free: Vec::new(),
            roots: SmallVec::new(),
            focused: None,
            focused_line: 0,
            viewport_top: 0,
            width: 0,
            height: 0,
            initialized: false,
            #[cfg(feature = "keymap")]
            keymap: TreeKeyBindings::new(),
        }
    }

    #[cfg(feature = "keymap")]
    /// Returns a mutable reference to the key binding set.
    pub const fn keymap_mut(&mut self) -> &mut TreeKeyBindings {
        &mut self.keymap
    }

    /// Returns the node behind a handle.
    ///
    /// Handles of a subtree discarded by [`Tree::refresh`] are invalid and
    /// must not be used again; after a refresh only handles obtained anew
    /// (or the refreshed node itself) are meaningful.
    pub fn node(&self, id: NodeId) -> Option<&Node<P>> {
        self.arena.get(id.0)
    }

    /// Returns a mutable reference to a node's payload.
    pub fn payload_mut(&mut self, id: NodeId) -> Option<&mut P> {
        self.arena.get_mut(id.0).and_then(|node| node.payload.as_mut())
    }

    /// Returns the handle of the focused node, if any.
    pub const fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Returns the top-level node handles in render order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Returns whether the tree holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Returns the viewport row of the focused node.
    pub const fn focused_line(&self) -> u16 {
        self.focused_line
    }

    /// Returns the index of the first drawn visible row.
    pub const fn viewport_top(&self) -> usize {
        self.viewport_top
    }

    /// Returns the viewport width.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Returns the viewport height.
    pub const fn height(&self) -> u16 {
        self.height
    }

    pub(crate) const fn initialized(&self) -> bool {
        self.initialized
    }

    /// Updates the viewport dimensions. The first call makes the tree
    /// renderable; until then [`Tree::view`] output is empty.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.initialized = true;
        if height > 0 && self.focused_line >= height {
            self.viewport_top += usize::from(self.focused_line - (height - 1));
            self.focused_line = height - 1;
        }
    }

    /// Attaches a batch of nodes under `target` and returns their handles.
    ///
    /// Attaching under a node always makes that node expandable. The first
    /// node attached to an empty tree becomes the initial focus. An invalid
    /// target is a no-op returning no handles.
    pub fn attach_children(
        &mut self,
        target: ParentLink,
        specs: impl IntoIterator<Item = NodeSpec<P>>,
    ) -> Vec<NodeId> {
        if let ParentLink::Node(id) = target {
            if self.arena.get(id.0).is_none() {
                return Vec::new();
            }
        }
        let mut attached = Vec::new();
        for spec in specs {
            let id = self.insert(spec, target);
            match target {
                ParentLink::Root => self.roots.push(id),
                ParentLink::Node(parent) => self.arena[parent.0].children.push(id),
            }
            attached.push(id);
        }
        // Attaching always makes the target expandable, even with an empty
        // batch; this mirrors how a lazy loader arms a node.
        if let ParentLink::Node(parent) = target {
            self.arena[parent.0].can_expand = true;
        }
        if self.focused.is_none() {
            self.focused = self.roots.first().copied();
        }
        attached
    }

    /// Discards the children of `target`, closing it for re-population.
    ///
    /// A node target keeps its expandable flag, so the next open transition
    /// fires `on_open` again. If the focus was inside the discarded subtree
    /// it moves to the refreshed node (root refresh: to the first remaining
    /// root, or nowhere).
    pub fn refresh(&mut self, target: ParentLink) {
        let children: SmallVec<[NodeId; 4]> = match target {
            ParentLink::Root => mem::take(&mut self.roots).into_iter().collect(),
            ParentLink::Node(id) => {
                let Some(node) = self.arena.get_mut(id.0) else {
                    return;
                };
                node.open = false;
                mem::take(&mut node.children)
            }
        };
        let mut focus_lost = false;
        for child in children {
            self.free_subtree(child, &mut focus_lost);
        }
        if focus_lost {
            self.focused = match target {
                ParentLink::Root => self.roots.first().copied(),
                ParentLink::Node(id) => Some(id),
            };
        }
        self.realign_viewport();
    }

    /// Returns the names from the shallowest ancestor down to the node
    /// itself, in that order.
    pub fn path(&self, id: NodeId) -> Vec<String> {
        let mut names = Vec::new();
        let mut cur = id;
        loop {
            let Some(node) = self.arena.get(cur.0) else {
                return Vec::new();
            };
            names.push(node.name.clone());
            match node.parent {
                ParentLink::Root => break,
                ParentLink::Node(parent) => cur = parent,
            }
        }
        names.reverse();
        names
    }

    /// Toggles a node between open and closed.
    ///
    /// A node that cannot expand is left untouched. `on_open`/`on_close`
    /// fire exactly once per actual transition, with the flag already
    /// flipped, so an open hook sees the node as open.
    pub fn toggle(&mut self, id: NodeId) {
        let Some(node) = self.arena.get_mut(id.0) else {
            return;
        };
        if !node.can_expand {
            return;
        }
        node.open = !node.open;
        let hook = if node.open { node.on_open } else { node.on_close };
        if let Some(hook) = hook {
            hook(self, id);
        }
    }

    /// Toggles the focused node; does not move focus or scroll.
    pub fn toggle_focused(&mut self) {
        if let Some(id) = self.focused {
            self.toggle(id);
        }
    }

    /// Fires the focused node's activation hook, if it has one.
    pub fn activate_focused(&mut self) {
        let Some(id) = self.focused else {
            return;
        };
        let hook = self.arena[id.0].on_select;
        if let Some(hook) = hook {
            hook(self, id);
        }
    }

    /// Moves focus to the next visible row, scrolling once the cursor is
    /// pinned to the bottom viewport row. At the last visible row this is a
    /// no-op; there is no wraparound.
    pub fn select_next(&mut self) {
        let Some(cur) = self.focused else {
            return;
        };
        let Some(next) = self.next_visible(cur) else {
            return;
        };
        self.focused = Some(next);
        if self.height == 0 || self.focused_line + 1 < self.height {
            self.focused_line += 1;
        } else {
            self.viewport_top += 1;
        }
    }

    /// Moves focus to the previous visible row, scrolling once the cursor is
    /// pinned to the top viewport row. At the first visible row this is a
    /// no-op.
    pub fn select_previous(&mut self) {
        let Some(cur) = self.focused else {
            return;
        };
        let Some(prev) = self.prev_visible(cur) else {
            return;
        };
        self.focused = Some(prev);
        if self.focused_line > 0 {
            self.focused_line -= 1;
        } else {
            self.viewport_top = self.viewport_top.saturating_sub(1);
        }
    }

    /// Jumps focus to the first root and resets the viewport to the top.
    pub fn select_first(&mut self) {
        let Some(&first) = self.roots.first() else {
            return;
        };
        self.focused = Some(first);
        self.focused_line = 0;
        self.viewport_top = 0;
    }

    /// Jumps focus to the deepest last-opened descendant of the last root,
    /// scrolling so the final visible row sits at the viewport bottom.
    pub fn select_last(&mut self) {
        let Some(&last) = self.roots.last() else {
            return;
        };
        self.focused = Some(self.deepest_open(last));
        let total = self.visible_len();
        let height = usize::from(self.height);
        if height > 0 && total > height {
            self.viewport_top = total - height;
            self.focused_line = self.height - 1;
        } else {
            self.viewport_top = 0;
            self.focused_line = total.saturating_sub(1) as u16;
        }
    }

    /// Returns the number of rows in the visible set.
    pub fn visible_len(&self) -> usize {
        self.roots
            .iter()
            .map(|&root| self.count_subtree(root))
            .sum()
    }

    /// Applies an action to the tree and reports how it was consumed.
    ///
    /// `Quit` surfaces as [`TreeEvent::Quit`] for the host to act on;
    /// `Custom` actions are forwarded untouched. Everything else is handled
    /// in place, degrading to [`TreeEvent::Unhandled`] when there is nothing
    /// to act on.
    pub fn handle_action<C>(&mut self, action: TreeAction<C>) -> TreeEvent<C> {
        let focused = self.focused;
        match action {
            TreeAction::Quit => TreeEvent::Quit,
            TreeAction::Custom(custom) => TreeEvent::Action(TreeAction::Custom(custom)),
            _ if focused.is_none() => TreeEvent::Unhandled,
            TreeAction::SelectPrev => {
                self.select_previous();
                TreeEvent::Handled
            }
            TreeAction::SelectNext => {
                self.select_next();
                TreeEvent::Handled
            }
            TreeAction::SelectFirst => {
                self.select_first();
                TreeEvent::Handled
            }
            TreeAction::SelectLast => {
                self.select_last();
                TreeEvent::Handled
            }
            TreeAction::ToggleNode => match focused {
                Some(id) if self.node(id).is_some_and(Node::can_expand) => {
                    self.toggle(id);
                    TreeEvent::Handled
                }
                _ => TreeEvent::Unhandled,
            },
            TreeAction::Activate => {
                self.activate_focused();
                TreeEvent::Handled
            }
        }
    }

    #[cfg(feature = "keymap")]
    /// Resolves a key event through the key bindings and handles it.
    /// Unrecognized keys are reported unhandled and otherwise ignored.
    pub fn handle_key(&mut self, key: KeyEvent) -> TreeEvent<()> {
        let Some(action) = self.keymap.resolve(key) else {
            return TreeEvent::Unhandled;
        };
        self.handle_action(action)
    }

    #[cfg(feature = "keymap")]
    /// Resolves a key event, letting `custom` claim keys first.
    pub fn handle_key_with<C, F>(&mut self, key: KeyEvent, custom: F) -> TreeEvent<C>
    where
        F: Fn(KeyEvent) -> Option<C>,
    {
        let Some(action) = self.keymap.resolve_with(key, custom) else {
            return TreeEvent::Unhandled;
        };
        self.handle_action(action)
    }

    fn insert(&mut self, spec: NodeSpec<P>, parent: ParentLink) -> NodeId {
        let (mut node, children) = spec.into_node(parent);
        if !children.is_empty() {
            node.can_expand = true;
        }
        let id = self.alloc(node);
        for child_spec in children {
            let child = self.insert(child_spec, ParentLink::Node(id));
            self.arena[id.0].children.push(child);
        }
        id
    }

    fn alloc(&mut self, node: Node<P>) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.arena[id.0] = node;
            id
        } else {
            let id = NodeId(self.arena.len());
            self.arena.push(node);
            id
        }
    }

    fn free_subtree(&mut self, id: NodeId, focus_lost: &mut bool) {
        if self.focused == Some(id) {
            *focus_lost = true;
        }
        let node = &mut self.arena[id.0];
        node.open = false;
        node.payload = None;
        let children = mem::take(&mut node.children);
        for child in children {
            self.free_subtree(child, focus_lost);
        }
        self.free.push(id);
    }

    // Re-anchors the viewport on the focused node after the visible set
    // changed shape underneath it.
    fn realign_viewport(&mut self) {
        let Some(focused) = self.focused else {
            self.focused_line = 0;
            self.viewport_top = 0;
            return;
        };
        let Some(index) = self.visible_index(focused) else {
            return;
        };
        let height = usize::from(self.height);
        if index >= self.viewport_top && (height == 0 || index < self.viewport_top + height) {
            self.focused_line = (index - self.viewport_top) as u16;
        } else {
            self.viewport_top = index;
            self.focused_line = 0;
        }
    }

    fn siblings(&self, parent: ParentLink) -> &[NodeId] {
        match parent {
            ParentLink::Root => &self.roots,
            ParentLink::Node(id) => &self.arena[id.0].children,
        }
    }

    // Pre-order successor within the visible set: first child if open,
    // otherwise the next sibling of the nearest ancestor that has one.
    fn next_visible(&self, id: NodeId) -> Option<NodeId> {
        let node = &self.arena[id.0];
        if node.open {
            if let Some(&first) = node.children.first() {
                return Some(first);
            }
        }
        let mut cur = id;
        loop {
            let parent = self.arena[cur.0].parent;
            let siblings = self.siblings(parent);
            let pos = siblings.iter().position(|&sibling| sibling == cur)?;
            if let Some(&next) = siblings.get(pos + 1) {
                return Some(next);
            }
            match parent {
                ParentLink::Root => return None,
                ParentLink::Node(up) => cur = up,
            }
        }
    }

    // Pre-order predecessor: the deepest last-opened descendant of the
    // previous sibling, or the parent when there is no previous sibling.
    fn prev_visible(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.arena[id.0].parent;
        let siblings = self.siblings(parent);
        let pos = siblings.iter().position(|&sibling| sibling == id)?;
        if pos > 0 {
            return Some(self.deepest_open(siblings[pos - 1]));
        }
        match parent {
            ParentLink::Root => None,
            ParentLink::Node(up) => Some(up),
        }
    }

    fn deepest_open(&self, id: NodeId) -> NodeId {
        let mut cur = id;
        loop {
            let node = &self.arena[cur.0];
            match node.children.last() {
                Some(&last) if node.open => cur = last,
                _ => return cur,
            }
        }
    }

    fn count_subtree(&self, id: NodeId) -> usize {
        let node = &self.arena[id.0];
        let mut total = 1;
        if node.open {
            for &child in &node.children {
                total += self.count_subtree(child);
            }
        }
        total
    }

    fn visible_index(&self, target: NodeId) -> Option<usize> {
        let mut index = 0;
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if id == target {
                return Some(index);
            }
            index += 1;
            let node = &self.arena[id.0];
            if node.open {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    thread_local! {
        static OPEN_CALLS: Cell<usize> = const { Cell::new(0) };
        static CLOSE_CALLS: Cell<usize> = const { Cell::new(0) };
        static SELECT_CALLS: Cell<usize> = const { Cell::new(0) };
    }

    fn reset_counters() {
        OPEN_CALLS.with(|c| c.set(0));
        CLOSE_CALLS.with(|c| c.set(0));
        SELECT_CALLS.with(|c| c.set(0));
    }

    fn leaf(name: &str) -> NodeSpec<()> {
        NodeSpec::new(name)
    }

    // Lazy loader in the shape consumers are expected to write: populate
    // only while the child list is empty.
    fn populate(tree: &mut Tree<()>, id: NodeId) {
        OPEN_CALLS.with(|c| c.set(c.get() + 1));
        if tree.node(id).is_some_and(Node::has_children) {
            return;
        }
        tree.attach_children(ParentLink::Node(id), [leaf("file")]);
    }

    fn note_close(_tree: &mut Tree<()>, _id: NodeId) {
        CLOSE_CALLS.with(|c| c.set(c.get() + 1));
    }

    fn note_select(_tree: &mut Tree<()>, _id: NodeId) {
        SELECT_CALLS.with(|c| c.set(c.get() + 1));
    }

    fn focused_name(tree: &Tree<()>) -> String {
        tree.node(tree.focused().unwrap()).unwrap().name().to_string()
    }

    #[test]
    fn first_attached_node_gets_focus() {
        let mut tree = Tree::new();
        assert!(tree.focused().is_none());
        tree.attach_children(ParentLink::Root, [leaf("a"), leaf("b")]);
        assert_eq!(focused_name(&tree), "a");
    }

    #[test]
    fn three_leaves_in_a_two_row_window() {
        let mut tree = Tree::new();
        tree.attach_children(ParentLink::Root, [leaf("a"), leaf("b"), leaf("c")]);
        tree.resize(10, 2);

        tree.select_next();
        assert_eq!(focused_name(&tree), "b");
        assert_eq!(tree.viewport_top(), 0);
        assert_eq!(tree.focused_line(), 1);

        tree.select_next();
        assert_eq!(focused_name(&tree), "c");
        assert_eq!(tree.viewport_top(), 1);
        assert_eq!(tree.focused_line(), 1);

        // Boundary: no wraparound, no scroll drift.
        tree.select_next();
        assert_eq!(focused_name(&tree), "c");
        assert_eq!(tree.viewport_top(), 1);
        assert_eq!(tree.focused_line(), 1);
    }

    #[test]
    fn select_previous_stops_at_first_row() {
        let mut tree = Tree::new();
        tree.attach_children(ParentLink::Root, [leaf("a"), leaf("b")]);
        tree.resize(10, 4);
        tree.select_previous();
        assert_eq!(focused_name(&tree), "a");
        assert_eq!(tree.viewport_top(), 0);
        assert_eq!(tree.focused_line(), 0);
    }

    #[test]
    fn navigation_on_empty_tree_is_a_no_op() {
        let mut tree = Tree::<()>::new();
        tree.select_next();
        tree.select_previous();
        tree.select_first();
        tree.select_last();
        tree.toggle_focused();
        tree.activate_focused();
        assert!(tree.focused().is_none());
        assert_eq!(
            tree.handle_action::<()>(TreeAction::SelectNext),
            TreeEvent::Unhandled
        );
    }

    #[test]
    fn next_descends_into_open_children_first() {
        let mut tree = Tree::new();
        tree.attach_children(
            ParentLink::Root,
            [leaf("dir").children([leaf("x"), leaf("y")]), leaf("b")],
        );
        let dir = tree.roots()[0];
        tree.toggle(dir);
        tree.resize(20, 10);

        let mut order = vec![focused_name(&tree)];
        for _ in 0..3 {
            tree.select_next();
            order.push(focused_name(&tree));
        }
        assert_eq!(order, ["dir", "x", "y", "b"]);
    }

    #[test]
    fn previous_descends_to_deepest_open_descendant() {
        let mut tree = Tree::new();
        tree.attach_children(
            ParentLink::Root,
            [
                leaf("dir").children([leaf("x"), leaf("inner").children([leaf("deep")])]),
                leaf("b"),
            ],
        );
        let dir = tree.roots()[0];
        tree.toggle(dir);
        let inner = tree.node(dir).unwrap().children()[1];
        tree.toggle(inner);
        tree.resize(20, 10);

        tree.select_last();
        assert_eq!(focused_name(&tree), "b");
        tree.select_previous();
        assert_eq!(focused_name(&tree), "deep");
        tree.select_previous();
        assert_eq!(focused_name(&tree), "inner");
        tree.select_previous();
        assert_eq!(focused_name(&tree), "x");
        tree.select_previous();
        assert_eq!(focused_name(&tree), "dir");
        tree.select_previous();
        assert_eq!(focused_name(&tree), "dir");
    }

    #[test]
    fn select_last_scrolls_window_to_bottom() {
        let mut tree = Tree::new();
        tree.attach_children(
            ParentLink::Root,
            (0..6).map(|n| leaf(&format!("n{n}"))).collect::<Vec<_>>(),
        );
        tree.resize(10, 4);
        tree.select_last();
        assert_eq!(focused_name(&tree), "n5");
        assert_eq!(tree.viewport_top(), 2);
        assert_eq!(tree.focused_line(), 3);

        tree.select_first();
        assert_eq!(focused_name(&tree), "n0");
        assert_eq!(tree.viewport_top(), 0);
        assert_eq!(tree.focused_line(), 0);
    }

    #[test]
    fn toggling_a_leaf_never_opens_or_fires_hooks() {
        reset_counters();
        let mut tree = Tree::new();
        tree.attach_children(
            ParentLink::Root,
            [NodeSpec::new("leaf").on_open(populate).on_close(note_close)],
        );
        let id = tree.roots()[0];
        tree.toggle(id);
        let node = tree.node(id).unwrap();
        assert!(!node.is_open());
        assert!(!node.has_children());
        assert_eq!(OPEN_CALLS.with(Cell::get), 0);
        assert_eq!(CLOSE_CALLS.with(Cell::get), 0);
    }

    #[test]
    fn lazy_open_close_open_cycle() {
        reset_counters();
        let mut tree = Tree::new();
        tree.attach_children(
            ParentLink::Root,
            [NodeSpec::new("dir")
                .expandable()
                .on_open(populate)
                .on_close(note_close)],
        );
        let dir = tree.roots()[0];

        tree.toggle(dir);
        assert!(tree.node(dir).unwrap().is_open());
        assert_eq!(OPEN_CALLS.with(Cell::get), 1);
        assert_eq!(tree.node(dir).unwrap().children().len(), 1);

        tree.toggle(dir);
        assert!(!tree.node(dir).unwrap().is_open());
        assert_eq!(CLOSE_CALLS.with(Cell::get), 1);
        // Closing keeps the cached children; only refresh clears them.
        assert_eq!(tree.node(dir).unwrap().children().len(), 1);

        tree.toggle(dir);
        assert_eq!(OPEN_CALLS.with(Cell::get), 2);
        // The loader saw a non-empty child list and attached nothing.
        assert_eq!(tree.node(dir).unwrap().children().len(), 1);
    }

    #[test]
    fn refresh_clears_children_and_rearms_the_loader() {
        reset_counters();
        let mut tree = Tree::new();
        tree.attach_children(
            ParentLink::Root,
            [NodeSpec::new("dir").expandable().on_open(populate)],
        );
        let dir = tree.roots()[0];
        tree.toggle(dir);
        tree.toggle(dir);

        tree.refresh(ParentLink::Node(dir));
        let node = tree.node(dir).unwrap();
        assert!(!node.is_open());
        assert!(!node.has_children());
        assert!(node.can_expand());

        tree.toggle(dir);
        assert_eq!(OPEN_CALLS.with(Cell::get), 2);
        assert_eq!(tree.node(dir).unwrap().children().len(), 1);
    }

    #[test]
    fn refresh_moves_focus_out_of_the_discarded_subtree() {
        let mut tree = Tree::new();
        tree.attach_children(
            ParentLink::Root,
            [leaf("dir").children([leaf("file")]), leaf("b")],
        );
        tree.resize(20, 10);
        let dir = tree.roots()[0];
        tree.toggle(dir);
        tree.select_next();
        assert_eq!(focused_name(&tree), "file");

        tree.refresh(ParentLink::Node(dir));
        assert_eq!(tree.focused(), Some(dir));
        assert_eq!(tree.focused_line(), 0);
    }

    #[test]
    fn root_refresh_empties_the_forest() {
        let mut tree = Tree::new();
        tree.attach_children(ParentLink::Root, [leaf("a"), leaf("b")]);
        tree.refresh(ParentLink::Root);
        assert!(tree.is_empty());
        assert!(tree.focused().is_none());
        assert_eq!(tree.visible_len(), 0);
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut tree = Tree::new();
        tree.attach_children(ParentLink::Root, [leaf("dir").children([leaf("file")])]);
        let before = tree.arena.len();
        let dir = tree.roots()[0];
        tree.refresh(ParentLink::Node(dir));
        tree.attach_children(ParentLink::Node(dir), [leaf("again")]);
        assert_eq!(tree.arena.len(), before);
    }

    #[test]
    fn path_lists_ancestors_down_to_the_node() {
        let mut tree = Tree::new();
        tree.attach_children(
            ParentLink::Root,
            [leaf("a").child(leaf("b").child(leaf("c")))],
        );
        let a = tree.roots()[0];
        let b = tree.node(a).unwrap().children()[0];
        let c = tree.node(b).unwrap().children()[0];
        assert_eq!(tree.path(c), ["a", "b", "c"]);
        assert_eq!(tree.path(a), ["a"]);
    }

    #[test]
    fn attaching_children_makes_the_target_expandable() {
        let mut tree = Tree::new();
        tree.attach_children(ParentLink::Root, [leaf("plain")]);
        let id = tree.roots()[0];
        assert!(!tree.node(id).unwrap().can_expand());
        tree.attach_children(ParentLink::Node(id), [leaf("kid")]);
        assert!(tree.node(id).unwrap().can_expand());
    }

    #[test]
    fn focused_line_stays_inside_the_viewport() {
        let mut tree = Tree::new();
        tree.attach_children(
            ParentLink::Root,
            (0..10).map(|n| leaf(&format!("n{n}"))).collect::<Vec<_>>(),
        );
        tree.resize(10, 3);
        for _ in 0..20 {
            tree.select_next();
            assert!(tree.focused_line() < 3);
        }
        for _ in 0..20 {
            tree.select_previous();
            assert!(tree.focused_line() < 3);
        }
        assert_eq!(tree.viewport_top(), 0);
        assert_eq!(focused_name(&tree), "n0");
    }

    #[test]
    fn activate_fires_the_selection_hook() {
        reset_counters();
        let mut tree = Tree::new();
        tree.attach_children(ParentLink::Root, [NodeSpec::new("a").on_select(note_select)]);
        tree.activate_focused();
        tree.activate_focused();
        assert_eq!(SELECT_CALLS.with(Cell::get), 2);
    }

    #[test]
    fn quit_action_surfaces_as_a_follow_up_command() {
        let mut tree = Tree::<()>::new();
        assert_eq!(tree.handle_action::<()>(TreeAction::Quit), TreeEvent::Quit);
    }

    #[test]
    fn custom_actions_are_forwarded_untouched() {
        let mut tree = Tree::<()>::new();
        let event = tree.handle_action(TreeAction::Custom("rename"));
        assert_eq!(event, TreeEvent::Action(TreeAction::Custom("rename")));
    }

    #[test]
    fn handle_action_drives_navigation() {
        let mut tree = Tree::new();
        tree.attach_children(ParentLink::Root, [leaf("a"), leaf("b")]);
        tree.resize(10, 5);
        assert_eq!(
            tree.handle_action::<()>(TreeAction::SelectNext),
            TreeEvent::Handled
        );
        assert_eq!(focused_name(&tree), "b");
        // Toggling a leaf has nothing to do.
        assert_eq!(
            tree.handle_action::<()>(TreeAction::ToggleNode),
            TreeEvent::Unhandled
        );
    }
}
