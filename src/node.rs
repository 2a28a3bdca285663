use ratatui::style::Style;
use smallvec::SmallVec;

use crate::tree::Tree;

/// Stable handle to a node in the tree's arena.
///
/// Handles stay valid across navigation and expansion; [`Tree::refresh`]
/// invalidates the handles of the discarded subtree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// Where a node is attached: directly under the tree, or under another node.
///
/// Also used as the target of [`Tree::attach_children`] and
/// [`Tree::refresh`], replacing dynamic dispatch over "anything that can
/// hold items" with a closed two-variant sum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParentLink {
    /// Attached at the top level of the tree.
    Root,
    /// Attached under the given node.
    Node(NodeId),
}

/// Renders the icon for a node. Pure; may run several times per frame.
pub type IconFn<P> = fn(&Node<P>) -> &'static str;

/// Returns a style layered over the base focus style. Pure.
pub type StyleFn<P> = fn(&Node<P>) -> Style;

/// Lifecycle/activation hook. Runs with full mutable access to the tree, so
/// an open hook can graft children onto the node it was fired for.
pub type HookFn<P> = fn(&mut Tree<P>, NodeId);

/// A single entry in the tree.
///
/// Nodes live in the arena owned by their [`Tree`] and are reached through
/// [`NodeId`] handles; `children` holds handles in render order.
pub struct Node<P> {
    pub(crate) name: String,
    pub(crate) children: SmallVec<[NodeId; 4]>,
    pub(crate) can_expand: bool,
    pub(crate) open: bool,
    pub(crate) payload: Option<P>,
    pub(crate) parent: ParentLink,
    pub(crate) icon: Option<IconFn<P>>,
    pub(crate) icon_style: Option<StyleFn<P>>,
    pub(crate) label_style: Option<StyleFn<P>>,
    pub(crate) on_open: Option<HookFn<P>>,
    pub(crate) on_close: Option<HookFn<P>>,
    pub(crate) on_select: Option<HookFn<P>>,
}

impl<P> Node<P> {
    /// Returns the display label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the caller-supplied payload, if any.
    pub const fn payload(&self) -> Option<&P> {
        self.payload.as_ref()
    }

    /// Returns whether the node may show an expand indicator and be toggled.
    pub const fn can_expand(&self) -> bool {
        self.can_expand
    }

    /// Returns whether children are currently rendered.
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Returns whether the node has any children attached.
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns the child handles in render order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns the attachment point of this node.
    pub const fn parent(&self) -> ParentLink {
        self.parent
    }

    pub(crate) fn icon(&self) -> &'static str {
        self.icon.map_or("", |icon| icon(self))
    }

    pub(crate) fn icon_style(&self) -> Style {
        self.icon_style.map_or_else(Style::new, |style| style(self))
    }

    pub(crate) fn label_style(&self) -> Style {
        self.label_style.map_or_else(Style::new, |style| style(self))
    }
}

/// Description of a node to attach, consumed by [`Tree::attach_children`].
///
/// Everything except the name is optional; initial children may be nested
/// directly in the spec.
pub struct NodeSpec<P> {
    pub(crate) name: String,
    pub(crate) can_expand: bool,
    pub(crate) children: Vec<NodeSpec<P>>,
    pub(crate) payload: Option<P>,
    pub(crate) icon: Option<IconFn<P>>,
    pub(crate) icon_style: Option<StyleFn<P>>,
    pub(crate) label_style: Option<StyleFn<P>>,
    pub(crate) on_open: Option<HookFn<P>>,
    pub(crate) on_close: Option<HookFn<P>>,
    pub(crate) on_select: Option<HookFn<P>>,
}

impl<P> NodeSpec<P> {
    /// Creates a leaf spec with the given display label.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            can_expand: false,
            children: Vec::new(),
            payload: None,
            icon: None,
            icon_style: None,
            label_style: None,
            on_open: None,
            on_close: None,
            on_select: None,
        }
    }

    /// Marks the node as expandable even while it has no children, which is
    /// what allows an open hook to populate it lazily.
    #[must_use]
    pub fn expandable(mut self) -> Self {
        self.can_expand = true;
        self
    }

    /// Adds an initial child.
    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Adds a batch of initial children.
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }

    /// Attaches an opaque payload.
    #[must_use]
    pub fn payload(mut self, payload: P) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Sets the icon renderer.
    #[must_use]
    pub fn icon(mut self, icon: IconFn<P>) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Sets the icon style renderer.
    #[must_use]
    pub fn icon_style(mut self, style: StyleFn<P>) -> Self {
        self.icon_style = Some(style);
        self
    }

    /// Sets the label style renderer.
    #[must_use]
    pub fn label_style(mut self, style: StyleFn<P>) -> Self {
        self.label_style = Some(style);
        self
    }

    /// Sets the hook fired when the node transitions to open.
    #[must_use]
    pub fn on_open(mut self, hook: HookFn<P>) -> Self {
        self.on_open = Some(hook);
        self
    }

    /// Sets the hook fired when the node transitions to closed.
    #[must_use]
    pub fn on_close(mut self, hook: HookFn<P>) -> Self {
        self.on_close = Some(hook);
        self
    }

    /// Sets the hook fired when the focused node is activated.
    #[must_use]
    pub fn on_select(mut self, hook: HookFn<P>) -> Self {
        self.on_select = Some(hook);
        self
    }

    pub(crate) fn into_node(self, parent: ParentLink) -> (Node<P>, Vec<NodeSpec<P>>) {
        let node = Node {
            name: self.name,
            children: SmallVec::new(),
            can_expand: self.can_expand,
            open: false,
            payload: self.payload,
            parent,
            icon: self.icon,
            icon_style: self.icon_style,
            label_style: self.label_style,
            on_open: self.on_open,
            on_close: self.on_close,
            on_select: self.on_select,
        };
        (node, self.children)
    }
}
