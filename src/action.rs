/// Actions a host or key binding can issue against the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeAction<Custom = ()> {
    /// Move focus to the previous visible row.
    SelectPrev,
    /// Move focus to the next visible row.
    SelectNext,
    /// Jump focus to the first root.
    SelectFirst,
    /// Jump focus to the last visible row.
    SelectLast,
    /// Toggle the focused node between open and closed.
    ToggleNode,
    /// Fire the focused node's activation hook.
    Activate,
    /// Ask the host to terminate.
    Quit,
    /// Custom action forwarded to the caller without internal handling.
    Custom(Custom),
}

/// Result of handling an action or key event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeEvent<Custom = ()> {
    /// The action was handled internally and state was updated.
    Handled,
    /// The action was ignored (e.g. empty tree, unrecognized key).
    Unhandled,
    /// The host should terminate its event loop.
    Quit,
    /// The action is forwarded to the caller for handling.
    Action(TreeAction<Custom>),
}
