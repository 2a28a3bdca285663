use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::TreeAction;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum KeymapProfile {
    #[default]
    Default,
    Vim,
    Arrows,
}

/// Key binding table resolving key events into tree actions.
///
/// Common bindings across all profiles: `g` first, `G` last, space/`.`
/// toggle, enter activate, `q`/ctrl-c quit. Unrecognized keys resolve to
/// nothing and are ignored by the tree.
#[derive(Clone, Copy, Debug)]
pub struct TreeKeyBindings {
    profile: KeymapProfile,
}

impl Default for TreeKeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeKeyBindings {
    pub const fn new() -> Self {
        Self {
            profile: KeymapProfile::Default,
        }
    }

    pub const fn with_profile(profile: KeymapProfile) -> Self {
        Self { profile }
    }

    pub const fn profile(&self) -> KeymapProfile {
        self.profile
    }

    pub const fn set_profile(&mut self, profile: KeymapProfile) {
        self.profile = profile;
    }

    pub fn resolve<C>(&self, key: KeyEvent) -> Option<TreeAction<C>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Some(TreeAction::Quit),
                _ => None,
            };
        }

        let nav_action = match self.profile {
            KeymapProfile::Default => Self::resolve_default_nav(key),
            KeymapProfile::Vim => Self::resolve_vim_nav(key),
            KeymapProfile::Arrows => Self::resolve_arrow_nav(key),
        };
        if nav_action.is_some() {
            return nav_action;
        }

        Self::resolve_common(key)
    }

    /// Resolves with a caller-supplied mapping taking precedence.
    pub fn resolve_with<C, F>(&self, key: KeyEvent, custom: F) -> Option<TreeAction<C>>
    where
        F: Fn(KeyEvent) -> Option<C>,
    {
        if let Some(action) = custom(key) {
            return Some(TreeAction::Custom(action));
        }

        self.resolve(key)
    }

    const fn resolve_default_nav<C>(key: KeyEvent) -> Option<TreeAction<C>> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(TreeAction::SelectPrev),
            KeyCode::Down | KeyCode::Char('j') => Some(TreeAction::SelectNext),
            _ => None,
        }
    }

    const fn resolve_vim_nav<C>(key: KeyEvent) -> Option<TreeAction<C>> {
        match key.code {
            KeyCode::Char('k') => Some(TreeAction::SelectPrev),
            KeyCode::Char('j') => Some(TreeAction::SelectNext),
            _ => None,
        }
    }

    const fn resolve_arrow_nav<C>(key: KeyEvent) -> Option<TreeAction<C>> {
        match key.code {
            KeyCode::Up => Some(TreeAction::SelectPrev),
            KeyCode::Down => Some(TreeAction::SelectNext),
            _ => None,
        }
    }

    const fn resolve_common<C>(key: KeyEvent) -> Option<TreeAction<C>> {
        match key.code {
            KeyCode::Char('g') | KeyCode::Home => Some(TreeAction::SelectFirst),
            KeyCode::Char('G') | KeyCode::End => Some(TreeAction::SelectLast),
            KeyCode::Char(' ' | '.') => Some(TreeAction::ToggleNode),
            KeyCode::Enter => Some(TreeAction::Activate),
            KeyCode::Char('q') => Some(TreeAction::Quit),
            _ => None,
        }
    }
}
