/// Indicator glyph set for tree rows.
///
/// Every glyph should occupy one terminal cell so rows at the same depth
/// line up.
#[derive(Clone, Copy)]
pub struct TreeGlyphs<'a> {
    /// One indentation step, prepended once per depth level.
    pub indent: &'a str,
    /// Indicator for nodes that cannot expand.
    pub leaf: &'a str,
    /// Indicator for expandable nodes that are closed.
    pub collapsed: &'a str,
    /// Indicator for expandable nodes that are open.
    pub expanded: &'a str,
}

impl TreeGlyphs<'static> {
    pub const fn unicode() -> Self {
        Self {
            indent: "  ",
            leaf: " ",
            collapsed: "▶",
            expanded: "▼",
        }
    }

    pub const fn ascii() -> Self {
        Self {
            indent: "  ",
            leaf: " ",
            collapsed: ">",
            expanded: "v",
        }
    }

    /// Material design chevrons from the nerd-font symbol set.
    pub const fn nerd_font() -> Self {
        Self {
            indent: "  ",
            leaf: " ",
            collapsed: "\u{f0142}",
            expanded: "\u{f0140}",
        }
    }
}

impl Default for TreeGlyphs<'static> {
    fn default() -> Self {
        Self::unicode()
    }
}
