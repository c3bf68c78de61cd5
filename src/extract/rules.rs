//! Tag classification and the parent-tag formatting rule table
//!
//! The walker never branches on tag names itself; it asks this module
//! whether an element is suppressed or transparent, and which [`FormatRule`]
//! applies to a text node given its parent's tag.

/// Elements skipped together with all of their descendants
const SUPPRESSED_TAGS: &[&str] = &["script", "style", "meta", "link", "noscript"];

/// Inline styling elements that are walked through as if absent
const INLINE_STYLING_TAGS: &[&str] = &[
    "strong", "b", "em", "i", "u", "span", "mark", "small", "sub", "sup", "code",
];

/// Marker written before every list item
pub const BULLET: &str = "• ";

/// Returns true if an element with this tag is dropped from the output
pub fn is_suppressed(tag: &str) -> bool {
    SUPPRESSED_TAGS.contains(&tag)
}

/// Returns true if an element with this tag only styles inline text
pub fn is_inline_styling(tag: &str) -> bool {
    INLINE_STYLING_TAGS.contains(&tag)
}

/// What the walker has emitted most recently
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkState {
    /// Last emitted text closed a paragraph or heading
    pub last_was_block: bool,

    /// Last emitted text was an inline run (anchor or default text)
    pub last_was_text: bool,
}

impl WalkState {
    const BLOCK: Self = Self {
        last_was_block: true,
        last_was_text: false,
    };

    const LINE: Self = Self {
        last_was_block: false,
        last_was_text: false,
    };

    const INLINE: Self = Self {
        last_was_block: false,
        last_was_text: true,
    };
}

/// Formatting applied to a text node, chosen by its parent's tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatRule {
    /// `p`: text closed by a blank line
    Paragraph,
    /// `li`: bulleted single line
    ListItem,
    /// `h1`..`h6`: isolated by blank lines
    Heading,
    /// `a`: inline run, broken onto its own line after other inline text
    Anchor,
    /// Everything else: space-joined inline run
    Default,
}

impl FormatRule {
    /// Looks up the rule for a text node whose parent element is `tag`
    ///
    /// # Examples
    ///
    /// ```
    /// use scrapedf::extract::FormatRule;
    ///
    /// assert_eq!(FormatRule::for_tag("p"), FormatRule::Paragraph);
    /// assert_eq!(FormatRule::for_tag("h3"), FormatRule::Heading);
    /// assert_eq!(FormatRule::for_tag("div"), FormatRule::Default);
    /// ```
    pub fn for_tag(tag: &str) -> Self {
        match tag {
            "p" => Self::Paragraph,
            "li" => Self::ListItem,
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Self::Heading,
            "a" => Self::Anchor,
            _ => Self::Default,
        }
    }

    /// Appends `text` to `out` according to this rule and returns the new state
    ///
    /// `closes_nav` is only consulted by [`FormatRule::Anchor`]: it is true
    /// when the anchor is the last child of a `nav` element, which earns the
    /// anchor a trailing line break.
    pub fn emit(
        self,
        text: &str,
        state: WalkState,
        closes_nav: bool,
        out: &mut String,
    ) -> WalkState {
        match self {
            Self::Paragraph => {
                out.push_str(text);
                out.push_str("\n\n");
                WalkState::BLOCK
            }
            Self::ListItem => {
                out.push_str(BULLET);
                out.push_str(text);
                out.push('\n');
                WalkState::LINE
            }
            Self::Heading => {
                if !state.last_was_block {
                    out.push('\n');
                }
                out.push_str(text);
                out.push_str("\n\n");
                WalkState::BLOCK
            }
            Self::Anchor => {
                if state.last_was_text {
                    out.push('\n');
                }
                out.push_str(text);
                if closes_nav {
                    out.push('\n');
                }
                WalkState::INLINE
            }
            Self::Default => {
                if state.last_was_text {
                    out.push(' ');
                }
                out.push_str(text);
                WalkState::INLINE
            }
        }
    }
}
