//! Short-line filtering ("clean" mode)

/// Lines with this many words or fewer are dropped
const MAX_DROPPED_WORDS: usize = 2;

/// Removes non-blank lines of two or fewer whitespace-delimited words
///
/// Blank lines are kept untouched so paragraph separation survives. Run this
/// on extractor output before it is split for rendering: bullet markers count
/// as words.
///
/// # Examples
///
/// ```
/// use scrapedf::render::clean_lines;
///
/// let text = "Menu\n\nThis sentence has five words\nRead more";
/// assert_eq!(clean_lines(text), "\nThis sentence has five words");
/// ```
pub fn clean_lines(text: &str) -> String {
    text.split('\n')
        .filter(|line| {
            let trimmed = line.trim();
            trimmed.is_empty() || trimmed.split_whitespace().count() > MAX_DROPPED_WORDS
        })
        .collect::<Vec<_>>()
        .join("\n")
}
