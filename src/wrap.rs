//! Word wrapping of logical lines into visual rows.

use std::borrow::Cow;
use textwrap::{Options, WordSeparator, WordSplitter, WrapAlgorithm};

/// Column width used until the first viewport measurement arrives.
pub const DEFAULT_MAX_CHARS: usize = 80;

/// Columns between tab stops.
pub const TAB_WIDTH: usize = 4;

/// One rendered row and the logical line it was cut from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualLine {
    pub text: String,
    /// 1-based index of the originating logical line
    pub source_line: usize,
    /// True for every fragment after the first one of a logical line
    pub is_continuation: bool,
}

impl VisualLine {
    pub fn new(text: impl Into<String>, source_line: usize, is_continuation: bool) -> Self {
        Self {
            text: text.into(),
            source_line,
            is_continuation,
        }
    }
}

/// Per-pane word wrap settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapConfig {
    pub enabled: bool,
    pub max_chars_per_line: usize,
}

impl Default for WrapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_chars_per_line: DEFAULT_MAX_CHARS,
        }
    }
}

impl WrapConfig {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }
}

/// Expand tabs to the next tab stop and turn other whitespace controls into
/// plain spaces. textwrap measures those controls as zero columns wide.
pub fn expand_whitespace(line: &str) -> Cow<'_, str> {
    if !line.chars().any(|c| c != ' ' && c.is_whitespace()) {
        return Cow::Borrowed(line);
    }

    let mut expanded = String::with_capacity(line.len() + TAB_WIDTH);
    let mut column = 0;
    for c in line.chars() {
        match c {
            '\t' => {
                let pad = TAB_WIDTH - column % TAB_WIDTH;
                expanded.push_str(&" ".repeat(pad));
                column += pad;
            }
            c if c.is_whitespace() => {
                expanded.push(' ');
                column += 1;
            }
            c => {
                expanded.push(c);
                column += 1;
            }
        }
    }
    Cow::Owned(expanded)
}

/// Wrap a single logical line to at most `max_chars` columns.
///
/// Words are packed greedily on whitespace. A word wider than the limit is
/// broken at a character boundary. Blank lines come back as one empty row so
/// they keep their vertical space. Leading indentation is kept as long as the
/// first word still fits beside it.
pub fn wrap(line: &str, max_chars: usize) -> Vec<String> {
    let line = expand_whitespace(line);
    if line.trim().is_empty() {
        return vec![String::new()];
    }

    let options = Options::new(max_chars.max(1))
        .wrap_algorithm(WrapAlgorithm::FirstFit)
        .word_separator(WordSeparator::AsciiSpace)
        .word_splitter(WordSplitter::NoHyphenation)
        .break_words(true);

    let mut rows: Vec<String> = textwrap::wrap(&line, options)
        .into_iter()
        .map(Cow::into_owned)
        .collect();

    // textwrap puts an indent with no room for the first word on a row of its own
    if rows.len() > 1 && rows[0].trim().is_empty() {
        rows.remove(0);
    }
    rows
}

/// Produce the active row sequence for a document.
///
/// With wrapping disabled every logical line becomes exactly one row, so the
/// same back-reference map serves both modes.
pub fn layout_lines(logical_lines: &[String], config: &WrapConfig) -> Vec<VisualLine> {
    if !config.enabled {
        return logical_lines
            .iter()
            .enumerate()
            .map(|(idx, line)| VisualLine::new(expand_whitespace(line), idx + 1, false))
            .collect();
    }

    let mut rows = Vec::with_capacity(logical_lines.len());
    for (idx, line) in logical_lines.iter().enumerate() {
        for (fragment_idx, fragment) in wrap(line, config.max_chars_per_line)
            .into_iter()
            .enumerate()
        {
            rows.push(VisualLine::new(fragment, idx + 1, fragment_idx > 0));
        }
    }
    rows
}
