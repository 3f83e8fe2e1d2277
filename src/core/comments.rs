//! Brace comment stripping.
//!
//! `{` opens a comment and `}` closes it. An unclosed comment carries over
//! into the following lines, so the open/closed state belongs to the whole
//! document rather than to a single line. A `}` outside a comment is plain
//! text.

/// Carries the in-comment flag from one line to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommentFilter {
    in_comment: bool,
}

impl CommentFilter {
    /// Starts outside any comment.
    pub fn new() -> Self {
        Self::default()
    }

    /// True while an opened comment has not been closed yet.
    pub fn in_comment(&self) -> bool {
        self.in_comment
    }

    /// Removes commented text from `line`, updating the carried state.
    ///
    /// Surrounding text is kept untouched, including whitespace.
    pub fn strip_line(&mut self, line: &str) -> String {
        let mut out = String::with_capacity(line.len());
        for c in line.chars() {
            if self.in_comment {
                if c == '}' {
                    self.in_comment = false;
                }
            } else if c == '{' {
                self.in_comment = true;
            } else {
                out.push(c);
            }
        }
        out
    }
}

/// Strips brace comments from a whole document, one output line per input line.
#[must_use]
pub fn strip_comments<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut filter = CommentFilter::new();
    lines
        .into_iter()
        .map(|l| filter.strip_line(l.as_ref()))
        .collect()
}
