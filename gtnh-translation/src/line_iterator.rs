//! Line splitting with byte offsets.
//!
//! Carriage returns are stripped before any offset is computed, so a file
//! checked out with CRLF line endings produces the same offsets as its LF
//! counterpart.

use std::borrow::Cow;

/// One logical line of a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// Zero-based line number.
    pub index: usize,
    /// Line content without the line feed.
    pub text: &'a str,
    /// Byte offset of the first byte of `text` in the normalized text.
    pub start: usize,
    /// Byte offset one past the last byte of `text` in the normalized text.
    pub end: usize,
}

/// Holds the normalized text and hands out fresh [`Lines`] iterators over it.
///
/// # Example
///
/// ```rust
/// use gtnh_translation::line_iterator::LineIterator;
///
/// let lines = LineIterator::new("a=b\r\nc=d");
/// let collected: Vec<_> = lines.iter().map(|l| (l.text, l.start, l.end)).collect();
/// assert_eq!(collected, vec![("a=b", 0, 3), ("c=d", 4, 7)]);
/// ```
#[derive(Debug, Clone)]
pub struct LineIterator<'a> {
    text: Cow<'a, str>,
}

impl<'a> LineIterator<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text: normalize_line_endings(text),
        }
    }

    /// The text the offsets refer to.
    pub fn normalized(&self) -> &str {
        &self.text
    }

    /// Starts a new pass over the lines.
    pub fn iter(&self) -> Lines<'_> {
        Lines {
            rest: &self.text,
            offset: 0,
            index: 0,
        }
    }
}

impl<'s, 'a> IntoIterator for &'s LineIterator<'a> {
    type Item = Line<'s>;
    type IntoIter = Lines<'s>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy iterator over the lines of an already normalized text.
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    rest: &'a str,
    offset: usize,
    index: usize,
}

impl<'a> Iterator for Lines<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        let (text, consumed) = match self.rest.find('\n') {
            Some(pos) => (&self.rest[..pos], pos + 1),
            None => (self.rest, self.rest.len()),
        };

        let line = Line {
            index: self.index,
            text,
            start: self.offset,
            end: self.offset + text.len(),
        };

        self.rest = &self.rest[consumed..];
        self.offset += consumed;
        self.index += 1;
        Some(line)
    }
}

/// Removes every carriage return, borrowing when there is nothing to remove.
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace('\r', ""))
    } else {
        Cow::Borrowed(text)
    }
}

/// Owned variant of [`normalize_line_endings`], reusing the buffer when possible.
pub fn into_normalized(text: String) -> String {
    if text.contains('\r') {
        text.replace('\r', "")
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(text: &str) -> Vec<(usize, String, usize, usize)> {
        LineIterator::new(text)
            .iter()
            .map(|l| (l.index, l.text.to_string(), l.start, l.end))
            .collect()
    }

    #[test]
    fn test_offsets_exclude_line_feed() {
        assert_eq!(
            collect("#test\ntest=test\n\nx"),
            vec![
                (0, "#test".to_string(), 0, 5),
                (1, "test=test".to_string(), 6, 15),
                (2, "".to_string(), 16, 16),
                (3, "x".to_string(), 17, 18),
            ]
        );
    }

    #[test]
    fn test_trailing_line_without_line_feed_is_yielded() {
        let lines = collect("a\nb");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].1, "b");
    }

    #[test]
    fn test_final_line_feed_does_not_add_empty_line() {
        assert_eq!(collect("a\n").len(), 1);
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        assert!(collect("").is_empty());
    }

    #[test]
    fn test_crlf_matches_lf() {
        assert_eq!(collect("a=1\r\nb=2\r\n"), collect("a=1\nb=2\n"));
    }

    #[test]
    fn test_multibyte_offsets_are_bytes() {
        let iter = LineIterator::new("テ\nスト");
        let lines: Vec<_> = iter.iter().collect();
        assert_eq!((lines[0].start, lines[0].end), (0, 3));
        assert_eq!((lines[1].start, lines[1].end), (4, 10));
        assert_eq!(&iter.normalized()[lines[1].start..lines[1].end], "スト");
    }

    #[test]
    fn test_restartable() {
        let iter = LineIterator::new("a\nb\nc");
        let first: Vec<_> = iter.iter().collect();
        let second: Vec<_> = (&iter).into_iter().collect();
        assert_eq!(first, second);
    }
}
