use std::ops::Range;

use serde::Serialize;

/// Byte-offset span into shader source text. Start is inclusive, end is exclusive.
///
/// ESTree producers report either `range: [start, end]` or separate
/// `start`/`end` offsets; both end up here. Line/column information is
/// computed on demand via [`LineIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Create a new span from byte offsets.
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end, "span start ({start}) must be <= end ({end})");
        Self { start, end }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Whether the span is empty (zero-length).
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Merge two spans into one that covers both.
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// The span as a `usize` range, clamped to `len` and never empty when
    /// `len > 0`. Diagnostic renderers need at least one character to label.
    pub fn to_range(self, len: usize) -> Range<usize> {
        let start = (self.start as usize).min(len);
        let end = (self.end as usize).min(len).max(start);
        if start == end {
            start..(end + 1).min(len)
        } else {
            start..end
        }
    }
}

/// Pre-computed index of line start positions for on-demand line/column lookup.
#[derive(Debug)]
pub struct LineIndex {
    /// Byte offset of the start of each line. The first entry is always 0.
    line_starts: Vec<u32>,
}

impl LineIndex {
    /// Build a line index by scanning the source text for newline characters.
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0u32];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push((i + 1) as u32);
            }
        }
        Self { line_starts }
    }

    /// Convert a byte offset to a 1-based (line, column) pair.
    ///
    /// Column is measured in bytes from the start of the line.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let line_idx = self.line_starts.partition_point(|&start| start <= offset);
        let line_idx = line_idx.saturating_sub(1);
        let line = (line_idx as u32) + 1;
        let col = offset - self.line_starts[line_idx] + 1;
        (line, col)
    }

    /// Return the number of lines in the source.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
