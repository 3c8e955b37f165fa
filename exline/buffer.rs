//
// Copyright (c) 2025 the exline authors
//
// This file is part of the exline project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! In-memory line buffer backing the resolver's queries.
//!
//! Text is stored flat with a byte-offset index of line starts, so
//! mapping a match offset back to a line number is a binary search
//! rather than a scan. Forward pattern search runs the regex engine from
//! the line after the base; backward search cannot run a regex in
//! reverse, so it bisects: scan a small window ending at the limit, and
//! keep doubling the window toward the start of the buffer until a match
//! appears, then take the last match inside the window. Patterns are
//! regular expressions; a pattern that fails to compile matches nothing.

use std::collections::HashMap;

use regex::Regex;

use crate::resolve::BufferContext;

/// Initial backward-search window, in bytes. Doubles until a match is
/// found or the window reaches the start of the buffer.
const BACKWARD_WINDOW: usize = 4096;

/// A text buffer indexed by line.
#[derive(Debug, Clone)]
pub struct LineBuffer {
    text: String,
    /// Byte offset of each line's first character; `line_starts[0] == 0`.
    line_starts: Vec<usize>,
    current: usize,
    marks: HashMap<char, usize>,
}

impl LineBuffer {
    /// Build a buffer from raw text. A trailing newline does not create
    /// an extra empty line; empty text yields an empty buffer.
    pub fn from_text(text: &str) -> Self {
        let mut line_starts = Vec::new();
        if !text.is_empty() {
            line_starts.push(0);
            for (i, b) in text.bytes().enumerate() {
                if b == b'\n' && i + 1 < text.len() {
                    line_starts.push(i + 1);
                }
            }
        }
        let current = if line_starts.is_empty() { 0 } else { 1 };
        LineBuffer {
            text: text.to_string(),
            line_starts,
            current,
            marks: HashMap::new(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// The text of line `n` (1-indexed), without its newline.
    pub fn line(&self, n: usize) -> Option<&str> {
        if n == 0 || n > self.line_starts.len() {
            return None;
        }
        let start = self.line_starts[n - 1];
        let end = self
            .line_starts
            .get(n)
            .map(|&next| next - 1)
            .unwrap_or(self.text.len() - usize::from(self.text.ends_with('\n')));
        Some(&self.text[start..end])
    }

    /// Line number containing byte `offset`. O(log n) over the line
    /// index; offsets past the end map to the last line.
    pub fn line_of_offset(&self, offset: usize) -> usize {
        self.line_starts.partition_point(|&start| start <= offset)
    }

    /// Byte offset of the first character of line `n`.
    fn offset_of_line(&self, n: usize) -> usize {
        if n == 0 || self.line_starts.is_empty() {
            return 0;
        }
        self.line_starts[(n - 1).min(self.line_starts.len() - 1)]
    }

    pub fn set_current(&mut self, line: usize) {
        self.current = line.min(self.line_count());
    }

    pub fn set_mark(&mut self, mark: char, line: usize) {
        self.marks.insert(mark, line);
    }
}

impl BufferContext for LineBuffer {
    fn current_line(&self) -> usize {
        self.current
    }

    fn last_line(&self) -> usize {
        self.line_count()
    }

    fn mark_line(&self, mark: char) -> Option<usize> {
        self.marks.get(&mark).copied()
    }

    fn search_forward(&self, pattern: &str, from_line: usize) -> Option<usize> {
        let re = Regex::new(pattern).ok()?;
        if from_line >= self.line_count() {
            return None;
        }
        let start = self.offset_of_line(from_line + 1);
        let m = re.find(&self.text[start..])?;
        Some(self.line_of_offset(start + m.start()))
    }

    fn search_backward(&self, pattern: &str, before_line: usize) -> Option<usize> {
        let re = Regex::new(pattern).ok()?;
        if before_line <= 1 {
            return None;
        }
        // Everything strictly before this offset is fair game.
        let limit = self.offset_of_line(before_line.min(self.line_count() + 1));

        let mut window = BACKWARD_WINDOW;
        loop {
            let start = limit.saturating_sub(window);
            // Clamp to a character boundary.
            let start = (start..=limit)
                .find(|&i| self.text.is_char_boundary(i))
                .unwrap_or(limit);

            let mut last = None;
            for m in re.find_iter(&self.text[start..limit]) {
                last = Some(start + m.start());
            }
            if let Some(offset) = last {
                return Some(self.line_of_offset(offset));
            }
            if start == 0 {
                return None;
            }
            window *= 2;
        }
    }
}
