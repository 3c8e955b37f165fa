//
// Copyright (c) 2025 the exline authors
//
// This file is part of the exline project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Single-character-lookahead cursor over a command line.
//!
//! Every parser in this crate is built on this scanner: peek the current
//! character, advance past it, or consume a run matching a predicate. The
//! scanner tracks byte positions so callers can recover the exact slice of
//! input a grammar consumed.

/// A cursor over a command-line string.
#[derive(Debug)]
pub struct Scanner<'a> {
    src: &'a str,
    pos: usize,
    cur: Option<char>,
}

impl<'a> Scanner<'a> {
    /// Create a scanner positioned at the start of `src`.
    pub fn new(src: &'a str) -> Self {
        Scanner {
            src,
            pos: 0,
            cur: src.chars().next(),
        }
    }

    /// The current character, or `None` once past the end.
    pub fn peek(&self) -> Option<char> {
        self.cur
    }

    /// Byte offset of the current character within the source.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Advance past the current character.
    ///
    /// Advancing while already at end of input is a caller bug and panics.
    pub fn advance(&mut self) {
        let ch = self
            .cur
            .unwrap_or_else(|| panic!("scanner advanced past end of input"));
        self.pos += ch.len_utf8();
        self.cur = self.src[self.pos..].chars().next();
    }

    /// Consume and return the current character.
    pub fn bump(&mut self) -> char {
        let ch = self
            .cur
            .unwrap_or_else(|| panic!("scanner advanced past end of input"));
        self.advance();
        ch
    }

    /// Consume the current character if it equals `ch`.
    pub fn eat(&mut self, ch: char) -> bool {
        if self.cur == Some(ch) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a maximal run of characters satisfying `pred`, returning the
    /// consumed slice (possibly empty).
    pub fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(ch) = self.cur {
            if !pred(ch) {
                break;
            }
            self.advance();
        }
        &self.src[start..self.pos]
    }

    /// Consume a run of blanks (spaces and tabs).
    pub fn skip_blanks(&mut self) {
        self.take_while(|c| c == ' ' || c == '\t');
    }

    /// The unconsumed remainder of the input.
    pub fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    /// The slice of input consumed since byte offset `from`.
    pub fn consumed_since(&self, from: usize) -> &'a str {
        &self.src[from..self.pos]
    }

    /// True once the whole input has been consumed.
    pub fn at_end(&self) -> bool {
        self.cur.is_none()
    }
}

/// Scan a delimited field, decoding escapes.
///
/// Consumes up to and including the next unescaped `delim`. `\<delim>`
/// decodes to a literal delimiter and `\\` to a literal backslash; any other
/// escaped character is kept verbatim together with its backslash. Returns
/// the decoded field and whether the closing delimiter was found; reaching
/// end of input first is tolerated and the field absorbs the remainder.
pub fn scan_delimited(sc: &mut Scanner<'_>, delim: char) -> (String, bool) {
    let mut field = String::new();
    loop {
        match sc.peek() {
            None => return (field, false),
            Some(c) if c == delim => {
                sc.advance();
                return (field, true);
            }
            Some('\\') => {
                sc.advance();
                match sc.peek() {
                    None => {
                        field.push('\\');
                        return (field, false);
                    }
                    Some(c) if c == delim => {
                        field.push(delim);
                        sc.advance();
                    }
                    Some('\\') => {
                        field.push('\\');
                        sc.advance();
                    }
                    Some(c) => {
                        field.push('\\');
                        field.push(c);
                        sc.advance();
                    }
                }
            }
            Some(c) => {
                field.push(c);
                sc.advance();
            }
        }
    }
}
