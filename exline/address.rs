//
// Copyright (c) 2025 the exline authors
//
// This file is part of the exline project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Address and range parsing.
//!
//! An address names one buffer line symbolically: a reference (`.`, `$`,
//! `%`, `'x`), a signed numeric offset, and a chain of search offsets
//! (`/pat/`, `?pat?`), each of which resolves from the result of the one
//! before it. A range is a pair of addresses joined by `,` or `;`.
//!
//! Parsing is a single left-to-right pass with one character of lookahead
//! and no backtracking; which side of the range is being filled is tracked
//! as state, since a separator both flips the side and patches an empty
//! left side to the current line.

use crate::error::{ExError, Result};
use crate::scanner::{scan_delimited, Scanner};

/// Punctuation characters that may begin a command name after a range.
pub const COMMAND_STARTERS: &[char] = &['!', '#', '&', '<', '>', '='];

/// Symbolic base of an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressRef {
    /// No reference; a bare offset is absolute (base line 0).
    #[default]
    None,
    /// `.` - the current line.
    CurrentLine,
    /// `$` - the last line.
    LastLine,
    /// `%` - the whole buffer; exclusive with offsets and searches.
    WholeBuffer,
    /// `'x` - a named mark (letter, `<` or `>`).
    Mark(char),
}

/// Direction of a search offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `/pattern/`
    Forward,
    /// `?pattern?`
    Backward,
}

/// One `/pat/` or `?pat?` element, with any trailing numeric offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOffset {
    pub direction: Direction,
    /// Decoded pattern text; empty means "reuse the last search pattern".
    pub pattern: String,
    /// Offset applied to the found line (`/pat/100`, `/pat/+2-`).
    pub offset: i64,
}

/// One side of a range.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AddressSpec {
    pub reference: AddressRef,
    /// Accumulated numeric offset, if any sign or digit run was seen.
    pub offset: Option<i64>,
    /// Search offsets in source order; each resolves from the previous result.
    pub searches: Vec<SearchOffset>,
}

impl AddressSpec {
    /// True if nothing at all was written to this side.
    pub fn is_empty(&self) -> bool {
        self.reference == AddressRef::None && self.offset.is_none() && self.searches.is_empty()
    }
}

/// Range separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    /// `,` - both sides resolve from the original current line.
    Comma,
    /// `;` - the left result becomes the current line for the right side.
    Semicolon,
}

/// A parsed range: two sides, the separator, and the exact input consumed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RangeSpec {
    pub left: AddressSpec,
    pub separator: Option<Separator>,
    pub right: AddressSpec,
    /// The literal prefix of the input spanned by the range grammar.
    /// Downstream consumers locate the command name right after it.
    pub consumed: String,
}

impl RangeSpec {
    /// True if the user supplied no range at all.
    pub fn is_empty(&self) -> bool {
        self.separator.is_none() && self.left.is_empty() && self.right.is_empty()
    }
}

/// Parse a range from the head of a command line, leaving the scanner at
/// the command name.
pub fn parse_range(sc: &mut Scanner<'_>) -> Result<RangeSpec> {
    let start = sc.pos();
    let mut left: Option<AddressSpec> = None;
    let mut separator: Option<Separator> = None;
    let mut side = AddressSpec::default();

    loop {
        sc.skip_blanks();
        match sc.peek() {
            Some(sep_ch @ (',' | ';')) => {
                sc.advance();
                let mut done = std::mem::take(&mut side);
                if done.is_empty() {
                    done.reference = AddressRef::CurrentLine;
                }
                // A further separator shifts the previous right side into
                // the left slot, keeping the last two addresses.
                left = Some(done);
                separator = Some(if sep_ch == ',' {
                    Separator::Comma
                } else {
                    Separator::Semicolon
                });
            }
            _ => {
                if !scan_element(sc, &mut side)? {
                    break;
                }
            }
        }
    }

    match sc.peek() {
        None => {}
        Some(c) if c.is_ascii_alphabetic() || COMMAND_STARTERS.contains(&c) => {}
        Some(_) => return Err(ExError::UnknownCommand(sc.rest().to_string())),
    }

    let consumed = sc.consumed_since(start).to_string();
    let (left, right) = match separator {
        Some(_) => (left.unwrap_or_default(), side),
        None => (side, AddressSpec::default()),
    };
    Ok(RangeSpec {
        left,
        separator,
        right,
        consumed,
    })
}

/// Parse a whole string as one standalone address (no separator, no
/// trailing command), as used for copy/move destinations.
pub fn parse_address(input: &str) -> Result<AddressSpec> {
    let mut sc = Scanner::new(input);
    let mut side = AddressSpec::default();
    loop {
        sc.skip_blanks();
        if !scan_element(&mut sc, &mut side)? {
            break;
        }
    }
    if !sc.at_end() {
        return Err(ExError::InvalidAddress(format!(
            "trailing characters: {}",
            sc.rest()
        )));
    }
    Ok(side)
}

/// Consume one address element into `side`. Returns false when the next
/// character does not belong to the address grammar.
fn scan_element(sc: &mut Scanner<'_>, side: &mut AddressSpec) -> Result<bool> {
    let Some(c) = sc.peek() else {
        return Ok(false);
    };
    match c {
        '.' => {
            require_empty(side, '.')?;
            side.reference = AddressRef::CurrentLine;
            sc.advance();
        }
        '$' => {
            require_empty(side, '$')?;
            side.reference = AddressRef::LastLine;
            sc.advance();
        }
        '%' => {
            if !side.is_empty() {
                return Err(ExError::InvalidRange(
                    "'%' cannot follow an address".to_string(),
                ));
            }
            side.reference = AddressRef::WholeBuffer;
            sc.advance();
        }
        '\'' => {
            require_empty(side, '\'')?;
            sc.advance();
            let mark = match sc.peek() {
                Some(m) if m.is_ascii_alphabetic() || m == '<' || m == '>' => m,
                Some(m) => {
                    return Err(ExError::InvalidAddress(format!(
                        "invalid mark character: {}",
                        m
                    )))
                }
                None => {
                    return Err(ExError::InvalidAddress(
                        "missing mark character".to_string(),
                    ))
                }
            };
            sc.advance();
            side.reference = AddressRef::Mark(mark);
        }
        '0'..='9' => {
            forbid_whole_buffer(side)?;
            let n = scan_number(sc)?;
            push_offset(side, n);
        }
        '+' | '-' => {
            forbid_whole_buffer(side)?;
            let mut signs: Vec<i64> = Vec::new();
            while let Some(s) = sc.peek() {
                match s {
                    '+' => signs.push(1),
                    '-' => signs.push(-1),
                    _ => break,
                }
                sc.advance();
            }
            // A digit run directly after the signs takes the last sign for
            // itself; every earlier sign still counts as one line.
            let contribution = if sc.peek().is_some_and(|d| d.is_ascii_digit()) {
                let n = scan_number(sc)?;
                let last = signs.pop().unwrap_or(1);
                signs.iter().sum::<i64>() + last * n
            } else {
                signs.iter().sum::<i64>()
            };
            if side.is_empty() {
                side.reference = AddressRef::CurrentLine;
            }
            push_offset(side, contribution);
        }
        '/' | '?' => {
            forbid_whole_buffer(side)?;
            sc.advance();
            // Unterminated is tolerated: the pattern absorbs the rest.
            let (pattern, _closed) = scan_delimited(sc, c);
            side.searches.push(SearchOffset {
                direction: if c == '/' {
                    Direction::Forward
                } else {
                    Direction::Backward
                },
                pattern,
                offset: 0,
            });
        }
        _ => return Ok(false),
    }
    Ok(true)
}

fn scan_number(sc: &mut Scanner<'_>) -> Result<i64> {
    let digits = sc.take_while(|c| c.is_ascii_digit());
    digits
        .parse()
        .map_err(|_| ExError::InvalidAddress(format!("number out of range: {}", digits)))
}

/// Numeric offsets after a search offset belong to that search; otherwise
/// they accumulate on the side itself.
fn push_offset(side: &mut AddressSpec, n: i64) {
    if let Some(last) = side.searches.last_mut() {
        last.offset += n;
    } else {
        side.offset = Some(side.offset.unwrap_or(0) + n);
    }
}

fn require_empty(side: &AddressSpec, what: char) -> Result<()> {
    if side.is_empty() {
        Ok(())
    } else {
        Err(ExError::InvalidAddress(format!("unexpected '{}'", what)))
    }
}

fn forbid_whole_buffer(side: &AddressSpec) -> Result<()> {
    if side.reference == AddressRef::WholeBuffer {
        Err(ExError::InvalidRange(
            "'%' cannot take an offset or search".to_string(),
        ))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn range(input: &str) -> RangeSpec {
        let mut sc = Scanner::new(input);
        parse_range(&mut sc).expect("parse error")
    }

    fn range_err(input: &str) -> ExError {
        let mut sc = Scanner::new(input);
        parse_range(&mut sc).expect_err("expected parse error")
    }

    #[test]
    fn bare_refs() {
        assert_eq!(parse_address(".").unwrap().reference, AddressRef::CurrentLine);
        assert_eq!(parse_address("$").unwrap().reference, AddressRef::LastLine);
        assert_eq!(parse_address("'a").unwrap().reference, AddressRef::Mark('a'));
        assert_eq!(parse_address("'<").unwrap().reference, AddressRef::Mark('<'));
        assert_eq!(parse_address("'>").unwrap().reference, AddressRef::Mark('>'));
        assert_eq!(range("%").left.reference, AddressRef::WholeBuffer);
    }

    #[test]
    fn invalid_mark_characters() {
        assert!(matches!(
            parse_address("'1"),
            Err(ExError::InvalidAddress(_))
        ));
        assert!(matches!(parse_address("'"), Err(ExError::InvalidAddress(_))));
    }

    #[test]
    fn absolute_line_is_bare_offset() {
        let a = parse_address("100").unwrap();
        assert_eq!(a.reference, AddressRef::None);
        assert_eq!(a.offset, Some(100));
    }

    #[test]
    fn sign_run_arithmetic() {
        let a = parse_address("++99").unwrap();
        assert_eq!(a.reference, AddressRef::CurrentLine);
        assert_eq!(a.offset, Some(100));

        let a = parse_address("--99").unwrap();
        assert_eq!(a.reference, AddressRef::CurrentLine);
        assert_eq!(a.offset, Some(-100));

        let a = parse_address("+-101").unwrap();
        assert_eq!(a.reference, AddressRef::CurrentLine);
        assert_eq!(a.offset, Some(-100));

        // Postfix sign runs: digits first leave the reference absolute.
        let a = parse_address("101-").unwrap();
        assert_eq!(a.reference, AddressRef::None);
        assert_eq!(a.offset, Some(100));

        let a = parse_address("99+").unwrap();
        assert_eq!(a.reference, AddressRef::None);
        assert_eq!(a.offset, Some(100));
    }

    #[test]
    fn sign_runs_without_digits() {
        let a = parse_address("++").unwrap();
        assert_eq!(a.reference, AddressRef::CurrentLine);
        assert_eq!(a.offset, Some(2));

        let a = parse_address("+-+").unwrap();
        assert_eq!(a.offset, Some(1));
    }

    proptest! {
        #[test]
        fn sign_run_property(signs in proptest::collection::vec(any::<bool>(), 1..24)) {
            let input: String = signs.iter().map(|&p| if p { '+' } else { '-' }).collect();
            let plus = signs.iter().filter(|&&p| p).count() as i64;
            let minus = signs.len() as i64 - plus;

            let a = parse_address(&input).unwrap();
            prop_assert_eq!(a.offset, Some(plus - minus));
            if signs.len() > 1 {
                prop_assert_eq!(a.reference, AddressRef::CurrentLine);
            }
        }
    }

    #[test]
    fn whole_buffer_is_exclusive() {
        assert!(matches!(range_err("%100"), ExError::InvalidRange(_)));
        assert!(matches!(range_err("100%"), ExError::InvalidRange(_)));
        assert!(matches!(range_err("%+2"), ExError::InvalidRange(_)));
        assert!(matches!(range_err("%/x/"), ExError::InvalidRange(_)));
    }

    #[test]
    fn search_offsets() {
        let a = parse_address("/foo/").unwrap();
        assert_eq!(
            a.searches,
            vec![SearchOffset {
                direction: Direction::Forward,
                pattern: "foo".to_string(),
                offset: 0,
            }]
        );

        let a = parse_address("/foo/100").unwrap();
        assert_eq!(a.searches[0].offset, 100);

        let a = parse_address("?bar?").unwrap();
        assert_eq!(a.searches[0].direction, Direction::Backward);
    }

    #[test]
    fn search_offset_escaping() {
        let a = parse_address("/foo\\//").unwrap();
        assert_eq!(a.searches[0].pattern, "foo/");

        let a = parse_address("/a\\\\b/").unwrap();
        assert_eq!(a.searches[0].pattern, "a\\b");
    }

    #[test]
    fn search_offset_unterminated() {
        let a = parse_address("/foo").unwrap();
        assert_eq!(a.searches[0].pattern, "foo");
        assert_eq!(a.searches[0].offset, 0);
    }

    #[test]
    fn search_offsets_chain() {
        let a = parse_address("/foo//bar/?baz?").unwrap();
        assert_eq!(a.searches.len(), 3);
        assert_eq!(a.searches[0].pattern, "foo");
        assert_eq!(a.searches[1].pattern, "bar");
        assert_eq!(a.searches[2].pattern, "baz");
        assert_eq!(a.searches[2].direction, Direction::Backward);
    }

    #[test]
    fn full_range_simple() {
        let r = range("100,100");
        assert_eq!(r.left.offset, Some(100));
        assert_eq!(r.separator, Some(Separator::Comma));
        assert_eq!(r.right.offset, Some(100));
        assert_eq!(r.consumed, "100,100");
    }

    #[test]
    fn full_range_whole_buffer_sides() {
        let r = range("%,%");
        assert_eq!(r.left.reference, AddressRef::WholeBuffer);
        assert_eq!(r.separator, Some(Separator::Comma));
        assert_eq!(r.right.reference, AddressRef::WholeBuffer);
    }

    #[test]
    fn empty_left_side_defaults_to_current() {
        let r = range(",5p");
        assert_eq!(r.left.reference, AddressRef::CurrentLine);
        assert_eq!(r.right.offset, Some(5));
        assert_eq!(r.consumed, ",5");
    }

    #[test]
    fn semicolon_separator() {
        let r = range("10;/PAT/");
        assert_eq!(r.left.offset, Some(10));
        assert_eq!(r.separator, Some(Separator::Semicolon));
        assert_eq!(r.right.searches[0].pattern, "PAT");
    }

    #[test]
    fn extra_separators_keep_last_two() {
        let r = range("1,2,3p");
        assert_eq!(r.left.offset, Some(2));
        assert_eq!(r.right.offset, Some(3));
        assert_eq!(r.consumed, "1,2,3");
    }

    #[test]
    fn consumed_stops_at_command() {
        let r = range(".,$d");
        assert_eq!(r.consumed, ".,$");
        assert_eq!(r.left.reference, AddressRef::CurrentLine);
        assert_eq!(r.right.reference, AddressRef::LastLine);
    }

    #[test]
    fn marks_in_range() {
        let r = range("'<,'>s/old/new/g");
        assert_eq!(r.left.reference, AddressRef::Mark('<'));
        assert_eq!(r.right.reference, AddressRef::Mark('>'));
        assert_eq!(r.consumed, "'<,'>");
    }

    #[test]
    fn unrecognized_command_starter() {
        assert!(matches!(range_err("5]x"), ExError::UnknownCommand(_)));
        assert!(matches!(range_err("5~"), ExError::UnknownCommand(_)));
        assert!(matches!(range_err("5@"), ExError::UnknownCommand(_)));
    }

    #[test]
    fn standalone_address_rejects_trailing() {
        assert!(matches!(
            parse_address("5,6"),
            Err(ExError::InvalidAddress(_))
        ));
    }
}
