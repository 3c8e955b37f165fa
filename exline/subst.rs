//
// Copyright (c) 2025 the exline authors
//
// This file is part of the exline project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Substitute argument mini-grammar.
//!
//! Two forms share one dispatch rule: if the first non-blank character is
//! a delimiter-class character (not alphanumeric, not blank), the long
//! form `<d>pattern<d>replacement<d>flags [count]` applies; otherwise the
//! short form `flags [count]`, which repeats the previous substitute.
//! Long-form fields cut short by end of input default to empty rather
//! than erroring, so `s/foo` is a complete command.

use crate::error::{ExError, Result};
use crate::scanner::{scan_delimited, Scanner};

/// Flag letters a substitute accepts. `&` must come first in the input
/// when used; the parser only restricts the alphabet, ordering rules
/// belong to the handler.
const SUBST_FLAGS: [char; 9] = ['&', 'c', 'e', 'g', 'i', 'I', 'n', 'p', 'r'];

/// Parsed substitute arguments. All fields keep their literal spelling;
/// empty means the field was not supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstituteSpec {
    pub pattern: String,
    pub replacement: String,
    pub flags: String,
    pub count: String,
}

/// Parse the argument text of a substitute command.
pub fn parse_substitute(args: &str) -> Result<SubstituteSpec> {
    let mut sc = Scanner::new(args);
    sc.skip_blanks();

    match sc.peek() {
        Some(c) if !c.is_alphanumeric() && c != ' ' && c != '\t' => {
            sc.advance();
            parse_long(&mut sc, c)
        }
        _ => parse_short(&mut sc),
    }
}

fn parse_long(sc: &mut Scanner<'_>, delim: char) -> Result<SubstituteSpec> {
    let mut spec = SubstituteSpec::default();

    let (pattern, closed) = scan_delimited(sc, delim);
    spec.pattern = pattern;
    if !closed {
        return Ok(spec);
    }

    let (replacement, closed) = scan_delimited(sc, delim);
    spec.replacement = replacement;
    if !closed {
        return Ok(spec);
    }

    spec.flags = sc.take_while(|c| SUBST_FLAGS.contains(&c)).to_string();
    sc.skip_blanks();
    spec.count = sc.take_while(|c| c.is_ascii_digit()).to_string();

    if !sc.at_end() {
        return Err(ExError::TrailingCharacters(sc.rest().to_string()));
    }
    Ok(spec)
}

fn parse_short(sc: &mut Scanner<'_>) -> Result<SubstituteSpec> {
    let mut spec = SubstituteSpec::default();

    spec.flags = sc.take_while(|c| SUBST_FLAGS.contains(&c)).to_string();
    sc.skip_blanks();
    spec.count = sc.take_while(|c| c.is_ascii_digit()).to_string();

    if !sc.at_end() {
        return Err(ExError::TrailingCharacters(sc.rest().to_string()));
    }
    Ok(spec)
}
