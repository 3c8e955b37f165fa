//
// Copyright (c) 2025 the exline authors
//
// This file is part of the exline project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Command-line assembly.
//!
//! A command line is `[range]name[!][ args]`. The assembler parses the
//! range, then takes a maximal run of letters (or one punctuation command
//! name) as the name, an optional bang, and the remainder verbatim as
//! argument text. Argument interpretation belongs to the command table.

use crate::address::{parse_range, RangeSpec, COMMAND_STARTERS};
use crate::error::Result;
use crate::scanner::Scanner;

/// A structurally parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub range: RangeSpec,
    /// Command name; empty means the built-in "go to resolved line".
    pub name: String,
    /// True if the name carried a trailing `!`.
    pub bang: bool,
    /// Verbatim argument text, leading blanks stripped.
    pub args: String,
}

impl ParsedCommand {
    /// Parse one command line (without the introducing colon).
    pub fn from_line(input: &str) -> Result<ParsedCommand> {
        let mut sc = Scanner::new(input);
        let range = parse_range(&mut sc)?;

        let name = match sc.peek() {
            Some(c) if c.is_ascii_alphabetic() => sc
                .take_while(|c| c.is_ascii_alphabetic())
                .to_string(),
            Some(c) if COMMAND_STARTERS.contains(&c) && c != '!' => {
                sc.advance();
                c.to_string()
            }
            // A leading '!' is the filter command itself, not a bang.
            Some('!') => {
                sc.advance();
                "!".to_string()
            }
            _ => String::new(),
        };

        let bang = !name.is_empty() && name != "!" && sc.eat('!');
        sc.skip_blanks();
        let args = sc.rest().to_string();

        Ok(ParsedCommand {
            range,
            name,
            bang,
            args,
        })
    }
}
