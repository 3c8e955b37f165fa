//
// Copyright (c) 2025 the exline authors
//
// This file is part of the exline project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Filter-and-apply mini-grammar, used by global commands.
//!
//! The shape is `<delim>pattern<delim>subcommand`. Only the pattern is
//! delimiter-escaped; the subcommand runs verbatim to end of input and is
//! parsed later as a command line of its own. An empty subcommand is
//! legal and left for the handler to default.

use crate::error::{ExError, Result};
use crate::scanner::{scan_delimited, Scanner};

/// Parsed global arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalSpec {
    pub pattern: String,
    /// Subcommand text, verbatim; empty if none was given.
    pub command: String,
}

/// Parse the argument text of a global or vglobal command.
pub fn parse_global(args: &str) -> Result<GlobalSpec> {
    let mut sc = Scanner::new(args);
    sc.skip_blanks();

    let delim = match sc.peek() {
        Some(c) if !c.is_alphanumeric() && c != ' ' && c != '\t' => {
            sc.advance();
            c
        }
        _ => return Err(ExError::MissingPattern(args.to_string())),
    };

    let (pattern, _) = scan_delimited(&mut sc, delim);
    Ok(GlobalSpec {
        pattern,
        command: sc.rest().to_string(),
    })
}
