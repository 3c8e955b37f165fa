//
// Copyright (c) 2025 the exline authors
//
// This file is part of the exline project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Error types for the command engine.

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, ExError>;

/// Errors reported by parsing, validation and range resolution.
///
/// Grammar violations are raised immediately by the parsers; command-policy
/// violations (`BangNotAllowed`, `RangeNotAllowed`, ...) are raised by the
/// post-parse validation pass, which reports only the first check that fails.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ExError {
    /// The typed name matches no registered command.
    #[error("not an editor command: {0}")]
    UnknownCommand(String),
    /// Leftover characters after a fully parsed argument list.
    #[error("trailing characters: {0}")]
    TrailingCharacters(String),
    /// The command does not accept a `!` modifier.
    #[error("no ! allowed")]
    BangNotAllowed,
    /// The command does not accept an address range.
    #[error("no range allowed")]
    RangeNotAllowed,
    /// Malformed or unresolvable address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    /// The command requires an address argument that was not supplied.
    #[error("address required")]
    AddressRequired,
    /// Malformed range, or a range that resolved backwards.
    #[error("invalid range: {0}")]
    InvalidRange(String),
    /// A search address found no matching line.
    #[error("pattern not found: {0}")]
    PatternNotFound(String),
    /// A search shorthand was used before any search established a pattern.
    #[error("no previous regular expression")]
    NoPreviousPattern,
    /// A substitute shorthand was used before any substitute ran.
    #[error("no previous substitute")]
    NoPreviousSubstitute,
    /// A pattern-taking command was invoked without a pattern delimiter.
    #[error("regular expression missing: {0}")]
    MissingPattern(String),
}
