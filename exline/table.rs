//
// Copyright (c) 2025 the exline authors
//
// This file is part of the exline project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Command table and dispatcher.
//!
//! The table maps typed names to descriptors by prefix matching over a
//! fixed registration order: an exact match on any registered spelling
//! wins outright, otherwise the first descriptor (in table order) with a
//! spelling the typed text prefixes is chosen. Validation then runs the
//! descriptor's policy checks in declaration order, reporting the first
//! violation only, and finally its argument matchers in order with the
//! first structural match winning.

use crate::address::{parse_address, AddressSpec, RangeSpec};
use crate::command::ParsedCommand;
use crate::error::{ExError, Result};
use crate::global::{parse_global, GlobalSpec};
use crate::subst::{parse_substitute, SubstituteSpec};

/// Which handler a command line dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Goto,
    Print,
    Number,
    List,
    Delete,
    Yank,
    Put,
    Copy,
    Move,
    Join,
    Mark,
    Substitute,
    SubstituteRepeat,
    Global,
    VGlobal,
    Write,
    WriteQuit,
    Exit,
    Quit,
    Edit,
    Read,
    File,
    LineNumber,
    Filter,
    ShiftLeft,
    ShiftRight,
}

/// Structural argument matchers. Tried in descriptor order; the first one
/// that matches produces the command's [`CommandArgs`]. A matcher that
/// fails falls through to the next, and only the last matcher's error is
/// reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArgPattern {
    /// No argument text at all.
    Empty,
    /// A bare repeat count.
    Count,
    /// A destination address (copy/move target).
    Target,
    /// Substitute mini-grammar, long or short form.
    Subst,
    /// Filter mini-grammar (`<delim>pattern<delim>subcommand`).
    Pattern,
    /// A single mark name.
    MarkName,
    /// A file path, possibly empty (defaults to the current file).
    Path,
    /// Verbatim text through end of line.
    Text,
}

/// Per-command policy checks, evaluated before argument matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Check {
    NoBang,
    NoRange,
    RangeRequired,
}

struct CommandDescriptor {
    kind: CommandKind,
    /// Accepted spellings, canonical name first.
    names: &'static [&'static str],
    checks: &'static [Check],
    patterns: &'static [ArgPattern],
}

/// Registration order is the prefix-match tie-break order, so the common
/// single-letter commands sit before rarer names sharing their initial.
static COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor {
        kind: CommandKind::Goto,
        names: &[""],
        checks: &[Check::NoBang, Check::RangeRequired],
        patterns: &[ArgPattern::Empty],
    },
    CommandDescriptor {
        kind: CommandKind::Print,
        names: &["print", "p"],
        checks: &[Check::NoBang],
        patterns: &[ArgPattern::Empty, ArgPattern::Count],
    },
    CommandDescriptor {
        kind: CommandKind::Number,
        names: &["number", "nu", "#"],
        checks: &[Check::NoBang],
        patterns: &[ArgPattern::Empty, ArgPattern::Count],
    },
    CommandDescriptor {
        kind: CommandKind::List,
        names: &["list", "l"],
        checks: &[Check::NoBang],
        patterns: &[ArgPattern::Empty, ArgPattern::Count],
    },
    CommandDescriptor {
        kind: CommandKind::Delete,
        names: &["delete", "d"],
        checks: &[Check::NoBang],
        patterns: &[ArgPattern::Empty, ArgPattern::Count],
    },
    CommandDescriptor {
        kind: CommandKind::Yank,
        names: &["yank", "ya"],
        checks: &[Check::NoBang],
        patterns: &[ArgPattern::Empty, ArgPattern::Count],
    },
    CommandDescriptor {
        kind: CommandKind::Put,
        names: &["put", "pu"],
        checks: &[Check::NoBang],
        patterns: &[ArgPattern::Empty],
    },
    CommandDescriptor {
        kind: CommandKind::Copy,
        names: &["copy", "co", "t"],
        checks: &[Check::NoBang],
        patterns: &[ArgPattern::Target],
    },
    CommandDescriptor {
        kind: CommandKind::Move,
        names: &["move", "m"],
        checks: &[Check::NoBang],
        patterns: &[ArgPattern::Target],
    },
    CommandDescriptor {
        kind: CommandKind::Join,
        names: &["join", "j"],
        checks: &[],
        patterns: &[ArgPattern::Empty, ArgPattern::Count],
    },
    CommandDescriptor {
        kind: CommandKind::Mark,
        names: &["mark", "ma", "k"],
        checks: &[Check::NoBang],
        patterns: &[ArgPattern::MarkName],
    },
    CommandDescriptor {
        kind: CommandKind::Substitute,
        names: &["substitute", "s"],
        checks: &[],
        patterns: &[ArgPattern::Subst],
    },
    CommandDescriptor {
        kind: CommandKind::SubstituteRepeat,
        names: &["&"],
        checks: &[Check::NoBang],
        patterns: &[ArgPattern::Subst],
    },
    CommandDescriptor {
        kind: CommandKind::Global,
        names: &["global", "g"],
        checks: &[],
        patterns: &[ArgPattern::Pattern],
    },
    CommandDescriptor {
        kind: CommandKind::VGlobal,
        names: &["vglobal", "v"],
        checks: &[Check::NoBang],
        patterns: &[ArgPattern::Pattern],
    },
    CommandDescriptor {
        kind: CommandKind::Write,
        names: &["write", "w"],
        checks: &[],
        patterns: &[ArgPattern::Path],
    },
    CommandDescriptor {
        kind: CommandKind::WriteQuit,
        names: &["wq"],
        checks: &[],
        patterns: &[ArgPattern::Path],
    },
    CommandDescriptor {
        kind: CommandKind::Exit,
        names: &["xit", "x"],
        checks: &[],
        patterns: &[ArgPattern::Path],
    },
    CommandDescriptor {
        kind: CommandKind::Quit,
        names: &["quit", "q"],
        checks: &[Check::NoRange],
        patterns: &[ArgPattern::Empty],
    },
    CommandDescriptor {
        kind: CommandKind::Edit,
        names: &["edit", "e"],
        checks: &[Check::NoRange],
        patterns: &[ArgPattern::Path],
    },
    CommandDescriptor {
        kind: CommandKind::Read,
        names: &["read", "r"],
        checks: &[],
        patterns: &[ArgPattern::Path],
    },
    CommandDescriptor {
        kind: CommandKind::File,
        names: &["file", "f"],
        checks: &[Check::NoRange],
        patterns: &[ArgPattern::Path],
    },
    CommandDescriptor {
        kind: CommandKind::LineNumber,
        names: &["="],
        checks: &[Check::NoBang],
        patterns: &[ArgPattern::Empty],
    },
    CommandDescriptor {
        kind: CommandKind::Filter,
        names: &["!"],
        checks: &[Check::NoBang],
        patterns: &[ArgPattern::Text],
    },
    CommandDescriptor {
        kind: CommandKind::ShiftLeft,
        names: &["<"],
        checks: &[Check::NoBang],
        patterns: &[ArgPattern::Empty, ArgPattern::Count],
    },
    CommandDescriptor {
        kind: CommandKind::ShiftRight,
        names: &[">"],
        checks: &[Check::NoBang],
        patterns: &[ArgPattern::Empty, ArgPattern::Count],
    },
];

/// Structurally matched argument payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandArgs {
    None,
    Count(usize),
    Target(AddressSpec),
    Substitute(SubstituteSpec),
    Global(GlobalSpec),
    Mark(char),
    Path(String),
    Text(String),
}

/// A fully validated command, ready for resolution and execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub kind: CommandKind,
    pub bang: bool,
    pub range: RangeSpec,
    pub args: CommandArgs,
}

fn lookup(name: &str) -> Result<&'static CommandDescriptor> {
    // Empty typed text prefixes everything; it only ever means goto.
    if name.is_empty() {
        return Ok(&COMMANDS[0]);
    }
    let mut partial: Option<&CommandDescriptor> = None;
    for desc in COMMANDS {
        for spelling in desc.names {
            if *spelling == name {
                return Ok(desc);
            }
            if partial.is_none() && spelling.starts_with(name) {
                partial = Some(desc);
            }
        }
    }
    partial.ok_or_else(|| ExError::UnknownCommand(name.to_string()))
}

fn match_args(patterns: &[ArgPattern], args: &str) -> Result<CommandArgs> {
    let mut last_err = ExError::TrailingCharacters(args.to_string());
    for (i, pattern) in patterns.iter().enumerate() {
        match try_pattern(*pattern, args) {
            Ok(matched) => return Ok(matched),
            Err(e) => {
                if i == patterns.len() - 1 {
                    last_err = e;
                }
            }
        }
    }
    Err(last_err)
}

fn try_pattern(pattern: ArgPattern, args: &str) -> Result<CommandArgs> {
    match pattern {
        ArgPattern::Empty => {
            if args.is_empty() {
                Ok(CommandArgs::None)
            } else {
                Err(ExError::TrailingCharacters(args.to_string()))
            }
        }
        ArgPattern::Count => {
            if !args.is_empty() && args.chars().all(|c| c.is_ascii_digit()) {
                let n = args
                    .parse()
                    .map_err(|_| ExError::TrailingCharacters(args.to_string()))?;
                Ok(CommandArgs::Count(n))
            } else {
                Err(ExError::TrailingCharacters(args.to_string()))
            }
        }
        ArgPattern::Target => {
            let spec = parse_address(args)?;
            if spec.is_empty() {
                return Err(ExError::AddressRequired);
            }
            Ok(CommandArgs::Target(spec))
        }
        ArgPattern::Subst => Ok(CommandArgs::Substitute(parse_substitute(args)?)),
        ArgPattern::Pattern => Ok(CommandArgs::Global(parse_global(args)?)),
        ArgPattern::MarkName => {
            let mut chars = args.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphabetic() || c == '<' || c == '>' => {
                    Ok(CommandArgs::Mark(c))
                }
                (Some(_), None) => {
                    Err(ExError::InvalidAddress(format!("invalid mark: {}", args)))
                }
                _ => Err(ExError::TrailingCharacters(args.to_string())),
            }
        }
        ArgPattern::Path => Ok(CommandArgs::Path(args.to_string())),
        ArgPattern::Text => Ok(CommandArgs::Text(args.to_string())),
    }
}

/// Validate a parsed command against the table and build its invocation.
pub fn dispatch(cmd: &ParsedCommand) -> Result<Invocation> {
    let desc = lookup(&cmd.name)?;

    for check in desc.checks {
        match check {
            Check::NoBang if cmd.bang => return Err(ExError::BangNotAllowed),
            Check::NoRange if !cmd.range.is_empty() => return Err(ExError::RangeNotAllowed),
            Check::RangeRequired if cmd.range.is_empty() => {
                return Err(ExError::AddressRequired)
            }
            _ => {}
        }
    }

    let args = match_args(desc.patterns, &cmd.args)?;
    Ok(Invocation {
        kind: desc.kind,
        bang: cmd.bang,
        range: cmd.range.clone(),
        args,
    })
}
