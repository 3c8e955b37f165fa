//
// Copyright (c) 2025 the exline authors
//
// This file is part of the exline project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! exline - inspect ex-style command lines against a file
//!
//! Reads colon commands from stdin and runs the parse/dispatch/resolve
//! pipeline against the loaded file. Display commands print buffer text;
//! everything else is reported in parsed, resolved form without touching
//! the file. Useful for exploring the address grammar interactively.

use std::fs;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;

use exline::{
    dispatch, resolve_address, resolve_range, BufferContext, CommandArgs, CommandKind, ExError,
    Invocation, LineBuffer, ParsedCommand, ResolvedRange, SessionState,
};

/// exline - inspect ex-style command lines against a file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Use string as the command prompt
    #[arg(short, long, default_value = ":")]
    prompt: String,

    /// File to load into the buffer
    file: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let buffer = match &args.file {
        Some(path) => match fs::read_to_string(path) {
            Ok(text) => LineBuffer::from_text(&text),
            Err(e) => {
                eprintln!("exline: {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => LineBuffer::from_text(""),
    };

    let mut driver = Driver {
        buffer,
        session: SessionState::new(),
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        let line = line.strip_prefix(':').unwrap_or(&line);
        match driver.run(line) {
            Ok(Outcome::Continue) => {}
            Ok(Outcome::Quit) => break,
            Err(e) => println!("?  {}", e),
        }
        print!("{}", args.prompt);
        let _ = stdout.flush();
    }
    ExitCode::SUCCESS
}

enum Outcome {
    Continue,
    Quit,
}

struct Driver {
    buffer: LineBuffer,
    session: SessionState,
}

impl Driver {
    fn run(&mut self, line: &str) -> Result<Outcome, ExError> {
        let cmd = ParsedCommand::from_line(line)?;
        let inv = dispatch(&cmd)?;
        let range = resolve_range(&inv.range, &self.buffer, &mut self.session)?;

        match inv.kind {
            CommandKind::Quit => return Ok(Outcome::Quit),
            CommandKind::Goto => {
                if let ResolvedRange::Lines(_, end) = range {
                    self.buffer.set_current(end);
                    self.print_lines(end, end, false);
                }
            }
            CommandKind::Print | CommandKind::List => {
                let (start, end) = self.span(range);
                self.print_lines(start, end, false);
            }
            CommandKind::Number => {
                let (start, end) = self.span(range);
                self.print_lines(start, end, true);
            }
            CommandKind::LineNumber => {
                let line = match range {
                    ResolvedRange::Lines(_, end) => end,
                    ResolvedRange::None => self.buffer.last_line(),
                };
                println!("{}", line);
            }
            CommandKind::Mark => {
                if let CommandArgs::Mark(m) = &inv.args {
                    let (_, end) = self.span(range);
                    self.buffer.set_mark(*m, end);
                }
            }
            _ => self.report(&inv, range)?,
        }
        Ok(Outcome::Continue)
    }

    fn span(&self, range: ResolvedRange) -> (usize, usize) {
        match range {
            ResolvedRange::Lines(start, end) => (start, end),
            ResolvedRange::None => {
                let cur = self.buffer.current_line();
                (cur, cur)
            }
        }
    }

    fn print_lines(&mut self, start: usize, end: usize, numbered: bool) {
        for n in start.max(1)..=end {
            if let Some(text) = self.buffer.line(n) {
                if numbered {
                    println!("{:6}  {}", n, text);
                } else {
                    println!("{}", text);
                }
            }
        }
        self.buffer.set_current(end);
    }

    /// Dry-run report for commands this driver does not execute.
    fn report(&mut self, inv: &Invocation, range: ResolvedRange) -> Result<(), ExError> {
        let span = match range {
            ResolvedRange::Lines(start, end) => format!("lines {},{}", start, end),
            ResolvedRange::None => "no range".to_string(),
        };
        match &inv.args {
            CommandArgs::Target(spec) => {
                let dest = resolve_address(spec, &self.buffer, &mut self.session)?;
                println!("{:?}{} {} -> line {}", inv.kind, bang(inv), span, dest);
            }
            CommandArgs::Substitute(s) => {
                let (pattern, replacement, flags) = if s.pattern.is_empty() {
                    let prev = self
                        .session
                        .last_substitute()
                        .ok_or(ExError::NoPreviousSubstitute)?;
                    (
                        prev.pattern.clone(),
                        prev.replacement.clone(),
                        format!("{}{}", prev.flags, s.flags),
                    )
                } else {
                    (s.pattern.clone(), s.replacement.clone(), s.flags.clone())
                };
                println!(
                    "{:?}{} {} /{}/{}/{} {}",
                    inv.kind,
                    bang(inv),
                    span,
                    pattern,
                    replacement,
                    flags,
                    s.count
                );
                self.session.note_substitute(&pattern, &replacement, &flags);
            }
            CommandArgs::Global(g) => {
                println!(
                    "{:?}{} {} /{}/ then {:?}",
                    inv.kind,
                    bang(inv),
                    span,
                    g.pattern,
                    g.command
                );
                if !g.pattern.is_empty() {
                    self.session.note_search(&g.pattern);
                }
            }
            args => println!("{:?}{} {} {:?}", inv.kind, bang(inv), span, args),
        }
        Ok(())
    }
}

fn bang(inv: &Invocation) -> &'static str {
    if inv.bang {
        "!"
    } else {
        ""
    }
}
