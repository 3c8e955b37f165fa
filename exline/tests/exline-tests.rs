//
// Copyright (c) 2025 the exline authors
//
// This file is part of the exline project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! End-to-end pipeline tests: raw command line through parse, dispatch
//! and resolution against a real buffer.

use exline::{
    dispatch, resolve_range, CommandArgs, CommandKind, ExError, LineBuffer, ParsedCommand,
    ResolvedRange, SessionState,
};

fn buffer() -> LineBuffer {
    let mut text = String::new();
    for i in 1..=50 {
        if i % 10 == 0 {
            text.push_str(&format!("TODO item {}\n", i));
        } else {
            text.push_str(&format!("line {}\n", i));
        }
    }
    let mut b = LineBuffer::from_text(&text);
    b.set_current(25);
    b
}

fn pipeline(
    line: &str,
    buf: &LineBuffer,
    session: &mut SessionState,
) -> Result<(CommandKind, ResolvedRange, CommandArgs), ExError> {
    let cmd = ParsedCommand::from_line(line)?;
    let inv = dispatch(&cmd)?;
    let range = resolve_range(&inv.range, buf, session)?;
    Ok((inv.kind, range, inv.args))
}

#[test]
fn print_with_absolute_range() {
    let buf = buffer();
    let mut s = SessionState::new();
    let (kind, range, args) = pipeline("10,20p", &buf, &mut s).unwrap();
    assert_eq!(kind, CommandKind::Print);
    assert_eq!(range, ResolvedRange::Lines(10, 20));
    assert_eq!(args, CommandArgs::None);
}

#[test]
fn whole_buffer_delete() {
    let buf = buffer();
    let mut s = SessionState::new();
    let (kind, range, _) = pipeline("%d", &buf, &mut s).unwrap();
    assert_eq!(kind, CommandKind::Delete);
    assert_eq!(range, ResolvedRange::Lines(1, 50));
}

#[test]
fn current_to_last() {
    let buf = buffer();
    let mut s = SessionState::new();
    let (kind, range, _) = pipeline(".,$d", &buf, &mut s).unwrap();
    assert_eq!(kind, CommandKind::Delete);
    assert_eq!(range, ResolvedRange::Lines(25, 50));
}

#[test]
fn comma_and_semicolon_differ() {
    // Current line is 25. With `,` the search starts at 25 and finds
    // line 30; with `;` it starts at the left side's line 10 and finds
    // line 20.
    let buf = buffer();
    let mut s = SessionState::new();
    let (_, comma, _) = pipeline("10,/TODO/p", &buf, &mut s).unwrap();
    assert_eq!(comma, ResolvedRange::Lines(10, 30));

    let (_, semi, _) = pipeline("10;/TODO/p", &buf, &mut s).unwrap();
    assert_eq!(semi, ResolvedRange::Lines(10, 20));
}

#[test]
fn search_establishes_session_pattern() {
    let buf = buffer();
    let mut s = SessionState::new();
    pipeline("/TODO/p", &buf, &mut s).unwrap();
    // Empty pattern now reuses TODO.
    let (_, range, _) = pipeline("//p", &buf, &mut s).unwrap();
    assert_eq!(range, ResolvedRange::Lines(30, 30));
}

#[test]
fn empty_pattern_without_history_fails() {
    let buf = buffer();
    let mut s = SessionState::new();
    assert!(matches!(
        pipeline("//p", &buf, &mut s),
        Err(ExError::NoPreviousPattern)
    ));
}

#[test]
fn substitute_end_to_end() {
    let buf = buffer();
    let mut s = SessionState::new();
    let (kind, range, args) = pipeline("1,5s/line/row/g", &buf, &mut s).unwrap();
    assert_eq!(kind, CommandKind::Substitute);
    assert_eq!(range, ResolvedRange::Lines(1, 5));
    match args {
        CommandArgs::Substitute(spec) => {
            assert_eq!(spec.pattern, "line");
            assert_eq!(spec.replacement, "row");
            assert_eq!(spec.flags, "g");
        }
        other => panic!("expected substitute args, got {:?}", other),
    }
}

#[test]
fn global_end_to_end() {
    let buf = buffer();
    let mut s = SessionState::new();
    let (kind, range, args) = pipeline("g/TODO/d", &buf, &mut s).unwrap();
    assert_eq!(kind, CommandKind::Global);
    assert_eq!(range, ResolvedRange::None);
    match args {
        CommandArgs::Global(g) => {
            assert_eq!(g.pattern, "TODO");
            assert_eq!(g.command, "d");
        }
        other => panic!("expected global args, got {:?}", other),
    }
}

#[test]
fn mark_roundtrip() {
    let mut buf = buffer();
    buf.set_mark('a', 5);
    buf.set_mark('b', 15);
    let mut s = SessionState::new();
    let (_, range, _) = pipeline("'a,'bp", &buf, &mut s).unwrap();
    assert_eq!(range, ResolvedRange::Lines(5, 15));
}

#[test]
fn resolution_is_repeatable() {
    let buf = buffer();
    let mut s = SessionState::new();
    let first = pipeline("10;/TODO/+1p", &buf, &mut s).unwrap().1;
    let second = pipeline("10;/TODO/+1p", &buf, &mut s).unwrap().1;
    assert_eq!(first, second);
    assert_eq!(first, ResolvedRange::Lines(10, 21));
}

#[test]
fn backward_search_address() {
    let buf = buffer();
    let mut s = SessionState::new();
    let (_, range, _) = pipeline("?TODO?p", &buf, &mut s).unwrap();
    assert_eq!(range, ResolvedRange::Lines(20, 20));
}

#[test]
fn errors_surface_once() {
    let buf = buffer();
    let mut s = SessionState::new();
    // Policy checks report exactly one violation.
    let err = pipeline("1,2q", &buf, &mut s).unwrap_err();
    assert_eq!(err, ExError::RangeNotAllowed);
    let err = pipeline("1,2p!", &buf, &mut s).unwrap_err();
    assert_eq!(err, ExError::BangNotAllowed);
}

#[test]
fn out_of_range_address() {
    let buf = buffer();
    let mut s = SessionState::new();
    assert!(matches!(
        pipeline("100,200p", &buf, &mut s),
        Err(ExError::InvalidAddress(_))
    ));
}

#[test]
fn unknown_command_reports_name() {
    let buf = buffer();
    let mut s = SessionState::new();
    match pipeline("frobnicate!", &buf, &mut s) {
        Err(ExError::UnknownCommand(name)) => assert_eq!(name, "frobnicate"),
        other => panic!("expected unknown command, got {:?}", other),
    }
}
