//
// Copyright (c) 2025 the exline authors
//
// This file is part of the exline project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Range resolution.
//!
//! Resolution maps a parsed [`RangeSpec`] onto concrete line numbers using
//! only the narrow buffer query interface below. Per side: the reference
//! gives a base line, the numeric offset is added (a missing reference
//! with an offset means "absolute from line 0"), and search offsets fold
//! left to right, each starting from the previous result. `%` bypasses
//! all of this and yields `(1, last)`.
//!
//! Line 0 is a valid resolved address and means "before line 1"; handlers
//! that cannot insert there reject it themselves.

use crate::address::{AddressRef, AddressSpec, Direction, RangeSpec, Separator};
use crate::error::{ExError, Result};
use crate::session::SessionState;

/// Buffer queries the resolver needs. The host buffer owns line storage,
/// marks and pattern matching; the engine never sees text directly.
pub trait BufferContext {
    /// Current line number (1-indexed; 0 for an empty buffer).
    fn current_line(&self) -> usize;
    /// Last line number (equals the line count).
    fn last_line(&self) -> usize;
    /// Line a mark points at, if the mark is set.
    fn mark_line(&self, mark: char) -> Option<usize>;
    /// First line matching `pattern` after `from_line`.
    fn search_forward(&self, pattern: &str, from_line: usize) -> Option<usize>;
    /// Last line matching `pattern` before `before_line`.
    fn search_backward(&self, pattern: &str, before_line: usize) -> Option<usize>;
}

/// Outcome of resolving a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedRange {
    /// The command line carried no range at all.
    None,
    /// Concrete start and end lines, start <= end.
    Lines(usize, usize),
}

/// Resolve a parsed range against a buffer.
///
/// With `,` both sides resolve independently from the original current
/// line; with `;` the left result becomes the current line for the right
/// side. An empty side defaults to the current line, or mirrors the left
/// side when it sits right of a separator.
pub fn resolve_range(
    spec: &RangeSpec,
    ctx: &impl BufferContext,
    session: &mut SessionState,
) -> Result<ResolvedRange> {
    if spec.is_empty() {
        return Ok(ResolvedRange::None);
    }

    if spec.left.reference == AddressRef::WholeBuffer
        || spec.right.reference == AddressRef::WholeBuffer
    {
        let last = ctx.last_line();
        if last == 0 {
            return Err(ExError::InvalidAddress("buffer is empty".to_string()));
        }
        return Ok(ResolvedRange::Lines(1, last));
    }

    let current = ctx.current_line();
    let left = resolve_side(&spec.left, ctx, session, current)?;

    let (start, end) = match spec.separator {
        None => {
            let line = left.unwrap_or(current);
            (line, line)
        }
        Some(sep) => {
            let start = left.unwrap_or(current);
            let base = match sep {
                Separator::Comma => current,
                Separator::Semicolon => start,
            };
            let end = resolve_side(&spec.right, ctx, session, base)?.unwrap_or(start);
            (start, end)
        }
    };

    if start > end {
        return Err(ExError::InvalidRange(format!(
            "start {} is past end {}",
            start, end
        )));
    }
    Ok(ResolvedRange::Lines(start, end))
}

/// Resolve a standalone address (e.g. a copy/move destination) to one
/// line, defaulting to the current line when the address is empty.
pub fn resolve_address(
    spec: &AddressSpec,
    ctx: &impl BufferContext,
    session: &mut SessionState,
) -> Result<usize> {
    if spec.reference == AddressRef::WholeBuffer {
        return Err(ExError::InvalidAddress("'%' is not a line".to_string()));
    }
    let current = ctx.current_line();
    Ok(resolve_side(spec, ctx, session, current)?.unwrap_or(current))
}

/// Resolve one side to a line number, or `None` if the side is empty.
/// `current` is the current-line context for this side, which differs
/// between the two sides of a `;` range.
fn resolve_side(
    side: &AddressSpec,
    ctx: &impl BufferContext,
    session: &mut SessionState,
    current: usize,
) -> Result<Option<usize>> {
    let last = ctx.last_line() as i64;

    let mut line: Option<i64> = match side.reference {
        AddressRef::None => None,
        AddressRef::CurrentLine => Some(current as i64),
        AddressRef::LastLine => Some(last),
        AddressRef::Mark(m) => Some(
            ctx.mark_line(m)
                .ok_or_else(|| ExError::InvalidAddress(format!("mark '{}' not set", m)))?
                as i64,
        ),
        AddressRef::WholeBuffer => {
            return Err(ExError::InvalidRange("'%' in address position".to_string()))
        }
    };

    if let Some(off) = side.offset {
        line = Some(line.unwrap_or(0) + off);
    }

    for search in &side.searches {
        let base = line.unwrap_or(current as i64);
        if base < 0 || base > last {
            return Err(ExError::InvalidAddress(format!(
                "search from line {} out of range",
                base
            )));
        }
        let pattern: String = if search.pattern.is_empty() {
            session
                .last_search()
                .ok_or(ExError::NoPreviousPattern)?
                .to_string()
        } else {
            session.note_search(&search.pattern);
            search.pattern.clone()
        };
        let hit = match search.direction {
            Direction::Forward => ctx.search_forward(&pattern, base as usize),
            Direction::Backward => ctx.search_backward(&pattern, base as usize),
        }
        .ok_or(ExError::PatternNotFound(pattern))?;
        line = Some(hit as i64 + search.offset);
    }

    match line {
        None => Ok(None),
        Some(n) if n < 0 || n > last => Err(ExError::InvalidAddress(format!(
            "line {} out of range",
            n
        ))),
        Some(n) => Ok(Some(n as usize)),
    }
}
