//
// Copyright (c) 2025 the exline authors
//
// This file is part of the exline project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! exline: parser and range-resolution engine for ex-style colon commands.
//!
//! The crate turns a raw command line such as `'<,'>s/old/new/g` into a
//! validated invocation, and separately resolves its address range into
//! concrete line numbers against a host buffer queried through the
//! [`resolve::BufferContext`] trait. The concrete editing actions are the
//! host's business; this crate owns syntax, validation and resolution.

pub mod address;
pub mod buffer;
pub mod command;
pub mod error;
pub mod global;
pub mod resolve;
pub mod scanner;
pub mod session;
pub mod subst;
pub mod table;

pub use address::{parse_address, AddressRef, AddressSpec, RangeSpec, SearchOffset, Separator};
pub use buffer::LineBuffer;
pub use command::ParsedCommand;
pub use error::{ExError, Result};
pub use global::{parse_global, GlobalSpec};
pub use resolve::{resolve_address, resolve_range, BufferContext, ResolvedRange};
pub use scanner::Scanner;
pub use session::{SessionState, Substitution};
pub use subst::{parse_substitute, SubstituteSpec};
pub use table::{dispatch, CommandArgs, CommandKind, Invocation};
