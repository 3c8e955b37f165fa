//
// Copyright (c) 2025 the exline authors
//
// This file is part of the exline project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Per-session memory of the last search and substitute.
//!
//! The engine never keeps process-wide globals; callers own a
//! `SessionState` and pass it wherever shorthand forms may elide a
//! pattern. It starts empty, is updated whenever a search or substitute
//! supplies an explicit pattern, and is read whenever one is omitted.
//! Last writer wins; nothing expires.

/// Remembered fields of the most recent substitute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub pattern: String,
    pub replacement: String,
    pub flags: String,
}

/// Mutable per-session state.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    last_search: Option<String>,
    last_substitute: Option<Substitution>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the pattern of a search that is about to run.
    pub fn note_search(&mut self, pattern: &str) {
        self.last_search = Some(pattern.to_string());
    }

    pub fn last_search(&self) -> Option<&str> {
        self.last_search.as_deref()
    }

    /// Record a fully specified substitute. Its pattern also becomes the
    /// last search pattern, so `//` after `:s/foo/bar/` finds `foo`.
    pub fn note_substitute(&mut self, pattern: &str, replacement: &str, flags: &str) {
        self.last_search = Some(pattern.to_string());
        self.last_substitute = Some(Substitution {
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
            flags: flags.to_string(),
        });
    }

    pub fn last_substitute(&self) -> Option<&Substitution> {
        self.last_substitute.as_ref()
    }
}
