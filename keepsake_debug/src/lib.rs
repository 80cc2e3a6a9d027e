// Copyright 2026 the Keepsake Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording and pretty-printing of keepsake controller traces.
//!
//! This crate provides [`TraceSink`](keepsake_core::trace::TraceSink)
//! implementations for development:
//!
//! - [`pretty::PrettyPrintSink`]: one human-readable line per event.
//! - [`recorder::RecorderSink`]: in-memory capture with JSON export.

pub mod pretty;
pub mod recorder;

use keepsake_core::changes::Changes;

/// Joins the set flag names of `changes` with `|`, or `-` when empty.
pub(crate) fn change_names(changes: Changes) -> String {
    if changes.is_empty() {
        return String::from("-");
    }
    changes
        .iter_names()
        .map(|(name, _)| name)
        .collect::<Vec<_>>()
        .join("|")
}
