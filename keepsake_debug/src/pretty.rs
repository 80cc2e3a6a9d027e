// Copyright 2026 the Keepsake Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use keepsake_core::session::SessionState;
use keepsake_core::trace::{
    AudioEvent, CelebrationEvent, MediaEvent, TraceSink, TransitionEvent,
};

use crate::change_names;

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn state_summary(s: &SessionState) -> String {
    format!(
        "candles_blown={} music={} audio={} surprise={:?}",
        s.candles_blown(),
        s.music_playing(),
        s.audio_available(),
        s.surprise(),
    )
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_transition(&mut self, e: &TransitionEvent) {
        let _ = writeln!(
            self.writer,
            "[transition] {:?} changes={} {}",
            e.action,
            change_names(e.changes),
            state_summary(&e.after),
        );
    }

    fn on_celebration(&mut self, e: &CelebrationEvent) {
        let _ = writeln!(
            self.writer,
            "[celebration] bursts={} reduced_motion={}",
            e.bursts, e.reduced_motion,
        );
    }

    fn on_audio(&mut self, e: &AudioEvent) {
        let _ = match e {
            AudioEvent::FadeScheduled { start, end } => {
                writeln!(self.writer, "[audio] fade {start:.3}s -> {end:.3}s")
            }
            AudioEvent::Failed(op) => writeln!(self.writer, "[audio] FAILED {op}"),
            other => writeln!(self.writer, "[audio] {other:?}"),
        };
    }

    fn on_media(&mut self, e: &MediaEvent) {
        let _ = writeln!(self.writer, "[media] {e:?}");
    }
}
