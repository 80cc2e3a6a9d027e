// Copyright 2026 the Keepsake Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording and JSON export.
//!
//! [`RecorderSink`] implements [`TraceSink`] and appends every event to a
//! shared buffer. The sink is a cheap handle: keep one clone for inspection
//! and hand another to [`Tracer::new`](keepsake_core::trace::Tracer::new).
//!
//! [`RecorderSink::to_json`] renders the recording as a JSON array, one
//! object per event, tagged by `"kind"`.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use keepsake_core::session::SessionState;
use keepsake_core::trace::{
    AudioEvent, CelebrationEvent, MediaEvent, TraceSink, TransitionEvent,
};
use serde_json::{Value, json};

use crate::change_names;

/// A decoded trace event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A state transition.
    Transition(TransitionEvent),
    /// A celebration request.
    Celebration(CelebrationEvent),
    /// An audio-graph step.
    Audio(AudioEvent),
    /// A surprise-media step.
    Media(MediaEvent),
}

impl RecordedEvent {
    /// Renders this event as a JSON object.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Transition(e) => json!({
                "kind": "transition",
                "action": format!("{:?}", e.action),
                "changes": change_names(e.changes),
                "before": state_json(&e.before),
                "after": state_json(&e.after),
            }),
            Self::Celebration(e) => json!({
                "kind": "celebration",
                "bursts": e.bursts,
                "reduced_motion": e.reduced_motion,
            }),
            Self::Audio(AudioEvent::FadeScheduled { start, end }) => json!({
                "kind": "audio",
                "event": "FadeScheduled",
                "start": start,
                "end": end,
            }),
            Self::Audio(AudioEvent::Failed(op)) => json!({
                "kind": "audio",
                "event": "Failed",
                "op": op.to_string(),
            }),
            Self::Audio(e) => json!({
                "kind": "audio",
                "event": format!("{e:?}"),
            }),
            Self::Media(e) => json!({
                "kind": "media",
                "event": format!("{e:?}"),
            }),
        }
    }
}

fn state_json(s: &SessionState) -> Value {
    json!({
        "candles_blown": s.candles_blown(),
        "music_playing": s.music_playing(),
        "audio_available": s.audio_available(),
        "surprise": format!("{:?}", s.surprise()),
    })
}

/// A [`TraceSink`] that records events into a shared in-memory buffer.
#[derive(Clone, Debug, Default)]
pub struct RecorderSink {
    events: Rc<RefCell<Vec<RecordedEvent>>>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.borrow().clone()
    }

    /// Returns the number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Discards all recorded events.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    /// Renders the recording as a JSON array.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Array(self.events.borrow().iter().map(RecordedEvent::to_json).collect())
    }

    /// Writes the recording as pretty-printed JSON.
    pub fn write_json(&self, writer: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, &self.to_json())?;
        writeln!(writer)
    }

    fn push(&self, event: RecordedEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl TraceSink for RecorderSink {
    fn on_transition(&mut self, e: &TransitionEvent) {
        self.push(RecordedEvent::Transition(*e));
    }

    fn on_celebration(&mut self, e: &CelebrationEvent) {
        self.push(RecordedEvent::Celebration(*e));
    }

    fn on_audio(&mut self, e: &AudioEvent) {
        self.push(RecordedEvent::Audio(*e));
    }

    fn on_media(&mut self, e: &MediaEvent) {
        self.push(RecordedEvent::Media(*e));
    }
}
