// Copyright 2026 the Keepsake Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the controller.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! the controller calls at each step. All method bodies default to no-ops, so
//! implementing only the events you care about is fine.
//!
//! [`Tracer`] owns an optional boxed `TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead) and
//! the sink is dropped on construction. When **on**, each method performs a
//! single `Option` branch before dispatching.
//!
//! Free-form diagnostics (warnings about missing capabilities, rejected
//! promises) go through the `log` facade instead; trace events are the
//! structured record of what the controller did.

use alloc::boxed::Box;

use crate::changes::Changes;
use crate::error::AudioOp;
use crate::session::SessionState;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which controller operation caused a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Initial presentation and audio availability.
    Mount,
    /// "Blow out candles" was pressed.
    BlowCandles,
    /// Music started after the candle fade-in.
    MusicStarted,
    /// The music button was pressed.
    ToggleMusic,
    /// "Play my surprise" was pressed.
    RequestSurprise,
    /// The surprise video reported it can play.
    SurpriseReady,
    /// The surprise video failed to load.
    SurpriseError,
    /// The page is going away for good; audio was torn down.
    Dispose,
}

/// Outcome of an audio-graph step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AudioEvent {
    /// The graph was constructed.
    Opened,
    /// No audio capability; music is permanently disabled.
    Unavailable,
    /// A source node was created for the media element.
    SourceBound,
    /// A bind found the element already bound; treated as success.
    SourceAlreadyBound,
    /// A suspended context was resumed.
    Resumed,
    /// A fade-in ramp was scheduled on the context clock.
    FadeScheduled {
        /// Context time at which the gain is zero.
        start: f64,
        /// Context time at which the gain reaches full.
        end: f64,
    },
    /// Gain was reset to full after having decayed.
    GainRestored,
    /// Playback started.
    Playing,
    /// Playback paused.
    Paused,
    /// A step failed and the operation was abandoned.
    Failed(AudioOp),
    /// Playback was rejected by the media element.
    PlayRejected,
    /// The graph was torn down.
    Disposed,
}

/// Outcome of a surprise-media step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaEvent {
    /// The video element was created.
    Mounted,
    /// Creating the video element failed.
    MountFailed,
    /// Autoplay started.
    PlaybackStarted,
    /// Autoplay was rejected; native controls remain available.
    PlaybackRejected,
    /// The video failed to load.
    LoadFailed,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted after every controller transition, including empty ones.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionEvent {
    /// What caused the transition.
    pub action: Action,
    /// State before.
    pub before: SessionState,
    /// State after.
    pub after: SessionState,
    /// Channels that changed.
    pub changes: Changes,
}

/// Emitted when the celebration is requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CelebrationEvent {
    /// Number of bursts actually fired.
    pub bursts: usize,
    /// Whether reduced motion suppressed the effect.
    pub reduced_motion: bool,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the controller.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about. Sinks must not call back into the
/// controller.
pub trait TraceSink {
    /// Called after a state transition.
    fn on_transition(&mut self, e: &TransitionEvent) {
        _ = e;
    }

    /// Called when the celebration is requested.
    fn on_celebration(&mut self, e: &CelebrationEvent) {
        _ = e;
    }

    /// Called after an audio-graph step.
    fn on_audio(&mut self, e: &AudioEvent) {
        _ = e;
    }

    /// Called after a surprise-media step.
    fn on_media(&mut self, e: &MediaEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Owner of an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing.
/// When **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
#[derive(Default)]
pub struct Tracer {
    #[cfg(feature = "trace")]
    sink: Option<Box<dyn TraceSink>>,
}

impl core::fmt::Debug for Tracer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl Tracer {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: Box<dyn TraceSink>) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            drop(sink);
            Self {}
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Emits a [`TransitionEvent`].
    #[inline]
    pub fn transition(&mut self, e: &TransitionEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_transition(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`CelebrationEvent`].
    #[inline]
    pub fn celebration(&mut self, e: &CelebrationEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_celebration(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`AudioEvent`].
    #[inline]
    pub fn audio(&mut self, e: &AudioEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_audio(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`MediaEvent`].
    #[inline]
    pub fn media(&mut self, e: &MediaEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_media(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
