// Copyright 2026 the Keepsake Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability contract for platform integrations.
//!
//! Keepsake splits browser-specific work into a *backend* crate. Each
//! backend provides the following pieces:
//!
//! - **Presenter**: Implements [`Presenter`] to apply state changes to the
//!   page (DOM elements on the web).
//!
//! - **Audio graph**: Implements [`AudioGraph`]: an audio-processing
//!   context with one gain node already connected to the output, plus the
//!   ability to bind a [`MediaElement`] as a source. The constructor is
//!   backend-specific and is handed to
//!   [`AudioHandle::init`](crate::audio::AudioHandle::init) as a closure,
//!   because probing for the capability differs per platform.
//!
//! - **Effects**: Implements [`CelebrationEffects`] on top of a particle
//!   renderer and the platform's reduced-motion preference.
//!
//! - **Surprise media**: Implements [`SurpriseMedia`]: a video element that
//!   is only created when first requested.
//!
//! # Asynchronous operations
//!
//! Context resume, context close and media `play()` complete later. Those
//! methods return `impl Future`; implementors may write them as `async fn`.
//! Futures are polled on the UI thread only, so no `Send` bound is required.
//!
//! # Detecting duplicate binding
//!
//! A media element can feed at most one source node for its whole lifetime.
//! How a platform reports a second attempt is platform-specific, so
//! recognising it is the backend's job: [`AudioGraph::bind_source`] must
//! return [`AudioError::AlreadyBound`] for that case and a different error
//! for anything else.

use core::future::Future;

use crate::changes::Changes;
use crate::effects::Burst;
use crate::error::{AudioError, MediaError};
use crate::session::SessionState;

/// Applies session changes to a platform-native page.
///
/// The controller calls this after every transition with a non-empty
/// [`Changes`] set, and once from
/// [`Controller::mount`](crate::controller::Controller::mount) with
/// [`Changes::all`].
pub trait Presenter {
    /// Applies the given changes, reading current values from `state`.
    fn apply(&mut self, state: &SessionState, changes: Changes);
}

/// Run state of an audio-processing context.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContextState {
    /// Not producing output; must be resumed before playback is audible.
    /// Browsers start here under autoplay restrictions.
    Suspended,
    /// Producing output.
    Running,
    /// Closed; no further use is possible.
    Closed,
}

/// An audio-processing context with a single gain node wired to the output.
///
/// Times are in seconds on the context's own clock.
pub trait AudioGraph {
    /// The media element type this graph can take as a source.
    type Media: MediaElement + Clone;

    /// Current run state of the context.
    fn context_state(&self) -> ContextState;

    /// Resumes a suspended context.
    fn resume(&self) -> impl Future<Output = Result<(), AudioError>>;

    /// Current time of the context clock.
    fn current_time(&self) -> f64;

    /// Current value of the gain parameter.
    fn gain(&self) -> f32;

    /// Schedules the gain to jump to `value` at `time`.
    fn set_gain_at(&self, value: f32, time: f64) -> Result<(), AudioError>;

    /// Schedules a linear gain ramp ending at `value` at `end_time`.
    fn ramp_gain_to(&self, value: f32, end_time: f64) -> Result<(), AudioError>;

    /// Creates a source node for `media` and connects it to the gain node.
    ///
    /// Returns [`AudioError::AlreadyBound`] if the element already feeds a
    /// source node.
    fn bind_source(&self, media: &Self::Media) -> Result<(), AudioError>;

    /// Disconnects the source node, if one was created by this graph.
    fn disconnect_source(&self) -> Result<(), AudioError>;

    /// Disconnects the gain node from the output.
    fn disconnect_gain(&self) -> Result<(), AudioError>;

    /// Closes the context, releasing platform audio resources.
    fn close(&self) -> impl Future<Output = Result<(), AudioError>>;
}

/// A playable media element.
pub trait MediaElement {
    /// Starts or resumes playback from the current position.
    fn play(&self) -> impl Future<Output = Result<(), MediaError>>;

    /// Pauses playback, keeping the current position.
    fn pause(&self) -> Result<(), MediaError>;
}

/// Fire-and-forget celebration renderer.
pub trait CelebrationEffects {
    /// Returns `true` if the user asked for reduced motion.
    fn prefers_reduced_motion(&self) -> bool;

    /// Renders one particle burst. Never awaited, never fails.
    fn burst(&self, burst: &Burst);
}

/// A video element that is only created when first requested.
///
/// The backend reports load progress back to the controller as
/// [`SurpriseSignal`](crate::session::SurpriseSignal)s.
pub trait SurpriseMedia: MediaElement {
    /// Creates the element and starts loading. Repeat calls are no-ops.
    fn mount(&self) -> Result<(), MediaError>;
}
