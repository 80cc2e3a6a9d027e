// Copyright 2026 the Keepsake Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Owned audio-graph lifecycle.
//!
//! [`AudioHandle`] wraps a backend [`AudioGraph`] (context plus one gain node
//! wired to the output) and the looping media element that feeds it:
//!
//! ```text
//!   media element ──► source ──► gain ──► output
//!                      ▲
//!                      └── bound at most once per element
//! ```
//!
//! The handle is created by [`init`](AudioHandle::init), which either holds
//! a graph or is permanently disabled, and torn down by
//! [`dispose`](AudioHandle::dispose). All methods take `&self`; state lives
//! in `Cell`s so the handle can be shared by concurrently pending controller
//! futures without holding a borrow across an await point.

use core::cell::{Cell, RefCell};

use log::{debug, error, warn};

use crate::backend::{AudioGraph, ContextState, MediaElement};
use crate::config::AudioConfig;
use crate::error::{AudioError, MediaError};

/// Whether the media element has been bound into the graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SourceBinding {
    /// No source node yet.
    #[default]
    Unbound,
    /// The element feeds the gain node.
    Bound,
}

/// Result of a successful [`AudioHandle::bind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BindOutcome {
    /// This call created the source node.
    Created,
    /// An earlier call already bound the element.
    Existing,
    /// The platform reported the element was already bound.
    AlreadyBound,
}

/// Owned audio graph with an explicit `init`/`dispose` lifecycle.
pub struct AudioHandle<G: AudioGraph> {
    graph: Option<G>,
    media: RefCell<Option<G::Media>>,
    binding: Cell<SourceBinding>,
    disposed: Cell<bool>,
    config: AudioConfig,
}

impl<G: AudioGraph> core::fmt::Debug for AudioHandle<G> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AudioHandle")
            .field("graph", &self.graph.is_some())
            .field("media", &self.media.borrow().is_some())
            .field("binding", &self.binding.get())
            .field("disposed", &self.disposed.get())
            .field("config", &self.config)
            .finish()
    }
}

impl<G: AudioGraph> AudioHandle<G> {
    /// Probes for the audio capability and constructs the graph.
    ///
    /// `open` is the backend constructor. It must create the context and the
    /// gain node and connect the gain node to the output exactly once.
    /// [`AudioError::Unsupported`] disables the handle permanently with a
    /// warning; any other error disables it with an error log.
    pub fn init(config: AudioConfig, open: impl FnOnce() -> Result<G, AudioError>) -> Self {
        let graph = match open() {
            Ok(graph) => Some(graph),
            Err(AudioError::Unsupported) => {
                warn!("audio processing is not supported; music is disabled");
                None
            }
            Err(err) => {
                error!("failed to create audio graph: {err}");
                None
            }
        };
        Self {
            graph,
            media: RefCell::new(None),
            binding: Cell::new(SourceBinding::Unbound),
            disposed: Cell::new(false),
            config,
        }
    }

    /// Creates a handle with no audio capability.
    #[must_use]
    pub fn disabled(config: AudioConfig) -> Self {
        Self::init(config, || Err(AudioError::Unsupported))
    }

    /// Returns `true` if the graph exists and has not been disposed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.graph.is_some() && !self.disposed.get()
    }

    /// Current source binding.
    #[must_use]
    pub fn binding(&self) -> SourceBinding {
        self.binding.get()
    }

    /// Returns the graph, if any.
    #[must_use]
    pub fn graph(&self) -> Option<&G> {
        self.graph.as_ref()
    }

    /// Hands the media element to the handle and binds it as soon as both
    /// the graph and the element exist.
    ///
    /// Attaching again replaces the element; the replacement is bound on its
    /// own. A bind failure here is logged; the play paths retry through
    /// [`bind`](Self::bind).
    pub fn attach(&self, media: G::Media) {
        if self.media.replace(Some(media)).is_some() {
            self.binding.set(SourceBinding::Unbound);
        }
        if !self.is_ready() {
            return;
        }
        if let Err(err) = self.bind() {
            error!("failed to bind media element to audio graph: {err}");
        }
    }

    /// Binds the media element into the graph, at most once.
    ///
    /// Idempotent: once bound, further calls return
    /// [`BindOutcome::Existing`]. A platform report that the element is
    /// already bound is treated as success.
    pub fn bind(&self) -> Result<BindOutcome, AudioError> {
        if self.binding.get() == SourceBinding::Bound {
            return Ok(BindOutcome::Existing);
        }
        let graph = self.live_graph()?;
        let media = self.media.borrow();
        let media = media.as_ref().ok_or(AudioError::NotReady)?;
        let outcome = match graph.bind_source(media) {
            Ok(()) => BindOutcome::Created,
            Err(AudioError::AlreadyBound) => {
                debug!("media element already bound; reusing existing source");
                BindOutcome::AlreadyBound
            }
            Err(err) => return Err(err),
        };
        self.binding.set(SourceBinding::Bound);
        Ok(outcome)
    }

    /// Resumes the context if it is suspended.
    ///
    /// Must complete before any playback request; returns `true` if a
    /// resume was performed.
    pub async fn ensure_running(&self) -> Result<bool, AudioError> {
        let graph = self.live_graph()?;
        match graph.context_state() {
            ContextState::Running => Ok(false),
            ContextState::Suspended => graph.resume().await.map(|()| true),
            ContextState::Closed => Err(AudioError::Closed),
        }
    }

    /// Schedules the fade-in on the context clock: gain 0 now, then a linear
    /// ramp to full gain over the configured duration.
    ///
    /// Returns the `(start, end)` context times of the ramp.
    pub fn fade_in(&self) -> Result<(f64, f64), AudioError> {
        let graph = self.live_graph()?;
        let start = graph.current_time();
        let end = start + self.config.fade_in.as_secs_f64();
        graph.set_gain_at(0.0, start)?;
        graph.ramp_gain_to(self.config.full_gain, end)?;
        Ok((start, end))
    }

    /// Resets the gain to full if it has decayed below the silence
    /// threshold. Returns `true` if the gain was reset.
    pub fn restore_gain(&self) -> Result<bool, AudioError> {
        let graph = self.live_graph()?;
        if graph.gain() >= self.config.silence_threshold {
            return Ok(false);
        }
        graph.set_gain_at(self.config.full_gain, graph.current_time())?;
        Ok(true)
    }

    /// Starts playback of the media element.
    pub async fn play(&self) -> Result<(), MediaError> {
        // Clone out so no borrow is held while the play promise is pending.
        let media = self.media.borrow().clone().ok_or(MediaError::NotMounted)?;
        media.play().await
    }

    /// Pauses the media element, keeping its position.
    pub fn pause(&self) -> Result<(), MediaError> {
        self.media
            .borrow()
            .as_ref()
            .ok_or(MediaError::NotMounted)?
            .pause()
    }

    /// Tears the graph down: disconnect the source, disconnect the gain
    /// node, close the context.
    ///
    /// Every step is attempted independently and failures are logged. Safe
    /// on a disabled handle; repeat calls are no-ops.
    pub async fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        let Some(graph) = self.graph.as_ref() else {
            return;
        };
        if self.binding.get() == SourceBinding::Bound
            && let Err(err) = graph.disconnect_source()
        {
            error!("failed to disconnect audio source: {err}");
        }
        if let Err(err) = graph.disconnect_gain() {
            error!("failed to disconnect gain node: {err}");
        }
        if let Err(err) = graph.close().await {
            error!("error closing audio context: {err}");
        }
    }

    fn live_graph(&self) -> Result<&G, AudioError> {
        if self.disposed.get() {
            return Err(AudioError::Closed);
        }
        self.graph.as_ref().ok_or(AudioError::NotReady)
    }
}
