// Copyright 2026 the Keepsake Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error taxonomy for browser capabilities.
//!
//! Nothing here is ever surfaced to the user. The controller logs these and
//! abandons the operation; the only user-visible failure is the native error
//! state of the surprise video.

use alloc::string::String;
use core::fmt;

/// An audio-graph operation, used to label [`AudioError::Operation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AudioOp {
    /// Constructing the context and gain node.
    Open,
    /// Resuming a suspended context.
    Resume,
    /// Creating and connecting the media source node.
    Bind,
    /// Scheduling a gain value or ramp.
    Schedule,
    /// Disconnecting a node.
    Disconnect,
    /// Closing the context.
    Close,
}

impl fmt::Display for AudioOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Open => "open",
            Self::Resume => "resume",
            Self::Bind => "bind",
            Self::Schedule => "schedule",
            Self::Disconnect => "disconnect",
            Self::Close => "close",
        })
    }
}

/// Failure of an audio-graph operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AudioError {
    /// The platform has no audio-processing capability. Permanent.
    #[error("audio processing is not supported")]
    Unsupported,
    /// The media element already feeds a source node.
    ///
    /// This is the expected outcome of a repeated bind and is treated as
    /// confirmation that an earlier bind succeeded.
    #[error("media element is already bound to an audio graph")]
    AlreadyBound,
    /// The graph or the media element does not exist (yet).
    #[error("audio graph is not ready")]
    NotReady,
    /// The context has been closed.
    #[error("audio context is closed")]
    Closed,
    /// A platform call rejected.
    #[error("audio {op} failed: {message}")]
    Operation {
        /// Which operation failed.
        op: AudioOp,
        /// Platform-provided description.
        message: String,
    },
}

impl AudioError {
    /// Shorthand for [`AudioError::Operation`].
    #[must_use]
    pub fn operation(op: AudioOp, message: impl Into<String>) -> Self {
        Self::Operation {
            op,
            message: message.into(),
        }
    }
}

/// Failure of a media element operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MediaError {
    /// `play()` rejected, typically because autoplay was blocked.
    #[error("playback was rejected: {0}")]
    PlayRejected(String),
    /// The element has not been mounted.
    #[error("media element is not mounted")]
    NotMounted,
    /// Any other platform failure.
    #[error("media operation failed: {0}")]
    Other(String),
}
