// Copyright 2026 the Keepsake Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Session state.
//!
//! [`SessionState`] is created with everything off when the page loads, is
//! mutated only by the [`Controller`](crate::controller::Controller), and is
//! discarded on unload. It is `Copy` so the controller can keep it in a
//! `Cell` and hand snapshots to presenters and trace sinks.

/// Lifecycle of the surprise video.
///
/// ```text
///   Hidden ──► Loading ──► Ready
///                 │
///                 └──────► Failed
/// ```
///
/// No transition returns to `Hidden`. `Failed` keeps the video mounted so
/// the native error presentation stays visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SurprisePhase {
    /// Not yet requested.
    #[default]
    Hidden,
    /// Mounted, waiting for the element to report it can play.
    Loading,
    /// The element reported it can play; playback was requested.
    Ready,
    /// The element reported a load error.
    Failed,
}

impl SurprisePhase {
    /// Returns `true` once the surprise has been requested.
    #[must_use]
    pub const fn is_visible(self) -> bool {
        !matches!(self, Self::Hidden)
    }

    /// Returns `true` while the loading indicator should be shown.
    #[must_use]
    pub const fn is_loading(self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// All UI state of one page session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub(crate) candles_blown: bool,
    pub(crate) music_playing: bool,
    pub(crate) audio_available: bool,
    pub(crate) surprise: SurprisePhase,
}

impl SessionState {
    /// Returns `true` once the candles have been blown out. Never reverts.
    #[must_use]
    pub const fn candles_blown(&self) -> bool {
        self.candles_blown
    }

    /// Returns `true` while background music is playing.
    #[must_use]
    pub const fn music_playing(&self) -> bool {
        self.music_playing
    }

    /// Returns `true` if the audio graph initialised and music can be
    /// toggled.
    #[must_use]
    pub const fn audio_available(&self) -> bool {
        self.audio_available
    }

    /// Current surprise phase.
    #[must_use]
    pub const fn surprise(&self) -> SurprisePhase {
        self.surprise
    }

    /// Returns `true` once the surprise video has been requested.
    #[must_use]
    pub const fn show_surprise(&self) -> bool {
        self.surprise.is_visible()
    }

    /// Returns `true` while the surprise video is loading.
    ///
    /// Implies [`show_surprise`](Self::show_surprise).
    #[must_use]
    pub const fn surprise_loading(&self) -> bool {
        self.surprise.is_loading()
    }

    /// Returns the candle group derived from this state.
    #[must_use]
    pub const fn candles(&self, count: usize) -> CandleGroup {
        CandleGroup {
            count,
            lit: !self.candles_blown,
        }
    }
}

/// Events a mounted surprise video reports back to the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurpriseSignal {
    /// The element can start playing.
    CanPlay,
    /// The first frame has loaded.
    LoadedData,
    /// Loading failed.
    Error,
}

/// A fixed-size, ordered group of candles sharing one lit state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CandleGroup {
    count: usize,
    lit: bool,
}

impl CandleGroup {
    /// Number of candles.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if the group has no candles.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns `true` while the flames are burning.
    #[must_use]
    pub const fn is_lit(&self) -> bool {
        self.lit
    }

    /// Iterates the candles in display order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Candle> + '_ {
        (0..self.count).map(|index| Candle {
            index,
            lit: self.lit,
        })
    }
}

/// One candle of a [`CandleGroup`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candle {
    /// Position in the group, left to right.
    pub index: usize,
    /// Whether the flame is shown.
    pub lit: bool,
}
