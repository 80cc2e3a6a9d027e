// Copyright 2026 the Keepsake Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page tunables.

use core::time::Duration;

use crate::effects::ConfettiConfig;

/// Configuration for the [`Controller`](crate::controller::Controller) and
/// the [`AudioHandle`](crate::audio::AudioHandle).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GiftConfig {
    /// Number of candles on the cake.
    pub candle_count: usize,
    /// Audio tunables.
    pub audio: AudioConfig,
    /// Confetti burst parameters.
    pub confetti: ConfettiConfig,
}

/// Audio tunables.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AudioConfig {
    /// Length of the linear fade-in from silence on first play.
    pub fade_in: Duration,
    /// Gain the fade ends at and that [`restore_gain`] resets to.
    ///
    /// [`restore_gain`]: crate::audio::AudioHandle::restore_gain
    pub full_gain: f32,
    /// Below this gain the track counts as faded out and is restored to
    /// `full_gain` before resuming.
    pub silence_threshold: f32,
}

impl AudioConfig {
    /// Default audio configuration for the web.
    #[must_use]
    pub const fn web() -> Self {
        Self {
            fade_in: Duration::from_secs(2),
            full_gain: 1.0,
            silence_threshold: 0.01,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self::web()
    }
}

impl GiftConfig {
    /// Default configuration for the web page: three candles, a two second
    /// fade-in and the three-burst confetti.
    #[must_use]
    pub const fn web() -> Self {
        Self {
            candle_count: 3,
            audio: AudioConfig::web(),
            confetti: ConfettiConfig::web(),
        }
    }
}

impl Default for GiftConfig {
    fn default() -> Self {
        Self::web()
    }
}
