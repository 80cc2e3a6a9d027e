// Copyright 2026 the Keepsake Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! State change channels.
//!
//! Every controller transition diffs the old and new [`SessionState`] into a
//! [`Changes`] set. Each channel names an independent region of the page, so
//! a presenter only touches the elements whose inputs changed.
//!
//! # Consumption
//!
//! Callers never need to diff state themselves. The controller computes the
//! set after each transition and hands it to
//! [`Presenter::apply`](crate::backend::Presenter::apply) together with the
//! new state. An empty set is never presented.

use crate::session::SessionState;

bitflags::bitflags! {
    /// Which parts of the [`SessionState`] changed in one transition.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Changes: u8 {
        /// `candles_blown` changed: flames, blow button and wish message.
        const CANDLES = 1 << 0;
        /// `music_playing` changed: music button glyph, title and pressed
        /// state.
        const MUSIC = 1 << 1;
        /// `audio_available` changed: music button enabled state.
        const AUDIO = 1 << 2;
        /// The surprise phase changed: surprise button, loading indicator
        /// and video visibility.
        const SURPRISE = 1 << 3;
    }
}

impl Changes {
    /// Computes the channels that differ between two states.
    #[must_use]
    pub fn between(old: &SessionState, new: &SessionState) -> Self {
        let mut changes = Self::empty();
        changes.set(Self::CANDLES, old.candles_blown != new.candles_blown);
        changes.set(Self::MUSIC, old.music_playing != new.music_playing);
        changes.set(Self::AUDIO, old.audio_available != new.audio_available);
        changes.set(Self::SURPRISE, old.surprise != new.surprise);
        changes
    }
}
