// Copyright 2026 the Keepsake Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM element management.
//!
//! Translates [`SessionState`] into visibility, labels, and attributes on a
//! fixed set of page elements, touching only the groups named by
//! [`Changes`].

use alloc::vec::Vec;

use keepsake_core::backend::Presenter;
use keepsake_core::changes::Changes;
use keepsake_core::session::{SessionState, SurprisePhase};
use web_sys::{HtmlButtonElement, HtmlElement};

/// The page elements a [`DomPresenter`] drives.
#[derive(Clone, Debug)]
pub struct PageElements {
    /// One flame per candle, in candle order.
    pub flames: Vec<HtmlElement>,
    /// "Blow Out Candles" button; hidden once the candles are out.
    pub blow_button: HtmlButtonElement,
    /// Wish message; shown once the candles are out.
    pub wish: HtmlElement,
    /// Music toggle.
    pub music_button: HtmlButtonElement,
    /// "Play My Surprise" button; hidden once the surprise is requested.
    pub surprise_button: HtmlButtonElement,
    /// Container the surprise video is mounted into.
    pub surprise_panel: HtmlElement,
    /// Loading indicator inside the surprise panel.
    pub loading: HtmlElement,
}

/// Glyph and tooltip of the music toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MusicButtonFace {
    /// Button text.
    pub glyph: &'static str,
    /// `title` attribute, naming the action a click performs.
    pub title: &'static str,
    /// `aria-pressed` value.
    pub pressed: &'static str,
}

impl MusicButtonFace {
    /// Returns the face for the given playing state.
    #[must_use]
    pub const fn for_state(playing: bool) -> Self {
        if playing {
            Self {
                glyph: "🎵",
                title: "Pause Music",
                pressed: "true",
            }
        } else {
            Self {
                glyph: "🎶",
                title: "Play Music",
                pressed: "false",
            }
        }
    }
}

/// Returns the `data-state` value of the surprise panel.
///
/// The page stylesheet keys on it, e.g. to keep the video hidden while
/// loading.
#[must_use]
pub const fn surprise_state_name(phase: SurprisePhase) -> &'static str {
    match phase {
        SurprisePhase::Hidden => "hidden",
        SurprisePhase::Loading => "loading",
        SurprisePhase::Ready => "ready",
        SurprisePhase::Failed => "failed",
    }
}

/// Applies [`SessionState`] changes to the page.
pub struct DomPresenter {
    elements: PageElements,
}

impl core::fmt::Debug for DomPresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomPresenter")
            .field("flames_len", &self.elements.flames.len())
            .finish_non_exhaustive()
    }
}

impl DomPresenter {
    /// Creates a presenter over the given elements.
    #[must_use]
    pub fn new(elements: PageElements) -> Self {
        Self { elements }
    }

    /// Returns the managed elements.
    #[must_use]
    pub fn elements(&self) -> &PageElements {
        &self.elements
    }

    fn apply_candles(&self, state: &SessionState) {
        let lit = !state.candles_blown();
        for flame in &self.elements.flames {
            set_shown(flame, lit);
        }
        set_shown(&self.elements.blow_button, lit);
        set_shown(&self.elements.wish, !lit);
    }

    fn apply_music(&self, state: &SessionState) {
        let face = MusicButtonFace::for_state(state.music_playing());
        let button = &self.elements.music_button;
        button.set_text_content(Some(face.glyph));
        let _ = button.set_attribute("title", face.title);
        let _ = button.set_attribute("aria-label", face.title);
        let _ = button.set_attribute("aria-pressed", face.pressed);
    }

    fn apply_surprise(&self, state: &SessionState) {
        let phase = state.surprise();
        set_shown(&self.elements.surprise_button, !phase.is_visible());
        set_shown(&self.elements.surprise_panel, phase.is_visible());
        set_shown(&self.elements.loading, phase.is_loading());
        let _ = self
            .elements
            .surprise_panel
            .set_attribute("data-state", surprise_state_name(phase));
    }
}

impl Presenter for DomPresenter {
    fn apply(&mut self, state: &SessionState, changes: Changes) {
        if changes.contains(Changes::CANDLES) {
            self.apply_candles(state);
        }
        if changes.contains(Changes::MUSIC) {
            self.apply_music(state);
        }
        if changes.contains(Changes::AUDIO) {
            self.elements
                .music_button
                .set_disabled(!state.audio_available());
        }
        if changes.contains(Changes::SURPRISE) {
            self.apply_surprise(state);
        }
    }
}

fn set_shown(el: &HtmlElement, shown: bool) {
    let s = el.style();
    if shown {
        let _ = s.remove_property("display");
    } else {
        let _ = s.set_property("display", "none");
    }
}
