// Copyright 2026 the Keepsake Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for keepsake.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`WebAudioGraph`]: `AudioContext` + `GainNode` graph with
//!   `MediaElementAudioSourceNode` binding
//! - [`WebMedia`]: any `<audio>`/`<video>` element as a playable source
//! - [`ConfettiEffects`]: the host page's global `confetti()` and the
//!   `prefers-reduced-motion` media query
//! - [`SurpriseVideo`]: lazily created `<video>` element
//! - [`DomPresenter`]: DOM updates driven by state changes
//! - [`ConsoleLogger`]: `log` facade backend writing to the browser console

#![no_std]

extern crate alloc;

mod audio;
mod console;
mod effects;
mod js;
mod media;
mod presenter;

pub use audio::{WebAudioGraph, WebMedia};
pub use console::ConsoleLogger;
pub use effects::{ConfettiEffects, REDUCED_MOTION_QUERY, prefers_reduced_motion};
pub use keepsake_core::backend::Presenter;
pub use media::SurpriseVideo;
pub use presenter::{DomPresenter, MusicButtonFace, PageElements, surprise_state_name};
