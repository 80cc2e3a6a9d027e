// Copyright 2026 the Keepsake Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! State machine and audio-graph lifecycle for an animated greeting page.
//!
//! `keepsake_core` holds everything about the page that is not a browser
//! API call. It is `no_std` compatible (with `alloc`); each browser
//! capability is a trait in [`backend`] that a platform crate implements.
//!
//! # Architecture
//!
//! ```text
//!   input event (click, media ready/error)
//!       │
//!       ▼
//!   Controller ──► SessionState (Cell) ──► Changes ──► Presenter::apply()
//!       │
//!       ├──► AudioHandle<G: AudioGraph>   resume / bind / fade / play
//!       ├──► CelebrationEffects           three confetti bursts
//!       └──► SurpriseMedia                lazy mount, autoplay
//! ```
//!
//! **[`session`]**: [`SessionState`](session::SessionState), the surprise
//! phase machine and the derived candle group.
//!
//! **[`changes`]**: Change channels produced by every transition and
//! consumed by presenters.
//!
//! **[`backend`]**: Capability traits: [`Presenter`](backend::Presenter),
//! [`AudioGraph`](backend::AudioGraph), [`MediaElement`](backend::MediaElement),
//! [`CelebrationEffects`](backend::CelebrationEffects) and
//! [`SurpriseMedia`](backend::SurpriseMedia).
//!
//! **[`audio`]**: [`AudioHandle`](audio::AudioHandle), the owned
//! source → gain → output graph with explicit `init`/`dispose`.
//!
//! **[`effects`]**: Confetti burst planning with reduced-motion opt-out.
//!
//! **[`controller`]**: The presentation controller.
//!
//! **[`config`]**: Tunables with a web preset.
//!
//! **[`error`]**: Audio and media error taxonomy.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types,
//! with a zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod audio;
pub mod backend;
pub mod changes;
pub mod config;
pub mod controller;
pub mod effects;
pub mod error;
pub mod session;
pub mod trace;

#[cfg(test)]
mod testing;
