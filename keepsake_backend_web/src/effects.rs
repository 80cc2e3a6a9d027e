// Copyright 2026 the Keepsake Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Confetti through the page's global `confetti()` function.
//!
//! The host page loads canvas-confetti, which installs `window.confetti`. A
//! missing global throws a `ReferenceError`, which is logged and otherwise
//! ignored.

use js_sys::{Object, Reflect};
use keepsake_core::backend::CelebrationEffects;
use keepsake_core::effects::Burst;
use log::warn;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::wasm_bindgen;

use crate::js::describe;

/// Media query matched when the user asked for less motion.
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = confetti, catch)]
    fn confetti(options: &JsValue) -> Result<JsValue, JsValue>;
}

/// Returns `true` if the user prefers reduced motion.
///
/// Evaluated on every call so a preference change applies to the next
/// celebration.
#[must_use]
pub fn prefers_reduced_motion() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media(REDUCED_MOTION_QUERY).ok().flatten())
        .is_some_and(|query| query.matches())
}

/// [`CelebrationEffects`] backed by canvas-confetti.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConfettiEffects;

impl ConfettiEffects {
    /// Creates the effects adapter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl CelebrationEffects for ConfettiEffects {
    fn prefers_reduced_motion(&self) -> bool {
        prefers_reduced_motion()
    }

    fn burst(&self, burst: &Burst) {
        let fired = burst_options(burst).and_then(|options| confetti(&options));
        if let Err(err) = fired {
            warn!("confetti unavailable: {}", describe(&err));
        }
    }
}

/// Builds `{ particleCount, spread, origin: { x, y } }`.
fn burst_options(burst: &Burst) -> Result<JsValue, JsValue> {
    let origin = Object::new();
    Reflect::set(&origin, &"x".into(), &burst.origin.x.into())?;
    Reflect::set(&origin, &"y".into(), &burst.origin.y.into())?;

    let options = Object::new();
    Reflect::set(
        &options,
        &"particleCount".into(),
        &burst.particle_count.into(),
    )?;
    Reflect::set(&options, &"spread".into(), &burst.spread.into())?;
    Reflect::set(&options, &"origin".into(), &origin)?;
    Ok(options.into())
}
