// Copyright 2026 the Keepsake Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A birthday greeting page.
//!
//! Blowing out the candles fires confetti and starts the song with a
//! two-second fade-in. The music button pauses and resumes it, and the
//! surprise button loads and plays a video.
//!
//! Build with: `wasm-pack build --target web demos/birthday_gift`
//! Then serve `demos/birthday_gift/` next to `hbd.m4a` and `your-video.mp4`
//! and open `index.html`.

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

mod page;

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};

use keepsake_backend_web::{
    ConfettiEffects, ConsoleLogger, DomPresenter, SurpriseVideo, WebAudioGraph, WebMedia,
    prefers_reduced_motion,
};
use keepsake_core::audio::AudioHandle;
use keepsake_core::config::GiftConfig;
use keepsake_core::controller::Controller;
use log::{LevelFilter, info};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, EventTarget, PageTransitionEvent};

pub use page::PageConfig;

type GiftController = Controller<WebAudioGraph, ConfettiEffects, SurpriseVideo, DomPresenter>;

/// Builds the page and wires the controls.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() -> Result<(), JsValue> {
    // A second init (e.g. hot reload) keeps the first logger.
    let _ = ConsoleLogger::init(LevelFilter::Debug);

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document.body().ok_or_else(|| JsValue::from_str("no body"))?;

    let config = GiftConfig::web();
    let page_config = PageConfig::web();
    let page = page::build(&document, &page_config, config.candle_count)?;
    if prefers_reduced_motion() {
        body.class_list().add_1("reduced-motion")?;
    }
    body.append_child(&page.root)?;

    let audio = AudioHandle::init(config.audio, WebAudioGraph::open);
    audio.attach(WebMedia::new(&page.song));

    let elements = page.elements.clone();
    let controller: Rc<GiftController> = Rc::new_cyclic(|weak: &Weak<GiftController>| {
        let weak = weak.clone();
        let video = SurpriseVideo::new(
            page.elements.surprise_panel.clone(),
            page_config.video_url,
            move |signal| {
                if let Some(controller) = weak.upgrade() {
                    spawn_local(async move { controller.handle_surprise_signal(signal).await });
                }
            },
        );
        Controller::new(
            config,
            audio,
            ConfettiEffects::new(),
            video,
            DomPresenter::new(page.elements),
        )
    });
    controller.mount();

    let c = Rc::clone(&controller);
    listen(&elements.blow_button, "click", move |_| {
        let c = Rc::clone(&c);
        spawn_local(async move { c.blow_candles().await });
    })?;

    let c = Rc::clone(&controller);
    listen(&elements.music_button, "click", move |_| {
        let c = Rc::clone(&c);
        spawn_local(async move { c.toggle_music().await });
    })?;

    let c = Rc::clone(&controller);
    listen(&elements.surprise_button, "click", move |_| {
        c.request_surprise();
    })?;

    let c = Rc::clone(&controller);
    listen(&window, "pagehide", move |event| {
        if entering_page_cache(&event) {
            return;
        }
        let c = Rc::clone(&c);
        spawn_local(async move { c.dispose().await });
    })?;

    info!(
        "birthday page ready: {} candles, audio {}",
        config.candle_count,
        if controller.state().audio_available() {
            "available"
        } else {
            "unavailable"
        },
    );
    Ok(())
}

/// Returns `true` if a `pagehide` keeps the page in the back/forward
/// cache. Such a page can be shown again with its audio graph intact.
fn entering_page_cache(event: &Event) -> bool {
    event
        .dyn_ref::<PageTransitionEvent>()
        .is_some_and(PageTransitionEvent::persisted)
}

/// Adds a listener that lives for the rest of the page.
fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}
