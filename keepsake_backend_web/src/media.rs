// Copyright 2026 the Keepsake Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The surprise `<video>` element.
//!
//! The element is created on [`mount`](SurpriseMedia::mount), not at page
//! load, so the video is only fetched once it is asked for. Its `canplay`,
//! `loadeddata`, and `error` events are forwarded as [`SurpriseSignal`]s to
//! the callback given at construction.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use keepsake_core::backend::{MediaElement, SurpriseMedia};
use keepsake_core::error::MediaError;
use keepsake_core::session::SurpriseSignal;
use log::debug;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, HtmlElement, HtmlVideoElement};

use crate::audio::WebMedia;
use crate::js::describe;

const SIGNAL_EVENTS: [(&str, SurpriseSignal); 3] = [
    ("canplay", SurpriseSignal::CanPlay),
    ("loadeddata", SurpriseSignal::LoadedData),
    ("error", SurpriseSignal::Error),
];

/// A lazily mounted video inside a host element.
pub struct SurpriseVideo {
    host: HtmlElement,
    src: String,
    on_signal: Rc<dyn Fn(SurpriseSignal)>,
    video: RefCell<Option<HtmlVideoElement>>,
    // Kept alive for as long as the element may fire.
    listeners: RefCell<Vec<Closure<dyn FnMut(Event)>>>,
}

impl core::fmt::Debug for SurpriseVideo {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SurpriseVideo")
            .field("src", &self.src)
            .field("mounted", &self.video.borrow().is_some())
            .finish_non_exhaustive()
    }
}

impl SurpriseVideo {
    /// Creates an unmounted video that will load `src` into `host`.
    pub fn new(
        host: HtmlElement,
        src: impl Into<String>,
        on_signal: impl Fn(SurpriseSignal) + 'static,
    ) -> Self {
        Self {
            host,
            src: src.into(),
            on_signal: Rc::new(on_signal),
            video: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Returns the element once mounted.
    #[must_use]
    pub fn element(&self) -> Option<HtmlVideoElement> {
        self.video.borrow().clone()
    }

    fn create(&self) -> Result<HtmlVideoElement, MediaError> {
        let doc = self
            .host
            .owner_document()
            .ok_or_else(|| MediaError::Other(String::from("host has no owner document")))?;
        let video: HtmlVideoElement = doc
            .create_element("video")
            .map_err(|err| MediaError::Other(describe(&err)))?
            .unchecked_into();
        video.set_controls(true);
        video.set_preload("auto");
        video.set_class_name("surprise-video");
        let _ = video.set_attribute("playsinline", "");
        video.set_text_content(Some("Your browser does not support the video tag."));

        let mut listeners = self.listeners.borrow_mut();
        for (event, signal) in SIGNAL_EVENTS {
            let on_signal = Rc::clone(&self.on_signal);
            let closure = Closure::wrap(Box::new(move |_: Event| {
                debug!("surprise video: {event}");
                on_signal(signal);
            }) as Box<dyn FnMut(Event)>);
            video
                .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
                .map_err(|err| MediaError::Other(describe(&err)))?;
            listeners.push(closure);
        }

        // The source goes on last so no event can fire before the listeners
        // are attached.
        video.set_src(&self.src);
        self.host
            .append_child(&video)
            .map_err(|err| MediaError::Other(describe(&err)))?;
        Ok(video)
    }
}

impl MediaElement for SurpriseVideo {
    async fn play(&self) -> Result<(), MediaError> {
        let video = self.element().ok_or(MediaError::NotMounted)?;
        WebMedia::new(&video).play().await
    }

    fn pause(&self) -> Result<(), MediaError> {
        let video = self.element().ok_or(MediaError::NotMounted)?;
        video
            .pause()
            .map_err(|err| MediaError::Other(describe(&err)))
    }
}

impl SurpriseMedia for SurpriseVideo {
    fn mount(&self) -> Result<(), MediaError> {
        if self.video.borrow().is_some() {
            return Ok(());
        }
        let video = self.create()?;
        *self.video.borrow_mut() = Some(video);
        Ok(())
    }
}
