// Copyright 2026 the Keepsake Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page copy, asset URLs, and DOM construction.

use alloc::format;
use alloc::vec::Vec;

use keepsake_backend_web::PageElements;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use web_sys::{Document, HtmlAudioElement, HtmlButtonElement, HtmlElement};

/// Asset URLs and page copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageConfig {
    /// Background song, looped.
    pub song_url: &'static str,
    /// Surprise video, fetched only once requested.
    pub video_url: &'static str,
    /// Page heading.
    pub heading: &'static str,
    /// Message shown below the cake.
    pub message: &'static str,
    /// Label of the blow button.
    pub blow_label: &'static str,
    /// Shown in place of the blow button once the candles are out.
    pub wish: &'static str,
    /// Heading of the memories section.
    pub memories_heading: &'static str,
    /// Placeholder text of the memories section.
    pub memories_note: &'static str,
    /// Label of the surprise button.
    pub surprise_label: &'static str,
    /// Shown while the surprise video loads.
    pub loading_label: &'static str,
}

impl PageConfig {
    /// The page as served from the site root.
    #[must_use]
    pub const fn web() -> Self {
        Self {
            song_url: "/hbd.m4a",
            video_url: "/your-video.mp4",
            heading: "🎉 Happy Birthday, My Love! 🎉",
            message: "\"You are the light in my life, and I’m so grateful to celebrate your \
                      special day. Here’s to us and many more memories together.\"",
            blow_label: "Blow Out Candles 🎂",
            wish: "✨ You blew the candles! Make a wish 💖",
            memories_heading: "📸 Our Memories",
            memories_note: "(Coming soon: photo carousel)",
            surprise_label: "Play My Surprise 🎥",
            loading_label: "Loading video...",
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::web()
    }
}

/// The built page.
#[derive(Debug)]
pub(crate) struct Page {
    pub(crate) root: HtmlElement,
    pub(crate) song: HtmlAudioElement,
    pub(crate) elements: PageElements,
}

/// Builds the page under a detached `<main>`.
///
/// Everything starts in its initial state; the presenter applies the real
/// state on mount.
pub(crate) fn build(
    doc: &Document,
    config: &PageConfig,
    candle_count: usize,
) -> Result<Page, JsValue> {
    let root = element(doc, "main", "gift")?;

    let song = create_song(doc, config.song_url)?;
    root.append_child(&song)?;

    let heading = element(doc, "h1", "heading")?;
    heading.set_text_content(Some(config.heading));
    root.append_child(&heading)?;

    let music_bar = element(doc, "div", "music-controls")?;
    let music_button = button(doc, "music-button", "🎶")?;
    music_bar.append_child(&music_button)?;
    root.append_child(&music_bar)?;

    let cake_box = element(doc, "div", "cake-box")?;
    for side in ["left", "right"] {
        let hearts = element(doc, "span", &format!("hearts hearts-{side}"))?;
        hearts.set_text_content(Some("💕"));
        hearts.set_attribute("aria-hidden", "true")?;
        cake_box.append_child(&hearts)?;
    }
    for layer in 1..=3 {
        let layer = element(doc, "div", &format!("cake-layer cake-layer-{layer}"))?;
        cake_box.append_child(&layer)?;
    }
    let candles = element(doc, "div", "candles")?;
    let mut flames = Vec::with_capacity(candle_count);
    for _ in 0..candle_count {
        let candle = element(doc, "div", "candle")?;
        let flame = element(doc, "div", "flame")?;
        candle.append_child(&flame)?;
        candle.append_child(&element(doc, "div", "stick")?)?;
        candles.append_child(&candle)?;
        flames.push(flame);
    }
    cake_box.append_child(&candles)?;

    let blow_button = button(doc, "blow-button", config.blow_label)?;
    cake_box.append_child(&blow_button)?;
    let wish = element(doc, "p", "wish")?;
    wish.set_text_content(Some(config.wish));
    cake_box.append_child(&wish)?;
    root.append_child(&cake_box)?;

    let message = element(doc, "p", "message")?;
    message.set_text_content(Some(config.message));
    root.append_child(&message)?;

    let memories = element(doc, "section", "memories")?;
    let memories_heading = element(doc, "h2", "memories-heading")?;
    memories_heading.set_text_content(Some(config.memories_heading));
    let memories_note = element(doc, "p", "memories-note")?;
    memories_note.set_text_content(Some(config.memories_note));
    memories.append_child(&memories_heading)?;
    memories.append_child(&memories_note)?;
    root.append_child(&memories)?;

    let surprise = element(doc, "section", "surprise")?;
    let surprise_button = button(doc, "surprise-button", config.surprise_label)?;
    let surprise_panel = element(doc, "div", "surprise-panel")?;
    let loading = element(doc, "p", "loading")?;
    loading.set_text_content(Some(config.loading_label));
    surprise_panel.append_child(&loading)?;
    surprise.append_child(&surprise_button)?;
    surprise.append_child(&surprise_panel)?;
    root.append_child(&surprise)?;

    Ok(Page {
        root,
        song,
        elements: PageElements {
            flames,
            blow_button,
            wish,
            music_button,
            surprise_button,
            surprise_panel,
            loading,
        },
    })
}

fn create_song(doc: &Document, src: &str) -> Result<HtmlAudioElement, JsValue> {
    let song: HtmlAudioElement = doc.create_element("audio")?.unchecked_into();
    song.set_src(src);
    song.set_loop(true);
    song.set_cross_origin(Some("anonymous"));
    song.set_preload("metadata");
    song.load();
    Ok(song)
}

fn element(doc: &Document, tag: &str, class: &str) -> Result<HtmlElement, JsValue> {
    let el: HtmlElement = doc.create_element(tag)?.unchecked_into();
    el.set_class_name(class);
    Ok(el)
}

fn button(doc: &Document, class: &str, label: &str) -> Result<HtmlButtonElement, JsValue> {
    let el: HtmlButtonElement = doc.create_element("button")?.unchecked_into();
    el.set_type("button");
    el.set_class_name(class);
    el.set_text_content(Some(label));
    Ok(el)
}
