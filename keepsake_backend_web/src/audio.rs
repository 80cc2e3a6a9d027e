// Copyright 2026 the Keepsake Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web Audio graph.
//!
//! [`WebAudioGraph`] owns an `AudioContext` and one `GainNode` connected to
//! the context destination. A [`WebMedia`] element is bound into the graph
//! through a `MediaElementAudioSourceNode`; browsers allow exactly one such
//! node per element for the element's lifetime and throw
//! `InvalidStateError` on a second attempt, which is reported as
//! [`AudioError::AlreadyBound`].
//!
//! Promise-returning calls (`resume`, `close`, `play`) are awaited through
//! [`JsFuture`].

use core::cell::RefCell;

use keepsake_core::backend::{AudioGraph, ContextState, MediaElement};
use keepsake_core::error::{AudioError, AudioOp, MediaError};
use wasm_bindgen::{JsCast as _, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AudioContext, AudioContextState, GainNode, HtmlMediaElement, MediaElementAudioSourceNode,
};

use crate::js::{describe, is_invalid_state};

/// Constructor names probed, in order. The prefixed name covers older
/// Safari.
const CONTEXT_CONSTRUCTORS: [&str; 2] = ["AudioContext", "webkitAudioContext"];

/// An `AudioContext` with a single gain node wired to its destination.
pub struct WebAudioGraph {
    context: AudioContext,
    gain: GainNode,
    source: RefCell<Option<SourceNode>>,
}

/// The element's source node and whether it reaches the gain node.
///
/// The node is kept even when connecting fails: the element stays captured
/// by the context, so a new node can never be created for it.
struct SourceNode {
    node: MediaElementAudioSourceNode,
    connected: bool,
}

/// What a bind has to do, given the stored source node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SourceStep {
    /// No node yet: create one for the element.
    Create,
    /// The stored node belongs to another element: release it, then create.
    Replace,
    /// The stored node belongs to this element but is not connected.
    Connect,
    /// The element already feeds the gain node.
    Done,
}

impl SourceStep {
    /// `stored` is `(same_element, connected)` for the stored node, if any.
    fn plan(stored: Option<(bool, bool)>) -> Self {
        match stored {
            None => Self::Create,
            Some((false, _)) => Self::Replace,
            Some((true, false)) => Self::Connect,
            Some((true, true)) => Self::Done,
        }
    }
}

impl core::fmt::Debug for WebAudioGraph {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WebAudioGraph")
            .field("context", &"AudioContext")
            .field("gain", &self.gain.gain().value())
            .field(
                "source",
                &self.source.borrow().as_ref().map(|s| s.connected),
            )
            .finish()
    }
}

impl WebAudioGraph {
    /// Probes for Web Audio, creates the context and the gain node, and
    /// connects the gain node to the destination.
    ///
    /// Returns [`AudioError::Unsupported`] if neither `AudioContext` nor
    /// `webkitAudioContext` exists.
    pub fn open() -> Result<Self, AudioError> {
        let context = construct_context()?;
        let gain = context
            .create_gain()
            .map_err(|err| AudioError::operation(AudioOp::Open, describe(&err)))?;
        gain.connect_with_audio_node(&context.destination())
            .map_err(|err| AudioError::operation(AudioOp::Open, describe(&err)))?;
        Ok(Self {
            context,
            gain,
            source: RefCell::new(None),
        })
    }

    /// Returns the underlying context.
    #[must_use]
    pub fn context(&self) -> &AudioContext {
        &self.context
    }
}

fn construct_context() -> Result<AudioContext, AudioError> {
    let global = js_sys::global();
    for name in CONTEXT_CONSTRUCTORS {
        let ctor = js_sys::Reflect::get(&global, &JsValue::from_str(name))
            .map_err(|err| AudioError::operation(AudioOp::Open, describe(&err)))?;
        if let Some(ctor) = ctor.dyn_ref::<js_sys::Function>() {
            return js_sys::Reflect::construct(ctor, &js_sys::Array::new())
                .map(|ctx| ctx.unchecked_into::<AudioContext>())
                .map_err(|err| AudioError::operation(AudioOp::Open, describe(&err)));
        }
    }
    Err(AudioError::Unsupported)
}

async fn await_promise(
    promise: Result<js_sys::Promise, JsValue>,
    op: AudioOp,
) -> Result<(), AudioError> {
    let promise = promise.map_err(|err| AudioError::operation(op, describe(&err)))?;
    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|err| AudioError::operation(op, describe(&err)))
}

fn scheduled(result: Result<web_sys::AudioParam, JsValue>) -> Result<(), AudioError> {
    result
        .map(|_| ())
        .map_err(|err| AudioError::operation(AudioOp::Schedule, describe(&err)))
}

impl AudioGraph for WebAudioGraph {
    type Media = WebMedia;

    fn context_state(&self) -> ContextState {
        match self.context.state() {
            AudioContextState::Running => ContextState::Running,
            AudioContextState::Closed => ContextState::Closed,
            // "suspended", plus vendor states such as Safari's "interrupted",
            // all need a resume before output is audible.
            _ => ContextState::Suspended,
        }
    }

    async fn resume(&self) -> Result<(), AudioError> {
        await_promise(self.context.resume(), AudioOp::Resume).await
    }

    fn current_time(&self) -> f64 {
        self.context.current_time()
    }

    fn gain(&self) -> f32 {
        self.gain.gain().value()
    }

    fn set_gain_at(&self, value: f32, time: f64) -> Result<(), AudioError> {
        scheduled(self.gain.gain().set_value_at_time(value, time))
    }

    fn ramp_gain_to(&self, value: f32, end_time: f64) -> Result<(), AudioError> {
        scheduled(self.gain.gain().linear_ramp_to_value_at_time(value, end_time))
    }

    fn bind_source(&self, media: &WebMedia) -> Result<(), AudioError> {
        let mut slot = self.source.borrow_mut();
        let stored = slot
            .as_ref()
            .map(|s| (s.node.media_element() == *media.element(), s.connected));
        match SourceStep::plan(stored) {
            SourceStep::Done => return Err(AudioError::AlreadyBound),
            SourceStep::Connect => {}
            step @ (SourceStep::Create | SourceStep::Replace) => {
                if step == SourceStep::Replace
                    && let Some(old) = slot.take()
                {
                    let _ = old.node.disconnect();
                }
                let node = self
                    .context
                    .create_media_element_source(media.element())
                    .map_err(|err| {
                        if is_invalid_state(&err) {
                            AudioError::AlreadyBound
                        } else {
                            AudioError::operation(AudioOp::Bind, describe(&err))
                        }
                    })?;
                *slot = Some(SourceNode {
                    node,
                    connected: false,
                });
            }
        }
        let Some(source) = slot.as_mut() else {
            return Err(AudioError::NotReady);
        };
        source
            .node
            .connect_with_audio_node(&self.gain)
            .map_err(|err| AudioError::operation(AudioOp::Bind, describe(&err)))?;
        source.connected = true;
        Ok(())
    }

    fn disconnect_source(&self) -> Result<(), AudioError> {
        let Some(source) = self.source.borrow_mut().take() else {
            return Ok(());
        };
        source
            .node
            .disconnect()
            .map_err(|err| AudioError::operation(AudioOp::Disconnect, describe(&err)))
    }

    fn disconnect_gain(&self) -> Result<(), AudioError> {
        self.gain
            .disconnect()
            .map_err(|err| AudioError::operation(AudioOp::Disconnect, describe(&err)))
    }

    async fn close(&self) -> Result<(), AudioError> {
        await_promise(self.context.close(), AudioOp::Close).await
    }
}

/// A media element (`<audio>` or `<video>`) usable as a playback source.
#[derive(Clone, Debug)]
pub struct WebMedia(HtmlMediaElement);

impl WebMedia {
    /// Wraps a media element.
    #[must_use]
    pub fn new(element: &impl AsRef<HtmlMediaElement>) -> Self {
        Self(element.as_ref().clone())
    }

    /// Returns the wrapped element.
    #[must_use]
    pub fn element(&self) -> &HtmlMediaElement {
        &self.0
    }
}

impl MediaElement for WebMedia {
    async fn play(&self) -> Result<(), MediaError> {
        let promise = self
            .0
            .play()
            .map_err(|err| MediaError::PlayRejected(describe(&err)))?;
        JsFuture::from(promise)
            .await
            .map(|_| ())
            .map_err(|err| MediaError::PlayRejected(describe(&err)))
    }

    fn pause(&self) -> Result<(), MediaError> {
        self.0
            .pause()
            .map_err(|err| MediaError::Other(describe(&err)))
    }
}
