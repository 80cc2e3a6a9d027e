// Copyright 2026 the Keepsake Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory capability doubles for unit tests.
//!
//! Every double is a cheap `Rc` handle so a test can keep one clone for
//! inspection while another is moved into the code under test.

use alloc::rc::Rc;
use alloc::string::ToString as _;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll, Waker};

use crate::backend::{
    AudioGraph, CelebrationEffects, ContextState, MediaElement, Presenter, SurpriseMedia,
};
use crate::changes::Changes;
use crate::effects::Burst;
use crate::error::{AudioError, AudioOp, MediaError};
use crate::session::SessionState;

// ---------------------------------------------------------------------------
// Gate
// ---------------------------------------------------------------------------

/// A future that stays pending until [`Gate::open`] is called.
#[derive(Clone, Debug, Default)]
pub(crate) struct Gate(Rc<Cell<bool>>);

impl Gate {
    pub(crate) fn open(&self) {
        self.0.set(true);
    }

    fn wait(&self) -> GateFuture {
        GateFuture(Rc::clone(&self.0))
    }
}

struct GateFuture(Rc<Cell<bool>>);

impl Future for GateFuture {
    type Output = ();

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<()> {
        if self.0.get() {
            Poll::Ready(())
        } else {
            Poll::Pending
        }
    }
}

/// Polls `fut` once with a no-op waker.
pub(crate) fn poll_once<F: Future + ?Sized>(fut: Pin<&mut F>) -> Poll<F::Output> {
    let mut cx = Context::from_waker(Waker::noop());
    fut.poll(&mut cx)
}

// ---------------------------------------------------------------------------
// MockGraph
// ---------------------------------------------------------------------------

/// A recorded [`AudioGraph`] call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum GraphCall {
    Resume,
    SetGain { value: f32, time: f64 },
    Ramp { value: f32, end_time: f64 },
    Bind,
    DisconnectSource,
    DisconnectGain,
    Close,
}

#[derive(Debug)]
struct GraphInner {
    state: Cell<ContextState>,
    time: Cell<f64>,
    gain: Cell<f32>,
    calls: RefCell<Vec<GraphCall>>,
    fail_resume: Cell<bool>,
    fail_bind: Cell<bool>,
    fail_disconnect: Cell<bool>,
    resume_gate: RefCell<Option<Gate>>,
}

#[derive(Clone, Debug)]
pub(crate) struct MockGraph(Rc<GraphInner>);

impl Default for MockGraph {
    fn default() -> Self {
        Self(Rc::new(GraphInner {
            state: Cell::new(ContextState::Running),
            time: Cell::new(0.0),
            gain: Cell::new(1.0),
            calls: RefCell::new(Vec::new()),
            fail_resume: Cell::new(false),
            fail_bind: Cell::new(false),
            fail_disconnect: Cell::new(false),
            resume_gate: RefCell::new(None),
        }))
    }
}

impl MockGraph {
    pub(crate) fn set_state(&self, state: ContextState) {
        self.0.state.set(state);
    }

    pub(crate) fn state(&self) -> ContextState {
        self.0.state.get()
    }

    pub(crate) fn set_time(&self, time: f64) {
        self.0.time.set(time);
    }

    pub(crate) fn set_gain(&self, gain: f32) {
        self.0.gain.set(gain);
    }

    pub(crate) fn set_fail_resume(&self, fail: bool) {
        self.0.fail_resume.set(fail);
    }

    pub(crate) fn set_fail_bind(&self, fail: bool) {
        self.0.fail_bind.set(fail);
    }

    pub(crate) fn set_fail_disconnect(&self, fail: bool) {
        self.0.fail_disconnect.set(fail);
    }

    /// Makes the next resumes wait for `gate`.
    pub(crate) fn gate_resume(&self, gate: &Gate) {
        *self.0.resume_gate.borrow_mut() = Some(gate.clone());
    }

    pub(crate) fn calls(&self) -> Vec<GraphCall> {
        self.0.calls.borrow().clone()
    }

    pub(crate) fn count(&self, pred: impl Fn(&GraphCall) -> bool) -> usize {
        self.0.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: GraphCall) {
        self.0.calls.borrow_mut().push(call);
    }
}

impl AudioGraph for MockGraph {
    type Media = MockMedia;

    fn context_state(&self) -> ContextState {
        self.0.state.get()
    }

    async fn resume(&self) -> Result<(), AudioError> {
        self.record(GraphCall::Resume);
        let gate = self.0.resume_gate.borrow().clone();
        if let Some(gate) = gate {
            gate.wait().await;
        }
        if self.0.fail_resume.get() {
            return Err(AudioError::operation(AudioOp::Resume, "NotAllowedError"));
        }
        self.0.state.set(ContextState::Running);
        Ok(())
    }

    fn current_time(&self) -> f64 {
        self.0.time.get()
    }

    fn gain(&self) -> f32 {
        self.0.gain.get()
    }

    fn set_gain_at(&self, value: f32, time: f64) -> Result<(), AudioError> {
        self.record(GraphCall::SetGain { value, time });
        self.0.gain.set(value);
        Ok(())
    }

    fn ramp_gain_to(&self, value: f32, end_time: f64) -> Result<(), AudioError> {
        self.record(GraphCall::Ramp { value, end_time });
        self.0.gain.set(value);
        Ok(())
    }

    fn bind_source(&self, media: &MockMedia) -> Result<(), AudioError> {
        if media.0.element_bound.get() {
            return Err(AudioError::AlreadyBound);
        }
        if self.0.fail_bind.get() {
            return Err(AudioError::operation(AudioOp::Bind, "NotSupportedError"));
        }
        self.record(GraphCall::Bind);
        media.0.element_bound.set(true);
        Ok(())
    }

    fn disconnect_source(&self) -> Result<(), AudioError> {
        self.record(GraphCall::DisconnectSource);
        if self.0.fail_disconnect.get() {
            return Err(AudioError::operation(AudioOp::Disconnect, "InvalidAccessError"));
        }
        Ok(())
    }

    fn disconnect_gain(&self) -> Result<(), AudioError> {
        self.record(GraphCall::DisconnectGain);
        if self.0.fail_disconnect.get() {
            return Err(AudioError::operation(AudioOp::Disconnect, "InvalidAccessError"));
        }
        Ok(())
    }

    async fn close(&self) -> Result<(), AudioError> {
        self.record(GraphCall::Close);
        self.0.state.set(ContextState::Closed);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MockMedia
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct MediaInner {
    plays: Cell<u32>,
    pauses: Cell<u32>,
    reject_play: Cell<bool>,
    element_bound: Cell<bool>,
    mounts: Cell<u32>,
    fail_mount: Cell<bool>,
}

/// A media element double; doubles as the surprise video.
#[derive(Clone, Debug, Default)]
pub(crate) struct MockMedia(Rc<MediaInner>);

impl MockMedia {
    pub(crate) fn plays(&self) -> u32 {
        self.0.plays.get()
    }

    pub(crate) fn pauses(&self) -> u32 {
        self.0.pauses.get()
    }

    pub(crate) fn mounts(&self) -> u32 {
        self.0.mounts.get()
    }

    pub(crate) fn set_reject_play(&self, reject: bool) {
        self.0.reject_play.set(reject);
    }

    pub(crate) fn set_element_bound(&self, bound: bool) {
        self.0.element_bound.set(bound);
    }

    pub(crate) fn set_fail_mount(&self, fail: bool) {
        self.0.fail_mount.set(fail);
    }
}

impl MediaElement for MockMedia {
    async fn play(&self) -> Result<(), MediaError> {
        if self.0.reject_play.get() {
            return Err(MediaError::PlayRejected("NotAllowedError".to_string()));
        }
        self.0.plays.set(self.0.plays.get() + 1);
        Ok(())
    }

    fn pause(&self) -> Result<(), MediaError> {
        self.0.pauses.set(self.0.pauses.get() + 1);
        Ok(())
    }
}

impl SurpriseMedia for MockMedia {
    fn mount(&self) -> Result<(), MediaError> {
        if self.0.fail_mount.get() {
            return Err(MediaError::Other("createElement failed".to_string()));
        }
        self.0.mounts.set(self.0.mounts.get() + 1);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MockEffects
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct EffectsInner {
    reduced_motion: Cell<bool>,
    bursts: RefCell<Vec<Burst>>,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct MockEffects(Rc<EffectsInner>);

impl MockEffects {
    pub(crate) fn set_reduced_motion(&self, reduced: bool) {
        self.0.reduced_motion.set(reduced);
    }

    pub(crate) fn bursts(&self) -> Vec<Burst> {
        self.0.bursts.borrow().clone()
    }
}

impl CelebrationEffects for MockEffects {
    fn prefers_reduced_motion(&self) -> bool {
        self.0.reduced_motion.get()
    }

    fn burst(&self, burst: &Burst) {
        self.0.bursts.borrow_mut().push(*burst);
    }
}

// ---------------------------------------------------------------------------
// RecordingPresenter
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default)]
pub(crate) struct RecordingPresenter(Rc<RefCell<Vec<(SessionState, Changes)>>>);

impl RecordingPresenter {
    pub(crate) fn applied(&self) -> Vec<(SessionState, Changes)> {
        self.0.borrow().clone()
    }
}

impl Presenter for RecordingPresenter {
    fn apply(&mut self, state: &SessionState, changes: Changes) {
        self.0.borrow_mut().push((*state, changes));
    }
}
