// Copyright 2026 the Keepsake Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The presentation controller.
//!
//! [`Controller`] owns the [`SessionState`] and is the only thing that
//! mutates it. Each handler performs its synchronous state change first,
//! presents it, and only then awaits audio or media operations, so the
//! visual response never waits on audio readiness.
//!
//! All handlers take `&self`. State lives in a `Cell` and the presenter and
//! tracer are only borrowed for the duration of one call, so any number of
//! handler futures may be pending at once on the UI thread.
//!
//! # Wiring
//!
//! ```rust,ignore
//! let audio = AudioHandle::init(config.audio, WebAudioGraph::open);
//! audio.attach(music_element);
//! let controller = Rc::new(Controller::new(config, audio, effects, surprise, presenter));
//! controller.mount();
//!
//! // On click:
//! let c = Rc::clone(&controller);
//! spawn_local(async move { c.blow_candles().await });
//! ```

use core::cell::{Cell, RefCell};
use core::future::Future;

use log::{debug, error, warn};

use crate::audio::{AudioHandle, BindOutcome};
use crate::backend::{AudioGraph, CelebrationEffects, Presenter, SurpriseMedia};
use crate::changes::Changes;
use crate::config::GiftConfig;
use crate::effects::celebrate;
use crate::error::AudioOp;
use crate::session::{CandleGroup, SessionState, SurprisePhase, SurpriseSignal};
use crate::trace::{Action, AudioEvent, CelebrationEvent, MediaEvent, Tracer, TransitionEvent};

/// Owns the session state and mediates between input events and the
/// audio, effects and surprise capabilities.
pub struct Controller<G, E, S, P>
where
    G: AudioGraph,
{
    config: GiftConfig,
    state: Cell<SessionState>,
    audio: AudioHandle<G>,
    effects: E,
    surprise: S,
    presenter: RefCell<P>,
    tracer: RefCell<Tracer>,
}

impl<G, E, S, P> core::fmt::Debug for Controller<G, E, S, P>
where
    G: AudioGraph,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Controller")
            .field("config", &self.config)
            .field("state", &self.state.get())
            .field("audio", &self.audio)
            .finish_non_exhaustive()
    }
}

impl<G, E, S, P> Controller<G, E, S, P>
where
    G: AudioGraph,
    E: CelebrationEffects,
    S: SurpriseMedia,
    P: Presenter,
{
    /// Creates a controller with a fresh session.
    ///
    /// Nothing is presented until [`mount`](Self::mount) is called.
    pub fn new(
        config: GiftConfig,
        audio: AudioHandle<G>,
        effects: E,
        surprise: S,
        presenter: P,
    ) -> Self {
        let state = SessionState {
            audio_available: audio.is_ready(),
            ..SessionState::default()
        };
        Self {
            config,
            state: Cell::new(state),
            audio,
            effects,
            surprise,
            presenter: RefCell::new(presenter),
            tracer: RefCell::new(Tracer::none()),
        }
    }

    /// Replaces the tracer.
    #[must_use]
    pub fn with_tracer(self, tracer: Tracer) -> Self {
        *self.tracer.borrow_mut() = tracer;
        self
    }

    /// Presents the full current state.
    pub fn mount(&self) {
        let state = self.state.get();
        self.presenter.borrow_mut().apply(&state, Changes::all());
        self.tracer.borrow_mut().transition(&TransitionEvent {
            action: Action::Mount,
            before: state,
            after: state,
            changes: Changes::all(),
        });
        let event = if state.audio_available {
            AudioEvent::Opened
        } else {
            AudioEvent::Unavailable
        };
        self.tracer.borrow_mut().audio(&event);
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state.get()
    }

    /// The candles, derived from the current state.
    #[must_use]
    pub fn candles(&self) -> CandleGroup {
        self.state.get().candles(self.config.candle_count)
    }

    /// The audio handle.
    #[must_use]
    pub fn audio(&self) -> &AudioHandle<G> {
        &self.audio
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &GiftConfig {
        &self.config
    }

    /// Blows out the candles.
    ///
    /// Synchronously, before the returned future is polled: marks the
    /// candles blown and fires the celebration. The future then starts the
    /// music with a fade-in, unless music is already playing or audio is
    /// unavailable.
    ///
    /// Once the candles are blown, further calls do nothing.
    pub fn blow_candles(&self) -> impl Future<Output = ()> + '_ {
        let first = !self.state.get().candles_blown;
        if first {
            self.update(Action::BlowCandles, |s| s.candles_blown = true);
            let reduced_motion = self.effects.prefers_reduced_motion();
            let bursts = celebrate(&self.effects, &self.config.confetti);
            self.tracer.borrow_mut().celebration(&CelebrationEvent {
                bursts,
                reduced_motion,
            });
        }
        async move {
            if !first || self.state.get().music_playing {
                return;
            }
            if !self.audio.is_ready() {
                debug!("audio unavailable; candles blown without music");
                return;
            }
            self.start_music_with_fade().await;
        }
    }

    /// Toggles the background music.
    ///
    /// Does nothing (with a warning) if audio is unavailable. Otherwise
    /// resumes a suspended context first, then pauses if playing, or
    /// restores a decayed gain and resumes playback.
    pub async fn toggle_music(&self) {
        if !self.audio.is_ready() {
            warn!("audio components not ready; ignoring music toggle");
            return;
        }
        if !self.prepare_audio().await {
            return;
        }

        if self.state.get().music_playing {
            match self.audio.pause() {
                Ok(()) => {
                    self.trace_audio(AudioEvent::Paused);
                    self.update(Action::ToggleMusic, |s| s.music_playing = false);
                }
                Err(err) => error!("failed to pause music: {err}"),
            }
            return;
        }

        match self.audio.restore_gain() {
            Ok(true) => self.trace_audio(AudioEvent::GainRestored),
            Ok(false) => {}
            Err(err) => warn!("failed to restore music volume: {err}"),
        }
        match self.audio.play().await {
            Ok(()) => {
                self.trace_audio(AudioEvent::Playing);
                self.update(Action::ToggleMusic, |s| s.music_playing = true);
            }
            Err(err) => {
                self.trace_audio(AudioEvent::PlayRejected);
                error!("audio play error in music toggle: {err}");
            }
        }
    }

    /// Reveals the surprise video: mounts it and shows the loading
    /// indicator. One-way; repeat calls do nothing.
    pub fn request_surprise(&self) {
        if self.state.get().surprise != SurprisePhase::Hidden {
            return;
        }
        match self.surprise.mount() {
            Ok(()) => {
                self.trace_media(MediaEvent::Mounted);
                self.update(Action::RequestSurprise, |s| {
                    s.surprise = SurprisePhase::Loading;
                });
            }
            Err(err) => {
                self.trace_media(MediaEvent::MountFailed);
                error!("failed to mount surprise video: {err}");
                self.update(Action::RequestSurprise, |s| {
                    s.surprise = SurprisePhase::Failed;
                });
            }
        }
    }

    /// The surprise video can play.
    ///
    /// Synchronously hides the loading indicator; the returned future starts
    /// playback. Only the first ready signal after loading starts playback,
    /// so later ones (e.g. after the user seeks) do not override manual
    /// pauses.
    pub fn surprise_ready(&self) -> impl Future<Output = ()> + '_ {
        let first = self.state.get().surprise == SurprisePhase::Loading;
        if first {
            self.update(Action::SurpriseReady, |s| s.surprise = SurprisePhase::Ready);
        }
        async move {
            if !first {
                return;
            }
            match self.surprise.play().await {
                Ok(()) => self.trace_media(MediaEvent::PlaybackStarted),
                Err(err) => {
                    self.trace_media(MediaEvent::PlaybackRejected);
                    warn!("video autoplay error: {err}");
                }
            }
        }
    }

    /// The surprise video failed to load. The element stays mounted and
    /// shows its native error state; there is no retry.
    pub fn surprise_error(&self) {
        if !self.state.get().show_surprise() {
            return;
        }
        self.trace_media(MediaEvent::LoadFailed);
        error!("surprise video failed to load");
        self.update(Action::SurpriseError, |s| s.surprise = SurprisePhase::Failed);
    }

    /// Dispatches a signal from the surprise video element.
    pub fn handle_surprise_signal(
        &self,
        signal: SurpriseSignal,
    ) -> impl Future<Output = ()> + '_ {
        let ready = match signal {
            SurpriseSignal::CanPlay | SurpriseSignal::LoadedData => Some(self.surprise_ready()),
            SurpriseSignal::Error => {
                self.surprise_error();
                None
            }
        };
        async move {
            if let Some(ready) = ready {
                ready.await;
            }
        }
    }

    /// Tears down the audio graph. Call on page unload.
    ///
    /// Music is marked stopped and unavailable before the graph closes, so
    /// the music button is disabled rather than left on a dead graph.
    pub async fn dispose(&self) {
        self.update(Action::Dispose, |s| {
            s.audio_available = false;
            s.music_playing = false;
        });
        self.audio.dispose().await;
        self.trace_audio(AudioEvent::Disposed);
    }

    // -- internals ---------------------------------------------------------

    async fn start_music_with_fade(&self) {
        if !self.prepare_audio().await {
            return;
        }
        match self.audio.fade_in() {
            Ok((start, end)) => self.trace_audio(AudioEvent::FadeScheduled { start, end }),
            Err(err) => {
                self.trace_audio(AudioEvent::Failed(AudioOp::Schedule));
                error!("failed to schedule music fade-in: {err}");
                return;
            }
        }
        match self.audio.play().await {
            Ok(()) => {
                self.trace_audio(AudioEvent::Playing);
                self.update(Action::MusicStarted, |s| s.music_playing = true);
            }
            Err(err) => {
                self.trace_audio(AudioEvent::PlayRejected);
                error!("audio play error after blowing candles: {err}");
            }
        }
    }

    /// Resumes the context and makes sure the source is bound. Returns
    /// `false` (after logging) if playback must be abandoned.
    async fn prepare_audio(&self) -> bool {
        match self.audio.ensure_running().await {
            Ok(true) => self.trace_audio(AudioEvent::Resumed),
            Ok(false) => {}
            Err(err) => {
                self.trace_audio(AudioEvent::Failed(AudioOp::Resume));
                error!("error resuming audio context: {err}");
                return false;
            }
        }
        match self.audio.bind() {
            Ok(BindOutcome::Created) => self.trace_audio(AudioEvent::SourceBound),
            Ok(BindOutcome::AlreadyBound) => self.trace_audio(AudioEvent::SourceAlreadyBound),
            Ok(BindOutcome::Existing) => {}
            Err(err) => {
                self.trace_audio(AudioEvent::Failed(AudioOp::Bind));
                error!("audio source creation failed: {err}");
                return false;
            }
        }
        true
    }

    /// Applies `f` to a copy of the state, stores it, and presents the
    /// changed channels.
    fn update(&self, action: Action, f: impl FnOnce(&mut SessionState)) {
        let before = self.state.get();
        let mut after = before;
        f(&mut after);
        self.state.set(after);

        let changes = Changes::between(&before, &after);
        if !changes.is_empty() {
            self.presenter.borrow_mut().apply(&after, changes);
        }
        self.tracer.borrow_mut().transition(&TransitionEvent {
            action,
            before,
            after,
            changes,
        });
    }

    fn trace_audio(&self, event: AudioEvent) {
        self.tracer.borrow_mut().audio(&event);
    }

    fn trace_media(&self, event: MediaEvent) {
        self.tracer.borrow_mut().media(&event);
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use core::pin::pin;
    use core::task::Poll;

    use super::*;
    use crate::backend::ContextState;
    use crate::testing::{
        Gate, GraphCall, MockEffects, MockGraph, MockMedia, RecordingPresenter, poll_once,
    };

    type TestController = Controller<MockGraph, MockEffects, MockMedia, RecordingPresenter>;

    struct Rig {
        graph: MockGraph,
        music: MockMedia,
        effects: MockEffects,
        video: MockMedia,
        presenter: RecordingPresenter,
        controller: TestController,
    }

    fn rig_with(graph: Option<MockGraph>) -> Rig {
        let config = GiftConfig::web();
        let music = MockMedia::default();
        let audio = match &graph {
            Some(graph) => {
                let graph = graph.clone();
                AudioHandle::init(config.audio, move || Ok(graph))
            }
            None => AudioHandle::disabled(config.audio),
        };
        audio.attach(music.clone());
        let effects = MockEffects::default();
        let video = MockMedia::default();
        let presenter = RecordingPresenter::default();
        let controller = Controller::new(
            config,
            audio,
            effects.clone(),
            video.clone(),
            presenter.clone(),
        );
        controller.mount();
        Rig {
            graph: graph.unwrap_or_default(),
            music,
            effects,
            video,
            presenter,
            controller,
        }
    }

    fn rig() -> Rig {
        rig_with(Some(MockGraph::default()))
    }

    fn ramps(graph: &MockGraph) -> usize {
        graph.count(|c| matches!(c, GraphCall::Ramp { .. }))
    }

    fn assert_invariants(state: &SessionState) {
        assert!(
            !state.surprise_loading() || state.show_surprise(),
            "loading without a visible surprise: {state:?}"
        );
    }

    #[test]
    fn mount_presents_everything() {
        let rig = rig();
        let applied = rig.presenter.applied();
        assert_eq!(applied.len(), 1, "one initial presentation");
        assert_eq!(applied[0].1, Changes::all(), "every channel presented");
        assert!(applied[0].0.audio_available(), "audio reported available");
    }

    #[test]
    fn blow_candles_fades_music_in() {
        let rig = rig();
        rig.graph.set_state(ContextState::Suspended);
        rig.graph.set_time(4.0);

        pollster::block_on(rig.controller.blow_candles());

        let state = rig.controller.state();
        assert!(state.candles_blown(), "candles blown");
        assert!(state.music_playing(), "music playing");
        assert_eq!(rig.effects.bursts().len(), 3, "three confetti bursts");
        assert_eq!(rig.music.plays(), 1, "playback started once");
        assert_eq!(
            rig.graph.calls(),
            [
                GraphCall::Bind,
                GraphCall::Resume,
                GraphCall::SetGain { value: 0.0, time: 4.0 },
                GraphCall::Ramp { value: 1.0, end_time: 6.0 },
            ],
            "bind on attach, resume, then a two second ramp from silence"
        );
        assert!(!rig.controller.candles().is_lit(), "flames out");
    }

    #[test]
    fn visual_response_precedes_audio() {
        let rig = rig();
        let gate = Gate::default();
        rig.graph.set_state(ContextState::Suspended);
        rig.graph.gate_resume(&gate);

        let fut = rig.controller.blow_candles();
        assert!(rig.controller.state().candles_blown(), "blown before polling");
        assert_eq!(rig.effects.bursts().len(), 3, "confetti before polling");

        let mut fut = pin!(fut);
        assert_eq!(poll_once(fut.as_mut()), Poll::Pending, "waiting on resume");
        assert!(!rig.controller.state().music_playing(), "not playing yet");

        gate.open();
        assert_eq!(poll_once(fut.as_mut()), Poll::Ready(()), "resume completed");
        assert!(rig.controller.state().music_playing(), "playing after resume");
    }

    #[test]
    fn blowing_twice_celebrates_and_fades_once() {
        let rig = rig();
        pollster::block_on(rig.controller.blow_candles());
        pollster::block_on(rig.controller.blow_candles());

        assert!(rig.controller.state().candles_blown(), "still blown");
        assert_eq!(rig.effects.bursts().len(), 3, "no second celebration");
        assert_eq!(ramps(&rig.graph), 1, "no second fade");
        assert_eq!(rig.music.plays(), 1, "no second play");
    }

    #[test]
    fn blowing_again_while_first_is_pending_does_nothing() {
        let rig = rig();
        let gate = Gate::default();
        rig.graph.set_state(ContextState::Suspended);
        rig.graph.gate_resume(&gate);

        let mut first = pin!(rig.controller.blow_candles());
        assert_eq!(poll_once(first.as_mut()), Poll::Pending, "first waits on resume");

        pollster::block_on(rig.controller.blow_candles());
        assert_eq!(rig.effects.bursts().len(), 3, "second call fired nothing");

        gate.open();
        assert_eq!(poll_once(first.as_mut()), Poll::Ready(()), "first completes");
        assert_eq!(ramps(&rig.graph), 1, "exactly one fade");
        assert_eq!(rig.music.plays(), 1, "exactly one play");
    }

    #[test]
    fn blowing_with_music_already_playing_skips_the_fade() {
        let rig = rig();
        pollster::block_on(rig.controller.toggle_music());
        assert!(rig.controller.state().music_playing(), "music on first");

        pollster::block_on(rig.controller.blow_candles());
        assert_eq!(rig.effects.bursts().len(), 3, "confetti still fires");
        assert_eq!(ramps(&rig.graph), 0, "no fade restart");
        assert_eq!(rig.music.plays(), 1, "no second play");
    }

    #[test]
    fn reduced_motion_skips_confetti_but_not_music() {
        let rig = rig();
        rig.effects.set_reduced_motion(true);
        pollster::block_on(rig.controller.blow_candles());

        assert!(rig.effects.bursts().is_empty(), "no confetti");
        assert!(rig.controller.state().music_playing(), "music still starts");
    }

    #[test]
    fn rejected_play_leaves_music_off() {
        let rig = rig();
        rig.music.set_reject_play(true);
        pollster::block_on(rig.controller.blow_candles());

        let state = rig.controller.state();
        assert!(state.candles_blown(), "candles still blown");
        assert!(!state.music_playing(), "autoplay blocked");
    }

    #[test]
    fn failed_resume_abandons_music_start() {
        let rig = rig();
        rig.graph.set_state(ContextState::Suspended);
        rig.graph.set_fail_resume(true);
        pollster::block_on(rig.controller.blow_candles());

        assert!(rig.controller.state().candles_blown(), "visual outcome unaffected");
        assert_eq!(ramps(&rig.graph), 0, "no fade scheduled");
        assert_eq!(rig.music.plays(), 0, "no play attempted");
    }

    #[test]
    fn toggle_on_off_on_restores_decayed_gain() {
        let rig = rig();

        pollster::block_on(rig.controller.toggle_music());
        assert!(rig.controller.state().music_playing(), "on");

        pollster::block_on(rig.controller.toggle_music());
        assert!(!rig.controller.state().music_playing(), "off");
        assert_eq!(rig.music.pauses(), 1, "paused, not stopped");

        rig.graph.set_gain(0.004);
        rig.graph.set_time(9.0);
        pollster::block_on(rig.controller.toggle_music());
        assert!(rig.controller.state().music_playing(), "on again");
        assert_eq!(
            rig.graph.calls().last(),
            Some(&GraphCall::SetGain { value: 1.0, time: 9.0 }),
            "decayed gain restored before playing"
        );
        assert_eq!(rig.music.plays(), 2, "resumed playback");
        assert_eq!(
            rig.graph.count(|c| matches!(c, GraphCall::Bind)),
            1,
            "graph not rebuilt"
        );
    }

    #[test]
    fn toggle_keeps_audible_gain() {
        let rig = rig();
        rig.graph.set_gain(0.4);
        pollster::block_on(rig.controller.toggle_music());
        assert_eq!(
            rig.graph.count(|c| matches!(c, GraphCall::SetGain { .. })),
            0,
            "gain above threshold is untouched"
        );
    }

    #[test]
    fn toggle_aborts_when_resume_fails() {
        let rig = rig();
        rig.graph.set_state(ContextState::Suspended);
        rig.graph.set_fail_resume(true);
        pollster::block_on(rig.controller.toggle_music());

        assert!(!rig.controller.state().music_playing(), "state unchanged");
        assert_eq!(rig.music.plays(), 0, "no play attempted");
    }

    #[test]
    fn toggle_binds_when_attach_could_not() {
        let graph = MockGraph::default();
        graph.set_fail_bind(true);
        let rig = rig_with(Some(graph));
        rig.graph.set_fail_bind(false);

        pollster::block_on(rig.controller.toggle_music());
        assert!(rig.controller.state().music_playing(), "bound on demand and playing");
    }

    #[test]
    fn without_audio_candles_still_blow() {
        let rig = rig_with(None);
        assert!(!rig.controller.state().audio_available(), "audio reported missing");

        pollster::block_on(rig.controller.blow_candles());
        assert!(rig.controller.state().candles_blown(), "candles blown");
        assert_eq!(rig.effects.bursts().len(), 3, "confetti fired");

        pollster::block_on(rig.controller.toggle_music());
        assert!(!rig.controller.state().music_playing(), "toggle is inert");
        assert_eq!(rig.music.plays(), 0, "nothing played");
    }

    #[test]
    fn surprise_loads_then_plays() {
        let rig = rig();
        rig.controller.request_surprise();

        let state = rig.controller.state();
        assert!(state.show_surprise() && state.surprise_loading(), "loading shown");
        assert_eq!(rig.video.mounts(), 1, "video mounted lazily");

        let fut = rig.controller.handle_surprise_signal(SurpriseSignal::CanPlay);
        assert!(!rig.controller.state().surprise_loading(), "indicator hidden first");
        pollster::block_on(fut);
        assert_eq!(rig.controller.state().surprise(), SurprisePhase::Ready, "ready");
        assert_eq!(rig.video.plays(), 1, "autoplay requested");

        pollster::block_on(rig.controller.handle_surprise_signal(SurpriseSignal::LoadedData));
        assert_eq!(rig.video.plays(), 1, "later ready signals do not replay");
    }

    #[test]
    fn loaded_data_alone_counts_as_ready() {
        let rig = rig();
        rig.controller.request_surprise();
        pollster::block_on(rig.controller.handle_surprise_signal(SurpriseSignal::LoadedData));
        assert_eq!(rig.controller.state().surprise(), SurprisePhase::Ready, "ready");
        assert_eq!(rig.video.plays(), 1, "autoplay requested");
    }

    #[test]
    fn surprise_error_clears_loading_without_retry() {
        let rig = rig();
        rig.controller.request_surprise();
        pollster::block_on(rig.controller.handle_surprise_signal(SurpriseSignal::Error));

        let state = rig.controller.state();
        assert_eq!(state.surprise(), SurprisePhase::Failed, "failed");
        assert!(state.show_surprise(), "video stays visible");
        assert!(!state.surprise_loading(), "indicator hidden");

        pollster::block_on(rig.controller.handle_surprise_signal(SurpriseSignal::CanPlay));
        assert_eq!(rig.video.plays(), 0, "no playback after failure");
        assert_eq!(rig.video.mounts(), 1, "no remount");
    }

    #[test]
    fn blocked_surprise_autoplay_is_not_an_error_state() {
        let rig = rig();
        rig.video.set_reject_play(true);
        rig.controller.request_surprise();
        pollster::block_on(rig.controller.surprise_ready());
        assert_eq!(rig.controller.state().surprise(), SurprisePhase::Ready, "still ready");
    }

    #[test]
    fn failed_mount_shows_failure() {
        let rig = rig();
        rig.video.set_fail_mount(true);
        rig.controller.request_surprise();
        let state = rig.controller.state();
        assert!(state.show_surprise(), "request is still one-way");
        assert!(!state.surprise_loading(), "nothing to wait for");
    }

    #[test]
    fn request_surprise_is_one_way() {
        let rig = rig();
        rig.controller.request_surprise();
        rig.controller.request_surprise();
        assert_eq!(rig.video.mounts(), 1, "mounted once");
        assert_eq!(rig.controller.state().surprise(), SurprisePhase::Loading, "unchanged");
    }

    #[test]
    fn signals_before_request_are_ignored() {
        let rig = rig();
        pollster::block_on(rig.controller.handle_surprise_signal(SurpriseSignal::Error));
        pollster::block_on(rig.controller.handle_surprise_signal(SurpriseSignal::CanPlay));
        assert_eq!(rig.controller.state().surprise(), SurprisePhase::Hidden, "still hidden");
        assert_eq!(rig.video.plays(), 0, "nothing played");
    }

    #[test]
    fn presenter_sees_only_changed_channels() {
        let rig = rig();
        pollster::block_on(rig.controller.blow_candles());
        rig.controller.request_surprise();

        let changes: Vec<Changes> = rig.presenter.applied().iter().map(|(_, c)| *c).collect();
        assert_eq!(
            changes,
            [Changes::all(), Changes::CANDLES, Changes::MUSIC, Changes::SURPRISE],
            "mount, blow, music start, surprise"
        );
    }

    #[test]
    fn state_is_monotone_and_consistent_across_any_order() {
        #[derive(Clone, Copy)]
        enum Op {
            Blow,
            Toggle,
            Request,
            Ready,
            Error,
        }
        let ops = [Op::Blow, Op::Toggle, Op::Request, Op::Ready, Op::Error];

        for first in ops {
            for second in ops {
                for third in ops {
                    let rig = rig();
                    let mut prev = rig.controller.state();
                    for op in [first, second, third, Op::Toggle, Op::Blow] {
                        match op {
                            Op::Blow => pollster::block_on(rig.controller.blow_candles()),
                            Op::Toggle => pollster::block_on(rig.controller.toggle_music()),
                            Op::Request => rig.controller.request_surprise(),
                            Op::Ready => pollster::block_on(rig.controller.surprise_ready()),
                            Op::Error => rig.controller.surprise_error(),
                        }
                        let now = rig.controller.state();
                        assert_invariants(&now);
                        assert!(
                            !prev.candles_blown() || now.candles_blown(),
                            "candles relit"
                        );
                        assert!(
                            !prev.show_surprise() || now.show_surprise(),
                            "surprise hidden again"
                        );
                        prev = now;
                    }
                }
            }
        }
    }

    #[test]
    fn dispose_tears_down_the_graph() {
        let rig = rig();
        pollster::block_on(rig.controller.dispose());
        assert_eq!(rig.graph.state(), ContextState::Closed, "context closed");
        assert!(!rig.controller.audio().is_ready(), "audio no longer ready");

        pollster::block_on(rig.controller.toggle_music());
        assert!(!rig.controller.state().music_playing(), "toggle inert after dispose");
    }

    #[test]
    fn dispose_disables_the_music_button() {
        let rig = rig();
        pollster::block_on(rig.controller.blow_candles());
        assert!(rig.controller.state().music_playing(), "playing before dispose");
        let presented = rig.presenter.applied().len();

        pollster::block_on(rig.controller.dispose());
        let state = rig.controller.state();
        assert!(!state.music_playing(), "music marked stopped");
        assert!(!state.audio_available(), "audio marked unavailable");

        let applied = rig.presenter.applied();
        assert_eq!(applied.len(), presented + 1, "one presentation for dispose");
        let (last_state, last_changes) = applied[presented];
        assert_eq!(
            last_changes,
            Changes::MUSIC | Changes::AUDIO,
            "music button re-presented"
        );
        assert!(!last_state.audio_available(), "presented as unavailable");

        pollster::block_on(rig.controller.toggle_music());
        assert_eq!(rig.music.pauses(), 0, "toggle does not touch the element");
        assert!(!rig.controller.state().music_playing(), "still stopped");
    }

    #[test]
    fn dispose_twice_presents_once() {
        let rig = rig();
        pollster::block_on(rig.controller.dispose());
        let presented = rig.presenter.applied().len();
        pollster::block_on(rig.controller.dispose());
        assert_eq!(rig.presenter.applied().len(), presented, "nothing left to present");
        assert_eq!(
            rig.graph.count(|c| matches!(c, GraphCall::Close)),
            1,
            "context closed once"
        );
    }
}
