// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic frame loop around a [`TransitionController`].

use core::fmt;

use kurbo::{Point, Rect};

use vitrine_core::backend::Presenter;
use vitrine_core::config::{ConfigError, HeroConfig};
use vitrine_core::controller::{
    LoadOutcome, SessionEnd, TickOutcome, TransitionController, TriggerOutcome,
};
use vitrine_core::cycle::{PatternSource, SlotIndex};
use vitrine_core::time::HostTime;
use vitrine_core::trace::{
    FrameSummaryBuilder, FrameTickEvent, LoadEvent, PhaseBeginEvent, PhaseEndEvent, PhaseKind,
    TransitionEndEvent, Tracer, TriggerEvent,
};

use crate::display::SimulatedDisplay;
use crate::presenter::RecordingPresenter;
use crate::visibility::{VisibilityReport, VisibilityTracker};

/// Overlay widths kept by the harness's [`VisibilityTracker`].
pub const HISTORY: usize = 32;

/// Default viewport rect of the hero frame.
pub const DEFAULT_FRAME: Rect = Rect::new(0.0, 0.0, 1280.0, 720.0);

/// Result of [`Harness::run_until_idle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames stepped.
    pub frames: u32,
    /// Last session that ended during the run.
    pub ended: Option<SessionEnd>,
    /// Whether the controller stopped animating within the frame budget.
    pub settled: bool,
}

/// Drives a controller from a [`SimulatedDisplay`] into a [`Presenter`],
/// checking every presented frame and emitting trace events the way a host
/// backend does.
pub struct Harness<'a, P: Presenter = RecordingPresenter> {
    controller: TransitionController,
    display: SimulatedDisplay,
    presenter: P,
    tracker: VisibilityTracker<HISTORY>,
    tracer: Tracer<'a>,
    frame: Rect,
}

impl<P: Presenter> fmt::Debug for Harness<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Harness")
            .field("controller", &self.controller)
            .field("display", &self.display)
            .field("report", &self.tracker.report())
            .field("frame", &self.frame)
            .finish_non_exhaustive()
    }
}

impl Harness<'static> {
    /// Creates a 60 Hz harness over the hero video pool, recording frames.
    pub fn new(config: HeroConfig) -> Result<Self, ConfigError> {
        Self::with_presenter(config, RecordingPresenter::new())
    }
}

impl<'a, P: Presenter> Harness<'a, P> {
    /// Creates a 60 Hz harness presenting into `presenter`.
    ///
    /// The frame is laid out at [`DEFAULT_FRAME`] before this returns.
    pub fn with_presenter(config: HeroConfig, presenter: P) -> Result<Self, ConfigError> {
        let mut controller = TransitionController::new(
            config,
            SimulatedDisplay::TIMEBASE,
            &PatternSource::HERO_VIDEOS,
        )?;
        controller.layout(DEFAULT_FRAME.size());
        Ok(Self {
            controller,
            display: SimulatedDisplay::default(),
            presenter,
            tracker: VisibilityTracker::new(),
            tracer: Tracer::none(),
            frame: DEFAULT_FRAME,
        })
    }

    /// Routes events to `tracer` from now on.
    #[must_use]
    pub fn with_tracer<'b>(self, tracer: Tracer<'b>) -> Harness<'b, P> {
        Harness {
            controller: self.controller,
            display: self.display,
            presenter: self.presenter,
            tracker: self.tracker,
            tracer,
            frame: self.frame,
        }
    }

    /// Replaces the tick source.
    #[must_use]
    pub fn with_display(mut self, display: SimulatedDisplay) -> Self {
        self.display = display;
        self
    }

    /// The driven controller.
    #[must_use]
    pub const fn controller(&self) -> &TransitionController {
        &self.controller
    }

    /// Mutable access for calls the harness does not wrap.
    pub fn controller_mut(&mut self) -> &mut TransitionController {
        &mut self.controller
    }

    /// The tick source.
    #[must_use]
    pub const fn display(&self) -> &SimulatedDisplay {
        &self.display
    }

    /// Mutable tick source, e.g. to [`stall`](SimulatedDisplay::stall).
    pub fn display_mut(&mut self) -> &mut SimulatedDisplay {
        &mut self.display
    }

    /// The presenter.
    #[must_use]
    pub const fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Visibility report over every presented frame.
    #[must_use]
    pub const fn report(&self) -> VisibilityReport {
        self.tracker.report()
    }

    /// The visibility tracker.
    #[must_use]
    pub const fn tracker(&self) -> &VisibilityTracker<HISTORY> {
        &self.tracker
    }

    /// Current viewport rect of the frame.
    #[must_use]
    pub const fn frame(&self) -> Rect {
        self.frame
    }

    /// Viewport rect of the preview card, as a host would measure it.
    #[must_use]
    pub fn preview_viewport_rect(&self) -> Rect {
        self.controller.preview_rect() + self.frame.origin().to_vec2()
    }

    /// Moves or resizes the frame.
    pub fn layout(&mut self, frame: Rect) -> bool {
        self.frame = frame;
        self.controller.layout(frame.size())
    }

    /// Moves the pointer to a viewport position.
    pub fn pointer_moved(&mut self, pointer: Point) -> bool {
        self.controller.pointer_moved(pointer, self.frame)
    }

    /// The pointer left the preview card.
    pub fn pointer_left(&mut self) {
        self.controller.pointer_left();
    }

    /// Clicks the trigger using the current preview and frame rects.
    pub fn trigger(&mut self) -> TriggerOutcome {
        let preview = self.preview_viewport_rect();
        self.trigger_with(preview, self.frame)
    }

    /// Clicks the trigger with explicitly measured rects.
    pub fn trigger_with(&mut self, preview: Rect, frame: Rect) -> TriggerOutcome {
        let outcome = self.controller.trigger(preview, frame);
        self.tracer.trigger(&TriggerEvent {
            timestamp: self.display.now(),
            outcome,
        });
        outcome
    }

    /// Delivers one media load signal.
    pub fn media_loaded(&mut self, slot: SlotIndex) -> LoadOutcome {
        let outcome = self.controller.media_loaded(slot);
        self.tracer.media_loaded(&LoadEvent {
            timestamp: self.display.now(),
            slot,
            outcome,
        });
        outcome
    }

    /// Delivers the three load signals of a fresh page: the background shows
    /// the active slot, and the preview and overlay both show the next one.
    pub fn load_initial_media(&mut self) -> LoadOutcome {
        let active = self.controller.active();
        let next = self.controller.next();
        self.media_loaded(active);
        self.media_loaded(next);
        self.media_loaded(next)
    }

    /// Cancels the running session, if any.
    pub fn cancel_transition(&mut self) -> Option<SessionEnd> {
        let end = self.controller.cancel_transition();
        self.trace_end(None, end);
        end
    }

    /// Tears the controller down.
    pub fn teardown(&mut self) -> Option<SessionEnd> {
        let end = self.controller.teardown();
        self.trace_end(None, end);
        end
    }

    /// Runs one frame: tick, advance, present.
    pub fn step(&mut self) -> TickOutcome {
        let tick = self.display.next_tick();
        let tick_event = FrameTickEvent::from(&tick);
        self.tracer.frame_tick(&tick_event);
        let mut summary = FrameSummaryBuilder::new(&tick_event);

        self.phase_begin(&mut summary, PhaseKind::Advance, tick.frame_index, tick.now);
        let outcome = self.controller.tick(tick);
        self.trace_end(Some(tick.frame_index), outcome.ended);
        summary.set_outcome(self.controller.phase(), &outcome);
        self.phase_end(&mut summary, PhaseKind::Advance, tick.frame_index, tick.now);

        self.phase_begin(&mut summary, PhaseKind::Present, tick.frame_index, tick.now);
        let frame = self.controller.take_frame();
        self.presenter.present(&frame);
        self.tracker.observe(&frame);
        self.phase_end(&mut summary, PhaseKind::Present, tick.frame_index, tick.now);

        self.tracer.frame_summary(&summary.finish());
        outcome
    }

    /// Runs `frames` frames. Returns the last session that ended, if any.
    pub fn run_frames(&mut self, frames: u32) -> Option<SessionEnd> {
        let mut ended = None;
        for _ in 0..frames {
            ended = self.step().ended.or(ended);
        }
        ended
    }

    /// Steps until nothing is animating, or `max_frames` have run.
    pub fn run_until_idle(&mut self, max_frames: u32) -> RunSummary {
        let mut summary = RunSummary {
            frames: 0,
            ended: None,
            settled: false,
        };
        while summary.frames < max_frames {
            let outcome = self.step();
            summary.frames += 1;
            summary.ended = outcome.ended.or(summary.ended);
            if !outcome.animating {
                summary.settled = true;
                break;
            }
        }
        summary
    }

    fn trace_end(&mut self, frame_index: Option<u64>, end: Option<SessionEnd>) {
        if let Some(end) = end {
            self.tracer.transition_end(&TransitionEndEvent {
                frame_index,
                timestamp: self.display.now(),
                end,
            });
        }
    }

    fn phase_begin(
        &mut self,
        summary: &mut FrameSummaryBuilder,
        phase: PhaseKind,
        frame_index: u64,
        t: HostTime,
    ) {
        summary.phase_begin(phase, t);
        self.tracer.phase_begin(&PhaseBeginEvent {
            frame_index,
            phase,
            timestamp: t,
        });
    }

    fn phase_end(
        &mut self,
        summary: &mut FrameSummaryBuilder,
        phase: PhaseKind,
        frame_index: u64,
        t: HostTime,
    ) {
        summary.phase_end(phase, t);
        self.tracer.phase_end(&PhaseEndEvent {
            frame_index,
            phase,
            timestamp: t,
        });
    }
}
