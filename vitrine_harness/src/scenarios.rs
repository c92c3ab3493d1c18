// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multi-frame scenarios driven through [`Harness`].

use alloc::vec::Vec;

use kurbo::{Point, Rect};

use vitrine_core::config::{HeroConfig, RetriggerPolicy};
use vitrine_core::controller::{
    IgnoreReason, LoadOutcome, Phase, SessionEnd, SessionId, TriggerOutcome,
};
use vitrine_core::cycle::SlotIndex;
use vitrine_core::smoother::Axis;
use vitrine_core::time::Duration;
use vitrine_core::trace::{
    FrameSummary, FrameTickEvent, LoadEvent, TraceSink, TransitionEndEvent, Tracer, TriggerEvent,
};

use crate::{Harness, RecordingPresenter};

fn slot(i: u32) -> SlotIndex {
    SlotIndex::new(i).unwrap()
}

fn ready_harness(config: HeroConfig) -> Harness<'static, RecordingPresenter> {
    let mut h = Harness::with_presenter(config, RecordingPresenter::new()).unwrap();
    assert_eq!(h.load_initial_media(), LoadOutcome::Opened);
    h.step();
    h
}

#[test]
fn loading_overlay_hides_after_three_signals() {
    let mut h = Harness::new(HeroConfig::standard()).unwrap();
    h.step();
    assert!(!h.presenter().last().unwrap().ready);

    assert_eq!(
        h.media_loaded(slot(1)),
        LoadOutcome::Counted {
            loaded: 1,
            required: 3
        }
    );
    h.step();
    assert!(!h.presenter().last().unwrap().ready);

    h.media_loaded(slot(2));
    assert_eq!(h.media_loaded(slot(2)), LoadOutcome::Opened);
    assert_eq!(h.media_loaded(slot(3)), LoadOutcome::AlreadyReady);
    h.step();
    assert!(h.presenter().last().unwrap().ready);
    assert_eq!(h.controller().gate().loaded(), 3);
}

#[test]
fn trigger_expands_overlay_and_advances() {
    let mut h = ready_harness(HeroConfig::standard());
    assert_eq!(
        h.trigger(),
        TriggerOutcome::Started {
            session: SessionId(0),
            next: slot(2)
        }
    );

    let run = h.run_until_idle(200);
    assert!(run.settled, "transition should settle: {run:?}");
    assert!(
        (58..=60).contains(&run.frames),
        "950 ms at 60 Hz plus one arming tick, got {}",
        run.frames
    );
    assert_eq!(
        run.ended,
        Some(SessionEnd::Completed {
            session: SessionId(0),
            active: slot(2)
        })
    );
    assert_eq!(h.controller().active(), slot(2));
    assert_eq!(h.controller().next(), slot(3));
    assert_eq!(h.controller().phase(), Phase::Idle);

    let last = h.presenter().last().unwrap();
    assert!(last.interactive);
    assert!(!last.overlay.element.is_shown());
    assert_eq!(last.preview.slot, slot(3));
}

#[test]
fn four_transitions_wrap_to_first_slot() {
    let mut h = ready_harness(HeroConfig::standard());
    let mut visited = Vec::new();
    for _ in 0..4 {
        assert!(h.trigger().started().is_some());
        assert!(h.run_until_idle(200).settled);
        visited.push(h.controller().active().get());
    }
    assert_eq!(visited, [2, 3, 4, 1]);
    assert_eq!(h.presenter().restarts(), 4, "one restart per transition");
    assert!(h.report().is_clean(), "{:?}", h.report());
}

#[test]
fn next_slot_is_shown_exactly_once_every_frame() {
    let mut h = ready_harness(HeroConfig::standard());
    h.pointer_moved(Point::new(900.0, 500.0));
    h.run_frames(5);
    h.trigger();
    h.pointer_moved(Point::new(10.0, 10.0));
    h.run_until_idle(200);
    h.pointer_moved(Point::new(640.0, 360.0));
    h.run_until_idle(200);

    let report = h.report();
    assert!(report.is_clean(), "{report:?}");
    assert!(report.transitioning_frames > 50, "{report:?}");
    assert_eq!(report.total_frames, h.presenter().frames().len() as u64);
}

#[test]
fn overlay_grows_from_preview_to_full_frame() {
    let mut h = ready_harness(HeroConfig::standard());
    let start = h.preview_viewport_rect();
    h.trigger();
    h.run_until_idle(200);

    let overlays: Vec<_> = h
        .presenter()
        .frames()
        .iter()
        .filter(|f| f.transitioning)
        .map(|f| f.overlay)
        .collect();
    assert!(!overlays.is_empty());

    let first = overlays[0];
    assert_eq!(first.element.rect, start);
    assert_eq!(first.corner_radius, 12.0);
    assert!(first.restart_playback);
    assert!(overlays[1..].iter().all(|o| !o.restart_playback));

    for pair in overlays.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        assert!(b.element.rect.width() >= a.element.rect.width());
        assert!(b.element.rect.height() >= a.element.rect.height());
        assert!(b.corner_radius <= a.corner_radius);
    }
    let last = overlays[overlays.len() - 1];
    assert!(last.element.rect.width() <= h.frame().width());
    assert!(last.corner_radius >= 0.0);
}

#[test]
fn rapid_second_click_is_ignored() {
    let mut h = ready_harness(HeroConfig::standard());
    assert!(h.trigger().started().is_some());
    assert_eq!(
        h.trigger(),
        TriggerOutcome::Ignored(IgnoreReason::Transitioning)
    );
    h.run_frames(10);
    assert_eq!(
        h.trigger(),
        TriggerOutcome::Ignored(IgnoreReason::Transitioning)
    );

    let run = h.run_until_idle(200);
    assert_eq!(
        run.ended,
        Some(SessionEnd::Completed {
            session: SessionId(0),
            active: slot(2)
        })
    );
    assert_eq!(h.controller().active(), slot(2), "one click, one advance");
    assert_eq!(h.presenter().restarts(), 1);
}

#[test]
fn preempting_trigger_restarts_the_same_advance() {
    let config = HeroConfig {
        retrigger: RetriggerPolicy::Preempt,
        ..HeroConfig::standard()
    };
    let mut h = ready_harness(config);
    h.trigger();
    h.run_frames(10);
    assert_eq!(
        h.trigger(),
        TriggerOutcome::Preempted {
            cancelled: SessionId(0),
            session: SessionId(1),
            next: slot(2)
        }
    );

    let run = h.run_until_idle(200);
    assert_eq!(
        run.ended,
        Some(SessionEnd::Completed {
            session: SessionId(1),
            active: slot(2)
        })
    );
    assert_eq!(h.presenter().restarts(), 2);
    assert!(h.report().is_clean(), "{:?}", h.report());
}

#[test]
fn teardown_mid_transition_freezes_output() {
    let mut h = ready_harness(HeroConfig::standard());
    h.trigger();
    h.run_frames(5);
    assert_eq!(
        h.teardown(),
        Some(SessionEnd::Cancelled {
            session: SessionId(0),
            target: slot(2)
        })
    );

    let outcome = h.step();
    assert!(!outcome.animating);
    assert_eq!(outcome.step, Duration::ZERO);
    let frame = *h.presenter().last().unwrap();
    assert!(!frame.transitioning);
    assert!(!frame.interactive);
    assert!(!frame.overlay.element.is_shown());
    assert_eq!(frame.active, slot(1), "a cancelled session never advances");

    assert_eq!(h.trigger(), TriggerOutcome::Ignored(IgnoreReason::TornDown));
    assert_eq!(h.media_loaded(slot(1)), LoadOutcome::TornDown);
    assert!(!h.pointer_moved(Point::new(100.0, 100.0)));

    h.run_frames(10);
    assert!(h.presenter().frames().iter().rev().take(10).all(|f| *f == frame));
    assert!(h.report().is_clean(), "{:?}", h.report());
}

#[test]
fn cancel_restores_idle_preview() {
    let mut h = ready_harness(HeroConfig::standard());
    let before = h.controller().preview_rect();
    h.trigger();
    h.run_frames(20);
    assert!(matches!(
        h.cancel_transition(),
        Some(SessionEnd::Cancelled { .. })
    ));
    h.step();

    let frame = h.presenter().last().unwrap();
    assert!(frame.interactive);
    assert!(frame.preview.element.is_shown());
    assert_eq!(frame.preview.element.rect, before);
    assert_eq!(frame.active, slot(1));
    assert_eq!(h.cancel_transition(), None);
}

#[test]
fn stalled_display_clamps_the_step() {
    let mut h = ready_harness(HeroConfig::standard());
    h.trigger();
    h.step();
    h.display_mut().stall(Duration(5_000_000_000));

    let outcome = h.step();
    assert_eq!(outcome.step, Duration(100_000_000));
    assert_eq!(outcome.ended, None, "a stall must not finish the transition");
    assert!(h.controller().session().is_some());
}

#[test]
fn preview_follows_pointer_and_settles() {
    let mut h = ready_harness(HeroConfig::standard());
    assert_eq!(h.controller().smoother().position(), Point::new(512.0, 232.0));

    assert!(h.pointer_moved(Point::new(100.0, 100.0)));
    let run = h.run_until_idle(100);
    assert!(run.settled);
    assert!(
        (27..=29).contains(&run.frames),
        "450 ms at 60 Hz, got {}",
        run.frames
    );
    assert_eq!(h.controller().smoother().position(), Point::ORIGIN);
}

#[test]
fn pointer_is_ignored_while_transitioning() {
    let mut h = ready_harness(HeroConfig::standard());
    h.trigger();
    h.step();
    assert!(!h.pointer_moved(Point::new(1200.0, 700.0)));
    h.run_until_idle(200);
    assert_eq!(h.controller().smoother().position(), Point::new(512.0, 232.0));
}

#[test]
fn resize_moves_baseline_not_preview() {
    let mut h = ready_harness(HeroConfig::standard());
    assert!(h.layout(Rect::new(40.0, 20.0, 840.0, 620.0)));
    let smoother = h.controller().smoother();
    assert_eq!(smoother.position(), Point::new(512.0, 232.0));
    assert_eq!(smoother.axis(Axis::X).baseline(), 272.0);
    assert_eq!(smoother.axis(Axis::Y).baseline(), 172.0);
    assert_eq!(
        h.preview_viewport_rect().origin(),
        Point::new(552.0, 252.0)
    );
}

#[derive(Debug, Default)]
struct Counts {
    ticks: u32,
    triggers: u32,
    ignored: u32,
    ends: u32,
    loads: u32,
    summaries: u32,
}

impl TraceSink for Counts {
    fn on_frame_tick(&mut self, _: &FrameTickEvent) {
        self.ticks += 1;
    }

    fn on_trigger(&mut self, e: &TriggerEvent) {
        self.triggers += 1;
        if matches!(e.outcome, TriggerOutcome::Ignored(_)) {
            self.ignored += 1;
        }
    }

    fn on_transition_end(&mut self, _: &TransitionEndEvent) {
        self.ends += 1;
    }

    fn on_media_loaded(&mut self, _: &LoadEvent) {
        self.loads += 1;
    }

    fn on_frame_summary(&mut self, _: &FrameSummary) {
        self.summaries += 1;
    }
}

#[test]
fn frame_loop_reports_to_trace_sink() {
    let mut counts = Counts::default();
    let frames = {
        let mut h = Harness::new(HeroConfig::standard())
            .unwrap()
            .with_tracer(Tracer::new(&mut counts));
        h.load_initial_media();
        h.trigger();
        h.trigger();
        h.run_until_idle(200).frames
    };
    assert_eq!(counts.loads, 3);
    assert_eq!(counts.triggers, 2);
    assert_eq!(counts.ignored, 1);
    assert_eq!(counts.ends, 1);
    assert_eq!(counts.ticks, frames);
    assert_eq!(counts.summaries, frames);
}
