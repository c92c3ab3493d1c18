// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are converted to microseconds using a [`Timebase`].

use std::io::Write;

use vitrine_core::controller::{LoadOutcome, SessionEnd, TriggerOutcome};
use vitrine_core::time::{HostTime, Timebase};
use vitrine_core::trace::{
    FrameSummary, FrameTickEvent, LoadEvent, PhaseBeginEvent, PhaseEndEvent, PhaseKind,
    TraceSink, TransitionEndEvent, TriggerEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    timebase: Timebase,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("timebase", &self.timebase)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr(timebase: Timebase) -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
            timebase,
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>, timebase: Timebase) -> Self {
        Self { writer, timebase }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W, timebase: Timebase) -> Self {
        Self { writer, timebase }
    }

    /// Consumes the sink and returns its writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn ticks_to_us(&self, ticks: u64) -> f64 {
        self.timebase.ticks_to_nanos(ticks) as f64 / 1000.0
    }

    fn host_us(&self, t: HostTime) -> f64 {
        self.ticks_to_us(t.ticks())
    }
}

fn phase_name(phase: PhaseKind) -> &'static str {
    match phase {
        PhaseKind::Advance => "advance",
        PhaseKind::Present => "present",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_frame_tick(&mut self, e: &FrameTickEvent) {
        let _ = writeln!(
            self.writer,
            "[tick] frame={} now={:.1}µs",
            e.frame_index,
            self.host_us(e.now),
        );
    }

    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[phase:begin] frame={} {} at {:.1}µs",
            e.frame_index,
            phase_name(e.phase),
            self.host_us(e.timestamp),
        );
    }

    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        let _ = writeln!(
            self.writer,
            "[phase:end] frame={} {} at {:.1}µs",
            e.frame_index,
            phase_name(e.phase),
            self.host_us(e.timestamp),
        );
    }

    fn on_trigger(&mut self, e: &TriggerEvent) {
        let at = self.host_us(e.timestamp);
        let _ = match e.outcome {
            TriggerOutcome::Started { session, next } => writeln!(
                self.writer,
                "[trigger] at {at:.1}µs started session={} next={next}",
                session.0,
            ),
            TriggerOutcome::Preempted {
                cancelled,
                session,
                next,
            } => writeln!(
                self.writer,
                "[trigger] at {at:.1}µs preempted cancelled={} session={} next={next}",
                cancelled.0, session.0,
            ),
            TriggerOutcome::Ignored(reason) => {
                writeln!(self.writer, "[trigger] at {at:.1}µs ignored reason={reason:?}")
            }
        };
    }

    fn on_transition_end(&mut self, e: &TransitionEndEvent) {
        let frame = e
            .frame_index
            .map_or_else(|| String::from("-"), |i| i.to_string());
        let _ = match e.end {
            SessionEnd::Completed { session, active } => writeln!(
                self.writer,
                "[transition:end] frame={frame} completed session={} active={active}",
                session.0,
            ),
            SessionEnd::Cancelled { session, target } => writeln!(
                self.writer,
                "[transition:end] frame={frame} cancelled session={} target={target}",
                session.0,
            ),
        };
    }

    fn on_media_loaded(&mut self, e: &LoadEvent) {
        let effect = match e.outcome {
            LoadOutcome::Counted { loaded, required } => format!("counted {loaded}/{required}"),
            LoadOutcome::Opened => String::from("gate opened"),
            LoadOutcome::AlreadyReady => String::from("already ready"),
            LoadOutcome::UnknownSlot => String::from("unknown slot"),
            LoadOutcome::TornDown => String::from("torn down"),
        };
        let _ = writeln!(
            self.writer,
            "[load] slot={} at {:.1}µs {effect}",
            e.slot,
            self.host_us(e.timestamp),
        );
    }

    fn on_frame_summary(&mut self, s: &FrameSummary) {
        let _ = writeln!(
            self.writer,
            "[summary] frame={} phase={:?} animating={} advance={:.1}µs present={:.1}µs",
            s.frame_index,
            s.phase,
            s.animating,
            self.ticks_to_us(s.advance_ticks),
            self.ticks_to_us(s.present_ticks),
        );
    }
}
