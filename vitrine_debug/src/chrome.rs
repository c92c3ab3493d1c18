// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//!
//! Each transition session becomes an async span (`b`/`e` pair keyed by the
//! session id) so overlapping-trigger behavior is visible on the timeline.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use vitrine_core::controller::{LoadOutcome, SessionEnd, SessionId, TriggerOutcome};
use vitrine_core::time::Timebase;

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
///
/// Timestamps are converted to microseconds using the provided [`Timebase`].
pub fn export(bytes: &[u8], timebase: Timebase, writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::FrameTick(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "FrameTick",
                    "cat": "Scheduler",
                    "ts": ticks_to_us(e.now.ticks(), timebase),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "frame_index": e.frame_index,
                    }
                }));
            }
            RecordedEvent::PhaseBegin(e) => {
                events.push(json!({
                    "ph": "B",
                    "name": format!("{:?}", e.phase),
                    "cat": "Frame",
                    "ts": ticks_to_us(e.timestamp.ticks(), timebase),
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "frame_index": e.frame_index,
                    }
                }));
            }
            RecordedEvent::PhaseEnd(e) => {
                events.push(json!({
                    "ph": "E",
                    "name": format!("{:?}", e.phase),
                    "cat": "Frame",
                    "ts": ticks_to_us(e.timestamp.ticks(), timebase),
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "frame_index": e.frame_index,
                    }
                }));
            }
            RecordedEvent::Trigger(e) => {
                let ts = ticks_to_us(e.timestamp.ticks(), timebase);
                let (result, detail) = match e.outcome {
                    TriggerOutcome::Started { session, next } => {
                        events.push(session_begin(session, next.get(), ts));
                        ("started", json!({ "session": session.0, "next": next.get() }))
                    }
                    TriggerOutcome::Preempted {
                        cancelled,
                        session,
                        next,
                    } => {
                        events.push(session_end(cancelled, "cancelled", ts));
                        events.push(session_begin(session, next.get(), ts));
                        (
                            "preempted",
                            json!({
                                "cancelled": cancelled.0,
                                "session": session.0,
                                "next": next.get(),
                            }),
                        )
                    }
                    TriggerOutcome::Ignored(reason) => {
                        ("ignored", json!({ "reason": format!("{reason:?}") }))
                    }
                };
                events.push(json!({
                    "ph": "i",
                    "name": "Trigger",
                    "cat": "Input",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "result": result,
                        "detail": detail,
                    }
                }));
            }
            RecordedEvent::TransitionEnd(e) => {
                let ts = ticks_to_us(e.timestamp.ticks(), timebase);
                let (session, result) = match e.end {
                    SessionEnd::Completed { session, .. } => (session, "completed"),
                    SessionEnd::Cancelled { session, .. } => (session, "cancelled"),
                };
                events.push(session_end(session, result, ts));
            }
            RecordedEvent::MediaLoaded(e) => {
                let (loaded, opened) = match e.outcome {
                    LoadOutcome::Counted { loaded, .. } => (Some(loaded), false),
                    LoadOutcome::Opened => (None, true),
                    LoadOutcome::AlreadyReady | LoadOutcome::UnknownSlot | LoadOutcome::TornDown => {
                        (None, false)
                    }
                };
                events.push(json!({
                    "ph": "i",
                    "name": if opened { "GateOpened" } else { "MediaLoaded" },
                    "cat": "Media",
                    "ts": ticks_to_us(e.timestamp.ticks(), timebase),
                    "pid": 0,
                    "tid": 0,
                    "s": if opened { "g" } else { "t" },
                    "args": {
                        "slot": e.slot.get(),
                        "loaded": loaded,
                        "outcome": format!("{:?}", e.outcome),
                    }
                }));
            }
            RecordedEvent::FrameSummary(s) => {
                events.push(json!({
                    "ph": "i",
                    "name": "FrameSummary",
                    "cat": "Summary",
                    "ts": ticks_to_us(s.now.ticks(), timebase),
                    "pid": 0,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "frame_index": s.frame_index,
                        "phase": format!("{:?}", s.phase),
                        "animating": s.animating,
                        "advance_us": ticks_to_us(s.advance_ticks, timebase),
                        "present_us": ticks_to_us(s.present_ticks, timebase),
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn session_begin(session: SessionId, next: u32, ts: f64) -> Value {
    json!({
        "ph": "b",
        "name": "Transition",
        "cat": "Transition",
        "id": session.0,
        "ts": ts,
        "pid": 0,
        "tid": 0,
        "args": {
            "next": next,
        }
    })
}

fn session_end(session: SessionId, result: &str, ts: f64) -> Value {
    json!({
        "ph": "e",
        "name": "Transition",
        "cat": "Transition",
        "id": session.0,
        "ts": ts,
        "pid": 0,
        "tid": 0,
        "args": {
            "result": result,
        }
    })
}

fn ticks_to_us(ticks: u64, timebase: Timebase) -> f64 {
    timebase.ticks_to_nanos(ticks) as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use vitrine_core::controller::IgnoreReason;
    use vitrine_core::cycle::SlotIndex;
    use vitrine_core::time::HostTime;
    use vitrine_core::trace::{
        FrameTickEvent, PhaseBeginEvent, PhaseEndEvent, PhaseKind, TraceSink, TransitionEndEvent,
        TriggerEvent,
    };

    fn parse(rec: &RecorderSink) -> Vec<Value> {
        let mut out = Vec::new();
        export(rec.as_bytes(), Timebase::NANOS, &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        serde_json::from_str(&json_str).unwrap()
    }

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        rec.on_frame_tick(&FrameTickEvent {
            frame_index: 0,
            now: HostTime(1_000_000),
        });
        rec.on_phase_begin(&PhaseBeginEvent {
            frame_index: 0,
            phase: PhaseKind::Advance,
            timestamp: HostTime(1_000_000),
        });
        rec.on_phase_end(&PhaseEndEvent {
            frame_index: 0,
            phase: PhaseKind::Advance,
            timestamp: HostTime(1_000_100),
        });

        let parsed = parse(&rec);
        assert_eq!(parsed.len(), 3);

        // First event is an instant FrameTick.
        assert_eq!(parsed[0]["ph"], "i");
        assert_eq!(parsed[0]["name"], "FrameTick");
        assert_eq!(parsed[0]["ts"], 1000.0);

        assert_eq!(parsed[1]["ph"], "B");
        assert_eq!(parsed[1]["name"], "Advance");

        assert_eq!(parsed[2]["ph"], "E");
        assert_eq!(parsed[2]["name"], "Advance");
    }

    #[test]
    fn sessions_become_async_spans() {
        let two = SlotIndex::new(2).unwrap();
        let mut rec = RecorderSink::new();
        rec.on_trigger(&TriggerEvent {
            timestamp: HostTime(0),
            outcome: TriggerOutcome::Started {
                session: SessionId(0),
                next: two,
            },
        });
        rec.on_trigger(&TriggerEvent {
            timestamp: HostTime(1_000),
            outcome: TriggerOutcome::Ignored(IgnoreReason::Transitioning),
        });
        rec.on_transition_end(&TransitionEndEvent {
            frame_index: Some(58),
            timestamp: HostTime(950_000_000),
            end: SessionEnd::Completed {
                session: SessionId(0),
                active: two,
            },
        });

        let parsed = parse(&rec);
        let phases: Vec<_> = parsed.iter().map(|e| e["ph"].as_str().unwrap()).collect();
        assert_eq!(phases, ["b", "i", "i", "e"]);
        assert_eq!(parsed[0]["id"], 0);
        assert_eq!(parsed[2]["args"]["result"], "ignored");
        assert_eq!(parsed[3]["id"], 0);
        assert_eq!(parsed[3]["args"]["result"], "completed");
    }

    #[test]
    fn preempt_closes_old_span_before_opening_new() {
        let mut rec = RecorderSink::new();
        rec.on_trigger(&TriggerEvent {
            timestamp: HostTime(500),
            outcome: TriggerOutcome::Preempted {
                cancelled: SessionId(1),
                session: SessionId(2),
                next: SlotIndex::new(3).unwrap(),
            },
        });
        let parsed = parse(&rec);
        assert_eq!(parsed[0]["ph"], "e");
        assert_eq!(parsed[0]["id"], 1);
        assert_eq!(parsed[1]["ph"], "b");
        assert_eq!(parsed[1]["id"], 2);
    }

    #[test]
    fn harness_run_exports_one_span_per_session() {
        use vitrine_core::config::HeroConfig;
        use vitrine_core::trace::Tracer;
        use vitrine_harness::{Harness, SimulatedDisplay};

        let mut rec = RecorderSink::new();
        {
            let mut h = Harness::new(HeroConfig::standard())
                .unwrap()
                .with_tracer(Tracer::new(&mut rec));
            h.load_initial_media();
            h.trigger();
            h.run_until_idle(200);
        }

        let mut out = Vec::new();
        export(rec.as_bytes(), SimulatedDisplay::TIMEBASE, &mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
        let count = |ph: &str| parsed.iter().filter(|e| e["ph"] == ph).count();
        assert_eq!(count("b"), 1);
        assert_eq!(count("e"), 1);
        assert_eq!(count("B"), count("E"));
        assert!(
            parsed
                .iter()
                .any(|e| e["name"] == "GateOpened" && e["cat"] == "Media")
        );
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], Timebase::NANOS, &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert!(parsed.is_empty());
    }
}
