// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`]. Decoding stops at the first unknown
//! tag or malformed record.

use vitrine_core::controller::{
    IgnoreReason, LoadOutcome, Phase, SessionEnd, SessionId, TriggerOutcome,
};
use vitrine_core::cycle::SlotIndex;
use vitrine_core::time::HostTime;
use vitrine_core::trace::{
    FrameSummary, FrameTickEvent, LoadEvent, PhaseBeginEvent, PhaseEndEvent, PhaseKind,
    TraceSink, TransitionEndEvent, TriggerEvent,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_FRAME_TICK: u8 = 1;
const TAG_PHASE_BEGIN: u8 = 2;
const TAG_PHASE_END: u8 = 3;
const TAG_TRIGGER: u8 = 4;
const TAG_TRANSITION_END: u8 = 5;
const TAG_MEDIA_LOADED: u8 = 6;
const TAG_FRAME_SUMMARY: u8 = 7;

// Trigger record kinds.
const TRIGGER_STARTED: u8 = 0;
const TRIGGER_PREEMPTED: u8 = 1;
const TRIGGER_IGNORED: u8 = 2;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_option_u64(&mut self, v: Option<u64>) {
        match v {
            Some(val) => {
                self.write_u8(1);
                self.write_u64(val);
            }
            None => {
                self.write_u8(0);
                self.write_u64(0);
            }
        }
    }

    fn write_phase(&mut self, p: PhaseKind) {
        self.write_u8(match p {
            PhaseKind::Advance => 0,
            PhaseKind::Present => 1,
        });
    }

    fn write_slot(&mut self, slot: SlotIndex) {
        self.write_u32(slot.get());
    }
}

impl TraceSink for RecorderSink {
    fn on_frame_tick(&mut self, e: &FrameTickEvent) {
        self.write_u8(TAG_FRAME_TICK);
        self.write_u64(e.frame_index);
        self.write_u64(e.now.ticks());
    }

    fn on_phase_begin(&mut self, e: &PhaseBeginEvent) {
        self.write_u8(TAG_PHASE_BEGIN);
        self.write_u64(e.frame_index);
        self.write_phase(e.phase);
        self.write_u64(e.timestamp.ticks());
    }

    fn on_phase_end(&mut self, e: &PhaseEndEvent) {
        self.write_u8(TAG_PHASE_END);
        self.write_u64(e.frame_index);
        self.write_phase(e.phase);
        self.write_u64(e.timestamp.ticks());
    }

    /// Layout: kind, session, cancelled session, next slot, ignore reason.
    /// Unused fields are written as zero so every record has the same size.
    fn on_trigger(&mut self, e: &TriggerEvent) {
        self.write_u8(TAG_TRIGGER);
        self.write_u64(e.timestamp.ticks());
        let (kind, session, cancelled, next, reason) = match e.outcome {
            TriggerOutcome::Started { session, next } => {
                (TRIGGER_STARTED, session.0, 0, next.get(), 0)
            }
            TriggerOutcome::Preempted {
                cancelled,
                session,
                next,
            } => (TRIGGER_PREEMPTED, session.0, cancelled.0, next.get(), 0),
            TriggerOutcome::Ignored(reason) => (
                TRIGGER_IGNORED,
                0,
                0,
                0,
                match reason {
                    IgnoreReason::Transitioning => 0,
                    IgnoreReason::TornDown => 1,
                    IgnoreReason::DegenerateGeometry => 2,
                },
            ),
        };
        self.write_u8(kind);
        self.write_u64(session);
        self.write_u64(cancelled);
        self.write_u32(next);
        self.write_u8(reason);
    }

    fn on_transition_end(&mut self, e: &TransitionEndEvent) {
        self.write_u8(TAG_TRANSITION_END);
        self.write_option_u64(e.frame_index);
        self.write_u64(e.timestamp.ticks());
        match e.end {
            SessionEnd::Completed { session, active } => {
                self.write_u8(0);
                self.write_u64(session.0);
                self.write_slot(active);
            }
            SessionEnd::Cancelled { session, target } => {
                self.write_u8(1);
                self.write_u64(session.0);
                self.write_slot(target);
            }
        }
    }

    fn on_media_loaded(&mut self, e: &LoadEvent) {
        self.write_u8(TAG_MEDIA_LOADED);
        self.write_u64(e.timestamp.ticks());
        self.write_slot(e.slot);
        let (kind, loaded, required) = match e.outcome {
            LoadOutcome::Counted { loaded, required } => (0, loaded, required),
            LoadOutcome::Opened => (1, 0, 0),
            LoadOutcome::AlreadyReady => (2, 0, 0),
            LoadOutcome::UnknownSlot => (3, 0, 0),
            LoadOutcome::TornDown => (4, 0, 0),
        };
        self.write_u8(kind);
        self.write_u32(loaded);
        self.write_u32(required);
    }

    fn on_frame_summary(&mut self, s: &FrameSummary) {
        self.write_u8(TAG_FRAME_SUMMARY);
        self.write_u64(s.frame_index);
        self.write_u64(s.now.ticks());
        self.write_u8(match s.phase {
            Phase::Idle => 0,
            Phase::Transitioning => 1,
        });
        self.write_u8(u8::from(s.animating));
        self.write_u64(s.advance_ticks);
        self.write_u64(s.present_ticks);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// A [`FrameTickEvent`].
    FrameTick(FrameTickEvent),
    /// A [`PhaseBeginEvent`].
    PhaseBegin(PhaseBeginEvent),
    /// A [`PhaseEndEvent`].
    PhaseEnd(PhaseEndEvent),
    /// A [`TriggerEvent`].
    Trigger(TriggerEvent),
    /// A [`TransitionEndEvent`].
    TransitionEnd(TransitionEndEvent),
    /// A [`LoadEvent`].
    MediaLoaded(LoadEvent),
    /// A [`FrameSummary`].
    FrameSummary(FrameSummary),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_u8(&mut self) -> Option<u8> {
        if self.remaining() < 1 {
            return None;
        }
        let v = self.data[self.pos];
        self.pos += 1;
        Some(v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        if self.remaining() < 4 {
            return None;
        }
        let v = u32::from_le_bytes(self.data[self.pos..self.pos + 4].try_into().ok()?);
        self.pos += 4;
        Some(v)
    }

    fn read_u64(&mut self) -> Option<u64> {
        if self.remaining() < 8 {
            return None;
        }
        let v = u64::from_le_bytes(self.data[self.pos..self.pos + 8].try_into().ok()?);
        self.pos += 8;
        Some(v)
    }

    fn read_option_u64(&mut self) -> Option<Option<u64>> {
        let present = self.read_u8()?;
        let val = self.read_u64()?;
        Some(if present != 0 { Some(val) } else { None })
    }

    fn read_phase(&mut self) -> Option<PhaseKind> {
        Some(match self.read_u8()? {
            0 => PhaseKind::Advance,
            _ => PhaseKind::Present,
        })
    }

    fn read_slot(&mut self) -> Option<SlotIndex> {
        SlotIndex::new(self.read_u32()?)
    }

    fn decode_frame_tick(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::FrameTick(FrameTickEvent {
            frame_index: self.read_u64()?,
            now: HostTime(self.read_u64()?),
        }))
    }

    fn decode_phase_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PhaseBegin(PhaseBeginEvent {
            frame_index: self.read_u64()?,
            phase: self.read_phase()?,
            timestamp: HostTime(self.read_u64()?),
        }))
    }

    fn decode_phase_end(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PhaseEnd(PhaseEndEvent {
            frame_index: self.read_u64()?,
            phase: self.read_phase()?,
            timestamp: HostTime(self.read_u64()?),
        }))
    }

    fn decode_trigger(&mut self) -> Option<RecordedEvent> {
        let timestamp = HostTime(self.read_u64()?);
        let kind = self.read_u8()?;
        let session = SessionId(self.read_u64()?);
        let cancelled = SessionId(self.read_u64()?);
        let next = self.read_u32()?;
        let reason = self.read_u8()?;
        let outcome = match kind {
            TRIGGER_STARTED => TriggerOutcome::Started {
                session,
                next: SlotIndex::new(next)?,
            },
            TRIGGER_PREEMPTED => TriggerOutcome::Preempted {
                cancelled,
                session,
                next: SlotIndex::new(next)?,
            },
            TRIGGER_IGNORED => TriggerOutcome::Ignored(match reason {
                0 => IgnoreReason::Transitioning,
                1 => IgnoreReason::TornDown,
                _ => IgnoreReason::DegenerateGeometry,
            }),
            _ => return None,
        };
        Some(RecordedEvent::Trigger(TriggerEvent { timestamp, outcome }))
    }

    fn decode_transition_end(&mut self) -> Option<RecordedEvent> {
        let frame_index = self.read_option_u64()?;
        let timestamp = HostTime(self.read_u64()?);
        let kind = self.read_u8()?;
        let session = SessionId(self.read_u64()?);
        let slot = self.read_slot()?;
        let end = match kind {
            0 => SessionEnd::Completed {
                session,
                active: slot,
            },
            _ => SessionEnd::Cancelled {
                session,
                target: slot,
            },
        };
        Some(RecordedEvent::TransitionEnd(TransitionEndEvent {
            frame_index,
            timestamp,
            end,
        }))
    }

    fn decode_media_loaded(&mut self) -> Option<RecordedEvent> {
        let timestamp = HostTime(self.read_u64()?);
        let slot = self.read_slot()?;
        let kind = self.read_u8()?;
        let loaded = self.read_u32()?;
        let required = self.read_u32()?;
        let outcome = match kind {
            0 => LoadOutcome::Counted { loaded, required },
            1 => LoadOutcome::Opened,
            2 => LoadOutcome::AlreadyReady,
            3 => LoadOutcome::UnknownSlot,
            _ => LoadOutcome::TornDown,
        };
        Some(RecordedEvent::MediaLoaded(LoadEvent {
            timestamp,
            slot,
            outcome,
        }))
    }

    fn decode_frame_summary(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::FrameSummary(FrameSummary {
            frame_index: self.read_u64()?,
            now: HostTime(self.read_u64()?),
            phase: match self.read_u8()? {
                0 => Phase::Idle,
                _ => Phase::Transitioning,
            },
            animating: self.read_u8()? != 0,
            advance_ticks: self.read_u64()?,
            present_ticks: self.read_u64()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_FRAME_TICK => self.decode_frame_tick(),
            TAG_PHASE_BEGIN => self.decode_phase_begin(),
            TAG_PHASE_END => self.decode_phase_end(),
            TAG_TRIGGER => self.decode_trigger(),
            TAG_TRANSITION_END => self.decode_transition_end(),
            TAG_MEDIA_LOADED => self.decode_media_loaded(),
            TAG_FRAME_SUMMARY => self.decode_frame_summary(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(n: u32) -> SlotIndex {
        SlotIndex::new(n).unwrap()
    }

    #[test]
    fn records_a_preempted_session() {
        let mut rec = RecorderSink::new();
        rec.on_frame_tick(&FrameTickEvent {
            frame_index: 7,
            now: HostTime(1_000_000),
        });
        rec.on_trigger(&TriggerEvent {
            timestamp: HostTime(1_000_100),
            outcome: TriggerOutcome::Preempted {
                cancelled: SessionId(3),
                session: SessionId(4),
                next: slot(2),
            },
        });
        rec.on_transition_end(&TransitionEndEvent {
            frame_index: Some(64),
            timestamp: HostTime(2_000_000),
            end: SessionEnd::Completed {
                session: SessionId(4),
                active: slot(2),
            },
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], RecordedEvent::FrameTick(_)));
        match &events[1] {
            RecordedEvent::Trigger(e) => {
                assert_eq!(e.timestamp, HostTime(1_000_100));
                assert_eq!(
                    e.outcome,
                    TriggerOutcome::Preempted {
                        cancelled: SessionId(3),
                        session: SessionId(4),
                        next: slot(2),
                    }
                );
            }
            other => panic!("expected Trigger, got {other:?}"),
        }
        match &events[2] {
            RecordedEvent::TransitionEnd(e) => {
                assert_eq!(e.frame_index, Some(64));
                assert_eq!(
                    e.end,
                    SessionEnd::Completed {
                        session: SessionId(4),
                        active: slot(2),
                    }
                );
            }
            other => panic!("expected TransitionEnd, got {other:?}"),
        }
    }

    #[test]
    fn ignored_trigger_keeps_reason() {
        let mut rec = RecorderSink::new();
        rec.on_trigger(&TriggerEvent {
            timestamp: HostTime(5),
            outcome: TriggerOutcome::Ignored(IgnoreReason::DegenerateGeometry),
        });
        match decode(rec.as_bytes()).next() {
            Some(RecordedEvent::Trigger(e)) => assert_eq!(
                e.outcome,
                TriggerOutcome::Ignored(IgnoreReason::DegenerateGeometry)
            ),
            other => panic!("expected Trigger, got {other:?}"),
        }
    }

    #[test]
    fn load_counts_survive_recording() {
        let mut rec = RecorderSink::new();
        rec.on_media_loaded(&LoadEvent {
            timestamp: HostTime(10),
            slot: slot(3),
            outcome: LoadOutcome::Counted {
                loaded: 2,
                required: 3,
            },
        });
        rec.on_media_loaded(&LoadEvent {
            timestamp: HostTime(20),
            slot: slot(1),
            outcome: LoadOutcome::Opened,
        });
        let outcomes: Vec<_> = decode(rec.as_bytes())
            .map(|e| match e {
                RecordedEvent::MediaLoaded(l) => (l.slot, l.outcome),
                other => panic!("expected MediaLoaded, got {other:?}"),
            })
            .collect();
        assert_eq!(
            outcomes,
            [
                (
                    slot(3),
                    LoadOutcome::Counted {
                        loaded: 2,
                        required: 3
                    }
                ),
                (slot(1), LoadOutcome::Opened),
            ]
        );
    }

    #[test]
    fn phases_and_summary_decode_in_order() {
        let mut rec = RecorderSink::new();
        rec.on_phase_begin(&PhaseBeginEvent {
            frame_index: 5,
            phase: PhaseKind::Present,
            timestamp: HostTime(2000),
        });
        rec.on_phase_end(&PhaseEndEvent {
            frame_index: 5,
            phase: PhaseKind::Present,
            timestamp: HostTime(3000),
        });
        rec.on_frame_summary(&FrameSummary {
            frame_index: 5,
            now: HostTime(1500),
            phase: Phase::Transitioning,
            animating: true,
            advance_ticks: 120,
            present_ticks: 1000,
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 3);
        match &events[1] {
            RecordedEvent::PhaseEnd(e) => {
                assert_eq!(e.phase, PhaseKind::Present);
                assert_eq!(e.timestamp, HostTime(3000));
            }
            other => panic!("expected PhaseEnd, got {other:?}"),
        }
        match &events[2] {
            RecordedEvent::FrameSummary(s) => {
                assert_eq!(s.phase, Phase::Transitioning);
                assert!(s.animating);
                assert_eq!(s.present_ticks, 1000);
            }
            other => panic!("expected FrameSummary, got {other:?}"),
        }
    }

    #[test]
    fn truncated_record_stops_decoding() {
        let mut rec = RecorderSink::new();
        rec.on_frame_tick(&FrameTickEvent {
            frame_index: 1,
            now: HostTime(1),
        });
        rec.on_frame_tick(&FrameTickEvent {
            frame_index: 2,
            now: HostTime(2),
        });
        let bytes = rec.into_bytes();
        let events: Vec<_> = decode(&bytes[..bytes.len() - 3]).collect();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn empty_buffer_decodes_to_nothing() {
        let events: Vec<_> = decode(&[]).collect();
        assert!(events.is_empty());
    }
}
