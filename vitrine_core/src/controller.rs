// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The single-flight hero transition controller.
//!
//! [`TransitionController`] owns every piece of hero state: the media pool,
//! the load gate, the pointer smoother, the preview tilt, and at most one
//! [`TransitionSession`]. Hosts feed it events (pointer, trigger, media
//! loaded, layout) and scheduler ticks, then read a [`HeroFrame`] to draw.
//!
//! ```text
//!            trigger (Idle)
//!   Idle ─────────────────────► Transitioning
//!    ▲                               │
//!    │  tween finished: active := next
//!    ├───────────────────────────────┤
//!    │  cancel / teardown / preempt  │
//!    └───────────────────────────────┘
//! ```
//!
//! All mutation happens on one logical thread. Event methods run to
//! completion and never block; [`tick`](TransitionController::tick) is the
//! only place animation progress is made. Every swap between the preview and
//! the overlay happens inside a single call, so no frame ever shows both
//! representations of the next slot, or neither.

use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Rect, Size};

use crate::config::{ConfigError, HeroConfig, RetriggerPolicy};
use crate::cycle::{CycleSequencer, MediaSlot, SlotIndex, SourceProvider};
use crate::ease::Ease;
use crate::element::{ElementFrame, HeroFrame, OverlayFrame, PreviewFrame};
use crate::gate::LoadGate;
use crate::smoother::PointerSmoother;
use crate::tilt::PreviewTilt;
use crate::time::{Duration, HostTime, Timebase};
use crate::timing::FrameTick;
use crate::tween::{RectTween, TweenStep};

/// Controller state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No session; the preview follows the pointer.
    Idle,
    /// A session is animating the overlay.
    Transitioning,
}

/// Identifies one transition session. Ids increase monotonically per
/// controller.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(pub u64);

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({})", self.0)
    }
}

/// One "advance to next slot" animation, from trigger to completion or
/// cancellation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionSession {
    id: SessionId,
    target: SlotIndex,
    tween: RectTween,
    counting: bool,
}

impl TransitionSession {
    /// This session's id.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// Slot that becomes active on completion.
    #[inline]
    #[must_use]
    pub const fn target(&self) -> SlotIndex {
        self.target
    }

    /// Preview rect at trigger time, relative to the frame.
    #[must_use]
    pub const fn start_rect(&self) -> Rect {
        self.tween.start()
    }

    /// Full-frame rect.
    #[must_use]
    pub const fn end_rect(&self) -> Rect {
        self.tween.end()
    }

    /// Current overlay rect.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.tween.value()
    }

    /// Linear progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.tween.progress()
    }

    /// Whether the session was cancelled.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        self.tween.is_cancelled()
    }
}

/// Why a trigger did not start a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IgnoreReason {
    /// A session is running and the policy is [`RetriggerPolicy::Reject`].
    Transitioning,
    /// The controller was torn down.
    TornDown,
    /// The preview or frame rect has no area.
    DegenerateGeometry,
}

/// Result of [`TransitionController::trigger`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TriggerOutcome {
    /// A session started from Idle.
    Started {
        /// The new session.
        session: SessionId,
        /// Slot being advanced to.
        next: SlotIndex,
    },
    /// A running session was cancelled and restored, then a new one started.
    Preempted {
        /// The cancelled session.
        cancelled: SessionId,
        /// The new session.
        session: SessionId,
        /// Slot being advanced to.
        next: SlotIndex,
    },
    /// Nothing happened.
    Ignored(IgnoreReason),
}

impl TriggerOutcome {
    /// The session that is now running because of this trigger, if any.
    #[must_use]
    pub const fn started(&self) -> Option<SessionId> {
        match self {
            Self::Started { session, .. } | Self::Preempted { session, .. } => Some(*session),
            Self::Ignored(_) => None,
        }
    }
}

/// How a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionEnd {
    /// The overlay reached the full frame and the active slot advanced.
    Completed {
        /// The finished session.
        session: SessionId,
        /// The new active slot.
        active: SlotIndex,
    },
    /// The session was stopped and the idle baseline restored.
    Cancelled {
        /// The cancelled session.
        session: SessionId,
        /// Slot it was advancing to.
        target: SlotIndex,
    },
}

/// Result of [`TransitionController::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TickOutcome {
    /// Frame counter of the tick.
    pub frame_index: u64,
    /// Step applied to every animation, after clamping.
    pub step: Duration,
    /// A session that ended on this tick.
    pub ended: Option<SessionEnd>,
    /// Whether anything is still animating.
    pub animating: bool,
}

/// Result of [`TransitionController::media_loaded`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LoadOutcome {
    /// Counted toward the gate, which is still closed.
    Counted {
        /// Signals counted so far.
        loaded: u32,
        /// Signals needed.
        required: u32,
    },
    /// This signal opened the gate.
    Opened,
    /// The gate was already open.
    AlreadyReady,
    /// The index is outside the pool.
    UnknownSlot,
    /// The controller was torn down.
    TornDown,
}

/// Orchestrates the hero media area.
#[derive(Debug)]
pub struct TransitionController {
    config: HeroConfig,
    timebase: Timebase,
    max_step: Duration,
    sequencer: CycleSequencer,
    slots: Vec<MediaSlot>,
    gate: LoadGate,
    active: SlotIndex,
    smoother: PointerSmoother,
    tilt: PreviewTilt,
    centered: bool,
    session: Option<TransitionSession>,
    next_session: u64,
    last_tick: Option<HostTime>,
    restart_playback: bool,
    torn_down: bool,
}

impl TransitionController {
    /// Creates an idle controller on slot 1.
    ///
    /// `timebase` is the backend's tick unit; `sources` is asked once per slot.
    pub fn new(
        config: HeroConfig,
        timebase: Timebase,
        sources: &impl SourceProvider,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let sequencer = CycleSequencer::new(config.slot_count).ok_or(ConfigError::NoSlots)?;
        let slots = sequencer
            .slots()
            .map(|index| MediaSlot::new(index, sources.source(index)))
            .collect();
        Ok(Self {
            config,
            timebase,
            max_step: Duration::from_millis(u64::from(config.max_frame_step_ms), timebase),
            sequencer,
            slots,
            gate: LoadGate::new(config.required_loads),
            active: SlotIndex::FIRST,
            smoother: PointerSmoother::new(config.preview, config.follow_duration_secs()),
            tilt: PreviewTilt::new(config.tilt),
            centered: false,
            session: None,
            next_session: 0,
            last_tick: None,
            restart_playback: false,
            torn_down: false,
        })
    }

    /// The configuration this controller was built with.
    #[must_use]
    pub const fn config(&self) -> &HeroConfig {
        &self.config
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        if self.session.is_some() {
            Phase::Transitioning
        } else {
            Phase::Idle
        }
    }

    /// Slot shown in the background.
    #[must_use]
    pub const fn active(&self) -> SlotIndex {
        self.active
    }

    /// Slot the next trigger advances to, always derived from the active slot.
    #[must_use]
    pub const fn next(&self) -> SlotIndex {
        self.sequencer.next(self.active)
    }

    /// Whether the load gate is open.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.gate.is_ready()
    }

    /// The load gate.
    #[must_use]
    pub const fn gate(&self) -> &LoadGate {
        &self.gate
    }

    /// The media pool, in slot order.
    #[must_use]
    pub fn slots(&self) -> &[MediaSlot] {
        &self.slots
    }

    /// One pool member.
    #[must_use]
    pub fn slot(&self, index: SlotIndex) -> Option<&MediaSlot> {
        self.slots.get(index.position())
    }

    /// The running session, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&TransitionSession> {
        self.session.as_ref()
    }

    /// Pointer-following state of the preview.
    #[must_use]
    pub const fn smoother(&self) -> &PointerSmoother {
        &self.smoother
    }

    /// Hover tilt of the preview card.
    #[must_use]
    pub const fn tilt(&self) -> &PreviewTilt {
        &self.tilt
    }

    /// Whether [`teardown`](Self::teardown) has run.
    #[must_use]
    pub const fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Current on-screen preview rect relative to the frame, including the
    /// hover offset.
    #[must_use]
    pub fn preview_rect(&self) -> Rect {
        self.smoother.rect() + self.tilt.offset()
    }

    /// Reports the frame's laid-out size.
    ///
    /// The first valid layout centers the preview; later ones only move the
    /// center the preview would return to. Returns `false` for an unlaid-out
    /// frame.
    pub fn layout(&mut self, frame: Size) -> bool {
        if self.torn_down {
            return false;
        }
        if self.centered {
            self.smoother.rebase(frame)
        } else {
            self.centered = self.smoother.center_in(frame);
            self.centered
        }
    }

    /// Retargets the preview from a viewport pointer position.
    ///
    /// `frame` is the frame's viewport rect measured for this event, so a
    /// resize is picked up on the next move. Ignored while transitioning, after
    /// teardown, and for an unlaid-out frame.
    pub fn pointer_moved(&mut self, pointer: Point, frame: Rect) -> bool {
        if self.torn_down || self.session.is_some() {
            return false;
        }
        if !self.smoother.pointer_moved(pointer, frame) {
            return false;
        }
        let card = self.smoother.rect() + frame.origin().to_vec2();
        if card.contains(pointer) {
            self.tilt.pointer_moved(pointer, card);
        } else if self.tilt.is_engaged() {
            self.tilt.pointer_left();
        }
        true
    }

    /// The pointer left the preview card.
    pub fn pointer_left(&mut self) {
        if !self.torn_down && self.session.is_none() {
            self.tilt.pointer_left();
        }
    }

    /// Asks to advance to the next slot.
    ///
    /// `preview` and `frame` are viewport rects measured at trigger time. The
    /// session animates the overlay from the preview rect to the full frame.
    pub fn trigger(&mut self, preview: Rect, frame: Rect) -> TriggerOutcome {
        if self.torn_down {
            return TriggerOutcome::Ignored(IgnoreReason::TornDown);
        }
        if self.session.is_some() && self.config.retrigger == RetriggerPolicy::Reject {
            return TriggerOutcome::Ignored(IgnoreReason::Transitioning);
        }
        if !has_area(preview) || !has_area(frame) {
            return TriggerOutcome::Ignored(IgnoreReason::DegenerateGeometry);
        }

        let cancelled = self.cancel_session().map(|end| match end {
            SessionEnd::Cancelled { session, .. } | SessionEnd::Completed { session, .. } => session,
        });

        let start = preview - frame.origin().to_vec2();
        let end = Rect::from_origin_size(Point::ORIGIN, frame.size());
        let next = self.next();
        let tween = RectTween::new(
            start,
            end,
            self.config.transition_duration_secs(),
            Ease::Power3InOut,
        )
        .with_corner_radius(self.config.overlay_corner_radius, 0.0);

        self.smoother.halt();
        self.tilt.halt();

        let session = SessionId(self.next_session);
        self.next_session += 1;
        self.session = Some(TransitionSession {
            id: session,
            target: next,
            tween,
            counting: false,
        });
        self.restart_playback = true;

        match cancelled {
            Some(cancelled) => TriggerOutcome::Preempted {
                cancelled,
                session,
                next,
            },
            None => TriggerOutcome::Started { session, next },
        }
    }

    /// Advances every animation to `tick`.
    ///
    /// The step since the previous tick is clamped to the configured maximum.
    /// A new session starts counting on the first tick after its trigger.
    pub fn tick(&mut self, tick: FrameTick) -> TickOutcome {
        if self.torn_down {
            return TickOutcome {
                frame_index: tick.frame_index,
                step: Duration::ZERO,
                ended: None,
                animating: false,
            };
        }
        let step = self.last_tick.map_or(Duration::ZERO, |prev| {
            tick.now.saturating_duration_since(prev).min(self.max_step)
        });
        self.last_tick = Some(tick.now);
        let dt = step.as_secs_f64(self.timebase);

        let finished = match &mut self.session {
            Some(session) if session.counting => session.tween.advance(dt) == TweenStep::Finished,
            Some(session) => {
                session.counting = true;
                false
            }
            None => {
                self.smoother.advance(dt);
                self.tilt.advance(dt);
                false
            }
        };
        let ended = if finished { self.complete_session() } else { None };

        TickOutcome {
            frame_index: tick.frame_index,
            step,
            ended,
            animating: self.is_animating(),
        }
    }

    /// Records a load event from an element showing `slot`.
    ///
    /// Every event counts toward the gate, so duplicates from the preview,
    /// overlay, and background elements all help open it.
    pub fn media_loaded(&mut self, slot: SlotIndex) -> LoadOutcome {
        if self.torn_down {
            return LoadOutcome::TornDown;
        }
        let Some(entry) = self.slots.get_mut(slot.position()) else {
            return LoadOutcome::UnknownSlot;
        };
        entry.mark_loaded();
        if self.gate.is_ready() {
            return LoadOutcome::AlreadyReady;
        }
        if self.gate.report_loaded() {
            LoadOutcome::Opened
        } else {
            LoadOutcome::Counted {
                loaded: self.gate.loaded(),
                required: self.gate.required(),
            }
        }
    }

    /// Cancels the running session and restores the idle baseline.
    pub fn cancel_transition(&mut self) -> Option<SessionEnd> {
        self.cancel_session()
    }

    /// Stops everything for good. Returns the session this cancelled, if any.
    ///
    /// After teardown no tick moves anything and every event is ignored.
    pub fn teardown(&mut self) -> Option<SessionEnd> {
        let end = self.cancel_session();
        self.smoother.halt();
        self.tilt.halt();
        self.torn_down = true;
        end
    }

    /// Whether a tick would change anything.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.torn_down
            && (self.session.is_some() || self.smoother.is_moving() || self.tilt.is_moving())
    }

    /// Resolves the current frame without consuming one-shot commands.
    #[must_use]
    pub fn frame(&self) -> HeroFrame {
        let next = self.next();
        let preview_rect = self.smoother.rect();
        let (preview, overlay) = match &self.session {
            Some(session) => (
                ElementFrame::hidden(preview_rect),
                OverlayFrame {
                    slot: session.target,
                    element: ElementFrame::shown(session.rect()),
                    corner_radius: session.tween.corner_radius(),
                    restart_playback: self.restart_playback,
                },
            ),
            None => (
                ElementFrame::shown(preview_rect),
                OverlayFrame {
                    slot: next,
                    element: ElementFrame::hidden(Rect::from_origin_size(
                        Point::ORIGIN,
                        self.config.preview,
                    )),
                    corner_radius: self.config.overlay_corner_radius,
                    restart_playback: false,
                },
            ),
        };
        HeroFrame {
            active: self.active,
            next,
            ready: self.gate.is_ready(),
            transitioning: self.session.is_some(),
            interactive: !self.torn_down && self.session.is_none(),
            preview: PreviewFrame {
                slot: next,
                element: preview,
                transform: self.tilt.transform(),
                content_offset: self.tilt.content_offset(),
            },
            overlay,
        }
    }

    /// Resolves the current frame and consumes its one-shot commands.
    pub fn take_frame(&mut self) -> HeroFrame {
        let frame = self.frame();
        self.restart_playback = false;
        frame
    }

    fn cancel_session(&mut self) -> Option<SessionEnd> {
        let mut session = self.session.take()?;
        session.tween.cancel();
        self.smoother.halt();
        self.tilt.clear();
        self.restart_playback = false;
        Some(SessionEnd::Cancelled {
            session: session.id,
            target: session.target,
        })
    }

    fn complete_session(&mut self) -> Option<SessionEnd> {
        let session = self.session.take()?;
        self.active = session.target;
        self.tilt.clear();
        self.restart_playback = false;
        Some(SessionEnd::Completed {
            session: session.id,
            active: self.active,
        })
    }
}

fn has_area(rect: Rect) -> bool {
    rect.width() > 0.0 && rect.height() > 0.0 && rect.is_finite()
}
