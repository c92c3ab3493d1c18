// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick-driven controller for a hero media showcase.
//!
//! `vitrine_core` decides what the hero area shows, where, and when: it
//! cycles through a fixed pool of media slots, follows the pointer with a
//! smoothed preview of the next slot, gates a loading overlay behind a
//! readiness latch, and runs a cancellation-safe, single-flight transition
//! that expands the preview to fill the frame. It is `no_std` compatible
//! (with `alloc`) and knows nothing about the host it draws into.
//!
//! # Architecture
//!
//! ```text
//!   Backend (tick source, input events)
//!       │
//!       ▼
//!   FrameTick ──► TransitionController::tick() ──► TickOutcome
//!                          │
//!                          ▼
//!              take_frame() ──► HeroFrame ──► Presenter::present()
//! ```
//!
//! **[`controller`]**: the Idle/Transitioning state machine that composes
//! everything below and owns at most one transition session.
//!
//! **[`gate`]**: one-way readiness latch over media load signals.
//!
//! **[`smoother`]**: per-axis fixed-duration ease-out smoothing for the
//! pointer-following preview. **[`tilt`]** adds the hover tilt and parallax.
//!
//! **[`cycle`]**: 1-based slot indices, round-robin sequencing, and injected
//! media sources.
//!
//! **[`tween`]**: the cancellable rectangle tween behind the transition.
//!
//! **[`element`]**: per-tick frame output for the host.
//!
//! **[`backend`]**: the [`Presenter`](backend::Presenter) trait that hosts
//! implement.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! frame-loop instrumentation, with a zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod config;
pub mod controller;
pub mod cycle;
pub mod ease;
pub mod element;
pub mod gate;
pub mod smoother;
pub mod tilt;
pub mod time;
pub mod timing;
pub mod trace;
pub mod transform;
pub mod tween;
