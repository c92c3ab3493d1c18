// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event wiring for one hero.
//!
//! [`HeroMount`] owns a [`TransitionController`], a [`DomPresenter`], and a
//! [`RafLoop`], and routes DOM events onto controller calls:
//!
//! | Event                 | Target            | Call                  |
//! |-----------------------|-------------------|-----------------------|
//! | `mousemove`           | frame             | `pointer_moved`       |
//! | `mouseleave`          | card              | `pointer_left`        |
//! | `click`               | trigger           | `trigger`             |
//! | `loadeddata`          | each video        | `media_loaded`        |
//! | `resize`              | window            | `layout`              |
//!
//! Rects are measured with `getBoundingClientRect()` per event. Dropping the
//! mount tears the controller down, presents the idle baseline one last time,
//! stops the loop, and removes every listener.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::ToString;
use alloc::vec::Vec;
use core::cell::RefCell;

use kurbo::{Point, Rect, Size};
use vitrine_core::backend::Presenter;
use vitrine_core::config::HeroConfig;
use vitrine_core::controller::{SessionEnd, TransitionController};
use vitrine_core::cycle::SourceProvider;
use vitrine_core::time::HostTime;
use vitrine_core::timing::FrameTick;
use vitrine_core::trace::{
    FrameSummaryBuilder, FrameTickEvent, LoadEvent, PhaseBeginEvent, PhaseEndEvent, PhaseKind,
    TraceSink, TransitionEndEvent, Tracer, TriggerEvent,
};
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, EventTarget, MouseEvent};

use crate::presenter::{DomPresenter, HeroElements, MediaRole};
use crate::raf::RafLoop;

type Listener = Closure<dyn FnMut(Event)>;

struct Hero {
    controller: TransitionController,
    presenter: DomPresenter,
    sink: Option<Box<dyn TraceSink>>,
}

impl Hero {
    fn tracer(&mut self) -> Tracer<'_> {
        match &mut self.sink {
            Some(sink) => Tracer::new(sink.as_mut()),
            None => Tracer::none(),
        }
    }

    fn trace_end(&mut self, frame_index: Option<u64>, end: Option<SessionEnd>) {
        if let Some(end) = end {
            self.tracer().transition_end(&TransitionEndEvent {
                frame_index,
                timestamp: crate::now(),
                end,
            });
        }
    }

    fn on_frame(&mut self, tick: FrameTick) {
        let tick_event = FrameTickEvent::from(&tick);
        self.tracer().frame_tick(&tick_event);
        let mut summary = FrameSummaryBuilder::new(&tick_event);

        let t = self.phase_begin(&mut summary, PhaseKind::Advance, tick.frame_index);
        let outcome = self.controller.tick(tick);
        self.trace_end(Some(tick.frame_index), outcome.ended);
        summary.set_outcome(self.controller.phase(), &outcome);
        self.phase_end(&mut summary, PhaseKind::Advance, tick.frame_index, t);

        let t = self.phase_begin(&mut summary, PhaseKind::Present, tick.frame_index);
        let frame = self.controller.take_frame();
        self.presenter.present(&frame);
        self.phase_end(&mut summary, PhaseKind::Present, tick.frame_index, t);

        self.tracer().frame_summary(&summary.finish());
    }

    fn phase_begin(
        &mut self,
        summary: &mut FrameSummaryBuilder,
        phase: PhaseKind,
        frame_index: u64,
    ) -> HostTime {
        let t = crate::now();
        summary.phase_begin(phase, t);
        self.tracer().phase_begin(&PhaseBeginEvent {
            frame_index,
            phase,
            timestamp: t,
        });
        t
    }

    fn phase_end(
        &mut self,
        summary: &mut FrameSummaryBuilder,
        phase: PhaseKind,
        frame_index: u64,
        begin: HostTime,
    ) {
        let t = crate::now().max(begin);
        summary.phase_end(phase, t);
        self.tracer().phase_end(&PhaseEndEvent {
            frame_index,
            phase,
            timestamp: t,
        });
    }

    fn media_loaded(&mut self, role: MediaRole) {
        let Some(slot) = self.presenter.shown(role) else {
            return;
        };
        let outcome = self.controller.media_loaded(slot);
        self.tracer().media_loaded(&LoadEvent {
            timestamp: crate::now(),
            slot,
            outcome,
        });
    }

    fn layout(&mut self) {
        let frame = &self.presenter.elements().frame;
        let size = Size::new(
            f64::from(frame.client_width()),
            f64::from(frame.client_height()),
        );
        self.controller.layout(size);
    }
}

/// A live hero: controller, presenter, tick loop, and DOM listeners.
pub struct HeroMount {
    hero: Rc<RefCell<Hero>>,
    raf: RafLoop,
    listeners: Vec<(EventTarget, &'static str, Listener)>,
}

impl core::fmt::Debug for HeroMount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HeroMount")
            .field("raf", &self.raf)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl HeroMount {
    /// Builds the controller, wires every listener, and starts ticking.
    pub fn new(
        elements: HeroElements,
        config: HeroConfig,
        sources: &impl SourceProvider,
    ) -> Result<Self, JsValue> {
        Self::build(elements, config, sources, None)
    }

    /// Like [`new`](Self::new), routing trace events to `sink`.
    pub fn with_trace_sink(
        elements: HeroElements,
        config: HeroConfig,
        sources: &impl SourceProvider,
        sink: Box<dyn TraceSink>,
    ) -> Result<Self, JsValue> {
        Self::build(elements, config, sources, Some(sink))
    }

    fn build(
        elements: HeroElements,
        config: HeroConfig,
        sources: &impl SourceProvider,
        sink: Option<Box<dyn TraceSink>>,
    ) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let controller = TransitionController::new(config, crate::timebase(), sources)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let presenter = DomPresenter::new(elements.clone(), controller.slots());

        let hero = Rc::new(RefCell::new(Hero {
            controller,
            presenter,
            sink,
        }));
        {
            let mut h = hero.borrow_mut();
            h.layout();
            let frame = h.controller.take_frame();
            h.presenter.present(&frame);
        }

        let mut mount = Self {
            hero: Rc::clone(&hero),
            raf: RafLoop::new({
                let hero = Rc::clone(&hero);
                move |tick| {
                    if let Ok(mut hero) = hero.try_borrow_mut() {
                        hero.on_frame(tick);
                    }
                }
            }),
            listeners: Vec::new(),
        };

        let frame_el = elements.frame.clone();
        mount.listen(&elements.frame, "mousemove", &hero, move |hero, event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let pointer = Point::new(f64::from(mouse.client_x()), f64::from(mouse.client_y()));
            hero.controller.pointer_moved(pointer, viewport_rect(&frame_el));
        })?;

        mount.listen(&elements.card, "mouseleave", &hero, |hero, _| {
            hero.controller.pointer_left();
        })?;

        let (trigger_el, frame_el) = (elements.trigger.clone(), elements.frame.clone());
        mount.listen(&elements.trigger, "click", &hero, move |hero, _| {
            let outcome = hero
                .controller
                .trigger(viewport_rect(&trigger_el), viewport_rect(&frame_el));
            hero.tracer().trigger(&TriggerEvent {
                timestamp: crate::now(),
                outcome,
            });
        })?;

        for (video, role) in [
            (&elements.background, MediaRole::Background),
            (&elements.preview_video, MediaRole::Preview),
            (&elements.overlay, MediaRole::Overlay),
        ] {
            mount.listen(video, "loadeddata", &hero, move |hero, _| {
                hero.media_loaded(role);
            })?;
        }

        mount.listen(&window, "resize", &hero, |hero, _| hero.layout())?;

        mount.raf.start();
        Ok(mount)
    }

    /// Whether the controller is mid-transition.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.hero
            .try_borrow()
            .is_ok_and(|hero| hero.controller.session().is_some())
    }

    fn listen(
        &mut self,
        target: &EventTarget,
        kind: &'static str,
        hero: &Rc<RefCell<Hero>>,
        mut handler: impl FnMut(&mut Hero, &Event) + 'static,
    ) -> Result<(), JsValue> {
        let hero = Rc::clone(hero);
        let closure = Closure::wrap(Box::new(move |event: Event| {
            // A re-entrant event (dispatched while a frame is presenting) is
            // dropped.
            if let Ok(mut hero) = hero.try_borrow_mut() {
                handler(&mut *hero, &event);
            }
        }) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        self.listeners.push((target.clone(), kind, closure));
        Ok(())
    }
}

impl Drop for HeroMount {
    fn drop(&mut self) {
        self.raf.stop();
        for (target, kind, closure) in self.listeners.drain(..) {
            let _ =
                target.remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        }
        if let Ok(mut hero) = self.hero.try_borrow_mut() {
            let end = hero.controller.teardown();
            hero.trace_end(None, end);
            let frame = hero.controller.take_frame();
            hero.presenter.present(&frame);
        }
    }
}

fn viewport_rect(el: &Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.x(), r.y(), r.x() + r.width(), r.y() + r.height())
}
