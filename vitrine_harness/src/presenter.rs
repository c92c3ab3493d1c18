// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`Presenter`] that keeps every frame it is given.

use alloc::vec::Vec;

use vitrine_core::backend::Presenter;
use vitrine_core::element::HeroFrame;

/// Records presented frames in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingPresenter {
    frames: Vec<HeroFrame>,
}

impl RecordingPresenter {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every frame presented so far.
    #[must_use]
    pub fn frames(&self) -> &[HeroFrame] {
        &self.frames
    }

    /// The most recent frame.
    #[must_use]
    pub fn last(&self) -> Option<&HeroFrame> {
        self.frames.last()
    }

    /// Number of frames that asked the overlay to restart playback.
    #[must_use]
    pub fn restarts(&self) -> usize {
        self.frames
            .iter()
            .filter(|f| f.overlay.restart_playback)
            .count()
    }

    /// Forgets recorded frames.
    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl Presenter for RecordingPresenter {
    fn present(&mut self, frame: &HeroFrame) {
        self.frames.push(*frame);
    }
}
