// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The fixed media pool and its round-robin order.
//!
//! Slots are addressed by 1-based [`SlotIndex`] values. [`CycleSequencer`] is
//! a pure function of the active index and the pool size; the controller is
//! the only owner of the active index and only moves it when a transition
//! completes.

use alloc::format;
use alloc::string::String;
use core::fmt;
use core::num::NonZeroU32;

/// A 1-based index into the media pool.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotIndex(NonZeroU32);

impl SlotIndex {
    /// The first slot.
    pub const FIRST: Self = Self(NonZeroU32::MIN);

    /// Creates an index, returning `None` for zero.
    #[inline]
    #[must_use]
    pub const fn new(index: u32) -> Option<Self> {
        match NonZeroU32::new(index) {
            Some(n) => Some(Self(n)),
            None => None,
        }
    }

    /// Returns the 1-based value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Returns the 0-based position, for indexing storage.
    #[inline]
    #[must_use]
    pub const fn position(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

impl fmt::Debug for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SlotIndex({})", self.0)
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Round-robin ordering over a pool of `total` slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CycleSequencer {
    total: NonZeroU32,
}

impl CycleSequencer {
    /// Creates a sequencer for `total` slots, or `None` for an empty pool.
    #[must_use]
    pub const fn new(total: u32) -> Option<Self> {
        match NonZeroU32::new(total) {
            Some(total) => Some(Self { total }),
            None => None,
        }
    }

    /// Number of slots in the pool.
    #[inline]
    #[must_use]
    pub const fn total(self) -> u32 {
        self.total.get()
    }

    /// The slot that follows `active`: `(active mod total) + 1`.
    #[must_use]
    pub const fn next(self, active: SlotIndex) -> SlotIndex {
        let next = active.get() % self.total.get() + 1;
        match SlotIndex::new(next) {
            Some(index) => index,
            // `x % n + 1` is never zero.
            None => SlotIndex::FIRST,
        }
    }

    /// Every slot in order.
    pub fn slots(self) -> impl Iterator<Item = SlotIndex> {
        (1..=self.total.get()).filter_map(SlotIndex::new)
    }
}

/// Resolves a slot to the URI of its media.
///
/// The controller treats sources as injected configuration: it asks once per
/// slot at construction and never recomputes them.
pub trait SourceProvider {
    /// Returns a stable URI for `index`.
    fn source(&self, index: SlotIndex) -> String;
}

impl<F> SourceProvider for F
where
    F: Fn(SlotIndex) -> String,
{
    fn source(&self, index: SlotIndex) -> String {
        self(index)
    }
}

/// Formats sources as `"{prefix}{index}{suffix}"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PatternSource<'a> {
    /// Text before the index.
    pub prefix: &'a str,
    /// Text after the index.
    pub suffix: &'a str,
}

impl PatternSource<'static> {
    /// `videos/hero-{index}.mp4`
    pub const HERO_VIDEOS: Self = Self {
        prefix: "videos/hero-",
        suffix: ".mp4",
    };
}

impl SourceProvider for PatternSource<'_> {
    fn source(&self, index: SlotIndex) -> String {
        format!("{}{}{}", self.prefix, index, self.suffix)
    }
}

/// One member of the media pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaSlot {
    index: SlotIndex,
    source: String,
    has_reported_loaded: bool,
}

impl MediaSlot {
    /// Creates an unloaded slot.
    #[must_use]
    pub fn new(index: SlotIndex, source: String) -> Self {
        Self {
            index,
            source,
            has_reported_loaded: false,
        }
    }

    /// This slot's index.
    #[inline]
    #[must_use]
    pub const fn index(&self) -> SlotIndex {
        self.index
    }

    /// URI of this slot's media.
    #[inline]
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether any element showing this slot has reported loaded.
    #[inline]
    #[must_use]
    pub const fn has_reported_loaded(&self) -> bool {
        self.has_reported_loaded
    }

    /// Latches the loaded flag. Returns `true` the first time only.
    pub fn mark_loaded(&mut self) -> bool {
        let first = !self.has_reported_loaded;
        self.has_reported_loaded = true;
        first
    }
}
