// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controller configuration.
//!
//! [`HeroConfig::standard`] reproduces the stock hero: four clips, three
//! loads to reveal, a 256 px preview that follows the pointer over 450 ms,
//! and a 950 ms expand transition. Every value is checked by
//! [`HeroConfig::validate`] before a controller is built.

use kurbo::Size;

/// What a trigger does while a transition is already in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RetriggerPolicy {
    /// Ignore the trigger; the running transition continues untouched.
    #[default]
    Reject,
    /// Cancel the running transition, restore the idle baseline, then start a
    /// fresh transition from the current preview position.
    Preempt,
}

/// Hover tilt parameters for the preview card.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltConfig {
    /// Largest card offset toward the pointer, in pixels.
    pub max_translate: f64,
    /// Largest rotation about either axis, in degrees.
    pub max_rotate_deg: f64,
    /// Perspective distance, in pixels.
    pub perspective: f64,
    /// Ease duration for offset and rotation.
    pub duration_ms: u32,
    /// Ease duration for the inner content.
    pub content_duration_ms: u32,
    /// Inner content moves by `-offset * parallax`.
    pub parallax: f64,
}

impl TiltConfig {
    /// Stock tilt: ±16 px, ±8°, 600 px perspective.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            max_translate: 16.0,
            max_rotate_deg: 8.0,
            perspective: 600.0,
            duration_ms: 350,
            content_duration_ms: 400,
            parallax: 0.6,
        }
    }

    /// A tilt that never moves.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            max_translate: 0.0,
            max_rotate_deg: 0.0,
            ..Self::standard()
        }
    }

    /// Offset/rotation ease duration in seconds.
    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        f64::from(self.duration_ms) / 1000.0
    }

    /// Content ease duration in seconds.
    #[must_use]
    pub fn content_duration_secs(&self) -> f64 {
        f64::from(self.content_duration_ms) / 1000.0
    }
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Configuration for a [`TransitionController`](crate::controller::TransitionController).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeroConfig {
    /// Number of media slots in the pool.
    pub slot_count: u32,
    /// Load signals needed before the loading overlay can be hidden.
    pub required_loads: u32,
    /// Size of the pointer-following preview.
    pub preview: Size,
    /// Ease duration for the pointer-following motion.
    pub follow_duration_ms: u32,
    /// Duration of the expand transition.
    pub transition_duration_ms: u32,
    /// Overlay corner radius at the start of a transition (and at rest).
    pub overlay_corner_radius: f64,
    /// Frame steps longer than this are clamped.
    pub max_frame_step_ms: u32,
    /// Trigger handling while a transition is running.
    pub retrigger: RetriggerPolicy,
    /// Preview hover tilt.
    pub tilt: TiltConfig,
}

impl HeroConfig {
    /// The stock hero configuration.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            slot_count: 4,
            required_loads: 3,
            preview: Size::new(256.0, 256.0),
            follow_duration_ms: 450,
            transition_duration_ms: 950,
            overlay_corner_radius: 12.0,
            max_frame_step_ms: 100,
            retrigger: RetriggerPolicy::Reject,
            tilt: TiltConfig::standard(),
        }
    }

    /// Checks every field for values the controller cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slot_count == 0 {
            return Err(ConfigError::NoSlots);
        }
        let p = self.preview;
        if !(p.width > 0.0 && p.height > 0.0 && p.is_finite()) {
            return Err(ConfigError::PreviewSize {
                width: p.width,
                height: p.height,
            });
        }
        if !(self.overlay_corner_radius >= 0.0 && self.overlay_corner_radius.is_finite()) {
            return Err(ConfigError::CornerRadius(self.overlay_corner_radius));
        }
        if self.max_frame_step_ms == 0 {
            return Err(ConfigError::ZeroFrameStep);
        }
        let t = &self.tilt;
        for (name, value) in [
            ("max_translate", t.max_translate),
            ("max_rotate_deg", t.max_rotate_deg),
            ("perspective", t.perspective),
            ("parallax", t.parallax),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(ConfigError::Tilt { field: name, value });
            }
        }
        Ok(())
    }

    /// Follow ease duration in seconds.
    #[must_use]
    pub fn follow_duration_secs(&self) -> f64 {
        f64::from(self.follow_duration_ms) / 1000.0
    }

    /// Transition duration in seconds.
    #[must_use]
    pub fn transition_duration_secs(&self) -> f64 {
        f64::from(self.transition_duration_ms) / 1000.0
    }
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// A configuration value the controller cannot work with.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The slot pool is empty.
    #[error("hero needs at least one media slot")]
    NoSlots,
    /// The preview size is zero, negative, or not finite.
    #[error("preview size {width}x{height} is not a positive finite size")]
    PreviewSize {
        /// Configured width.
        width: f64,
        /// Configured height.
        height: f64,
    },
    /// The overlay corner radius is negative or not finite.
    #[error("overlay corner radius {0} is not a non-negative finite value")]
    CornerRadius(f64),
    /// The frame step clamp is zero, so no animation could advance.
    #[error("max frame step must be at least 1 ms")]
    ZeroFrameStep,
    /// A tilt parameter is negative or not finite.
    #[error("tilt {field} = {value} is not a non-negative finite value")]
    Tilt {
        /// Name of the offending field.
        field: &'static str,
        /// Configured value.
        value: f64,
    },
}
