//! Tunables for the compositor.
//!
//! Defaults come from `constants.rs`. Hosts may override individual values
//! from string key/value pairs (the web front-end reads them from
//! `data-scrollgl-*` attributes) and must call [`Settings::validate`] before
//! handing the result to the compositor.

use crate::constants::*;
use crate::error::ConfigError;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub camera_distance: f32,
    pub near: f32,
    pub far: f32,
    pub max_pixel_ratio: f32,
    pub time_step: f32,
    pub speed_smoothing: f32,
    pub hover_ease: f32,
    pub resize_debounce_ms: u32,
    pub plane_segments: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            camera_distance: CAMERA_DISTANCE,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            max_pixel_ratio: MAX_PIXEL_RATIO,
            time_step: TIME_STEP,
            speed_smoothing: SPEED_SMOOTHING,
            hover_ease: HOVER_EASE,
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
            plane_segments: PLANE_SEGMENTS,
        }
    }
}

/// The subset of [`Settings`] that may change while the loop is running.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tunables {
    pub time_step: f32,
    pub speed_smoothing: f32,
    pub hover_ease: f32,
}

/// Keys accepted by [`Settings::apply_override`], kebab-case.
pub const SETTING_KEYS: &[&str] = &[
    "camera-distance",
    "near",
    "far",
    "max-pixel-ratio",
    "time-step",
    "speed-smoothing",
    "hover-ease",
    "resize-debounce-ms",
    "plane-segments",
];

fn parse<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Unparsable {
        key: key.to_string(),
        value: value.to_string(),
    })
}

impl Settings {
    pub fn apply_override(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "camera-distance" => self.camera_distance = parse(key, value)?,
            "near" => self.near = parse(key, value)?,
            "far" => self.far = parse(key, value)?,
            "max-pixel-ratio" => self.max_pixel_ratio = parse(key, value)?,
            "time-step" => self.time_step = parse(key, value)?,
            "speed-smoothing" => self.speed_smoothing = parse(key, value)?,
            "hover-ease" => self.hover_ease = parse(key, value)?,
            "resize-debounce-ms" => self.resize_debounce_ms = parse(key, value)?,
            "plane-segments" => self.plane_segments = parse(key, value)?,
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("camera-distance", self.camera_distance),
            ("near", self.near),
            ("far", self.far),
            ("max-pixel-ratio", self.max_pixel_ratio),
            ("time-step", self.time_step),
        ];
        for (key, v) in positive {
            if !(v.is_finite() && v > 0.0) {
                return Err(ConfigError::OutOfRange {
                    key,
                    reason: "must be finite and positive",
                });
            }
        }
        if !(self.near < self.camera_distance && self.camera_distance < self.far) {
            return Err(ConfigError::OutOfRange {
                key: "camera-distance",
                reason: "must lie strictly between near and far",
            });
        }
        // A divisor below 1 would overshoot the target.
        if !(self.speed_smoothing.is_finite() && self.speed_smoothing >= 1.0) {
            return Err(ConfigError::OutOfRange {
                key: "speed-smoothing",
                reason: "must be at least 1",
            });
        }
        if !(0.0..=1.0).contains(&self.hover_ease) {
            return Err(ConfigError::OutOfRange {
                key: "hover-ease",
                reason: "must be within [0, 1]",
            });
        }
        if !(1..=MAX_RESIZE_DEBOUNCE_MS).contains(&self.resize_debounce_ms) {
            return Err(ConfigError::OutOfRange {
                key: "resize-debounce-ms",
                reason: "must be within [1, 60000]",
            });
        }
        if self.plane_segments == 0 {
            return Err(ConfigError::OutOfRange {
                key: "plane-segments",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    pub fn tunables(&self) -> Tunables {
        Tunables {
            time_step: self.time_step,
            speed_smoothing: self.speed_smoothing,
            hover_ease: self.hover_ease,
        }
    }

    /// Applies live tunables, keeping the current values for any that would
    /// make the settings invalid.
    pub fn set_tunables(&mut self, t: Tunables) {
        if t.time_step.is_finite() && t.time_step > 0.0 {
            self.time_step = t.time_step;
        }
        if t.speed_smoothing.is_finite() && t.speed_smoothing >= 1.0 {
            self.speed_smoothing = t.speed_smoothing;
        }
        if (0.0..=1.0).contains(&t.hover_ease) {
            self.hover_ease = t.hover_ease;
        }
    }
}
