//! Slider state for an interactive display surface.
//!
//! The panel owns the current `DisplayParameters`. Each control change
//! overwrites one value and hands back the complete parameter set, so the
//! engine only ever sees whole, most-recent parameters.

use std::fmt;
use std::str::FromStr;

use crate::image_pipeline::common::error::PipelineError;
use crate::image_pipeline::composite::types::DisplayParameters;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterControl {
    RedGain,
    GreenGain,
    BlueGain,
    Ceiling,
}

impl ParameterControl {
    pub const ALL: [ParameterControl; 4] = [
        ParameterControl::RedGain,
        ParameterControl::GreenGain,
        ParameterControl::BlueGain,
        ParameterControl::Ceiling,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ParameterControl::RedGain => "red",
            ParameterControl::GreenGain => "green",
            ParameterControl::BlueGain => "blue",
            ParameterControl::Ceiling => "ceiling",
        }
    }
}

impl fmt::Display for ParameterControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ParameterControl {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" | "r" => Ok(ParameterControl::RedGain),
            "green" | "g" => Ok(ParameterControl::GreenGain),
            "blue" | "b" => Ok(ParameterControl::BlueGain),
            "ceiling" | "vmax" => Ok(ParameterControl::Ceiling),
            other => Err(PipelineError::InvalidParameter(format!(
                "unknown control '{other}', expected one of red, green, blue, ceiling"
            ))),
        }
    }
}

/// Allowed slider ranges. Gains default to [0, 2], the ceiling to [0.1, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderBounds {
    pub gain_min: f32,
    pub gain_max: f32,
    pub ceiling_min: f32,
    pub ceiling_max: f32,
}

impl Default for SliderBounds {
    fn default() -> Self {
        Self {
            gain_min: 0.0,
            gain_max: 2.0,
            ceiling_min: 0.1,
            ceiling_max: 1.0,
        }
    }
}

impl SliderBounds {
    /// Clamps `value` into the range of `control`. NaN snaps to the lower bound.
    pub fn clamp(&self, control: ParameterControl, value: f32) -> f32 {
        let (lo, hi) = match control {
            ParameterControl::Ceiling => (self.ceiling_min, self.ceiling_max),
            _ => (self.gain_min, self.gain_max),
        };
        if value.is_nan() { lo } else { value.max(lo).min(hi) }
    }
}

/// Current slider positions, last write wins.
#[derive(Debug, Clone)]
pub struct ControlPanel {
    bounds: SliderBounds,
    current: DisplayParameters,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::new(SliderBounds::default())
    }
}

impl ControlPanel {
    pub fn new(bounds: SliderBounds) -> Self {
        Self {
            bounds,
            current: DisplayParameters::default(),
        }
    }

    pub fn bounds(&self) -> &SliderBounds {
        &self.bounds
    }

    pub fn current(&self) -> DisplayParameters {
        self.current
    }

    pub fn value(&self, control: ParameterControl) -> f32 {
        match control {
            ParameterControl::RedGain => self.current.red_gain,
            ParameterControl::GreenGain => self.current.green_gain,
            ParameterControl::BlueGain => self.current.blue_gain,
            ParameterControl::Ceiling => self.current.ceiling,
        }
    }

    /// Moves one slider and returns the full parameter set after the move.
    pub fn set(&mut self, control: ParameterControl, value: f32) -> DisplayParameters {
        let value = self.bounds.clamp(control, value);
        match control {
            ParameterControl::RedGain => self.current.red_gain = value,
            ParameterControl::GreenGain => self.current.green_gain = value,
            ParameterControl::BlueGain => self.current.blue_gain = value,
            ParameterControl::Ceiling => self.current.ceiling = value,
        }
        self.current
    }

    /// Puts every slider back at its default position.
    pub fn reset(&mut self) -> DisplayParameters {
        self.current = DisplayParameters::default();
        self.current
    }
}
