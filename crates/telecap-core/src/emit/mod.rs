// crates/telecap-core/src/emit/mod.rs

pub mod caption;
pub mod json;

use crate::error::{Result, TcError};
use crate::sample::Sample;

use caption::{CaptionEmitter, CaptionVariant};
use json::JsonEmitter;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Vtt,
    Srt,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "json" => Ok(OutputFormat::Json),
            "vtt" => Ok(OutputFormat::Vtt),
            "srt" => Ok(OutputFormat::Srt),
            other => Err(TcError::Validation(format!(
                "unknown output format '{other}', expected json, vtt or srt"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnitSystem {
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "metric" | "iso" => Ok(UnitSystem::Metric),
            "imperial" => Ok(UnitSystem::Imperial),
            other => Err(TcError::Validation(format!(
                "unknown unit system '{other}', expected metric (iso) or imperial"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }

    pub fn is_imperial(self) -> bool {
        self == UnitSystem::Imperial
    }
}

/// Unit conversions shared by every emitter. Device units in, display units
/// out; one definition so the format families cannot drift apart.
///
/// distance: cm -> km or mi; speed: mm/s -> km/h or mph.
pub fn distance_divisor(units: UnitSystem) -> f64 {
    if units.is_imperial() { 160934.4 } else { 100000.0 }
}

pub fn speed_divisor(units: UnitSystem) -> f64 {
    if units.is_imperial() { 447.2136 } else { 277.77 }
}

/// Raw device altitude -> meters or feet.
pub fn altitude_value(raw: i64, units: UnitSystem) -> i64 {
    let meters = (raw / 5) - 500;
    if units.is_imperial() {
        (meters as f64 * 3.28084) as i64
    } else {
        meters
    }
}

/// Celsius -> display degrees.
pub fn temperature_value(raw: i64, units: UnitSystem) -> i64 {
    if units.is_imperial() {
        raw * 9 / 5 + 32
    } else {
        raw
    }
}

/// Trailing metadata reported by the structured-document emitter.
#[derive(Clone, Copy, Debug)]
pub struct StreamMeta {
    pub used_fields: u32,
    pub device_epoch: i64,
    pub offset_ms: i64,
    pub units: UnitSystem,
}

/// Closed dispatch over the two emitter families. Samples arrive in emission
/// order and are not retained.
pub enum Emitter {
    Json(JsonEmitter),
    Caption(CaptionEmitter),
}

impl Emitter {
    /// `lead_in_ms` is the output-clock start of real data (non-zero for
    /// negative offsets); caption emitters render a placeholder cue over it.
    pub fn new(format: OutputFormat, units: UnitSystem, lead_in_ms: i64, capacity: usize) -> Emitter {
        match format {
            OutputFormat::Json => Emitter::Json(JsonEmitter::new(units)),
            OutputFormat::Vtt => {
                Emitter::Caption(CaptionEmitter::new(CaptionVariant::Vtt, units, lead_in_ms, capacity))
            }
            OutputFormat::Srt => {
                Emitter::Caption(CaptionEmitter::new(CaptionVariant::Srt, units, lead_in_ms, capacity))
            }
        }
    }

    pub fn emit(&mut self, sample: &Sample) -> Result<()> {
        match self {
            Emitter::Json(e) => {
                e.emit(sample);
                Ok(())
            }
            Emitter::Caption(e) => e.emit(sample),
        }
    }

    pub fn finish(self, meta: &StreamMeta) -> String {
        match self {
            Emitter::Json(e) => e.finish(meta),
            Emitter::Caption(e) => e.finish(),
        }
    }
}
