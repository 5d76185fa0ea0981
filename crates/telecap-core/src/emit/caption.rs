// crates/telecap-core/src/emit/caption.rs

use std::fmt::Write;

use crate::emit::{altitude_value, distance_divisor, speed_divisor, temperature_value, UnitSystem};
use crate::error::{Result, TcError};
use crate::field::{FieldType, CAPTION_ORDER};
use crate::sample::Sample;

const VTT_HEADER: &str = "WEBVTT\n\n";
const NO_VALUE: &str = "---";

/// Caption time budget: two digits of hours. Anything at or past 99 hours
/// cannot be rendered and aborts the conversion.
const MAX_CUE_MS: i64 = 99 * 3_600_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptionVariant {
    /// WebVTT-like: "WEBVTT" header token, dot millisecond separator,
    /// no sequence numbers.
    Vtt,
    /// SubRip-like: comma separator, 1-based sequence number per cue.
    Srt,
}

impl CaptionVariant {
    fn millis_separator(self) -> char {
        match self {
            CaptionVariant::Vtt => '.',
            CaptionVariant::Srt => ',',
        }
    }
}

/// Renders `value / divisor` at `precision` decimals into at most `total`
/// characters, by truncation only:
/// format at fixed precision, cut the text to `total` characters, cut again
/// past `precision` digits after the dot, and drop a dangling trailing dot.
/// No rounding at any stage: 123456 cm / 100000.0 at (5, 2) is "1.23",
/// 12345678901 cm is "12345" with the fraction truncated away entirely.
pub fn format_scaled(value: i64, divisor: f64, total: usize, precision: usize) -> String {
    let mut s = format!("{:.6}", value as f64 / divisor);
    s.truncate(total);
    if let Some(dot) = s.find('.') {
        let keep = dot + precision + 1;
        if s.len() > keep {
            s.truncate(keep);
        }
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeParts {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub millis: i64,
}

/// Decompose output-clock milliseconds into caption time parts. Bijective on
/// [0, 99h); anything outside is a fatal formatting error.
pub fn split_timestamp(ms: i64) -> Result<TimeParts> {
    if !(0..MAX_CUE_MS).contains(&ms) {
        return Err(TcError::TimeOverflow(ms));
    }
    let hours = ms / 3_600_000;
    let mut rem = ms - hours * 3_600_000;
    let minutes = rem / 60_000;
    rem -= minutes * 60_000;
    let seconds = rem / 1000;
    let millis = rem - seconds * 1000;
    Ok(TimeParts { hours, minutes, seconds, millis })
}

pub struct CaptionEmitter {
    variant: CaptionVariant,
    units: UnitSystem,
    lead_in_ms: i64,
    sequence: u64,
    out: String,
}

impl CaptionEmitter {
    pub fn new(variant: CaptionVariant, units: UnitSystem, lead_in_ms: i64, capacity: usize) -> Self {
        let mut out = String::with_capacity(capacity);
        if variant == CaptionVariant::Vtt {
            out.push_str(VTT_HEADER);
        }
        CaptionEmitter { variant, units, lead_in_ms, sequence: 0, out }
    }

    pub fn emit(&mut self, sample: &Sample) -> Result<()> {
        if self.sequence == 0 && self.lead_in_ms > 0 {
            // data not yet available while the output clock runs ahead of
            // the shifted device stream
            self.cue_header(0, self.lead_in_ms)?;
            self.out.push_str(NO_VALUE);
            self.close_cue();
        }

        self.cue_header(sample.timestamp(), sample.timestamp_next())?;
        for field in CAPTION_ORDER {
            if sample.has(field) {
                self.render_field(field, sample.get(field));
            }
        }
        self.close_cue();
        Ok(())
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn cue_header(&mut self, from_ms: i64, to_ms: i64) -> Result<()> {
        let from = split_timestamp(from_ms)?;
        let to = split_timestamp(to_ms)?;
        let sep = self.variant.millis_separator();

        self.sequence += 1;
        if self.variant == CaptionVariant::Srt {
            let _ = writeln!(self.out, "{}", self.sequence);
        }
        let _ = writeln!(
            self.out,
            "{:02}:{:02}:{:02}{}{:03} --> {:02}:{:02}:{:02}{}{:03}",
            from.hours, from.minutes, from.seconds, sep, from.millis,
            to.hours, to.minutes, to.seconds, sep, to.millis,
        );
        Ok(())
    }

    fn close_cue(&mut self) {
        self.out.push('\n');
        self.out.push('\n');
    }

    fn render_field(&mut self, field: FieldType, raw: i64) {
        let text = match field {
            FieldType::Distance => format_scaled(raw, distance_divisor(self.units), 5, 2),
            FieldType::Speed => format_scaled(raw, speed_divisor(self.units), 4, 1),
            FieldType::Altitude => altitude_value(raw, self.units).to_string(),
            FieldType::Temperature => temperature_value(raw, self.units).to_string(),
            // heart rate, cadence, power pass through unconverted
            _ => raw.to_string(),
        };
        let spec = if self.units.is_imperial() {
            field.spec().imperial
        } else {
            field.spec().metric
        };
        let _ = write!(self.out, "{:>width$}{}", text, spec.suffix, width = spec.width);
    }
}
