// crates/telecap-core/src/sample.rs

use std::ops::{Add, Div, Sub};

use crate::decode::RawRecord;
use crate::field::{FieldType, FIELD_COUNT};

/// One canonical telemetry sample: a fixed slab of i64 values indexed by
/// `FieldType` ordinal plus a validity mask. A bit is set iff the source
/// record carried a non-sentinel value for that field and the caller's
/// requested field subset includes it. Unset slots stay zero, which is what
/// interpolation arithmetic runs over.
///
/// Values are i64 to survive accumulation across interpolation steps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sample {
    values: [i64; FIELD_COUNT],
    mask: u32,
}

impl Sample {
    /// Build a sample from a decoded record, keeping only fields that are
    /// both non-sentinel and requested in `collect`. The timestamp slot is
    /// filled (milliseconds) but its validity bit is set later, when clock
    /// alignment accepts the record and rewrites the timestamp.
    pub fn from_record(record: &RawRecord, collect: u32) -> Sample {
        let mut sample = Sample::default();
        sample.values[FieldType::Timestamp.index()] = record.timestamp_s as i64 * 1000;

        sample.apply(FieldType::Distance, record.distance as i64, record.distance != u32::MAX, collect);
        sample.apply(FieldType::Speed, record.speed as i64, record.speed != u32::MAX, collect);
        sample.apply(FieldType::Altitude, record.altitude as i64, record.altitude != u32::MAX, collect);
        sample.apply(FieldType::Power, record.power as i64, record.power != u16::MAX, collect);
        sample.apply(FieldType::HeartRate, record.heart_rate as i64, record.heart_rate != u8::MAX, collect);
        sample.apply(FieldType::Cadence, record.cadence as i64, record.cadence != u8::MAX, collect);
        sample.apply(FieldType::Temperature, record.temperature as i64, record.temperature != i8::MAX, collect);
        sample.apply(FieldType::Latitude, record.latitude as i64, record.latitude != i32::MAX, collect);
        sample.apply(FieldType::Longitude, record.longitude as i64, record.longitude != i32::MAX, collect);
        sample
    }

    fn apply(&mut self, field: FieldType, value: i64, valid: bool, collect: u32) {
        if valid && (collect & field.mask()) != 0 {
            self.values[field.index()] = value;
            self.mask |= field.mask();
        }
    }

    pub fn get(&self, field: FieldType) -> i64 {
        self.values[field.index()]
    }

    /// Store a value and mark the field valid.
    pub fn set(&mut self, field: FieldType, value: i64) {
        self.values[field.index()] = value;
        self.mask |= field.mask();
    }

    pub fn mask(&self) -> u32 {
        self.mask
    }

    pub fn has(&self, field: FieldType) -> bool {
        self.mask & field.mask() != 0
    }

    pub fn timestamp(&self) -> i64 {
        self.get(FieldType::Timestamp)
    }

    pub fn timestamp_next(&self) -> i64 {
        self.get(FieldType::TimestampNext)
    }
}

/// Mask policy for interpolation arithmetic: `Sub` and `Add` union the
/// operands' masks, `Div` preserves. A field valid on either endpoint is
/// therefore valid on every synthesized sample in between, interpolating
/// from the zeroed default on the side that lacked it.
impl Sub for Sample {
    type Output = Sample;

    fn sub(self, rhs: Sample) -> Sample {
        let mut out = Sample { values: [0; FIELD_COUNT], mask: self.mask | rhs.mask };
        for i in 0..FIELD_COUNT {
            out.values[i] = self.values[i] - rhs.values[i];
        }
        out
    }
}

impl Add for Sample {
    type Output = Sample;

    fn add(self, rhs: Sample) -> Sample {
        let mut out = Sample { values: [0; FIELD_COUNT], mask: self.mask | rhs.mask };
        for i in 0..FIELD_COUNT {
            out.values[i] = self.values[i] + rhs.values[i];
        }
        out
    }
}

impl Div<i64> for Sample {
    type Output = Sample;

    fn div(self, divisor: i64) -> Sample {
        let mut out = Sample { values: [0; FIELD_COUNT], mask: self.mask };
        for i in 0..FIELD_COUNT {
            out.values[i] = self.values[i] / divisor;
        }
        out
    }
}
