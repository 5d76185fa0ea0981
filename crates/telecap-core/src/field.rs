// crates/telecap-core/src/field.rs

/// Closed set of telemetry fields. Ordinals are wire-stable: each field's
/// membership bit is 1 << ordinal and JSON output is keyed by the short code,
/// so neither may ever be renumbered or reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum FieldType {
    Speed = 0,
    Distance = 1,
    HeartRate = 2,
    Altitude = 3,
    Power = 4,
    Cadence = 5,
    Temperature = 6,
    Timestamp = 7,
    Latitude = 8,
    Longitude = 9,
    TimestampNext = 10,
}

pub const FIELD_COUNT: usize = 11;

/// Every field bit set.
pub const ALL_FIELDS: u32 = (1 << FIELD_COUNT as u32) - 1;

pub const ALL: [FieldType; FIELD_COUNT] = [
    FieldType::Speed,
    FieldType::Distance,
    FieldType::HeartRate,
    FieldType::Altitude,
    FieldType::Power,
    FieldType::Cadence,
    FieldType::Temperature,
    FieldType::Timestamp,
    FieldType::Latitude,
    FieldType::Longitude,
    FieldType::TimestampNext,
];

impl FieldType {
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn mask(self) -> u32 {
        1 << self as u32
    }

    pub fn spec(self) -> &'static FieldSpec {
        &FIELD_SPECS[self.index()]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn code(self) -> &'static str {
        self.spec().code
    }

    pub fn from_name(name: &str) -> Option<FieldType> {
        ALL.iter().copied().find(|f| f.name() == name)
    }
}

/// Caption render spec for one unit system: total value column width (the
/// rendered value is left-padded with spaces to this) and the unit suffix
/// appended after it. Zero width means the field never appears in captions.
#[derive(Clone, Copy, Debug)]
pub struct UnitFormat {
    pub width: usize,
    pub suffix: &'static str,
}

/// Single source of truth for per-field naming and caption formatting,
/// indexed by `FieldType` ordinal. Both emitter families read from here.
#[derive(Clone, Copy, Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub code: &'static str,
    pub metric: UnitFormat,
    pub imperial: UnitFormat,
}

const fn unit(width: usize, suffix: &'static str) -> UnitFormat {
    UnitFormat { width, suffix }
}

const NO_UNIT: UnitFormat = unit(0, "");

pub static FIELD_SPECS: [FieldSpec; FIELD_COUNT] = [
    FieldSpec { name: "speed", code: "s", metric: unit(5, " km/h"), imperial: unit(5, " mph") },
    FieldSpec { name: "distance", code: "d", metric: unit(6, " km"), imperial: unit(6, " mi") },
    FieldSpec { name: "heartrate", code: "h", metric: unit(4, " bpm"), imperial: unit(4, " bpm") },
    FieldSpec { name: "altitude", code: "a", metric: unit(6, " m"), imperial: unit(6, " ft") },
    FieldSpec { name: "power", code: "p", metric: unit(5, " W"), imperial: unit(5, " W") },
    FieldSpec { name: "cadence", code: "c", metric: unit(4, " rpm"), imperial: unit(4, " rpm") },
    FieldSpec { name: "temperature", code: "t", metric: unit(4, "\u{b0}C"), imperial: unit(4, "\u{b0}F") },
    FieldSpec { name: "timestamp", code: "f", metric: NO_UNIT, imperial: NO_UNIT },
    FieldSpec { name: "latitude", code: "u", metric: NO_UNIT, imperial: NO_UNIT },
    FieldSpec { name: "longitude", code: "o", metric: NO_UNIT, imperial: NO_UNIT },
    FieldSpec { name: "timestampnext", code: "n", metric: NO_UNIT, imperial: NO_UNIT },
];

/// Fixed order of value columns on a caption content line.
pub const CAPTION_ORDER: [FieldType; 7] = [
    FieldType::Distance,
    FieldType::Speed,
    FieldType::HeartRate,
    FieldType::Cadence,
    FieldType::Power,
    FieldType::Temperature,
    FieldType::Altitude,
];

/// Parse a comma-delimited field-name list into a membership mask.
/// Unrecognized names are ignored; an empty result (0) is the caller's cue
/// to fall back to all fields.
pub fn mask_from_names(names: &str) -> u32 {
    let mut mask = 0u32;
    for tag in names.split(',') {
        let tag = tag.trim();
        if tag.is_empty() {
            continue;
        }
        if let Some(field) = FieldType::from_name(tag) {
            mask |= field.mask();
        }
    }
    mask
}
