// crates/telecap-core/src/emit/json.rs

use serde_json::{json, Map, Value};

use crate::emit::{altitude_value, distance_divisor, speed_divisor, temperature_value, StreamMeta, UnitSystem};
use crate::field::{FieldType, ALL};
use crate::sample::Sample;

/// Structured-document emitter: one object per sample holding exactly the
/// valid fields keyed by short code, a trailing legend/metadata block after
/// the records array.
pub struct JsonEmitter {
    units: UnitSystem,
    records: Vec<Value>,
}

/// Doubles carry at most two decimals, cut from the decimal digit string.
/// Truncating in the float domain instead can lose a hundredth on exact
/// decimals whose nearest f64 sits just below the scaled integer (0.29 km
/// scaled to 28.999...).
fn trunc2(x: f64) -> f64 {
    let mut s = format!("{x:.6}");
    if let Some(dot) = s.find('.') {
        s.truncate(dot + 3);
    }
    s.parse().unwrap_or(x)
}

impl JsonEmitter {
    pub fn new(units: UnitSystem) -> Self {
        JsonEmitter { units, records: Vec::new() }
    }

    pub fn emit(&mut self, sample: &Sample) {
        let units = self.units;
        let mut obj = Map::new();
        let mut put = |field: FieldType, value: Value| {
            if sample.has(field) {
                obj.insert(field.code().to_owned(), value);
            }
        };

        put(FieldType::Timestamp, json!(sample.timestamp()));
        put(FieldType::TimestampNext, json!(sample.timestamp_next()));
        put(
            FieldType::Distance,
            json!(trunc2(sample.get(FieldType::Distance) as f64 / distance_divisor(units))),
        );
        put(FieldType::HeartRate, json!(sample.get(FieldType::HeartRate)));
        put(FieldType::Cadence, json!(sample.get(FieldType::Cadence)));
        put(FieldType::Power, json!(sample.get(FieldType::Power)));
        put(FieldType::Altitude, json!(altitude_value(sample.get(FieldType::Altitude), units)));
        put(
            FieldType::Speed,
            json!(trunc2(sample.get(FieldType::Speed) as f64 / speed_divisor(units))),
        );
        put(FieldType::Temperature, json!(temperature_value(sample.get(FieldType::Temperature), units)));
        // positions stay in device semicircles
        put(FieldType::Latitude, json!(sample.get(FieldType::Latitude)));
        put(FieldType::Longitude, json!(sample.get(FieldType::Longitude)));

        self.records.push(Value::Object(obj));
    }

    pub fn finish(self, meta: &StreamMeta) -> String {
        let mut types = Map::new();
        let mut codes = Map::new();
        for field in ALL {
            types.insert(field.name().to_owned(), json!(field.mask()));
            codes.insert(field.name().to_owned(), json!(field.code()));
        }

        let document = json!({
            "records": self.records,
            "types": types,
            "codes": codes,
            "fields": meta.used_fields,
            "timestamp": meta.device_epoch,
            "offset": meta.offset_ms,
            "units": meta.units.name(),
        });
        document.to_string()
    }
}
