use serde_json::Value;

use telecap_core::decode::frame::{encode_end, encode_header, encode_record, FrameDecoder};
use telecap_core::decode::RawRecord;
use telecap_core::field::FieldType;
use telecap_core::{convert, ByteSource, ConvertOptions, OutputFormat, UnitSystem};

fn stream(records: &[RawRecord]) -> Vec<u8> {
    let mut bytes = Vec::new();
    encode_header(&mut bytes);
    for r in records {
        encode_record(&mut bytes, r);
    }
    encode_end(&mut bytes);
    bytes
}

fn run(records: &[RawRecord], opts: &ConvertOptions) -> Value {
    let mut source = ByteSource::memory(stream(records));
    let mut decoder = FrameDecoder::new();
    let payload = convert(&mut source, &mut decoder, opts).unwrap();
    serde_json::from_str(&payload).unwrap()
}

fn options() -> ConvertOptions {
    ConvertOptions {
        format: OutputFormat::Json,
        units: UnitSystem::Metric,
        offset_ms: 0,
        smoothing: 0,
        fields: 0,
    }
}

#[test]
fn document_shape_and_record_fields() {
    let mut records = Vec::new();
    for ts in 0u32..3 {
        let mut r = RawRecord::at(ts);
        r.distance = (ts + 1) * 100_000;
        records.push(r);
    }
    let doc = run(&records, &options());

    let recs = doc["records"].as_array().unwrap();
    assert_eq!(recs.len(), 3);
    assert_eq!(recs[0]["f"], 0);
    assert_eq!(recs[0]["n"], 1000);
    assert_eq!(recs[0]["d"], 1.0);
    assert_eq!(recs[1]["d"], 2.0);
    // last record closes out with the default 1 Hz duration
    assert_eq!(recs[2]["f"], 2000);
    assert_eq!(recs[2]["n"], 3000);
    // absent fields never appear
    assert!(recs[0].get("h").is_none());
    assert!(recs[0].get("s").is_none());
}

#[test]
fn legend_block_covers_every_field() {
    let mut r = RawRecord::at(0);
    r.distance = 100_000;
    let doc = run(&[r], &options());

    let types = doc["types"].as_object().unwrap();
    assert_eq!(types.len(), 11);
    assert_eq!(types["speed"], 1);
    assert_eq!(types["distance"], 2);
    assert_eq!(types["timestamp"], 128);
    assert_eq!(types["timestampnext"], 1024);

    let codes = doc["codes"].as_object().unwrap();
    assert_eq!(codes.len(), 11);
    assert_eq!(codes["temperature"], "t");
    assert_eq!(codes["timestampnext"], "n");
    assert_eq!(codes["timestamp"], "f");

    // used-fields mask covers accepted record fields
    let used = doc["fields"].as_u64().unwrap() as u32;
    assert_eq!(used, FieldType::Distance.mask() | FieldType::Timestamp.mask());

    assert_eq!(doc["timestamp"], 0);
    assert_eq!(doc["offset"], 0);
    assert_eq!(doc["units"], "metric");
}

#[test]
fn metadata_reports_resolved_epoch_and_offset() {
    let mut r = RawRecord::at(1000);
    r.distance = 100_000;
    let mut r2 = RawRecord::at(1010);
    r2.distance = 200_000;

    let mut opts = options();
    opts.offset_ms = 4000;
    let doc = run(&[r, r2], &opts);

    // epoch = first device ms + positive offset
    assert_eq!(doc["timestamp"], 1_004_000);
    assert_eq!(doc["offset"], 4000);
}

#[test]
fn imperial_units_convert_json_values() {
    let mut r = RawRecord::at(0);
    r.distance = 160_934;
    r.speed = 4472; // mm/s, ~10 mph
    r.altitude = 3000; // (3000/5)-500 = 100 m
    r.temperature = 20;
    let mut r2 = r;
    r2.timestamp_s = 1;

    let mut opts = options();
    opts.units = UnitSystem::Imperial;
    let doc = run(&[r, r2], &opts);

    let rec = &doc["records"][0];
    assert_eq!(rec["d"], 0.99);
    assert_eq!(rec["s"], 9.99);
    assert_eq!(rec["a"], 328);
    assert_eq!(rec["t"], 68);
    assert_eq!(doc["units"], "imperial");
}

#[test]
fn doubles_truncate_on_decimal_digits_not_float_bits() {
    // exact two-decimal distances whose nearest f64 lies just below the
    // scaled integer must not lose a hundredth
    let mut r = RawRecord::at(0);
    r.distance = 29_000; // exactly 0.29 km
    let mut r2 = RawRecord::at(1);
    r2.distance = 57_000; // exactly 0.57 km
    let doc = run(&[r, r2], &options());

    assert_eq!(doc["records"][0]["d"], 0.29);
    assert_eq!(doc["records"][1]["d"], 0.57);

    // and still no rounding when a third decimal is present
    let mut r3 = RawRecord::at(0);
    r3.distance = 28_999; // 0.28999 km
    let doc = run(&[r3], &options());
    assert_eq!(doc["records"][0]["d"], 0.28);
}

#[test]
fn positions_pass_through_as_semicircles() {
    let mut r = RawRecord::at(0);
    r.latitude = 536_870_912;
    r.longitude = -536_870_912;
    let doc = run(&[r], &options());

    let rec = &doc["records"][0];
    assert_eq!(rec["u"], 536_870_912);
    assert_eq!(rec["o"], -536_870_912);
}
