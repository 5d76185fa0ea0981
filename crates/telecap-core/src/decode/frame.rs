// crates/telecap-core/src/decode/frame.rs

use crate::decode::{DecodeStep, RawRecord, RecordDecoder};
use crate::error::{Result, TcError};

/// TLM1 framed telemetry stream:
///
/// header:  MAGIC[4] = "TLM1", version: u8 (must be PROTOCOL_VERSION)
/// message: kind: u8, len: u16 LE, payload[len]
///
/// kind 0x01 = telemetry record, payload = RECORD_LEN bytes LE:
///   timestamp_s: u32, distance: u32, speed: u32, altitude: u32,
///   power: u16, heart_rate: u8, cadence: u8, temperature: i8,
///   latitude: i32, longitude: i32
/// kind 0xFF = end-of-stream marker (len 0), the only successful terminal.
/// Any other kind is skipped without affecting decoder state.
const MAGIC: &[u8; 4] = b"TLM1";

pub const PROTOCOL_VERSION: u8 = 1;
pub const KIND_RECORD: u8 = 0x01;
pub const KIND_END: u8 = 0xFF;
pub const RECORD_LEN: usize = 29;

const HEADER_LEN: usize = 5;
const MESSAGE_HEADER_LEN: usize = 3;

/// Streaming decoder for TLM1. Buffers whatever fraction of a message the
/// current chunk ends in, so records may span any number of chunk reads.
pub struct FrameDecoder {
    pending: Vec<u8>,
    consumed: usize,
    header_seen: bool,
    done: bool,
}

impl Default for FrameDecoder {
    fn default() -> Self {
        FrameDecoder::new()
    }
}

impl FrameDecoder {
    pub fn new() -> Self {
        FrameDecoder {
            pending: Vec::with_capacity(RECORD_LEN + MESSAGE_HEADER_LEN),
            consumed: 0,
            header_seen: false,
            done: false,
        }
    }

    fn parse_pending(&mut self) -> Result<Option<DecodeStep>> {
        if !self.header_seen {
            if self.pending.len() < HEADER_LEN {
                return Ok(None);
            }
            if &self.pending[..4] != MAGIC {
                return Err(TcError::Decode("not a telemetry stream (bad magic)".into()));
            }
            let version = self.pending[4];
            if version != PROTOCOL_VERSION {
                return Err(TcError::Decode(format!(
                    "unsupported protocol version {version}"
                )));
            }
            self.pending.drain(..HEADER_LEN);
            self.header_seen = true;
        }

        if self.pending.len() < MESSAGE_HEADER_LEN {
            return Ok(None);
        }
        let kind = self.pending[0];
        let len = u16::from_le_bytes([self.pending[1], self.pending[2]]) as usize;
        if self.pending.len() < MESSAGE_HEADER_LEN + len {
            return Ok(None);
        }

        let payload_start = MESSAGE_HEADER_LEN;
        let step = match kind {
            KIND_RECORD => {
                if len != RECORD_LEN {
                    return Err(TcError::Decode(format!(
                        "telemetry record payload must be {RECORD_LEN} bytes, got {len}"
                    )));
                }
                let record = decode_record(&self.pending[payload_start..payload_start + len]);
                DecodeStep::Record(record)
            }
            KIND_END => {
                self.done = true;
                DecodeStep::EndOfStream
            }
            other => DecodeStep::Skipped(other as u16),
        };
        self.pending.drain(..MESSAGE_HEADER_LEN + len);
        Ok(Some(step))
    }
}

impl RecordDecoder for FrameDecoder {
    fn next(&mut self, chunk: &[u8]) -> Result<DecodeStep> {
        loop {
            if self.done {
                return Ok(DecodeStep::EndOfStream);
            }
            if let Some(step) = self.parse_pending()? {
                return Ok(step);
            }
            if self.consumed >= chunk.len() {
                // chunk fully stashed; hand control back for a refill
                self.consumed = 0;
                return Ok(DecodeStep::NeedMoreInput);
            }
            self.pending.extend_from_slice(&chunk[self.consumed..]);
            self.consumed = chunk.len();
        }
    }
}

fn decode_record(payload: &[u8]) -> RawRecord {
    let u32_at = |i: usize| u32::from_le_bytes([payload[i], payload[i + 1], payload[i + 2], payload[i + 3]]);
    let i32_at = |i: usize| i32::from_le_bytes([payload[i], payload[i + 1], payload[i + 2], payload[i + 3]]);
    RawRecord {
        timestamp_s: u32_at(0),
        distance: u32_at(4),
        speed: u32_at(8),
        altitude: u32_at(12),
        power: u16::from_le_bytes([payload[16], payload[17]]),
        heart_rate: payload[18],
        cadence: payload[19],
        temperature: payload[20] as i8,
        latitude: i32_at(21),
        longitude: i32_at(25),
    }
}

/// Encoding half, paired with the decoder so tests and tooling can produce
/// streams byte-for-byte.
pub fn encode_header(out: &mut Vec<u8>) {
    out.extend_from_slice(MAGIC);
    out.push(PROTOCOL_VERSION);
}

pub fn encode_message(out: &mut Vec<u8>, kind: u8, payload: &[u8]) {
    // the length field is u16; a wrapped length would frame garbage
    assert!(
        payload.len() <= u16::MAX as usize,
        "message payload too large for a TLM1 frame: {}",
        payload.len()
    );
    out.push(kind);
    out.extend_from_slice(&(payload.len() as u16).to_le_bytes());
    out.extend_from_slice(payload);
}

pub fn encode_record(out: &mut Vec<u8>, record: &RawRecord) {
    let mut payload = [0u8; RECORD_LEN];
    payload[0..4].copy_from_slice(&record.timestamp_s.to_le_bytes());
    payload[4..8].copy_from_slice(&record.distance.to_le_bytes());
    payload[8..12].copy_from_slice(&record.speed.to_le_bytes());
    payload[12..16].copy_from_slice(&record.altitude.to_le_bytes());
    payload[16..18].copy_from_slice(&record.power.to_le_bytes());
    payload[18] = record.heart_rate;
    payload[19] = record.cadence;
    payload[20] = record.temperature as u8;
    payload[21..25].copy_from_slice(&record.latitude.to_le_bytes());
    payload[25..29].copy_from_slice(&record.longitude.to_le_bytes());
    encode_message(out, KIND_RECORD, &payload);
}

pub fn encode_end(out: &mut Vec<u8>) {
    encode_message(out, KIND_END, &[]);
}
