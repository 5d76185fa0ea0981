// crates/telecap-core/src/decode/mod.rs

pub mod frame;

use crate::error::Result;

/// Message kind carried by `DecodeStep::Skipped`; wide enough for any
/// device protocol's message numbering.
pub type MessageKind = u16;

/// One decoded telemetry record as the device reports it. Absent fields
/// carry the sentinel value for their width (the numeric maximum), the
/// device convention for "not recorded".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawRecord {
    /// Device clock, whole seconds.
    pub timestamp_s: u32,
    /// Centimeters.
    pub distance: u32,
    /// Millimeters per second.
    pub speed: u32,
    /// Device altitude units: 5 * meters + 2500 raw, decoded as (raw/5) - 500 m.
    pub altitude: u32,
    /// Watts.
    pub power: u16,
    /// Beats per minute.
    pub heart_rate: u8,
    /// Revolutions per minute.
    pub cadence: u8,
    /// Degrees Celsius.
    pub temperature: i8,
    /// Semicircles.
    pub latitude: i32,
    /// Semicircles.
    pub longitude: i32,
}

impl RawRecord {
    /// A record with only the timestamp populated; every other field holds
    /// its sentinel.
    pub const fn at(timestamp_s: u32) -> Self {
        RawRecord {
            timestamp_s,
            distance: u32::MAX,
            speed: u32::MAX,
            altitude: u32::MAX,
            power: u16::MAX,
            heart_rate: u8::MAX,
            cadence: u8::MAX,
            temperature: i8::MAX,
            latitude: i32::MAX,
            longitude: i32::MAX,
        }
    }
}

/// Result of one decoder poll. Status and payload travel together; fatal
/// conditions (malformed stream, unsupported protocol version) surface as
/// `Err(TcError::Decode)` instead of separate status codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeStep {
    /// Everything fed so far is consumed; refill the chunk and call again.
    NeedMoreInput,
    /// A telemetry record.
    Record(RawRecord),
    /// A non-telemetry message; the pipeline counts and ignores these.
    Skipped(MessageKind),
    /// Terminal. The only successful end of a stream.
    EndOfStream,
}

/// Contract for the external binary decoder. The driver feeds one chunk and
/// polls `next` with that same chunk until `NeedMoreInput`; the decoder owns
/// any partial-message state spanning chunk boundaries.
pub trait RecordDecoder {
    fn next(&mut self, chunk: &[u8]) -> Result<DecodeStep>;
}
