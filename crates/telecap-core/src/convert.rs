// crates/telecap-core/src/convert.rs

use crate::align::ClockAlignment;
use crate::decode::{DecodeStep, RecordDecoder};
use crate::emit::{Emitter, OutputFormat, StreamMeta, UnitSystem};
use crate::error::{Result, TcError};
use crate::field::{self, FieldType};
use crate::sample::Sample;
use crate::smooth::{Smoother, MAX_SMOOTHING};
use crate::source::{ByteSource, ReadStatus};

/// Fixed input chunk size, independent of input length. Partial records
/// spanning chunk boundaries are the decoder's responsibility.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Output buffer sizing when the source length is unknown.
const DEFAULT_OUTPUT_CAPACITY: usize = 2 * 1024 * 1024;

#[derive(Clone, Copy, Debug)]
pub struct ConvertOptions {
    pub format: OutputFormat,
    pub units: UnitSystem,
    /// Signed milliseconds: positive trims early device data, negative
    /// delays the output stream.
    pub offset_ms: i64,
    /// Interpolated samples per device gap, 0..=5.
    pub smoothing: u8,
    /// Field membership mask; 0 selects all fields.
    pub fields: u32,
}

impl ConvertOptions {
    pub fn validate(&self) -> Result<()> {
        if self.smoothing > MAX_SMOOTHING {
            return Err(TcError::Validation(format!(
                "smoothing factor must be 0..={MAX_SMOOTHING}, got {}",
                self.smoothing
            )));
        }
        Ok(())
    }
}

/// Run the full pipeline: read bounded chunks from `source`, feed `decoder`,
/// align each telemetry record to the output clock, synthesize interpolated
/// samples, and serialize in strict arrival order. Returns the complete
/// payload, or the first fatal error; there is no partial-success mode.
pub fn convert<D: RecordDecoder>(
    source: &mut ByteSource,
    decoder: &mut D,
    opts: &ConvertOptions,
) -> Result<String> {
    opts.validate()?;

    let declared = source.declared_size() as usize;
    let capacity = if declared == 0 {
        DEFAULT_OUTPUT_CAPACITY
    } else {
        declared + declared / 4
    };
    let collect = if opts.fields == 0 { field::ALL_FIELDS } else { opts.fields };

    let mut align = ClockAlignment::new(opts.offset_ms);
    let mut smoother = Smoother::new(opts.smoothing);
    let mut emitter = Emitter::new(opts.format, opts.units, align.output_epoch(), capacity);

    let mut chunk = vec![0u8; CHUNK_SIZE];
    let mut used_fields = 0u32;
    let mut records = 0u64;
    let mut skipped = 0u64;
    let mut finished = false;

    'read: while !finished {
        let filled = match source.read_into(&mut chunk)? {
            ReadStatus::Filled(n) => n,
            ReadStatus::EndOfStream => break 'read,
        };
        let fed = &chunk[..filled];

        loop {
            match decoder.next(fed)? {
                DecodeStep::NeedMoreInput => continue 'read,
                DecodeStep::Skipped(_) => skipped += 1,
                DecodeStep::EndOfStream => {
                    finished = true;
                    break;
                }
                DecodeStep::Record(raw) => {
                    let raw_ms = raw.timestamp_s as i64 * 1000;
                    let Some(output_ms) = align.align(raw_ms) else {
                        continue;
                    };

                    let mut sample = Sample::from_record(&raw, collect);
                    sample.set(FieldType::Timestamp, output_ms);
                    used_fields |= sample.mask();
                    records += 1;
                    smoother.push(sample, |s| emitter.emit(s))?;
                }
            }
        }
    }

    if !finished {
        return Err(TcError::Decode("unexpected end of stream".into()));
    }
    smoother.finish(|s| emitter.emit(s))?;

    tracing::info!(records, skipped, source_size = declared, "telemetry stream converted");

    let meta = StreamMeta {
        used_fields,
        device_epoch: align.device_epoch().unwrap_or(0),
        offset_ms: opts.offset_ms,
        units: opts.units,
    };
    Ok(emitter.finish(&meta))
}
