// crates/telecap-core/src/smooth.rs

use crate::error::Result;
use crate::field::FieldType;
use crate::sample::Sample;

pub const MAX_SMOOTHING: u8 = 5;

/// Interpolation engine: a two-slot state machine over the aligned sample
/// stream. Each real device-to-device gap yields exactly factor+1 emitted
/// samples (1 when smoothing is off), every one carrying a synthesized
/// TimestampNext equal to its successor's Timestamp.
///
/// Samples are held by value and moved between the slots; the emit callback
/// sees each sample exactly once, in arrival order.
pub struct Smoother {
    factor: u8,
    previous: Option<Sample>,
}

impl Smoother {
    pub fn new(factor: u8) -> Self {
        Smoother { factor, previous: None }
    }

    pub fn push(
        &mut self,
        current: Sample,
        mut emit: impl FnMut(&Sample) -> Result<()>,
    ) -> Result<()> {
        let Some(mut prev) = self.previous.take() else {
            self.previous = Some(current);
            return Ok(());
        };

        if self.factor == 0 {
            prev.set(FieldType::TimestampNext, current.timestamp());
            emit(&prev)?;
        } else {
            let pieces = self.factor as i64 + 1;
            let step = (current.timestamp() - prev.timestamp()) / pieces;
            let delta = (current - prev) / pieces;

            prev.set(FieldType::TimestampNext, prev.timestamp() + step);
            emit(&prev)?;
            for _ in 0..self.factor {
                prev = prev + delta;
                prev.set(FieldType::TimestampNext, prev.timestamp() + step);
                emit(&prev)?;
            }
        }

        self.previous = Some(current);
        Ok(())
    }

    /// End of stream: the last retained sample has no successor, so it gets
    /// a notional 1-second duration.
    pub fn finish(&mut self, mut emit: impl FnMut(&Sample) -> Result<()>) -> Result<()> {
        if let Some(mut prev) = self.previous.take() {
            prev.set(FieldType::TimestampNext, prev.timestamp() + 1000);
            emit(&prev)?;
        }
        Ok(())
    }
}
