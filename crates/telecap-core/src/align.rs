// crates/telecap-core/src/align.rs

/// Maps device-clock milliseconds onto the output clock given a signed
/// offset, latched from the first record seen.
///
/// Positive offset: the device epoch is advanced by the offset, so earlier
/// device samples (including the epoch-defining first record itself) are
/// dropped; the offset-th second of device data lands at the first second
/// of output. Negative offset: the whole output stream is shifted later by
/// `abs(offset)`.
#[derive(Clone, Copy, Debug)]
pub struct ClockAlignment {
    offset_ms: i64,
    device_epoch: Option<i64>,
    output_epoch: i64,
}

impl ClockAlignment {
    pub fn new(offset_ms: i64) -> Self {
        ClockAlignment {
            offset_ms,
            device_epoch: None,
            output_epoch: if offset_ms < 0 { -offset_ms } else { 0 },
        }
    }

    /// Align one device timestamp. `None` means the record is dropped
    /// entirely (not counted as a sample).
    pub fn align(&mut self, raw_ms: i64) -> Option<i64> {
        let epoch = match self.device_epoch {
            Some(e) => e,
            None => {
                let e = raw_ms + self.offset_ms.max(0);
                self.device_epoch = Some(e);
                e
            }
        };

        if self.offset_ms > 0 && raw_ms < epoch {
            return None;
        }
        Some(raw_ms - epoch + self.output_epoch)
    }

    /// Resolved device epoch (first device timestamp plus any positive
    /// offset), once a record has been seen.
    pub fn device_epoch(&self) -> Option<i64> {
        self.device_epoch
    }

    /// Output-clock start of real data; non-zero only for negative offsets.
    pub fn output_epoch(&self) -> i64 {
        self.output_epoch
    }
}
