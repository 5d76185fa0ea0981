// crates/telecap-core/src/source.rs

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::error::Result;

/// Outcome of one `read_into` call. `Filled(n)` always has n > 0; a source
/// that has nothing left reports `EndOfStream` instead of a zero fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadStatus {
    Filled(usize),
    EndOfStream,
}

/// Uniform "fill this buffer" adapter over the three supported byte inputs.
/// The variant is fixed at construction; callers never branch on it.
pub enum ByteSource {
    File { file: File, len: u64 },
    Stdin(io::Stdin),
    Memory { data: Vec<u8>, pos: usize },
}

impl ByteSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let len = file.metadata()?.len();
        Ok(ByteSource::File { file, len })
    }

    pub fn stdin() -> Self {
        ByteSource::Stdin(io::stdin())
    }

    pub fn memory(data: Vec<u8>) -> Self {
        ByteSource::Memory { data, pos: 0 }
    }

    /// Total byte length when known up front, 0 for unbounded inputs.
    /// Size-unknown callers fall back to a default capacity heuristic.
    pub fn declared_size(&self) -> u64 {
        match self {
            ByteSource::File { len, .. } => *len,
            ByteSource::Stdin(_) => 0,
            ByteSource::Memory { data, .. } => data.len() as u64,
        }
    }

    pub fn read_into(&mut self, buf: &mut [u8]) -> Result<ReadStatus> {
        match self {
            ByteSource::File { file, .. } => read_stream(file, buf),
            ByteSource::Stdin(stdin) => read_stream(&mut stdin.lock(), buf),
            ByteSource::Memory { data, pos } => {
                let remaining = data.len() - *pos;
                if remaining == 0 {
                    return Ok(ReadStatus::EndOfStream);
                }
                let n = remaining.min(buf.len());
                buf[..n].copy_from_slice(&data[*pos..*pos + n]);
                *pos += n;
                Ok(ReadStatus::Filled(n))
            }
        }
    }
}

fn read_stream(stream: &mut impl Read, buf: &mut [u8]) -> Result<ReadStatus> {
    loop {
        match stream.read(buf) {
            Ok(0) => return Ok(ReadStatus::EndOfStream),
            Ok(n) => return Ok(ReadStatus::Filled(n)),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
}
