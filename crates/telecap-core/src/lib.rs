pub mod error;

pub mod align;
pub mod convert;
pub mod decode;
pub mod emit;
pub mod field;
pub mod sample;
pub mod smooth;
pub mod source;

pub use crate::convert::{convert, ConvertOptions};
pub use crate::emit::{OutputFormat, UnitSystem};
pub use crate::error::{Result, TcError};
pub use crate::sample::Sample;
pub use crate::source::ByteSource;
