//! Member framing parsers.

pub mod bopa_header;
pub mod pp20_header;

pub use bopa_header::{BopaHeader, BopaHeaderParser};
pub use pp20_header::{Pp20Header, Pp20HeaderParser};
