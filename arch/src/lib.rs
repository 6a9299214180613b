pub mod field;
pub mod record;
pub mod sig;
pub mod status;

pub use field::{Bits, Overflow};
pub use record::{Cmd, Info, Trans};
pub use status::Status;

/// Bit width of one image word.
pub const WORD_BITS: usize = 32;
