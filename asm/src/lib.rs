//! Compiler for the AGC control state machine of the receiver.
//!
//! A source is a list of states. Each `case 'name'` line opens a state, and
//! the `nb_trans`, `cmd` and `op{` lines that follow add its info, command and
//! transition words. The compiler resolves transition targets to word
//! addresses, checks every state, and lays the words out in a fixed size ram
//! image closed by a signature word.

pub mod compiler;
pub mod config;
pub mod diag;
pub mod emit;
pub mod error;
pub mod ident;
pub mod image;
pub mod listing;
pub mod output;
pub mod parser;
pub mod state;

pub use compiler::{compile, Compiler, Visitor, DEFAULT_RAM};
pub use config::Config;
pub use diag::{Diagnostics, Issue};
pub use error::Error;
pub use image::Image;
