#![doc = include_str!("../README.md")]

mod dialect;
mod error;
mod includer;
mod parser;
mod types;

pub use dialect::*;
pub use error::*;
pub use includer::*;
pub use parser::*;
pub use types::*;
