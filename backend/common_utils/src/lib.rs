//! Utilities shared by the payment connector crates.

pub mod consts;
pub mod crypto;
pub mod errors;
pub mod ext_traits;
pub mod fp_utils;
pub mod request;
pub mod types;

pub use errors::{CryptoError, CustomResult, ParsingError, ValidationError};
