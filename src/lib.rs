pub mod ecc;
pub mod error;

pub use ecc::{Code, CodeParams, Decoded, Encoded, GeneratorOptions};
pub use error::{Error, Result};
