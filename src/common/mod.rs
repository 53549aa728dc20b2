pub mod bit_utils;
pub mod ec;
pub mod encoder;
pub mod error;
pub mod galois;
pub mod iter;
pub mod mask;
pub mod metadata;

pub use bit_utils::*;
pub use ec::*;
pub use error::*;
pub use iter::*;
pub use mask::*;
pub use metadata::*;
