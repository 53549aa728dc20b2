#![allow(clippy::items_after_test_module, clippy::suspicious_arithmetic_impl, clippy::suspicious_op_assign_impl)]

pub mod builder;
pub(crate) mod common;

pub use builder::QRBuilder;
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{Color, ECLevel, Version};
pub(crate) use common::*;

#[cfg(test)]
pub(crate) use builder::Module;
