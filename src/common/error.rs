use std::fmt::{Display, Formatter};

// Error
//------------------------------------------------------------------------------

/// Every way building a symbol can fail. Both variants are structural:
/// the payload didn't fit, full stop. Anything else (table lookups, length
/// identities between the data model's own stages) is a programming error
/// and is checked with `debug_assert!` instead of surfaced here.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    /// No version from 1 to 40 has enough capacity at the requested EC level.
    InputTooLarge,
    /// An explicitly requested version doesn't have enough capacity for the
    /// payload at the requested EC level.
    CapacityExceeded,
}

impl Display for QRError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let msg = match self {
            Self::InputTooLarge => "input exceeds the capacity of every available version",
            Self::CapacityExceeded => "input exceeds the capacity of the requested version",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for QRError {}

pub type QRResult<T> = Result<T, QRError>;
