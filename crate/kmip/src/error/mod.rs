use std::num::TryFromIntError;

use thiserror::Error;

pub(crate) mod result;

/// Errors raised while encoding or decoding TTLV.
///
/// All of them are fatal to the single encode/decode call that raised them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TtlvError {
    #[error("{0}")]
    Default(String),

    #[error("Date-Time out of range for tag {tag}: {seconds} seconds since epoch")]
    DateTimeRange { tag: String, seconds: i64 },

    #[error("Invalid text string for tag {0}: not UTF-8")]
    InvalidText(String),

    #[error("Invalid type for tag {tag}: expected {expected}, found {found}")]
    InvalidType {
        tag: String,
        expected: String,
        found: String,
    },

    #[error("Length mismatch for {context}: expected {expected} bytes, found {found}")]
    LengthMismatch {
        context: String,
        expected: usize,
        found: usize,
    },

    #[error("Length too large: {0}")]
    LengthTooLarge(usize),

    #[error("Overflow: value {value} of tag {tag} exceeds the 53-bit safe integer range")]
    Overflow { tag: String, value: u64 },

    #[error("Unknown element type: 0x{0:02x}")]
    UnknownElementType(u8),

    #[error("Unknown enumeration value {name} for {domain}")]
    UnknownEnumeration { domain: String, name: String },

    #[error("Unknown tag: {0}")]
    UnknownTag(String),

    #[error("Unknown type: {0}")]
    UnknownType(String),
}

impl TtlvError {
    pub(crate) fn length_mismatch(context: impl Into<String>, expected: usize, found: usize) -> Self {
        Self::LengthMismatch {
            context: context.into(),
            expected,
            found,
        }
    }
}

impl From<&str> for TtlvError {
    fn from(s: &str) -> Self {
        Self::Default(s.to_owned())
    }
}

impl From<String> for TtlvError {
    fn from(s: String) -> Self {
        Self::Default(s)
    }
}

impl From<TryFromIntError> for TtlvError {
    fn from(e: TryFromIntError) -> Self {
        Self::Default(e.to_string())
    }
}

impl From<std::io::Error> for TtlvError {
    fn from(e: std::io::Error) -> Self {
        Self::Default(e.to_string())
    }
}

/// Construct a TTLV error from a string.
#[macro_export]
macro_rules! ttlv_error {
    ($msg:literal) => {
        $crate::TtlvError::Default(::core::format_args!($msg).to_string())
    };
    ($err:expr $(,)?) => ({
        $crate::TtlvError::Default($err.to_string())
    });
    ($fmt:expr, $($arg:tt)*) => {
        $crate::TtlvError::Default(::core::format_args!($fmt, $($arg)*).to_string())
    };
}

/// Return early with a TTLV error.
#[macro_export]
macro_rules! ttlv_bail {
    ($msg:literal) => {
        return ::core::result::Result::Err($crate::ttlv_error!($msg))
    };
    ($err:expr $(,)?) => {
        return ::core::result::Result::Err($err)
    };
    ($fmt:expr, $($arg:tt)*) => {
        return ::core::result::Result::Err($crate::ttlv_error!($fmt, $($arg)*))
    };
}
