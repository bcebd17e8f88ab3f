use std::fmt::{self, Debug, Display};

use strum::{Display as StrumDisplay, EnumString};
use time::OffsetDateTime;

use crate::error::TtlvError;

/// Tag name given to fields whose numeric tag is neither in the KMIP table
/// nor in the vendor extension map of the decoding codec.
pub const UNKNOWN_TAG: &str = "Unknown Tag";

/// Tag name of the attribute field whose text value diverts the enumeration
/// domain of the following `Attribute Value` siblings.
pub const ATTRIBUTE_NAME: &str = "Attribute Name";

/// A KMIP field: a tag name and a typed value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TTLV {
    pub tag: String,
    pub value: TTLValue,
}

impl TTLV {
    pub fn new(tag: impl Into<String>, value: TTLValue) -> Self {
        Self {
            tag: tag.into(),
            value,
        }
    }

    pub fn structure(tag: impl Into<String>, items: Vec<Self>) -> Self {
        Self::new(tag, TTLValue::Structure(items))
    }

    pub fn integer(tag: impl Into<String>, value: u32) -> Self {
        Self::new(tag, TTLValue::Integer(value))
    }

    pub fn long_integer(tag: impl Into<String>, value: u64) -> Self {
        Self::new(tag, TTLValue::LongInteger(value))
    }

    pub fn big_integer(tag: impl Into<String>, value: Vec<u8>) -> Self {
        Self::new(tag, TTLValue::BigInteger(value))
    }

    pub fn enumeration(tag: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(
            tag,
            TTLValue::Enumeration(KmipEnumeration::Name(name.into())),
        )
    }

    pub fn boolean(tag: impl Into<String>, value: bool) -> Self {
        Self::new(tag, TTLValue::Boolean(value))
    }

    pub fn text_string(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(tag, TTLValue::TextString(value.into()))
    }

    pub fn byte_string(tag: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self::new(tag, TTLValue::ByteString(value.into()))
    }

    pub fn date_time(tag: impl Into<String>, value: OffsetDateTime) -> Self {
        Self::new(tag, TTLValue::DateTime(value))
    }

    pub fn interval(tag: impl Into<String>, seconds: i32) -> Self {
        Self::new(tag, TTLValue::Interval(seconds))
    }

    /// An `Attribute` structure: `Attribute Name` followed by `Attribute Value`.
    ///
    /// When `value` is an enumeration, its domain is the one of the tag named
    /// `name`, not the one of `Attribute Value`.
    pub fn attribute(name: impl Into<String>, value: TTLValue) -> Self {
        Self::structure(
            "Attribute",
            vec![
                Self::text_string(ATTRIBUTE_NAME, name),
                Self::new("Attribute Value", value),
            ],
        )
    }
}

#[derive(Clone, Eq)]
pub enum TTLValue {
    Structure(Vec<TTLV>),
    Integer(u32),
    /// Limited to the 53-bit safe integer range on the wire
    LongInteger(u64),
    /// Big-endian two's complement bytes, length a multiple of 8
    BigInteger(Vec<u8>),
    Enumeration(KmipEnumeration),
    Boolean(bool),
    TextString(String),
    ByteString(Vec<u8>),
    /// Seconds resolution
    DateTime(OffsetDateTime),
    Interval(i32),
}

impl Default for TTLValue {
    fn default() -> Self {
        Self::TextString(String::default())
    }
}

impl PartialEq for TTLValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Structure(l0), Self::Structure(r0)) => l0 == r0,
            (Self::Integer(l0), Self::Integer(r0)) => l0 == r0,
            (Self::LongInteger(l0), Self::LongInteger(r0)) => l0 == r0,
            (Self::BigInteger(l0), Self::BigInteger(r0))
            | (Self::ByteString(l0), Self::ByteString(r0)) => l0 == r0,
            (Self::Enumeration(l0), Self::Enumeration(r0)) => l0 == r0,
            (Self::Boolean(l0), Self::Boolean(r0)) => l0 == r0,
            (Self::TextString(l0), Self::TextString(r0)) => l0 == r0,
            (Self::DateTime(l0), Self::DateTime(r0)) => l0.unix_timestamp() == r0.unix_timestamp(),
            (Self::Interval(l0), Self::Interval(r0)) => l0 == r0,
            (_, _) => false,
        }
    }
}

impl Debug for TTLValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structure(items) => f.debug_list().entries(items).finish(),
            Self::Integer(v) => write!(f, "Integer({v})"),
            Self::LongInteger(v) => write!(f, "LongInteger({v})"),
            Self::BigInteger(v) => write!(f, "BigInteger(0x{})", hex::encode(v)),
            Self::Enumeration(v) => write!(f, "Enumeration({v:?})"),
            Self::Boolean(v) => write!(f, "Boolean({v})"),
            Self::TextString(v) => write!(f, "TextString({v:?})"),
            Self::ByteString(v) => write!(f, "ByteString(0x{})", hex::encode(v)),
            Self::DateTime(v) => write!(f, "DateTime({})", v.unix_timestamp()),
            Self::Interval(v) => write!(f, "Interval({v})"),
        }
    }
}

impl TTLValue {
    #[must_use]
    pub const fn ttlv_type(&self) -> TtlvType {
        match self {
            Self::Structure(_) => TtlvType::Structure,
            Self::Integer(_) => TtlvType::Integer,
            Self::LongInteger(_) => TtlvType::LongInteger,
            Self::BigInteger(_) => TtlvType::BigInteger,
            Self::Enumeration(_) => TtlvType::Enumeration,
            Self::Boolean(_) => TtlvType::Boolean,
            Self::TextString(_) => TtlvType::TextString,
            Self::ByteString(_) => TtlvType::ByteString,
            Self::DateTime(_) => TtlvType::DateTime,
            Self::Interval(_) => TtlvType::Interval,
        }
    }

    #[must_use]
    pub fn as_structure(&self) -> Option<&[TTLV]> {
        match self {
            Self::Structure(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_integer(&self) -> Option<u32> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::TextString(v) => Some(v),
            _ => None,
        }
    }

    /// Bytes of a `ByteString` (or of a `BigInteger`)
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::ByteString(v) | Self::BigInteger(v) => Some(v),
            _ => None,
        }
    }

    /// Name of a resolved enumeration; `None` for unknown codes and other types
    #[must_use]
    pub fn as_enumeration_name(&self) -> Option<&str> {
        match self {
            Self::Enumeration(KmipEnumeration::Name(name)) => Some(name),
            _ => None,
        }
    }
}

/// An enumeration value.
///
/// The byte codec resolves codes to names through the enumeration table of the
/// field's tag (or of its diversion). Codes absent from the table are kept as
/// [`UnknownEnumeration`] records instead of failing the decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KmipEnumeration {
    Name(String),
    Unknown(UnknownEnumeration),
}

impl Display for KmipEnumeration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Unknown(unknown) => Display::fmt(unknown, f),
        }
    }
}

/// An enumeration code the decoding codec could not name
#[derive(Clone, PartialEq, Eq)]
pub struct UnknownEnumeration {
    pub tag: String,
    pub value: u32,
    pub diversion: Option<String>,
}

impl UnknownEnumeration {
    pub const MESSAGE: &'static str = "Unknown enumeration value";
}

impl Debug for UnknownEnumeration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnknownEnumeration")
            .field("tag", &self.tag)
            .field("value", &format!("0x{:08x}", self.value))
            .field("message", &Self::MESSAGE)
            .field("diversion", &self.diversion)
            .finish()
    }
}

impl Display for UnknownEnumeration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} 0x{:08x} for {}", Self::MESSAGE, self.value, self.tag)?;
        if let Some(diversion) = &self.diversion {
            write!(f, " (diverted to {diversion})")?;
        }
        Ok(())
    }
}

/// The KMIP item types and their wire codes
#[derive(Debug, Copy, Clone, PartialEq, Eq, StrumDisplay, EnumString)]
#[repr(u8)]
pub enum TtlvType {
    Structure = 0x01,
    Integer = 0x02,
    LongInteger = 0x03,
    BigInteger = 0x04,
    Enumeration = 0x05,
    Boolean = 0x06,
    TextString = 0x07,
    ByteString = 0x08,
    #[strum(serialize = "Date-Time")]
    DateTime = 0x09,
    Interval = 0x0A,
}

impl TtlvType {
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        self as u8
    }

    /// Resolve a type name (`"Integer"`, `"Date-Time"`, ...)
    pub fn from_name(name: &str) -> Result<Self, TtlvError> {
        name.parse()
            .map_err(|_e| TtlvError::UnknownType(name.to_owned()))
    }
}

impl TryFrom<u8> for TtlvType {
    type Error = TtlvError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x01 => Ok(Self::Structure),
            0x02 => Ok(Self::Integer),
            0x03 => Ok(Self::LongInteger),
            0x04 => Ok(Self::BigInteger),
            0x05 => Ok(Self::Enumeration),
            0x06 => Ok(Self::Boolean),
            0x07 => Ok(Self::TextString),
            0x08 => Ok(Self::ByteString),
            0x09 => Ok(Self::DateTime),
            0x0A => Ok(Self::Interval),
            _ => Err(TtlvError::UnknownElementType(value)),
        }
    }
}
