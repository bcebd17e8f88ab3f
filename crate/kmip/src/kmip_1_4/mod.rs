//! KMIP 1.4 naming tables: tag names and enumeration domains.

pub mod kmip_enumerations;
pub mod kmip_tags;

/// Lowest tag code of the range reserved for vendor extensions
pub const EXTENSION_TAG_MIN: u32 = 0x54_0000;
/// Highest tag code of the range reserved for vendor extensions
pub const EXTENSION_TAG_MAX: u32 = 0x54_FFFF;
