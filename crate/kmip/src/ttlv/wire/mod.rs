mod kmip_tag;
mod ttlv_bytes_deserializer;
mod ttlv_bytes_serializer;

pub use kmip_tag::TagTable;
pub use ttlv_bytes_deserializer::TTLVBytesDeserializer;
pub use ttlv_bytes_serializer::TTLVBytesSerializer;

/// Size of the tag, type and length header of every item
pub const TTLV_HEADER_LENGTH: usize = 8;

/// Largest integer exactly representable by an IEEE-754 double; wider
/// `Long Integer` and `Date-Time` values are rejected rather than truncated
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// Number of zero bytes appended to a value of `length` bytes to reach the
/// next 8-byte boundary
#[must_use]
pub const fn padding_length(length: usize) -> usize {
    length.div_ceil(8) * 8 - length
}
