mod ttlv_struct;
pub mod wire;

pub use ttlv_struct::{
    ATTRIBUTE_NAME, KmipEnumeration, TTLV, TTLValue, TtlvType, UNKNOWN_TAG, UnknownEnumeration,
};
pub use wire::{TTLVBytesDeserializer, TTLVBytesSerializer, TagTable};

#[allow(clippy::unwrap_used, clippy::panic, clippy::indexing_slicing)]
#[cfg(test)]
mod tests;
