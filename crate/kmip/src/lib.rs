//! KMIP TTLV codec.
//!
//! Translates a tree of typed KMIP fields ([`TTLV`]) to and from the
//! Tag-Type-Length-Value binary encoding, resolves tag names through a
//! per-codec table that vendor extensions can extend at runtime, and offers a
//! path-based lookup over decoded messages.
#![allow(clippy::upper_case_acronyms)]

pub use codec::Codec;
pub use error::{
    TtlvError,
    result::{TtlvResult, TtlvResultHelper},
};
pub use message::Message;

mod codec;
mod error;
pub mod kmip_1_4;
mod message;
pub mod ttlv;
