use time::OffsetDateTime;
use tracing::trace;

use super::{MAX_SAFE_INTEGER, TTLV_HEADER_LENGTH, TagTable, padding_length};
use crate::{
    error::{TtlvError, result::TtlvResult},
    kmip_1_4::kmip_enumerations::enumeration_name,
    ttlv::{
        ATTRIBUTE_NAME, KmipEnumeration, TTLV, TTLValue, TtlvType, UNKNOWN_TAG, UnknownEnumeration,
    },
};

/// Decodes KMIP binary items from a byte slice
pub struct TTLVBytesDeserializer<'a> {
    bytes: &'a [u8],
    position: usize,
    tags: &'a TagTable,
}

impl<'a> TTLVBytesDeserializer<'a> {
    pub const fn new(bytes: &'a [u8], tags: &'a TagTable) -> Self {
        Self {
            bytes,
            position: 0,
            tags,
        }
    }

    /// Whether all bytes have been consumed
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.position >= self.bytes.len()
    }

    /// Number of bytes consumed so far
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    pub fn read_ttlv(&mut self) -> TtlvResult<TTLV> {
        self.read_item(None)
    }

    fn take(&mut self, length: usize, context: &str) -> TtlvResult<&'a [u8]> {
        let available = self.bytes.len() - self.position;
        if length > available {
            return Err(TtlvError::length_mismatch(context, length, available));
        }
        let slice = &self.bytes[self.position..self.position + length];
        self.position += length;
        Ok(slice)
    }

    /// `diversion` is the text of the last `Attribute Name` sibling: it
    /// replaces the tag as the enumeration domain of the item.
    fn read_item(&mut self, diversion: Option<&str>) -> TtlvResult<TTLV> {
        let header = self.take(TTLV_HEADER_LENGTH, "item header")?;

        // Tag (3 bytes)
        let tag_value = u32::from_be_bytes([0, header[0], header[1], header[2]]);
        // Type (1 byte)
        let item_type = TtlvType::try_from(header[3])?;
        // Length (4 bytes)
        let length = usize::try_from(u32::from_be_bytes([
            header[4], header[5], header[6], header[7],
        ]))?;

        let tag = if let Some(name) = self.tags.name(tag_value) {
            name.to_owned()
        } else {
            trace!("unknown tag 0x{tag_value:06x} of type {item_type}");
            UNKNOWN_TAG.to_owned()
        };

        let value_bytes = self.take(length, &tag)?;
        self.take(padding_length(length), &format!("padding of {tag}"))?;

        let value = match item_type {
            TtlvType::Structure => {
                let mut child = TTLVBytesDeserializer::new(value_bytes, self.tags);
                let mut items = Vec::new();
                let mut child_diversion: Option<String> = None;
                while !child.is_empty() {
                    let item = child.read_item(child_diversion.as_deref())?;
                    if item.tag == ATTRIBUTE_NAME {
                        match &item.value {
                            TTLValue::TextString(name) => child_diversion = Some(name.clone()),
                            other => {
                                return Err(TtlvError::InvalidType {
                                    tag: item.tag.clone(),
                                    expected: TtlvType::TextString.to_string(),
                                    found: other.ttlv_type().to_string(),
                                });
                            }
                        }
                    }
                    items.push(item);
                }
                TTLValue::Structure(items)
            }
            TtlvType::Integer => TTLValue::Integer(u32::from_be_bytes(fixed(value_bytes, &tag)?)),
            TtlvType::LongInteger => {
                TTLValue::LongInteger(safe_integer(fixed(value_bytes, &tag)?, &tag)?)
            }
            TtlvType::BigInteger => {
                if length % 8 != 0 {
                    return Err(TtlvError::length_mismatch(
                        format!("Big Integer {tag}"),
                        length.div_ceil(8) * 8,
                        length,
                    ));
                }
                TTLValue::BigInteger(value_bytes.to_vec())
            }
            TtlvType::Enumeration => {
                let code = u32::from_be_bytes(fixed(value_bytes, &tag)?);
                let domain = diversion.unwrap_or(tag.as_str());
                TTLValue::Enumeration(match enumeration_name(domain, code) {
                    Some(name) => KmipEnumeration::Name(name.to_owned()),
                    None => KmipEnumeration::Unknown(UnknownEnumeration {
                        tag: tag.clone(),
                        value: code,
                        diversion: diversion.map(ToOwned::to_owned),
                    }),
                })
            }
            TtlvType::Boolean => {
                let words: [u8; 8] = fixed(value_bytes, &tag)?;
                TTLValue::Boolean(words.iter().any(|b| *b != 0))
            }
            TtlvType::TextString => TTLValue::TextString(
                String::from_utf8(value_bytes.to_vec())
                    .map_err(|_e| TtlvError::InvalidText(tag.clone()))?,
            ),
            TtlvType::ByteString => TTLValue::ByteString(value_bytes.to_vec()),
            TtlvType::DateTime => {
                let seconds = safe_integer(fixed(value_bytes, &tag)?, &tag)?;
                let seconds = i64::try_from(seconds)?;
                let t = OffsetDateTime::from_unix_timestamp(seconds).map_err(|_e| {
                    TtlvError::DateTimeRange {
                        tag: tag.clone(),
                        seconds,
                    }
                })?;
                TTLValue::DateTime(t)
            }
            TtlvType::Interval => TTLValue::Interval(i32::from_be_bytes(fixed(value_bytes, &tag)?)),
        };

        Ok(TTLV { tag, value })
    }
}

fn fixed<const N: usize>(bytes: &[u8], tag: &str) -> TtlvResult<[u8; N]> {
    bytes
        .try_into()
        .map_err(|_e| TtlvError::length_mismatch(tag, N, bytes.len()))
}

/// Two big-endian 32-bit words, rejected beyond the 53-bit safe range
fn safe_integer(words: [u8; 8], tag: &str) -> TtlvResult<u64> {
    let value = u64::from_be_bytes(words);
    if value > MAX_SAFE_INTEGER {
        return Err(TtlvError::Overflow {
            tag: tag.to_owned(),
            value,
        });
    }
    Ok(value)
}
