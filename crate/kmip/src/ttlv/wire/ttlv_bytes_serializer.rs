use std::io::Write;

use super::{MAX_SAFE_INTEGER, TagTable, padding_length};
use crate::{
    error::{TtlvError, result::TtlvResult},
    kmip_1_4::kmip_enumerations::enumeration_value,
    ttlv::{ATTRIBUTE_NAME, KmipEnumeration, TTLV, TTLValue, TtlvType},
};

/// Write a tag as a 3-byte big-endian integer
fn write_tag<W: Write>(writer: &mut W, tags: &TagTable, tag_str: &str) -> TtlvResult<()> {
    let tag_value = tags
        .code(tag_str)
        .ok_or_else(|| TtlvError::UnknownTag(tag_str.to_owned()))?;
    let tag_bytes = tag_value.to_be_bytes();
    if tag_bytes[0] != 0 {
        return Err(TtlvError::UnknownTag(format!(
            "{tag_str} (code 0x{tag_value:x} does not fit in 3 bytes)"
        )));
    }
    // Write only the lowest 3 bytes in big-endian
    writer.write_all(&tag_bytes[1..])?;
    Ok(())
}

/// Write a type as a 1-byte integer
fn write_type<W: Write>(writer: &mut W, item_type: TtlvType) -> TtlvResult<()> {
    writer.write_all(&[item_type.to_byte()])?;
    Ok(())
}

/// Write a length as a 4-byte big-endian integer, the value bytes,
/// then the zero padding up to the next multiple of 8
fn write_value<W: Write>(writer: &mut W, value: &[u8]) -> TtlvResult<()> {
    let l = u32::try_from(value.len()).map_err(|_e| TtlvError::LengthTooLarge(value.len()))?;
    writer.write_all(&l.to_be_bytes())?;
    writer.write_all(value)?;
    writer.write_all(&[0_u8; 8][..padding_length(value.len())])?;
    Ok(())
}

/// Encodes [`TTLV`] trees to the KMIP binary format
pub struct TTLVBytesSerializer<'a, W> {
    writer: W,
    tags: &'a TagTable,
}

impl<'a, W> TTLVBytesSerializer<'a, W>
where
    W: Write,
{
    pub const fn new(writer: W, tags: &'a TagTable) -> Self {
        Self { writer, tags }
    }

    pub fn write_ttlv(&mut self, ttlv: &TTLV) -> TtlvResult<()> {
        self.write_item(ttlv, None)
    }

    /// `diversion` is the text of the last `Attribute Name` sibling: it
    /// replaces the tag as the enumeration domain of the item.
    fn write_item(&mut self, ttlv: &TTLV, diversion: Option<&str>) -> TtlvResult<()> {
        // Write Tag (3 bytes)
        write_tag(&mut self.writer, self.tags, &ttlv.tag)?;
        // Write Type (1 byte)
        write_type(&mut self.writer, ttlv.value.ttlv_type())?;

        match &ttlv.value {
            TTLValue::Structure(items) => {
                // Calculate total length of nested items
                let mut temp_buffer = Vec::new();
                let mut temp_serializer = TTLVBytesSerializer::new(&mut temp_buffer, self.tags);
                let mut child_diversion: Option<&str> = None;
                for item in items {
                    temp_serializer.write_item(item, child_diversion)?;
                    if item.tag == ATTRIBUTE_NAME {
                        child_diversion = Some(attribute_name(item)?);
                    }
                }
                write_value(&mut self.writer, &temp_buffer)?;
            }
            TTLValue::Integer(value) => {
                write_value(&mut self.writer, &value.to_be_bytes())?;
            }
            TTLValue::LongInteger(value) => {
                if *value > MAX_SAFE_INTEGER {
                    return Err(TtlvError::Overflow {
                        tag: ttlv.tag.clone(),
                        value: *value,
                    });
                }
                write_value(&mut self.writer, &value.to_be_bytes())?;
            }
            TTLValue::BigInteger(value) => {
                if value.len() % 8 != 0 {
                    return Err(TtlvError::length_mismatch(
                        format!("Big Integer {}", ttlv.tag),
                        value.len().div_ceil(8) * 8,
                        value.len(),
                    ));
                }
                write_value(&mut self.writer, value)?;
            }
            TTLValue::Enumeration(enumeration) => {
                let domain = diversion.unwrap_or(ttlv.tag.as_str());
                let code = match enumeration {
                    KmipEnumeration::Name(name) => enumeration_value(domain, name).ok_or_else(
                        || TtlvError::UnknownEnumeration {
                            domain: domain.to_owned(),
                            name: name.clone(),
                        },
                    )?,
                    KmipEnumeration::Unknown(unknown) => unknown.value,
                };
                write_value(&mut self.writer, &code.to_be_bytes())?;
            }
            TTLValue::Boolean(value) => {
                let mut buf = [0_u8; 8];
                buf[7] = u8::from(*value);
                write_value(&mut self.writer, &buf)?;
            }
            TTLValue::TextString(value) => {
                write_value(&mut self.writer, value.as_bytes())?;
            }
            TTLValue::ByteString(value) => {
                write_value(&mut self.writer, value)?;
            }
            TTLValue::DateTime(value) => {
                let timestamp = value.unix_timestamp();
                let seconds = u64::try_from(timestamp)
                    .ok()
                    .filter(|s| *s <= MAX_SAFE_INTEGER)
                    .ok_or_else(|| TtlvError::DateTimeRange {
                        tag: ttlv.tag.clone(),
                        seconds: timestamp,
                    })?;
                write_value(&mut self.writer, &seconds.to_be_bytes())?;
            }
            TTLValue::Interval(value) => {
                write_value(&mut self.writer, &value.to_be_bytes())?;
            }
        }
        Ok(())
    }
}

fn attribute_name(item: &TTLV) -> TtlvResult<&str> {
    item.value.as_text().ok_or_else(|| TtlvError::InvalidType {
        tag: item.tag.clone(),
        expected: TtlvType::TextString.to_string(),
        found: item.value.ttlv_type().to_string(),
    })
}
