use tracing::trace;

use crate::{
    Message,
    error::{TtlvError, result::TtlvResult},
    kmip_1_4::kmip_enumerations::enumeration_table,
    ttlv::{TTLV, TTLVBytesDeserializer, TTLVBytesSerializer, TagTable},
};

/// Translates [`Message`]s to and from the TTLV binary encoding.
///
/// A codec owns its tag table: vendor extensions mapped on one codec are not
/// visible to any other.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    tags: TagTable,
}

impl Codec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode every top-level field of `message`, in order
    pub fn encode(&self, message: &Message) -> TtlvResult<Vec<u8>> {
        let mut buffer = Vec::new();
        let mut serializer = TTLVBytesSerializer::new(&mut buffer, &self.tags);
        for field in message.fields() {
            serializer.write_ttlv(field)?;
        }
        trace!("encoded {} bytes: {}", buffer.len(), hex::encode(&buffer));
        Ok(buffer)
    }

    pub fn encode_ttlv(&self, ttlv: &TTLV) -> TtlvResult<Vec<u8>> {
        let mut buffer = Vec::new();
        TTLVBytesSerializer::new(&mut buffer, &self.tags).write_ttlv(ttlv)?;
        Ok(buffer)
    }

    /// Decode a buffer holding one or more top-level fields
    pub fn decode(&self, bytes: &[u8]) -> TtlvResult<Message> {
        trace!("decoding {} bytes: {}", bytes.len(), hex::encode(bytes));
        let mut deserializer = TTLVBytesDeserializer::new(bytes, &self.tags);
        let mut fields = Vec::new();
        while !deserializer.is_empty() {
            fields.push(deserializer.read_ttlv()?);
        }
        Ok(Message::new(fields))
    }

    /// OR together the bit values of `names` in the mask domain of `tag`
    pub fn encode_mask(&self, tag: &str, names: &[&str]) -> TtlvResult<u32> {
        let table = enumeration_table(tag).ok_or_else(|| TtlvError::UnknownTag(tag.to_owned()))?;
        names.iter().try_fold(0_u32, |mask, name| {
            table
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, bit)| mask | bit)
                .ok_or_else(|| TtlvError::UnknownEnumeration {
                    domain: tag.to_owned(),
                    name: (*name).to_owned(),
                })
        })
    }

    /// Names of the bits set in `mask`, in table order.
    ///
    /// Bits without a name in the domain of `tag` are ignored.
    #[must_use]
    pub fn decode_mask(&self, tag: &str, mask: u32) -> Vec<String> {
        enumeration_table(tag)
            .map(|table| {
                table
                    .iter()
                    .filter(|(_, bit)| *bit != 0 && mask & bit == *bit)
                    .map(|(name, _)| (*name).to_owned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Register a vendor tag announced by the server
    pub fn map_extension(&mut self, name: &str, code: u32) {
        self.tags.map_extension(name, code);
    }

    #[must_use]
    pub fn tag_name(&self, code: u32) -> Option<&str> {
        self.tags.name(code)
    }

    #[must_use]
    pub fn tag_code(&self, name: &str) -> Option<u32> {
        self.tags.code(name)
    }
}
