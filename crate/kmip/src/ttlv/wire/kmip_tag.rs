use std::collections::HashMap;

use tracing::debug;

use crate::kmip_1_4::{EXTENSION_TAG_MAX, EXTENSION_TAG_MIN, kmip_tags::TAGS};

/// Bidirectional tag name / tag code table.
///
/// Seeded from the KMIP 1.4 tags, extended at runtime with the vendor tags a
/// server announces. Each codec owns its table, so connections to servers
/// with different vendor extensions never see each other's names.
#[derive(Debug, Clone)]
pub struct TagTable {
    by_name: HashMap<String, u32>,
    by_code: HashMap<u32, String>,
}

impl Default for TagTable {
    fn default() -> Self {
        Self::kmip_1_4()
    }
}

impl TagTable {
    #[must_use]
    pub fn kmip_1_4() -> Self {
        let mut by_name = HashMap::with_capacity(TAGS.len());
        let mut by_code = HashMap::with_capacity(TAGS.len());
        for (name, code) in TAGS {
            by_name.insert((*name).to_owned(), *code);
            by_code.insert(*code, (*name).to_owned());
        }
        Self { by_name, by_code }
    }

    #[must_use]
    pub fn code(&self, name: &str) -> Option<u32> {
        self.by_name.get(name).copied()
    }

    #[must_use]
    pub fn name(&self, code: u32) -> Option<&str> {
        self.by_code.get(&code).map(String::as_str)
    }

    /// Bind `name` to `code` in both directions.
    ///
    /// A previous binding of either the name or the code is dropped so that
    /// encoding and decoding keep agreeing on the injected name.
    pub fn map_extension(&mut self, name: &str, code: u32) {
        if !(EXTENSION_TAG_MIN..=EXTENSION_TAG_MAX).contains(&code) {
            debug!("mapping tag 0x{code:06x} ({name}) outside of the extension range");
        }
        if let Some(previous_name) = self.by_code.remove(&code) {
            self.by_name.remove(&previous_name);
        }
        if let Some(previous_code) = self.by_name.remove(name) {
            self.by_code.remove(&previous_code);
        }
        self.by_name.insert(name.to_owned(), code);
        self.by_code.insert(code, name.to_owned());
    }
}
