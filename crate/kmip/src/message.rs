use std::fmt::{self, Display};

use crate::ttlv::{TTLV, TTLValue};

/// A decoded (or to-be-encoded) KMIP message: its top-level fields, usually a
/// single `Request Message` or `Response Message` structure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    fields: Vec<TTLV>,
}

impl Message {
    #[must_use]
    pub const fn new(fields: Vec<TTLV>) -> Self {
        Self { fields }
    }

    #[must_use]
    pub fn fields(&self) -> &[TTLV] {
        &self.fields
    }

    #[must_use]
    pub fn into_fields(self) -> Vec<TTLV> {
        self.fields
    }

    /// Values of every field reached by the `/`-separated tag path.
    ///
    /// Empty segments are ignored, so `/A//B/` is `A/B`. All siblings sharing
    /// a tag contribute, depth first. An empty path yields nothing.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Vec<&TTLValue> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let mut found = Vec::new();
        if !segments.is_empty() {
            search(&self.fields, &segments, &mut found);
        }
        found
    }

    /// First value reached by `path`
    #[must_use]
    pub fn lookup_first(&self, path: &str) -> Option<&TTLValue> {
        self.lookup(path).into_iter().next()
    }
}

fn search<'a>(fields: &'a [TTLV], segments: &[&str], found: &mut Vec<&'a TTLValue>) {
    let Some((segment, rest)) = segments.split_first() else {
        return;
    };
    for field in fields.iter().filter(|f| f.tag == *segment) {
        if rest.is_empty() {
            found.push(&field.value);
        } else if let TTLValue::Structure(children) = &field.value {
            search(children, rest, found);
        }
    }
}

impl From<TTLV> for Message {
    fn from(ttlv: TTLV) -> Self {
        Self::new(vec![ttlv])
    }
}

impl Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for field in &self.fields {
            write_field(f, field, 0)?;
        }
        Ok(())
    }
}

fn write_field(f: &mut fmt::Formatter<'_>, field: &TTLV, depth: usize) -> fmt::Result {
    let indent = "  ".repeat(depth);
    match &field.value {
        TTLValue::Structure(children) => {
            writeln!(f, "{indent}{}", field.tag)?;
            for child in children {
                write_field(f, child, depth + 1)?;
            }
            Ok(())
        }
        TTLValue::Enumeration(e) => writeln!(f, "{indent}{}: {e}", field.tag),
        TTLValue::TextString(s) => writeln!(f, "{indent}{}: {s:?}", field.tag),
        other => writeln!(f, "{indent}{}: {other:?}", field.tag),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::Message;
    use crate::ttlv::{TTLV, TTLValue};

    fn response() -> Message {
        TTLV::structure(
            "Response Message",
            vec![
                TTLV::structure(
                    "Batch Item",
                    vec![
                        TTLV::enumeration("Operation", "Query"),
                        TTLV::structure(
                            "Response Payload",
                            vec![
                                TTLV::enumeration("Operation", "Create"),
                                TTLV::enumeration("Operation", "Encrypt"),
                                TTLV::enumeration("Object Type", "Symmetric Key"),
                            ],
                        ),
                    ],
                ),
                TTLV::structure(
                    "Batch Item",
                    vec![TTLV::structure(
                        "Response Payload",
                        vec![TTLV::enumeration("Operation", "Decrypt")],
                    )],
                ),
            ],
        )
        .into()
    }

    #[test]
    fn test_lookup_ignores_empty_segments() {
        let message = response();
        let a = message.lookup("/Response Message//Batch Item/Operation/");
        let b = message.lookup("Response Message/Batch Item/Operation");
        assert_eq!(a, b);
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn test_lookup_collects_all_siblings() {
        let message = response();
        let names: Vec<&str> = message
            .lookup("Response Message/Batch Item/Response Payload/Operation")
            .into_iter()
            .filter_map(TTLValue::as_enumeration_name)
            .collect();
        assert_eq!(names, vec!["Create", "Encrypt", "Decrypt"]);
    }

    #[test]
    fn test_lookup_empty_and_missing_paths() {
        let message = response();
        assert!(message.lookup("").is_empty());
        assert!(message.lookup("///").is_empty());
        assert!(message.lookup("Response Message/Nope").is_empty());
        // a leaf cannot be descended into
        assert!(
            message
                .lookup("Response Message/Batch Item/Operation/Operation")
                .is_empty()
        );
        assert_eq!(
            message
                .lookup_first("Response Message/Batch Item/Response Payload/Object Type")
                .and_then(TTLValue::as_enumeration_name),
            Some("Symmetric Key")
        );
    }

    #[test]
    fn test_display() {
        let text = response().to_string();
        assert!(text.starts_with("Response Message\n  Batch Item\n"));
        assert!(text.contains("    Operation: Query\n"));
    }
}
