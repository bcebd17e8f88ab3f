/// Enumeration domains, scoped by the tag that carries them.
///
/// `Cryptographic Usage Mask` and `Storage Status Mask` are bit masks carried
/// as `Integer`; they are listed here so that masks can be built from and
/// split into names.
pub static ENUMERATIONS: &[(&str, &[(&str, u32)])] = &[
    (
        "Credential Type",
        &[
            ("Username and Password", 0x01),
            ("Device", 0x02),
            ("Attestation", 0x03),
        ],
    ),
    (
        "Key Compression Type",
        &[
            ("EC Public Key Type Uncompressed", 0x01),
            ("EC Public Key Type X9.62 Compressed Prime", 0x02),
            ("EC Public Key Type X9.62 Compressed Char2", 0x03),
            ("EC Public Key Type X9.62 Hybrid", 0x04),
        ],
    ),
    (
        "Key Format Type",
        &[
            ("Raw", 0x01),
            ("Opaque", 0x02),
            ("PKCS#1", 0x03),
            ("PKCS#8", 0x04),
            ("X.509", 0x05),
            ("ECPrivateKey", 0x06),
            ("Transparent Symmetric Key", 0x07),
            ("Transparent DSA Private Key", 0x08),
            ("Transparent DSA Public Key", 0x09),
            ("Transparent RSA Private Key", 0x0A),
            ("Transparent RSA Public Key", 0x0B),
            ("Transparent DH Private Key", 0x0C),
            ("Transparent DH Public Key", 0x0D),
            ("Transparent ECDSA Private Key", 0x0E),
            ("Transparent ECDSA Public Key", 0x0F),
            ("Transparent ECDH Private Key", 0x10),
            ("Transparent ECDH Public Key", 0x11),
            ("Transparent ECMQV Private Key", 0x12),
            ("Transparent ECMQV Public Key", 0x13),
        ],
    ),
    (
        "Wrapping Method",
        &[
            ("Encrypt", 0x01),
            ("MAC/sign", 0x02),
            ("Encrypt then MAC/sign", 0x03),
            ("MAC/sign then encrypt", 0x04),
            ("TR-31", 0x05),
        ],
    ),
    ("Certificate Type", &[("X.509", 0x01), ("PGP", 0x02)]),
    (
        "Split Key Method",
        &[
            ("XOR", 0x01),
            ("Polynomial Sharing GF (2^16)", 0x02),
            ("Polynomial Sharing Prime Field", 0x03),
            ("Polynomial Sharing GF (2^8)", 0x04),
        ],
    ),
    ("Secret Data Type", &[("Password", 0x01), ("Seed", 0x02)]),
    (
        "Name Type",
        &[("Uninterpreted Text String", 0x01), ("URI", 0x02)],
    ),
    (
        "Object Type",
        &[
            ("Certificate", 0x01),
            ("Symmetric Key", 0x02),
            ("Public Key", 0x03),
            ("Private Key", 0x04),
            ("Split Key", 0x05),
            ("Template", 0x06),
            ("Secret Data", 0x07),
            ("Opaque Object", 0x08),
            ("PGP Key", 0x09),
        ],
    ),
    (
        "Cryptographic Algorithm",
        &[
            ("DES", 0x01),
            ("3DES", 0x02),
            ("AES", 0x03),
            ("RSA", 0x04),
            ("DSA", 0x05),
            ("ECDSA", 0x06),
            ("HMAC-SHA1", 0x07),
            ("HMAC-SHA224", 0x08),
            ("HMAC-SHA256", 0x09),
            ("HMAC-SHA384", 0x0A),
            ("HMAC-SHA512", 0x0B),
            ("HMAC-MD5", 0x0C),
            ("DH", 0x0D),
            ("ECDH", 0x0E),
            ("ECMQV", 0x0F),
            ("Blowfish", 0x10),
            ("Camellia", 0x11),
            ("CAST5", 0x12),
            ("IDEA", 0x13),
            ("MARS", 0x14),
            ("RC2", 0x15),
            ("RC4", 0x16),
            ("RC5", 0x17),
            ("SKIPJACK", 0x18),
            ("Twofish", 0x19),
            ("EC", 0x1A),
            ("One Time Pad", 0x1B),
            ("ChaCha20", 0x1C),
            ("Poly1305", 0x1D),
            ("ChaCha20Poly1305", 0x1E),
            ("SHA3-224", 0x1F),
            ("SHA3-256", 0x20),
            ("SHA3-384", 0x21),
            ("SHA3-512", 0x22),
            ("HMAC-SHA3-224", 0x23),
            ("HMAC-SHA3-256", 0x24),
            ("HMAC-SHA3-384", 0x25),
            ("HMAC-SHA3-512", 0x26),
            ("SHAKE-128", 0x27),
            ("SHAKE-256", 0x28),
        ],
    ),
    (
        "Block Cipher Mode",
        &[
            ("CBC", 0x01),
            ("ECB", 0x02),
            ("PCBC", 0x03),
            ("CFB", 0x04),
            ("OFB", 0x05),
            ("CTR", 0x06),
            ("CMAC", 0x07),
            ("CCM", 0x08),
            ("GCM", 0x09),
            ("CBC-MAC", 0x0A),
            ("XTS", 0x0B),
            ("AESKeyWrapPadding", 0x0C),
            ("NISTKeyWrap", 0x0D),
            ("X9.102 AESKW", 0x0E),
            ("X9.102 TDKW", 0x0F),
            ("X9.102 AKW1", 0x10),
            ("X9.102 AKW2", 0x11),
            ("AEAD", 0x12),
        ],
    ),
    (
        "Padding Method",
        &[
            ("None", 0x01),
            ("OAEP", 0x02),
            ("PKCS5", 0x03),
            ("SSL3", 0x04),
            ("Zeros", 0x05),
            ("ANSI X9.23", 0x06),
            ("ISO 10126", 0x07),
            ("PKCS1 v1.5", 0x08),
            ("X9.31", 0x09),
            ("PSS", 0x0A),
        ],
    ),
    (
        "Hashing Algorithm",
        &[
            ("MD2", 0x01),
            ("MD4", 0x02),
            ("MD5", 0x03),
            ("SHA-1", 0x04),
            ("SHA-224", 0x05),
            ("SHA-256", 0x06),
            ("SHA-384", 0x07),
            ("SHA-512", 0x08),
            ("RIPEMD-160", 0x09),
            ("Tiger", 0x0A),
            ("Whirlpool", 0x0B),
            ("SHA-512/224", 0x0C),
            ("SHA-512/256", 0x0D),
            ("SHA3-224", 0x0E),
            ("SHA3-256", 0x0F),
            ("SHA3-384", 0x10),
            ("SHA3-512", 0x11),
        ],
    ),
    (
        "Key Role Type",
        &[
            ("BDK", 0x01),
            ("CVK", 0x02),
            ("DEK", 0x03),
            ("MKAC", 0x04),
            ("MKSMC", 0x05),
            ("MKSMI", 0x06),
            ("MKDAC", 0x07),
            ("MKDN", 0x08),
            ("MKCP", 0x09),
            ("MKOTH", 0x0A),
            ("KEK", 0x0B),
            ("MAC16609", 0x0C),
            ("MAC97971", 0x0D),
            ("MAC97972", 0x0E),
            ("MAC97973", 0x0F),
            ("MAC97974", 0x10),
            ("MAC97975", 0x11),
            ("ZPK", 0x12),
            ("PVKIBM", 0x13),
            ("PVKPVV", 0x14),
            ("PVKOTH", 0x15),
            ("DUKPT", 0x16),
            ("IV", 0x17),
            ("TRKBK", 0x18),
        ],
    ),
    (
        "State",
        &[
            ("Pre-Active", 0x01),
            ("Active", 0x02),
            ("Deactivated", 0x03),
            ("Compromised", 0x04),
            ("Destroyed", 0x05),
            ("Destroyed Compromised", 0x06),
        ],
    ),
    (
        "Revocation Reason Code",
        &[
            ("Unspecified", 0x01),
            ("Key Compromise", 0x02),
            ("CA Compromise", 0x03),
            ("Affiliation Changed", 0x04),
            ("Superseded", 0x05),
            ("Cessation of Operation", 0x06),
            ("Privilege Withdrawn", 0x07),
        ],
    ),
    (
        "Link Type",
        &[
            ("Certificate Link", 0x101),
            ("Public Key Link", 0x102),
            ("Private Key Link", 0x103),
            ("Derivation Base Object Link", 0x104),
            ("Derived Key Link", 0x105),
            ("Replacement Object Link", 0x106),
            ("Replaced Object Link", 0x107),
            ("Parent Link", 0x108),
            ("Child Link", 0x109),
            ("Previous Link", 0x10A),
            ("Next Link", 0x10B),
        ],
    ),
    (
        "Derivation Method",
        &[
            ("PBKDF2", 0x01),
            ("HASH", 0x02),
            ("HMAC", 0x03),
            ("ENCRYPT", 0x04),
            ("NIST800-108-C", 0x05),
            ("NIST800-108-F", 0x06),
            ("NIST800-108-DPI", 0x07),
            ("Asymmetric Key", 0x08),
        ],
    ),
    (
        "Certificate Request Type",
        &[
            ("CRMF", 0x01),
            ("PKCS#10", 0x02),
            ("PEM", 0x03),
            ("PGP", 0x04),
        ],
    ),
    (
        "Validity Indicator",
        &[("Valid", 0x01), ("Invalid", 0x02), ("Unknown", 0x03)],
    ),
    (
        "Query Function",
        &[
            ("Query Operations", 0x01),
            ("Query Objects", 0x02),
            ("Query Server Information", 0x03),
            ("Query Application Namespaces", 0x04),
            ("Query Extension List", 0x05),
            ("Query Extension Map", 0x06),
            ("Query Attestation Types", 0x07),
            ("Query RNGs", 0x08),
            ("Query Validations", 0x09),
            ("Query Profiles", 0x0A),
            ("Query Capabilities", 0x0B),
            ("Query Client Registration Methods", 0x0C),
        ],
    ),
    (
        "Cancellation Result",
        &[
            ("Canceled", 0x01),
            ("Unable to Cancel", 0x02),
            ("Completed", 0x03),
            ("Failed", 0x04),
            ("Unavailable", 0x05),
        ],
    ),
    ("Put Function", &[("New", 0x01), ("Replace", 0x02)]),
    (
        "Operation",
        &[
            ("Create", 0x01),
            ("Create Key Pair", 0x02),
            ("Register", 0x03),
            ("Re-key", 0x04),
            ("Derive Key", 0x05),
            ("Certify", 0x06),
            ("Re-certify", 0x07),
            ("Locate", 0x08),
            ("Check", 0x09),
            ("Get", 0x0A),
            ("Get Attributes", 0x0B),
            ("Get Attribute List", 0x0C),
            ("Add Attribute", 0x0D),
            ("Modify Attribute", 0x0E),
            ("Delete Attribute", 0x0F),
            ("Obtain Lease", 0x10),
            ("Get Usage Allocation", 0x11),
            ("Activate", 0x12),
            ("Revoke", 0x13),
            ("Destroy", 0x14),
            ("Archive", 0x15),
            ("Recover", 0x16),
            ("Validate", 0x17),
            ("Query", 0x18),
            ("Cancel", 0x19),
            ("Poll", 0x1A),
            ("Notify", 0x1B),
            ("Put", 0x1C),
            ("Re-key Key Pair", 0x1D),
            ("Discover Versions", 0x1E),
            ("Encrypt", 0x1F),
            ("Decrypt", 0x20),
            ("Sign", 0x21),
            ("Signature Verify", 0x22),
            ("MAC", 0x23),
            ("MAC Verify", 0x24),
            ("RNG Retrieve", 0x25),
            ("RNG Seed", 0x26),
            ("Hash", 0x27),
            ("Create Split Key", 0x28),
            ("Join Split Key", 0x29),
            ("Import", 0x2A),
            ("Export", 0x2B),
        ],
    ),
    (
        "Result Status",
        &[
            ("Success", 0x00),
            ("Operation Failed", 0x01),
            ("Operation Pending", 0x02),
            ("Operation Undone", 0x03),
        ],
    ),
    (
        "Result Reason",
        &[
            ("Item Not Found", 0x01),
            ("Response Too Large", 0x02),
            ("Authentication Not Successful", 0x03),
            ("Invalid Message", 0x04),
            ("Operation Not Supported", 0x05),
            ("Missing Data", 0x06),
            ("Invalid Field", 0x07),
            ("Feature Not Supported", 0x08),
            ("Operation Canceled By Requester", 0x09),
            ("Cryptographic Failure", 0x0A),
            ("Illegal Operation", 0x0B),
            ("Permission Denied", 0x0C),
            ("Object archived", 0x0D),
            ("Index Out of Bounds", 0x0E),
            ("Application Namespace Not Supported", 0x0F),
            ("Key Format Type Not Supported", 0x10),
            ("Key Compression Type Not Supported", 0x11),
            ("Encoding Option Error", 0x12),
            ("Key Value Not Present", 0x13),
            ("Attestation Required", 0x14),
            ("Attestation Failed", 0x15),
            ("Sensitive", 0x16),
            ("Not Extractable", 0x17),
            ("Object Already Exists", 0x18),
            ("General Failure", 0x100),
        ],
    ),
    (
        "Batch Error Continuation Option",
        &[("Continue", 0x01), ("Stop", 0x02), ("Undo", 0x03)],
    ),
    ("Usage Limits Unit", &[("Byte", 0x01), ("Object", 0x02)]),
    (
        "Encoding Option",
        &[("No Encoding", 0x01), ("TTLV Encoding", 0x02)],
    ),
    (
        "Object Group Member",
        &[("Group Member Fresh", 0x01), ("Group Member Default", 0x02)],
    ),
    (
        "Alternative Name Type",
        &[
            ("Uninterpreted Text String", 0x01),
            ("URI", 0x02),
            ("Object Serial Number", 0x03),
            ("Email Address", 0x04),
            ("DNS Name", 0x05),
            ("X.500 Distinguished Name", 0x06),
            ("IP Address", 0x07),
        ],
    ),
    (
        "Key Value Location Type",
        &[("Uninterpreted Text String", 0x01), ("URI", 0x02)],
    ),
    (
        "Attestation Type",
        &[
            ("TPM Quote", 0x01),
            ("TCG Integrity Report", 0x02),
            ("SAML Assertion", 0x03),
        ],
    ),
    (
        "Unwrap Mode",
        &[
            ("Unspecified", 0x01),
            ("Processed", 0x02),
            ("Not Processed", 0x03),
        ],
    ),
    (
        "Destroy Action",
        &[
            ("Unspecified", 0x01),
            ("Key Material Deleted", 0x02),
            ("Key Material Shredded", 0x03),
            ("Meta Data Deleted", 0x04),
            ("Meta Data Shredded", 0x05),
            ("Deleted", 0x06),
            ("Shredded", 0x07),
        ],
    ),
    (
        "Key Wrap Type",
        &[("Not Wrapped", 0x01), ("As Registered", 0x02)],
    ),
    ("Mask Generator", &[("MGF1", 0x01)]),
    (
        "Cryptographic Usage Mask",
        &[
            ("Sign", 0x0000_0001),
            ("Verify", 0x0000_0002),
            ("Encrypt", 0x0000_0004),
            ("Decrypt", 0x0000_0008),
            ("Wrap Key", 0x0000_0010),
            ("Unwrap Key", 0x0000_0020),
            ("Export", 0x0000_0040),
            ("MAC Generate", 0x0000_0080),
            ("MAC Verify", 0x0000_0100),
            ("Derive Key", 0x0000_0200),
            ("Content Commitment", 0x0000_0400),
            ("Key Agreement", 0x0000_0800),
            ("Certificate Sign", 0x0000_1000),
            ("CRL Sign", 0x0000_2000),
            ("Generate Cryptogram", 0x0000_4000),
            ("Validate Cryptogram", 0x0000_8000),
            ("Translate Encrypt", 0x0001_0000),
            ("Translate Decrypt", 0x0002_0000),
            ("Translate Wrap", 0x0004_0000),
            ("Translate Unwrap", 0x0008_0000),
        ],
    ),
    (
        "Storage Status Mask",
        &[("On-line storage", 0x01), ("Archival storage", 0x02)],
    ),
];

/// The enumeration domain of a tag, if it has one
#[must_use]
pub fn enumeration_table(tag: &str) -> Option<&'static [(&'static str, u32)]> {
    ENUMERATIONS
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, table)| *table)
}

/// Resolve `name` in the enumeration domain of `tag`
#[must_use]
pub fn enumeration_value(tag: &str, name: &str) -> Option<u32> {
    enumeration_table(tag)?
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, v)| *v)
}

/// Name the `value` of the enumeration domain of `tag`
#[must_use]
pub fn enumeration_name(tag: &str, value: u32) -> Option<&'static str> {
    enumeration_table(tag)?
        .iter()
        .find(|(_, v)| *v == value)
        .map(|(n, _)| *n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumeration_lookups() {
        assert_eq!(enumeration_value("Object Type", "Symmetric Key"), Some(2));
        assert_eq!(enumeration_name("Operation", 0x1E), Some("Discover Versions"));
        assert_eq!(enumeration_name("Result Status", 0), Some("Success"));
        assert_eq!(enumeration_value("Object Type", "Unicorn"), None);
        assert!(enumeration_table("Unique Identifier").is_none());
    }

    #[test]
    fn test_domains_have_unique_names_and_values() {
        for (tag, table) in ENUMERATIONS {
            for (i, (name, value)) in table.iter().enumerate() {
                for (other_name, other_value) in &table[i + 1..] {
                    assert_ne!(name, other_name, "duplicate name in {tag}");
                    assert_ne!(value, other_value, "duplicate value in {tag}");
                }
            }
        }
    }
}
