/// KMIP 1.4 tags, as named by the KMIP 1.4 standard.
///
/// The wire uses the 3 low bytes of the code.
pub static TAGS: &[(&str, u32)] = &[
    ("Activation Date", 0x42_0001),
    ("Application Data", 0x42_0002),
    ("Application Namespace", 0x42_0003),
    ("Application Specific Information", 0x42_0004),
    ("Archive Date", 0x42_0005),
    ("Asynchronous Correlation Value", 0x42_0006),
    ("Asynchronous Indicator", 0x42_0007),
    ("Attribute", 0x42_0008),
    ("Attribute Index", 0x42_0009),
    ("Attribute Name", 0x42_000A),
    ("Attribute Value", 0x42_000B),
    ("Authentication", 0x42_000C),
    ("Batch Count", 0x42_000D),
    ("Batch Error Continuation Option", 0x42_000E),
    ("Batch Item", 0x42_000F),
    ("Batch Order Option", 0x42_0010),
    ("Block Cipher Mode", 0x42_0011),
    ("Cancellation Result", 0x42_0012),
    ("Certificate", 0x42_0013),
    ("Certificate Identifier", 0x42_0014),
    ("Certificate Issuer", 0x42_0015),
    ("Certificate Issuer Alternative Name", 0x42_0016),
    ("Certificate Issuer Distinguished Name", 0x42_0017),
    ("Certificate Request", 0x42_0018),
    ("Certificate Request Type", 0x42_0019),
    ("Certificate Subject", 0x42_001A),
    ("Certificate Subject Alternative Name", 0x42_001B),
    ("Certificate Subject Distinguished Name", 0x42_001C),
    ("Certificate Type", 0x42_001D),
    ("Certificate Value", 0x42_001E),
    ("Common Template-Attribute", 0x42_001F),
    ("Compromise Date", 0x42_0020),
    ("Compromise Occurrence Date", 0x42_0021),
    ("Contact Information", 0x42_0022),
    ("Credential", 0x42_0023),
    ("Credential Type", 0x42_0024),
    ("Credential Value", 0x42_0025),
    ("Criticality Indicator", 0x42_0026),
    ("CRT Coefficient", 0x42_0027),
    ("Cryptographic Algorithm", 0x42_0028),
    ("Cryptographic Domain Parameters", 0x42_0029),
    ("Cryptographic Length", 0x42_002A),
    ("Cryptographic Parameters", 0x42_002B),
    ("Cryptographic Usage Mask", 0x42_002C),
    ("Custom Attribute", 0x42_002D),
    ("D", 0x42_002E),
    ("Deactivation Date", 0x42_002F),
    ("Derivation Data", 0x42_0030),
    ("Derivation Method", 0x42_0031),
    ("Derivation Parameters", 0x42_0032),
    ("Destroy Date", 0x42_0033),
    ("Digest", 0x42_0034),
    ("Digest Value", 0x42_0035),
    ("Encryption Key Information", 0x42_0036),
    ("G", 0x42_0037),
    ("Hashing Algorithm", 0x42_0038),
    ("Initial Date", 0x42_0039),
    ("Initialization Vector", 0x42_003A),
    ("Issuer", 0x42_003B),
    ("Iteration Count", 0x42_003C),
    ("IV/Counter/Nonce", 0x42_003D),
    ("J", 0x42_003E),
    ("Key", 0x42_003F),
    ("Key Block", 0x42_0040),
    ("Key Compression Type", 0x42_0041),
    ("Key Format Type", 0x42_0042),
    ("Key Material", 0x42_0043),
    ("Key Part Identifier", 0x42_0044),
    ("Key Value", 0x42_0045),
    ("Key Wrapping Data", 0x42_0046),
    ("Key Wrapping Specification", 0x42_0047),
    ("Last Change Date", 0x42_0048),
    ("Lease Time", 0x42_0049),
    ("Link", 0x42_004A),
    ("Link Type", 0x42_004B),
    ("Linked Object Identifier", 0x42_004C),
    ("MAC/Signature", 0x42_004D),
    ("MAC/Signature Key Information", 0x42_004E),
    ("Maximum Items", 0x42_004F),
    ("Maximum Response Size", 0x42_0050),
    ("Message Extension", 0x42_0051),
    ("Modulus", 0x42_0052),
    ("Name", 0x42_0053),
    ("Name Type", 0x42_0054),
    ("Name Value", 0x42_0055),
    ("Object Group", 0x42_0056),
    ("Object Type", 0x42_0057),
    ("Offset", 0x42_0058),
    ("Opaque Data Type", 0x42_0059),
    ("Opaque Data Value", 0x42_005A),
    ("Opaque Object", 0x42_005B),
    ("Operation", 0x42_005C),
    ("Operation Policy Name", 0x42_005D),
    ("P", 0x42_005E),
    ("Padding Method", 0x42_005F),
    ("Prime Exponent P", 0x42_0060),
    ("Prime Exponent Q", 0x42_0061),
    ("Prime Field Size", 0x42_0062),
    ("Private Exponent", 0x42_0063),
    ("Private Key", 0x42_0064),
    ("Private Key Template-Attribute", 0x42_0065),
    ("Private Key Unique Identifier", 0x42_0066),
    ("Process Start Date", 0x42_0067),
    ("Protect Stop Date", 0x42_0068),
    ("Protocol Version", 0x42_0069),
    ("Protocol Version Major", 0x42_006A),
    ("Protocol Version Minor", 0x42_006B),
    ("Public Exponent", 0x42_006C),
    ("Public Key", 0x42_006D),
    ("Public Key Template-Attribute", 0x42_006E),
    ("Public Key Unique Identifier", 0x42_006F),
    ("Put Function", 0x42_0070),
    ("Q", 0x42_0071),
    ("Q String", 0x42_0072),
    ("Qlength", 0x42_0073),
    ("Query Function", 0x42_0074),
    ("Recommended Curve", 0x42_0075),
    ("Replaced Unique Identifier", 0x42_0076),
    ("Request Header", 0x42_0077),
    ("Request Message", 0x42_0078),
    ("Request Payload", 0x42_0079),
    ("Response Header", 0x42_007A),
    ("Response Message", 0x42_007B),
    ("Response Payload", 0x42_007C),
    ("Result Message", 0x42_007D),
    ("Result Reason", 0x42_007E),
    ("Result Status", 0x42_007F),
    ("Revocation Message", 0x42_0080),
    ("Revocation Reason", 0x42_0081),
    ("Revocation Reason Code", 0x42_0082),
    ("Key Role Type", 0x42_0083),
    ("Salt", 0x42_0084),
    ("Secret Data", 0x42_0085),
    ("Secret Data Type", 0x42_0086),
    ("Serial Number", 0x42_0087),
    ("Server Information", 0x42_0088),
    ("Split Key", 0x42_0089),
    ("Split Key Method", 0x42_008A),
    ("Split Key Parts", 0x42_008B),
    ("Split Key Threshold", 0x42_008C),
    ("State", 0x42_008D),
    ("Storage Status Mask", 0x42_008E),
    ("Symmetric Key", 0x42_008F),
    ("Template", 0x42_0090),
    ("Template-Attribute", 0x42_0091),
    ("Time Stamp", 0x42_0092),
    ("Unique Batch Item ID", 0x42_0093),
    ("Unique Identifier", 0x42_0094),
    ("Usage Limits", 0x42_0095),
    ("Usage Limits Count", 0x42_0096),
    ("Usage Limits Total", 0x42_0097),
    ("Usage Limits Unit", 0x42_0098),
    ("Username", 0x42_0099),
    ("Validity Date", 0x42_009A),
    ("Validity Indicator", 0x42_009B),
    ("Vendor Extension", 0x42_009C),
    ("Vendor Identification", 0x42_009D),
    ("Wrapping Method", 0x42_009E),
    ("X", 0x42_009F),
    ("Y", 0x42_00A0),
    ("Password", 0x42_00A1),
    ("Device Identifier", 0x42_00A2),
    ("Encoding Option", 0x42_00A3),
    ("Extension Information", 0x42_00A4),
    ("Extension Name", 0x42_00A5),
    ("Extension Tag", 0x42_00A6),
    ("Extension Type", 0x42_00A7),
    ("Fresh", 0x42_00A8),
    ("Machine Identifier", 0x42_00A9),
    ("Media Identifier", 0x42_00AA),
    ("Network Identifier", 0x42_00AB),
    ("Object Group Member", 0x42_00AC),
    ("Certificate Length", 0x42_00AD),
    ("Digital Signature Algorithm", 0x42_00AE),
    ("Certificate Serial Number", 0x42_00AF),
    ("Device Serial Number", 0x42_00B0),
    ("Issuer Alternative Name", 0x42_00B1),
    ("Issuer Distinguished Name", 0x42_00B2),
    ("Subject Alternative Name", 0x42_00B3),
    ("Subject Distinguished Name", 0x42_00B4),
    ("X.509 Certificate Identifier", 0x42_00B5),
    ("X.509 Certificate Issuer", 0x42_00B6),
    ("X.509 Certificate Subject", 0x42_00B7),
    ("Key Value Location", 0x42_00B8),
    ("Key Value Location Value", 0x42_00B9),
    ("Key Value Location Type", 0x42_00BA),
    ("Key Value Present", 0x42_00BB),
    ("Original Creation Date", 0x42_00BC),
    ("PGP Key", 0x42_00BD),
    ("PGP Key Version", 0x42_00BE),
    ("Alternative Name", 0x42_00BF),
    ("Alternative Name Value", 0x42_00C0),
    ("Alternative Name Type", 0x42_00C1),
    ("Data", 0x42_00C2),
    ("Signature Data", 0x42_00C3),
    ("Data Length", 0x42_00C4),
    ("Random IV", 0x42_00C5),
    ("MAC Data", 0x42_00C6),
    ("Attestation Type", 0x42_00C7),
    ("Nonce", 0x42_00C8),
    ("Nonce ID", 0x42_00C9),
    ("Nonce Value", 0x42_00CA),
    ("Attestation Measurement", 0x42_00CB),
    ("Attestation Assertion", 0x42_00CC),
    ("IV Length", 0x42_00CD),
    ("Tag Length", 0x42_00CE),
    ("Fixed Field Length", 0x42_00CF),
    ("Counter Length", 0x42_00D0),
    ("Initial Counter Value", 0x42_00D1),
    ("Invocation Field Length", 0x42_00D2),
    ("Attestation Capable Indicator", 0x42_00D3),
    ("Offset Items", 0x42_00D4),
    ("Located Items", 0x42_00D5),
    ("Correlation Value", 0x42_00D6),
    ("Init Indicator", 0x42_00D7),
    ("Final Indicator", 0x42_00D8),
    ("RNG Parameters", 0x42_00D9),
    ("RNG Algorithm", 0x42_00DA),
    ("DRBG Algorithm", 0x42_00DB),
    ("FIPS186 Variation", 0x42_00DC),
    ("Prediction Resistance", 0x42_00DD),
    ("Random Number Generator", 0x42_00DE),
    ("Validation Information", 0x42_00DF),
    ("Validation Authority Type", 0x42_00E0),
    ("Validation Authority Country", 0x42_00E1),
    ("Validation Authority URI", 0x42_00E2),
    ("Validation Version Major", 0x42_00E3),
    ("Validation Version Minor", 0x42_00E4),
    ("Validation Type", 0x42_00E5),
    ("Validation Level", 0x42_00E6),
    ("Validation Certificate Identifier", 0x42_00E7),
    ("Validation Certificate URI", 0x42_00E8),
    ("Validation Vendor URI", 0x42_00E9),
    ("Validation Profile", 0x42_00EA),
    ("Profile Information", 0x42_00EB),
    ("Profile Name", 0x42_00EC),
    ("Server URI", 0x42_00ED),
    ("Server Port", 0x42_00EE),
    ("Streaming Capability", 0x42_00EF),
    ("Asynchronous Capability", 0x42_00F0),
    ("Attestation Capability", 0x42_00F1),
    ("Unwrap Mode", 0x42_00F2),
    ("Destroy Action", 0x42_00F3),
    ("Shredding Algorithm", 0x42_00F4),
    ("RNG Mode", 0x42_00F5),
    ("Client Registration Method", 0x42_00F6),
    ("Capability Information", 0x42_00F7),
    ("Key Wrap Type", 0x42_00F8),
    ("Batch Undo Capability", 0x42_00F9),
    ("Batch Continue Capability", 0x42_00FA),
    ("PKCS#12 Friendly Name", 0x42_00FB),
    ("Description", 0x42_00FC),
    ("Comment", 0x42_00FD),
    ("Authenticated Encryption Additional Data", 0x42_00FE),
    ("Authenticated Encryption Tag", 0x42_00FF),
    ("Salt Length", 0x42_0100),
    ("Mask Generator", 0x42_0101),
    ("Mask Generator Hashing Algorithm", 0x42_0102),
    ("P Source", 0x42_0103),
    ("Trailer Field", 0x42_0104),
    ("Client Correlation Value", 0x42_0105),
    ("Server Correlation Value", 0x42_0106),
    ("Digested Data", 0x42_0107),
    ("Certificate Subject CN", 0x42_0108),
    ("Certificate Subject O", 0x42_0109),
    ("Certificate Subject OU", 0x42_010A),
    ("Certificate Subject Email", 0x42_010B),
    ("Certificate Subject C", 0x42_010C),
    ("Certificate Subject ST", 0x42_010D),
    ("Certificate Subject L", 0x42_010E),
    ("Certificate Subject UID", 0x42_010F),
    ("Certificate Subject Serial Number", 0x42_0110),
    ("Certificate Subject Title", 0x42_0111),
    ("Certificate Subject DC", 0x42_0112),
    ("Certificate Subject DN Qualifier", 0x42_0113),
    ("Certificate Issuer CN", 0x42_0114),
    ("Certificate Issuer O", 0x42_0115),
    ("Certificate Issuer OU", 0x42_0116),
    ("Certificate Issuer Email", 0x42_0117),
    ("Certificate Issuer C", 0x42_0118),
    ("Certificate Issuer ST", 0x42_0119),
    ("Certificate Issuer L", 0x42_011A),
    ("Certificate Issuer UID", 0x42_011B),
    ("Certificate Issuer Serial Number", 0x42_011C),
    ("Certificate Issuer Title", 0x42_011D),
    ("Certificate Issuer DC", 0x42_011E),
    ("Certificate Issuer DN Qualifier", 0x42_011F),
    ("Sensitive", 0x42_0120),
    ("Always Sensitive", 0x42_0121),
    ("Extractable", 0x42_0122),
    ("Never Extractable", 0x42_0123),
    ("Replace Existing", 0x42_0124),
];
