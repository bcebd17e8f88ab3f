use crate::{
    Codec, TtlvError,
    ttlv::{TTLV, UNKNOWN_TAG},
};

const VENDOR_TAG: [u8; 16] = [
    0x54, 0x00, 0x01, 0x07, 0x00, 0x00, 0x00, 0x06, //
    b'b', b'u', b'c', b'k', b'e', b't', 0x00, 0x00,
];

#[test]
fn test_unmapped_tag_decodes_to_placeholder() {
    let codec = Codec::new();
    let message = codec.decode(&VENDOR_TAG).unwrap();
    assert_eq!(message.fields()[0].tag, UNKNOWN_TAG);
    assert_eq!(
        message.lookup_first(UNKNOWN_TAG).and_then(|v| v.as_text()),
        Some("bucket")
    );
    // the placeholder cannot be put back on the wire
    assert_eq!(
        codec.encode(&message).unwrap_err(),
        TtlvError::UnknownTag(UNKNOWN_TAG.to_owned())
    );
}

#[test]
fn test_mapped_extension_is_used_both_ways() {
    let mut codec = Codec::new();
    codec.map_extension("x-Bucket", 0x54_0001);

    let message = codec.decode(&VENDOR_TAG).unwrap();
    assert_eq!(message.fields()[0].tag, "x-Bucket");
    assert_eq!(codec.encode(&message).unwrap(), VENDOR_TAG.to_vec());
    assert_eq!(
        codec
            .encode_ttlv(&TTLV::text_string("x-Bucket", "bucket"))
            .unwrap(),
        VENDOR_TAG.to_vec()
    );
    assert_eq!(codec.tag_name(0x54_0001), Some("x-Bucket"));
}

#[test]
fn test_extensions_are_per_codec() {
    let mut vendor = Codec::new();
    vendor.map_extension("x-Bucket", 0x54_0001);
    let plain = Codec::new();

    assert_eq!(plain.tag_code("x-Bucket"), None);
    assert_eq!(plain.decode(&VENDOR_TAG).unwrap().fields()[0].tag, UNKNOWN_TAG);
    assert_eq!(vendor.tag_code("x-Bucket"), Some(0x54_0001));
}
