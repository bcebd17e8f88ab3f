use kmip_logger::log_init;
use time::OffsetDateTime;
use tracing::info;

use crate::{
    Codec, Message, TtlvError,
    ttlv::{TTLV, TTLValue, TtlvType, wire::padding_length},
};

fn all_types() -> TTLV {
    TTLV::structure(
        "Request Message",
        vec![
            TTLV::structure(
                "Protocol Version",
                vec![
                    TTLV::integer("Protocol Version Major", 1),
                    TTLV::integer("Protocol Version Minor", 4),
                ],
            ),
            TTLV::long_integer("Usage Limits Count", (1 << 53) - 1),
            TTLV::big_integer("Key Material", vec![0xA5; 16]),
            TTLV::enumeration("Object Type", "Symmetric Key"),
            TTLV::boolean("Sensitive", true),
            TTLV::text_string("Unique Identifier", "f1c3-7b"),
            TTLV::byte_string("Nonce Value", vec![1_u8, 2, 3]),
            TTLV::date_time(
                "Activation Date",
                OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap(),
            ),
            TTLV::interval("Lease Time", -3600),
            TTLV::structure("Batch Item", vec![]),
        ],
    )
}

#[test]
fn test_integer_vector() {
    let codec = Codec::new();
    let bytes = codec.encode_ttlv(&TTLV::integer("Batch Count", 8)).unwrap();
    assert_eq!(
        bytes,
        vec![
            0x42, 0x00, 0x0D, 0x02, 0x00, 0x00, 0x00, 0x04, //
            0x00, 0x00, 0x00, 0x08, 0x00, 0x00, 0x00, 0x00,
        ]
    );
}

#[test]
fn test_text_string_vector() {
    let codec = Codec::new();
    let bytes = codec
        .encode_ttlv(&TTLV::text_string("Unique Identifier", "Hello World"))
        .unwrap();
    let mut expected = vec![0x42, 0x00, 0x94, 0x07, 0x00, 0x00, 0x00, 0x0B];
    expected.extend_from_slice(b"Hello World");
    expected.extend_from_slice(&[0; 5]);
    assert_eq!(bytes, expected);
}

#[test]
fn test_structure_length_is_sum_of_children() {
    let codec = Codec::new();
    let bytes = codec
        .encode_ttlv(&TTLV::structure(
            "Protocol Version",
            vec![
                TTLV::integer("Protocol Version Major", 1),
                TTLV::text_string("Unique Identifier", "abc"),
            ],
        ))
        .unwrap();
    // 16 for the integer, 8 + 3 + 5 for the text
    assert_eq!(&bytes[..8], &[0x42, 0x00, 0x69, 0x01, 0x00, 0x00, 0x00, 0x20]);
    assert_eq!(bytes.len(), 8 + 32);
}

#[test]
fn test_round_trip_all_types() {
    log_init(None);
    let codec = Codec::new();
    let message = Message::from(all_types());

    let bytes = codec.encode(&message).unwrap();
    assert_eq!(bytes.len() % 8, 0);

    let decoded = codec.decode(&bytes).unwrap();
    info!("decoded:\n{decoded}");
    assert_eq!(decoded, message);
    assert_eq!(codec.encode(&decoded).unwrap(), bytes);
}

#[test]
fn test_several_top_level_fields() {
    let codec = Codec::new();
    let message = Message::new(vec![
        TTLV::integer("Batch Count", 1),
        TTLV::text_string("Unique Identifier", "k"),
    ]);
    let bytes = codec.encode(&message).unwrap();
    assert_eq!(codec.decode(&bytes).unwrap().fields().len(), 2);
}

#[test]
fn test_padding_length() {
    assert_eq!(padding_length(0), 0);
    assert_eq!(padding_length(1), 7);
    assert_eq!(padding_length(8), 0);
    assert_eq!(padding_length(11), 5);
    assert_eq!(padding_length(17), 7);
}

#[test]
fn test_every_encoding_is_aligned() {
    let codec = Codec::new();
    for len in 0..40 {
        let bytes = codec
            .encode_ttlv(&TTLV::byte_string("Nonce Value", vec![7_u8; len]))
            .unwrap();
        assert_eq!(bytes.len() % 8, 0, "length {len}");
        assert_eq!(bytes.len(), 8 + len + padding_length(len));
    }
}

#[test]
fn test_boolean_true_when_any_byte_set() {
    let codec = Codec::new();
    let bytes = [
        0x42, 0x01, 0x20, 0x06, 0x00, 0x00, 0x00, 0x08, //
        0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ];
    let message = codec.decode(&bytes).unwrap();
    assert_eq!(message.lookup("Sensitive"), vec![&TTLValue::Boolean(true)]);
}

#[test]
fn test_long_integer_overflow() {
    let codec = Codec::new();
    let err = codec
        .encode_ttlv(&TTLV::long_integer("Usage Limits Count", 1 << 53))
        .unwrap_err();
    assert!(matches!(err, TtlvError::Overflow { .. }));

    let mut bytes = vec![0x42, 0x00, 0x96, 0x03, 0x00, 0x00, 0x00, 0x08];
    bytes.extend_from_slice(&(1_u64 << 53).to_be_bytes());
    let err = codec.decode(&bytes).unwrap_err();
    assert!(matches!(err, TtlvError::Overflow { value, .. } if value == 1 << 53));
}

#[test]
fn test_date_time_overflow() {
    let codec = Codec::new();
    let mut bytes = vec![0x42, 0x00, 0x01, 0x09, 0x00, 0x00, 0x00, 0x08];
    bytes.extend_from_slice(&u64::MAX.to_be_bytes());
    let err = codec.decode(&bytes).unwrap_err();
    assert!(matches!(err, TtlvError::Overflow { .. }));
}

#[test]
fn test_length_mismatch() {
    let codec = Codec::new();
    // Integer announced on 8 bytes
    let bytes = [
        0x42, 0x00, 0x0D, 0x02, 0x00, 0x00, 0x00, 0x08, //
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01,
    ];
    assert!(matches!(
        codec.decode(&bytes).unwrap_err(),
        TtlvError::LengthMismatch { expected: 4, found: 8, .. }
    ));

    // truncated value
    let bytes = [0x42, 0x00, 0x0D, 0x02, 0x00, 0x00, 0x00, 0x04, 0x00, 0x00];
    assert!(matches!(
        codec.decode(&bytes).unwrap_err(),
        TtlvError::LengthMismatch { .. }
    ));

    // big integers come in 8-byte words
    let err = codec
        .encode_ttlv(&TTLV::big_integer("Key Material", vec![1, 2, 3]))
        .unwrap_err();
    assert!(matches!(err, TtlvError::LengthMismatch { .. }));
}

#[test]
fn test_unknown_element_type_is_fatal() {
    let codec = Codec::new();
    let bytes = [
        0x42, 0x00, 0x0D, 0x0B, 0x00, 0x00, 0x00, 0x04, //
        0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00,
    ];
    assert_eq!(
        codec.decode(&bytes).unwrap_err(),
        TtlvError::UnknownElementType(0x0B)
    );
}

#[test]
fn test_unknown_tag_name_on_encode() {
    let codec = Codec::new();
    let err = codec
        .encode_ttlv(&TTLV::integer("Not A Tag", 1))
        .unwrap_err();
    assert_eq!(err, TtlvError::UnknownTag("Not A Tag".to_owned()));
}

#[test]
fn test_invalid_utf8_text() {
    let codec = Codec::new();
    let bytes = [
        0x42, 0x00, 0x94, 0x07, 0x00, 0x00, 0x00, 0x02, //
        0xC3, 0x28, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ];
    assert!(matches!(
        codec.decode(&bytes).unwrap_err(),
        TtlvError::InvalidText(_)
    ));
}

#[test]
fn test_masks() {
    let codec = Codec::new();
    let mask = codec
        .encode_mask("Cryptographic Usage Mask", &["Encrypt", "Decrypt"])
        .unwrap();
    assert_eq!(mask, 0x0C);
    assert_eq!(
        codec.decode_mask("Cryptographic Usage Mask", mask),
        vec!["Encrypt".to_owned(), "Decrypt".to_owned()]
    );
    assert!(codec.encode_mask("Cryptographic Usage Mask", &[]).unwrap() == 0);
    assert!(matches!(
        codec
            .encode_mask("Cryptographic Usage Mask", &["Fly"])
            .unwrap_err(),
        TtlvError::UnknownEnumeration { .. }
    ));
    assert!(codec.decode_mask("Unique Identifier", 0x0C).is_empty());
}

#[test]
fn test_type_codes() {
    for code in 0x01_u8..=0x0A {
        let item_type = TtlvType::try_from(code).unwrap();
        assert_eq!(item_type.to_byte(), code);
    }
    assert_eq!(TtlvType::DateTime.to_byte(), 0x09);
    assert_eq!(TtlvType::from_name("Date-Time").unwrap(), TtlvType::DateTime);
    assert!(TtlvType::try_from(0x0B).is_err());
}
