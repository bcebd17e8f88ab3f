use kmip_ttlv::ttlv::{KmipEnumeration, TTLV, TTLValue};
use time::OffsetDateTime;
use tracing::{Instrument, debug, info_span, warn};

use crate::{
    client_ensure,
    config::{ClientConfig, KeyManagementConfig},
    driver::{Driver, KmipResponse},
    error::{KmipClientError, result::KmipClientResult},
    transport::Transport,
};

const ALGORITHM: &str = "AES";
const KEY_LENGTH: u32 = 256;
const USAGE_MASK: [&str; 2] = ["Encrypt", "Decrypt"];
const BLOCK_CIPHER_MODE: &str = "CBC";
const PADDING_METHOD: &str = "PKCS5";
const OBJECT_TYPE: &str = "Symmetric Key";

/// IV sent with every Encrypt and Decrypt.
///
/// Known deviation from CBC practice: the IV never changes, so equal
/// plaintexts give equal ciphertexts under a key. Data already encrypted
/// through this client can only be decrypted with it.
pub const FIXED_IV: [u8; 16] = [0; 16];

/// Bucket name given to the throwaway key of [`KmipKeyClient::healthcheck`]
pub const HEALTHCHECK_BUCKET_NAME: &str = "kmip-healthcheck";

/// Bucket key life cycle and data key encryption on a KMIP server.
///
/// Every public operation reports its failures, whatever their origin, as
/// [`KmipClientError::KeyManagement`] prefixed with `KMIP::<operation>`.
#[derive(Clone)]
pub struct KmipKeyClient {
    driver: Driver,
    options: KeyManagementConfig,
}

fn normalize(operation: &str) -> impl FnOnce(KmipClientError) -> KmipClientError + '_ {
    move |e| KmipClientError::KeyManagement(format!("KMIP::{operation}: {e}"))
}

impl KmipKeyClient {
    /// Build the transport and driver; the connection opens on first use
    pub fn new(config: &ClientConfig) -> KmipClientResult<Self> {
        let driver = Driver::new(Transport::from_config(&config.transport)?);
        driver.enable_handshake();
        Ok(Self::with_driver(driver, config.key_management.clone()))
    }

    #[must_use]
    pub const fn with_driver(driver: Driver, options: KeyManagementConfig) -> Self {
        Self { driver, options }
    }

    #[must_use]
    pub const fn driver(&self) -> &Driver {
        &self.driver
    }

    /// Create an active AES-256 key for `bucket_name` and return its identifier
    pub async fn create_bucket_key(&self, bucket_name: &str) -> KmipClientResult<String> {
        self.create_key(bucket_name)
            .instrument(info_span!("create_bucket_key", bucket = bucket_name))
            .await
            .map_err(normalize("create_bucket_key"))
    }

    /// Revoke, then destroy, the key
    pub async fn destroy_bucket_key(&self, key_id: &str) -> KmipClientResult<()> {
        self.destroy_key(key_id)
            .instrument(info_span!("destroy_bucket_key", key_id))
            .await
            .map_err(normalize("destroy_bucket_key"))
    }

    /// Encrypt a data key with the bucket key `key_id`.
    ///
    /// `crypto_scheme` is the caller's record of how the data is protected;
    /// it is only logged.
    pub async fn cipher_data_key(
        &self,
        crypto_scheme: u32,
        key_id: &str,
        plaintext: &[u8],
    ) -> KmipClientResult<Vec<u8>> {
        self.crypt("Encrypt", key_id, plaintext)
            .instrument(info_span!("cipher_data_key", crypto_scheme, key_id))
            .await
            .map_err(normalize("cipher_data_key"))
    }

    pub async fn decipher_data_key(
        &self,
        crypto_scheme: u32,
        key_id: &str,
        ciphertext: &[u8],
    ) -> KmipClientResult<Vec<u8>> {
        self.crypt("Decrypt", key_id, ciphertext)
            .instrument(info_span!("decipher_data_key", crypto_scheme, key_id))
            .await
            .map_err(normalize("decipher_data_key"))
    }

    /// Create a throwaway key; its destruction is not waited for
    pub async fn healthcheck(&self) -> KmipClientResult<()> {
        let key_id = self
            .create_key(HEALTHCHECK_BUCKET_NAME)
            .instrument(info_span!("healthcheck"))
            .await
            .map_err(normalize("healthcheck"))?;

        let client = self.clone();
        tokio::spawn(
            async move {
                if let Err(e) = client.destroy_key(&key_id).await {
                    warn!("could not destroy the healthcheck key {key_id}: {e}");
                }
            }
            .instrument(info_span!("healthcheck_cleanup")),
        );
        Ok(())
    }

    /// Close the connection once pending requests are answered
    pub fn end(&self) {
        self.driver.end();
    }

    async fn create_key(&self, bucket_name: &str) -> KmipClientResult<String> {
        let mut attributes = Vec::with_capacity(5);
        if let Some(name) = &self.options.bucket_name_attribute_name {
            attributes.push(TTLV::attribute(
                name.as_str(),
                TTLValue::TextString(bucket_name.to_owned()),
            ));
        }
        attributes.push(TTLV::attribute(
            "Cryptographic Algorithm",
            TTLValue::Enumeration(KmipEnumeration::Name(ALGORITHM.to_owned())),
        ));
        attributes.push(TTLV::attribute(
            "Cryptographic Length",
            TTLValue::Integer(KEY_LENGTH),
        ));
        let usage_mask = self
            .driver
            .encode_mask("Cryptographic Usage Mask", &USAGE_MASK)
            .await?;
        attributes.push(TTLV::attribute(
            "Cryptographic Usage Mask",
            TTLValue::Integer(usage_mask),
        ));
        if self.options.compound_create_activate {
            attributes.push(TTLV::attribute(
                "Activation Date",
                TTLValue::DateTime(OffsetDateTime::now_utc()),
            ));
        }

        let response = self
            .driver
            .request(
                "Create",
                vec![
                    TTLV::enumeration("Object Type", OBJECT_TYPE),
                    TTLV::structure("Template-Attribute", attributes),
                ],
            )
            .await?;

        let object_type = response.payload_enumeration("Object Type")?;
        client_ensure!(
            object_type == OBJECT_TYPE,
            KmipClientError::UnexpectedResponse(format!(
                "Server created an object of wrong type: {object_type}"
            ))
        );
        let key_id = response.payload_text("Unique Identifier")?.to_owned();
        debug!("created key {key_id}");

        if !self.options.compound_create_activate {
            self.activate(&key_id).await?;
        }
        Ok(key_id)
    }

    async fn activate(&self, key_id: &str) -> KmipClientResult<()> {
        let response = self
            .driver
            .request("Activate", vec![TTLV::text_string("Unique Identifier", key_id)])
            .await?;
        check_identifier(&response, key_id)
    }

    async fn revoke(&self, key_id: &str) -> KmipClientResult<()> {
        let response = self
            .driver
            .request(
                "Revoke",
                vec![
                    TTLV::text_string("Unique Identifier", key_id),
                    TTLV::structure(
                        "Revocation Reason",
                        vec![TTLV::enumeration(
                            "Revocation Reason Code",
                            "Cessation of Operation",
                        )],
                    ),
                ],
            )
            .await?;
        check_identifier(&response, key_id)
    }

    async fn destroy_key(&self, key_id: &str) -> KmipClientResult<()> {
        self.revoke(key_id).await?;
        let response = self
            .driver
            .request("Destroy", vec![TTLV::text_string("Unique Identifier", key_id)])
            .await?;
        check_identifier(&response, key_id)?;
        debug!("destroyed key {key_id}");
        Ok(())
    }

    async fn crypt(&self, operation: &str, key_id: &str, data: &[u8]) -> KmipClientResult<Vec<u8>> {
        let response = self
            .driver
            .request(
                operation,
                vec![
                    TTLV::text_string("Unique Identifier", key_id),
                    TTLV::structure(
                        "Cryptographic Parameters",
                        vec![
                            TTLV::enumeration("Block Cipher Mode", BLOCK_CIPHER_MODE),
                            TTLV::enumeration("Padding Method", PADDING_METHOD),
                            TTLV::enumeration("Cryptographic Algorithm", ALGORITHM),
                        ],
                    ),
                    TTLV::byte_string("Data", data),
                    TTLV::byte_string("IV/Counter/Nonce", FIXED_IV),
                ],
            )
            .await?;
        check_identifier(&response, key_id)?;
        Ok(response.payload_bytes("Data")?.to_vec())
    }
}

fn check_identifier(response: &KmipResponse, key_id: &str) -> KmipClientResult<()> {
    let returned = response.payload_text("Unique Identifier")?;
    client_ensure!(
        returned == key_id,
        KmipClientError::UnexpectedResponse(format!(
            "Server returned unique identifier {returned} instead of {key_id}"
        ))
    );
    Ok(())
}
