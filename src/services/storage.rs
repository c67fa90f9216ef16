//! Object storage for uploaded images.
//!
//! `ImageStore` is the seam between the upload service and the backend. The
//! production backend talks to S3 directly: requests are signed with AWS
//! Signature Version 4 (HMAC-SHA256) and sent with `reqwest`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::config::StorageConfig;
use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

const SIGNING_ALGORITHM: &str = "AWS4-HMAC-SHA256";
const SERVICE: &str = "s3";

/// Destination for uploaded images.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store `body` under `key` and return its public URL.
    async fn put_object(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AppError>;
}

/// S3 bucket backend.
pub struct S3ImageStore {
    client: reqwest::Client,
    config: StorageConfig,
}

impl S3ImageStore {
    pub fn new(config: StorageConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::Storage(format!("HTTP client error: {}", e)))?;

        Ok(Self { client, config })
    }

    fn host(&self) -> String {
        format!("{}.s3.{}.amazonaws.com", self.config.bucket, self.config.region)
    }

    /// URL handed back to clients once the object is stored.
    pub fn public_url(&self, key: &str) -> String {
        format!("https://{}.s3.amazonaws.com/{}", self.config.bucket, key)
    }
}

#[async_trait]
impl ImageStore for S3ImageStore {
    async fn put_object(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<String, AppError> {
        let host = self.host();
        let payload_hash = hex::encode(Sha256::digest(&body));
        let request = PutRequest {
            host: &host,
            key,
            content_type,
            payload_hash: &payload_hash,
        };
        let signed = sign_put(&self.config, &request, Utc::now());

        let response = self
            .client
            .put(format!("https://{}/{}", host, uri_encode(key)))
            .header("Content-Type", content_type)
            .header("x-amz-acl", "public-read")
            .header("x-amz-content-sha256", &payload_hash)
            .header("x-amz-date", &signed.amz_date)
            .header("Authorization", &signed.authorization)
            .body(body)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("upload request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, key, response = %body, "object storage rejected upload");
            return Err(AppError::Storage(format!(
                "object storage returned {}",
                status
            )));
        }

        Ok(self.public_url(key))
    }
}

/// The parts of a PUT request covered by the signature.
struct PutRequest<'a> {
    host: &'a str,
    key: &'a str,
    content_type: &'a str,
    payload_hash: &'a str,
}

/// Headers produced by signing.
#[derive(Debug)]
struct SignedHeaders {
    amz_date: String,
    authorization: String,
}

fn sign_put(config: &StorageConfig, request: &PutRequest<'_>, now: DateTime<Utc>) -> SignedHeaders {
    let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
    let date_stamp = now.format("%Y%m%d").to_string();

    // Header names must be lowercase and sorted
    let canonical_headers = format!(
        "content-type:{}\nhost:{}\nx-amz-acl:public-read\nx-amz-content-sha256:{}\nx-amz-date:{}\n",
        request.content_type, request.host, request.payload_hash, amz_date
    );
    let signed_headers = "content-type;host;x-amz-acl;x-amz-content-sha256;x-amz-date";

    let canonical_request = format!(
        "PUT\n/{}\n\n{}\n{}\n{}",
        uri_encode(request.key),
        canonical_headers,
        signed_headers,
        request.payload_hash
    );

    let scope = format!("{}/{}/{}/aws4_request", date_stamp, config.region, SERVICE);
    let string_to_sign = format!(
        "{}\n{}\n{}\n{}",
        SIGNING_ALGORITHM,
        amz_date,
        scope,
        hex::encode(Sha256::digest(canonical_request.as_bytes()))
    );

    let key = signing_key(
        &config.secret_access_key,
        &date_stamp,
        &config.region,
        SERVICE,
    );
    let signature = hex::encode(hmac(&key, string_to_sign.as_bytes()));

    SignedHeaders {
        authorization: format!(
            "{} Credential={}/{}, SignedHeaders={}, Signature={}",
            SIGNING_ALGORITHM, config.access_key_id, scope, signed_headers, signature
        ),
        amz_date,
    }
}

/// Derive the per-day, per-region signing key.
fn signing_key(secret: &str, date_stamp: &str, region: &str, service: &str) -> Vec<u8> {
    let k_date = hmac(format!("AWS4{}", secret).as_bytes(), date_stamp.as_bytes());
    let k_region = hmac(&k_date, region.as_bytes());
    let k_service = hmac(&k_region, service.as_bytes());
    hmac(&k_service, b"aws4_request")
}

fn hmac(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC key length is valid");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

/// Percent-encode an object key, leaving unreserved characters and `/`.
fn uri_encode(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

#[cfg(test)]
pub mod memory {
    //! In-process store used by router tests.

    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct MemoryImageStore {
        pub objects: Mutex<HashMap<String, Vec<u8>>>,
    }

    #[async_trait]
    impl ImageStore for MemoryImageStore {
        async fn put_object(
            &self,
            key: &str,
            body: Vec<u8>,
            _content_type: &str,
        ) -> Result<String, AppError> {
            self.objects
                .lock()
                .unwrap()
                .insert(key.to_string(), body);
            Ok(format!("https://images.example.com/{}", key))
        }
    }
}
