use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;
use aws_sdk_s3::config::Credentials;

use crate::error::StorageError;

/// Connection settings for an S3-compatible object store using HMAC keys.
#[derive(Clone)]
pub struct StorageSettings {
    pub endpoint: String,
    pub region: String,
    pub bucket: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Address buckets as `endpoint/bucket` instead of `bucket.endpoint`.
    pub force_path_style: bool,
}

impl std::fmt::Debug for StorageSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageSettings")
            .field("endpoint", &self.endpoint)
            .field("region", &self.region)
            .field("bucket", &self.bucket)
            .field("access_key_id", &redact(&self.access_key_id))
            .field("secret_access_key", &"****")
            .field("force_path_style", &self.force_path_style)
            .finish()
    }
}

impl StorageSettings {
    pub fn validate(&self) -> Result<(), StorageError> {
        for (name, value) in [
            ("endpoint", &self.endpoint),
            ("region", &self.region),
            ("bucket", &self.bucket),
            ("access_key_id", &self.access_key_id),
            ("secret_access_key", &self.secret_access_key),
        ] {
            if value.trim().is_empty() {
                return Err(StorageError::Config(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }
}

/// Build an S3 client for the configured endpoint.
///
/// The client is constructed once at startup and shared by every request.
/// Requests are signed with SigV4, which is what presigned GET URLs need.
pub async fn build_client(settings: &StorageSettings) -> Result<Client, StorageError> {
    settings.validate()?;

    let sdk_config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(settings.region.clone()))
        .credentials_provider(Credentials::new(
            &settings.access_key_id,
            &settings.secret_access_key,
            None,
            None,
            "harvest-config",
        ))
        .load()
        .await;

    let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .endpoint_url(&settings.endpoint)
        .force_path_style(settings.force_path_style)
        .build();

    tracing::info!(
        endpoint = %settings.endpoint,
        region = %settings.region,
        bucket = %settings.bucket,
        "object storage client initialized"
    );

    Ok(Client::from_conf(s3_config))
}

fn redact(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
