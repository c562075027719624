use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use aws_sdk_s3::Client;

use crate::error::StorageError;
use crate::objects;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Where finished reports go and how callers get them back.
///
/// Constructed once at startup and shared by every request handler.
pub trait ReportStore: Send + Sync {
    /// Persist a finished document under `key`.
    fn put_report<'a>(
        &'a self,
        key: &'a str,
        body: Vec<u8>,
        content_type: &'a str,
    ) -> BoxFuture<'a, Result<(), StorageError>>;

    /// Time-limited retrieval link for a stored document.
    fn presigned_url<'a>(
        &'a self,
        key: &'a str,
        expires_in: Duration,
    ) -> BoxFuture<'a, Result<String, StorageError>>;
}

/// [`ReportStore`] backed by a single S3 bucket.
#[derive(Clone)]
pub struct S3ReportStore {
    client: Client,
    bucket: String,
}

impl S3ReportStore {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

impl ReportStore for S3ReportStore {
    fn put_report<'a>(
        &'a self,
        key: &'a str,
        body: Vec<u8>,
        content_type: &'a str,
    ) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            objects::put_object(&self.client, &self.bucket, key, body, content_type).await?;
            Ok(())
        })
    }

    fn presigned_url<'a>(
        &'a self,
        key: &'a str,
        expires_in: Duration,
    ) -> BoxFuture<'a, Result<String, StorageError>> {
        Box::pin(objects::presign_get(
            &self.client,
            &self.bucket,
            key,
            expires_in,
        ))
    }
}
