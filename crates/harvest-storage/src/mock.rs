//! In-memory report store for testing.
//!
//! Provides [`MemoryStore`] so request handlers can be exercised without an
//! object store endpoint.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use crate::error::StorageError;
use crate::store::{BoxFuture, ReportStore};

/// A stored object as the mock saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub content_type: String,
}

/// Mock store keeping objects in a map.
///
/// Presigned URLs are `memory://<key>?expires=<secs>`. Use
/// [`MemoryStore::failing_puts`] / [`MemoryStore::failing_presign`] to
/// simulate backend errors.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: RwLock<HashMap<String, StoredObject>>,
    fail_put: bool,
    fail_presign: bool,
    calls: AtomicUsize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn failing_puts(mut self) -> Self {
        self.fail_put = true;
        self
    }

    #[must_use]
    pub fn failing_presign(mut self) -> Self {
        self.fail_presign = true;
        self
    }

    /// Total number of store operations attempted, successful or not.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Stored keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        keys.sort();
        keys
    }
}

impl ReportStore for MemoryStore {
    fn put_report<'a>(
        &'a self,
        key: &'a str,
        body: Vec<u8>,
        content_type: &'a str,
    ) -> BoxFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_put {
                return Err(StorageError::PutObject("simulated upload failure".to_string()));
            }
            self.objects
                .write()
                .map_err(|e| StorageError::PutObject(e.to_string()))?
                .insert(
                    key.to_string(),
                    StoredObject {
                        body,
                        content_type: content_type.to_string(),
                    },
                );
            Ok(())
        })
    }

    fn presigned_url<'a>(
        &'a self,
        key: &'a str,
        expires_in: Duration,
    ) -> BoxFuture<'a, Result<String, StorageError>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_presign {
                return Err(StorageError::Presign("simulated presign failure".to_string()));
            }
            let exists = self
                .objects
                .read()
                .map_err(|e| StorageError::Presign(e.to_string()))?
                .contains_key(key);
            if !exists {
                return Err(StorageError::Presign(format!("no such key: {key}")));
            }
            Ok(format!("memory://{key}?expires={}", expires_in.as_secs()))
        })
    }
}
