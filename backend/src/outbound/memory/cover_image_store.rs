//! Process-local `CoverImageStore` for development.
//!
//! Keeps uploaded bytes in memory and returns URLs shaped like the HTTP
//! object store's, although nothing serves them.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::CoverImageUrl;
use crate::domain::ports::{CoverImageStore, CoverImageStoreError, CoverImageUpload};
use crate::outbound::object_storage::{object_key, object_url};

const LOCAL_PUBLIC_BASE: &str = "http://localhost:8080/covers";
const LOCAL_BUCKET: &str = "dev";

pub struct InMemoryCoverImageStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryCoverImageStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Bytes stored under `key`, if any.
    pub fn object(&self, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .ok()
            .and_then(|objects| objects.get(key).cloned())
    }

    pub fn len(&self) -> usize {
        self.objects.lock().map(|objects| objects.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CoverImageStore for InMemoryCoverImageStore {
    async fn upload(&self, upload: CoverImageUpload) -> Result<CoverImageUrl, CoverImageStoreError> {
        let key = object_key(self.clock.utc().timestamp_millis(), &upload.filename);
        let url = object_url(LOCAL_PUBLIC_BASE, LOCAL_BUCKET, &key);
        let cover = CoverImageUrl::new(&url)
            .map_err(|err| CoverImageStoreError::invalid_url(err.to_string()))?;
        self.objects
            .lock()
            .map_err(|_| CoverImageStoreError::transport("in-memory object store lock poisoned"))?
            .insert(key, upload.bytes);
        Ok(cover)
    }
}
