#[cfg(test)]
use crate::core::error::{AppError, Result};
#[cfg(test)]
use crate::features::uploads::models::IncomingFile;
#[cfg(test)]
use crate::modules::storage::{ObjectStorage, StoredObject};

#[cfg(test)]
use async_trait::async_trait;
#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};
#[cfg(test)]
use std::sync::Mutex;

/// In-memory `ObjectStorage` that records every write attempt
#[cfg(test)]
pub struct InMemoryStorage {
    objects: Mutex<HashMap<String, (Vec<u8>, String)>>,
    put_calls: AtomicUsize,
    /// Writes whose key contains this fragment fail
    fail_on: Option<String>,
}

#[cfg(test)]
impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            put_calls: AtomicUsize::new(0),
            fail_on: None,
        }
    }

    pub fn failing_on(fragment: &str) -> Self {
        Self {
            fail_on: Some(fragment.to_string()),
            ..Self::new()
        }
    }

    pub fn put_count(&self) -> usize {
        self.put_calls.load(Ordering::SeqCst)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects.lock().unwrap().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn content_type_of(&self, key: &str) -> Option<String> {
        self.objects
            .lock()
            .unwrap()
            .get(key)
            .map(|(_, content_type)| content_type.clone())
    }

    pub fn url_for(&self, key: &str) -> String {
        format!("http://storage.test/shop/{}", key)
    }
}

#[cfg(test)]
#[async_trait]
impl ObjectStorage for InMemoryStorage {
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<StoredObject> {
        self.put_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(fragment) = &self.fail_on {
            if key.contains(fragment.as_str()) {
                return Err(AppError::StorageFailure(format!(
                    "simulated failure writing '{}'",
                    key
                )));
            }
        }

        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), (data, content_type.to_string()));

        Ok(StoredObject {
            key: key.to_string(),
            url: self.url_for(key),
        })
    }
}

/// Image payload of `size` bytes
#[cfg(test)]
pub fn image_file(name: &str, mime_type: &str, size: usize) -> IncomingFile {
    IncomingFile {
        bytes: vec![0xAB; size],
        declared_mime_type: mime_type.to_string(),
        original_name: name.to_string(),
        size_bytes: size as u64,
    }
}
