use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::{Error, Result};
use uuid::Uuid;

/// Maximum number of summaries returned by a status listing
pub const SUMMARY_LIMIT: usize = 100;

/// Maximum number of status checks returned by a listing
pub const STATUS_CHECK_LIMIT: usize = 1000;

/// Upper bound on either half of a cache key, in bytes
pub const MAX_KEY_PART_BYTES: usize = 256;

/// Resource type used for spreadsheet tabs
pub const SHEET_RESOURCE: &str = "sheet";

/// Resource type used for drive folder listings
pub const DRIVE_FOLDER_RESOURCE: &str = "drive_folder";

/// Composite key of a cache entry.
///
/// Both parts are validated on construction: non-empty, at most
/// [`MAX_KEY_PART_BYTES`] long and free of NUL bytes. NUL separates the two
/// parts in the storage encoding, which keeps `("a", "bc")` and `("ab", "c")`
/// distinct.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey {
    resource_type: String,
    resource_id: String,
}

impl CacheKey {
    const SEPARATOR: u8 = 0;

    pub fn new(resource_type: impl Into<String>, resource_id: impl Into<String>) -> Result<Self> {
        let resource_type = resource_type.into();
        let resource_id = resource_id.into();

        validate_part("resource_type", &resource_type)?;
        validate_part("resource_id", &resource_id)?;

        Ok(Self {
            resource_type,
            resource_id,
        })
    }

    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    /// Byte encoding used as the key in ordered stores
    pub fn storage_key(&self) -> Vec<u8> {
        let mut key = Vec::with_capacity(self.resource_type.len() + self.resource_id.len() + 1);
        key.extend_from_slice(self.resource_type.as_bytes());
        key.push(Self::SEPARATOR);
        key.extend_from_slice(self.resource_id.as_bytes());
        key
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.resource_type, self.resource_id)
    }
}

fn validate_part(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidKey {
            field,
            reason: "must not be empty",
        });
    }

    if value.len() > MAX_KEY_PART_BYTES {
        return Err(Error::InvalidKey {
            field,
            reason: "must be at most 256 bytes",
        });
    }

    if value.as_bytes().contains(&CacheKey::SEPARATOR) {
        return Err(Error::InvalidKey {
            field,
            reason: "must not contain NUL characters",
        });
    }

    Ok(())
}

/// A stored payload together with its key and last write time
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub resource_type: String,
    pub resource_id: String,
    pub data: Value,
    pub cached_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Stamp a payload with the current time
    pub fn new(key: &CacheKey, data: Value) -> Self {
        Self {
            resource_type: key.resource_type.clone(),
            resource_id: key.resource_id.clone(),
            data,
            cached_at: Utc::now(),
        }
    }

    pub fn summary(&self) -> CacheSummary {
        CacheSummary {
            resource_type: self.resource_type.clone(),
            resource_id: self.resource_id.clone(),
            cached_at: self.cached_at,
        }
    }
}

/// Key and write time of an entry, without its payload.
///
/// Deserializing a stored [`CacheEntry`] into this type skips `data`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSummary {
    pub resource_type: String,
    pub resource_id: String,
    pub cached_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCheck {
    pub id: String,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}

impl StatusCheck {
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            client_name: client_name.into(),
            timestamp: Utc::now(),
        }
    }
}
