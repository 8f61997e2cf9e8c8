use std::time::Duration;

/// Where uploads land and how long the application waits on the object store.
#[derive(Debug, Clone)]
pub struct StoragePolicy {
    pub bucket_name: String,
    pub direct_upload_ttl: Duration,
    pub store_timeout: Duration,
}

impl StoragePolicy {
    pub const DEFAULT_BUCKET_NAME: &'static str = "wellness-media-assets";
    pub const DEFAULT_DIRECT_UPLOAD_TTL_SECS: u64 = 15 * 60;
    pub const DEFAULT_STORE_TIMEOUT_SECS: u64 = 30;

    /// Reads `MEDIA_BUCKET`, `DIRECT_UPLOAD_TTL_SECS` and `STORAGE_TIMEOUT_SECS`,
    /// falling back to defaults when unset or unparsable.
    pub fn from_env() -> Self {
        let bucket_name = std::env::var("MEDIA_BUCKET")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_BUCKET_NAME.to_string());

        let direct_upload_ttl = Self::secs_from_env(
            "DIRECT_UPLOAD_TTL_SECS",
            Self::DEFAULT_DIRECT_UPLOAD_TTL_SECS,
        );
        let store_timeout =
            Self::secs_from_env("STORAGE_TIMEOUT_SECS", Self::DEFAULT_STORE_TIMEOUT_SECS);

        Self {
            bucket_name,
            direct_upload_ttl,
            store_timeout,
        }
    }

    pub fn new(bucket_name: impl Into<String>) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            direct_upload_ttl: Duration::from_secs(Self::DEFAULT_DIRECT_UPLOAD_TTL_SECS),
            store_timeout: Duration::from_secs(Self::DEFAULT_STORE_TIMEOUT_SECS),
        }
    }

    fn secs_from_env(key: &str, default: u64) -> Duration {
        let secs = std::env::var(key)
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(default);
        Duration::from_secs(secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_defaults() {
        let policy = StoragePolicy::new("bucket-a");
        assert_eq!(policy.bucket_name, "bucket-a");
        assert_eq!(policy.direct_upload_ttl, Duration::from_secs(900));
        assert_eq!(policy.store_timeout, Duration::from_secs(30));
    }
}
