use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

use crate::media::application::ports::outgoing::{ObjectStore, ObjectStoreError};

/// google-cloud-storage addresses buckets as `projects/_/buckets/{bucket}`.
fn bucket_resource(bucket: &str) -> String {
    format!("projects/_/buckets/{}", bucket)
}

fn map_gcs_error(msg: &str) -> ObjectStoreError {
    let m = msg.to_lowercase();

    if m.contains("permission") || m.contains("forbidden") || m.contains("denied") {
        ObjectStoreError::AccessDenied
    } else if m.contains("bucket") && (m.contains("not found") || m.contains("404")) {
        ObjectStoreError::BucketNotFound
    } else if m.contains("404") || m.contains("not found") || m.contains("no such object") {
        ObjectStoreError::ObjectNotFound
    } else if m.contains("invalid") || m.contains("config") {
        ObjectStoreError::Configuration
    } else {
        ObjectStoreError::Infrastructure(msg.to_string())
    }
}

/// Seam over the google-cloud-storage client so the adapter can be tested
/// without network access.
#[async_trait]
trait GcsClient: Send + Sync {
    async fn write_object(
        &self,
        bucket_resource: &str,
        object_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), String>;

    async fn delete_object(&self, bucket_resource: &str, object_name: &str) -> Result<(), String>;

    async fn sign_put_url(
        &self,
        bucket_resource: &str,
        object_name: &str,
        content_type: &str,
        ttl: Duration,
    ) -> Result<String, String>;
}

#[cfg(test)]
struct ArcGcsClient(Arc<dyn GcsClient>);

#[cfg(test)]
#[async_trait]
impl GcsClient for ArcGcsClient {
    async fn write_object(
        &self,
        bucket_resource: &str,
        object_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), String> {
        self.0
            .write_object(bucket_resource, object_name, bytes, content_type)
            .await
    }

    async fn delete_object(&self, bucket_resource: &str, object_name: &str) -> Result<(), String> {
        self.0.delete_object(bucket_resource, object_name).await
    }

    async fn sign_put_url(
        &self,
        bucket_resource: &str,
        object_name: &str,
        content_type: &str,
        ttl: Duration,
    ) -> Result<String, String> {
        self.0
            .sign_put_url(bucket_resource, object_name, content_type, ttl)
            .await
    }
}

/// Process-wide object store. Cloning shares the lazily built client.
#[derive(Clone)]
pub struct GcsObjectStore {
    client: Arc<OnceCell<Box<dyn GcsClient>>>,
    timeout: Duration,
}

impl GcsObjectStore {
    /// The client is built on first use.
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: Arc::new(OnceCell::new()),
            timeout,
        }
    }

    async fn get_client(&self) -> Result<&dyn GcsClient, ObjectStoreError> {
        self.client
            .get_or_try_init(|| async {
                let real_client = RealGcsClient::new().await?;
                Ok::<_, Box<dyn std::error::Error + Send + Sync>>(
                    Box::new(real_client) as Box<dyn GcsClient>
                )
            })
            .await
            .map(|boxed| &**boxed)
            .map_err(|e| {
                tracing::error!(error = %e, "GCS client initialization failed");
                ObjectStoreError::Configuration
            })
    }

    async fn bounded<T, F>(&self, call: F) -> Result<T, ObjectStoreError>
    where
        F: Future<Output = Result<T, String>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result.map_err(|e| map_gcs_error(&e)),
            Err(_) => Err(ObjectStoreError::Timeout(self.timeout)),
        }
    }

    #[cfg(test)]
    fn with_client(client: Arc<dyn GcsClient>, timeout: Duration) -> Self {
        let once = OnceCell::new();
        let _ = once.set(Box::new(ArcGcsClient(client)) as Box<dyn GcsClient>);

        Self {
            client: Arc::new(once),
            timeout,
        }
    }
}

#[async_trait]
impl ObjectStore for GcsObjectStore {
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ObjectStoreError> {
        let client = self.get_client().await?;
        let bucket_res = bucket_resource(bucket);
        let size = bytes.len();

        self.bounded(client.write_object(&bucket_res, key, bytes, content_type))
            .await
            .inspect(|_| tracing::debug!(bucket, key, size, "Object stored"))
    }

    async fn remove(&self, bucket: &str, keys: &[String]) -> Result<(), ObjectStoreError> {
        let client = self.get_client().await?;
        let bucket_res = bucket_resource(bucket);

        for key in keys {
            self.bounded(client.delete_object(&bucket_res, key)).await?;
        }
        Ok(())
    }

    async fn sign_upload_url(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        ttl: Duration,
    ) -> Result<String, ObjectStoreError> {
        let client = self.get_client().await?;
        let bucket_res = bucket_resource(bucket);

        self.bounded(client.sign_put_url(&bucket_res, key, content_type, ttl))
            .await
    }
}

// Real Google Cloud Storage client (google-cloud-storage)

struct RealGcsClient {
    storage: google_cloud_storage::client::Storage,
    control: google_cloud_storage::client::StorageControl,
    signer: google_cloud_auth::signer::Signer,
}

impl RealGcsClient {
    async fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        tracing::info!("Initializing GCS client...");

        let storage = google_cloud_storage::client::Storage::builder()
            .build()
            .await
            .map_err(|e| {
                tracing::error!("Failed to build GCS storage client: {:?}", e);
                e
            })?;

        let control = google_cloud_storage::client::StorageControl::builder()
            .build()
            .await
            .map_err(|e| {
                tracing::error!("Failed to build GCS control client: {:?}", e);
                e
            })?;

        let signer = google_cloud_auth::credentials::Builder::default()
            .build_signer()
            .map_err(|e| {
                tracing::error!("Failed to build GCS signer: {:?}", e);
                if e.to_string().contains("authorized_user") {
                    tracing::error!(
                        "Signed URLs require a service account key. \
                         Set GOOGLE_APPLICATION_CREDENTIALS to a service-account JSON (type=service_account)."
                    );
                }
                e
            })?;

        tracing::info!("GCS client ready");

        Ok(Self {
            storage,
            control,
            signer,
        })
    }
}

#[async_trait]
impl GcsClient for RealGcsClient {
    async fn write_object(
        &self,
        bucket_resource: &str,
        object_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), String> {
        self.storage
            .write_object(
                bucket_resource.to_string(),
                object_name.to_string(),
                bytes::Bytes::from(bytes),
            )
            .set_content_type(content_type.to_string())
            .send_buffered()
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }

    async fn delete_object(&self, bucket_resource: &str, object_name: &str) -> Result<(), String> {
        self.control
            .delete_object()
            .set_bucket(bucket_resource.to_string())
            .set_object(object_name.to_string())
            .send()
            .await
            .map_err(|e| e.to_string())
    }

    async fn sign_put_url(
        &self,
        bucket_resource: &str,
        object_name: &str,
        content_type: &str,
        ttl: Duration,
    ) -> Result<String, String> {
        google_cloud_storage::builder::storage::SignedUrlBuilder::for_object(
            bucket_resource.to_string(),
            object_name.to_string(),
        )
        .with_method(google_cloud_storage::http::Method::PUT)
        .with_header("content-type", content_type.to_string())
        .with_expiration(ttl)
        .sign_with(&self.signer)
        .await
        .map_err(|e| e.to_string())
    }
}
