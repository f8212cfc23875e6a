#![allow(missing_docs)]

use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::{
    config::{Builder as S3ConfigBuilder, Region},
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    operation::get_object::GetObjectError,
    Client,
};
use std::path::Path;
use tokio::fs;
use tokio::runtime::{Builder as RuntimeBuilder, Runtime};
use tracing::debug;

use crate::config::S3StoreConfig;
use crate::error::StoreError;
use crate::store::ObjectStore;

/// Blocking S3 client.
///
/// The AWS SDK is async; each call is driven to completion on a private
/// current-thread runtime, so `download` must not be called from inside
/// another tokio runtime. The same holds for dropping the client: tokio
/// panics when a runtime is dropped in an async context, so create and drop
/// it on a blocking thread (e.g. inside `spawn_blocking`).
pub struct S3StoreClient {
    client: Client,
    runtime: Runtime,
    config: S3StoreConfig,
}

impl S3StoreClient {
    pub fn new(config: S3StoreConfig) -> Result<Self, StoreError> {
        debug!("Creating S3 store client for region: {}", config.region);

        let credentials = Credentials::new(
            &config.access_key_id,
            &config.secret_access_key,
            config.session_token.clone(),
            None,
            "elizaos-s3-pdf",
        );

        let mut s3_config = S3ConfigBuilder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .force_path_style(config.force_path_style);

        if let Some(ref endpoint) = config.endpoint {
            s3_config = s3_config.endpoint_url(endpoint);
        }

        let client = Client::from_conf(s3_config.build());

        let runtime = RuntimeBuilder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| StoreError::config(format!("Failed to create runtime: {e}")))?;

        Ok(Self {
            client,
            runtime,
            config,
        })
    }

    pub fn from_env() -> Result<Self, StoreError> {
        Self::new(S3StoreConfig::from_env()?)
    }

    pub fn config(&self) -> &S3StoreConfig {
        &self.config
    }

    async fn fetch_to_file(&self, bucket: &str, key: &str, destination: &Path) -> Result<(), StoreError> {
        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| map_get_object_error(e, bucket, key))?;

        let bytes = response
            .body
            .collect()
            .await
            .map_err(|e| StoreError::aws(e.to_string()))?
            .into_bytes();

        debug!("Writing {} bytes to {}", bytes.len(), destination.display());
        fs::write(destination, bytes).await?;

        Ok(())
    }
}

impl ObjectStore for S3StoreClient {
    fn download(&self, bucket: &str, key: &str, destination: &Path) -> Result<(), StoreError> {
        debug!(
            "Downloading s3://{}/{} to {}",
            bucket,
            key,
            destination.display()
        );
        self.runtime
            .block_on(self.fetch_to_file(bucket, key, destination))
    }
}

fn map_get_object_error(err: SdkError<GetObjectError>, bucket: &str, key: &str) -> StoreError {
    if let Some(service_error) = err.as_service_error() {
        if service_error.is_no_such_key() || service_error.code() == Some("NotFound") {
            return StoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            };
        }
        if service_error.code() == Some("AccessDenied") {
            return StoreError::AccessDenied {
                bucket: bucket.to_string(),
                key: key.to_string(),
            };
        }
    }
    StoreError::aws(DisplayErrorContext(&err).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::error::ErrorMetadata;
    use aws_sdk_s3::types::error::NoSuchKey;
    use aws_smithy_runtime_api::http::{Response, StatusCode};
    use aws_smithy_types::body::SdkBody;

    fn service_error(err: GetObjectError, status: u16) -> SdkError<GetObjectError> {
        let status = StatusCode::try_from(status).unwrap();
        SdkError::service_error(err, Response::new(status, SdkBody::empty()))
    }

    fn with_code(code: &str) -> GetObjectError {
        GetObjectError::generic(ErrorMetadata::builder().code(code).message("failed").build())
    }

    #[test]
    fn test_no_such_key_maps_to_not_found() {
        let err = service_error(GetObjectError::NoSuchKey(NoSuchKey::builder().build()), 404);
        match map_get_object_error(err, "b", "k") {
            StoreError::NotFound { bucket, key } => {
                assert_eq!(bucket, "b");
                assert_eq!(key, "k");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_not_found_code_maps_to_not_found() {
        let err = service_error(with_code("NotFound"), 404);
        assert!(matches!(
            map_get_object_error(err, "b", "k"),
            StoreError::NotFound { .. }
        ));
    }

    #[test]
    fn test_access_denied_code_maps_to_access_denied() {
        let err = service_error(with_code("AccessDenied"), 403);
        match map_get_object_error(err, "b", "k") {
            StoreError::AccessDenied { bucket, key } => {
                assert_eq!(bucket, "b");
                assert_eq!(key, "k");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_other_service_errors_map_to_aws_error() {
        let err = service_error(with_code("InternalError"), 500);
        assert!(matches!(
            map_get_object_error(err, "b", "k"),
            StoreError::AwsError { .. }
        ));
    }

    #[test]
    fn test_transport_errors_map_to_aws_error() {
        let err: SdkError<GetObjectError> = SdkError::timeout_error("timed out");
        assert!(matches!(
            map_get_object_error(err, "b", "k"),
            StoreError::AwsError { .. }
        ));
    }
}
