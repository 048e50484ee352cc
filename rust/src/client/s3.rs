// Copyright (c) 2025 ADBC Drivers Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! [`ObjectStore`] over `aws-sdk-s3`.

use crate::client::{ObjectListing, ObjectStore};
use crate::error::{Error, Result};
use async_trait::async_trait;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::types::{Delete, ObjectIdentifier};
use aws_sdk_s3::Client;
use tracing::debug;

/// S3 client backed by the AWS SDK.
#[derive(Debug, Clone)]
pub struct AwsS3Client {
    client: Client,
}

impl AwsS3Client {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_conf(config: &aws_config::SdkConfig) -> Self {
        Self::new(Client::new(config))
    }
}

fn store_error<E, R>(op: &str, err: SdkError<E, R>) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let code = match &err {
        SdkError::ServiceError(e) => e.err().code().unwrap_or("UnknownServiceError"),
        SdkError::TimeoutError(_) => "TimeoutError",
        SdkError::DispatchFailure(_) => "DispatchFailure",
        _ => "UnknownError",
    }
    .to_string();
    Error::object_store(code, format!("{}: {}", op, DisplayErrorContext(&err)))
}

#[async_trait]
impl ObjectStore for AwsS3Client {
    async fn list_objects(
        &self,
        bucket: &str,
        prefix: &str,
        continuation_token: Option<&str>,
    ) -> Result<ObjectListing> {
        let resp = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .prefix(prefix)
            .set_continuation_token(continuation_token.map(str::to_string))
            .send()
            .await
            .map_err(|e| store_error("ListObjectsV2", e))?;

        Ok(ObjectListing {
            keys: resp
                .contents()
                .iter()
                .filter_map(|object| object.key().map(str::to_string))
                .collect(),
            next_continuation_token: resp.next_continuation_token().map(str::to_string),
        })
    }

    async fn delete_objects(&self, bucket: &str, keys: &[String]) -> Result<()> {
        if keys.is_empty() {
            return Ok(());
        }

        let objects = keys
            .iter()
            .map(|key| ObjectIdentifier::builder().key(key).build())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::object_store("InvalidRequest", e.to_string()))?;
        let delete = Delete::builder()
            .set_objects(Some(objects))
            .quiet(true)
            .build()
            .map_err(|e| Error::object_store("InvalidRequest", e.to_string()))?;

        let resp = self
            .client
            .delete_objects()
            .bucket(bucket)
            .delete(delete)
            .send()
            .await
            .map_err(|e| store_error("DeleteObjects", e))?;

        // Quiet mode only reports failures.
        if let Some(failed) = resp.errors().first() {
            return Err(Error::object_store(
                failed.code().unwrap_or("UnknownError"),
                format!(
                    "DeleteObjects failed for s3://{}/{}: {} ({} keys failed)",
                    bucket,
                    failed.key().unwrap_or_default(),
                    failed.message().unwrap_or_default(),
                    resp.errors().len()
                ),
            ));
        }

        debug!("Deleted {} objects from bucket {}", keys.len(), bucket);
        Ok(())
    }
}
