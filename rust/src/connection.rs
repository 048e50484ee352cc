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

//! Per-unit-of-work connection context.
//!
//! A [`ConnectionContext`] bundles the credentials, the Glue and S3 clients
//! and the runtime used to drive them. Every operation of the adapter takes
//! one explicitly; it is never stored in a global. One build thread owns one
//! context, and all remote calls made through it run serially.

use crate::client::{AwsGlueClient, AwsS3Client, GlueClient, ObjectStore};
use crate::config::AthenaCredentials;
use crate::error::{Error, Result};
use crate::logging::init_logging;
use aws_config::{BehaviorVersion, Region};
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::{Handle as RuntimeHandle, Runtime};
use tracing::debug;

pub struct ConnectionContext {
    credentials: AthenaCredentials,
    glue: Arc<dyn GlueClient>,
    object_store: Arc<dyn ObjectStore>,
    runtime: RuntimeHandle,
    // Present when the context created its own runtime in `connect`.
    _owned_runtime: Option<Runtime>,
}

impl std::fmt::Debug for ConnectionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionContext")
            .field("database", &self.credentials.database)
            .field("schema", &self.credentials.schema)
            .field("glue", &self.glue)
            .field("object_store", &self.object_store)
            .finish()
    }
}

impl ConnectionContext {
    /// Build a context from existing clients and a runtime handle.
    ///
    /// The handle must not belong to the calling thread's runtime: remote
    /// calls are driven with `block_on`.
    pub fn new(
        credentials: AthenaCredentials,
        glue: Arc<dyn GlueClient>,
        object_store: Arc<dyn ObjectStore>,
        runtime: RuntimeHandle,
    ) -> Self {
        Self {
            credentials,
            glue,
            object_store,
            runtime,
            _owned_runtime: None,
        }
    }

    /// Open a context backed by the AWS SDK.
    ///
    /// Loads the default AWS configuration, honouring `region_name` and
    /// `aws_profile_name`, and initializes logging from the credentials.
    pub fn connect(credentials: AthenaCredentials) -> Result<Self> {
        init_logging(&credentials.log_config());

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create runtime: {}", e)))?;

        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(ref region) = credentials.region_name {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(ref profile) = credentials.aws_profile_name {
            loader = loader.profile_name(profile);
        }
        let sdk_config = runtime.block_on(loader.load());

        debug!(
            "Connected to Glue catalog {} (region={:?}, profile={:?})",
            credentials.database, credentials.region_name, credentials.aws_profile_name
        );

        let handle = runtime.handle().clone();
        Ok(Self {
            credentials,
            glue: Arc::new(AwsGlueClient::from_conf(&sdk_config)),
            object_store: Arc::new(AwsS3Client::from_conf(&sdk_config)),
            runtime: handle,
            _owned_runtime: Some(runtime),
        })
    }

    pub fn credentials(&self) -> &AthenaCredentials {
        &self.credentials
    }

    pub fn glue(&self) -> &Arc<dyn GlueClient> {
        &self.glue
    }

    pub fn object_store(&self) -> &Arc<dyn ObjectStore> {
        &self.object_store
    }

    /// Run a remote call to completion on the context's runtime.
    pub(crate) fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}
