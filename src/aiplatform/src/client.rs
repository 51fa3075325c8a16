// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The clients for the `google.cloud.aiplatform.v1` service.

use crate::builder::model_service as builders;
use gaxi::api_header::{GAPIC, XGoogApiClient};
use gaxi::operations::OperationsClient;
use gaxi::transport::Transport;
use gaxi::wrapper::WrapperCache;
use std::sync::Arc;

/// A client for the model service.
///
/// The model service manages the machine learning models of a project. Use
/// [builder][ModelService::builder] to configure and create a client:
///
/// ```no_run
/// # use aiplatform_v1::client::ModelService;
/// # tokio_test::block_on(async {
/// let client = ModelService::builder().build().await?;
/// let model = client
///     .get_model()
///     .set_name("projects/my-project/locations/us-central1/models/my-model")
///     .send()
///     .await?;
/// println!("{}", model.display_name);
/// # Ok::<(), Box<dyn std::error::Error>>(()) });
/// ```
///
/// The client holds a connection pool internally and is cheap to clone. Both
/// wire formats, binary protobuf over gRPC and protobuf-JSON over HTTP,
/// expose the same surface; select one with
/// [with_transport_kind][gax::client_builder::ClientBuilder::with_transport_kind].
#[derive(Clone, Debug)]
pub struct ModelService {
    pub(crate) transport: Transport,
    pub(crate) wrappers: Arc<WrapperCache>,
}

impl ModelService {
    /// Returns a builder to configure and create a client.
    pub fn builder() -> builders::ClientBuilder {
        gax::client_builder::internal::new_builder(builders::client::Factory)
    }

    pub(crate) async fn new(
        config: gaxi::options::ClientConfig,
    ) -> gax::client_builder::Result<Self> {
        let transport = Transport::new(
            config,
            "aiplatform",
            XGoogApiClient {
                version: env!("CARGO_PKG_VERSION"),
                library_type: GAPIC,
            },
        )?;
        Ok(Self {
            transport,
            wrappers: Arc::new(WrapperCache::new()),
        })
    }

    /// Gets a model.
    pub fn get_model(&self) -> builders::GetModel {
        builders::GetModel::new(self.clone())
    }

    /// Lists the models in a location.
    pub fn list_models(&self) -> builders::ListModels {
        builders::ListModels::new(self.clone())
    }

    /// Uploads a model, returning a long-running operation.
    pub fn upload_model(&self) -> builders::UploadModel {
        builders::UploadModel::new(self.clone())
    }

    /// Deletes a model, returning a long-running operation.
    ///
    /// The model must have no versions deployed to an endpoint.
    pub fn delete_model(&self) -> builders::DeleteModel {
        builders::DeleteModel::new(self.clone())
    }

    /// Gets the latest state of a long-running operation.
    pub fn get_operation(&self) -> builders::GetOperation {
        builders::GetOperation::new(self.clone())
    }

    /// Starts asynchronous cancellation of a long-running operation.
    pub fn cancel_operation(&self) -> builders::CancelOperation {
        builders::CancelOperation::new(self.clone())
    }

    /// Closes the client.
    ///
    /// In-flight requests run to completion, new requests fail immediately.
    /// Closing is idempotent, and affects all the clones of this client.
    pub fn close(&self) {
        self.transport.close()
    }

    /// Returns true once [close][Self::close] has been called.
    pub fn is_closed(&self) -> bool {
        self.transport.is_closed()
    }

    pub(crate) fn operations(&self) -> OperationsClient {
        OperationsClient::new(self.transport.clone(), self.wrappers.clone())
    }
}
