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

//! Request builders for the clients in this crate.
//!
//! Each method on a client returns a request builder. The builders collect
//! the request fields and per-request options, and [send][crate::builder::model_service::GetModel::send]
//! makes the call. All the builders implement
//! [RequestOptionsBuilder][gax::options::RequestOptionsBuilder], so
//! applications can override the retry policy, the attempt timeout, and the
//! other per-request settings.

pub mod model_service {
    use crate::client::ModelService;
    use crate::methods;
    use crate::model;
    use futures::FutureExt;
    use gax::Result;
    use gax::options::{RequestBuilder, RequestOptions};
    use gax::paginator::{ItemPaginator, Paginator};

    /// A builder for [ModelService][crate::client::ModelService].
    pub type ClientBuilder =
        gax::client_builder::ClientBuilder<client::Factory, auth::credentials::Credentials>;

    pub(crate) mod client {
        pub struct Factory;
        impl gax::client_builder::internal::ClientFactory for Factory {
            type Client = crate::client::ModelService;
            type Credentials = auth::credentials::Credentials;
            async fn build(
                self,
                config: gaxi::options::ClientConfig,
            ) -> gax::client_builder::Result<Self::Client> {
                Self::Client::new(config).await
            }
        }
    }

    /// The request builder for [ModelService::get_model][crate::client::ModelService::get_model].
    #[derive(Clone, Debug)]
    pub struct GetModel {
        client: ModelService,
        request: model::GetModelRequest,
        options: RequestOptions,
    }

    impl GetModel {
        pub(crate) fn new(client: ModelService) -> Self {
            Self {
                client,
                request: model::GetModelRequest::default(),
                options: RequestOptions::default(),
            }
        }

        /// Sets the resource name of the model.
        pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
            self.request = self.request.set_name(v);
            self
        }

        /// Sends the request.
        pub async fn send(self) -> Result<model::Model> {
            self.client
                .wrappers
                .get(&methods::GET_MODEL)
                .call(&self.client.transport, self.request, self.options)
                .await
        }
    }

    impl RequestBuilder for GetModel {
        fn request_options(&mut self) -> &mut RequestOptions {
            &mut self.options
        }
    }

    /// The request builder for [ModelService::list_models][crate::client::ModelService::list_models].
    #[derive(Clone, Debug)]
    pub struct ListModels {
        client: ModelService,
        request: model::ListModelsRequest,
        options: RequestOptions,
    }

    impl ListModels {
        pub(crate) fn new(client: ModelService) -> Self {
            Self {
                client,
                request: model::ListModelsRequest::default(),
                options: RequestOptions::default(),
            }
        }

        /// Sets the location to list models from.
        pub fn set_parent<T: Into<String>>(mut self, v: T) -> Self {
            self.request = self.request.set_parent(v);
            self
        }

        /// Sets the list filter.
        pub fn set_filter<T: Into<String>>(mut self, v: T) -> Self {
            self.request = self.request.set_filter(v);
            self
        }

        /// Sets the maximum number of models returned per page.
        pub fn set_page_size<T: Into<i32>>(mut self, v: T) -> Self {
            self.request = self.request.set_page_size(v);
            self
        }

        /// Sets the page token, resuming a previous listing.
        pub fn set_page_token<T: Into<String>>(mut self, v: T) -> Self {
            self.request = self.request.set_page_token(v);
            self
        }

        /// Sets the sort order.
        pub fn set_order_by<T: Into<String>>(mut self, v: T) -> Self {
            self.request = self.request.set_order_by(v);
            self
        }

        /// Sends the request, returning a single page.
        pub async fn send(self) -> Result<model::ListModelsResponse> {
            self.client
                .wrappers
                .get(&methods::LIST_MODELS)
                .call(&self.client.transport, self.request, self.options)
                .await
        }

        /// Streams the response pages.
        ///
        /// Each fetch reuses the builder's request with only the page token
        /// replaced, so the filter, the order, and the page size apply to
        /// every page.
        pub fn by_page(self) -> Paginator<model::ListModelsResponse, gax::error::Error> {
            let token = self.request.page_token.clone();
            let builder = self;
            let execute = move |token: String| {
                let mut builder = builder.clone();
                builder.request.page_token = token;
                builder.send()
            };
            Paginator::new(token, execute)
        }

        /// Streams the models across all the response pages.
        pub fn by_item(self) -> ItemPaginator<model::ListModelsResponse, gax::error::Error> {
            self.by_page().items()
        }
    }

    impl RequestBuilder for ListModels {
        fn request_options(&mut self) -> &mut RequestOptions {
            &mut self.options
        }
    }

    /// The request builder for [ModelService::upload_model][crate::client::ModelService::upload_model].
    #[derive(Clone, Debug)]
    pub struct UploadModel {
        client: ModelService,
        request: model::UploadModelRequest,
        options: RequestOptions,
    }

    impl UploadModel {
        pub(crate) fn new(client: ModelService) -> Self {
            Self {
                client,
                request: model::UploadModelRequest::default(),
                options: RequestOptions::default(),
            }
        }

        /// Sets the location into which to upload the model.
        pub fn set_parent<T: Into<String>>(mut self, v: T) -> Self {
            self.request = self.request.set_parent(v);
            self
        }

        /// Sets the model to upload.
        pub fn set_model<T: Into<model::Model>>(mut self, v: T) -> Self {
            self.request = self.request.set_model(v);
            self
        }

        /// Sets the ID for the uploaded model.
        pub fn set_model_id<T: Into<String>>(mut self, v: T) -> Self {
            self.request = self.request.set_model_id(v);
            self
        }

        /// Sets the service account the uploaded model runs as.
        pub fn set_service_account<T: Into<String>>(mut self, v: T) -> Self {
            self.request = self.request.set_service_account(v);
            self
        }

        /// Starts the operation and returns its raw envelope.
        ///
        /// Most applications use [poller][Self::poller] instead, which tracks
        /// the operation through to its typed result.
        pub async fn send(self) -> Result<longrunning::model::Operation> {
            self.client
                .wrappers
                .get(&methods::UPLOAD_MODEL)
                .call(&self.client.transport, self.request, self.options)
                .await
        }

        /// Starts the operation and returns a [Poller][lro::Poller] tracking
        /// it to completion.
        pub fn poller(
            self,
        ) -> impl lro::Poller<model::UploadModelResponse, model::UploadModelOperationMetadata>
        {
            type Operation =
                lro::Operation<model::UploadModelResponse, model::UploadModelOperationMetadata>;
            let polling_error_policy = self.client.transport.polling_error_policy(&self.options);
            let polling_backoff_policy =
                self.client.transport.polling_backoff_policy(&self.options);
            let client = self.client.clone();
            let options = self.options.clone();
            // The polling futures are boxed, they capture owned clones of the
            // client and outlive this builder.
            let query = {
                let client = client.clone();
                let options = options.clone();
                move |name: String| {
                    let client = client.clone();
                    let options = options.clone();
                    async move {
                        let request =
                            longrunning::model::GetOperationRequest::default().set_name(name);
                        let operation = client.operations().get_operation(request, options).await?;
                        Ok(Operation::new(operation))
                    }
                    .boxed()
                }
            };
            let cancel = move |name: String| {
                let client = client.clone();
                let options = options.clone();
                async move {
                    let request =
                        longrunning::model::CancelOperationRequest::default().set_name(name);
                    client.operations().cancel_operation(request, options).await?;
                    Ok(())
                }
                .boxed()
            };
            let start = move || {
                async move {
                    let operation = self.send().await?;
                    Ok(Operation::new(operation))
                }
                .boxed()
            };
            lro::new_poller(
                polling_error_policy,
                polling_backoff_policy,
                start,
                query,
                cancel,
            )
        }
    }

    impl RequestBuilder for UploadModel {
        fn request_options(&mut self) -> &mut RequestOptions {
            &mut self.options
        }
    }

    /// The request builder for [ModelService::delete_model][crate::client::ModelService::delete_model].
    #[derive(Clone, Debug)]
    pub struct DeleteModel {
        client: ModelService,
        request: model::DeleteModelRequest,
        options: RequestOptions,
    }

    impl DeleteModel {
        pub(crate) fn new(client: ModelService) -> Self {
            Self {
                client,
                request: model::DeleteModelRequest::default(),
                options: RequestOptions::default(),
            }
        }

        /// Sets the resource name of the model to delete.
        pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
            self.request = self.request.set_name(v);
            self
        }

        /// Starts the operation and returns its raw envelope.
        pub async fn send(self) -> Result<longrunning::model::Operation> {
            self.client
                .wrappers
                .get(&methods::DELETE_MODEL)
                .call(&self.client.transport, self.request, self.options)
                .await
        }

        /// Starts the operation and returns a [Poller][lro::Poller] tracking
        /// it to completion. Deletions have no response payload, the poller
        /// completes with [wkt::Empty].
        pub fn poller(self) -> impl lro::Poller<wkt::Empty, model::DeleteOperationMetadata> {
            type Operation = lro::Operation<wkt::Empty, model::DeleteOperationMetadata>;
            let polling_error_policy = self.client.transport.polling_error_policy(&self.options);
            let polling_backoff_policy =
                self.client.transport.polling_backoff_policy(&self.options);
            let client = self.client.clone();
            let options = self.options.clone();
            let query = {
                let client = client.clone();
                let options = options.clone();
                move |name: String| {
                    let client = client.clone();
                    let options = options.clone();
                    async move {
                        let request =
                            longrunning::model::GetOperationRequest::default().set_name(name);
                        let operation = client.operations().get_operation(request, options).await?;
                        Ok(Operation::new(operation))
                    }
                    .boxed()
                }
            };
            let cancel = move |name: String| {
                let client = client.clone();
                let options = options.clone();
                async move {
                    let request =
                        longrunning::model::CancelOperationRequest::default().set_name(name);
                    client.operations().cancel_operation(request, options).await?;
                    Ok(())
                }
                .boxed()
            };
            let start = move || {
                async move {
                    let operation = self.send().await?;
                    Ok(Operation::new(operation))
                }
                .boxed()
            };
            lro::new_poller(
                polling_error_policy,
                polling_backoff_policy,
                start,
                query,
                cancel,
            )
        }
    }

    impl RequestBuilder for DeleteModel {
        fn request_options(&mut self) -> &mut RequestOptions {
            &mut self.options
        }
    }

    /// The request builder for [ModelService::get_operation][crate::client::ModelService::get_operation].
    #[derive(Clone, Debug)]
    pub struct GetOperation {
        client: ModelService,
        request: longrunning::model::GetOperationRequest,
        options: RequestOptions,
    }

    impl GetOperation {
        pub(crate) fn new(client: ModelService) -> Self {
            Self {
                client,
                request: longrunning::model::GetOperationRequest::default(),
                options: RequestOptions::default(),
            }
        }

        /// Sets the name of the operation resource.
        pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
            self.request = self.request.set_name(v);
            self
        }

        /// Sends the request.
        pub async fn send(self) -> Result<longrunning::model::Operation> {
            self.client
                .operations()
                .get_operation(self.request, self.options)
                .await
        }
    }

    impl RequestBuilder for GetOperation {
        fn request_options(&mut self) -> &mut RequestOptions {
            &mut self.options
        }
    }

    /// The request builder for [ModelService::cancel_operation][crate::client::ModelService::cancel_operation].
    #[derive(Clone, Debug)]
    pub struct CancelOperation {
        client: ModelService,
        request: longrunning::model::CancelOperationRequest,
        options: RequestOptions,
    }

    impl CancelOperation {
        pub(crate) fn new(client: ModelService) -> Self {
            Self {
                client,
                request: longrunning::model::CancelOperationRequest::default(),
                options: RequestOptions::default(),
            }
        }

        /// Sets the name of the operation resource to cancel.
        pub fn set_name<T: Into<String>>(mut self, v: T) -> Self {
            self.request = self.request.set_name(v);
            self
        }

        /// Sends the request.
        ///
        /// Cancellation is best effort. The operation may still complete,
        /// poll it to learn its final disposition.
        pub async fn send(self) -> Result<wkt::Empty> {
            self.client
                .operations()
                .cancel_operation(self.request, self.options)
                .await
        }
    }

    impl RequestBuilder for CancelOperation {
        fn request_options(&mut self) -> &mut RequestOptions {
            &mut self.options
        }
    }
}
