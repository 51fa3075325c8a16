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

//! Method wrappers and their cache.
//!
//! Each client caches one wrapper per method, constructed on first use. A
//! wrapper composes the per-call machinery around the transport: interceptor
//! hooks, routing headers, idempotency and timeout defaults, and the retry
//! loop. Interceptors run once per logical call, a retried request is
//! observed exactly once.

use crate::routing::{ROUTING_PARAMS_HEADER, format_params};
use crate::transport::Transport;
use gax::Result;
use gax::error::Error;
use gax::interceptor::CallContext;
use gax::method::MethodDescriptor;
use gax::options::RequestOptions;
use gax::retry_loop::{effective_timeout, retry_loop};
use http::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use std::any::Any;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A lazily constructed cache of method wrappers, keyed by method name.
#[derive(Debug, Default)]
pub struct WrapperCache {
    wrappers: Mutex<HashMap<&'static str, Arc<dyn Any + Send + Sync>>>,
    constructed: AtomicUsize,
}

impl WrapperCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the wrapper for `desc`, constructing it on first use.
    ///
    /// Construction happens under the cache lock, so concurrent first uses
    /// of the same method construct the wrapper exactly once.
    pub fn get<Req, Resp>(
        &self,
        desc: &'static MethodDescriptor<Req, Resp>,
    ) -> Arc<WrappedMethod<Req, Resp>>
    where
        Req: Send + Sync + 'static,
        Resp: Send + Sync + 'static,
    {
        let mut wrappers = self
            .wrappers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let entry = wrappers.entry(desc.name).or_insert_with(|| {
            self.constructed.fetch_add(1, Ordering::SeqCst);
            Arc::new(WrappedMethod { desc })
        });
        entry
            .clone()
            .downcast::<WrappedMethod<Req, Resp>>()
            .expect("cache entries are keyed by method name")
    }

    /// The number of wrappers constructed so far.
    pub fn constructed(&self) -> usize {
        self.constructed.load(Ordering::SeqCst)
    }
}

/// A method descriptor bound to the call machinery.
#[derive(Debug)]
pub struct WrappedMethod<Req: 'static, Resp: 'static> {
    desc: &'static MethodDescriptor<Req, Resp>,
}

impl<Req, Resp> WrappedMethod<Req, Resp>
where
    Req: prost::Message + Clone + Send + Sync + 'static,
    Resp: prost::Message + DeserializeOwned + Default + Send + Sync + 'static,
{
    /// Makes one logical call.
    ///
    /// The interceptor hooks run outside the retry loop. The routing header
    /// is computed after the pre-call hook, so interceptors that mutate the
    /// request see their changes reflected in the routing.
    pub async fn call(
        &self,
        transport: &Transport,
        mut request: Req,
        options: RequestOptions,
    ) -> Result<Resp> {
        let chain = transport.interceptors();
        let mut metadata = HeaderMap::new();
        if !chain.is_empty() {
            let mut ctx = CallContext {
                metadata: &mut metadata,
                request: &mut request,
            };
            chain.before_rpc(self.desc.name, &mut ctx);
        }
        let params = self.desc.routing_params(&request);
        if !params.is_empty() {
            let value = format_params(&params);
            metadata.insert(
                ROUTING_PARAMS_HEADER,
                HeaderValue::from_str(&value).map_err(Error::ser)?,
            );
        }
        let options = options.set_default_idempotency(self.desc.idempotent);
        let attempt_timeout = options.attempt_timeout().or(self.desc.default_timeout);
        let retry_policy = options
            .retry_policy()
            .clone()
            .or_else(|| transport.retry_policy())
            .or_else(|| self.desc.default_retry_policy());
        let mut response = match retry_policy {
            None => {
                transport
                    .unary(self.desc, request, metadata, attempt_timeout)
                    .await?
            }
            Some(retry_policy) => {
                let idempotent = options.idempotent().unwrap_or(false);
                let backoff_policy = transport.backoff_policy(&options);
                let desc = self.desc;
                let inner = move |remaining_time: Option<std::time::Duration>| {
                    let request = request.clone();
                    let metadata = metadata.clone();
                    async move {
                        transport
                            .unary(
                                desc,
                                request,
                                metadata,
                                effective_timeout(remaining_time, attempt_timeout),
                            )
                            .await
                    }
                };
                let sleep = |d| tokio::time::sleep(d);
                retry_loop(inner, sleep, idempotent, retry_policy, backoff_policy).await?
            }
        };
        if !chain.is_empty() {
            chain.after_rpc(self.desc.name, &mut response);
        }
        Ok(response)
    }
}
