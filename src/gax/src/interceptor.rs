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

//! Hooks invoked before and after each RPC.
//!
//! Applications can register interceptors to observe or mutate requests,
//! request metadata, and responses. Interceptors run once per logical call,
//! outside any retry loop, so a retried request is observed exactly once.

use http::HeaderMap;
use std::any::Any;
use std::sync::Arc;

/// The mutable state an interceptor may inspect or change before the RPC is
/// sent.
///
/// The request is type-erased so a single interceptor can be registered with
/// clients that call many different methods. Interceptors interested in one
/// request type can downcast:
///
/// ```
/// # use aiplatform_gax::interceptor::{CallContext, Interceptor};
/// #[derive(Debug)]
/// struct RedactName;
/// impl Interceptor for RedactName {
///     fn before_rpc(&self, _method: &str, ctx: &mut CallContext) {
///         if let Some(req) = ctx.request.downcast_mut::<String>() {
///             req.clear();
///         }
///     }
/// }
/// ```
pub struct CallContext<'a> {
    /// The metadata (headers) that will be sent with the request.
    pub metadata: &'a mut HeaderMap,
    /// The request message.
    pub request: &'a mut dyn Any,
}

/// Observes and optionally mutates RPCs.
///
/// Both hooks have no-op default implementations, implementations override
/// only the hooks they need.
pub trait Interceptor: Send + Sync + std::fmt::Debug {
    /// Called before the RPC is sent, with the method name and the mutable
    /// call state.
    fn before_rpc(&self, _method: &str, _ctx: &mut CallContext) {}

    /// Called after a successful RPC, with the method name and the mutable,
    /// type-erased response.
    fn after_rpc(&self, _method: &str, _response: &mut dyn Any) {}
}

/// An ordered collection of interceptors.
///
/// An empty chain is a pass-through. The `before_rpc` hooks run in
/// registration order, the `after_rpc` hooks run in reverse order.
#[derive(Clone, Debug, Default)]
pub struct InterceptorChain {
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl InterceptorChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an interceptor to the chain.
    pub fn push(&mut self, interceptor: Arc<dyn Interceptor>) {
        self.interceptors.push(interceptor);
    }

    /// Returns true if no interceptors are registered.
    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Runs the `before_rpc` hooks in registration order.
    pub fn before_rpc(&self, method: &str, ctx: &mut CallContext) {
        for interceptor in self.interceptors.iter() {
            interceptor.before_rpc(method, ctx);
        }
    }

    /// Runs the `after_rpc` hooks in reverse registration order.
    pub fn after_rpc(&self, method: &str, response: &mut dyn Any) {
        for interceptor in self.interceptors.iter().rev() {
            interceptor.after_rpc(method, response);
        }
    }
}

impl FromIterator<Arc<dyn Interceptor>> for InterceptorChain {
    fn from_iter<T: IntoIterator<Item = Arc<dyn Interceptor>>>(iter: T) -> Self {
        Self {
            interceptors: iter.into_iter().collect(),
        }
    }
}
