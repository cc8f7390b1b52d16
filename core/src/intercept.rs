// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::borrow::Cow;

use http::{HeaderMap, Method};

use crate::{Payload, Result, SigningAdapter, SigningCredential, TargetHost};

/// InterceptedRequest is the view a client binding gives the adapter on its
/// own request type.
///
/// The adapter never changes the method or the request target. It replaces
/// headers and payload only through this trait.
pub trait InterceptedRequest {
    /// HTTP method.
    fn method(&self) -> &Method;

    /// The request target as the client will send it, absolute or origin-form.
    fn request_target(&self) -> Cow<'_, str>;

    /// The connection target, used when the request target has no authority.
    fn target_host(&self) -> Option<&TargetHost> {
        None
    }

    /// Current headers.
    fn headers(&self) -> &HeaderMap;

    /// Mutable access to the headers.
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Take the payload out of the request.
    ///
    /// Implementations whose body is cheap to clone may leave it in place.
    /// Bodies that can't be represented as a [`Payload`] yield an
    /// [`ErrorKind::UnsupportedRequestShape`](crate::ErrorKind::UnsupportedRequestShape)
    /// error, and the request must then be left unchanged.
    fn take_payload(&mut self) -> Result<Payload>;

    /// Put a payload on the request.
    fn set_payload(&mut self, payload: Payload) -> Result<()>;
}

/// Classic synchronous clients build `http::Request<Payload>` and put the
/// connection's [`TargetHost`] into the request extensions.
impl InterceptedRequest for http::Request<Payload> {
    fn method(&self) -> &Method {
        http::Request::method(self)
    }

    fn request_target(&self) -> Cow<'_, str> {
        Cow::Owned(self.uri().to_string())
    }

    fn target_host(&self) -> Option<&TargetHost> {
        self.extensions().get::<TargetHost>()
    }

    fn headers(&self) -> &HeaderMap {
        http::Request::headers(self)
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        http::Request::headers_mut(self)
    }

    fn take_payload(&mut self) -> Result<Payload> {
        Ok(std::mem::take(self.body_mut()))
    }

    fn set_payload(&mut self, payload: Payload) -> Result<()> {
        *self.body_mut() = payload;
        Ok(())
    }
}

/// RequestInterceptor is the hook a classic synchronous client calls once per
/// outgoing request, right before the request is written to the connection.
///
/// Returning an error aborts the request.
pub trait RequestInterceptor: Send + Sync {
    /// Process the request in place.
    fn process(&self, req: &mut http::Request<Payload>) -> Result<()>;
}

impl<K: SigningCredential> RequestInterceptor for SigningAdapter<K> {
    fn process(&self, req: &mut http::Request<Payload>) -> Result<()> {
        self.sign(req)
    }
}
