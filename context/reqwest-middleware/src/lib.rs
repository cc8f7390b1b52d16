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

//! [`reqwest_middleware`] binding for reqsign-intercept.
//!
//! Add [`SigningMiddleware`] to a `ClientWithMiddleware` and every request is
//! signed right before it is handed to the next middleware.
//!
//! Only buffered bodies are supported. Requests carrying a streaming body
//! are rejected without being sent.

#![warn(missing_docs)]

use std::borrow::Cow;

use async_trait::async_trait;
use bytes::Bytes;
use http::{Extensions, HeaderMap, Method};
use log::debug;
use reqsign_intercept_core::{
    ContentProvider, Error, InterceptedRequest, Payload, Result, SigningAdapter,
    SigningCredential,
};
use reqwest::{Body, Request, Response};
use reqwest_middleware::{Middleware, Next};

/// ReqwestRequest exposes a [`reqwest::Request`] to the signing adapter.
///
/// reqwest keeps its url absolute, so no target host is needed.
#[derive(Debug)]
pub struct ReqwestRequest<'a> {
    req: &'a mut Request,
}

impl<'a> ReqwestRequest<'a> {
    /// Wrap given request.
    pub fn new(req: &'a mut Request) -> Self {
        Self { req }
    }
}

impl InterceptedRequest for ReqwestRequest<'_> {
    fn method(&self) -> &Method {
        self.req.method()
    }

    fn request_target(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.req.url().as_str())
    }

    fn headers(&self) -> &HeaderMap {
        self.req.headers()
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        self.req.headers_mut()
    }

    /// Buffered bodies stay on the request, the payload is a copy of them.
    fn take_payload(&mut self) -> Result<Payload> {
        let Some(body) = self.req.body() else {
            return Ok(Payload::Absent);
        };
        match body.as_bytes() {
            Some(bs) => Ok(Payload::Repeatable(ContentProvider::from_bytes(
                Bytes::copy_from_slice(bs),
            ))),
            None => Err(Error::unsupported_request_shape(
                "streaming request body can't be signed",
            )),
        }
    }

    fn set_payload(&mut self, payload: Payload) -> Result<()> {
        let body = match payload {
            Payload::Absent => None,
            Payload::Repeatable(content) => Some(Body::from(content.to_bytes()?)),
            Payload::SingleUse(_) => {
                return Err(Error::unsupported_request_shape(
                    "single-use payload can't be attached to a reqwest request",
                ))
            }
        };
        *self.req.body_mut() = body;
        Ok(())
    }
}

/// SigningMiddleware signs every request passing through it.
#[derive(Debug, Clone)]
pub struct SigningMiddleware<K: SigningCredential> {
    adapter: SigningAdapter<K>,
}

impl<K: SigningCredential> SigningMiddleware<K> {
    /// Create a new middleware around given adapter.
    pub fn new(adapter: SigningAdapter<K>) -> Self {
        Self { adapter }
    }
}

#[async_trait]
impl<K: SigningCredential> Middleware for SigningMiddleware<K> {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let signed = self.adapter.sign(&mut ReqwestRequest::new(&mut req));
        if let Err(err) = signed {
            debug!("failed to sign request {} {}: {err}", req.method(), req.url());
            return Err(reqwest_middleware::Error::Middleware(err.into()));
        }
        debug!("signed request {} {}", req.method(), req.url());

        next.run(req, extensions).await
    }
}
