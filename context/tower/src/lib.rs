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

//! [`tower`] binding for reqsign-intercept.
//!
//! [`SigningLayer`] wraps a service accepting `http::Request<Payload>` and
//! signs every request before it reaches the inner service. Requests that
//! fail to sign never reach the inner service.

#![warn(missing_docs)]

use std::error::Error;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use http::Request;
use log::debug;
use pin_project::pin_project;
use reqsign_intercept_core::{Payload, SigningAdapter, SigningCredential};
use tower::{Layer, Service};

/// Error returned by [`SigningService`].
pub type BoxError = Box<dyn Error + Send + Sync>;

/// SigningLayer applies [`SigningService`] to an inner service.
#[derive(Debug, Clone)]
pub struct SigningLayer<K: SigningCredential> {
    adapter: SigningAdapter<K>,
}

impl<K: SigningCredential> SigningLayer<K> {
    /// Create a new layer around given adapter.
    pub fn new(adapter: SigningAdapter<K>) -> Self {
        Self { adapter }
    }
}

impl<S, K: SigningCredential> Layer<S> for SigningLayer<K> {
    type Service = SigningService<S, K>;

    fn layer(&self, inner: S) -> Self::Service {
        SigningService {
            inner,
            adapter: self.adapter.clone(),
        }
    }
}

/// SigningService signs requests before handing them to `inner`.
#[derive(Debug, Clone)]
pub struct SigningService<S, K: SigningCredential> {
    inner: S,
    adapter: SigningAdapter<K>,
}

/// Future returned by [`SigningService`].
#[pin_project(project = SigningFutureProj)]
#[derive(Debug)]
pub enum SigningFuture<F> {
    /// Waiting on the inner service.
    Inner(#[pin] F),
    /// Signing failed before the inner service was called.
    Ready(Option<BoxError>),
}

impl<F, T, E> Future for SigningFuture<F>
where
    F: Future<Output = Result<T, E>>,
    E: Into<BoxError>,
{
    type Output = Result<T, BoxError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.project() {
            SigningFutureProj::Ready(e) => Poll::Ready(Err(e
                .take()
                .unwrap_or_else(|| "signing future polled after completion".into()))),
            SigningFutureProj::Inner(f) => f.poll(cx).map_err(Into::into),
        }
    }
}

impl<S, K> Service<Request<Payload>> for SigningService<S, K>
where
    S: Service<Request<Payload>>,
    S::Error: Into<BoxError>,
    K: SigningCredential,
{
    type Response = S::Response;
    type Error = BoxError;
    type Future = SigningFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(Into::into)
    }

    fn call(&mut self, mut req: Request<Payload>) -> Self::Future {
        match self.adapter.sign(&mut req) {
            Ok(()) => {
                debug!("signed request {} {}", req.method(), req.uri());
                SigningFuture::Inner(self.inner.call(req))
            }
            Err(err) => {
                debug!("failed to sign request {} {}: {err}", req.method(), req.uri());
                SigningFuture::Ready(Some(err.into()))
            }
        }
    }
}
