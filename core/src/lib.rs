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

//! Core components for splicing request signatures into HTTP clients.
//!
//! An HTTP client hands each outgoing request to a [`SigningAdapter`], which
//! captures headers, body and target, builds a [`CanonicalRequest`], asks an
//! external [`SignRequest`] implementation to sign it, and writes the signed
//! headers back onto the request.
//!
//! The signing algorithm itself lives outside this crate.
//!
//! ## Overview
//!
//! - **Capture**: [`capture_body`] makes the body replayable, [`HeaderNormalizer`]
//!   filters headers and [`resolve_uri`] rebuilds the absolute uri.
//! - **Sign**: [`ProvideCredential`] resolves a credential for every request and
//!   [`SignRequest`] signs the [`CanonicalRequest`].
//! - **Splice**: [`SplicePolicy`] decides whether the signed headers replace or
//!   merge into the original ones.
//!
//! Client bindings implement [`InterceptedRequest`] for their own request type.
//! Classic synchronous clients can use [`RequestInterceptor`] directly on
//! `http::Request<Payload>`.
//!
//! ## Example
//!
//! ```
//! use reqsign_intercept_core::{
//!     CanonicalRequest, Config, Payload, RequestInterceptor, Result, SignRequest, SignedResult,
//!     SigningAdapter, SigningContext, SigningCredential, StaticCredentialProvider, TargetHost,
//! };
//!
//! #[derive(Clone, Debug)]
//! struct Token(String);
//!
//! impl SigningCredential for Token {
//!     fn is_valid(&self) -> bool {
//!         !self.0.is_empty()
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct BearerSigner;
//!
//! impl SignRequest for BearerSigner {
//!     type Credential = Token;
//!
//!     fn sign_request(
//!         &self,
//!         req: CanonicalRequest,
//!         ctx: &SigningContext<'_, Token>,
//!     ) -> Result<SignedResult> {
//!         let mut headers = req.headers().clone();
//!         headers.insert(
//!             "authorization",
//!             format!("Bearer {}", ctx.credential().0).parse()?,
//!         );
//!         Ok(SignedResult::new(headers))
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let adapter = SigningAdapter::new(
//!     Config::new("es").with_region("us-east-1"),
//!     StaticCredentialProvider::new(Token("secret".to_string())),
//!     BearerSigner,
//! )?;
//!
//! let mut req = http::Request::builder()
//!     .method("POST")
//!     .uri("/_search")
//!     .body(Payload::from("{}"))?;
//! req.extensions_mut()
//!     .insert("https://search.example.com".parse::<TargetHost>()?);
//!
//! adapter.process(&mut req)?;
//! assert_eq!(req.headers()["authorization"], "Bearer secret");
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

mod constants;

mod error;
pub use error::{Error, ErrorKind, Result};
mod env;
pub use env::{Env, OsEnv, StaticEnv};
mod config;
pub use config::{Config, SplicePolicy};

mod api;
pub use api::{ProvideCredential, SignRequest, SigningCredential, StaticCredentialProvider};
mod context;
pub use context::SigningContext;

mod body;
pub use body::{capture_body, ContentProvider, FileContent, Payload, ProvideContent};
mod header;
pub use header::HeaderNormalizer;
mod uri;
pub use uri::{resolve_uri, TargetHost};
mod canonical;
pub use canonical::{CanonicalRequest, CanonicalRequestBuilder, SignedResult};

mod intercept;
pub use intercept::{InterceptedRequest, RequestInterceptor};
mod adapter;
pub use adapter::SigningAdapter;
