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

//! Canonical requests handed to signers and the results they return.

use std::borrow::Cow;

use http::{HeaderMap, HeaderName, HeaderValue, Method, Uri};

use crate::constants::PAYLOAD_HASH_REQUIRED;
use crate::ContentProvider;

/// CanonicalRequest is the fully materialized request handed to a signer.
///
/// It is built fresh for every request and dropped once the signed result has
/// been spliced back.
#[derive(Debug, Clone)]
pub struct CanonicalRequest {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    content: Option<ContentProvider>,
}

impl CanonicalRequest {
    /// Create a new builder for given method and absolute uri.
    pub fn builder(method: Method, uri: Uri) -> CanonicalRequestBuilder {
        CanonicalRequestBuilder::new(method, uri)
    }

    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Absolute uri, path and query exactly as the client sent them.
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Normalized headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Body content, `None` if the request has no body at all.
    pub fn content(&self) -> Option<&ContentProvider> {
        self.content.as_ref()
    }

    /// Raw path, percent-encoded sequences untouched.
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// Get the path percent decoded.
    pub fn path_percent_decoded(&self) -> Cow<'_, str> {
        percent_encoding::percent_decode_str(self.uri.path()).decode_utf8_lossy()
    }

    /// Raw query pairs in request order.
    ///
    /// Keys and values are not decoded. A key without `=` gets an empty value.
    pub fn query_pairs(&self) -> Vec<(&str, &str)> {
        self.uri
            .query()
            .map(|q| {
                q.split('&')
                    .filter(|kv| !kv.is_empty())
                    .map(|kv| kv.split_once('=').unwrap_or((kv, "")))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Split the request into its parts.
    pub fn into_parts(self) -> (Method, Uri, HeaderMap, Option<ContentProvider>) {
        (self.method, self.uri, self.headers, self.content)
    }
}

/// CanonicalRequestBuilder assembles a [`CanonicalRequest`].
#[derive(Debug)]
pub struct CanonicalRequestBuilder {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    content: Option<ContentProvider>,
    payload_hash_header: Option<HeaderName>,
}

impl CanonicalRequestBuilder {
    /// Create a new builder for given method and absolute uri.
    pub fn new(method: Method, uri: Uri) -> Self {
        Self {
            method,
            uri,
            headers: HeaderMap::new(),
            content: None,
            payload_hash_header: None,
        }
    }

    /// Set the normalized headers.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Set the body content.
    pub fn content(mut self, content: Option<ContentProvider>) -> Self {
        self.content = content;
        self
    }

    /// Set the header that asks the signer to hash the payload.
    pub fn payload_hash_header(mut self, name: HeaderName) -> Self {
        self.payload_hash_header = Some(name);
        self
    }

    /// Build the canonical request.
    ///
    /// If the request has a body and doesn't carry the payload hash header
    /// yet, the header is injected with value `required` so the signer
    /// computes the digest itself. An existing value, for example a
    /// precomputed digest, is kept.
    pub fn build(self) -> CanonicalRequest {
        let mut headers = self.headers;
        if let (Some(_), Some(name)) = (&self.content, self.payload_hash_header) {
            if !headers.contains_key(&name) {
                headers.insert(name, HeaderValue::from_static(PAYLOAD_HASH_REQUIRED));
            }
        }

        CanonicalRequest {
            method: self.method,
            uri: self.uri,
            headers,
            content: self.content,
        }
    }
}

/// SignedResult is what a signer returns for a [`CanonicalRequest`].
#[derive(Debug, Clone, Default)]
pub struct SignedResult {
    headers: HeaderMap,
    content: Option<ContentProvider>,
}

impl SignedResult {
    /// Create a new result carrying the headers the wire request must have.
    pub fn new(headers: HeaderMap) -> Self {
        Self {
            headers,
            content: None,
        }
    }

    /// Replace the request body with given content.
    ///
    /// Only needed by signers that transform the payload.
    pub fn with_content(mut self, content: ContentProvider) -> Self {
        self.content = Some(content);
        self
    }

    /// Signed headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Replacement body content, if any.
    pub fn content(&self) -> Option<&ContentProvider> {
        self.content.as_ref()
    }

    /// Split the result into its parts.
    pub fn into_parts(self) -> (HeaderMap, Option<ContentProvider>) {
        (self.headers, self.content)
    }
}
