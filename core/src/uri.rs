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

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use http::uri::{Authority, PathAndQuery, Scheme};
use http::Uri;

use crate::{Error, Result};

/// TargetHost is the scheme and authority a client connects to for a request.
///
/// Clients that send origin-form request targets (`/path?query`) attach it to
/// the request so the absolute URI can be rebuilt for signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetHost {
    scheme: Scheme,
    authority: Authority,
}

impl TargetHost {
    /// Create a new target host.
    pub fn new(scheme: Scheme, authority: Authority) -> Self {
        Self { scheme, authority }
    }

    /// The scheme of the target host.
    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    /// The authority (host and optional port) of the target host.
    pub fn authority(&self) -> &Authority {
        &self.authority
    }
}

impl FromStr for TargetHost {
    type Err = Error;

    /// Parse a target host like `https://search.example.com:443`.
    fn from_str(s: &str) -> Result<Self> {
        let parts = Uri::from_str(s)?.into_parts();
        match (parts.scheme, parts.authority) {
            (Some(scheme), Some(authority)) => Ok(Self { scheme, authority }),
            _ => Err(Error::invalid_uri(format!(
                "target host {s:?} must contain scheme and authority"
            ))),
        }
    }
}

impl Display for TargetHost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}://{}", self.scheme, self.authority)
    }
}

/// Resolve a raw request target into an absolute URI.
///
/// Scheme and authority are taken from `host` only when `target` lacks them.
/// Path and query are kept as raw text: percent-encoded sequences such as
/// `%2C` are neither decoded nor re-encoded, and path segments are not
/// normalized.
pub fn resolve_uri(target: &str, host: Option<&TargetHost>) -> Result<Uri> {
    let uri = Uri::from_str(target).map_err(|err| {
        Error::invalid_uri(format!("request target {target:?} is not a valid uri")).with_source(err)
    })?;
    let mut parts = uri.into_parts();

    if parts.authority.is_none() {
        let host = host.ok_or_else(|| {
            Error::invalid_uri(format!(
                "request target {target:?} has no authority and no target host is known"
            ))
        })?;
        parts.authority = Some(host.authority.clone());
        parts.scheme = Some(host.scheme.clone());
    }
    if parts.scheme.is_none() {
        parts.scheme = Some(host.map(|h| h.scheme.clone()).unwrap_or(Scheme::HTTP));
    }
    if parts.path_and_query.is_none() {
        parts.path_and_query = Some(PathAndQuery::from_static("/"));
    }

    Ok(Uri::from_parts(parts)?)
}
