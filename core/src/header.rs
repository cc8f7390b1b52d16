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

//! Header normalization.

use http::header::{CONTENT_LENGTH, HOST};
use http::{HeaderMap, HeaderName, HeaderValue};

/// HeaderNormalizer turns a request's headers into the set handed to the signer.
///
/// The output is keyed case-insensitively (via [`HeaderName`]), keeps every
/// value of a repeated header in its original order, and keeps header names in
/// the order they first appeared.
///
/// Excluded while building:
///
/// - `Host`, always. The transport derives it from the resolved target.
/// - `Content-Length: 0`.
/// - `Content-Length` with any value, if the target is length-agnostic.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderNormalizer {
    length_agnostic: bool,
}

impl HeaderNormalizer {
    /// Create a new normalizer.
    pub fn new(length_agnostic: bool) -> Self {
        Self { length_agnostic }
    }

    /// Build the normalized header map.
    pub fn normalize(&self, headers: &HeaderMap) -> HeaderMap {
        let mut normalized = HeaderMap::with_capacity(headers.keys_len());
        for (name, value) in headers {
            if self.is_excluded(name, value) {
                continue;
            }
            normalized.append(name.clone(), value.clone());
        }
        normalized
    }

    /// Check whether given header must be left out of the signing input.
    pub fn is_excluded(&self, name: &HeaderName, value: &HeaderValue) -> bool {
        if name == HOST {
            return true;
        }
        if name == CONTENT_LENGTH {
            return self.length_agnostic || value.as_bytes() == b"0";
        }
        false
    }
}
