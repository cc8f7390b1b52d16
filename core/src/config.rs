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

use crate::constants::{
    AWS_DEFAULT_REGION, AWS_REGION, LENGTH_AGNOSTIC_SERVICES, X_AMZ_CONTENT_SHA_256,
};
use crate::Env;

/// SplicePolicy decides how the signed header set is written back onto the
/// original request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplicePolicy {
    /// Discard the original headers and keep only the signed set.
    ///
    /// Correct when every original header was part of the signing input.
    Replace,
    /// Overwrite only the headers present in the signed set and leave the
    /// rest of the original headers untouched.
    Merge,
}

/// Config for the signing adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `service` is the signing name of the target service, for example `es`.
    pub service: String,
    /// `region` will be loaded from:
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_REGION`]
    /// - env value: [`AWS_DEFAULT_REGION`]
    pub region: Option<String>,
    /// `length_agnostic` marks a target that recomputes or ignores
    /// `Content-Length`. The header is then excluded from the signing input.
    ///
    /// - this field if it's `is_some`
    /// - `true` if `service` is one of the known length-agnostic services
    /// - default to `false`
    pub length_agnostic: Option<bool>,
    /// `splice_policy` will be resolved from:
    ///
    /// - this field if it's `is_some`
    /// - [`SplicePolicy::Merge`] for length-agnostic targets
    /// - default to [`SplicePolicy::Replace`]
    pub splice_policy: Option<SplicePolicy>,
    /// `payload_hash_header` is injected with value `required` whenever the
    /// request carries a body, asking the signer to hash the payload.
    ///
    /// Default to `x-amz-content-sha256`.
    pub payload_hash_header: String,
}

impl Config {
    /// Create a new config for given service.
    pub fn new(service: &str) -> Self {
        Self {
            service: service.to_string(),
            region: None,
            length_agnostic: None,
            splice_policy: None,
            payload_hash_header: X_AMZ_CONTENT_SHA_256.to_string(),
        }
    }

    /// Set the signing region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Mark the target as length-agnostic or not.
    pub fn with_length_agnostic(mut self, length_agnostic: bool) -> Self {
        self.length_agnostic = Some(length_agnostic);
        self
    }

    /// Set the splice policy explicitly.
    pub fn with_splice_policy(mut self, policy: SplicePolicy) -> Self {
        self.splice_policy = Some(policy);
        self
    }

    /// Set the payload hash header name.
    pub fn with_payload_hash_header(mut self, name: &str) -> Self {
        self.payload_hash_header = name.to_string();
        self
    }

    /// Load unset fields from the given env.
    pub fn from_env(mut self, env: &impl Env) -> Self {
        if self.region.is_none() {
            let var = |key: &str| env.var(key).filter(|v| !v.is_empty());
            self.region = var(AWS_REGION).or_else(|| var(AWS_DEFAULT_REGION));
        }

        self
    }

    /// Whether `Content-Length` is excluded from the signing input.
    pub fn is_length_agnostic(&self) -> bool {
        self.length_agnostic
            .unwrap_or_else(|| LENGTH_AGNOSTIC_SERVICES.contains(&self.service.as_str()))
    }

    /// The resolved splice policy.
    pub fn splice_policy(&self) -> SplicePolicy {
        self.splice_policy.unwrap_or(if self.is_length_agnostic() {
            SplicePolicy::Merge
        } else {
            SplicePolicy::Replace
        })
    }
}
