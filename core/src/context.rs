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

/// SigningContext carries everything a signer needs besides the request.
///
/// It lives for exactly one signing operation.
#[derive(Debug)]
pub struct SigningContext<'a, K> {
    service: &'a str,
    region: &'a str,
    credential: K,
}

impl<'a, K> SigningContext<'a, K> {
    /// Create a new signing context.
    pub fn new(service: &'a str, region: &'a str, credential: K) -> Self {
        Self {
            service,
            region,
            credential,
        }
    }

    /// Signing name of the target service.
    pub fn service(&self) -> &str {
        self.service
    }

    /// Signing region.
    pub fn region(&self) -> &str {
        self.region
    }

    /// Credential resolved for this signing operation.
    pub fn credential(&self) -> &K {
        &self.credential
    }
}
