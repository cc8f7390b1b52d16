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

use std::fmt::Debug;

use crate::{CanonicalRequest, Result, SignedResult, SigningContext};

/// SigningCredential is the trait used by the adapter as the signing credential.
pub trait SigningCredential: Clone + Debug + Send + Sync + Unpin + 'static {
    /// Check if the credential is valid.
    fn is_valid(&self) -> bool;
}

/// ProvideCredential is the trait used by the adapter to resolve a credential.
///
/// It is called once for every signed request. Implementations that talk to a
/// remote identity service should do their own caching.
pub trait ProvideCredential: Debug + Send + Sync + 'static {
    /// Credential returned by this provider.
    type Credential: Send + Sync + Unpin + 'static;

    /// Resolve a credential.
    ///
    /// Returns `Ok(None)` if no usable identity is available.
    fn provide_credential(&self) -> Result<Option<Self::Credential>>;
}

/// SignRequest is the trait implemented by signing algorithms.
///
/// The algorithm itself is opaque to this crate: it receives the canonical
/// request and returns the headers the wire request must carry.
pub trait SignRequest: Debug + Send + Sync + 'static {
    /// Credential used by this signer.
    type Credential: Send + Sync + Unpin + 'static;

    /// Sign the canonical request.
    ///
    /// The returned header set usually contains every input header plus the
    /// signature and payload hash headers. Signers that transform the payload
    /// attach the new content with [`SignedResult::with_content`].
    fn sign_request(
        &self,
        req: CanonicalRequest,
        ctx: &SigningContext<'_, Self::Credential>,
    ) -> Result<SignedResult>;
}

/// StaticCredentialProvider always returns the same credential.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider<K> {
    credential: K,
}

impl<K: SigningCredential> StaticCredentialProvider<K> {
    /// Create a new StaticCredentialProvider.
    pub fn new(credential: K) -> Self {
        Self { credential }
    }
}

impl<K: SigningCredential> ProvideCredential for StaticCredentialProvider<K> {
    type Credential = K;

    fn provide_credential(&self) -> Result<Option<Self::Credential>> {
        Ok(Some(self.credential.clone()))
    }
}
