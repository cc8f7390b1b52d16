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

use std::sync::Arc;

use http::{HeaderMap, HeaderName};

use crate::{
    capture_body, resolve_uri, CanonicalRequest, Config, ContentProvider, Error, ErrorKind,
    HeaderNormalizer, InterceptedRequest, Payload, ProvideCredential, Result, SignRequest,
    SignedResult, SigningContext, SigningCredential, SplicePolicy,
};

/// SigningAdapter signs intercepted requests in place.
///
/// Each call walks `Captured → Canonicalized → Signed → Spliced`. Headers and
/// payload of the original request are only replaced once the signer has
/// succeeded, so a failed call leaves a request that can still be sent
/// unsigned. Single-use bodies are the one exception: they are buffered during
/// capture and stay buffered.
///
/// Credentials are resolved for every request. The adapter holds no per-request
/// state and can be shared freely between threads and tasks.
#[derive(Clone, Debug)]
pub struct SigningAdapter<K: SigningCredential> {
    config: Arc<Config>,
    region: String,
    normalizer: HeaderNormalizer,
    payload_hash_header: HeaderName,

    loader: Arc<dyn ProvideCredential<Credential = K>>,
    signer: Arc<dyn SignRequest<Credential = K>>,
}

impl<K: SigningCredential> SigningAdapter<K> {
    /// Create a new adapter.
    ///
    /// Fails if the config has no region or an invalid payload hash header.
    pub fn new(
        config: Config,
        loader: impl ProvideCredential<Credential = K>,
        signer: impl SignRequest<Credential = K>,
    ) -> Result<Self> {
        let region = config
            .region
            .clone()
            .ok_or_else(|| Error::config_invalid("signing region is required"))?;
        let payload_hash_header = HeaderName::from_bytes(config.payload_hash_header.as_bytes())
            .map_err(|err| {
                Error::config_invalid(format!(
                    "payload hash header {:?} is not a valid header name",
                    config.payload_hash_header
                ))
                .with_source(err)
            })?;

        Ok(Self {
            normalizer: HeaderNormalizer::new(config.is_length_agnostic()),
            config: Arc::new(config),
            region,
            payload_hash_header,

            loader: Arc::new(loader),
            signer: Arc::new(signer),
        })
    }

    /// The config this adapter was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Sign the request in place.
    pub fn sign<R>(&self, req: &mut R) -> Result<()>
    where
        R: InterceptedRequest + ?Sized,
    {
        let captured = self.capture(req)?;
        let canonicalized = self.canonicalize(req, captured)?;
        let signed = self.sign_canonical(canonicalized)?;
        self.splice(req, signed)
    }

    fn capture<R>(&self, req: &mut R) -> Result<Captured>
    where
        R: InterceptedRequest + ?Sized,
    {
        let content = capture_body(req)?;
        let headers = self.normalizer.normalize(req.headers());
        Ok(Captured { headers, content })
    }

    fn canonicalize<R>(&self, req: &R, captured: Captured) -> Result<Canonicalized>
    where
        R: InterceptedRequest + ?Sized,
    {
        let uri = resolve_uri(&req.request_target(), req.target_host())?;
        let request = CanonicalRequest::builder(req.method().clone(), uri)
            .headers(captured.headers)
            .content(captured.content)
            .payload_hash_header(self.payload_hash_header.clone())
            .build();
        Ok(Canonicalized { request })
    }

    fn sign_canonical(&self, canonicalized: Canonicalized) -> Result<Signed> {
        let credential = self.resolve_credential()?;
        let ctx = SigningContext::new(&self.config.service, &self.region, credential);
        let result = self
            .signer
            .sign_request(canonicalized.request, &ctx)
            .map_err(|err| signing_failure(err, "failed to sign request"))?;
        Ok(Signed { result })
    }

    fn splice<R>(&self, req: &mut R, signed: Signed) -> Result<()>
    where
        R: InterceptedRequest + ?Sized,
    {
        let (signed_headers, content) = signed.result.into_parts();
        let headers = match self.config.splice_policy() {
            SplicePolicy::Replace => signed_headers,
            SplicePolicy::Merge => {
                let mut merged = req.headers().clone();
                // Replaces every value of a name present in the signed set.
                merged.extend(signed_headers);
                merged
            }
        };

        if let Some(content) = content {
            req.set_payload(Payload::Repeatable(content))?;
        }
        *req.headers_mut() = headers;
        Ok(())
    }

    fn resolve_credential(&self) -> Result<K> {
        let credential = self
            .loader
            .provide_credential()
            .map_err(|err| signing_failure(err, "failed to resolve credential"))?;

        match credential {
            Some(cred) if cred.is_valid() => Ok(cred),
            Some(_) => Err(Error::signing_failed("credential is invalid or expired")),
            None => Err(Error::signing_failed("no credential available")),
        }
    }
}

/// Errors raised once the signer side is involved are signing failures,
/// whatever they were raised as.
fn signing_failure(err: Error, message: &str) -> Error {
    if err.kind() == ErrorKind::SigningFailed {
        err
    } else {
        Error::signing_failed(message).with_source(err)
    }
}

struct Captured {
    headers: HeaderMap,
    content: Option<ContentProvider>,
}

struct Canonicalized {
    request: CanonicalRequest,
}

struct Signed {
    result: SignedResult,
}
