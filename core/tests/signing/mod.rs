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

mod properties;
mod scenarios;

use std::io::Read;
use std::sync::{Arc, Mutex};

use http::{HeaderValue, Request};
use reqsign_intercept_core::{
    CanonicalRequest, Config, Payload, Result, SignRequest, SignedResult, SigningAdapter,
    SigningContext, SigningCredential, StaticCredentialProvider, TargetHost,
};
use sha2::{Digest, Sha256};

pub const PAYLOAD_HASH: &str = "x-amz-content-sha256";

#[derive(Clone, Debug)]
pub struct TestCredential {
    pub access_key: String,
}

impl SigningCredential for TestCredential {
    fn is_valid(&self) -> bool {
        !self.access_key.is_empty()
    }
}

/// AddHeaderSigner copies every input header and adds a few derived ones:
///
/// - `authorization`: a fake signature over the access key
/// - `resource-path`: the raw path it was given
/// - `signed-content-length`: the number of payload bytes it read
/// - `x-amz-content-sha256`: the payload digest, if asked for with `required`
///
/// Every canonical request it sees is recorded.
#[derive(Debug, Default)]
pub struct AddHeaderSigner {
    pub seen: Seen,
}

impl SignRequest for AddHeaderSigner {
    type Credential = TestCredential;

    fn sign_request(
        &self,
        req: CanonicalRequest,
        ctx: &SigningContext<'_, TestCredential>,
    ) -> Result<SignedResult> {
        self.seen
            .lock()
            .expect("lock must not be poisoned")
            .push(req.clone());

        let mut headers = req.headers().clone();
        headers.insert(
            "authorization",
            HeaderValue::from_str(&format!(
                "TEST-HMAC Credential={}/{}/{}, Signature=wuzzle",
                ctx.credential().access_key,
                ctx.region(),
                ctx.service()
            ))?,
        );
        headers.insert("resource-path", HeaderValue::from_str(req.path())?);

        if let Some(content) = req.content() {
            let mut buf = Vec::new();
            content.new_stream()?.read_to_end(&mut buf)?;
            headers.insert("signed-content-length", HeaderValue::from(buf.len()));
            if headers.get(PAYLOAD_HASH).map(|v| v.as_bytes()) == Some(b"required") {
                headers.insert(
                    PAYLOAD_HASH,
                    HeaderValue::from_str(&hex::encode(Sha256::digest(&buf)))?,
                );
            }
        }

        Ok(SignedResult::new(headers))
    }
}

pub type Seen = Arc<Mutex<Vec<CanonicalRequest>>>;

pub fn init_adapter(config: Config) -> (SigningAdapter<TestCredential>, Seen) {
    let _ = env_logger::builder().is_test(true).try_init();

    let signer = AddHeaderSigner::default();
    let seen = signer.seen.clone();
    let adapter = SigningAdapter::new(
        config,
        StaticCredentialProvider::new(TestCredential {
            access_key: "AKIDEXAMPLE".to_string(),
        }),
        signer,
    )
    .expect("adapter must build");
    (adapter, seen)
}

pub fn build_request(method: &str, target: &str, body: Payload) -> Request<Payload> {
    let mut req = Request::builder()
        .method(method)
        .uri(target)
        .body(body)
        .expect("request must be valid");
    req.extensions_mut().insert(
        "http://localhost:9200"
            .parse::<TargetHost>()
            .expect("target host must be valid"),
    );
    req
}

pub fn read_payload(req: &Request<Payload>) -> Vec<u8> {
    let Payload::Repeatable(content) = req.body() else {
        panic!("payload must be repeatable, got {:?}", req.body());
    };
    let mut buf = Vec::new();
    content
        .new_stream()
        .expect("stream must open")
        .read_to_end(&mut buf)
        .expect("stream must be readable");
    buf
}
