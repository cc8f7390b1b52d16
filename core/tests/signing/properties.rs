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

use std::io::{Cursor, Read, Write};

use anyhow::Result;
use http::header::{CONTENT_LENGTH, HOST};
use http::HeaderValue;
use pretty_assertions::assert_eq;
use reqsign_intercept_core::{
    Config, ContentProvider, ErrorKind, FileContent, Payload, ProvideCredential,
    RequestInterceptor, SigningAdapter, SplicePolicy,
};

use super::{build_request, init_adapter, read_payload, AddHeaderSigner, TestCredential};
use super::PAYLOAD_HASH;

#[test]
fn test_body_is_replayable_after_signing() -> Result<()> {
    let (adapter, seen) = init_adapter(Config::new("es").with_region("us-east-1"));

    let mut req = build_request(
        "PUT",
        "/index/_doc/1",
        Payload::single_use(Cursor::new(b"hello world".to_vec())),
    );
    adapter.process(&mut req)?;

    // The signer already read the content once, the client reads it again.
    assert_eq!(req.headers()["signed-content-length"], "11");
    assert_eq!(read_payload(&req), b"hello world");
    assert_eq!(read_payload(&req), b"hello world");

    let seen = seen.lock().expect("lock must not be poisoned");
    let content = seen[0].content().expect("content must be captured");
    assert_eq!(content.to_bytes()?.as_ref(), b"hello world");
    Ok(())
}

#[test]
fn test_file_payload_is_not_buffered() -> Result<()> {
    let (adapter, _) = init_adapter(Config::new("s3").with_region("us-east-1"));

    let mut f = tempfile::NamedTempFile::new()?;
    f.write_all(b"file content")?;
    let content = ContentProvider::new(FileContent::new(f.path()));

    let mut req = build_request("PUT", "/bucket/key", Payload::from(content));
    adapter.process(&mut req)?;

    assert_eq!(req.headers()["signed-content-length"], "12");
    let Payload::Repeatable(content) = req.body() else {
        panic!("payload must stay repeatable");
    };
    let mut buf = String::new();
    content.new_stream()?.read_to_string(&mut buf)?;
    assert_eq!(buf, "file content");
    Ok(())
}

#[test]
fn test_host_is_never_signed_verbatim() -> Result<()> {
    let (adapter, seen) = init_adapter(
        Config::new("es")
            .with_region("us-east-1")
            .with_splice_policy(SplicePolicy::Replace),
    );

    let mut req = build_request("GET", "/", Payload::Absent);
    req.headers_mut()
        .insert(HOST, HeaderValue::from_static("proxy.internal:8080"));
    adapter.process(&mut req)?;

    assert!(req.headers().get(HOST).is_none());
    let seen = seen.lock().expect("lock must not be poisoned");
    assert!(seen[0].headers().get(HOST).is_none());
    assert_eq!(seen[0].uri().host(), Some("localhost"));
    Ok(())
}

#[test]
fn test_zero_length_body_is_not_absent() -> Result<()> {
    let (adapter, seen) = init_adapter(Config::new("es").with_region("us-east-1"));

    let mut empty = build_request("POST", "/_refresh", Payload::from(""));
    empty
        .headers_mut()
        .insert(CONTENT_LENGTH, HeaderValue::from_static("0"));
    adapter.process(&mut empty)?;

    let mut absent = build_request("POST", "/_refresh", Payload::Absent);
    adapter.process(&mut absent)?;

    assert_eq!(empty.headers()["signed-content-length"], "0");
    assert!(empty.headers().contains_key(PAYLOAD_HASH));
    assert!(absent.headers().get("signed-content-length").is_none());
    assert!(absent.headers().get(PAYLOAD_HASH).is_none());

    let seen = seen.lock().expect("lock must not be poisoned");
    assert_eq!(seen[0].content().and_then(|c| c.content_length()), Some(0));
    assert!(seen[0].headers().get(CONTENT_LENGTH).is_none());
    assert!(seen[1].content().is_none());
    Ok(())
}

#[test]
fn test_signing_twice_is_stable() -> Result<()> {
    let (adapter, _) = init_adapter(Config::new("es").with_region("us-east-1"));

    let mut req = build_request("POST", "/_bulk?refresh=true", Payload::from("{}\n"));
    req.headers_mut()
        .append("x-tag", HeaderValue::from_static("a"));
    req.headers_mut()
        .append("x-tag", HeaderValue::from_static("b"));

    adapter.process(&mut req)?;
    let first = req.headers().clone();
    adapter.process(&mut req)?;

    assert_eq!(req.headers(), &first);
    assert_eq!(
        req.headers().get_all("x-tag").iter().collect::<Vec<_>>(),
        vec!["a", "b"]
    );
    assert_eq!(read_payload(&req), b"{}\n");
    Ok(())
}

#[derive(Debug)]
struct FailingProvider;

impl ProvideCredential for FailingProvider {
    type Credential = TestCredential;

    fn provide_credential(&self) -> reqsign_intercept_core::Result<Option<TestCredential>> {
        Err(reqsign_intercept_core::Error::config_invalid(
            "profile file is malformed",
        ))
    }
}

#[test]
fn test_credential_failure_leaves_request_unchanged() -> Result<()> {
    let adapter = SigningAdapter::new(
        Config::new("es").with_region("us-east-1"),
        FailingProvider,
        AddHeaderSigner::default(),
    )?;

    let mut req = build_request("POST", "/_doc", Payload::from("{}"));
    req.headers_mut()
        .insert("foo", HeaderValue::from_static("bar"));
    let before = req.headers().clone();

    let err = adapter
        .process(&mut req)
        .expect_err("signing must fail without credential");

    assert_eq!(err.kind(), ErrorKind::SigningFailed);
    assert!(!err.is_adaptation_error());
    assert_eq!(req.headers(), &before);
    assert_eq!(read_payload(&req), b"{}");
    Ok(())
}

#[test]
fn test_broken_body_is_adaptation_error() {
    struct BrokenReader;

    impl Read for BrokenReader {
        fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "peer reset",
            ))
        }
    }

    let (adapter, seen) = init_adapter(Config::new("es").with_region("us-east-1"));

    let mut req = build_request("POST", "/_doc", Payload::single_use(BrokenReader));
    let err = adapter
        .process(&mut req)
        .expect_err("signing must fail on broken body");

    assert_eq!(err.kind(), ErrorKind::BodyIo);
    assert!(err.is_adaptation_error());
    assert!(seen.lock().expect("lock must not be poisoned").is_empty());
}
