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

use std::io::Cursor;

use anyhow::Result;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE, HOST};
use http::HeaderValue;
use pretty_assertions::assert_eq;
use reqsign_intercept_core::{Config, Payload, RequestInterceptor};

use super::{build_request, init_adapter, read_payload, PAYLOAD_HASH};

#[test]
fn test_get_without_body() -> Result<()> {
    let (adapter, seen) = init_adapter(Config::new("es").with_region("us-east-1"));

    let mut req = build_request("GET", "/query?a=b", Payload::Absent);
    req.headers_mut()
        .insert("foo", HeaderValue::from_static("bar"));
    adapter.process(&mut req)?;

    assert_eq!(req.headers()["foo"], "bar");
    assert!(req.headers().get(CONTENT_LENGTH).is_none());
    assert!(req.headers().get(PAYLOAD_HASH).is_none());
    assert_eq!(
        req.headers()["authorization"],
        "TEST-HMAC Credential=AKIDEXAMPLE/us-east-1/es, Signature=wuzzle"
    );
    assert!(matches!(req.body(), Payload::Absent));

    let seen = seen.lock().expect("lock must not be poisoned");
    assert_eq!(seen[0].uri().to_string(), "http://localhost:9200/query?a=b");
    assert_eq!(seen[0].query_pairs(), vec![("a", "b")]);
    assert!(seen[0].content().is_none());
    Ok(())
}

#[test]
fn test_post_with_body() -> Result<()> {
    let (adapter, _) = init_adapter(Config::new("es").with_region("us-east-1"));

    let body = r#"{"test":"val"}"#;
    let mut req = build_request(
        "POST",
        "/_doc",
        Payload::single_use(Cursor::new(body.as_bytes().to_vec())),
    );
    req.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=UTF-8"),
    );
    adapter.process(&mut req)?;

    assert_eq!(read_payload(&req), body.as_bytes());
    assert_eq!(req.headers()["signed-content-length"], "14");
    assert_eq!(req.headers()[CONTENT_TYPE], "text/html; charset=UTF-8");
    assert_eq!(
        req.headers()[PAYLOAD_HASH],
        "c421a03574ee632c2fc54216e616954e200b29701b6865f6ce7eea262143bf62"
    );
    Ok(())
}

#[test]
fn test_encoded_path_is_kept() -> Result<()> {
    let (adapter, seen) = init_adapter(Config::new("es").with_region("us-east-1"));

    let target = "/foo-2017-02-25%2Cfoo-2017-02-26/_search?a=b";
    let mut req = build_request("POST", target, Payload::from("{}"));
    adapter.process(&mut req)?;

    assert_eq!(
        req.headers()["resource-path"],
        "/foo-2017-02-25%2Cfoo-2017-02-26/_search"
    );
    assert_eq!(req.uri(), target);

    let seen = seen.lock().expect("lock must not be poisoned");
    assert_eq!(seen[0].path(), "/foo-2017-02-25%2Cfoo-2017-02-26/_search");
    assert_eq!(
        seen[0].path_percent_decoded(),
        "/foo-2017-02-25,foo-2017-02-26/_search"
    );
    Ok(())
}

#[test]
fn test_length_agnostic_target_keeps_content_length() -> Result<()> {
    let (adapter, seen) = init_adapter(Config::new("aoss").with_region("us-east-1"));

    let mut req = build_request("POST", "/_doc", Payload::from("0123456789"));
    req.headers_mut()
        .insert(CONTENT_LENGTH, HeaderValue::from_static("10"));
    req.headers_mut()
        .insert(HOST, HeaderValue::from_static("localhost:9200"));
    adapter.process(&mut req)?;

    assert_eq!(req.headers()[CONTENT_LENGTH], "10");
    assert_eq!(req.headers()[HOST], "localhost:9200");
    assert!(req.headers().contains_key("authorization"));

    let seen = seen.lock().expect("lock must not be poisoned");
    assert!(seen[0].headers().get(CONTENT_LENGTH).is_none());
    assert!(seen[0].headers().get(HOST).is_none());
    Ok(())
}
