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

// Headers used by signers.
pub const X_AMZ_CONTENT_SHA_256: &str = "x-amz-content-sha256";
pub const PAYLOAD_HASH_REQUIRED: &str = "required";

// Env values used in config.
pub const AWS_REGION: &str = "AWS_REGION";
pub const AWS_DEFAULT_REGION: &str = "AWS_DEFAULT_REGION";

/// Services that recompute or ignore `Content-Length` on their side.
///
/// - `aoss`: OpenSearch Serverless
pub const LENGTH_AGNOSTIC_SERVICES: &[&str] = &["aoss"];
