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

use std::fmt;
use thiserror::Error;

/// The error type for request interception.
///
/// Every error aborts the request it was raised for. Nothing in this crate
/// retries or swallows an error.
#[derive(Error, Debug)]
#[error("{kind}: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request target is not a valid URI, or can't be made absolute.
    InvalidUri,

    /// The request body could not be drained or re-read.
    BodyIo,

    /// The signer or the credential provider failed.
    SigningFailed,

    /// The request can't be introspected for its body or headers.
    UnsupportedRequestShape,

    /// Configuration error (missing fields, invalid values)
    ConfigInvalid,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Check if this error was raised while adapting the request, before the
    /// signer was invoked.
    pub fn is_adaptation_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::InvalidUri | ErrorKind::BodyIo | ErrorKind::UnsupportedRequestShape
        )
    }
}

// Convenience constructors
impl Error {
    /// Create an invalid uri error
    pub fn invalid_uri(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidUri, message)
    }

    /// Create a body io error
    pub fn body_io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BodyIo, message)
    }

    /// Create a signing failed error
    pub fn signing_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SigningFailed, message)
    }

    /// Create an unsupported request shape error
    pub fn unsupported_request_shape(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnsupportedRequestShape, message)
    }

    /// Create a config invalid error
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidUri => write!(f, "invalid uri"),
            ErrorKind::BodyIo => write!(f, "body io error"),
            ErrorKind::SigningFailed => write!(f, "signing failed"),
            ErrorKind::UnsupportedRequestShape => write!(f, "unsupported request shape"),
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::body_io(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::invalid_uri(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::invalid_uri(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUriParts> for Error {
    fn from(err: http::uri::InvalidUriParts) -> Self {
        Self::invalid_uri(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::signing_failed(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderName> for Error {
    fn from(err: http::header::InvalidHeaderName) -> Self {
        Self::signing_failed(err.to_string()).with_source(anyhow::Error::from(err))
    }
}
