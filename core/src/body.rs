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

//! Request bodies and body capture.

use std::fmt::{Debug, Formatter};
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;

use crate::{Error, InterceptedRequest, Result};

/// ProvideContent is a source that can open the same content any number of times.
///
/// Every stream returned by [`ProvideContent::new_stream`] must yield
/// byte-identical content.
pub trait ProvideContent: Debug + Send + Sync + 'static {
    /// Open a fresh stream over the content.
    fn new_stream(&self) -> std::io::Result<Box<dyn Read + Send>>;

    /// Length of the content if it's known without reading it.
    fn content_length(&self) -> Option<u64> {
        None
    }

    /// The content as in-memory bytes, if that's how it is stored.
    fn as_bytes(&self) -> Option<&Bytes> {
        None
    }
}

impl ProvideContent for Bytes {
    fn new_stream(&self) -> std::io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(Cursor::new(self.clone())))
    }

    fn content_length(&self) -> Option<u64> {
        Some(self.len() as u64)
    }

    fn as_bytes(&self) -> Option<&Bytes> {
        Some(self)
    }
}

/// FileContent reopens the file at `path` for every stream.
#[derive(Debug, Clone)]
pub struct FileContent {
    path: PathBuf,
}

impl FileContent {
    /// Create a new FileContent.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ProvideContent for FileContent {
    fn new_stream(&self) -> std::io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(File::open(&self.path)?))
    }

    fn content_length(&self) -> Option<u64> {
        std::fs::metadata(&self.path).ok().map(|m| m.len())
    }
}

/// ContentProvider is a cheap to clone handle to a [`ProvideContent`].
#[derive(Clone)]
pub struct ContentProvider(Arc<dyn ProvideContent>);

impl Debug for ContentProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ContentProvider").field(&self.0).finish()
    }
}

impl ContentProvider {
    /// Create a new provider from given content.
    pub fn new(content: impl ProvideContent) -> Self {
        Self(Arc::new(content))
    }

    /// Create a new provider over in-memory bytes.
    pub fn from_bytes(bs: impl Into<Bytes>) -> Self {
        Self::new(bs.into())
    }

    /// Open a fresh stream over the content.
    pub fn new_stream(&self) -> std::io::Result<Box<dyn Read + Send>> {
        self.0.new_stream()
    }

    /// Length of the content if it's known without reading it.
    pub fn content_length(&self) -> Option<u64> {
        self.0.content_length()
    }

    /// Read the whole content into memory.
    ///
    /// In-memory content is returned without copying.
    pub fn to_bytes(&self) -> std::io::Result<Bytes> {
        if let Some(bs) = self.0.as_bytes() {
            return Ok(bs.clone());
        }
        drain(self.new_stream()?)
    }
}

/// Payload is the body of an intercepted request.
#[derive(Default)]
pub enum Payload {
    /// The request has no body at all.
    ///
    /// This is different from a zero-length body: signers skip payload hashing
    /// for absent bodies.
    #[default]
    Absent,
    /// A body that can be read any number of times.
    Repeatable(ContentProvider),
    /// A body that can be read only once.
    SingleUse(Box<dyn Read + Send>),
}

impl Debug for Payload {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Payload::Absent => f.write_str("Absent"),
            Payload::Repeatable(content) => f.debug_tuple("Repeatable").field(content).finish(),
            Payload::SingleUse(_) => f.write_str("SingleUse"),
        }
    }
}

impl Payload {
    /// Create a single-use payload from a reader.
    pub fn single_use(r: impl Read + Send + 'static) -> Self {
        Payload::SingleUse(Box::new(r))
    }

    /// Check if this payload can be read more than once.
    ///
    /// Absent payloads are trivially repeatable.
    pub fn is_repeatable(&self) -> bool {
        !matches!(self, Payload::SingleUse(_))
    }
}

impl From<ContentProvider> for Payload {
    fn from(content: ContentProvider) -> Self {
        Payload::Repeatable(content)
    }
}

impl From<Bytes> for Payload {
    fn from(bs: Bytes) -> Self {
        Payload::Repeatable(ContentProvider::from_bytes(bs))
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bs: Vec<u8>) -> Self {
        Bytes::from(bs).into()
    }
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Bytes::from(s).into()
    }
}

impl From<&'static str> for Payload {
    fn from(s: &'static str) -> Self {
        Bytes::from_static(s.as_bytes()).into()
    }
}

/// Capture the body of given request for signing.
///
/// Returns `None` if the request has no body. Otherwise returns a provider the
/// signer may read as often as it likes, and leaves a repeatable payload with
/// the same content on the request:
///
/// - Repeatable payloads are handed out as-is.
/// - Single-use payloads are drained into memory once and replaced by the
///   buffered copy.
///
/// If draining fails the single-use stream is already consumed and the request
/// is left without a body.
pub fn capture_body<R>(req: &mut R) -> Result<Option<ContentProvider>>
where
    R: InterceptedRequest + ?Sized,
{
    let content = match req.take_payload()? {
        Payload::Absent => return Ok(None),
        Payload::Repeatable(content) => content,
        Payload::SingleUse(stream) => {
            let bs = drain(stream).map_err(|err| {
                Error::body_io("failed to drain single-use request body").with_source(err)
            })?;
            ContentProvider::from_bytes(bs)
        }
    };

    req.set_payload(Payload::Repeatable(content.clone()))?;
    Ok(Some(content))
}

fn drain(mut r: impl Read) -> std::io::Result<Bytes> {
    let mut buf = Vec::new();
    r.read_to_end(&mut buf)?;
    Ok(Bytes::from(buf))
}
