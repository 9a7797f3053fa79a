// Copyright (C) 2026 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: (Apache-2.0 OR MIT)

use std::borrow::Cow;
use std::fmt::Debug;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::io::Read;

use encoding_rs::Encoding;
use encoding_rs::WINDOWS_1252;

use http::header::CONTENT_TYPE;
use http::HeaderMap;
use http::StatusCode;

use mime::Mime;

use url::Url;

use crate::Error;


/// A response as received from a [`Transport`][crate::Transport].
///
/// The body is a plain reader and can only be consumed once, either
/// directly or through [`Response::text`], which takes ownership of
/// the response.
pub struct Response {
  /// The response's status code.
  pub status: StatusCode,
  /// The headers the server sent.
  pub headers: HeaderMap,
  /// The URL the response was ultimately retrieved from, after any
  /// redirects.
  pub url: Url,
  /// A reader for the response body.
  pub body: Box<dyn Read>,
}

impl Response {
  /// The character set declared in the `Content-Type` header, if any,
  /// as spelled by the server.
  pub fn charset(&self) -> Option<String> {
    let content_type = self.headers.get(CONTENT_TYPE)?.to_str().ok()?;
    let mime_type = content_type.parse::<Mime>().ok()?;
    let charset = mime_type.get_param(mime::CHARSET)?;
    Some(charset.as_str().to_string())
  }

  /// Read the response body in its entirety and decode it as text.
  ///
  /// A byte order mark takes precedence. Otherwise the body is
  /// interpreted according to the declared character set, falling back
  /// to ISO-8859-1 (in its WHATWG `windows-1252` form) if none is
  /// declared. Content that is malformed for the chosen encoding, as
  /// well as a character set we don't know, constitute decode errors.
  pub fn text(mut self) -> Result<String, Error> {
    let mut bytes = Vec::new();
    let _count = self
      .body
      .read_to_end(&mut bytes)
      .map_err(|err| Error::Decode(Box::new(err)))?;

    let (encoding, bom_len) = if let Some((encoding, bom_len)) = Encoding::for_bom(&bytes) {
      (encoding, bom_len)
    } else if let Some(charset) = self.charset() {
      let encoding = Encoding::for_label(charset.as_bytes()).ok_or_else(|| {
        Error::Decode(format!("unsupported character set `{charset}`").into())
      })?;
      (encoding, 0)
    } else {
      (WINDOWS_1252, 0)
    };

    encoding
      .decode_without_bom_handling_and_without_replacement(&bytes[bom_len..])
      .map(Cow::into_owned)
      .ok_or_else(|| {
        Error::Decode(format!("response body is not valid {}", encoding.name()).into())
      })
  }
}

impl Debug for Response {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    f.debug_struct("Response")
      .field("status", &self.status)
      .field("headers", &self.headers)
      .field("url", &self.url)
      .finish_non_exhaustive()
  }
}
