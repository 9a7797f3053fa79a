// Copyright (C) 2026 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: (Apache-2.0 OR MIT)

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

use http::HeaderValue;
use http::Method;
use http::StatusCode;

use crate::log::warn;


/// An error indicating that a response violated the protocol in a way
/// that prevented a redirect decision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProtocolError(String);

impl ProtocolError {
  /// Create a new [`ProtocolError`] with the given description.
  pub fn new<S>(msg: S) -> Self
  where
    S: Into<String>,
  {
    Self(msg.into())
  }
}

impl Display for ProtocolError {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    f.write_str(&self.0)
  }
}

impl Error for ProtocolError {}


/// Check whether `status` is one of the status codes we consider
/// redirects at all.
#[inline]
fn is_redirect_status(status: StatusCode) -> bool {
  matches!(
    status,
    StatusCode::MOVED_PERMANENTLY
      | StatusCode::FOUND
      | StatusCode::SEE_OTHER
      | StatusCode::TEMPORARY_REDIRECT
      | StatusCode::PERMANENT_REDIRECT
  )
}

#[inline]
fn is_redirectable(method: &Method) -> bool {
  *method == Method::GET || *method == Method::HEAD
}


/// The default redirect strategy.
///
/// `303 See Other` is always followed. `301`, `307`, and `308` are only
/// followed for safe methods (`GET` and `HEAD`), as is `302`, which in
/// addition requires a `Location` header. A `Location` header that is
/// not valid visible ASCII on any redirect status is a protocol error.
pub fn default_is_redirected(
  method: &Method,
  status: StatusCode,
  location: Option<&HeaderValue>,
) -> Result<bool, ProtocolError> {
  if !is_redirect_status(status) {
    return Ok(false)
  }

  if let Some(location) = location {
    let _location = location.to_str().map_err(|err| {
      ProtocolError::new(format!(
        "invalid `Location` header in {status} response: {err}"
      ))
    })?;
  }

  let redirect = match status {
    StatusCode::SEE_OTHER => true,
    StatusCode::FOUND => is_redirectable(method) && location.is_some(),
    _ => is_redirectable(method),
  };
  Ok(redirect)
}


/// Decide whether a response constitutes a redirect to follow.
///
/// The decision of the `default` delegate is consulted first. Should it
/// decline, or fail to come to a conclusion, `301 Moved Permanently`
/// and `302 Found` are nevertheless treated as redirects, regardless of
/// the request method. Delegate errors are logged, never propagated.
pub fn is_redirected<F>(default: F, status: StatusCode) -> bool
where
  F: FnOnce() -> Result<bool, ProtocolError>,
{
  let redirect = match default() {
    Ok(redirect) => redirect,
    Err(err) => {
      warn!("failed to determine redirect status: {err}");
      false
    },
  };

  redirect || status == StatusCode::MOVED_PERMANENTLY || status == StatusCode::FOUND
}


/// The redirect policy to install in a client.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RedirectPolicy {
  /// Only follow what the default strategy considers a redirect.
  Strict,
  /// Follow the default strategy, but always treat `301` and `302`
  /// responses as redirects, the way browsers do.
  #[default]
  Browser,
}

impl RedirectPolicy {
  /// Check whether a response with the given `status` and `location`,
  /// received for a request using `method`, should be followed.
  pub fn should_follow(
    &self,
    method: &Method,
    status: StatusCode,
    location: Option<&HeaderValue>,
  ) -> bool {
    let default = || default_is_redirected(method, status, location);

    match self {
      Self::Strict => default().unwrap_or_else(|err| {
        warn!("failed to determine redirect status: {err}");
        false
      }),
      Self::Browser => is_redirected(default, status),
    }
  }
}
