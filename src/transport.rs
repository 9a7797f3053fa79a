// Copyright (C) 2025 Arvid Norlander <VorpalBlade@users.noreply.github.com>
// SPDX-License-Identifier: (Apache-2.0 OR MIT)

use std::error::Error as StdError;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

use crate::Request;
use crate::Response;

/// An error that occurred while sending a request or processing its
/// response.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
  /// The provided URL was not well formed, or did not form a usable
  /// HTTP URL once parameters were applied.
  InvalidUrl(Box<dyn StdError + Send + Sync>),
  /// The request could not be executed, e.g., because of a connection
  /// failure or a protocol violation.
  Transport(Box<dyn StdError + Send + Sync>),
  /// The response body could not be read or converted into text.
  Decode(Box<dyn StdError + Send + Sync>),
}

impl Display for Error {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    match self {
      Self::InvalidUrl(err) => write!(f, "invalid URL: {err}"),
      Self::Transport(err) => write!(f, "failed to execute HTTP request: {err}"),
      Self::Decode(err) => write!(f, "failed to decode HTTP response: {err}"),
    }
  }
}

impl StdError for Error {
  fn source(&self) -> Option<&(dyn StdError + 'static)> {
    match self {
      Self::InvalidUrl(err) | Self::Transport(err) | Self::Decode(err) => Some(&**err),
    }
  }
}

/// A trait representing an HTTP client capable of executing blocking
/// requests.
///
/// Implementations are expected to be long lived and to persist
/// session state such as cookies between requests.
pub trait Transport: Debug {
  /// Execute the provided request, blocking until response headers
  /// have been received.
  ///
  /// Any non-success status is still reported as a [`Response`]. Only
  /// failures to carry out the exchange itself constitute an error.
  fn execute(&self, request: &Request) -> Result<Response, Error>;
}
