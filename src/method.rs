// Copyright (C) 2026 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: (Apache-2.0 OR MIT)

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::str::FromStr;


/// The HTTP methods a request can be issued with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
  /// A `GET` request, carrying parameters in the query string.
  Get,
  /// A `POST` request, carrying parameters as a form encoded body.
  Post,
}

impl Method {
  /// Retrieve the method's token as used on the wire.
  #[inline]
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Get => "GET",
      Self::Post => "POST",
    }
  }
}

impl Display for Method {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    f.write_str(self.as_str())
  }
}

impl From<Method> for http::Method {
  fn from(method: Method) -> Self {
    match method {
      Method::Get => Self::GET,
      Method::Post => Self::POST,
    }
  }
}

/// Parse a method token. Only `GET` and `POST` are accepted, and the
/// comparison is case-sensitive.
impl FromStr for Method {
  type Err = UnsupportedMethod;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "GET" => Ok(Self::Get),
      "POST" => Ok(Self::Post),
      _ => Err(UnsupportedMethod(s.to_string())),
    }
  }
}


/// The error returned when attempting to use a method other than `GET`
/// or `POST`.
///
/// This is a usage error on behalf of the caller and never reported
/// through a request's outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnsupportedMethod(pub String);

impl Display for UnsupportedMethod {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    write!(f, "unsupported HTTP request type: {}", self.0)
  }
}

impl Error for UnsupportedMethod {}
