// Copyright (C) 2026 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: (Apache-2.0 OR MIT)

use std::collections::HashMap;

use url::form_urlencoded::Serializer;
use url::Url;

use crate::log::debug;
use crate::Error;
use crate::Method;


/// The content type we use for form encoded request bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// A set of request parameters, mapping names to values.
pub type Params = HashMap<String, String>;


/// A form encoded request body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormBody(String);

impl FormBody {
  fn new(params: &Params) -> Self {
    let mut serializer = Serializer::new(String::new());
    let _serializer = serializer.extend_pairs(params.iter());
    Self(serializer.finish())
  }

  /// Retrieve the encoded form data.
  #[inline]
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// The value of the `Content-Type` header describing this body.
  #[inline]
  pub fn content_type(&self) -> &'static str {
    FORM_CONTENT_TYPE
  }
}


/// A fully prepared request, ready to be handed to a
/// [`Transport`][crate::Transport].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
  method: Method,
  url: Url,
  body: Option<FormBody>,
}

impl Request {
  /// Prepare a request to `url` carrying the provided parameters.
  ///
  /// For `GET` requests parameters are set in the query string,
  /// replacing any pair of the same name already present in `url`.
  /// For `POST` requests they become a form encoded body, unless there
  /// are none, in which case no body is attached at all.
  pub fn new(method: Method, url: &str, params: Option<&Params>) -> Result<Self, Error> {
    let mut url = Url::parse(url).map_err(|err| Error::InvalidUrl(Box::new(err)))?;
    let params = params.filter(|params| !params.is_empty());

    let body = match method {
      Method::Get => {
        if let Some(params) = params {
          let () = set_query_params(&mut url, params);
        }
        None
      },
      Method::Post => params.map(FormBody::new),
    };

    let () = check_url(&url)?;

    let slf = Self { method, url, body };
    let () = slf.trace();
    Ok(slf)
  }

  /// Create a request without any validation or parameter handling.
  ///
  /// This constructor is used for following redirects, where the
  /// target was already resolved by the client.
  #[cfg(feature = "reqwest")]
  pub(crate) fn from_parts(method: Method, url: Url, body: Option<FormBody>) -> Self {
    Self { method, url, body }
  }

  fn trace(&self) {
    debug!("{} {}", self.method, self.url);
    if let Some(body) = &self.body {
      debug!("     with form data: {}", body.as_str());
    }
  }

  /// The request's method.
  #[inline]
  pub fn method(&self) -> Method {
    self.method
  }

  /// The final URL the request is sent to.
  #[inline]
  pub fn url(&self) -> &Url {
    &self.url
  }

  /// The form encoded body, if any.
  #[inline]
  pub fn body(&self) -> Option<&FormBody> {
    self.body.as_ref()
  }
}


fn set_query_params(url: &mut Url, params: &Params) {
  let kept = url
    .query_pairs()
    .filter(|(name, _)| !params.contains_key(&**name))
    .map(|(name, value)| (name.into_owned(), value.into_owned()))
    .collect::<Vec<_>>();

  let mut pairs = url.query_pairs_mut();
  let _pairs = pairs
    .clear()
    .extend_pairs(kept)
    .extend_pairs(params.iter());
}


fn check_url(url: &Url) -> Result<(), Error> {
  match url.scheme() {
    "http" | "https" if url.has_host() => Ok(()),
    "http" | "https" => Err(Error::InvalidUrl(format!("URL `{url}` has no host").into())),
    scheme => Err(Error::InvalidUrl(
      format!("URL `{url}` uses unsupported scheme `{scheme}`").into(),
    )),
  }
}
