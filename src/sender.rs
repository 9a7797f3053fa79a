// Copyright (C) 2024 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: (Apache-2.0 OR MIT)

use crate::log::debug;
use crate::Error;
use crate::Method;
use crate::Params;
use crate::Request;
use crate::Transport;


/// The outcome of sending a request: either the decoded response body
/// or the error that prevented us from retrieving it.
pub type Outcome = Result<String, Error>;


/// A handler receiving the outcome of a request.
///
/// Both methods consume the handler, so exactly one of them can ever
/// be invoked.
pub trait ResponseHandler {
  /// Invoked with the decoded response body.
  fn on_success(self, body: String);
  /// Invoked with the error that occurred.
  fn on_failure(self, error: Error);
}

impl<F> ResponseHandler for F
where
  F: FnOnce(Outcome),
{
  #[inline]
  fn on_success(self, body: String) {
    self(Ok(body))
  }

  #[inline]
  fn on_failure(self, error: Error) {
    self(Err(error))
  }
}


/// Create and send a single request, decoding the response body as
/// text.
///
/// `client` is borrowed for the duration of the call only, allowing
/// session state such as cookies to carry over to later requests made
/// through it. Parameters are put in the query string of `GET` requests
/// and sent as a form encoded body for `POST` requests. Any failure is
/// terminal; no retries are attempted.
///
/// Response bodies are returned regardless of the HTTP status code.
pub fn send<T>(client: &T, method: Method, url: &str, params: Option<&Params>) -> Outcome
where
  T: Transport + ?Sized,
{
  let request = Request::new(method, url, params)?;
  let response = client.execute(&request)?;
  debug!(
    "received {} response from {} for {method} {}",
    response.status,
    response.url,
    request.url()
  );
  response.text()
}


/// Create and send a single request, reporting the outcome to
/// `handler`.
///
/// This is a callback flavored version of [`send`]: exactly one of
/// [`ResponseHandler::on_success`] and [`ResponseHandler::on_failure`]
/// is invoked before the function returns.
pub fn send_with<T, H>(client: &T, method: Method, url: &str, params: Option<&Params>, handler: H)
where
  T: Transport + ?Sized,
  H: ResponseHandler,
{
  match send(client, method, url, params) {
    Ok(body) => handler.on_success(body),
    Err(err) => handler.on_failure(err),
  }
}
