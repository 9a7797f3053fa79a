// Copyright (C) 2025 Arvid Norlander <VorpalBlade@users.noreply.github.com>
// SPDX-License-Identifier: (Apache-2.0 OR MIT)

use std::borrow::Cow;

use anyhow::Context as _;
use anyhow::Result;

use http::header::CONTENT_TYPE;
use http::header::LOCATION;
use http::StatusCode;

use reqwest::blocking::Client as BlockingClient;
use reqwest::blocking::Response as BlockingResponse;
use reqwest::redirect::Policy;

use crate::log::debug;
use crate::Config;
use crate::Error;
use crate::Method;
use crate::RedirectPolicy;
use crate::Request;
use crate::Response;
use crate::Transport;


fn issue(client: &BlockingClient, request: &Request) -> Result<BlockingResponse, Error> {
  let method = http::Method::from(request.method());
  let mut builder = client.request(method, request.url().clone());
  if let Some(body) = request.body() {
    builder = builder
      .header(CONTENT_TYPE, body.content_type())
      .body(body.as_str().to_string());
  }

  builder
    .send()
    .map_err(|err| Error::Transport(Box::new(err)))
}

fn into_response(response: BlockingResponse) -> Response {
  Response {
    status: response.status(),
    headers: response.headers().clone(),
    url: response.url().clone(),
    body: Box::new(response),
  }
}


/// Implements the `Transport` trait for the `reqwest` crate.
///
/// Redirects are handled according to the client's own redirect policy.
impl Transport for BlockingClient {
  fn execute(&self, request: &Request) -> Result<Response, Error> {
    issue(self, request).map(into_response)
  }
}


/// A client mimicking a browser: cookies are kept for the lifetime of
/// the object and redirects are followed according to a
/// [`RedirectPolicy`].
#[derive(Debug)]
pub struct Browser {
  /// The HTTP client we use for satisfying requests.
  client: BlockingClient,
  /// The policy deciding which responses are followed as redirects.
  redirect_policy: RedirectPolicy,
  /// The maximum number of redirects to follow per request.
  max_redirects: usize,
}

impl Browser {
  /// Create a new [`Browser`] using the default configuration.
  pub fn new() -> Result<Self> {
    Self::with_config(Config::default())
  }

  /// Create a new [`Browser`] configured from the environment.
  ///
  /// See [`Config::from_env`] for the variables honored.
  pub fn from_env() -> Result<Self> {
    let config = Config::from_env().context("failed to read configuration from environment")?;
    Self::with_config(config)
  }

  /// Create a new [`Browser`] using the provided configuration.
  pub fn with_config(config: Config) -> Result<Self> {
    let Config {
      user_agent,
      timeout,
      max_redirects,
      redirect_policy,
    } = config;

    // We follow redirects ourselves, as only then do we know the
    // method of the request that caused them.
    let mut builder = BlockingClient::builder()
      .cookie_store(true)
      .redirect(Policy::none());
    if let Some(user_agent) = user_agent {
      builder = builder.user_agent(user_agent);
    }
    if let Some(timeout) = timeout {
      builder = builder.timeout(timeout);
    }

    let client = builder.build().context("failed to create HTTP client")?;
    debug!("created browser with {redirect_policy:?} redirect policy, following at most {max_redirects} redirects");

    let slf = Self {
      client,
      redirect_policy,
      max_redirects,
    };
    Ok(slf)
  }
}

impl Transport for Browser {
  fn execute(&self, request: &Request) -> Result<Response, Error> {
    let mut request = Cow::Borrowed(request);
    let mut redirects = 0;

    loop {
      let response = issue(&self.client, &request)?;
      let status = response.status();
      let location = response.headers().get(LOCATION);
      let method = http::Method::from(request.method());

      if !self.redirect_policy.should_follow(&method, status, location) {
        return Ok(into_response(response))
      }

      let target = match location {
        Some(location) => location
          .to_str()
          .ok()
          .and_then(|location| response.url().join(location).ok()),
        None => return Ok(into_response(response)),
      };
      let target = target.ok_or_else(|| {
        Error::Transport(
          format!(
            "received {status} response from `{}` with invalid `Location` header",
            response.url()
          )
          .into(),
        )
      })?;

      if redirects >= self.max_redirects {
        return Err(Error::Transport(
          format!(
            "too many redirects (more than {}) for `{}`",
            self.max_redirects,
            request.url()
          )
          .into(),
        ))
      }
      redirects += 1;

      // Browsers turn redirected requests into bodiless `GET`s, except
      // for the method preserving 307 and 308.
      let (method, body) = match status {
        StatusCode::TEMPORARY_REDIRECT | StatusCode::PERMANENT_REDIRECT => {
          (request.method(), request.body().cloned())
        },
        _ => (Method::Get, None),
      };

      debug!("following {status} redirect to {target}");
      request = Cow::Owned(Request::from_parts(method, target, body));
    }
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  use std::net::TcpListener;
  use std::time::Duration;

  use mockito::Matcher;
  use mockito::Server;

  use crate::send;
  use crate::Params;


  fn params<const N: usize>(pairs: [(&str, &str); N]) -> Params {
    pairs
      .into_iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect()
  }


  /// Check that a `GET` request carries its parameters in the query
  /// string and that the body is handed back.
  #[test]
  fn get_search() {
    let mut server = Server::new();
    let mock = server
      .mock("GET", "/search")
      .match_query(Matcher::UrlEncoded("q".into(), "cats".into()))
      .with_status(200)
      .with_body("ok")
      .create();

    let browser = Browser::new().unwrap();
    let url = format!("{}/search", server.url());
    let body = send(&browser, Method::Get, &url, Some(&params([("q", "cats")]))).unwrap();
    assert_eq!(body, "ok");
    let () = mock.assert();
  }

  /// Check that a `POST` request carries its parameters as a UTF-8 form
  /// encoded body.
  #[test]
  fn post_login() {
    let mut server = Server::new();
    let mock = server
      .mock("POST", "/login")
      .match_header("content-type", "application/x-www-form-urlencoded; charset=UTF-8")
      .match_body(Matcher::AllOf(vec![
        Matcher::UrlEncoded("user".into(), "a".into()),
        Matcher::UrlEncoded("pass".into(), "b".into()),
      ]))
      .with_body("welcome")
      .create();

    let browser = Browser::new().unwrap();
    let url = format!("{}/login", server.url());
    let params = params([("user", "a"), ("pass", "b")]);
    let body = send(&browser, Method::Post, &url, Some(&params)).unwrap();
    assert_eq!(body, "welcome");
    let () = mock.assert();
  }

  /// Check that non-success responses still have their body decoded.
  #[test]
  fn error_status_body() {
    let mut server = Server::new();
    let _mock = server
      .mock("GET", "/missing")
      .with_status(404)
      .with_header("content-type", "text/html; charset=iso-8859-1")
      .with_body(b"nicht gefunden: gr\xfc\xdfe")
      .create();

    let browser = Browser::new().unwrap();
    let url = format!("{}/missing", server.url());
    let body = send(&browser, Method::Get, &url, None).unwrap();
    assert_eq!(body, "nicht gefunden: grüße");
  }

  /// Make sure that a `302` in response to a `POST` is followed with a
  /// `GET`, the way browsers do it.
  #[test]
  fn post_redirect_followed() {
    let mut server = Server::new();
    let login = server
      .mock("POST", "/login")
      .with_status(302)
      .with_header("location", "/home")
      .with_body("moved")
      .create();
    let home = server
      .mock("GET", "/home")
      .match_body("")
      .with_body("home")
      .create();

    let browser = Browser::new().unwrap();
    let url = format!("{}/login", server.url());
    let params = params([("user", "a")]);
    let body = send(&browser, Method::Post, &url, Some(&params)).unwrap();
    assert_eq!(body, "home");
    let () = login.assert();
    let () = home.assert();
  }

  /// Check that with the strict policy a `302` to a `POST` is not
  /// followed.
  #[test]
  fn post_redirect_strict() {
    let mut server = Server::new();
    let _login = server
      .mock("POST", "/login")
      .with_status(302)
      .with_header("location", "/home")
      .with_body("moved")
      .create();
    let home = server.mock("GET", "/home").expect(0).create();

    let config = Config {
      redirect_policy: RedirectPolicy::Strict,
      ..Default::default()
    };
    let browser = Browser::with_config(config).unwrap();
    let url = format!("{}/login", server.url());
    let body = send(&browser, Method::Post, &url, None).unwrap();
    assert_eq!(body, "moved");
    let () = home.assert();
  }

  /// Check that `301` responses to `GET` requests are followed to an
  /// absolute location.
  #[test]
  fn get_moved_permanently() {
    let mut server = Server::new();
    let target = format!("{}/new?x=1", server.url());
    let _old = server
      .mock("GET", "/old")
      .with_status(301)
      .with_header("location", &target)
      .create();
    let _new = server
      .mock("GET", "/new")
      .match_query(Matcher::UrlEncoded("x".into(), "1".into()))
      .with_body("new")
      .create();

    let browser = Browser::new().unwrap();
    let url = format!("{}/old", server.url());
    let body = send(&browser, Method::Get, &url, None).unwrap();
    assert_eq!(body, "new");
  }

  /// Make sure that redirect loops are cut short.
  #[test]
  fn too_many_redirects() {
    let mut server = Server::new();
    let _loop = server
      .mock("GET", "/loop")
      .with_status(302)
      .with_header("location", "/loop")
      .expect(4)
      .create();

    let config = Config {
      max_redirects: 3,
      ..Default::default()
    };
    let browser = Browser::with_config(config).unwrap();
    let url = format!("{}/loop", server.url());
    let err = send(&browser, Method::Get, &url, None).unwrap_err();
    assert!(matches!(err, Error::Transport(..)), "{err}");
    assert!(err.to_string().contains("too many redirects"), "{err}");
  }

  /// Check that a redirect status without a `Location` header is handed
  /// back as is.
  #[test]
  fn redirect_without_location() {
    let mut server = Server::new();
    let _mock = server
      .mock("GET", "/nowhere")
      .with_status(301)
      .with_body("stuck")
      .create();

    let browser = Browser::new().unwrap();
    let url = format!("{}/nowhere", server.url());
    let body = send(&browser, Method::Get, &url, None).unwrap();
    assert_eq!(body, "stuck");
  }

  /// Check that cookies set by the server are sent along with
  /// subsequent requests.
  #[test]
  fn cookies_persist() {
    let mut server = Server::new();
    let _login = server
      .mock("POST", "/login")
      .with_header("set-cookie", "session=abc; Path=/")
      .with_body("logged in")
      .create();
    let grades = server
      .mock("GET", "/grades")
      .match_header("cookie", "session=abc")
      .with_body("A+")
      .create();

    let browser = Browser::new().unwrap();
    let url = format!("{}/login", server.url());
    let params = params([("user", "a"), ("pass", "b")]);
    let body = send(&browser, Method::Post, &url, Some(&params)).unwrap();
    assert_eq!(body, "logged in");

    let url = format!("{}/grades", server.url());
    let body = send(&browser, Method::Get, &url, None).unwrap();
    assert_eq!(body, "A+");
    let () = grades.assert();
  }

  /// Check that the configured user agent is sent.
  #[test]
  fn user_agent() {
    let mut server = Server::new();
    let mock = server
      .mock("GET", "/")
      .match_header("user-agent", "xhr-test/1.0")
      .with_body("hi")
      .create();

    let config = Config {
      user_agent: Some("xhr-test/1.0".to_string()),
      timeout: Some(Duration::from_secs(30)),
      ..Default::default()
    };
    let browser = Browser::with_config(config).unwrap();
    let body = send(&browser, Method::Get, &server.url(), None).unwrap();
    assert_eq!(body, "hi");
    let () = mock.assert();
  }

  /// Make sure that connection failures are reported as transport
  /// errors.
  #[test]
  fn connection_refused() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    // Stop listening so that connection attempts get refused.
    let () = drop(listener);

    let browser = Browser::new().unwrap();
    let url = format!("http://{addr}/gone");
    let err = send(&browser, Method::Get, &url, None).unwrap_err();
    assert!(matches!(err, Error::Transport(..)), "{err}");
  }

  /// Check that a bare `reqwest` client can be used as transport as
  /// well.
  #[test]
  fn bare_client() {
    let mut server = Server::new();
    let _mock = server
      .mock("GET", "/search")
      .match_query(Matcher::UrlEncoded("q".into(), "dogs".into()))
      .with_body("woof")
      .create();

    let client = BlockingClient::new();
    let url = format!("{}/search?q=cats", server.url());
    let body = send(&client, Method::Get, &url, Some(&params([("q", "dogs")]))).unwrap();
    assert_eq!(body, "woof");
  }
}
