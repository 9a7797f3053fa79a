// Copyright (C) 2026 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: (Apache-2.0 OR MIT)

use std::time::Duration;

use anyhow::Context as _;
use anyhow::Result;

use crate::util::env_var;
use crate::util::parse_env_var;
use crate::util::parse_flag;
use crate::RedirectPolicy;


/// The maximum number of redirects followed for a single request by
/// default.
pub const DEFAULT_MAX_REDIRECTS: usize = 10;


/// Configuration of a [`Browser`][crate::Browser].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
  /// The `User-Agent` to send along with each request.
  pub user_agent: Option<String>,
  /// The timeout applied to each individual request, including the
  /// reading of its body.
  pub timeout: Option<Duration>,
  /// The maximum number of redirects to follow for a single request.
  pub max_redirects: usize,
  /// The redirect policy to use.
  pub redirect_policy: RedirectPolicy,
}

impl Config {
  /// Create a [`Config`] from the environment.
  ///
  /// The following variables are honored, falling back to the
  /// respective default if unset or empty:
  /// - `XHR_USER_AGENT`: the user agent to send
  /// - `XHR_TIMEOUT_SECS`: the per request timeout, in seconds
  /// - `XHR_MAX_REDIRECTS`: the maximum number of redirects to follow
  /// - `XHR_STRICT_REDIRECTS`: if set to a true value, don't treat all
  ///   `301` and `302` responses as redirects
  pub fn from_env() -> Result<Self> {
    let mut slf = Self::default();

    if let Some(user_agent) = env_var("XHR_USER_AGENT")? {
      slf.user_agent = Some(user_agent);
    }
    if let Some(secs) = parse_env_var::<u64>("XHR_TIMEOUT_SECS")? {
      slf.timeout = Some(Duration::from_secs(secs));
    }
    if let Some(max) = parse_env_var::<usize>("XHR_MAX_REDIRECTS")? {
      slf.max_redirects = max;
    }
    if let Some(strict) = env_var("XHR_STRICT_REDIRECTS")? {
      let strict = parse_flag(&strict)
        .with_context(|| format!("XHR_STRICT_REDIRECTS value `{strict}` is not a boolean"))?;
      if strict {
        slf.redirect_policy = RedirectPolicy::Strict;
      }
    }

    Ok(slf)
  }
}

impl Default for Config {
  fn default() -> Self {
    Self {
      user_agent: None,
      timeout: None,
      max_redirects: DEFAULT_MAX_REDIRECTS,
      redirect_policy: RedirectPolicy::Browser,
    }
  }
}
