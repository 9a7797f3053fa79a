// Copyright (C) 2024 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: (Apache-2.0 OR MIT)

use std::env;
use std::error::Error;
use std::str::FromStr;

use anyhow::anyhow;
use anyhow::Context as _;
use anyhow::Result;


/// Read the environment variable `name`, treating an empty value the
/// same as an absent one.
pub(crate) fn env_var(name: &str) -> Result<Option<String>> {
  let value = if let Some(value) = env::var_os(name) {
    value
  } else {
    return Ok(None)
  };

  let value = value
    .into_string()
    .map_err(|_| anyhow!("{name} does not contain valid Unicode"))?;
  let value = value.trim();
  if value.is_empty() {
    Ok(None)
  } else {
    Ok(Some(value.to_string()))
  }
}


/// Read and parse the environment variable `name`.
pub(crate) fn parse_env_var<T>(name: &str) -> Result<Option<T>>
where
  T: FromStr,
  T::Err: Error + Send + Sync + 'static,
{
  env_var(name)?
    .map(|value| {
      value
        .parse::<T>()
        .with_context(|| format!("failed to parse {name} value `{value}`"))
    })
    .transpose()
}


/// Parse a boolean flag as commonly found in environment variables.
pub(crate) fn parse_flag(s: &str) -> Option<bool> {
  match s.to_ascii_lowercase().as_str() {
    "1" | "true" | "yes" | "on" => Some(true),
    "0" | "false" | "no" | "off" => Some(false),
    _ => None,
  }
}


/// Set the environment variable `name` to `value`.
#[cfg(test)]
pub(crate) fn set_env(name: &str, value: &str) {
  // SAFETY: Tests touching the environment run in a forked process of
  //         their own, with no other thread accessing it concurrently.
  let () = unsafe { env::set_var(name, value) };
}

/// Remove the environment variable `name`.
#[cfg(test)]
pub(crate) fn remove_env(name: &str) {
  // SAFETY: Tests touching the environment run in a forked process of
  //         their own, with no other thread accessing it concurrently.
  let () = unsafe { env::remove_var(name) };
}
