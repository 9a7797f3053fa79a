// Copyright (C) 2024 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: (Apache-2.0 OR MIT)

//! A crate for issuing browser-style synchronous HTTP requests.
//!
//! A single call to [`send`] prepares one `GET` or `POST` request,
//! executes it through a long lived, caller owned client (so that
//! cookies persist between calls) and decodes the response body as
//! text.
//!
//! ```no_run
//! # use xhr::Browser;
//! # use xhr::Method;
//! # use xhr::Params;
//! let browser = Browser::new()?;
//! let params = Params::from([("q".to_string(), "cats".to_string())]);
//! let body = xhr::send(&browser, Method::Get, "http://example.com/search", Some(&params))?;
//! println!("{body}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod method;
mod redirect;
#[cfg(feature = "reqwest")]
mod reqwest_client;
mod request;
mod response;
mod sender;
mod transport;
mod util;

pub use config::Config;
pub use config::DEFAULT_MAX_REDIRECTS;
pub use method::Method;
pub use method::UnsupportedMethod;
pub use redirect::default_is_redirected;
pub use redirect::is_redirected;
pub use redirect::ProtocolError;
pub use redirect::RedirectPolicy;
#[cfg(feature = "reqwest")]
#[cfg_attr(docsrs, doc(cfg(feature = "reqwest")))]
pub use reqwest_client::Browser;
pub use request::FormBody;
pub use request::Params;
pub use request::Request;
pub use request::FORM_CONTENT_TYPE;
pub use response::Response;
pub use sender::send;
pub use sender::send_with;
pub use sender::Outcome;
pub use sender::ResponseHandler;
pub use transport::Error;
pub use transport::Transport;


#[cfg(feature = "tracing")]
#[macro_use]
#[allow(unused_imports)]
mod log {
  pub(crate) use tracing::debug;
  pub(crate) use tracing::error;
  pub(crate) use tracing::info;
  pub(crate) use tracing::instrument;
  pub(crate) use tracing::trace;
  pub(crate) use tracing::warn;
}

#[cfg(not(feature = "tracing"))]
#[macro_use]
#[allow(unused_imports)]
mod log {
  macro_rules! debug {
        ($($args:tt)*) => {{
          if false {
            // Make sure to use `args` to prevent any warnings about
            // unused variables.
            let _args = format_args!($($args)*);
          }
        }};
    }
  pub(crate) use debug;
  pub(crate) use debug as error;
  pub(crate) use debug as info;
  pub(crate) use debug as trace;
  pub(crate) use debug as warn;
}
