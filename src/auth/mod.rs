//! Session cookies.
//!
//! Loads a Netscape-format cookie file, as exported by browsers or browser
//! extensions, into a single `Cookie` header value sent with every request.

mod cookies;

pub use cookies::{
    CookieError, CookieHeader, CookiePair, parse_netscape_cookies, read_cookie_header,
};
