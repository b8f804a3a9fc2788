//! Scheme rewriting.
//!
//! Generic URL parsers reject multi-segment schemes such as `jdbc:mysql:`.
//! Every lookup therefore rewrites the scheme into the `http://` placeholder,
//! hands the result to [`url::Url`], and ignores the placeholder afterwards.
//!
//! Two rewrites exist:
//!
//! - [`sanitize_jdbc_prefix`] replaces a literal `jdbc:` prefix and leaves the
//!   rest alone, so `jdbc:mysql://h/db` becomes `http://mysql://h/db`. Only the
//!   query of the result is meaningful.
//! - [`replace_scheme`] replaces everything up to and including `://`, so
//!   `jdbc:oracle:thin://h:1521/db` becomes `http://h:1521/db`.

use std::borrow::Cow;

use url::Url;

use crate::error::{JdbcUrlError, JdbcUrlResult};

/// Scheme substituted for whatever the connect string declared.
pub const PLACEHOLDER_SCHEME: &str = "http://";

/// Pseudo-scheme prefix shared by all JDBC connect strings.
pub const JDBC_PREFIX: &str = "jdbc:";

/// Token separating the scheme from the authority.
pub const SCHEME_SEPARATOR: &str = "://";

/// Default port of the placeholder scheme, which `url` hides from `Url::port`.
const PLACEHOLDER_DEFAULT_PORT: u16 = 80;

/// Rewrite a `jdbc:` prefix into the placeholder scheme.
///
/// Strings already starting with `http://` or `https://` are returned as-is;
/// anything else gets the placeholder prepended.
///
/// ```rust
/// use jdbc_url_core::normalize::sanitize_jdbc_prefix;
///
/// assert_eq!(sanitize_jdbc_prefix("jdbc:mysql://h/db"), "http://mysql://h/db");
/// assert_eq!(sanitize_jdbc_prefix("https://h/db"), "https://h/db");
/// assert_eq!(sanitize_jdbc_prefix("h/db"), "http://h/db");
/// ```
pub fn sanitize_jdbc_prefix(connect_string: &str) -> Cow<'_, str> {
    if let Some(rest) = connect_string.strip_prefix(JDBC_PREFIX) {
        Cow::Owned(format!("{}{}", PLACEHOLDER_SCHEME, rest))
    } else if connect_string.starts_with("http://") || connect_string.starts_with("https://") {
        Cow::Borrowed(connect_string)
    } else {
        Cow::Owned(format!("{}{}", PLACEHOLDER_SCHEME, connect_string))
    }
}

/// Replace everything up to and including the first `://` with the
/// placeholder scheme.
///
/// Returns `None` when the connect string has no `://`; the caller decides
/// whether to use the string as-is or to prepend the placeholder.
///
/// ```rust
/// use jdbc_url_core::normalize::replace_scheme;
///
/// assert_eq!(
///     replace_scheme("jdbc:oracle:thin://dbhost:1521/orcl").as_deref(),
///     Some("http://dbhost:1521/orcl")
/// );
/// assert_eq!(replace_scheme("dbhost:1521/orcl"), None);
/// ```
pub fn replace_scheme(connect_string: &str) -> Option<String> {
    connect_string
        .find(SCHEME_SEPARATOR)
        .map(|offset| {
            format!(
                "{}{}",
                PLACEHOLDER_SCHEME,
                &connect_string[offset + SCHEME_SEPARATOR.len()..]
            )
        })
}

/// Parse an already normalized string, attributing failures to `original`.
pub fn parse_normalized(normalized: &str, original: &str) -> JdbcUrlResult<Url> {
    Url::parse(normalized).map_err(|e| JdbcUrlError::malformed(original, e))
}

/// Normalize a connect string with [`sanitize_jdbc_prefix`] and parse it.
///
/// This is the only lookup that surfaces [`JdbcUrlError::Malformed`] to the
/// caller instead of logging it.
///
/// ```rust
/// use jdbc_url_core::to_generic_url;
///
/// let url = to_generic_url("jdbc:mysql://h/db?useSSL=true").unwrap();
/// assert_eq!(url.query(), Some("useSSL=true"));
///
/// assert!(to_generic_url("jdbc:mysql:notaport").is_err());
/// ```
pub fn to_generic_url(connect_string: &str) -> JdbcUrlResult<Url> {
    parse_normalized(&sanitize_jdbc_prefix(connect_string), connect_string)
}

/// The port written in the URL, including an explicit `:80`.
///
/// `Url::port` returns `None` when the port equals the scheme default, which
/// would make `http://h:80/db` indistinguishable from `http://h/db`. The raw
/// authority is checked to recover the explicit default.
pub fn explicit_port(url: &Url, normalized: &str) -> Option<u16> {
    url.port().or_else(|| {
        (url.port_or_known_default() == Some(PLACEHOLDER_DEFAULT_PORT)
            && authority_has_port(normalized))
        .then_some(PLACEHOLDER_DEFAULT_PORT)
    })
}

fn authority_has_port(normalized: &str) -> bool {
    let Some((_, rest)) = normalized.split_once(SCHEME_SEPARATOR) else {
        return false;
    };
    let end = rest.find(['/', '\\', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..end];
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, hp)| hp);

    match host_port.rsplit_once(':') {
        Some((_, port)) => !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}

/// The path of a normalized string exactly as written, without leading `/`.
///
/// `Url::path` re-encodes spaces and non-ASCII characters and resolves `..`
/// segments; database names must come back as the caller wrote them. The
/// slice runs from the end of the authority to the first `?` or `#`.
///
/// ```rust
/// use jdbc_url_core::normalize::raw_database_path;
///
/// assert_eq!(raw_database_path("http://h:3306/my db?x=1"), "my db");
/// assert_eq!(raw_database_path("http://h/a/../db"), "a/../db");
/// assert_eq!(raw_database_path("http://h?x=1"), "");
/// ```
pub fn raw_database_path(normalized: &str) -> &str {
    // `Url::parse` ignores surrounding control characters and spaces.
    let normalized = normalized.trim_matches(|c: char| c <= ' ');
    let Some((_, rest)) = normalized.split_once(SCHEME_SEPARATOR) else {
        return "";
    };
    let rest = rest.split(['?', '#']).next().unwrap_or_default();
    match rest.find(['/', '\\']) {
        Some(start) => rest[start..].trim_start_matches('/'),
        None => "",
    }
}

/// Strip the `?query` tail off a connect string.
///
/// The scheme rewrite never touches the tail, so the first `?` of the
/// original text is the start of the query.
pub(crate) fn strip_query(connect_string: &str) -> &str {
    connect_string
        .split_once('?')
        .map_or(connect_string, |(base, _)| base)
}
