//! Session construction: a `reqwest::Client` primed with the user's browser cookies.
//!
//! Nothing here touches the network. The cookie jar and default headers are
//! fixed once `Session::build` returns.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Url};
use tracing::debug;

use crate::errors::SubmitError;

/// Attribute names that may appear in a pasted `Set-Cookie`-style string.
/// They describe the previous cookie and are not cookies themselves.
const COOKIE_ATTRIBUTES: &[&str] = &[
    "path", "domain", "expires", "max-age", "secure", "httponly", "samesite", "version",
    "comment",
];

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// The HTTP context shared by every request of a run.
#[derive(Clone)]
pub struct Session {
    pub client: Client,
    pub base_url: Url,
    /// Held so tests can inspect what the client will send.
    #[allow(dead_code)]
    jar: Arc<Jar>,
}

impl Session {
    /// Parses `cookie` and builds a client whose jar holds every pair, scoped to `base_url`.
    pub fn build(cookie: &str, user_agent: &str, base_url: Url) -> Result<Self, SubmitError> {
        let pairs = parse_cookie_header(cookie)?;

        let jar = Arc::new(Jar::default());
        for (name, value) in &pairs {
            jar.add_cookie_str(&format!("{name}={value}"), &base_url);
        }
        debug!("Loaded {} cookies for {}", pairs.len(), base_url);

        let mut headers = HeaderMap::new();
        let ua = HeaderValue::from_str(user_agent)
            .map_err(|e| SubmitError::InvalidHeader(format!("user agent: {e}")))?;
        headers.entry(USER_AGENT).or_insert(ua);

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .cookie_provider(Arc::clone(&jar))
            .build()?;

        Ok(Self {
            client,
            base_url,
            jar,
        })
    }

    /// Resolves a site-relative path such as `/vacancies/42` against the base URL.
    pub fn url(&self, path: &str) -> Result<Url, SubmitError> {
        self.base_url
            .join(path)
            .map_err(|e| SubmitError::InvalidUrl(format!("{path}: {e}")))
    }

    #[cfg(test)]
    fn cookie_header(&self) -> Option<String> {
        use reqwest::cookie::CookieStore;
        self.jar
            .cookies(&self.base_url)
            .and_then(|v| v.to_str().ok().map(str::to_owned))
    }
}

/// Splits a raw `Cookie` header (`name=value; name2=value2`) into pairs, in order.
///
/// Quoted values are unquoted and attribute segments such as `Path=/` are skipped.
/// Fails if a segment is not a pair or if no pair is found at all.
pub fn parse_cookie_header(raw: &str) -> Result<Vec<(String, String)>, SubmitError> {
    let mut pairs = Vec::new();

    for segment in raw.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        let (name, value) = match segment.split_once('=') {
            Some((n, v)) => (n.trim(), v.trim()),
            None if is_attribute(segment) => continue,
            None => {
                return Err(SubmitError::MalformedCookie(format!(
                    "segment '{segment}' is not a name=value pair"
                )))
            }
        };

        if is_attribute(name) {
            continue;
        }
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(SubmitError::MalformedCookie(format!(
                "invalid cookie name in '{segment}'"
            )));
        }

        let value = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .unwrap_or(value);
        pairs.push((name.to_string(), value.to_string()));
    }

    if pairs.is_empty() {
        return Err(SubmitError::MalformedCookie(
            "no name=value pairs found".to_string(),
        ));
    }
    Ok(pairs)
}

fn is_attribute(name: &str) -> bool {
    COOKIE_ATTRIBUTES
        .iter()
        .any(|attr| attr.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn base() -> Url {
        Url::parse("https://career.habr.com").unwrap()
    }

    fn as_map(header: &str) -> BTreeMap<String, String> {
        header
            .split("; ")
            .filter_map(|kv| kv.split_once('='))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_simple_pairs() {
        let pairs = parse_cookie_header("a=1; b=2").unwrap();
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string())
            ]
        );
    }

    #[test]
    fn test_parse_tolerates_whitespace_and_trailing_semicolon() {
        let pairs = parse_cookie_header("  a=1 ;b=2;  ").unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1], ("b".to_string(), "2".to_string()));
    }

    #[test]
    fn test_parse_unquotes_values_and_keeps_inner_equals() {
        let pairs = parse_cookie_header(r#"_session="abc=="; remember_user_token=x=y"#).unwrap();
        assert_eq!(pairs[0].1, "abc==");
        assert_eq!(pairs[1].1, "x=y");
    }

    #[test]
    fn test_parse_skips_attributes() {
        let pairs = parse_cookie_header("a=1; Path=/; Secure; HttpOnly; b=2").unwrap();
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn test_parse_rejects_empty_string() {
        assert!(matches!(
            parse_cookie_header(""),
            Err(SubmitError::MalformedCookie(_))
        ));
        assert!(matches!(
            parse_cookie_header(" ; ; "),
            Err(SubmitError::MalformedCookie(_))
        ));
    }

    #[test]
    fn test_parse_rejects_bare_word() {
        assert!(matches!(
            parse_cookie_header("a=1; garbage"),
            Err(SubmitError::MalformedCookie(_))
        ));
    }

    #[test]
    fn test_parse_rejects_empty_name() {
        assert!(matches!(
            parse_cookie_header("=1"),
            Err(SubmitError::MalformedCookie(_))
        ));
    }

    #[test]
    fn test_build_populates_jar_with_exact_pairs() {
        let session = Session::build("a=1; b=2", "test-agent", base()).unwrap();
        let header = session.cookie_header().unwrap();
        let expected: BTreeMap<String, String> = [("a", "1"), ("b", "2")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(as_map(&header), expected);
    }

    #[test]
    fn test_build_fails_on_malformed_cookie() {
        assert!(matches!(
            Session::build("nonsense", "test-agent", base()),
            Err(SubmitError::MalformedCookie(_))
        ));
    }

    #[test]
    fn test_build_rejects_unprintable_user_agent() {
        assert!(matches!(
            Session::build("a=1", "bad\nagent", base()),
            Err(SubmitError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_url_joins_relative_path() {
        let session = Session::build("a=1", "test-agent", base()).unwrap();
        assert_eq!(
            session.url("/vacancies/42").unwrap().as_str(),
            "https://career.habr.com/vacancies/42"
        );
    }
}
