//! CSRF handling. The board embeds a per-page token in
//! `<meta name="csrf-token" content="...">` and expects it back, together with the
//! page URL as `Referer`, on the next API call.

use reqwest::header::REFERER;
use reqwest::{RequestBuilder, Url};
use scraper::{Html, Selector};

pub const CSRF_HEADER: &str = "X-CSRF-Token";
const CSRF_META_SELECTOR: &str = r#"meta[name="csrf-token"]"#;

/// Token harvested from one page, good for exactly one follow-up request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfContext {
    pub referer: Url,
    pub token: String,
}

impl CsrfContext {
    /// Attaches `Referer` and `X-CSRF-Token`. Takes `self` so a context cannot be replayed.
    pub fn apply(self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(REFERER, self.referer.as_str())
            .header(CSRF_HEADER, self.token)
    }
}

/// Returns the `content` of the first csrf-token meta tag, if the page has one.
pub fn extract_csrf_token(html: &str) -> Option<String> {
    let selector = Selector::parse(CSRF_META_SELECTOR).ok()?;
    let document = Html::parse_document(html);
    document
        .select(&selector)
        .find_map(|el| el.value().attr("content"))
        .map(str::to_owned)
        .filter(|t| !t.is_empty())
}
