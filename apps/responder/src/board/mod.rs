//! Job-board client. Every request to the site goes through `HabrBoard`.
//!
//! Each API call is preceded by a GET of the HTML page it belongs to, because the
//! API only accepts the CSRF token from that page (see `csrf`).

use async_trait::async_trait;
use reqwest::multipart::Form;
use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use crate::errors::SubmitError;
use crate::models::application::ApplicationResult;
use crate::models::vacancy::VacancyPage;
use crate::session::Session;

pub mod csrf;

use csrf::{extract_csrf_token, CsrfContext};

const SEARCH_PAGE_PATH: &str = "/vacancies";
const SEARCH_API_PATH: &str = "/api/frontend/vacancies";
const API_PREFIX: &str = "/api/frontend";

/// The two operations the submit loop needs from a board.
#[async_trait]
pub trait JobBoard: Send + Sync {
    async fn list_vacancies(&self, query: Option<&str>, page: u32)
        -> Result<VacancyPage, SubmitError>;

    async fn post_application(
        &self,
        vacancy_path: &str,
        message: &str,
    ) -> Result<ApplicationResult, SubmitError>;

    /// Absolute URL of a vacancy page, shown to the operator on captcha.
    fn vacancy_url(&self, vacancy_path: &str) -> String;
}

/// career.habr.com over an authenticated `Session`.
pub struct HabrBoard {
    session: Session,
}

impl HabrBoard {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// GETs `url` and pulls the CSRF token out of the returned HTML.
    pub async fn fetch_csrf_context(&self, url: Url) -> Result<CsrfContext, SubmitError> {
        let response = self.session.client.get(url.clone()).send().await?;
        let referer = response.url().clone();
        let body = response.text().await?;

        let token = extract_csrf_token(&body).ok_or_else(|| SubmitError::CsrfTokenNotFound {
            url: url.to_string(),
        })?;
        debug!("CSRF token harvested from {referer}");

        Ok(CsrfContext { referer, token })
    }

    fn search_page_url(&self, query: Option<&str>, page: u32) -> Result<Url, SubmitError> {
        let mut url = self.session.url(SEARCH_PAGE_PATH)?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(q) = query {
                pairs.append_pair("q", q);
            }
            pairs
                .append_pair("page", &page.to_string())
                .append_pair("type", "suitable");
        }
        Ok(url)
    }

    fn search_api_url(&self, query: Option<&str>, page: u32) -> Result<Url, SubmitError> {
        let mut url = self.session.url(SEARCH_API_PATH)?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(q) = query {
                pairs.append_pair("q", q);
            }
            pairs
                .append_pair("sort", "relevance")
                .append_pair("type", "suitable")
                .append_pair("currency", "RUR")
                .append_pair("page", &page.to_string());
        }
        Ok(url)
    }

    fn responses_url(&self, vacancy_path: &str) -> Result<Url, SubmitError> {
        self.session.url(&format!("{API_PREFIX}{vacancy_path}/responses"))
    }

    /// Builds a `multipart/form-data` POST of text `fields`, with no file part.
    /// The responses endpoint rejects url-encoded forms.
    fn multipart_request(&self, url: Url, fields: &[(&'static str, String)]) -> RequestBuilder {
        let form = fields
            .iter()
            .fold(Form::new(), |form, (name, value)| form.text(*name, value.clone()));
        self.session.client.post(url).multipart(form)
    }
}

#[async_trait]
impl JobBoard for HabrBoard {
    async fn list_vacancies(
        &self,
        query: Option<&str>,
        page: u32,
    ) -> Result<VacancyPage, SubmitError> {
        let csrf = self
            .fetch_csrf_context(self.search_page_url(query, page)?)
            .await?;

        let url = self.search_api_url(query, page)?;
        let response = csrf.apply(self.session.client.get(url)).send().await?;
        let vacancies: VacancyPage = decode_json(response).await?;

        info!(
            "Page {}/{}: {} vacancies ({} total)",
            vacancies.meta.current_page,
            vacancies.meta.total_pages,
            vacancies.list.len(),
            vacancies.meta.total_results
        );
        Ok(vacancies)
    }

    async fn post_application(
        &self,
        vacancy_path: &str,
        message: &str,
    ) -> Result<ApplicationResult, SubmitError> {
        let csrf = self.fetch_csrf_context(self.session.url(vacancy_path)?).await?;

        let request = self.multipart_request(
            self.responses_url(vacancy_path)?,
            &[("body", message.to_string())],
        );
        let response = csrf.apply(request).send().await?;
        let body: Value = decode_json(response).await?;
        debug!("Application response for {vacancy_path}: {body}");

        Ok(ApplicationResult::from_body(body))
    }

    fn vacancy_url(&self, vacancy_path: &str) -> String {
        self.session
            .url(vacancy_path)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| format!("{}{vacancy_path}", self.session.base_url))
    }
}

/// Reads the body as text and decodes it, so a non-JSON reply becomes `RemoteApi`
/// with a snippet instead of a bare reqwest decode error.
async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, SubmitError> {
    let url = response.url().to_string();
    let status = response.status();
    let body = response.text().await?;

    serde_json::from_str(&body).map_err(|e| {
        let snippet: String = body.chars().take(200).collect();
        SubmitError::remote(url, format!("status {status}, {e}: {snippet}"))
    })
}
