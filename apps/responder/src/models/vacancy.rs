use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single listing from `/api/frontend/vacancies`.
///
/// Only `id`, `href` and `title` drive behaviour. The rest is kept as raw JSON so a
/// listing with an odd value never fails the whole page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vacancy {
    pub id: u64,
    /// Site-relative path, e.g. `/vacancies/1000105710`.
    pub href: String,
    pub title: String,
    #[allow(dead_code)]
    #[serde(default)]
    pub remote_work: Option<Value>,
    #[allow(dead_code)]
    #[serde(default)]
    pub archived: Option<Value>,
    #[allow(dead_code)]
    #[serde(default)]
    pub salary: Option<Value>,
    #[allow(dead_code)]
    #[serde(default)]
    pub employment: Option<Value>,
    #[allow(dead_code)]
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub total_results: u32,
    #[allow(dead_code)]
    pub per_page: u32,
    pub current_page: u32,
    pub total_pages: u32,
}

/// One page of search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacancyPage {
    pub list: Vec<Vacancy>,
    pub meta: PaginationInfo,
}
