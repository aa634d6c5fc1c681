//! The submit loop: list a page, apply to every vacancy on it, move to the next page.
//!
//! Strictly sequential. The only waits are the cooldown after each application and
//! the operator prompt when the board asks for a captcha.

use std::io::{BufRead, Write};
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::board::JobBoard;
use crate::errors::SubmitError;
use crate::message::compose_message;
use crate::models::application::ApplicationResult;
use crate::models::vacancy::Vacancy;

/// Waits between applications.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn cool_down(&self);
}

/// Hands a captcha to a human and blocks until they are done.
#[async_trait]
pub trait Operator: Send + Sync {
    async fn acknowledge_captcha(&self, vacancy_url: &str) -> Result<(), SubmitError>;
}

/// Fixed-length sleep on the tokio timer.
pub struct FixedCooldown {
    pub duration: Duration,
}

#[async_trait]
impl Pacer for FixedCooldown {
    async fn cool_down(&self) {
        tokio::time::sleep(self.duration).await;
    }
}

/// Prompts on the terminal and waits for Enter.
pub struct TerminalOperator;

#[async_trait]
impl Operator for TerminalOperator {
    async fn acknowledge_captcha(&self, vacancy_url: &str) -> Result<(), SubmitError> {
        let prompt = format!(
            "Captcha required. Open {vacancy_url}, solve it in the browser, then press Enter: "
        );
        tokio::task::spawn_blocking(move || {
            let mut stdout = std::io::stdout();
            stdout.write_all(prompt.as_bytes())?;
            stdout.flush()?;

            let mut line = String::new();
            if std::io::stdin().lock().read_line(&mut line)? == 0 {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "stdin closed while waiting for captcha",
                ));
            }
            Ok(())
        })
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))??;
        Ok(())
    }
}

/// Counters reported at the end of a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub pages: u32,
    pub submitted: u32,
    pub captchas: u32,
    pub rejected: u32,
    pub anomalies: u32,
}

pub struct Submitter<B, P, O> {
    board: B,
    pacer: P,
    operator: O,
    query: Option<String>,
    contact: String,
    start_page: u32,
}

impl<B: JobBoard, P: Pacer, O: Operator> Submitter<B, P, O> {
    pub fn new(board: B, pacer: P, operator: O, query: Option<String>, contact: String) -> Self {
        Self {
            board,
            pacer,
            operator,
            query,
            contact,
            start_page: 1,
        }
    }

    pub fn starting_at(mut self, page: u32) -> Self {
        self.start_page = page.max(1);
        self
    }

    /// Walks pages `start_page..=totalPages`. Any error aborts the run;
    /// applications already sent stay sent.
    pub async fn run(&self) -> Result<RunSummary, SubmitError> {
        let mut summary = RunSummary::default();
        let mut page = self.start_page;

        loop {
            let vacancies = self.board.list_vacancies(self.query.as_deref(), page).await?;
            summary.pages += 1;

            for vacancy in &vacancies.list {
                self.apply(vacancy, &mut summary).await?;
            }

            if page >= vacancies.meta.total_pages {
                break;
            }
            page += 1;
        }

        Ok(summary)
    }

    async fn apply(&self, vacancy: &Vacancy, summary: &mut RunSummary) -> Result<(), SubmitError> {
        let message = compose_message(&vacancy.title, &self.contact, &mut rand::thread_rng());
        info!("Applying to #{} {} \"{}\"", vacancy.id, vacancy.href, vacancy.title);

        let result = self.board.post_application(&vacancy.href, &message).await?;
        match &result {
            ApplicationResult::Captcha => {
                summary.captchas += 1;
                let url = self.board.vacancy_url(&vacancy.href);
                warn!("Captcha on {url}, waiting for the operator");
                self.operator.acknowledge_captcha(&url).await?;
            }
            ApplicationResult::Submitted(_) => {
                summary.submitted += 1;
                info!("Applied to {}", vacancy.href);
            }
            ApplicationResult::Rejected { kind, body } => {
                summary.rejected += 1;
                warn!(
                    "Application to {} refused ({}): {body}",
                    vacancy.href,
                    kind.as_deref().unwrap_or("untyped error")
                );
            }
            ApplicationResult::Anomaly(body) => {
                summary.anomalies += 1;
                match result.message() {
                    Some(msg) => warn!("Board says for {}: {msg}", vacancy.href),
                    None => warn!("Unrecognised response for {}: {body}", vacancy.href),
                }
            }
        }

        self.pacer.cool_down().await;
        Ok(())
    }
}
