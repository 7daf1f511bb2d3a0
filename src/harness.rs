use std::any::Any;
use std::future::Future;
use std::io;
use std::panic::AssertUnwindSafe;

use anyhow::Context;
use chrono::Local;
use futures_util::FutureExt;

use crate::cases::{self, Case};
use crate::client::ApiClient;
use crate::config::HarnessConfig;
use crate::report::{Reporter, TestStats};

/// How a run ended
#[derive(Debug)]
pub enum Termination {
    /// Every case ran
    Completed,
    /// The operator cancelled the run
    Interrupted,
    /// The harness itself failed, e.g. the report could not be written
    Errored(anyhow::Error),
}

/// Runs the fixed case list against one target and keeps the results
pub struct Harness {
    config: HarnessConfig,
    client: ApiClient,
    reporter: Reporter,
}

impl Harness {
    /// Harness reporting to stdout
    pub fn new(config: HarnessConfig) -> Self {
        Self::with_reporter(config, Reporter::stdout())
    }

    pub fn with_reporter(config: HarnessConfig, reporter: Reporter) -> Self {
        let client = ApiClient::new(&config.target);

        Self {
            config,
            client,
            reporter,
        }
    }

    pub fn stats(&self) -> TestStats {
        self.reporter.stats()
    }

    /// Run every case in [`Case::ALL`] order.
    ///
    /// Failing assertions never stop the run. Only harness-level errors
    /// (the report sink failing, a case panicking) are returned.
    pub async fn run_all(&mut self) -> anyhow::Result<TestStats> {
        let app = &self.config.app;
        tracing::info!(
            suite = %app.name,
            version = %app.version,
            environment = %app.environment,
            base_url = %self.config.target.base_url,
            "Starting auth API test run"
        );

        self.reporter
            .banner(&app.name, &self.config.target.base_url, Local::now())
            .context("failed to write report banner")?;

        let mut token = None;
        for case in Case::ALL {
            guarded(self.run_case(case, &mut token))
                .await
                .with_context(|| format!("failed while running '{}'", case.name()))?;
        }

        let stats = self.stats();
        tracing::info!(
            passed = stats.passed(),
            failed = stats.failed(),
            total = stats.total(),
            "Auth API test run finished"
        );

        Ok(stats)
    }

    /// Run one case.
    ///
    /// `token` carries the access token from [`Case::LoginSuccess`] to the
    /// cases that need it.
    pub async fn run_case(&mut self, case: Case, token: &mut Option<String>) -> io::Result<()> {
        let client = &self.client;
        let report = &mut self.reporter;
        let override_token = self.config.auth.token();

        report.test(case.name())?;
        let before = report.stats();

        match case {
            Case::SignupSuccess => cases::signup::success(client, report).await?,
            Case::SignupInvalidEmail => cases::signup::invalid_email(client, report).await?,
            Case::SignupShortPassword => cases::signup::short_password(client, report).await?,
            Case::SignupMissingFields => cases::signup::missing_fields(client, report).await?,
            Case::LoginSuccess => {
                *token = cases::login::success(client, report, override_token).await?;
            }
            Case::LoginInvalidCredentials => cases::login::invalid_credentials(client, report).await?,
            Case::LoginValidationErrors => cases::login::validation_errors(client, report).await?,
            Case::MeWithToken => {
                let token = token.as_deref().or(override_token);
                cases::me::with_token(client, report, token).await?;
            }
            Case::MeWithoutToken => cases::me::without_token(client, report).await?,
            Case::MeInvalidToken => cases::me::invalid_token(client, report).await?,
            Case::Logout => cases::account::logout(client, report).await?,
            Case::RefreshToken => cases::account::refresh_token(client, report).await?,
            Case::ForgotPassword => cases::account::forgot_password(client, report).await?,
            Case::ResetPassword => cases::account::reset_password(client, report).await?,
        }

        let delta = report.stats().since(&before);
        tracing::debug!(
            case = ?case,
            passed = delta.passed(),
            failed = delta.failed(),
            "Case finished"
        );

        Ok(())
    }

    /// Print the summary and compute the process exit code.
    ///
    /// Interrupted and errored runs exit with 1 whatever the counts say.
    pub fn finish(&mut self, termination: Termination) -> i32 {
        let notice = match &termination {
            Termination::Completed => None,
            Termination::Interrupted => {
                tracing::warn!("Test run interrupted by operator");
                Some("Tests interrupted by user".to_string())
            }
            Termination::Errored(e) => {
                tracing::error!("Test run aborted: {:#}", e);
                Some(format!("Unexpected error: {:#}", e))
            }
        };

        if let Some(notice) = notice {
            if let Err(e) = self.reporter.notice(notice) {
                tracing::error!("Failed to write report notice: {}", e);
            }
        }

        if let Err(e) = self.reporter.summary() {
            tracing::error!("Failed to write report summary: {}", e);
        }

        match termination {
            Termination::Completed => self.stats().exit_code(),
            Termination::Interrupted | Termination::Errored(_) => 1,
        }
    }
}

/// Await a case, turning a panic inside it into an error so the summary
/// still gets printed
async fn guarded<T>(case: impl Future<Output = io::Result<T>>) -> anyhow::Result<T> {
    match AssertUnwindSafe(case).catch_unwind().await {
        Ok(result) => Ok(result?),
        Err(payload) => Err(anyhow::anyhow!("case panicked: {}", panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}
