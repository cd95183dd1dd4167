use crate::selector::Selector;
use crate::session::{DriverSession, FormField};
use crate::{Error, Result};
use async_trait::async_trait;
use pwcycle_core::config::CycleConfig;
use pwcycle_core::policy::ConfirmPolicy;
use pwcycle_core::poll;
use pwcycle_core::session::AccountSession;
use std::time::Duration;

/// Account login page email field
const EMAIL_FIELD: &str = "#Email";
/// Password field, shared by the login page and the re-auth page
const PASSWORD_FIELD: &str = "#Passwd";
/// CAPTCHA challenge element on login/re-auth pages
const CAPTCHA_ELEMENT: &str = "#logincaptcha";
/// New-password inputs on the change form (the form renders the field twice
/// for confirmation, both get the same value)
const NEW_PASSWORD_FIELDS: &str = "//input[@type='password']";

/// Drives the Google account UI through the driver façade.
///
/// Title markers and timeouts come from [`CycleConfig`]; Google's page
/// titles are locale- and redesign-dependent, so nothing here is hard-coded
/// beyond the element ids.
pub struct GoogleSession {
    driver: DriverSession,
    config: CycleConfig,
}

impl GoogleSession {
    pub fn new(driver: DriverSession, config: CycleConfig) -> Self {
        Self { driver, config }
    }

    /// Explicit DOM-presence probe; best effort, no waiting. When the
    /// challenge is up the workflow can only hand over to a human.
    async fn detect_captcha(&self) -> bool {
        let probe = Selector::css(CAPTCHA_ELEMENT, Duration::ZERO);
        let present = self.driver.element_present(&probe).await;
        if present {
            tracing::warn!("CAPTCHA challenge detected, waiting for manual entry");
        }
        present
    }

    /// Poll the page title for `marker` until `deadline` passes
    async fn confirm_title(&self, marker: &str, deadline: Duration) -> Result<()> {
        let page = self.driver.page().clone();
        let expected = marker.to_string();

        let confirmed = poll::until(
            move || {
                let page = page.clone();
                let expected = expected.clone();
                async move {
                    page.get_title()
                        .await
                        .ok()
                        .flatten()
                        .unwrap_or_default()
                        .contains(&expected)
                }
            },
            deadline,
            self.config.timeouts.poll_interval(),
        )
        .await;

        if confirmed {
            Ok(())
        } else {
            Err(Error::ConfirmationTimeout {
                expected: marker.to_string(),
                waited: deadline,
            })
        }
    }
}

#[async_trait]
impl AccountSession for GoogleSession {
    async fn login(&mut self, email: &str, password: &str) -> Result<()> {
        let element_timeout = self.config.timeouts.element();

        self.driver.navigate(&self.config.login_url).await?;
        self.driver
            .fill_form(
                &[FormField::new(Selector::css(EMAIL_FIELD, element_timeout), email)],
                true,
            )
            .await?;

        // the password page renders after the email submit; waiting for the
        // field doubles as page-load synchronization
        self.driver
            .find_all(&Selector::css(PASSWORD_FIELD, element_timeout))
            .await?;

        let policy = ConfirmPolicy::for_captcha(self.detect_captcha().await, &self.config.timeouts);

        self.driver
            .fill_form(
                &[FormField::new(Selector::css(PASSWORD_FIELD, element_timeout), password)],
                policy.auto_submit,
            )
            .await?;

        self.confirm_title(&self.config.markers.login_confirmed, policy.deadline)
            .await
    }

    async fn change_password(&mut self, current: &str, new_password: &str) -> Result<()> {
        let element_timeout = self.config.timeouts.element();

        self.driver.navigate(&self.config.change_password_url).await?;

        let policy = ConfirmPolicy::for_captcha(self.detect_captcha().await, &self.config.timeouts);

        // Google asks for the current password again before showing the form
        self.driver
            .fill_form(
                &[FormField::new(Selector::css(PASSWORD_FIELD, element_timeout), current)],
                policy.auto_submit,
            )
            .await?;
        self.confirm_title(&self.config.markers.reauth_page, policy.deadline)
            .await?;

        tracing::debug!("submitting password change");
        self.driver
            .fill_form(
                &[FormField::new(
                    Selector::xpath(NEW_PASSWORD_FIELDS, element_timeout),
                    new_password,
                )],
                policy.auto_submit,
            )
            .await?;

        self.confirm_title(&self.config.markers.change_confirmed, policy.deadline)
            .await
    }
}
