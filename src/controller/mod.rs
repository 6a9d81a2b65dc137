//! The campaign assistant controller.
//!
//! Owns the report view state and form, and composes the two optional
//! modules (integrations, audience insights) selected by `[features]`. All
//! backend calls go through the [`Backend`] it is constructed with, one at a
//! time.
use thiserror::Error;

use crate::api::{Backend, ReportResponse};
use crate::config::schema::AssistantConfig;
use crate::error::RequestError;
use crate::insights::InsightsPanel;
use crate::integrations::IntegrationManager;
use crate::model::{FormInput, Platform};
use crate::notify::{Notification, Notifier};
use crate::render::{HtmlPolicy, InsightsRenderer, ReportRenderer};
use crate::validate::{FIX_ERRORS_MESSAGE, FormState};
use crate::view::{PageParts, TransitionError, ViewEvent, ViewState, paint};

pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error occurred. Please try again.";
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to generate report. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error("the {0} module is disabled")]
    FeatureDisabled(&'static str),
}

pub struct Controller<B: Backend> {
    backend: B,
    view: ViewState,
    form: FormState,
    report_renderer: ReportRenderer,
    insights_renderer: InsightsRenderer,
    notifier: Notifier,
    integrations: Option<IntegrationManager>,
    insights: Option<InsightsPanel>,
    last_campaign_id: Option<i64>,
}

impl<B: Backend> Controller<B> {
    pub fn new(backend: B, config: &AssistantConfig) -> Self {
        let policy = HtmlPolicy::from_config(&config.rendering);
        Self {
            backend,
            view: ViewState::new(),
            form: FormState::report(),
            report_renderer: ReportRenderer::new(policy),
            insights_renderer: InsightsRenderer::new(policy),
            notifier: Notifier::new(),
            integrations: config.features.integrations.then(IntegrationManager::new),
            insights: config.features.audience_insights.then(InsightsPanel::new),
            last_campaign_id: None,
        }
    }

    /// Load initial connection status when integrations are enabled.
    pub fn init(&mut self) {
        if let Some(manager) = &mut self.integrations {
            manager.refresh(&self.backend);
        }
    }

    /// Validate and submit the report form, ending on the report or error
    /// panel.
    pub fn submit_report(&mut self, input: &FormInput) -> Result<&ViewState, ControllerError> {
        self.form.load(input);

        if self.form.validate_all().is_err() {
            self.view = self
                .view
                .apply(ViewEvent::Rejected(FIX_ERRORS_MESSAGE.to_string()))?;
            return Ok(&self.view);
        }

        self.view = self.view.apply(ViewEvent::Submit)?;
        let outcome = self.backend.generate_report(self.form.values());
        let event = self.report_outcome(outcome);
        self.view = self.view.apply(event)?;
        Ok(&self.view)
    }

    fn report_outcome(&mut self, outcome: Result<ReportResponse, RequestError>) -> ViewEvent {
        match outcome {
            Ok(response) if response.success => match response.report {
                Some(report) => {
                    self.last_campaign_id = response.campaign_id;
                    ViewEvent::Succeeded(self.report_renderer.render(&report))
                }
                None => ViewEvent::Failed(GENERIC_FAILURE_MESSAGE.to_string()),
            },
            Ok(response) => ViewEvent::Failed(
                response
                    .error
                    .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string()),
            ),
            Err(e) if e.is_transport() => ViewEvent::Failed(NETWORK_ERROR_MESSAGE.to_string()),
            Err(_) => ViewEvent::Failed(GENERIC_FAILURE_MESSAGE.to_string()),
        }
    }

    /// Return to the welcome panel. Inline field errors go with the error
    /// banner; typed values stay.
    pub fn reset(&mut self) -> Result<&ViewState, ControllerError> {
        self.view = self.view.apply(ViewEvent::Reset)?;
        self.form.clear_errors();
        Ok(&self.view)
    }

    /// Refresh connection status as the integrations view is shown.
    pub fn activate_integrations(&mut self) -> Result<&IntegrationManager, ControllerError> {
        let manager = self
            .integrations
            .as_mut()
            .ok_or(ControllerError::FeatureDisabled("integrations"))?;
        manager.refresh(&self.backend);
        Ok(manager)
    }

    pub fn submit_credentials(
        &mut self,
        platform: Platform,
        form: &FormInput,
    ) -> Result<(), ControllerError> {
        self.begin_credentials(platform, form)?;
        self.finish_credentials(platform)
    }

    /// First half of [`Self::submit_credentials`]: store the draft and show
    /// the `Testing` badge.
    pub fn begin_credentials(
        &mut self,
        platform: Platform,
        form: &FormInput,
    ) -> Result<&IntegrationManager, ControllerError> {
        let manager = self
            .integrations
            .as_mut()
            .ok_or(ControllerError::FeatureDisabled("integrations"))?;
        manager.begin_submit(platform, form);
        Ok(manager)
    }

    /// Send the draft stored by [`Self::begin_credentials`].
    pub fn finish_credentials(&mut self, platform: Platform) -> Result<(), ControllerError> {
        let manager = self
            .integrations
            .as_mut()
            .ok_or(ControllerError::FeatureDisabled("integrations"))?;
        manager.finish_submit(&self.backend, platform, &mut self.notifier);
        Ok(())
    }

    pub fn test_connection(&mut self, platform: Platform) -> Result<(), ControllerError> {
        let manager = self
            .integrations
            .as_ref()
            .ok_or(ControllerError::FeatureDisabled("integrations"))?;
        manager.test_connection(&self.backend, platform, &mut self.notifier);
        Ok(())
    }

    pub fn submit_insights(&mut self, form: &FormInput) -> Result<&InsightsPanel, ControllerError> {
        let panel = self
            .insights
            .as_mut()
            .ok_or(ControllerError::FeatureDisabled("audience insights"))?;
        panel.submit(&self.backend, form, &self.insights_renderer);
        Ok(panel)
    }

    /// Paint the full page, draining pending notifications into toasts.
    pub fn page(&mut self) -> String {
        let notifications = self.notifier.drain();
        paint(&PageParts {
            view: &self.view,
            form: &self.form,
            integrations: self.integrations.as_ref().map(IntegrationManager::render_html),
            insights: self.insights.as_ref().map(InsightsPanel::render_html),
            notifications: &notifications,
        })
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifier.drain()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn integrations(&self) -> Option<&IntegrationManager> {
        self.integrations.as_ref()
    }

    pub fn insights(&self) -> Option<&InsightsPanel> {
        self.insights.as_ref()
    }

    /// Campaign id the backend assigned to the last generated report.
    pub fn last_campaign_id(&self) -> Option<i64> {
        self.last_campaign_id
    }
}
