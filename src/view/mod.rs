//! Report view state machine.
//!
//! The page shows exactly one of four panels. [`ViewState::apply`] is a pure
//! reducer over [`ViewEvent`]s; [`paint`] renders a state into HTML
//! separately, so transitions never touch markup.
//!
//! | from                 | event        | to      |
//! |----------------------|--------------|---------|
//! | Welcome/Error/Report | `Submit`     | Loading |
//! | not Loading          | `Rejected`   | Error   |
//! | Loading              | `Succeeded`  | Report  |
//! | Loading              | `Failed`     | Error   |
//! | not Loading          | `Reset`      | Welcome |

mod assets;
mod paint;

use std::fmt;

use thiserror::Error;

pub use paint::{PageParts, paint};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Welcome,
    Loading,
    Error,
    Report,
}

impl Panel {
    pub const ALL: [Panel; 4] = [Self::Welcome, Self::Loading, Self::Error, Self::Report];

    /// DOM id of the panel's container.
    pub fn element_id(self) -> &'static str {
        match self {
            Self::Welcome => "welcomeState",
            Self::Loading => "loadingState",
            Self::Error => "errorState",
            Self::Report => "reportContent",
        }
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Welcome => "welcome",
            Self::Loading => "loading",
            Self::Error => "error",
            Self::Report => "report",
        };
        f.write_str(name)
    }
}

/// Submit button presentation. `Busy` is disabled with a spinner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitButton {
    #[default]
    Idle,
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// Form passed validation and the request is about to be sent.
    Submit,
    /// Form failed validation; nothing was sent.
    Rejected(String),
    /// Backend returned a report, already rendered to HTML.
    Succeeded(String),
    /// Backend or network failure.
    Failed(String),
    Reset,
}

impl ViewEvent {
    fn name(&self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::Rejected(_) => "rejected",
            Self::Succeeded(_) => "succeeded",
            Self::Failed(_) => "failed",
            Self::Reset => "reset",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot apply `{event}` while the {panel} panel is shown")]
pub struct TransitionError {
    pub panel: Panel,
    pub event: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub panel: Panel,
    pub error_message: Option<String>,
    pub report_html: Option<String>,
    pub submit: SubmitButton,
    /// The panel carrying the entry animation marker, if any.
    pub entry_animation: Option<Panel>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            panel: Panel::Welcome,
            error_message: None,
            report_html: None,
            submit: SubmitButton::Idle,
            entry_animation: None,
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.panel == Panel::Loading
    }

    /// Compute the state after `event`, or reject the transition.
    pub fn apply(&self, event: ViewEvent) -> Result<ViewState, TransitionError> {
        let invalid = TransitionError {
            panel: self.panel,
            event: event.name(),
        };

        let (panel, error_message, report_html) = match (self.panel, event) {
            (Panel::Loading, ViewEvent::Succeeded(html)) => (Panel::Report, None, Some(html)),
            (Panel::Loading, ViewEvent::Failed(message)) => (Panel::Error, Some(message), None),
            (Panel::Loading, _) => return Err(invalid),
            (_, ViewEvent::Submit) => (Panel::Loading, None, None),
            (_, ViewEvent::Rejected(message)) => (Panel::Error, Some(message), None),
            (_, ViewEvent::Reset) => (Panel::Welcome, None, None),
            (_, ViewEvent::Succeeded(_) | ViewEvent::Failed(_)) => return Err(invalid),
        };

        let submit = if panel == Panel::Loading {
            SubmitButton::Busy
        } else {
            SubmitButton::Idle
        };

        Ok(ViewState {
            panel,
            error_message,
            report_html,
            submit,
            entry_animation: Some(panel),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(state: &ViewState, event: ViewEvent) -> ViewState {
        state.apply(event).unwrap()
    }

    #[test]
    fn starts_on_welcome_with_idle_button() {
        let state = ViewState::new();
        assert_eq!(state.panel, Panel::Welcome);
        assert_eq!(state.submit, SubmitButton::Idle);
        assert_eq!(state.entry_animation, None);
    }

    #[test]
    fn submit_enters_loading_with_busy_button() {
        let state = step(&ViewState::new(), ViewEvent::Submit);
        assert_eq!(state.panel, Panel::Loading);
        assert_eq!(state.submit, SubmitButton::Busy);
        assert_eq!(state.entry_animation, Some(Panel::Loading));
    }

    #[test]
    fn success_shows_report_and_restores_button() {
        let loading = step(&ViewState::new(), ViewEvent::Submit);
        let state = step(&loading, ViewEvent::Succeeded("<p>ok</p>".into()));
        assert_eq!(state.panel, Panel::Report);
        assert_eq!(state.report_html.as_deref(), Some("<p>ok</p>"));
        assert_eq!(state.submit, SubmitButton::Idle);
    }

    #[test]
    fn failure_shows_error_message() {
        let loading = step(&ViewState::new(), ViewEvent::Submit);
        let state = step(&loading, ViewEvent::Failed("Quota exceeded".into()));
        assert_eq!(state.panel, Panel::Error);
        assert_eq!(state.error_message.as_deref(), Some("Quota exceeded"));
        assert_eq!(state.entry_animation, Some(Panel::Error));
    }

    #[test]
    fn second_submit_while_loading_is_rejected() {
        let loading = step(&ViewState::new(), ViewEvent::Submit);
        let err = loading.apply(ViewEvent::Submit).unwrap_err();
        assert_eq!(err.panel, Panel::Loading);
        assert_eq!(err.event, "submit");
    }

    #[test]
    fn outcomes_require_loading() {
        let welcome = ViewState::new();
        assert!(welcome.apply(ViewEvent::Succeeded(String::new())).is_err());
        assert!(welcome.apply(ViewEvent::Failed(String::new())).is_err());
    }

    #[test]
    fn reset_from_error_clears_message() {
        let state = step(&ViewState::new(), ViewEvent::Rejected("fix it".into()));
        let state = step(&state, ViewEvent::Reset);
        assert_eq!(state.panel, Panel::Welcome);
        assert_eq!(state.error_message, None);
        assert_eq!(state.entry_animation, Some(Panel::Welcome));
    }

    #[test]
    fn resubmitting_from_report_drops_old_body() {
        let loading = step(&ViewState::new(), ViewEvent::Submit);
        let report = step(&loading, ViewEvent::Succeeded("old".into()));
        let state = step(&report, ViewEvent::Submit);
        assert_eq!(state.report_html, None);
    }

    #[test]
    fn reset_while_loading_is_rejected() {
        let loading = step(&ViewState::new(), ViewEvent::Submit);
        assert!(loading.apply(ViewEvent::Reset).is_err());
    }
}
