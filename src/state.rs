//! View state for the generator form and its reducer.
//!
//! Every change goes through [`ViewState::reduce`], so the dispatcher and the
//! template engine stay free of UI bookkeeping.

use crate::{
    dispatcher::GenerationResult,
    error::{RemoteFailure, ValidationError},
    form::{FormState, Language, Tone},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Validating,
    Dispatching,
    FallingBack,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Error(String),
    Notice(String),
}

impl Message {
    pub fn text(&self) -> &str {
        match self {
            Message::Error(t) | Message::Notice(t) => t,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    EditProductName(String),
    EditProductFeatures(String),
    SelectTone(Tone),
    SelectLanguage(Language),
    Submit,
    ValidationFailed(ValidationError),
    DispatchStarted,
    RemoteSucceeded(String),
    RemoteFailed(RemoteFailure),
    FallbackCompleted(String),
    DispatchCancelled,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub form: FormState,
    pub phase: Phase,
    pub in_progress: bool,
    pub result: Option<GenerationResult>,
    pub message: Option<Message>,
    pub last_failure: Option<RemoteFailure>,
}

impl ViewState {
    pub fn with_form(form: FormState) -> Self {
        Self { form, ..Self::default() }
    }

    pub fn reduce(mut self, action: Action) -> Self {
        match action {
            Action::EditProductName(v) => self.form.product_name = v,
            Action::EditProductFeatures(v) => self.form.product_features = v,
            Action::SelectTone(t) => self.form.tone = Some(t),
            Action::SelectLanguage(l) => self.form.language = l,
            Action::Submit => {
                self.phase = Phase::Validating;
                self.message = None;
            }
            Action::ValidationFailed(e) => {
                self.phase = Phase::Idle;
                self.in_progress = false;
                self.message = Some(Message::Error(e.to_string()));
            }
            Action::DispatchStarted => {
                self.phase = Phase::Dispatching;
                self.in_progress = true;
                self.last_failure = None;
            }
            Action::RemoteSucceeded(text) => {
                self.phase = Phase::Idle;
                self.in_progress = false;
                self.result = Some(GenerationResult::remote(text));
            }
            Action::RemoteFailed(failure) => {
                self.phase = Phase::FallingBack;
                self.last_failure = Some(failure);
            }
            Action::FallbackCompleted(text) => {
                let result = GenerationResult::fallback(text);
                self.phase = Phase::Idle;
                self.in_progress = false;
                self.message = result.notice().map(|n| Message::Notice(n.to_string()));
                self.result = Some(result);
            }
            Action::DispatchCancelled => {
                self.phase = Phase::Idle;
                self.in_progress = false;
            }
        }
        self
    }

    /// Mirrors the disabled state of the generate control.
    pub fn can_submit(&self) -> bool {
        !self.in_progress && self.form.is_submittable()
    }

    pub fn description(&self) -> Option<&str> {
        self.result.as_ref().map(|r| r.description.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::{Source, OFFLINE_NOTICE};

    fn filled() -> ViewState {
        ViewState::default()
            .reduce(Action::EditProductName("Tent".into()))
            .reduce(Action::SelectTone(Tone::Casual))
    }

    #[test]
    fn edits_update_form() {
        let st = filled()
            .reduce(Action::EditProductFeatures("waterproof".into()))
            .reduce(Action::SelectLanguage(Language::Pt));
        assert_eq!(st.form.product_name, "Tent");
        assert_eq!(st.form.product_features, "waterproof");
        assert_eq!(st.form.tone, Some(Tone::Casual));
        assert_eq!(st.form.language, Language::Pt);
        assert!(st.can_submit());
    }

    #[test]
    fn validation_failure_returns_to_idle_with_error() {
        let st = ViewState::default()
            .reduce(Action::Submit)
            .reduce(Action::ValidationFailed(ValidationError::MissingProductName));
        assert_eq!(st.phase, Phase::Idle);
        assert_eq!(st.message, Some(Message::Error("Please enter a product name".into())));
        assert!(!st.in_progress);
    }

    #[test]
    fn dispatch_holds_the_guard_until_done() {
        let st = filled().reduce(Action::Submit).reduce(Action::DispatchStarted);
        assert!(st.in_progress);
        assert!(!st.can_submit());
        assert_eq!(st.phase, Phase::Dispatching);

        let st = st.reduce(Action::RemoteSucceeded("Nice tent".into()));
        assert!(!st.in_progress);
        assert_eq!(st.phase, Phase::Idle);
        assert_eq!(st.description(), Some("Nice tent"));
        assert_eq!(st.message, None);
    }

    #[test]
    fn fallback_path_sets_notice_and_failure() {
        let st = filled()
            .reduce(Action::Submit)
            .reduce(Action::DispatchStarted)
            .reduce(Action::RemoteFailed(RemoteFailure::Status(503)));
        assert_eq!(st.phase, Phase::FallingBack);
        assert!(st.in_progress);

        let st = st.reduce(Action::FallbackCompleted("Offline tent".into()));
        assert_eq!(st.phase, Phase::Idle);
        assert!(!st.in_progress);
        assert_eq!(st.result.as_ref().map(|r| r.source), Some(Source::Fallback));
        assert_eq!(st.message, Some(Message::Notice(OFFLINE_NOTICE.into())));
        assert_eq!(st.last_failure, Some(RemoteFailure::Status(503)));
    }

    #[test]
    fn cancelled_dispatch_releases_the_guard() {
        let st = filled()
            .reduce(Action::RemoteSucceeded("Earlier tent".into()))
            .reduce(Action::Submit)
            .reduce(Action::DispatchStarted)
            .reduce(Action::DispatchCancelled);
        assert_eq!(st.phase, Phase::Idle);
        assert!(!st.in_progress);
        assert!(st.can_submit());
        assert_eq!(st.description(), Some("Earlier tent"));
    }

    #[test]
    fn submit_clears_previous_message() {
        let st = ViewState::default()
            .reduce(Action::ValidationFailed(ValidationError::MissingTone))
            .reduce(Action::Submit);
        assert_eq!(st.message, None);
        assert_eq!(st.phase, Phase::Validating);
    }
}
