//! A generation session: the form's view state plus the client it submits to.

use std::sync::Arc;

use crate::{
    dispatcher::{dispatch, DescriptionClient, GenerationResult},
    error::{DispatchError, SubmitError},
    state::{Action, ViewState},
    templates,
};

/// Owns the view state and runs generation attempts against one client.
pub struct GenerationSession {
    state: ViewState,
    client: Arc<dyn DescriptionClient>,
}

/// Holds the view state while a request is outstanding. Dropped while still
/// armed (the attempt's future was cancelled), it releases the in-progress flag.
struct InFlight<'a> {
    state: &'a mut ViewState,
    armed: bool,
}

impl InFlight<'_> {
    fn apply(&mut self, action: Action) {
        *self.state = std::mem::take(&mut *self.state).reduce(action);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            tracing::warn!("generation cancelled before the service answered");
            self.apply(Action::DispatchCancelled);
        }
    }
}

impl GenerationSession {
    pub fn new(client: Arc<dyn DescriptionClient>) -> Self {
        Self { state: ViewState::default(), client }
    }

    pub fn with_state(client: Arc<dyn DescriptionClient>, state: ViewState) -> Self {
        Self { state, client }
    }

    pub fn state(&self) -> &ViewState { &self.state }

    pub fn apply(&mut self, action: Action) {
        self.state = std::mem::take(&mut self.state).reduce(action);
    }

    /// Idle -> Validating -> Dispatching -> (Success | FallingBack -> Fallback) -> Idle.
    ///
    /// Remote failures never surface as errors; they produce fallback text.
    pub async fn generate(&mut self) -> Result<GenerationResult, SubmitError> {
        if self.state.in_progress {
            return Err(SubmitError::InProgress);
        }
        self.apply(Action::Submit);
        if let Err(e) = self.state.form.validate() {
            self.apply(Action::ValidationFailed(e));
            return Err(e.into());
        }

        self.apply(Action::DispatchStarted);
        let form = self.state.form.clone();
        let mut flight = InFlight { state: &mut self.state, armed: true };
        let outcome = dispatch(self.client.as_ref(), &form).await;
        flight.armed = false;

        match outcome {
            Ok(res) => {
                tracing::info!(client = self.client.name(), "description generated remotely");
                flight.apply(Action::RemoteSucceeded(res.description.clone()));
                Ok(res)
            }
            Err(DispatchError::Remote(failure)) => {
                tracing::warn!(kind = failure.kind(), error = %failure, "remote generation failed, using fallback template");
                let text = templates::render_form(&form);
                flight.apply(Action::RemoteFailed(failure));
                flight.apply(Action::FallbackCompleted(text.clone()));
                Ok(GenerationResult::fallback(text))
            }
            Err(DispatchError::Validation(e)) => {
                flight.apply(Action::ValidationFailed(e));
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dispatcher::DescriptionRequest,
        error::RemoteFailure,
        form::{FormState, Tone},
        state::Phase,
    };
    use std::{future::Future, pin::Pin, time::Duration};

    /// Never answers.
    struct Hanging;

    impl DescriptionClient for Hanging {
        fn request<'a>(
            &'a self,
            _req: &'a DescriptionRequest,
        ) -> Pin<Box<dyn Future<Output = Result<String, RemoteFailure>> + Send + 'a>> {
            Box::pin(std::future::pending())
        }

        fn name(&self) -> &'static str { "hanging" }
    }

    #[tokio::test]
    async fn dropped_attempt_leaves_session_reusable() {
        let form = FormState::new("Lantern", Some(Tone::Casual));
        let mut session = GenerationSession::with_state(Arc::new(Hanging), ViewState::with_form(form));

        let attempt = tokio::time::timeout(Duration::from_millis(50), session.generate()).await;
        assert!(attempt.is_err());

        let st = session.state();
        assert_eq!(st.phase, Phase::Idle);
        assert!(!st.in_progress);
        assert!(st.can_submit());

        let again = tokio::time::timeout(Duration::from_millis(50), session.generate()).await;
        assert!(again.is_err(), "second attempt reaches the client instead of being rejected as busy");
    }
}
