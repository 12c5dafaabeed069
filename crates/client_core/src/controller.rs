//! Drives one page: form input, model selection and submission cycles.

use std::{
    panic::{self, AssertUnwindSafe},
    sync::Arc,
    time::Duration,
};

use futures::FutureExt;
use shared::{
    domain::{ModelId, NumericField},
    protocol::PredictionResult,
};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::{
    error::{ResponseError, GENERIC_FAILURE_MESSAGE},
    presenter::ErrorPresenter,
    render::{Renderer, ResponseShape},
    selection::{InputSynchronizer, DEFAULT_PRESS_EFFECT},
    state::{SubmissionEvent, SubmissionState},
    transport::PredictionTransport,
    types::{FormSnapshot, FormState, SubmitEvent},
    view::ViewSink,
};

pub const DEFAULT_IDLE_LABEL: &str = "Predict Pathloss";
pub const DEFAULT_BUSY_LABEL: &str = "Calculating...";

#[derive(Debug, Clone)]
pub struct ControllerOptions {
    pub cards: Vec<ModelId>,
    pub initial_model: Option<ModelId>,
    pub press_effect: Duration,
    pub idle_label: String,
    pub busy_label: String,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            cards: ModelId::ALL.to_vec(),
            initial_model: None,
            press_effect: DEFAULT_PRESS_EFFECT,
            idle_label: DEFAULT_IDLE_LABEL.into(),
            busy_label: DEFAULT_BUSY_LABEL.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Succeeded(PredictionResult),
    Failed(String),
    /// A submission was already in flight; nothing was sent.
    Ignored,
}

struct ControllerInner<S> {
    sink: S,
    form: FormState,
    synchronizer: InputSynchronizer,
    state: SubmissionState,
}

/// Owns the submission state machine of one page.
///
/// The inner lock is never held across the network await, so selection and
/// input events keep working while a request is in flight.
pub struct PredictionController<T, S> {
    transport: T,
    renderer: Renderer,
    presenter: ErrorPresenter,
    idle_label: String,
    busy_label: String,
    inner: Mutex<ControllerInner<S>>,
}

impl<T, S> PredictionController<T, S>
where
    T: PredictionTransport + 'static,
    S: ViewSink + 'static,
{
    pub fn new(
        transport: T,
        shape: ResponseShape,
        mut sink: S,
        options: ControllerOptions,
    ) -> Arc<Self> {
        let mut synchronizer = InputSynchronizer::new(options.cards, options.press_effect);
        sink.set_trigger(true, &options.idle_label);
        if options.initial_model.is_some() {
            sink.set_dropdown_value(options.initial_model);
            synchronizer.on_dropdown_change(options.initial_model, &mut sink);
        }

        Arc::new(Self {
            transport,
            renderer: Renderer::new(shape),
            presenter: ErrorPresenter,
            idle_label: options.idle_label,
            busy_label: options.busy_label,
            inner: Mutex::new(ControllerInner {
                sink,
                form: FormState::default(),
                synchronizer,
                state: SubmissionState::Idle,
            }),
        })
    }

    pub fn shape(&self) -> ResponseShape {
        self.renderer.shape()
    }

    /// Numeric input event: stores the text, then clears it if negative.
    pub async fn input_numeric(&self, field: NumericField, value: &str) {
        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;
        inner.form.set_value(field, value);
        inner.sink.set_field_value(field, value);
        inner
            .synchronizer
            .clamp_non_negative(&mut inner.form, field, &mut inner.sink);
    }

    pub async fn set_environment(&self, environment: &str) {
        let mut guard = self.inner.lock().await;
        guard.form.set_environment(environment);
    }

    /// Card activation. The press effect is released on a background task.
    pub async fn select_model(self: &Arc<Self>, model: ModelId) {
        let press_effect = {
            let mut guard = self.inner.lock().await;
            let inner = &mut *guard;
            inner.synchronizer.select_model(model, &mut inner.sink);
            inner.synchronizer.press_effect()
        };

        let controller = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(press_effect).await;
            let mut guard = controller.inner.lock().await;
            let inner = &mut *guard;
            inner.synchronizer.release_press(model, &mut inner.sink);
        });
    }

    /// The user picked `value` in the dropdown itself.
    pub async fn change_dropdown(&self, value: Option<ModelId>) {
        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;
        inner.sink.set_dropdown_value(value);
        inner.synchronizer.on_dropdown_change(value, &mut inner.sink);
    }

    pub async fn snapshot(&self) -> FormSnapshot {
        let guard = self.inner.lock().await;
        guard.form.snapshot(guard.synchronizer.selected())
    }

    pub async fn state(&self) -> SubmissionState {
        self.inner.lock().await.state.clone()
    }

    pub async fn with_sink<R>(&self, read: impl FnOnce(&S) -> R) -> R {
        let guard = self.inner.lock().await;
        read(&guard.sink)
    }

    /// Runs one full submission cycle for the current form.
    ///
    /// Whatever happens while requesting, decoding or rendering, the cycle
    /// ends with the trigger enabled and exactly one of the result and error
    /// regions visible.
    pub async fn submit(&self, event: &mut SubmitEvent) -> SubmitOutcome {
        event.prevent_default();

        let snapshot = {
            let mut guard = self.inner.lock().await;
            let inner = &mut *guard;
            if inner.state.is_submitting() {
                debug!("submission already in flight; ignoring submit");
                return SubmitOutcome::Ignored;
            }

            self.renderer.hide(&mut inner.sink);
            self.presenter.hide_error(&mut inner.sink);
            inner.state = advance(&inner.state, SubmissionEvent::Submit);
            inner.sink.set_trigger(false, &self.busy_label);
            inner.form.snapshot(inner.synchronizer.selected())
        };

        info!(
            shape = %self.renderer.shape(),
            model = ?snapshot.model,
            "submitting prediction request"
        );
        let response = AssertUnwindSafe(self.exchange(&snapshot))
            .catch_unwind()
            .await
            .unwrap_or_else(|_| {
                error!("prediction transport panicked");
                Err(ResponseError::Malformed("transport panicked".into()))
            });

        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.settle(response, &mut inner.sink)
        }))
        .unwrap_or_else(|_| {
            error!("view update panicked while settling the submission");
            self.fail(GENERIC_FAILURE_MESSAGE, &mut inner.sink)
        });

        inner.state = match &outcome {
            SubmitOutcome::Succeeded(result) => {
                advance(&inner.state, SubmissionEvent::Resolved(result.clone()))
            }
            SubmitOutcome::Failed(message) => {
                advance(&inner.state, SubmissionEvent::Rejected(message.clone()))
            }
            SubmitOutcome::Ignored => inner.state.clone(),
        };
        inner.sink.set_trigger(true, &self.idle_label);
        outcome
    }

    async fn exchange(&self, snapshot: &FormSnapshot) -> Result<PredictionResult, ResponseError> {
        let body = self.transport.post_form(snapshot).await.map_err(|err| {
            warn!(error = %err, "prediction request failed");
            ResponseError::from(err)
        })?;
        interpret_response(self.renderer.shape(), body)
    }

    fn settle(
        &self,
        response: Result<PredictionResult, ResponseError>,
        sink: &mut S,
    ) -> SubmitOutcome {
        match response {
            Ok(result) => match self.renderer.render(&result, sink) {
                Ok(()) => {
                    info!(model = result.model(), "prediction rendered");
                    SubmitOutcome::Succeeded(result)
                }
                Err(err) => {
                    warn!(error = %err, "failed to render prediction");
                    self.fail(GENERIC_FAILURE_MESSAGE, sink)
                }
            },
            Err(err) => {
                if let ResponseError::Application(message) = &err {
                    info!(%message, "prediction rejected by service");
                }
                self.fail(err.user_message(), sink)
            }
        }
    }

    fn fail(&self, message: &str, sink: &mut S) -> SubmitOutcome {
        self.renderer.hide(sink);
        self.presenter.show_error(message, sink);
        SubmitOutcome::Failed(message.to_string())
    }
}

/// Classifies a JSON body: an `error` string wins, anything else must decode
/// into the page's response shape.
pub fn interpret_response(
    shape: ResponseShape,
    body: serde_json::Value,
) -> Result<PredictionResult, ResponseError> {
    match body.get("error") {
        None | Some(serde_json::Value::Null) => {}
        Some(serde_json::Value::String(message)) if message.is_empty() => {}
        Some(serde_json::Value::String(message)) => {
            return Err(ResponseError::Application(message.clone()));
        }
        Some(other) => {
            return Err(ResponseError::Malformed(format!(
                "error field is not a string: {other}"
            )));
        }
    }

    shape.decode(body).map_err(|err| {
        warn!(error = %err, %shape, "prediction response has an unexpected shape");
        ResponseError::Malformed(err.to_string())
    })
}

fn advance(state: &SubmissionState, event: SubmissionEvent) -> SubmissionState {
    state.clone().transition(event).unwrap_or_else(|err| {
        error!(error = %err, "rejected submission state transition");
        state.clone()
    })
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
