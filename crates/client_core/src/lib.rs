//! Client-side interaction layer for the pathloss prediction service.
//!
//! A [`PredictionController`] owns one page: it keeps the model dropdown and
//! cards in sync, clears negative numeric input, and runs submission cycles
//! `Idle -> Submitting -> Succeeded | Failed` against a
//! [`PredictionTransport`], rendering into a [`ViewSink`].

pub mod config;
pub mod controller;
pub mod error;
pub mod page;
pub mod presenter;
pub mod render;
pub mod selection;
pub mod state;
pub mod transport;
pub mod types;
pub mod view;

pub use config::{load_settings, ClientSettings};
pub use controller::{ControllerOptions, PredictionController, SubmitOutcome};
pub use error::{ResponseError, TransportError, GENERIC_FAILURE_MESSAGE};
pub use page::PageModel;
pub use presenter::ErrorPresenter;
pub use render::{Renderer, ResponseShape};
pub use selection::InputSynchronizer;
pub use state::SubmissionState;
pub use transport::{FormEncoding, HttpTransport, PredictionTransport};
pub use types::{ElementId, FormSnapshot, FormState, Region, SubmitEvent};
pub use view::ViewSink;
