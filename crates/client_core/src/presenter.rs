use crate::{
    types::{ElementId, Region},
    view::ViewSink,
};

/// Shows failures in the error region.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorPresenter;

impl ErrorPresenter {
    /// `message` is set as plain text, never as markup, since it may come
    /// straight from the service.
    pub fn show_error<S: ViewSink + ?Sized>(&self, message: &str, sink: &mut S) {
        sink.set_text(ElementId::ErrorMessage, message);
        sink.set_region_visible(Region::Error, true);
        sink.scroll_into_view(Region::Error);
    }

    pub fn hide_error<S: ViewSink + ?Sized>(&self, sink: &mut S) {
        sink.set_region_visible(Region::Error, false);
    }
}
