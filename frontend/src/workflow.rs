//! Upload-and-predict workflow.
//!
//! A small state machine that owns the file selection, the preview image,
//! the waiting indicator and the result panel. It performs no I/O: each
//! event returns the [`Effect`] the caller must run, and the completion of
//! that effect comes back as another event.
//!
//! ```text
//!            FileSelected ──▶ ReadPreview ──▶ PreviewLoaded
//!
//!   Idle ── SubmitRequested ──▶ Submitting ── ResponseSettled ──▶ Settled
//!    ▲           (guard)            │ Upload                        │
//!    └──────────────────────────────┴───────────────────────────────┘
//! ```
//!
//! Every request and every file read is tagged with an id. Only the latest
//! one may update the UI, so a slow response can never overwrite a newer one.
//! A heatmap also supersedes the pending read of the selection it came from.

use serde_json::Value;

use crate::config::CACHE_BUST_PARAM;
use crate::types::{AppResult, PredictionOutcome, ResultContent};

/// Message shown when submitting without a file.
pub const NO_FILE_MESSAGE: &str = "Please select a file.";

/// Identifier of an upload request.
pub type RequestId = u64;

/// Identifier of a file selection.
pub type SelectionId = u64;

/// Named UI slots rendered by the upload page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UiSlots {
    /// Image source of the preview (data URL or heatmap URL).
    pub preview_source: Option<String>,
    pub preview_visible: bool,
    pub waiting_visible: bool,
    pub result_visible: bool,
    pub result_content: Option<ResultContent>,
    /// Inline validation message under the form.
    pub upload_error: Option<String>,
}

/// Lifecycle of the latest submission.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum UploadState {
    #[default]
    Idle,
    Submitting { request: RequestId },
    Settled(PredictionOutcome),
}

/// Inputs to the controller.
#[derive(Debug)]
pub enum UploadEvent<F> {
    /// The file input changed; `None` when the selection was cleared.
    FileSelected(Option<F>),
    /// A preview read finished.
    PreviewLoaded {
        selection: SelectionId,
        result: AppResult<String>,
    },
    /// The form was submitted.
    SubmitRequested,
    /// The upload request settled. `settled_at` is a millisecond timestamp.
    ResponseSettled {
        request: RequestId,
        response: AppResult<Value>,
        settled_at: i64,
    },
}

/// Asynchronous work requested by the controller.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect<F> {
    /// Read `file` into a data URL, then send [`UploadEvent::PreviewLoaded`].
    ReadPreview { selection: SelectionId, file: F },
    /// Upload `file`, then send [`UploadEvent::ResponseSettled`].
    Upload { request: RequestId, file: F },
}

#[derive(Clone, Debug)]
struct Selection<F> {
    id: SelectionId,
    file: F,
}

/// Upload workflow controller, generic over the file handle.
#[derive(Clone, Debug)]
pub struct UploadController<F> {
    state: UploadState,
    ui: UiSlots,
    selection: Option<Selection<F>>,
    /// Selection that the in-flight request was made from.
    submitted: Option<SelectionId>,
    /// Selection whose preview was replaced by a heatmap.
    heatmap_shown: Option<SelectionId>,
    next_selection: SelectionId,
    next_request: RequestId,
    last_cache_bust: i64,
}

impl<F> Default for UploadController<F> {
    fn default() -> Self {
        Self {
            state: UploadState::Idle,
            ui: UiSlots::default(),
            selection: None,
            submitted: None,
            heatmap_shown: None,
            next_selection: 1,
            next_request: 1,
            last_cache_bust: i64::MIN,
        }
    }
}

impl<F: Clone> UploadController<F> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    pub fn ui(&self) -> &UiSlots {
        &self.ui
    }

    /// Apply one event and return the effect to run, if any.
    pub fn handle(&mut self, event: UploadEvent<F>) -> Option<Effect<F>> {
        match event {
            UploadEvent::FileSelected(file) => self.on_file_selected(file),
            UploadEvent::PreviewLoaded { selection, result } => {
                self.on_preview_loaded(selection, result);
                None
            }
            UploadEvent::SubmitRequested => self.on_submit(),
            UploadEvent::ResponseSettled {
                request,
                response,
                settled_at,
            } => {
                self.on_settled(request, response, settled_at);
                None
            }
        }
    }

    fn on_file_selected(&mut self, file: Option<F>) -> Option<Effect<F>> {
        self.ui.upload_error = None;

        let Some(file) = file else {
            log::info!("Selection cleared");
            self.selection = None;
            self.ui.preview_visible = false;
            self.ui.preview_source = None;
            return None;
        };

        let id = self.next_selection;
        self.next_selection += 1;
        self.selection = Some(Selection {
            id,
            file: file.clone(),
        });

        Some(Effect::ReadPreview {
            selection: id,
            file,
        })
    }

    fn on_preview_loaded(&mut self, selection: SelectionId, result: AppResult<String>) {
        if self.selection.as_ref().map(|s| s.id) != Some(selection) {
            log::debug!("Ignoring preview for superseded selection {}", selection);
            return;
        }
        if self.heatmap_shown == Some(selection) {
            log::debug!("Heatmap already shown for selection {}, dropping preview", selection);
            return;
        }

        match result {
            Ok(data_url) => {
                self.ui.preview_source = Some(data_url);
                self.ui.preview_visible = true;
            }
            Err(e) => {
                log::warn!("Could not render preview: {}", e);
                self.ui.preview_source = None;
                self.ui.preview_visible = false;
                self.ui.upload_error = Some(e.user_message());
            }
        }
    }

    fn on_submit(&mut self) -> Option<Effect<F>> {
        let Some(selection) = self.selection.as_ref() else {
            log::warn!("Submit without a file");
            self.ui.upload_error = Some(NO_FILE_MESSAGE.to_string());
            return None;
        };

        let request = self.next_request;
        self.next_request += 1;
        self.submitted = Some(selection.id);
        let file = selection.file.clone();

        self.ui.upload_error = None;
        self.ui.waiting_visible = true;
        self.ui.result_visible = false;
        self.state = UploadState::Submitting { request };

        log::info!("Submitting upload #{}", request);
        Some(Effect::Upload { request, file })
    }

    fn on_settled(&mut self, request: RequestId, response: AppResult<Value>, settled_at: i64) {
        if self.state != (UploadState::Submitting { request }) {
            log::debug!("Ignoring stale response for upload #{}", request);
            return;
        }

        let outcome = match response {
            Ok(payload) => PredictionOutcome::from_payload(&payload),
            Err(e) => {
                log::error!("Upload #{} failed: {}", request, e);
                PredictionOutcome::TransportFailure
            }
        };

        self.ui.waiting_visible = false;

        if let Some(heatmap) = outcome.heatmap() {
            let current = self.selection.as_ref().map(|s| s.id);
            if current.is_some() && current == self.submitted {
                let source = self.cache_busted(heatmap, settled_at);
                self.ui.preview_source = Some(source);
                self.ui.preview_visible = true;
                self.heatmap_shown = current;
            } else {
                log::debug!("Selection changed since upload #{}, keeping preview", request);
            }
        }

        let content = ResultContent::from(&outcome);
        log::info!("Upload #{} settled: {}", request, content.text());
        self.ui.result_content = Some(content);
        self.ui.result_visible = true;
        self.state = UploadState::Settled(outcome);
    }

    /// Append a cache-busting parameter that never repeats.
    fn cache_busted(&mut self, url: &str, now: i64) -> String {
        let stamp = now.max(self.last_cache_bust.saturating_add(1));
        self.last_cache_bust = stamp;
        let separator = if url.contains('?') { '&' } else { '?' };
        format!("{}{}{}={}", url, separator, CACHE_BUST_PARAM, stamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AppError;
    use serde_json::json;

    const PREVIEW: &str = "data:image/png;base64,iVBORw0KGgo=";
    const NOW: i64 = 1_700_000_000_000;

    fn with_preview(file: &'static str) -> UploadController<&'static str> {
        let mut controller = UploadController::new();
        let effect = controller.handle(UploadEvent::FileSelected(Some(file)));
        let Some(Effect::ReadPreview { selection, .. }) = effect else {
            panic!("expected a preview read");
        };
        controller.handle(UploadEvent::PreviewLoaded {
            selection,
            result: Ok(PREVIEW.to_string()),
        });
        controller
    }

    fn submit(controller: &mut UploadController<&'static str>) -> RequestId {
        match controller.handle(UploadEvent::SubmitRequested) {
            Some(Effect::Upload { request, .. }) => request,
            other => panic!("expected an upload, got {:?}", other),
        }
    }

    fn settle(controller: &mut UploadController<&'static str>, request: RequestId, response: AppResult<Value>) {
        controller.handle(UploadEvent::ResponseSettled {
            request,
            response,
            settled_at: NOW,
        });
    }

    #[test]
    fn test_submit_without_file_sends_nothing() {
        let mut controller = UploadController::<&str>::new();

        assert_eq!(controller.handle(UploadEvent::SubmitRequested), None);
        assert_eq!(controller.ui().upload_error.as_deref(), Some(NO_FILE_MESSAGE));
        assert!(!controller.ui().waiting_visible);
        assert!(!controller.ui().result_visible);
        assert_eq!(controller.state(), &UploadState::Idle);
    }

    #[test]
    fn test_file_selection_shows_preview() {
        let controller = with_preview("xray.png");

        assert_eq!(controller.ui().preview_source.as_deref(), Some(PREVIEW));
        assert!(controller.ui().preview_visible);
    }

    #[test]
    fn test_cleared_selection_hides_preview() {
        let mut controller = with_preview("xray.png");

        assert_eq!(controller.handle(UploadEvent::FileSelected(None)), None);
        assert!(!controller.ui().preview_visible);
        assert_eq!(controller.ui().preview_source, None);
        assert_eq!(controller.handle(UploadEvent::SubmitRequested), None);
    }

    #[test]
    fn test_submitting_shows_waiting_and_hides_result() {
        let mut controller = with_preview("xray.png");
        let first = submit(&mut controller);
        settle(&mut controller, first, Ok(json!({"bone_type": "Hand", "result": "Normal"})));
        assert!(controller.ui().result_visible);

        let effect = controller.handle(UploadEvent::SubmitRequested);
        let Some(Effect::Upload { request, file }) = effect else {
            panic!("expected an upload");
        };
        assert_eq!(file, "xray.png");
        assert_eq!(controller.state(), &UploadState::Submitting { request });
        assert!(controller.ui().waiting_visible);
        assert!(!controller.ui().result_visible);
    }

    #[test]
    fn test_not_fractured_keeps_preview() {
        let mut controller = with_preview("xray.png");
        let request = submit(&mut controller);
        settle(
            &mut controller,
            request,
            Ok(json!({"bone_type": "Wrist", "result": "Not Fractured"})),
        );

        let ui = controller.ui();
        assert!(!ui.waiting_visible);
        assert!(ui.result_visible);
        assert_eq!(
            ui.result_content.as_ref().map(ResultContent::text).as_deref(),
            Some("Bone Type: Wrist  Result: Not Fractured")
        );
        assert_eq!(ui.preview_source.as_deref(), Some(PREVIEW));
    }

    #[test]
    fn test_fractured_swaps_in_heatmap() {
        let mut controller = with_preview("xray.png");
        let request = submit(&mut controller);
        settle(
            &mut controller,
            request,
            Ok(json!({
                "bone_type": "Wrist",
                "result": "Fractured",
                "heatmap_image": "/heatmaps/1.png"
            })),
        );

        let ui = controller.ui();
        assert_eq!(
            ui.result_content.as_ref().map(ResultContent::text).as_deref(),
            Some("Bone Type: Wrist  Result: Fractured")
        );
        assert_eq!(
            ui.preview_source.as_deref(),
            Some("/heatmaps/1.png?t=1700000000000")
        );
        assert!(ui.preview_visible);
        assert!(!ui.waiting_visible);
    }

    #[test]
    fn test_cache_bust_never_repeats() {
        let payload = json!({
            "bone_type": "Shoulder",
            "result": "Fractured",
            "heatmap_image": "/uploads/processed/heatmap_x.png"
        });
        let mut controller = with_preview("x.png");

        let first = submit(&mut controller);
        settle(&mut controller, first, Ok(payload.clone()));
        let first_source = controller.ui().preview_source.clone();

        let second = submit(&mut controller);
        settle(&mut controller, second, Ok(payload));
        let second_source = controller.ui().preview_source.clone();

        assert_ne!(first_source, second_source);
        assert_eq!(
            second_source.as_deref(),
            Some("/uploads/processed/heatmap_x.png?t=1700000000001")
        );
    }

    #[test]
    fn test_cache_bust_extends_existing_query() {
        let mut controller = with_preview("x.png");
        let request = submit(&mut controller);
        settle(
            &mut controller,
            request,
            Ok(json!({
                "bone_type": "Elbow",
                "result": "Fractured",
                "heatmap_image": "/heatmap?id=4"
            })),
        );

        assert_eq!(
            controller.ui().preview_source.as_deref(),
            Some("/heatmap?id=4&t=1700000000000")
        );
    }

    #[test]
    fn test_malformed_response_is_error() {
        let mut controller = with_preview("xray.png");
        let request = submit(&mut controller);
        settle(&mut controller, request, Ok(json!({"message": "Unauthorized access"})));

        let ui = controller.ui();
        let content = ui.result_content.as_ref().unwrap();
        assert!(content.is_error());
        assert_eq!(content.text(), "Prediction failed.");
        assert!(!ui.waiting_visible);
        assert!(ui.result_visible);
        assert_eq!(controller.state(), &UploadState::Settled(PredictionOutcome::Malformed));
    }

    #[test]
    fn test_transport_failure_hides_waiting() {
        let mut controller = with_preview("xray.png");
        let request = submit(&mut controller);
        settle(
            &mut controller,
            request,
            Err(AppError::Transport("TypeError: Failed to fetch".to_string())),
        );

        let ui = controller.ui();
        assert_eq!(
            ui.result_content.as_ref().map(ResultContent::text).as_deref(),
            Some("Server error occurred.")
        );
        assert!(ui.result_content.as_ref().unwrap().is_error());
        assert!(!ui.waiting_visible);
        assert!(ui.result_visible);
        assert_eq!(ui.preview_source.as_deref(), Some(PREVIEW));
    }

    #[test]
    fn test_stale_response_is_ignored() {
        let mut controller = with_preview("xray.png");
        let first = submit(&mut controller);
        let second = submit(&mut controller);

        settle(
            &mut controller,
            first,
            Ok(json!({"bone_type": "Hand", "result": "Normal"})),
        );
        assert!(controller.ui().waiting_visible);
        assert!(!controller.ui().result_visible);

        settle(
            &mut controller,
            second,
            Ok(json!({"bone_type": "Elbow", "result": "Normal"})),
        );
        assert!(!controller.ui().waiting_visible);
        assert_eq!(
            controller.ui().result_content.as_ref().map(ResultContent::text).as_deref(),
            Some("Bone Type: Elbow  Result: Normal")
        );

        // A late duplicate after settling changes nothing.
        settle(&mut controller, first, Err(AppError::Transport("late".to_string())));
        assert_eq!(
            controller.ui().result_content.as_ref().map(ResultContent::text).as_deref(),
            Some("Bone Type: Elbow  Result: Normal")
        );
    }

    #[test]
    fn test_stale_preview_is_ignored() {
        let mut controller = UploadController::new();
        let Some(Effect::ReadPreview { selection: first, .. }) =
            controller.handle(UploadEvent::FileSelected(Some("a.png")))
        else {
            panic!("expected a preview read");
        };
        let Some(Effect::ReadPreview { selection: second, .. }) =
            controller.handle(UploadEvent::FileSelected(Some("b.png")))
        else {
            panic!("expected a preview read");
        };

        controller.handle(UploadEvent::PreviewLoaded {
            selection: second,
            result: Ok("data:b".to_string()),
        });
        controller.handle(UploadEvent::PreviewLoaded {
            selection: first,
            result: Ok("data:a".to_string()),
        });

        assert_eq!(controller.ui().preview_source.as_deref(), Some("data:b"));
    }

    #[test]
    fn test_heatmap_skipped_after_new_selection() {
        let mut controller = with_preview("a.png");
        let request = submit(&mut controller);
        let Some(Effect::ReadPreview { selection, .. }) =
            controller.handle(UploadEvent::FileSelected(Some("b.png")))
        else {
            panic!("expected a preview read");
        };
        controller.handle(UploadEvent::PreviewLoaded {
            selection,
            result: Ok("data:b".to_string()),
        });

        settle(
            &mut controller,
            request,
            Ok(json!({
                "bone_type": "Hand",
                "result": "Fractured",
                "heatmap_image": "/heatmaps/a.png"
            })),
        );

        assert_eq!(controller.ui().preview_source.as_deref(), Some("data:b"));
        assert!(controller.ui().result_visible);
    }

    #[test]
    fn test_late_preview_keeps_heatmap() {
        let mut controller = UploadController::new();
        let Some(Effect::ReadPreview { selection, .. }) =
            controller.handle(UploadEvent::FileSelected(Some("xray.png")))
        else {
            panic!("expected a preview read");
        };
        let request = submit(&mut controller);
        settle(
            &mut controller,
            request,
            Ok(json!({
                "bone_type": "Wrist",
                "result": "Fractured",
                "heatmap_image": "/h.png"
            })),
        );
        assert_eq!(
            controller.ui().preview_source.as_deref(),
            Some("/h.png?t=1700000000000")
        );

        controller.handle(UploadEvent::PreviewLoaded {
            selection,
            result: Ok("data:x".to_string()),
        });

        assert_eq!(
            controller.ui().preview_source.as_deref(),
            Some("/h.png?t=1700000000000")
        );
        assert!(controller.ui().preview_visible);
    }

    #[test]
    fn test_preview_after_reselect_replaces_heatmap() {
        let mut controller = with_preview("a.png");
        let request = submit(&mut controller);
        settle(
            &mut controller,
            request,
            Ok(json!({
                "bone_type": "Hand",
                "result": "Fractured",
                "heatmap_image": "/heatmaps/a.png"
            })),
        );

        let Some(Effect::ReadPreview { selection, .. }) =
            controller.handle(UploadEvent::FileSelected(Some("b.png")))
        else {
            panic!("expected a preview read");
        };
        controller.handle(UploadEvent::PreviewLoaded {
            selection,
            result: Ok("data:b".to_string()),
        });

        assert_eq!(controller.ui().preview_source.as_deref(), Some("data:b"));
    }

    #[test]
    fn test_unreadable_file_hides_preview() {
        let mut controller = UploadController::new();
        let Some(Effect::ReadPreview { selection, .. }) =
            controller.handle(UploadEvent::FileSelected(Some("broken.png")))
        else {
            panic!("expected a preview read");
        };
        controller.handle(UploadEvent::PreviewLoaded {
            selection,
            result: Err(AppError::Preview("NotReadableError".to_string())),
        });

        assert!(!controller.ui().preview_visible);
        assert_eq!(
            controller.ui().upload_error.as_deref(),
            Some("Could not read the selected file.")
        );
        assert!(matches!(
            controller.handle(UploadEvent::SubmitRequested),
            Some(Effect::Upload { file: "broken.png", .. })
        ));
    }

    #[test]
    fn test_validation_message_clears_on_valid_submit() {
        let mut controller = UploadController::new();
        controller.handle(UploadEvent::SubmitRequested);
        assert!(controller.ui().upload_error.is_some());

        controller.handle(UploadEvent::FileSelected(Some("xray.png")));
        assert!(controller.ui().upload_error.is_none());

        controller.handle(UploadEvent::FileSelected(None));
        controller.handle(UploadEvent::SubmitRequested);
        assert!(controller.ui().upload_error.is_some());

        controller.handle(UploadEvent::FileSelected(Some("xray.png")));
        submit(&mut controller);
        assert!(controller.ui().upload_error.is_none());
    }
}
