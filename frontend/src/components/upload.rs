//! Image upload component.
//!
//! Binds the file input and the form to an [`UploadController`] and
//! renders its UI slots. Effects requested by the controller run on the
//! browser event loop and report back as new events.

use leptos::ev::SubmitEvent;
use leptos::*;
use web_sys::{Event, File, HtmlInputElement};

use crate::services::{read_as_data_url, request_prediction};
use crate::types::ResultContent;
use crate::workflow::{Effect, UploadController, UploadEvent};

type Controller = RwSignal<UploadController<File>>;

#[component]
pub fn UploadSection() -> impl IntoView {
    let controller: Controller = create_rw_signal(UploadController::new());
    let ui = create_memo(move |_| controller.with(|c| c.ui().clone()));

    let on_file_change = move |ev: Event| {
        let input: HtmlInputElement = event_target(&ev);
        let file = input.files().and_then(|files| files.get(0));
        dispatch(controller, UploadEvent::FileSelected(file));
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        dispatch(controller, UploadEvent::SubmitRequested);
    };

    let display = |visible: bool| if visible { "block" } else { "none" };

    view! {
        <div class="upload-section">
            <form class="upload-form" id="uploadForm" on:submit=on_submit>
                <input
                    type="file"
                    id="fileInput"
                    accept="image/*"
                    on:change=on_file_change
                />
                <button type="submit" class="upload-button">"Predict"</button>
            </form>

            <div class="error-message" id="uploadError">
                {move || ui.with(|u| u.upload_error.clone().unwrap_or_default())}
            </div>

            <div
                id="imagePreviewContainer"
                style:display=move || display(ui.with(|u| u.preview_visible))
            >
                <img
                    id="imagePreview"
                    alt="Selected X-ray"
                    src=move || ui.with(|u| u.preview_source.clone())
                />
            </div>

            <div
                class="waiting-message"
                id="waitingMessage"
                style:display=move || display(ui.with(|u| u.waiting_visible))
            >
                "⏳ Analysing image, please wait..."
            </div>

            <div
                class="prediction-result"
                id="predictionResult"
                style:display=move || display(ui.with(|u| u.result_visible))
            >
                {move || render_result(ui.with(|u| u.result_content.clone()))}
            </div>
        </div>
    }
}

/// Feed one event to the controller and run the effect it asks for.
fn dispatch(controller: Controller, event: UploadEvent<File>) {
    let effect = controller.try_update(|c| c.handle(event)).flatten();
    if let Some(effect) = effect {
        spawn_local(run_effect(controller, effect));
    }
}

async fn run_effect(controller: Controller, effect: Effect<File>) {
    let event = match effect {
        Effect::ReadPreview { selection, file } => UploadEvent::PreviewLoaded {
            selection,
            result: read_as_data_url(&file).await,
        },
        Effect::Upload { request, file } => {
            let response = request_prediction(&file).await;
            UploadEvent::ResponseSettled {
                request,
                response,
                settled_at: js_sys::Date::now() as i64,
            }
        }
    };
    dispatch(controller, event);
}

fn render_result(content: Option<ResultContent>) -> View {
    match content {
        Some(ResultContent::Prediction { bone_type, result }) => view! {
            "Bone Type: " <b>{bone_type}</b>
            <br/>
            "Result: " <b>{result}</b>
        }
        .into_view(),
        Some(ResultContent::Failure(message)) => view! {
            <span class="error-message" style="color: red;">{message}</span>
        }
        .into_view(),
        None => view! { }.into_view(),
    }
}
