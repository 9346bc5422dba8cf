//! Password input with a show/hide toggle.

use leptos::*;

/// `type` attribute for the password input.
pub fn password_input_type(visible: bool) -> &'static str {
    if visible { "text" } else { "password" }
}

/// Label of the toggle button.
pub fn password_toggle_label(visible: bool) -> &'static str {
    if visible { "Hide password" } else { "Show password" }
}

#[component]
pub fn PasswordField(
    /// DOM id of the input; the toggle gets `toggle-<id>`.
    #[prop(into)]
    id: String,
    value: ReadSignal<String>,
    set_value: WriteSignal<String>,
) -> impl IntoView {
    let (visible, set_visible) = create_signal(false);
    let toggle_id = format!("toggle-{}", id);

    view! {
        <div class="password-field">
            <input
                id=id
                type=move || password_input_type(visible.get())
                placeholder="Password"
                required=true
                prop:value=value
                on:input=move |ev| set_value.set(event_target_value(&ev))
            />
            <button
                type="button"
                class="toggle-password"
                id=toggle_id
                on:click=move |_| set_visible.update(|v| *v = !*v)
            >
                {move || password_toggle_label(visible.get())}
            </button>
        </div>
    }
}
