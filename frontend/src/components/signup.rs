//! Signup form and its confirmation modal.

use leptos::ev::SubmitEvent;
use leptos::*;

use crate::components::PasswordField;
use crate::config::LOGIN_PAGE;
use crate::services::{navigate_to, signup};
use crate::types::Credentials;

#[component]
pub fn SignupForm() -> impl IntoView {
    let (username, set_username) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let (registered, set_registered) = create_signal(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let credentials = Credentials {
            username: username.get_untracked(),
            password: password.get_untracked(),
        };

        // Password length is checked by `signup` before any request
        spawn_local(async move {
            match signup(&credentials).await {
                Ok(_) => {
                    set_error.set(None);
                    set_registered.set(true);
                }
                Err(e) => {
                    log::warn!("Signup failed: {}", e);
                    set_error.set(Some(e.user_message()));
                }
            }
        });
    };

    view! {
        <form class="auth-form" id="signup-form" on:submit=on_submit>
            <input
                type="text"
                id="signup-username"
                placeholder="Username"
                required=true
                prop:value=username
                on:input=move |ev| set_username.set(event_target_value(&ev))
            />
            <PasswordField id="signup-password" value=password set_value=set_password/>
            <button type="submit" class="btn btn-primary">"Sign up"</button>
            <p class="error-message" id="signup-error">
                {move || error.get().unwrap_or_default()}
            </p>
            <p class="auth-switch">"Already registered? " <a href="/login">"Log in"</a></p>
        </form>

        <SuccessModal open=registered/>
    }
}

/// Overlay shown after a successful signup.
#[component]
fn SuccessModal(open: ReadSignal<bool>) -> impl IntoView {
    view! {
        <div class="modal" id="success-modal" class:active=move || open.get()>
            <div class="modal-content">
                <p>"Account created successfully."</p>
                <button
                    class="btn btn-primary"
                    id="modal-ok-button"
                    on:click=move |_| navigate_to(LOGIN_PAGE)
                >
                    "OK"
                </button>
            </div>
        </div>
    }
}
