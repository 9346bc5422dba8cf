//! Login form.

use leptos::ev::SubmitEvent;
use leptos::*;

use crate::components::PasswordField;
use crate::services::{login, login_destination, navigate_to};
use crate::types::Credentials;

#[component]
pub fn LoginForm() -> impl IntoView {
    let (username, set_username) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let credentials = Credentials {
            username: username.get_untracked(),
            password: password.get_untracked(),
        };

        spawn_local(async move {
            match login(&credentials).await {
                Ok(reply) => navigate_to(login_destination(&reply)),
                Err(e) => {
                    log::warn!("Login failed: {}", e);
                    set_error.set(Some(e.user_message()));
                }
            }
        });
    };

    view! {
        <form class="auth-form" id="login-form" on:submit=on_submit>
            <input
                type="text"
                id="login-username"
                placeholder="Username"
                required=true
                prop:value=username
                on:input=move |ev| set_username.set(event_target_value(&ev))
            />
            <PasswordField id="login-password" value=password set_value=set_password/>
            <button type="submit" class="btn btn-primary">"Log in"</button>
            <p class="error-message" id="login-error">
                {move || error.get().unwrap_or_default()}
            </p>
            <p class="auth-switch">"No account yet? " <a href="/signup">"Sign up"</a></p>
        </form>
    }
}
