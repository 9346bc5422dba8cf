use leptos::*;
use crate::config::{APP_NAME, LOGIN_PAGE};
use crate::services::{logout, navigate_to};

#[component]
pub fn Header(
    /// Show the logout button (authenticated pages only).
    #[prop(optional)]
    show_logout: bool,
) -> impl IntoView {
    // Logout redirects once the request settles; failures stay on the page
    let on_logout = move |_| {
        spawn_local(async move {
            match logout().await {
                Ok(()) => navigate_to(LOGIN_PAGE),
                Err(e) => log::error!("❌ Logout error: {}", e),
            }
        });
    };

    view! {
        <header>
            <div class="header-left">
                <a href="/" class="logo">{APP_NAME}</a>
            </div>
            <div class="header-right">
                <Show
                    when=move || show_logout
                    fallback=|| view! { }
                >
                    <button class="btn btn-secondary" id="logoutButton" on:click=on_logout>
                        "Log out"
                    </button>
                </Show>
            </div>
        </header>
    }
}
