//! Footer component

use leptos::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer>
            <div>"Fracture Detect • Powered by " <span class="rust-badge">"🦀 Rust + Leptos"</span></div>
            <div class="footer-note">
                "Predictions are decision support only and do not replace a radiologist."
            </div>
        </footer>
    }
}
