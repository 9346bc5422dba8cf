//! Fracture Detect - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend for logging in and submitting X-ray images
//! to the fracture prediction service.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App (Router)                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  /login   LoginPage   ── Hero, LoginForm                     │
//! │  /signup  SignupPage  ── Hero, SignupForm, SuccessModal      │
//! │  /upload  UploadPage  ── Header (logout), Hero, UploadSection│
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - Common types (PredictionOutcome, ResultContent, AppError)
//! - [`workflow`] - Upload-and-predict state machine
//! - [`components`] - UI components (Header, Upload, Login, Signup, etc.)
//! - [`services`] - Backend and browser communication

use leptos::*;
use leptos_meta::{provide_meta_context, Title};
use leptos_router::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod workflow;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{
    // Prediction
    PredictionOutcome, ResultContent,
    // Auth
    Credentials, MessageResponse,
    // Errors
    AppError, AppResult,
};

// Workflow
pub use workflow::{UiSlots, UploadController, UploadEvent, UploadState};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application
// =============================================================================

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text=APP_NAME/>
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=LoginPage/>
                    <Route path="/login" view=LoginPage/>
                    <Route path="/signup" view=SignupPage/>
                    <Route path="/upload" view=UploadPage/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn LoginPage() -> impl IntoView {
    view! {
        <Header/>
        <div class="container">
            <Hero title="Log in" subtitle="Sign in to analyse X-ray images."/>
            <LoginForm/>
        </div>
        <Footer/>
    }
}

#[component]
fn SignupPage() -> impl IntoView {
    view! {
        <Header/>
        <div class="container">
            <Hero title="Create an account" subtitle="Passwords need at least 8 characters."/>
            <SignupForm/>
        </div>
        <Footer/>
    }
}

#[component]
fn UploadPage() -> impl IntoView {
    view! {
        <Header show_logout=true/>
        <div class="container">
            <Hero
                title="Fracture Detection"
                subtitle="Upload an X-ray image to identify the bone and check it for fractures."
            />
            <UploadSection/>
        </div>
        <Footer/>
    }
}
