//! Full page navigation.
//!
//! Pages are server-rendered entry points guarded by the session cookie,
//! so moving between them reloads the document instead of using the
//! client-side router.

/// Replace the current document with `path`.
pub fn navigate_to(path: &str) {
    log::info!("↪ Navigating to {}", path);
    if let Err(e) = gloo_utils::window().location().set_href(path) {
        log::error!("Navigation to {} failed: {:?}", path, e);
    }
}
