//! Browser hydration bootstrap.
//!
//! DESIGN
//! ======
//! The server leaves the data snapshot in a well-known global; the bootstrap
//! reads it exactly once and hands it to [`boot`] as a parameter — a single
//! serialize/deserialize boundary between the two processes, not an ambient
//! global consulted throughout. A missing global means pure client
//! rendering; a missing root element is a broken deployment and fatal.

use query::Snapshot;

#[cfg(test)]
#[path = "boot_test.rs"]
mod tests;

/// Global the server-rendered document assigns the snapshot to.
pub const STATE_GLOBAL: &str = "__APP_STATE__";

/// Id of the DOM node the server renders the application into.
pub const ROOT_ELEMENT_ID: &str = "root";

#[derive(Debug, thiserror::Error)]
pub enum BootError {
    #[error("browser window unavailable")]
    NoWindow,
    #[error("hydration root element #root not found")]
    MissingRoot,
}

/// Parse serialized snapshot text. Malformed input degrades to an empty
/// snapshot so the page falls back to client-side fetching instead of
/// halting.
#[must_use]
pub fn parse_snapshot(text: &str) -> Snapshot {
    serde_json::from_str(text).unwrap_or_else(|err| {
        log::warn!("embedded state unreadable, falling back to client fetch: {err}");
        Snapshot::default()
    })
}

/// WASM entry point: read the embedded state once and hydrate `#root`.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let snapshot = read_embedded_state();
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(err) = boot(snapshot).await {
            log::error!("hydration failed: {err}");
            panic!("hydration failed: {err}");
        }
    });
}

/// Read and parse `window.__APP_STATE__`. Absent global means an empty
/// snapshot (pure client rendering).
#[cfg(feature = "hydrate")]
fn read_embedded_state() -> Snapshot {
    let Some(window) = web_sys::window() else {
        return Snapshot::default();
    };
    let Ok(raw) = js_sys::Reflect::get(&window, &wasm_bindgen::JsValue::from_str(STATE_GLOBAL))
    else {
        return Snapshot::default();
    };
    if raw.is_undefined() || raw.is_null() {
        return Snapshot::default();
    }
    match js_sys::JSON::stringify(&raw) {
        Ok(text) => parse_snapshot(&String::from(text)),
        Err(_) => Snapshot::default(),
    }
}

/// Hydrate the server-rendered DOM from the embedded snapshot.
///
/// Seeds a fresh query client from the snapshot, resolves anything the
/// snapshot does not cover, and attaches to the existing `#root` node: when
/// the client markup matches the server markup the DOM is left untouched,
/// otherwise the root contents are replaced and a warning is logged.
///
/// # Errors
///
/// Returns [`BootError::MissingRoot`] when the expected root DOM node is
/// absent — a deployment/markup contract violation, not a recoverable
/// runtime condition.
#[cfg(feature = "hydrate")]
pub async fn boot(snapshot: Snapshot) -> Result<(), BootError> {
    use crate::net::FetchTransport;
    use crate::prefetch::{self, PrefetchLimits};
    use crate::{app, render};

    let window = web_sys::window().ok_or(BootError::NoWindow)?;
    let document = window.document().ok_or(BootError::NoWindow)?;
    let root = document.get_element_by_id(ROOT_ELEMENT_ID).ok_or(BootError::MissingRoot)?;

    let seeded = !snapshot.is_empty();
    let transport: query::SharedTransport = std::sync::Arc::new(FetchTransport::new());
    let client = query::QueryClient::from_snapshot(transport, snapshot);

    let tree = app::app();
    // Resolves only what the snapshot does not cover; a fully seeded cache
    // issues no network calls here.
    if let Err(err) = prefetch::resolve_tree(&tree, &client, PrefetchLimits::default()).await {
        log::error!("client prefetch did not converge: {err}");
    }

    let markup = render::render_to_string(&tree, &client);
    if root.inner_html() == markup {
        log::info!("hydrated from embedded state (seeded: {seeded})");
    } else {
        log::warn!("server markup mismatch, replacing root contents");
        root.set_inner_html(&markup);
    }
    Ok(())
}
