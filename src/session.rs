//! JSON session storage.
//!
//! Persists every `SESSION_DATA`-tagged endpoint across process restarts as
//! one JSON object keyed by OSC path:
//!
//! ```json
//! { "/OSC/source_port": "17500", "/Test/slider": 42.0, "/Test/array": [1, 2, 3] }
//! ```
//!
//! On `init`, the store is parsed and matching endpoints are written (with
//! by-kind coercion), overriding their compile-time defaults; malformed or
//! missing input degrades to an empty object. On `external_destinations`,
//! changed values are folded back into the object and the store is rewritten
//! only when at least one key was touched, so an unchanged tree causes no
//! writes.

use log::{info, warn};

use crate::component::{Component, ComponentMeta};
use crate::endpoints::{Endpoint, Tags, Value};
use crate::runtime::Context;

// ───────────────────────────────────────────────────────────────
// Store trait and backends
// ───────────────────────────────────────────────────────────────

/// Where the JSON snapshot lives. Implementations must make `store`
/// atomic — a crash mid-write must leave either the old or the new
/// snapshot, never a torn one.
pub trait SessionStore {
    /// Read the whole snapshot; empty string when nothing is stored yet.
    fn load(&mut self) -> String;

    /// Replace the whole snapshot.
    fn store(&mut self, json: &str);
}

/// File-backed store. Writes go to a sibling temp file first and are
/// renamed into place, which is atomic on POSIX filesystems.
pub struct FileSessionStore {
    path: std::path::PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&mut self) -> String {
        std::fs::read_to_string(&self.path).unwrap_or_default()
    }

    fn store(&mut self, json: &str) {
        let tmp = self.path.with_extension("tmp");
        if let Err(e) = std::fs::write(&tmp, json) {
            warn!("session: writing {} failed: {e}", tmp.display());
            return;
        }
        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            warn!("session: replacing {} failed: {e}", self.path.display());
        }
    }
}

/// In-memory store for tests.
#[derive(Default)]
pub struct MemoryStore {
    pub contents: String,
    pub writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self { contents: contents.into(), writes: 0 }
    }
}

impl SessionStore for MemoryStore {
    fn load(&mut self) -> String {
        self.contents.clone()
    }

    fn store(&mut self, json: &str) {
        self.contents = json.to_string();
        self.writes += 1;
    }
}

// ───────────────────────────────────────────────────────────────
// The component
// ───────────────────────────────────────────────────────────────

/// The session-storage binding component.
pub struct SessionStorage<S: SessionStore + 'static> {
    meta: ComponentMeta,
    store: S,
    json: serde_json::Map<String, serde_json::Value>,
}

impl<S: SessionStore + 'static> SessionStorage<S> {
    pub fn new(store: S) -> Self {
        Self {
            meta: ComponentMeta::named("Session Storage")
                .describe("Persist tagged endpoint values across restarts as a JSON object.")
                .version("0.1.0"),
            store,
            json: serde_json::Map::new(),
        }
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// The in-memory snapshot, keyed by OSC path.
    pub fn snapshot(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.json
    }
}

fn for_each_session_datum(
    cx: &mut Context<'_>,
    f: &mut impl FnMut(&str, &mut dyn Endpoint),
) {
    cx.for_each_endpoint(|route, endpoint| {
        if endpoint.meta().tags.contains(Tags::SESSION_DATA) {
            f(&route.path, endpoint);
        }
    });
}

impl<S: SessionStore + 'static> Component for SessionStorage<S> {
    fn meta(&self) -> &ComponentMeta {
        &self.meta
    }

    fn init(&mut self, cx: &mut Context<'_>) {
        let raw = self.store.load();
        self.json = match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(serde_json::Value::Object(object)) => object,
            Ok(_) | Err(_) => {
                if !raw.is_empty() {
                    warn!("session: stored snapshot is not a JSON object; starting empty");
                }
                serde_json::Map::new()
            }
        };

        let json = &self.json;
        let mut restored = 0usize;
        for_each_session_datum(cx, &mut |path, endpoint| {
            let Some(member) = json.get(path) else { return };
            match serde_json::from_value::<Value>(member.clone()) {
                Ok(value) => match endpoint.set_value(&value) {
                    Ok(()) => restored += 1,
                    Err(e) => warn!("session: {path}: {e}; keeping default"),
                },
                Err(e) => warn!("session: {path}: unusable stored value ({e}); keeping default"),
            }
        });
        if restored > 0 {
            info!("session: restored {restored} endpoints");
        }
    }

    fn external_destinations(&mut self, cx: &mut Context<'_>) {
        let json = &mut self.json;
        let mut touched = false;
        for_each_session_datum(cx, &mut |path, endpoint| {
            let Some(value) = endpoint.value() else { return };
            let Ok(encoded) = serde_json::to_value(&value) else { return };
            match json.get(path) {
                Some(stored) if *stored == encoded => {}
                _ => {
                    json.insert(path.to_string(), encoded);
                    touched = true;
                }
            }
        });

        if touched {
            match serde_json::to_string(&self.json) {
                Ok(serialised) => self.store.store(&serialised),
                Err(e) => warn!("session: serialisation failed: {e}"),
            }
        }
    }
}
