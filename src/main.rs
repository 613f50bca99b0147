//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the zcountries library and the Zellij plugin
//! system. Everything host-specific lives here: permissions, subscriptions,
//! key translation and the execution of [`Action`]s.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, build `AppState`
//! 2. **Permissions**: Request `WebAccess`; the catalog loads once granted
//! 3. **Update**: Translate host events, delegate to `handle_event`, execute
//!    the returned actions
//! 4. **Render**: Call the library renderer
//!
//! # Event Mapping
//!
//! - `Key` → [`map_key`] for the current screen and mode
//! - `WebRequestResult` → `Event::WebResult` (the request context routes it)
//! - `Timer` → `Event::Timer` (deadline check)
//! - `PermissionRequestResult` → `Event::PermissionsResult`
//!
//! The library is target-independent; only the wasm build registers a plugin.

#![allow(clippy::multiple_crate_versions)]

#[cfg(target_family = "wasm")]
zellij_tile::register_plugin!(shim::State);

#[cfg(target_family = "wasm")]
mod shim {
    use std::collections::BTreeMap;
    use zellij_tile::prelude::*;

    use zcountries::app::{map_key, Key};
    use zcountries::{handle_event, Action, Config};

    /// Plugin state wrapper around the library's `AppState`.
    pub struct State {
        app: zcountries::AppState,
    }

    impl Default for State {
        fn default() -> Self {
            Self {
                app: zcountries::initialize(&Config::default()),
            }
        }
    }

    impl ZellijPlugin for State {
        fn load(&mut self, configuration: BTreeMap<String, String>) {
            let config = Config::from_zellij(&configuration);
            zcountries::observability::init_tracing(&config);

            let span = tracing::debug_span!("plugin_load");
            let _guard = span.entered();

            tracing::debug!(api_base_url = %config.api_base_url, route = ?config.route, "parsed configuration");
            self.app = zcountries::initialize(&config);

            request_permission(&[PermissionType::WebAccess]);
            subscribe(&[
                EventType::Key,
                EventType::WebRequestResult,
                EventType::Timer,
                EventType::PermissionRequestResult,
            ]);

            tracing::debug!("plugin load complete - waiting for permissions");
        }

        fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
            let event_name = Self::event_name(&event);
            let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
            let _guard = span.entered();

            let our_event = match event {
                zellij_tile::prelude::Event::Key(ref key) => {
                    let Some(key) = Self::translate_key(key) else {
                        return false;
                    };
                    match map_key(&self.app, key) {
                        Some(event) => event,
                        None => return false,
                    }
                }
                zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                    zcountries::Event::WebResult { status, body, context }
                }
                zellij_tile::prelude::Event::Timer(_elapsed) => zcountries::Event::Timer,
                zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                    zcountries::Event::PermissionsResult {
                        granted: matches!(status, PermissionStatus::Granted),
                    }
                }
                _ => return false,
            };

            match handle_event(&mut self.app, &our_event, chrono::Utc::now()) {
                Ok((should_render, actions)) => {
                    tracing::debug!(action_count = actions.len(), should_render, "event handled");
                    for action in &actions {
                        Self::execute_action(action);
                    }
                    should_render
                }
                Err(e) => {
                    tracing::warn!(error = %e, "error handling event");
                    false
                }
            }
        }

        fn render(&mut self, rows: usize, cols: usize) {
            zcountries::ui::render(&self.app, rows, cols);
        }
    }

    impl State {
        fn event_name(event: &zellij_tile::prelude::Event) -> String {
            match event {
                zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
                zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
                zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
                zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
                _ => "Other".to_string(),
            }
        }

        /// Reduces a Zellij key to the library's [`Key`].
        fn translate_key(key: &KeyWithModifier) -> Option<Key> {
            if key.has_modifiers(&[KeyModifier::Ctrl]) {
                return match key.bare_key {
                    BareKey::Char(c) => Some(Key::Ctrl(c)),
                    _ => None,
                };
            }
            Some(match key.bare_key {
                BareKey::Char(c) => Key::Char(c),
                BareKey::Enter => Key::Enter,
                BareKey::Esc => Key::Esc,
                BareKey::Backspace => Key::Backspace,
                BareKey::Tab => Key::Tab,
                BareKey::Up => Key::Up,
                BareKey::Down => Key::Down,
                _ => return None,
            })
        }

        #[tracing::instrument(level = "debug")]
        fn execute_action(action: &Action) {
            match action {
                Action::CloseFocus => hide_self(),
                Action::WebRequest(request) => {
                    tracing::debug!(url = %request.url, kind = ?request.kind, "issuing web request");
                    web_request(
                        request.url.clone(),
                        HttpVerb::Get,
                        BTreeMap::new(),
                        Vec::new(),
                        request.context(),
                    );
                }
                Action::SetTimeout { seconds } => set_timeout(*seconds),
            }
        }
    }
}

#[cfg(not(target_family = "wasm"))]
fn main() {
    eprintln!("zcountries is a Zellij plugin; build it for wasm32-wasip1 and load the .wasm from Zellij");
}
