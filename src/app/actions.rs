//! Side effects returned by the event handler.
//!
//! The handler never touches the host. It returns a `Vec<Action>` which the
//! plugin shim executes in order.
//!
//! ```rust
//! use zcountries::api::{CountryApi, RequestToken};
//! use zcountries::app::Action;
//!
//! let request = CountryApi::default().all_countries(RequestToken::new(1));
//! let actions = vec![Action::WebRequest(request), Action::SetTimeout { seconds: 5.0 }];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::api::ApiRequest;

/// Commands executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues a GET through the host's `web_request`, passing the request
    /// context along so the result can be routed back.
    WebRequest(ApiRequest),

    /// Arms a host timer. The resulting timer event lets controllers check
    /// their request deadlines.
    SetTimeout {
        seconds: f64,
    },
}
