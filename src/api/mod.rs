//! Request/response protocol for the REST Countries API.
//!
//! The plugin never talks HTTP itself: controllers emit [`ApiRequest`] values,
//! the Zellij shim issues them with `web_request`, and the host's
//! `WebRequestResult` event is decoded back into an [`ApiResponse`]. The
//! request token travels in the request context, which lets controllers drop
//! results of superseded requests.
//!
//! - `request`: URL building, request tokens, context encoding
//! - `response`: status and body decoding

pub mod request;
pub mod response;

pub use request::{
    encode_component, ApiRequest, CountryApi, RequestKind, RequestToken, CATALOG_FIELDS,
    DEFAULT_API_BASE_URL,
};
pub use response::{decode_countries, ApiResponse};
