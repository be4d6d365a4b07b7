//! Middleware stack for the envelope gateway.
//!
//! Layer order: Request → CORS → Trace → HMAC Authentication → Handler.
//! The HMAC check gates all further processing: a failing check
//! short-circuits before the body is parsed or decrypted.

pub mod cors;
pub mod hmac_auth;

pub use cors::create_cors_layer;
pub use hmac_auth::{HmacAuthLayer, CLIENT_ID_HEADER, SIGNATURE_HEADER};
