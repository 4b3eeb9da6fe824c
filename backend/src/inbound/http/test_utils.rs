//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::{MockRegistrosCommand, MockRegistrosQuery};
use crate::inbound::http::error::json_error_handler;
use crate::inbound::http::state::HttpState;

/// Wrap port mocks in handler state.
pub fn state_from_mocks(
    query: MockRegistrosQuery,
    command: MockRegistrosCommand,
) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(Arc::new(query), Arc::new(command)))
}

/// JSON extractor configuration matching the production app.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}
