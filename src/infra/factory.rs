use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::infra::http::backend::RestBackend;
use crate::infra::http::booking_api::HttpBookingGateway;
use crate::infra::http::instructor_api::HttpInstructorDirectory;
use crate::infra::http::notification_api::HttpNotificationGateway;
use crate::infra::http::postcode_api::HttpPostcodeService;
use crate::state::ClientState;

pub fn bootstrap_state(config: &Config) -> ClientState {
    info!(backend = %config.backend_url, "wiring backend collaborators");

    let backend = RestBackend::new(config.backend_url.clone(), config.backend_api_key.clone());

    ClientState {
        config: config.clone(),
        instructors: Arc::new(HttpInstructorDirectory::new(backend.clone())),
        bookings: Arc::new(HttpBookingGateway::new(backend.clone())),
        postcodes: Arc::new(HttpPostcodeService::new(config.postcode_api_url.clone())),
        notifications: Arc::new(HttpNotificationGateway::new(backend)),
    }
}
