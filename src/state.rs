use std::sync::Arc;

use crate::config::Config;
use crate::domain::ports::{
    BookingGateway, InstructorDirectory, NotificationGateway, PostcodeService,
};

/// Collaborator handles shared by every screen of the client. Built once at
/// startup by `infra::factory::bootstrap_state`.
#[derive(Clone)]
pub struct ClientState {
    pub config: Config,
    pub instructors: Arc<dyn InstructorDirectory>,
    pub bookings: Arc<dyn BookingGateway>,
    pub postcodes: Arc<dyn PostcodeService>,
    pub notifications: Arc<dyn NotificationGateway>,
}
