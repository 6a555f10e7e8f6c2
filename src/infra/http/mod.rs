pub mod backend;
pub mod booking_api;
pub mod instructor_api;
pub mod notification_api;
pub mod postcode_api;
