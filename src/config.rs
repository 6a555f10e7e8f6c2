use std::env;

#[derive(Clone)]
pub struct Config {
    pub backend_url: String,
    pub backend_api_key: String,
    pub postcode_api_url: String,
    /// How many months ahead a lesson may be booked.
    pub booking_horizon_months: u32,
    pub default_slot_minutes: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            backend_url: env::var("BACKEND_URL").expect("BACKEND_URL must be set"),
            backend_api_key: env::var("BACKEND_API_KEY").expect("BACKEND_API_KEY must be set"),
            postcode_api_url: env::var("POSTCODE_API_URL")
                .unwrap_or_else(|_| "https://api.postcodes.io".to_string()),
            booking_horizon_months: env::var("BOOKING_HORIZON_MONTHS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            default_slot_minutes: env::var("DEFAULT_SLOT_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
        }
    }
}
