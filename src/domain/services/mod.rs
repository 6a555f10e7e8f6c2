pub mod availability;
pub mod booking_flow;
pub mod calendar;
pub mod postcode;
pub mod pricing;
pub mod receipts;
