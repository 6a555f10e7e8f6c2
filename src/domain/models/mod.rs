pub mod booking;
pub mod draft;
pub mod instructor;
