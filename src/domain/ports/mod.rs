use crate::domain::models::booking::{BookingRequest, BookingStatus, CreatedBooking, ExistingBooking};
use crate::domain::models::instructor::Instructor;
use crate::domain::services::availability::TimeSlot;
use crate::error::BookingError;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait InstructorDirectory: Send + Sync {
    async fn get_instructor(&self, id: &str) -> Result<Instructor, BookingError>;
    async fn list_instructors(&self) -> Result<Vec<Instructor>, BookingError>;
}

#[async_trait]
pub trait BookingGateway: Send + Sync {
    /// Time slots the backend currently considers open for one day.
    async fn instructor_availability(
        &self,
        instructor_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<TimeSlot>, BookingError>;

    /// Non-cancelled bookings with lesson dates in [start, end], inclusive.
    async fn bookings_in_range(
        &self,
        instructor_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ExistingBooking>, BookingError>;

    async fn create_booking_request(
        &self,
        request: &BookingRequest,
    ) -> Result<CreatedBooking, BookingError>;

    async fn update_booking_status(
        &self,
        booking_id: &str,
        status: BookingStatus,
        payment_status: &str,
    ) -> Result<(), BookingError>;

    async fn cancel_booking(&self, booking_id: &str, reason: &str) -> Result<(), BookingError>;
}

#[async_trait]
pub trait PostcodeService: Send + Sync {
    async fn validate(&self, postcode: &str) -> Result<bool, BookingError>;
}

#[async_trait]
pub trait NotificationGateway: Send + Sync {
    async fn notify(
        &self,
        pupil_id: &str,
        booking_id: &str,
        kind: &str,
        title: &str,
        message: &str,
    ) -> Result<(), BookingError>;
}
