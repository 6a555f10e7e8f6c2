use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::models::booking::{
    BookingRequest, BookingStatus, CreatedBooking, ExistingBooking,
};
use crate::domain::ports::BookingGateway;
use crate::domain::services::availability::TimeSlot;
use crate::error::BookingError;
use crate::infra::http::backend::RestBackend;

pub struct HttpBookingGateway {
    backend: RestBackend,
}

impl HttpBookingGateway {
    pub fn new(backend: RestBackend) -> Self {
        Self { backend }
    }
}

#[derive(Deserialize)]
struct SlotsResponse {
    slots: Vec<TimeSlot>,
}

#[derive(Serialize)]
struct StatusUpdatePayload<'a> {
    status: BookingStatus,
    payment_status: &'a str,
}

#[derive(Serialize)]
struct CancelPayload<'a> {
    reason: &'a str,
}

#[async_trait]
impl BookingGateway for HttpBookingGateway {
    async fn instructor_availability(
        &self,
        instructor_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<TimeSlot>, BookingError> {
        let response = self
            .backend
            .get(&format!("/instructors/{instructor_id}/availability"))
            .query(&[("date", date.to_string())])
            .send()
            .await?;
        let body: SlotsResponse = self.backend.json(response).await?;
        Ok(body.slots)
    }

    async fn bookings_in_range(
        &self,
        instructor_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ExistingBooking>, BookingError> {
        let response = self
            .backend
            .get(&format!("/instructors/{instructor_id}/bookings"))
            .query(&[("from", start.to_string()), ("to", end.to_string())])
            .send()
            .await?;
        self.backend.json(response).await
    }

    async fn create_booking_request(
        &self,
        request: &BookingRequest,
    ) -> Result<CreatedBooking, BookingError> {
        let response = self
            .backend
            .post("/booking-requests")
            .json(request)
            .send()
            .await?;
        self.backend.json(response).await
    }

    async fn update_booking_status(
        &self,
        booking_id: &str,
        status: BookingStatus,
        payment_status: &str,
    ) -> Result<(), BookingError> {
        let response = self
            .backend
            .patch(&format!("/booking-requests/{booking_id}/status"))
            .json(&StatusUpdatePayload {
                status,
                payment_status,
            })
            .send()
            .await?;
        self.backend.check(response).await?;
        Ok(())
    }

    async fn cancel_booking(&self, booking_id: &str, reason: &str) -> Result<(), BookingError> {
        let response = self
            .backend
            .post(&format!("/booking-requests/{booking_id}/cancel"))
            .json(&CancelPayload { reason })
            .send()
            .await?;
        self.backend.check(response).await?;
        Ok(())
    }
}
