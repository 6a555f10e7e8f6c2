use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use tracing::{info, warn};

use crate::domain::models::booking::{
    BookingRequest, BookingStatus, CreatedBooking, LessonType, PaymentMethod,
};
use crate::domain::models::draft::{BookingDraft, BookingStep};
use crate::domain::models::instructor::Instructor;
use crate::domain::ports::{BookingGateway, InstructorDirectory, NotificationGateway, PostcodeService};
use crate::domain::services::availability::TimeSlot;
use crate::domain::services::{postcode, pricing};
use crate::error::BookingError;

/// Whether the flow is editable, mid-submission, or done. `Submitting` is the
/// guard against a second `complete()` racing the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowStatus {
    Editing,
    Submitting,
    Confirmed,
}

/// Drives one booking draft through the five steps, owning the draft and the
/// collaborator handles. One instance per booking attempt.
pub struct BookingFlow {
    bookings: Arc<dyn BookingGateway>,
    postcodes: Arc<dyn PostcodeService>,
    notifications: Arc<dyn NotificationGateway>,
    pupil_id: String,
    instructor: Instructor,
    draft: BookingDraft,
    step: BookingStep,
    status: FlowStatus,
}

impl BookingFlow {
    /// Loads the instructor and seeds a fresh draft.
    pub async fn start(
        directory: Arc<dyn InstructorDirectory>,
        bookings: Arc<dyn BookingGateway>,
        postcodes: Arc<dyn PostcodeService>,
        notifications: Arc<dyn NotificationGateway>,
        pupil_id: &str,
        instructor_id: &str,
    ) -> Result<Self, BookingError> {
        let instructor = directory.get_instructor(instructor_id).await?;
        info!(instructor = %instructor.id, "starting booking flow");

        let mut flow = BookingFlow {
            bookings,
            postcodes,
            notifications,
            pupil_id: pupil_id.to_string(),
            instructor,
            draft: BookingDraft::new(instructor_id),
            step: BookingStep::Instructor,
            status: FlowStatus::Editing,
        };
        flow.recompute_price();
        Ok(flow)
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn instructor(&self) -> &Instructor {
        &self.instructor
    }

    pub fn current_step(&self) -> BookingStep {
        self.step
    }

    pub fn status(&self) -> FlowStatus {
        self.status
    }

    // --- draft mutation -----------------------------------------------------

    pub fn set_lesson_type(&mut self, lesson_type: LessonType) {
        self.draft.lesson_type = lesson_type;
        self.recompute_price();
    }

    pub fn set_duration(&mut self, minutes: i64) -> Result<(), BookingError> {
        if minutes <= 0 {
            return Err(BookingError::validation(
                "duration",
                "lesson duration must be positive",
            ));
        }
        self.draft.duration_min = minutes;
        self.recompute_price();
        Ok(())
    }

    pub fn set_schedule(&mut self, date: NaiveDate, time: NaiveTime) {
        self.draft.lesson_date = Some(date);
        self.draft.start_time = Some(time);
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.draft.lesson_date = Some(date);
    }

    pub fn set_time(&mut self, time: NaiveTime) {
        self.draft.start_time = Some(time);
    }

    /// Stores the postcode in display form and refreshes the area surcharge
    /// from the instructor's coverage areas.
    pub fn set_pickup_postcode(&mut self, raw: &str) {
        self.draft.pickup_postcode = postcode::format(raw);
        self.draft.area_charge_pence = pricing::area_charge_pence(raw, &self.instructor.areas);
        self.recompute_price();
    }

    pub fn set_pickup_address(&mut self, address: &str) {
        self.draft.pickup_address = address.trim().to_string();
    }

    pub fn set_notes(&mut self, notes: &str) {
        self.draft.notes = notes.to_string();
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.draft.payment_method = Some(method);
    }

    pub fn set_bank(&mut self, bank: &str) {
        self.draft.selected_bank = Some(bank.to_string());
    }

    /// Derived pricing. Idempotent for the same draft inputs.
    pub fn recompute_price(&mut self) {
        let breakdown = pricing::price_breakdown(
            self.draft.lesson_type,
            self.draft.duration_min,
            self.draft.area_charge_pence,
        );
        self.draft.base_price_pence = breakdown.base_pence;
        self.draft.total_price_pence = breakdown.total_pence;
    }

    // --- collaborator lookups ----------------------------------------------

    /// Time slots for the chosen day, straight from the booking collaborator.
    pub async fn load_slots(&self, date: NaiveDate) -> Result<Vec<TimeSlot>, BookingError> {
        self.bookings
            .instructor_availability(&self.instructor.id, date)
            .await
    }

    /// Remote existence check for the entered pickup postcode. The local
    /// shape check in `validate_step` is the gate; this is advisory.
    pub async fn verify_pickup_postcode(&self) -> Result<bool, BookingError> {
        self.postcodes.validate(&self.draft.pickup_postcode).await
    }

    // --- step machine -------------------------------------------------------

    /// Validate the current step and move forward. `Confirmation` is only
    /// reachable through `complete()`.
    pub fn advance(&mut self) -> Result<(), BookingError> {
        self.validate_step(self.step)?;
        if self.step < BookingStep::Payment {
            if let Some(next) = self.step.next() {
                self.step = next;
            }
        }
        Ok(())
    }

    /// Backward navigation needs no validation and never fails; it is simply
    /// a no-op at the first step or once the booking is confirmed.
    pub fn retreat(&mut self) {
        if self.status == FlowStatus::Confirmed {
            return;
        }
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
    }

    pub fn validate_step(&self, step: BookingStep) -> Result<(), BookingError> {
        match step {
            BookingStep::Instructor => {
                if self.draft.instructor_id.is_none() {
                    return Err(BookingError::validation(
                        "instructor",
                        "please select an instructor",
                    ));
                }
            }
            BookingStep::Schedule => {
                if self.draft.lesson_date.is_none() {
                    return Err(BookingError::validation("date", "please select a date"));
                }
                if self.draft.start_time.is_none() {
                    return Err(BookingError::validation("time", "please select a time"));
                }
            }
            BookingStep::LessonDetails => {
                if self.draft.pickup_postcode.is_empty() {
                    return Err(BookingError::validation(
                        "pickup_postcode",
                        "please enter a pickup postcode",
                    ));
                }
                if !postcode::is_uk_postcode(&self.draft.pickup_postcode) {
                    return Err(BookingError::validation(
                        "pickup_postcode",
                        "please enter a valid UK postcode",
                    ));
                }
                if self.draft.pickup_address.is_empty() {
                    return Err(BookingError::validation(
                        "pickup_address",
                        "please enter a full pickup address",
                    ));
                }
            }
            BookingStep::Payment => match self.draft.payment_method {
                None => {
                    return Err(BookingError::validation(
                        "payment_method",
                        "please select a payment method",
                    ));
                }
                Some(PaymentMethod::OpenBanking) if self.draft.selected_bank.is_none() => {
                    return Err(BookingError::validation("bank", "please select your bank"));
                }
                Some(_) => {}
            },
            BookingStep::Confirmation => {}
        }
        Ok(())
    }

    fn build_request(&self) -> Result<BookingRequest, BookingError> {
        Ok(BookingRequest {
            request_id: self.draft.draft_id,
            instructor_id: self
                .draft
                .instructor_id
                .clone()
                .ok_or_else(|| BookingError::validation("instructor", "missing instructor"))?,
            lesson_date: self
                .draft
                .lesson_date
                .ok_or_else(|| BookingError::validation("date", "missing date"))?,
            start_time: self
                .draft
                .start_time
                .ok_or_else(|| BookingError::validation("time", "missing time"))?,
            duration_min: self.draft.duration_min,
            lesson_type: self.draft.lesson_type,
            pickup_postcode: self.draft.pickup_postcode.clone(),
            pickup_address: self.draft.pickup_address.clone(),
            notes: self.draft.notes.clone(),
            amount_pence: self.draft.total_price_pence,
            payment_method: self
                .draft
                .payment_method
                .ok_or_else(|| BookingError::validation("payment_method", "missing payment method"))?,
        })
    }

    /// Final submission. Validates steps 1-4 in order (jumping back to the
    /// first failing step), re-checks the chosen slot against the backend,
    /// then creates and confirms the booking. Backend failures leave the step
    /// unchanged so the user can retry without re-entering anything.
    pub async fn complete(&mut self) -> Result<CreatedBooking, BookingError> {
        match self.status {
            FlowStatus::Submitting => return Err(BookingError::SubmissionInProgress),
            FlowStatus::Confirmed => {
                return Err(BookingError::validation("step", "booking already confirmed"));
            }
            FlowStatus::Editing => {}
        }

        for n in 1..=4 {
            let step = BookingStep::from_number(n).unwrap_or(BookingStep::Payment);
            if let Err(e) = self.validate_step(step) {
                self.step = step;
                return Err(e);
            }
        }

        let request = self.build_request()?;
        self.status = FlowStatus::Submitting;

        // The slot was chosen from a render that may be minutes old; take a
        // fresh read before committing. This is still not an atomic
        // reservation, only a narrower window (see DESIGN.md).
        let slots = match self.load_slots(request.lesson_date).await {
            Ok(slots) => slots,
            Err(e) => {
                self.status = FlowStatus::Editing;
                return Err(e);
            }
        };
        let still_open = slots
            .iter()
            .any(|s| s.available && s.time == request.start_time);
        if !still_open {
            self.status = FlowStatus::Editing;
            self.step = BookingStep::Schedule;
            return Err(BookingError::AvailabilityConflict(format!(
                "{} {} was taken while you were booking",
                request.lesson_date, request.start_time
            )));
        }

        let created = match self.bookings.create_booking_request(&request).await {
            Ok(created) => created,
            Err(e) => {
                self.status = FlowStatus::Editing;
                return Err(e);
            }
        };

        if let Err(e) = self
            .bookings
            .update_booking_status(&created.id, BookingStatus::Confirmed, "paid")
            .await
        {
            self.status = FlowStatus::Editing;
            return Err(e);
        }

        // Best effort; a lost notification must not fail the booking.
        if let Err(e) = self
            .notifications
            .notify(
                &self.pupil_id,
                &created.id,
                "booking_confirmed",
                "Booking Confirmed",
                &format!("Your lesson on {} has been confirmed!", request.lesson_date),
            )
            .await
        {
            warn!(booking = %created.id, error = %e, "confirmation notification failed");
        }

        info!(booking = %created.id, "booking confirmed");
        self.status = FlowStatus::Confirmed;
        self.step = BookingStep::Confirmation;
        Ok(CreatedBooking {
            id: created.id,
            status: BookingStatus::Confirmed,
        })
    }
}
