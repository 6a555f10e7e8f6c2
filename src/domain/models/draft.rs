use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::booking::{LessonType, PaymentMethod};

/// The fixed five steps of the booking flow. Forward movement goes through a
/// validation gate; backward movement never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStep {
    Instructor,
    Schedule,
    LessonDetails,
    Payment,
    Confirmation,
}

impl BookingStep {
    pub fn number(&self) -> u8 {
        match self {
            BookingStep::Instructor => 1,
            BookingStep::Schedule => 2,
            BookingStep::LessonDetails => 3,
            BookingStep::Payment => 4,
            BookingStep::Confirmation => 5,
        }
    }

    pub fn from_number(n: u8) -> Option<BookingStep> {
        match n {
            1 => Some(BookingStep::Instructor),
            2 => Some(BookingStep::Schedule),
            3 => Some(BookingStep::LessonDetails),
            4 => Some(BookingStep::Payment),
            5 => Some(BookingStep::Confirmation),
            _ => None,
        }
    }

    pub fn next(&self) -> Option<BookingStep> {
        BookingStep::from_number(self.number() + 1)
    }

    pub fn previous(&self) -> Option<BookingStep> {
        match self.number() {
            n if n > 1 => BookingStep::from_number(n - 1),
            _ => None,
        }
    }
}

/// The in-progress booking being assembled across steps. Lives only as long
/// as its flow; nothing here is persisted before submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDraft {
    pub draft_id: Uuid,
    pub instructor_id: Option<String>,
    pub lesson_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub lesson_type: LessonType,
    pub duration_min: i64,
    pub pickup_postcode: String,
    pub pickup_address: String,
    pub notes: String,
    pub base_price_pence: i64,
    pub area_charge_pence: i64,
    pub total_price_pence: i64,
    pub payment_method: Option<PaymentMethod>,
    pub selected_bank: Option<String>,
}

impl BookingDraft {
    pub fn new(instructor_id: &str) -> Self {
        BookingDraft {
            draft_id: Uuid::new_v4(),
            instructor_id: Some(instructor_id.to_string()),
            lesson_date: None,
            start_time: None,
            lesson_type: LessonType::Standard,
            duration_min: 60,
            pickup_postcode: String::new(),
            pickup_address: String::new(),
            notes: String::new(),
            base_price_pence: 3500,
            area_charge_pence: 0,
            total_price_pence: 3500,
            payment_method: None,
            selected_bank: None,
        }
    }
}
