use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonType {
    Standard,
    Intensive,
    TestPrep,
    PassPlus,
}

impl LessonType {
    pub fn label(&self) -> &'static str {
        match self {
            LessonType::Standard => "Standard Lesson",
            LessonType::Intensive => "Intensive Lesson",
            LessonType::TestPrep => "Test Preparation",
            LessonType::PassPlus => "Pass Plus Module",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    OpenBanking,
    Card,
}

/// A lesson already committed for an instructor. Only the backend creates or
/// cancels these; this subsystem reads them to derive availability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExistingBooking {
    pub lesson_date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_min: i64,
    pub status: BookingStatus,
}

impl ExistingBooking {
    pub fn blocks_slots(&self) -> bool {
        self.status != BookingStatus::Cancelled
    }

    pub fn start(&self) -> NaiveDateTime {
        self.lesson_date.and_time(self.start_time)
    }

    pub fn end(&self) -> NaiveDateTime {
        self.start() + Duration::minutes(self.duration_min)
    }

    /// Half-open interval overlap against [start, end). Exact back-to-back
    /// adjacency does not count as overlap.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start < self.end() && end > self.start()
    }
}

/// The finalized payload handed to the booking collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    /// Client-minted idempotency key for the submission.
    pub request_id: Uuid,
    pub instructor_id: String,
    pub lesson_date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_min: i64,
    pub lesson_type: LessonType,
    pub pickup_postcode: String,
    pub pickup_address: String,
    pub notes: String,
    pub amount_pence: i64,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedBooking {
    pub id: String,
    pub status: BookingStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(start: &str, duration_min: i64) -> ExistingBooking {
        ExistingBooking {
            lesson_date: NaiveDate::from_ymd_opt(2026, 9, 14).unwrap(),
            start_time: start.parse().unwrap(),
            duration_min,
            status: BookingStatus::Confirmed,
        }
    }

    #[test]
    fn adjacency_is_not_overlap() {
        let b = booking("10:00:00", 60);
        let date = NaiveDate::from_ymd_opt(2026, 9, 14).unwrap();
        let nine = date.and_time("09:00:00".parse().unwrap());
        let ten = date.and_time("10:00:00".parse().unwrap());
        let eleven = date.and_time("11:00:00".parse().unwrap());
        let noon = date.and_time("12:00:00".parse().unwrap());

        assert!(!b.overlaps(nine, ten));
        assert!(b.overlaps(ten, eleven));
        assert!(!b.overlaps(eleven, noon));
    }
}
