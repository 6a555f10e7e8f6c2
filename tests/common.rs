use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use lesson_booking::domain::models::booking::{
    BookingRequest, BookingStatus, CreatedBooking, ExistingBooking,
};
use lesson_booking::domain::models::instructor::{
    Instructor, InstructorPreferences, ServiceArea, WorkingDayPolicy, WorkingHours,
};
use lesson_booking::domain::ports::{
    BookingGateway, InstructorDirectory, NotificationGateway, PostcodeService,
};
use lesson_booking::domain::services::availability::TimeSlot;
use lesson_booking::error::BookingError;

#[allow(dead_code)]
pub fn date(text: &str) -> NaiveDate {
    text.parse().unwrap()
}

#[allow(dead_code)]
pub fn time(text: &str) -> NaiveTime {
    format!("{text}:00").parse().unwrap()
}

#[allow(dead_code)]
pub fn confirmed_booking(lesson_date: &str, start: &str, duration_min: i64) -> ExistingBooking {
    ExistingBooking {
        lesson_date: date(lesson_date),
        start_time: time(start),
        duration_min,
        status: BookingStatus::Confirmed,
    }
}

#[allow(dead_code)]
pub fn test_instructor() -> Instructor {
    Instructor {
        id: "ins-1".to_string(),
        name: "Sarah Hughes".to_string(),
        phone: Some("07700 900123".to_string()),
        areas: vec![ServiceArea {
            area_name: "Sheffield Central".to_string(),
            postcode_prefix: "S1".to_string(),
            additional_charge_pence: 500,
        }],
        preferences: InstructorPreferences {
            working_days: WorkingDayPolicy::default(),
            working_hours: WorkingHours::default(),
            standard_lesson_price_pence: 3500,
        },
    }
}

/// All slots between 09:00 and 16:00 inclusive, hourly, available.
#[allow(dead_code)]
pub fn open_day() -> Vec<TimeSlot> {
    (9..17)
        .map(|h| TimeSlot {
            time: NaiveTime::from_hms_opt(h, 0, 0).unwrap(),
            available: true,
        })
        .collect()
}

pub struct MockDirectory {
    pub instructor: Instructor,
}

#[async_trait]
impl InstructorDirectory for MockDirectory {
    async fn get_instructor(&self, id: &str) -> Result<Instructor, BookingError> {
        if id == self.instructor.id {
            Ok(self.instructor.clone())
        } else {
            Err(BookingError::NotFound(format!("instructor {id}")))
        }
    }

    async fn list_instructors(&self) -> Result<Vec<Instructor>, BookingError> {
        Ok(vec![self.instructor.clone()])
    }
}

#[derive(Default)]
pub struct MockBookingGateway {
    pub slots: Mutex<HashMap<NaiveDate, Vec<TimeSlot>>>,
    pub bookings: Mutex<Vec<ExistingBooking>>,
    pub created: Mutex<Vec<BookingRequest>>,
    pub status_updates: Mutex<Vec<(String, BookingStatus, String)>>,
    pub fail_create: AtomicBool,
    pub fail_availability: AtomicBool,
}

#[allow(dead_code)]
impl MockBookingGateway {
    pub fn with_slots(self, date: NaiveDate, slots: Vec<TimeSlot>) -> Self {
        self.slots.lock().unwrap().insert(date, slots);
        self
    }

    pub fn created_count(&self) -> usize {
        self.created.lock().unwrap().len()
    }
}

#[async_trait]
impl BookingGateway for MockBookingGateway {
    async fn instructor_availability(
        &self,
        _instructor_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<TimeSlot>, BookingError> {
        if self.fail_availability.load(Ordering::SeqCst) {
            return Err(BookingError::BackendUnavailable("availability down".into()));
        }
        Ok(self
            .slots
            .lock()
            .unwrap()
            .get(&date)
            .cloned()
            .unwrap_or_default())
    }

    async fn bookings_in_range(
        &self,
        _instructor_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ExistingBooking>, BookingError> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.lesson_date >= start && b.lesson_date <= end)
            .cloned()
            .collect())
    }

    async fn create_booking_request(
        &self,
        request: &BookingRequest,
    ) -> Result<CreatedBooking, BookingError> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(BookingError::BackendUnavailable("create failed".into()));
        }
        self.created.lock().unwrap().push(request.clone());
        Ok(CreatedBooking {
            id: format!("bk-{}", request.request_id),
            status: BookingStatus::Pending,
        })
    }

    async fn update_booking_status(
        &self,
        booking_id: &str,
        status: BookingStatus,
        payment_status: &str,
    ) -> Result<(), BookingError> {
        self.status_updates.lock().unwrap().push((
            booking_id.to_string(),
            status,
            payment_status.to_string(),
        ));
        Ok(())
    }

    async fn cancel_booking(&self, _booking_id: &str, _reason: &str) -> Result<(), BookingError> {
        Ok(())
    }
}

pub struct MockPostcodeService {
    pub valid: bool,
}

#[async_trait]
impl PostcodeService for MockPostcodeService {
    async fn validate(&self, _postcode: &str) -> Result<bool, BookingError> {
        Ok(self.valid)
    }
}

#[derive(Default)]
pub struct MockNotificationGateway {
    pub sent: AtomicUsize,
    pub fail: AtomicBool,
}

#[async_trait]
impl NotificationGateway for MockNotificationGateway {
    async fn notify(
        &self,
        _pupil_id: &str,
        _booking_id: &str,
        _kind: &str,
        _title: &str,
        _message: &str,
    ) -> Result<(), BookingError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(BookingError::BackendUnavailable("notifications down".into()));
        }
        self.sent.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// A flow plus handles onto its mocks, for assertions after the fact.
#[allow(dead_code)]
pub struct TestFlow {
    pub directory: Arc<MockDirectory>,
    pub gateway: Arc<MockBookingGateway>,
    pub postcodes: Arc<MockPostcodeService>,
    pub notifications: Arc<MockNotificationGateway>,
}

#[allow(dead_code)]
impl TestFlow {
    pub fn new() -> Self {
        TestFlow {
            directory: Arc::new(MockDirectory {
                instructor: test_instructor(),
            }),
            gateway: Arc::new(MockBookingGateway::default()),
            postcodes: Arc::new(MockPostcodeService { valid: true }),
            notifications: Arc::new(MockNotificationGateway::default()),
        }
    }

    pub async fn start(&self) -> lesson_booking::domain::services::booking_flow::BookingFlow {
        lesson_booking::domain::services::booking_flow::BookingFlow::start(
            self.directory.clone(),
            self.gateway.clone(),
            self.postcodes.clone(),
            self.notifications.clone(),
            "pupil-1",
            "ins-1",
        )
        .await
        .expect("flow should start")
    }
}
