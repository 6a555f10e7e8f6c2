use chrono::Duration;
use icalendar::{Calendar, Component, Event, EventLike};

use crate::domain::models::booking::BookingRequest;
use crate::domain::models::instructor::Instructor;

pub fn format_pounds(pence: i64) -> String {
    format!("£{}.{:02}", pence / 100, pence.rem_euclid(100))
}

fn short_reference(booking_id: &str) -> String {
    booking_id.chars().take(8).collect::<String>().to_uppercase()
}

/// Generates an iCalendar (.ics) string for a confirmed lesson
pub fn generate_ics(instructor: &Instructor, request: &BookingRequest, booking_id: &str) -> String {
    let start = request.lesson_date.and_time(request.start_time);
    let end = start + Duration::minutes(request.duration_min);

    let mut calendar = Calendar::new();

    let ical_event = Event::new()
        .summary(&format!("Driving Lesson with {}", instructor.name))
        .description(&format!(
            "Booking Reference: #{}\nInstructor: {}\nPhone: {}",
            short_reference(booking_id),
            instructor.name,
            instructor.phone.as_deref().unwrap_or("Not provided"),
        ))
        .location(&format!(
            "{}, {}",
            request.pickup_address, request.pickup_postcode
        ))
        .starts(start)
        .ends(end)
        .uid(booking_id)
        .done();

    calendar.push(ical_event);
    calendar.to_string()
}

/// Plain-text receipt for a confirmed booking.
pub fn receipt_text(instructor: &Instructor, request: &BookingRequest, booking_id: &str) -> String {
    let payment = match request.payment_method {
        crate::domain::models::booking::PaymentMethod::OpenBanking => "Open Banking",
        crate::domain::models::booking::PaymentMethod::Card => "Card",
    };

    format!(
        "BOOKING RECEIPT\n\
         ================\n\n\
         Booking Reference: #{}\n\n\
         LESSON DETAILS\n\
         --------------\n\
         Instructor: {}\n\
         Date: {}\n\
         Time: {}\n\
         Duration: {} minutes\n\
         Type: {}\n\n\
         PICKUP LOCATION\n\
         ---------------\n\
         {}\n\
         {}\n\n\
         PAYMENT DETAILS\n\
         ---------------\n\
         Amount Paid: {}\n\
         Payment Method: {}\n\
         Payment Status: PAID\n",
        short_reference(booking_id),
        instructor.name,
        request.lesson_date,
        request.start_time.format("%H:%M"),
        request.duration_min,
        request.lesson_type.label(),
        request.pickup_address,
        request.pickup_postcode,
        format_pounds(request.amount_pence),
        payment,
    )
}
