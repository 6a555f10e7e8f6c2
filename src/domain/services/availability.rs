use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::models::booking::ExistingBooking;
use crate::domain::models::instructor::{WorkingDayPolicy, WorkingHours};
use crate::domain::ports::{BookingGateway, InstructorDirectory};
use crate::error::BookingError;

/// Classification of one calendar day. Exactly one applies to any date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    Available,
    Booked,
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub time: NaiveTime,
    pub available: bool,
}

/// One cell of the 6x7 month grid, including leading/trailing cells that
/// belong to the neighbouring months.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub status: DayStatus,
    pub in_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
}

pub fn parse_date(text: &str) -> Result<NaiveDate, BookingError> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| BookingError::InvalidDate(format!("expected YYYY-MM-DD, got '{text}'")))
}

pub fn parse_time(text: &str) -> Result<NaiveTime, BookingError> {
    NaiveTime::parse_from_str(text, "%H:%M")
        .map_err(|_| BookingError::InvalidDate(format!("expected HH:MM, got '{text}'")))
}

pub fn month_start(year: i32, month: u32) -> Result<NaiveDate, BookingError> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| BookingError::InvalidDate(format!("no such month: {year}-{month:02}")))
}

pub fn month_end(year: i32, month: u32) -> Result<NaiveDate, BookingError> {
    let start = month_start(year, month)?;
    let next = if month == 12 {
        month_start(year + 1, 1)?
    } else {
        month_start(year, month + 1)?
    };
    Ok(next.pred_opt().unwrap_or(start))
}

/// Classify every date of a month. Evaluation order is fixed and stops at the
/// first match: working-day check, then booked check, then the booking window
/// [today, max_date].
pub fn resolve_month(
    year: i32,
    month: u32,
    working_days: &WorkingDayPolicy,
    bookings: &[ExistingBooking],
    today: NaiveDate,
    max_date: NaiveDate,
) -> Result<BTreeMap<NaiveDate, DayStatus>, BookingError> {
    let start = month_start(year, month)?;
    let end = month_end(year, month)?;

    let mut statuses = BTreeMap::new();
    let mut date = start;
    while date <= end {
        let status = if !working_days.accepts(date.weekday()) {
            DayStatus::Disabled
        } else if bookings
            .iter()
            .any(|b| b.blocks_slots() && b.lesson_date == date)
        {
            DayStatus::Booked
        } else if date >= today && date <= max_date {
            DayStatus::Available
        } else {
            DayStatus::Disabled
        };
        statuses.insert(date, status);
        date += Duration::days(1);
    }
    Ok(statuses)
}

/// Slots of `duration_min` starting every `duration_min` minutes.
pub fn resolve_day_slots(
    date: NaiveDate,
    hours: &WorkingHours,
    bookings: &[ExistingBooking],
    duration_min: i64,
) -> Result<Vec<TimeSlot>, BookingError> {
    resolve_day_slots_spaced(date, hours, bookings, duration_min, duration_min)
}

/// Slot generation with the start interval decoupled from the slot length,
/// e.g. 60-minute lessons offered on the half hour. A slot is unavailable if
/// its half-open interval intersects any non-cancelled booking on that date;
/// exact adjacency is not an intersection.
pub fn resolve_day_slots_spaced(
    date: NaiveDate,
    hours: &WorkingHours,
    bookings: &[ExistingBooking],
    duration_min: i64,
    interval_min: i64,
) -> Result<Vec<TimeSlot>, BookingError> {
    if duration_min <= 0 || interval_min <= 0 {
        return Ok(Vec::new());
    }

    let day_bookings: Vec<&ExistingBooking> = bookings
        .iter()
        .filter(|b| b.blocks_slots() && b.lesson_date == date)
        .collect();

    let start_min = i64::from(hours.start.hour()) * 60 + i64::from(hours.start.minute());
    let end_min = i64::from(hours.end.hour()) * 60 + i64::from(hours.end.minute());

    let mut slots = Vec::new();
    let mut cursor = start_min;
    while cursor + duration_min <= end_min {
        let time = NaiveTime::from_hms_opt((cursor / 60) as u32, (cursor % 60) as u32, 0)
            .ok_or_else(|| BookingError::InvalidDate(format!("slot cursor {cursor} out of day")))?;
        let slot_start = date.and_time(time);
        let slot_end = slot_start + Duration::minutes(duration_min);

        let available = !day_bookings.iter().any(|b| b.overlaps(slot_start, slot_end));
        slots.push(TimeSlot { time, available });
        cursor += interval_min;
    }
    Ok(slots)
}

/// Expand a month into the familiar 6-week grid, starting on the Sunday on or
/// before the 1st. Cells outside the month or outside the resolved statuses
/// render as disabled.
pub fn month_grid(
    year: i32,
    month: u32,
    statuses: &BTreeMap<NaiveDate, DayStatus>,
    today: NaiveDate,
    selected: Option<NaiveDate>,
) -> Result<Vec<DayCell>, BookingError> {
    let first = month_start(year, month)?;
    let grid_start = first - Duration::days(i64::from(first.weekday().num_days_from_sunday()));

    let mut cells = Vec::with_capacity(42);
    for offset in 0..42 {
        let date = grid_start + Duration::days(offset);
        let in_month = date.month() == month && date.year() == year;
        let status = if in_month {
            statuses.get(&date).copied().unwrap_or(DayStatus::Disabled)
        } else {
            DayStatus::Disabled
        };
        cells.push(DayCell {
            date,
            status,
            in_month,
            is_today: date == today,
            is_selected: selected == Some(date),
        });
    }
    Ok(cells)
}

/// Pull an instructor's policy and the month's bookings through the ports and
/// resolve the month in one go.
pub async fn load_month_availability(
    directory: &dyn InstructorDirectory,
    gateway: &dyn BookingGateway,
    instructor_id: &str,
    year: i32,
    month: u32,
    today: NaiveDate,
    max_date: NaiveDate,
) -> Result<BTreeMap<NaiveDate, DayStatus>, BookingError> {
    let instructor = directory.get_instructor(instructor_id).await?;
    let start = month_start(year, month)?;
    let end = month_end(year, month)?;
    let bookings = gateway.bookings_in_range(instructor_id, start, end).await?;

    debug!(
        instructor = instructor_id,
        year,
        month,
        bookings = bookings.len(),
        "resolving month availability"
    );

    resolve_month(
        year,
        month,
        &instructor.preferences.working_days,
        &bookings,
        today,
        max_date,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::booking::BookingStatus;

    fn booking_on(date: NaiveDate, start: &str, duration_min: i64) -> ExistingBooking {
        ExistingBooking {
            lesson_date: date,
            start_time: format!("{start}:00").parse().unwrap(),
            duration_min,
            status: BookingStatus::Confirmed,
        }
    }

    #[test]
    fn month_bounds() {
        assert_eq!(
            month_end(2026, 2).unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()
        );
        assert_eq!(
            month_end(2026, 12).unwrap(),
            NaiveDate::from_ymd_opt(2026, 12, 31).unwrap()
        );
        assert!(matches!(
            month_start(2026, 13),
            Err(BookingError::InvalidDate(_))
        ));
    }

    #[test]
    fn cancelled_bookings_never_block() {
        let date = NaiveDate::from_ymd_opt(2026, 9, 14).unwrap(); // a Monday
        let mut b = booking_on(date, "10:00", 60);
        b.status = BookingStatus::Cancelled;

        let statuses = resolve_month(
            2026,
            9,
            &WorkingDayPolicy::default(),
            &[b],
            NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
        )
        .unwrap();
        assert_eq!(statuses[&date], DayStatus::Available);
    }

    #[test]
    fn grid_is_six_weeks_aligned_to_sunday() {
        let statuses = BTreeMap::new();
        let today = NaiveDate::from_ymd_opt(2026, 9, 10).unwrap();
        let cells = month_grid(2026, 9, &statuses, today, None).unwrap();
        assert_eq!(cells.len(), 42);
        // 1 Sep 2026 is a Tuesday, so the grid opens on Sunday 30 Aug.
        assert_eq!(cells[0].date, NaiveDate::from_ymd_opt(2026, 8, 30).unwrap());
        assert!(!cells[0].in_month);
        assert!(cells.iter().any(|c| c.is_today));
    }
}
