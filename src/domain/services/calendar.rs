use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Datelike, Months, NaiveDate};
use tracing::debug;

use crate::domain::services::availability::{self, DayCell, DayStatus};
use crate::error::BookingError;

/// Single registered observer for date selection. Replaces the bare callback
/// field of older designs: one handler, explicit unsubscribe.
pub trait DateSelectionListener: Send + Sync {
    fn on_date_selected(&self, date: NaiveDate);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarOptions {
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
}

/// Month-view calendar state: the visible month, navigation bounds and the
/// single selected date. One instance per booking screen; no globals.
pub struct Calendar {
    today: NaiveDate,
    min_date: NaiveDate,
    max_date: NaiveDate,
    visible: (i32, u32),
    selected: Option<NaiveDate>,
    statuses: BTreeMap<NaiveDate, DayStatus>,
    listener: Option<Arc<dyn DateSelectionListener>>,
}

impl Calendar {
    /// Bounds default to [today, today + 3 months].
    pub fn new(today: NaiveDate, options: CalendarOptions) -> Self {
        let min_date = options.min_date.unwrap_or(today);
        let max_date = options
            .max_date
            .unwrap_or_else(|| today + Months::new(3));
        Calendar {
            today,
            min_date,
            max_date,
            visible: (today.year(), today.month()),
            selected: None,
            statuses: BTreeMap::new(),
            listener: None,
        }
    }

    pub fn set_listener(&mut self, listener: Arc<dyn DateSelectionListener>) {
        self.listener = Some(listener);
    }

    pub fn clear_listener(&mut self) {
        self.listener = None;
    }

    pub fn visible_month(&self) -> (i32, u32) {
        self.visible
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn max_date(&self) -> NaiveDate {
        self.max_date
    }

    /// Install resolver output for the visible month.
    pub fn set_statuses(&mut self, statuses: BTreeMap<NaiveDate, DayStatus>) {
        self.statuses = statuses;
    }

    pub fn status_of(&self, date: NaiveDate) -> Option<DayStatus> {
        self.statuses.get(&date).copied()
    }

    fn floor_month(&self) -> (i32, u32) {
        (self.min_date.year(), self.min_date.month())
    }

    fn ceiling_month(&self) -> (i32, u32) {
        (self.max_date.year(), self.max_date.month())
    }

    fn in_bounds(&self, target: (i32, u32)) -> bool {
        target >= self.floor_month() && target <= self.ceiling_month()
    }

    /// Returns false (and stays put) when the target month is outside the
    /// navigation bounds. Never an error.
    pub fn go_to_month(&mut self, year: i32, month: u32) -> bool {
        if month < 1 || month > 12 || !self.in_bounds((year, month)) {
            return false;
        }
        self.visible = (year, month);
        true
    }

    pub fn previous_month(&mut self) -> bool {
        let (year, month) = self.visible;
        let target = if month == 1 { (year - 1, 12) } else { (year, month - 1) };
        self.go_to_month(target.0, target.1)
    }

    pub fn next_month(&mut self) -> bool {
        let (year, month) = self.visible;
        let target = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
        self.go_to_month(target.0, target.1)
    }

    pub fn go_to_today(&mut self) -> bool {
        self.go_to_month(self.today.year(), self.today.month())
    }

    /// Record a selection. Only dates the resolver marked available are
    /// selectable; anything else is a silent no-op. A successful selection
    /// replaces the previous one and notifies the listener exactly once.
    pub fn select_date(&mut self, date: NaiveDate) -> bool {
        match self.status_of(date) {
            Some(DayStatus::Available) => {}
            _ => {
                debug!(%date, "ignoring selection of non-available date");
                return false;
            }
        }

        self.selected = Some(date);
        if let Some(listener) = &self.listener {
            listener.on_date_selected(date);
        }
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// The 6x7 cell grid for the visible month.
    pub fn grid(&self) -> Result<Vec<DayCell>, BookingError> {
        let (year, month) = self.visible;
        availability::month_grid(year, month, &self.statuses, self.today, self.selected)
    }
}
