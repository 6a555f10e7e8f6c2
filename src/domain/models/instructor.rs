use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Weekdays an instructor accepts lessons on, as a bitmask indexed by
/// the conventional 0=Sunday..6=Saturday numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkingDayPolicy(u8);

impl WorkingDayPolicy {
    pub const NONE: WorkingDayPolicy = WorkingDayPolicy(0);

    pub fn from_days(days: &[u8]) -> Self {
        let mut mask = 0u8;
        for &d in days {
            if d < 7 {
                mask |= 1 << d;
            }
        }
        WorkingDayPolicy(mask)
    }

    pub fn accepts(&self, weekday: Weekday) -> bool {
        self.0 & (1 << weekday.num_days_from_sunday()) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn days(&self) -> Vec<u8> {
        (0..7).filter(|d| self.0 & (1 << d) != 0).collect()
    }
}

impl Default for WorkingDayPolicy {
    /// Monday to Friday.
    fn default() -> Self {
        WorkingDayPolicy::from_days(&[1, 2, 3, 4, 5])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl Default for WorkingHours {
    fn default() -> Self {
        WorkingHours {
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        }
    }
}

/// A coverage area with an optional travel surcharge, keyed by the
/// leading characters of the outward postcode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceArea {
    pub area_name: String,
    pub postcode_prefix: String,
    pub additional_charge_pence: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstructorPreferences {
    #[serde(default)]
    pub working_days: WorkingDayPolicy,
    #[serde(default)]
    pub working_hours: WorkingHours,
    /// Standard lesson price per hour, in pence.
    pub standard_lesson_price_pence: i64,
}

impl Default for InstructorPreferences {
    fn default() -> Self {
        InstructorPreferences {
            working_days: WorkingDayPolicy::default(),
            working_hours: WorkingHours::default(),
            standard_lesson_price_pence: 3500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instructor {
    pub id: String,
    pub name: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub areas: Vec<ServiceArea>,
    #[serde(default)]
    pub preferences: InstructorPreferences,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_is_weekdays() {
        let policy = WorkingDayPolicy::default();
        assert!(policy.accepts(Weekday::Mon));
        assert!(policy.accepts(Weekday::Fri));
        assert!(!policy.accepts(Weekday::Sat));
        assert!(!policy.accepts(Weekday::Sun));
        assert_eq!(policy.days(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn out_of_range_days_are_ignored() {
        let policy = WorkingDayPolicy::from_days(&[0, 6, 7, 200]);
        assert!(policy.accepts(Weekday::Sun));
        assert!(policy.accepts(Weekday::Sat));
        assert_eq!(policy.days(), vec![0, 6]);
    }

    #[test]
    fn empty_policy() {
        assert!(WorkingDayPolicy::from_days(&[]).is_empty());
        assert!(!WorkingDayPolicy::default().is_empty());
    }
}
