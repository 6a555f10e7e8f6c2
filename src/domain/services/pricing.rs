use crate::domain::models::booking::LessonType;
use crate::domain::models::instructor::ServiceArea;
use crate::domain::services::postcode;

/// Hourly rates in pence.
pub fn lesson_rate_pence(lesson_type: LessonType) -> i64 {
    match lesson_type {
        LessonType::Standard => 3500,
        LessonType::Intensive => 4000,
        LessonType::TestPrep => 4000,
        LessonType::PassPlus => 4500,
    }
}

/// Rate scaled by duration. Pence arithmetic keeps repeated recomputation
/// exact for the supported durations.
pub fn base_price_pence(lesson_type: LessonType, duration_min: i64) -> i64 {
    lesson_rate_pence(lesson_type) * duration_min / 60
}

/// Travel surcharge for a pickup postcode. Among the areas whose outward
/// prefix starts the normalized postcode, the longest prefix wins;
/// declaration order breaks ties. At most one charge applies.
pub fn area_charge_pence(pickup_postcode: &str, areas: &[ServiceArea]) -> i64 {
    let normalized = postcode::normalize(pickup_postcode);
    if normalized.is_empty() {
        return 0;
    }

    let mut best: Option<&ServiceArea> = None;
    for area in areas {
        let prefix = postcode::normalize(&area.postcode_prefix);
        if prefix.len() < 2 || !normalized.starts_with(&prefix) {
            continue;
        }
        let better = match best {
            Some(current) => prefix.len() > postcode::normalize(&current.postcode_prefix).len(),
            None => true,
        };
        if better {
            best = Some(area);
        }
    }
    best.map(|a| a.additional_charge_pence.max(0)).unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBreakdown {
    pub base_pence: i64,
    pub area_charge_pence: i64,
    pub total_pence: i64,
}

pub fn price_breakdown(
    lesson_type: LessonType,
    duration_min: i64,
    area_charge_pence: i64,
) -> PriceBreakdown {
    let base = base_price_pence(lesson_type, duration_min);
    PriceBreakdown {
        base_pence: base,
        area_charge_pence,
        total_pence: base + area_charge_pence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(name: &str, prefix: &str, charge: i64) -> ServiceArea {
        ServiceArea {
            area_name: name.to_string(),
            postcode_prefix: prefix.to_string(),
            additional_charge_pence: charge,
        }
    }

    #[test]
    fn rates_scale_with_duration() {
        assert_eq!(base_price_pence(LessonType::Standard, 60), 3500);
        assert_eq!(base_price_pence(LessonType::Intensive, 90), 6000);
        assert_eq!(base_price_pence(LessonType::PassPlus, 120), 9000);
    }

    #[test]
    fn longest_prefix_wins_single_charge() {
        let areas = vec![
            area("Sheffield", "S1", 200),
            area("Sheffield Central", "S1 4", 500),
            area("Rotherham", "S6", 300),
        ];
        assert_eq!(area_charge_pence("S1 4GH", &areas), 500);
        assert_eq!(area_charge_pence("S1 2AB", &areas), 200);
        assert_eq!(area_charge_pence("S6 1AA", &areas), 300);
        assert_eq!(area_charge_pence("M1 1AE", &areas), 0);
    }

    #[test]
    fn ties_go_to_declaration_order() {
        let areas = vec![area("First", "S1", 100), area("Second", "S1", 900)];
        assert_eq!(area_charge_pence("S1 1AA", &areas), 100);
    }

    #[test]
    fn breakdown_totals() {
        let p = price_breakdown(LessonType::Standard, 60, 250);
        assert_eq!(p.base_pence, 3500);
        assert_eq!(p.total_pence, 3750);
    }
}
