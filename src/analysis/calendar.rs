//! Contribution calendar relabeling.

use crate::models::MonthlyCalendar;

/// Two-digit month key to display name.
const MONTH_NAMES: [(&str, &str); 12] = [
    ("01", "January"),
    ("02", "February"),
    ("03", "March"),
    ("04", "April"),
    ("05", "May"),
    ("06", "June"),
    ("07", "July"),
    ("08", "August"),
    ("09", "September"),
    ("10", "October"),
    ("11", "November"),
    ("12", "December"),
];

/// Replace two-digit month keys with full month names.
///
/// Builds a fresh map rather than renaming keys in place. Keys without a
/// table entry pass through unchanged, values are preserved, and the
/// original key order is kept.
pub fn relabel_months(calendar: &MonthlyCalendar) -> MonthlyCalendar {
    calendar
        .iter()
        .map(|(key, value)| {
            let label = MONTH_NAMES
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, name)| name.to_string())
                .unwrap_or_else(|| key.clone());
            (label, *value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relabel_known_and_unknown_keys() {
        let mut calendar = MonthlyCalendar::new();
        calendar.insert("01".to_string(), 3);
        calendar.insert("13".to_string(), 7);

        let relabeled = relabel_months(&calendar);

        assert_eq!(relabeled.get("January"), Some(&3));
        assert_eq!(relabeled.get("13"), Some(&7));
        assert_eq!(relabeled.len(), 2);
    }

    #[test]
    fn test_relabel_preserves_order() {
        let mut calendar = MonthlyCalendar::new();
        for month in 1..=12u32 {
            calendar.insert(format!("{month:02}"), u64::from(month));
        }

        let relabeled = relabel_months(&calendar);
        let labels: Vec<_> = relabeled.keys().cloned().collect();

        assert_eq!(labels.first().map(String::as_str), Some("January"));
        assert_eq!(labels.last().map(String::as_str), Some("December"));
        assert_eq!(relabeled.get("June"), Some(&6));
    }

    #[test]
    fn test_relabel_empty_calendar() {
        assert!(relabel_months(&MonthlyCalendar::new()).is_empty());
    }
}
