use chrono::{Datelike, Local};

use super::tables::HISTORY;

/// IT history event for the given date, or a plain "ordinary day" line.
pub fn on_this_day(month: u32, day: u32) -> String {
    HISTORY
        .iter()
        .find(|(date, _)| *date == (month, day))
        .map(|(_, event)| (*event).to_owned())
        .unwrap_or_else(|| format!("{day}.{month} - IT tarixida oddiy kun"))
}

pub fn today_in_history() -> String {
    let today = Local::now();
    on_this_day(today.month(), today.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_microsoft_founding() {
        assert_eq!(on_this_day(4, 4), "1975 - Microsoft kompaniyasi tashkil etildi");
    }

    #[test]
    fn test_fallback() {
        assert_eq!(on_this_day(1, 1), "1.1 - IT tarixida oddiy kun");
        assert_eq!(on_this_day(7, 31), "31.7 - IT tarixida oddiy kun");
        // day and month are not interchangeable
        assert_eq!(on_this_day(4, 9), "9.4 - IT tarixida oddiy kun");
    }

    #[test]
    fn test_only_documented_dates_match() {
        let mut matched = 0;
        for month in 1..=12 {
            for day in 1..=31 {
                let event = on_this_day(month, day);
                assert_eq!(event, on_this_day(month, day));
                if event != format!("{day}.{month} - IT tarixida oddiy kun") {
                    matched += 1;
                }
            }
        }
        assert_eq!(matched, HISTORY.len());
    }

    #[test]
    fn test_today_is_table_or_fallback() {
        let today = today_in_history();
        assert!(
            HISTORY.iter().any(|(_, e)| *e == today) || today.ends_with(" - IT tarixida oddiy kun")
        );
    }
}
