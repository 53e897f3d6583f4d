use crate::error::invalid_input;
use anyhow::Result;
use cdrecon_core::SourceRole;
use chrono::{Local, NaiveDate};

pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid_input("date cannot be empty"));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| invalid_input("invalid date format: expected YYYY-MM-DD"))
}

pub fn parse_role(raw: &str) -> std::result::Result<SourceRole, String> {
    SourceRole::parse(raw).ok_or_else(|| format!("invalid role {raw:?}: expected a|b"))
}

pub fn format_optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::{format_optional, parse_date, parse_role};
    use cdrecon_core::SourceRole;
    use chrono::NaiveDate;

    #[test]
    fn parse_date_accepts_iso_dates() {
        let date = parse_date(" 2025-07-03 ").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 7, 3).unwrap());
    }

    #[test]
    fn parse_date_rejects_other_formats() {
        assert!(parse_date("03/07/2025").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn parse_role_accepts_both_sources() {
        assert_eq!(parse_role("A").unwrap(), SourceRole::A);
        assert_eq!(parse_role("b").unwrap(), SourceRole::B);
        assert!(parse_role("mtn").is_err());
    }

    #[test]
    fn format_optional_uses_dash_for_missing() {
        assert_eq!(format_optional(Some(45_045)), "45045");
        assert_eq!(format_optional::<i64>(None), "-");
    }
}
