//! Locale-dependent labels for chart buckets
//!
//! The aggregator never formats dates itself; it asks a [`DateFormatter`] so
//! callers can pick the display language.

use crate::error::ParseLocaleError;
use crate::Period;
use chrono::{Datelike, NaiveDate};

pub trait DateFormatter: Send + Sync {
    /// Abbreviated weekday, e.g. `Mon`
    fn weekday(&self, date: NaiveDate) -> String;

    /// Two-digit day with abbreviated month, e.g. `05 Jan`
    fn short_date(&self, date: NaiveDate) -> String;

    /// Full month name with four-digit year, e.g. `January 2024`
    fn month_year(&self, date: NaiveDate) -> String;

    /// Label for the 1-based week chunk `ordinal`
    fn week_label(&self, ordinal: usize) -> String;

    fn year_label(&self, year: i32) -> String;

    fn period_name(&self, period: Period) -> &'static str;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishFormatter;

impl DateFormatter for EnglishFormatter {
    fn weekday(&self, date: NaiveDate) -> String {
        date.format("%a").to_string()
    }

    fn short_date(&self, date: NaiveDate) -> String {
        date.format("%d %b").to_string()
    }

    fn month_year(&self, date: NaiveDate) -> String {
        date.format("%B %Y").to_string()
    }

    fn week_label(&self, ordinal: usize) -> String {
        format!("{}-week", ordinal)
    }

    fn year_label(&self, year: i32) -> String {
        format!("{}-year", year)
    }

    fn period_name(&self, period: Period) -> &'static str {
        match period {
            Period::Daily => "Daily",
            Period::Weekly => "Weekly",
            Period::Monthly => "Monthly",
            Period::Yearly => "Yearly",
        }
    }
}

const UZ_WEEKDAYS: &[&str] = &["Dush", "Sesh", "Chor", "Pay", "Jum", "Shan", "Yak"];

const UZ_MONTHS_SHORT: &[&str] = &[
    "yan", "fev", "mar", "apr", "may", "iyn", "iyl", "avg", "sen", "okt", "noy", "dek",
];

const UZ_MONTHS: &[&str] = &[
    "yanvar", "fevral", "mart", "aprel", "may", "iyun", "iyul", "avgust", "sentabr", "oktabr",
    "noyabr", "dekabr",
];

/// Uzbek (Latin script) labels
#[derive(Debug, Clone, Copy, Default)]
pub struct UzbekFormatter;

impl DateFormatter for UzbekFormatter {
    fn weekday(&self, date: NaiveDate) -> String {
        UZ_WEEKDAYS[date.weekday().num_days_from_monday() as usize].to_string()
    }

    fn short_date(&self, date: NaiveDate) -> String {
        format!("{:02}-{}", date.day(), UZ_MONTHS_SHORT[date.month0() as usize])
    }

    fn month_year(&self, date: NaiveDate) -> String {
        format!("{} {:04}", UZ_MONTHS[date.month0() as usize], date.year())
    }

    fn week_label(&self, ordinal: usize) -> String {
        format!("{}-hafta", ordinal)
    }

    fn year_label(&self, year: i32) -> String {
        format!("{}-yil", year)
    }

    fn period_name(&self, period: Period) -> &'static str {
        match period {
            Period::Daily => "Kunlik",
            Period::Weekly => "Haftalik",
            Period::Monthly => "Oylik",
            Period::Yearly => "Yillik",
        }
    }
}

static ENGLISH: EnglishFormatter = EnglishFormatter;
static UZBEK: UzbekFormatter = UzbekFormatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Uz,
}

impl Locale {
    pub fn formatter(&self) -> &'static dyn DateFormatter {
        match self {
            Locale::En => &ENGLISH,
            Locale::Uz => &UZBEK,
        }
    }
}

impl std::str::FromStr for Locale {
    type Err = ParseLocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept BCP 47 tags like en-US / uz_UZ by their language subtag
        let lang = s
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_lowercase();
        match lang.as_str() {
            "en" => Ok(Locale::En),
            "uz" => Ok(Locale::Uz),
            _ => Err(ParseLocaleError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_english_labels() {
        let fmt = EnglishFormatter;
        let d = date(2024, 1, 5);
        assert_eq!(fmt.weekday(d), "Fri");
        assert_eq!(fmt.short_date(d), "05 Jan");
        assert_eq!(fmt.month_year(d), "January 2024");
        assert_eq!(fmt.week_label(3), "3-week");
        assert_eq!(fmt.year_label(2024), "2024-year");
        assert_eq!(fmt.period_name(Period::Weekly), "Weekly");
    }

    #[test]
    fn test_uzbek_labels() {
        let fmt = UzbekFormatter;
        let d = date(2024, 1, 1);
        assert_eq!(fmt.weekday(d), "Dush");
        assert_eq!(fmt.short_date(d), "01-yan");
        assert_eq!(fmt.month_year(date(2023, 9, 30)), "sentabr 2023");
        assert_eq!(fmt.week_label(1), "1-hafta");
        assert_eq!(fmt.year_label(2025), "2025-yil");
        assert_eq!(fmt.period_name(Period::Yearly), "Yillik");
    }

    #[test]
    fn test_uzbek_weekday_sunday() {
        assert_eq!(UzbekFormatter.weekday(date(2024, 1, 7)), "Yak");
    }

    #[test]
    fn test_locale_from_str() {
        assert_eq!("en".parse::<Locale>(), Ok(Locale::En));
        assert_eq!("en-US".parse::<Locale>(), Ok(Locale::En));
        assert_eq!("uz-UZ".parse::<Locale>(), Ok(Locale::Uz));
        assert_eq!("UZ_uz".parse::<Locale>(), Ok(Locale::Uz));
        assert!("fr".parse::<Locale>().is_err());
        assert!("".parse::<Locale>().is_err());
    }

    #[test]
    fn test_locale_formatter_dispatch() {
        assert_eq!(Locale::Uz.formatter().week_label(2), "2-hafta");
        assert_eq!(Locale::En.formatter().week_label(2), "2-week");
    }
}
