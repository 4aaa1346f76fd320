use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::money::serialize_cents;
use super::Sale;

/// Revenue summary for one calendar day (UTC). Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyReport {
    pub date: NaiveDate,
    #[serde(rename = "revenue", serialize_with = "serialize_cents")]
    pub revenue_cents: i128,
    pub items_sold: i128,
}

impl DailyReport {
    /// Sum `quantity * unit_price` and `quantity` over the given sales.
    /// Callers are expected to pass only sales from `date`. Sums are kept in
    /// `i128`: each term fits in 126 bits, so even `i64::MAX` rows cannot overflow.
    pub fn from_sales(date: NaiveDate, sales: &[Sale]) -> Self {
        let (revenue_cents, items_sold) = sales
            .iter()
            .fold((0_i128, 0_i128), |(revenue, items), sale| {
                (
                    revenue + sale.total_cents(),
                    items + i128::from(sale.quantity),
                )
            });

        Self {
            date,
            revenue_cents,
            items_sold,
        }
    }
}

/// Half-open `[start_of_day, start_of_next_day)` window for `date` in UTC.
pub fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN));
    (start, start + chrono::Duration::days(1))
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_report_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

// ── Query parameters ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct ReportParams {
    pub d: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sale(quantity: i64, unit_price_cents: i64) -> Sale {
        Sale {
            id: 0,
            product_id: 1,
            quantity,
            unit_price_cents,
            sold_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    fn may_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn sums_revenue_and_items() {
        let sales = vec![sale(3, 250), sale(1, 1999), sale(10, 5)];
        let report = DailyReport::from_sales(may_first(), &sales);

        assert_eq!(report.items_sold, 14);
        assert_eq!(report.revenue_cents, 750 + 1999 + 50);
    }

    #[test]
    fn sums_past_i64_range() {
        let big = i64::MAX / 250;
        let report = DailyReport::from_sales(may_first(), &[sale(big, 250), sale(big, 250)]);

        assert_eq!(report.items_sold, 2 * big as i128);
        assert_eq!(report.revenue_cents, 2 * big as i128 * 250);
        assert!(report.revenue_cents > i64::MAX as i128);

        let value = serde_json::to_value(&report).unwrap();
        assert!(value["revenue"].as_f64().unwrap() > 1e16);
    }

    #[test]
    fn empty_day_is_zero_not_error() {
        let report = DailyReport::from_sales(may_first(), &[]);
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({ "date": "2024-05-01", "revenue": 0.0, "items_sold": 0 })
        );
    }

    #[test]
    fn bounds_cover_exactly_one_day() {
        let (start, end) = day_bounds(may_first());
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap());
    }

    #[test]
    fn bounds_cross_month_and_leap_day() {
        let leap = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let (_, end) = day_bounds(leap);
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn parses_only_real_calendar_dates() {
        assert_eq!(parse_report_date("2024-05-01"), Some(may_first()));
        assert_eq!(parse_report_date("2024-02-30"), None);
        assert_eq!(parse_report_date("2023-02-29"), None);
        assert_eq!(parse_report_date("yesterday"), None);
        assert_eq!(parse_report_date(""), None);
    }
}
