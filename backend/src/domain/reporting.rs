//! Dashboard analytics and compliance summaries.
//!
//! Both views are pure folds over item data; the repositories supply the
//! counts and item slices and these types shape them for presentation.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::item::{EWasteItem, ItemDimension};

/// Days of history covered by the monthly trend.
pub const TREND_WINDOW_DAYS: i64 = 180;
/// Most item lines listed in a compliance report.
pub const COMPLIANCE_ENTRY_LIMIT: usize = 20;

/// Item count for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCount {
    /// Month as `YYYY-MM`.
    #[schema(example = "2025-03")]
    pub month: String,
    /// Items created in that month.
    pub count: u64,
}

/// Start of the trend window relative to `now`.
pub fn trend_window_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(TREND_WINDOW_DAYS)
}

/// Bucket creation timestamps by `YYYY-MM`, oldest month first.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use ewaste_backend::domain::monthly_trend;
///
/// let stamps = [
///     Utc.with_ymd_and_hms(2025, 3, 2, 9, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2025, 1, 9, 9, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2025, 3, 28, 9, 0, 0).unwrap(),
/// ];
/// let trend = monthly_trend(stamps);
/// assert_eq!(trend[0].month, "2025-01");
/// assert_eq!(trend[1].count, 2);
/// ```
pub fn monthly_trend(created: impl IntoIterator<Item = DateTime<Utc>>) -> Vec<MonthlyCount> {
    let mut buckets: BTreeMap<String, u64> = BTreeMap::new();
    for stamp in created {
        *buckets.entry(stamp.format("%Y-%m").to_string()).or_default() += 1;
    }
    buckets
        .into_iter()
        .map(|(month, count)| MonthlyCount { month, count })
        .collect()
}

/// Count `items` grouped along `dimension`.
pub fn tally<'a>(
    items: impl IntoIterator<Item = &'a EWasteItem>,
    dimension: ItemDimension,
) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for item in items {
        *counts.entry(dimension.key_of(item)).or_default() += 1;
    }
    counts
}

/// Organisation-wide snapshot for the analytics dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// Items on record.
    pub total_items: u64,
    /// Combined weight in kilograms.
    pub total_weight_kg: f64,
    /// Counts keyed by status label.
    pub items_by_status: BTreeMap<String, u64>,
    /// Counts keyed by normalised category.
    pub items_by_category: BTreeMap<String, u64>,
    /// Counts keyed by classification label.
    pub items_by_classification: BTreeMap<String, u64>,
    /// Items created per month over the trend window.
    pub monthly_trends: Vec<MonthlyCount>,
    /// Campaigns currently listed.
    pub active_campaigns: u64,
    /// Vendors accepting pickups.
    pub registered_vendors: u64,
}

/// Rejected report period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("report end date {end} precedes start date {start}")]
pub struct ReportPeriodError {
    start: NaiveDate,
    end: NaiveDate,
}

/// Inclusive calendar-day range; either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportPeriod {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl ReportPeriod {
    /// Build a period, rejecting an end before the start.
    pub fn new(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Self, ReportPeriodError> {
        if let (Some(start), Some(end)) = (start, end)
            && end < start
        {
            return Err(ReportPeriodError { start, end });
        }
        Ok(Self { start, end })
    }

    /// First included day.
    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    /// Last included day.
    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    /// Lower bound, midnight UTC of the first day.
    pub fn from_instant(&self) -> Option<DateTime<Utc>> {
        self.start
            .map(|day| day.and_time(NaiveTime::MIN).and_utc())
    }

    /// Exclusive upper bound, midnight UTC after the last day.
    pub fn until_instant(&self) -> Option<DateTime<Utc>> {
        self.end
            .and_then(|day| day.succ_opt())
            .map(|day| day.and_time(NaiveTime::MIN).and_utc())
    }
}

/// Regulatory summary of items created in a period.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    /// Covered period.
    pub period: ReportPeriod,
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,
    /// Items in the period.
    pub total_items: u64,
    /// Combined weight in kilograms.
    pub total_weight_kg: f64,
    /// Counts keyed by status label.
    pub items_by_status: BTreeMap<String, u64>,
    /// Counts keyed by classification label.
    pub items_by_classification: BTreeMap<String, u64>,
    /// Leading item lines formatted `"{qr} - {name} - {status}"`.
    pub entries: Vec<String>,
}

impl ComplianceReport {
    /// Summarise `items`, which the caller has already restricted to `period`.
    pub fn summarise(
        period: ReportPeriod,
        generated_at: DateTime<Utc>,
        items: &[EWasteItem],
    ) -> Self {
        let entries = items
            .iter()
            .take(COMPLIANCE_ENTRY_LIMIT)
            .map(|item| format!("{} - {} - {}", item.qr_code(), item.name(), item.status()))
            .collect();
        Self {
            period,
            generated_at,
            total_items: items.len() as u64,
            total_weight_kg: items.iter().map(EWasteItem::weight_kg).sum(),
            items_by_status: tally(items, ItemDimension::Status),
            items_by_classification: tally(items, ItemDimension::Classification),
            entries,
        }
    }
}
