//! Analytics and compliance reporting service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::catalogue_service::{map_campaign_error, map_vendor_error};
use crate::domain::item_service::map_item_error;
use crate::domain::ports::{
    CampaignRepository, ComplianceReportQuery, DashboardQuery, ItemRepository, VendorRepository,
};
use crate::domain::{
    ComplianceReport, Dashboard, Error, ItemDimension, ReportPeriod, monthly_trend,
    trend_window_start,
};

/// Service implementing the reporting driving ports.
#[derive(Clone)]
pub struct ReportingService<I, V, C> {
    items: Arc<I>,
    vendors: Arc<V>,
    campaigns: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<I, V, C> ReportingService<I, V, C> {
    /// Create a reporting service over the item, vendor and campaign stores.
    pub fn new(items: Arc<I>, vendors: Arc<V>, campaigns: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            items,
            vendors,
            campaigns,
            clock,
        }
    }
}

#[async_trait]
impl<I, V, C> DashboardQuery for ReportingService<I, V, C>
where
    I: ItemRepository,
    V: VendorRepository,
    C: CampaignRepository,
{
    async fn dashboard(&self) -> Result<Dashboard, Error> {
        let since = trend_window_start(self.clock.utc());
        let items = self.items.as_ref();
        let (
            items_by_status,
            items_by_category,
            items_by_classification,
            total_weight_kg,
            created,
            active_campaigns,
            registered_vendors,
        ) = tokio::try_join!(
            async { items.count_by(ItemDimension::Status).await.map_err(map_item_error) },
            async { items.count_by(ItemDimension::Category).await.map_err(map_item_error) },
            async {
                items
                    .count_by(ItemDimension::Classification)
                    .await
                    .map_err(map_item_error)
            },
            async { items.total_weight().await.map_err(map_item_error) },
            async { items.created_since(since).await.map_err(map_item_error) },
            async { self.campaigns.count_active().await.map_err(map_campaign_error) },
            async { self.vendors.count_active().await.map_err(map_vendor_error) },
        )?;

        Ok(Dashboard {
            total_items: items_by_status.values().sum(),
            total_weight_kg,
            items_by_status,
            items_by_category,
            items_by_classification,
            monthly_trends: monthly_trend(created),
            active_campaigns,
            registered_vendors,
        })
    }
}

#[async_trait]
impl<I, V, C> ComplianceReportQuery for ReportingService<I, V, C>
where
    I: ItemRepository,
    V: VendorRepository,
    C: CampaignRepository,
{
    async fn compliance_report(&self, period: ReportPeriod) -> Result<ComplianceReport, Error> {
        let items = self
            .items
            .created_between(period.from_instant(), period.until_instant())
            .await
            .map_err(map_item_error)?;
        debug!(
            start = ?period.start(),
            end = ?period.end(),
            item_count = items.len(),
            "compliance report assembled"
        );
        Ok(ComplianceReport::summarise(period, self.clock.utc(), &items))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::{Duration, NaiveDate, TimeZone, Utc};
    use mockall::predicate::eq;
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::{
        ItemRepositoryError, MockCampaignRepository, MockItemRepository, MockVendorRepository,
    };
    use crate::domain::{ErrorCode, MonthlyCount};
    use crate::test_support::{FixtureClock, fixture_timestamp};

    fn counts(pairs: &[(&str, u64)]) -> BTreeMap<String, u64> {
        pairs.iter().map(|(k, v)| ((*k).to_owned(), *v)).collect()
    }

    fn service(
        items: MockItemRepository,
        vendors: MockVendorRepository,
        campaigns: MockCampaignRepository,
    ) -> ReportingService<MockItemRepository, MockVendorRepository, MockCampaignRepository> {
        ReportingService::new(
            Arc::new(items),
            Arc::new(vendors),
            Arc::new(campaigns),
            Arc::new(FixtureClock::default()),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn dashboard_combines_repository_figures() {
        let mut items = MockItemRepository::new();
        items
            .expect_count_by()
            .with(eq(ItemDimension::Status))
            .return_once(|_| Ok(counts(&[("registered", 3), ("recycled", 1)])));
        items
            .expect_count_by()
            .with(eq(ItemDimension::Category))
            .return_once(|_| Ok(counts(&[("laptop", 4)])));
        items
            .expect_count_by()
            .with(eq(ItemDimension::Classification))
            .return_once(|_| Ok(counts(&[("reusable", 4)])));
        items.expect_total_weight().return_once(|| Ok(8.5));
        items
            .expect_created_since()
            .with(eq(fixture_timestamp() - Duration::days(180)))
            .return_once(|_| {
                Ok(vec![
                    Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).single().expect("ts"),
                    Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).single().expect("ts"),
                ])
            });
        let mut vendors = MockVendorRepository::new();
        vendors.expect_count_active().return_once(|| Ok(2));
        let mut campaigns = MockCampaignRepository::new();
        campaigns.expect_count_active().return_once(|| Ok(1));

        let dashboard = service(items, vendors, campaigns)
            .dashboard()
            .await
            .expect("dashboard");

        assert_eq!(dashboard.total_items, 4);
        assert_eq!(dashboard.registered_vendors, 2);
        assert_eq!(dashboard.active_campaigns, 1);
        assert_eq!(
            dashboard.monthly_trends,
            vec![
                MonthlyCount {
                    month: "2025-04".into(),
                    count: 1
                },
                MonthlyCount {
                    month: "2025-06".into(),
                    count: 1
                },
            ]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn dashboard_surfaces_item_store_outage() {
        let mut items = MockItemRepository::new();
        items
            .expect_count_by()
            .returning(|_| Err(ItemRepositoryError::connection("refused")));
        items.expect_total_weight().returning(|| Ok(0.0));
        items.expect_created_since().returning(|_| Ok(Vec::new()));
        let mut vendors = MockVendorRepository::new();
        vendors.expect_count_active().returning(|| Ok(0));
        let mut campaigns = MockCampaignRepository::new();
        campaigns.expect_count_active().returning(|| Ok(0));

        let error = service(items, vendors, campaigns)
            .dashboard()
            .await
            .expect_err("outage");

        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }

    #[rstest]
    #[tokio::test]
    async fn compliance_report_queries_whole_days() {
        let start = NaiveDate::from_ymd_opt(2025, 5, 1);
        let end = NaiveDate::from_ymd_opt(2025, 5, 31);
        let period = ReportPeriod::new(start, end).expect("period");
        let mut items = MockItemRepository::new();
        items
            .expect_created_between()
            .with(
                eq(Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).single()),
                eq(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).single()),
            )
            .return_once(|_, _| Ok(Vec::new()));

        let report = service(
            items,
            MockVendorRepository::new(),
            MockCampaignRepository::new(),
        )
        .compliance_report(period)
        .await
        .expect("report");

        assert_eq!(report.total_items, 0);
        assert!(report.entries.is_empty());
        assert_eq!(report.generated_at, fixture_timestamp());
    }
}
