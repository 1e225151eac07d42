//! Driving port for the analytics dashboard.

use async_trait::async_trait;

use crate::domain::{Dashboard, Error};

/// Domain use-case port for dashboard figures.
#[async_trait]
pub trait DashboardQuery: Send + Sync {
    /// Current organisation-wide snapshot.
    async fn dashboard(&self) -> Result<Dashboard, Error>;
}
