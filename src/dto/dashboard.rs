use serde::Serialize;

use crate::listing::TotalCount;

/// One tile on the dashboard.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DashboardStat {
    pub title: &'static str,
    pub link: &'static str,
    /// `None` when the count could not be loaded.
    pub value: Option<usize>,
    pub approximate: bool,
}

impl DashboardStat {
    pub fn new(title: &'static str, link: &'static str, total: Option<TotalCount>) -> Self {
        Self {
            title,
            link,
            value: total.map(TotalCount::value),
            approximate: total.is_some_and(TotalCount::is_approximate),
        }
    }
}

/// Data required to render the dashboard.
#[derive(Debug, Serialize)]
pub struct DashboardData {
    pub stats: Vec<DashboardStat>,
}
