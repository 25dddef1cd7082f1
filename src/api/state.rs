use std::sync::Arc;

use crate::cache::TtlCache;
use crate::config::AppConfig;
use crate::fetch::SeasonDataSource;
use crate::limit::RateLimiter;
use crate::models::StatsReport;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub source: Arc<dyn SeasonDataSource>,
    pub report_cache: Arc<TtlCache<u64, StatsReport>>,
    pub limiter: Arc<RateLimiter>,
}
