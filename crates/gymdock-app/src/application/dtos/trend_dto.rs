use gymdock_domain::trend::{DateBucket, Granularity};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendDto {
    pub start_date: String,
    pub end_date: String,
    pub granularity: Granularity,
    pub buckets: Vec<DateBucket>,
    pub total: u64,
}
