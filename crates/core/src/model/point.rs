use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricPoint {
    pub metric_id: i64,
    pub value: f64,
    pub counter: i32,
    pub created_at: DateTime<Utc>,
}
