use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::metric::CalcType;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Granularity {
    Minute,
    Hour,
    Day,
}

impl Granularity {
    pub fn width(self) -> Duration {
        match self {
            Self::Minute => Duration::minutes(1),
            Self::Hour => Duration::hours(1),
            Self::Day => Duration::days(1),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AggregateExpr {
    SumValueTimesCounter,
    AvgValue,
    AvgValueTimesCounter,
}

impl AggregateExpr {
    // AVG ignores the counter at minute granularity but applies it at hour
    // and day granularity; SUM always applies it.
    pub fn for_calc(calc: CalcType, bucket: Granularity) -> Self {
        match (calc, bucket) {
            (CalcType::Sum, _) => Self::SumValueTimesCounter,
            (CalcType::Avg, Granularity::Minute) => Self::AvgValue,
            (CalcType::Avg, _) => Self::AvgValueTimesCounter,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeWindow {
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl TimeWindow {
    pub fn all() -> Self {
        Self {
            since: None,
            until: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AggregateQuery {
    pub metric_id: i64,
    pub expr: AggregateExpr,
    pub window: TimeWindow,
    pub bucket: Granularity,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AggregateRow {
    pub bucket_start: DateTime<Utc>,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bucket {
    pub key: String,
    pub value: Option<f64>,
}

// One row per calendar bucket holding at least one matching point, ascending
// by bucket start; empty buckets are never synthesized.
pub trait PointStore {
    fn query_aggregate(&self, query: &AggregateQuery) -> Result<Vec<AggregateRow>>;
}
