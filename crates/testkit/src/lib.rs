use chrono::{DateTime, TimeZone, Utc};
use trendline_core::model::metric::{CalcType, Metric};
use trendline_core::model::point::MetricPoint;

pub fn sample_metric(id: i64, calc_type: Option<CalcType>, places: u32) -> Metric {
    Metric {
        id,
        name: "response-time".to_string(),
        suffix: Some("ms".to_string()),
        calc_type,
        places,
    }
}

pub fn point(metric_id: i64, value: f64, counter: i32, created_at: DateTime<Utc>) -> MetricPoint {
    MetricPoint {
        metric_id,
        value,
        counter,
        created_at,
    }
}

pub fn at_minute(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 1, hour, minute, 0).unwrap()
}
