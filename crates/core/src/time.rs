use chrono::{DateTime, Duration, Utc};

use crate::query::Granularity;

pub fn truncate(ts: DateTime<Utc>, bucket: Granularity) -> DateTime<Utc> {
    let step = bucket.width().num_seconds();
    let rem = ts.timestamp().rem_euclid(step);
    ts - Duration::seconds(rem) - Duration::nanoseconds(i64::from(ts.timestamp_subsec_nanos()))
}

pub fn minute_key(bucket_start: DateTime<Utc>) -> String {
    bucket_start.format("%H:%M").to_string()
}
