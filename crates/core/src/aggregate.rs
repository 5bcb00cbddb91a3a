use chrono::{DateTime, Duration, Utc};

use crate::error::{Result, TrendlineError};
use crate::model::metric::Metric;
use crate::query::{AggregateExpr, AggregateQuery, Bucket, Granularity, PointStore, TimeWindow};
use crate::time::{minute_key, truncate};

pub struct Aggregator<'a, S> {
    store: &'a S,
    rolling_week: Duration,
}

impl<'a, S: PointStore> Aggregator<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            rolling_week: Duration::days(7),
        }
    }

    pub fn with_rolling_week(store: &'a S, window: std::time::Duration) -> Result<Self> {
        let rolling_week = Duration::from_std(window).map_err(|e| {
            TrendlineError::InvalidArgument(format!("rolling week window out of range: {e}"))
        })?;
        Ok(Self {
            store,
            rolling_week,
        })
    }

    pub fn points_last_minutes(
        &self,
        metric: &Metric,
        minutes: u32,
        now: DateTime<Utc>,
    ) -> Result<Vec<Bucket>> {
        validate_metric(metric)?;
        if minutes == 0 {
            return Err(TrendlineError::InvalidArgument(
                "window length must be at least one minute".to_string(),
            ));
        }

        let query = AggregateQuery {
            metric_id: metric.id,
            expr: AggregateExpr::for_calc(metric.calc(), Granularity::Minute),
            window: TimeWindow {
                since: Some(now - Duration::minutes(i64::from(minutes))),
                until: None,
            },
            bucket: Granularity::Minute,
        };

        let rows = self.store.query_aggregate(&query)?;
        Ok(rows
            .into_iter()
            .map(|row| Bucket {
                key: minute_key(row.bucket_start),
                // A zero aggregate renders as a gap in the chart, not as 0.
                value: row
                    .value
                    .filter(|v| *v != 0.0)
                    .map(|v| round_places(v, metric.places)),
            })
            .collect())
    }

    pub fn point_at_hour(
        &self,
        metric: &Metric,
        hours_ago: u32,
        now: DateTime<Utc>,
    ) -> Result<Option<f64>> {
        validate_metric(metric)?;

        let hour_start = truncate(now, Granularity::Hour) - Duration::hours(i64::from(hours_ago));
        let window = TimeWindow {
            since: Some(hour_start),
            until: Some(hour_start + Granularity::Hour.width()),
        };
        self.bucket_value(metric, window, Granularity::Hour)
    }

    pub fn point_for_day_in_week(
        &self,
        metric: &Metric,
        days_ago: u32,
        now: DateTime<Utc>,
    ) -> Result<Option<f64>> {
        validate_metric(metric)?;

        let day_start = truncate(now - Duration::days(i64::from(days_ago)), Granularity::Day);
        let until = day_start + Granularity::Day.width();
        // Points older than the rolling week never contribute, even when the
        // day bucket matches.
        let since = day_start.max(now - self.rolling_week);
        if since >= until {
            return Ok(None);
        }

        let window = TimeWindow {
            since: Some(since),
            until: Some(until),
        };
        self.bucket_value(metric, window, Granularity::Day)
    }

    fn bucket_value(
        &self,
        metric: &Metric,
        window: TimeWindow,
        bucket: Granularity,
    ) -> Result<Option<f64>> {
        let query = AggregateQuery {
            metric_id: metric.id,
            expr: AggregateExpr::for_calc(metric.calc(), bucket),
            window,
            bucket,
        };

        let rows = self.store.query_aggregate(&query)?;
        Ok(rows
            .first()
            .and_then(|row| row.value)
            .map(|v| round_places(v, metric.places)))
    }
}

fn validate_metric(metric: &Metric) -> Result<()> {
    if metric.id < 1 {
        return Err(TrendlineError::InvalidArgument(format!(
            "metric id must be positive, got {}",
            metric.id
        )));
    }
    Ok(())
}

fn round_places(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
