use chrono::{DateTime, NaiveDateTime, Utc};
use duckdb::params_from_iter;
use trendline_core::error::{Result, TrendlineError};
use trendline_core::query::{AggregateExpr, AggregateQuery, AggregateRow, Granularity, PointStore};

use crate::Store;

impl PointStore for Store {
    fn query_aggregate(&self, query: &AggregateQuery) -> Result<Vec<AggregateRow>> {
        let conn = self.conn();

        let mut where_parts = vec!["metric_id = ?"];
        let mut args: Vec<duckdb::types::Value> =
            vec![duckdb::types::Value::BigInt(query.metric_id)];

        if let Some(since) = query.window.since {
            where_parts.push("created_at >= ?");
            args.push(duckdb::types::Value::Text(since.to_rfc3339()));
        }
        if let Some(until) = query.window.until {
            where_parts.push("created_at < ?");
            args.push(duckdb::types::Value::Text(until.to_rfc3339()));
        }

        let sql = format!(
            "SELECT date_trunc('{part}', created_at) AS bucket, {expr} AS value
             FROM metric_points
             WHERE {filter}
             GROUP BY bucket
             ORDER BY bucket",
            part = date_part(query.bucket),
            expr = expr_sql(query.expr),
            filter = where_parts.join(" AND "),
        );

        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| TrendlineError::Store(format!("prepare aggregate failed: {e}")))?;

        let rows = stmt
            .query_map(params_from_iter(args.iter()), |row| {
                Ok(AggregateRow {
                    bucket_start: naive_to_utc(row.get::<_, NaiveDateTime>(0)?),
                    value: row.get::<_, Option<f64>>(1)?,
                })
            })
            .map_err(|e| TrendlineError::Store(format!("query aggregate failed: {e}")))?;

        let mut out = Vec::new();
        for row in rows {
            out.push(
                row.map_err(|e| TrendlineError::Store(format!("map aggregate row failed: {e}")))?,
            );
        }

        tracing::debug!(
            metric_id = query.metric_id,
            bucket = ?query.bucket,
            rows = out.len(),
            "aggregate query"
        );

        Ok(out)
    }
}

fn expr_sql(expr: AggregateExpr) -> &'static str {
    match expr {
        AggregateExpr::SumValueTimesCounter => "sum(value * counter)",
        AggregateExpr::AvgValue => "avg(value)",
        AggregateExpr::AvgValueTimesCounter => "avg(value * counter)",
    }
}

fn date_part(bucket: Granularity) -> &'static str {
    match bucket {
        Granularity::Minute => "minute",
        Granularity::Hour => "hour",
        Granularity::Day => "day",
    }
}

fn naive_to_utc(ts: NaiveDateTime) -> DateTime<Utc> {
    ts.and_utc()
}
