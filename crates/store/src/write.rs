use duckdb::params;
use trendline_core::error::{Result, TrendlineError};
use trendline_core::model::metric::{CalcType, Metric};
use trendline_core::model::point::MetricPoint;

use crate::Store;

impl Store {
    pub fn insert_metrics(&self, metrics: &[Metric]) -> Result<()> {
        if metrics.is_empty() {
            return Ok(());
        }

        let mut conn = self.conn();
        let tx = conn
            .transaction()
            .map_err(|e| TrendlineError::Store(format!("begin tx failed: {e}")))?;

        {
            let mut stmt = tx
                .prepare(
                    "INSERT OR REPLACE INTO metrics (id, name, suffix, calc_type, places)
                     VALUES (?, ?, ?, ?, ?)",
                )
                .map_err(|e| TrendlineError::Store(format!("prepare insert metrics failed: {e}")))?;

            for metric in metrics {
                stmt.execute(params![
                    metric.id,
                    metric.name,
                    metric.suffix,
                    metric.calc_type.map(CalcType::as_stored),
                    i64::from(metric.places),
                ])
                .map_err(|e| TrendlineError::Store(format!("insert metric failed: {e}")))?;
            }
        }

        tx.commit()
            .map_err(|e| TrendlineError::Store(format!("commit metrics failed: {e}")))
    }

    pub fn insert_points(&self, points: &[MetricPoint]) -> Result<()> {
        if points.is_empty() {
            return Ok(());
        }

        let mut conn = self.conn();
        let tx = conn
            .transaction()
            .map_err(|e| TrendlineError::Store(format!("begin tx failed: {e}")))?;

        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO metric_points (id, metric_id, value, counter, created_at)
                     VALUES (nextval('metric_points_id_seq'), ?, ?, ?, ?)",
                )
                .map_err(|e| TrendlineError::Store(format!("prepare insert points failed: {e}")))?;

            for point in points {
                stmt.execute(params![
                    point.metric_id,
                    point.value,
                    point.counter,
                    point.created_at.to_rfc3339(),
                ])
                .map_err(|e| TrendlineError::Store(format!("insert point failed: {e}")))?;
            }
        }

        tx.commit()
            .map_err(|e| TrendlineError::Store(format!("commit points failed: {e}")))
    }
}
