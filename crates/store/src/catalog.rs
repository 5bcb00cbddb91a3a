use duckdb::params;
use trendline_core::error::{Result, TrendlineError};
use trendline_core::model::metric::{CalcType, Metric};

use crate::Store;

impl Store {
    pub fn get_metric(&self, id: i64) -> Result<Option<Metric>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare("SELECT id, name, suffix, calc_type, places FROM metrics WHERE id = ?")
            .map_err(|e| TrendlineError::Store(format!("prepare metric lookup failed: {e}")))?;

        let mut rows = stmt
            .query_map(params![id], metric_from_row)
            .map_err(|e| TrendlineError::Store(format!("query metric failed: {e}")))?;

        match rows.next() {
            Some(row) => Ok(Some(row.map_err(|e| {
                TrendlineError::Store(format!("map metric row failed: {e}"))
            })?)),
            None => Ok(None),
        }
    }

    pub fn list_metrics(&self) -> Result<Vec<Metric>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare("SELECT id, name, suffix, calc_type, places FROM metrics ORDER BY id")
            .map_err(|e| TrendlineError::Store(format!("prepare metric list failed: {e}")))?;

        let rows = stmt
            .query_map([], metric_from_row)
            .map_err(|e| TrendlineError::Store(format!("query metrics failed: {e}")))?;

        let mut out = Vec::new();
        for row in rows {
            out.push(
                row.map_err(|e| TrendlineError::Store(format!("map metric row failed: {e}")))?,
            );
        }
        Ok(out)
    }
}

fn metric_from_row(row: &duckdb::Row<'_>) -> duckdb::Result<Metric> {
    Ok(Metric {
        id: row.get(0)?,
        name: row.get(1)?,
        suffix: row.get(2)?,
        calc_type: CalcType::from_stored(row.get::<_, Option<i64>>(3)?),
        places: row.get::<_, i64>(4)? as u32,
    })
}
