pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS metrics (
  id BIGINT PRIMARY KEY,
  name TEXT NOT NULL,
  suffix TEXT,
  calc_type INTEGER,
  places INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS metric_points (
  id BIGINT PRIMARY KEY,
  metric_id BIGINT NOT NULL,
  value DOUBLE NOT NULL,
  counter INTEGER NOT NULL,
  created_at TIMESTAMP NOT NULL
);

CREATE SEQUENCE IF NOT EXISTS metric_points_id_seq;

CREATE INDEX IF NOT EXISTS idx_points_metric_created ON metric_points(metric_id, created_at);
CREATE INDEX IF NOT EXISTS idx_points_created ON metric_points(created_at);
"#;
