use crate::errors::AppError;
use crate::models::LeadRunRecord;
use chrono::SecondsFormat;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;

/// One row of the `history` listing, most recent first.
#[derive(Debug, Clone)]
pub struct HistoryRow {
    pub run_ts: String,
    pub lead_id: String,
    pub account_name: String,
    pub industry: String,
    pub fit_score: i64,
    pub intent_score: i64,
    pub stage: String,
    pub out_dir: String,
}

/// Append-only tracking store for pipeline runs.
pub struct RunStorage {
    pool: SqlitePool,
}

impl RunStorage {
    /// Open (and create if missing) the tracking database at `db_path`.
    pub async fn connect(db_path: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite://{}", db_path))
            .map_err(AppError::DatabaseError)?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        let storage = Self { pool };
        storage.init().await?;
        Ok(storage)
    }

    /// Wrap an existing pool (used by tests with an in-memory database).
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, AppError> {
        let storage = Self { pool };
        storage.init().await?;
        Ok(storage)
    }

    async fn init(&self) -> Result<(), AppError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS lead_runs (
              id INTEGER PRIMARY KEY AUTOINCREMENT,
              run_ts TEXT NOT NULL,
              lead_id TEXT NOT NULL,
              input_source TEXT,
              account_name TEXT,
              industry TEXT,
              budget TEXT,
              timeline TEXT,
              fit_score INTEGER,
              intent_score INTEGER,
              stage TEXT,
              out_dir TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Append one run record.
    pub async fn insert_run(&self, record: &LeadRunRecord) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO lead_runs
            (run_ts, lead_id, input_source, account_name, industry, budget, timeline,
             fit_score, intent_score, stage, out_dir)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.run_ts.to_rfc3339_opts(SecondsFormat::Secs, true))
        .bind(&record.lead_id)
        .bind(&record.input_source)
        .bind(&record.account_name)
        .bind(&record.industry)
        .bind(&record.budget)
        .bind(&record.timeline)
        .bind(record.fit_score)
        .bind(record.intent_score)
        .bind(&record.stage)
        .bind(&record.out_dir)
        .execute(&self.pool)
        .await?;

        tracing::info!("Tracked run for lead {}", record.lead_id);
        Ok(())
    }

    /// Fetch the most recent runs, newest first.
    pub async fn fetch_history(&self, limit: i64) -> Result<Vec<HistoryRow>, AppError> {
        let rows = sqlx::query(
            r#"
            SELECT run_ts, lead_id, account_name, industry, fit_score, intent_score, stage, out_dir
            FROM lead_runs ORDER BY id DESC LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let history = rows
            .into_iter()
            .map(|row| HistoryRow {
                run_ts: row.try_get("run_ts").unwrap_or_default(),
                lead_id: row.try_get("lead_id").unwrap_or_default(),
                account_name: row.try_get("account_name").unwrap_or_default(),
                industry: row.try_get("industry").unwrap_or_default(),
                fit_score: row.try_get("fit_score").unwrap_or_default(),
                intent_score: row.try_get("intent_score").unwrap_or_default(),
                stage: row.try_get("stage").unwrap_or_default(),
                out_dir: row.try_get("out_dir").unwrap_or_default(),
            })
            .collect();

        Ok(history)
    }
}
