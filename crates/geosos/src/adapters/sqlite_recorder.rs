// Rust guideline compliant 2026-10-16

//! SQLite adapter for the `Recorder` port.
//!
//! Appends one `alerts` row per dispatched alert via `sqlx`. Rows are never
//! updated: a second write with the same event id fails with
//! `RecordError::Duplicate` instead of overwriting.

use domain::{AlertEvent, RecordError, Recorder};

/// `Recorder` adapter backed by a SQLite database via `sqlx`.
#[derive(Debug, Clone)]
pub struct SqliteRecorder {
    pool: sqlx::SqlitePool,
}

impl SqliteRecorder {
    /// Open or create a SQLite database and initialize the schema.
    ///
    /// The `alerts` table is created via `CREATE TABLE IF NOT EXISTS`, making
    /// repeated calls safe.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` when the connection or schema creation fails.
    pub async fn new(db_url: &str) -> Result<Self, sqlx::Error> {
        // sqlx 0.8 does not create file databases unless asked to.
        let opts = db_url
            .parse::<sqlx::sqlite::SqliteConnectOptions>()?
            .create_if_missing(true);
        let pool = sqlx::SqlitePool::connect_with(opts).await?;
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS alerts (
                event_id        TEXT PRIMARY KEY,
                timestamp       TEXT NOT NULL,
                address         TEXT NOT NULL,
                latitude        REAL NOT NULL,
                longitude       REAL NOT NULL,
                user_message    TEXT NOT NULL,
                notification_id TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await?;
        Ok(Self { pool })
    }
}

impl Recorder for SqliteRecorder {
    /// Insert `event` into the `alerts` table.
    ///
    /// Latitude and longitude are bound as `f64` so they land as REAL values.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::Duplicate` when the event id already exists, or
    /// `RecordError::Unavailable` on any other `sqlx` error. The underlying
    /// error is logged before mapping.
    async fn put(&self, event: &AlertEvent) -> Result<(), RecordError> {
        sqlx::query(
            "INSERT INTO alerts
             (event_id, timestamp, address, latitude, longitude, user_message, notification_id)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(event.event_id.to_string())
        .bind(&event.timestamp)
        .bind(&event.address)
        .bind(event.coordinates.latitude())
        .bind(event.coordinates.longitude())
        .bind(&event.user_message)
        .bind(&event.notification_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, event_id = %event.event_id, "sqlite.put.failed");
            match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    RecordError::Duplicate { event_id: event.event_id }
                }
                other => RecordError::Unavailable { reason: other.to_string() },
            }
        })?;
        tracing::debug!(event_id = %event.event_id, "sqlite.put.ok");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::SqliteRecorder;
    use domain::{AlertEvent, Coordinates, NOTIFICATION_ID_NONE, RecordError, Recorder as _};
    use uuid::Uuid;

    // Every call opens a fresh in-memory database, so tests are isolated.
    async fn make_recorder() -> SqliteRecorder {
        SqliteRecorder::new("sqlite::memory:")
            .await
            .expect("in-memory SQLite should open")
    }

    fn make_event(id: Uuid, notification_id: &str) -> AlertEvent {
        AlertEvent {
            event_id: id,
            timestamp: "10/16/2026, 09:41:07 PM".to_owned(),
            address: "123 Main St".to_owned(),
            coordinates: Coordinates::new(40.7128, -74.0060).unwrap(),
            user_message: "Fire".to_owned(),
            notification_id: notification_id.to_owned(),
        }
    }

    #[tokio::test]
    async fn put_stores_one_row_per_event() {
        let recorder = make_recorder().await;
        recorder.put(&make_event(Uuid::new_v4(), "a")).await.unwrap();
        recorder.put(&make_event(Uuid::new_v4(), "b")).await.unwrap();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM alerts")
            .fetch_one(&recorder.pool)
            .await
            .unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn fields_round_trip_verbatim() {
        let recorder = make_recorder().await;
        let id = Uuid::new_v4();
        recorder.put(&make_event(id, "msg-1")).await.unwrap();
        let row: (String, String, String, f64, f64, String, String) = sqlx::query_as(
            "SELECT event_id, timestamp, address, latitude, longitude, user_message, notification_id
             FROM alerts WHERE event_id = ?",
        )
        .bind(id.to_string())
        .fetch_one(&recorder.pool)
        .await
        .unwrap();
        assert_eq!(row.0, id.to_string());
        assert_eq!(row.1, "10/16/2026, 09:41:07 PM");
        assert_eq!(row.2, "123 Main St");
        assert!((row.3 - 40.7128).abs() < 1e-9);
        assert!((row.4 + 74.006).abs() < 1e-9);
        assert_eq!(row.5, "Fire");
        assert_eq!(row.6, "msg-1");
    }

    #[tokio::test]
    async fn coordinates_are_stored_as_real() {
        let recorder = make_recorder().await;
        let id = Uuid::new_v4();
        recorder.put(&make_event(id, "x")).await.unwrap();
        let types: (String, String) =
            sqlx::query_as("SELECT typeof(latitude), typeof(longitude) FROM alerts WHERE event_id = ?")
                .bind(id.to_string())
                .fetch_one(&recorder.pool)
                .await
                .unwrap();
        assert_eq!(types, ("real".to_owned(), "real".to_owned()));
    }

    #[tokio::test]
    async fn missing_notification_sentinel_is_stored_as_text() {
        let recorder = make_recorder().await;
        let id = Uuid::new_v4();
        recorder.put(&make_event(id, NOTIFICATION_ID_NONE)).await.unwrap();
        let stored: String =
            sqlx::query_scalar("SELECT notification_id FROM alerts WHERE event_id = ?")
                .bind(id.to_string())
                .fetch_one(&recorder.pool)
                .await
                .unwrap();
        assert_eq!(stored, "N/A");
    }

    #[tokio::test]
    async fn duplicate_event_id_is_rejected() {
        let recorder = make_recorder().await;
        let id = Uuid::new_v4();
        recorder.put(&make_event(id, "first")).await.unwrap();
        let err = recorder.put(&make_event(id, "second")).await.unwrap_err();
        assert_eq!(err, RecordError::Duplicate { event_id: id });
        // The first row is untouched.
        let stored: String =
            sqlx::query_scalar("SELECT notification_id FROM alerts WHERE event_id = ?")
                .bind(id.to_string())
                .fetch_one(&recorder.pool)
                .await
                .unwrap();
        assert_eq!(stored, "first");
    }

    #[tokio::test]
    async fn closed_pool_is_unavailable() {
        let recorder = make_recorder().await;
        recorder.pool.close().await;
        let err = recorder.put(&make_event(Uuid::new_v4(), "x")).await.unwrap_err();
        assert!(matches!(err, RecordError::Unavailable { .. }));
    }
}
