//! Durable query store.
//!
//! Owns the SQLite connection behind a mutex: patient submissions and doctor
//! reviews both mutate records, and the duplicate-suppression check must not
//! race a concurrent insert of the same `(patient, question)` pair. The
//! partial unique index on pending pairs backs the same guarantee at the
//! schema level.

use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;
use rusqlite::Connection;
use uuid::Uuid;

use crate::db::{self, repository, DatabaseError};
use crate::models::{NewQuery, QueryRecord, QueryStatus};

pub struct QueryStore {
    conn: Mutex<Connection>,
}

/// Daily workload counters for the review dashboard.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ReviewStats {
    pub today: i64,
    pub responses: i64,
}

impl QueryStore {
    /// Open (and migrate) the store at the given path.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        let conn = db::open_database(path)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// In-memory store for tests.
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let conn = db::open_memory_database()?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, DatabaseError> {
        self.conn.lock().map_err(|_| DatabaseError::LockPoisoned)
    }

    /// Persist a processed query for review.
    ///
    /// Idempotent per `(patient_id, original_query)`: while an identical
    /// submission is still pending, the existing record is returned unchanged
    /// and nothing is inserted. Ids and timestamps are assigned here, exactly
    /// once.
    pub fn save(&self, new: NewQuery) -> Result<QueryRecord, DatabaseError> {
        let conn = self.lock()?;

        if let Some(existing) =
            repository::find_pending_by_pair(&conn, &new.patient_id, &new.original_query)?
        {
            tracing::info!(
                query_id = %existing.id,
                patient_id = %new.patient_id,
                "Duplicate pending submission suppressed"
            );
            return Ok(existing);
        }

        let record = QueryRecord {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            patient_id: new.patient_id,
            original_query: new.original_query,
            ai_response: new.ai_response,
            safety_score: new.safety_score,
            confidence_score: new.confidence_score,
            urgency_level: new.urgency_level,
            needs_urgent_review: new.needs_urgent_review,
            status: QueryStatus::PendingReview,
            doctor_final_response: None,
            reviewed_at: None,
        };
        repository::insert_query(&conn, &record)?;
        tracing::info!(
            query_id = %record.id,
            patient_id = %record.patient_id,
            urgency = record.urgency_level.as_str(),
            "Query saved for doctor review"
        );
        Ok(record)
    }

    pub fn get(&self, id: &Uuid) -> Result<Option<QueryRecord>, DatabaseError> {
        let conn = self.lock()?;
        repository::get_query(&conn, id)
    }

    /// Review queue: pending records, most urgent tier first, oldest first
    /// within a tier.
    pub fn list_pending(&self) -> Result<Vec<QueryRecord>, DatabaseError> {
        let conn = self.lock()?;
        repository::list_pending(&conn)
    }

    pub fn list_by_patient(&self, patient_id: &str) -> Result<Vec<QueryRecord>, DatabaseError> {
        let conn = self.lock()?;
        repository::list_by_patient(&conn, patient_id)
    }

    pub fn pending_count(&self) -> Result<i64, DatabaseError> {
        let conn = self.lock()?;
        repository::count_pending(&conn)
    }

    /// Apply a doctor-review decision. The transition graph is deliberately
    /// unrestricted; the review surface only ever drives
    /// pending_review → approved | needs_info.
    pub fn update_status(
        &self,
        id: &Uuid,
        new_status: QueryStatus,
        doctor_response: Option<&str>,
    ) -> Result<QueryRecord, DatabaseError> {
        let conn = self.lock()?;
        let changed =
            repository::update_status(&conn, id, new_status, doctor_response, Utc::now())?;
        if !changed {
            return Err(DatabaseError::NotFound {
                entity_type: "query".into(),
                id: id.to_string(),
            });
        }
        tracing::info!(query_id = %id, status = new_status.as_str(), "Query review recorded");
        repository::get_query(&conn, id)?.ok_or_else(|| DatabaseError::NotFound {
            entity_type: "query".into(),
            id: id.to_string(),
        })
    }

    /// Today's submission and review counts (UTC day).
    pub fn review_stats(&self) -> Result<ReviewStats, DatabaseError> {
        let conn = self.lock()?;
        let today = Utc::now().format("%Y-%m-%d").to_string();
        Ok(ReviewStats {
            today: repository::count_submitted_on(&conn, &today)?,
            responses: repository::count_reviewed_on(&conn, &today)?,
        })
    }
}
