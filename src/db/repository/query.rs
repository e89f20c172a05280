use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{QueryRecord, QueryStatus, UrgencyLevel};

const QUERY_COLUMNS: &str = "id, timestamp, patient_id, original_query, ai_response, \
     safety_score, confidence_score, urgency_level, needs_urgent_review, \
     status, doctor_final_response, reviewed_at";

pub fn insert_query(conn: &Connection, record: &QueryRecord) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO queries (id, timestamp, patient_id, original_query, ai_response,
             safety_score, confidence_score, urgency_level, needs_urgent_review,
             status, doctor_final_response, reviewed_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            record.id.to_string(),
            record.timestamp.to_rfc3339(),
            record.patient_id,
            record.original_query,
            record.ai_response,
            record.safety_score,
            record.confidence_score,
            record.urgency_level.as_str(),
            record.needs_urgent_review,
            record.status.as_str(),
            record.doctor_final_response,
            record.reviewed_at.map(|t| t.to_rfc3339()),
        ],
    )?;
    Ok(())
}

pub fn get_query(conn: &Connection, id: &Uuid) -> Result<Option<QueryRecord>, DatabaseError> {
    let sql = format!("SELECT {QUERY_COLUMNS} FROM queries WHERE id = ?1");
    let result = conn.query_row(&sql, params![id.to_string()], row_to_raw);

    match result {
        Ok(raw) => Ok(Some(record_from_row(raw)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Find the pending record for a `(patient, verbatim question)` pair, if any.
/// This is the read side of duplicate suppression.
pub fn find_pending_by_pair(
    conn: &Connection,
    patient_id: &str,
    original_query: &str,
) -> Result<Option<QueryRecord>, DatabaseError> {
    let sql = format!(
        "SELECT {QUERY_COLUMNS} FROM queries
         WHERE patient_id = ?1 AND original_query = ?2 AND status = 'pending_review'"
    );
    let result = conn.query_row(&sql, params![patient_id, original_query], row_to_raw);

    match result {
        Ok(raw) => Ok(Some(record_from_row(raw)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// All pending records, most urgent tier first, oldest first within a tier.
pub fn list_pending(conn: &Connection) -> Result<Vec<QueryRecord>, DatabaseError> {
    let sql = format!(
        "SELECT {QUERY_COLUMNS} FROM queries
         WHERE status = 'pending_review'
         ORDER BY
             CASE urgency_level
                 WHEN 'high' THEN 1
                 WHEN 'medium' THEN 2
                 ELSE 3
             END,
             timestamp ASC"
    );
    collect_records(conn, &sql, params![])
}

/// Every record a patient has ever submitted, most recent first.
pub fn list_by_patient(
    conn: &Connection,
    patient_id: &str,
) -> Result<Vec<QueryRecord>, DatabaseError> {
    let sql = format!(
        "SELECT {QUERY_COLUMNS} FROM queries
         WHERE patient_id = ?1
         ORDER BY timestamp DESC"
    );
    collect_records(conn, &sql, params![patient_id])
}

/// Apply a doctor-review decision. Returns false when the id is unknown.
pub fn update_status(
    conn: &Connection,
    id: &Uuid,
    new_status: QueryStatus,
    doctor_response: Option<&str>,
    reviewed_at: DateTime<Utc>,
) -> Result<bool, DatabaseError> {
    let changed = conn.execute(
        "UPDATE queries
         SET status = ?2, doctor_final_response = ?3, reviewed_at = ?4
         WHERE id = ?1",
        params![
            id.to_string(),
            new_status.as_str(),
            doctor_response,
            reviewed_at.to_rfc3339(),
        ],
    )?;
    Ok(changed > 0)
}

pub fn count_pending(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM queries WHERE status = 'pending_review'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Queries submitted on the given UTC day (RFC 3339 timestamps sort by prefix).
pub fn count_submitted_on(conn: &Connection, day: &str) -> Result<i64, DatabaseError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM queries WHERE timestamp LIKE ?1",
        params![format!("{day}%")],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Queries reviewed (status left pending_review) on the given UTC day.
pub fn count_reviewed_on(conn: &Connection, day: &str) -> Result<i64, DatabaseError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM queries
         WHERE status != 'pending_review' AND reviewed_at LIKE ?1",
        params![format!("{day}%")],
        |row| row.get(0),
    )?;
    Ok(count)
}

fn collect_records(
    conn: &Connection,
    sql: &str,
    args: impl rusqlite::Params,
) -> Result<Vec<QueryRecord>, DatabaseError> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(args, row_to_raw)?;

    let mut records = Vec::new();
    for row in rows {
        records.push(record_from_row(row?)?);
    }
    Ok(records)
}

struct QueryRow {
    id: String,
    timestamp: String,
    patient_id: String,
    original_query: String,
    ai_response: Option<String>,
    safety_score: i32,
    confidence_score: i32,
    urgency_level: String,
    needs_urgent_review: bool,
    status: String,
    doctor_final_response: Option<String>,
    reviewed_at: Option<String>,
}

fn row_to_raw(row: &rusqlite::Row) -> Result<QueryRow, rusqlite::Error> {
    Ok(QueryRow {
        id: row.get(0)?,
        timestamp: row.get(1)?,
        patient_id: row.get(2)?,
        original_query: row.get(3)?,
        ai_response: row.get(4)?,
        safety_score: row.get(5)?,
        confidence_score: row.get(6)?,
        urgency_level: row.get(7)?,
        needs_urgent_review: row.get(8)?,
        status: row.get(9)?,
        doctor_final_response: row.get(10)?,
        reviewed_at: row.get(11)?,
    })
}

fn record_from_row(row: QueryRow) -> Result<QueryRecord, DatabaseError> {
    Ok(QueryRecord {
        id: Uuid::parse_str(&row.id)
            .map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))?,
        timestamp: parse_timestamp(&row.timestamp)?,
        patient_id: row.patient_id,
        original_query: row.original_query,
        ai_response: row.ai_response,
        safety_score: row.safety_score,
        confidence_score: row.confidence_score,
        urgency_level: UrgencyLevel::from_str(&row.urgency_level)?,
        needs_urgent_review: row.needs_urgent_review,
        status: QueryStatus::from_str(&row.status)?,
        doctor_final_response: row.doctor_final_response,
        reviewed_at: row.reviewed_at.as_deref().map(parse_timestamp).transpose()?,
    })
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| DatabaseError::ConstraintViolation(format!("bad timestamp '{raw}': {e}")))
}
