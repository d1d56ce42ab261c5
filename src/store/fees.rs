use rusqlite::Connection;
use serde::Serialize;

use super::{StoreError, StoreResult};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fee {
    pub id: i64,
    pub student_id: i64,
    pub amount: f64,
    pub fee_type: String,
    pub status: String,
    pub due_date: Option<String>,
    pub paid_date: Option<String>,
    pub created_at: String,
    pub student_name: Option<String>,
    pub class_name: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct FeeFields {
    pub student_id: Option<i64>,
    pub amount: Option<f64>,
    pub fee_type: String,
    /// Not provided means `pending`, on update as well as create.
    pub status: String,
    pub due_date: Option<String>,
    /// Caller-supplied; never derived from a status transition.
    pub paid_date: Option<String>,
}

const SELECT: &str = "SELECT f.id, f.student_id, f.amount, f.fee_type, f.status,
        f.due_date, f.paid_date, f.created_at,
        s.name AS student_name, c.name AS class_name
 FROM fees f
 LEFT JOIN students s ON f.student_id = s.id
 LEFT JOIN classes c ON s.class_id = c.id";

pub fn create(conn: &Connection, fields: &FeeFields) -> StoreResult<Fee> {
    let (student_id, amount) = match (fields.student_id, fields.amount) {
        (Some(sid), Some(amt)) if !fields.fee_type.is_empty() => (sid, amt),
        _ => {
            return Err(StoreError::Validation(
                "Student, amount, and fee type are required",
            ))
        }
    };
    // An out-of-enum status fails the CHECK constraint, same as the
    // original's ENUM column.
    conn.execute(
        "INSERT INTO fees(student_id, amount, fee_type, status, due_date, paid_date)
         VALUES(?, ?, ?, ?, ?, ?)",
        (
            student_id,
            amount,
            &fields.fee_type,
            status_or_pending(&fields.status),
            &fields.due_date,
            &fields.paid_date,
        ),
    )?;
    get(conn, conn.last_insert_rowid())
}

pub fn update(conn: &Connection, id: Option<i64>, fields: &FeeFields) -> StoreResult<()> {
    let (id, student_id, amount) = match (id, fields.student_id, fields.amount) {
        (Some(id), Some(sid), Some(amt)) if !fields.fee_type.is_empty() => (id, sid, amt),
        _ => {
            return Err(StoreError::Validation(
                "Fee ID, student, amount, and fee type are required",
            ))
        }
    };
    conn.execute(
        "UPDATE fees SET student_id = ?, amount = ?, fee_type = ?, status = ?,
                due_date = ?, paid_date = ?
         WHERE id = ?",
        (
            student_id,
            amount,
            &fields.fee_type,
            status_or_pending(&fields.status),
            &fields.due_date,
            &fields.paid_date,
            id,
        ),
    )?;
    Ok(())
}

pub fn delete(conn: &Connection, id: Option<i64>) -> StoreResult<()> {
    let Some(id) = id else {
        return Err(StoreError::Validation("Fee ID is required"));
    };
    conn.execute("DELETE FROM fees WHERE id = ?", [id])?;
    Ok(())
}

/// The filter value "all" (or none) means unfiltered.
pub fn list(conn: &Connection, status: Option<&str>) -> StoreResult<Vec<Fee>> {
    match status {
        Some(st) if !st.is_empty() && st != "all" => {
            let mut stmt =
                conn.prepare(&format!("{SELECT} WHERE f.status = ? ORDER BY f.due_date DESC"))?;
            let rows = stmt
                .query_map([st], map_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        }
        _ => {
            let mut stmt = conn.prepare(&format!("{SELECT} ORDER BY f.due_date DESC"))?;
            let rows = stmt
                .query_map([], map_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        }
    }
}

fn status_or_pending(status: &str) -> &str {
    if status.is_empty() {
        "pending"
    } else {
        status
    }
}

fn get(conn: &Connection, id: i64) -> StoreResult<Fee> {
    let row = conn.query_row(&format!("{SELECT} WHERE f.id = ?"), [id], map_row)?;
    Ok(row)
}

fn map_row(row: &rusqlite::Row) -> rusqlite::Result<Fee> {
    Ok(Fee {
        id: row.get(0)?,
        student_id: row.get(1)?,
        amount: row.get(2)?,
        fee_type: row.get(3)?,
        status: row.get(4)?,
        due_date: row.get(5)?,
        paid_date: row.get(6)?,
        created_at: row.get(7)?,
        student_name: row.get(8)?,
        class_name: row.get(9)?,
    })
}
