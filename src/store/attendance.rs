use rusqlite::Connection;
use serde::Serialize;

use super::{StoreError, StoreResult};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub id: i64,
    pub student_id: i64,
    pub class_id: i64,
    pub date: String,
    pub status: String,
    pub created_at: String,
    pub student_name: Option<String>,
    pub class_name: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct AttendanceFields {
    pub student_id: Option<i64>,
    pub class_id: Option<i64>,
    pub date: String,
    pub status: String,
}

const SELECT: &str = "SELECT a.id, a.student_id, a.class_id, a.date, a.status, a.created_at,
        s.name AS student_name, c.name AS class_name
 FROM attendance a
 LEFT JOIN students s ON a.student_id = s.id
 LEFT JOIN classes c ON a.class_id = c.id";

pub fn create(conn: &Connection, fields: &AttendanceFields) -> StoreResult<Attendance> {
    let (student_id, class_id) = required(fields)?;
    // One row per (student, class, date); a duplicate fails the UNIQUE
    // constraint instead of merging.
    conn.execute(
        "INSERT INTO attendance(student_id, class_id, date, status)
         VALUES(?, ?, ?, ?)",
        (student_id, class_id, &fields.date, &fields.status),
    )?;
    get(conn, conn.last_insert_rowid())
}

pub fn update(conn: &Connection, id: Option<i64>, fields: &AttendanceFields) -> StoreResult<()> {
    let Some(id) = id else {
        return Err(StoreError::Validation(
            "Attendance ID, student, class, date, and status are required",
        ));
    };
    let (student_id, class_id) = required(fields).map_err(|_| {
        StoreError::Validation("Attendance ID, student, class, date, and status are required")
    })?;
    conn.execute(
        "UPDATE attendance SET student_id = ?, class_id = ?, date = ?, status = ?
         WHERE id = ?",
        (student_id, class_id, &fields.date, &fields.status, id),
    )?;
    Ok(())
}

pub fn delete(conn: &Connection, id: Option<i64>) -> StoreResult<()> {
    let Some(id) = id else {
        return Err(StoreError::Validation("Attendance ID is required"));
    };
    conn.execute("DELETE FROM attendance WHERE id = ?", [id])?;
    Ok(())
}

pub fn list(conn: &Connection, class_id: Option<i64>) -> StoreResult<Vec<Attendance>> {
    match class_id {
        Some(cid) => {
            let mut stmt = conn.prepare(&format!(
                "{SELECT} WHERE a.class_id = ? ORDER BY a.date DESC"
            ))?;
            let rows = stmt
                .query_map([cid], map_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        }
        None => {
            let mut stmt = conn.prepare(&format!("{SELECT} ORDER BY a.date DESC"))?;
            let rows = stmt
                .query_map([], map_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        }
    }
}

fn required(fields: &AttendanceFields) -> StoreResult<(i64, i64)> {
    match (fields.student_id, fields.class_id) {
        (Some(sid), Some(cid)) if !fields.date.is_empty() && !fields.status.is_empty() => {
            Ok((sid, cid))
        }
        _ => Err(StoreError::Validation(
            "Student, class, date, and status are required",
        )),
    }
}

fn get(conn: &Connection, id: i64) -> StoreResult<Attendance> {
    let row = conn.query_row(&format!("{SELECT} WHERE a.id = ?"), [id], map_row)?;
    Ok(row)
}

fn map_row(row: &rusqlite::Row) -> rusqlite::Result<Attendance> {
    Ok(Attendance {
        id: row.get(0)?,
        student_id: row.get(1)?,
        class_id: row.get(2)?,
        date: row.get(3)?,
        status: row.get(4)?,
        created_at: row.get(5)?,
        student_name: row.get(6)?,
        class_name: row.get(7)?,
    })
}
