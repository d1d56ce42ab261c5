use rusqlite::Connection;
use serde::Serialize;

use super::{StoreError, StoreResult};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub class_id: i64,
    pub due_date: Option<String>,
    pub created_at: String,
    pub class_name: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct AssignmentFields {
    pub title: String,
    pub description: String,
    pub class_id: Option<i64>,
    pub due_date: Option<String>,
}

const SELECT: &str = "SELECT a.id, a.title, a.description, a.class_id, a.due_date,
        a.created_at, c.name AS class_name
 FROM assignments a
 LEFT JOIN classes c ON a.class_id = c.id";

pub fn create(conn: &Connection, fields: &AssignmentFields) -> StoreResult<Assignment> {
    let class_id = match fields.class_id {
        Some(v) if !fields.title.is_empty() => v,
        _ => {
            return Err(StoreError::Validation(
                "Assignment title and class are required",
            ))
        }
    };
    conn.execute(
        "INSERT INTO assignments(title, description, class_id, due_date)
         VALUES(?, ?, ?, ?)",
        (
            &fields.title,
            &fields.description,
            class_id,
            &fields.due_date,
        ),
    )?;
    get(conn, conn.last_insert_rowid())
}

pub fn update(conn: &Connection, id: Option<i64>, fields: &AssignmentFields) -> StoreResult<()> {
    let (id, class_id) = match (id, fields.class_id) {
        (Some(id), Some(cid)) if !fields.title.is_empty() => (id, cid),
        _ => {
            return Err(StoreError::Validation(
                "Assignment ID, title, and class are required",
            ))
        }
    };
    conn.execute(
        "UPDATE assignments SET title = ?, description = ?, class_id = ?, due_date = ?
         WHERE id = ?",
        (
            &fields.title,
            &fields.description,
            class_id,
            &fields.due_date,
            id,
        ),
    )?;
    Ok(())
}

pub fn delete(conn: &Connection, id: Option<i64>) -> StoreResult<()> {
    let Some(id) = id else {
        return Err(StoreError::Validation("Assignment ID is required"));
    };
    conn.execute("DELETE FROM assignments WHERE id = ?", [id])?;
    Ok(())
}

pub fn list(conn: &Connection, class_id: Option<i64>) -> StoreResult<Vec<Assignment>> {
    match class_id {
        Some(cid) => {
            let mut stmt = conn.prepare(&format!(
                "{SELECT} WHERE a.class_id = ? ORDER BY a.due_date DESC"
            ))?;
            let rows = stmt
                .query_map([cid], map_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        }
        None => {
            let mut stmt = conn.prepare(&format!("{SELECT} ORDER BY a.due_date DESC"))?;
            let rows = stmt
                .query_map([], map_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        }
    }
}

fn get(conn: &Connection, id: i64) -> StoreResult<Assignment> {
    let row = conn.query_row(&format!("{SELECT} WHERE a.id = ?"), [id], map_row)?;
    Ok(row)
}

fn map_row(row: &rusqlite::Row) -> rusqlite::Result<Assignment> {
    Ok(Assignment {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        class_id: row.get(3)?,
        due_date: row.get(4)?,
        created_at: row.get(5)?,
        class_name: row.get(6)?,
    })
}
