use rusqlite::Connection;
use serde::Serialize;

use super::{StoreError, StoreResult};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub class_id: i64,
    pub created_at: String,
    pub class_name: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct NoteFields {
    pub title: String,
    pub content: String,
    pub class_id: Option<i64>,
}

const SELECT: &str = "SELECT n.id, n.title, n.content, n.class_id, n.created_at,
        c.name AS class_name
 FROM notes n
 LEFT JOIN classes c ON n.class_id = c.id";

pub fn create(conn: &Connection, fields: &NoteFields) -> StoreResult<Note> {
    let class_id = match fields.class_id {
        Some(v) if !fields.title.is_empty() => v,
        _ => return Err(StoreError::Validation("Note title and class are required")),
    };
    conn.execute(
        "INSERT INTO notes(title, content, class_id) VALUES(?, ?, ?)",
        (&fields.title, &fields.content, class_id),
    )?;
    get(conn, conn.last_insert_rowid())
}

pub fn update(conn: &Connection, id: Option<i64>, fields: &NoteFields) -> StoreResult<()> {
    let (id, class_id) = match (id, fields.class_id) {
        (Some(id), Some(cid)) if !fields.title.is_empty() => (id, cid),
        _ => {
            return Err(StoreError::Validation(
                "Note ID, title, and class are required",
            ))
        }
    };
    conn.execute(
        "UPDATE notes SET title = ?, content = ?, class_id = ? WHERE id = ?",
        (&fields.title, &fields.content, class_id, id),
    )?;
    Ok(())
}

pub fn delete(conn: &Connection, id: Option<i64>) -> StoreResult<()> {
    let Some(id) = id else {
        return Err(StoreError::Validation("Note ID is required"));
    };
    conn.execute("DELETE FROM notes WHERE id = ?", [id])?;
    Ok(())
}

/// Newest first; notes have no scheduling column to sort on.
pub fn list(conn: &Connection, class_id: Option<i64>) -> StoreResult<Vec<Note>> {
    match class_id {
        Some(cid) => {
            let mut stmt = conn.prepare(&format!(
                "{SELECT} WHERE n.class_id = ? ORDER BY n.created_at DESC, n.id DESC"
            ))?;
            let rows = stmt
                .query_map([cid], map_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        }
        None => {
            let mut stmt =
                conn.prepare(&format!("{SELECT} ORDER BY n.created_at DESC, n.id DESC"))?;
            let rows = stmt
                .query_map([], map_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        }
    }
}

fn get(conn: &Connection, id: i64) -> StoreResult<Note> {
    let row = conn.query_row(&format!("{SELECT} WHERE n.id = ?"), [id], map_row)?;
    Ok(row)
}

fn map_row(row: &rusqlite::Row) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        class_id: row.get(3)?,
        created_at: row.get(4)?,
        class_name: row.get(5)?,
    })
}
