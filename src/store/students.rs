use rusqlite::Connection;
use serde::Serialize;

use super::{StoreError, StoreResult};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub class_id: Option<i64>,
    pub roll_number: String,
    pub address: String,
    pub created_at: String,
    /// Display name of the owning class, joined in for list views.
    pub class_name: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct StudentFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub class_id: Option<i64>,
    pub roll_number: String,
    pub address: String,
}

const SELECT: &str = "SELECT s.id, s.name, s.email, s.phone, s.class_id, s.roll_number,
        s.address, s.created_at, c.name AS class_name
 FROM students s
 LEFT JOIN classes c ON s.class_id = c.id";

pub fn create(conn: &Connection, fields: &StudentFields) -> StoreResult<Student> {
    let class_id = match fields.class_id {
        Some(v) if !fields.name.is_empty() => v,
        _ => {
            return Err(StoreError::Validation(
                "Student name and class are required",
            ))
        }
    };
    // A missing referenced class surfaces here as the FK violation.
    conn.execute(
        "INSERT INTO students(name, email, phone, class_id, roll_number, address)
         VALUES(?, ?, ?, ?, ?, ?)",
        (
            &fields.name,
            &fields.email,
            &fields.phone,
            class_id,
            &fields.roll_number,
            &fields.address,
        ),
    )?;
    get(conn, conn.last_insert_rowid())
}

pub fn update(conn: &Connection, id: Option<i64>, fields: &StudentFields) -> StoreResult<()> {
    let (id, class_id) = match (id, fields.class_id) {
        (Some(id), Some(cid)) if !fields.name.is_empty() => (id, cid),
        _ => {
            return Err(StoreError::Validation(
                "Student ID, name, and class are required",
            ))
        }
    };
    conn.execute(
        "UPDATE students SET name = ?, email = ?, phone = ?, class_id = ?,
                roll_number = ?, address = ?
         WHERE id = ?",
        (
            &fields.name,
            &fields.email,
            &fields.phone,
            class_id,
            &fields.roll_number,
            &fields.address,
            id,
        ),
    )?;
    Ok(())
}

pub fn delete(conn: &Connection, id: Option<i64>) -> StoreResult<()> {
    let Some(id) = id else {
        return Err(StoreError::Validation("Student ID is required"));
    };
    conn.execute("DELETE FROM students WHERE id = ?", [id])?;
    Ok(())
}

pub fn list(conn: &Connection, class_id: Option<i64>) -> StoreResult<Vec<Student>> {
    match class_id {
        Some(cid) => {
            let mut stmt =
                conn.prepare(&format!("{SELECT} WHERE s.class_id = ? ORDER BY s.name ASC"))?;
            let rows = stmt
                .query_map([cid], map_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        }
        None => {
            let mut stmt = conn.prepare(&format!("{SELECT} ORDER BY s.name ASC"))?;
            let rows = stmt
                .query_map([], map_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        }
    }
}

fn get(conn: &Connection, id: i64) -> StoreResult<Student> {
    let row = conn.query_row(&format!("{SELECT} WHERE s.id = ?"), [id], map_row)?;
    Ok(row)
}

fn map_row(row: &rusqlite::Row) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
        phone: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        class_id: row.get(4)?,
        roll_number: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
        address: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
        created_at: row.get(7)?,
        class_name: row.get(8)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::classes::{self, ClassFields};

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().expect("open in-memory db");
        crate::db::init_schema(&conn).expect("init schema");
        conn
    }

    fn seed_class(conn: &Connection, name: &str) -> i64 {
        classes::create(
            conn,
            &ClassFields {
                name: name.to_string(),
                description: String::new(),
            },
        )
        .expect("create class")
        .id
    }

    fn fields(name: &str, class_id: Option<i64>) -> StudentFields {
        StudentFields {
            name: name.to_string(),
            class_id,
            ..Default::default()
        }
    }

    #[test]
    fn create_joins_the_class_name_into_the_returned_row() {
        let conn = test_conn();
        let class_id = seed_class(&conn, "Grade 5");
        let created = create(&conn, &fields("Amir", Some(class_id))).expect("create");
        assert_eq!(created.id, 1);
        assert_eq!(created.class_id, Some(class_id));
        assert_eq!(created.class_name.as_deref(), Some("Grade 5"));
    }

    #[test]
    fn create_requires_name_and_class() {
        let conn = test_conn();
        let class_id = seed_class(&conn, "Grade 5");
        let err = create(&conn, &fields("", Some(class_id))).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        let err = create(&conn, &fields("Amir", None)).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test]
    fn create_against_a_missing_class_is_a_storage_error() {
        let conn = test_conn();
        let err = create(&conn, &fields("Amir", Some(999))).unwrap_err();
        assert!(matches!(err, StoreError::Storage(_)));
    }

    #[test]
    fn list_orders_by_name_and_filters_by_class() {
        let conn = test_conn();
        let grade5 = seed_class(&conn, "Grade 5");
        let grade6 = seed_class(&conn, "Grade 6");
        create(&conn, &fields("Zainab", Some(grade5))).expect("create");
        create(&conn, &fields("Amir", Some(grade6))).expect("create");
        create(&conn, &fields("Meher", Some(grade5))).expect("create");

        let all: Vec<String> = list(&conn, None)
            .expect("list")
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(all, ["Amir", "Meher", "Zainab"]);

        let only5: Vec<String> = list(&conn, Some(grade5))
            .expect("filtered list")
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(only5, ["Meher", "Zainab"]);
    }

    #[test]
    fn filter_matching_nothing_returns_an_empty_list() {
        let conn = test_conn();
        let grade5 = seed_class(&conn, "Grade 5");
        create(&conn, &fields("Amir", Some(grade5))).expect("create");
        assert!(list(&conn, Some(42)).expect("empty filter").is_empty());
    }

    #[test]
    fn update_is_a_full_replacement() {
        let conn = test_conn();
        let grade5 = seed_class(&conn, "Grade 5");
        let created = create(
            &conn,
            &StudentFields {
                name: "Amir".to_string(),
                email: "amir@example.com".to_string(),
                phone: "555-0101".to_string(),
                class_id: Some(grade5),
                roll_number: "17".to_string(),
                address: "Old Town".to_string(),
            },
        )
        .expect("create");

        // Optional fields not resupplied collapse back to empty.
        update(&conn, Some(created.id), &fields("Amir R.", Some(grade5))).expect("update");
        let rows = list(&conn, None).expect("list");
        assert_eq!(rows[0].name, "Amir R.");
        assert_eq!(rows[0].email, "");
        assert_eq!(rows[0].roll_number, "");
    }

    #[test]
    fn deleting_the_class_deletes_its_students() {
        let conn = test_conn();
        let grade5 = seed_class(&conn, "Grade 5");
        create(&conn, &fields("Rahim", Some(grade5))).expect("create");
        classes::delete(&conn, Some(grade5)).expect("delete class");
        assert!(list(&conn, None).expect("list").is_empty());
    }
}
