use rusqlite::Connection;
use std::path::Path;

use crate::auth;

pub fn open_db(workspace: &Path) -> anyhow::Result<Connection> {
    std::fs::create_dir_all(workspace)?;
    let db_path = workspace.join("records.sqlite3");
    let conn = Connection::open(db_path)?;
    init_schema(&conn)?;
    Ok(conn)
}

/// Idempotent: every table is IF NOT EXISTS and the seed credential insert
/// is guarded by the username UNIQUE constraint, so re-running (including
/// concurrently on first use) neither errors nor duplicates anything.
pub fn init_schema(conn: &Connection) -> anyhow::Result<()> {
    conn.execute("PRAGMA foreign_keys = ON", [])?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS teachers(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS classes(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            description TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS students(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT,
            phone TEXT,
            class_id INTEGER,
            roll_number TEXT,
            address TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY(class_id) REFERENCES classes(id) ON DELETE CASCADE
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_students_class ON students(class_id)",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS assignments(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT,
            class_id INTEGER NOT NULL,
            due_date TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY(class_id) REFERENCES classes(id) ON DELETE CASCADE
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_assignments_class ON assignments(class_id)",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS notes(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            content TEXT,
            class_id INTEGER NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY(class_id) REFERENCES classes(id) ON DELETE CASCADE
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_notes_class ON notes(class_id)",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS fees(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id INTEGER NOT NULL,
            amount REAL NOT NULL,
            fee_type TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending'
                CHECK(status IN ('pending', 'paid', 'overdue')),
            due_date TEXT,
            paid_date TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY(student_id) REFERENCES students(id) ON DELETE CASCADE
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_fees_student ON fees(student_id)",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS attendance(
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id INTEGER NOT NULL,
            class_id INTEGER NOT NULL,
            date TEXT NOT NULL,
            status TEXT NOT NULL CHECK(status IN ('present', 'absent', 'late')),
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY(student_id) REFERENCES students(id) ON DELETE CASCADE,
            FOREIGN KEY(class_id) REFERENCES classes(id) ON DELETE CASCADE,
            UNIQUE(student_id, class_id, date)
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_attendance_student ON attendance(student_id)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_attendance_class ON attendance(class_id)",
        [],
    )?;

    seed_default_teacher(conn)?;
    Ok(())
}

// A fresh install has no way to log in, so ensure one credential exists.
// INSERT OR IGNORE rides on the username UNIQUE constraint: a concurrent
// duplicate insert is a no-op, not an error.
fn seed_default_teacher(conn: &Connection) -> anyhow::Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO teachers(username, password) VALUES(?, ?)",
        ("teacher", auth::hash_password("1234")),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent_and_seeds_one_teacher() {
        let conn = Connection::open_in_memory().expect("open in-memory db");
        init_schema(&conn).expect("first init");
        init_schema(&conn).expect("second init");
        init_schema(&conn).expect("third init");

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM teachers", [], |r| r.get(0))
            .expect("count teachers");
        assert_eq!(count, 1);

        let username: String = conn
            .query_row("SELECT username FROM teachers", [], |r| r.get(0))
            .expect("seed username");
        assert_eq!(username, "teacher");
    }

    #[test]
    fn seed_survives_an_existing_credential() {
        let conn = Connection::open_in_memory().expect("open in-memory db");
        init_schema(&conn).expect("init");
        conn.execute(
            "UPDATE teachers SET password = ? WHERE username = 'teacher'",
            [auth::hash_password("changed")],
        )
        .expect("change password");

        init_schema(&conn).expect("re-init");
        let stored: String = conn
            .query_row(
                "SELECT password FROM teachers WHERE username = 'teacher'",
                [],
                |r| r.get(0),
            )
            .expect("stored password");
        assert_eq!(stored, auth::hash_password("changed"));
    }

    #[test]
    fn foreign_keys_are_enforced() {
        let conn = Connection::open_in_memory().expect("open in-memory db");
        init_schema(&conn).expect("init");

        let result = conn.execute(
            "INSERT INTO students(name, class_id) VALUES('orphan', 999)",
            [],
        );
        assert!(result.is_err(), "insert against missing class must fail");
    }
}
