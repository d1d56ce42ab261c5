use rusqlite::{Connection, OptionalExtension};

use super::{StoreError, StoreResult};
use crate::auth;

#[derive(Debug)]
pub struct LoginOk {
    pub token: String,
    pub teacher_id: i64,
}

/// Unknown username and wrong password answer identically so the login
/// surface cannot be used to enumerate usernames.
pub fn login(conn: &Connection, username: &str, password: &str) -> StoreResult<LoginOk> {
    if username.is_empty() || password.is_empty() {
        return Err(StoreError::Validation("Username and password required"));
    }
    let row: Option<(i64, String)> = conn
        .query_row(
            "SELECT id, password FROM teachers WHERE username = ?",
            [username],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .optional()?;
    let Some((teacher_id, stored)) = row else {
        return Err(StoreError::Auth);
    };
    if !auth::verify_password(password, &stored) {
        return Err(StoreError::Auth);
    }
    Ok(LoginOk {
        token: auth::issue_token(teacher_id, username),
        teacher_id,
    })
}
