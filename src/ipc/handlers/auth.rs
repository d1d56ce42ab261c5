use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{opt_str, store_err};
use crate::ipc::types::{AppState, Request};
use crate::store::teachers;
use serde_json::json;

fn handle_login(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let username = opt_str(&req.params, "username");
    let password = opt_str(&req.params, "password");
    match teachers::login(conn, &username, &password) {
        Ok(login) => ok(
            &req.id,
            json!({
                "message": "Login successful",
                "token": login.token,
                "teacherId": login.teacher_id
            }),
        ),
        Err(e) => store_err(&req.id, e, "db_query_failed", "teachers"),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "auth.login" => Some(handle_login(state, req)),
        _ => None,
    }
}
