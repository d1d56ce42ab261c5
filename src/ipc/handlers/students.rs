use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{opt_id, opt_str, store_err};
use crate::ipc::types::{AppState, Request};
use crate::store::students::{self, StudentFields};
use serde_json::json;

fn fields_from(params: &serde_json::Value) -> StudentFields {
    StudentFields {
        name: opt_str(params, "name"),
        email: opt_str(params, "email"),
        phone: opt_str(params, "phone"),
        class_id: opt_id(params, "classId"),
        roll_number: opt_str(params, "rollNumber"),
        address: opt_str(params, "address"),
    }
}

fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return ok(&req.id, json!({ "students": [] }));
    };
    match students::list(conn, opt_id(&req.params, "classId")) {
        Ok(rows) => ok(&req.id, json!({ "students": rows })),
        Err(e) => store_err(&req.id, e, "db_query_failed", "students"),
    }
}

fn handle_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match students::create(conn, &fields_from(&req.params)) {
        Ok(row) => ok(
            &req.id,
            json!({ "message": "Student created successfully", "student": row }),
        ),
        Err(e) => store_err(&req.id, e, "db_insert_failed", "students"),
    }
}

fn handle_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match students::update(conn, opt_id(&req.params, "id"), &fields_from(&req.params)) {
        Ok(()) => ok(&req.id, json!({ "message": "Student updated successfully" })),
        Err(e) => store_err(&req.id, e, "db_update_failed", "students"),
    }
}

fn handle_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match students::delete(conn, opt_id(&req.params, "id")) {
        Ok(()) => ok(&req.id, json!({ "message": "Student deleted successfully" })),
        Err(e) => store_err(&req.id, e, "db_delete_failed", "students"),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.list" => Some(handle_list(state, req)),
        "students.create" => Some(handle_create(state, req)),
        "students.update" => Some(handle_update(state, req)),
        "students.delete" => Some(handle_delete(state, req)),
        _ => None,
    }
}
