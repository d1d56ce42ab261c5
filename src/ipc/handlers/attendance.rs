use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{opt_id, opt_str, store_err};
use crate::ipc::types::{AppState, Request};
use crate::store::attendance::{self, AttendanceFields};
use serde_json::json;

fn fields_from(params: &serde_json::Value) -> AttendanceFields {
    AttendanceFields {
        student_id: opt_id(params, "studentId"),
        class_id: opt_id(params, "classId"),
        date: opt_str(params, "date"),
        status: opt_str(params, "status"),
    }
}

fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return ok(&req.id, json!({ "attendance": [] }));
    };
    match attendance::list(conn, opt_id(&req.params, "classId")) {
        Ok(rows) => ok(&req.id, json!({ "attendance": rows })),
        Err(e) => store_err(&req.id, e, "db_query_failed", "attendance"),
    }
}

fn handle_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match attendance::create(conn, &fields_from(&req.params)) {
        Ok(row) => ok(
            &req.id,
            json!({ "message": "Attendance recorded successfully", "attendance": row }),
        ),
        Err(e) => store_err(&req.id, e, "db_insert_failed", "attendance"),
    }
}

fn handle_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match attendance::update(conn, opt_id(&req.params, "id"), &fields_from(&req.params)) {
        Ok(()) => ok(&req.id, json!({ "message": "Attendance updated successfully" })),
        Err(e) => store_err(&req.id, e, "db_update_failed", "attendance"),
    }
}

fn handle_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match attendance::delete(conn, opt_id(&req.params, "id")) {
        Ok(()) => ok(&req.id, json!({ "message": "Attendance deleted successfully" })),
        Err(e) => store_err(&req.id, e, "db_delete_failed", "attendance"),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "attendance.list" => Some(handle_list(state, req)),
        "attendance.create" => Some(handle_create(state, req)),
        "attendance.update" => Some(handle_update(state, req)),
        "attendance.delete" => Some(handle_delete(state, req)),
        _ => None,
    }
}
