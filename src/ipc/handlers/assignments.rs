use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{opt_id, opt_nullable_str, opt_str, store_err};
use crate::ipc::types::{AppState, Request};
use crate::store::assignments::{self, AssignmentFields};
use serde_json::json;

fn fields_from(params: &serde_json::Value) -> AssignmentFields {
    AssignmentFields {
        title: opt_str(params, "title"),
        description: opt_str(params, "description"),
        class_id: opt_id(params, "classId"),
        due_date: opt_nullable_str(params, "dueDate"),
    }
}

fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return ok(&req.id, json!({ "assignments": [] }));
    };
    match assignments::list(conn, opt_id(&req.params, "classId")) {
        Ok(rows) => ok(&req.id, json!({ "assignments": rows })),
        Err(e) => store_err(&req.id, e, "db_query_failed", "assignments"),
    }
}

fn handle_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match assignments::create(conn, &fields_from(&req.params)) {
        Ok(row) => ok(
            &req.id,
            json!({ "message": "Assignment created successfully", "assignment": row }),
        ),
        Err(e) => store_err(&req.id, e, "db_insert_failed", "assignments"),
    }
}

fn handle_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match assignments::update(conn, opt_id(&req.params, "id"), &fields_from(&req.params)) {
        Ok(()) => ok(&req.id, json!({ "message": "Assignment updated successfully" })),
        Err(e) => store_err(&req.id, e, "db_update_failed", "assignments"),
    }
}

fn handle_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match assignments::delete(conn, opt_id(&req.params, "id")) {
        Ok(()) => ok(&req.id, json!({ "message": "Assignment deleted successfully" })),
        Err(e) => store_err(&req.id, e, "db_delete_failed", "assignments"),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "assignments.list" => Some(handle_list(state, req)),
        "assignments.create" => Some(handle_create(state, req)),
        "assignments.update" => Some(handle_update(state, req)),
        "assignments.delete" => Some(handle_delete(state, req)),
        _ => None,
    }
}
