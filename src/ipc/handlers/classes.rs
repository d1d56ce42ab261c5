use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{opt_id, opt_str, store_err};
use crate::ipc::types::{AppState, Request};
use crate::store::classes::{self, ClassFields};
use serde_json::json;

fn fields_from(params: &serde_json::Value) -> ClassFields {
    ClassFields {
        name: opt_str(params, "name"),
        description: opt_str(params, "description"),
    }
}

fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return ok(&req.id, json!({ "classes": [] }));
    };
    match classes::list(conn) {
        Ok(rows) => ok(&req.id, json!({ "classes": rows })),
        Err(e) => store_err(&req.id, e, "db_query_failed", "classes"),
    }
}

fn handle_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match classes::create(conn, &fields_from(&req.params)) {
        Ok(row) => ok(
            &req.id,
            json!({ "message": "Class created successfully", "class": row }),
        ),
        Err(e) => store_err(&req.id, e, "db_insert_failed", "classes"),
    }
}

fn handle_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match classes::update(conn, opt_id(&req.params, "id"), &fields_from(&req.params)) {
        Ok(()) => ok(&req.id, json!({ "message": "Class updated successfully" })),
        Err(e) => store_err(&req.id, e, "db_update_failed", "classes"),
    }
}

fn handle_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match classes::delete(conn, opt_id(&req.params, "id")) {
        Ok(()) => ok(&req.id, json!({ "message": "Class deleted successfully" })),
        Err(e) => store_err(&req.id, e, "db_delete_failed", "classes"),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "classes.list" => Some(handle_list(state, req)),
        "classes.create" => Some(handle_create(state, req)),
        "classes.update" => Some(handle_update(state, req)),
        "classes.delete" => Some(handle_delete(state, req)),
        _ => None,
    }
}
