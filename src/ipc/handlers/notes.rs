use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{opt_id, opt_str, store_err};
use crate::ipc::types::{AppState, Request};
use crate::store::notes::{self, NoteFields};
use serde_json::json;

fn fields_from(params: &serde_json::Value) -> NoteFields {
    NoteFields {
        title: opt_str(params, "title"),
        content: opt_str(params, "content"),
        class_id: opt_id(params, "classId"),
    }
}

fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return ok(&req.id, json!({ "notes": [] }));
    };
    match notes::list(conn, opt_id(&req.params, "classId")) {
        Ok(rows) => ok(&req.id, json!({ "notes": rows })),
        Err(e) => store_err(&req.id, e, "db_query_failed", "notes"),
    }
}

fn handle_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match notes::create(conn, &fields_from(&req.params)) {
        Ok(row) => ok(
            &req.id,
            json!({ "message": "Note created successfully", "note": row }),
        ),
        Err(e) => store_err(&req.id, e, "db_insert_failed", "notes"),
    }
}

fn handle_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match notes::update(conn, opt_id(&req.params, "id"), &fields_from(&req.params)) {
        Ok(()) => ok(&req.id, json!({ "message": "Note updated successfully" })),
        Err(e) => store_err(&req.id, e, "db_update_failed", "notes"),
    }
}

fn handle_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match notes::delete(conn, opt_id(&req.params, "id")) {
        Ok(()) => ok(&req.id, json!({ "message": "Note deleted successfully" })),
        Err(e) => store_err(&req.id, e, "db_delete_failed", "notes"),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "notes.list" => Some(handle_list(state, req)),
        "notes.create" => Some(handle_create(state, req)),
        "notes.update" => Some(handle_update(state, req)),
        "notes.delete" => Some(handle_delete(state, req)),
        _ => None,
    }
}
