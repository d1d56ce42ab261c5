use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{opt_amount, opt_id, opt_nullable_str, opt_str, store_err};
use crate::ipc::types::{AppState, Request};
use crate::store::fees::{self, FeeFields};
use serde_json::json;

fn fields_from(params: &serde_json::Value) -> FeeFields {
    FeeFields {
        student_id: opt_id(params, "studentId"),
        amount: opt_amount(params, "amount"),
        fee_type: opt_str(params, "feeType"),
        status: opt_str(params, "status"),
        due_date: opt_nullable_str(params, "dueDate"),
        paid_date: opt_nullable_str(params, "paidDate"),
    }
}

fn handle_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return ok(&req.id, json!({ "fees": [] }));
    };
    let status = opt_str(&req.params, "status");
    match fees::list(conn, Some(status.as_str())) {
        Ok(rows) => ok(&req.id, json!({ "fees": rows })),
        Err(e) => store_err(&req.id, e, "db_query_failed", "fees"),
    }
}

fn handle_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match fees::create(conn, &fields_from(&req.params)) {
        Ok(row) => ok(
            &req.id,
            json!({ "message": "Fee record created successfully", "fee": row }),
        ),
        Err(e) => store_err(&req.id, e, "db_insert_failed", "fees"),
    }
}

fn handle_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match fees::update(conn, opt_id(&req.params, "id"), &fields_from(&req.params)) {
        Ok(()) => ok(&req.id, json!({ "message": "Fee record updated successfully" })),
        Err(e) => store_err(&req.id, e, "db_update_failed", "fees"),
    }
}

fn handle_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match fees::delete(conn, opt_id(&req.params, "id")) {
        Ok(()) => ok(&req.id, json!({ "message": "Fee record deleted successfully" })),
        Err(e) => store_err(&req.id, e, "db_delete_failed", "fees"),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "fees.list" => Some(handle_list(state, req)),
        "fees.create" => Some(handle_create(state, req)),
        "fees.update" => Some(handle_update(state, req)),
        "fees.delete" => Some(handle_delete(state, req)),
        _ => None,
    }
}
