//! HTTP handlers for employee endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::handlers::DeletedResponse;
use crate::services::employee::{
    CreateEmployeeInput, Employee, EmployeeService, ToggleOutcome, UpdateEmployeeInput,
};
use crate::AppState;

/// Query parameters for the employee listing
#[derive(Debug, Deserialize)]
pub struct EmployeeFilter {
    pub status: Option<String>,
}

/// List employees
pub async fn list_employees(
    State(state): State<AppState>,
    Query(params): Query<EmployeeFilter>,
) -> AppResult<Json<Vec<Employee>>> {
    let service = EmployeeService::new(state.db);
    let employees = service.list(params.status.as_deref()).await?;
    Ok(Json(employees))
}

/// Create an employee
pub async fn create_employee(
    State(state): State<AppState>,
    Json(input): Json<CreateEmployeeInput>,
) -> AppResult<(StatusCode, Json<Employee>)> {
    let service = EmployeeService::new(state.db);
    let employee = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Update an employee
pub async fn update_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<i32>,
    Json(input): Json<UpdateEmployeeInput>,
) -> AppResult<Json<Employee>> {
    let service = EmployeeService::new(state.db);
    let employee = service.update(employee_id, input).await?;
    Ok(Json(employee))
}

/// Toggle an employee's status
pub async fn toggle_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<i32>,
) -> AppResult<Json<ToggleOutcome>> {
    let service = EmployeeService::new(state.db);
    let outcome = service.toggle(employee_id).await?;
    Ok(Json(outcome))
}

/// Delete an employee
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(employee_id): Path<i32>,
) -> AppResult<Json<DeletedResponse>> {
    let service = EmployeeService::new(state.db);
    service.delete(employee_id).await?;
    Ok(Json(DeletedResponse {
        message: "Empleado eliminado".to_string(),
    }))
}
