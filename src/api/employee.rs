use actix_web::{HttpResponse, web};

use crate::error::HrmError;
use crate::model::{CreateEmployee, EmployeeId, NewEmployee};
use crate::service::EmployeeRegistry;

/// Create Employee
#[utoipa::path(
    post,
    path = "/employees/",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Employee id or email already exists", body = Object, example = json!({
            "error": "conflict",
            "detail": "Employee with ID EMP001 already exists"
        })),
        (status = 422, description = "Validation failed"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    registry: web::Data<EmployeeRegistry>,
    payload: web::Json<CreateEmployee>,
) -> Result<HttpResponse, HrmError> {
    let new = NewEmployee::try_from(payload.into_inner())?;
    let employee = registry.create(new).await?;
    Ok(HttpResponse::Created().json(employee))
}

/// List Employees, newest first
#[utoipa::path(
    get,
    path = "/employees/",
    responses(
        (status = 200, description = "All employees", body = [Employee]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    registry: web::Data<EmployeeRegistry>,
) -> Result<HttpResponse, HrmError> {
    Ok(HttpResponse::Ok().json(registry.list().await?))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    registry: web::Data<EmployeeRegistry>,
    path: web::Path<String>,
) -> Result<HttpResponse, HrmError> {
    let employee_id = EmployeeId::parse(&path.into_inner())?;
    Ok(HttpResponse::Ok().json(registry.get(&employee_id).await?))
}

/// Delete Employee together with their attendance
#[utoipa::path(
    delete,
    path = "/employees/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee ID")
    ),
    responses(
        (status = 204, description = "Successfully deleted"),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "error": "not_found",
            "detail": "Employee with ID EMP001 not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    registry: web::Data<EmployeeRegistry>,
    path: web::Path<String>,
) -> Result<HttpResponse, HrmError> {
    let employee_id = EmployeeId::parse(&path.into_inner())?;
    registry.delete(&employee_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
