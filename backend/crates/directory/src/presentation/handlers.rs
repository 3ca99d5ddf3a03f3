//! HTTP Handlers

use auth::AuthenticatedUser;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use kernel::id::{CompanyId, DepartmentId, EmployeeId, Id, PositionId};
use kernel::pagination::{Page, PageQuery};
use std::sync::Arc;

use crate::application::config::DirectoryConfig;
use crate::application::{CompanyService, DepartmentService, EmployeeService, PositionService};
use crate::domain::repository::{
    CompanyRepository, DepartmentRepository, EmployeeRepository, PositionRepository,
};
use crate::error::{DirectoryError, DirectoryResult};
use crate::presentation::dto::{
    CompanyRequest, CompanyResponse, DepartmentRequest, DepartmentResponse, EmployeeListQuery,
    EmployeeRequest, EmployeeResponse, PositionRequest, PositionResponse, PositionSearchQuery,
};

/// A storage backend for the whole hierarchy
pub trait DirectoryStore:
    CompanyRepository
    + DepartmentRepository
    + PositionRepository
    + EmployeeRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<R> DirectoryStore for R where
    R: CompanyRepository
        + DepartmentRepository
        + PositionRepository
        + EmployeeRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}

/// Shared state for directory handlers
#[derive(Clone)]
pub struct DirectoryAppState<R>
where
    R: DirectoryStore,
{
    pub repo: Arc<R>,
    pub config: Arc<DirectoryConfig>,
}

impl<R> DirectoryAppState<R>
where
    R: DirectoryStore,
{
    fn companies(&self) -> CompanyService<R> {
        CompanyService::new(self.repo.clone(), self.config.clone())
    }

    fn departments(&self) -> DepartmentService<R, R> {
        DepartmentService::new(self.repo.clone(), self.repo.clone(), self.config.clone())
    }

    fn positions(&self) -> PositionService<R, R, R> {
        PositionService::new(
            self.repo.clone(),
            self.repo.clone(),
            self.repo.clone(),
            self.config.clone(),
        )
    }

    fn employees(&self) -> EmployeeService<R, R, R, R> {
        EmployeeService::new(
            self.repo.clone(),
            self.repo.clone(),
            self.repo.clone(),
            self.repo.clone(),
        )
    }
}

/// Path ids that are not UUIDs cannot match any row
fn parse_path_id<T>(raw: &str, entity: &'static str) -> DirectoryResult<Id<T>> {
    raw.parse().map_err(|_| DirectoryError::not_found(entity))
}

// ============================================================================
// Companies
// ============================================================================

/// POST /companies
pub async fn create_company<R>(
    State(state): State<DirectoryAppState<R>>,
    user: AuthenticatedUser,
    Json(req): Json<CompanyRequest>,
) -> DirectoryResult<(StatusCode, Json<CompanyResponse>)>
where
    R: DirectoryStore,
{
    let company = state.companies().create(user.user_id, req.into()).await?;
    Ok((StatusCode::CREATED, Json(company.into())))
}

/// GET /companies/{id}
pub async fn get_company<R>(
    State(state): State<DirectoryAppState<R>>,
    Path(id): Path<String>,
) -> DirectoryResult<Json<CompanyResponse>>
where
    R: DirectoryStore,
{
    let company_id: CompanyId = parse_path_id(&id, "Company")?;
    let company = state.companies().get(&company_id).await?;
    Ok(Json(company.into()))
}

/// PATCH /companies/{id}
pub async fn update_company<R>(
    State(state): State<DirectoryAppState<R>>,
    Path(id): Path<String>,
    Json(req): Json<CompanyRequest>,
) -> DirectoryResult<Json<CompanyResponse>>
where
    R: DirectoryStore,
{
    let company_id: CompanyId = parse_path_id(&id, "Company")?;
    let company = state.companies().update(&company_id, req.into()).await?;
    Ok(Json(company.into()))
}

/// DELETE /companies/{id}
pub async fn delete_company<R>(
    State(state): State<DirectoryAppState<R>>,
    Path(id): Path<String>,
) -> DirectoryResult<StatusCode>
where
    R: DirectoryStore,
{
    if let Ok(company_id) = id.parse::<CompanyId>() {
        state.companies().delete(&company_id).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Departments
// ============================================================================

/// POST /departments
pub async fn create_department<R>(
    State(state): State<DirectoryAppState<R>>,
    Json(req): Json<DepartmentRequest>,
) -> DirectoryResult<(StatusCode, Json<DepartmentResponse>)>
where
    R: DirectoryStore,
{
    let department = state.departments().create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(department.into())))
}

/// GET /departments/{company_id}?page&size
///
/// The path segment shares its name with the item routes below it, but here
/// it is the id of the company whose departments are listed.
pub async fn list_departments<R>(
    State(state): State<DirectoryAppState<R>>,
    Path(company_id): Path<String>,
    Query(query): Query<PageQuery>,
) -> DirectoryResult<Json<Page<DepartmentResponse>>>
where
    R: DirectoryStore,
{
    let page = query.resolve();
    let departments = match company_id.parse::<CompanyId>() {
        Ok(company_id) => state.departments().list_by_company(&company_id, page).await?,
        Err(_) => Page::new(Vec::new(), page, 0),
    };
    Ok(Json(departments.map(DepartmentResponse::from)))
}

/// PATCH /departments/{id}
pub async fn update_department<R>(
    State(state): State<DirectoryAppState<R>>,
    Path(id): Path<String>,
    Json(req): Json<DepartmentRequest>,
) -> DirectoryResult<Json<DepartmentResponse>>
where
    R: DirectoryStore,
{
    let department_id: DepartmentId = parse_path_id(&id, "Department")?;
    let department = state.departments().update(&department_id, req.into()).await?;
    Ok(Json(department.into()))
}

/// DELETE /departments/{id}
pub async fn delete_department<R>(
    State(state): State<DirectoryAppState<R>>,
    Path(id): Path<String>,
) -> DirectoryResult<StatusCode>
where
    R: DirectoryStore,
{
    if let Ok(department_id) = id.parse::<DepartmentId>() {
        state.departments().delete(&department_id).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Positions
// ============================================================================

/// POST /positions
pub async fn create_position<R>(
    State(state): State<DirectoryAppState<R>>,
    Json(req): Json<PositionRequest>,
) -> DirectoryResult<(StatusCode, Json<PositionResponse>)>
where
    R: DirectoryStore,
{
    let position = state.positions().create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(position.into())))
}

/// GET /positions?company_id&department_id&page&size
pub async fn search_positions<R>(
    State(state): State<DirectoryAppState<R>>,
    Query(query): Query<PositionSearchQuery>,
) -> DirectoryResult<Json<Page<PositionResponse>>>
where
    R: DirectoryStore,
{
    let (search, page) = query.into_parts();
    let positions = state.positions().search(search, page).await?;
    Ok(Json(positions.map(PositionResponse::from)))
}

/// GET /positions/{id}
pub async fn get_position<R>(
    State(state): State<DirectoryAppState<R>>,
    Path(id): Path<String>,
) -> DirectoryResult<Json<PositionResponse>>
where
    R: DirectoryStore,
{
    let position_id: PositionId = parse_path_id(&id, "Position")?;
    let position = state.positions().get(&position_id).await?;
    Ok(Json(position.into()))
}

/// PATCH /positions/{id}
pub async fn update_position<R>(
    State(state): State<DirectoryAppState<R>>,
    Path(id): Path<String>,
    Json(req): Json<PositionRequest>,
) -> DirectoryResult<Json<PositionResponse>>
where
    R: DirectoryStore,
{
    let position_id: PositionId = parse_path_id(&id, "Position")?;
    let position = state.positions().update(&position_id, req.into()).await?;
    Ok(Json(position.into()))
}

/// DELETE /positions/{id}
pub async fn delete_position<R>(
    State(state): State<DirectoryAppState<R>>,
    Path(id): Path<String>,
) -> DirectoryResult<StatusCode>
where
    R: DirectoryStore,
{
    if let Ok(position_id) = id.parse::<PositionId>() {
        state.positions().delete(&position_id).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Employees
// ============================================================================

/// POST /employees
pub async fn create_employee<R>(
    State(state): State<DirectoryAppState<R>>,
    Json(req): Json<EmployeeRequest>,
) -> DirectoryResult<(StatusCode, Json<EmployeeResponse>)>
where
    R: DirectoryStore,
{
    let employee = state.employees().create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(employee.into())))
}

/// GET /employees?company_id&page&size
pub async fn list_employees<R>(
    State(state): State<DirectoryAppState<R>>,
    Query(query): Query<EmployeeListQuery>,
) -> DirectoryResult<Json<Page<EmployeeResponse>>>
where
    R: DirectoryStore,
{
    let employees = state
        .employees()
        .list_by_company(query.company_id.as_deref(), query.page())
        .await?;
    Ok(Json(employees.map(EmployeeResponse::from)))
}

/// GET /employees/{id}
pub async fn get_employee<R>(
    State(state): State<DirectoryAppState<R>>,
    Path(id): Path<String>,
) -> DirectoryResult<Json<EmployeeResponse>>
where
    R: DirectoryStore,
{
    let employee_id: EmployeeId = parse_path_id(&id, "Employee")?;
    let employee = state.employees().get(&employee_id).await?;
    Ok(Json(employee.into()))
}

/// PATCH /employees/{id}
pub async fn update_employee<R>(
    State(state): State<DirectoryAppState<R>>,
    Path(id): Path<String>,
    Json(req): Json<EmployeeRequest>,
) -> DirectoryResult<Json<EmployeeResponse>>
where
    R: DirectoryStore,
{
    let employee_id: EmployeeId = parse_path_id(&id, "Employee")?;
    let employee = state.employees().update(&employee_id, req.into()).await?;
    Ok(Json(employee.into()))
}

/// DELETE /employees/{id}
pub async fn delete_employee<R>(
    State(state): State<DirectoryAppState<R>>,
    Path(id): Path<String>,
) -> DirectoryResult<StatusCode>
where
    R: DirectoryStore,
{
    if let Ok(employee_id) = id.parse::<EmployeeId>() {
        state.employees().delete(&employee_id).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}
