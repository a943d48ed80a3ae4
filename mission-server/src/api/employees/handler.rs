//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::calendar::local_date;
use shared::employee::{
    filter_employees, filter_employees_by_conciergerie, is_in_scope, sort_employees,
};
use shared::models::{
    Employee, EmployeeCreate, EmployeeRegistration, EmployeeStatusUpdate, EmployeeUpdate,
};
use shared::points::{employee_points_for_day, format_points};
use shared::util::now_millis;
use validator::Validate;

use crate::api::query::viewer_locale;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{RepoError, employee, mission};
use crate::security_log;
use crate::services::notifier;
use crate::utils::{AppError, AppResult, ErrorCode};

fn employee_not_found(id: &str) -> AppError {
    AppError::with_message(ErrorCode::EmployeeNotFound, format!("Employee {id} not found"))
}

async fn load(state: &ServerState, id: &str) -> AppResult<Employee> {
    employee::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| employee_not_found(id))
}

/// The employee themself, or a conciergerie that manages them
fn require_access(user: &CurrentUser, e: &Employee) -> AppResult<()> {
    if user.is_employee() {
        if user.id == e.id {
            return Ok(());
        }
        return Err(AppError::permission_denied("Other employees are not visible"));
    }
    if is_in_scope(e, user.require_conciergerie()?) {
        Ok(())
    } else {
        Err(AppError::new(ErrorCode::NotOwner))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
}

/// GET /api/employees - 员工列表
///
/// 待审核在前，然后已接受、已拒绝；同状态按姓名排序。
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Employee>>> {
    let name = user.require_conciergerie()?;
    let all = employee::find_all(&state.pool).await?;

    let sorted = sort_employees(&all);
    let scoped = filter_employees_by_conciergerie(sorted, Some(name));
    let found = filter_employees(scoped, query.search.as_deref().unwrap_or(""));

    Ok(Json(found.into_iter().cloned().collect()))
}

/// GET /api/employees/:id - 获取员工
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Employee>> {
    let e = load(&state, &id).await?;
    require_access(&user, &e)?;
    Ok(Json(e))
}

/// POST /api/employees - 员工注册 (公共接口)
///
/// 同名、同电话或同邮箱的员工已存在时返回 `already_exists = true`。
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<EmployeeCreate>,
) -> AppResult<Json<EmployeeRegistration>> {
    payload.validate()?;

    match employee::create(&state.pool, payload).await {
        Ok(e) => {
            tracing::info!(employee_id = %e.id, conciergerie = ?e.conciergerie_name, "Employee registered");
            notifier::notify_registration(&state.pool, &e).await;
            Ok(Json(EmployeeRegistration {
                employee: Some(e),
                already_exists: false,
            }))
        }
        Err(RepoError::Duplicate(msg)) => {
            tracing::info!(reason = %msg, "Registration matches an existing employee");
            Ok(Json(EmployeeRegistration {
                employee: None,
                already_exists: true,
            }))
        }
        Err(e) => Err(e.into()),
    }
}

/// PUT /api/employees/:id - 更新资料 (仅本人)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<EmployeeUpdate>,
) -> AppResult<Json<Employee>> {
    if user.require_employee()? != id {
        return Err(AppError::permission_denied("Employees can only edit their own profile"));
    }
    payload.validate()?;
    load(&state, &id).await?;

    let e = employee::update(&state.pool, &id, payload).await?;
    Ok(Json(e))
}

/// PUT /api/employees/:id/status - 接受 / 拒绝员工
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<EmployeeStatusUpdate>,
) -> AppResult<Json<Employee>> {
    let name = user.require_conciergerie()?;
    let e = load(&state, &id).await?;
    if !is_in_scope(&e, name) {
        return Err(AppError::new(ErrorCode::NotOwner));
    }

    let e = employee::update_status(&state.pool, &id, payload.status).await?;
    security_log!(INFO, "employee_status_changed", employee_id = %id, status = ?e.status, by = %user.id);
    Ok(Json(e))
}

#[derive(Debug, Default, Deserialize)]
pub struct PointsQuery {
    /// YYYY-MM-DD, 默认今天 (按查看者时区)
    pub date: Option<String>,
    pub locale: Option<String>,
    pub tz_offset: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PointsResponse {
    pub employee_id: String,
    pub date: NaiveDate,
    pub points: f64,
    /// 最多一位小数
    pub formatted: String,
}

/// GET /api/employees/:id/points - 某日积分
pub async fn points(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Query(query): Query<PointsQuery>,
) -> AppResult<Json<PointsResponse>> {
    let e = load(&state, &id).await?;
    require_access(&user, &e)?;

    let locale = viewer_locale(
        query.locale.as_deref(),
        query.tz_offset,
        state.config.default_locale,
    )?;
    let date = match query.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| AppError::invalid_query_token("date", raw))?,
        None => local_date(now_millis(), &locale),
    };

    let missions = mission::find_all(&state.pool).await?;
    let points = employee_points_for_day(&e.id, date, &missions, &locale);

    Ok(Json(PointsResponse {
        employee_id: e.id,
        date,
        points,
        formatted: format_points(points),
    }))
}
