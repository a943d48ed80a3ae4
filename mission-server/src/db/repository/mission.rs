//! Mission Repository
//!
//! Lifecycle writes are conditional updates: the `WHERE` clause carries the
//! expected current state, so two employees racing for the same mission
//! cannot both win.

use super::{RepoError, RepoResult, to_json};
use shared::models::{
    Home, Mission, MissionCreate, MissionStatus, MissionUpdate, check_time_window, mission_hours,
};
use shared::util::{new_id, now_millis};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, home_id, objectives, start_date_time, end_date_time, employee_id, \
                       allowed_employees, status, hours, conciergerie_name, modified_date, deleted";

/// All live missions
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Mission>> {
    let rows = sqlx::query_as::<_, Mission>(&format!(
        "SELECT {COLUMNS} FROM mission WHERE deleted = 0 ORDER BY start_date_time"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Mission>> {
    let row = sqlx::query_as::<_, Mission>(&format!("SELECT {COLUMNS} FROM mission WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Live mission by id
pub async fn get_live(pool: &SqlitePool, id: &str) -> RepoResult<Mission> {
    find_by_id(pool, id)
        .await?
        .filter(|m| !m.deleted)
        .ok_or_else(|| RepoError::NotFound(format!("Mission {id}")))
}

/// Create a mission on `home`; hours are estimated from the objectives
pub async fn create(pool: &SqlitePool, home: &Home, data: MissionCreate) -> RepoResult<Mission> {
    let id = new_id();
    let hours = mission_hours(home, &data.objectives);
    sqlx::query(
        "INSERT INTO mission (id, home_id, objectives, start_date_time, end_date_time, employee_id, \
                              allowed_employees, status, hours, conciergerie_name, modified_date, deleted) \
         VALUES (?, ?, ?, ?, ?, NULL, ?, ?, ?, ?, ?, 0)",
    )
    .bind(&id)
    .bind(&home.id)
    .bind(to_json(&data.objectives)?)
    .bind(data.start_date_time)
    .bind(data.end_date_time)
    .bind(to_json(&data.allowed_employees)?)
    .bind(MissionStatus::Pending)
    .bind(hours)
    .bind(&home.conciergerie_name)
    .bind(now_millis())
    .execute(pool)
    .await?;
    find_by_id(pool, &id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create mission".into()))
}

/// Apply an edit; `home` is the home the mission points to after the edit
pub async fn update(
    pool: &SqlitePool,
    existing: &Mission,
    home: &Home,
    data: MissionUpdate,
) -> RepoResult<Mission> {
    let start = data.start_date_time.unwrap_or(existing.start_date_time);
    let end = data.end_date_time.unwrap_or(existing.end_date_time);
    check_time_window(start, end).map_err(|e| {
        RepoError::Validation(
            e.message
                .map(|m| m.to_string())
                .unwrap_or_else(|| e.code.to_string()),
        )
    })?;
    let objectives = data.objectives.as_ref().unwrap_or(&existing.objectives);
    let hours = mission_hours(home, objectives);

    let rows = sqlx::query(
        "UPDATE mission SET \
            home_id = ?1, \
            objectives = ?2, \
            start_date_time = ?3, \
            end_date_time = ?4, \
            allowed_employees = COALESCE(?5, allowed_employees), \
            hours = ?6, \
            modified_date = ?7 \
         WHERE id = ?8 AND deleted = 0",
    )
    .bind(&home.id)
    .bind(to_json(objectives)?)
    .bind(start)
    .bind(end)
    .bind(data.allowed_employees.as_ref().map(to_json).transpose()?)
    .bind(hours)
    .bind(now_millis())
    .bind(&existing.id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Mission {}", existing.id)));
    }
    get_live(pool, &existing.id).await
}

pub async fn soft_delete(pool: &SqlitePool, id: &str) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE mission SET deleted = 1, modified_date = ? WHERE id = ? AND deleted = 0",
    )
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Mission {id}")));
    }
    Ok(())
}

/// Assign `employee_id` if nobody took the mission first
///
/// Returns `false` when the mission was already taken (or is gone).
pub async fn accept(pool: &SqlitePool, id: &str, employee_id: &str) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE mission SET employee_id = ?, modified_date = ? \
         WHERE id = ? AND employee_id IS NULL AND deleted = 0 AND status = ?",
    )
    .bind(employee_id)
    .bind(now_millis())
    .bind(id)
    .bind(MissionStatus::Pending)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() == 1)
}

/// Move `from → to` for the assigned employee
///
/// Returns `false` when the mission is no longer in `from` or not assigned to
/// that employee.
pub async fn set_status(
    pool: &SqlitePool,
    id: &str,
    employee_id: &str,
    from: MissionStatus,
    to: MissionStatus,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE mission SET status = ?, modified_date = ? \
         WHERE id = ? AND employee_id = ? AND status = ? AND deleted = 0",
    )
    .bind(to)
    .bind(now_millis())
    .bind(id)
    .bind(employee_id)
    .bind(from)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() == 1)
}

/// Unassign the employee; the mission goes back to `pending`
///
/// Returns the employee that was removed, if any.
pub async fn remove_employee(pool: &SqlitePool, id: &str) -> RepoResult<Option<String>> {
    let mut tx = pool.begin().await?;
    let previous: Option<Option<String>> =
        sqlx::query_scalar("SELECT employee_id FROM mission WHERE id = ? AND deleted = 0")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
    let Some(previous) = previous else {
        return Err(RepoError::NotFound(format!("Mission {id}")));
    };
    sqlx::query(
        "UPDATE mission SET employee_id = NULL, status = ?, modified_date = ? WHERE id = ?",
    )
    .bind(MissionStatus::Pending)
    .bind(now_millis())
    .bind(id)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(previous)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::test_pool;
    use crate::db::repository::{employee, home};
    use shared::models::{EmployeeCreate, HomeCreate};

    const HOUR: i64 = 3_600_000;

    async fn seed(pool: &SqlitePool) -> Home {
        for id in ["e1", "e2"] {
            employee::create(
                pool,
                EmployeeCreate {
                    id: id.into(),
                    first_name: format!("Prénom {id}"),
                    family_name: format!("Nom {id}"),
                    tel: format!("06000000{id}"),
                    email: format!("{id}@example.com"),
                    geographic_zone: "Nice".into(),
                    message: None,
                    conciergerie_name: Some("Azur".into()),
                    notification_settings: None,
                },
            )
            .await
            .unwrap();
        }
        home::create(
            pool,
            "Azur",
            HomeCreate {
                title: "Villa".into(),
                description: "d".into(),
                tasks: vec!["Vitres".into()],
                images: vec![],
                geographic_zone: "Nice".into(),
                hours_of_cleaning: 2.0,
                hours_of_gardening: 1.5,
            },
        )
        .await
        .unwrap()
    }

    fn payload(home_id: &str) -> MissionCreate {
        let start = now_millis() + HOUR;
        MissionCreate {
            home_id: home_id.into(),
            objectives: vec!["Ménage".into(), "Jardinage".into(), "Arrivée".into()],
            start_date_time: start,
            end_date_time: start + 3 * HOUR,
            allowed_employees: vec![],
        }
    }

    #[tokio::test]
    async fn test_create_estimates_hours() {
        let pool = test_pool().await;
        let home = seed(&pool).await;
        let m = create(&pool, &home, payload(&home.id)).await.unwrap();
        assert_eq!(m.hours, 4.0);
        assert_eq!(m.conciergerie_name, "Azur");
        assert_eq!(m.status, MissionStatus::Pending);
        assert!(m.employee_id.is_none());
        assert_eq!(find_all(&pool).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_accept_only_once() {
        let pool = test_pool().await;
        let home = seed(&pool).await;
        let m = create(&pool, &home, payload(&home.id)).await.unwrap();

        assert!(accept(&pool, &m.id, "e1").await.unwrap());
        assert!(!accept(&pool, &m.id, "e2").await.unwrap());
        let m = get_live(&pool, &m.id).await.unwrap();
        assert_eq!(m.employee_id.as_deref(), Some("e1"));
    }

    #[tokio::test]
    async fn test_status_moves_for_assignee_only() {
        let pool = test_pool().await;
        let home = seed(&pool).await;
        let m = create(&pool, &home, payload(&home.id)).await.unwrap();
        accept(&pool, &m.id, "e1").await.unwrap();

        use MissionStatus::*;
        assert!(!set_status(&pool, &m.id, "e2", Pending, Started).await.unwrap());
        assert!(set_status(&pool, &m.id, "e1", Pending, Started).await.unwrap());
        assert!(!set_status(&pool, &m.id, "e1", Pending, Started).await.unwrap());
        assert!(set_status(&pool, &m.id, "e1", Started, Completed).await.unwrap());
        assert_eq!(get_live(&pool, &m.id).await.unwrap().status, Completed);
    }

    #[tokio::test]
    async fn test_remove_employee_resets_status() {
        let pool = test_pool().await;
        let home = seed(&pool).await;
        let m = create(&pool, &home, payload(&home.id)).await.unwrap();
        accept(&pool, &m.id, "e1").await.unwrap();
        set_status(&pool, &m.id, "e1", MissionStatus::Pending, MissionStatus::Started)
            .await
            .unwrap();

        let removed = remove_employee(&pool, &m.id).await.unwrap();
        assert_eq!(removed.as_deref(), Some("e1"));
        let m = get_live(&pool, &m.id).await.unwrap();
        assert!(m.employee_id.is_none());
        assert_eq!(m.status, MissionStatus::Pending);

        assert!(remove_employee(&pool, &m.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let pool = test_pool().await;
        let home = seed(&pool).await;
        let m = create(&pool, &home, payload(&home.id)).await.unwrap();

        let updated = update(
            &pool,
            &m,
            &home,
            MissionUpdate {
                objectives: Some(vec!["Ménage".into()]),
                allowed_employees: Some(vec!["e2".into()]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.hours, 2.0);
        assert_eq!(updated.allowed_employees, vec!["e2".to_string()]);

        let err = update(
            &pool,
            &updated,
            &home,
            MissionUpdate {
                end_date_time: Some(updated.start_date_time),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));

        soft_delete(&pool, &m.id).await.unwrap();
        assert!(find_all(&pool).await.unwrap().is_empty());
        assert!(matches!(
            get_live(&pool, &m.id).await.unwrap_err(),
            RepoError::NotFound(_)
        ));
    }
}
