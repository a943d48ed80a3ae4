//! Employee Repository

use super::{RepoError, RepoResult, to_json};
use shared::models::{Employee, EmployeeCreate, EmployeeStatus, EmployeeUpdate};
use shared::util::now_millis;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, first_name, family_name, tel, email, geographic_zone, message, \
                       conciergerie_name, status, created_at, notification_settings";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Employee>> {
    let rows = sqlx::query_as::<_, Employee>(&format!(
        "SELECT {COLUMNS} FROM employee ORDER BY created_at"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Employee>> {
    let row = sqlx::query_as::<_, Employee>(&format!("SELECT {COLUMNS} FROM employee WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Only an accepted employee can open a session
pub async fn find_accepted_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Employee>> {
    let row = sqlx::query_as::<_, Employee>(&format!(
        "SELECT {COLUMNS} FROM employee WHERE id = ? AND status = ?"
    ))
    .bind(id)
    .bind(EmployeeStatus::Accepted)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// An employee registered with the same full name, phone number or email
pub async fn find_duplicate(pool: &SqlitePool, data: &EmployeeCreate) -> RepoResult<Option<Employee>> {
    let row = sqlx::query_as::<_, Employee>(&format!(
        "SELECT {COLUMNS} FROM employee \
         WHERE (first_name = ?1 COLLATE NOCASE AND family_name = ?2 COLLATE NOCASE) \
            OR tel = ?3 \
            OR email = ?4 COLLATE NOCASE \
         LIMIT 1"
    ))
    .bind(data.first_name.trim())
    .bind(data.family_name.trim())
    .bind(data.tel.trim())
    .bind(data.email.trim())
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Register a new employee, always in `pending` status
pub async fn create(pool: &SqlitePool, data: EmployeeCreate) -> RepoResult<Employee> {
    if find_duplicate(pool, &data).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Employee {} {}",
            data.first_name, data.family_name
        )));
    }
    let settings = to_json(&data.notification_settings.unwrap_or_default())?;
    sqlx::query(
        "INSERT INTO employee (id, first_name, family_name, tel, email, geographic_zone, \
                               message, conciergerie_name, status, created_at, notification_settings) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&data.id)
    .bind(data.first_name.trim())
    .bind(data.family_name.trim())
    .bind(data.tel.trim())
    .bind(data.email.trim())
    .bind(data.geographic_zone.trim())
    .bind(&data.message)
    .bind(&data.conciergerie_name)
    .bind(EmployeeStatus::Pending)
    .bind(now_millis())
    .bind(settings)
    .execute(pool)
    .await?;
    find_by_id(pool, &data.id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create employee".into()))
}

pub async fn update(pool: &SqlitePool, id: &str, data: EmployeeUpdate) -> RepoResult<Employee> {
    let settings = data
        .notification_settings
        .as_ref()
        .map(to_json)
        .transpose()?;
    let rows = sqlx::query(
        "UPDATE employee SET \
            tel = COALESCE(?1, tel), \
            email = COALESCE(?2, email), \
            geographic_zone = COALESCE(?3, geographic_zone), \
            message = COALESCE(?4, message), \
            conciergerie_name = COALESCE(?5, conciergerie_name), \
            notification_settings = COALESCE(?6, notification_settings) \
         WHERE id = ?7",
    )
    .bind(&data.tel)
    .bind(&data.email)
    .bind(&data.geographic_zone)
    .bind(&data.message)
    .bind(&data.conciergerie_name)
    .bind(settings)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Employee {id}")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Employee {id}")))
}

pub async fn update_status(pool: &SqlitePool, id: &str, status: EmployeeStatus) -> RepoResult<Employee> {
    let rows = sqlx::query("UPDATE employee SET status = ? WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Employee {id}")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Employee {id}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::test_pool;

    fn payload(id: &str, first: &str, family: &str) -> EmployeeCreate {
        EmployeeCreate {
            id: id.into(),
            first_name: first.into(),
            family_name: family.into(),
            tel: format!("06{id:0>8}"),
            email: format!("{id}@example.com"),
            geographic_zone: "Nice".into(),
            message: Some("Bonjour".into()),
            conciergerie_name: Some("Azur".into()),
            notification_settings: None,
        }
    }

    #[tokio::test]
    async fn test_create_is_pending() {
        let pool = test_pool().await;
        let e = create(&pool, payload("e1", "Marie", "Curie")).await.unwrap();
        assert_eq!(e.status, EmployeeStatus::Pending);
        assert!(e.created_at > 0);
        assert!(e.notification_settings.mission_removed);
        assert!(find_accepted_by_id(&pool, "e1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_detection() {
        let pool = test_pool().await;
        create(&pool, payload("e1", "Marie", "Curie")).await.unwrap();

        // same name, different case
        let err = create(&pool, payload("e2", "marie", "CURIE")).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));

        // same email
        let mut same_email = payload("e3", "Pierre", "Curie");
        same_email.email = "E1@example.com".into();
        assert!(find_duplicate(&pool, &same_email).await.unwrap().is_some());

        // same phone
        let mut same_tel = payload("e4", "Irène", "Joliot");
        same_tel.tel = payload("e1", "", "").tel;
        assert!(find_duplicate(&pool, &same_tel).await.unwrap().is_some());

        assert!(create(&pool, payload("e5", "Irène", "Joliot")).await.is_ok());
    }

    #[tokio::test]
    async fn test_status_update_enables_session() {
        let pool = test_pool().await;
        create(&pool, payload("e1", "Marie", "Curie")).await.unwrap();
        let e = update_status(&pool, "e1", EmployeeStatus::Accepted).await.unwrap();
        assert!(e.is_accepted());
        assert!(find_accepted_by_id(&pool, "e1").await.unwrap().is_some());

        let err = update_status(&pool, "nobody", EmployeeStatus::Rejected)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_settings() {
        let pool = test_pool().await;
        create(&pool, payload("e1", "Marie", "Curie")).await.unwrap();
        let mut settings = shared::models::EmployeeNotificationSettings::default();
        settings.mission_changed = false;
        let e = update(
            &pool,
            "e1",
            EmployeeUpdate {
                geographic_zone: Some("Cannes".into()),
                notification_settings: Some(settings),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(e.geographic_zone, "Cannes");
        assert!(!e.notification_settings.mission_changed);
        assert_eq!(e.email, "e1@example.com");
    }
}
