//! Conciergerie Repository

use super::{RepoError, RepoResult, to_json};
use shared::models::{Conciergerie, ConciergerieCreate, ConciergerieUpdate};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, email, tel, color_name, notification_settings";

/// All conciergeries, ordered by name (case-insensitive)
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Conciergerie>> {
    let rows = sqlx::query_as::<_, Conciergerie>(&format!(
        "SELECT {COLUMNS} FROM conciergerie ORDER BY name COLLATE NOCASE"
    ))
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Conciergerie::with_color).collect())
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Conciergerie>> {
    let row = sqlx::query_as::<_, Conciergerie>(&format!(
        "SELECT {COLUMNS} FROM conciergerie WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(Conciergerie::with_color))
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<Conciergerie>> {
    let row = sqlx::query_as::<_, Conciergerie>(&format!(
        "SELECT {COLUMNS} FROM conciergerie WHERE name = ? LIMIT 1"
    ))
    .bind(name)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(Conciergerie::with_color))
}

pub async fn create(pool: &SqlitePool, data: ConciergerieCreate) -> RepoResult<Conciergerie> {
    if find_by_name(pool, &data.name).await?.is_some() {
        return Err(RepoError::Duplicate(format!("Conciergerie '{}'", data.name)));
    }
    let settings = to_json(&data.notification_settings.unwrap_or_default())?;
    sqlx::query(
        "INSERT INTO conciergerie (id, name, email, tel, color_name, notification_settings) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&data.id)
    .bind(&data.name)
    .bind(&data.email)
    .bind(&data.tel)
    .bind(&data.color_name)
    .bind(settings)
    .execute(pool)
    .await?;
    find_by_id(pool, &data.id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create conciergerie".into()))
}

/// Partial update; a rename carries homes, missions and employees along
///
/// Ownership is keyed by name, so the rename touches all four tables in one
/// transaction.
pub async fn update(pool: &SqlitePool, id: &str, data: ConciergerieUpdate) -> RepoResult<Conciergerie> {
    let settings = data
        .notification_settings
        .as_ref()
        .map(to_json)
        .transpose()?;

    let mut tx = pool.begin().await?;
    let old_name: Option<String> = sqlx::query_scalar("SELECT name FROM conciergerie WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
    let old_name = old_name.ok_or_else(|| RepoError::NotFound(format!("Conciergerie {id}")))?;

    let rename = data.name.as_deref().filter(|n| *n != old_name);
    if let Some(new_name) = rename {
        let taken: Option<String> =
            sqlx::query_scalar("SELECT id FROM conciergerie WHERE name = ? AND id <> ?")
                .bind(new_name)
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if taken.is_some() {
            return Err(RepoError::Duplicate(format!("Conciergerie '{new_name}'")));
        }
    }

    sqlx::query(
        "UPDATE conciergerie SET \
            name = COALESCE(?1, name), \
            email = COALESCE(?2, email), \
            tel = COALESCE(?3, tel), \
            color_name = COALESCE(?4, color_name), \
            notification_settings = COALESCE(?5, notification_settings) \
         WHERE id = ?6",
    )
    .bind(&data.name)
    .bind(&data.email)
    .bind(&data.tel)
    .bind(&data.color_name)
    .bind(settings)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    if let Some(new_name) = rename {
        for table in ["home", "mission", "employee"] {
            sqlx::query(&format!(
                "UPDATE {table} SET conciergerie_name = ? WHERE conciergerie_name = ?"
            ))
            .bind(new_name)
            .bind(&old_name)
            .execute(&mut *tx)
            .await?;
        }
        tracing::info!(conciergerie_id = %id, from = %old_name, to = %new_name, "Conciergerie renamed");
    }
    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Conciergerie {id}")))
}

/// Re-key a conciergerie to the id of the user who claims it
pub async fn update_id(pool: &SqlitePool, current_id: &str, new_id: &str) -> RepoResult<Conciergerie> {
    if find_by_id(pool, new_id).await?.is_some() {
        return Err(RepoError::Duplicate(format!("Conciergerie id {new_id}")));
    }
    let rows = sqlx::query("UPDATE conciergerie SET id = ? WHERE id = ?")
        .bind(new_id)
        .bind(current_id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Conciergerie {current_id}")));
    }
    find_by_id(pool, new_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Conciergerie {new_id}")))
}
