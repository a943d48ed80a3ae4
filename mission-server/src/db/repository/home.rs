//! Home Repository

use super::{RepoError, RepoResult, to_json};
use shared::models::{Home, HomeCreate, HomeUpdate, normalize_tasks};
use shared::util::{new_id, now_millis};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, title, description, tasks, images, geographic_zone, \
                       hours_of_cleaning, hours_of_gardening, conciergerie_name, modified_date, deleted";

/// Live homes, optionally restricted to one conciergerie
pub async fn find_all(pool: &SqlitePool, conciergerie_name: Option<&str>) -> RepoResult<Vec<Home>> {
    let rows = match conciergerie_name {
        Some(name) => {
            sqlx::query_as::<_, Home>(&format!(
                "SELECT {COLUMNS} FROM home WHERE deleted = 0 AND conciergerie_name = ? \
                 ORDER BY title COLLATE NOCASE"
            ))
            .bind(name)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Home>(&format!(
                "SELECT {COLUMNS} FROM home WHERE deleted = 0 ORDER BY title COLLATE NOCASE"
            ))
            .fetch_all(pool)
            .await?
        }
    };
    Ok(rows)
}

/// Find by id, soft-deleted rows included (missions keep pointing at them)
pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Home>> {
    let row = sqlx::query_as::<_, Home>(&format!("SELECT {COLUMNS} FROM home WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Titles are unique per conciergerie among live homes
pub async fn title_exists(
    pool: &SqlitePool,
    conciergerie_name: &str,
    title: &str,
    exclude_id: Option<&str>,
) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM home \
         WHERE deleted = 0 AND conciergerie_name = ?1 AND title = ?2 COLLATE NOCASE \
           AND (?3 IS NULL OR id != ?3)",
    )
    .bind(conciergerie_name)
    .bind(title.trim())
    .bind(exclude_id)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

pub async fn create(pool: &SqlitePool, conciergerie_name: &str, data: HomeCreate) -> RepoResult<Home> {
    let data = data.normalized();
    if title_exists(pool, conciergerie_name, &data.title, None).await? {
        return Err(RepoError::Duplicate(format!("Home '{}'", data.title)));
    }
    let id = new_id();
    sqlx::query(
        "INSERT INTO home (id, title, description, tasks, images, geographic_zone, \
                           hours_of_cleaning, hours_of_gardening, conciergerie_name, modified_date, deleted) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0)",
    )
    .bind(&id)
    .bind(&data.title)
    .bind(&data.description)
    .bind(to_json(&data.tasks)?)
    .bind(to_json(&data.images)?)
    .bind(data.geographic_zone.trim())
    .bind(data.hours_of_cleaning)
    .bind(data.hours_of_gardening)
    .bind(conciergerie_name)
    .bind(now_millis())
    .execute(pool)
    .await?;
    find_by_id(pool, &id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create home".into()))
}

pub async fn update(pool: &SqlitePool, id: &str, data: HomeUpdate) -> RepoResult<Home> {
    let existing = find_by_id(pool, id)
        .await?
        .filter(|h| !h.deleted)
        .ok_or_else(|| RepoError::NotFound(format!("Home {id}")))?;

    let title = data.title.as_deref().map(str::trim);
    if let Some(title) = title
        && title_exists(pool, &existing.conciergerie_name, title, Some(id)).await?
    {
        return Err(RepoError::Duplicate(format!("Home '{title}'")));
    }
    let tasks = data.tasks.map(normalize_tasks);
    if tasks.as_ref().is_some_and(|t| t.is_empty()) {
        return Err(RepoError::Validation("at least one task is required".into()));
    }

    sqlx::query(
        "UPDATE home SET \
            title = COALESCE(?1, title), \
            description = COALESCE(?2, description), \
            tasks = COALESCE(?3, tasks), \
            images = COALESCE(?4, images), \
            geographic_zone = COALESCE(?5, geographic_zone), \
            hours_of_cleaning = COALESCE(?6, hours_of_cleaning), \
            hours_of_gardening = COALESCE(?7, hours_of_gardening), \
            modified_date = ?8 \
         WHERE id = ?9",
    )
    .bind(title)
    .bind(&data.description)
    .bind(tasks.as_ref().map(to_json).transpose()?)
    .bind(data.images.as_ref().map(to_json).transpose()?)
    .bind(&data.geographic_zone)
    .bind(data.hours_of_cleaning)
    .bind(data.hours_of_gardening)
    .bind(now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Home {id}")))
}

/// Live missions still scheduled on a home
pub async fn count_live_missions(pool: &SqlitePool, home_id: &str) -> RepoResult<i64> {
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM mission WHERE home_id = ? AND deleted = 0")
            .bind(home_id)
            .fetch_one(pool)
            .await?;
    Ok(count)
}

/// Soft-delete a home
///
/// Without `cascade`, a home with live missions is refused. With it, the
/// missions are soft-deleted in the same transaction. Returns the number of
/// missions removed alongside.
pub async fn soft_delete(pool: &SqlitePool, id: &str, cascade: bool) -> RepoResult<u64> {
    let mut tx = pool.begin().await?;
    let live: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM mission WHERE home_id = ? AND deleted = 0")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
    if live > 0 && !cascade {
        return Err(RepoError::Validation(format!(
            "Home {id} still has {live} mission(s)"
        )));
    }

    let now = now_millis();
    let rows = sqlx::query("UPDATE home SET deleted = 1, modified_date = ? WHERE id = ? AND deleted = 0")
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Home {id}")));
    }
    let missions = sqlx::query(
        "UPDATE mission SET deleted = 1, modified_date = ? WHERE home_id = ? AND deleted = 0",
    )
    .bind(now)
    .bind(id)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(missions.rows_affected())
}
