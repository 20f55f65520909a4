use super::StoreError;
use crate::users::{NewUser, User, UserId};
use anyhow::{Context, Result};
use sqlx::{
    postgres::{PgPoolOptions, PgRow},
    Connection, PgPool, Row,
};
use std::time::Duration;
use tracing::{debug, info_span, Instrument};

const SCHEMA_SQL: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/db/sql/users.sql"));

const COLUMNS: &str = "id, first_name, last_name, email, active";

pub(super) async fn connect(dsn: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .min_connections(1)
        .max_connections(5)
        .max_lifetime(Duration::from_secs(60 * 2))
        .test_before_acquire(true)
        .connect(dsn)
        .await
        .context("Failed to connect to database")?;

    for statement in split_sql_statements(SCHEMA_SQL) {
        sqlx::query(&statement)
            .execute(&pool)
            .await
            .context("Failed to apply users schema")?;
    }
    debug!("users schema applied");

    Ok(pool)
}

fn split_sql_statements(sql: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();

    for line in sql.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("--") {
            continue;
        }
        current.push_str(line);
        current.push('\n');
        if trimmed.ends_with(';') {
            let statement = current.trim();
            if !statement.is_empty() {
                statements.push(statement.to_string());
            }
            current.clear();
        }
    }

    statements
}

fn map_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::DuplicateEmail,
        _ => StoreError::Database(err),
    }
}

fn to_user(row: &PgRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: row.try_get("id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        active: row.try_get("active")?,
    })
}

pub(super) async fn ping(pool: &PgPool) -> Result<(), StoreError> {
    let span = info_span!("db.ping", db.system = "postgresql", db.operation = "PING");
    async {
        let mut conn = pool.acquire().await?;
        conn.ping().await?;
        Ok::<(), StoreError>(())
    }
    .instrument(span)
    .await
}

pub(super) async fn list(pool: &PgPool) -> Result<Vec<User>, StoreError> {
    let query = format!("SELECT {COLUMNS} FROM users ORDER BY id");
    let rows = sqlx::query(&query).fetch_all(pool).await?;
    Ok(rows.iter().map(to_user).collect::<Result<Vec<_>, _>>()?)
}

pub(super) async fn get(pool: &PgPool, id: UserId) -> Result<User, StoreError> {
    let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
    let row = sqlx::query(&query).bind(id).fetch_optional(pool).await?;
    row.as_ref()
        .map(to_user)
        .transpose()?
        .ok_or(StoreError::NotFound)
}

pub(super) async fn create(pool: &PgPool, user: NewUser) -> Result<User, StoreError> {
    let query = format!(
        r"
        INSERT INTO users (first_name, last_name, email, active)
        VALUES ($1, $2, $3, $4)
        RETURNING {COLUMNS}
        "
    );
    let row = sqlx::query(&query)
        .bind(user.first_name)
        .bind(user.last_name)
        .bind(user.email)
        .bind(user.active)
        .fetch_one(pool)
        .await
        .map_err(map_error)?;
    Ok(to_user(&row)?)
}

pub(super) async fn update(pool: &PgPool, id: UserId, user: NewUser) -> Result<User, StoreError> {
    let query = format!(
        r"
        UPDATE users
        SET first_name = $1, last_name = $2, email = $3, active = $4, updated_at = NOW()
        WHERE id = $5
        RETURNING {COLUMNS}
        "
    );
    let row = sqlx::query(&query)
        .bind(user.first_name)
        .bind(user.last_name)
        .bind(user.email)
        .bind(user.active)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(map_error)?;
    row.as_ref()
        .map(to_user)
        .transpose()?
        .ok_or(StoreError::NotFound)
}

pub(super) async fn delete(pool: &PgPool, id: UserId) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound);
    }
    Ok(())
}
