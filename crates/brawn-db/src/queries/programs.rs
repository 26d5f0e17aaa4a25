//! Database query functions for the `training_programs` table.

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{Executor, Sqlite};

use crate::models::Program;

/// Insert a new program row. Returns the inserted program with its
/// generated id and creation timestamp.
pub async fn insert_program<'e, E>(
    executor: E,
    name: &str,
    description: Option<&str>,
) -> Result<Program>
where
    E: Executor<'e, Database = Sqlite>,
{
    let program = sqlx::query_as::<_, Program>(
        "INSERT INTO training_programs (name, description, created_at) \
         VALUES ($1, $2, $3) \
         RETURNING *",
    )
    .bind(name)
    .bind(description)
    .bind(Utc::now())
    .fetch_one(executor)
    .await
    .context("failed to insert program")?;

    Ok(program)
}

/// Fetch a program by its ID.
pub async fn get_program<'e, E>(executor: E, id: i64) -> Result<Option<Program>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let program = sqlx::query_as::<_, Program>("SELECT * FROM training_programs WHERE id = $1")
        .bind(id)
        .fetch_optional(executor)
        .await
        .context("failed to fetch program")?;

    Ok(program)
}

/// Fetch the most recently created program, if any.
///
/// Programs created within the same instant are ordered by id.
pub async fn latest_program<'e, E>(executor: E) -> Result<Option<Program>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let program = sqlx::query_as::<_, Program>(
        "SELECT * FROM training_programs ORDER BY created_at DESC, id DESC LIMIT 1",
    )
    .fetch_optional(executor)
    .await
    .context("failed to fetch latest program")?;

    Ok(program)
}

/// List all programs, newest first.
pub async fn list_programs<'e, E>(executor: E) -> Result<Vec<Program>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let programs = sqlx::query_as::<_, Program>(
        "SELECT * FROM training_programs ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(executor)
    .await
    .context("failed to list programs")?;

    Ok(programs)
}

/// Delete a program row. Workouts and their components go with it through
/// `ON DELETE CASCADE`.
///
/// Returns the number of rows removed (0 when the program does not exist).
pub async fn delete_program<'e, E>(executor: E, id: i64) -> Result<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM training_programs WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await
        .context("failed to delete program")?;

    Ok(result.rows_affected())
}
