//! Database query functions for the `workouts` table.

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{Executor, Sqlite};

use crate::models::Workout;

/// Insert a new workout row for a program. Returns the inserted workout with
/// its generated id and creation timestamp.
pub async fn insert_workout<'e, E>(
    executor: E,
    program_id: i64,
    day_number: i64,
    name: &str,
    focus: Option<&str>,
) -> Result<Workout>
where
    E: Executor<'e, Database = Sqlite>,
{
    let workout = sqlx::query_as::<_, Workout>(
        "INSERT INTO workouts (program_id, day_number, name, focus, created_at) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING *",
    )
    .bind(program_id)
    .bind(day_number)
    .bind(name)
    .bind(focus)
    .bind(Utc::now())
    .fetch_one(executor)
    .await
    .with_context(|| format!("failed to insert workout for day {day_number}"))?;

    Ok(workout)
}

/// Fetch a single workout by ID.
pub async fn get_workout<'e, E>(executor: E, id: i64) -> Result<Option<Workout>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let workout = sqlx::query_as::<_, Workout>("SELECT * FROM workouts WHERE id = $1")
        .bind(id)
        .fetch_optional(executor)
        .await
        .context("failed to fetch workout")?;

    Ok(workout)
}

/// List all workouts of a program, ordered by day number.
pub async fn list_workouts_for_program<'e, E>(executor: E, program_id: i64) -> Result<Vec<Workout>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let workouts = sqlx::query_as::<_, Workout>(
        "SELECT * FROM workouts WHERE program_id = $1 ORDER BY day_number ASC, id ASC",
    )
    .bind(program_id)
    .fetch_all(executor)
    .await
    .context("failed to list workouts for program")?;

    Ok(workouts)
}

/// Count the workouts that remain in a program.
pub async fn count_workouts_for_program<'e, E>(executor: E, program_id: i64) -> Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM workouts WHERE program_id = $1")
        .bind(program_id)
        .fetch_one(executor)
        .await
        .context("failed to count workouts")?;

    Ok(row.0)
}

/// Delete a workout row. Its components go with it through
/// `ON DELETE CASCADE`.
///
/// Returns the number of rows removed (0 when the workout does not exist).
pub async fn delete_workout<'e, E>(executor: E, id: i64) -> Result<u64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM workouts WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await
        .context("failed to delete workout")?;

    Ok(result.rows_affected())
}
