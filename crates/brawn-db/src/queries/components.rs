//! Database query functions for the `workout_components` table.

use anyhow::{Context, Result};
use sqlx::types::Json;
use sqlx::{Executor, Sqlite};

use crate::models::{ComponentType, WorkoutComponent};

/// Insert a component row for a workout at the given position.
pub async fn insert_component<'e, E>(
    executor: E,
    workout_id: i64,
    component_type: ComponentType,
    order_index: i64,
    data: &serde_json::Value,
) -> Result<WorkoutComponent>
where
    E: Executor<'e, Database = Sqlite>,
{
    let component = sqlx::query_as::<_, WorkoutComponent>(
        "INSERT INTO workout_components (workout_id, component_type, order_index, data) \
         VALUES ($1, $2, $3, $4) \
         RETURNING *",
    )
    .bind(workout_id)
    .bind(component_type)
    .bind(order_index)
    .bind(Json(data))
    .fetch_one(executor)
    .await
    .with_context(|| {
        format!("failed to insert {component_type} component at position {order_index}")
    })?;

    Ok(component)
}

/// List the components of a workout in position order.
pub async fn list_components_for_workout<'e, E>(
    executor: E,
    workout_id: i64,
) -> Result<Vec<WorkoutComponent>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let components = sqlx::query_as::<_, WorkoutComponent>(
        "SELECT * FROM workout_components WHERE workout_id = $1 ORDER BY order_index ASC, id ASC",
    )
    .bind(workout_id)
    .fetch_all(executor)
    .await
    .context("failed to list components for workout")?;

    Ok(components)
}

/// Count every component stored for a program across all of its workouts.
pub async fn count_components_for_program<'e, E>(executor: E, program_id: i64) -> Result<i64>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM workout_components c \
         JOIN workouts w ON w.id = c.workout_id \
         WHERE w.program_id = $1",
    )
    .bind(program_id)
    .fetch_one(executor)
    .await
    .context("failed to count components for program")?;

    Ok(row.0)
}
