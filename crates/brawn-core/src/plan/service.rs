//! Plan service layer.
//!
//! Stores a generated [`WeeklyPlan`] as a program row, one workout row per
//! day, and ordered component rows, all within a single database
//! transaction. Also reads the latest program back and deletes workouts and
//! programs.

use anyhow::{Context, Result};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::info;

use brawn_db::models::{ComponentType, Program, Workout, WorkoutComponent};
use brawn_db::queries::{components, programs, workouts};

use super::assemble::{WeeklyPlan, WorkoutSession};

/// Position of the warmup within a workout.
pub const WARMUP_POSITION: i64 = 0;
/// Position of the first circuit; later circuits follow consecutively.
pub const FIRST_CIRCUIT_POSITION: i64 = 1;
pub const CARDIO_POSITION: i64 = 99;
pub const COOLDOWN_POSITION: i64 = 100;

/// A stored program with its workouts and their components.
#[derive(Debug, Clone, Serialize)]
pub struct ProgramDetail {
    pub program: Program,
    pub workouts: Vec<WorkoutDetail>,
}

/// A stored workout with its components in position order.
#[derive(Debug, Clone, Serialize)]
pub struct WorkoutDetail {
    pub workout: Workout,
    pub components: Vec<WorkoutComponent>,
}

/// The component rows a day is stored as: `(type, position, payload)`.
fn session_components(
    session: &WorkoutSession,
) -> Result<Vec<(ComponentType, i64, serde_json::Value)>> {
    let mut rows = Vec::new();

    if !session.warmup.is_empty() {
        rows.push((
            ComponentType::Warmup,
            WARMUP_POSITION,
            serde_json::to_value(&session.warmup).context("failed to encode warmup")?,
        ));
    }

    for (circuit, position) in session.circuits.iter().zip(FIRST_CIRCUIT_POSITION..) {
        rows.push((
            ComponentType::Circuit,
            position,
            serde_json::to_value(circuit)
                .with_context(|| format!("failed to encode circuit {position}"))?,
        ));
    }

    if let Some(cardio) = &session.cardio {
        rows.push((
            ComponentType::Cardio,
            CARDIO_POSITION,
            serde_json::to_value(cardio).context("failed to encode cardio session")?,
        ));
    }

    if !session.cooldown.is_empty() {
        rows.push((
            ComponentType::Cooldown,
            COOLDOWN_POSITION,
            serde_json::to_value(&session.cooldown).context("failed to encode cooldown")?,
        ));
    }

    Ok(rows)
}

/// Store a generated week as a new program.
///
/// Inserts the program row, one workout per day, and each day's components
/// inside a single transaction. If any step fails, nothing is stored.
pub async fn save_weekly_plan(
    pool: &SqlitePool,
    name: &str,
    description: Option<&str>,
    plan: &WeeklyPlan,
) -> Result<Program> {
    let mut tx = pool.begin().await.context("failed to begin transaction")?;

    // 1. Insert the program row.
    let program = programs::insert_program(&mut *tx, name, description).await?;

    // 2. Insert each day and its components.
    for session in &plan.days {
        let focus = session.focus_label();
        let workout = workouts::insert_workout(
            &mut *tx,
            program.id,
            i64::from(session.day),
            &format!("Day {}", session.day),
            Some(focus.as_str()),
        )
        .await?;

        for (component_type, position, data) in session_components(session)? {
            components::insert_component(&mut *tx, workout.id, component_type, position, &data)
                .await?;
        }
    }

    tx.commit().await.context("failed to commit transaction")?;

    info!(
        program_id = program.id,
        name,
        days = plan.days.len(),
        "saved weekly plan"
    );
    Ok(program)
}

/// Fetch a program with its workouts and components.
pub async fn get_program_detail(
    pool: &SqlitePool,
    program_id: i64,
) -> Result<Option<ProgramDetail>> {
    let Some(program) = programs::get_program(pool, program_id).await? else {
        return Ok(None);
    };
    load_detail(pool, program).await.map(Some)
}

/// Fetch the most recently created program, if any.
pub async fn get_latest_program(pool: &SqlitePool) -> Result<Option<ProgramDetail>> {
    let Some(program) = programs::latest_program(pool).await? else {
        return Ok(None);
    };
    load_detail(pool, program).await.map(Some)
}

async fn load_detail(pool: &SqlitePool, program: Program) -> Result<ProgramDetail> {
    let mut details = Vec::new();
    for workout in workouts::list_workouts_for_program(pool, program.id).await? {
        let components = components::list_components_for_workout(pool, workout.id)
            .await
            .with_context(|| format!("failed to load components of workout {}", workout.id))?;
        details.push(WorkoutDetail {
            workout,
            components,
        });
    }
    Ok(ProgramDetail {
        program,
        workouts: details,
    })
}

/// Delete one workout and its components.
///
/// Deleting a program's last workout deletes the program too. Returns
/// `false` when the workout does not exist.
pub async fn delete_workout(pool: &SqlitePool, workout_id: i64) -> Result<bool> {
    let mut tx = pool.begin().await.context("failed to begin transaction")?;

    let Some(workout) = workouts::get_workout(&mut *tx, workout_id).await? else {
        return Ok(false);
    };

    workouts::delete_workout(&mut *tx, workout_id).await?;

    let remaining = workouts::count_workouts_for_program(&mut *tx, workout.program_id).await?;
    if remaining == 0 {
        programs::delete_program(&mut *tx, workout.program_id).await?;
    }

    tx.commit().await.context("failed to commit transaction")?;

    info!(
        workout_id,
        program_id = workout.program_id,
        program_deleted = remaining == 0,
        "deleted workout"
    );
    Ok(true)
}

/// Delete a program with all its workouts and components.
///
/// Returns `false` when the program does not exist.
pub async fn delete_program(pool: &SqlitePool, program_id: i64) -> Result<bool> {
    let removed = programs::delete_program(pool, program_id).await?;
    if removed > 0 {
        info!(program_id, "deleted program");
    }
    Ok(removed > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{PlanGoals, generate_weekly_plan};
    use crate::schedule::WeeklyFocus;

    #[test]
    fn component_positions_follow_layout() {
        let plan = generate_weekly_plan(&PlanGoals::new(3, WeeklyFocus::Strength)).unwrap();
        let rows = session_components(&plan.days[0]).unwrap();
        let layout: Vec<(ComponentType, i64)> = rows.iter().map(|(t, p, _)| (*t, *p)).collect();
        assert_eq!(
            layout,
            vec![
                (ComponentType::Warmup, 0),
                (ComponentType::Circuit, 1),
                (ComponentType::Circuit, 2),
                (ComponentType::Circuit, 3),
                (ComponentType::Cardio, 99),
                (ComponentType::Cooldown, 100),
            ]
        );
    }

    #[test]
    fn cardio_only_day_skips_warmup_and_circuits() {
        let plan = generate_weekly_plan(&PlanGoals::new(5, WeeklyFocus::Cardio)).unwrap();
        let rows = session_components(&plan.days[1]).unwrap();
        let types: Vec<ComponentType> = rows.iter().map(|(t, _, _)| *t).collect();
        assert_eq!(types, vec![ComponentType::Cardio, ComponentType::Cooldown]);
    }
}
