//! CLI handlers for `brawn plan` and `brawn workout` subcommands.
//!
//! Implements:
//! - `brawn plan generate <file>`      -- generate a week from a request TOML
//! - `brawn plan show [program-id]`    -- show a stored program (latest by default)
//! - `brawn plan delete <program-id>`  -- delete a stored program
//! - `brawn workout delete <id>`       -- delete one stored workout

use std::fmt;

use anyhow::{Context, Result, bail};
use sqlx::SqlitePool;
use tracing::info;

use brawn_core::plan::{
    ProgramDetail, WeeklyPlan, delete_program, delete_workout, generate_weekly_plan,
    get_latest_program, get_program_detail, parse_request_toml_with, save_weekly_plan,
};
use brawn_core::prescription::rep_range;
use brawn_db::models::ComponentType;

use crate::config::BrawnConfig;
use crate::{PlanCommands, WorkoutCommands, open_pool};

// -----------------------------------------------------------------------
// Public entry points
// -----------------------------------------------------------------------

/// Dispatch a `PlanCommands` variant to the appropriate handler.
pub async fn run_plan_command(command: PlanCommands, config: &BrawnConfig) -> Result<()> {
    match command {
        PlanCommands::Generate { file, save, json } => {
            cmd_generate(config, &file, save, json).await
        }
        PlanCommands::Show { program_id, json } => {
            let pool = open_pool(config).await?;
            let result = cmd_show(&pool, program_id, json).await;
            pool.close().await;
            result
        }
        PlanCommands::Delete { program_id } => {
            let pool = open_pool(config).await?;
            let result = cmd_delete_program(&pool, program_id).await;
            pool.close().await;
            result
        }
    }
}

/// Dispatch a `WorkoutCommands` variant to the appropriate handler.
pub async fn run_workout_command(command: WorkoutCommands, pool: &SqlitePool) -> Result<()> {
    match command {
        WorkoutCommands::Delete { workout_id } => {
            if !delete_workout(pool, workout_id).await? {
                bail!("workout {workout_id} not found");
            }
            println!("Workout {workout_id} deleted.");
            Ok(())
        }
    }
}

// -----------------------------------------------------------------------
// brawn plan generate <file>
// -----------------------------------------------------------------------

/// Read a request file, generate the week, optionally store it, and print it.
async fn cmd_generate(
    config: &BrawnConfig,
    file_path: &str,
    save: bool,
    json: bool,
) -> Result<()> {
    // 1. Read the file.
    let content = std::fs::read_to_string(file_path)
        .with_context(|| format!("failed to read request file: {file_path}"))?;

    // 2. Parse and validate, filling gaps from the configured defaults.
    let request = parse_request_toml_with(&content, &config.request_defaults)
        .with_context(|| format!("failed to parse request file: {file_path}"))?;

    // 3. Generate.
    let plan = generate_weekly_plan(&request.goals)
        .with_context(|| format!("failed to generate plan for {}", request.program.name))?;
    info!(file = file_path, days = plan.days.len(), "generated weekly plan");

    // 4. Store when asked.
    let program_id = if save {
        let pool = open_pool(config).await?;
        let result = save_weekly_plan(
            &pool,
            &request.program.name,
            request.program.description.as_deref(),
            &plan,
        )
        .await;
        pool.close().await;
        Some(result?.id)
    } else {
        None
    };

    // 5. Print.
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&plan).context("failed to serialize plan")?
        );
    } else {
        print!(
            "{}",
            PlanSummary {
                name: &request.program.name,
                plan: &plan,
            }
        );
    }
    if let Some(id) = program_id {
        eprintln!("Saved as program {id}.");
    }

    Ok(())
}

/// Plain-text summary of a generated week.
pub struct PlanSummary<'a> {
    pub name: &'a str,
    pub plan: &'a WeeklyPlan,
}

impl fmt::Display for PlanSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plan = self.plan;
        writeln!(f, "Program: {}", self.name)?;
        writeln!(f, "  Strength focus: {}", plan.strength_focus)?;
        writeln!(f, "  Intensity:      {}", plan.intensity())?;
        writeln!(f, "  Days:           {}", plan.days.len())?;

        for day in &plan.days {
            writeln!(f)?;
            writeln!(f, "Day {} ({})", day.day, day.focus_label())?;

            if !day.warmup.is_empty() {
                writeln!(f, "  Warmup: {} movements", day.warmup.len())?;
            }
            if !day.primary_lifts.is_empty() {
                let lifts: Vec<String> =
                    day.primary_lifts.iter().map(ToString::to_string).collect();
                writeln!(f, "  Primary lifts: {}", lifts.join(", "))?;
            }

            for (i, circuit) in day.circuits.iter().enumerate() {
                writeln!(
                    f,
                    "  Circuit {} ({} rounds, {}s on / {}s off, {}s between rounds)",
                    i + 1,
                    circuit.rounds,
                    circuit.work_seconds,
                    circuit.rest_seconds,
                    circuit.rest_between_rounds,
                )?;
                for exercise in &circuit.exercises {
                    let reps = rep_range(plan.strength_focus, exercise.difficulty);
                    writeln!(
                        f,
                        "    - {} [{}] {} reps",
                        exercise.name, exercise.category, reps
                    )?;
                }
            }

            if let Some(cardio) = &day.cardio {
                writeln!(f, "  Cardio: {} ({} min)", cardio.label, cardio.duration_minutes)?;
            }
            writeln!(f, "  Cooldown: {} stretches", day.cooldown.len())?;
        }

        Ok(())
    }
}

// -----------------------------------------------------------------------
// brawn plan show [program-id]
// -----------------------------------------------------------------------

async fn cmd_show(pool: &SqlitePool, program_id: Option<i64>, json: bool) -> Result<()> {
    let detail = match program_id {
        Some(id) => get_program_detail(pool, id).await?,
        None => get_latest_program(pool).await?,
    };

    let Some(detail) = detail else {
        match program_id {
            Some(id) => bail!("program {id} not found"),
            None => {
                println!(
                    "No programs found. Use `brawn plan generate <file> --save` to create one."
                );
                return Ok(());
            }
        }
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&detail).context("failed to serialize program")?
        );
    } else {
        print!("{}", ProgramSummary(&detail));
    }
    Ok(())
}

/// Plain-text summary of a stored program.
pub struct ProgramSummary<'a>(pub &'a ProgramDetail);

impl fmt::Display for ProgramSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let detail = self.0;
        let program = &detail.program;
        writeln!(f, "Program: {}", program.name)?;
        writeln!(f, "  ID:       {}", program.id)?;
        if let Some(description) = &program.description {
            writeln!(f, "  About:    {description}")?;
        }
        writeln!(
            f,
            "  Created:  {}",
            program.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(f, "  Workouts: {}", detail.workouts.len())?;

        for stored in &detail.workouts {
            let workout = &stored.workout;
            writeln!(f)?;
            writeln!(
                f,
                "[{}] {} ({})",
                workout.id,
                workout.name,
                workout.focus.as_deref().unwrap_or("-")
            )?;
            for component in &stored.components {
                writeln!(
                    f,
                    "  {:>3}  {:<8}  {}",
                    component.order_index,
                    component.component_type,
                    component_summary(component.component_type, &component.data.0)
                )?;
            }
        }

        Ok(())
    }
}

/// One-line description of a stored component payload.
fn component_summary(component_type: ComponentType, data: &serde_json::Value) -> String {
    match component_type {
        ComponentType::Warmup | ComponentType::Cooldown => {
            format!("{} items", data.as_array().map_or(0, Vec::len))
        }
        ComponentType::Circuit => {
            let names: Vec<&str> = data["exercises"]
                .as_array()
                .map(|exercises| {
                    exercises
                        .iter()
                        .filter_map(|e| e["name"].as_str())
                        .collect()
                })
                .unwrap_or_default();
            names.join(", ")
        }
        ComponentType::Cardio => format!(
            "{} ({} min)",
            data["label"].as_str().unwrap_or("cardio"),
            data["duration_minutes"].as_u64().unwrap_or_default()
        ),
    }
}

// -----------------------------------------------------------------------
// brawn plan delete <program-id>
// -----------------------------------------------------------------------

async fn cmd_delete_program(pool: &SqlitePool, program_id: i64) -> Result<()> {
    if !delete_program(pool, program_id).await? {
        bail!("program {program_id} not found");
    }
    println!("Program {program_id} deleted.");
    Ok(())
}
