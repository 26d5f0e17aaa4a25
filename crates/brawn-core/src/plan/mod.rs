//! Plan management: request parsing, weekly assembly, storage.

pub mod assemble;
pub mod parser;
pub mod request;
pub mod service;

pub use assemble::{
    DEFAULT_PARTY_SIZE, GenerateError, PlanGoals, WeeklyPlan, WorkoutSession,
    generate_weekly_plan, generate_weekly_plan_with,
};
pub use parser::{
    ParsedRequest, RequestDefaults, RequestParseError, parse_request_toml,
    parse_request_toml_with,
};
pub use request::{GoalsToml, PlanRequest, ProgramMeta};
pub use service::{
    ProgramDetail, WorkoutDetail, delete_program, delete_workout, get_latest_program,
    get_program_detail, save_weekly_plan,
};
