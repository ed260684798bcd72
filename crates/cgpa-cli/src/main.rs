use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod report;

#[derive(Parser)]
#[command(name = "cgpa")]
#[command(about = "CGPA - keep academic records and track GPA/CGPA", long_about = None)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Data directory, overriding the configured one
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Act as this signed-in user instead of anonymously
    #[arg(long, global = true)]
    user: Option<String>,

    /// Keep everything in memory; nothing is read from or written to disk
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print all sessions, semesters and courses with the GPA summary
    Show,
    /// Append a session holding one semester
    AddSession,
    /// Rename a session
    RenameSession { session: String, name: String },
    /// Delete a session and its semesters (the last session is kept)
    DeleteSession { session: String },
    /// Append a semester to a session (at most three per session)
    AddSemester { session: String },
    /// Delete a semester (the last semester of a session is kept)
    DeleteSemester { session: String, semester: String },
    /// Append a course to a semester
    AddCourse {
        semester: String,
        #[command(flatten)]
        fields: commands::CourseFields,
    },
    /// Change a course, addressed by its 0-based position
    UpdateCourse {
        semester: String,
        index: usize,
        #[command(flatten)]
        fields: commands::CourseFields,
    },
    /// Delete a course, addressed by its 0-based position
    DeleteCourse { semester: String, index: usize },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = commands::load_config(cli.config.as_deref())
        .context("Failed to load configuration")?;
    init_tracing(&config.logging.level);

    let setup = commands::Setup {
        config,
        data_dir: cli.data_dir,
        user: cli.user,
        ephemeral: cli.ephemeral,
    };
    let model = commands::execute(&setup, cli.command.into_plan()).await?;
    report::print(&model);

    Ok(())
}

/// Installs a stderr subscriber; `RUST_LOG` overrides the configured level.
fn init_tracing(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

impl Commands {
    fn into_plan(self) -> commands::Plan {
        use commands::Plan;
        use cgpa_core::Mutation;

        match self {
            Commands::Show => Plan::Show,
            Commands::AddSession => Plan::Apply(vec![Mutation::AddSession]),
            Commands::RenameSession { session, name } => Plan::Apply(vec![Mutation::RenameSession {
                session_id: session,
                name,
            }]),
            Commands::DeleteSession { session } => Plan::Apply(vec![Mutation::DeleteSession {
                session_id: session,
            }]),
            Commands::AddSemester { session } => Plan::Apply(vec![Mutation::AddSemester {
                session_id: session,
            }]),
            Commands::DeleteSemester { session, semester } => {
                Plan::Apply(vec![Mutation::DeleteSemester {
                    session_id: session,
                    semester_id: semester,
                }])
            }
            Commands::AddCourse { semester, fields } => Plan::AddCourse {
                semester_id: semester,
                patch: fields.into_patch(),
            },
            Commands::UpdateCourse {
                semester,
                index,
                fields,
            } => Plan::Apply(vec![Mutation::UpdateCourse {
                semester_id: semester,
                index,
                patch: fields.into_patch(),
            }]),
            Commands::DeleteCourse { semester, index } => Plan::Apply(vec![Mutation::DeleteCourse {
                semester_id: semester,
                index,
            }]),
        }
    }
}
