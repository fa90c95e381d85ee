use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dashboard_server::config::DEFAULT_DB_PATH;
use dashboard_server::db::repositories::{AnalyticsRepository, FollowerRepository};
use dashboard_server::db::Database;

/// Social Dashboard Admin Utility
///
/// Maintenance commands that run directly against the SQLite store. Follower
/// edges have no HTTP route, so seeding them happens here.
#[derive(Parser, Debug)]
#[command(name = "dashboard-admin")]
#[command(about = "Maintain and seed the social dashboard database", long_about = None)]
struct Args {
    /// Path to the SQLite database file
    #[arg(short, long, env = "SQLITE_DB", default_value = DEFAULT_DB_PATH)]
    database: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the schema if it does not exist yet
    Init,
    /// Record that one user follows another
    Follow {
        /// The user being followed
        #[arg(long)]
        user_id: i64,
        /// The user doing the following
        #[arg(long)]
        follower_id: i64,
    },
    /// Print platform-wide totals as JSON
    Stats,
}

/// Open the store and make sure the schema is in place
fn connect_database(path: &str) -> Result<Database> {
    let db = Database::new(path).with_context(|| format!("Failed to open database {}", path))?;
    db.initialize()
        .context("Failed to initialize database schema")?;
    Ok(db)
}

/// Execute one command and return the text to print
fn run(db: &Database, command: &Command) -> Result<String> {
    match command {
        Command::Init => Ok("Schema ready".to_string()),
        Command::Follow {
            user_id,
            follower_id,
        } => {
            let repo = FollowerRepository::new(db.pool.clone());
            let edge = repo
                .follow(*user_id, *follower_id)
                .with_context(|| format!("Failed to add follower {} to user {}", follower_id, user_id))?;
            let count = repo.follower_count(*user_id)?;
            Ok(format!(
                "User {} now follows user {} (edge {}, {} follower(s) total)",
                edge.follower_id, edge.user_id, edge.id, count
            ))
        }
        Command::Stats => {
            let totals = AnalyticsRepository::new(db.pool.clone()).platform_analytics()?;
            serde_json::to_string_pretty(&totals).context("Failed to serialize platform totals")
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let db = connect_database(&args.database)?;
    let output = run(&db, &args.command)?;
    println!("{}", output);

    Ok(())
}
