use anyhow::Result;
use clap::{Parser, Subcommand};

use coursetrail::cli::{
    handle_audit_command, handle_offering_command, handle_program_command, handle_user_command,
    resolve_actor, AuditCommands, OfferingCommands, ProgramCommands, UserCommands,
};
use coursetrail::config::{CoursetrailPaths, Settings};
use coursetrail::storage::Storage;

#[derive(Parser)]
#[command(
    name = "coursetrail",
    version,
    about = "Course offering identifiers and audit trail",
    long_about = "coursetrail assigns each course offering a permanent 11-character \
                  identifier and records an audit trail of every change made to it."
)]
struct Cli {
    /// User performing the change (name or ID); defaults to the system actor
    #[arg(long, global = true, env = "COURSETRAIL_ACTOR")]
    actor: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Program management commands
    #[command(subcommand)]
    Program(ProgramCommands),

    /// User management commands
    #[command(subcommand)]
    User(UserCommands),

    /// Offering management commands
    #[command(subcommand, alias = "off")]
    Offering(OfferingCommands),

    /// Audit trail commands
    #[command(subcommand)]
    Audit(AuditCommands),

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = CoursetrailPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    coursetrail::logging::init(&settings.log_filter);

    // Initialize storage
    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Program(cmd)) => {
            handle_program_command(&storage, cmd)?;
        }
        Some(Commands::User(cmd)) => {
            handle_user_command(&storage, cmd)?;
        }
        Some(Commands::Offering(cmd)) => {
            let actor = resolve_actor(&storage, cli.actor.as_deref())?;
            handle_offering_command(&storage, &settings, actor, cmd).await?;
        }
        Some(Commands::Audit(cmd)) => {
            handle_audit_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Init) => {
            println!("Initializing coursetrail at: {}", paths.base_dir().display());
            settings.save(&paths)?;
            storage.save_all()?;
            println!("Initialization complete!");
            println!();
            println!("Next steps:");
            println!("  coursetrail program add \"Professional Makeup Artistry\"");
            println!("  coursetrail user add Alina Santiago");
            println!("  coursetrail offering create \"Makeup Artistry\" --start 2025-01-11 ...");
        }
        Some(Commands::Config) => {
            println!("coursetrail Configuration");
            println!("=========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Lookup timeout: {} ms", settings.lookup_timeout_ms);
            println!("  Audit order:    {:?}", settings.audit_order);
            println!("  Log filter:     {}", settings.log_filter);
        }
        None => {
            println!("coursetrail - course offering identifiers and audit trail");
            println!();
            println!("Run 'coursetrail --help' for usage information.");
        }
    }

    Ok(())
}
