//! Program and user CLI commands

use clap::Subcommand;

use crate::error::CoursetrailResult;
use crate::services::DirectoryService;
use crate::storage::Storage;

/// Program subcommands
#[derive(Subcommand)]
pub enum ProgramCommands {
    /// Add a program
    Add {
        /// Full program name (e.g., "Professional Makeup Artistry")
        name: String,
    },
    /// List all programs
    List,
}

/// User subcommands
#[derive(Subcommand)]
pub enum UserCommands {
    /// Add a user
    Add {
        /// First name
        first_name: String,
        /// Last name
        #[arg(default_value = "")]
        last_name: String,
    },
    /// List all users
    List,
}

/// Handle a program command
pub fn handle_program_command(storage: &Storage, cmd: ProgramCommands) -> CoursetrailResult<()> {
    let service = DirectoryService::new(storage);

    match cmd {
        ProgramCommands::Add { name } => {
            let program = service.add_program(&name)?;
            println!("Added program: {}", program.name);
            println!("  ID: {}", program.id);
        }
        ProgramCommands::List => {
            let programs = service.list_programs()?;
            if programs.is_empty() {
                println!("No programs found.");
            }
            for program in programs {
                println!("{:<12}  {}", program.id.to_string(), program.name);
            }
        }
    }

    Ok(())
}

/// Handle a user command
pub fn handle_user_command(storage: &Storage, cmd: UserCommands) -> CoursetrailResult<()> {
    let service = DirectoryService::new(storage);

    match cmd {
        UserCommands::Add {
            first_name,
            last_name,
        } => {
            let user = service.add_user(&first_name, &last_name)?;
            println!("Added user: {}", user.display_name());
            println!("  ID: {}", user.id);
        }
        UserCommands::List => {
            let users = service.list_users()?;
            if users.is_empty() {
                println!("No users found.");
            }
            for user in users {
                println!("{:<12}  {}", user.id.to_string(), user.display_name());
            }
        }
    }

    Ok(())
}
