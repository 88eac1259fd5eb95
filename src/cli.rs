//! Command-line interface implementation for yuca.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments structure for yuca.
#[derive(Parser, Debug)]
#[command(author, version, about = "yuca: generate documents from templates and your data", long_about = None)]
pub struct Args {
    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Warehouse directory holding data, templates, static files and recipes
    #[arg(short, long, global = true, value_name = "DIR", default_value = ".")]
    pub warehouse: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the output of a recipe
    Cook {
        /// Recipe file path or recipe name inside the warehouse
        #[arg(value_name = "RECIPE")]
        recipe: String,

        /// Output directory, defaults to ./<recipe>-cooked
        #[arg(short, long, value_name = "OUTPUT_DIR")]
        output: Option<PathBuf>,

        /// Skip confirmation prompts when running pre/post cook commands.
        #[arg(long)]
        skip_commands_check: bool,
    },

    /// Manage warehouses
    Warehouse {
        #[command(subcommand)]
        command: WarehouseCommands,
    },

    /// Manage templates of the warehouse
    Template {
        #[command(subcommand)]
        command: TemplateCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum WarehouseCommands {
    /// Create a new warehouse
    Init {
        /// Directory of the new warehouse
        #[arg(value_name = "PATH", default_value = ".")]
        path: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub enum TemplateCommands {
    /// Add a template from a local directory
    Get {
        /// Template location
        #[arg(value_name = "LOCATION")]
        location: String,

        /// Name of the template in the warehouse, deduced from the location if omitted
        #[arg(long)]
        name: Option<String>,

        /// Copy the template's base recipe to the warehouse recipes under this name
        #[arg(long, value_name = "RECIPE")]
        base_recipe: Option<String>,

        /// Replace the template if it already exists
        #[arg(short, long)]
        force: bool,
    },
}

/// Parses command line arguments and returns the Args structure.
///
/// # Returns
/// * `Args` - Parsed command line arguments
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if matches!(
                e.kind(),
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                // Nothing sensible to do if stdout is gone.
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
