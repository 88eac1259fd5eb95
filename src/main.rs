//! yuca's main application entry point.
//! Parses the command line and dispatches to the warehouse, template and
//! cook commands.

use yuca::{
    cli::{get_args, Args, Commands, TemplateCommands, WarehouseCommands},
    error::{default_error_handler, YucaResult},
    logger::init_logger,
    recipe::{cook, CookOptions},
    renderer::MiniJinjaRenderer,
    warehouse::Warehouse,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn run(args: Args) -> YucaResult<()> {
    let warehouse = Warehouse::new(args.warehouse);

    match args.command {
        Commands::Cook {
            recipe,
            output,
            skip_commands_check,
        } => {
            let renderer = MiniJinjaRenderer::new()?;
            let options = CookOptions {
                output,
                skip_commands_check,
            };
            let report = cook(&warehouse, &recipe, &options, &renderer)?;
            if !report.missing.is_empty() {
                log::warn!(
                    "{} declared template file(s) were missing",
                    report.missing.len()
                );
            }
        }
        Commands::Warehouse {
            command: WarehouseCommands::Init { path },
        } => {
            Warehouse::init(path)?;
        }
        Commands::Template {
            command:
                TemplateCommands::Get {
                    location,
                    name,
                    base_recipe,
                    force,
                },
        } => {
            let target = warehouse.add_template(
                &location,
                name.as_deref(),
                force,
                base_recipe.as_deref(),
            )?;
            println!("Template installed: '{}'", target.display());
        }
    }

    Ok(())
}
