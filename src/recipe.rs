//! Recipes tie a template, a user data file and a generation config together.

use crate::commands::{confirm_commands_execution, run_commands, ShellCommands};
use crate::config::{load_yaml_value, GenConfig};
use crate::error::{YucaError, YucaResult};
use crate::generator::{GenerationReport, Generator};
use crate::renderer::TemplateRenderer;
use crate::warehouse::Warehouse;
use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct Recipe {
    /// Template name inside the warehouse
    pub template: String,

    /// Data file name inside the warehouse's `data/`
    pub user_data: String,

    #[serde(default)]
    pub gen_config: Option<GenConfig>,

    #[serde(default)]
    pub pre_cook: ShellCommands,

    #[serde(default)]
    pub post_cook: ShellCommands,
}

impl Recipe {
    pub fn parse(content: &str) -> YucaResult<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| YucaError::ConfigError(format!("Invalid recipe: {e}")))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> YucaResult<Self> {
        Self::parse(&fs::read_to_string(path.as_ref())?)
    }
}

/// Options of the cook command.
#[derive(Debug, Default)]
pub struct CookOptions {
    pub output: Option<PathBuf>,
    pub skip_commands_check: bool,
}

fn default_output(recipe_path: &Path) -> PathBuf {
    let stem = recipe_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("recipe");
    PathBuf::from(format!("{stem}-cooked"))
}

/// Generates the output of a recipe.
///
/// # Flow
/// 1. Resolves the recipe and its template inside the warehouse
/// 2. Runs the pre-cook commands in the current directory
/// 3. Loads the user data and generates the output directory
/// 4. Runs the post-cook commands inside the output directory
pub fn cook(
    warehouse: &Warehouse,
    recipe_ref: &str,
    options: &CookOptions,
    renderer: &dyn TemplateRenderer,
) -> YucaResult<GenerationReport> {
    let recipe_path = warehouse.resolve_recipe(recipe_ref)?.ok_or_else(|| {
        YucaError::ConfigError(format!(
            "Invalid recipe '{recipe_ref}', nothing found in {}",
            warehouse.recipes_dir().display()
        ))
    })?;
    let recipe = Recipe::load(&recipe_path)?;

    let template_dir = warehouse.template_dir(&recipe.template);
    if !template_dir.exists() {
        return Err(YucaError::ConfigError(format!(
            "There is no '{}' template in the warehouse",
            recipe.template
        )));
    }

    let output = options
        .output
        .clone()
        .unwrap_or_else(|| default_output(&recipe_path));
    fs::create_dir_all(&output)?;

    let has_commands = !recipe.pre_cook.is_empty() || !recipe.post_cook.is_empty();
    let run_recipe_commands = has_commands
        && confirm_commands_execution(options.skip_commands_check, io::stdin().is_terminal())?;
    if has_commands && !run_recipe_commands {
        warn!("Skipping recipe commands");
    }

    if run_recipe_commands {
        run_commands(&recipe.pre_cook, std::env::current_dir()?)?;
    }

    let user_data = load_yaml_value(warehouse.data_file(&recipe.user_data))?;
    let mut gen_config = recipe.gen_config.unwrap_or_default();
    gen_config.static_dir = Some(warehouse.static_dir());

    let report = Generator::new(renderer, &template_dir, &output).run(&gen_config, user_data)?;

    if run_recipe_commands {
        run_commands(&recipe.post_cook, &output)?;
    }

    info!("Recipe cooked into {}", output.display());
    Ok(report)
}
