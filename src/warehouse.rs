//! A warehouse is the directory holding a user's data, templates, static
//! assets and recipes.

use crate::error::{YucaError, YucaResult};
use crate::generator::copy_tree;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

pub const DATA_DIR: &str = "data";
pub const TEMPLATES_DIR: &str = "templates";
pub const STATIC_DIR: &str = "static";
pub const RECIPES_DIR: &str = "recipes";

/// Recipe a template may ship for users to start from.
pub const BASE_RECIPE_FILE: &str = "base-recipe.yml";

const RECIPE_EXTENSION: &str = "yml";

const EXAMPLE_USER_DATA: &str = r#"lang: en
name: Jane Doe
title: Research Engineer
contact:
  email: jane.doe@example.com
  website: https://example.com
projects:
  - title: First project
    description: A short description of the first project.
  - title: Second project
    description: A short description of the second project.
"#;

/// Layout of a warehouse rooted at a directory.
#[derive(Debug, Clone)]
pub struct Warehouse {
    root: PathBuf,
}

impl Warehouse {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Creates the warehouse directories and an example data file.
    ///
    /// An existing `data/en.yml` is kept as is.
    pub fn init<P: Into<PathBuf>>(root: P) -> YucaResult<Self> {
        let warehouse = Self::new(root);
        for dir in [DATA_DIR, TEMPLATES_DIR, STATIC_DIR, RECIPES_DIR] {
            fs::create_dir_all(warehouse.root.join(dir))?;
        }

        let example = warehouse.data_file("en.yml");
        if !example.exists() {
            fs::write(&example, EXAMPLE_USER_DATA)?;
        }
        info!("Warehouse initialized at {}", warehouse.root.display());
        Ok(warehouse)
    }

    pub fn template_dir(&self, name: &str) -> PathBuf {
        self.root.join(TEMPLATES_DIR).join(name)
    }

    pub fn data_file(&self, name: &str) -> PathBuf {
        self.root.join(DATA_DIR).join(name)
    }

    pub fn static_dir(&self) -> PathBuf {
        self.root.join(STATIC_DIR)
    }

    pub fn recipes_dir(&self) -> PathBuf {
        self.root.join(RECIPES_DIR)
    }

    /// Finds a recipe by path, or by file stem inside `recipes/`.
    pub fn resolve_recipe(&self, reference: &str) -> YucaResult<Option<PathBuf>> {
        let path = Path::new(reference);
        if path.exists() {
            return Ok(Some(path.to_path_buf()));
        }

        let recipes_dir = self.recipes_dir();
        if !recipes_dir.is_dir() {
            return Ok(None);
        }

        let mut candidates = fs::read_dir(&recipes_dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        candidates.sort();

        Ok(candidates.into_iter().find(|candidate| {
            candidate.extension().and_then(|e| e.to_str()) == Some(RECIPE_EXTENSION)
                && candidate.file_stem().and_then(|s| s.to_str()) == Some(reference)
        }))
    }

    /// Copies a local template directory into `templates/`.
    ///
    /// # Arguments
    /// * `location` - Local template directory
    /// * `name` - Name inside the warehouse, defaults to the location's stem
    /// * `force` - Replace a template that already has this name
    /// * `base_recipe` - Copy the template's base recipe to `recipes/` under this name
    ///
    /// # Returns
    /// * `YucaResult<PathBuf>` - Path of the installed template
    pub fn add_template(
        &self,
        location: &str,
        name: Option<&str>,
        force: bool,
        base_recipe: Option<&str>,
    ) -> YucaResult<PathBuf> {
        let source = Path::new(location);
        if !source.is_dir() {
            return Err(YucaError::ConfigError(format!(
                "Unsupported template location '{location}': only local directories can be added"
            )));
        }

        let name = match name {
            Some(name) => name.to_string(),
            None => source
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string)
                .ok_or_else(|| {
                    YucaError::ConfigError(format!("Cannot derive a template name from '{location}'"))
                })?,
        };

        let target = self.template_dir(&name);
        if target.exists() {
            if !force {
                return Err(YucaError::ConfigError(format!(
                    "Template '{name}' already exists in the warehouse"
                )));
            }
            debug!("Removing existing template {}", target.display());
            fs::remove_dir_all(&target)?;
        }

        copy_tree(source, &target)?;
        info!("Template '{name}' added to the warehouse");

        if let Some(recipe_name) = base_recipe {
            self.copy_base_recipe(&target, recipe_name)?;
        }
        Ok(target)
    }

    fn copy_base_recipe(&self, template_dir: &Path, recipe_name: &str) -> YucaResult<()> {
        let base_recipe = template_dir.join(BASE_RECIPE_FILE);
        if !base_recipe.exists() {
            debug!("Template has no {BASE_RECIPE_FILE}");
            return Ok(());
        }

        let file_name = if recipe_name.ends_with(".yml") {
            recipe_name.to_string()
        } else {
            format!("{recipe_name}.{RECIPE_EXTENSION}")
        };
        fs::create_dir_all(self.recipes_dir())?;
        fs::copy(&base_recipe, self.recipes_dir().join(file_name))?;
        Ok(())
    }
}
