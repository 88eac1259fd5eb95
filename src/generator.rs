//! Generation of an output directory from a template bundle and user data.

use crate::assets::select_assets;
use crate::config::{GenConfig, TemplateDescriptor};
use crate::error::{YucaError, YucaResult};
use crate::escape::escape_context;
use crate::navigator::kind_of;
use crate::renderer::{fill_template_file, TemplateRenderer};
use crate::transform::apply_user_settings;
use log::{debug, error};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Progress of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Scaffolded,
    AssetsApplied,
    ContextTransformed,
    SettingsMerged,
    LocaleResolved,
    Rendering,
    Done,
}

/// Files rendered and files missing, in the order the descriptor lists them.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub rendered: Vec<PathBuf>,
    pub missing: Vec<PathBuf>,
}

/// Copies the tree under `source` into `dest`, overwriting files with the
/// same relative path and leaving every other file in `dest` alone.
///
/// Symbolic links are followed and their targets copied; a link cycle is an
/// error.
pub fn copy_tree<P: AsRef<Path>, Q: AsRef<Path>>(source: P, dest: Q) -> YucaResult<()> {
    let (source, dest) = (source.as_ref(), dest.as_ref());
    for entry in WalkDir::new(source).follow_links(true) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| YucaError::ConfigError(e.to_string()))?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Stores `default_settings` overlaid with `user_settings` under
/// `context.settings`. The overlay is shallow.
pub fn merge_settings(
    context: &mut Map<String, Value>,
    default_settings: &Map<String, Value>,
    user_settings: &Map<String, Value>,
) {
    let mut settings = default_settings.clone();
    settings.extend(user_settings.iter().map(|(k, v)| (k.clone(), v.clone())));
    context.insert("settings".to_string(), Value::Object(settings));
}

/// Stores the locale bundle for `context.lang` under `context.intl`.
///
/// An unknown or missing language yields `null`.
pub fn resolve_locale(context: &mut Map<String, Value>, intl: &Map<String, Value>) {
    let bundle = context
        .get("lang")
        .and_then(Value::as_str)
        .and_then(|lang| intl.get(lang))
        .cloned();

    if bundle.is_none() {
        debug!("No locale bundle for lang {:?}", context.get("lang"));
    }
    context.insert("intl".to_string(), bundle.unwrap_or(Value::Null));
}

/// Drives a generation run into one output directory.
pub struct Generator<'a> {
    renderer: &'a dyn TemplateRenderer,
    template_root: &'a Path,
    output_root: &'a Path,
}

impl<'a> Generator<'a> {
    pub fn new(
        renderer: &'a dyn TemplateRenderer,
        template_root: &'a Path,
        output_root: &'a Path,
    ) -> Self {
        Self {
            renderer,
            template_root,
            output_root,
        }
    }

    fn enter(&self, stage: Stage) {
        debug!("Generation stage: {stage:?}");
    }

    /// Loads the template's descriptor and generates the output directory.
    pub fn run(&self, config: &GenConfig, user_data: Value) -> YucaResult<GenerationReport> {
        let descriptor = TemplateDescriptor::load(self.template_root)?;
        self.generate(&descriptor, config, user_data)
    }

    /// Generates the output directory.
    ///
    /// # Flow
    /// 1. Copies the template tree into the output directory
    /// 2. Replaces overridable assets with the user's files
    /// 3. Applies overrides, then filters
    /// 4. Escapes string leaves if the descriptor names a known format
    /// 5. Merges settings into `context.settings`
    /// 6. Selects the locale bundle into `context.intl`
    /// 7. Renders every declared template file that exists
    ///
    /// # Errors
    /// A descriptor naming a file outside the output directory is rejected
    /// before anything is written. Path, structure, IO and rendering errors
    /// abort the run. Missing template files are logged and reported, not
    /// returned as errors.
    pub fn generate(
        &self,
        descriptor: &TemplateDescriptor,
        config: &GenConfig,
        mut context: Value,
    ) -> YucaResult<GenerationReport> {
        descriptor.validate()?;
        copy_tree(self.template_root, self.output_root)?;
        self.enter(Stage::Scaffolded);

        match &config.static_dir {
            Some(static_dir) => select_assets(
                static_dir,
                &descriptor.overridable_files,
                &config.files,
                self.output_root,
            )?,
            None if !config.files.is_empty() => {
                return Err(YucaError::ConfigError(
                    "files are chosen but no static directory is set".to_string(),
                ))
            }
            None => {}
        }
        self.enter(Stage::AssetsApplied);

        apply_user_settings(&mut context, &config.overrides, &config.filters)?;
        if let Some(tag) = &descriptor.escape_format {
            escape_context(&mut context, tag);
        }
        self.enter(Stage::ContextTransformed);

        let fields = match &mut context {
            Value::Object(fields) => fields,
            other => {
                return Err(YucaError::StructuralMismatch {
                    route: "<root>".to_string(),
                    expected: "mapping",
                    found: kind_of(other),
                })
            }
        };

        merge_settings(fields, &descriptor.default_settings, &config.settings);
        self.enter(Stage::SettingsMerged);

        resolve_locale(fields, &descriptor.intl);
        self.enter(Stage::LocaleResolved);

        self.enter(Stage::Rendering);
        let mut report = GenerationReport::default();
        for template_file in &descriptor.template_files {
            let path = self.output_root.join(template_file);
            if !path.exists() {
                error!(
                    "Template {} does not contain {}",
                    self.template_root.display(),
                    template_file.display()
                );
                report.missing.push(template_file.clone());
                continue;
            }

            fill_template_file(&path, &context, self.renderer)?;
            report.rendered.push(template_file.clone());
        }
        self.enter(Stage::Done);

        Ok(report)
    }
}
