//! Replacement of template-provided static assets with user files.

use crate::config::ensure_output_relative;
use crate::error::YucaResult;
use indexmap::IndexMap;
use log::debug;
use std::fs;
use std::path::Path;

fn copy_file(source: &Path, dest: &Path) -> YucaResult<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(source, dest)?;
    Ok(())
}

/// Copies each chosen file over the template slot with the same logical name.
///
/// `slots` maps logical names to destination file names under `dest_dir`,
/// `chosen` maps logical names to source file names under `source_dir`.
/// Names present on one side only are skipped. A slot pointing outside
/// `dest_dir` is a configuration error.
pub fn select_assets<P: AsRef<Path>, Q: AsRef<Path>>(
    source_dir: P,
    slots: &IndexMap<String, String>,
    chosen: &IndexMap<String, String>,
    dest_dir: Q,
) -> YucaResult<()> {
    let (source_dir, dest_dir) = (source_dir.as_ref(), dest_dir.as_ref());

    for (name, source_file) in chosen {
        let Some(slot_file) = slots.get(name) else {
            debug!("Skipping asset '{name}': template has no such slot");
            continue;
        };

        ensure_output_relative(slot_file)?;
        let source = source_dir.join(source_file);
        let dest = dest_dir.join(slot_file);
        debug!("Copying asset '{name}': {} -> {}", source.display(), dest.display());
        copy_file(&source, &dest)?;
    }
    Ok(())
}
