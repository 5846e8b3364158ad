//! GWT module descriptor discovery

use crate::error::{io_err, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File-name suffix of a module descriptor
pub const MODULE_SUFFIX: &str = ".gwt.xml";

fn module_name(path: &Path) -> Option<&str> {
    path.file_name()?.to_str()?.strip_suffix(MODULE_SUFFIX)
}

/// Module descriptors directly inside `dir`, in enumeration order
pub fn find_module_descriptors(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut found = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err(dir))? {
        let path = entry.map_err(io_err(dir))?.path();
        if path.is_file() && module_name(&path).is_some() {
            found.push(path);
        }
    }
    Ok(found)
}

/// Name of the first module descriptor in the base package directory
pub fn find_main_module(java_base: &Path) -> Result<Option<String>> {
    Ok(find_module_descriptors(java_base)?
        .first()
        .and_then(|path| module_name(path))
        .map(str::to_string))
}

/// Dotted names of every module under `source_root` that declares an entry point
pub fn find_entry_modules(source_root: &Path) -> Vec<String> {
    let mut modules: Vec<String> = WalkDir::new(source_root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|entry| {
            let name = module_name(entry.path())?;
            let content = std::fs::read_to_string(entry.path()).ok()?;
            if !content.contains("<entry-point") {
                return None;
            }
            let package = entry.path().parent()?.strip_prefix(source_root).ok()?;
            let mut dotted: Vec<String> = package
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect();
            dotted.push(name.to_string());
            Some(dotted.join("."))
        })
        .collect();
    modules.sort();
    modules
}
