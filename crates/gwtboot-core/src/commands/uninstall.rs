use crate::console;
use crate::error::{BootError, Result};
use crate::product::ProductConfig;
use crate::tui::Prompter;
use std::path::{Path, PathBuf};

const SYSTEM_PREFIX: &str = "/usr/local";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Unix,
    Windows,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }
}

/// One place the CLI may be installed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLocation {
    pub description: &'static str,
    /// Paths reported when nothing is found
    pub checked: Vec<PathBuf>,
    pub paths: Vec<PathBuf>,
}

/// Every known install location for `platform`
///
/// `system_prefix` is only used on unix.
pub fn install_locations<P: ProductConfig>(
    product: &P,
    platform: Platform,
    home: &Path,
    system_prefix: &Path,
) -> Vec<InstallLocation> {
    let name = product.name();
    match platform {
        Platform::Windows => {
            let base = home.join("AppData").join("Local").join(name);
            vec![InstallLocation {
                description: "Windows User Installation",
                checked: vec![base.clone()],
                paths: vec![
                    base.join("lib").join(product.jar_name()),
                    base.join("bin").join(format!("{name}.bat")),
                    base.join("bin").join(format!("{name}.ps1")),
                    base,
                ],
            }]
        }
        Platform::Unix => [
            ("System-wide Installation (/usr/local)", system_prefix.to_path_buf()),
            ("User Installation (~/.local)", home.join(".local")),
        ]
        .into_iter()
        .map(|(description, prefix)| InstallLocation {
            description,
            checked: vec![prefix.join("lib").join(name), prefix.join("bin").join(name)],
            paths: vec![
                prefix.join("lib").join(name).join(product.jar_name()),
                prefix.join("bin").join(name),
            ],
        })
        .collect(),
    }
}

/// Install locations for the running platform and user
pub fn default_locations<P: ProductConfig>(product: &P) -> Vec<InstallLocation> {
    let home = dirs::home_dir().unwrap_or_default();
    install_locations(product, Platform::current(), &home, Path::new(SYSTEM_PREFIX))
}

/// Locations with at least one existing path, keeping only those paths
pub fn detect_installations(locations: &[InstallLocation]) -> Vec<InstallLocation> {
    locations
        .iter()
        .filter_map(|location| {
            let existing: Vec<PathBuf> = location
                .paths
                .iter()
                .filter(|p| p.exists())
                .cloned()
                .collect();
            (!existing.is_empty()).then(|| InstallLocation {
                paths: existing,
                ..location.clone()
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UninstallOutcome {
    Removed(Vec<PathBuf>),
    Cancelled,
}

/// Remove every detected installation, asking first unless `assume_yes`
pub fn uninstall<P: ProductConfig>(
    product: &P,
    locations: &[InstallLocation],
    assume_yes: bool,
    prompter: &mut dyn Prompter,
) -> Result<UninstallOutcome> {
    console::info(format!("{} CLI Uninstaller", product.display_name()));
    console::blank();

    let installations = detect_installations(locations);
    if installations.is_empty() {
        console::plain("Checked locations:");
        for path in locations.iter().flat_map(|l| &l.checked) {
            console::item(path.display());
        }
        console::blank();
        return Err(BootError::NotInstalled(product.display_name().to_string()));
    }

    console::info(format!("Found {} CLI installation(s):", product.display_name()));
    for location in &installations {
        console::plain(format!("  {}", location.description));
        for path in &location.paths {
            console::plain(format!("    - {}", path.display()));
        }
    }
    console::blank();

    if !assume_yes {
        console::warning(format!(
            "This will permanently remove {} CLI from your system.",
            product.display_name()
        ));
        if !prompter.confirm("Do you want to continue?", false)? {
            console::info("Uninstall cancelled.");
            return Ok(UninstallOutcome::Cancelled);
        }
        console::blank();
    }

    let mut removed = Vec::new();
    let mut failed = 0;
    for location in &installations {
        console::info(format!("Removing {}...", location.description));
        for path in &location.paths {
            match remove_path(path) {
                Ok(true) => {
                    console::success(format!("  Deleted: {}", path.display()));
                    removed.push(path.clone());
                }
                // already gone with its parent directory
                Ok(false) => {}
                Err(e) => {
                    console::error(format!("  Failed to delete: {} ({})", path.display(), e));
                    failed += 1;
                }
            }
        }
    }
    console::blank();

    if failed > 0 {
        console::warning("Uninstall completed with some errors.");
        console::plain("You may need to remove the remaining files with elevated permissions.");
        return Err(BootError::Uninstall { failed });
    }

    console::success(format!(
        "{} CLI has been successfully uninstalled!",
        product.display_name()
    ));
    console::blank();
    console::plain("Note: You may want to remove its bin directory from your PATH.");
    Ok(UninstallOutcome::Removed(removed))
}

fn remove_path(path: &Path) -> std::io::Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    if path.is_dir() {
        std::fs::remove_dir_all(path)?;
    } else {
        std::fs::remove_file(path)?;
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::TestProduct;
    use crate::tui::ScriptedPrompter;
    use std::fs;

    struct Sandbox {
        _dir: tempfile::TempDir,
        home: PathBuf,
        prefix: PathBuf,
    }

    fn sandbox() -> Sandbox {
        let dir = tempfile::tempdir().unwrap();
        let home = dir.path().join("home");
        let prefix = dir.path().join("usr/local");
        fs::create_dir_all(&home).unwrap();
        fs::create_dir_all(&prefix).unwrap();
        Sandbox {
            _dir: dir,
            home,
            prefix,
        }
    }

    fn install_user(home: &Path) {
        let lib = home.join(".local/lib/gwt-boot");
        let bin = home.join(".local/bin");
        fs::create_dir_all(&lib).unwrap();
        fs::create_dir_all(&bin).unwrap();
        fs::write(lib.join("gwt-boot-cli.jar"), b"jar").unwrap();
        fs::write(bin.join("gwt-boot"), b"#!/bin/sh").unwrap();
    }

    #[test]
    fn test_unix_locations() {
        let locations = install_locations(
            &TestProduct,
            Platform::Unix,
            Path::new("/home/ann"),
            Path::new("/usr/local"),
        );
        assert_eq!(locations.len(), 2);
        assert_eq!(
            locations[0].paths,
            vec![
                PathBuf::from("/usr/local/lib/gwt-boot/gwt-boot-cli.jar"),
                PathBuf::from("/usr/local/bin/gwt-boot"),
            ]
        );
        assert_eq!(
            locations[1].paths[0],
            PathBuf::from("/home/ann/.local/lib/gwt-boot/gwt-boot-cli.jar")
        );
    }

    #[test]
    fn test_windows_locations_include_install_directory() {
        let home = Path::new("C:/Users/ann");
        let locations = install_locations(&TestProduct, Platform::Windows, home, Path::new("/"));
        assert_eq!(locations.len(), 1);
        let base = home.join("AppData").join("Local").join("gwt-boot");
        assert_eq!(locations[0].paths.len(), 4);
        assert_eq!(locations[0].paths[3], base);
        assert!(locations[0].paths[1].ends_with("gwt-boot.bat"));
    }

    #[test]
    fn test_nothing_installed_is_an_error() {
        let sb = sandbox();
        let locations = install_locations(&TestProduct, Platform::Unix, &sb.home, &sb.prefix);
        assert!(detect_installations(&locations).is_empty());

        let mut prompter = ScriptedPrompter::default();
        let err = uninstall(&TestProduct, &locations, false, &mut prompter).unwrap_err();
        assert!(matches!(err, BootError::NotInstalled(_)));
        assert!(prompter.asked().is_empty());
    }

    #[test]
    fn test_decline_keeps_files() {
        let sb = sandbox();
        install_user(&sb.home);
        let locations = install_locations(&TestProduct, Platform::Unix, &sb.home, &sb.prefix);

        let mut prompter = ScriptedPrompter::new([""]);
        let outcome = uninstall(&TestProduct, &locations, false, &mut prompter).unwrap();
        assert_eq!(outcome, UninstallOutcome::Cancelled);
        assert!(sb.home.join(".local/bin/gwt-boot").exists());
    }

    #[test]
    fn test_assume_yes_removes_detected_files() {
        let sb = sandbox();
        install_user(&sb.home);
        let locations = install_locations(&TestProduct, Platform::Unix, &sb.home, &sb.prefix);

        let detected = detect_installations(&locations);
        assert_eq!(detected.len(), 1);
        assert_eq!(detected[0].description, "User Installation (~/.local)");

        let mut prompter = ScriptedPrompter::default();
        let outcome = uninstall(&TestProduct, &locations, true, &mut prompter).unwrap();
        assert_eq!(
            outcome,
            UninstallOutcome::Removed(vec![
                sb.home.join(".local/lib/gwt-boot/gwt-boot-cli.jar"),
                sb.home.join(".local/bin/gwt-boot"),
            ])
        );
        assert!(!sb.home.join(".local/bin/gwt-boot").exists());
    }
}
