//! GWT version compatibility checking

use anyhow::Result;
use semver::Version;

/// Oldest GWT release the generated code targets (jakarta servlet support)
pub const MINIMUM_GWT_VERSION: &str = "2.10.0";

/// Compare the project's GWT version against the supported minimum
/// Returns a warning message if the project is older
pub fn check_compatibility(project_version: &str, minimum: &str) -> Option<String> {
    let project_ver = match parse_version(project_version) {
        Ok(v) => v,
        Err(_) => return None, // Can't compare, skip warning
    };

    let minimum_ver = match parse_version(minimum) {
        Ok(v) => v,
        Err(_) => return None,
    };

    if project_ver < minimum_ver {
        Some(format!(
            "Warning: This project uses GWT {}, but generated code expects GWT {} or newer.",
            project_version, minimum
        ))
    } else {
        None
    }
}

/// Parse version string, handling various formats
pub fn parse_version(version_str: &str) -> Result<Version> {
    // Remove leading 'v' if present
    let cleaned = version_str.strip_prefix('v').unwrap_or(version_str);
    let padded = match cleaned.split('-').next().map(|core| core.matches('.').count()) {
        Some(1) => {
            let (core, rest) = cleaned.split_at(cleaned.find('-').unwrap_or(cleaned.len()));
            format!("{}.0{}", core, rest)
        }
        _ => cleaned.to_string(),
    };
    Version::parse(&padded).map_err(|e| anyhow::anyhow!("Invalid version '{}': {}", version_str, e))
}
