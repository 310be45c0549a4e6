//! Source path conversion for filesystem storage.
//!
//! Source paths are relative to the storage root and always use `/`, so
//! error reports and manifests look the same on every platform.

use std::path::{Component, Path};

/// Convert a path relative to the source directory into a source path.
///
/// Returns `None` for paths that cannot be represented (non-UTF-8 names,
/// absolute paths, `..` components).
///
/// # Examples
///
/// - `testing.md` -> `"testing.md"`
/// - `docs/testing-recipes.md` -> `"docs/testing-recipes.md"`
/// - `docs\testing.md` (Windows) -> `"docs/testing.md"`
pub(crate) fn to_source_path(rel_path: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for component in rel_path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    (!parts.is_empty()).then(|| parts.join("/"))
}

/// Check that a source path stays inside the storage root.
///
/// Rejects `..` segments, absolute paths and empty paths.
pub(crate) fn is_safe_source_path(path: &str) -> bool {
    !path.is_empty()
        && !path.starts_with('/')
        && !path.contains('\\')
        && path.split('/').all(|segment| segment != ".." && !segment.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_source_path_flat() {
        assert_eq!(
            to_source_path(Path::new("testing.md")),
            Some("testing.md".to_owned())
        );
    }

    #[test]
    fn test_to_source_path_nested() {
        assert_eq!(
            to_source_path(Path::new("docs/recipes/testing.md")),
            Some("docs/recipes/testing.md".to_owned())
        );
    }

    #[test]
    fn test_to_source_path_skips_current_dir() {
        assert_eq!(
            to_source_path(Path::new("./docs/testing.md")),
            Some("docs/testing.md".to_owned())
        );
    }

    #[test]
    fn test_to_source_path_rejects_parent_dir() {
        assert_eq!(to_source_path(Path::new("../testing.md")), None);
    }

    #[test]
    fn test_to_source_path_rejects_empty() {
        assert_eq!(to_source_path(Path::new("")), None);
    }

    #[test]
    fn test_is_safe_source_path() {
        assert!(is_safe_source_path("testing.md"));
        assert!(is_safe_source_path("docs/testing.md"));
        assert!(is_safe_source_path("docs/..hidden.md"));

        assert!(!is_safe_source_path(""));
        assert!(!is_safe_source_path("../etc/passwd"));
        assert!(!is_safe_source_path("docs/../../etc/passwd"));
        assert!(!is_safe_source_path("/etc/passwd"));
        assert!(!is_safe_source_path("docs//testing.md"));
        assert!(!is_safe_source_path("docs\\testing.md"));
    }
}
