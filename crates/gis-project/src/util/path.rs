//! Lexical path resolution for resource references.
//!
//! References are resolved without touching the filesystem: no
//! canonicalization, no symlink resolution, no current-directory lookup.

use std::path::{Component, Path, PathBuf};

/// Lexically normalizes a path.
///
/// - `.` components are removed
/// - `..` removes the preceding normal component
/// - `..` directly under a root or prefix is dropped
/// - leading `..` of a relative path is kept
pub fn normalize(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }

    if out.is_empty() {
        return PathBuf::from(".");
    }
    out.iter().collect()
}

/// Resolves a relative resource reference against a base path.
///
/// Returns `None` when the reference is absent or empty. An absolute
/// reference replaces the base. With no base the reference is normalized
/// on its own.
pub fn resolve_reference(base: Option<&Path>, reference: Option<&str>) -> Option<PathBuf> {
    let reference = reference.filter(|r| !r.is_empty())?;
    let reference = host_separators(reference);
    let joined = match base {
        Some(base) => base.join(&*reference),
        None => PathBuf::from(&*reference),
    };
    Some(normalize(&joined))
}

/// Descriptors are written on Windows as often as not; accept `\` everywhere.
#[cfg(not(windows))]
fn host_separators(reference: &str) -> std::borrow::Cow<'_, str> {
    if reference.contains('\\') {
        std::borrow::Cow::Owned(reference.replace('\\', "/"))
    } else {
        std::borrow::Cow::Borrowed(reference)
    }
}

#[cfg(windows)]
fn host_separators(reference: &str) -> std::borrow::Cow<'_, str> {
    std::borrow::Cow::Borrowed(reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Path::new("/a/b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize(Path::new("/a/./b/./c")), PathBuf::from("/a/b/c"));
        assert_eq!(normalize(Path::new("/../a")), PathBuf::from("/a"));
        assert_eq!(normalize(Path::new("../a/b/..")), PathBuf::from("../a"));
        assert_eq!(normalize(Path::new("a/..")), PathBuf::from("."));
        assert_eq!(normalize(Path::new("a/../../b")), PathBuf::from("../b"));
    }

    #[test]
    fn test_resolve_absent_or_empty() {
        let base = Path::new("/data/project");
        assert_eq!(resolve_reference(Some(base), None), None);
        assert_eq!(resolve_reference(Some(base), Some("")), None);
    }

    #[cfg(not(windows))]
    #[test]
    fn test_resolve_relative() {
        let base = Path::new("/data/project");
        assert_eq!(
            resolve_reference(Some(base), Some("layers/roads.shp")),
            Some(PathBuf::from("/data/project/layers/roads.shp"))
        );
        assert_eq!(
            resolve_reference(Some(base), Some("../shared/dem.tif")),
            Some(PathBuf::from("/data/shared/dem.tif"))
        );
        assert_eq!(
            resolve_reference(Some(base), Some("./a/./b.tif")),
            Some(PathBuf::from("/data/project/a/b.tif"))
        );
    }

    #[cfg(not(windows))]
    #[test]
    fn test_resolve_absolute_reference_wins() {
        let base = Path::new("/data/project");
        assert_eq!(
            resolve_reference(Some(base), Some("/srv/tiles/x.tif")),
            Some(PathBuf::from("/srv/tiles/x.tif"))
        );
    }

    #[cfg(not(windows))]
    #[test]
    fn test_resolve_backslashes() {
        let base = Path::new("/data/project");
        assert_eq!(
            resolve_reference(Some(base), Some("images\\xsect\\a.png")),
            Some(PathBuf::from("/data/project/images/xsect/a.png"))
        );
    }

    #[test]
    fn test_resolve_without_base() {
        assert_eq!(
            resolve_reference(None, Some("a/../b.csv")),
            Some(PathBuf::from("b.csv"))
        );
    }
}
