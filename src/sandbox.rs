//! Path containment for the sandboxed filesystem server.
//!
//! Every operation resolves its caller-supplied path through [`resolve`]
//! before touching the filesystem.

use crate::error::FsError;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Resolve a caller-supplied path against the sandbox root.
///
/// The root and the joined path are both normalized lexically (`.` and `..`
/// collapsed without filesystem access, so targets that do not exist yet
/// still resolve). Containment is a component-wise prefix check: a sibling
/// directory sharing a name prefix with the root (`/srv/data` vs
/// `/srv/data2`) is rejected, as is any `..` chain or absolute path that
/// lands outside the root. Rejection happens before any filesystem action.
pub fn resolve(root: &Path, relative: &str) -> Result<PathBuf, FsError> {
    if relative.contains('\0') {
        return Err(FsError::io(
            "resolving path",
            relative,
            io::Error::new(io::ErrorKind::InvalidInput, "path contains a null byte"),
        ));
    }

    let root = normalize(
        &std::path::absolute(root).map_err(|e| FsError::io("resolving path", root, e))?,
    );
    let candidate = normalize(&root.join(relative));

    if !candidate.starts_with(&root) {
        tracing::warn!(path = relative, "rejected path outside base directory");
        return Err(FsError::Containment {
            path: relative.to_string(),
        });
    }
    Ok(candidate)
}

/// Collapse `.` and `..` segments lexically. `..` at the filesystem root
/// stays at the root rather than underflowing.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(segment) => out.push(segment),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use crate::error::FsError;
    use crate::sandbox::resolve;
    use std::path::{Path, PathBuf};

    const ROOT: &str = "/srv/sandbox-test/data";

    #[test]
    fn accepts_nested_path_without_touching_disk() {
        // Neither the root nor the target exists; resolution is lexical.
        let resolved = resolve(Path::new(ROOT), "a/b/c.txt").unwrap();
        assert_eq!(resolved, PathBuf::from("/srv/sandbox-test/data/a/b/c.txt"));
    }

    #[test]
    fn collapses_dot_segments() {
        let resolved = resolve(Path::new(ROOT), "a/./b/../c.txt").unwrap();
        assert_eq!(resolved, PathBuf::from("/srv/sandbox-test/data/a/c.txt"));
    }

    #[test]
    fn empty_path_is_the_root_itself() {
        let resolved = resolve(Path::new(ROOT), "").unwrap();
        assert_eq!(resolved, PathBuf::from(ROOT));
    }

    #[test]
    fn rejects_parent_traversal() {
        let err = resolve(Path::new(ROOT), "../escape.txt").unwrap_err();
        assert!(matches!(err, FsError::Containment { .. }));
    }

    #[test]
    fn rejects_deep_traversal_clamped_at_fs_root() {
        let err = resolve(Path::new(ROOT), "../../../../../../etc/passwd").unwrap_err();
        assert!(matches!(err, FsError::Containment { .. }));
    }

    #[test]
    fn rejects_traversal_hidden_mid_path() {
        let err = resolve(Path::new(ROOT), "ok/../../outside/f.txt").unwrap_err();
        assert!(matches!(err, FsError::Containment { .. }));
    }

    #[test]
    fn rejects_absolute_path_outside_root() {
        let err = resolve(Path::new(ROOT), "/etc/passwd").unwrap_err();
        assert!(matches!(err, FsError::Containment { .. }));
    }

    #[test]
    fn accepts_absolute_path_inside_root() {
        let resolved = resolve(Path::new(ROOT), "/srv/sandbox-test/data/x.txt").unwrap();
        assert_eq!(resolved, PathBuf::from("/srv/sandbox-test/data/x.txt"));
    }

    #[test]
    fn rejects_sibling_directory_sharing_name_prefix() {
        // "/srv/sandbox-test/data2" starts with "/srv/sandbox-test/data" as a
        // string but is not a descendant; the component-wise check rejects it.
        let err = resolve(Path::new(ROOT), "../data2/f.txt").unwrap_err();
        assert!(matches!(err, FsError::Containment { .. }));
    }

    #[test]
    fn rejects_null_byte() {
        assert!(resolve(Path::new(ROOT), "foo\0bar").is_err());
    }
}
