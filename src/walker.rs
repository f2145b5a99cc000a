//! Directory enumeration and listing format for the `listFiles` tool.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

struct RawEntry {
    name: String,
    is_dir: bool,
    size: u64,
}

/// List `dir`, producing one formatted line per entry.
///
/// Directories render as `[DIR] path/`, files as `[FILE] path (N bytes)`.
/// Entries are sorted by name so output is stable regardless of the
/// platform's native enumeration order. In recursive mode subdirectories
/// are expanded depth-first immediately after their own line, each level
/// indented two further spaces, with entry paths relative to `dir`.
///
/// A directory that cannot be read degrades to a single inline
/// `Error reading directory: ...` line; sibling subtrees still enumerate.
pub async fn list(dir: &Path, recursive: bool) -> Vec<String> {
    walk(dir.to_path_buf(), recursive, String::new(), 0).await
}

fn walk(
    dir: PathBuf,
    recursive: bool,
    prefix: String,
    depth: usize,
) -> Pin<Box<dyn Future<Output = Vec<String>> + Send>> {
    Box::pin(async move {
        let indent = "  ".repeat(depth);
        let mut read_dir = match tokio::fs::read_dir(&dir).await {
            Ok(read_dir) => read_dir,
            Err(e) => return vec![format!("{indent}Error reading directory: {e}")],
        };

        let mut entries = Vec::new();
        let mut failure = None;
        loop {
            match read_dir.next_entry().await {
                Ok(Some(entry)) => {
                    let name = entry.file_name().to_string_lossy().into_owned();
                    // Classify once at enumeration time; only files get the
                    // follow-up stat for their size.
                    let is_dir = entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false);
                    let size = if is_dir {
                        0
                    } else {
                        entry.metadata().await.map(|m| m.len()).unwrap_or(0)
                    };
                    entries.push(RawEntry { name, is_dir, size });
                }
                Ok(None) => break,
                Err(e) => {
                    failure = Some(format!("{indent}Error reading directory: {e}"));
                    break;
                }
            }
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        let mut lines = Vec::with_capacity(entries.len());
        for entry in entries {
            let rel = if prefix.is_empty() {
                entry.name.clone()
            } else {
                format!("{prefix}/{}", entry.name)
            };
            if entry.is_dir {
                lines.push(format!("{indent}[DIR] {rel}/"));
                if recursive {
                    lines.extend(walk(dir.join(&entry.name), recursive, rel, depth + 1).await);
                }
            } else {
                lines.push(format!("{indent}[FILE] {rel} ({} bytes)", entry.size));
            }
        }
        lines.extend(failure);
        lines
    })
}
