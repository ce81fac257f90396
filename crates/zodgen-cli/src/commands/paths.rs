//! Import specifiers between generated files.

use std::path::{Component, Path, PathBuf};

/// Resolve `.` and `..` without touching the filesystem.
fn lexical(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Relative import specifier reaching `target` from a module in `from_dir`,
/// always starting with `./` or `../` and using `/` separators.
pub(crate) fn import_path(from_dir: &Path, target: &Path) -> String {
    let from = lexical(from_dir);
    let to = lexical(target);
    let from: Vec<Component<'_>> = from.components().collect();
    let to: Vec<Component<'_>> = to.components().collect();
    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();

    let mut parts: Vec<String> = Vec::new();
    for _ in common..from.len() {
        parts.push("..".to_string());
    }
    for component in &to[common..] {
        parts.push(component.as_os_str().to_string_lossy().into_owned());
    }
    let joined = parts.join("/");
    if joined.starts_with("..") {
        joined
    } else {
        format!("./{joined}")
    }
}

/// [`import_path`] from the directory holding `from_file`.
pub(crate) fn import_path_from_file(from_file: &Path, target: &Path) -> String {
    import_path(from_file.parent().unwrap_or(Path::new("")), target)
}
