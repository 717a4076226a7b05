// src/graph/resolver.rs
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolves an import specifier to a canonical file path on disk.
///
/// Order: the exact file relative to the importing file's directory, then
/// that path with each extension appended, then `index.<ext>` inside it if
/// it is a directory, so a sibling `name.ts` wins over a `name/` directory.
/// A specifier starting with `/` is tried as an absolute path first and
/// then relative to `project_root`.
///
/// Returns `None` when nothing on disk matches; that is the normal outcome
/// for package and alias imports, not an error.
#[must_use]
pub fn resolve(
    project_root: &Path,
    current_file: &Path,
    import_str: &str,
    extensions: &[String],
) -> Option<PathBuf> {
    if import_str.is_empty() {
        return None;
    }
    let parent = current_file.parent()?;
    let relative = parent.join(import_str);

    if let Some(found) = resolve_candidate(&relative, extensions) {
        return Some(found);
    }
    if let Some(rest) = import_str.strip_prefix('/') {
        return resolve_candidate(&project_root.join(rest), extensions);
    }
    None
}

fn resolve_candidate(path: &Path, extensions: &[String]) -> Option<PathBuf> {
    let file = if path.is_file() {
        path.to_path_buf()
    } else if let Some(found) = check_with_extension(path, extensions) {
        found
    } else if path.is_dir() {
        check_index(path, extensions)?
    } else {
        return None;
    };

    fs::canonicalize(file).ok()
}

/// Appends rather than replaces, so `./user.service` can become `user.service.ts`.
fn check_with_extension(path: &Path, extensions: &[String]) -> Option<PathBuf> {
    extensions.iter().find_map(|ext| {
        let mut name = OsString::from(path.as_os_str());
        name.push(".");
        name.push(ext);
        let candidate = PathBuf::from(name);
        candidate.is_file().then_some(candidate)
    })
}

fn check_index(dir: &Path, extensions: &[String]) -> Option<PathBuf> {
    extensions.iter().find_map(|ext| {
        let candidate = dir.join(format!("index.{ext}"));
        candidate.is_file().then_some(candidate)
    })
}
