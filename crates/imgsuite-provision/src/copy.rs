use std::path::Path;

use walkdir::WalkDir;

use crate::Result;

/// Recursively copies the contents of `src` into a new directory `dst`.
///
/// Symlinks inside `src` are followed.
pub(crate) fn copy_dir_all(src: &Path, dst: &Path) -> Result<u64> {
    let mut files = 0u64;
    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let out = dst.join(rel);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&out)?;
        } else {
            std::fs::copy(entry.path(), &out)?;
            files += 1;
        }
    }

    Ok(files)
}
