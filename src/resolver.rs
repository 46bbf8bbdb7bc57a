use std::path::{Path, PathBuf};

use path_clean::PathClean;

/// Resolve a local locator to a file on disk.
///
/// Relative locators (leading `.`) resolve against the importer's directory,
/// everything else against `fallback_base`. A locator without an extension is
/// tried with each of `extensions` in order; the first existing regular file
/// wins. Directory imports (`./dir` meaning `./dir/index.ts`) are not followed.
pub fn resolve_local(
    locator: &str,
    importer: &Path,
    fallback_base: &Path,
    extensions: &[String],
) -> Option<PathBuf> {
    let base = if locator.starts_with('.') {
        importer.parent().unwrap_or(fallback_base)
    } else {
        fallback_base
    };

    candidates(locator, extensions)
        .into_iter()
        .map(|candidate| base.join(candidate).clean())
        .find(|path| path.is_file())
}

fn candidates(locator: &str, extensions: &[String]) -> Vec<String> {
    if has_extension(locator) {
        return vec![locator.to_string()];
    }
    extensions
        .iter()
        .map(|ext| format!("{locator}.{ext}"))
        .collect()
}

/// `./util.js` has one, `./util` and `../` do not.
fn has_extension(locator: &str) -> bool {
    Path::new(locator)
        .file_name()
        .and_then(|name| Path::new(name).extension())
        .is_some_and(|ext| !ext.is_empty())
}
