//! Cache-busting filename templates.
//!
//! Output filenames are bundler templates (`[name]`, `[chunkhash]`, ...) plus a
//! `[version]` placeholder that is resolved here, before the template reaches
//! the bundler.

use crate::core::plugin::{Chunk, ChunkNamer};

/// Placeholder substituted with the cache version.
pub const VERSION_PLACEHOLDER: &str = "[version]";

/// Template used for both entry and chunk files when versioning is on.
pub const DEFAULT_PATTERN: &str = "[name].[chunkhash].[version].js";

/// Default cache version tag.
pub const DEFAULT_CACHE_VERSION: &str = "v1";

/// Resolve the version placeholder in a filename template.
pub fn render_filename(pattern: &str, version: &str) -> String {
    pattern.replace(VERSION_PLACEHOLDER, version)
}

/// Final path component of a filename.
pub fn basename(filename: &str) -> &str {
    filename.rsplit('/').next().unwrap_or(filename)
}

/// Split the final path component into stem and extension (including the dot).
///
/// Directories are dropped. A leading dot does not start an extension, so
/// `.babelrc` has none.
pub fn split_extension(filename: &str) -> (&str, &str) {
    let file = basename(filename);
    match file.rfind('.') {
        Some(dot) if dot > 0 => file.split_at(dot),
        _ => (file, ""),
    }
}

/// Insert `.version` before the extension of a filename's final component.
pub fn version_filename(filename: &str, version: &str) -> String {
    let (stem, ext) = split_extension(filename);
    format!("{}.{}{}", stem, version, ext)
}

/// Wrap a chunk namer so anonymous chunks carry the cache version.
///
/// Named chunks keep their name as-is.
pub fn rename_chunk(namer: ChunkNamer, version: &str) -> ChunkNamer {
    let version = version.to_string();
    ChunkNamer::new(move |chunk: &Chunk| {
        if let Some(name) = &chunk.name {
            return name.clone();
        }
        version_filename(&namer.call(chunk), &version)
    })
}
