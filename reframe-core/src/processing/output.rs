//! Input path cleanup and output path derivation.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};

/// Cleans up a user-supplied path.
///
/// Leading and trailing whitespace is trimmed first, then every single quote
/// is removed. Paths pasted from a shell (`'My Movie.mov'`) come out usable.
#[must_use]
pub fn sanitize_input_path(raw: &str) -> PathBuf {
    PathBuf::from(raw.trim().replace('\'', ""))
}

/// Splits a file name into (base, extension), the extension without its dot.
///
/// Leading dots belong to the base, so `.hidden` and `..hidden` have no
/// extension, while `clip.` has an empty one.
fn split_extension(file_name: &OsStr) -> (&OsStr, Option<&OsStr>) {
    let bytes = file_name.as_encoded_bytes();
    let leading_dots = bytes.iter().take_while(|&&b| b == b'.').count();
    if !bytes[leading_dots..].contains(&b'.') {
        return (file_name, None);
    }
    // The last dot follows a non-dot byte here, so std's stem/extension
    // split agrees with the rule above.
    let name = Path::new(file_name);
    match (name.file_stem(), name.extension()) {
        (Some(stem), Some(ext)) => (stem, Some(ext)),
        _ => (file_name, None),
    }
}

/// Returns the path of the cropped output for `input`.
///
/// The output sits in the same directory as the input, named
/// `<stem><suffix><extension>`. The result depends only on the arguments.
pub fn derive_output_path(input: &Path, suffix: &str) -> CoreResult<PathBuf> {
    let file_name = input.file_name().ok_or_else(|| {
        CoreError::PathError(format!(
            "Input path '{}' has no file name",
            input.display()
        ))
    })?;

    let (base, extension) = split_extension(file_name);
    let mut output_name = OsString::from(base);
    output_name.push(suffix);
    if let Some(ext) = extension {
        output_name.push(".");
        output_name.push(ext);
    }
    Ok(input.with_file_name(output_name))
}
