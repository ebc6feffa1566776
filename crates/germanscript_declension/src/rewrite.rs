//! Persisting resolved declensions back into the source file.
//!
//! After a successful external lookup the `Deklination Duden(Wort)` line is
//! replaced by the full inline declension, so later compilations no longer
//! need the service for that word.

use std::fs;
use std::path::Path;

use germanscript_foundation::{Error, ErrorKind, Result};
use tracing::debug;

use crate::entry::Declension;

/// Replaces line `line` (1-based) of `path` with `declension`, keeping its
/// indentation and line ending.
///
/// # Errors
/// Returns `SourceRewrite` if the file cannot be read or written, or if it
/// has fewer than `line` lines.
pub fn rewrite_declaration(path: &Path, line: u32, declension: &Declension) -> Result<()> {
    let failure = |message: String| {
        Error::new(ErrorKind::SourceRewrite {
            path: path.to_path_buf(),
            message,
        })
    };

    let text = fs::read_to_string(path).map_err(|err| failure(err.to_string()))?;
    let rewritten = replace_line(&text, line, &declension.to_string())
        .ok_or_else(|| failure(format!("line {line} does not exist")))?;
    fs::write(path, rewritten).map_err(|err| failure(err.to_string()))?;

    debug!(path = %path.display(), line, word = declension.nominative(), "rewrote declension");
    Ok(())
}

/// Returns `text` with the content of line `line` replaced, or `None` if
/// there is no such line.
fn replace_line(text: &str, line: u32, replacement: &str) -> Option<String> {
    let target = usize::try_from(line).ok()?.checked_sub(1)?;
    let mut found = false;
    let mut output = String::with_capacity(text.len() + replacement.len());

    for (index, physical) in text.split_inclusive('\n').enumerate() {
        if index != target {
            output.push_str(physical);
            continue;
        }
        found = true;
        let content = physical.trim_end_matches(['\n', '\r']);
        let ending = &physical[content.len()..];
        let indentation = &content[..content.len() - content.trim_start().len()];
        output.push_str(indentation);
        output.push_str(replacement);
        output.push_str(ending);
    }

    found.then_some(output)
}
