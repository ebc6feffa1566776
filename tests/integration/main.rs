//! Cross-layer integration tests for GermanScript
//!
//! Tests that run whole programs through every stage of the front end.

mod pipeline;
mod scenarios;

use std::path::PathBuf;
use std::sync::Arc;

use germanscript_compiler::{CompiledProgram, CompilerConfig, compile};
use germanscript_declension::OfflineService;
use germanscript_foundation::Result;
use tempfile::TempDir;

/// Writes `text` to `name` inside `dir`.
pub fn write(dir: &TempDir, name: &str, text: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, text).unwrap();
    path
}

/// Compiles `text` as the entry file after the standard library, offline.
pub async fn compile_text(text: &str) -> Result<CompiledProgram> {
    let dir = TempDir::new().unwrap();
    let entry = write(&dir, "main.gm", text);
    compile(
        &CompilerConfig::for_entry(entry).with_source_rewrite(false),
        Arc::new(OfflineService),
    )
    .await
}
