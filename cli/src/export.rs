//! JSON export of snapshot data.

use std::{fs, path::Path};

use anyhow::Context;
use serde::Serialize;

/// Writes `value` as pretty-printed JSON, replacing any existing file.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize export")?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
