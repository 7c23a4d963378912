#![allow(dead_code)]

use anyhow::{Context, Result, bail};
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use symbol_catalog::Resource;
use tempfile::TempDir;

pub fn bundled_data_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}

pub fn cli_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_symbol-catalog"))
}

// Runs the command and fails with its stderr when the exit status is non-zero.
pub fn run_command(mut cmd: Command) -> Result<Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to spawn {:?}", cmd.get_program()))?;
    if !output.status.success() {
        bail!(
            "command {:?} failed with {}: {}",
            cmd.get_program(),
            output.status,
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(output)
}

// A temporary data directory holding the four catalog documents.
pub struct FixtureData {
    dir: TempDir,
}

impl FixtureData {
    pub fn new(
        categories: Value,
        symbol_categories: Value,
        symbol_search: Value,
        availability: Value,
    ) -> Result<Self> {
        let fixture = Self {
            dir: TempDir::new().context("allocating fixture data dir")?,
        };
        fixture.write(Resource::Categories, &categories)?;
        fixture.write(Resource::SymbolCategories, &symbol_categories)?;
        fixture.write(Resource::SymbolSearch, &symbol_search)?;
        fixture.write(Resource::NameAvailability, &availability)?;
        Ok(fixture)
    }

    // The three-category fixture used by several tests.
    pub fn minimal() -> Result<Self> {
        Self::new(
            json!([{"key": "all"}, {"key": "communication"}, {"key": "draw"}]),
            json!({"bubble.left": ["communication"]}),
            json!({}),
            json!({
                "symbols": {"bubble.left": "2023"},
                "year_to_release": {"2023": {"iOS": "16.0"}}
            }),
        )
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, resource: Resource, value: &Value) -> Result<()> {
        self.write_raw(resource, &serde_json::to_string_pretty(value)?)
    }

    pub fn write_raw(&self, resource: Resource, contents: &str) -> Result<()> {
        let path = self.dir.path().join(resource.file_name());
        fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))
    }

    pub fn remove(&self, resource: Resource) -> Result<()> {
        let path = self.dir.path().join(resource.file_name());
        fs::remove_file(&path).with_context(|| format!("removing {}", path.display()))
    }
}
