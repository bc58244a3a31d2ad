//! Fixture emitter - renders the store as a C source/header pair
//!
//! Output is a pure function of the store contents and the basename: no
//! timestamps, no host details, fixed field order and float precision.

mod c;
mod layout;

use std::fmt::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::EmitError;
use crate::store::FixtureStore;

pub use layout::{CType, Collection, Field, FixtureValues, Value, DOWNLINK, UPLINK};

/// Default file stem for the generated pair
pub const DEFAULT_BASENAME: &str = "uat_test_data";

const BANNER: &str = "// Generated by uat-fixtures from captured UAT frames. Do not edit.\n";

/// Rendered header and source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub basename: String,
    pub header: String,
    pub source: String,
}

/// Render the whole store
pub fn render(store: &FixtureStore, basename: &str) -> Result<Artifact, EmitError> {
    Ok(Artifact {
        basename: basename.to_string(),
        header: render_header(basename)?,
        source: render_source(store, basename)?,
    })
}

fn render_header(basename: &str) -> Result<String, EmitError> {
    let guard = include_guard(basename);
    let mut out = String::new();

    out.push_str(BANNER);
    writeln!(out)?;
    writeln!(out, "#ifndef {}", guard)?;
    writeln!(out, "#define {}", guard)?;
    writeln!(out)?;
    writeln!(out, "#include <stddef.h>")?;
    writeln!(out, "#include <stdint.h>")?;
    writeln!(out)?;
    writeln!(out, "#ifdef __cplusplus")?;
    writeln!(out, "extern \"C\" {{")?;
    writeln!(out, "#endif")?;
    writeln!(out)?;

    c::write_constants(&mut out)?;
    c::write_struct(&mut out, &DOWNLINK)?;
    c::write_struct(&mut out, &UPLINK)?;

    writeln!(out, "// Accessors")?;
    c::write_accessor_decls(&mut out, &DOWNLINK)?;
    c::write_accessor_decls(&mut out, &UPLINK)?;

    writeln!(out, "// Hex string to bytes; returns length, or -1 on malformed input")?;
    writeln!(out, "{}", c::HEX_HELPER_DECL)?;
    writeln!(out)?;

    writeln!(out, "#ifdef __cplusplus")?;
    writeln!(out, "}}")?;
    writeln!(out, "#endif")?;
    writeln!(out)?;
    writeln!(out, "#endif // {}", guard)?;

    Ok(out)
}

fn render_source(store: &FixtureStore, basename: &str) -> Result<String, EmitError> {
    let mut out = String::new();

    out.push_str(BANNER);
    writeln!(out, "// Downlink fixtures: {}", store.downlink.len())?;
    writeln!(out, "// Uplink fixtures: {}", store.uplink.len())?;
    writeln!(out)?;
    writeln!(out, "#include \"{}.h\"", basename)?;
    writeln!(out)?;

    c::write_array(&mut out, &DOWNLINK, store.downlink.as_slice())?;
    c::write_array(&mut out, &UPLINK, store.uplink.as_slice())?;
    c::write_accessors(&mut out, &DOWNLINK)?;
    c::write_accessors(&mut out, &UPLINK)?;
    c::write_hex_helper(&mut out)?;

    Ok(out)
}

/// `uat_test_data` -> `UAT_TEST_DATA_H`
fn include_guard(basename: &str) -> String {
    let mut guard: String = basename
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    if guard.starts_with(|ch: char| ch.is_ascii_digit()) {
        guard.insert(0, '_');
    }
    guard.push_str("_H");
    guard
}

impl Artifact {
    pub fn source_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.c", self.basename))
    }

    pub fn header_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.h", self.basename))
    }

    /// Write both files, creating `dir` if needed. Returns `(source, header)`.
    pub async fn write_to(&self, dir: &Path) -> Result<(PathBuf, PathBuf), EmitError> {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|source| EmitError::Io {
                path: dir.to_path_buf(),
                source,
            })?;

        let source_path = self.source_path(dir);
        let header_path = self.header_path(dir);
        write_file(&source_path, &self.source).await?;
        write_file(&header_path, &self.header).await?;

        Ok((source_path, header_path))
    }
}

async fn write_file(path: &Path, contents: &str) -> Result<(), EmitError> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|source| EmitError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}
