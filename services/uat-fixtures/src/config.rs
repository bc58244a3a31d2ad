//! Configuration from the command line, with environment variable fallbacks

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::emit::DEFAULT_BASENAME;
use crate::store::DEFAULT_CAPACITY;

/// Capture decoded UAT frames and freeze them into a C test data pair
#[derive(Debug, Clone, Parser)]
#[command(name = "uat-fixtures", version, about)]
pub struct Config {
    /// Directory for the generated .c/.h files
    #[arg(env = "UAT_OUTPUT_DIR", default_value = "scripts/")]
    pub output_dir: PathBuf,

    /// Recorded decoder output, one JSON object per line ("-" for stdin)
    #[arg(short, long, env = "UAT_INPUT", default_value = "-")]
    pub input: PathBuf,

    /// Maximum fixtures kept per message kind
    #[arg(short, long, env = "UAT_CAPACITY", default_value_t = DEFAULT_CAPACITY)]
    pub capacity: usize,

    /// File stem of the generated pair
    #[arg(short, long, env = "UAT_BASENAME", default_value = DEFAULT_BASENAME)]
    pub basename: String,
}

impl Config {
    /// `None` when reading from stdin
    pub fn input_path(&self) -> Option<&Path> {
        if self.input.as_os_str() == "-" {
            None
        } else {
            Some(&self.input)
        }
    }
}
