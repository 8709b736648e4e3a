//! Command-line interface module
//!
//! This module contains the implementations for the CLI subcommands.

pub mod check;
pub mod name;

/// Common CLI utilities
pub mod utils {
    use crate::error::{Error as SlotnameError, Result as SlotnameResult};
    use std::path::Path;

    /// Write output to file or stdout
    pub fn write_output(content: &str, output_path: Option<&Path>) -> SlotnameResult<()> {
        match output_path {
            Some(path) => std::fs::write(path, content).map_err(SlotnameError::from),
            None => {
                println!("{}", content);
                Ok(())
            }
        }
    }
}
