use crate::constants::{MAX_SHEETS_PER_SIGNATURE, OUTPUT_SUFFIX};
use crate::types::*;
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Booklet imposition configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BookletOptions {
    // Input
    pub input_file: PathBuf,

    // Output; derived from the input name when unset
    pub output_file: Option<PathBuf>,

    // Folding
    pub sheets_per_signature: usize,

    // Advisor candidate bound; derived from the page count when unset
    pub advisor_limit: Option<usize>,
}

impl Default for BookletOptions {
    fn default() -> Self {
        Self {
            input_file: PathBuf::new(),
            output_file: None,
            sheets_per_signature: 1,
            advisor_limit: None,
        }
    }
}

impl BookletOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| ImposeError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ImposeError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.input_file.as_os_str().is_empty() {
            return Err(ImposeError::Config("No input file specified".to_string()));
        }

        if self.sheets_per_signature == 0 {
            return Err(ImposeError::Config(
                "Sheets per signature must be at least 1".to_string(),
            ));
        }

        if self.sheets_per_signature > MAX_SHEETS_PER_SIGNATURE {
            return Err(ImposeError::Config(format!(
                "Sheets per signature must be at most {}",
                MAX_SHEETS_PER_SIGNATURE
            )));
        }

        if self.advisor_limit == Some(0) {
            return Err(ImposeError::Config(
                "Advisor limit must be at least 1".to_string(),
            ));
        }

        if self.advisor_limit > Some(MAX_SHEETS_PER_SIGNATURE) {
            return Err(ImposeError::Config(format!(
                "Advisor limit must be at most {}",
                MAX_SHEETS_PER_SIGNATURE
            )));
        }

        Ok(())
    }

    /// Where the imposed document is written
    pub fn output_path(&self) -> PathBuf {
        self.output_file
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input_file))
    }
}

/// `dir/name.pdf` becomes `dir/name_print.pdf`
pub fn default_output_path(input: impl AsRef<Path>) -> PathBuf {
    let input = input.as_ref();
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}{}.pdf", stem, OUTPUT_SUFFIX))
}
