//! Plan configuration.
//!
//! A plan is a YAML file naming the data file and the operations that can
//! appear in a scheme:
//!
//! ```yaml
//! path: table.csv
//! delimiter: ","
//! has_header: false
//! operations:
//!   total: { func: sum, column: 0 }
//!   names: { func: concatenate, column: 1 }
//! ```
//!
//! Operation order in the file is the order used for scheme indices.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::operations::OperationRegistry;

/// Operation lookups the pipeline needs from a plan.
pub trait OperationCatalog {
    /// Returns configured operation ids in file order.
    fn operation_ids(&self) -> Vec<String>;

    /// Returns the 0-based data column for an operation.
    ///
    /// # Errors
    ///
    /// Returns `OperationNotConfigured` if `id` is not in the plan.
    fn column_for(&self, id: &str) -> Result<usize>;

    /// Returns the reducer name for an operation.
    ///
    /// # Errors
    ///
    /// Returns `OperationNotConfigured` if `id` is not in the plan.
    fn function_name_for(&self, id: &str) -> Result<&str>;
}

/// One configured operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationConfig {
    /// Reducer name in the operation dictionary.
    pub func: String,
    /// 0-based data column the reducer reads.
    pub column: usize,
}

fn default_delimiter() -> char {
    ','
}

/// Parsed plan file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanConfig {
    /// Data file, relative to the plan's directory unless absolute.
    pub path: PathBuf,
    /// Field delimiter of the data file.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Whether the first data row is a header.
    #[serde(default)]
    pub has_header: bool,
    /// Operations by id, in file order.
    pub operations: IndexMap<String, OperationConfig>,
    #[serde(skip)]
    base_dir: PathBuf,
}

impl PlanConfig {
    /// Parses a plan from YAML text. Relative paths resolve against the
    /// working directory.
    ///
    /// # Errors
    ///
    /// Returns `PlanParse` if the text is not a valid plan.
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Reads and parses a plan file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let mut plan = Self::from_yaml(&text)?;
        plan.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        tracing::debug!(
            plan = %path.display(),
            operations = plan.operations.len(),
            "plan loaded"
        );
        Ok(plan)
    }

    /// Checks the plan for values the run cannot use.
    ///
    /// # Errors
    ///
    /// Returns `Plan` describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(Error::Plan("'path' must name the data file".to_string()));
        }
        if self.operations.is_empty() {
            return Err(Error::Plan("no operations configured".to_string()));
        }
        self.delimiter_byte()?;
        Ok(())
    }

    /// Returns the delimiter as a single byte.
    ///
    /// # Errors
    ///
    /// Returns `Plan` if the delimiter is not an ASCII character.
    pub fn delimiter_byte(&self) -> Result<u8> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                Error::Plan(format!(
                    "delimiter '{}' must be a single ASCII character",
                    self.delimiter
                ))
            })
    }

    /// Lists `(id, func)` pairs whose reducer is not registered.
    #[must_use]
    pub fn unknown_functions(&self, registry: &OperationRegistry) -> Vec<(String, String)> {
        self.operations
            .iter()
            .filter(|(_, op)| !registry.contains(&op.func))
            .map(|(id, op)| (id.clone(), op.func.clone()))
            .collect()
    }

    /// Returns the data file path resolved against the plan's directory.
    #[must_use]
    pub fn data_path(&self) -> PathBuf {
        self.base_dir.join(&self.path)
    }

    /// Returns the directory the plan was loaded from.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn operation(&self, id: &str) -> Result<&OperationConfig> {
        self.operations
            .get(id)
            .ok_or_else(|| Error::OperationNotConfigured(id.to_string()))
    }
}

impl OperationCatalog for PlanConfig {
    fn operation_ids(&self) -> Vec<String> {
        self.operations.keys().cloned().collect()
    }

    fn column_for(&self, id: &str) -> Result<usize> {
        Ok(self.operation(id)?.column)
    }

    fn function_name_for(&self, id: &str) -> Result<&str> {
        Ok(self.operation(id)?.func.as_str())
    }
}

/// Lists `*.yaml` and `*.yml` files in `dir`, sorted by path.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn discover_plans<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut plans = Vec::new();
    for entry in std::fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
        if is_yaml && path.is_file() {
            plans.push(path);
        }
    }
    plans.sort();
    Ok(plans)
}
