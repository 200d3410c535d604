//! Interactive prompts.

use anyhow::{anyhow, Result};
use dialoguer::{theme::ColorfulTheme, Select};
use std::path::{Path, PathBuf};

/// Interactive prompts handler.
pub struct PlanPrompts {
    theme: ColorfulTheme,
}

impl Default for PlanPrompts {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanPrompts {
    /// Creates a new prompts handler.
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    /// Prompts the user to pick one of several plan files.
    pub fn select_plan(&self, plans: &[PathBuf]) -> Result<PathBuf> {
        let items: Vec<String> = plans.iter().map(|p| display_name(p)).collect();

        let selection = Select::with_theme(&self.theme)
            .with_prompt("Which plan should run?")
            .items(&items)
            .default(0)
            .interact_opt()
            .map_err(|e| anyhow!("Plan selection failed: {e}"))?
            .ok_or_else(|| anyhow!("No plan selected"))?;

        plans
            .get(selection)
            .cloned()
            .ok_or_else(|| anyhow!("No plan selected"))
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}
