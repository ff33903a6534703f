// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::{anyhow, Result};
use std::{fs, path::Path};

/// Read a yaml file and substitute `${VAR}` references from the process environment.
pub fn load_yaml_with_env(path: &Path) -> Result<String> {
    let raw = fs::read_to_string(path)?;
    let expanded = shellexpand::env(&raw)
        .map_err(|e| anyhow!("Could not substitute '{}' in {:?}: {}", e.var_name, path, e.cause))?;
    Ok(expanded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_substitutes_env() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "api_key: \"${{HOLDERSCAN_YAML_TEST_KEY}}\"")?;
        std::env::set_var("HOLDERSCAN_YAML_TEST_KEY", "abc123");
        let loaded = load_yaml_with_env(file.path())?;
        assert_eq!(loaded.trim(), "api_key: \"abc123\"");
        Ok(())
    }

    #[test]
    fn test_missing_var_is_an_error() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "api_key: \"${{HOLDERSCAN_YAML_TEST_MISSING}}\"")?;
        assert!(load_yaml_with_env(file.path()).is_err());
        Ok(())
    }
}
