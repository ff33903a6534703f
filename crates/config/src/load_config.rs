// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use std::path::{Path, PathBuf};

use path_clean::clean;

pub const DEFAULT_CONFIG_NAME: &str = "holderscan.config.yaml";

pub type FindInParent = fn(&Path, &str) -> Option<PathBuf>;

/// Walk from `path` towards the root returning the first `filename` found.
pub fn find_in_parent(path: &Path, filename: &str) -> Option<PathBuf> {
    path.ancestors()
        .map(|dir| dir.join(filename))
        .find(|candidate| candidate.exists())
}

/// Precedence: explicit cli file, then a file found above cwd, then the os config dir.
pub fn resolve_config_path(
    find_in_parent: FindInParent,
    cwd: &Path,
    default_config_dir: &Path,
    cli_file: Option<&Path>,
) -> PathBuf {
    match cli_file {
        Some(file) if file.is_absolute() => file.to_path_buf(),
        Some(file) => clean(cwd.join(file)),
        None => find_in_parent(cwd, DEFAULT_CONFIG_NAME)
            .unwrap_or_else(|| clean(default_config_dir.join(DEFAULT_CONFIG_NAME))),
    }
}
