/*
 *   Copyright (c) 2025 R3BL LLC
 *   All rights reserved.
 *
 *   Licensed under the Apache License, Version 2.0 (the "License");
 *   you may not use this file except in compliance with the License.
 *   You may obtain a copy of the License at
 *
 *   http://www.apache.org/licenses/LICENSE-2.0
 *
 *   Unless required by applicable law or agreed to in writing, software
 *   distributed under the License is distributed on an "AS IS" BASIS,
 *   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *   See the License for the specific language governing permissions and
 *   limitations under the License.
 */

use std::fmt::{Display, Formatter};

use crate::APP_NAME;

/// What `github-console version` prints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub name: &'static str,
    /// Git commit the binary was built from, `nil` if it wasn't recorded at build time
    /// (via the `GIT_COMMIT` environment variable).
    pub commit: &'static str,
    pub version: &'static str,
    pub os: &'static str,
    pub arch: &'static str,
}

impl Default for VersionInfo {
    fn default() -> Self {
        Self {
            name: APP_NAME,
            commit: option_env!("GIT_COMMIT").unwrap_or("nil"),
            version: env!("CARGO_PKG_VERSION"),
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
        }
    }
}

impl Display for VersionInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "name: {}", self.name)?;
        writeln!(f, "commit: {}", self.commit)?;
        writeln!(f, "version: {}", self.version)?;
        write!(f, "rust: {}/{}", self.os, self.arch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let version_info = VersionInfo {
            name: "github-console",
            commit: "nil",
            version: "0.1.0",
            os: "linux",
            arch: "x86_64",
        };
        pretty_assertions::assert_eq!(
            version_info.to_string(),
            "name: github-console\ncommit: nil\nversion: 0.1.0\nrust: linux/x86_64"
        );
    }

    #[test]
    fn test_default_uses_crate_version() {
        assert_eq!(VersionInfo::default().version, env!("CARGO_PKG_VERSION"));
    }
}
