use crate::error::Result;
use crate::utils::changelog::{ReleaseHeading, find_latest_release};
use crate::utils::config::ReleaseConfig;
use crate::utils::manifest::{DeclaredVersion, read_declared_version};
use serde::Serialize;
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// result of comparing the latest changelog release with the build version
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckOutcome {
    Match {
        release: ReleaseHeading,
        declared: DeclaredVersion,
    },
    Mismatch {
        release: ReleaseHeading,
        declared: DeclaredVersion,
    },
    UnknownRelease,
}

impl CheckOutcome {
    /// compare by plain string equality
    pub fn decide(release: Option<ReleaseHeading>, declared: DeclaredVersion) -> Self {
        match release {
            Some(release) if release.version == declared.version => {
                CheckOutcome::Match { release, declared }
            }
            Some(release) => CheckOutcome::Mismatch { release, declared },
            None => CheckOutcome::UnknownRelease,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CheckOutcome::Match { .. })
    }

    /// process exit status for this outcome
    pub fn exit_code(&self) -> u8 {
        if self.is_success() { 0 } else { 1 }
    }
}

impl fmt::Display for CheckOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckOutcome::Match { release, declared } => write!(
                f,
                "Latest release is {} which matches build version {}",
                release.version, declared
            ),
            CheckOutcome::Mismatch { release, declared } => write!(
                f,
                "Latest release is {} but build version is {}",
                release.version, declared
            ),
            CheckOutcome::UnknownRelease => write!(f, "Unknown release"),
        }
    }
}

/// verifies that the latest changelog release matches the declared version
#[derive(Debug, Clone)]
pub struct VersionConsistencyChecker {
    manifest_path: PathBuf,
    changelog_path: PathBuf,
}

impl VersionConsistencyChecker {
    pub fn new(manifest_path: impl Into<PathBuf>, changelog_path: impl Into<PathBuf>) -> Self {
        Self {
            manifest_path: manifest_path.into(),
            changelog_path: changelog_path.into(),
        }
    }

    /// resolve the configured file names against a project root
    pub fn from_config<P: AsRef<Path>>(root: P, config: &ReleaseConfig) -> Self {
        let root = root.as_ref();
        Self::new(
            root.join(&config.manifest_file),
            root.join(&config.changelog_file),
        )
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    pub fn changelog_path(&self) -> &Path {
        &self.changelog_path
    }

    /// load both inputs and decide, without printing anything
    ///
    /// unreadable or malformed inputs are errors; a mismatch or a missing
    /// heading is an outcome
    pub fn evaluate(&self) -> Result<CheckOutcome> {
        let declared = read_declared_version(&self.manifest_path)?;
        let release = find_latest_release(&self.changelog_path)?;

        if let Some(ref release) = release {
            log::debug!(
                "latest release {} dated {} at {}:{}",
                release.version,
                release.date,
                self.changelog_path.display(),
                release.line_number
            );
            if release.parsed_date().is_none() {
                log::warn!("release {} has an invalid date {}", release.version, release.date);
            }
        }

        let outcome = CheckOutcome::decide(release, declared);

        if let CheckOutcome::Mismatch { release, declared } = &outcome
            && let (Some(latest), Some(build)) = (release.semver(), declared.semver())
        {
            let relation = match build.cmp(&latest) {
                std::cmp::Ordering::Less => "behind",
                std::cmp::Ordering::Equal => "equivalent to",
                std::cmp::Ordering::Greater => "ahead of",
            };
            log::debug!(
                "build version {} is {} the latest release {}",
                build,
                relation,
                latest
            );
        }

        Ok(outcome)
    }

    /// write the outcome message, success to `out` and failures to `err`
    pub fn report<O: Write, E: Write>(
        outcome: &CheckOutcome,
        out: &mut O,
        err: &mut E,
    ) -> io::Result<()> {
        if outcome.is_success() {
            writeln!(out, "{}", outcome)
        } else {
            writeln!(err, "{}", outcome)
        }
    }

    /// evaluate and report, true when the versions match
    ///
    /// the binary passes stdout and stderr
    pub fn check<O: Write, E: Write>(&self, out: &mut O, err: &mut E) -> Result<bool> {
        let outcome = self.evaluate()?;
        Self::report(&outcome, out, err)?;
        Ok(outcome.is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup(version: &str, changelog: &str) -> (TempDir, VersionConsistencyChecker) {
        let temp_dir = TempDir::new().unwrap();
        let manifest = temp_dir.path().join("library.json");
        let changelog_path = temp_dir.path().join("changelog.rst");
        fs::write(&manifest, format!(r#"{{ "version": "{}" }}"#, version)).unwrap();
        fs::write(&changelog_path, changelog).unwrap();

        let checker = VersionConsistencyChecker::new(manifest, changelog_path);
        (temp_dir, checker)
    }

    #[test]
    fn test_matching_release() {
        let (_dir, checker) = setup("1.2.3", "1.2.3_ |--| 2024-05-01\n");
        let outcome = checker.evaluate().unwrap();

        assert!(outcome.is_success());
        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(
            outcome.to_string(),
            "Latest release is 1.2.3 which matches build version 1.2.3"
        );
        assert_eq!(outcome.to_string().matches("1.2.3").count(), 2);
    }

    #[test]
    fn test_mismatched_release() {
        let (_dir, checker) = setup("1.2.3", "1.2.4_ |--| 2024-05-01\n");
        let outcome = checker.evaluate().unwrap();

        assert!(!outcome.is_success());
        assert_eq!(outcome.exit_code(), 1);
        assert_eq!(
            outcome.to_string(),
            "Latest release is 1.2.4 but build version is 1.2.3"
        );
    }

    #[test]
    fn test_unknown_release() {
        let (_dir, checker) = setup("1.2.3", "Change log\n==========\n\nnothing yet\n");
        let outcome = checker.evaluate().unwrap();

        assert_eq!(outcome, CheckOutcome::UnknownRelease);
        assert_eq!(outcome.to_string(), "Unknown release");
        assert_eq!(outcome.exit_code(), 1);
    }

    #[test]
    fn test_only_first_heading_counts() {
        let (_dir, checker) = setup(
            "1.2.3",
            "1.2.3_ |--| 2024-05-01\n\n1.2.2_ |--| 2024-04-01\n",
        );
        assert!(checker.evaluate().unwrap().is_success());

        let (_dir, checker) = setup(
            "1.2.3",
            "1.2.4_ |--| 2024-06-01\n\n1.2.3_ |--| 2024-05-01\n",
        );
        assert!(!checker.evaluate().unwrap().is_success());
    }

    #[test]
    fn test_string_equality_not_semver() {
        let (_dir, checker) = setup("01.2.3", "1.2.3_ |--| 2024-05-01\n");
        assert!(!checker.evaluate().unwrap().is_success());
    }

    #[test]
    fn test_report_routes_by_outcome() {
        let success = CheckOutcome::decide(
            Some(ReleaseHeading::new("1.0.0", "2020-01-01", 1)),
            DeclaredVersion::new("1.0.0", PathBuf::from("library.json")),
        );
        let mut out = Vec::new();
        let mut err = Vec::new();
        VersionConsistencyChecker::report(&success, &mut out, &mut err).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Latest release is 1.0.0 which matches build version 1.0.0\n"
        );
        assert!(err.is_empty());

        let mut out = Vec::new();
        let mut err = Vec::new();
        VersionConsistencyChecker::report(&CheckOutcome::UnknownRelease, &mut out, &mut err)
            .unwrap();
        assert!(out.is_empty());
        assert_eq!(String::from_utf8(err).unwrap(), "Unknown release\n");
    }

    #[test]
    fn test_check_reports_and_returns_match() {
        let (_dir, checker) = setup("2.0.1", "2.0.1_ |--| 2025-03-04\n");
        let mut out = Vec::new();
        let mut err = Vec::new();

        assert!(checker.check(&mut out, &mut err).unwrap());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Latest release is 2.0.1 which matches build version 2.0.1\n"
        );
        assert!(err.is_empty());
    }

    #[test]
    fn test_check_reports_and_returns_mismatch() {
        let (_dir, checker) = setup("2.0.1", "2.1.0_ |--| 2025-06-07\n");
        let mut out = Vec::new();
        let mut err = Vec::new();

        assert!(!checker.check(&mut out, &mut err).unwrap());
        assert!(out.is_empty());
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "Latest release is 2.1.0 but build version is 2.0.1\n"
        );

        let (_dir, checker) = setup("2.0.1", "no headings here\n");
        let mut out = Vec::new();
        let mut err = Vec::new();
        assert!(!checker.check(&mut out, &mut err).unwrap());
        assert_eq!(String::from_utf8(err).unwrap(), "Unknown release\n");
    }

    #[test]
    fn test_missing_changelog_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let manifest = temp_dir.path().join("library.json");
        fs::write(&manifest, r#"{ "version": "1.0.0" }"#).unwrap();

        let checker = VersionConsistencyChecker::new(manifest, temp_dir.path().join("nope.rst"));
        assert!(checker.evaluate().is_err());
        assert!(checker.check(&mut Vec::new(), &mut Vec::new()).is_err());
    }

    #[test]
    fn test_from_config_joins_root() {
        let config = ReleaseConfig::default();
        let checker = VersionConsistencyChecker::from_config("/project", &config);

        assert_eq!(checker.manifest_path(), Path::new("/project/library.json"));
        assert_eq!(
            checker.changelog_path(),
            Path::new("/project/docs/changelog.rst")
        );
    }
}
