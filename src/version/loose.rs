//! version::loose
//!
//! Lenient version parsing on top of [`semver`].
//!
//! Tags are written by people, so the text a filter extracts is often not
//! strict semver. The loose grammar accepts:
//!
//! - one to three numeric components (`1`, `1.2`, `1.2.3`); missing ones are 0
//! - leading zeros in numeric components and numeric pre-release identifiers
//! - `_` in pre-release and build identifiers, read as `-`
//! - `+build` metadata; further `+` signs inside it are read as `-`
//!
//! The result is an ordinary [`semver::Version`], so ordering follows semver
//! precedence: a release is greater than its pre-releases, numeric
//! identifiers compare numerically and alphanumeric ones lexically.

use semver::{BuildMetadata, Prerelease, Version};
use thiserror::Error;

/// Text that is not a version even under the loose grammar.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct LooseVersionError(String);

/// Parse a version leniently.
///
/// # Example
///
/// ```
/// use gitversioning::version::parse_loose;
///
/// let version = parse_loose("1.2").unwrap();
/// assert_eq!(version.to_string(), "1.2.0");
///
/// let pre = parse_loose("2.0-rc_1").unwrap();
/// assert_eq!(pre.to_string(), "2.0.0-rc-1");
/// assert!(pre < parse_loose("2.0").unwrap());
/// ```
pub fn parse_loose(text: &str) -> Result<Version, LooseVersionError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(LooseVersionError("empty version".to_string()));
    }

    let (rest, build) = match text.split_once('+') {
        Some((rest, build)) => (rest, Some(build)),
        None => (text, None),
    };
    let (core, pre) = match rest.split_once('-') {
        Some((core, pre)) => (core, Some(pre)),
        None => (rest, None),
    };

    let numbers = core
        .split('.')
        .map(parse_component)
        .collect::<Result<Vec<u64>, _>>()?;
    if numbers.len() > 3 {
        return Err(LooseVersionError(format!(
            "expected at most 3 numeric components, got {}",
            numbers.len()
        )));
    }

    let pre = match pre {
        Some(pre) => {
            Prerelease::new(&normalize_pre_release(pre)?).map_err(|e| {
                LooseVersionError(format!("invalid pre-release '{}': {}", pre, e))
            })?
        }
        None => Prerelease::EMPTY,
    };
    let build = match build {
        Some(build) => BuildMetadata::new(&normalize_build(build)?)
            .map_err(|e| LooseVersionError(format!("invalid build metadata '{}': {}", build, e)))?,
        None => BuildMetadata::EMPTY,
    };

    Ok(Version {
        major: numbers[0],
        minor: numbers.get(1).copied().unwrap_or(0),
        patch: numbers.get(2).copied().unwrap_or(0),
        pre,
        build,
    })
}

fn parse_component(component: &str) -> Result<u64, LooseVersionError> {
    if component.is_empty() || !component.chars().all(|c| c.is_ascii_digit()) {
        return Err(LooseVersionError(format!(
            "'{}' is not a numeric version component",
            component
        )));
    }
    component
        .parse()
        .map_err(|_| LooseVersionError(format!("version component '{}' is too large", component)))
}

fn normalize_pre_release(pre: &str) -> Result<String, LooseVersionError> {
    let normalized = normalize_identifiers(pre, "pre-release")?;
    let identifiers: Vec<&str> = normalized
        .split('.')
        .map(|identifier| {
            if !identifier.is_empty() && identifier.chars().all(|c| c.is_ascii_digit()) {
                let trimmed = identifier.trim_start_matches('0');
                if trimmed.is_empty() {
                    "0"
                } else {
                    trimmed
                }
            } else {
                identifier
            }
        })
        .collect();
    Ok(identifiers.join("."))
}

fn normalize_build(build: &str) -> Result<String, LooseVersionError> {
    Ok(normalize_identifiers(build, "build metadata")?.replace('+', "-"))
}

fn normalize_identifiers(text: &str, what: &str) -> Result<String, LooseVersionError> {
    if text.is_empty() {
        return Err(LooseVersionError(format!("empty {}", what)));
    }
    Ok(text.replace('_', "-"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(text: &str) -> Version {
        parse_loose(text).unwrap()
    }

    mod grammar {
        use super::*;

        #[test]
        fn strict_versions() {
            assert_eq!(v("1.2.3"), Version::new(1, 2, 3));
            assert_eq!(v("0.0.0"), Version::new(0, 0, 0));
        }

        #[test]
        fn missing_components_default_to_zero() {
            assert_eq!(v("1"), Version::new(1, 0, 0));
            assert_eq!(v("1.2"), Version::new(1, 2, 0));
        }

        #[test]
        fn leading_zeros_tolerated() {
            assert_eq!(v("01.002.3"), Version::new(1, 2, 3));
            assert_eq!(v("1.0.0-rc.01").to_string(), "1.0.0-rc.1");
        }

        #[test]
        fn pre_release_and_build() {
            let version = v("1.0-beta_2+build_7");
            assert_eq!(version.pre.as_str(), "beta-2");
            assert_eq!(version.build.as_str(), "build-7");
        }

        #[test]
        fn repeated_plus_folded_into_build() {
            let version = v("1.0-rc+a+b");
            assert_eq!(version.pre.as_str(), "rc");
            assert_eq!(version.build.as_str(), "a-b");
            assert_eq!(v("2+x+y.1").build.as_str(), "x-y.1");
        }

        #[test]
        fn rejects_garbage() {
            assert!(parse_loose("").is_err());
            assert!(parse_loose("x.1").is_err());
            assert!(parse_loose("1..2").is_err());
            assert!(parse_loose("1.2.3.4").is_err());
            assert!(parse_loose("1.0-").is_err());
            assert!(parse_loose("1.0+").is_err());
            assert!(parse_loose("1.0-rc..1").is_err());
            assert!(parse_loose("99999999999999999999").is_err());
        }
    }

    mod ordering {
        use super::*;

        #[test]
        fn numeric_not_lexical() {
            assert!(v("1.10.0") > v("1.2.0"));
            assert!(v("1.10") > v("1.9.9"));
        }

        #[test]
        fn release_beats_pre_release() {
            assert!(v("1.0.0") > v("1.0.0-rc1"));
            assert!(v("1.0") > v("1.0-SNAPSHOT"));
        }

        #[test]
        fn pre_release_identifiers() {
            assert!(v("1.0.0-alpha") < v("1.0.0-beta"));
            assert!(v("1.0.0-rc.2") < v("1.0.0-rc.10"));
            assert!(v("1.0.0-1") < v("1.0.0-alpha"));
        }

        #[test]
        fn partial_equals_padded() {
            assert_eq!(v("2.1"), v("2.1.0"));
        }
    }
}
