//! Named generation-parameter presets.
//!
//! Profiles are TOML files embedded in the binary at compile time. Fields
//! omitted from a profile inherit the built-in defaults (the `Default` impl
//! on [`GenParams`]). An argument that looks like a path loads a TOML file
//! from disk instead.

use crate::generator::GenParams;

/// Error type for profile lookup failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownProfileError(pub String);

impl std::fmt::Display for UnknownProfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown profile '{}', available profiles: {}",
            self.0,
            available_profiles().join(", ")
        )
    }
}

impl std::error::Error for UnknownProfileError {}

// Embedded profile TOML data (compiled into the binary).
static PROFILES: &[(&str, &str)] = &[
    ("default", include_str!("../profiles/default.toml")),
    ("dense", include_str!("../profiles/dense.toml")),
    ("sparse", include_str!("../profiles/sparse.toml")),
];

/// Returns a list of available profile names.
pub fn available_profiles() -> Vec<&'static str> {
    PROFILES.iter().map(|(name, _)| *name).collect()
}

/// Parse a TOML string into generation parameters, using defaults for
/// omitted fields.
fn parse_profile_toml(toml_str: &str) -> Result<GenParams, String> {
    toml::from_str(toml_str).map_err(|e| format!("failed to parse profile TOML: {e}"))
}

/// Get a profile by name, or load one from a file path.
///
/// If `name_or_path` contains `/` or ends with `.toml`, it is treated as a
/// file path and loaded from disk. Otherwise it is looked up among the
/// embedded profiles.
pub fn get_profile(name_or_path: &str) -> Result<GenParams, UnknownProfileError> {
    if name_or_path.contains('/') || name_or_path.ends_with(".toml") {
        let content = std::fs::read_to_string(name_or_path).map_err(|e| {
            UnknownProfileError(format!(
                "failed to read profile file '{}': {}",
                name_or_path, e
            ))
        })?;
        parse_profile_toml(&content).map_err(|e| {
            UnknownProfileError(format!(
                "failed to parse profile file '{}': {}",
                name_or_path, e
            ))
        })
    } else {
        for (name, toml_str) in PROFILES {
            if *name == name_or_path {
                return parse_profile_toml(toml_str).map_err(|e| {
                    UnknownProfileError(format!("failed to parse embedded profile '{}': {}", name, e))
                });
            }
        }
        Err(UnknownProfileError(name_or_path.to_string()))
    }
}
