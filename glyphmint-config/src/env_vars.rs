//! Environment variable substitution for config file processing.
//!
//! Only allowlisted variables (and `GLYPHMINT_*` prefixed ones) are resolved
//! so that a shared config file cannot pull arbitrary secrets into output
//! paths or log lines.

use regex::Regex;
use std::sync::LazyLock;

/// Regex pattern for matching `${VAR_NAME}` or `${VAR_NAME:-default_value}` syntax.
static ENV_VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-((?:[^}\\]|\\.)*))?}")
        .expect("env-var substitution regex is a compile-time constant and must be valid")
});

/// Environment variables that are safe to substitute in config files.
pub const ALLOWED_ENV_VARS: &[&str] = &[
    "HOME",
    "USER",
    "USERPROFILE",
    "XDG_CONFIG_HOME",
    "XDG_DATA_HOME",
    "XDG_CACHE_HOME",
    "TMPDIR",
    "TEMP",
    "TMP",
    "FONTS_DIR",
];

/// Check whether a variable name is on the substitution allowlist.
pub fn is_env_var_allowed(var_name: &str) -> bool {
    ALLOWED_ENV_VARS.contains(&var_name) || var_name.starts_with("GLYPHMINT_")
}

/// Substitute `${VAR_NAME}` patterns in a string with environment variable values.
///
/// - `${VAR}` is replaced with the value of `VAR`; unset variables are left as-is.
/// - `${VAR:-default}` falls back to `default` when `VAR` is unset.
/// - `$${VAR}` is an escape and produces the literal `${VAR}`.
/// - Non-allowlisted variables are left untouched and a warning is logged.
pub fn substitute_variables(input: &str) -> String {
    let escaped_placeholder = "\x00ESC_DOLLAR\x00";
    let working = input.replace("$${", escaped_placeholder);

    let result = ENV_VAR_PATTERN.replace_all(&working, |caps: &regex::Captures| {
        let var_name = &caps[1];

        if !is_env_var_allowed(var_name) {
            log::warn!(
                "Config references non-allowlisted environment variable: ${{{var_name}}} - skipped"
            );
            return caps[0].to_string();
        }

        match std::env::var(var_name) {
            Ok(val) => val,
            Err(_) => caps
                .get(2)
                .map(|m| m.as_str().replace("\\}", "}"))
                .unwrap_or_else(|| caps[0].to_string()),
        }
    });

    result.replace(escaped_placeholder, "${")
}
