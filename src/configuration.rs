// Not a real configuration, but one place that lists all environment variables with their usages.

use std::env;

pub const STRICT_ENV_NAME: &str = "TABLESQL_STRICT";

/// Turn on strict table validation for `ddl` without passing `--strict`.
/// Any value other than empty, `0` or `false` counts as set.
pub fn strict_from_env() -> bool {
    env::var(STRICT_ENV_NAME)
        .map(|value| is_truthy(&value))
        .unwrap_or(false)
}

fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    !(value.is_empty() || value == "0" || value.eq_ignore_ascii_case("false"))
}
