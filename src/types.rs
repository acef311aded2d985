use std::str::FromStr;
use serde::Deserialize;

/// What `execute` does when at least one response captured a failure.
///
/// - `Fail`: report the number of failures and one example, then return an
///   error (default behaviour). The execution is still kept in history.
/// - `Collect`: return the execution normally and let the caller inspect
///   `has_errors()` / `failures()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    Fail,
    Collect,
}

impl Default for ErrorPolicy {
    fn default() -> Self {
        ErrorPolicy::Fail
    }
}

impl FromStr for ErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fail" => Ok(ErrorPolicy::Fail),
            "collect" => Ok(ErrorPolicy::Collect),
            other => Err(format!(
                "invalid error_policy: {other} (expected \"fail\" or \"collect\")"
            )),
        }
    }
}

/// A TOML value that may be a single string or a list of strings.
///
/// Anything else (numbers, tables, mixed lists) fails deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    One(String),
    Many(Vec<String>),
}

impl StringOrList {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            StringOrList::One(s) => vec![s],
            StringOrList::Many(v) => v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_policy_from_str() {
        assert_eq!("Collect".parse::<ErrorPolicy>(), Ok(ErrorPolicy::Collect));
        assert_eq!(" fail".parse::<ErrorPolicy>(), Ok(ErrorPolicy::Fail));
        assert!("abort".parse::<ErrorPolicy>().is_err());
    }
}
