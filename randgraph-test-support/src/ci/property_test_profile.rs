//! Property-test run profile read from environment overrides.
//!
//! Every property suite in the workspace loads the same profile, so one pair
//! of variables scales them all.

use std::env;

/// Environment variable controlling proptest case counts.
pub const PROGTEST_CASES_ENV_KEY: &str = "PROGTEST_CASES";
/// Environment variable controlling proptest process forking.
pub const RANDGRAPH_PBT_FORK_ENV_KEY: &str = "RANDGRAPH_PBT_FORK";

/// Runtime profile for property-test execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Loads a profile from the process environment, falling back to the
    /// provided defaults for absent or malformed values.
    ///
    /// # Examples
    ///
    /// ```
    /// use randgraph_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self::from_lookup(default_cases, default_fork, |key| env::var(key).ok())
    }

    /// Loads a profile through an arbitrary variable lookup.
    ///
    /// # Examples
    ///
    /// ```
    /// use randgraph_test_support::ci::property_test_profile::{
    ///     PROGTEST_CASES_ENV_KEY, ProptestRunProfile,
    /// };
    ///
    /// let profile = ProptestRunProfile::from_lookup(64, false, |key| {
    ///     (key == PROGTEST_CASES_ENV_KEY).then(|| "12".to_owned())
    /// });
    /// assert_eq!(profile.cases(), 12);
    /// assert!(!profile.fork());
    /// ```
    #[must_use]
    pub fn from_lookup<F>(default_cases: u32, default_fork: bool, lookup: F) -> Self
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let cases = resolve(PROGTEST_CASES_ENV_KEY, default_cases, &lookup, parse_cases);
        let fork = resolve(RANDGRAPH_PBT_FORK_ENV_KEY, default_fork, &lookup, parse_bool);
        Self { cases, fork }
    }

    /// Number of cases to run per property.
    #[must_use]
    pub fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether to run proptest cases in forked subprocesses.
    #[must_use]
    pub fn fork(&self) -> bool {
        self.fork
    }
}

fn resolve<T, L, P>(key: &'static str, default: T, lookup: &L, parse: P) -> T
where
    L: Fn(&'static str) -> Option<String>,
    P: Fn(&str) -> Result<T, String>,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    parse(&raw).unwrap_or_else(|reason| {
        tracing::warn!(
            env = key,
            raw = %raw,
            reason = %reason,
            "ignoring malformed property-test override",
        );
        default
    })
}

fn parse_cases(raw: &str) -> Result<u32, String> {
    match raw.trim().parse::<u32>() {
        Ok(0) => Err("cases must be > 0".to_owned()),
        Ok(cases) => Ok(cases),
        Err(error) => Err(format!("parse error: {error}")),
    }
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err("expected one of: true/false/1/0/yes/no/on/off".to_owned()),
    }
}
