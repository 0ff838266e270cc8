//! Diagnostic logging policy.
//!
//! Traversal components receive a [`LogPolicy`] at construction and consult
//! [`LogPolicy::enabled`] before emitting per-node events, so a quiet policy
//! costs one comparison per node. Events themselves go through `tracing`
//! under the per-domain targets below; [`LogPolicy::env_filter`] renders the
//! same policy for a `tracing-subscriber` host.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Ordered severity. `Off` disables a domain entirely.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl Severity {
    /// The matching `tracing` level (`None` for `Off`).
    #[must_use]
    pub fn level(self) -> Option<tracing::Level> {
        match self {
            Self::Off => None,
            Self::Error => Some(tracing::Level::ERROR),
            Self::Warn => Some(tracing::Level::WARN),
            Self::Info => Some(tracing::Level::INFO),
            Self::Debug => Some(tracing::Level::DEBUG),
            Self::Trace => Some(tracing::Level::TRACE),
        }
    }
}

/// A component that emits diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogDomain {
    Engine,
    Tree,
    Controller,
}

impl LogDomain {
    /// The `tracing` target events of this domain are emitted under.
    #[must_use]
    pub fn target(self) -> &'static str {
        match self {
            Self::Engine => "wayfinder::engine",
            Self::Tree => "wayfinder::tree",
            Self::Controller => "wayfinder::controller",
        }
    }
}

/// Per-domain severity thresholds with a fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogPolicy {
    pub default: Severity,
    pub domains: BTreeMap<LogDomain, Severity>,
}

impl LogPolicy {
    /// Everything off.
    #[must_use]
    pub fn quiet() -> Self {
        Self {
            default: Severity::Off,
            domains: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_domain(mut self, domain: LogDomain, severity: Severity) -> Self {
        self.domains.insert(domain, severity);
        self
    }

    /// Effective threshold for `domain`.
    #[must_use]
    pub fn severity(&self, domain: LogDomain) -> Severity {
        self.domains.get(&domain).copied().unwrap_or(self.default)
    }

    /// Whether an event of `severity` in `domain` should be emitted.
    #[must_use]
    pub fn enabled(&self, domain: LogDomain, severity: Severity) -> bool {
        severity != Severity::Off && severity <= self.severity(domain)
    }

    /// Render as `EnvFilter` directives: the fallback first, then one
    /// `target=level` directive per overridden domain.
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::new(self.directives())
    }

    fn directives(&self) -> String {
        let overrides = self.domains.iter().map(|(domain, severity)| {
            format!("{}={}", domain.target(), LevelFilter::from(severity.level()))
        });
        std::iter::once(LevelFilter::from(self.default.level()).to_string())
            .chain(overrides)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Install a fmt subscriber filtered by `policy`.
///
/// Returns `false` if a global subscriber was already installed; the
/// existing one is left in place.
pub fn init_tracing(policy: &LogPolicy) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(policy.env_filter())
        .with_target(true)
        .try_init()
        .is_ok()
}
