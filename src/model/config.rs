use serde::{Deserialize, Serialize};

use crate::model::facts::Period;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("empty pattern in {field}")]
    EmptyPattern { field: &'static str },

    #[error("scope {name:?} lists no parliaments")]
    EmptyScope { name: String },

    #[error("duplicate scope name {name:?}")]
    DuplicateScope { name: String },

    #[error("unknown scope {name:?}")]
    UnknownScope { name: String },

    #[error("invalid year range {start}..={end}")]
    InvalidYearRange { start: i32, end: i32 },
}

/// Tie convention for percentile-of-score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentileKind {
    /// Share of the population strictly below the value.
    Strict,
    /// Share of the population at or below the value.
    Weak,
    /// Average of `Strict` and `Weak`.
    Mean,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedScope {
    pub name: String,
    pub parliaments: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub presiding_officer_patterns: Vec<String>,
    pub appointee_exemption_keywords: Vec<String>,
    pub percentile_kind: PercentileKind,
    pub earliest_sitting: String,
    pub scopes: Vec<NamedScope>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self::default_v1()
    }
}

impl MetricsConfig {
    pub fn default_v1() -> Self {
        Self {
            presiding_officer_patterns: vec![
                "deputy".to_string(),
                "speaker".to_string(),
                "chairman".to_string(),
            ],
            appointee_exemption_keywords: vec!["mayor".to_string()],
            percentile_kind: PercentileKind::Mean,
            earliest_sitting: "2012-09-10".to_string(),
            scopes: vec![
                NamedScope {
                    name: "13th Parliament".to_string(),
                    parliaments: vec![13],
                },
                NamedScope {
                    name: "14th Parliament".to_string(),
                    parliaments: vec![14],
                },
                NamedScope {
                    name: "All".to_string(),
                    parliaments: vec![12, 13, 14],
                },
            ],
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: MetricsConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self
            .presiding_officer_patterns
            .iter()
            .any(|p| p.trim().is_empty())
        {
            return Err(ConfigError::EmptyPattern {
                field: "presiding_officer_patterns",
            });
        }
        if self
            .appointee_exemption_keywords
            .iter()
            .any(|p| p.trim().is_empty())
        {
            return Err(ConfigError::EmptyPattern {
                field: "appointee_exemption_keywords",
            });
        }
        for (i, scope) in self.scopes.iter().enumerate() {
            if scope.parliaments.is_empty() {
                return Err(ConfigError::EmptyScope {
                    name: scope.name.clone(),
                });
            }
            if self.scopes[..i].iter().any(|s| s.name == scope.name) {
                return Err(ConfigError::DuplicateScope {
                    name: scope.name.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn scope(&self, name: &str) -> Option<&NamedScope> {
        self.scopes.iter().find(|s| s.name == name)
    }

    /// True when the member's earliest sitting predates the dataset, so
    /// their figures only cover part of their tenure.
    pub fn predates_dataset(&self, earliest_sitting: &str) -> bool {
        earliest_sitting <= self.earliest_sitting.as_str()
    }
}

/// Rows kept for one computation. `None` on a field means no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeSelection {
    pub parliaments: Option<Vec<u32>>,
    pub years: Option<(i32, i32)>,
}

impl ScopeSelection {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn parliaments(parliaments: &[u32]) -> Self {
        Self {
            parliaments: Some(parliaments.to_vec()),
            years: None,
        }
    }

    pub fn years(start: i32, end: i32) -> Result<Self, ConfigError> {
        if end < start {
            return Err(ConfigError::InvalidYearRange { start, end });
        }
        Ok(Self {
            parliaments: None,
            years: Some((start, end)),
        })
    }

    pub fn named(config: &MetricsConfig, name: &str) -> Result<Self, ConfigError> {
        let scope = config.scope(name).ok_or_else(|| ConfigError::UnknownScope {
            name: name.to_string(),
        })?;
        Ok(Self::parliaments(&scope.parliaments))
    }

    pub fn contains(&self, period: &Period) -> bool {
        if let Some(parliaments) = &self.parliaments {
            match period.parliament {
                Some(p) if parliaments.contains(&p) => {}
                _ => return false,
            }
        }
        if let Some((start, end)) = self.years {
            if period.year < start || period.year > end {
                return false;
            }
        }
        true
    }
}
