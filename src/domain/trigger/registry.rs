//! Registry of pipeline trigger rules

use std::collections::HashSet;
use std::fs;
use tracing::{info, warn};
use validator::Validate;

use super::dto::TriggerRule;
use crate::config::{AppConfig, ConfigError};
use crate::filter::{BranchFilter, BranchPattern, FilterChain, PushKindFilter};

/// Trigger rule with its branch patterns compiled
#[derive(Debug, Clone)]
pub struct CompiledRule {
    rule: TriggerRule,
    included: Vec<BranchPattern>,
    excluded: Vec<BranchPattern>,
}

impl CompiledRule {
    pub fn compile(rule: TriggerRule) -> Result<Self, ConfigError> {
        rule.validate().map_err(|e| ConfigError::InvalidRule {
            pipeline_id: rule.pipeline_id.clone(),
            reason: e.to_string(),
        })?;

        let compile_all = |raw: &[String]| -> Result<Vec<BranchPattern>, ConfigError> {
            raw.iter()
                .map(|p| {
                    BranchPattern::new(p).map_err(|e| ConfigError::InvalidRule {
                        pipeline_id: rule.pipeline_id.clone(),
                        reason: format!("bad branch pattern '{}': {}", p, e),
                    })
                })
                .collect()
        };
        let included = compile_all(&rule.branches)?;
        let excluded = compile_all(&rule.exclude_branches)?;

        Ok(Self {
            rule,
            included,
            excluded,
        })
    }

    pub fn rule(&self) -> &TriggerRule {
        &self.rule
    }

    pub fn pipeline_id(&self) -> &str {
        &self.rule.pipeline_id
    }

    pub fn applies_to_repository(&self, repository: &str) -> bool {
        self.rule
            .repository
            .as_deref()
            .map_or(true, |r| r.eq_ignore_ascii_case(repository))
    }

    /// Filters a push on `git_ref` with `action_list` must pass to trigger
    /// this pipeline.
    pub fn filter_chain(&self, git_ref: &str, action_list: &[String]) -> FilterChain {
        FilterChain::default()
            .push(BranchFilter::new(
                self.pipeline_id(),
                git_ref,
                self.included.clone(),
                self.excluded.clone(),
            ))
            .push(PushKindFilter::new(
                self.pipeline_id(),
                action_list.iter().cloned(),
                self.rule.check_create_and_update,
            ))
    }
}

/// Trigger rules in registration order, unique by pipeline id
#[derive(Debug, Default, Clone)]
pub struct TriggerRegistry {
    rules: Vec<CompiledRule>,
}

impl TriggerRegistry {
    pub fn from_rules(rules: Vec<TriggerRule>) -> Result<Self, ConfigError> {
        let mut seen = HashSet::new();
        let mut compiled = Vec::with_capacity(rules.len());

        for rule in rules {
            if !seen.insert(rule.pipeline_id.clone()) {
                return Err(ConfigError::DuplicateRule(rule.pipeline_id));
            }
            compiled.push(CompiledRule::compile(rule)?);
        }

        Ok(Self { rules: compiled })
    }

    /// Load a JSON array of rules from `path`
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::RulesUnreadable {
            path: path.to_string(),
            source,
        })?;
        let rules: Vec<TriggerRule> = serde_json::from_str(&content)?;
        let registry = Self::from_rules(rules)?;

        if registry.is_empty() {
            warn!(path = %path, "Trigger rules file holds no rules");
        } else {
            info!(path = %path, count = registry.len(), "Loaded trigger rules");
        }
        Ok(registry)
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        match &config.trigger_rules_path {
            Some(path) => Self::load(path),
            None => {
                warn!("TRIGGER_RULES_PATH is not set; no pipeline will be triggered");
                Ok(Self::default())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> impl Iterator<Item = &TriggerRule> {
        self.rules.iter().map(CompiledRule::rule)
    }

    pub fn for_repository<'a>(
        &'a self,
        repository: &'a str,
    ) -> impl Iterator<Item = &'a CompiledRule> + 'a {
        self.rules
            .iter()
            .filter(move |r| r.applies_to_repository(repository))
    }
}
