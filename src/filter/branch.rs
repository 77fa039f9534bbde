//! Branch include/exclude filter

use regex::Regex;
use tracing::debug;

use super::chain::WebhookFilter;
use super::response::FilterResponse;

const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// Branch pattern with `*` wildcards, anchored on both ends
#[derive(Debug, Clone)]
pub struct BranchPattern {
    raw: String,
    regex: Regex,
}

impl BranchPattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let escaped = pattern
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");
        let regex = Regex::new(&format!("^{}$", escaped))?;
        Ok(Self {
            raw: pattern.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_match(&self, branch: &str) -> bool {
        self.regex.is_match(branch)
    }
}

/// Strip `refs/heads/` from a git ref
pub fn branch_name(git_ref: &str) -> &str {
    git_ref.strip_prefix(BRANCH_REF_PREFIX).unwrap_or(git_ref)
}

/// Rejects pushes to excluded branches, or to branches outside a non-empty
/// include list. On a match the branch is exposed as the `branch` parameter.
#[derive(Debug, Clone)]
pub struct BranchFilter {
    pipeline_id: String,
    branch: String,
    included: Vec<BranchPattern>,
    excluded: Vec<BranchPattern>,
}

impl BranchFilter {
    pub const NAME: &'static str = "branch";

    pub fn new(
        pipeline_id: impl Into<String>,
        git_ref: &str,
        included: Vec<BranchPattern>,
        excluded: Vec<BranchPattern>,
    ) -> Self {
        Self {
            pipeline_id: pipeline_id.into(),
            branch: branch_name(git_ref).to_string(),
            included,
            excluded,
        }
    }
}

impl WebhookFilter for BranchFilter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn do_filter(&self, response: &mut FilterResponse) -> bool {
        if let Some(pattern) = self.excluded.iter().find(|p| p.is_match(&self.branch)) {
            debug!(
                pipeline_id = %self.pipeline_id,
                branch = %self.branch,
                pattern = pattern.as_str(),
                "Branch excluded"
            );
            response.add_failed_reason(
                &self.pipeline_id,
                Self::NAME,
                format!("branch {} is excluded by {}", self.branch, pattern.as_str()),
            );
            return false;
        }

        if !self.included.is_empty() && !self.included.iter().any(|p| p.is_match(&self.branch)) {
            debug!(
                pipeline_id = %self.pipeline_id,
                branch = %self.branch,
                "Branch not in include list"
            );
            response.add_failed_reason(
                &self.pipeline_id,
                Self::NAME,
                format!("branch {} is not included", self.branch),
            );
            return false;
        }

        response.add_param("branch", self.branch.as_str());
        true
    }
}
