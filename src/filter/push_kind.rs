//! Push-kind filter: matches the kind of push against a pipeline's
//! create/update restriction.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, info};
use utoipa::ToSchema;

use super::chain::WebhookFilter;
use super::response::FilterResponse;

/// Sub-events a push can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum PushActionKind {
    /// Adds or modifies file content
    PushFile,
    /// Creates a new branch
    NewBranch,
}

impl PushActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PushActionKind::PushFile => "push-file",
            PushActionKind::NewBranch => "new-branch",
        }
    }
}

impl FromStr for PushActionKind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "push-file" => Ok(PushActionKind::PushFile),
            "new-branch" => Ok(PushActionKind::NewBranch),
            _ => Err("invalid push action kind: expected 'push-file' or 'new-branch'"),
        }
    }
}

/// Three-state "check create and update" trigger setting.
///
/// Only `Enabled` lets branch-creation-only pushes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreateAndUpdateCheck {
    #[default]
    Unset,
    Enabled,
    Disabled,
}

impl From<Option<bool>> for CreateAndUpdateCheck {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => CreateAndUpdateCheck::Unset,
            Some(true) => CreateAndUpdateCheck::Enabled,
            Some(false) => CreateAndUpdateCheck::Disabled,
        }
    }
}

/// Decides whether a push's action kinds satisfy the pipeline's
/// create/update restriction.
#[derive(Debug, Clone)]
pub struct PushKindFilter {
    pipeline_id: String,
    action_list: Vec<String>,
    check_create_and_update: CreateAndUpdateCheck,
}

impl PushKindFilter {
    pub const NAME: &'static str = "push_kind";

    pub fn new(
        pipeline_id: impl Into<String>,
        action_list: impl IntoIterator<Item = impl Into<String>>,
        check_create_and_update: impl Into<CreateAndUpdateCheck>,
    ) -> Self {
        Self {
            pipeline_id: pipeline_id.into(),
            action_list: action_list.into_iter().map(Into::into).collect(),
            check_create_and_update: check_create_and_update.into(),
        }
    }

    pub fn pipeline_id(&self) -> &str {
        &self.pipeline_id
    }

    /// Unknown tokens never parse, so they count as no kind at all
    fn contains(&self, kind: PushActionKind) -> bool {
        self.action_list
            .iter()
            .filter_map(|a| PushActionKind::from_str(a).ok())
            .any(|k| k == kind)
    }

    fn matches(&self) -> bool {
        if self.action_list.is_empty() {
            return true;
        }

        match self.check_create_and_update {
            CreateAndUpdateCheck::Enabled => true,
            CreateAndUpdateCheck::Unset | CreateAndUpdateCheck::Disabled => {
                self.contains(PushActionKind::PushFile)
            }
        }
    }
}

impl WebhookFilter for PushKindFilter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn do_filter(&self, response: &mut FilterResponse) -> bool {
        debug!(
            pipeline_id = %self.pipeline_id,
            action_list = ?self.action_list,
            check_create_and_update = ?self.check_create_and_update,
            "Evaluating push kind filter"
        );

        if self.matches() {
            return true;
        }

        info!(
            pipeline_id = %self.pipeline_id,
            action_list = ?self.action_list,
            "Push kind did not satisfy create/update restriction"
        );
        response.add_failed_reason(
            &self.pipeline_id,
            Self::NAME,
            format!(
                "push action kind {:?} does not match the create/update trigger restriction",
                self.action_list
            ),
        );
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIPELINE_ID: &str = "p-8a49b34bfd834adda6e8dbaad01eedea";
    const PF: &str = "push-file";
    const NB: &str = "new-branch";

    fn run(actions: &[&str], check: Option<bool>) -> (bool, FilterResponse) {
        let filter = PushKindFilter::new(PIPELINE_ID, actions.iter().copied(), check);
        let mut response = FilterResponse::new();
        let matched = filter.do_filter(&mut response);
        (matched, response)
    }

    #[test]
    fn should_pass_empty_action_list_for_every_setting() {
        for check in [None, Some(true), Some(false)] {
            let (matched, response) = run(&[], check);

            assert!(matched, "check = {:?}", check);
            assert!(response.failed_reasons().is_empty());
        }
    }

    #[test]
    fn should_require_content_push_when_setting_unset() {
        assert!(run(&[PF], None).0);
        assert!(run(&[PF, NB], None).0);
        assert!(!run(&[NB], None).0);
        assert!(!run(&["tag-push"], None).0);
    }

    #[test]
    fn should_record_one_reason_for_new_branch_when_setting_unset() {
        // Arrange & Act
        let (matched, response) = run(&[NB], None);

        // Assert
        assert!(!matched);
        let reasons = response.failed_reasons();
        assert_eq!(reasons.len(), 1);
        assert_eq!(reasons[0].pipeline_id, PIPELINE_ID);
        assert_eq!(reasons[0].filter, PushKindFilter::NAME);
    }

    #[test]
    fn should_pass_any_actions_when_setting_enabled() {
        let cases: [&[&str]; 4] = [&[PF, NB], &[PF], &[NB], &[NB, NB]];
        for actions in cases {
            let (matched, _) = run(actions, Some(true));

            assert!(matched, "actions = {:?}", actions);
        }
    }

    #[test]
    fn should_require_content_push_when_setting_disabled() {
        assert!(run(&[PF], Some(false)).0);
        assert!(run(&[PF, NB], Some(false)).0);
        assert!(run(&[NB, PF, PF], Some(false)).0);
        assert!(!run(&[NB], Some(false)).0);
    }

    #[test]
    fn should_record_one_reason_for_branch_creation_only_push() {
        // Arrange & Act
        let (matched, response) = run(&[NB], Some(false));

        // Assert
        assert!(!matched);
        let reasons = response.failed_reasons();
        assert_eq!(reasons.len(), 1);
        assert_eq!(reasons[0].pipeline_id, PIPELINE_ID);
        assert_eq!(reasons[0].filter, PushKindFilter::NAME);
        assert!(reasons[0].message.contains("new-branch"));
    }

    #[test]
    fn should_treat_unknown_tokens_as_inert() {
        // unknown tokens never count as a content push
        let (matched, _) = run(&["tag-push", "PUSH_FILE"], Some(false));
        assert!(!matched);

        let (matched, _) = run(&["tag-push", PF], Some(false));
        assert!(matched);

        let (matched, _) = run(&["tag-push", PF, "tag-push"], None);
        assert!(matched);
    }

    #[test]
    fn should_leave_existing_reasons_untouched_on_pass() {
        // Arrange
        let mut response = FilterResponse::new();
        response.add_failed_reason("p-other", "branch", "excluded");
        let filter = PushKindFilter::new(PIPELINE_ID, [PF], Some(false));

        // Act
        let matched = filter.do_filter(&mut response);

        // Assert
        assert!(matched);
        assert_eq!(response.failed_reasons().len(), 1);
        assert_eq!(response.failed_reasons()[0].pipeline_id, "p-other");
    }

    #[test]
    fn should_convert_optional_bool_without_collapsing_unset() {
        assert_eq!(CreateAndUpdateCheck::from(None), CreateAndUpdateCheck::Unset);
        assert_eq!(CreateAndUpdateCheck::from(Some(true)), CreateAndUpdateCheck::Enabled);
        assert_eq!(CreateAndUpdateCheck::from(Some(false)), CreateAndUpdateCheck::Disabled);
    }

    #[test]
    fn should_parse_action_kind_tokens() {
        assert_eq!("push-file".parse::<PushActionKind>(), Ok(PushActionKind::PushFile));
        assert_eq!("new-branch".parse::<PushActionKind>(), Ok(PushActionKind::NewBranch));
        assert!("PUSH_FILE".parse::<PushActionKind>().is_err());
    }
}
