use crate::git::{DiffError, DiffSource};
use crate::github::{PrTarget, PrUpdater, UpdateError};
use crate::llm::{DescribeError, LlmClient};

/// Where a run ended up. Every stage failure is its own variant so "no
/// changes" is never confused with "changes we failed to describe".
#[derive(Debug)]
pub enum Outcome {
    /// Base and head have no file differences.
    NoDiff,
    DiffFailed(DiffError),
    /// The PR description was left untouched.
    DescriptionFailed(DescribeError),
    UpdateFailed(UpdateError),
    /// Dry run: the description that would have been written.
    DryRun(String),
    Updated,
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Outcome::DiffFailed(_) | Outcome::DescriptionFailed(_) | Outcome::UpdateFailed(_)
        )
    }
}

/// Diff, describe, update: in that order, once.
pub struct Pipeline<'a> {
    pub diff_source: &'a dyn DiffSource,
    pub llm: &'a dyn LlmClient,
    pub updater: &'a dyn PrUpdater,
    pub dry_run: bool,
}

impl Pipeline<'_> {
    pub fn run(&self, base: &str, head: &str, target: &PrTarget) -> Outcome {
        let diff = match self.diff_source.diff(base, head) {
            Ok(diff) => diff,
            Err(e) => {
                log::error!("Error fetching diff: {e}");
                return Outcome::DiffFailed(e);
            }
        };

        if diff.is_empty() {
            log::info!("No diff found.");
            return Outcome::NoDiff;
        }

        log::info!("Found {} changed file(s) between {base} and {head}", diff.file_count());

        let description = match self.llm.generate_pr_description(&diff) {
            Ok(text) => text,
            Err(e) => {
                log::error!("Failed to generate PR description, leaving it unchanged: {e}");
                return Outcome::DescriptionFailed(e);
            }
        };

        if self.dry_run {
            log::info!("Dry run: not updating {}#{}", target.repo, target.number);
            return Outcome::DryRun(description);
        }

        match self.updater.update_description(target, &description) {
            Ok(()) => Outcome::Updated,
            Err(e) => {
                log::error!("Failed to update PR description: {e}");
                Outcome::UpdateFailed(e)
            }
        }
    }
}
