use crate::git::Diff;
use crate::llm::prompts;

pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// Fixed instructions, then the diff verbatim, then the closing instruction.
/// The diff is neither escaped nor truncated.
pub fn pr_description_prompt(diff: &Diff) -> PromptPair {
    let system = prompts::SYSTEM_INSTRUCTIONS.to_owned();

    let user = format!(
        "{preamble}\n{diff}\n\n{closing}",
        preamble = prompts::PR_DESCRIPTION_PREAMBLE,
        diff = diff.as_str(),
        closing = prompts::PR_DESCRIPTION_CLOSING
    );

    PromptPair { system, user }
}
