pub const SYSTEM_INSTRUCTIONS: &str =
    "You are a helpful assistant that writes GitHub PR descriptions.";

pub const PR_DESCRIPTION_PREAMBLE: &str = r#"Write a professional GitHub Pull Request description for a change that compares
the current branch against its base branch. The changes are given below as
`git diff --name-status` output. Follow these rules:

* Explain what changed, including the purpose and impact of each change.
* Identify and list the **files changed**.
* Highlight the **impacted areas or modules**.
* Group changes by purpose (e.g. bug fix, refactor, optimization).
* Use markdown formatting (bullet points, bold headers).
* Use exactly this structure:

### Description
In this PR, I [describe the changes, including their purpose and impact].

* [Changes grouped by purpose, as bullet points]

### Files Changed
* [The files changed]

Git diff to analyze:
"#;

pub const PR_DESCRIPTION_CLOSING: &str =
    "Please provide the git diff output to analyze.";
