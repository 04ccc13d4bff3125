use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;

use pr_describer::{Cli, Config, Outcome, Pipeline, logging, setup};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose, cli.quiet);

    let cfg = Config::from_sources(&cli).context("invalid configuration")?;
    log::debug!("Resolved config: {cfg:?}");

    let diff_source = setup::build_diff_source(&cfg);
    let llm = setup::build_llm_client(&cfg)?;
    let github = setup::build_github_client(&cfg)?;

    let pipeline = Pipeline {
        diff_source: &diff_source,
        llm: &llm,
        updater: &github,
        dry_run: cfg.dry_run,
    };

    let outcome = pipeline.run(&cfg.base_branch, &cfg.head_branch, &setup::pr_target(&cfg));

    if let Outcome::DryRun(description) = &outcome {
        println!("{description}");
    }

    if cfg.strict && outcome.is_failure() {
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
