use anyhow::{Context as _, Result};
use clap::Args;

use vaultcmd_application::{InvocationOptions, InvocationOutcome};

use super::Context;

#[derive(Args, Debug, Clone, Copy)]
pub struct OutputArgs {
    /// Show the output of each successful step
    #[arg(long)]
    pub show_output: bool,
    /// Print the chain report as JSON
    #[arg(long)]
    pub json: bool,
}

impl From<OutputArgs> for InvocationOptions {
    fn from(args: OutputArgs) -> Self {
        Self {
            show_output: args.show_output,
        }
    }
}

/// Runs a registered command. Chain failures are reported as notices only.
pub async fn run(ctx: &Context, id: &str, output: OutputArgs) -> Result<()> {
    let settings = ctx.settings.list().await?;
    let palette = ctx.palette(&settings);

    let outcome = palette
        .invoke(id, output.into())
        .await
        .with_context(|| format!("Cannot run '{}' ({})", id, ctx.settings_path().display()))?;
    print_outcome(&outcome, output.json)
}

pub async fn exec(ctx: &Context, body: &str, output: OutputArgs) -> Result<()> {
    let settings = ctx.settings.list().await?;
    let palette = ctx.palette(&settings);

    let outcome = palette.execute_command(body, output.into()).await?;
    print_outcome(&outcome, output.json)
}

fn print_outcome(outcome: &InvocationOutcome, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
    } else if let Some(report) = outcome.report() {
        tracing::info!(
            state = %report.state,
            executed = report.steps.len(),
            "Invocation finished"
        );
    }
    Ok(())
}
