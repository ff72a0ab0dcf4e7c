//! score-leads - Command-line lead scoring harness
//!
//! Scores the messages given as arguments (or a built-in sample set) with the
//! same pipeline the HTTP service uses, then prints a per-message report, a
//! summary, and the full results as JSON.
//!
//! `--single` runs one attempt per message without retry and prints only the
//! LLM record, for checking the model's structured output directly.

use anyhow::Result;
use clap::Parser;

use leadscore_ai::api::ui::EXAMPLE_MESSAGES;
use leadscore_ai::cli::ProviderArgs;
use leadscore_ai::report;
use leadscore_ai::startup;

#[derive(Parser, Debug)]
#[command(name = "score-leads")]
#[command(about = "Score lead messages from the command line")]
#[command(version)]
struct Args {
    /// Messages to score (default: built-in samples)
    messages: Vec<String>,

    /// Print only the JSON array of results
    #[arg(long)]
    json: bool,

    /// One attempt per message, no retry; print the LLM record only
    #[arg(long)]
    single: bool,

    #[command(flatten)]
    provider: ProviderArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = startup::init("score-leads", &args.provider.overrides())?;
    let scorer = startup::build_scorer(&config).await?;

    let messages: Vec<String> = if args.messages.is_empty() {
        EXAMPLE_MESSAGES.iter().map(|m| m.to_string()).collect()
    } else {
        args.messages
    };

    if args.single {
        let mut records = Vec::with_capacity(messages.len());
        for message in &messages {
            let analysis = scorer.analyzer().analyze_once(message).await;
            if !args.json {
                println!("{}", report::single_report(&analysis.lead_score)?);
            }
            records.push(analysis.lead_score);
        }
        if args.json {
            println!("{}", report::lead_scores_json(&records)?);
        }
        return Ok(());
    }

    let mut results = Vec::with_capacity(messages.len());
    for message in &messages {
        let result = scorer.score(message).await;
        if !args.json {
            print!("{}", report::lead_report(&result));
        }
        results.push(result);
    }

    if !args.json {
        print!("{}", report::summary(&results));
        println!("\n=== All Results as JSON ===");
    }
    println!("{}", report::results_json(&results)?);

    Ok(())
}
