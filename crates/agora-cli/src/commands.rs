use std::path::Path;

use colored::Colorize;
use serde::Serialize;
use serde_json::json;

use agora_ledger::{AuditReport, LedgerAuditor};
use agora_sdk::{Agora, Direction, EngineConfig, Response, SortKey, Topic, Vote};

use crate::cli::*;
use crate::dataset::Dataset;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let data = cli.data.as_path();
    let format = &cli.format;
    match cli.command {
        Command::Topics(args) => cmd_topics(data, config, format, args),
        Command::Responses(args) => cmd_responses(data, config, format, args),
        Command::Vote(args) => cmd_vote(data, config, format, args),
        Command::Score(args) => cmd_score(data, config, format, args),
        Command::Stance(args) => cmd_stance(data, config, format, args),
        Command::Audit(_) => cmd_audit(data, format),
    }
}

fn open(data: &Path, config: EngineConfig) -> anyhow::Result<Agora> {
    Dataset::load(data)?.into_agora(config)
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_topics(
    data: &Path,
    config: EngineConfig,
    format: &OutputFormat,
    args: TopicsArgs,
) -> anyhow::Result<()> {
    let sort: SortKey = args.sort.parse()?;
    let agora = open(data, config)?;
    let topics = agora.rank_topics(sort, args.search.as_deref())?;
    match format {
        OutputFormat::Json => print_json(&topics)?,
        OutputFormat::Text => {
            if topics.is_empty() {
                println!("No topics.");
            }
            for topic in &topics {
                print_topic(topic);
            }
        }
    }
    Ok(())
}

fn print_topic(topic: &Topic) {
    println!("{}  {}", topic.id.to_string().dimmed(), topic.title.bold());
    if !topic.description.is_empty() {
        println!("    {}", topic.description);
    }
}

fn cmd_responses(
    data: &Path,
    config: EngineConfig,
    format: &OutputFormat,
    args: ResponsesArgs,
) -> anyhow::Result<()> {
    let sort: SortKey = args.sort.parse()?;
    let agora = open(data, config)?;
    let responses =
        agora.rank_responses_by_topic_title(&args.topic, sort, args.search.as_deref())?;
    match format {
        OutputFormat::Json => print_json(&responses)?,
        OutputFormat::Text => {
            println!("{} ({})", args.topic.bold(), sort.as_str().cyan());
            if responses.is_empty() {
                println!("  No responses.");
            }
            for response in &responses {
                print_response(&agora, response)?;
            }
        }
    }
    Ok(())
}

fn print_response(agora: &Agora, response: &Response) -> anyhow::Result<()> {
    let tally = agora.tally(&response.id)?;
    let score = match tally.score {
        s if s > 0 => format!("{s:+}").green(),
        s if s < 0 => format!("{s:+}").red(),
        s => s.to_string().normal(),
    };
    println!(
        "  {:>4}  {}  {}",
        score,
        response.id.to_string().dimmed(),
        response.title.bold()
    );
    Ok(())
}

fn cmd_vote(
    data: &Path,
    config: EngineConfig,
    format: &OutputFormat,
    args: VoteArgs,
) -> anyhow::Result<()> {
    let agora = open(data, config)?;
    let transition = match args.vote {
        Vote::Up => agora.cast_vote(&args.item, &args.voter, Direction::Up)?,
        Vote::Down => agora.cast_vote(&args.item, &args.voter, Direction::Down)?,
        Vote::None => agora.retract_vote(&args.item, &args.voter)?,
    };
    Dataset::from_agora(&agora)?.save(data)?;

    match format {
        OutputFormat::Json => print_json(&json!({
            "item": transition.item,
            "voter": transition.voter,
            "from": transition.from.label(),
            "to": transition.to.label(),
            "delta": transition.delta,
            "score": transition.score,
        }))?,
        OutputFormat::Text if transition.is_noop() => {
            println!("Vote unchanged ({}), score {}", transition.to.label(), transition.score);
        }
        OutputFormat::Text => println!(
            "{} {} -> {}, score {}",
            "✓".green().bold(),
            transition.from.label(),
            transition.to.label().yellow(),
            transition.score.to_string().bold()
        ),
    }
    Ok(())
}

fn cmd_score(
    data: &Path,
    config: EngineConfig,
    format: &OutputFormat,
    args: ScoreArgs,
) -> anyhow::Result<()> {
    let agora = open(data, config)?;
    let tally = agora.tally(&args.item)?;
    match format {
        OutputFormat::Json => print_json(&tally)?,
        OutputFormat::Text => println!(
            "Score {} ({} up, {} down)",
            tally.score.to_string().bold(),
            tally.upvotes.to_string().green(),
            tally.downvotes.to_string().red()
        ),
    }
    Ok(())
}

fn cmd_stance(
    data: &Path,
    config: EngineConfig,
    format: &OutputFormat,
    args: StanceArgs,
) -> anyhow::Result<()> {
    let agora = open(data, config)?;
    let vote = agora.current_stance(&args.voter, &args.item)?;
    match format {
        OutputFormat::Json => print_json(&json!({ "vote": vote.label() }))?,
        OutputFormat::Text => println!("{}", vote.label()),
    }
    Ok(())
}

fn cmd_audit(data: &Path, format: &OutputFormat) -> anyhow::Result<()> {
    let dataset = Dataset::load(data)?;
    let report = LedgerAuditor::audit(&dataset.votes);
    match format {
        OutputFormat::Json => print_json(&audit_json(&report))?,
        OutputFormat::Text if report.is_valid() => println!(
            "{} {} ledger entries, no violations",
            "✓".green().bold(),
            report.entry_count
        ),
        OutputFormat::Text => {
            println!(
                "{} {} violations in {} ledger entries",
                "✗".red().bold(),
                report.violations.len(),
                report.entry_count
            );
            for violation in &report.violations {
                println!(
                    "  {:?} {}: {}",
                    violation.kind,
                    violation.item.to_string().dimmed(),
                    violation.description
                );
            }
        }
    }
    if !report.is_valid() {
        anyhow::bail!("ledger audit failed");
    }
    Ok(())
}

fn audit_json(report: &AuditReport) -> serde_json::Value {
    let violations: Vec<_> = report
        .violations
        .iter()
        .map(|v| {
            json!({
                "item": v.item,
                "kind": format!("{:?}", v.kind),
                "description": v.description,
            })
        })
        .collect();
    json!({
        "entries": report.entry_count,
        "valid": report.is_valid(),
        "violations": violations,
    })
}
