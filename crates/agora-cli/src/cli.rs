use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use agora_types::{ItemId, Vote, VoterId};

#[derive(Parser)]
#[command(
    name = "agora",
    about = "Agora: vote on debate responses and rank topics",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Engine configuration (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Dataset of topics, responses and votes (JSON)
    #[arg(long, global = true, default_value = "agora.json")]
    pub data: PathBuf,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List topics in a sort order
    Topics(TopicsArgs),
    /// List the responses to a topic in a sort order
    Responses(ResponsesArgs),
    /// Cast or retract a vote
    Vote(VoteArgs),
    /// Show an item's vote counts
    Score(ScoreArgs),
    /// Show a voter's stance on an item
    Stance(StanceArgs),
    /// Check the dataset's votes for invariant violations
    Audit(AuditArgs),
}

#[derive(Args)]
pub struct TopicsArgs {
    #[arg(short, long)]
    pub sort: String,
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct ResponsesArgs {
    /// Exact topic title
    #[arg(short, long)]
    pub topic: String,
    #[arg(short, long)]
    pub sort: String,
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args)]
pub struct VoteArgs {
    /// up, down or none
    pub vote: Vote,
    #[arg(long)]
    pub item: ItemId,
    #[arg(long)]
    pub voter: VoterId,
}

#[derive(Args)]
pub struct ScoreArgs {
    #[arg(long)]
    pub item: ItemId,
}

#[derive(Args)]
pub struct StanceArgs {
    #[arg(long)]
    pub item: ItemId,
    #[arg(long)]
    pub voter: VoterId,
}

#[derive(Args)]
pub struct AuditArgs {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_topics() {
        let cli = Cli::try_parse_from(["agora", "topics", "--sort", "engagement"]).unwrap();
        if let Command::Topics(args) = cli.command {
            assert_eq!(args.sort, "engagement");
            assert!(args.search.is_none());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_topics_requires_sort() {
        assert!(Cli::try_parse_from(["agora", "topics"]).is_err());
    }

    #[test]
    fn parse_responses_with_search() {
        let cli = Cli::try_parse_from([
            "agora", "responses", "--topic", "Tabs vs. Spaces", "-s", "upvotes", "--search", "tab",
        ])
        .unwrap();
        if let Command::Responses(args) = cli.command {
            assert_eq!(args.topic, "Tabs vs. Spaces");
            assert_eq!(args.sort, "upvotes");
            assert_eq!(args.search, Some("tab".into()));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_vote() {
        let item = ItemId::new();
        let voter = VoterId::new();
        let cli = Cli::try_parse_from([
            "agora".to_string(),
            "vote".into(),
            "down".into(),
            "--item".into(),
            item.to_string(),
            "--voter".into(),
            voter.to_string(),
        ])
        .unwrap();
        if let Command::Vote(args) = cli.command {
            assert_eq!(args.vote, Vote::Down);
            assert_eq!(args.item, item);
            assert_eq!(args.voter, voter);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_vote_rejects_bad_id() {
        let voter = VoterId::new().to_string();
        let result = Cli::try_parse_from([
            "agora", "vote", "up", "--item", "not-an-id", "--voter", voter.as_str(),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_vote_rejects_bad_direction() {
        let id = ItemId::new().to_string();
        let result = Cli::try_parse_from([
            "agora", "vote", "sideways", "--item", id.as_str(), "--voter", id.as_str(),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_audit() {
        let cli = Cli::try_parse_from(["agora", "audit"]).unwrap();
        assert!(matches!(cli.command, Command::Audit(_)));
        assert_eq!(cli.data, PathBuf::from("agora.json"));
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::try_parse_from([
            "agora", "--verbose", "--config", "agora.toml", "--data", "/tmp/d.json", "audit",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("agora.toml")));
        assert_eq!(cli.data, PathBuf::from("/tmp/d.json"));
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["agora", "--format", "json", "audit"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }
}
