//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use gavel_application::Intent;
use gavel_domain::motion::{DebateLimits, MotionMetadata};
use gavel_domain::{
    Actor, MotionKind, MotionProposal, RequestId, RequestType, Role, Stance, VoteChoice,
    VotingBasis, VotingContext,
};
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// CLI arguments for gavel
#[derive(Parser, Debug)]
#[command(name = "gavel")]
#[command(author, version, about = "Parliamentary procedure engine for deliberative meetings")]
#[command(long_about = r#"
Gavel keeps the order of business for a meeting run under parliamentary
procedure: the motion stack, debate, voting and points of order.

Each invocation applies one action as one participant and saves the new
meeting state.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./gavel.toml        Project-level config
3. ~/.config/gavel/config.toml   Global config

Example:
  gavel -m board new
  gavel -m board --as chair --chair present alice
  gavel -m board --as chair --chair call-to-order
  gavel -m board --as alice move main "Allocate $500 for the picnic"
  gavel -m board available
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Meeting to act on
    #[arg(short, long, global = true, value_name = "ID", default_value = "default")]
    pub meeting: String,

    /// Participant issuing the action
    #[arg(long = "as", global = true, value_name = "NAME", default_value = "chair")]
    pub actor: String,

    /// Act as the presiding officer
    #[arg(long, global = true)]
    pub chair: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    pub fn actor(&self) -> Actor {
        let role = if self.chair { Role::Chair } else { Role::Member };
        Actor::new(self.actor.clone(), role)
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Open a new meeting with the configured procedure settings
    New,
    /// List stored meetings
    List,
    /// Show the meeting state
    Show,
    /// Show which motions are in order right now
    Available,
    /// Export the minutes
    Minutes,

    /// Mark a member present
    Present { member: String },
    /// Mark a member absent
    Absent { member: String },
    /// Call the meeting to order (chair)
    CallToOrder,

    /// Make a motion
    Move(MoveArgs),
    /// Recognize a queued motion (chair)
    RecognizeQueued { index: usize },
    /// Dismiss a queued motion (chair)
    DismissQueued { index: usize, reason: String },
    /// State the pending question (chair)
    Accept,
    /// Rule the pending question out of order (chair)
    Decline { reason: String },
    /// Second the pending question
    Second,

    /// Ask to speak in debate
    Floor {
        /// pro or con
        stance: Stance,
    },
    /// Give the floor to the next speaker (chair)
    NextSpeaker,
    /// Yield the floor
    Yield,

    /// Put the question to a vote (chair)
    OpenVote,
    /// Vote on the pending question
    Vote {
        /// aye, nay or abstain
        choice: VoteChoice,
    },
    /// Close the vote and announce the result (chair)
    CloseVote(CloseVoteArgs),
    /// Decide a question that takes no vote (chair)
    Rule { ruling: String },

    /// Raise a point of order, inquiry, request or question of privilege
    Raise {
        request_type: RequestType,
        #[arg(default_value = "")]
        content: String,
    },
    /// Accept a pending request (chair)
    AcceptRequest { id: String },
    /// Answer an accepted request (chair)
    Respond { id: String, response: String },
    /// Dismiss a request (chair or the member who raised it)
    DismissRequest { id: String },
    /// Refer a request to the assembly as a motion (chair)
    Escalate { id: String },

    /// Resume business after a recess
    EndRecess,
    /// Return to regular order after suspending the rules (chair)
    RestoreRules,
}

#[derive(Args, Debug, Clone)]
pub struct MoveArgs {
    /// Motion type, e.g. main, amend, commit, lay-on-table, recess
    pub kind: MotionKind,

    /// Wording of the motion
    pub text: String,

    /// Replacement wording (amend)
    #[arg(long, value_name = "TEXT")]
    pub proposed_text: Option<String>,

    /// Committee to refer to (commit)
    #[arg(long)]
    pub committee: Option<String>,

    /// When to take the question up again (postpone-definitely)
    #[arg(long, value_name = "WHEN")]
    pub until: Option<String>,

    /// Length of recess in minutes
    #[arg(long)]
    pub minutes: Option<u32>,

    /// Purpose of the suspension (suspend-rules)
    #[arg(long)]
    pub purpose: Option<String>,

    /// Adjourn this many minutes from now (fix-time-to-adjourn)
    #[arg(long, value_name = "MINUTES")]
    pub adjourn_in: Option<u64>,

    /// Motion id a bring-back motion refers to
    #[arg(long, value_name = "ID")]
    pub target: Option<String>,

    /// Speeches allowed per member (limit-debate)
    #[arg(long)]
    pub max_speeches: Option<u32>,

    /// Seconds per speech (limit-debate)
    #[arg(long)]
    pub speech_secs: Option<u32>,

    /// Total debate time in seconds (limit-debate)
    #[arg(long)]
    pub total_secs: Option<u32>,
}

impl MoveArgs {
    fn metadata(&self, now: u64) -> MotionMetadata {
        let mut metadata = MotionMetadata::default();
        if let Some(text) = &self.proposed_text {
            metadata = metadata.with_proposed_text(text);
        }
        if let Some(committee) = &self.committee {
            metadata = metadata.with_committee(committee);
        }
        if let Some(until) = &self.until {
            metadata = metadata.with_postpone_until(until);
        }
        if let Some(minutes) = self.minutes {
            metadata = metadata.with_recess_minutes(minutes);
        }
        if let Some(purpose) = &self.purpose {
            metadata = metadata.with_suspend_purpose(purpose);
        }
        if let Some(target) = &self.target {
            metadata = metadata.with_target(target.as_str());
        }
        if let Some(minutes) = self.adjourn_in {
            metadata.adjourn_at = Some(now + minutes * 60_000);
        }
        if self.max_speeches.is_some() || self.speech_secs.is_some() || self.total_secs.is_some() {
            metadata = metadata.with_debate_limits(DebateLimits {
                max_speeches_per_member: self.max_speeches,
                max_speech_duration_secs: self.speech_secs,
                total_time_limit_secs: self.total_secs,
            });
        }
        metadata
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct CloseVoteArgs {
    /// Denominator for the threshold; defaults to the configured basis
    #[arg(long)]
    pub basis: Option<VotingBasis>,

    /// Members present, when the count differs from the roll
    #[arg(long)]
    pub present: Option<u32>,

    /// Size of the full membership
    #[arg(long)]
    pub membership: Option<u32>,
}

impl CloseVoteArgs {
    fn context(&self) -> Option<VotingContext> {
        let basis = self.basis?;
        Some(VotingContext::new(
            basis,
            self.present.unwrap_or(0),
            self.membership.unwrap_or(0),
        ))
    }
}

impl Command {
    /// The engine intent for this command; `None` for queries and setup
    pub fn to_intent(&self, actor: &Actor, now: u64) -> Option<Intent> {
        let intent = match self {
            Command::New | Command::List | Command::Show | Command::Available | Command::Minutes => {
                return None;
            }
            Command::Present { member } => Intent::MarkPresent {
                member: member.clone(),
            },
            Command::Absent { member } => Intent::MarkAbsent {
                member: member.clone(),
            },
            Command::CallToOrder => Intent::CallToOrder,
            Command::Move(args) => Intent::ProposeMotion {
                proposal: MotionProposal::new(args.kind, args.text.clone(), actor.name.clone())
                    .with_metadata(args.metadata(now)),
            },
            Command::RecognizeQueued { index } => Intent::RecognizeQueued { index: *index },
            Command::DismissQueued { index, reason } => Intent::DismissQueued {
                index: *index,
                reason: reason.clone(),
            },
            Command::Accept => Intent::AcceptMotion,
            Command::Decline { reason } => Intent::DeclineMotion {
                reason: reason.clone(),
            },
            Command::Second => Intent::SecondMotion,
            Command::Floor { stance } => Intent::RequestFloor { stance: *stance },
            Command::NextSpeaker => Intent::RecognizeSpeaker,
            Command::Yield => Intent::YieldFloor,
            Command::OpenVote => Intent::OpenVote,
            Command::Vote { choice } => Intent::CastVote { choice: *choice },
            Command::CloseVote(args) => Intent::CloseVote {
                context: args.context(),
            },
            Command::Rule { ruling } => Intent::Rule {
                ruling: ruling.clone(),
            },
            Command::Raise {
                request_type,
                content,
            } => Intent::RaiseRequest {
                request_type: *request_type,
                content: content.clone(),
            },
            Command::AcceptRequest { id } => Intent::AcceptRequest {
                id: RequestId::new(id),
            },
            Command::Respond { id, response } => Intent::RespondRequest {
                id: RequestId::new(id),
                response: response.clone(),
            },
            Command::DismissRequest { id } => Intent::DismissRequest {
                id: RequestId::new(id),
            },
            Command::Escalate { id } => Intent::EscalateRequest {
                id: RequestId::new(id),
            },
            Command::EndRecess => Intent::EndRecess,
            Command::RestoreRules => Intent::RestoreRules,
        };
        Some(intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("gavel").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_move_builds_proposal_for_actor() {
        let cli = parse(&[
            "-m", "board", "--as", "alice", "move", "amend", "change the amount",
            "--proposed-text", "allocate $700",
        ]);
        let actor = cli.actor();
        assert_eq!(actor.role, Role::Member);

        let intent = cli.command.as_ref().unwrap().to_intent(&actor, 0).unwrap();
        match intent {
            Intent::ProposeMotion { proposal } => {
                assert_eq!(proposal.kind, MotionKind::Amend);
                assert_eq!(proposal.mover, "alice");
                assert_eq!(proposal.metadata.proposed_text.as_deref(), Some("allocate $700"));
            }
            other => panic!("unexpected intent: {other:?}"),
        }
    }

    #[test]
    fn test_fix_time_to_adjourn_is_relative_to_now() {
        let cli = parse(&["move", "fix-time-to-adjourn", "adjourn at nine", "--adjourn-in", "30"]);
        let intent = cli
            .command
            .as_ref()
            .unwrap()
            .to_intent(&cli.actor(), 1_000)
            .unwrap();
        let Intent::ProposeMotion { proposal } = intent else {
            panic!("expected a motion");
        };
        assert_eq!(proposal.metadata.adjourn_at, Some(1_000 + 30 * 60_000));
    }

    #[test]
    fn test_chair_flag_and_vote() {
        let cli = parse(&["--as", "pat", "--chair", "vote", "aye"]);
        assert!(cli.actor().is_chair());
        assert_eq!(
            cli.command.as_ref().unwrap().to_intent(&cli.actor(), 0),
            Some(Intent::CastVote { choice: VoteChoice::Aye })
        );
    }

    #[test]
    fn test_close_vote_context_requires_basis() {
        let cli = parse(&["close-vote", "--present", "15"]);
        assert_eq!(
            cli.command.as_ref().unwrap().to_intent(&cli.actor(), 0),
            Some(Intent::CloseVote { context: None })
        );

        let cli = parse(&["close-vote", "--basis", "members-present", "--present", "15"]);
        assert_eq!(
            cli.command.as_ref().unwrap().to_intent(&cli.actor(), 0),
            Some(Intent::CloseVote {
                context: Some(VotingContext::new(VotingBasis::MembersPresent, 15, 0))
            })
        );
    }

    #[test]
    fn test_unknown_motion_type_rejected() {
        assert!(Cli::try_parse_from(["gavel", "move", "filibuster", "talk forever"]).is_err());
    }

    #[test]
    fn test_queries_have_no_intent() {
        let cli = parse(&["show"]);
        assert_eq!(cli.command.as_ref().unwrap().to_intent(&cli.actor(), 0), None);
    }
}
