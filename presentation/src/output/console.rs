//! Console output formatter for meeting state

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use gavel_application::Minutes;
use gavel_domain::{LogEntry, MeetingState, Motion, MotionAvailability, MotionStatus};

/// Formats results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    pub fn format_state(state: &MeetingState) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&format!("Meeting {}", state.meeting_id)));
        output.push('\n');
        output.push_str(&format!(
            "{} {}   {} {}\n",
            "Phase:".cyan().bold(),
            state.phase,
            "Version:".cyan().bold(),
            state.version
        ));
        output.push_str(&format!(
            "{} {} of {} ({})\n",
            "Present:".cyan().bold(),
            state.present_count(),
            state.participant_count(),
            state.present.iter().cloned().collect::<Vec<_>>().join(", ")
        ));

        output.push_str(&Self::section_header("Pending Questions"));
        if state.stack.is_empty() {
            output.push_str(&format!("  {}\n", "No question is pending".dimmed()));
        }
        for (depth, motion) in state.stack.iter().enumerate().rev() {
            let marker = if depth + 1 == state.stack.len() { ">" } else { " " };
            output.push_str(&format!("{} {}\n", marker, Self::motion_line(motion)));
        }

        if let Some(holder) = state.debate.floor_holder() {
            output.push_str(&format!("\n{} {}\n", "Floor:".cyan().bold(), holder));
        }
        if !state.debate.queue.is_empty() {
            output.push_str(&format!("{}\n", "Waiting to speak:".cyan().bold()));
            for entry in &state.debate.queue {
                output.push_str(&format!("  * {} ({})\n", entry.participant, entry.stance));
            }
        }

        if !state.queued.is_empty() {
            output.push_str(&Self::section_header("Queued Motions"));
            for (index, entry) in state.queued.iter().enumerate() {
                output.push_str(&format!(
                    "  [{}] {} by {}: {}\n",
                    index,
                    entry.proposal.kind.display_name().yellow(),
                    entry.proposal.mover,
                    entry.proposal.text
                ));
            }
        }

        let open: Vec<_> = state.requests.iter().filter(|r| r.is_open()).collect();
        if !open.is_empty() {
            output.push_str(&Self::section_header("Requests"));
            for request in open {
                output.push_str(&format!(
                    "  [{}] {} from {} ({}) {}\n",
                    request.id,
                    request.request_type.display_name().yellow(),
                    request.raised_by,
                    request.status,
                    request.content
                ));
            }
        }

        if let Some(ruling) = &state.chair_ruling {
            output.push_str(&format!(
                "\n{} {}\n",
                "Ruling of the chair:".magenta().bold(),
                ruling.ruling
            ));
        }

        if !state.tabled.is_empty() {
            output.push_str(&format!(
                "\n{} {}\n",
                "Set aside:".cyan().bold(),
                state.tabled.len()
            ));
        }

        output.push_str(&Self::footer());
        output
    }

    pub fn format_availability(availability: &[MotionAvailability]) -> String {
        let mut output = String::new();
        output.push_str(&Self::section_header("Motions in Order"));
        for entry in availability.iter().filter(|a| a.enabled) {
            output.push_str(&format!(
                "  {} {} {}\n",
                "+".green(),
                entry.kind.display_name(),
                format!("({})", entry.category).dimmed()
            ));
        }
        output.push_str(&Self::section_header("Out of Order"));
        for entry in availability.iter().filter(|a| !a.enabled) {
            output.push_str(&format!(
                "  {} {}: {}\n",
                "-".red(),
                entry.kind.display_name(),
                entry.reason.as_deref().unwrap_or("").dimmed()
            ));
        }
        output
    }

    pub fn format_minutes(minutes: &Minutes) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&format!("Minutes of {}", minutes.meeting_id)));
        output.push('\n');
        output.push_str(&format!(
            "{} {}\n",
            "Present:".cyan().bold(),
            minutes.present.join(", ")
        ));
        if !minutes.absent.is_empty() {
            output.push_str(&format!(
                "{} {}\n",
                "Absent:".cyan().bold(),
                minutes.absent.join(", ")
            ));
        }

        output.push_str(&Self::section_header("Decisions"));
        if minutes.decisions.is_empty() {
            output.push_str(&format!("  {}\n", "None".dimmed()));
        }
        for decision in &minutes.decisions {
            let result = match decision.result {
                MotionStatus::Adopted if decision.rescinded => "RESCINDED".yellow().bold(),
                MotionStatus::Adopted => "ADOPTED".green().bold(),
                MotionStatus::Withdrawn => "WITHDRAWN".dimmed().bold(),
                _ => "DEFEATED".red().bold(),
            };
            let note = if decision.superseded {
                " (reconsidered)".dimmed().to_string()
            } else {
                String::new()
            };
            output.push_str(&format!(
                "  [{}] {}{} {} (moved by {}): {}\n      {}\n",
                decision.id, result, note, decision.motion, decision.mover, decision.text, decision.description
            ));
        }

        if !minutes.deferred.is_empty() {
            output.push_str(&Self::section_header("Deferred Business"));
            for unit in &minutes.deferred {
                let detail = unit
                    .committee
                    .as_ref()
                    .map(|c| format!(" to {}", c))
                    .or_else(|| unit.postpone_until.as_ref().map(|u| format!(" until {}", u)))
                    .unwrap_or_default();
                output.push_str(&format!("  {}{}\n", unit.status, detail));
                for motion in &unit.motions {
                    output.push_str(&format!("    * {}\n", motion));
                }
            }
        }

        if !minutes.pending.is_empty() {
            output.push_str(&Self::section_header("Unfinished Business"));
            for motion in &minutes.pending {
                output.push_str(&format!("  * {}\n", motion));
            }
        }

        output.push_str(&Self::section_header("Proceedings"));
        output.push_str(&Self::format_entries(&minutes.proceedings));
        output.push_str(&Self::footer());
        output
    }

    pub fn format_entries(entries: &[LogEntry]) -> String {
        entries
            .iter()
            .map(|e| format!("  {} {}\n", format!("{:>6}", e.actor).dimmed(), e.message))
            .collect()
    }

    fn motion_line(motion: &Motion) -> String {
        let mut line = format!(
            "[{}] {} {}: {}",
            motion.id,
            motion.kind.display_name().yellow().bold(),
            format!("({})", motion.status).dimmed(),
            motion.text
        );
        if motion.status == MotionStatus::Voting || motion.votes.total_cast() > 0 {
            line.push_str(&format!(
                "  aye {} / nay {} / abstain {}",
                motion.votes.aye, motion.votes.nay, motion.votes.abstain
            ));
        }
        line
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_state(&self, state: &MeetingState) -> String {
        Self::format_state(state)
    }

    fn format_availability(&self, availability: &[MotionAvailability]) -> String {
        Self::format_availability(availability)
    }

    fn format_minutes(&self, minutes: &Minutes) -> String {
        Self::format_minutes(minutes)
    }

    fn format_entries(&self, entries: &[LogEntry]) -> String {
        Self::format_entries(entries)
    }
}
