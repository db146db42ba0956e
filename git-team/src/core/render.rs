//! Human-readable summaries for status and alias listings.

use crate::core::types::{ActivationState, Assignment, TeamConfig};

/// Render the activation state as printed by `git team status`.
pub fn render_state(state: &ActivationState) -> String {
    match state {
        ActivationState::Disabled => "git-team disabled".to_string(),
        ActivationState::Enabled { coauthors, .. } => {
            let mut out = String::from("git-team enabled");
            if !coauthors.is_empty() {
                out.push_str("\n\nco-authors");
                for coauthor in coauthors {
                    out.push_str("\n├── ");
                    out.push_str(coauthor);
                }
            }
            out
        }
    }
}

/// Render assignments sorted by alias.
pub fn render_assignments(assignments: &[Assignment]) -> String {
    if assignments.is_empty() {
        return "No assignments".to_string();
    }
    let mut sorted: Vec<&Assignment> = assignments.iter().collect();
    sorted.sort();

    let mut out = String::from("Aliases:\n--------");
    for assignment in sorted {
        out.push_str(&format!(
            "\n'{}' -> '{}'",
            assignment.alias, assignment.coauthor
        ));
    }
    out
}

pub fn render_config(cfg: &TeamConfig) -> String {
    format!("config\n└── activation-scope: {}", cfg.activation_scope)
}
