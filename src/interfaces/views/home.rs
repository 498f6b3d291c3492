use std::{collections::HashSet, fmt::Write};

use crate::{
    entities::{card::Card, project::ProjectId},
    use_cases::navigation::{Mode, NavState},
    views::card::render_card,
};

/// Everything the home screen needs besides the controller state.
pub struct HomeView<'a> {
    pub state: &'a NavState,
    pub live_count: i64,
    pub unlocked: &'a HashSet<ProjectId>,
}

pub const EMPTY_STATE: &str = "No Projects Yet";
pub const LOADING: &str = "Loading Talent...";

pub fn render_home(out: &mut String, view: &HomeView<'_>) {
    let state = view.state;

    let _ = writeln!(out, "● {} Recruiters Scouting Live", view.live_count);
    let _ = writeln!(out);
    let _ = writeln!(out, "Hire Proven African Talent.");
    let _ = writeln!(out, "The only portfolio platform that verifies the code behind the dashboard.");
    let banner = match state.mode {
        Mode::Recruiter => "✅ Recruiter Mode Active: Unlock profiles below.",
        Mode::Candidate => "Stop guessing, start hiring.",
    };
    let _ = writeln!(out, "{banner}");
    let _ = writeln!(out);

    if let Some(error) = &state.last_error {
        let _ = writeln!(out, "⚠ Could not load projects: {error}");
        let _ = writeln!(out, "  Type `retry` to try again.");
        let _ = writeln!(out);
    }

    if state.is_loading && state.records.is_empty() {
        let _ = writeln!(out, "{LOADING}");
        return;
    }

    if state.records.is_empty() {
        if state.last_error.is_none() {
            let _ = writeln!(out, "∅ {EMPTY_STATE}");
        }
        return;
    }

    for (i, project) in state.records.iter().enumerate() {
        let unlocked = view.unlocked.contains(&project.id);
        render_card(out, i + 1, &Card::new(project, state.mode, unlocked));
        let _ = writeln!(out);
    }
}
