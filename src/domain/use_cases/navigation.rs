use std::fmt;

use crate::entities::project::Project;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Candidate,
    Recruiter,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Candidate => write!(f, "Candidate"),
            Mode::Recruiter => write!(f, "Recruiter"),
        }
    }
}

/// The screen on display. A detail view always carries the project it shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum View {
    #[default]
    Home,
    Detail(Project),
    Upload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Detail,
    Upload,
}

impl View {
    pub fn kind(&self) -> ViewKind {
        match self {
            View::Home => ViewKind::Home,
            View::Detail(_) => ViewKind::Detail,
            View::Upload => ViewKind::Upload,
        }
    }

    pub fn selected(&self) -> Option<&Project> {
        match self {
            View::Detail(project) => Some(project),
            _ => None,
        }
    }
}

/// Inputs to the root controller.
#[derive(Debug, Clone)]
pub enum Action {
    GoHome,
    ViewProject(Project),
    GoToUpload,
    SetMode(Mode),
    Retry,
    RecordsLoaded {
        generation: u64,
        result: Result<Vec<Project>, String>,
    },
}

/// Work the reducer asks its driver to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    FetchRecords { generation: u64 },
    ScrollToTop,
}

/// Root controller state. Only `reduce` mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct NavState {
    pub mode: Mode,
    pub view: View,
    pub records: Vec<Project>,
    pub is_loading: bool,
    pub last_error: Option<String>,
    generation: u64,
}

impl Default for NavState {
    fn default() -> Self {
        NavState {
            mode: Mode::default(),
            view: View::default(),
            records: Vec::new(),
            is_loading: true,
            last_error: None,
            generation: 0,
        }
    }
}

impl NavState {
    /// Fresh state plus the fetch issued on mount.
    pub fn mount() -> (Self, Vec<Effect>) {
        let mut state = NavState::default();
        let fetch = state.begin_fetch();
        (state, vec![fetch])
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn begin_fetch(&mut self) -> Effect {
        self.generation += 1;
        self.is_loading = true;
        Effect::FetchRecords { generation: self.generation }
    }

    fn switch_to(&mut self, view: View, effects: &mut Vec<Effect>) {
        let changed = self.view.kind() != view.kind();
        self.view = view;
        if changed {
            effects.push(self.begin_fetch());
        }
    }
}

/// Applies one action and returns the effects it triggers.
pub fn reduce(state: &mut NavState, action: Action) -> Vec<Effect> {
    let mut effects = Vec::new();

    match action {
        Action::GoHome => state.switch_to(View::Home, &mut effects),
        Action::ViewProject(project) => {
            state.switch_to(View::Detail(project), &mut effects);
            effects.push(Effect::ScrollToTop);
        }
        Action::GoToUpload => {
            state.switch_to(View::Upload, &mut effects);
            effects.push(Effect::ScrollToTop);
        }
        Action::SetMode(mode) => state.mode = mode,
        Action::Retry => effects.push(state.begin_fetch()),
        Action::RecordsLoaded { generation, result } => {
            if generation != state.generation {
                tracing::debug!(generation, latest = state.generation, "Discarding stale project list");
                return effects;
            }
            match result {
                Ok(records) => {
                    state.records = records;
                    state.last_error = None;
                }
                Err(message) => state.last_error = Some(message),
            }
            state.is_loading = false;
        }
    }

    effects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::project::ProjectId;
    use chrono::{TimeZone, Utc};

    fn project(id: i64) -> Project {
        Project {
            id: ProjectId::Int(id),
            title: format!("Project {id}"),
            author_name: Some("Zainab Bello".into()),
            author_email: None,
            role_title: "Data Analyst".into(),
            description: None,
            tools: vec![],
            project_url: None,
            repo_url: None,
            image_url: None,
            verified: false,
            created_at: Utc.with_ymd_and_hms(2024, 1, id as u32, 0, 0, 0).unwrap(),
        }
    }

    fn fetches(effects: &[Effect]) -> usize {
        effects.iter().filter(|e| matches!(e, Effect::FetchRecords { .. })).count()
    }

    fn loaded(state: &mut NavState, records: Vec<Project>) {
        let generation = state.generation();
        reduce(state, Action::RecordsLoaded { generation, result: Ok(records) });
    }

    #[test]
    fn mount_starts_loading_home_with_one_fetch() {
        let (state, effects) = NavState::mount();
        assert_eq!(state.view, View::Home);
        assert!(state.is_loading);
        assert_eq!(effects, vec![Effect::FetchRecords { generation: 1 }]);
    }

    #[test]
    fn viewing_a_project_selects_it_and_scrolls_up() {
        let (mut state, _) = NavState::mount();
        let effects = reduce(&mut state, Action::ViewProject(project(3)));
        assert_eq!(state.view.selected(), Some(&project(3)));
        assert!(effects.contains(&Effect::ScrollToTop));
        assert_eq!(fetches(&effects), 1);
    }

    #[test]
    fn returning_home_fetches_exactly_once() {
        let (mut state, _) = NavState::mount();
        reduce(&mut state, Action::GoToUpload);
        let effects = reduce(&mut state, Action::GoHome);
        assert_eq!(fetches(&effects), 1);
        assert_eq!(state.view, View::Home);
        assert_eq!(state.view.selected(), None);
    }

    #[test]
    fn staying_on_the_same_view_does_not_refetch() {
        let (mut state, _) = NavState::mount();
        assert_eq!(fetches(&reduce(&mut state, Action::GoHome)), 0);

        reduce(&mut state, Action::GoToUpload);
        let effects = reduce(&mut state, Action::GoToUpload);
        assert_eq!(effects, vec![Effect::ScrollToTop]);
    }

    #[test]
    fn mode_changes_leave_view_and_records_alone() {
        let (mut state, _) = NavState::mount();
        loaded(&mut state, vec![project(1)]);
        let effects = reduce(&mut state, Action::SetMode(Mode::Recruiter));
        assert!(effects.is_empty());
        assert_eq!(state.mode, Mode::Recruiter);
        assert_eq!(state.view, View::Home);
        assert_eq!(state.records, vec![project(1)]);
    }

    #[test]
    fn failed_fetch_keeps_records_and_clears_loading() {
        let (mut state, _) = NavState::mount();
        loaded(&mut state, vec![project(1), project(2)]);

        reduce(&mut state, Action::Retry);
        let generation = state.generation();
        reduce(&mut state, Action::RecordsLoaded { generation, result: Err("offline".into()) });

        assert_eq!(state.records.len(), 2);
        assert!(!state.is_loading);
        assert_eq!(state.last_error.as_deref(), Some("offline"));

        reduce(&mut state, Action::Retry);
        loaded(&mut state, vec![project(3)]);
        assert_eq!(state.last_error, None);
    }

    #[test]
    fn stale_completion_does_not_overwrite_newer_state() {
        let (mut state, effects) = NavState::mount();
        let Effect::FetchRecords { generation: first } = effects[0] else {
            panic!("expected a fetch");
        };
        reduce(&mut state, Action::GoToUpload);
        loaded(&mut state, vec![project(2)]);

        reduce(&mut state, Action::RecordsLoaded { generation: first, result: Ok(vec![]) });
        assert_eq!(state.records, vec![project(2)]);
        assert!(!state.is_loading);
    }
}
