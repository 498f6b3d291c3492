use tracing::instrument;

use crate::{
    entities::project::Project,
    repositories::project::{ListOrder, ProjectStore},
    use_cases::navigation::{reduce, Action, Effect, NavState},
};

/// Owns the navigation state and runs the store calls the reducer asks for.
pub struct RootController<S>
where
    S: ProjectStore,
{
    pub store: S,
    state: NavState,
}

impl<S> RootController<S>
where
    S: ProjectStore,
{
    /// Builds the controller and performs the initial listing fetch.
    pub async fn mount(store: S) -> (Self, Vec<Effect>) {
        let (state, effects) = NavState::mount();
        let mut controller = RootController { store, state };
        let remaining = controller.run_effects(effects).await;
        (controller, remaining)
    }

    pub fn state(&self) -> &NavState {
        &self.state
    }

    /// Applies an action, completes any fetch it triggers and hands the
    /// presentation effects back to the caller.
    pub async fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        let effects = reduce(&mut self.state, action);
        self.run_effects(effects).await
    }

    async fn run_effects(&mut self, effects: Vec<Effect>) -> Vec<Effect> {
        let mut remaining = Vec::new();
        for effect in effects {
            match effect {
                Effect::FetchRecords { generation } => {
                    let result = self.load_records().await;
                    let follow_up = reduce(
                        &mut self.state,
                        Action::RecordsLoaded { generation, result },
                    );
                    remaining.extend(follow_up);
                }
                other => remaining.push(other),
            }
        }
        remaining
    }

    /// Fetches all submissions, newest first. Errors are logged and returned
    /// as text for the error banner.
    #[instrument(skip(self))]
    async fn load_records(&self) -> Result<Vec<Project>, String> {
        match self.store.select_projects(&ListOrder::newest_first()).await {
            Ok(projects) => {
                tracing::info!(count = projects.len(), "Loaded projects");
                Ok(projects)
            }
            Err(e) => {
                tracing::error!("Error fetching projects: {}", e);
                Err(e.to_string())
            }
        }
    }
}
