use std::{path::Path, sync::atomic::{AtomicI64, Ordering}};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::{
    entities::project::{NewProject, Project, ProjectId},
    errors::StoreError,
    repositories::project::{ListOrder, ProjectStore},
};

/// Process-local store for offline runs and tests. Assigns ids and
/// timestamps the way the hosted table does.
#[derive(Debug)]
pub struct InMemoryStore {
    rows: RwLock<Vec<Project>>,
    next_id: AtomicI64,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_projects(Vec::new())
    }

    pub fn with_projects(projects: Vec<Project>) -> Self {
        let max_id = projects
            .iter()
            .filter_map(|p| match p.id {
                ProjectId::Int(id) => Some(id),
                ProjectId::Uuid(_) => None,
            })
            .max()
            .unwrap_or(0);

        InMemoryStore {
            rows: RwLock::new(projects),
            next_id: AtomicI64::new(max_id + 1),
        }
    }

    /// Loads a JSON array of store rows, e.g. an export of the hosted table.
    pub async fn from_seed_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let raw = tokio::fs::read(path)
            .await
            .map_err(|e| StoreError::NotConfigured(format!("cannot read {}: {e}", path.display())))?;
        let projects: Vec<Project> = serde_json::from_slice(&raw)?;
        tracing::info!(count = projects.len(), path = %path.display(), "Seeded in-memory store");
        Ok(Self::with_projects(projects))
    }

    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }
}

fn sort_rows(rows: &mut [Project], order: &ListOrder) {
    // Unknown columns fall back to id order
    match order.column.as_str() {
        "created_at" => rows.sort_by_key(|p| p.created_at),
        _ => rows.sort_by(|a, b| a.id.cmp(&b.id)),
    }
    if !order.ascending {
        rows.reverse();
    }
}

#[async_trait]
impl ProjectStore for InMemoryStore {
    async fn select_projects(&self, order: &ListOrder) -> Result<Vec<Project>, StoreError> {
        let mut rows = self.rows.read().clone();
        sort_rows(&mut rows, order);
        Ok(rows)
    }

    async fn insert_project(&self, project: &NewProject) -> Result<(), StoreError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let row = Project {
            id: ProjectId::Int(id),
            title: project.title.clone(),
            author_name: Some(project.author_name.clone()),
            author_email: Some(project.author_email.clone()),
            role_title: project.role_title.to_string(),
            description: project.description.clone(),
            tools: project.tools.clone(),
            project_url: project.project_url.clone(),
            repo_url: Some(project.repo_url.clone()),
            image_url: Some(project.image_url.clone()),
            verified: project.verified(),
            created_at: Utc::now(),
        };
        self.rows.write().push(row);
        Ok(())
    }
}
