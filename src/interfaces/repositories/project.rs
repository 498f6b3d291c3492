use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    constants::ORDER_COLUMN,
    entities::project::{NewProject, Project},
    errors::StoreError,
};

#[cfg(test)]
use mockall::automock;

/// Sort order for a listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOrder {
    pub column: String,
    pub ascending: bool,
}

impl ListOrder {
    pub fn newest_first() -> Self {
        ListOrder {
            column: ORDER_COLUMN.to_string(),
            ascending: false,
        }
    }

    /// PostgREST `order` parameter value, e.g. `created_at.desc`.
    pub fn to_query_value(&self) -> String {
        let direction = if self.ascending { "asc" } else { "desc" };
        format!("{}.{}", self.column, direction)
    }
}

/// The hosted store the client reads submissions from and writes them to.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn select_projects(&self, order: &ListOrder) -> Result<Vec<Project>, StoreError>;
    async fn insert_project(&self, project: &NewProject) -> Result<(), StoreError>;
}

#[async_trait]
impl<S> ProjectStore for Arc<S>
where
    S: ProjectStore + ?Sized,
{
    async fn select_projects(&self, order: &ListOrder) -> Result<Vec<Project>, StoreError> {
        (**self).select_projects(order).await
    }

    async fn insert_project(&self, project: &NewProject) -> Result<(), StoreError> {
        (**self).insert_project(project).await
    }
}
