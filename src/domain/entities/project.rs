use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{DEFAULT_DESCRIPTION, FALLBACK_IMAGE_URL, UNKNOWN_AUTHOR};

/// Store-assigned identifier. Hosted tables use either a bigint sequence or a UUID.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProjectId {
    Int(i64),
    Uuid(Uuid),
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectId::Int(id) => write!(f, "{id}"),
            ProjectId::Uuid(id) => write!(f, "{id}"),
        }
    }
}

/// A portfolio submission as returned by the store.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default, skip_serializing)]
    pub author_email: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role_title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tools: Vec<String>,
    #[serde(default)]
    pub project_url: Option<String>,
    #[serde(default)]
    pub repo_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Hosted columns are nullable; a null reads as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Project {
    pub fn author_display(&self) -> &str {
        non_blank(&self.author_name).unwrap_or(UNKNOWN_AUTHOR)
    }

    /// First character of the author name, `?` when there is none.
    pub fn author_initial(&self) -> char {
        self.author_name
            .as_deref()
            .and_then(|name| name.chars().next())
            .unwrap_or('?')
    }

    pub fn description_or_default(&self) -> &str {
        non_blank(&self.description).unwrap_or(DEFAULT_DESCRIPTION)
    }

    pub fn image_or_placeholder(&self) -> &str {
        non_blank(&self.image_url).unwrap_or(FALLBACK_IMAGE_URL)
    }

    pub fn live_url(&self) -> Option<&str> {
        non_blank(&self.project_url)
    }

    pub fn source_url(&self) -> Option<&str> {
        non_blank(&self.repo_url)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

// author_email stays out of logs as well as views
impl fmt::Debug for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Project")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("author_name", &self.author_name)
            .field("role_title", &self.role_title)
            .field("tools", &self.tools)
            .field("verified", &self.verified)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

/// Roles offered by the submission form. Stored rows may carry free text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RoleTitle {
    #[default]
    DataAnalyst,
    DataScientist,
    AnalyticsEngineer,
    MlEngineer,
    Other(String),
}

impl RoleTitle {
    pub const OPTIONS: [RoleTitle; 4] = [
        RoleTitle::DataAnalyst,
        RoleTitle::DataScientist,
        RoleTitle::AnalyticsEngineer,
        RoleTitle::MlEngineer,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            RoleTitle::DataAnalyst => "Data Analyst",
            RoleTitle::DataScientist => "Data Scientist",
            RoleTitle::AnalyticsEngineer => "Analytics Engineer",
            RoleTitle::MlEngineer => "ML Engineer",
            RoleTitle::Other(role) => role,
        }
    }

    /// Parses a form selection: either a 1-based option number or the role text.
    pub fn parse_choice(input: &str) -> RoleTitle {
        let input = input.trim();
        if input.is_empty() {
            return RoleTitle::default();
        }
        if let Ok(index) = input.parse::<usize>() {
            if let Some(role) = index.checked_sub(1).and_then(|i| RoleTitle::OPTIONS.get(i).cloned()) {
                return role;
            }
        }
        RoleTitle::from(input)
    }
}

impl From<&str> for RoleTitle {
    fn from(value: &str) -> Self {
        RoleTitle::OPTIONS
            .iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(value))
            .cloned()
            .unwrap_or_else(|| RoleTitle::Other(value.to_string()))
    }
}

impl fmt::Display for RoleTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RoleTitle {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Insert payload for a new submission.
///
/// `verified` has no setter: every payload built here goes out unverified and
/// only the external review process can flip it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewProject {
    pub title: String,
    pub author_name: String,
    pub author_email: String,
    pub role_title: RoleTitle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tools: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_url: Option<String>,
    pub repo_url: String,
    pub image_url: String,
    verified: bool,
}

impl NewProject {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn unverified(
        title: String,
        author_name: String,
        author_email: String,
        role_title: RoleTitle,
        description: Option<String>,
        tools: Vec<String>,
        project_url: Option<String>,
        repo_url: String,
        image_url: String,
    ) -> Self {
        NewProject {
            title,
            author_name,
            author_email,
            role_title,
            description,
            tools,
            project_url,
            repo_url,
            image_url,
            verified: false,
        }
    }

    pub fn verified(&self) -> bool {
        self.verified
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row() -> serde_json::Value {
        json!({
            "id": 7,
            "title": "Lagos Traffic Analysis Dashboard",
            "author_name": "Ada Obi",
            "author_email": "ada@example.com",
            "role_title": "Data Analyst",
            "description": null,
            "tools": ["Python", "SQL"],
            "project_url": "",
            "repo_url": "https://github.com/ada/traffic",
            "image_url": null,
            "verified": false,
            "created_at": "2024-05-01T10:00:00+00:00"
        })
    }

    #[test]
    fn deserializes_a_store_row_with_nulls() {
        let project: Project = serde_json::from_value(row()).unwrap();
        assert_eq!(project.id, ProjectId::Int(7));
        assert_eq!(project.description_or_default(), DEFAULT_DESCRIPTION);
        assert_eq!(project.image_or_placeholder(), FALLBACK_IMAGE_URL);
        assert_eq!(project.live_url(), None);
        assert_eq!(project.source_url(), Some("https://github.com/ada/traffic"));
        assert_eq!(project.author_initial(), 'A');
    }

    #[test]
    fn accepts_uuid_ids_and_null_tools() {
        let mut value = row();
        value["id"] = json!("8f5e0b3a-2c4d-4e6f-8a9b-0c1d2e3f4a5b");
        value["tools"] = json!(null);
        let project: Project = serde_json::from_value(value).unwrap();
        assert!(matches!(project.id, ProjectId::Uuid(_)));
        assert!(project.tools.is_empty());
    }

    #[test]
    fn null_columns_read_as_defaults() {
        let mut value = row();
        value["title"] = json!(null);
        value["role_title"] = json!(null);
        value["verified"] = json!(null);
        let project: Project = serde_json::from_value(value).unwrap();
        assert_eq!(project.title, "");
        assert_eq!(project.role_title, "");
        assert!(!project.verified);
        assert_eq!(project.tools, ["Python", "SQL"]);
    }

    #[test]
    fn missing_author_renders_unknown_with_question_mark() {
        let mut value = row();
        value["author_name"] = json!(null);
        let project: Project = serde_json::from_value(value).unwrap();
        assert_eq!(project.author_display(), UNKNOWN_AUTHOR);
        assert_eq!(project.author_initial(), '?');
    }

    #[test]
    fn email_never_leaves_through_serialize_or_debug() {
        let project: Project = serde_json::from_value(row()).unwrap();
        let serialized = serde_json::to_string(&project).unwrap();
        assert!(!serialized.contains("ada@example.com"));
        assert!(!format!("{project:?}").contains("ada@example.com"));
    }

    #[test]
    fn role_choice_accepts_numbers_names_and_free_text() {
        assert_eq!(RoleTitle::parse_choice(""), RoleTitle::DataAnalyst);
        assert_eq!(RoleTitle::parse_choice("4"), RoleTitle::MlEngineer);
        assert_eq!(RoleTitle::parse_choice("data scientist"), RoleTitle::DataScientist);
        assert_eq!(
            RoleTitle::parse_choice("BI Developer"),
            RoleTitle::Other("BI Developer".into())
        );
        assert_eq!(RoleTitle::parse_choice("9"), RoleTitle::Other("9".into()));
    }
}
