use std::borrow::Cow;

use validator::{Validate, ValidationError};

use crate::entities::project::{NewProject, RoleTitle};

/// What the upload form holds while the candidate is typing.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct UploadDraft {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,

    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,

    #[validate(custom(function = "validate_required_text", message = "Project title is required"))]
    pub title: String,

    pub role: RoleTitle,

    #[validate(custom(function = "validate_tools"))]
    pub tools: String,

    pub description: String,

    #[validate(custom(function = "validate_optional_url"))]
    pub project_link: String,

    #[validate(custom(function = "validate_url"))]
    pub github_link: String,
}

impl UploadDraft {
    /// First and last name joined by one space, exactly as typed.
    pub fn author_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn tool_list(&self) -> Vec<String> {
        parse_tools(&self.tools)
    }

    /// Builds the unverified insert payload. Call `validate()` first.
    pub fn to_new_project(&self, image_url: String) -> NewProject {
        NewProject::unverified(
            self.title.clone(),
            self.author_name(),
            self.email.clone(),
            self.role.clone(),
            optional(&self.description),
            self.tool_list(),
            optional(&self.project_link),
            self.github_link.trim().to_string(),
            image_url,
        )
    }
}

/// Splits a comma separated tool list and trims each entry. Blank entries
/// keep their position.
pub fn parse_tools(raw: &str) -> Vec<String> {
    raw.split(',').map(|tool| tool.trim().to_string()).collect()
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// ───── Validation Helpers ───────────────────────────────────────────
fn validate_required_text(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

fn validate_tools(raw: &str) -> Result<(), ValidationError> {
    if parse_tools(raw).iter().all(|tool| tool.is_empty()) {
        return Err(new_validation_error("tools_empty", "List at least one tool, separated by commas"));
    }
    Ok(())
}

fn validate_optional_url(url: &str) -> Result<(), ValidationError> {
    if url.trim().is_empty() {
        return Ok(());
    }
    validate_url(url)
}

pub fn validate_url(url: &str) -> Result<(), ValidationError> {
    match url::Url::parse(url.trim()) {
        Ok(parsed) => {
            if parsed.scheme() == "http" || parsed.scheme() == "https" {
                Ok(())
            } else {
                Err(new_validation_error("invalid_url_scheme", "URL must start with http:// or https://"))
            }
        }
        Err(_) => Err(new_validation_error("invalid_url", "Invalid URL format")),
    }
}

fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    fn valid_draft() -> UploadDraft {
        UploadDraft {
            first_name: "Ada".into(),
            last_name: "Obi".into(),
            email: "ada@example.com".into(),
            title: "Lagos Traffic Analysis Dashboard".into(),
            role: RoleTitle::DataScientist,
            tools: "Python, SQL ,PowerBI".into(),
            description: "Congestion patterns from ride-hailing data.".into(),
            project_link: String::new(),
            github_link: "https://github.com/ada/traffic".into(),
        }
    }

    #[test]
    fn tools_are_split_on_commas_and_trimmed() {
        assert_eq!(parse_tools("Python, SQL ,PowerBI"), vec!["Python", "SQL", "PowerBI"]);
        assert_eq!(parse_tools("  dbt  "), vec!["dbt"]);
    }

    #[test]
    fn blank_tool_segments_keep_their_place() {
        assert_eq!(parse_tools("Python,,SQL"), vec!["Python", "", "SQL"]);
        assert_eq!(parse_tools("Python, ,SQL,"), vec!["Python", "", "SQL", ""]);
    }

    #[test]
    fn tools_made_only_of_blanks_fail_validation() {
        let mut draft = valid_draft();
        draft.tools = " , ,".into();
        let err = AppError::from(draft.validate().unwrap_err());
        assert_eq!(err.field_names(), vec!["tools"]);
        assert!(err.to_string().contains("List at least one tool"));

        draft.tools = "SQL,,".into();
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn author_name_is_joined_without_normalisation() {
        let mut draft = valid_draft();
        assert_eq!(draft.author_name(), "Ada Obi");

        draft.first_name = "  ".into();
        draft.last_name = "".into();
        assert_eq!(draft.author_name(), "   ");
    }

    #[test]
    fn payload_is_always_unverified() {
        let project = valid_draft().to_new_project("https://img.example/1.jpg".into());
        assert!(!project.verified());

        let body = serde_json::to_value(&project).unwrap();
        assert_eq!(body["verified"], false);
        assert_eq!(body["role_title"], "Data Scientist");
        assert_eq!(body["tools"], serde_json::json!(["Python", "SQL", "PowerBI"]));
        assert!(body.get("project_url").is_none());
    }

    #[test]
    fn valid_draft_passes_validation() {
        assert!(valid_draft().validate().is_ok());
    }

    #[test]
    fn missing_required_fields_are_reported() {
        let draft = UploadDraft {
            role: RoleTitle::DataAnalyst,
            ..UploadDraft::default()
        };
        let err = AppError::from(draft.validate().unwrap_err());
        let fields = err.field_names();
        for field in ["email", "first_name", "github_link", "last_name", "title", "tools"] {
            assert!(fields.contains(&field), "missing {field} in {fields:?}");
        }
        assert!(!fields.contains(&"project_link"));
    }

    #[test]
    fn repo_link_must_be_http() {
        let mut draft = valid_draft();
        draft.github_link = "ftp://example.com/repo".into();
        let err = AppError::from(draft.validate().unwrap_err());
        assert_eq!(err.field_names(), vec!["github_link"]);
        assert!(err.to_string().contains("URL must start with http:// or https://"));
    }

    #[test]
    fn whitespace_names_still_pass_like_the_form_does() {
        let mut draft = valid_draft();
        draft.first_name = " ".into();
        assert!(draft.validate().is_ok());
    }
}
