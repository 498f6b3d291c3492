use std::fmt::Write;

use crate::entities::project::RoleTitle;

/// Field prompts in the order the form asks them.
pub const FIELDS: [(&str, &str); 9] = [
    ("first_name", "First Name"),
    ("last_name", "Last Name"),
    ("email", "Email Address (Private)"),
    ("title", "Project Title"),
    ("role", "Role"),
    ("tools", "Tools Used (comma separated)"),
    ("project_link", "Project Link (Dashboard/Live, optional)"),
    ("github_link", "GitHub Repo (Required for Verification)"),
    ("description", "Description"),
];

pub fn render_upload_header(out: &mut String) {
    let _ = writeln!(out, "← Cancel & Return  (answer `cancel` to any question)");
    let _ = writeln!(out);
    let _ = writeln!(out, "Submit your Work");
    let _ = writeln!(out, "Showcase your best data projects to international recruiters.");
    let _ = writeln!(out);
}

pub fn render_role_options(out: &mut String) {
    for (i, role) in RoleTitle::OPTIONS.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, role);
    }
}

pub fn submit_label(submitting: bool) -> &'static str {
    if submitting { "Uploading..." } else { "Submit Project" }
}
