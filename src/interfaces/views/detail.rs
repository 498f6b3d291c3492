use std::fmt::Write;

use crate::entities::project::Project;

pub fn render_detail(out: &mut String, project: &Project) {
    let _ = writeln!(out, "← Back to Talent Pool  (type `back`)");
    let _ = writeln!(out);
    let _ = writeln!(out, "🖼  {}", project.image_or_placeholder());
    if let Some(live) = project.live_url() {
        let _ = writeln!(out, "   Open Interactive View: {live}");
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Tools Used: {}", project.tools.join(", "));
    let verified = if project.verified { "✔ Passed" } else { "Pending Review" };
    let _ = writeln!(out, "Verified Code: {verified}");

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", project.title);
    let _ = writeln!(
        out,
        "({}) By {} • {}",
        project.author_initial(),
        project.author_display(),
        project.role_title
    );
    let _ = writeln!(out, "{}", "─".repeat(64));
    let _ = writeln!(out, "Project Summary");
    let _ = writeln!(out, "{}", project.description_or_default());
    let _ = writeln!(out);

    if let Some(repo) = project.source_url() {
        let _ = writeln!(out, "View Source Code: {repo}");
    }
    let _ = writeln!(out, "[ Unlock Candidate Contact ]");
    let _ = writeln!(out, "Recruiter Mode: 1 Credit will be used.");
}
