use std::fmt::Write;

use crate::entities::card::Card;

/// One grid entry. `index` is the number the user types to act on it.
pub fn render_card(out: &mut String, index: usize, card: &Card<'_>) {
    let project = card.project;

    let _ = write!(out, "[{index}] ");
    if card.shows_verified_badge() {
        let _ = write!(out, "✔ VERIFIED CODE  ");
    }
    let _ = writeln!(out, "{}", card.headline());
    let _ = writeln!(out, "    {}", project.role_title.to_uppercase());
    let _ = writeln!(out, "    {}", project.title);

    if card.shows_lock_overlay() {
        let _ = writeln!(out, "    🔒 Unlock to see details");
    }

    if card.shows_contact_panel() {
        let _ = writeln!(out, "    ✔ Contact Revealed   [Resume] [Email]");
        return;
    }

    if !project.tools.is_empty() {
        let chips: Vec<String> = project.tools.iter().map(|t| format!("‹{t}›")).collect();
        let _ = writeln!(out, "    {}", chips.join(" "));
    }
    if let Some(action) = card.primary_action() {
        let _ = writeln!(out, "    → {}", action.label());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        entities::project::{Project, ProjectId},
        use_cases::navigation::Mode,
    };
    use chrono::Utc;

    fn project() -> Project {
        Project {
            id: ProjectId::Int(4),
            title: "Accra Power Outage Tracker".into(),
            author_name: Some("Esi Owusu".into()),
            author_email: Some("esi@example.com".into()),
            role_title: "Data Analyst".into(),
            description: None,
            tools: vec!["Python".into(), "Tableau".into()],
            project_url: None,
            repo_url: None,
            image_url: None,
            verified: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn candidate_card_shows_tools_and_portfolio_link() {
        let p = project();
        let mut out = String::new();
        render_card(&mut out, 1, &Card::new(&p, Mode::Candidate, false));
        assert!(out.starts_with("[1] ✔ VERIFIED CODE  Esi Owusu"));
        assert!(out.contains("‹Python› ‹Tableau›"));
        assert!(out.contains("→ View Portfolio"));
        assert!(!out.contains("esi@example.com"));
    }

    #[test]
    fn locked_recruiter_card_still_prints_the_author() {
        let p = project();
        let mut out = String::new();
        render_card(&mut out, 2, &Card::new(&p, Mode::Recruiter, false));
        assert!(out.contains("Unlock to see details"));
        assert!(out.contains("Esi Owusu"));
        assert!(out.contains("→ Request Access"));
    }

    #[test]
    fn unlocked_card_replaces_actions_with_contact_panel() {
        let p = project();
        let mut out = String::new();
        render_card(&mut out, 2, &Card::new(&p, Mode::Recruiter, true));
        assert!(out.contains("Contact Revealed"));
        assert!(!out.contains("Request Access"));
        assert!(!out.contains("‹Python›"));
    }
}
