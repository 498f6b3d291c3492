use crate::entities::project::Project;
use crate::use_cases::navigation::Mode;

/// What the card's primary button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    ViewPortfolio,
    RequestAccess,
}

impl CardAction {
    pub fn label(&self) -> &'static str {
        match self {
            CardAction::ViewPortfolio => "View Portfolio",
            CardAction::RequestAccess => "Request Access",
        }
    }
}

/// Summary card for the talent grid, derived from a project, the current mode
/// and the card's own unlock flag.
#[derive(Debug, Clone, Copy)]
pub struct Card<'a> {
    pub project: &'a Project,
    pub mode: Mode,
    pub unlocked: bool,
}

impl<'a> Card<'a> {
    pub fn new(project: &'a Project, mode: Mode, unlocked: bool) -> Self {
        Card { project, mode, unlocked }
    }

    /// The overlay is cosmetic: `headline` keeps showing the author either way.
    pub fn shows_lock_overlay(&self) -> bool {
        self.mode == Mode::Recruiter && !self.unlocked
    }

    pub fn headline(&self) -> &'a str {
        self.project.author_display()
    }

    pub fn shows_verified_badge(&self) -> bool {
        self.project.verified
    }

    pub fn shows_contact_panel(&self) -> bool {
        self.unlocked
    }

    /// `None` once unlocked, where the contact panel replaces the button.
    pub fn primary_action(&self) -> Option<CardAction> {
        if self.unlocked {
            return None;
        }
        Some(match self.mode {
            Mode::Candidate => CardAction::ViewPortfolio,
            Mode::Recruiter => CardAction::RequestAccess,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::project::ProjectId;
    use chrono::Utc;

    fn project(verified: bool) -> Project {
        Project {
            id: ProjectId::Int(1),
            title: "Churn Model".into(),
            author_name: Some("Kwame Mensah".into()),
            author_email: Some("kwame@example.com".into()),
            role_title: "ML Engineer".into(),
            description: None,
            tools: vec!["Python".into()],
            project_url: None,
            repo_url: Some("https://github.com/kwame/churn".into()),
            image_url: None,
            verified,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn candidate_mode_links_to_the_portfolio() {
        let p = project(false);
        let card = Card::new(&p, Mode::Candidate, false);
        assert!(!card.shows_lock_overlay());
        assert_eq!(card.primary_action(), Some(CardAction::ViewPortfolio));
    }

    #[test]
    fn recruiter_mode_locks_but_still_names_the_author() {
        let p = project(false);
        let card = Card::new(&p, Mode::Recruiter, false);
        assert!(card.shows_lock_overlay());
        assert_eq!(card.headline(), "Kwame Mensah");
        assert_eq!(card.primary_action(), Some(CardAction::RequestAccess));
    }

    #[test]
    fn unlocked_card_reveals_contact_panel() {
        let p = project(true);
        let card = Card::new(&p, Mode::Recruiter, true);
        assert!(!card.shows_lock_overlay());
        assert!(card.shows_contact_panel());
        assert!(card.shows_verified_badge());
        assert_eq!(card.primary_action(), None);
    }
}
