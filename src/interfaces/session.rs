use std::{collections::HashSet, io::Write, str::FromStr, time::Duration};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::instrument;

use crate::{
    background_task::{start_live_counter, CounterHandle},
    constants::WAITLIST_PROMPT,
    entities::{
        card::{Card, CardAction},
        project::{ProjectId, RoleTitle},
        upload_draft::UploadDraft,
        waitlist::request_access,
    },
    use_cases::{
        controller::RootController,
        navigation::{Action, Effect, Mode, View, ViewKind},
        upload::UploadHandler,
    },
    utils::placeholder_image::ImageSource,
    views::{
        detail::render_detail,
        home::{render_home, HomeView},
        navbar::render_navbar,
        upload_form::{render_role_options, render_upload_header, submit_label, FIELDS},
    },
    SharedStore,
};

pub const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

/// Form answer that empties a field on the edit pass.
pub const CLEAR_FIELD: &str = "-";

pub const HELP: &str = "\
Commands:
  home                 show the talent pool
  open <n>             view project n
  upload               submit your own project
  mode candidate|recruiter
  request <n>          request access to candidate n (recruiter mode)
  unlock <n>           reveal contact panel on card n
  retry                reload the project list
  back                 return to the talent pool
  help                 show this help
  quit                 leave";

/// One line of user input on the main screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Home,
    Open(usize),
    Upload,
    SetMode(Mode),
    Request(usize),
    Unlock(usize),
    Retry,
    Back,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let verb = parts.next().unwrap_or_default().to_lowercase();
        let arg = parts.next();

        let index = |arg: Option<&str>| -> Result<usize, String> {
            arg.and_then(|a| a.parse::<usize>().ok())
                .filter(|n| *n > 0)
                .ok_or_else(|| format!("`{verb}` needs a card number, e.g. `{verb} 1`"))
        };

        match verb.as_str() {
            "home" => Ok(Command::Home),
            "open" | "view" => index(arg).map(Command::Open),
            "upload" | "submit" => Ok(Command::Upload),
            "mode" => match arg.map(str::to_lowercase).as_deref() {
                Some("candidate") => Ok(Command::SetMode(Mode::Candidate)),
                Some("recruiter") => Ok(Command::SetMode(Mode::Recruiter)),
                _ => Err("usage: mode candidate|recruiter".to_string()),
            },
            "candidate" => Ok(Command::SetMode(Mode::Candidate)),
            "recruiter" => Ok(Command::SetMode(Mode::Recruiter)),
            "request" => index(arg).map(Command::Request),
            "unlock" => index(arg).map(Command::Unlock),
            "retry" | "refresh" => Ok(Command::Retry),
            "back" | "cancel" => Ok(Command::Back),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            "" => Err(String::new()),
            other => Err(format!("Unknown command `{other}`. Type `help`.")),
        }
    }
}

/// Badge counter parameters.
#[derive(Debug, Clone, Copy)]
pub struct CounterSettings {
    pub seed: i64,
    pub tick: Duration,
}

enum FormOutcome {
    Submitted,
    Cancelled,
    InputClosed,
}

/// Interactive terminal front-end: reads one event per line, renders the
/// active view after each.
pub struct Session<I, R, W>
where
    I: ImageSource,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    controller: RootController<SharedStore>,
    uploads: UploadHandler<SharedStore, I>,
    counter_settings: CounterSettings,
    counter: Option<CounterHandle>,
    unlocked: HashSet<ProjectId>,
    input: Lines<R>,
    output: W,
}

impl<I, R, W> Session<I, R, W>
where
    I: ImageSource,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub async fn start(
        store: SharedStore,
        images: I,
        counter_settings: CounterSettings,
        input: R,
        output: W,
    ) -> Self {
        let (controller, _) = RootController::mount(store.clone()).await;
        let mut session = Session {
            controller,
            uploads: UploadHandler::new(store, images),
            counter_settings,
            counter: None,
            unlocked: HashSet::new(),
            input: input.lines(),
            output,
        };
        session.sync_home_resources();
        session
    }

    pub fn controller(&self) -> &RootController<SharedStore> {
        &self.controller
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn counter_running(&self) -> bool {
        self.counter.as_ref().is_some_and(CounterHandle::is_running)
    }

    /// Runs until `quit` or end of input.
    pub async fn run(&mut self) -> std::io::Result<()> {
        self.render()?;
        while let Some(line) = self.input.next_line().await? {
            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => {
                    if !self.handle(command).await? {
                        break;
                    }
                }
                Err(msg) if msg.is_empty() => {}
                Err(msg) => writeln!(self.output, "{msg}")?,
            }
            self.render()?;
        }
        self.counter = None;
        writeln!(self.output, "Goodbye.")?;
        self.output.flush()
    }

    /// Returns `false` when input ran out mid-interaction.
    #[instrument(skip(self))]
    pub async fn handle(&mut self, command: Command) -> std::io::Result<bool> {
        match command {
            Command::Home | Command::Back => self.dispatch(Action::GoHome).await?,
            Command::SetMode(mode) => self.dispatch(Action::SetMode(mode)).await?,
            Command::Retry => self.dispatch(Action::Retry).await?,
            Command::Help => writeln!(self.output, "{HELP}")?,
            Command::Quit => return Ok(false),
            Command::Open(n) => self.open(n).await?,
            Command::Unlock(n) => {
                if let Some(id) = self.card_id(n)? {
                    self.unlocked.insert(id);
                }
            }
            Command::Request(n) => return self.request(n).await,
            Command::Upload => {
                self.dispatch(Action::GoToUpload).await?;
                return match self.upload_form().await? {
                    FormOutcome::Submitted | FormOutcome::Cancelled => {
                        self.dispatch(Action::GoHome).await?;
                        Ok(true)
                    }
                    FormOutcome::InputClosed => Ok(false),
                };
            }
        }
        Ok(true)
    }

    async fn dispatch(&mut self, action: Action) -> std::io::Result<()> {
        for effect in self.controller.dispatch(action).await {
            if effect == Effect::ScrollToTop {
                write!(self.output, "{CLEAR_SCREEN}")?;
            }
        }
        self.sync_home_resources();
        Ok(())
    }

    /// Home owns the counter and the per-card unlock flags; both go when it does.
    fn sync_home_resources(&mut self) {
        if self.controller.state().view.kind() == ViewKind::Home {
            if self.counter.is_none() {
                let CounterSettings { seed, tick } = self.counter_settings;
                self.counter = Some(start_live_counter(seed, tick));
            }
        } else {
            self.counter = None;
            self.unlocked.clear();
        }
    }

    fn card_id(&mut self, n: usize) -> std::io::Result<Option<ProjectId>> {
        let state = self.controller.state();
        if state.view.kind() != ViewKind::Home {
            writeln!(self.output, "Go back to the talent pool first (`home`).")?;
            return Ok(None);
        }
        match n.checked_sub(1).and_then(|i| state.records.get(i)) {
            Some(project) => Ok(Some(project.id.clone())),
            None => {
                writeln!(self.output, "There is no card {n}.")?;
                Ok(None)
            }
        }
    }

    async fn open(&mut self, n: usize) -> std::io::Result<()> {
        let Some(id) = self.card_id(n)? else {
            return Ok(());
        };
        let state = self.controller.state();
        let Some(project) = state.records.iter().find(|p| p.id == id) else {
            return Ok(());
        };
        let card = Card::new(project, state.mode, self.unlocked.contains(&id));
        if card.primary_action() != Some(CardAction::ViewPortfolio) {
            writeln!(self.output, "Portfolios open from Candidate mode; use `request {n}` instead.")?;
            return Ok(());
        }
        let project = project.clone();
        self.dispatch(Action::ViewProject(project)).await
    }

    async fn request(&mut self, n: usize) -> std::io::Result<bool> {
        let Some(id) = self.card_id(n)? else {
            return Ok(true);
        };
        let state = self.controller.state();
        let unlocked = self.unlocked.contains(&id);
        let action = state
            .records
            .iter()
            .find(|p| p.id == id)
            .and_then(|p| Card::new(p, state.mode, unlocked).primary_action());
        if action != Some(CardAction::RequestAccess) {
            writeln!(self.output, "Switch to Recruiter mode to request access.")?;
            return Ok(true);
        }

        writeln!(self.output, "{WAITLIST_PROMPT}")?;
        self.output.flush()?;
        let answer = self.input.next_line().await?;
        let closed = answer.is_none();
        if let Some(ack) = request_access(answer.as_deref()) {
            writeln!(self.output, "{}", ack.message())?;
        }
        Ok(!closed)
    }

    /// A blank answer keeps `current`; `-` clears it.
    async fn prompt(&mut self, label: &str, current: &str) -> std::io::Result<Option<String>> {
        if current.is_empty() {
            write!(self.output, "{label}: ")?;
        } else {
            write!(self.output, "{label} [{current}] (`-` clears): ")?;
        }
        self.output.flush()?;
        Ok(self.input.next_line().await?.map(|line| match line.trim() {
            "" => current.to_string(),
            CLEAR_FIELD => String::new(),
            _ => line,
        }))
    }

    /// Walks the form fields, then submits. On failure the draft is kept and
    /// the user may retry, edit, or cancel.
    async fn upload_form(&mut self) -> std::io::Result<FormOutcome> {
        let mut draft = UploadDraft::default();
        let mut header = String::new();
        render_upload_header(&mut header);
        write!(self.output, "{header}")?;

        'edit: loop {
            for (field, label) in FIELDS {
                if field == "role" {
                    let mut options = String::new();
                    render_role_options(&mut options);
                    write!(self.output, "{options}")?;
                }
                let current = field_value(&draft, field);
                let Some(answer) = self.prompt(label, &current).await? else {
                    return Ok(FormOutcome::InputClosed);
                };
                if answer.trim().eq_ignore_ascii_case("cancel") {
                    return Ok(FormOutcome::Cancelled);
                }
                set_field(&mut draft, field, answer);
            }

            loop {
                writeln!(self.output, "[ {} ]", submit_label(true))?;
                match self.uploads.submit(&draft).await {
                    Ok(receipt) => {
                        writeln!(self.output, "{}", receipt.message)?;
                        return Ok(FormOutcome::Submitted);
                    }
                    Err(e) => {
                        writeln!(self.output, "Error uploading: {e}")?;
                    }
                }

                let Some(choice) = self.prompt("[r]etry, [e]dit or [c]ancel", "").await? else {
                    return Ok(FormOutcome::InputClosed);
                };
                match choice.trim().to_lowercase().as_str() {
                    "r" | "retry" => continue,
                    "c" | "cancel" => return Ok(FormOutcome::Cancelled),
                    _ => continue 'edit,
                }
            }
        }
    }

    pub fn render(&mut self) -> std::io::Result<()> {
        let state = self.controller.state();
        let mut out = String::new();
        render_navbar(&mut out, state.mode);
        match &state.view {
            View::Home => {
                let live_count = self
                    .counter
                    .as_ref()
                    .map_or(self.counter_settings.seed, CounterHandle::value);
                render_home(&mut out, &HomeView { state, live_count, unlocked: &self.unlocked });
            }
            View::Detail(project) => render_detail(&mut out, project),
            View::Upload => {
                let label = submit_label(self.uploads.is_submitting());
                out.push_str(&format!("[ {label} ]\n"));
            }
        }
        write!(self.output, "{out}")?;
        writeln!(self.output, "> (type `help` for commands)")?;
        self.output.flush()
    }
}

fn field_value(draft: &UploadDraft, field: &str) -> String {
    match field {
        "first_name" => draft.first_name.clone(),
        "last_name" => draft.last_name.clone(),
        "email" => draft.email.clone(),
        "title" => draft.title.clone(),
        "role" => draft.role.to_string(),
        "tools" => draft.tools.clone(),
        "project_link" => draft.project_link.clone(),
        "github_link" => draft.github_link.clone(),
        "description" => draft.description.clone(),
        _ => String::new(),
    }
}

fn set_field(draft: &mut UploadDraft, field: &str, value: String) {
    match field {
        "first_name" => draft.first_name = value,
        "last_name" => draft.last_name = value,
        "email" => draft.email = value.trim().to_string(),
        "title" => draft.title = value,
        "role" => draft.role = RoleTitle::parse_choice(&value),
        "tools" => draft.tools = value,
        "project_link" => draft.project_link = value,
        "github_link" => draft.github_link = value,
        "description" => draft.description = value,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!("open 2".parse::<Command>(), Ok(Command::Open(2)));
        assert_eq!("MODE Recruiter".parse::<Command>(), Ok(Command::SetMode(Mode::Recruiter)));
        assert_eq!("request 1".parse::<Command>(), Ok(Command::Request(1)));
        assert_eq!("q".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn rejects_missing_or_zero_card_numbers() {
        assert!("open".parse::<Command>().is_err());
        assert!("unlock 0".parse::<Command>().is_err());
        assert!("dance".parse::<Command>().unwrap_err().contains("Unknown command"));
        assert_eq!("   ".parse::<Command>(), Err(String::new()));
    }

    #[test]
    fn draft_fields_round_trip_through_the_prompt_table() {
        let mut draft = UploadDraft::default();
        for (field, _) in FIELDS {
            set_field(&mut draft, field, format!("{field}-value"));
        }
        assert_eq!(draft.first_name, "first_name-value");
        assert_eq!(draft.role, RoleTitle::Other("role-value".into()));
        assert_eq!(field_value(&draft, "github_link"), "github_link-value");
    }
}
