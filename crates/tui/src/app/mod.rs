use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};

use api_types::{
    bill::{Bill, BillCategory, BillDraft},
    user::UserNew,
};
use chrono::NaiveDate;

use crate::{
    client::Client,
    config::AppConfig,
    error::{AppError, Result},
    store::BillsStore,
    sync, ui,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Register,
    Home,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Dashboard,
    Bills,
}

impl Section {
    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Bills => "Bills",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

#[derive(Debug)]
pub struct LoginState {
    pub email: String,
    pub password: String,
    pub focus: LoginField,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterField {
    FullName,
    Email,
    Password,
}

#[derive(Debug)]
pub struct RegisterState {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub focus: RegisterField,
    pub message: Option<String>,
}

impl Default for RegisterState {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            password: String::new(),
            focus: RegisterField::FullName,
            message: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Amount,
    DueDate,
    Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(i64),
}

/// Input state of the add/edit dialog.
///
/// All fields are edited as text and validated into a [`BillDraft`] on
/// submit; a failed submit leaves the entered text in place.
#[derive(Debug)]
pub struct BillFormState {
    pub mode: FormMode,
    pub title: String,
    pub description: String,
    pub amount: String,
    pub due_date: String,
    pub category: usize,
    pub focus: FormField,
    pub message: Option<String>,
}

impl BillFormState {
    pub fn for_new() -> Self {
        Self {
            mode: FormMode::Add,
            title: String::new(),
            description: String::new(),
            amount: String::new(),
            due_date: String::new(),
            category: 0,
            focus: FormField::Title,
            message: None,
        }
    }

    pub fn for_bill(bill: &Bill) -> Self {
        Self {
            mode: FormMode::Edit(bill.id),
            title: bill.title.clone(),
            description: bill.description.clone().unwrap_or_default(),
            amount: format!("{:.2}", bill.amount),
            due_date: bill.due_date.date().format("%Y-%m-%d").to_string(),
            category: BillCategory::ALL
                .iter()
                .position(|c| *c == bill.category)
                .unwrap_or(0),
            focus: FormField::Title,
            message: None,
        }
    }

    pub fn selected_category(&self) -> BillCategory {
        BillCategory::ALL[self.category % BillCategory::ALL.len()]
    }

    pub fn next_focus(&mut self) {
        self.focus = match self.focus {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Amount,
            FormField::Amount => FormField::DueDate,
            FormField::DueDate => FormField::Category,
            FormField::Category => FormField::Title,
        };
    }

    pub fn cycle_category(&mut self, forward: bool) {
        let len = BillCategory::ALL.len();
        self.category = if forward {
            (self.category + 1) % len
        } else {
            (self.category + len - 1) % len
        };
    }

    fn active_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::Amount => Some(&mut self.amount),
            FormField::DueDate => Some(&mut self.due_date),
            FormField::Category => None,
        }
    }

    /// Validates the entered text into a request draft.
    pub fn draft(&self) -> std::result::Result<BillDraft, String> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("Title must not be empty.".to_string());
        }

        let amount: f64 = self
            .amount
            .trim()
            .parse()
            .map_err(|_| "Amount is not a number.".to_string())?;
        if amount < 0.0 || !amount.is_finite() {
            return Err("Amount must not be negative.".to_string());
        }

        let due_date = NaiveDate::parse_from_str(self.due_date.trim(), "%Y-%m-%d")
            .map_err(|_| "Due date must be YYYY-MM-DD.".to_string())?;

        let description = self.description.trim();
        let description = (!description.is_empty()).then(|| description.to_string());

        Ok(BillDraft {
            title: title.to_string(),
            description,
            amount,
            due_date,
            category: self.selected_category(),
        })
    }
}

#[derive(Debug, Default)]
pub struct BillsViewState {
    pub selected: usize,
    pub form: Option<BillFormState>,
    pub message: Option<String>,
}

impl BillsViewState {
    fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(len - 1);
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else {
            self.selected = self.selected.min(len - 1);
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub section: Section,
    pub login: LoginState,
    pub register: RegisterState,
    pub token: Option<String>,
    pub store: BillsStore,
    pub bills_view: BillsViewState,
}

pub struct App {
    config: AppConfig,
    client: Client,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url)?;
        let state = AppState {
            screen: Screen::Login,
            section: Section::Dashboard,
            login: LoginState {
                email: config.email.clone(),
                password: String::new(),
                focus: LoginField::Email,
                message: None,
            },
            register: RegisterState::default(),
            token: None,
            store: BillsStore::new(),
            bills_view: BillsViewState::default(),
        };

        Ok(Self {
            config,
            client,
            state,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key).await?,
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// True while a text field has focus, so printable keys must not be
    /// swallowed by shortcuts.
    fn editing(&self) -> bool {
        match self.state.screen {
            Screen::Login | Screen::Register => true,
            Screen::Home => self.state.bills_view.form.is_some(),
        }
    }

    async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match ui::keymap::map_key(key) {
            ui::keymap::AppAction::Quit => {
                if self.editing() {
                    self.handle_char('q').await?;
                } else {
                    self.should_quit = true;
                }
            }
            ui::keymap::AppAction::ForceQuit => {
                self.should_quit = true;
            }
            ui::keymap::AppAction::Cancel => self.handle_cancel(),
            ui::keymap::AppAction::NextField => self.advance_focus(),
            ui::keymap::AppAction::Submit => self.handle_submit().await?,
            ui::keymap::AppAction::Backspace => {
                if let Some(field) = self.active_text_mut() {
                    field.pop();
                }
            }
            ui::keymap::AppAction::Up => self.handle_up(),
            ui::keymap::AppAction::Down => self.handle_down(),
            ui::keymap::AppAction::Register => {
                if self.state.screen == Screen::Login {
                    self.state.register = RegisterState::default();
                    self.state.screen = Screen::Register;
                }
            }
            ui::keymap::AppAction::Input(ch) => self.handle_char(ch).await?,
            ui::keymap::AppAction::None => {}
        }

        Ok(())
    }

    fn handle_cancel(&mut self) {
        match self.state.screen {
            Screen::Register => self.state.screen = Screen::Login,
            Screen::Home => {
                self.state.bills_view.form = None;
            }
            Screen::Login => {}
        }
    }

    fn advance_focus(&mut self) {
        match self.state.screen {
            Screen::Login => {
                self.state.login.focus = match self.state.login.focus {
                    LoginField::Email => LoginField::Password,
                    LoginField::Password => LoginField::Email,
                };
            }
            Screen::Register => {
                self.state.register.focus = match self.state.register.focus {
                    RegisterField::FullName => RegisterField::Email,
                    RegisterField::Email => RegisterField::Password,
                    RegisterField::Password => RegisterField::FullName,
                };
            }
            Screen::Home => {
                if let Some(form) = self.state.bills_view.form.as_mut() {
                    form.next_focus();
                }
            }
        }
    }

    fn active_text_mut(&mut self) -> Option<&mut String> {
        match self.state.screen {
            Screen::Login => Some(match self.state.login.focus {
                LoginField::Email => &mut self.state.login.email,
                LoginField::Password => &mut self.state.login.password,
            }),
            Screen::Register => Some(match self.state.register.focus {
                RegisterField::FullName => &mut self.state.register.full_name,
                RegisterField::Email => &mut self.state.register.email,
                RegisterField::Password => &mut self.state.register.password,
            }),
            Screen::Home => self
                .state
                .bills_view
                .form
                .as_mut()
                .and_then(|form| form.active_text_mut()),
        }
    }

    fn handle_up(&mut self) {
        if let Some(form) = self.state.bills_view.form.as_mut() {
            if form.focus == FormField::Category {
                form.cycle_category(false);
            }
            return;
        }
        if self.state.screen == Screen::Home && self.state.section == Section::Bills {
            self.state.bills_view.select_prev();
        }
    }

    fn handle_down(&mut self) {
        if let Some(form) = self.state.bills_view.form.as_mut() {
            if form.focus == FormField::Category {
                form.cycle_category(true);
            }
            return;
        }
        if self.state.screen == Screen::Home && self.state.section == Section::Bills {
            let len = self.state.store.bills().len();
            self.state.bills_view.select_next(len);
        }
    }

    async fn handle_submit(&mut self) -> Result<()> {
        match self.state.screen {
            Screen::Login => self.attempt_login().await?,
            Screen::Register => self.attempt_register().await?,
            Screen::Home => {
                if self.state.bills_view.form.is_some() {
                    self.submit_form().await?;
                } else if self.state.section == Section::Bills {
                    self.open_edit_form();
                }
            }
        }
        Ok(())
    }

    async fn handle_char(&mut self, ch: char) -> Result<()> {
        if self.editing() {
            if let Some(field) = self.active_text_mut() {
                field.push(ch);
            }
            return Ok(());
        }

        match ch {
            'd' | 'D' => self.state.section = Section::Dashboard,
            'b' | 'B' => self.state.section = Section::Bills,
            'r' | 'R' => self.load_bills().await,
            'a' | 'A' => {
                if self.state.section == Section::Bills {
                    self.state.bills_view.message = None;
                    self.state.bills_view.form = Some(BillFormState::for_new());
                }
            }
            'e' | 'E' => {
                if self.state.section == Section::Bills {
                    self.open_edit_form();
                }
            }
            'x' | 'X' => {
                if self.state.section == Section::Bills {
                    self.delete_selected().await;
                }
            }
            'j' | 'J' => self.handle_down(),
            'k' | 'K' => self.handle_up(),
            'l' | 'L' => self.logout(),
            _ => {}
        }
        Ok(())
    }

    async fn attempt_login(&mut self) -> Result<()> {
        let email = self.state.login.email.trim().to_string();
        let password = self.state.login.password.trim().to_string();

        if email.is_empty() || password.is_empty() {
            self.state.login.message = Some("Enter email and password.".to_string());
            return Ok(());
        }

        match self.client.login(&email, &password).await {
            Ok(token) => {
                self.state.token = Some(token.access_token);
                self.state.login.message = None;
                self.state.login.password.clear();
                self.state.screen = Screen::Home;
                self.state.section = Section::Dashboard;
                self.load_bills().await;
            }
            Err(err) => {
                self.state.login.message = Some(err.message());
            }
        }

        Ok(())
    }

    async fn attempt_register(&mut self) -> Result<()> {
        let register = &self.state.register;
        let user = UserNew {
            email: register.email.trim().to_string(),
            password: register.password.trim().to_string(),
            full_name: register.full_name.trim().to_string(),
        };

        if user.email.is_empty() || user.password.is_empty() || user.full_name.is_empty() {
            self.state.register.message = Some("Fill in all fields.".to_string());
            return Ok(());
        }

        match self.client.register(&user).await {
            Ok(created) => {
                self.state.login.email = created.email;
                self.state.login.message = Some("Account created, sign in.".to_string());
                self.state.screen = Screen::Login;
            }
            Err(err) => {
                self.state.register.message = Some(err.message());
            }
        }

        Ok(())
    }

    async fn load_bills(&mut self) {
        let Some(token) = self.state.token.clone() else {
            return;
        };
        sync::load(&self.client, &mut self.state.store, &token).await;
        let len = self.state.store.bills().len();
        self.state.bills_view.clamp(len);
    }

    fn open_edit_form(&mut self) {
        let selected = self.state.bills_view.selected;
        if let Some(bill) = self.state.store.bills().get(selected) {
            self.state.bills_view.message = None;
            self.state.bills_view.form = Some(BillFormState::for_bill(bill));
        }
    }

    /// Submits the open dialog. On failure the dialog stays open with the
    /// server message as an inline banner and the store stays untouched.
    async fn submit_form(&mut self) -> Result<()> {
        let Some(token) = self.state.token.clone() else {
            return Ok(());
        };
        let Some(form) = self.state.bills_view.form.as_mut() else {
            return Ok(());
        };

        let draft = match form.draft() {
            Ok(draft) => draft,
            Err(message) => {
                form.message = Some(message);
                return Ok(());
            }
        };
        let mode = form.mode;

        let outcome = match mode {
            FormMode::Add => {
                sync::create(&self.client, &mut self.state.store, &token, &draft).await
            }
            FormMode::Edit(id) => {
                sync::edit(&self.client, &mut self.state.store, &token, id, &draft).await
            }
        };

        match outcome {
            Ok(()) => {
                self.state.bills_view.form = None;
            }
            Err(message) => {
                if let Some(form) = self.state.bills_view.form.as_mut() {
                    form.message = Some(message);
                }
            }
        }

        Ok(())
    }

    async fn delete_selected(&mut self) {
        let Some(token) = self.state.token.clone() else {
            return;
        };
        let selected = self.state.bills_view.selected;
        let Some(id) = self.state.store.bills().get(selected).map(|bill| bill.id) else {
            return;
        };

        match sync::remove(&self.client, &mut self.state.store, &token, id).await {
            Ok(()) => {
                self.state.bills_view.message = None;
                let len = self.state.store.bills().len();
                self.state.bills_view.clamp(len);
            }
            Err(message) => {
                self.state.bills_view.message = Some(message);
            }
        }
    }

    /// Ends the session: drops the token and resets the store to empty.
    fn logout(&mut self) {
        self.state.token = None;
        self.state.store = BillsStore::new();
        self.state.bills_view = BillsViewState::default();
        self.state.login.password.clear();
        self.state.login.message = None;
        self.state.screen = Screen::Login;
        self.state.section = Section::Dashboard;
    }

    #[allow(dead_code)]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
