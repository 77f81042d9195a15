// Menu navigation as an explicit state machine.
//
// ```text
//   Welcome ──(sign up/in with token)──→ Main ──→ Products / Users
//      ↑  └──(exit)──→ Exit               │  ↖───── back ─────┘
//      └──────────────── back ────────────┘
// ```
//
// `MenuState::items` is the transition table: every numbered option either
// runs an `Action` or moves to another state. Actions report an `Outcome`
// and `MenuState::after` decides where that leaves us.

use tracing::{debug, warn};

use crate::api::Transport;
use crate::entity::EntityKind;
use crate::error::CliError;
use crate::handlers::{self, Context, Outcome};
use crate::ui::{self, failure, notice, Console};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Welcome,
    Main,
    Products,
    Users,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrudOp {
    List,
    Fetch,
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SignUp,
    SignIn,
    Crud(EntityKind, CrudOp),
    FindExpensiveProducts,
    GenerateProfiles,
    ProfileTypes,
}

/// What choosing a menu option does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    Run(Action),
    Goto(MenuState),
}

#[derive(Debug, Clone, Copy)]
pub struct MenuItem {
    pub label: &'static str,
    pub entry: Entry,
}

const fn run(label: &'static str, action: Action) -> MenuItem {
    MenuItem {
        label,
        entry: Entry::Run(action),
    }
}

const fn goto(label: &'static str, state: MenuState) -> MenuItem {
    MenuItem {
        label,
        entry: Entry::Goto(state),
    }
}

const WELCOME: [MenuItem; 3] = [
    run("Sign Up", Action::SignUp),
    run("Sign In", Action::SignIn),
    goto("Exit", MenuState::Exit),
];

const MAIN: [MenuItem; 3] = [
    goto("Manage Products", MenuState::Products),
    goto("Manage Users", MenuState::Users),
    goto("Return to welcome menu", MenuState::Welcome),
];

const PRODUCTS: [MenuItem; 7] = [
    run("Display all products", Action::Crud(EntityKind::Products, CrudOp::List)),
    run("Fetch a product by ID", Action::Crud(EntityKind::Products, CrudOp::Fetch)),
    run("Add a new product", Action::Crud(EntityKind::Products, CrudOp::Create)),
    run("Update a product", Action::Crud(EntityKind::Products, CrudOp::Update)),
    run("Delete a product", Action::Crud(EntityKind::Products, CrudOp::Delete)),
    run("Find expensive products", Action::FindExpensiveProducts),
    goto("Return to main menu", MenuState::Main),
];

const USERS: [MenuItem; 8] = [
    run("Display all users", Action::Crud(EntityKind::Users, CrudOp::List)),
    run("Fetch a user by ID", Action::Crud(EntityKind::Users, CrudOp::Fetch)),
    run("Add a new user", Action::Crud(EntityKind::Users, CrudOp::Create)),
    run("Update a user", Action::Crud(EntityKind::Users, CrudOp::Update)),
    run("Delete a user", Action::Crud(EntityKind::Users, CrudOp::Delete)),
    run("Generate user profiles", Action::GenerateProfiles),
    run("View user behavior profile types", Action::ProfileTypes),
    goto("Return to main menu", MenuState::Main),
];

impl MenuState {
    pub fn title(self) -> &'static str {
        match self {
            MenuState::Welcome => "PRODUCT MANAGEMENT CLI",
            MenuState::Main => "MAIN MENU",
            MenuState::Products => "PRODUCT MANAGEMENT",
            MenuState::Users => "USER MANAGEMENT",
            MenuState::Exit => "",
        }
    }

    pub fn items(self) -> &'static [MenuItem] {
        match self {
            MenuState::Welcome => &WELCOME,
            MenuState::Main => &MAIN,
            MenuState::Products => &PRODUCTS,
            MenuState::Users => &USERS,
            MenuState::Exit => &[],
        }
    }

    /// Look up a 1-based choice. Out-of-range input yields `None`.
    pub fn select(self, choice: i64) -> Option<Entry> {
        let index = usize::try_from(choice).ok()?.checked_sub(1)?;
        self.items().get(index).map(|item| item.entry)
    }

    /// State after an action finished in `self`. Authentication from the
    /// welcome menu opens the main menu; everything else stays put.
    pub fn after(self, outcome: Outcome) -> MenuState {
        match (self, outcome) {
            (MenuState::Welcome, Outcome::Authenticated) => MenuState::Main,
            (state, _) => state,
        }
    }

    /// Line printed when leaving `self` for `next`.
    fn leaving_message(self, next: MenuState) -> Option<&'static str> {
        match (self, next) {
            (_, MenuState::Exit) => Some("Exiting... Thank you for using Product Management CLI!"),
            (MenuState::Main, MenuState::Welcome) => Some("Returning to welcome menu..."),
            (MenuState::Products | MenuState::Users, MenuState::Main) => {
                Some("Returning to main menu...")
            }
            _ => None,
        }
    }
}

/// Drives the menus until the user exits or input ends.
pub struct Navigator<T: Transport, C: Console> {
    ctx: Context<T, C>,
    state: MenuState,
}

impl<T: Transport, C: Console> Navigator<T, C> {
    pub fn new(ctx: Context<T, C>) -> Self {
        Navigator {
            ctx,
            state: MenuState::Welcome,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn context(&self) -> &Context<T, C> {
        &self.ctx
    }

    /// Loop until `Exit`. Only a fatal input error ends the loop early.
    pub fn run(&mut self) -> Result<(), CliError> {
        while self.state != MenuState::Exit {
            self.step()?;
        }
        Ok(())
    }

    /// Show the current menu, read one choice and act on it.
    pub fn step(&mut self) -> Result<(), CliError> {
        let items = self.state.items();
        let labels: Vec<&str> = items.iter().map(|item| item.label).collect();
        self.ctx
            .console
            .say(&format!("\n{}", ui::menu_block(self.state.title(), &labels)));

        let prompt = format!("Enter your choice (1-{})", items.len());
        let choice = self.ctx.console.integer(&prompt)?;

        match self.state.select(choice) {
            None => {
                self.ctx.console.say(&failure(&format!(
                    "Invalid choice. Please select 1-{}.",
                    items.len()
                )));
            }
            Some(Entry::Goto(next)) => self.enter(next),
            Some(Entry::Run(action)) => match handlers::run(&mut self.ctx, action) {
                Ok(outcome) => {
                    let next = self.state.after(outcome);
                    self.enter(next);
                }
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => {
                    warn!(?action, error = %err, "action failed");
                    self.ctx.console.say(&failure(&err.to_string()));
                }
            },
        }
        Ok(())
    }

    fn enter(&mut self, next: MenuState) {
        if next == self.state {
            return;
        }
        // `Main` needs a signed-in session.
        if next == MenuState::Main && !self.ctx.session.is_authenticated() {
            self.ctx.console.say(&failure("Please sign in first."));
            self.state = MenuState::Welcome;
            return;
        }
        if let Some(message) = self.state.leaving_message(next) {
            self.ctx.console.say(&notice(message));
        }
        // Going back to the welcome menu signs out.
        if self.state == MenuState::Main && next == MenuState::Welcome {
            self.ctx.session.clear();
            debug!("session cleared");
        }
        debug!(from = ?self.state, to = ?next, "menu transition");
        self.state = next;
    }
}
