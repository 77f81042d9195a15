// Action handlers: one per menu entry. Each collects input through the
// `Console`, calls the gateway and prints the result.

mod auth;
mod crud;
mod reports;

pub use auth::{sign_in, sign_up};
pub use crud::{create, delete, fetch, list, update};
pub use reports::{find_expensive_products, generate_profiles, show_profile_types};

use crate::api::{ApiClient, Transport};
use crate::entity::{EntityKind, Product, User};
use crate::error::CliError;
use crate::menu::{Action, CrudOp};
use crate::session::Session;
use crate::ui::Console;

/// What a handler did to the session, so the navigator can pick the next state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing changed; stay in the current menu.
    Done,
    /// A token was stored in the session.
    Authenticated,
}

/// Everything a handler works with for the lifetime of the process.
pub struct Context<T: Transport, C: Console> {
    pub client: ApiClient<T>,
    pub session: Session,
    pub console: C,
}

impl<T: Transport, C: Console> Context<T, C> {
    pub fn new(client: ApiClient<T>, console: C) -> Self {
        Context {
            client,
            session: Session::new(),
            console,
        }
    }
}

/// Run the handler behind `action`.
pub fn run<T: Transport, C: Console>(
    ctx: &mut Context<T, C>,
    action: Action,
) -> Result<Outcome, CliError> {
    match action {
        Action::SignUp => sign_up(ctx),
        Action::SignIn => sign_in(ctx),
        Action::Crud(EntityKind::Products, op) => crud_for::<Product, T, C>(ctx, op),
        Action::Crud(EntityKind::Users, op) => crud_for::<User, T, C>(ctx, op),
        Action::FindExpensiveProducts => find_expensive_products(ctx),
        Action::GenerateProfiles => generate_profiles(ctx),
        Action::ProfileTypes => show_profile_types(ctx),
    }
}

fn crud_for<E, T, C>(ctx: &mut Context<T, C>, op: CrudOp) -> Result<Outcome, CliError>
where
    E: crate::entity::Entity,
    T: Transport,
    C: Console,
{
    match op {
        CrudOp::List => list::<E, T, C>(ctx),
        CrudOp::Fetch => fetch::<E, T, C>(ctx),
        CrudOp::Create => create::<E, T, C>(ctx),
        CrudOp::Update => update::<E, T, C>(ctx),
        CrudOp::Delete => delete::<E, T, C>(ctx),
    }
}

/// Decode a response payload, mapping shape mismatches to `Unexpected`.
fn decode<D: serde::de::DeserializeOwned>(
    value: serde_json::Value,
    what: &str,
) -> Result<D, CliError> {
    serde_json::from_value(value)
        .map_err(|e| CliError::Unexpected(format!("malformed {what} response: {e}")))
}

/// Send `request` with a spinner showing `busy` while it is in flight.
fn call<T: Transport, C: Console>(
    ctx: &mut Context<T, C>,
    busy: &str,
    request: crate::api::ApiRequest,
) -> Result<Option<serde_json::Value>, crate::error::ApiError> {
    let spinner = ctx.console.spinner(busy);
    let result = ctx.client.send(&ctx.session, request);
    spinner.finish_and_clear();
    result
}

/// `product` -> `Product`.
fn capitalized(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
