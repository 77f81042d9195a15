// Library root
// -----------
// Interactive client for the product/user management API. The binary
// (`main.rs`) wires these modules together; tests drive them directly.
//
// Module responsibilities:
// - `api`: the request gateway (URL/header rules, error normalization)
//   and the reqwest transport behind it.
// - `session`: the in-memory bearer token.
// - `entity`, `validate`, `render`: products/users, input checks, tables.
// - `handlers`: one function per menu action.
// - `menu`: the menu state machine and its loop.
// - `ui`: the `Console` trait and its dialoguer-backed terminal.
// - `config`, `logging`, `error`: ambient plumbing.
pub mod api;
pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod menu;
pub mod render;
pub mod session;
pub mod ui;
pub mod validate;

#[cfg(test)]
mod testing;

pub use api::{ApiClient, ApiRequest, HttpTransport, Method, Transport};
pub use config::Config;
pub use error::{ApiError, CliError};
pub use menu::{MenuState, Navigator};
pub use session::Session;
