// Sign-up and sign-in. These are the only handlers that touch the session.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{call, decode, Context, Outcome};
use crate::api::{ApiRequest, Transport, LOGIN_PATH, REGISTER_PATH};
use crate::error::CliError;
use crate::ui::{failure, heading, info as info_text, notice, success, Console};

#[derive(Debug, Serialize)]
struct RegisterRequest {
    name: String,
    email: String,
    password: String,
    age: i64,
}

#[derive(Debug, Serialize)]
struct LoginRequest {
    email: String,
    password: String,
}

/// Body returned by both auth endpoints. The token is optional on register.
#[derive(Debug, Default, Deserialize)]
struct AuthResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    token: Option<String>,
}

impl AuthResponse {
    fn from_body(data: Option<serde_json::Value>) -> Result<Self, CliError> {
        match data {
            Some(value) => decode(value, "auth"),
            None => Ok(AuthResponse::default()),
        }
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.trim().is_empty())
    }
}

/// Create an account. A returned token signs the user straight in.
///
/// A 403 means the server wants elevated rights for registration; the user
/// may then resend the same payload with an admin bearer token.
pub fn sign_up<T: Transport, C: Console>(ctx: &mut Context<T, C>) -> Result<Outcome, CliError> {
    ctx.console.say(&heading("Create New Account"));
    let payload = RegisterRequest {
        name: ctx.console.text("Enter name")?,
        email: ctx.console.text("Enter email")?,
        password: ctx.console.secret("Enter password")?,
        age: ctx.console.integer("Enter age")?,
    };
    let request = ApiRequest::post(REGISTER_PATH).json(&payload)?;

    match call(ctx, "Creating account...", request.clone()) {
        Ok(data) => {
            let resp = AuthResponse::from_body(data)?;
            if let Some(message) = &resp.message {
                ctx.console.say(&success(message));
            }
            match resp.token() {
                Some(token) => {
                    ctx.session.set_token(token);
                    info!("signed up with token");
                    ctx.console
                        .say(&success("Token received. Proceeding to main menu..."));
                    Ok(Outcome::Authenticated)
                }
                None => {
                    info!("signed up without token");
                    Ok(Outcome::Done)
                }
            }
        }
        Err(err) if err.status() == Some(403) => {
            warn!("registration refused, admin token may be needed");
            ctx.console
                .say(&notice("Signup may require admin privileges."));
            if !ctx.console.confirm("Use admin token for signup?")? {
                return Ok(Outcome::Done);
            }
            let admin_token = ctx.console.secret("Enter admin JWT token")?;
            let request = request.header("Authorization", format!("Bearer {}", admin_token.trim()));
            match call(ctx, "Creating account...", request) {
                Ok(data) => {
                    let resp = AuthResponse::from_body(data)?;
                    let message = resp.message.as_deref().unwrap_or("Account created.");
                    info!("signed up with admin token");
                    ctx.console.say(&success(message));
                }
                Err(err) => {
                    ctx.console
                        .say(&failure(&format!("Admin signup failed: {}", err)));
                }
            }
            Ok(Outcome::Done)
        }
        Err(err) => {
            ctx.console
                .say(&failure(&format!("Sign up failed: {}", err)));
            Ok(Outcome::Done)
        }
    }
}

/// Authenticate and store the returned token.
pub fn sign_in<T: Transport, C: Console>(ctx: &mut Context<T, C>) -> Result<Outcome, CliError> {
    ctx.console.say(&heading("Sign In"));
    let payload = LoginRequest {
        email: ctx.console.text("Enter email")?,
        password: ctx.console.secret("Enter password")?,
    };
    let request = ApiRequest::post(LOGIN_PATH).json(&payload)?;

    let data = match call(ctx, "Signing in...", request) {
        Ok(data) => data,
        Err(err) => {
            warn!(status = ?err.status(), "sign in failed");
            ctx.console
                .say(&failure(&format!("Sign in failed: {}", err)));
            return Ok(Outcome::Done);
        }
    };

    let resp = AuthResponse::from_body(data)?;
    let Some(token) = resp.token() else {
        ctx.console
            .say(&failure("Sign in failed: No token received."));
        return Ok(Outcome::Done);
    };
    ctx.session.set_token(token);
    info!("signed in");

    ctx.console
        .say(&success(resp.message.as_deref().unwrap_or("Signed in.")));
    if let Some(claims) = ctx.session.claims() {
        if let Some(subject) = claims.sub.as_deref() {
            ctx.console.say(&info_text(&format!("Signed in as {}", subject)));
        }
        if let Some(expires) = claims.expires_at() {
            ctx.console.say(&info_text(&format!(
                "Session expires {}",
                expires.format("%Y-%m-%d %H:%M UTC")
            )));
        }
    }
    Ok(Outcome::Authenticated)
}
