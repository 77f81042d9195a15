// List/fetch/create/update/delete, written once for any `Entity`.

use tracing::info;

use super::{call, capitalized, decode, Context, Outcome};
use crate::api::{ApiRequest, Transport};
use crate::entity::{DraftMode, Entity};
use crate::error::CliError;
use crate::render::{self, Listing};
use crate::ui::{heading, notice, success, Console};

pub fn list<E: Entity, T: Transport, C: Console>(
    ctx: &mut Context<T, C>,
) -> Result<Outcome, CliError> {
    ctx.console.say(&success(&format!("Loading {}...", E::PLURAL)));
    let data = call(ctx, "Loading...", ApiRequest::get(E::COLLECTION))?;

    let records: Vec<E> = match data {
        Some(value) => decode(value, E::PLURAL)?,
        None => Vec::new(),
    };
    match render::listing(&records) {
        Listing::Table(table) => {
            ctx.console
                .say(&heading(&format!("{} LIST:", E::SINGULAR.to_uppercase())));
            ctx.console.say(&table);
        }
        Listing::Empty(message) => ctx.console.say(&notice(&message)),
    }
    Ok(Outcome::Done)
}

pub fn fetch<E: Entity, T: Transport, C: Console>(
    ctx: &mut Context<T, C>,
) -> Result<Outcome, CliError> {
    let id = ctx.console.integer(&format!("Enter {} ID", E::SINGULAR))?;
    ctx.console
        .say(&success(&format!("Searching for {} {}...", E::SINGULAR, id)));

    let data = call(ctx, "Searching...", ApiRequest::get(E::item_path(id)))?;
    show_one::<E, T, C>(ctx, data, "FOUND")
}

pub fn create<E: Entity, T: Transport, C: Console>(
    ctx: &mut Context<T, C>,
) -> Result<Outcome, CliError> {
    ctx.console
        .say(&heading(&format!("ADD NEW {}", E::SINGULAR.to_uppercase())));
    // The server assigns the id; drafts never carry one.
    let draft = E::prompt_draft(&mut ctx.console, DraftMode::Create)?;

    let request = ApiRequest::post(E::COLLECTION).json(&draft)?;
    let data = call(ctx, &format!("Creating {}...", E::SINGULAR), request)?;
    info!(entity = E::SINGULAR, "record created");
    show_one::<E, T, C>(ctx, data, "CREATED")
}

pub fn update<E: Entity, T: Transport, C: Console>(
    ctx: &mut Context<T, C>,
) -> Result<Outcome, CliError> {
    ctx.console
        .say(&heading(&format!("UPDATE {}", E::SINGULAR.to_uppercase())));
    let id = ctx.console.integer(&format!("Enter {} ID", E::SINGULAR))?;
    let draft = E::prompt_draft(&mut ctx.console, DraftMode::Update)?;

    let request = ApiRequest::put(E::item_path(id)).json(&draft)?;
    let data = call(ctx, &format!("Updating {}...", E::SINGULAR), request)?;
    info!(entity = E::SINGULAR, id, "record updated");
    show_one::<E, T, C>(ctx, data, "UPDATED")
}

pub fn delete<E: Entity, T: Transport, C: Console>(
    ctx: &mut Context<T, C>,
) -> Result<Outcome, CliError> {
    ctx.console
        .say(&heading(&format!("DELETE {}", E::SINGULAR.to_uppercase())));
    let id = ctx
        .console
        .integer(&format!("Enter {} ID to delete", E::SINGULAR))?;

    let confirmed = ctx.console.confirm(&format!(
        "Are you sure you want to delete {} {}? This action cannot be undone.",
        E::SINGULAR,
        id
    ))?;
    if !confirmed {
        ctx.console.say(&notice("Deletion cancelled."));
        return Ok(Outcome::Done);
    }

    call(
        ctx,
        &format!("Deleting {}...", E::SINGULAR),
        ApiRequest::delete(E::item_path(id)),
    )?;
    info!(entity = E::SINGULAR, id, "record deleted");
    ctx.console.say(&success(&format!(
        "{} {} deleted successfully.",
        capitalized(E::SINGULAR),
        id
    )));
    Ok(Outcome::Done)
}

/// Render a single-record response as a one-row table.
fn show_one<E: Entity, T: Transport, C: Console>(
    ctx: &mut Context<T, C>,
    data: Option<serde_json::Value>,
    verb: &str,
) -> Result<Outcome, CliError> {
    let Some(value) = data else {
        ctx.console
            .say(&notice(&format!("No {} returned.", E::SINGULAR)));
        return Ok(Outcome::Done);
    };
    let record: E = decode(value, E::SINGULAR)?;
    ctx.console
        .say(&heading(&format!("{} {}:", E::SINGULAR.to_uppercase(), verb)));
    ctx.console.say(&render::table(&[record]).to_string());
    Ok(Outcome::Done)
}
