// Product search by price and server-side user profile generation.

use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::{call, decode, Context, Outcome};
use crate::api::{ApiRequest, Transport};
use crate::entity::{Entity, Product};
use crate::error::CliError;
use crate::render;
use crate::ui::{failure, heading, info as info_text, notice, success, Console};
use crate::validate;

const EXPENSIVE_PATH: &str = "/api/products/expensive";
const GENERATE_PROFILES_PATH: &str = "/api/users/generate-profiles";

/// List products priced above a user-supplied threshold.
pub fn find_expensive_products<T: Transport, C: Console>(
    ctx: &mut Context<T, C>,
) -> Result<Outcome, CliError> {
    ctx.console.say(&heading("FIND EXPENSIVE PRODUCTS"));
    let threshold = ctx.console.decimal("Enter the minimum price threshold")?;
    let threshold = validate::non_negative(threshold, "Price threshold")?;

    ctx.console.say(&notice(&format!(
        "Searching for products above ${:.2}...",
        threshold
    )));
    let request = ApiRequest::get(EXPENSIVE_PATH).query("priceThreshold", threshold);
    let data = call(ctx, "Searching...", request)?;

    let products: Vec<Product> = match data {
        Some(value) => decode(value, Product::PLURAL)?,
        None => Vec::new(),
    };
    if products.is_empty() {
        ctx.console.say(&notice(&format!(
            "No expensive products found above ${:.2}.",
            threshold
        )));
        return Ok(Outcome::Done);
    }

    ctx.console.say(&heading(&format!(
        "EXPENSIVE PRODUCTS (Above ${:.2}):",
        threshold
    )));
    ctx.console
        .say(&info_text(&format!("Found {} product(s)", products.len())));
    ctx.console.say(&render::table(&products).to_string());
    Ok(Outcome::Done)
}

/// Summary returned by the profile generation endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerationReport {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    generated_count: Option<Value>,
    #[serde(default)]
    log_file: Option<String>,
    #[serde(default)]
    output_dir: Option<String>,
}

/// Ask the server to build behaviour profiles from its request logs.
pub fn generate_profiles<T: Transport, C: Console>(
    ctx: &mut Context<T, C>,
) -> Result<Outcome, CliError> {
    ctx.console.say(&heading("GENERATE USER PROFILES"));
    for line in [
        "This operation will:",
        "  - Analyze log files for user behavior patterns",
        "  - Generate user profiles based on operation types",
        "  - Save profiles as JSON files in logs/profiles/",
        "  - Categorize users as READ_HEAVY, WRITE_HEAVY, etc.",
    ] {
        ctx.console.say(&info_text(line));
    }

    if !ctx.console.confirm("Start profile generation?")? {
        ctx.console.say(&notice("Operation cancelled."));
        return Ok(Outcome::Done);
    }
    ctx.console
        .say(&notice("Analyzing log files and generating profiles..."));

    let data = match call(ctx, "Generating profiles...", ApiRequest::post(GENERATE_PROFILES_PATH)) {
        Ok(data) => data,
        Err(err) => {
            let line = match err.status() {
                Some(404) => format!(
                    "Generate profiles endpoint not found (404). Make sure '{}' exists in your API.",
                    GENERATE_PROFILES_PATH
                ),
                Some(403) => "Access denied (403). Admin privileges may be required.".to_string(),
                Some(401) => "Authentication required (401). Please sign in again.".to_string(),
                _ => format!("Failed to generate profiles: {}", err),
            };
            ctx.console.say(&failure(&line));
            return Ok(Outcome::Done);
        }
    };

    match data {
        None => ctx
            .console
            .say(&success("User profiles generated successfully")),
        Some(Value::String(message)) => ctx.console.say(&success(&message)),
        Some(value) => {
            let report: GenerationReport = decode(value, "profile generation")?;
            let message = report
                .message
                .as_deref()
                .unwrap_or("Profiles generated successfully");
            ctx.console.say(&success(message));
            if let Some(count) = &report.generated_count {
                let count = match count {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                ctx.console
                    .say(&info_text(&format!("Generated {} user profiles", count)));
            }
            if let Some(log_file) = &report.log_file {
                ctx.console
                    .say(&info_text(&format!("Analyzed log file: {}", log_file)));
            }
            if let Some(dir) = &report.output_dir {
                ctx.console
                    .say(&info_text(&format!("Profiles saved to: {}", dir)));
            }
        }
    }
    info!("profile generation finished");
    ctx.console.say(&heading("PROFILE GENERATION COMPLETE"));
    Ok(Outcome::Done)
}

/// Explain the profile categories the server assigns. Local only.
pub fn show_profile_types<T: Transport, C: Console>(
    ctx: &mut Context<T, C>,
) -> Result<Outcome, CliError> {
    ctx.console.say(&heading("USER BEHAVIOR PROFILES"));
    ctx.console.say(&notice(
        "Profiles are generated by analyzing log files and categorizing user activities.",
    ));
    ctx.console.say(&heading("PROFILE TYPES:"));
    for (name, meaning) in [
        ("READ_HEAVY", "Users who primarily perform read operations (60%+ reads)"),
        ("WRITE_HEAVY", "Users who primarily perform write operations (60%+ writes)"),
        (
            "EXPENSIVE_PRODUCT_SEARCHER",
            "Users who frequently search for expensive products",
        ),
        ("MIXED", "Users with balanced read/write/search operations"),
        ("UNKNOWN", "Users with no or insufficient activity data"),
    ] {
        ctx.console
            .say(&format!("{} {}", success(&format!("{}:", name)), meaning));
    }
    ctx.console
        .say(&info_text("Use 'Generate user profiles' to produce them; each JSON file in logs/profiles/ holds one user."));
    Ok(Outcome::Done)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::testing::{FakeTransport, ScriptedConsole};

    fn context(fake: &FakeTransport, answers: &[&str]) -> Context<FakeTransport, ScriptedConsole> {
        let mut ctx = Context::new(
            ApiClient::with_transport("http://api.test", fake.clone()),
            ScriptedConsole::new(answers.iter().copied()),
        );
        ctx.session.set_token("abc");
        ctx
    }

    #[test]
    fn negative_threshold_sends_nothing() {
        let fake = FakeTransport::new();
        let mut ctx = context(&fake, &["-0.5"]);

        let err = find_expensive_products(&mut ctx).unwrap_err();

        assert_eq!(err.to_string(), "Price threshold must be a non-negative number.");
        assert!(fake.requests().is_empty());
    }

    #[test]
    fn infinite_threshold_sends_nothing() {
        let fake = FakeTransport::new();
        let mut ctx = context(&fake, &["inf"]);

        assert!(matches!(
            find_expensive_products(&mut ctx),
            Err(CliError::Validation(_))
        ));
        assert!(fake.requests().is_empty());
    }

    #[test]
    fn threshold_is_sent_as_query() {
        let fake = FakeTransport::new();
        fake.respond(200, r#"[{"id":1,"name":"Caviar","price":250.0}]"#);
        let mut ctx = context(&fake, &["100"]);

        find_expensive_products(&mut ctx).unwrap();

        let sent = fake.requests();
        assert_eq!(sent[0].url, "http://api.test/api/products/expensive");
        assert_eq!(sent[0].query, vec![("priceThreshold".to_string(), "100".to_string())]);
        let out = ctx.console.transcript();
        assert!(out.contains("Found 1 product(s)"));
        assert!(out.contains("Caviar") && out.contains("$250.00"));
    }

    #[test]
    fn no_matches_prints_message() {
        let fake = FakeTransport::new();
        fake.respond(200, "[]");
        let mut ctx = context(&fake, &["1000"]);

        find_expensive_products(&mut ctx).unwrap();

        assert!(ctx
            .console
            .transcript()
            .contains("No expensive products found above $1000.00."));
    }

    #[test]
    fn generate_profiles_prints_report() {
        let fake = FakeTransport::new();
        fake.respond(
            200,
            r#"{"message":"Profiles generated","generatedCount":3,"logFile":"logs/app.log","outputDir":"logs/profiles"}"#,
        );
        let mut ctx = context(&fake, &["y"]);

        generate_profiles(&mut ctx).unwrap();

        let out = ctx.console.transcript();
        assert!(out.contains("Profiles generated"));
        assert!(out.contains("Generated 3 user profiles"));
        assert!(out.contains("Analyzed log file: logs/app.log"));
        assert!(out.contains("Profiles saved to: logs/profiles"));
        assert_eq!(fake.requests()[0].url, "http://api.test/api/users/generate-profiles");
    }

    #[test]
    fn generate_profiles_accepts_plain_text() {
        let fake = FakeTransport::new();
        fake.respond(200, "Generated 2 profiles");
        let mut ctx = context(&fake, &["y"]);

        generate_profiles(&mut ctx).unwrap();

        assert!(ctx.console.transcript().contains("Generated 2 profiles"));
    }

    #[test]
    fn generate_profiles_cancelled_sends_nothing() {
        let fake = FakeTransport::new();
        let mut ctx = context(&fake, &["n"]);

        generate_profiles(&mut ctx).unwrap();

        assert!(fake.requests().is_empty());
        assert!(ctx.console.transcript().contains("Operation cancelled."));
    }

    #[test]
    fn generate_profiles_explains_forbidden() {
        let fake = FakeTransport::new();
        fake.respond(403, "");
        let mut ctx = context(&fake, &["y"]);

        generate_profiles(&mut ctx).unwrap();

        assert!(ctx
            .console
            .transcript()
            .contains("Access denied (403). Admin privileges may be required."));
    }

    #[test]
    fn profile_types_are_listed() {
        let fake = FakeTransport::new();
        let mut ctx = context(&fake, &[]);

        show_profile_types(&mut ctx).unwrap();

        let out = ctx.console.transcript();
        for name in ["READ_HEAVY", "WRITE_HEAVY", "EXPENSIVE_PRODUCT_SEARCHER", "MIXED", "UNKNOWN"] {
            assert!(out.contains(name), "{name}");
        }
        assert!(fake.requests().is_empty());
    }
}
