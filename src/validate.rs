// Client-side checks applied before anything is sent.

use chrono::NaiveDate;

use crate::error::CliError;

/// Accept only `YYYY-MM-DD` naming a real calendar date.
pub fn date(input: &str) -> Result<NaiveDate, CliError> {
    let input = input.trim();
    let shaped = input.len() == 10
        && input.char_indices().all(|(i, c)| match i {
            4 | 7 => c == '-',
            _ => c.is_ascii_digit(),
        });
    if !shaped {
        return Err(invalid_date());
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| invalid_date())
}

fn invalid_date() -> CliError {
    CliError::validation("Invalid date format. Use YYYY-MM-DD.")
}

/// Accept only finite amounts >= 0. `what` names the value in the message.
pub fn non_negative(value: f64, what: &str) -> Result<f64, CliError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CliError::validation(format!(
            "{} must be a non-negative number.",
            what
        )));
    }
    Ok(value)
}
