use crate::errors::AppResult;
use serde::Serialize;

/// Print `value` as JSON in `--json` mode, otherwise run the human printer.
pub fn emit<T: Serialize>(json: bool, value: &T, human: impl FnOnce(&T)) -> AppResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human(value);
    }
    Ok(())
}
