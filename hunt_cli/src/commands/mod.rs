//! Subcommands

mod armor;
mod damage;
mod melody;
mod prob;
mod rewards;
mod serve;
mod upgrade;

pub use armor::ArmorCommand;
pub use damage::DamageCommand;
pub use melody::MelodyCommand;
pub use prob::ProbCommand;
pub use rewards::RewardsCommand;
pub use serve::ServeCommand;
pub use upgrade::UpgradeCommand;

use hunt_core::HuntError;

/// Text shown for an unknown name, one suggestion per line
pub fn miss_message(err: &HuntError) -> Option<String> {
    match err {
        HuntError::LookupMiss { kind, name, suggestions } => {
            let mut kind = kind.to_string();
            if let Some(first) = kind.get_mut(..1) {
                first.make_ascii_uppercase();
            }
            let mut text = if suggestions.is_empty() {
                format!("{} '{}' not found.", kind, name)
            } else {
                format!("{} '{}' not found. Listing partial matches:", kind, name)
            };
            for suggestion in suggestions {
                text.push('\n');
                text.push_str(suggestion);
            }
            Some(text)
        }
        _ => None,
    }
}

/// Print lookup misses as guidance, hand every other error back
pub fn report_miss<T>(result: Result<T, HuntError>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) => match miss_message(&err) {
            Some(text) => {
                println!("{}", text);
                Ok(None)
            }
            None => Err(err.into()),
        },
    }
}
