//! hunt - damage comparisons, reward odds and crafting costs from the command line

mod commands;
mod context;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{ArmorCommand, DamageCommand, MelodyCommand, ProbCommand, RewardsCommand, ServeCommand, UpgradeCommand};
use context::GlobalArgs;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hunt", about = "Hunting companion: damage, rewards and crafting", version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare weapon damage against a monster
    Damage(DamageCommand),
    /// Where to farm an item and what to expect
    Rewards(RewardsCommand),
    /// Probability of a quest reward line
    Prob(ProbCommand),
    /// Every way of crafting a weapon
    Upgrade(UpgradeCommand),
    /// Armor and decorations for skill trees
    Armor(ArmorCommand),
    /// Hunting horn songs
    Melody(MelodyCommand),
    /// Read-only HTTP facade for reward reports
    Serve(ServeCommand),
}

/// `RUST_LOG` directives as given, `info` when unset or invalid
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn init_logging() {
    let filter = log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::Damage(cmd) => cmd.execute(&cli.global),
        Command::Rewards(cmd) => cmd.execute(&cli.global),
        Command::Prob(cmd) => cmd.execute(),
        Command::Upgrade(cmd) => cmd.execute(&cli.global),
        Command::Armor(cmd) => cmd.execute(&cli.global),
        Command::Melody(cmd) => cmd.execute(&cli.global),
        Command::Serve(cmd) => cmd.execute(&cli.global),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hunt_core::GameVariant;

    #[test]
    fn test_global_flags_before_subcommand() {
        let cli = Cli::try_parse_from(["hunt", "--variant", "gen", "--data", "db.json", "rewards", "Wyvern", "Gem"]).unwrap();
        assert_eq!(cli.global.variant, Some(GameVariant::Generations));
        assert_eq!(cli.global.data.as_deref(), Some(std::path::Path::new("db.json")));
        match cli.command {
            Command::Rewards(cmd) => assert_eq!(cmd.item_name(), "Wyvern Gem"),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_log_filter_keeps_narrow_directives() {
        assert_eq!(log_filter(Some("hunt_core=warn".to_string())).to_string(), "hunt_core=warn");
        assert_eq!(log_filter(None).to_string(), "info");
    }

    #[test]
    fn test_prob_defaults() {
        let cli = Cli::try_parse_from(["hunt", "prob", "12"]).unwrap();
        match cli.command {
            Command::Prob(cmd) => {
                assert_eq!(cmd.percent, 12.0);
                assert_eq!((cmd.fixed, cmd.guaranteed, cmd.extend), (1, 3, 69.0));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_damage_flags() {
        let cli = Cli::try_parse_from([
            "hunt", "damage", "Rathalos", "Bone Blade", "Red Wing", "-s", "1", "--frenzy", "15", "--parts", "Head,Tail",
            "--motion", "Charged Slash",
        ])
        .unwrap();
        match cli.command {
            Command::Damage(cmd) => {
                assert_eq!(cmd.monster, "Rathalos");
                assert_eq!(cmd.weapons, vec!["Bone Blade", "Red Wing"]);
                let skills = cmd.skills.to_config();
                assert_eq!(skills.sharpness_plus, 1);
                assert_eq!(skills.frenzy, 15);
                assert_eq!(skills.parts, Some(vec!["Head".to_string(), "Tail".to_string()]));
                assert_eq!(cmd.motion.as_deref(), Some("Charged Slash"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_bad_weapon_type_rejected() {
        assert!(Cli::try_parse_from(["hunt", "damage", "Rathalos", "--type", "Spoon"]).is_err());
    }
}
