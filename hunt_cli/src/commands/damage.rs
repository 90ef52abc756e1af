//! `hunt damage` - compare weapons against one monster

use super::report_miss;
use crate::context::{Context, GlobalArgs};
use anyhow::{bail, Context as _, Result};
use clap::{Args, Parser};
use hunt_core::config::MatchingConstants;
use hunt_core::damage::{change_listing, common_class, comparison_table, weapon_line};
use hunt_core::fuzzy;
use hunt_core::prelude::*;
use hunt_core::types::Hub;
use hunt_core::WeaponFilter;
use std::fmt::Write;

#[derive(Parser, Debug)]
pub struct DamageCommand {
    /// Monster to hit
    pub monster: String,

    /// Weapons to compare, the first is the baseline
    pub weapons: Vec<String>,

    /// Select weapons of this type instead of by name
    #[arg(short = 't', long = "type")]
    pub weapon_type: Option<WeaponClass>,

    /// Element name, or Raw for element-less weapons
    #[arg(long)]
    pub element: Option<String>,

    /// Final upgrades only
    #[arg(long = "final")]
    pub final_only: bool,

    #[arg(long)]
    pub min_rarity: Option<u8>,

    #[arg(long)]
    pub max_rarity: Option<u8>,

    /// Only weapons craftable from quests up to this many stars
    #[arg(long)]
    pub stars: Option<u8>,

    /// Hub the --stars limit applies to
    #[arg(long, default_value = "guild")]
    pub hub: Hub,

    /// Motion name; the class average is used otherwise
    #[arg(short = 'm', long)]
    pub motion: Option<String>,

    /// Print a bordered table instead of the change listing
    #[arg(long)]
    pub table: bool,

    #[command(flatten)]
    pub skills: SkillArgs,
}

#[derive(Args, Debug, Clone, Default)]
pub struct SkillArgs {
    #[arg(short = 's', long, default_value_t = 0)]
    pub sharpness_plus: u8,

    /// Awaken hidden elements
    #[arg(short = 'f', long)]
    pub awaken: bool,

    /// Attack Up level, 1 = S to 4 = XL
    #[arg(short = 'a', long, default_value_t = 0)]
    pub attack_up: u8,

    #[arg(short = 'c', long, default_value_t = 0)]
    pub critical_eye: u8,

    /// 1-3 = (element) Atk +1..3, 4 = Element Attack Up, 5 = both
    #[arg(short = 'e', long, default_value_t = 0)]
    pub element_up: u8,

    /// 1 = Novice, 2 = God
    #[arg(long, default_value_t = 0)]
    pub artillery: u8,

    #[arg(long)]
    pub blunt_power: bool,

    /// Affinity bonus after overcoming the frenzy virus (0, 15 or 30)
    #[arg(long, default_value_t = 0)]
    pub frenzy: u8,

    #[arg(long)]
    pub anti_species: bool,

    #[arg(long, default_value_t = 0)]
    pub critical_boost: u8,

    #[arg(short = 'w', long, default_value_t = 0)]
    pub weakness_exploit: u8,

    /// Charge blade shield charged
    #[arg(long)]
    pub shield_charged: bool,

    /// Attack values in the database are true attack
    #[arg(long, conflicts_with = "displayed_attack")]
    pub true_attack: bool,

    /// Attack values in the database are displayed attack
    #[arg(long)]
    pub displayed_attack: bool,

    /// Restrict summaries to these parts
    #[arg(long, value_delimiter = ',')]
    pub parts: Vec<String>,
}

impl SkillArgs {
    pub fn to_config(&self) -> SkillConfig {
        let true_attack = match (self.true_attack, self.displayed_attack) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        SkillConfig {
            sharpness_plus: self.sharpness_plus,
            awaken: self.awaken,
            attack_up: self.attack_up,
            critical_eye: self.critical_eye,
            element_up: self.element_up,
            artillery: self.artillery,
            blunt_power: self.blunt_power,
            frenzy: self.frenzy,
            anti_species: self.anti_species,
            critical_boost: self.critical_boost,
            weakness_exploit: self.weakness_exploit,
            shield_charged: self.shield_charged,
            true_attack,
            parts: if self.parts.is_empty() { None } else { Some(self.parts.clone()) },
        }
    }
}

fn find_monster(repo: &dyn Repository, name: &str, matching: &MatchingConstants) -> HuntResult<Monster> {
    if let Some(monster) = repo.get_monster_by_name(name)? {
        return Ok(monster);
    }
    let monsters = repo.get_monsters(None)?;
    let suggestions = fuzzy::close_matches(
        name,
        monsters.iter().map(|m| m.name.as_str()),
        matching.max_suggestions,
        matching.name_cutoff,
    )
    .into_iter()
    .map(str::to_string)
    .collect();
    Err(HuntError::lookup_miss("monster", name, suggestions))
}

impl DamageCommand {
    fn filter(&self) -> WeaponFilter {
        WeaponFilter {
            names: self.weapons.clone(),
            weapon_type: self.weapon_type,
            element: self.element.clone(),
            final_only: self.final_only,
            min_rarity: self.min_rarity,
            max_rarity: self.max_rarity,
            stars: self.stars.map(|stars| (self.hub, stars)),
        }
    }

    pub fn execute(self, global: &GlobalArgs) -> Result<()> {
        let ctx = global.load()?;
        if let Some(text) = self.run(&ctx)? {
            print!("{}", text);
        }
        Ok(())
    }

    /// The full report, or `None` after printing a lookup miss
    fn run(&self, ctx: &Context) -> Result<Option<String>> {
        if self.weapons.is_empty() && self.weapon_type.is_none() {
            bail!("name the weapons to compare or select them with --type");
        }
        let matching = &ctx.config.constants.matching;
        let Some(monster) = report_miss(find_monster(&ctx.repo, &self.monster, matching))? else {
            return Ok(None);
        };
        let Some(weapons) = report_miss(self.filter().select(&ctx.repo, matching.name_cutoff, matching.max_suggestions))?
        else {
            return Ok(None);
        };
        let Some(class) = common_class(&weapons)? else {
            bail!("no weapons match the query");
        };

        let motions = ctx
            .motions
            .get(class)
            .with_context(|| format!("no motion values for {}", class.name()))?;
        let motion = match &self.motion {
            Some(name) => {
                motions
                    .find(name, matching.name_cutoff)
                    .with_context(|| format!("no {} motion named '{}'", class.name(), name))?
                    .average
            }
            None => motions.average,
        };

        let skills = self.skills.to_config();
        let rows = ctx.repo.get_monster_damage(monster.id)?;
        let breaks = ctx.repo.get_monster_breaks(monster.id)?;
        let engine = DamageEngine::new(ctx.config.variant, &ctx.config.constants);
        let damages = weapons
            .iter()
            .map(|w| engine.compute(w, &monster, &rows, &breaks, motion, &skills))
            .collect::<HuntResult<Vec<_>>>()?;

        Ok(Some(render(class, motion, &breaks, &skills, &damages)))
    }
}

fn render(class: WeaponClass, motion: f64, breaks: &[String], skills: &SkillConfig, damages: &[WeaponMonsterDamage]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Weapon Type: {}", class.name());
    let _ = writeln!(out, "Average Motion: {:0.1}", motion);
    if !breaks.is_empty() {
        let _ = writeln!(out, "Monster Breaks: {}", breaks.join(", "));
    }
    let names = skills.names();
    if !names.is_empty() {
        let _ = writeln!(out, "Skills: {}", names.join(", "));
    }
    for damage in damages {
        let _ = writeln!(out, "{}", weapon_line(damage));
    }
    out.push('\n');

    let Some((base, others)) = damages.split_first() else {
        return out;
    };
    out.push_str(&change_listing(base, others));
    out.push('\n');
    out.push_str(&comparison_table(damages));

    for damage in damages.iter().filter(|d| !d.phials.is_empty()) {
        let _ = writeln!(out, "\n{} bursts:", damage.weapon.name);
        for (part, levels) in &damage.phials {
            let totals: Vec<String> = levels.iter().map(|p| format!("L{} {:.0}", p.level, p.total())).collect();
            let _ = writeln!(out, "{:>22}  {}", part, totals.join("  "));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hunt_core::{HuntConfig, MemoryRepository, MotionValueDb};
    use std::path::Path;

    fn context() -> Context {
        let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("../hunt_core/tests/fixtures/mini_db.json");
        Context {
            config: HuntConfig::default(),
            repo: MemoryRepository::load(&data).unwrap(),
            motions: MotionValueDb::embedded().unwrap(),
        }
    }

    fn command(args: &[&str]) -> DamageCommand {
        let mut argv = vec!["damage"];
        argv.extend_from_slice(args);
        DamageCommand::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_report_header_and_rows() {
        let text = command(&["Rathalos", "Bone Blade", "Bone Blade+", "-a", "2"]).run(&context()).unwrap().unwrap();
        assert!(text.starts_with("Weapon Type: Great Sword\nAverage Motion: "));
        assert!(text.contains("Monster Breaks: "));
        assert!(text.contains("Skills: Attack Up (M)"));
        assert!(text.contains("| Rathalos"));
        assert!(text.contains("uniform"));
    }

    #[test]
    fn test_unknown_monster_prints_miss() {
        assert!(command(&["Rathalso", "Bone Blade"]).run(&context()).unwrap().is_none());
    }

    #[test]
    fn test_mixed_classes_rejected() {
        assert!(command(&["Rathalos", "Bone Blade", "Knight Lance"]).run(&context()).is_err());
    }

    #[test]
    fn test_type_selection_and_charge_blade_bursts() {
        let text = command(&["Rathalos", "--type", "Charge Blade", "--shield-charged"])
            .run(&context())
            .unwrap()
            .unwrap();
        assert!(text.contains("Elite Blade bursts:"));
        assert!(text.contains("L5 "));
    }

    #[test]
    fn test_nothing_selected() {
        assert!(command(&["Rathalos"]).run(&context()).is_err());
    }

    #[test]
    fn test_star_limit_flags() {
        let cmd = command(&["Rathalos", "-t", "Great Sword", "--stars", "3", "--hub", "village"]);
        assert_eq!(cmd.filter().stars, Some((Hub::Caravan, 3)));
        assert_eq!(command(&["Rathalos", "Bone Blade"]).filter().stars, None);

        let text = cmd.run(&context()).unwrap().unwrap();
        assert!(text.contains("Red Wing"));
        assert!(command(&["Rathalos", "-t", "Great Sword", "--stars", "2", "--hub", "caravan"])
            .run(&context())
            .is_err());
    }

    #[test]
    fn test_attack_interpretation_flags() {
        let skills = command(&["Rathalos", "Bone Blade", "--displayed-attack"]).skills.to_config();
        assert_eq!(skills.true_attack, Some(false));
        assert!(DamageCommand::try_parse_from(["damage", "Rathalos", "--true-attack", "--displayed-attack"]).is_err());
    }
}
