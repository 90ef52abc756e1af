//! Plain-text reward report

use super::engine::ItemRewards;
use super::hunt::{HuntItemEV, HuntReward};
use super::prob::{CaptureSkill, CarvingSkill, LuckSkill};
use super::quest::QuestReward;
use super::strategy::SkillProfile;
use crate::types::Rank;
use std::fmt::Write;

/// EVs are kept as copies per hundred runs times 100
fn scaled(ev: f64) -> f64 {
    ev / 100.0
}

/// One value when both ends agree, otherwise `low to high`
pub fn format_range(low: f64, high: f64) -> String {
    if low == high {
        format!("{:5.2}", low)
    } else {
        format!("{:5.2} to {:5.2}", low, high)
    }
}

fn ladder_suffix(values: &[f64]) -> String {
    if values.len() < 2 {
        return String::new();
    }
    let rest: Vec<String> = values[1..].iter().map(|v| format!("{:.2}", scaled(*v))).collect();
    format!(" [{}]", rest.join(" "))
}

fn reward_line(out: &mut String, label: &str, stack: u32, ev: f64, percentage: i64, ladder: &[f64]) {
    let _ = writeln!(
        out,
        "  {:>20} {} {:5.2} / 100 ({:2} each){}",
        label,
        stack,
        scaled(ev),
        percentage,
        ladder_suffix(ladder)
    );
}

fn hunt_rows(out: &mut String, hunt: &HuntItemEV) {
    for reward in &hunt.rewards {
        hunt_row(out, reward);
    }
}

fn hunt_row(out: &mut String, reward: &HuntReward) {
    let ladder = reward.ev_ladder();
    let ev = ladder.first().copied().unwrap_or(0.0);
    reward_line(
        out,
        &reward.condition.to_string(),
        reward.stack_size,
        ev,
        reward.percentage as i64,
        &ladder,
    );
}

fn quest_row(out: &mut String, reward: &QuestReward) {
    let ladder: &[f64] = if reward.has_skill_delta() { &reward.evs } else { &reward.evs[..1] };
    reward_line(
        out,
        reward.slot.name(),
        reward.stack_size,
        reward.expected_value(LuckSkill::None),
        reward.percentage as i64,
        ladder,
    );
}

fn totals(out: &mut String, kill: (f64, f64), cap: (f64, f64), shiny: f64) {
    let _ = writeln!(out, "  {:>20}", "= Totals");
    let _ = writeln!(out, "  {:>20} {} / 100", "Kill", format_range(scaled(kill.0), scaled(kill.1)));
    let _ = writeln!(out, "  {:>20} {} / 100", "Cap", format_range(scaled(cap.0), scaled(cap.1)));
    if shiny != 0.0 {
        let _ = writeln!(out, "  {:>20} {:5.2} / 100", "Shiny", scaled(shiny));
    }
}

fn recommendations(out: &mut String, rewards: &ItemRewards) {
    let _ = writeln!(out, "*** Poogie Recommends ***");
    for &rank in Rank::all() {
        let found: Vec<_> = rewards
            .recommendations
            .iter()
            .filter(|r| r.rank == rank)
            .filter_map(|r| r.best.as_ref().filter(|b| b.ev > 0.0).map(|b| (r, b)))
            .collect();
        if found.is_empty() {
            continue;
        }
        let _ = writeln!(out, "> {}", rank);
        for (policy, best) in found {
            let _ = writeln!(
                out,
                "  [{}] ({})  {}  {} [{:.2}]",
                policy.profile.label,
                best.source.label(),
                best.source.subject(),
                best.kind,
                scaled(best.ev)
            );
        }
    }
    out.push('\n');
}

fn not_found(out: &mut String, rewards: &ItemRewards) {
    if rewards.suggestions.is_empty() {
        let _ = writeln!(out, "Item '{}' not found.", rewards.query);
        return;
    }
    let _ = writeln!(out, "Item '{}' not found. Listing partial matches:", rewards.query);
    for suggestion in &rewards.suggestions {
        let _ = writeln!(out, "{}", suggestion);
    }
}

/// Full report: recommendations, then every hunt, quest and gathering path
pub fn render(rewards: &ItemRewards) -> String {
    let mut out = String::new();
    if !rewards.is_found() {
        not_found(&mut out, rewards);
        return out;
    }
    if let Some(trade) = &rewards.trade {
        let _ = write!(out, "Wyporium trade: {} -> {}", trade.requested.name, rewards.name());
        if let Some(quest) = &trade.unlock_quest {
            let _ = write!(out, " (unlocked by {})", quest.one_line());
        }
        out.push_str("\n\n");
    }
    if rewards.is_empty() {
        let _ = writeln!(out, "No known way to obtain {}", rewards.name());
        return out;
    }

    recommendations(&mut out, rewards);

    for hunt in &rewards.hunts {
        let _ = writeln!(out, "(HUNT) {} {}", hunt.monster.name, hunt.rank);
        hunt_rows(&mut out, hunt);
        totals(&mut out, hunt.kill_range(), hunt.cap_range(), hunt.shiny());
        out.push('\n');
    }

    for quest in &rewards.quests {
        let _ = writeln!(out, "(QUEST) {}", quest.rewards.quest.one_line());
        for warning in &quest.rewards.warnings {
            let _ = writeln!(out, "  WARNING: {}", warning);
        }
        let _ = writeln!(out, "  {:>20}", "= Quest");
        for reward in &quest.rewards.rewards {
            quest_row(&mut out, reward);
        }
        for hunt in &quest.hunts {
            let _ = writeln!(out, "  {:>20}", format!("= {} {}", hunt.monster.name, hunt.rank));
            hunt_rows(&mut out, hunt);
        }
        let low = SkillProfile::NONE;
        let kill_high = SkillProfile {
            luck: LuckSkill::Amazing,
            carving: CarvingSkill::God,
            ..SkillProfile::NONE
        };
        let cap_high = SkillProfile {
            luck: LuckSkill::Amazing,
            capture: CaptureSkill::God,
            ..SkillProfile::NONE
        };
        let (kill_low, cap_low, shiny) = quest.totals(&low);
        let (kill_high, _, _) = quest.totals(&kill_high);
        let (_, cap_high, _) = quest.totals(&cap_high);
        totals(&mut out, (kill_low, kill_high), (cap_low, cap_high), shiny);
        out.push('\n');
    }

    for gather in &rewards.gathers {
        let _ = writeln!(out, "(GATHER) {} {}", gather.location.name, gather.rank);
        for reward in &gather.rewards {
            let label = if reward.site.is_empty() {
                format!("Area {}", reward.area)
            } else {
                format!("Area {} {}", reward.area, reward.site)
            };
            let ev = reward.expected_value(gather.gathers_per_site);
            reward_line(&mut out, &label, reward.stack_size, ev, reward.percentage as i64, &[ev]);
        }
        let _ = writeln!(out, "  {:>20}", "= Totals");
        let _ = writeln!(
            out,
            "  {:>20} {} / 100",
            "Gather",
            format_range(scaled(gather.expected_value(false)), scaled(gather.expected_value(true)))
        );
        out.push('\n');
    }

    out
}
