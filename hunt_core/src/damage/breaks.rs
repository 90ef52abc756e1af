//! Pairing hitzone parts with break rewards

use crate::fuzzy;

/// Break reward a hitzone part corresponds to, if any
///
/// `parts` are the monster's hitzone part names, `breaks` the part names
/// of its break rewards.
pub fn break_find<'a, S: AsRef<str>>(part: &str, parts: &[S], breaks: &'a [String], cutoff: f64) -> Option<&'a str> {
    let has_part = |name: &str| parts.iter().any(|p| p.as_ref() == name);
    let listed = |name: &str| breaks.iter().find(|b| b.as_str() == name).map(String::as_str);

    if let Some(exact) = listed(part) {
        // tail tip is the breakable part when both exist (basarios)
        if !(part == "Tail" && has_part("Tail Tip")) {
            return Some(exact);
        }
    }
    match part {
        "Tail" if has_part("Tail Tip") => return None,
        "Tail Tip" | "Neck/Tail" => {
            if let Some(tail) = listed("Tail") {
                return Some(tail);
            }
        }
        // teostra
        "Wing" if !has_part("Talon") => {
            if let Some(talon) = listed("Talon") {
                return Some(talon);
            }
        }
        "Head" => {
            // fatalis
            if let Some(horn) = listed("Horn").filter(|_| !has_part("Horn")) {
                return Some(horn);
            }
            // kecha wacha
            if let Some(ear) = listed("Ear").filter(|_| !has_part("Ear")) {
                return Some(ear);
            }
        }
        // gore magala
        "Winglegs" if !has_part("Wing Leg") => {
            if let Some(leg) = listed("Wing Leg") {
                return Some(leg);
            }
        }
        _ => {}
    }
    fuzzy::best_match(part, breaks.iter().map(String::as_str), cutoff)
}
