//! `hunt melody` - hunting horn songs

use crate::context::GlobalArgs;
use anyhow::Result;
use clap::Parser;
use hunt_core::model::HornMelody;
use hunt_core::Repository;
use std::fmt::Write;

#[derive(Parser, Debug)]
pub struct MelodyCommand {
    /// Note colours of a horn, e.g. WPB; every song when omitted
    pub notes: Option<String>,
}

fn render(melodies: &[HornMelody]) -> String {
    let mut out = String::new();
    for m in melodies {
        let _ = write!(out, "{:<6} {:<12} {}", m.notes, m.song, m.effect1);
        if !m.effect2.is_empty() {
            let _ = write!(out, " / {}", m.effect2);
        }
        if !m.duration.is_empty() {
            let _ = write!(out, " ({}", m.duration);
            if !m.extension.is_empty() {
                let _ = write!(out, ", +{}", m.extension);
            }
            out.push(')');
        }
        out.push('\n');
    }
    out
}

impl MelodyCommand {
    pub fn execute(self, global: &GlobalArgs) -> Result<()> {
        let ctx = global.load()?;
        let notes = self.notes.as_deref().map(str::to_ascii_uppercase);
        let melodies = ctx.repo.get_horn_melodies(notes.as_deref())?;
        if melodies.is_empty() {
            println!("No songs found");
        }
        print!("{}", render(&melodies));
        Ok(())
    }
}
