//! Core enumerations shared by the damage and reward engines

use crate::error::HuntError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                $name(id)
            }
        }
    };
}

id_type!(
    /// Identifier in the items table (weapons, armor and decorations are items too)
    ItemId
);
id_type!(MonsterId);
id_type!(QuestId);
id_type!(LocationId);
id_type!(SkillTreeId);

/// Game release family. Selects modifier tables at engine construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameVariant {
    #[default]
    Classic,
    Generations,
    World,
    Rise,
}

impl GameVariant {
    /// Whether weapon attack values in the data are displayed (bloated) values
    pub fn uses_displayed_attack(self) -> bool {
        matches!(self, GameVariant::Classic | GameVariant::Generations)
    }

    pub fn name(self) -> &'static str {
        match self {
            GameVariant::Classic => "classic",
            GameVariant::Generations => "generations",
            GameVariant::World => "world",
            GameVariant::Rise => "rise",
        }
    }
}

impl FromStr for GameVariant {
    type Err = HuntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "classic" | "4u" | "3u" => Ok(GameVariant::Classic),
            "generations" | "gen" | "gu" | "mhx" => Ok(GameVariant::Generations),
            "world" | "mhw" => Ok(GameVariant::World),
            "rise" | "mhr" => Ok(GameVariant::Rise),
            other => Err(HuntError::InvalidConfig(format!("unknown game variant '{}'", other))),
        }
    }
}

/// The fourteen weapon classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponClass {
    #[serde(rename = "Great Sword")]
    GreatSword,
    #[serde(rename = "Long Sword")]
    LongSword,
    #[serde(rename = "Sword and Shield")]
    SwordAndShield,
    #[serde(rename = "Dual Blades")]
    DualBlades,
    Hammer,
    #[serde(rename = "Hunting Horn")]
    HuntingHorn,
    Lance,
    Gunlance,
    #[serde(rename = "Switch Axe")]
    SwitchAxe,
    #[serde(rename = "Charge Blade")]
    ChargeBlade,
    #[serde(rename = "Insect Glaive")]
    InsectGlaive,
    #[serde(rename = "Heavy Bowgun")]
    HeavyBowgun,
    #[serde(rename = "Light Bowgun")]
    LightBowgun,
    Bow,
}

impl WeaponClass {
    pub fn all() -> &'static [WeaponClass] {
        &[
            WeaponClass::GreatSword,
            WeaponClass::LongSword,
            WeaponClass::SwordAndShield,
            WeaponClass::DualBlades,
            WeaponClass::Hammer,
            WeaponClass::HuntingHorn,
            WeaponClass::Lance,
            WeaponClass::Gunlance,
            WeaponClass::SwitchAxe,
            WeaponClass::ChargeBlade,
            WeaponClass::InsectGlaive,
            WeaponClass::HeavyBowgun,
            WeaponClass::LightBowgun,
            WeaponClass::Bow,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            WeaponClass::GreatSword => "Great Sword",
            WeaponClass::LongSword => "Long Sword",
            WeaponClass::SwordAndShield => "Sword and Shield",
            WeaponClass::DualBlades => "Dual Blades",
            WeaponClass::Hammer => "Hammer",
            WeaponClass::HuntingHorn => "Hunting Horn",
            WeaponClass::Lance => "Lance",
            WeaponClass::Gunlance => "Gunlance",
            WeaponClass::SwitchAxe => "Switch Axe",
            WeaponClass::ChargeBlade => "Charge Blade",
            WeaponClass::InsectGlaive => "Insect Glaive",
            WeaponClass::HeavyBowgun => "Heavy Bowgun",
            WeaponClass::LightBowgun => "Light Bowgun",
            WeaponClass::Bow => "Bow",
        }
    }

    /// Displayed-to-true attack divisor
    pub fn multiplier(self) -> f64 {
        match self {
            WeaponClass::GreatSword => 4.8,
            WeaponClass::LongSword => 3.3,
            WeaponClass::SwordAndShield => 1.4,
            WeaponClass::DualBlades => 1.4,
            WeaponClass::Hammer => 5.2,
            WeaponClass::HuntingHorn => 5.2,
            WeaponClass::Lance => 2.3,
            WeaponClass::Gunlance => 2.3,
            WeaponClass::SwitchAxe => 5.4,
            WeaponClass::ChargeBlade => 3.6,
            WeaponClass::InsectGlaive => 3.1,
            WeaponClass::HeavyBowgun => 1.5,
            WeaponClass::LightBowgun => 1.3,
            WeaponClass::Bow => 1.2,
        }
    }

    pub fn damage_type(self) -> DamageType {
        match self {
            WeaponClass::Hammer | WeaponClass::HuntingHorn => DamageType::Impact,
            WeaponClass::Lance => DamageType::Mixed,
            WeaponClass::LightBowgun | WeaponClass::HeavyBowgun | WeaponClass::Bow => {
                DamageType::Shot
            }
            _ => DamageType::Cut,
        }
    }

    /// Gunner weapons carry no sharpness gauge
    pub fn is_gunner(self) -> bool {
        matches!(
            self,
            WeaponClass::LightBowgun | WeaponClass::HeavyBowgun | WeaponClass::Bow
        )
    }
}

impl fmt::Display for WeaponClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WeaponClass {
    type Err = HuntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // The motion catalog spells Sword and Shield as plain "Sword"
        let s = if s == "Sword" { "Sword and Shield" } else { s };
        WeaponClass::all()
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| HuntError::UnknownWeaponType(s.to_string()))
    }
}

/// Which hitzone column a weapon class hits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    Cut,
    Impact,
    /// Best of cut and scaled impact (lance)
    Mixed,
    Shot,
}

/// Weapon element or status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Water,
    Ice,
    Thunder,
    Dragon,
    Poison,
    Paralysis,
    Sleep,
    Blast,
}

impl Element {
    pub fn all() -> &'static [Element] {
        &[
            Element::Fire,
            Element::Water,
            Element::Ice,
            Element::Thunder,
            Element::Dragon,
            Element::Poison,
            Element::Paralysis,
            Element::Sleep,
            Element::Blast,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            Element::Fire => "Fire",
            Element::Water => "Water",
            Element::Ice => "Ice",
            Element::Thunder => "Thunder",
            Element::Dragon => "Dragon",
            Element::Poison => "Poison",
            Element::Paralysis => "Paralysis",
            Element::Sleep => "Sleep",
            Element::Blast => "Blast",
        }
    }

    /// Statuses have no elemental hitzone and deal no element damage
    pub fn is_elemental(self) -> bool {
        matches!(
            self,
            Element::Fire | Element::Water | Element::Ice | Element::Thunder | Element::Dragon
        )
    }

    /// Parse an optional element field. Empty strings mean "no element".
    pub fn parse_field(value: Option<&str>) -> Result<Option<Element>, HuntError> {
        match value.map(str::trim) {
            None | Some("") | Some("None") => Ok(None),
            Some(s) => s.parse().map(Some),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Element {
    type Err = HuntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = if s.eq_ignore_ascii_case("Paralyze") { "Paralysis" } else { s };
        Element::all()
            .iter()
            .copied()
            .find(|e| e.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| HuntError::UnknownElement(s.to_string()))
    }
}

/// Sharpness colors, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SharpnessColor {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    White,
    Purple,
}

impl SharpnessColor {
    pub fn all() -> &'static [SharpnessColor] {
        &[
            SharpnessColor::Red,
            SharpnessColor::Orange,
            SharpnessColor::Yellow,
            SharpnessColor::Green,
            SharpnessColor::Blue,
            SharpnessColor::White,
            SharpnessColor::Purple,
        ]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<SharpnessColor> {
        SharpnessColor::all().get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            SharpnessColor::Red => "Red",
            SharpnessColor::Orange => "Orange",
            SharpnessColor::Yellow => "Yellow",
            SharpnessColor::Green => "Green",
            SharpnessColor::Blue => "Blue",
            SharpnessColor::White => "White",
            SharpnessColor::Purple => "Purple",
        }
    }
}

impl fmt::Display for SharpnessColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Quest and reward difficulty tier. Ordered LR < HR < G.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    #[serde(rename = "LR")]
    Low,
    #[serde(rename = "HR")]
    High,
    #[serde(rename = "G")]
    G,
}

impl Rank {
    pub fn all() -> &'static [Rank] {
        &[Rank::Low, Rank::High, Rank::G]
    }

    pub fn code(self) -> &'static str {
        match self {
            Rank::Low => "LR",
            Rank::High => "HR",
            Rank::G => "G",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Rank {
    type Err = HuntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LR" | "LOW" => Ok(Rank::Low),
            "HR" | "HIGH" => Ok(Rank::High),
            "G" => Ok(Rank::G),
            other => Err(HuntError::InvalidConfig(format!("unknown rank '{}'", other))),
        }
    }
}

/// Quest hub
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hub {
    #[serde(alias = "caravan", alias = "Village")]
    Caravan,
    #[serde(alias = "guild")]
    Guild,
    #[serde(alias = "event")]
    Event,
}

impl fmt::Display for Hub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Hub::Caravan => "Caravan",
            Hub::Guild => "Guild",
            Hub::Event => "Event",
        };
        f.write_str(name)
    }
}

impl FromStr for Hub {
    type Err = HuntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "caravan" | "village" => Ok(Hub::Caravan),
            "guild" => Ok(Hub::Guild),
            "event" => Ok(Hub::Event),
            other => Err(HuntError::InvalidConfig(format!("unknown hub '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterClass {
    #[serde(alias = "boss")]
    Boss,
    #[serde(alias = "minion")]
    Minion,
}

/// Item categories as stored in the items table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    Bone,
    Bug,
    Flesh,
    Meat,
    Ore,
    Plant,
    #[serde(rename = "Sac/Fluid", alias = "Sac")]
    Sac,
    #[serde(rename = "Coin/Ticket", alias = "Coin")]
    Coin,
    #[serde(alias = "Materials")]
    Material,
    Weapon,
    Armor,
    Decoration,
    #[serde(other)]
    Other,
}

/// Quest reward line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QuestSlot {
    A,
    B,
    Sub,
    C,
    D,
}

impl QuestSlot {
    pub fn all() -> &'static [QuestSlot] {
        &[QuestSlot::A, QuestSlot::B, QuestSlot::Sub, QuestSlot::C, QuestSlot::D]
    }

    pub fn name(self) -> &'static str {
        match self {
            QuestSlot::A => "A",
            QuestSlot::B => "B",
            QuestSlot::Sub => "Sub",
            QuestSlot::C => "C",
            QuestSlot::D => "D",
        }
    }
}

impl fmt::Display for QuestSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HunterType {
    Blade,
    Gunner,
    Both,
}

impl HunterType {
    /// Whether gear restricted to `self` can be worn by a hunter of `other`
    pub fn fits(self, other: HunterType) -> bool {
        self == HunterType::Both || other == HunterType::Both || self == other
    }
}

impl FromStr for HunterType {
    type Err = HuntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "blade" | "blademaster" => Ok(HunterType::Blade),
            "gunner" => Ok(HunterType::Gunner),
            "both" => Ok(HunterType::Both),
            other => Err(HuntError::InvalidConfig(format!("unknown hunter type '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArmorSlot {
    Head,
    Body,
    Arms,
    Waist,
    Legs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[default]
    Both,
    Male,
    Female,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weapon_class_parse_and_alias() {
        assert_eq!("Great Sword".parse::<WeaponClass>().unwrap(), WeaponClass::GreatSword);
        assert_eq!("Sword".parse::<WeaponClass>().unwrap(), WeaponClass::SwordAndShield);
        assert!(matches!(
            "Whip".parse::<WeaponClass>(),
            Err(HuntError::UnknownWeaponType(_))
        ));
    }

    #[test]
    fn test_damage_type_selection() {
        assert_eq!(WeaponClass::Hammer.damage_type(), DamageType::Impact);
        assert_eq!(WeaponClass::HuntingHorn.damage_type(), DamageType::Impact);
        assert_eq!(WeaponClass::Lance.damage_type(), DamageType::Mixed);
        assert_eq!(WeaponClass::Bow.damage_type(), DamageType::Shot);
        assert_eq!(WeaponClass::Gunlance.damage_type(), DamageType::Cut);
    }

    #[test]
    fn test_element_field() {
        assert_eq!(Element::parse_field(None).unwrap(), None);
        assert_eq!(Element::parse_field(Some("")).unwrap(), None);
        assert_eq!(Element::parse_field(Some("fire")).unwrap(), Some(Element::Fire));
        assert!(!Element::Blast.is_elemental());
        assert!(matches!(
            Element::parse_field(Some("Wind")),
            Err(HuntError::UnknownElement(_))
        ));
    }

    #[test]
    fn test_rank_order() {
        assert!(Rank::Low < Rank::High);
        assert!(Rank::High < Rank::G);
        assert_eq!("hr".parse::<Rank>().unwrap(), Rank::High);
    }

    #[test]
    fn test_hub_parse() {
        assert_eq!("Village".parse::<Hub>().unwrap(), Hub::Caravan);
        assert_eq!(" guild ".parse::<Hub>().unwrap(), Hub::Guild);
        assert!("Arena".parse::<Hub>().is_err());
    }
}
