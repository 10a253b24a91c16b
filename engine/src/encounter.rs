use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::character::stat_row;
use crate::{Ability, AbilityScores, Character, Dice, SimError};

/// Filter applied when drawing a random opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterKind {
    Any,
    Spellcaster,
    Regular,
}

impl FromStr for EncounterKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => Ok(EncounterKind::Any),
            "spellcaster" => Ok(EncounterKind::Spellcaster),
            "regular" => Ok(EncounterKind::Regular),
            other => Err(SimError::UnknownEncounterKind(other.to_string())),
        }
    }
}

/// An opponent stat-block family: one row of ability scores per level band,
/// instantiated into a `Character` at every level it appears at.
struct NpcFamily {
    caster: bool,
    attack_ability: Ability,
    save_proficiencies: &'static [Ability],
    base_ac: i32,
    include_dex: bool,
    rows: [[i32; 6]; 7],
}

const FAMILIES: [NpcFamily; 4] = [
    // Brute: armored melee line, hits with Str.
    NpcFamily {
        caster: false,
        attack_ability: Ability::Str,
        save_proficiencies: &[Ability::Str, Ability::Con],
        base_ac: 13,
        include_dex: false,
        rows: [
            [14, 10, 14, 4, 8, 6],
            [16, 10, 16, 4, 8, 6],
            [18, 10, 16, 4, 8, 6],
            [20, 10, 18, 4, 8, 6],
            [22, 10, 20, 4, 8, 6],
            [24, 10, 22, 4, 8, 6],
            [26, 10, 24, 4, 8, 6],
        ],
    },
    // Skirmisher: lightly armored Dex attacker.
    NpcFamily {
        caster: false,
        attack_ability: Ability::Dex,
        save_proficiencies: &[Ability::Dex, Ability::Wis],
        base_ac: 12,
        include_dex: true,
        rows: [
            [10, 14, 12, 10, 12, 8],
            [10, 16, 12, 10, 12, 8],
            [12, 18, 14, 10, 12, 8],
            [12, 18, 14, 10, 14, 8],
            [14, 20, 16, 10, 14, 8],
            [14, 22, 16, 10, 14, 8],
            [14, 24, 18, 10, 16, 8],
        ],
    },
    // Mystic: forces Wis saves against its spell DC.
    NpcFamily {
        caster: true,
        attack_ability: Ability::Wis,
        save_proficiencies: &[Ability::Wis, Ability::Int],
        base_ac: 11,
        include_dex: true,
        rows: [
            [8, 12, 10, 14, 16, 12],
            [8, 12, 10, 14, 18, 12],
            [8, 14, 12, 14, 18, 12],
            [10, 14, 12, 16, 20, 14],
            [10, 14, 12, 16, 20, 14],
            [10, 16, 14, 16, 22, 14],
            [10, 16, 14, 18, 24, 16],
        ],
    },
    // Hexer: forces Cha-keyed saves.
    NpcFamily {
        caster: true,
        attack_ability: Ability::Cha,
        save_proficiencies: &[Ability::Wis, Ability::Cha],
        base_ac: 12,
        include_dex: true,
        rows: [
            [8, 14, 12, 12, 12, 16],
            [8, 14, 12, 12, 12, 18],
            [8, 14, 14, 12, 12, 18],
            [10, 16, 14, 12, 12, 20],
            [10, 16, 14, 12, 14, 20],
            [10, 16, 16, 12, 14, 22],
            [10, 18, 16, 12, 14, 24],
        ],
    },
];

impl NpcFamily {
    fn instantiate(&self, level: u8) -> Character {
        Character::npc(
            level,
            AbilityScores::from_array(self.rows[stat_row(level)]),
            self.caster,
            self.save_proficiencies,
            self.attack_ability,
            self.base_ac,
            self.include_dex,
        )
    }
}

/// Fixed per-level opponent sets, partitioned by `EncounterKind`. Built once
/// at startup; selection never mutates the pool, so it is shared read-only
/// across workers.
pub struct EncounterPool {
    levels: Vec<Vec<Character>>,
    spellcasters: Vec<Vec<usize>>,
    regulars: Vec<Vec<usize>>,
}

impl EncounterPool {
    pub fn build() -> Self {
        let mut levels = Vec::with_capacity(20);
        let mut spellcasters = Vec::with_capacity(20);
        let mut regulars = Vec::with_capacity(20);
        for level in 1..=20u8 {
            let entries: Vec<Character> =
                FAMILIES.iter().map(|family| family.instantiate(level)).collect();
            let casters = entries
                .iter()
                .enumerate()
                .filter(|(_, npc)| npc.attacks_by_save)
                .map(|(i, _)| i)
                .collect();
            let others = entries
                .iter()
                .enumerate()
                .filter(|(_, npc)| !npc.attacks_by_save)
                .map(|(i, _)| i)
                .collect();
            levels.push(entries);
            spellcasters.push(casters);
            regulars.push(others);
        }
        Self { levels, spellcasters, regulars }
    }

    /// Draw one opponent of the given level uniformly from the eligible set.
    pub fn pick(
        &self,
        level: u8,
        kind: EncounterKind,
        dice: &mut Dice,
    ) -> Result<&Character, SimError> {
        if !(1..=20).contains(&level) {
            return Err(SimError::LevelOutOfRange(level));
        }
        let slot = (level - 1) as usize;
        let entries = &self.levels[slot];
        let picked = match kind {
            EncounterKind::Any => {
                if entries.is_empty() {
                    return Err(SimError::EmptyPool(level));
                }
                &entries[dice.index(entries.len())]
            }
            EncounterKind::Spellcaster => {
                let eligible = &self.spellcasters[slot];
                if eligible.is_empty() {
                    return Err(SimError::EmptyPool(level));
                }
                &entries[eligible[dice.index(eligible.len())]]
            }
            EncounterKind::Regular => {
                let eligible = &self.regulars[slot];
                if eligible.is_empty() {
                    return Err(SimError::EmptyPool(level));
                }
                &entries[eligible[dice.index(eligible.len())]]
            }
        };
        Ok(picked)
    }
}
