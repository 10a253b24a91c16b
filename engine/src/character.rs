use serde::{Deserialize, Serialize};

use crate::{RollShape, ability_mod};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ability {
    Str,
    Dex,
    Con,
    Int,
    Wis,
    Cha,
}

impl Ability {
    pub const ALL: [Ability; 6] = [
        Ability::Str,
        Ability::Dex,
        Ability::Con,
        Ability::Int,
        Ability::Wis,
        Ability::Cha,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    pub str_: i32,
    pub dex: i32,
    pub con: i32,
    pub int_: i32,
    pub wis: i32,
    pub cha: i32,
}

impl AbilityScores {
    pub const fn from_array(scores: [i32; 6]) -> Self {
        Self {
            str_: scores[0],
            dex: scores[1],
            con: scores[2],
            int_: scores[3],
            wis: scores[4],
            cha: scores[5],
        }
    }

    pub fn score_of(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Str => self.str_,
            Ability::Dex => self.dex,
            Ability::Con => self.con,
            Ability::Int => self.int_,
            Ability::Wis => self.wis,
            Ability::Cha => self.cha,
        }
    }

    pub fn mod_of(&self, ability: Ability) -> i32 {
        ability_mod(self.score_of(ability))
    }
}

/// The four premade classes the simulation estimates hit rates for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    Barbarian,
    Cleric,
    Rogue,
    Wizard,
}

impl ClassKind {
    pub const ALL: [ClassKind; 4] = [
        ClassKind::Barbarian,
        ClassKind::Cleric,
        ClassKind::Rogue,
        ClassKind::Wizard,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ClassKind::Barbarian => "barbarian",
            ClassKind::Cleric => "cleric",
            ClassKind::Rogue => "rogue",
            ClassKind::Wizard => "wizard",
        }
    }
}

/// One combatant at one level, fully derived from its stat table at
/// construction and immutable afterwards. `attack_bonus` is the bare ability
/// modifier; proficiency (and any flat bonus) is added at resolution time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub level: u8,
    pub abilities: AbilityScores,
    pub proficiency_bonus: i32,
    /// Per-ability saving-throw bonus, indexed by `Ability::index`.
    pub saves: [i32; 6],
    pub armor_class: i32,
    pub attack_ability: Ability,
    pub attack_bonus: i32,
    /// True for casters whose offense forces the defender to save vs `save_dc`
    /// instead of rolling to hit.
    pub attacks_by_save: bool,
    pub save_dc: i32,
    /// Shape of this character's own attack rolls.
    pub roll_shape: RollShape,
    /// Flat bonus added to attack totals and saving throws (rage).
    pub flat_bonus: i32,
}

/// Stat tables hold one row per level band; the last two rows cover the
/// capstone levels 19 and 20.
pub(crate) fn stat_row(level: u8) -> usize {
    (level / 4) as usize + (level > 18) as usize
}

fn proficiency_bonus(level: u8) -> i32 {
    (level / 4) as i32 + 2
}

fn save_bonuses(abilities: &AbilityScores, proficiency: i32, proficient: &[Ability]) -> [i32; 6] {
    let mut saves = [0i32; 6];
    for ability in Ability::ALL {
        saves[ability.index()] = abilities.mod_of(ability);
    }
    for ability in proficient {
        saves[ability.index()] += proficiency;
    }
    saves
}

impl Character {
    pub fn of_class(class: ClassKind, level: u8) -> Self {
        match class {
            ClassKind::Barbarian => Self::barbarian(level),
            ClassKind::Cleric => Self::cleric(level),
            ClassKind::Rogue => Self::rogue(level),
            ClassKind::Wizard => Self::wizard(level),
        }
    }

    /// Str attacker with rage (+2, +3 above level 8, +4 above level 15) on
    /// attacks and saves; reckless from level 2, so attack rolls keep the
    /// higher of two d20s. Unarmored: AC counts both Dex and Con.
    pub fn barbarian(level: u8) -> Self {
        const ROWS: [[i32; 6]; 7] = [
            [16, 14, 14, 8, 12, 10],
            [18, 14, 14, 8, 12, 10],
            [18, 14, 16, 8, 12, 10],
            [20, 14, 16, 8, 12, 10],
            [20, 14, 18, 8, 12, 10],
            [20, 14, 20, 8, 12, 10],
            [20, 14, 20, 8, 12, 10],
        ];
        let abilities = AbilityScores::from_array(ROWS[stat_row(level)]);
        let proficiency = proficiency_bonus(level);
        let attack_bonus = abilities.mod_of(Ability::Str);
        let rage = 2 + (level > 8) as i32 + (level > 15) as i32;
        Self {
            level,
            proficiency_bonus: proficiency,
            saves: save_bonuses(&abilities, proficiency, &[Ability::Str, Ability::Con]),
            armor_class: 10 + abilities.mod_of(Ability::Dex) + abilities.mod_of(Ability::Con),
            attack_ability: Ability::Str,
            attack_bonus,
            attacks_by_save: false,
            save_dc: 8 + attack_bonus + proficiency,
            roll_shape: if level == 1 { RollShape::Single } else { RollShape::KeepHighest },
            flat_bonus: rage,
            abilities,
        }
    }

    /// Forces Wis saves against its spell DC rather than rolling to hit.
    /// Medium armor caps the Dex contribution at +2, +3 above level 15.
    pub fn cleric(level: u8) -> Self {
        const ROWS: [[i32; 6]; 7] = [
            [10, 14, 12, 8, 16, 14],
            [10, 14, 12, 8, 18, 14],
            [10, 14, 12, 8, 20, 14],
            [10, 16, 12, 8, 20, 14],
            [10, 16, 12, 8, 20, 14],
            [10, 16, 12, 8, 20, 14],
            [10, 16, 12, 8, 20, 14],
        ];
        let abilities = AbilityScores::from_array(ROWS[stat_row(level)]);
        let proficiency = proficiency_bonus(level);
        let attack_bonus = abilities.mod_of(Ability::Wis);
        let dex_cap = 2 + (level > 15) as i32;
        Self {
            level,
            proficiency_bonus: proficiency,
            saves: save_bonuses(&abilities, proficiency, &[Ability::Wis, Ability::Cha]),
            armor_class: 13 + abilities.mod_of(Ability::Dex).min(dex_cap),
            attack_ability: Ability::Wis,
            attack_bonus,
            attacks_by_save: true,
            save_dc: 8 + attack_bonus + proficiency,
            roll_shape: RollShape::Single,
            flat_bonus: 0,
            abilities,
        }
    }

    /// Dex attacker; gains Wis save proficiency above level 14 and one point
    /// of AC above level 2.
    pub fn rogue(level: u8) -> Self {
        const ROWS: [[i32; 6]; 7] = [
            [8, 16, 12, 14, 14, 10],
            [8, 18, 12, 14, 14, 10],
            [8, 20, 12, 14, 14, 10],
            [8, 20, 12, 14, 14, 10],
            [8, 20, 12, 14, 14, 10],
            [8, 20, 12, 14, 14, 10],
            [8, 20, 12, 14, 14, 10],
        ];
        let abilities = AbilityScores::from_array(ROWS[stat_row(level)]);
        let proficiency = proficiency_bonus(level);
        let attack_bonus = abilities.mod_of(Ability::Dex);
        let proficient: &[Ability] = if level > 14 {
            &[Ability::Dex, Ability::Int, Ability::Wis]
        } else {
            &[Ability::Dex, Ability::Int]
        };
        Self {
            level,
            proficiency_bonus: proficiency,
            saves: save_bonuses(&abilities, proficiency, proficient),
            armor_class: 11 + (level > 2) as i32 + abilities.mod_of(Ability::Dex),
            attack_ability: Ability::Dex,
            attack_bonus,
            attacks_by_save: false,
            save_dc: 8 + attack_bonus + proficiency,
            roll_shape: RollShape::Single,
            flat_bonus: 0,
            abilities,
        }
    }

    /// Int attacker; mage armor (+3 AC) from level 2.
    pub fn wizard(level: u8) -> Self {
        const ROWS: [[i32; 6]; 7] = [
            [8, 14, 10, 16, 14, 12],
            [8, 14, 10, 18, 14, 12],
            [8, 14, 10, 20, 14, 12],
            [8, 16, 10, 20, 14, 12],
            [8, 18, 10, 20, 14, 12],
            [8, 20, 10, 20, 14, 12],
            [8, 20, 10, 20, 14, 12],
        ];
        let abilities = AbilityScores::from_array(ROWS[stat_row(level)]);
        let proficiency = proficiency_bonus(level);
        let attack_bonus = abilities.mod_of(Ability::Int);
        Self {
            level,
            proficiency_bonus: proficiency,
            saves: save_bonuses(&abilities, proficiency, &[Ability::Int, Ability::Wis]),
            armor_class: 10 + 3 * (level > 1) as i32 + abilities.mod_of(Ability::Dex),
            attack_ability: Ability::Int,
            attack_bonus,
            attacks_by_save: false,
            save_dc: 8 + attack_bonus + proficiency,
            roll_shape: RollShape::Single,
            flat_bonus: 0,
            abilities,
        }
    }

    /// Generic opponent stat block, used by the encounter pool.
    pub fn npc(
        level: u8,
        abilities: AbilityScores,
        attacks_by_save: bool,
        save_proficiencies: &[Ability],
        attack_ability: Ability,
        base_ac: i32,
        include_dex: bool,
    ) -> Self {
        let proficiency = proficiency_bonus(level);
        let attack_bonus = abilities.mod_of(attack_ability);
        Self {
            level,
            proficiency_bonus: proficiency,
            saves: save_bonuses(&abilities, proficiency, save_proficiencies),
            armor_class: base_ac + include_dex as i32 * abilities.mod_of(Ability::Dex),
            attack_ability,
            attack_bonus,
            attacks_by_save,
            save_dc: 8 + attack_bonus + proficiency,
            roll_shape: RollShape::Single,
            flat_bonus: 0,
            abilities,
        }
    }
}

/// The premade characters, one per class per level 1..=20. Built once at
/// startup and shared read-only across workers.
#[derive(Debug, Clone)]
pub struct Roster {
    by_class: [Vec<Character>; 4],
}

impl Roster {
    pub fn build() -> Self {
        let levels = |class| (1..=20).map(|level| Character::of_class(class, level)).collect();
        Self {
            by_class: [
                levels(ClassKind::Barbarian),
                levels(ClassKind::Cleric),
                levels(ClassKind::Rogue),
                levels(ClassKind::Wizard),
            ],
        }
    }

    pub fn get(&self, class: ClassKind, level: u8) -> &Character {
        &self.by_class[class as usize][(level - 1) as usize]
    }
}
