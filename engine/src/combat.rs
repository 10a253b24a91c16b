use crate::{Ability, Character, Dice, RollShape};

/// Resolve one action from `attacker` against `defender`; true means the
/// attacker's action succeeded. Pure given the dice stream: the only effect
/// is consuming draws from `dice`.
///
/// Save-forcing attackers succeed exactly when the defender's saving throw
/// fails; everyone else rolls their own shape and hits on total >= AC.
pub fn resolve(attacker: &Character, defender: &Character, dice: &mut Dice) -> bool {
    if attacker.attacks_by_save {
        !saving_throw(defender, attacker.attack_ability, attacker.save_dc, dice)
    } else {
        let roll = dice.d20(attacker.roll_shape) as i32;
        let total =
            roll + attacker.attack_bonus + attacker.proficiency_bonus + attacker.flat_bonus;
        total >= defender.armor_class
    }
}

/// Saving throw against a difficulty class; succeeds on total >= DC.
/// Defenders always roll a single d20 regardless of their attack shape.
pub fn saving_throw(defender: &Character, ability: Ability, dc: i32, dice: &mut Dice) -> bool {
    let roll = dice.d20(RollShape::Single) as i32;
    roll + defender.saves[ability.index()] + defender.flat_bonus >= dc
}
