//! Linear action-value policy.
//!
//! The policy's entire learned state is one weight per feature. Scoring,
//! action selection and persistence live in the submodules; this module
//! holds the struct and its baseline construction.

mod selection;
mod serialization;

pub(crate) use serialization::FILE_MUTEX;

use crate::ai::features::schema::FeatureVector;
use crate::ai::learning::constants::{
    ACTION_COST_WEIGHT, ACTION_POINT_EFFICIENCY_WEIGHT, ACTIVATED_HERO_VALUE_WEIGHT,
    ADDS_PARTY_CLASS_WEIGHT, BIAS_WEIGHT, DRAW_PILE_SIZE_WEIGHT, HAND_SIZE_WEIGHT,
    IS_ACTIVATE_WEIGHT, IS_ATTACK_WEIGHT, IS_DRAW_WEIGHT, IS_PLAY_WEIGHT,
    MONSTERS_CAPTURED_WEIGHT, MONSTER_CAPTURE_URGENCY_WEIGHT, MONSTER_VALUE_WEIGHT,
    PARTY_CLASS_PROGRESS_WEIGHT, PARTY_SIZE_WEIGHT, PLAYED_CARD_IS_CHALLENGE_WEIGHT,
    PLAYED_CARD_IS_HERO_WEIGHT, PLAYED_CARD_IS_ITEM_WEIGHT, PLAYED_CARD_IS_MAGIC_WEIGHT,
    PLAYED_CARD_IS_MODIFIER_WEIGHT, PLAYED_CARD_VALUE_WEIGHT, REMAINING_ACTIVATIONS_WEIGHT,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Policy {
    weights: FeatureVector,
}

impl Policy {
    pub fn new(weights: FeatureVector) -> Self {
        Policy { weights }
    }

    /// Hand-tuned baseline weights. This is both the training starting
    /// point and the comparison anchor during evaluation.
    pub fn baseline() -> Self {
        Policy {
            weights: FeatureVector {
                bias: BIAS_WEIGHT,
                action_cost: ACTION_COST_WEIGHT,
                action_point_efficiency: ACTION_POINT_EFFICIENCY_WEIGHT,
                monsters_captured: MONSTERS_CAPTURED_WEIGHT,
                party_class_progress: PARTY_CLASS_PROGRESS_WEIGHT,
                hand_size: HAND_SIZE_WEIGHT,
                party_size: PARTY_SIZE_WEIGHT,
                is_attack: IS_ATTACK_WEIGHT,
                monster_value: MONSTER_VALUE_WEIGHT,
                monster_capture_urgency: MONSTER_CAPTURE_URGENCY_WEIGHT,
                is_activate: IS_ACTIVATE_WEIGHT,
                activated_hero_value: ACTIVATED_HERO_VALUE_WEIGHT,
                remaining_activations: REMAINING_ACTIVATIONS_WEIGHT,
                is_play: IS_PLAY_WEIGHT,
                played_card_value: PLAYED_CARD_VALUE_WEIGHT,
                played_card_is_hero: PLAYED_CARD_IS_HERO_WEIGHT,
                played_card_is_item: PLAYED_CARD_IS_ITEM_WEIGHT,
                played_card_is_magic: PLAYED_CARD_IS_MAGIC_WEIGHT,
                played_card_is_challenge: PLAYED_CARD_IS_CHALLENGE_WEIGHT,
                played_card_is_modifier: PLAYED_CARD_IS_MODIFIER_WEIGHT,
                adds_party_class: ADDS_PARTY_CLASS_WEIGHT,
                is_draw: IS_DRAW_WEIGHT,
                draw_pile_size: DRAW_PILE_SIZE_WEIGHT,
            },
        }
    }

    pub fn weights(&self) -> &FeatureVector {
        &self.weights
    }

    pub fn weights_mut(&mut self) -> &mut FeatureVector {
        &mut self.weights
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_carries_the_tuned_priors() {
        let policy = Policy::baseline();
        assert_eq!(policy.weights().action_cost, ACTION_COST_WEIGHT);
        assert_eq!(policy.weights().is_attack, IS_ATTACK_WEIGHT);
        assert_eq!(policy.weights().played_card_is_modifier, -2.0);
    }
}
