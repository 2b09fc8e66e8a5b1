//! Fixed feature schema shared by feature vectors and weight vectors.
//!
//! Every feature is a concrete struct field, so a vector can never be
//! missing a key and the schema is checked at compile time. The persisted
//! form is a flat `name -> value` map whose key set must match
//! [`FEATURE_NAMES`] exactly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::PolicyError;

pub const FEATURE_COUNT: usize = 23;

/// Feature names in schema order. The order here defines the layout of
/// [`FeatureVector::to_array`] and must match the struct field order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "bias",
    "action_cost",
    "action_point_efficiency",
    "monsters_captured",
    "party_class_progress",
    "hand_size",
    "party_size",
    "is_attack",
    "monster_value",
    "monster_capture_urgency",
    "is_activate",
    "activated_hero_value",
    "remaining_activations",
    "is_play",
    "played_card_value",
    "played_card_is_hero",
    "played_card_is_item",
    "played_card_is_magic",
    "played_card_is_challenge",
    "played_card_is_modifier",
    "adds_party_class",
    "is_draw",
    "draw_pile_size",
];

/// One value per feature name. Also used as the weight vector, which is
/// the sole learned state of the policy.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureVector {
    pub bias: f64,
    pub action_cost: f64,
    pub action_point_efficiency: f64,
    pub monsters_captured: f64,
    pub party_class_progress: f64,
    pub hand_size: f64,
    pub party_size: f64,
    pub is_attack: f64,
    pub monster_value: f64,
    pub monster_capture_urgency: f64,
    pub is_activate: f64,
    pub activated_hero_value: f64,
    pub remaining_activations: f64,
    pub is_play: f64,
    pub played_card_value: f64,
    pub played_card_is_hero: f64,
    pub played_card_is_item: f64,
    pub played_card_is_magic: f64,
    pub played_card_is_challenge: f64,
    pub played_card_is_modifier: f64,
    pub adds_party_class: f64,
    pub is_draw: f64,
    pub draw_pile_size: f64,
}

impl FeatureVector {
    /// Values in schema order.
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.bias,
            self.action_cost,
            self.action_point_efficiency,
            self.monsters_captured,
            self.party_class_progress,
            self.hand_size,
            self.party_size,
            self.is_attack,
            self.monster_value,
            self.monster_capture_urgency,
            self.is_activate,
            self.activated_hero_value,
            self.remaining_activations,
            self.is_play,
            self.played_card_value,
            self.played_card_is_hero,
            self.played_card_is_item,
            self.played_card_is_magic,
            self.played_card_is_challenge,
            self.played_card_is_modifier,
            self.adds_party_class,
            self.is_draw,
            self.draw_pile_size,
        ]
    }

    pub fn from_array(values: [f64; FEATURE_COUNT]) -> Self {
        FeatureVector {
            bias: values[0],
            action_cost: values[1],
            action_point_efficiency: values[2],
            monsters_captured: values[3],
            party_class_progress: values[4],
            hand_size: values[5],
            party_size: values[6],
            is_attack: values[7],
            monster_value: values[8],
            monster_capture_urgency: values[9],
            is_activate: values[10],
            activated_hero_value: values[11],
            remaining_activations: values[12],
            is_play: values[13],
            played_card_value: values[14],
            played_card_is_hero: values[15],
            played_card_is_item: values[16],
            played_card_is_magic: values[17],
            played_card_is_challenge: values[18],
            played_card_is_modifier: values[19],
            adds_party_class: values[20],
            is_draw: values[21],
            draw_pile_size: values[22],
        }
    }

    /// Dot product over the full schema.
    pub fn dot(&self, other: &FeatureVector) -> f64 {
        self.to_array()
            .iter()
            .zip(other.to_array().iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    /// `(name, value)` pairs in schema order.
    pub fn iter_named(&self) -> impl Iterator<Item = (&'static str, f64)> {
        FEATURE_NAMES.into_iter().zip(self.to_array())
    }

    /// Flat map form used for the persisted weights file.
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        self.iter_named()
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }

    /// Rebuilds a vector from a flat map, rejecting any key-set mismatch.
    /// The schema is never silently extended or truncated.
    pub fn from_map(map: &BTreeMap<String, f64>) -> Result<Self, PolicyError> {
        let missing: Vec<String> = FEATURE_NAMES
            .iter()
            .filter(|name| !map.contains_key(**name))
            .map(|name| name.to_string())
            .collect();
        let unexpected: Vec<String> = map
            .keys()
            .filter(|key| !FEATURE_NAMES.contains(&key.as_str()))
            .cloned()
            .collect();
        if !missing.is_empty() || !unexpected.is_empty() {
            return Err(PolicyError::WeightSchema {
                path: None,
                missing,
                unexpected,
            });
        }

        let mut values = [0.0; FEATURE_COUNT];
        for (slot, name) in values.iter_mut().zip(FEATURE_NAMES.iter()) {
            *slot = map[*name];
        }
        Ok(FeatureVector::from_array(values))
    }
}
