//! Feature extraction: maps (state view, candidate action) to the fixed
//! feature schema. Pure; the only failure mode is a malformed action
//! carrying non-finite values.

use crate::ai::actions::game_action::{CardType, GameAction};
use crate::ai::features::schema::FeatureVector;
use crate::core::engine::StateView;
use crate::error::PolicyError;

/// Extracts the full feature vector for one candidate action. Features
/// outside the action's category stay at 0.0; they are never omitted
/// because the schema is a fixed struct.
pub fn extract(view: &StateView, action: &GameAction) -> Result<FeatureVector, PolicyError> {
    let value = action.tuning_value();
    if !value.is_finite() {
        return Err(PolicyError::Feature(format!(
            "non-finite value {} on {}",
            value, action
        )));
    }

    let mut features = base_features(view, action.cost());
    match action {
        GameAction::Attack { monster_value, .. } => {
            features.is_attack = 1.0;
            features.monster_value = *monster_value;
            features.monster_capture_urgency = capture_urgency(view);
        }
        GameAction::Activate { hero_value, .. } => {
            features.is_activate = 1.0;
            features.activated_hero_value = *hero_value;
            features.remaining_activations = f64::from(view.remaining_activations);
        }
        GameAction::Play {
            card_type,
            card_value,
            adds_party_class,
            ..
        } => {
            features.is_play = 1.0;
            features.played_card_value = *card_value;
            match card_type {
                CardType::Hero => features.played_card_is_hero = 1.0,
                CardType::Item => features.played_card_is_item = 1.0,
                CardType::Magic => features.played_card_is_magic = 1.0,
                CardType::Challenge => features.played_card_is_challenge = 1.0,
                CardType::Modifier => features.played_card_is_modifier = 1.0,
            }
            if *adds_party_class {
                features.adds_party_class = 1.0;
            }
        }
        GameAction::Draw { .. } => {
            features.is_draw = 1.0;
            // Post-draw remaining count.
            features.draw_pile_size = f64::from(view.draw_pile_size.saturating_sub(1));
        }
    }
    Ok(features)
}

fn base_features(view: &StateView, cost: u32) -> FeatureVector {
    let per_turn = f64::from(view.actions_per_turn.max(1));
    FeatureVector {
        bias: 1.0,
        action_cost: f64::from(cost),
        action_point_efficiency: (f64::from(view.action_points) - f64::from(cost)) / per_turn,
        monsters_captured: f64::from(view.monsters_captured),
        party_class_progress: view.party_class_progress(),
        hand_size: f64::from(view.hand_size),
        party_size: f64::from(view.party_size),
        ..FeatureVector::default()
    }
}

fn capture_urgency(view: &StateView) -> f64 {
    if view.captures_for_victory == 0 {
        return 0.0;
    }
    let remaining = view
        .captures_for_victory
        .saturating_sub(view.monsters_captured);
    f64::from(remaining) / f64::from(view.captures_for_victory)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_view() -> StateView {
        StateView {
            action_points: 3,
            actions_per_turn: 3,
            hand_size: 4,
            party_size: 2,
            monsters_captured: 1,
            unique_classes_collected: 2,
            total_required_classes: 6,
            captures_for_victory: 3,
            remaining_activations: 2,
            draw_pile_size: 10,
        }
    }

    #[test]
    fn attack_features_include_urgency_and_value() {
        let view = sample_view();
        let action = GameAction::attack(7, 62.0);
        let features = extract(&view, &action).unwrap();
        assert_eq!(features.is_attack, 1.0);
        assert_eq!(features.monster_value, 62.0);
        // 1 of 3 captured, so 2/3 remain.
        assert!((features.monster_capture_urgency - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(features.action_cost, 2.0);
        assert!((features.action_point_efficiency - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn non_attack_actions_zero_the_attack_group() {
        let view = sample_view();
        for action in [
            GameAction::draw(),
            GameAction::activate(3, 61.0),
            GameAction::play(5, CardType::Magic, 36.0, false),
        ] {
            let features = extract(&view, &action).unwrap();
            assert_eq!(features.is_attack, 0.0, "{action}");
            assert_eq!(features.monster_value, 0.0, "{action}");
            assert_eq!(features.monster_capture_urgency, 0.0, "{action}");
        }
    }

    #[test]
    fn play_features_one_hot_card_type_and_class() {
        let view = sample_view();
        let action = GameAction::play(5, CardType::Hero, 61.0, true);
        let features = extract(&view, &action).unwrap();
        assert_eq!(features.is_play, 1.0);
        assert_eq!(features.played_card_is_hero, 1.0);
        assert_eq!(features.played_card_is_item, 0.0);
        assert_eq!(features.played_card_is_magic, 0.0);
        assert_eq!(features.played_card_is_challenge, 0.0);
        assert_eq!(features.played_card_is_modifier, 0.0);
        assert_eq!(features.adds_party_class, 1.0);
        // Other groups stay zeroed.
        assert_eq!(features.is_draw, 0.0);
        assert_eq!(features.remaining_activations, 0.0);
    }

    #[test]
    fn draw_reports_post_draw_pile_size() {
        let mut view = sample_view();
        let features = extract(&view, &GameAction::draw()).unwrap();
        assert_eq!(features.is_draw, 1.0);
        assert_eq!(features.draw_pile_size, 9.0);

        view.draw_pile_size = 0;
        let features = extract(&view, &GameAction::draw()).unwrap();
        assert_eq!(features.draw_pile_size, 0.0);
    }

    #[test]
    fn party_class_progress_bounds() {
        let mut view = sample_view();
        view.unique_classes_collected = 6;
        let features = extract(&view, &GameAction::draw()).unwrap();
        assert_eq!(features.party_class_progress, 1.0);

        view.total_required_classes = 0;
        view.unique_classes_collected = 0;
        let features = extract(&view, &GameAction::draw()).unwrap();
        assert_eq!(features.party_class_progress, 0.0);
    }

    #[test]
    fn zero_capture_target_yields_zero_urgency() {
        let mut view = sample_view();
        view.captures_for_victory = 0;
        let features = extract(&view, &GameAction::attack(7, 62.0)).unwrap();
        assert_eq!(features.monster_capture_urgency, 0.0);
    }

    #[test]
    fn non_finite_action_value_is_a_feature_error() {
        let view = sample_view();
        let action = GameAction::attack(7, f64::NAN);
        assert!(matches!(
            extract(&view, &action),
            Err(PolicyError::Feature(_))
        ));
    }
}
