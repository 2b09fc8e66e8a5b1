//! Built-in reference engine: a compact, deterministic single-agent card
//! game behind the [`GameEngine`] seam.
//!
//! The agent plays cards from hand, activates party heroes and attacks a
//! monster row with 2d6 rolls, under a fixed turn and action-point budget.
//! It wins by capturing enough monsters or assembling every hero class in
//! its party. The learning stack only ever sees this through the trait.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::ai::actions::game_action::{CardType, GameAction};
use crate::config::constants::{
    ACTIONS_PER_TURN, ATTACK_COST, CAPTURES_FOR_VICTORY, CHALLENGE_ACTION_BONUS,
    CHALLENGE_BASE_VALUE, HERO_BASE_VALUE, ITEM_BASE_VALUE, MAGIC_BASE_VALUE, MAGIC_DRAW_COUNT,
    MODIFIER_BASE_VALUE, MONSTER_BASE_VALUE, MONSTER_ROW_SIZE, PLAY_COST, STARTING_HAND_SIZE,
};
use crate::core::engine::{GameEngine, Outcome, StateView, StepEvents};
use crate::error::PolicyError;

/// Hero classes required for the party-composition victory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroClass {
    Bard,
    Fighter,
    Guardian,
    Ranger,
    Thief,
    Wizard,
}

pub const HERO_CLASSES: [HeroClass; 6] = [
    HeroClass::Bard,
    HeroClass::Fighter,
    HeroClass::Guardian,
    HeroClass::Ranger,
    HeroClass::Thief,
    HeroClass::Wizard,
];

#[derive(Debug, Clone, Copy, PartialEq)]
struct Card {
    id: u32,
    kind: CardType,
    class: Option<HeroClass>,
    value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Monster {
    id: u32,
    value: f64,
    /// Minimum 2d6 total needed to capture.
    threshold: u32,
}

#[derive(Debug, Clone)]
struct PartyHero {
    card: Card,
    items: u32,
    activated_this_turn: bool,
}

pub struct CardEngine {
    rng: StdRng,
    turn: u32,
    max_turns: u32,
    action_points: u32,
    hand: Vec<Card>,
    draw_pile: Vec<Card>,
    party: Vec<PartyHero>,
    monster_row: Vec<Monster>,
    monster_deck: Vec<Monster>,
    captured: u32,
    class_set_completed: bool,
    outcome: Outcome,
}

impl CardEngine {
    pub fn new(seed: u64, max_turns: u32) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let mut deck = build_deck();
        deck.shuffle(&mut rng);

        let mut monster_deck = build_monsters();
        monster_deck.shuffle(&mut rng);
        let monster_row: Vec<Monster> = monster_deck
            .drain(..MONSTER_ROW_SIZE.min(monster_deck.len()))
            .collect();

        let hand: Vec<Card> = deck.drain(..STARTING_HAND_SIZE.min(deck.len())).collect();

        CardEngine {
            rng,
            turn: 1,
            max_turns: max_turns.max(1),
            action_points: ACTIONS_PER_TURN,
            hand,
            draw_pile: deck,
            party: Vec::new(),
            monster_row,
            monster_deck,
            captured: 0,
            class_set_completed: false,
            outcome: Outcome::Ongoing,
        }
    }

    fn unique_classes(&self) -> u32 {
        HERO_CLASSES
            .iter()
            .filter(|class| {
                self.party
                    .iter()
                    .any(|hero| hero.card.class == Some(**class))
            })
            .count() as u32
    }

    fn class_in_party(&self, class: HeroClass) -> bool {
        self.party
            .iter()
            .any(|hero| hero.card.class == Some(class))
    }

    fn draw_one(&mut self) -> bool {
        match self.draw_pile.pop() {
            Some(card) => {
                self.hand.push(card);
                true
            }
            None => false,
        }
    }

    fn check_victory(&mut self) -> bool {
        let mut completed_now = false;
        if !self.class_set_completed && self.unique_classes() == HERO_CLASSES.len() as u32 {
            self.class_set_completed = true;
            completed_now = true;
        }
        if self.captured >= CAPTURES_FOR_VICTORY || self.class_set_completed {
            self.outcome = Outcome::Won;
        }
        completed_now
    }

    /// Advances turns until the agent can act again or the budget runs out.
    fn advance_turns(&mut self) {
        while self.outcome == Outcome::Ongoing
            && (self.action_points == 0 || self.candidates().is_empty())
        {
            if self.turn >= self.max_turns {
                self.outcome = Outcome::Lost;
                return;
            }
            self.turn += 1;
            self.action_points = ACTIONS_PER_TURN;
            for hero in &mut self.party {
                hero.activated_this_turn = false;
            }
        }
    }

    fn apply_play(&mut self, card_id: u32) -> Result<bool, PolicyError> {
        let index = self
            .hand
            .iter()
            .position(|card| card.id == card_id)
            .ok_or_else(|| PolicyError::Engine(format!("card {card_id} not in hand")))?;
        let card = self.hand.remove(index);

        let wasted = match card.kind {
            CardType::Hero => {
                self.party.push(PartyHero {
                    card,
                    items: 0,
                    activated_this_turn: false,
                });
                false
            }
            CardType::Item => {
                // Attach to the least-equipped hero; dead card without a party.
                match self
                    .party
                    .iter_mut()
                    .min_by_key(|hero| hero.items)
                {
                    Some(hero) => {
                        hero.items += 1;
                        false
                    }
                    None => true,
                }
            }
            CardType::Magic => {
                let mut drawn = 0;
                for _ in 0..MAGIC_DRAW_COUNT {
                    if self.draw_one() {
                        drawn += 1;
                    }
                }
                drawn == 0
            }
            CardType::Challenge => {
                self.action_points += CHALLENGE_ACTION_BONUS;
                false
            }
            // No opponent to disrupt, so a modifier is always a dead card.
            CardType::Modifier => true,
        };
        Ok(wasted)
    }

    fn apply_activate(&mut self, hero_id: u32) -> Result<bool, PolicyError> {
        let hero = self
            .party
            .iter_mut()
            .find(|hero| hero.card.id == hero_id)
            .ok_or_else(|| PolicyError::Engine(format!("hero {hero_id} not in party")))?;
        if hero.activated_this_turn {
            return Err(PolicyError::Engine(format!(
                "hero {hero_id} already activated this turn"
            )));
        }
        hero.activated_this_turn = true;
        // The ability draws a card; an empty pile makes it a no-op.
        Ok(!self.draw_one())
    }

    fn apply_attack(&mut self, monster_id: u32) -> Result<(u32, bool), PolicyError> {
        let index = self
            .monster_row
            .iter()
            .position(|monster| monster.id == monster_id)
            .ok_or_else(|| PolicyError::Engine(format!("monster {monster_id} not in row")))?;

        // Each item in the party adds +1 to the roll.
        let bonus: u32 = self.party.iter().map(|hero| hero.items).sum();
        let roll = self.rng.gen_range(1..=6) + self.rng.gen_range(1..=6) + bonus;
        if roll >= self.monster_row[index].threshold {
            self.monster_row.remove(index);
            if let Some(next) = self.monster_deck.pop() {
                self.monster_row.push(next);
            }
            self.captured += 1;
            Ok((1, false))
        } else {
            Ok((0, true))
        }
    }
}

impl GameEngine for CardEngine {
    fn view(&self) -> StateView {
        StateView {
            action_points: self.action_points,
            actions_per_turn: ACTIONS_PER_TURN,
            hand_size: self.hand.len() as u32,
            party_size: self.party.len() as u32,
            monsters_captured: self.captured,
            unique_classes_collected: self.unique_classes(),
            total_required_classes: HERO_CLASSES.len() as u32,
            captures_for_victory: CAPTURES_FOR_VICTORY,
            remaining_activations: self
                .party
                .iter()
                .filter(|hero| !hero.activated_this_turn)
                .count() as u32,
            draw_pile_size: self.draw_pile.len() as u32,
        }
    }

    fn candidates(&self) -> Vec<GameAction> {
        if self.outcome != Outcome::Ongoing {
            return Vec::new();
        }
        let mut actions = Vec::new();
        if self.action_points >= PLAY_COST {
            for card in &self.hand {
                let adds_class = card
                    .class
                    .map(|class| !self.class_in_party(class))
                    .unwrap_or(false);
                actions.push(GameAction::play(card.id, card.kind, card.value, adds_class));
            }
            for hero in &self.party {
                if !hero.activated_this_turn {
                    actions.push(GameAction::activate(hero.card.id, hero.card.value));
                }
            }
        }
        if self.action_points >= ATTACK_COST {
            for monster in &self.monster_row {
                actions.push(GameAction::attack(monster.id, monster.value));
            }
        }
        if self.action_points >= PLAY_COST && !self.draw_pile.is_empty() {
            actions.push(GameAction::draw());
        }
        actions
    }

    fn apply(&mut self, action: &GameAction) -> Result<StepEvents, PolicyError> {
        if self.outcome != Outcome::Ongoing {
            return Err(PolicyError::Engine("episode is already over".to_string()));
        }
        if self.action_points < action.cost() {
            return Err(PolicyError::Engine(format!(
                "{} costs {} but only {} action points remain",
                action,
                action.cost(),
                self.action_points
            )));
        }
        self.action_points -= action.cost();

        let (captured, wasted) = match action {
            GameAction::Play { card_id, .. } => (0, self.apply_play(*card_id)?),
            GameAction::Activate { hero_id, .. } => (0, self.apply_activate(*hero_id)?),
            GameAction::Attack { monster_id, .. } => self.apply_attack(*monster_id)?,
            GameAction::Draw { .. } => {
                if !self.draw_one() {
                    return Err(PolicyError::Engine("draw pile is empty".to_string()));
                }
                (0, false)
            }
        };

        let completed = self.check_victory();
        if self.outcome == Outcome::Ongoing {
            self.advance_turns();
        }

        Ok(StepEvents {
            captured,
            completed_party_class_set: completed,
            wasted,
            outcome: self.outcome,
        })
    }

    fn outcome(&self) -> Outcome {
        self.outcome
    }

    fn turn(&self) -> u32 {
        self.turn
    }
}

fn build_deck() -> Vec<Card> {
    let mut deck = Vec::new();
    let mut id = 0;
    let mut push = |kind: CardType, class: Option<HeroClass>, base: f64| {
        deck.push(Card {
            id,
            kind,
            class,
            value: base + f64::from(PLAY_COST),
        });
        id += 1;
    };

    // Two heroes per class, then utility cards.
    for class in HERO_CLASSES {
        push(CardType::Hero, Some(class), HERO_BASE_VALUE);
        push(CardType::Hero, Some(class), HERO_BASE_VALUE);
    }
    for _ in 0..6 {
        push(CardType::Item, None, ITEM_BASE_VALUE);
    }
    for _ in 0..6 {
        push(CardType::Magic, None, MAGIC_BASE_VALUE);
    }
    for _ in 0..4 {
        push(CardType::Challenge, None, CHALLENGE_BASE_VALUE);
    }
    for _ in 0..4 {
        push(CardType::Modifier, None, MODIFIER_BASE_VALUE);
    }
    deck
}

fn build_monsters() -> Vec<Monster> {
    // Thresholds span easy (6) to hard (9) against 2d6.
    let thresholds = [6, 6, 7, 7, 7, 8, 8, 8, 9, 9];
    thresholds
        .iter()
        .enumerate()
        .map(|(i, &threshold)| Monster {
            id: 1000 + i as u32,
            value: MONSTER_BASE_VALUE + f64::from(ATTACK_COST),
            threshold,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_engine_deals_hand_and_monster_row() {
        let engine = CardEngine::new(7, 12);
        let view = engine.view();
        assert_eq!(view.hand_size, STARTING_HAND_SIZE as u32);
        assert_eq!(view.action_points, ACTIONS_PER_TURN);
        assert_eq!(view.total_required_classes, 6);
        assert_eq!(engine.monster_row.len(), MONSTER_ROW_SIZE);
        assert!(!engine.candidates().is_empty());
    }

    #[test]
    fn identical_seeds_produce_identical_rollouts() {
        let rollout = |seed: u64| {
            let mut engine = CardEngine::new(seed, 6);
            let mut log = Vec::new();
            while !engine.is_over() {
                let candidates = engine.candidates();
                if candidates.is_empty() {
                    break;
                }
                let action = candidates[0].clone();
                let events = engine.apply(&action).unwrap();
                log.push((action, events));
            }
            (log, engine.outcome())
        };
        assert_eq!(rollout(42), rollout(42));
    }

    #[test]
    fn attacking_a_missing_monster_is_an_engine_error() {
        let mut engine = CardEngine::new(7, 12);
        let err = engine.apply(&GameAction::attack(9999, 7.0)).unwrap_err();
        assert!(matches!(err, PolicyError::Engine(_)));
        // The failed apply still consumed no turn state beyond the check.
        assert_eq!(engine.turn(), 1);
    }

    #[test]
    fn overspending_action_points_is_rejected() {
        let mut engine = CardEngine::new(7, 12);
        engine.action_points = 1;
        let monster_id = engine.monster_row[0].id;
        let err = engine
            .apply(&GameAction::attack(monster_id, 7.0))
            .unwrap_err();
        assert!(matches!(err, PolicyError::Engine(_)));
    }

    #[test]
    fn playing_a_modifier_is_wasted() {
        let mut engine = CardEngine::new(7, 12);
        engine.hand = vec![Card {
            id: 500,
            kind: CardType::Modifier,
            class: None,
            value: MODIFIER_BASE_VALUE + 1.0,
        }];
        let action = GameAction::play(500, CardType::Modifier, 16.0, false);
        let events = engine.apply(&action).unwrap();
        assert!(events.wasted);
        assert_eq!(engine.view().hand_size, 0);
    }

    #[test]
    fn challenge_card_grants_an_extra_action_point() {
        let mut engine = CardEngine::new(7, 12);
        engine.hand.push(Card {
            id: 501,
            kind: CardType::Challenge,
            class: None,
            value: CHALLENGE_BASE_VALUE + 1.0,
        });
        let before = engine.action_points;
        let action = GameAction::play(501, CardType::Challenge, 26.0, false);
        let events = engine.apply(&action).unwrap();
        assert!(!events.wasted);
        // Cost 1 spent, bonus 1 granted.
        assert_eq!(engine.action_points, before);
    }

    #[test]
    fn item_without_a_party_is_wasted_but_equips_once_heroes_exist() {
        let mut engine = CardEngine::new(7, 12);
        engine.hand = vec![
            Card {
                id: 502,
                kind: CardType::Item,
                class: None,
                value: ITEM_BASE_VALUE + 1.0,
            },
            Card {
                id: 503,
                kind: CardType::Hero,
                class: Some(HeroClass::Bard),
                value: HERO_BASE_VALUE + 1.0,
            },
            Card {
                id: 504,
                kind: CardType::Item,
                class: None,
                value: ITEM_BASE_VALUE + 1.0,
            },
        ];
        let events = engine
            .apply(&GameAction::play(502, CardType::Item, 46.0, false))
            .unwrap();
        assert!(events.wasted);

        engine
            .apply(&GameAction::play(503, CardType::Hero, 61.0, true))
            .unwrap();
        // With a hero in play the second item equips.
        let events = engine
            .apply(&GameAction::play(504, CardType::Item, 46.0, false))
            .unwrap();
        assert!(!events.wasted);
        assert_eq!(engine.party[0].items, 1);
    }

    #[test]
    fn hero_activation_draws_and_is_once_per_turn() {
        let mut engine = CardEngine::new(7, 12);
        engine.party.push(PartyHero {
            card: Card {
                id: 505,
                kind: CardType::Hero,
                class: Some(HeroClass::Wizard),
                value: HERO_BASE_VALUE + 1.0,
            },
            items: 0,
            activated_this_turn: false,
        });
        let hand_before = engine.hand.len();
        let events = engine.apply(&GameAction::activate(505, 61.0)).unwrap();
        assert!(!events.wasted);
        assert_eq!(engine.hand.len(), hand_before + 1);

        // Same turn, second activation of the same hero is illegal.
        let err = engine.apply(&GameAction::activate(505, 61.0)).unwrap_err();
        assert!(matches!(err, PolicyError::Engine(_)));
    }

    #[test]
    fn capturing_three_monsters_wins() {
        let mut engine = CardEngine::new(7, 12);
        // Guarantee captures regardless of the roll.
        for monster in &mut engine.monster_row {
            monster.threshold = 2;
        }
        for monster in &mut engine.monster_deck {
            monster.threshold = 2;
        }
        let mut captures = 0;
        while engine.outcome() == Outcome::Ongoing && captures < CAPTURES_FOR_VICTORY {
            let candidates = engine.candidates();
            // Attack whenever affordable, otherwise burn a point until the
            // turn rolls over.
            let action = candidates
                .iter()
                .find(|a| matches!(a, GameAction::Attack { .. }))
                .unwrap_or(&candidates[0])
                .clone();
            captures += engine.apply(&action).unwrap().captured;
        }
        assert_eq!(engine.outcome(), Outcome::Won);
        assert!(engine.candidates().is_empty());
    }

    #[test]
    fn full_class_set_wins_and_reports_completion_once() {
        let mut engine = CardEngine::new(7, 12);
        engine.max_turns = 30;
        engine.hand = HERO_CLASSES
            .iter()
            .enumerate()
            .map(|(i, &class)| Card {
                id: 600 + i as u32,
                kind: CardType::Hero,
                class: Some(class),
                value: HERO_BASE_VALUE + 1.0,
            })
            .collect();
        let mut completions = 0;
        for i in 0..6 {
            let events = engine
                .apply(&GameAction::play(
                    600 + i,
                    CardType::Hero,
                    61.0,
                    true,
                ))
                .unwrap();
            if events.completed_party_class_set {
                completions += 1;
            }
        }
        assert_eq!(completions, 1);
        assert_eq!(engine.outcome(), Outcome::Won);
    }

    #[test]
    fn exhausting_the_turn_budget_loses() {
        let mut engine = CardEngine::new(7, 1);
        // Impossible monsters, no useful cards: the single turn must lapse.
        for monster in &mut engine.monster_row {
            monster.threshold = 99;
        }
        for monster in &mut engine.monster_deck {
            monster.threshold = 99;
        }
        loop {
            let candidates = engine.candidates();
            if candidates.is_empty() {
                break;
            }
            let action = candidates
                .iter()
                .find(|a| matches!(a, GameAction::Draw { .. }))
                .unwrap_or(&candidates[0])
                .clone();
            if engine.apply(&action).unwrap().done() {
                break;
            }
        }
        assert_eq!(engine.outcome(), Outcome::Lost);
        assert_eq!(engine.turn(), 1);
    }
}
