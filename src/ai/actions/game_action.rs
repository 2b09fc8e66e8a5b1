// Game action module - contains the GameAction enum definition
use serde::{Deserialize, Serialize};

use crate::config::constants::{ACTIVATE_COST, ATTACK_COST, DRAW_COST, PLAY_COST};

/// Card categories a Play action can carry. One-hot encoded in the
/// feature schema, so the set here must stay in sync with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Hero,
    Item,
    Magic,
    Challenge,
    Modifier,
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardType::Hero => write!(f, "hero"),
            CardType::Item => write!(f, "item"),
            CardType::Magic => write!(f, "magic"),
            CardType::Challenge => write!(f, "challenge"),
            CardType::Modifier => write!(f, "modifier"),
        }
    }
}

/// A candidate action at one decision point. Owned by the engine,
/// referenced read-only by the policy; immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameAction {
    // Attack a monster in the row (costs 2 action points)
    Attack {
        monster_id: u32,
        monster_value: f64,
        cost: u32,
    },
    // Activate a party hero's ability
    Activate {
        hero_id: u32,
        hero_value: f64,
        cost: u32,
    },
    // Play a card from hand; adds_party_class is precomputed by the engine
    // against the current party composition
    Play {
        card_id: u32,
        card_type: CardType,
        card_value: f64,
        adds_party_class: bool,
        cost: u32,
    },
    // Draw the top card of the draw pile
    Draw {
        cost: u32,
    },
}

impl GameAction {
    pub fn attack(monster_id: u32, monster_value: f64) -> Self {
        GameAction::Attack {
            monster_id,
            monster_value,
            cost: ATTACK_COST,
        }
    }

    pub fn activate(hero_id: u32, hero_value: f64) -> Self {
        GameAction::Activate {
            hero_id,
            hero_value,
            cost: ACTIVATE_COST,
        }
    }

    pub fn play(card_id: u32, card_type: CardType, card_value: f64, adds_party_class: bool) -> Self {
        GameAction::Play {
            card_id,
            card_type,
            card_value,
            adds_party_class,
            cost: PLAY_COST,
        }
    }

    pub fn draw() -> Self {
        GameAction::Draw { cost: DRAW_COST }
    }

    pub fn cost(&self) -> u32 {
        match self {
            GameAction::Attack { cost, .. }
            | GameAction::Activate { cost, .. }
            | GameAction::Play { cost, .. }
            | GameAction::Draw { cost } => *cost,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            GameAction::Attack { .. } => "attack_monster",
            GameAction::Activate { .. } => "activate_hero",
            GameAction::Play { .. } => "play_card",
            GameAction::Draw { .. } => "draw",
        }
    }

    /// The card/monster/hero value used by the reward shaper's tuning terms.
    pub fn tuning_value(&self) -> f64 {
        match self {
            GameAction::Attack { monster_value, .. } => *monster_value,
            GameAction::Activate { hero_value, .. } => *hero_value,
            GameAction::Play { card_value, .. } => *card_value,
            GameAction::Draw { .. } => 0.0,
        }
    }
}

impl std::fmt::Display for GameAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameAction::Attack { monster_id, .. } => {
                write!(f, "AttackMonster({})", monster_id)
            }
            GameAction::Activate { hero_id, .. } => {
                write!(f, "ActivateHero({})", hero_id)
            }
            GameAction::Play {
                card_id, card_type, ..
            } => {
                write!(f, "PlayCard({}, {})", card_id, card_type)
            }
            GameAction::Draw { .. } => {
                write!(f, "Draw")
            }
        }
    }
}
