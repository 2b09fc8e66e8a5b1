// Constants module for the learning components
// All constants used by the Policy, RewardShaper and Trainer implementations

//---------------------------------------------------------------------
// Training Defaults
//---------------------------------------------------------------------
pub const DEFAULT_LEARNING_RATE: f64 = 0.05;
pub const DEFAULT_DISCOUNT_FACTOR: f64 = 0.9;
pub const DEFAULT_EXPLORATION_RATE: f64 = 0.15;
pub const DEFAULT_EXPLORATION_DECAY: f64 = 1.0; // fixed epsilon unless configured
pub const DEFAULT_TRAINING_EPISODES: usize = 25;

//---------------------------------------------------------------------
// Reward Shaping Constants
//---------------------------------------------------------------------
pub const WIN_REWARD: f64 = 10.0;
pub const LOSS_PENALTY: f64 = -8.0;
pub const MONSTER_CAPTURE_REWARD: f64 = 2.5;
pub const PARTY_CLASS_COMPLETION_REWARD: f64 = 6.0;
pub const PARTY_CLASS_PROGRESS_REWARD: f64 = 1.5;
pub const WASTED_ACTION_PENALTY: f64 = -1.0;
pub const CARD_PLAY_VALUE_RATE: f64 = 0.02;
pub const MONSTER_ATTACK_VALUE_RATE: f64 = 0.02;
pub const HERO_ACTIVATION_VALUE_RATE: f64 = 0.01;

//---------------------------------------------------------------------
// Baseline Weight Constants (hand-tuned priors)
//---------------------------------------------------------------------
pub const BIAS_WEIGHT: f64 = 0.0;
pub const ACTION_COST_WEIGHT: f64 = -1.5;
pub const ACTION_POINT_EFFICIENCY_WEIGHT: f64 = 1.0;
pub const MONSTERS_CAPTURED_WEIGHT: f64 = 1.0;
pub const PARTY_CLASS_PROGRESS_WEIGHT: f64 = 2.5;
pub const HAND_SIZE_WEIGHT: f64 = 0.2;
pub const PARTY_SIZE_WEIGHT: f64 = 0.4;
pub const IS_ATTACK_WEIGHT: f64 = 4.0;
pub const MONSTER_VALUE_WEIGHT: f64 = 0.08;
pub const MONSTER_CAPTURE_URGENCY_WEIGHT: f64 = 2.0;
pub const IS_ACTIVATE_WEIGHT: f64 = 1.2;
pub const ACTIVATED_HERO_VALUE_WEIGHT: f64 = 0.1;
pub const REMAINING_ACTIVATIONS_WEIGHT: f64 = 0.6;
pub const IS_PLAY_WEIGHT: f64 = 2.0;
pub const PLAYED_CARD_VALUE_WEIGHT: f64 = 0.15;
pub const PLAYED_CARD_IS_HERO_WEIGHT: f64 = 1.5;
pub const PLAYED_CARD_IS_ITEM_WEIGHT: f64 = 0.6;
pub const PLAYED_CARD_IS_MAGIC_WEIGHT: f64 = 0.3;
pub const PLAYED_CARD_IS_CHALLENGE_WEIGHT: f64 = 0.1;
pub const PLAYED_CARD_IS_MODIFIER_WEIGHT: f64 = -2.0;
pub const ADDS_PARTY_CLASS_WEIGHT: f64 = 2.5;
pub const IS_DRAW_WEIGHT: f64 = 0.4;
pub const DRAW_PILE_SIZE_WEIGHT: f64 = 0.01;
