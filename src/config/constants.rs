// Turn Structure Constants
pub const ACTIONS_PER_TURN: u32 = 3;
pub const DEFAULT_TURNS: u32 = 12;

// Action Point Costs
pub const ATTACK_COST: u32 = 2;
pub const ACTIVATE_COST: u32 = 1;
pub const PLAY_COST: u32 = 1;
pub const DRAW_COST: u32 = 1;

// Victory Conditions
pub const CAPTURES_FOR_VICTORY: u32 = 3;

// Setup Constants
pub const STARTING_HAND_SIZE: usize = 5;
pub const MONSTER_ROW_SIZE: usize = 3;

// Card Effect Constants
pub const MAGIC_DRAW_COUNT: usize = 2;       // cards drawn by a magic card
pub const CHALLENGE_ACTION_BONUS: u32 = 1;   // action points granted by a challenge card

// Card Base Values (tuning values before the per-card action cost bonus)
pub const HERO_BASE_VALUE: f64 = 60.0;
pub const ITEM_BASE_VALUE: f64 = 45.0;
pub const MAGIC_BASE_VALUE: f64 = 35.0;
pub const CHALLENGE_BASE_VALUE: f64 = 25.0;
pub const MODIFIER_BASE_VALUE: f64 = 15.0;
pub const MONSTER_BASE_VALUE: f64 = 5.0;
