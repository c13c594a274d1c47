//! Generation constants
//!
//! Defaults for grid size, room size ranges and the retry budgets that keep
//! every generation run bounded.

/// Default grid dimensions
pub const DEFAULT_WIDTH: i32 = 50;
pub const DEFAULT_HEIGHT: i32 = 30;

/// Default number of rooms per layout
pub const DEFAULT_ROOM_COUNT: usize = 5;

/// Room size ranges (lower bound inclusive, upper bound exclusive)
pub const MIN_ROOM_WIDTH: i32 = 8;
pub const MAX_ROOM_WIDTH: i32 = 20;
pub const MIN_ROOM_HEIGHT: i32 = 4;
pub const MAX_ROOM_HEIGHT: i32 = 10;

/// Odds (1 in N) that a corridor turns when it could keep going straight.
/// Lower values make corridors curvier.
pub const PATH_DIR_CHANGE: u32 = 5;

/// Rejection-sampling attempts per room before giving up
pub const MAX_ROOM_ATTEMPTS: u32 = 1000;

/// Steps a single corridor walk may take
pub const MAX_CORRIDOR_STEPS: u32 = 10_000;

/// Consecutive connection iterations without a set merge before the
/// connection phase gives up. Walks that keep stepping onto their own
/// origin's door can repeat the same unproductive pair indefinitely.
pub const MAX_STALLED_ITERATIONS: u32 = 10_000;

/// Layout symbols
pub const S_EMPTY: char = ' ';
pub const S_FLOOR: char = '.';
pub const S_PATH: char = '#';
pub const S_VWALL: char = '|';
pub const S_HWALL: char = '-';
pub const S_WALL: char = '%';
pub const S_PATH_WALL: char = ':';
pub const S_DOOR: char = '+';
pub const S_MONSTER: char = 'M';
pub const S_EXIT: char = '>';
pub const S_PLAYER: char = '@';
