//! Core data model for Tower Builder.
//! The whole game session lives in one reducible `Session` value; the view layer
//! only dispatches actions and reads fields. Environment inputs (viewport width,
//! random spawn direction) travel inside the actions so the reducer stays pure.

use serde::{Deserialize, Serialize};
use std::rc::Rc;
use yew::Reducible;

/// Height of every block, in pixels.
pub const BLOCK_HEIGHT: f64 = 100.0;
/// Width of every block, in pixels.
pub const BLOCK_BASE_WIDTH: f64 = 160.0;
/// Ground level, measured from the bottom of the screen.
pub const BASE_Y_POSITION: f64 = 0.0;
/// Base crane speed in pixels per frame.
pub const CRANE_SPEED: f64 = 2.5;
/// Extra pixels per frame for every block already placed.
pub const SPEED_INCREMENT: f64 = 0.35;
/// A drop may land at most this fraction of the half-width off center.
pub const MAX_OFFSET_FRACTION: f64 = 0.8;
/// Degrees of tower lean per pixel of accumulated offset.
pub const TILT_PER_OFFSET_PX: f64 = 0.05;
/// The camera starts following the tower above this many placed blocks.
pub const CAMERA_FOLLOW_THRESHOLD: usize = 5;
/// Duration of the placement drop animation.
pub const DROP_DURATION_MS: f64 = 500.0;
/// Duration of the game-over keel-over animation.
pub const FALL_DURATION_MS: f64 = 1500.0;
/// Screen row (from the top) where the crane block is drawn.
pub const MOVING_BLOCK_TOP_PX: f64 = 180.0;

/// Vertical gradient stops (top, bottom) for the repeating block palette.
pub const BLOCK_COLORS: [(&str, &str); 8] = [
    ("#38bdf8", "#0284c7"), // sky
    ("#34d399", "#059669"), // emerald
    ("#fbbf24", "#d97706"), // amber
    ("#fb7185", "#e11d48"), // rose
    ("#818cf8", "#4f46e5"), // indigo
    ("#e879f9", "#c026d3"), // fuchsia
    ("#a3e635", "#65a30d"), // lime
    ("#fb923c", "#ea580c"), // orange
];

/// Gradient stops for the immovable base block.
pub const BASE_BLOCK_COLOR: (&str, &str) = ("#6b7280", "#374151");

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockColor {
    /// Gray base block (id 0).
    Base,
    /// Index into [`BLOCK_COLORS`], assigned as `score % palette`.
    Palette(u8),
}

impl BlockColor {
    pub fn stops(self) -> (&'static str, &'static str) {
        match self {
            BlockColor::Base => BASE_BLOCK_COLOR,
            BlockColor::Palette(i) => BLOCK_COLORS[i as usize % BLOCK_COLORS.len()],
        }
    }
}

/// A placed or in-flight block. `x` is the center, `y` the bottom edge measured
/// up from the ground; placed block n sits at `y(n-1) + BLOCK_HEIGHT`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: BlockColor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Initial,
    Playing,
    GameOver,
}

/// One game session. `blocks` is append-only while Playing; `moving` is absent
/// exactly while a placement is pending or the game is not running (after a miss
/// it stays frozen for the fall display).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub phase: GamePhase,
    pub blocks: Vec<Block>,
    pub moving: Option<Block>,
    /// Hit block waiting for its drop animation to finish. At most one.
    pub pending: Option<Block>,
    /// Displayed tower height; starts at 1 and equals `blocks.len() - 1` after
    /// every completed placement.
    pub score: u32,
    pub high_score: u32,
    /// Signed sum of every landed offset; the tilt is derived from it.
    pub cumulative_offset: f64,
    pub tower_tilt: f64,
    /// Horizontal travel direction of the moving block, always ±1.
    pub direction: f64,
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Initial,
            blocks: Vec::new(),
            moving: None,
            pending: None,
            score: 0,
            high_score: 0,
            cumulative_offset: 0.0,
            tower_tilt: 0.0,
            direction: 1.0,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Crane speed for the current tower height. Strictly increasing by
/// [`SPEED_INCREMENT`] per placed block, never reset within a session.
pub fn current_speed(placed_count: usize) -> f64 {
    CRANE_SPEED + SPEED_INCREMENT * placed_count.saturating_sub(1) as f64
}

/// Largest |offset| that still counts as a hit on a block of `last_width`.
pub fn max_allowed_offset(last_width: f64) -> f64 {
    (last_width / 2.0) * MAX_OFFSET_FRACTION
}

/// Vertical scroll-follow offset: zero until the tower outgrows the threshold.
pub fn camera_offset(placed_count: usize) -> f64 {
    if placed_count <= CAMERA_FOLLOW_THRESHOLD {
        0.0
    } else {
        (placed_count - CAMERA_FOLLOW_THRESHOLD) as f64 * BLOCK_HEIGHT
    }
}

fn palette_color(score: u32) -> BlockColor {
    BlockColor::Palette((score as usize % BLOCK_COLORS.len()) as u8)
}

#[derive(Clone, Debug)]
pub enum SessionAction {
    /// Merge the persisted high score at startup.
    LoadHighScore { value: u32 },
    /// Start a new session (also serves restart from game over).
    Start { screen_width: f64, direction: f64 },
    /// One motion update, dispatched per animation frame.
    Tick { screen_width: f64 },
    /// Player signalled a drop.
    Drop,
    /// One-shot completion signal from the drop animation.
    PlacementComplete { screen_width: f64, direction: f64 },
}

impl Reducible for Session {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use SessionAction::*;
        let mut new = (*self).clone();
        match action {
            LoadHighScore { value } => {
                new.high_score = new.high_score.max(value);
            }
            Start { screen_width, direction } => {
                if new.phase == GamePhase::Playing {
                    return self;
                }
                let center = screen_width / 2.0;
                new.blocks = vec![Block {
                    id: 0,
                    x: center,
                    y: BASE_Y_POSITION,
                    width: BLOCK_BASE_WIDTH,
                    height: BLOCK_HEIGHT,
                    color: BlockColor::Base,
                }];
                new.moving = Some(Block {
                    id: 1,
                    x: center,
                    y: 0.0,
                    width: BLOCK_BASE_WIDTH,
                    height: BLOCK_HEIGHT,
                    color: palette_color(1),
                });
                new.pending = None;
                new.score = 1;
                new.cumulative_offset = 0.0;
                new.tower_tilt = 0.0;
                new.direction = direction;
                new.phase = GamePhase::Playing;
            }
            Tick { screen_width } => {
                if new.phase != GamePhase::Playing {
                    return self;
                }
                let speed = current_speed(new.blocks.len());
                let direction = &mut new.direction;
                let Some(moving) = new.moving.as_mut() else {
                    return self;
                };
                let half = moving.width / 2.0;
                let mut next_x = moving.x + speed * *direction;
                if next_x + half > screen_width || next_x - half < 0.0 {
                    // Reflect off the edge: same speed, flipped direction,
                    // recomputed from the pre-step position (never clamp).
                    *direction = -*direction;
                    next_x = moving.x + speed * *direction;
                }
                moving.x = next_x;
            }
            Drop => {
                if new.phase != GamePhase::Playing {
                    return self;
                }
                let Some(moving) = new.moving else {
                    return self;
                };
                let Some(last) = new.blocks.last().copied() else {
                    return self;
                };
                let offset = moving.x - last.x;
                if offset.abs() > max_allowed_offset(last.width) {
                    // Miss: tower and moving block stay frozen for the fall
                    // display.
                    new.phase = GamePhase::GameOver;
                    if new.score > new.high_score {
                        new.high_score = new.score;
                    }
                } else {
                    new.cumulative_offset += offset;
                    new.tower_tilt = new.cumulative_offset * TILT_PER_OFFSET_PX;
                    // The block lands exactly where it was released; no snap.
                    new.pending = Some(Block {
                        y: last.y + BLOCK_HEIGHT,
                        ..moving
                    });
                    new.moving = None;
                }
            }
            PlacementComplete { screen_width, direction } => {
                // Idempotent: a repeated completion signal finds no pending block.
                let Some(block) = new.pending.take() else {
                    return self;
                };
                new.blocks.push(block);
                new.score = (new.blocks.len() - 1) as u32;
                new.moving = Some(Block {
                    id: new.score + 1,
                    x: screen_width / 2.0,
                    y: 0.0,
                    width: BLOCK_BASE_WIDTH,
                    height: BLOCK_HEIGHT,
                    color: palette_color(new.score),
                });
                new.direction = direction;
            }
        }
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: f64 = 800.0;

    fn dispatch(s: Session, action: SessionAction) -> Session {
        (*Rc::new(s).reduce(action)).clone()
    }

    fn playing() -> Session {
        dispatch(
            Session::new(),
            SessionAction::Start { screen_width: SCREEN, direction: 1.0 },
        )
    }

    /// Drop the moving block `offset` px off the tower top and run the
    /// placement to completion.
    fn place_with_offset(mut s: Session, offset: f64) -> Session {
        let top_x = s.blocks.last().unwrap().x;
        s.moving.as_mut().unwrap().x = top_x + offset;
        let s = dispatch(s, SessionAction::Drop);
        dispatch(
            s,
            SessionAction::PlacementComplete { screen_width: SCREEN, direction: 1.0 },
        )
    }

    #[test]
    fn start_initializes_session() {
        let s = playing();
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.blocks.len(), 1);
        assert_eq!(s.blocks[0].id, 0);
        assert_eq!(s.blocks[0].x, SCREEN / 2.0);
        assert_eq!(s.score, 1);
        assert_eq!(s.cumulative_offset, 0.0);
        assert_eq!(s.tower_tilt, 0.0);
        let moving = s.moving.expect("moving block spawned");
        assert_eq!(moving.id, 1);
        assert_eq!(moving.x, SCREEN / 2.0);
    }

    #[test]
    fn score_tracks_placed_blocks() {
        let mut s = playing();
        for _ in 0..4 {
            s = place_with_offset(s, 0.0);
            assert_eq!(s.score as usize, s.blocks.len() - 1);
        }
        assert_eq!(s.score, 4);
    }

    #[test]
    fn hit_clears_moving_until_completion() {
        let s = playing();
        let s = dispatch(s, SessionAction::Drop);
        assert!(s.moving.is_none());
        assert!(s.pending.is_some());
        // No motion while the placement is in flight.
        let after_tick = dispatch(s.clone(), SessionAction::Tick { screen_width: SCREEN });
        assert_eq!(after_tick, s);
    }

    #[test]
    fn tick_advances_by_current_speed() {
        let s = playing();
        let x0 = s.moving.unwrap().x;
        let s = dispatch(s, SessionAction::Tick { screen_width: SCREEN });
        assert_eq!(s.moving.unwrap().x, x0 + current_speed(1));
    }

    #[test]
    fn tick_reflects_at_right_edge() {
        let mut s = playing();
        s.moving.as_mut().unwrap().x = SCREEN - 81.0; // half-width is 80
        let x0 = s.moving.unwrap().x;
        let s = dispatch(s, SessionAction::Tick { screen_width: SCREEN });
        assert_eq!(s.direction, -1.0);
        assert!(s.moving.unwrap().x < x0);
    }

    #[test]
    fn tick_reflects_at_left_edge() {
        let mut s = playing();
        s.direction = -1.0;
        s.moving.as_mut().unwrap().x = 81.0;
        let x0 = s.moving.unwrap().x;
        let s = dispatch(s, SessionAction::Tick { screen_width: SCREEN });
        assert_eq!(s.direction, 1.0);
        assert!(s.moving.unwrap().x > x0);
    }

    #[test]
    fn speed_increases_per_placed_block() {
        assert_eq!(current_speed(1), CRANE_SPEED);
        for n in 1..20 {
            let delta = current_speed(n + 1) - current_speed(n);
            assert!((delta - SPEED_INCREMENT).abs() < 1e-12);
        }
    }

    #[test]
    fn offset_exactly_at_limit_is_a_hit() {
        // width 160 -> half 80 -> 80 * 0.8 = 64 px of tolerance
        assert_eq!(max_allowed_offset(160.0), 64.0);
        let mut s = playing();
        s.moving.as_mut().unwrap().x = SCREEN / 2.0 + 64.0;
        let s = dispatch(s, SessionAction::Drop);
        assert_eq!(s.phase, GamePhase::Playing);
        assert!(s.pending.is_some());
    }

    #[test]
    fn offset_past_limit_ends_the_game() {
        let mut s = playing();
        s.moving.as_mut().unwrap().x = SCREEN / 2.0 + 64.01;
        let s = dispatch(s, SessionAction::Drop);
        assert_eq!(s.phase, GamePhase::GameOver);
        assert!(s.pending.is_none());
        // Tower and moving block stay frozen for the fall display.
        assert_eq!(s.blocks.len(), 1);
        assert!(s.moving.is_some());
        assert_eq!(s.score, 1);
    }

    #[test]
    fn tilt_is_recomputed_from_cumulative_offset() {
        let mut s = playing();
        for off in [10.0, -5.0, 20.0] {
            s = place_with_offset(s, off);
        }
        assert_eq!(s.cumulative_offset, 25.0);
        assert!((s.tower_tilt - 1.25).abs() < 1e-9);
    }

    #[test]
    fn restart_resets_session_but_keeps_high_score() {
        let mut s = playing();
        for _ in 0..3 {
            s = place_with_offset(s, 12.0);
        }
        s.moving.as_mut().unwrap().x = 0.0; // far off the tower
        let s = dispatch(s, SessionAction::Drop);
        assert_eq!(s.phase, GamePhase::GameOver);
        let high = s.high_score;
        let s = dispatch(s, SessionAction::Start { screen_width: SCREEN, direction: -1.0 });
        assert_eq!(s.score, 1);
        assert_eq!(s.blocks.len(), 1);
        assert_eq!(s.cumulative_offset, 0.0);
        assert_eq!(s.tower_tilt, 0.0);
        assert_eq!(s.direction, -1.0);
        assert_eq!(s.high_score, high);
    }

    #[test]
    fn high_score_updates_only_on_improvement() {
        let s = dispatch(Session::new(), SessionAction::LoadHighScore { value: 5 });
        let mut s = dispatch(s, SessionAction::Start { screen_width: SCREEN, direction: 1.0 });
        for _ in 0..7 {
            s = place_with_offset(s, 0.0);
        }
        assert_eq!(s.score, 7);
        s.moving.as_mut().unwrap().x = 0.0;
        let s = dispatch(s, SessionAction::Drop);
        assert_eq!(s.high_score, 7);

        // A worse run leaves the stored best untouched.
        let mut s = dispatch(s, SessionAction::Start { screen_width: SCREEN, direction: 1.0 });
        for _ in 0..3 {
            s = place_with_offset(s, 0.0);
        }
        assert_eq!(s.score, 3);
        s.moving.as_mut().unwrap().x = 0.0;
        let s = dispatch(s, SessionAction::Drop);
        assert_eq!(s.high_score, 7);
    }

    #[test]
    fn load_high_score_never_decreases() {
        let s = dispatch(Session::new(), SessionAction::LoadHighScore { value: 5 });
        let s = dispatch(s, SessionAction::LoadHighScore { value: 3 });
        assert_eq!(s.high_score, 5);
    }

    #[test]
    fn placement_completion_is_idempotent() {
        let s = playing();
        let s = dispatch(s, SessionAction::Drop);
        let s = dispatch(
            s,
            SessionAction::PlacementComplete { screen_width: SCREEN, direction: 1.0 },
        );
        assert_eq!(s.blocks.len(), 2);
        let again = dispatch(
            s.clone(),
            SessionAction::PlacementComplete { screen_width: SCREEN, direction: -1.0 },
        );
        assert_eq!(again, s);
    }

    #[test]
    fn tick_and_drop_are_noops_outside_playing() {
        let s = Session::new();
        let after = dispatch(s.clone(), SessionAction::Tick { screen_width: SCREEN });
        assert_eq!(after, s);
        let after = dispatch(s.clone(), SessionAction::Drop);
        assert_eq!(after, s);
    }

    #[test]
    fn camera_follows_above_threshold() {
        assert_eq!(camera_offset(1), 0.0);
        assert_eq!(camera_offset(5), 0.0);
        assert_eq!(camera_offset(6), BLOCK_HEIGHT);
        assert_eq!(camera_offset(10), 5.0 * BLOCK_HEIGHT);
    }

    #[test]
    fn palette_repeats_every_eight_blocks() {
        // Score stays 1 through the first placement, so sample after it.
        let mut s = place_with_offset(playing(), 0.0);
        let first = s.moving.unwrap().color;
        assert_eq!(first, BlockColor::Palette(1));
        for _ in 0..8 {
            s = place_with_offset(s, 0.0);
        }
        assert_eq!(s.moving.unwrap().color, first);
        assert_eq!(s.blocks.last().unwrap().color, BlockColor::Palette(0));
    }
}
