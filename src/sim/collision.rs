//! Collision resolution for falling food
//!
//! Everything here is axis-aligned boxes: a falling item against the fixed
//! ground platform, then against each tower piece from the most recent
//! (topmost) down. A hit snaps the item into its rest position; the caller
//! decides what the landing means (score, tower growth, power-up).

use crate::consts::*;
use crate::span_overlap;

use super::state::{FoodItem, TowerPiece};

/// Where a falling item came to rest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    /// On the ground platform
    Platform,
    /// On top of the tower piece at this index
    Stacked { piece: usize },
}

/// Test a falling item against the platform and the tower, snapping it into
/// place on a hit.
///
/// The platform check runs first and short-circuits the tower scan. While
/// rapid fire is active the stacking overlap requirement loosens from 50%
/// to 30% of the smaller width, and landed items are pulled halfway toward
/// the supporting piece's center.
pub fn resolve_food_collision(
    food: &mut FoodItem,
    tower: &[TowerPiece],
    rapid_fire: bool,
) -> Option<Landing> {
    if land_on_platform(food) {
        return Some(Landing::Platform);
    }

    for (i, piece) in tower.iter().enumerate().rev() {
        if land_on_piece(food, piece, rapid_fire) {
            return Some(Landing::Stacked { piece: i });
        }
    }

    None
}

/// Ground platform: bottom edge at or past the platform line and horizontal
/// spans overlapping. Snaps to rest and clamps inside the platform bounds.
fn land_on_platform(food: &mut FoodItem) -> bool {
    if food.bottom() < PLATFORM_Y {
        return false;
    }

    let platform_left = PLAY_WIDTH / 2.0 - PLATFORM_HALF_WIDTH;
    let platform_right = PLAY_WIDTH / 2.0 + PLATFORM_HALF_WIDTH;
    let half_w = food.width() / 2.0;

    if food.pos.x + half_w <= platform_left || food.pos.x - half_w >= platform_right {
        return false;
    }

    food.pos.y = PLATFORM_Y - food.height() / 2.0;
    food.pos.x = food
        .pos
        .x
        .clamp(platform_left + half_w, platform_right - half_w);

    log::debug!(
        "Food landed on platform at x:{:.0}, y:{:.0}",
        food.pos.x,
        food.pos.y
    );
    true
}

/// Stack landing: bottom edge inside the tolerance band below the piece's
/// top, with enough horizontal overlap.
fn land_on_piece(food: &mut FoodItem, piece: &TowerPiece, rapid_fire: bool) -> bool {
    let piece_top = piece.top();
    if food.bottom() < piece_top || food.top() > piece_top + STACK_TOLERANCE {
        return false;
    }

    let overlap = span_overlap(food.pos.x, food.width(), piece.pos.x, piece.width());
    let fraction = if rapid_fire {
        STACK_MIN_OVERLAP_RAPID
    } else {
        STACK_MIN_OVERLAP
    };
    let min_overlap = food.width().min(piece.width()) * fraction;

    if overlap <= min_overlap {
        return false;
    }

    food.pos.y = piece_top - food.height() / 2.0;

    if rapid_fire {
        // Centering assist: pull halfway toward the supporting piece
        food.pos.x += (piece.pos.x - food.pos.x) * 0.5;
    } else {
        // Clamp the offset so the stack stays visually plausible
        let max_offset = (piece.width() + food.width()) / 3.0;
        let offset = food.pos.x - piece.pos.x;
        if offset.abs() > max_offset {
            food.pos.x = piece.pos.x + max_offset.copysign(offset);
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::FoodKind;
    use glam::Vec2;

    fn food_at(x: f32, y: f32, kind: FoodKind) -> FoodItem {
        FoodItem {
            pos: Vec2::new(x, y),
            kind,
            fall_speed: 200.0,
            wobble_phase: 0.0,
        }
    }

    fn piece_at(x: f32, y: f32, kind: FoodKind) -> TowerPiece {
        TowerPiece {
            pos: Vec2::new(x, y),
            kind,
            wobble_offset: 0.0,
            wobble_speed: 0.5,
            shake_time: 0.0,
            shake_intensity: 0.0,
        }
    }

    #[test]
    fn test_platform_landing_snaps_to_rest() {
        // Burger directly over the platform, bottom past the platform line
        let mut food = food_at(PLAY_WIDTH / 2.0, PLATFORM_Y, FoodKind::Burger);

        let landing = resolve_food_collision(&mut food, &[], false);
        assert_eq!(landing, Some(Landing::Platform));
        assert!((food.pos.y - (PLATFORM_Y - food.height() / 2.0)).abs() < 0.001);
    }

    #[test]
    fn test_platform_landing_clamps_inside_bounds() {
        // Overlapping the platform's left edge
        let left = PLAY_WIDTH / 2.0 - PLATFORM_HALF_WIDTH;
        let mut food = food_at(left + 5.0, PLATFORM_Y + 2.0, FoodKind::Burger);

        let landing = resolve_food_collision(&mut food, &[], false);
        assert_eq!(landing, Some(Landing::Platform));
        assert!((food.pos.x - (left + food.width() / 2.0)).abs() < 0.001);
    }

    #[test]
    fn test_platform_miss_when_no_horizontal_overlap() {
        // Past the platform line but way off to the side
        let mut food = food_at(100.0, PLATFORM_Y + 2.0, FoodKind::Burger);

        assert_eq!(resolve_food_collision(&mut food, &[], false), None);
    }

    #[test]
    fn test_stack_requires_half_overlap() {
        let tower = [piece_at(400.0, 550.0, FoodKind::Burger)]; // 40 wide, top at 537.5
        let top = tower[0].top();

        // 10px overlap on a 40/40 pair: below the 20px (50%) requirement
        let mut food = food_at(430.0, top + 10.0, FoodKind::Burger);
        assert_eq!(resolve_food_collision(&mut food, &tower, false), None);

        // 25px overlap clears it
        let mut food = food_at(415.0, top + 10.0, FoodKind::Burger);
        assert_eq!(
            resolve_food_collision(&mut food, &tower, false),
            Some(Landing::Stacked { piece: 0 })
        );
        assert!((food.pos.y - (top - food.height() / 2.0)).abs() < 0.001);
    }

    #[test]
    fn test_rapid_fire_loosens_overlap_and_centers() {
        let tower = [piece_at(400.0, 550.0, FoodKind::Burger)];
        let top = tower[0].top();

        // 15px overlap: below the 50% requirement, above the 30% one
        let mut food = food_at(425.0, top + 10.0, FoodKind::Burger);
        assert_eq!(resolve_food_collision(&mut food.clone(), &tower, false), None);
        assert_eq!(
            resolve_food_collision(&mut food, &tower, true),
            Some(Landing::Stacked { piece: 0 })
        );
        // Centering assist pulled it halfway toward x=400
        assert!((food.pos.x - 412.5).abs() < 0.001);
    }

    #[test]
    fn test_stack_offset_clamped_without_rapid_fire() {
        let tower = [piece_at(400.0, 550.0, FoodKind::Burger)];
        let top = tower[0].top();

        // Lands with a 19px offset; max allowed offset is (40+25)/3
        let mut food = food_at(419.0, top + 3.0, FoodKind::Donut);
        let landing = resolve_food_collision(&mut food, &tower, false);
        assert_eq!(landing, Some(Landing::Stacked { piece: 0 }));

        let max_offset = (tower[0].width() + food.width()) / 3.0;
        assert!((food.pos.x - 400.0).abs() <= max_offset + 0.001);
    }

    #[test]
    fn test_no_landing_above_tolerance_band() {
        let tower = [piece_at(400.0, 550.0, FoodKind::Burger)];

        // Perfectly aligned but still falling well above the piece
        let mut food = food_at(400.0, 400.0, FoodKind::Burger);
        assert_eq!(resolve_food_collision(&mut food, &tower, false), None);
    }

    #[test]
    fn test_topmost_piece_checked_first() {
        // Two stacked pieces; an item in both tolerance bands lands on the
        // most recently added (higher) one
        let lower = piece_at(400.0, 550.0, FoodKind::Burger);
        let upper = piece_at(400.0, 525.0, FoodKind::Burger);
        let tower = [lower, upper];

        let mut food = food_at(400.0, tower[1].top() + 10.0, FoodKind::Burger);
        assert_eq!(
            resolve_food_collision(&mut food, &tower, false),
            Some(Landing::Stacked { piece: 1 })
        );
    }
}
