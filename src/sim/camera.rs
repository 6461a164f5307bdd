//! Horizontal scrolling camera
//!
//! The camera only ever scrolls forward while following the player, and
//! the player cannot walk back past the left edge of the view.

/// Largest valid camera offset for a level
pub fn max_scroll(level_width: f32, viewport_width: f32) -> f32 {
    (level_width - viewport_width).max(0.0)
}

/// Keep the player at least `margin` pixels right of the view's left edge
#[inline]
pub fn clamp_player_left(player_x: f32, camera_x: f32, margin: f32) -> f32 {
    player_x.max(camera_x + margin)
}

/// Advance the camera toward `player_x - offset`, never backwards
pub fn follow(
    camera_x: f32,
    player_x: f32,
    offset: f32,
    level_width: f32,
    viewport_width: f32,
) -> f32 {
    let target = player_x - offset;
    camera_x
        .max(target)
        .clamp(0.0, max_scroll(level_width, viewport_width))
}

/// World x to screen x
#[inline]
pub fn to_screen(world_x: f32, camera_x: f32) -> f32 {
    world_x - camera_x
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_follow_waits_for_offset() {
        assert_eq!(follow(0.0, 150.0, 200.0, 5000.0, 1000.0), 0.0);
        assert_eq!(follow(0.0, 350.0, 200.0, 5000.0, 1000.0), 150.0);
    }

    #[test]
    fn test_follow_never_retreats() {
        assert_eq!(follow(300.0, 250.0, 200.0, 5000.0, 1000.0), 300.0);
    }

    #[test]
    fn test_follow_clamps_to_level_end() {
        assert_eq!(follow(0.0, 4900.0, 200.0, 5000.0, 1000.0), 4000.0);
    }

    #[test]
    fn test_narrow_level_pins_camera() {
        assert_eq!(follow(0.0, 900.0, 200.0, 640.0, 1000.0), 0.0);
    }

    #[test]
    fn test_clamp_player_left() {
        assert_eq!(clamp_player_left(120.0, 100.0, 50.0), 150.0);
        assert_eq!(clamp_player_left(400.0, 100.0, 50.0), 400.0);
    }

    proptest! {
        #[test]
        fn prop_camera_monotonic_and_bounded(
            xs in prop::collection::vec(-500.0f32..8000.0, 1..64),
            level_width in 100.0f32..8000.0,
            viewport_width in 100.0f32..1500.0,
        ) {
            let mut camera = 0.0;
            for x in xs {
                let next = follow(camera, x, 200.0, level_width, viewport_width);
                prop_assert!(next >= camera);
                prop_assert!(next >= 0.0);
                prop_assert!(next <= max_scroll(level_width, viewport_width));
                camera = next;
            }
        }
    }
}
