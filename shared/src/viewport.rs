use serde::{Deserialize, Serialize};

pub const MIN_SCALE: f64 = 0.3;
pub const MAX_SCALE: f64 = 3.0;
pub const WHEEL_ZOOM_IN: f64 = 1.1;
pub const WHEEL_ZOOM_OUT: f64 = 0.9;
pub const BUTTON_ZOOM_STEP: f64 = 0.1;

/// Pan/zoom transform from world pixels to screen pixels.
///
/// The render transform translates to `canvas_center + pan`, then scales.
/// `screen_to_world` is its exact inverse, so hover and paint always target
/// the cell drawn under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    #[serde(rename = "x")]
    pub pan_x: f64,
    #[serde(rename = "y")]
    pub pan_y: f64,
    pub scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            pan_x: 0.0,
            pan_y: 0.0,
            scale: 1.0,
        }
    }
}

impl Viewport {
    /// Convert world coordinates to screen coordinates.
    pub fn world_to_screen(&self, wx: f64, wy: f64, center: (f64, f64)) -> (f64, f64) {
        (
            wx * self.scale + center.0 + self.pan_x,
            wy * self.scale + center.1 + self.pan_y,
        )
    }

    /// Convert screen coordinates to world coordinates.
    pub fn screen_to_world(&self, sx: f64, sy: f64, center: (f64, f64)) -> (f64, f64) {
        (
            (sx - center.0 - self.pan_x) / self.scale,
            (sy - center.1 - self.pan_y) / self.scale,
        )
    }

    /// Pan by screen-space delta.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Multiply the scale by `factor`.
    pub fn zoom_by(&mut self, factor: f64) {
        self.set_scale(self.scale * factor);
    }

    /// Add `delta` to the scale (toolbar zoom buttons).
    pub fn zoom_step(&mut self, delta: f64) {
        self.set_scale(self.scale + delta);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Same viewport with the scale forced into range. Used for values coming
    /// back from storage.
    pub fn clamped(mut self) -> Self {
        self.set_scale(self.scale);
        self
    }

    fn set_scale(&mut self, scale: f64) {
        self.scale = if scale.is_nan() {
            1.0
        } else {
            scale.clamp(MIN_SCALE, MAX_SCALE)
        };
    }
}

/// Multiplicative zoom factor for a modifier + wheel event.
pub fn zoom_for_wheel(delta_y: f64) -> f64 {
    if delta_y > 0.0 {
        WHEEL_ZOOM_OUT
    } else {
        WHEEL_ZOOM_IN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_close(actual: f64, expected: f64) {
        let diff = (actual - expected).abs();
        assert!(
            diff < 1e-9,
            "expected {expected}, got {actual} (diff: {diff})"
        );
    }

    #[test]
    fn screen_to_world_matches_render_transform() {
        let vp = Viewport {
            pan_x: 40.0,
            pan_y: -25.0,
            scale: 2.0,
        };
        let (wx, wy) = vp.screen_to_world(540.0, 375.0, (400.0, 300.0));
        assert_close(wx, 50.0);
        assert_close(wy, 50.0);
    }

    #[test]
    fn zoom_is_clamped_both_ways() {
        let mut vp = Viewport::default();
        for _ in 0..50 {
            vp.zoom_by(WHEEL_ZOOM_IN);
        }
        assert_eq!(vp.scale, MAX_SCALE);
        for _ in 0..50 {
            vp.zoom_step(-BUTTON_ZOOM_STEP);
        }
        assert_eq!(vp.scale, MIN_SCALE);
    }

    #[test]
    fn reset_restores_identity() {
        let mut vp = Viewport::default();
        vp.pan(120.0, -3.0);
        vp.zoom_by(2.5);
        vp.reset();
        assert_eq!(vp, Viewport::default());
    }

    #[test]
    fn pan_is_unconstrained() {
        let mut vp = Viewport::default();
        vp.pan(1e9, -1e9);
        assert_eq!((vp.pan_x, vp.pan_y), (1e9, -1e9));
    }

    #[test]
    fn wheel_direction_picks_factor() {
        assert_eq!(zoom_for_wheel(120.0), WHEEL_ZOOM_OUT);
        assert_eq!(zoom_for_wheel(-120.0), WHEEL_ZOOM_IN);
    }

    #[test]
    fn clamped_repairs_stored_scale() {
        let stored = Viewport {
            pan_x: 1.0,
            pan_y: 2.0,
            scale: 9.0,
        };
        assert_eq!(stored.clamped().scale, MAX_SCALE);
        let nan = Viewport {
            scale: f64::NAN,
            ..Viewport::default()
        };
        assert_eq!(nan.clamped().scale, 1.0);
    }

    #[test]
    fn serializes_with_short_pan_names() {
        let json = serde_json::to_value(Viewport::default()).unwrap();
        assert_eq!(json, serde_json::json!({ "x": 0.0, "y": 0.0, "scale": 1.0 }));
    }

    proptest! {
        #[test]
        fn any_zoom_sequence_stays_in_range(
            ops in proptest::collection::vec((any::<bool>(), -5.0f64..5.0), 0..64),
        ) {
            let mut vp = Viewport::default();
            for (multiplicative, amount) in ops {
                if multiplicative {
                    vp.zoom_by(amount.abs());
                } else {
                    vp.zoom_step(amount);
                }
                prop_assert!((MIN_SCALE..=MAX_SCALE).contains(&vp.scale));
            }
        }

        #[test]
        fn screen_world_round_trip(
            pan_x in -5_000.0f64..5_000.0,
            pan_y in -5_000.0f64..5_000.0,
            scale in MIN_SCALE..=MAX_SCALE,
            wx in -10_000.0f64..10_000.0,
            wy in -10_000.0f64..10_000.0,
        ) {
            let vp = Viewport { pan_x, pan_y, scale };
            let center = (640.0, 360.0);
            let (sx, sy) = vp.world_to_screen(wx, wy, center);
            let (bx, by) = vp.screen_to_world(sx, sy, center);
            prop_assert!((bx - wx).abs() < 1e-6);
            prop_assert!((by - wy).abs() < 1e-6);
        }
    }
}
