/// Default upper bound for a single frame step, in seconds.
///
/// A backgrounded tab can deliver a multi-second gap between animation
/// callbacks; integrating that in one step tunnels the ball through walls.
pub const DEFAULT_MAX_FRAME_DT: f32 = 0.1;

/// Clamp a raw frame delta to `[0, max_dt]`. Non-finite input yields 0.
pub fn clamp_dt(dt: f32, max_dt: f32) -> f32 {
    if !dt.is_finite() || dt <= 0.0 {
        return 0.0;
    }
    dt.min(max_dt)
}

/// Converts successive monotonic timestamps (milliseconds, as delivered by an
/// animation-frame callback) into clamped frame deltas in seconds.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    /// Record a timestamp and return the clamped delta since the previous one.
    /// The first call returns 0.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        // A clock that steps backwards must not rewind our reference point.
        if self.last_ms.is_none_or(|last| now_ms >= last) {
            self.last_ms = Some(now_ms);
        }
        let clamped = clamp_dt(dt, self.max_dt);
        if clamped < dt {
            tracing::trace!(raw_dt = dt, clamped, "Frame delta clamped");
        }
        clamped
    }

    /// Forget the previous timestamp (e.g. after the host was suspended).
    pub fn reset(&mut self) {
        self.last_ms = None;
    }

    pub fn max_dt(&self) -> f32 {
        self.max_dt
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FRAME_DT)
    }
}
