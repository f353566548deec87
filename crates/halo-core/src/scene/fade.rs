//! Animated enable/disable transitions.
//!
//! A [`Fade`] is a timed state machine driven by the scene clock: the
//! transition runs over a fixed duration divided into a fixed number of
//! discrete steps, independent of the frame cadence. Starting a new fade
//! for a node supersedes any running one, so there is never more than one
//! transition acting on a node's alpha/blur.

/// Transition duration in seconds
pub const FADE_DURATION: f64 = 0.28;
/// Number of discrete interpolation steps per transition
pub const FADE_STEPS: u32 = 14;
/// Locally-forced blur applied to a fully faded-out node
pub const FADE_OUT_BLUR: f32 = 8.0;

/// State sampled from a running fade at a given clock time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeSample {
    /// Animated alpha at this time
    pub alpha: f32,
    /// Animated locally-forced blur at this time
    pub blur: f32,
    /// Value the node's enabled flag must take, if any.
    ///
    /// Enabling snaps the flag to `true` on every step so the node is
    /// interactive while fading in; disabling flips it to `false` only
    /// once the transition completes.
    pub enabled: Option<bool>,
    /// Whether the transition has run to completion
    pub done: bool,
}

/// In-flight visibility transition for a single node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    target: bool,
    started_at: f64,
    from_alpha: f32,
    to_alpha: f32,
    from_blur: f32,
    to_blur: f32,
}

impl Fade {
    /// Start a transition toward `target` from the node's current state
    pub fn start(target: bool, now: f64, from_alpha: f32, from_blur: f32) -> Self {
        let (to_alpha, to_blur) = if target {
            (1.0, 0.0)
        } else {
            (0.0, FADE_OUT_BLUR)
        };
        Self {
            target,
            started_at: now,
            from_alpha,
            to_alpha,
            from_blur,
            to_blur,
        }
    }

    /// Final enabled value this transition is heading toward
    pub fn target(&self) -> bool {
        self.target
    }

    /// Sample the transition at clock time `now`.
    ///
    /// The terminal sample always carries the exact target alpha/blur, so
    /// a node can never be left stuck mid-transition.
    pub fn sample(&self, now: f64) -> FadeSample {
        let elapsed = (now - self.started_at).max(0.0);
        let step = ((elapsed / FADE_DURATION) * FADE_STEPS as f64).floor() as u32;
        let step = step.min(FADE_STEPS);
        let done = step >= FADE_STEPS;

        let (alpha, blur) = if done {
            // the terminal state is applied exactly, not via interpolation
            (self.to_alpha, self.to_blur)
        } else {
            let t = step as f32 / FADE_STEPS as f32;
            // ease-in toward visible, ease-out toward hidden
            let eased = if self.target {
                t * t
            } else {
                1.0 - (1.0 - t) * (1.0 - t)
            };
            (
                self.from_alpha + (self.to_alpha - self.from_alpha) * eased,
                self.from_blur + (self.to_blur - self.from_blur) * eased,
            )
        };
        let enabled = if self.target {
            Some(true)
        } else if done {
            Some(false)
        } else {
            None
        };

        FadeSample {
            alpha,
            blur,
            enabled,
            done,
        }
    }
}
