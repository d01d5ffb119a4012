//! Stagger Effects
//!
//! Options and the three animations issued for every child.

use serde::{Deserialize, Serialize};

pub const DEFAULT_SELECTOR: &str = ":scope > *";
pub const DEFAULT_STEP_MS: f64 = 45.0;
pub const DEFAULT_DURATION_MS: f64 = 220.0;
pub const DEFAULT_EASING: &str = "cubic-bezier(.16,.84,.44,1)";

/// Extra fade time so opacity lands after the motion
const FADE_EXTRA_MS: f64 = 180.0;
const BOUNCE_DURATION_MS: f64 = 200.0;
const BOUNCE_GAP_MS: f64 = 1.0;
const BOUNCE_EASING: &str = "cubic-bezier(.2,.8,.2,1)";

/// Directive configuration; every field falls back to its default
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaggerOptions {
    pub selector: Option<String>,
    pub step: Option<f64>,
    pub duration: Option<f64>,
    pub easing: Option<String>,
}

impl StaggerOptions {
    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    #[cfg(test)]
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    #[cfg(test)]
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Fill defaults and floor timings at zero
    pub fn resolve(&self) -> ResolvedStagger {
        ResolvedStagger {
            selector: self.selector.clone().unwrap_or_else(|| DEFAULT_SELECTOR.to_string()),
            step: self.step.unwrap_or(DEFAULT_STEP_MS).max(0.0),
            duration: self.duration.unwrap_or(DEFAULT_DURATION_MS).max(0.0),
            easing: self.easing.clone().unwrap_or_else(|| DEFAULT_EASING.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStagger {
    pub selector: String,
    pub step: f64,
    pub duration: f64,
    pub easing: String,
}

impl ResolvedStagger {
    pub fn delay_for(&self, index: usize) -> f64 {
        index as f64 * self.step
    }

    /// Time until every animation of `count` children has ended
    pub fn settle_ms(&self, count: usize) -> f64 {
        if count == 0 {
            return 0.0;
        }
        let last = self.delay_for(count - 1);
        let fade_end = last + self.duration + FADE_EXTRA_MS;
        let bounce_end = last + self.duration + BOUNCE_GAP_MS + BOUNCE_DURATION_MS;
        fade_end.max(bounce_end)
    }
}

/// One keyframe; unset properties are omitted from the JS object
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Keyframe {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Fill {
    None,
    Both,
}

/// Mirrors `KeyframeAnimationOptions`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timing {
    pub duration: f64,
    pub delay: f64,
    pub easing: String,
    pub fill: Fill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    Settle,
    Fade,
    Bounce,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Effect {
    pub kind: EffectKind,
    pub keyframes: Vec<Keyframe>,
    pub timing: Timing,
}

/// Effects for the child at `index`, in issue order
pub fn plan_child(opts: &ResolvedStagger, index: usize) -> [Effect; 3] {
    let delay = opts.delay_for(index);
    let settle = Effect {
        kind: EffectKind::Settle,
        keyframes: vec![
            Keyframe {
                transform: Some("translateY(10px) scale(0.985)"),
                filter: Some("brightness(0.985)"),
                ..Keyframe::default()
            },
            Keyframe { transform: Some("none"), filter: Some("none"), ..Keyframe::default() },
        ],
        timing: Timing { duration: opts.duration, delay, easing: opts.easing.clone(), fill: Fill::Both },
    };
    let fade = Effect {
        kind: EffectKind::Fade,
        keyframes: vec![
            Keyframe { opacity: Some(0.0), ..Keyframe::default() },
            Keyframe { opacity: Some(1.0), ..Keyframe::default() },
        ],
        timing: Timing {
            duration: opts.duration + FADE_EXTRA_MS,
            delay,
            easing: opts.easing.clone(),
            fill: Fill::Both,
        },
    };
    let bounce = Effect {
        kind: EffectKind::Bounce,
        keyframes: vec![
            Keyframe { transform: Some("none"), ..Keyframe::default() },
            Keyframe { transform: Some("scale(1.007)"), ..Keyframe::default() },
            Keyframe { transform: Some("none"), ..Keyframe::default() },
        ],
        timing: Timing {
            duration: BOUNCE_DURATION_MS,
            delay: delay + opts.duration + BOUNCE_GAP_MS,
            easing: BOUNCE_EASING.to_string(),
            fill: Fill::None,
        },
    };
    [settle, fade, bounce]
}
