//! Easing catalog.
//!
//! Every function maps normalized progress `t` in [0,1] onto [0,1]. Back,
//! elastic and bounce curves overshoot inside the interval but still start at
//! 0 and end at 1. Declaration order is the stable integer index hosts use.

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TracksError;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u32)]
pub enum Functions {
    #[default]
    EaseLinear,
    EaseStep,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    EaseInQuart,
    EaseOutQuart,
    EaseInOutQuart,
    EaseInQuint,
    EaseOutQuint,
    EaseInOutQuint,
    EaseInSine,
    EaseOutSine,
    EaseInOutSine,
    EaseInCirc,
    EaseOutCirc,
    EaseInOutCirc,
    EaseInExpo,
    EaseOutExpo,
    EaseInOutExpo,
    EaseInElastic,
    EaseOutElastic,
    EaseInOutElastic,
    EaseInBack,
    EaseOutBack,
    EaseInOutBack,
    EaseInBounce,
    EaseOutBounce,
    EaseInOutBounce,
}

use Functions::*;

const BACK_C1: f32 = 1.70158;
const BACK_C2: f32 = BACK_C1 * 1.525;
const BACK_C3: f32 = BACK_C1 + 1.0;
const ELASTIC_C4: f32 = (2.0 * PI) / 3.0;
const ELASTIC_C5: f32 = (2.0 * PI) / 4.5;

impl Functions {
    pub const ALL: [Functions; 32] = [
        EaseLinear,
        EaseStep,
        EaseInQuad,
        EaseOutQuad,
        EaseInOutQuad,
        EaseInCubic,
        EaseOutCubic,
        EaseInOutCubic,
        EaseInQuart,
        EaseOutQuart,
        EaseInOutQuart,
        EaseInQuint,
        EaseOutQuint,
        EaseInOutQuint,
        EaseInSine,
        EaseOutSine,
        EaseInOutSine,
        EaseInCirc,
        EaseOutCirc,
        EaseInOutCirc,
        EaseInExpo,
        EaseOutExpo,
        EaseInOutExpo,
        EaseInElastic,
        EaseOutElastic,
        EaseInOutElastic,
        EaseInBack,
        EaseOutBack,
        EaseInOutBack,
        EaseInBounce,
        EaseOutBounce,
        EaseInOutBounce,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Lookup by integer index. Out-of-range indices fall back to linear.
    pub fn from_index(index: i32) -> Functions {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .unwrap_or(EaseLinear)
    }

    #[inline]
    pub fn index(self) -> i32 {
        self as i32
    }

    /// Authoring name, e.g. `"easeInOutQuad"`.
    pub fn name(self) -> &'static str {
        match self {
            EaseLinear => "easeLinear",
            EaseStep => "easeStep",
            EaseInQuad => "easeInQuad",
            EaseOutQuad => "easeOutQuad",
            EaseInOutQuad => "easeInOutQuad",
            EaseInCubic => "easeInCubic",
            EaseOutCubic => "easeOutCubic",
            EaseInOutCubic => "easeInOutCubic",
            EaseInQuart => "easeInQuart",
            EaseOutQuart => "easeOutQuart",
            EaseInOutQuart => "easeInOutQuart",
            EaseInQuint => "easeInQuint",
            EaseOutQuint => "easeOutQuint",
            EaseInOutQuint => "easeInOutQuint",
            EaseInSine => "easeInSine",
            EaseOutSine => "easeOutSine",
            EaseInOutSine => "easeInOutSine",
            EaseInCirc => "easeInCirc",
            EaseOutCirc => "easeOutCirc",
            EaseInOutCirc => "easeInOutCirc",
            EaseInExpo => "easeInExpo",
            EaseOutExpo => "easeOutExpo",
            EaseInOutExpo => "easeInOutExpo",
            EaseInElastic => "easeInElastic",
            EaseOutElastic => "easeOutElastic",
            EaseInOutElastic => "easeInOutElastic",
            EaseInBack => "easeInBack",
            EaseOutBack => "easeOutBack",
            EaseInOutBack => "easeInOutBack",
            EaseInBounce => "easeInBounce",
            EaseOutBounce => "easeOutBounce",
            EaseInOutBounce => "easeInOutBounce",
        }
    }

    /// Apply the easing to normalized progress `t`.
    pub fn interpolate(self, t: f32) -> f32 {
        match self {
            EaseLinear => t,
            EaseStep => {
                if t >= 1.0 {
                    1.0
                } else {
                    0.0
                }
            }
            EaseInQuad => t * t,
            EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            EaseInOutQuad => in_out_pow(t, 2),
            EaseInCubic => t.powi(3),
            EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            EaseInOutCubic => in_out_pow(t, 3),
            EaseInQuart => t.powi(4),
            EaseOutQuart => 1.0 - (1.0 - t).powi(4),
            EaseInOutQuart => in_out_pow(t, 4),
            EaseInQuint => t.powi(5),
            EaseOutQuint => 1.0 - (1.0 - t).powi(5),
            EaseInOutQuint => in_out_pow(t, 5),
            EaseInSine => 1.0 - (t * PI / 2.0).cos(),
            EaseOutSine => (t * PI / 2.0).sin(),
            EaseInOutSine => -((PI * t).cos() - 1.0) / 2.0,
            EaseInCirc => 1.0 - (1.0 - t * t).max(0.0).sqrt(),
            EaseOutCirc => (1.0 - (t - 1.0) * (t - 1.0)).max(0.0).sqrt(),
            EaseInOutCirc => {
                if t < 0.5 {
                    (1.0 - (1.0 - (2.0 * t).powi(2)).max(0.0).sqrt()) / 2.0
                } else {
                    ((1.0 - (-2.0 * t + 2.0).powi(2)).max(0.0).sqrt() + 1.0) / 2.0
                }
            }
            EaseInExpo => {
                if t <= 0.0 {
                    0.0
                } else {
                    2f32.powf(10.0 * t - 10.0)
                }
            }
            EaseOutExpo => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f32.powf(-10.0 * t)
                }
            }
            EaseInOutExpo => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else if t < 0.5 {
                    2f32.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2f32.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
            EaseInElastic => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else {
                    -(2f32.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * ELASTIC_C4).sin()
                }
            }
            EaseOutElastic => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else {
                    2f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * ELASTIC_C4).sin() + 1.0
                }
            }
            EaseInOutElastic => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else if t < 0.5 {
                    -(2f32.powf(20.0 * t - 10.0) * ((20.0 * t - 11.125) * ELASTIC_C5).sin()) / 2.0
                } else {
                    (2f32.powf(-20.0 * t + 10.0) * ((20.0 * t - 11.125) * ELASTIC_C5).sin()) / 2.0
                        + 1.0
                }
            }
            EaseInBack => BACK_C3 * t * t * t - BACK_C1 * t * t,
            EaseOutBack => {
                let u = t - 1.0;
                1.0 + BACK_C3 * u * u * u + BACK_C1 * u * u
            }
            EaseInOutBack => {
                if t < 0.5 {
                    let u = 2.0 * t;
                    (u * u * ((BACK_C2 + 1.0) * u - BACK_C2)) / 2.0
                } else {
                    let u = 2.0 * t - 2.0;
                    (u * u * ((BACK_C2 + 1.0) * u + BACK_C2) + 2.0) / 2.0
                }
            }
            EaseInBounce => 1.0 - bounce_out(1.0 - t),
            EaseOutBounce => bounce_out(t),
            EaseInOutBounce => {
                if t < 0.5 {
                    (1.0 - bounce_out(1.0 - 2.0 * t)) / 2.0
                } else {
                    (1.0 + bounce_out(2.0 * t - 1.0)) / 2.0
                }
            }
        }
    }
}

#[inline]
fn in_out_pow(t: f32, n: i32) -> f32 {
    if t < 0.5 {
        2f32.powi(n - 1) * t.powi(n)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(n) / 2.0
    }
}

fn bounce_out(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;
    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let u = t - 1.5 / D1;
        N1 * u * u + 0.75
    } else if t < 2.5 / D1 {
        let u = t - 2.25 / D1;
        N1 * u * u + 0.9375
    } else {
        let u = t - 2.625 / D1;
        N1 * u * u + 0.984375
    }
}

impl FromStr for Functions {
    type Err = TracksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.name() == s)
            .ok_or_else(|| TracksError::UnknownEasing { name: s.to_string() })
    }
}

impl fmt::Display for Functions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_follow_declaration_order() {
        for (i, f) in Functions::ALL.iter().enumerate() {
            assert_eq!(f.index(), i as i32);
            assert_eq!(Functions::from_index(i as i32), *f);
        }
    }

    #[test]
    fn serde_uses_authoring_names() {
        let s = serde_json::to_string(&Functions::EaseInOutBounce).unwrap();
        assert_eq!(s, "\"easeInOutBounce\"");
        let f: Functions = serde_json::from_str("\"easeOutBack\"").unwrap();
        assert_eq!(f, Functions::EaseOutBack);
    }
}
