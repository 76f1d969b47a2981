/*
 * Stroke feature encoders (rust version)
 *
 * Converts raw pointer strokes into the fixed-length feature vectors
 * expected by the nearest-neighbour, random-forest and SVM gesture models.
 *
 * This software is distributed under the "New BSD License" agreement:
 *
 * Copyright (c) 2024, the stroke-features contributors. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without
 * modification, are permitted provided that the following conditions are met:
 *    * Redistributions of source code must retain the above copyright
 *      notice, this list of conditions and the following disclaimer.
 *    * Redistributions in binary form must reproduce the above copyright
 *      notice, this list of conditions and the following disclaimer in the
 *      documentation and/or other materials provided with the distribution.
 *    * Neither the names of the copyright holders nor the names of its
 *      contributors may be used to endorse or promote products derived from
 *      this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS
 * IS" AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO,
 * THE IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR
 * PURPOSE ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDERS OR
 * CONTRIBUTORS BE LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL,
 * EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT
 * OF SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
 * INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT,
 * STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY
 * OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF
 * SUCH DAMAGE.
**/

//! Page effect driven by recognized gestures.
//!
//! A square makes the page fade to gray while scrolling, a triangle fades
//! and darkens it down to a full blackout, a circle restores the page.
//! This only tracks the levels; drawing them is up to the host.

use crate::label::GestureLabel;
use tracing::debug;

/// Grayscale added per scroll event in fade mode
pub const FADE_GRAYSCALE_STEP: f64 = 0.45;
/// Grayscale added per scroll event in darken mode
pub const DARKEN_GRAYSCALE_STEP: f64 = 0.9;
/// Darkness added per scroll event in darken mode
pub const DARKEN_DARKNESS_STEP: f64 = 0.3;

const MAX_LEVEL: f64 = 100.0;
/// Levels are reported every time they round to a multiple of this
const NOTICE_INTERVAL: i64 = 20;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScrollMode {
    #[default]
    Idle,
    /// Scrolling increases grayscale
    Fade,
    /// Scrolling increases grayscale and darkness
    Darken,
}

/// Progress report worth surfacing to the user
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectNotice {
    Grayscale(i64),
    Darkness(i64),
    Blackout,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisualEffect {
    grayscale: f64,
    darkness: f64,
    mode: ScrollMode,
    blackout: bool,
}

impl VisualEffect {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grayscale level in percent
    pub fn grayscale(&self) -> f64 {
        self.grayscale
    }

    /// Darkness level in percent
    pub fn darkness(&self) -> f64 {
        self.darkness
    }

    pub fn brightness(&self) -> f64 {
        (MAX_LEVEL - self.darkness).max(0.0)
    }

    pub fn mode(&self) -> ScrollMode {
        self.mode
    }

    /// True once darken mode reached full darkness
    pub fn blackout(&self) -> bool {
        self.blackout
    }

    /// Reacts to a prediction. Any prediction stops the current scroll mode
    /// and lifts a blackout; grayscale accumulates until a circle resets it.
    pub fn apply(&mut self, label: &GestureLabel) {
        self.mode = ScrollMode::Idle;
        self.blackout = false;
        match label {
            GestureLabel::Square => self.mode = ScrollMode::Fade,
            GestureLabel::Triangle => {
                self.darkness = 0.0;
                self.mode = ScrollMode::Darken;
            }
            GestureLabel::Circle => {
                self.grayscale = 0.0;
                self.darkness = 0.0;
            }
            GestureLabel::Unknown(label) => debug!(%label, "unknown prediction, no effect applied"),
        }
    }

    /// Advances the active mode by one scroll event
    pub fn on_scroll(&mut self) -> Vec<EffectNotice> {
        let mut notices = Vec::new();
        match self.mode {
            ScrollMode::Idle => {}
            ScrollMode::Fade => {
                self.grayscale = (self.grayscale + FADE_GRAYSCALE_STEP).min(MAX_LEVEL);
                if let Some(level) = milestone(self.grayscale, true) {
                    notices.push(EffectNotice::Grayscale(level));
                }
                if self.grayscale >= MAX_LEVEL {
                    self.mode = ScrollMode::Idle;
                }
            }
            ScrollMode::Darken => {
                self.grayscale = (self.grayscale + DARKEN_GRAYSCALE_STEP).min(MAX_LEVEL);
                self.darkness = (self.darkness + DARKEN_DARKNESS_STEP).min(MAX_LEVEL);
                if let Some(level) = milestone(self.grayscale, false) {
                    notices.push(EffectNotice::Grayscale(level));
                }
                if let Some(level) = milestone(self.darkness, false) {
                    notices.push(EffectNotice::Darkness(level));
                }
                if self.darkness >= MAX_LEVEL {
                    self.mode = ScrollMode::Idle;
                    self.blackout = true;
                    notices.push(EffectNotice::Blackout);
                }
            }
        }
        notices
    }

    /// CSS `filter` value for the page root.
    /// Darkness stays on the page after darken mode ends.
    pub fn css_filter(&self) -> String {
        if self.mode == ScrollMode::Darken || self.darkness > 0.0 {
            format!("grayscale({}%) brightness({}%)", self.grayscale, self.brightness())
        } else if self.mode == ScrollMode::Fade || self.grayscale > 0.0 {
            format!("grayscale({}%)", self.grayscale)
        } else {
            String::new()
        }
    }
}

fn milestone(level: f64, include_max: bool) -> Option<i64> {
    let rounded = level.round() as i64;
    let in_range = level > 0.0 && (include_max || level < MAX_LEVEL);
    (in_range && rounded % NOTICE_INTERVAL == 0).then_some(rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scroll(effect: &mut VisualEffect, times: usize) -> Vec<EffectNotice> {
        (0..times).flat_map(|_| effect.on_scroll()).collect()
    }

    #[test]
    fn idle_effect_ignores_scrolling() {
        let mut effect = VisualEffect::new();
        assert!(scroll(&mut effect, 10).is_empty());
        assert_eq!(effect.grayscale(), 0.0);
        assert_eq!(effect.css_filter(), "");
    }

    #[test]
    fn square_fades_until_fully_gray() {
        let mut effect = VisualEffect::new();
        effect.apply(&GestureLabel::Square);
        let notices = scroll(&mut effect, 300);
        assert_eq!(effect.grayscale(), 100.0);
        assert_eq!(effect.mode(), ScrollMode::Idle);
        assert!(notices.contains(&EffectNotice::Grayscale(20)));
        assert!(notices.contains(&EffectNotice::Grayscale(100)));
        assert_eq!(effect.css_filter(), "grayscale(100%)");
    }

    #[test]
    fn triangle_darkens_to_blackout() {
        let mut effect = VisualEffect::new();
        effect.apply(&GestureLabel::Triangle);
        let notices = scroll(&mut effect, 400);
        assert!(effect.blackout());
        assert_eq!(effect.darkness(), 100.0);
        assert_eq!(effect.brightness(), 0.0);
        assert_eq!(notices.last(), Some(&EffectNotice::Blackout));
        assert!(notices.contains(&EffectNotice::Darkness(20)));
        // no more progress once blacked out
        assert!(scroll(&mut effect, 5).is_empty());
    }

    #[test]
    fn triangle_keeps_grayscale_but_resets_darkness() {
        let mut effect = VisualEffect::new();
        effect.apply(&GestureLabel::Triangle);
        scroll(&mut effect, 10);
        let gray = effect.grayscale();
        effect.apply(&GestureLabel::Square);
        assert!(!effect.blackout());
        effect.apply(&GestureLabel::Triangle);
        assert_eq!(effect.grayscale(), gray);
        assert_eq!(effect.darkness(), 0.0);
        assert!(effect.css_filter().ends_with("brightness(100%)"));
    }

    #[test]
    fn circle_resets_everything() {
        let mut effect = VisualEffect::new();
        effect.apply(&GestureLabel::Triangle);
        scroll(&mut effect, 50);
        effect.apply(&GestureLabel::Circle);
        assert_eq!(effect, VisualEffect::new());
        assert_eq!(effect.css_filter(), "");
    }

    #[test]
    fn unknown_label_only_stops_scrolling() {
        let mut effect = VisualEffect::new();
        effect.apply(&GestureLabel::Square);
        scroll(&mut effect, 10);
        let gray = effect.grayscale();
        effect.apply(&GestureLabel::Unknown("star".into()));
        assert_eq!(effect.mode(), ScrollMode::Idle);
        scroll(&mut effect, 10);
        assert_eq!(effect.grayscale(), gray);
    }

    #[test]
    fn unknown_label_keeps_partial_darkness_on_screen() {
        let mut effect = VisualEffect::new();
        effect.apply(&GestureLabel::Triangle);
        scroll(&mut effect, 100);
        let before = effect.css_filter();
        effect.apply(&GestureLabel::Unknown("zigzag".into()));
        assert_eq!(effect.mode(), ScrollMode::Idle);
        assert!(effect.darkness() > 0.0);
        assert_eq!(effect.css_filter(), before);
        assert!(effect.css_filter().contains("brightness("));
    }

    #[test]
    fn blackout_renders_zero_brightness() {
        let mut effect = VisualEffect::new();
        effect.apply(&GestureLabel::Triangle);
        scroll(&mut effect, 400);
        assert!(effect.blackout());
        assert_eq!(effect.mode(), ScrollMode::Idle);
        assert_eq!(effect.css_filter(), "grayscale(100%) brightness(0%)");
    }
}
