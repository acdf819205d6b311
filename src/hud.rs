//! Status board: numeric overlay model
//!
//! Produces positioned text labels and the gravity arrow geometry in display
//! pixels. Fonts and drawing belong to the renderer.

use std::collections::BTreeMap;

use glam::Vec2;

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::RescueContainer;

/// Default label positions (display pixels)
pub const TOTAL_COUNT_POS: Vec2 = Vec2::new(SCREEN_WIDTH - 10.0, 10.0);
pub const SUGAR_LEFT_POS: Vec2 = Vec2::new(SCREEN_WIDTH - 10.0, 40.0);
pub const LEVEL_POS: Vec2 = Vec2::new(SCREEN_WIDTH / 2.0, 30.0);
pub const MESSAGE_POS: Vec2 = Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0);
pub const GRAVITY_LABEL_POS: Vec2 = Vec2::new(200.0, 30.0);
pub const GRAVITY_ARROW_START: Vec2 = Vec2::new(270.0, 30.0);

const ARROWHEAD_LENGTH: f32 = 10.0;
/// cos/sin of the 30° arrowhead half-angle
const ARROWHEAD_COS: f32 = 0.866;
const ARROWHEAD_SIN: f32 = 0.5;
const ARROW_COLOR: [u8; 3] = [255, 0, 0];

/// Which point of the text box `pos` refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopRight,
    Center,
}

/// A line of text for the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct HudLabel {
    pub text: String,
    pub pos: Vec2,
    pub anchor: Anchor,
    pub color: [u8; 3],
}

/// Count shown over a target bucket
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketReadout {
    pub count: u32,
    /// Label center in display pixels
    pub pos: Vec2,
    /// Exploded buckets are not labelled
    pub exploded: bool,
}

/// Gravity direction arrow: a shaft plus a triangular head
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityArrow {
    pub start: Vec2,
    pub end: Vec2,
    /// Head triangle: tip, left barb, right barb
    pub head: [Vec2; 3],
    pub color: [u8; 3],
}

#[derive(Debug, Clone)]
struct TimedMessage {
    text: String,
    remaining: f32,
}

/// Heads-up display state
#[derive(Debug, Clone)]
pub struct StatusBoard {
    color: [u8; 3],
    total_count: u32,
    buckets: BTreeMap<u32, BucketReadout>,
    sugar_left: u32,
    level_count: u32,
    message: Option<TimedMessage>,
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new([255, 255, 255])
    }
}

impl StatusBoard {
    pub fn new(color: [u8; 3]) -> Self {
        Self {
            color,
            total_count: 0,
            buckets: BTreeMap::new(),
            sugar_left: 0,
            level_count: 0,
            message: None,
        }
    }

    /// Refresh the displayed values
    pub fn update_values(
        &mut self,
        total_count: u32,
        buckets: BTreeMap<u32, BucketReadout>,
        sugar_left: u32,
        level_count: u32,
    ) {
        self.total_count = total_count;
        self.buckets = buckets;
        self.sugar_left = sugar_left;
        self.level_count = level_count;
    }

    /// Show a message for `duration` seconds of simulation time
    pub fn show_message(&mut self, text: impl Into<String>, duration: f32) {
        self.message = Some(TimedMessage {
            text: text.into(),
            remaining: duration,
        });
    }

    /// Advance message timers by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        if let Some(msg) = self.message.as_mut() {
            msg.remaining -= dt;
            if msg.remaining <= 0.0 {
                self.message = None;
            }
        }
    }

    pub fn active_message(&self) -> Option<&str> {
        self.message.as_ref().map(|m| m.text.as_str())
    }

    fn label(&self, text: String, pos: Vec2, anchor: Anchor) -> HudLabel {
        HudLabel {
            text,
            pos,
            anchor,
            color: self.color,
        }
    }

    pub fn total_count_label(&self, pos: Vec2) -> HudLabel {
        self.label(
            format!("Total Sugar: {}", self.total_count),
            pos,
            Anchor::TopRight,
        )
    }

    pub fn sugar_left_label(&self, pos: Vec2) -> HudLabel {
        self.label(
            format!("Sugar Left: {}", self.sugar_left),
            pos,
            Anchor::TopRight,
        )
    }

    pub fn level_label(&self, pos: Vec2) -> HudLabel {
        self.label(format!(" Level: {}", self.level_count), pos, Anchor::Center)
    }

    /// One centered count per bucket that has not exploded
    pub fn bucket_labels(&self) -> Vec<HudLabel> {
        self.buckets
            .values()
            .filter(|b| !b.exploded)
            .map(|b| self.label(b.count.to_string(), b.pos, Anchor::Center))
            .collect()
    }

    /// Count over the rescue container, hidden once it has exploded
    pub fn rescue_label(&self, rescue: &RescueContainer) -> Option<HudLabel> {
        if rescue.is_exploded() {
            return None;
        }
        Some(self.label(
            rescue.count().to_string(),
            rescue.display_position(),
            Anchor::Center,
        ))
    }

    pub fn message_label(&self, pos: Vec2) -> Option<HudLabel> {
        self.message
            .as_ref()
            .map(|m| self.label(m.text.clone(), pos, Anchor::Center))
    }

    pub fn gravity_label(&self) -> HudLabel {
        self.label("Gravity: ".to_string(), GRAVITY_LABEL_POS, Anchor::Center)
    }

    /// Arrow for a physics-space gravity vector, drawn from `start`
    ///
    /// The vertical axis is flipped into display space. Returns `None` for
    /// zero gravity since there is no direction to draw.
    pub fn gravity_arrow(&self, gravity: Vec2, start: Vec2) -> Option<GravityArrow> {
        let shaft = Vec2::new(gravity.x, -gravity.y);
        let dir = shaft.try_normalize()?;
        let end = start + shaft;

        let left = end
            - ARROWHEAD_LENGTH
                * Vec2::new(
                    dir.x * ARROWHEAD_SIN + dir.y * ARROWHEAD_COS,
                    dir.y * ARROWHEAD_SIN - dir.x * ARROWHEAD_COS,
                );
        let right = end
            - ARROWHEAD_LENGTH
                * Vec2::new(
                    dir.x * ARROWHEAD_SIN - dir.y * ARROWHEAD_COS,
                    dir.y * ARROWHEAD_SIN + dir.x * ARROWHEAD_COS,
                );

        Some(GravityArrow {
            start,
            end,
            head: [end, left, right],
            color: ARROW_COLOR,
        })
    }

    /// Every label for the current frame at the default layout
    pub fn frame_labels(&self, rescue: Option<&RescueContainer>) -> Vec<HudLabel> {
        let mut labels = vec![
            self.total_count_label(TOTAL_COUNT_POS),
            self.sugar_left_label(SUGAR_LEFT_POS),
            self.level_label(LEVEL_POS),
        ];
        labels.extend(self.bucket_labels());
        labels.extend(rescue.and_then(|r| self.rescue_label(r)));
        labels.extend(self.message_label(MESSAGE_POS));
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{PhysicsWorld, RescueConfig};

    #[test]
    fn test_counter_labels() {
        let mut board = StatusBoard::default();
        board.update_values(12, BTreeMap::new(), 88, 3);
        let total = board.total_count_label(TOTAL_COUNT_POS);
        assert_eq!(total.text, "Total Sugar: 12");
        assert_eq!(total.anchor, Anchor::TopRight);
        assert_eq!(board.sugar_left_label(SUGAR_LEFT_POS).text, "Sugar Left: 88");
        let level = board.level_label(LEVEL_POS);
        assert_eq!(level.text, " Level: 3");
        assert_eq!(level.anchor, Anchor::Center);
    }

    #[test]
    fn test_bucket_labels_skip_exploded() {
        let mut board = StatusBoard::default();
        let mut buckets = BTreeMap::new();
        buckets.insert(
            0,
            BucketReadout {
                count: 4,
                pos: Vec2::new(100.0, 600.0),
                exploded: false,
            },
        );
        buckets.insert(
            1,
            BucketReadout {
                count: 9,
                pos: Vec2::new(300.0, 600.0),
                exploded: true,
            },
        );
        board.update_values(13, buckets, 0, 1);

        let labels = board.bucket_labels();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].text, "4");
        assert_eq!(labels[0].pos, Vec2::new(100.0, 600.0));
    }

    #[test]
    fn test_rescue_label_follows_container() {
        let mut world = PhysicsWorld::new();
        let config = RescueConfig::new(Vec2::new(100.0, 100.0), 40.0, 40.0, 30);
        let mut rescue = RescueContainer::new(&mut world, config).unwrap();
        let grain = world.spawn_grain(rescue.center());
        rescue.collect(&mut world, grain);
        rescue.move_by(&mut world, 10.0, 0.0);

        let board = StatusBoard::default();
        let label = board.rescue_label(&rescue).unwrap();
        assert_eq!(label.text, "1");
        assert_eq!(label.pos, Vec2::new(110.0, 100.0));

        rescue.explode(&mut world, &[]);
        assert!(board.rescue_label(&rescue).is_none());
        assert_eq!(board.frame_labels(Some(&rescue)).len(), 3);
    }

    #[test]
    fn test_message_expires() {
        let mut board = StatusBoard::default();
        board.show_message("Rescue ready", 1.0);
        board.advance(0.5);
        assert_eq!(board.active_message(), Some("Rescue ready"));
        assert!(board.message_label(MESSAGE_POS).is_some());
        board.advance(0.6);
        assert_eq!(board.active_message(), None);
    }

    #[test]
    fn test_gravity_arrow_points_down_on_screen() {
        let board = StatusBoard::default();
        let arrow = board
            .gravity_arrow(Vec2::new(0.0, -20.0), GRAVITY_ARROW_START)
            .unwrap();
        assert_eq!(arrow.end, GRAVITY_ARROW_START + Vec2::new(0.0, 20.0));
        assert_eq!(arrow.head[0], arrow.end);
        // Barbs trail behind the tip, on either side of the shaft
        for barb in &arrow.head[1..] {
            assert!(barb.y < arrow.end.y);
        }
        assert!(arrow.head[1].x < arrow.end.x);
        assert!(arrow.head[2].x > arrow.end.x);

        assert!(board.gravity_arrow(Vec2::ZERO, GRAVITY_ARROW_START).is_none());
    }
}
