use crate::geom::{Point, Rect};
use crate::sprite::{Sprite, SpriteKind};
use std::rc::Rc;

// ── Archetypes ──────────────────────────────────────────────────────────────

/// A template for spawned objects. Velocity and size are in reference-layout
/// units and get scaled to the canvas when a fruit is made.
#[derive(Debug, PartialEq)]
pub struct Archetype {
    pub name: &'static str,
    pub sprite: SpriteKind,
    pub points: i32,
    pub velocity: f32,
    pub weight: f64,
    pub size: (u32, u32),
}

pub const BOMB: Archetype = Archetype {
    name: "bomb",
    sprite: SpriteKind::Bomb,
    points: 0,
    velocity: 35.0,
    weight: 1.0 / 7.0,
    size: (200, 200),
};

pub static ARCHETYPES: [Archetype; 5] = [
    BOMB,
    Archetype {
        name: "orange",
        sprite: SpriteKind::Orange,
        points: 2,
        velocity: 60.0,
        weight: 1.0 / 3.0,
        size: (200, 200),
    },
    Archetype {
        name: "kiwi",
        sprite: SpriteKind::Kiwi,
        points: 2,
        velocity: 60.0,
        weight: 1.0 / 3.0,
        size: (200, 160),
    },
    Archetype {
        name: "pineapple",
        sprite: SpriteKind::Pineapple,
        points: 3,
        velocity: 40.0,
        weight: 1.0 / 6.0,
        size: (250, 500),
    },
    Archetype {
        name: "watermelon",
        sprite: SpriteKind::Watermelon,
        points: 4,
        velocity: 40.0,
        weight: 1.0 / 8.0,
        size: (240, 300),
    },
];

impl Archetype {
    pub fn is_bomb(&self) -> bool {
        self.sprite == SpriteKind::Bomb
    }
}

// ── Objects ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Kind {
    /// Cut with both hands to begin.
    Start,
    /// Cut with both hands to play again after losing.
    Defeat,
    Regular(&'static Archetype),
    Bomb,
}

impl Kind {
    pub fn of(archetype: &'static Archetype) -> Kind {
        if archetype.is_bomb() {
            Kind::Bomb
        } else {
            Kind::Regular(archetype)
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Kind::Start => "start",
            Kind::Defeat => "defeat",
            Kind::Regular(a) => a.name,
            Kind::Bomb => BOMB.name,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Fruit {
    pub kind: Kind,
    /// Top-left of the unrotated box.
    pub x: i32,
    pub y: i32,
    /// Degrees, kept in 0..360.
    pub rotation: i32,
    /// Pixels per frame; positive moves up while `going_up`.
    pub velocity: i32,
    pub going_up: bool,
    pub points: i32,
    sprite: Rc<Sprite>,
}

impl Fruit {
    pub fn new(kind: Kind, sprite: Rc<Sprite>, x: i32, y: i32, velocity: i32, points: i32) -> Self {
        Self {
            kind,
            x,
            y,
            rotation: 0,
            velocity,
            going_up: true,
            points,
            sprite,
        }
    }

    pub fn width(&self) -> u32 {
        self.sprite.width() as u32
    }

    pub fn height(&self) -> u32 {
        self.sprite.height() as u32
    }

    /// Longest side.
    pub fn length(&self) -> u32 {
        self.width().max(self.height())
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.x as f32 + self.width() as f32 / 2.0,
            self.y as f32 + self.height() as f32 / 2.0,
        )
    }

    /// Axis-aligned bounds of the sprite as currently rotated.
    pub fn rect(&self) -> Rect {
        Rect::rotated_bounds(
            self.center(),
            self.width() as f32,
            self.height() as f32,
            self.rotation as f32,
        )
    }

    pub fn spin(&mut self, degrees: i32) {
        self.rotation = (self.rotation + degrees).rem_euclid(360);
    }

    /// Whether any of `samples` lands on an opaque pixel of the sprite.
    pub fn hit_by(&self, samples: &[Point]) -> bool {
        let rect = self.rect();
        let center = self.center();
        samples.iter().any(|&p| {
            rect.contains(p) && self.sprite.is_opaque(center, self.rotation as f32, p)
        })
    }

    /// Radius of the ring that start and defeat objects are cut through.
    pub fn hit_radius(&self) -> f32 {
        (self.length() as f32 * 0.65).round()
    }

    /// Two-handed cut: each hand needs a sample inside the hit radius.
    pub fn cut_by_both(&self, left: &[Point], right: &[Point]) -> bool {
        let center = self.center();
        let radius = self.hit_radius();
        let within = |p: &Point| p.distance(center) <= radius;
        left.iter().any(within) && right.iter().any(within)
    }

    /// One frame of flight. Returns `true` if the fruit turned at the apex.
    pub fn fly(&mut self, ceiling: f32) -> bool {
        if self.going_up && self.center().y <= ceiling {
            self.going_up = false;
            self.velocity = -self.velocity;
            return true;
        }
        self.y -= self.velocity;
        self.spin((self.velocity as f32 / 3.0).round().abs() as i32);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orange_at(x: i32, y: i32, velocity: i32) -> Fruit {
        let sprite = Rc::new(Sprite::paint(SpriteKind::Orange, 100, 100));
        Fruit::new(Kind::of(&ARCHETYPES[1]), sprite, x, y, velocity, 2)
    }

    #[test]
    fn bomb_archetype_maps_to_bomb_kind() {
        assert_eq!(Kind::of(&ARCHETYPES[0]), Kind::Bomb);
        assert_eq!(Kind::of(&ARCHETYPES[3]).name(), "pineapple");
    }

    #[test]
    fn instances_own_their_motion() {
        let mut a = orange_at(0, 500, 20);
        let b = a.clone();
        a.fly(0.0);
        a.spin(400);
        assert_eq!(b.y, 500);
        assert_eq!(b.rotation, 0);
        assert_eq!(a.y, 480);
    }

    #[test]
    fn rotation_wraps() {
        let mut f = orange_at(0, 0, 0);
        f.spin(350);
        f.spin(20);
        assert_eq!(f.rotation, 10);
    }

    #[test]
    fn turns_exactly_at_the_ceiling() {
        // Center is 50 below the top-left corner.
        let mut f = orange_at(0, 131, 30);
        assert!(!f.fly(180.0));
        assert_eq!(f.y, 101);
        assert!(f.going_up);
        // 101 + 50 = 151 <= 180, so now it turns without moving.
        assert!(f.fly(180.0));
        assert_eq!(f.y, 101);
        assert_eq!(f.velocity, -30);
        // Falling from here on.
        assert!(!f.fly(180.0));
        assert_eq!(f.y, 131);
    }

    #[test]
    fn turns_with_center_on_the_ceiling() {
        let mut f = orange_at(0, 130, 30);
        assert!(f.fly(180.0));
        assert_eq!((f.y, f.velocity, f.going_up), (130, -30, false));
        assert!(!f.fly(180.0));
    }

    #[test]
    fn transparent_corner_is_not_a_hit() {
        let mut f = orange_at(100, 100, 0);
        f.spin(45);
        let rect = f.rect();
        let corner = Point::new(rect.x + 1.0, rect.y + 1.0);
        assert!(rect.contains(corner));
        assert!(!f.hit_by(&[corner]));
        assert!(f.hit_by(&[corner, f.center()]));
    }

    #[test]
    fn both_hands_are_needed() {
        let f = orange_at(0, 0, 0);
        let inside = [f.center()];
        let outside = [Point::new(1000.0, 1000.0)];
        assert!(!f.cut_by_both(&inside, &outside));
        assert!(!f.cut_by_both(&outside, &inside));
        assert!(!f.cut_by_both(&inside, &[]));
        assert!(f.cut_by_both(&inside, &inside));
    }
}
