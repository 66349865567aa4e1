use crate::geom::{Point, rotate_around};
use crate::pixel::Rgb;
use std::collections::HashMap;
use std::rc::Rc;

// ── Palette ─────────────────────────────────────────────────────────────────

const ORANGE: Rgb = Rgb(250, 150, 30);
const ORANGE_DARK: Rgb = Rgb(205, 105, 15);
const KIWI_SKIN: Rgb = Rgb(140, 100, 55);
const KIWI_FLESH: Rgb = Rgb(150, 200, 60);
const KIWI_SEED: Rgb = Rgb(25, 25, 20);
const PINE_BODY: Rgb = Rgb(235, 190, 50);
const PINE_GRID: Rgb = Rgb(180, 130, 30);
const LEAF: Rgb = Rgb(60, 150, 50);
const LEAF_DARK: Rgb = Rgb(35, 105, 35);
const MELON: Rgb = Rgb(70, 160, 60);
const MELON_STRIPE: Rgb = Rgb(30, 95, 35);
const BOMB_BODY: Rgb = Rgb(40, 40, 48);
const BOMB_HI: Rgb = Rgb(110, 110, 125);
const FUSE: Rgb = Rgb(150, 110, 60);
const SPARK: Rgb = Rgb(255, 220, 60);
const PLATE: Rgb = Rgb(200, 200, 205);
const PLATE_RIM: Rgb = Rgb(150, 150, 160);
const CROSS: Rgb = Rgb(220, 40, 40);
const HIGHLIGHT: Rgb = Rgb(255, 255, 230);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    Orange,
    Kiwi,
    Pineapple,
    Watermelon,
    Bomb,
    Defeat,
}

/// A painted image whose transparent pixels are `None`. The same buffer
/// serves as the picture and as the alpha mask for precise hit tests.
#[derive(Debug)]
pub struct Sprite {
    w: usize,
    h: usize,
    px: Vec<Option<Rgb>>,
}

impl Sprite {
    pub fn paint(kind: SpriteKind, w: u32, h: u32) -> Self {
        let (w, h) = (w.max(1) as usize, h.max(1) as usize);
        let mut px = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                // Normalized coordinates, -1..1 across the box.
                let u = (x as f32 + 0.5) / w as f32 * 2.0 - 1.0;
                let v = (y as f32 + 0.5) / h as f32 * 2.0 - 1.0;
                px.push(shade(kind, u, v));
            }
        }
        Self { w, h, px }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    /// Color at sprite-local coordinates, `None` if transparent or outside.
    pub fn at(&self, x: f32, y: f32) -> Option<Rgb> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let (xi, yi) = (x as usize, y as usize);
        if xi >= self.w || yi >= self.h {
            return None;
        }
        self.px[yi * self.w + xi]
    }

    /// Color seen at canvas point `p` when the sprite is drawn centered on
    /// `center` and rotated by `degrees`.
    pub fn sample(&self, center: Point, degrees: f32, p: Point) -> Option<Rgb> {
        let local = rotate_around(p, center, -degrees);
        self.at(
            local.x - center.x + self.w as f32 / 2.0,
            local.y - center.y + self.h as f32 / 2.0,
        )
    }

    pub fn is_opaque(&self, center: Point, degrees: f32, p: Point) -> bool {
        self.sample(center, degrees, p).is_some()
    }
}

fn shade(kind: SpriteKind, u: f32, v: f32) -> Option<Rgb> {
    let r = u.hypot(v);
    match kind {
        SpriteKind::Orange => {
            if u.abs() < 0.12 && v < -0.78 {
                return Some(LEAF);
            }
            if r > 0.92 {
                return None;
            }
            if (u + 0.35).hypot(v + 0.35) < 0.18 {
                return Some(HIGHLIGHT);
            }
            Some(Rgb::lerp(ORANGE, ORANGE_DARK, (r * 256.0) as u16))
        }
        SpriteKind::Kiwi => {
            if r > 0.95 {
                return None;
            }
            if r > 0.82 {
                return Some(KIWI_SKIN);
            }
            // Ring of seeds around the pale core.
            let angle = v.atan2(u);
            if (0.35..0.5).contains(&r) && (angle * 6.0).sin() > 0.6 {
                return Some(KIWI_SEED);
            }
            if r < 0.2 {
                return Some(HIGHLIGHT);
            }
            Some(KIWI_FLESH)
        }
        SpriteKind::Pineapple => {
            // Crown: a triangle of leaves on the top third.
            if v < -0.3 {
                let half = (v + 1.0) / 0.7 * 0.45;
                if u.abs() < half {
                    let stripe = ((u * 10.0).sin() > 0.0) as u16;
                    return Some(Rgb::lerp(LEAF, LEAF_DARK, stripe * 256));
                }
                return None;
            }
            let bv = (v - 0.35) / 0.65;
            if u.hypot(bv) > 0.95 {
                return None;
            }
            let grid = ((u * 5.0 + v * 5.0).rem_euclid(1.0) < 0.15)
                || ((u * 5.0 - v * 5.0).rem_euclid(1.0) < 0.15);
            Some(if grid { PINE_GRID } else { PINE_BODY })
        }
        SpriteKind::Watermelon => {
            if r > 0.95 {
                return None;
            }
            if (u + 0.4).hypot(v + 0.4) < 0.12 {
                return Some(HIGHLIGHT);
            }
            Some(if (u * 7.0).sin() > 0.35 { MELON_STRIPE } else { MELON })
        }
        SpriteKind::Bomb => {
            if u.hypot(v + 0.9) < 0.12 {
                return Some(SPARK);
            }
            if u.abs() < 0.07 && (-0.9..-0.6).contains(&v) {
                return Some(FUSE);
            }
            let body = u.hypot(v - 0.15);
            if body > 0.8 {
                return None;
            }
            if (u + 0.3).hypot(v + 0.1) < 0.15 {
                return Some(BOMB_HI);
            }
            Some(BOMB_BODY)
        }
        SpriteKind::Defeat => {
            if r > 0.95 {
                return None;
            }
            if r < 0.65 && ((u - v).abs() < 0.16 || (u + v).abs() < 0.16) {
                return Some(CROSS);
            }
            Some(if r > 0.8 { PLATE_RIM } else { PLATE })
        }
    }
}

/// Painted sprites shared between every object of the same kind and size.
#[derive(Default)]
pub struct SpriteBook {
    painted: HashMap<(SpriteKind, u32, u32), Rc<Sprite>>,
}

impl SpriteBook {
    pub fn get(&mut self, kind: SpriteKind, w: u32, h: u32) -> Rc<Sprite> {
        self.painted
            .entry((kind, w, h))
            .or_insert_with(|| Rc::new(Sprite::paint(kind, w, h)))
            .clone()
    }
}
