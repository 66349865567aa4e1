use crate::config::GameConfig;
use crate::fruit::{Fruit, Kind};
use crate::geom::{Point, Rect};

/// What one collision pass did to the fruit list.
#[derive(Debug, Default, PartialEq)]
pub struct PassOutcome {
    /// Net score change.
    pub score: i32,
    /// Name and points of every fruit that was cut.
    pub cut: Vec<(&'static str, i32)>,
    /// Name and penalty of every fruit that fell out of play.
    pub missed: Vec<(&'static str, i32)>,
    pub bomb_touched: bool,
}

/// Raw hand positions plus this frame's trail samples.
#[derive(Clone, Copy, Debug)]
pub struct Knives<'a> {
    pub left_hand: Option<Point>,
    pub right_hand: Option<Point>,
    pub left: &'a [Point],
    pub right: &'a [Point],
}

impl Knives<'_> {
    fn touches(&self, rect: &Rect) -> bool {
        [self.left_hand, self.right_hand]
            .into_iter()
            .flatten()
            .any(|p| rect.contains(p))
    }
}

/// Runs every fruit through fall-out, bomb, cut and flight checks, in list
/// order. Stops at the first bomb touched; fruit after it are left as they
/// were.
pub fn run(fruits: &mut Vec<Fruit>, knives: &Knives<'_>, cfg: &GameConfig) -> PassOutcome {
    let mut out = PassOutcome::default();
    let screen = Rect::new(0.0, 0.0, cfg.width as f32, cfg.height as f32);
    let bottom = cfg.height as i32;
    let ceiling = cfg.ceiling();

    let mut i = 0;
    while i < fruits.len() {
        let fruit = &mut fruits[i];

        if fruit.y > bottom && !fruit.going_up {
            let penalty = fruit.points * 2;
            out.score -= penalty;
            out.missed.push((fruit.kind.name(), penalty));
            fruits.remove(i);
            continue;
        }

        match fruit.kind {
            Kind::Bomb => {
                if knives.touches(&fruit.rect()) {
                    out.bomb_touched = true;
                    break;
                }
            }
            Kind::Regular(archetype) => {
                let top_left = Point::new(fruit.x as f32, fruit.y as f32);
                if screen.contains(top_left)
                    && (fruit.hit_by(knives.left) || fruit.hit_by(knives.right))
                {
                    out.score += fruit.points;
                    out.cut.push((archetype.name, fruit.points));
                    fruits.remove(i);
                    continue;
                }
            }
            Kind::Start | Kind::Defeat => {}
        }

        fruit.fly(ceiling);
        i += 1;
    }
    out
}
