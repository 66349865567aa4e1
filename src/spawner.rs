use crate::config::GameConfig;
use crate::fruit::{ARCHETYPES, Archetype, Fruit, Kind};
use crate::sprite::SpriteBook;
use anyhow::Context;
use log::debug;
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};

/// Fruit per round, inclusive.
pub const ROUND_SIZE: std::ops::RangeInclusive<usize> = 2..=5;

pub struct Spawner {
    without_bombs: WeightedIndex<f64>,
    with_bombs: WeightedIndex<f64>,
    sprites: SpriteBook,
}

impl Spawner {
    pub fn new() -> anyhow::Result<Self> {
        let weights = |bombs: bool| {
            ARCHETYPES
                .iter()
                .map(move |a| if a.is_bomb() && !bombs { 0.0 } else { a.weight })
        };
        Ok(Self {
            without_bombs: WeightedIndex::new(weights(false))
                .context("archetype table has no spawnable fruit")?,
            with_bombs: WeightedIndex::new(weights(true))
                .context("archetype table has no spawnable fruit")?,
            sprites: SpriteBook::default(),
        })
    }

    pub fn sprites(&mut self) -> &mut SpriteBook {
        &mut self.sprites
    }

    /// Picks an archetype; bombs stay out until `level` reaches the unlock level.
    pub fn choose(&self, level: u32, cfg: &GameConfig, rng: &mut impl Rng) -> &'static Archetype {
        let table = if level < cfg.bomb_unlock_level {
            &self.without_bombs
        } else {
            &self.with_bombs
        };
        &ARCHETYPES[table.sample(rng)]
    }

    /// Adds `count` fruit below the bottom edge, ready to be thrown up.
    pub fn spawn(
        &mut self,
        count: usize,
        level: u32,
        cfg: &GameConfig,
        rng: &mut impl Rng,
        fruits: &mut Vec<Fruit>,
    ) {
        for _ in 0..count {
            let archetype = self.choose(level, cfg, rng);
            let w = cfg.ratio(archetype.size.0 as f32).max(1);
            let h = cfg.ratio(archetype.size.1 as f32).max(1);
            let velocity =
                (cfg.ratio(archetype.velocity) as f32 * rng.gen_range(1.0f32..1.5)).round() as i32;

            let width = cfg.width as i32;
            let height = cfg.height as i32;
            let x = rng.gen_range(0..=(width - w).max(0));
            let y = rng.gen_range(height..height * 3);

            debug!("spawning {} at ({x}, {y}) moving {velocity}px/frame", archetype.name);
            let sprite = self.sprites.get(archetype.sprite, w as u32, h as u32);
            fruits.push(Fruit::new(
                Kind::of(archetype),
                sprite,
                x,
                y,
                velocity,
                archetype.points,
            ));
        }
    }
}
