use crate::collision::{self, Knives};
use crate::config::GameConfig;
use crate::fruit::{Fruit, Kind};
use crate::pose::PoseFrame;
use crate::spawner::{ROUND_SIZE, Spawner};
use crate::sprite::SpriteKind;
use crate::trail::TrailTracker;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LossCause {
    /// A hand touched a bomb.
    Bomb,
    /// Out of points with nothing left to cut.
    Bankrupt,
}

#[derive(Debug)]
pub enum Phase {
    /// Waiting for the start object to be cut with both hands.
    Intro { start: Fruit, since: Instant },
    /// Between rounds.
    Cooldown { since: Instant },
    RoundActive,
    /// Waiting for the defeat object to be cut with both hands.
    Lost {
        defeat: Fruit,
        cause: LossCause,
        since: Instant,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    GameStarted,
    RoundStarted { level: u32, count: usize },
    FruitCut { name: &'static str, points: i32 },
    FruitMissed { name: &'static str, penalty: i32 },
    BombTouched,
    RoundCleared { level: u32 },
    Lost(LossCause),
    Restarted,
    Won,
}

const FADE_STEP: u8 = 5;
const FADE_MAX: u8 = 200;
/// Degrees per frame for the start and defeat objects.
const IDLE_SPIN: i32 = 2;

pub struct Session {
    cfg: GameConfig,
    phase: Phase,
    level: u32,
    score: i32,
    fruits: Vec<Fruit>,
    trails: TrailTracker,
    pose: PoseFrame,
    fade: u8,
    won: bool,
    spawner: Spawner,
    rng: StdRng,
}

impl Session {
    pub fn new(cfg: GameConfig, seed: Option<u64>, now: Instant) -> anyhow::Result<Self> {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let mut session = Self {
            phase: Phase::Cooldown { since: now },
            level: 0,
            score: 0,
            fruits: Vec::new(),
            trails: TrailTracker::default(),
            pose: PoseFrame::undetected(),
            fade: 0,
            won: false,
            spawner: Spawner::new()?,
            rng,
            cfg,
        };
        let start = session.start_object();
        session.phase = Phase::Intro { start, since: now };
        Ok(session)
    }

    pub fn config(&self) -> &GameConfig {
        &self.cfg
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn fruits(&self) -> &[Fruit] {
        &self.fruits
    }

    pub fn trails(&self) -> &TrailTracker {
        &self.trails
    }

    /// The last pose frame fed to `step`.
    pub fn pose(&self) -> &PoseFrame {
        &self.pose
    }

    /// Alpha of the white loss fade.
    pub fn fade(&self) -> u8 {
        self.fade
    }

    pub fn won(&self) -> bool {
        self.won
    }

    /// Whether the start object has been cut at least once.
    pub fn started(&self) -> bool {
        !matches!(self.phase, Phase::Intro { .. })
    }

    /// Advances the game by one frame.
    pub fn step(&mut self, frame: &PoseFrame, now: Instant) -> Vec<GameEvent> {
        let mut events = Vec::new();
        self.pose = *frame;

        if self.bankrupt() && matches!(self.phase, Phase::RoundActive | Phase::Cooldown { .. }) {
            self.lose(LossCause::Bankrupt, now, &mut events);
        }

        if let Phase::Cooldown { since } = self.phase {
            if self.fruits.is_empty() && now.duration_since(since) > self.cfg.round_cooldown {
                self.start_round(&mut events);
            }
        }

        // Only points younger than the lifetime may cut anything this frame.
        self.trails.record(frame.left, frame.right, now);
        self.trails
            .refresh(now, self.cfg.trail_lifetime, self.cfg.knife_width());

        let lost = matches!(self.phase, Phase::Lost { .. });
        if frame.detected && !lost {
            self.cut_pass(frame, now, &mut events);
        }

        self.advance_phase(now, &mut events);

        if !self.won && (self.level >= self.cfg.win_level || self.score > self.cfg.win_score) {
            info!("won at level {} with {} points", self.level, self.score);
            self.won = true;
            events.push(GameEvent::Won);
        }
        events
    }

    fn bankrupt(&self) -> bool {
        self.fruits.is_empty() && self.level >= self.cfg.bankrupt_level && self.score < 0
    }

    fn start_round(&mut self, events: &mut Vec<GameEvent>) {
        self.level += 1;
        let count = self.rng.gen_range(ROUND_SIZE);
        self.spawner
            .spawn(count, self.level, &self.cfg, &mut self.rng, &mut self.fruits);
        info!("level {} begins with {count} fruit", self.level);
        self.phase = Phase::RoundActive;
        events.push(GameEvent::RoundStarted {
            level: self.level,
            count,
        });
    }

    fn cut_pass(&mut self, frame: &PoseFrame, now: Instant, events: &mut Vec<GameEvent>) {
        let knives = Knives {
            left_hand: frame.left,
            right_hand: frame.right,
            left: self.trails.left.samples(),
            right: self.trails.right.samples(),
        };
        let outcome = collision::run(&mut self.fruits, &knives, &self.cfg);
        self.score += outcome.score;

        for (name, points) in outcome.cut {
            debug!("cut {name} for {points}");
            events.push(GameEvent::FruitCut { name, points });
        }
        for (name, penalty) in outcome.missed {
            debug!("missed {name}, lost {penalty}");
            events.push(GameEvent::FruitMissed { name, penalty });
        }
        if outcome.bomb_touched {
            events.push(GameEvent::BombTouched);
            self.lose(LossCause::Bomb, now, events);
        }
    }

    fn advance_phase(&mut self, now: Instant, events: &mut Vec<GameEvent>) {
        let cooldown = self.cfg.round_cooldown;

        match &mut self.phase {
            Phase::Intro { start, since } => {
                let cut = now.duration_since(*since) >= cooldown
                    && start.cut_by_both(self.trails.left.samples(), self.trails.right.samples());
                start.spin(IDLE_SPIN);
                if cut {
                    info!("game started");
                    self.phase = Phase::Cooldown { since: now };
                    events.push(GameEvent::GameStarted);
                }
            }
            Phase::RoundActive => {
                if self.fruits.is_empty() {
                    if self.bankrupt() {
                        self.lose(LossCause::Bankrupt, now, events);
                    } else {
                        info!("level {} done", self.level);
                        self.phase = Phase::Cooldown { since: now };
                        events.push(GameEvent::RoundCleared { level: self.level });
                    }
                }
            }
            Phase::Cooldown { .. } => {}
            Phase::Lost { .. } => {}
        }

        // Also covers a loss entered earlier in this same frame.
        if let Phase::Lost { defeat, since, .. } = &mut self.phase {
            for fruit in &mut self.fruits {
                fruit.velocity = 0;
            }
            self.fade = self.fade.saturating_add(FADE_STEP).min(FADE_MAX);

            let cut = now.duration_since(*since) >= cooldown
                && defeat.cut_by_both(self.trails.left.samples(), self.trails.right.samples());
            defeat.spin(IDLE_SPIN);
            if cut {
                self.restart(now);
                events.push(GameEvent::Restarted);
            }
        }
    }

    fn lose(&mut self, cause: LossCause, now: Instant, events: &mut Vec<GameEvent>) {
        info!("lost ({cause:?}) at level {} with {} points", self.level, self.score);
        let defeat = self.defeat_object();
        self.phase = Phase::Lost {
            defeat,
            cause,
            since: now,
        };
        events.push(GameEvent::Lost(cause));
    }

    fn restart(&mut self, now: Instant) {
        info!("starting a new game");
        self.fruits.clear();
        self.trails.clear();
        self.level = 0;
        self.score = 0;
        self.fade = 0;
        self.phase = Phase::Cooldown { since: now };
    }

    fn start_object(&mut self) -> Fruit {
        let w = self.cfg.ratio(320.0);
        let h = self.cfg.ratio(400.0);
        let x = self.cfg.width as i32 / 2 - w / 2;
        let y = self.cfg.height as i32 / 2 - h / 2;
        let sprite = self.spawner.sprites().get(SpriteKind::Watermelon, w as u32, h as u32);
        Fruit::new(Kind::Start, sprite, x, y, 0, 0)
    }

    fn defeat_object(&mut self) -> Fruit {
        let side = self.cfg.ratio(300.0);
        let x = self.cfg.width as i32 / 2 - side / 2;
        let y = self.cfg.height as i32 * 3 / 4 - side / 2;
        let sprite = self.spawner.sprites().get(SpriteKind::Defeat, side as u32, side as u32);
        Fruit::new(Kind::Defeat, sprite, x, y, 0, 0)
    }
}
