use anyhow::{Context, ensure};
use clap::Parser;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;

/// Width of the layout every size in the game was designed against.
pub const REFERENCE_WIDTH: f32 = 1920.0;

pub const WIDTH_RANGE: RangeInclusive<u32> = 320..=7680;

/// Longest cooldown or trail lifetime accepted, in seconds.
const MAX_SECONDS: f32 = 3600.0;

fn seconds(s: &str) -> Result<f32, String> {
    let v: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if v.is_finite() && (0.0..=MAX_SECONDS).contains(&v) {
        Ok(v)
    } else {
        Err(format!("expected seconds between 0 and {MAX_SECONDS}"))
    }
}

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Slice falling fruit with your hands, right in the terminal")]
pub struct Args {
    /// Canvas width in game pixels (height follows at 16:9)
    #[arg(long, default_value_t = 1280, value_parser = clap::value_parser!(u32).range(320..=7680))]
    pub width: u32,

    /// Target frames per second
    #[arg(long, default_value_t = 25, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Seconds between rounds, and before start/defeat objects can be cut
    #[arg(long, default_value_t = 2.0, value_parser = seconds)]
    pub cooldown: f32,

    /// Seconds a knife trail point stays alive
    #[arg(long, default_value_t = 0.25, value_parser = seconds)]
    pub trail_lifetime: f32,

    /// Seed for fruit spawning
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable sound
    #[arg(long)]
    pub mute: bool,

    /// Write logs to this file (the terminal itself is the canvas)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub round_cooldown: Duration,
    pub trail_lifetime: Duration,
    /// Fruit turn around once their center rises to this fraction of the height.
    pub ceiling_fraction: f32,
    pub bomb_unlock_level: u32,
    /// Lowest level at which a negative score with no fruit left loses.
    pub bankrupt_level: u32,
    pub win_level: u32,
    pub win_score: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::with_width(1280)
    }
}

impl GameConfig {
    pub fn with_width(width: u32) -> Self {
        Self {
            width,
            height: (width as f32 * 0.5625).round() as u32,
            fps: 25,
            round_cooldown: Duration::from_secs(2),
            trail_lifetime: Duration::from_millis(250),
            ceiling_fraction: 0.25,
            bomb_unlock_level: 5,
            bankrupt_level: 3,
            win_level: 42,
            win_score: 150,
        }
    }

    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        ensure!(
            WIDTH_RANGE.contains(&args.width),
            "width {} is outside {WIDTH_RANGE:?}",
            args.width
        );
        let round_cooldown = Duration::try_from_secs_f32(args.cooldown)
            .with_context(|| format!("bad cooldown {}", args.cooldown))?;
        let trail_lifetime = Duration::try_from_secs_f32(args.trail_lifetime)
            .with_context(|| format!("bad trail lifetime {}", args.trail_lifetime))?;
        Ok(Self {
            fps: args.fps.max(1),
            round_cooldown,
            trail_lifetime,
            ..Self::with_width(args.width)
        })
    }

    /// Scales a value from the 1920-wide reference layout to this canvas.
    pub fn ratio(&self, v: f32) -> i32 {
        (v * self.width as f32 / REFERENCE_WIDTH).round() as i32
    }

    pub fn knife_width(&self) -> f32 {
        self.ratio(10.0).max(1) as f32
    }

    pub fn ceiling(&self) -> f32 {
        self.height as f32 * self.ceiling_fraction
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_canvas_is_16_by_9() {
        let cfg = GameConfig::default();
        assert_eq!((cfg.width, cfg.height), (1280, 720));
        assert_eq!(cfg.ceiling(), 180.0);
    }

    #[test]
    fn ratio_scales_from_reference_layout() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.ratio(1920.0), 1280);
        assert_eq!(cfg.ratio(300.0), 200);
        assert_eq!(cfg.knife_width(), 7.0);
    }

    #[test]
    fn args_override_timings() {
        let args = Args::parse_from(["swipe-ninja", "--width", "1920", "--cooldown", "0.5"]);
        let cfg = GameConfig::from_args(&args).unwrap();
        assert_eq!(cfg.height, 1080);
        assert_eq!(cfg.round_cooldown, Duration::from_millis(500));
        assert_eq!(cfg.trail_lifetime, Duration::from_millis(250));
    }

    #[test]
    fn out_of_range_arguments_are_rejected() {
        for bad in [
            ["swipe-ninja", "--cooldown", "inf"],
            ["swipe-ninja", "--cooldown", "NaN"],
            ["swipe-ninja", "--trail-lifetime", "-1"],
            ["swipe-ninja", "--trail-lifetime", "1e30"],
            ["swipe-ninja", "--width", "100000"],
            ["swipe-ninja", "--width", "10"],
            ["swipe-ninja", "--fps", "0"],
        ] {
            assert!(Args::try_parse_from(bad).is_err(), "{bad:?} was accepted");
        }
    }

    #[test]
    fn hand_built_args_fail_without_panicking() {
        let mut args = Args::parse_from(["swipe-ninja"]);
        args.cooldown = f32::INFINITY;
        assert!(GameConfig::from_args(&args).is_err());

        let mut args = Args::parse_from(["swipe-ninja"]);
        args.width = u32::MAX;
        assert!(GameConfig::from_args(&args).is_err());

        let args = Args::parse_from(["swipe-ninja"]);
        assert_eq!(GameConfig::from_args(&args).unwrap().width, 1280);
    }
}
