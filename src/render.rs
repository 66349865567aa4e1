use crate::fruit::Fruit;
use crate::font::{draw_text, draw_text_centered, text_height, text_width};
use crate::geom::Point;
use crate::pixel::{GREEN, PixelBuf, Rgb, WHITE};
use crate::session::{LossCause, Phase, Session};
use crate::trail::Trail;

const BACKDROP_TOP: Rgb = Rgb(40, 28, 22);
const BACKDROP_BOT: Rgb = Rgb(105, 70, 45);
const PLANK: Rgb = Rgb(90, 60, 38);
const HAND: Rgb = Rgb(255, 235, 120);
const GOLD: Rgb = Rgb(255, 200, 40);
const PARTY_TOP: Rgb = Rgb(70, 20, 110);
const PARTY_BOT: Rgb = Rgb(200, 60, 120);
const CONFETTI: [Rgb; 4] = [GOLD, WHITE, Rgb(80, 220, 255), Rgb(255, 90, 90)];

/// Maps canvas units onto buffer pixels.
#[derive(Clone, Copy)]
struct View {
    sx: f32,
    sy: f32,
}

impl View {
    fn new(session: &Session, buf: &PixelBuf) -> Self {
        let cfg = session.config();
        Self {
            sx: buf.width() as f32 / cfg.width as f32,
            sy: buf.height() as f32 / cfg.height as f32,
        }
    }

    fn to_buf(self, p: Point) -> (i32, i32) {
        ((p.x * self.sx) as i32, (p.y * self.sy) as i32)
    }

    fn to_canvas(self, x: i32, y: i32) -> Point {
        Point::new((x as f32 + 0.5) / self.sx, (y as f32 + 0.5) / self.sy)
    }

    fn len(self, v: f32) -> i32 {
        (v * self.sx).round() as i32
    }
}

/// Draws one whole frame of the game.
pub fn draw(session: &Session, buf: &mut PixelBuf, fps: f32) {
    let view = View::new(session, buf);

    draw_backdrop(buf);
    for fruit in session.fruits() {
        draw_object(buf, view, fruit);
    }

    let knife = view.len(session.config().knife_width() / 2.0).max(0);
    draw_trail(buf, view, &session.trails().left, knife);
    draw_trail(buf, view, &session.trails().right, knife);
    draw_hands(buf, view, session);

    match session.phase() {
        Phase::Intro { start, .. } => draw_target(buf, view, start),
        Phase::Lost { defeat, cause, .. } => {
            buf.overlay(WHITE, session.fade());
            let msg = match cause {
                LossCause::Bomb => "BOOM!",
                LossCause::Bankrupt => "OUT OF POINTS",
            };
            let (cx, y) = (buf.width() as i32 / 2, buf.height() as i32 / 3);
            let scale = text_scale(buf) + 1;
            draw_text_centered(buf, cx, y, msg, scale, GREEN);
            draw_target(buf, view, defeat);
        }
        Phase::Cooldown { .. } | Phase::RoundActive => {}
    }

    draw_hud(buf, session, fps);

    if session.won() {
        draw_celebration(buf);
    }
}

fn text_scale(buf: &PixelBuf) -> i32 {
    (buf.height() as i32 / 60).max(1)
}

fn draw_backdrop(buf: &mut PixelBuf) {
    let (w, h) = (buf.width(), buf.height());
    for y in 0..h {
        let t = (y * 256 / h.max(1)) as u16;
        let c = Rgb::lerp(BACKDROP_TOP, BACKDROP_BOT, t);
        for x in 0..w {
            // Wooden planks every few rows.
            let seam = y % 12 == 0;
            buf.set(x as i32, y as i32, if seam { PLANK } else { c });
        }
    }
}

/// Samples the rotated sprite once per buffer pixel it covers.
fn draw_object(buf: &mut PixelBuf, view: View, fruit: &Fruit) {
    let rect = fruit.rect();
    let (x0, y0) = view.to_buf(Point::new(rect.x, rect.y));
    let (x1, y1) = view.to_buf(Point::new(rect.x + rect.w, rect.y + rect.h));
    let x0 = x0.max(0);
    let y0 = y0.max(0);
    let x1 = (x1 + 1).min(buf.width() as i32);
    let y1 = (y1 + 1).min(buf.height() as i32);

    let center = fruit.center();
    let rotation = fruit.rotation as f32;
    for by in y0..y1 {
        for bx in x0..x1 {
            if let Some(c) = fruit.sprite().sample(center, rotation, view.to_canvas(bx, by)) {
                buf.set(bx, by, c);
            }
        }
    }
}

/// A start or defeat object with the ring it has to be cut through.
fn draw_target(buf: &mut PixelBuf, view: View, fruit: &Fruit) {
    let (cx, cy) = view.to_buf(fruit.center());
    let thickness = view.len(fruit.length() as f32 / 15.0).max(1);
    buf.ring(cx, cy, view.len(fruit.hit_radius()), thickness, GREEN);
    draw_object(buf, view, fruit);
}

fn draw_trail(buf: &mut PixelBuf, view: View, trail: &Trail, r: i32) {
    let points: Vec<(i32, i32)> = trail.points().map(|p| view.to_buf(p.at)).collect();
    for w in points.windows(2) {
        let ((x0, y0), (x1, y1)) = (w[0], w[1]);
        buf.line(x0, y0, x1, y1, r, GREEN);
    }
}

fn draw_hands(buf: &mut PixelBuf, view: View, session: &Session) {
    let pose = session.pose();
    for hand in [pose.left, pose.right].into_iter().flatten() {
        let (x, y) = view.to_buf(hand);
        buf.disc(x, y, 1, HAND);
    }
}

fn draw_hud(buf: &mut PixelBuf, session: &Session, fps: f32) {
    let w = buf.width() as i32;
    let h = buf.height() as i32;
    let big = text_scale(buf);
    let pad = 2;

    let fps_text = format!("FPS {fps:.1}");
    draw_text(buf, pad, h - text_height(1) - pad, &fps_text, 1, GREEN);

    if session.started() {
        let left = format!("FRUIT {}", session.fruits().len());
        draw_text(buf, w - text_width(&left, 1) - pad, h - text_height(1) - pad, &left, 1, GREEN);

        let score = format!("SCORE {}", session.score());
        draw_text(buf, pad, pad, &score, big, WHITE);

        let level = format!("LEVEL {}", session.level());
        draw_text(buf, w - text_width(&level, big) - pad, pad, &level, big, WHITE);
    } else {
        let prompt = "CUT WITH BOTH HANDS TO BEGIN";
        draw_text_centered(buf, w / 2, h - text_height(big) - pad * 3, prompt, big, GREEN);
    }

    draw_text_centered(buf, w / 2, pad, "SWIPE NINJA", big, GREEN);
}

/// Covers everything for good once the game is won.
fn draw_celebration(buf: &mut PixelBuf) {
    let (w, h) = (buf.width(), buf.height());
    for y in 0..h {
        let t = (y * 256 / h.max(1)) as u16;
        let c = Rgb::lerp(PARTY_TOP, PARTY_BOT, t);
        for x in 0..w {
            let seed = (y * w + x) as u64;
            let r = pseudo_rand(seed);
            let px = if r < 0.03 {
                CONFETTI[(pseudo_rand(seed ^ 0x9e37) * 4.0) as usize % 4]
            } else {
                c
            };
            buf.set(x as i32, y as i32, px);
        }
    }

    let scale = text_scale(buf) + 1;
    let cx = w as i32 / 2;
    let cy = h as i32 / 2 - text_height(scale);
    draw_text_centered(buf, cx, cy, "YOU WIN!", scale, GOLD);
    draw_text_centered(buf, cx, cy + text_height(scale) * 2, "FRUIT MASTER", 1, WHITE);
}

fn pseudo_rand(seed: u64) -> f64 {
    let x = seed
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    let bits = (x >> 33) ^ x;
    (bits % 1000) as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::pose::PoseFrame;
    use std::time::{Duration, Instant};

    fn count(buf: &PixelBuf, c: Rgb) -> usize {
        (0..buf.height())
            .flat_map(|y| (0..buf.width()).map(move |x| (x, y)))
            .filter(|&(x, y)| buf.get(x, y) == c)
            .count()
    }

    #[test]
    fn intro_shows_the_start_ring() {
        let t0 = Instant::now();
        let session = Session::new(GameConfig::default(), Some(5), t0).unwrap();
        let mut buf = PixelBuf::new(160, 90);
        draw(&session, &mut buf, 25.0);
        assert!(count(&buf, GREEN) > 50);
    }

    #[test]
    fn trails_are_drawn_in_green() {
        let t0 = Instant::now();
        let mut session = Session::new(GameConfig::default(), Some(5), t0).unwrap();
        let mut plain = PixelBuf::new(160, 90);
        draw(&session, &mut plain, 25.0);

        let a = Point::new(100.0, 600.0);
        let b = Point::new(300.0, 600.0);
        session.step(&PoseFrame::hands(a, a), t0);
        session.step(&PoseFrame::hands(b, b), t0 + Duration::from_millis(40));
        let mut swiped = PixelBuf::new(160, 90);
        draw(&session, &mut swiped, 25.0);
        assert!(count(&swiped, GREEN) > count(&plain, GREEN));
    }

    #[test]
    fn winning_covers_the_whole_game() {
        let t0 = Instant::now();
        let cfg = GameConfig {
            win_score: -1,
            ..GameConfig::default()
        };
        let mut session = Session::new(cfg, Some(5), t0).unwrap();
        let mut before = PixelBuf::new(160, 90);
        draw(&session, &mut before, 25.0);
        assert!(count(&before, GREEN) > 0);
        assert!(count(&before, PLANK) > 0);

        session.step(&PoseFrame::undetected(), t0);
        assert!(session.won());
        let mut after = PixelBuf::new(160, 90);
        draw(&session, &mut after, 25.0);
        for c in [GREEN, PLANK, BACKDROP_TOP, BACKDROP_BOT, HAND] {
            assert_eq!(count(&after, c), 0, "{c:?} shows through");
        }
        assert!(count(&after, GOLD) > 0);
    }

    #[test]
    fn confetti_is_stable() {
        assert_eq!(pseudo_rand(42), pseudo_rand(42));
        assert!((0.0..1.0).contains(&pseudo_rand(7)));
    }
}
