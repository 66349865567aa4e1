use std::time::{Duration, Instant};
use swipe_ninja::config::GameConfig;
use swipe_ninja::geom::Point;
use swipe_ninja::pose::{PoseFrame, PoseSource, ScriptedPose};
use swipe_ninja::session::{GameEvent, Phase, Session};

const FRAME: Duration = Duration::from_millis(40);

/// Body in view, hands out of frame: fruit keep flying but nothing is cut.
const HANDS_HIDDEN: PoseFrame = PoseFrame {
    detected: true,
    left: None,
    right: None,
};

/// Both hands swipe left to right through the middle of the screen.
fn swipe(step: usize) -> PoseFrame {
    let x = 540.0 + step as f32 * 50.0;
    PoseFrame::hands(Point::new(x, 360.0), Point::new(1280.0 - x, 360.0))
}

/// Feeds `frames` to the session one tick apart, skipping dropped frames
/// the way the game loop does.
fn play(session: &mut Session, source: &mut impl PoseSource, t0: Instant, frames: usize) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for i in 0..frames {
        let Ok(frame) = source.capture() else {
            continue;
        };
        events.extend(session.step(&frame, t0 + FRAME * i as u32));
    }
    events
}

fn intro_script() -> Vec<Option<PoseFrame>> {
    let mut frames = vec![Some(PoseFrame::undetected()); 52];
    frames.extend((0..4).map(|i| Some(swipe(i))));
    frames
}

#[test]
fn start_needs_the_cooldown_to_pass() {
    let t0 = Instant::now();
    let mut session = Session::new(GameConfig::default(), Some(11), t0).unwrap();
    // Swiping right away does nothing.
    let mut source = ScriptedPose::new((0..4).map(|i| Some(swipe(i))));
    let events = play(&mut session, &mut source, t0, 4);
    assert!(events.is_empty());
    assert!(!session.started());
}

#[test]
fn swipe_through_the_start_object_begins_the_game() {
    let t0 = Instant::now();
    let mut session = Session::new(GameConfig::default(), Some(11), t0).unwrap();
    let mut source = ScriptedPose::new(intro_script());
    let events = play(&mut session, &mut source, t0, 56);
    assert_eq!(events, vec![GameEvent::GameStarted]);
    assert!(matches!(session.phase(), Phase::Cooldown { .. }));
    assert_eq!(session.level(), 0);
}

#[test]
fn dropped_frame_mid_swipe_is_skipped() {
    let t0 = Instant::now();
    let mut session = Session::new(GameConfig::default(), Some(11), t0).unwrap();
    let mut frames = vec![Some(PoseFrame::undetected()); 52];
    frames.extend([Some(swipe(0)), None, Some(swipe(2))]);
    let mut source = ScriptedPose::new(frames);
    let events = play(&mut session, &mut source, t0, 55);
    assert_eq!(events, vec![GameEvent::GameStarted]);
}

#[test]
fn an_untouched_round_costs_double_points() {
    let t0 = Instant::now();
    let mut session = Session::new(GameConfig::default(), Some(11), t0).unwrap();
    let mut source = ScriptedPose::new(intro_script());
    for _ in 0..600 {
        source.push(Some(HANDS_HIDDEN));
    }

    let mut events = Vec::new();
    for i in 0..656u32 {
        let frame = source.capture().unwrap();
        let step = session.step(&frame, t0 + FRAME * i);
        let cleared = step.contains(&GameEvent::RoundCleared { level: 1 });
        events.extend(step);
        if cleared {
            break;
        }
    }

    let spawned = events
        .iter()
        .find_map(|e| match e {
            GameEvent::RoundStarted { level: 1, count } => Some(*count),
            _ => None,
        })
        .expect("round one never started");
    let penalties: Vec<i32> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::FruitMissed { penalty, .. } => Some(*penalty),
            _ => None,
        })
        .collect();

    assert_eq!(penalties.len(), spawned);
    assert!(penalties.iter().all(|p| *p > 0));
    assert_eq!(session.score(), -penalties.iter().sum::<i32>());
    assert!(events.contains(&GameEvent::RoundCleared { level: 1 }));
    assert!(!events.iter().any(|e| matches!(e, GameEvent::FruitCut { .. } | GameEvent::BombTouched)));
    assert!(session.fruits().is_empty());
}

#[test]
fn same_seed_same_game() {
    let run = || {
        let t0 = Instant::now();
        let mut session = Session::new(GameConfig::default(), Some(99), t0).unwrap();
        let mut source = ScriptedPose::new(intro_script());
        for _ in 0..60 {
            source.push(Some(HANDS_HIDDEN));
        }
        // Round one is thrown at frame 104 and is still in the air here.
        play(&mut session, &mut source, t0, 110);
        session
            .fruits()
            .iter()
            .map(|f| (f.kind.name(), f.x, f.y, f.velocity))
            .collect::<Vec<_>>()
    };
    let first = run();
    assert!(!first.is_empty());
    assert_eq!(first, run());
}
