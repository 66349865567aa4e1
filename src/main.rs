use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute, terminal,
};
use log::{debug, info, warn};
use std::fs::File;
use std::io::{self, stdout};
use std::path::Path;
use std::time::{Duration, Instant};
use swipe_ninja::config::{Args, GameConfig};
use swipe_ninja::pixel::PixelBuf;
use swipe_ninja::pose::{PoseSource, SimulatedPose};
use swipe_ninja::render;
use swipe_ninja::session::{GameEvent, Session};
use swipe_ninja::sound::{Effect, Sound};

fn init_logging(path: Option<&Path>) -> anyhow::Result<()> {
    // The terminal is the canvas, so logs only ever go to a file.
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn open_sound(mute: bool) -> Option<Sound> {
    if mute {
        return None;
    }
    match Sound::open() {
        Ok(sound) => Some(sound),
        Err(e) => {
            warn!("running without sound: {e:#}");
            None
        }
    }
}

fn play(sound: Option<&Sound>, effect: Effect) {
    if let Some(sound) = sound {
        if let Err(e) = sound.play(effect) {
            warn!("could not play {effect:?}: {e:#}");
        }
    }
}

fn run(out: &mut io::Stdout, args: &Args) -> anyhow::Result<()> {
    let cfg = GameConfig::from_args(args)?;
    let frame_dur = cfg.frame_duration();
    let sound = open_sound(args.mute);

    let (cols, rows) = terminal::size()?;
    let mut buf = PixelBuf::new(cols as usize, rows as usize * 2);
    let mut pose = SimulatedPose::new(cfg.width, cfg.height, cols, rows);
    let mut session = Session::new(cfg, args.seed, Instant::now())?;
    let mut fps = 0.0;

    loop {
        let frame_start = Instant::now();

        // Input
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => {
                    if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                        info!("quit requested");
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => pose.handle_mouse(&mouse),
                Event::Resize(c, r) => {
                    buf.resize(c as usize, r as usize * 2);
                    pose.resize(c, r);
                }
                _ => {}
            }
        }

        // Update
        match pose.capture() {
            Ok(frame) => {
                for ev in session.step(&frame, Instant::now()) {
                    match ev {
                        GameEvent::BombTouched => play(sound.as_ref(), Effect::Bomb),
                        GameEvent::FruitCut { .. } => play(sound.as_ref(), Effect::Slice),
                        GameEvent::RoundStarted { .. } => play(sound.as_ref(), Effect::Round),
                        _ => {}
                    }
                }

                // Render
                render::draw(&session, &mut buf, fps);
                buf.render(out)?;
            }
            Err(e) => debug!("skipping frame: {e:#}"),
        }

        // Frame pacing
        let elapsed = frame_start.elapsed();
        if elapsed < frame_dur {
            std::thread::sleep(frame_dur - elapsed);
        }
        fps = 1.0 / frame_start.elapsed().as_secs_f32().max(f32::EPSILON);
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;
    info!("starting at {}px wide, {} fps", args.width, args.fps);

    terminal::enable_raw_mode()?;
    let mut out = stdout();
    execute!(
        out,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::DisableLineWrap,
        EnableMouseCapture,
    )?;

    let cleanup = |out: &mut io::Stdout| -> io::Result<()> {
        execute!(
            out,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        )?;
        terminal::disable_raw_mode()
    };

    let result = run(&mut out, &args);
    cleanup(&mut out)?;
    result
}
