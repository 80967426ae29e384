use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use anyhow::{bail, Result};

use super::{Engine, FrameStats};
use crate::backend::Backend;
use crate::color::Color;
use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::event::{KeyMap, RawEvent};
use crate::key::Key;
use crate::surface::PixelSurface;
use crate::timing::Clock;

const W: i32 = 'w' as i32;
const ESCAPE: i32 = 27;

fn key_down(code: i32) -> RawEvent {
    RawEvent::KeyDown {
        code,
        repeat: false,
    }
}

fn key_up(code: i32) -> RawEvent {
    RawEvent::KeyUp {
        code,
        repeat: false,
    }
}

/// Hands out one batch of events per frame and records presented surfaces.
struct ScriptedBackend {
    script: VecDeque<Vec<RawEvent>>,
    pending: VecDeque<RawEvent>,
    draining: bool,
    fail_presents: Vec<usize>,
    attempts: usize,
    presented: Rc<RefCell<Vec<PixelSurface>>>,
}

impl ScriptedBackend {
    fn new(script: Vec<Vec<RawEvent>>) -> Self {
        Self {
            script: script.into(),
            pending: VecDeque::new(),
            draining: false,
            fail_presents: Vec::new(),
            attempts: 0,
            presented: Rc::default(),
        }
    }

    fn failing_on(mut self, attempt: usize) -> Self {
        self.fail_presents.push(attempt);
        self
    }

    fn presented(&self) -> Rc<RefCell<Vec<PixelSurface>>> {
        self.presented.clone()
    }
}

impl Backend for ScriptedBackend {
    fn poll_event(&mut self) -> Option<RawEvent> {
        if !self.draining {
            self.draining = true;
            self.pending = self.script.pop_front().unwrap_or_default().into();
        }
        let event = self.pending.pop_front();
        if event.is_none() {
            self.draining = false;
        }
        event
    }

    fn key_map(&self) -> KeyMap {
        KeyMap::from_table(&[(W, Key::W), (ESCAPE, Key::Escape)])
    }

    fn present(&mut self, surface: &PixelSurface) -> Result<()> {
        let attempt = self.attempts;
        self.attempts += 1;
        if self.fail_presents.contains(&attempt) {
            bail!("texture upload failed");
        }
        self.presented.borrow_mut().push(surface.clone());
        Ok(())
    }
}

/// Time only moves when a test advances it or the engine sleeps.
#[derive(Clone, Default)]
struct ManualClock {
    now: Rc<Cell<u64>>,
    sleeps: Rc<RefCell<Vec<u64>>>,
}

impl ManualClock {
    fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&mut self) -> u64 {
        self.now.get()
    }

    fn sleep_ms(&mut self, ms: u64) {
        self.sleeps.borrow_mut().push(ms);
        self.advance(ms);
    }
}

fn config(width: u32, height: u32, fps: u32) -> EngineConfig {
    EngineConfig::builder()
        .title("test")
        .width(width)
        .height(height)
        .scale(4)
        .fps(fps)
        .build()
}

fn engine(backend: ScriptedBackend, clock: &ManualClock) -> Engine {
    Engine::with_clock(config(300, 200, 60), backend, clock.clone()).unwrap()
}

#[test]
fn rejects_invalid_config() {
    let result = Engine::new(config(300, 200, 0), ScriptedBackend::new(vec![]));
    assert_eq!(result.err(), Some(ConfigError::InvalidFps(0)));

    let result = Engine::new(config(0, 200, 60), ScriptedBackend::new(vec![]));
    assert_eq!(result.err(), Some(ConfigError::ZeroWidth));
}

#[test]
fn exposes_config() {
    let clock = ManualClock::default();
    let engine = engine(ScriptedBackend::new(vec![]), &clock);
    assert_eq!((engine.width(), engine.height()), (300, 200));
    assert_eq!(engine.scale(), 4);
    assert_eq!(engine.fps(), 60);
    assert_eq!(engine.interval_ms(), 16);
    assert_eq!(engine.title(), "test");
    assert_eq!(engine.config().window_size(), (1200, 800));
    assert!(!engine.is_running());
}

#[test]
fn overrun_skips_renders_but_never_updates() {
    let clock = ManualClock::default();
    let backend = ScriptedBackend::new(vec![vec![], vec![], vec![], vec![RawEvent::Quit]]);
    let presented = backend.presented();
    let mut engine = engine(backend, &clock);

    let updates = Cell::new(0u64);
    let mut rendered_on = Vec::new();
    let slow = clock.clone();
    let stats = engine.run(
        |_| updates.set(updates.get() + 1),
        |_| {
            if rendered_on.is_empty() {
                // 2.5 intervals of work in the first frame.
                slow.advance(40);
            }
            rendered_on.push(updates.get());
        },
    );

    assert_eq!(updates.get(), 4);
    assert_eq!(rendered_on, vec![1, 4]);
    assert_eq!(
        stats,
        FrameStats {
            frames: 4,
            rendered: 2,
            skipped: 2,
            present_failures: 0,
        }
    );
    assert_eq!(presented.borrow().len(), 2);
    assert_eq!(*clock.sleeps.borrow(), vec![8, 16, 16]);
    assert!(!engine.is_running());
}

#[test]
fn on_time_frames_sleep_out_the_interval() {
    let clock = ManualClock::default();
    let backend = ScriptedBackend::new(vec![vec![], vec![], vec![RawEvent::Quit]]);
    let mut engine = engine(backend, &clock);
    let busy = clock.clone();

    let stats = engine.run(|_| busy.advance(3), |_| busy.advance(2));

    assert_eq!(stats.frames, 3);
    assert_eq!(stats.rendered, 3);
    assert_eq!(stats.skipped, 0);
    assert_eq!(*clock.sleeps.borrow(), vec![11, 11]);
}

#[test]
fn rendered_pixel_reaches_the_backend() {
    let clock = ManualClock::default();
    let backend = ScriptedBackend::new(vec![vec![RawEvent::Quit]]);
    let presented = backend.presented();
    let mut engine = engine(backend, &clock);

    engine.run(|_| {}, |e| e.draw(10, 10, Color::new(255, 0, 0)));

    let presented = presented.borrow();
    assert_eq!(presented.len(), 1);
    let frame = &presented[0];
    assert_eq!(frame.pixel(10, 10), Some(Color::RED));
    for y in 0..200 {
        for x in 0..300 {
            if (x, y) != (10, 10) {
                assert_eq!(frame.pixel(x, y), Some(Color::BLACK), "({x}, {y})");
            }
        }
    }
}

#[test]
fn pixels_persist_between_frames() {
    let clock = ManualClock::default();
    let backend = ScriptedBackend::new(vec![vec![], vec![RawEvent::Quit]]);
    let presented = backend.presented();
    let mut engine = engine(backend, &clock);

    let mut frame = 0;
    engine.run(
        |_| {},
        |e| {
            frame += 1;
            e.draw(frame, frame, Color::GREEN);
            // Off-surface writes are dropped without stopping the loop.
            e.draw(-1, 500, Color::WHITE);
        },
    );

    let presented = presented.borrow();
    assert_eq!(presented.len(), 2);
    assert_eq!(presented[0].pixel(2, 2), Some(Color::BLACK));
    assert_eq!(presented[1].pixel(1, 1), Some(Color::GREEN));
    assert_eq!(presented[1].pixel(2, 2), Some(Color::GREEN));
}

#[test]
fn key_press_repeat_release() {
    let clock = ManualClock::default();
    let backend = ScriptedBackend::new(vec![
        vec![key_down(W)],
        vec![RawEvent::KeyDown {
            code: W,
            repeat: true,
        }],
        vec![key_up(W)],
        vec![RawEvent::Quit],
    ]);
    let mut engine = engine(backend, &clock);

    let mut seen = Vec::new();
    engine.run(|e| seen.push(e.input().is_pressed(Key::W)), |_| {});

    assert_eq!(seen, vec![true, true, false, false]);
}

#[test]
fn quit_finishes_the_current_frame_only() {
    let clock = ManualClock::default();
    let backend = ScriptedBackend::new(vec![
        vec![],
        vec![key_down(W), RawEvent::Quit, key_up(W)],
        vec![key_down(W)],
    ]);
    let presented = backend.presented();
    let mut engine = engine(backend, &clock);

    let mut updates = 0;
    let mut renders = 0;
    let stats = engine.run(|_| updates += 1, |_| renders += 1);

    assert_eq!((updates, renders), (2, 2));
    assert_eq!(stats.frames, 2);
    assert_eq!(presented.borrow().len(), 2);
    // Events queued behind the quit are still applied.
    assert!(!engine.input().is_pressed(Key::W));
    // No pacing sleep after the final frame.
    assert_eq!(clock.sleeps.borrow().len(), 1);
}

#[test]
fn quit_during_a_skipped_frame() {
    let clock = ManualClock::default();
    let backend = ScriptedBackend::new(vec![vec![], vec![RawEvent::Quit]]);
    let mut engine = engine(backend, &clock);
    let slow = clock.clone();

    let mut updates = 0;
    let stats = engine.run(|_| updates += 1, |_| slow.advance(20));

    assert_eq!(updates, 2);
    assert_eq!(stats.rendered, 1);
    assert_eq!(stats.skipped, 1);
    assert_eq!(*clock.sleeps.borrow(), vec![12]);
}

#[test]
fn callbacks_can_stop_the_loop() {
    let clock = ManualClock::default();
    let backend = ScriptedBackend::new(vec![vec![], vec![key_down(ESCAPE)]]);
    let mut engine = engine(backend, &clock);

    let stats = engine.run(
        |e| {
            if e.input().is_pressed(Key::Escape) {
                e.quit();
            }
        },
        |_| {},
    );

    assert_eq!(stats.frames, 2);
    assert_eq!(stats.rendered, 2);
}

#[test]
fn present_failures_do_not_stop_the_loop() {
    let clock = ManualClock::default();
    let backend =
        ScriptedBackend::new(vec![vec![], vec![], vec![RawEvent::Quit]]).failing_on(1);
    let presented = backend.presented();
    let mut engine = engine(backend, &clock);

    let stats = engine.run(|_| {}, |_| {});

    assert_eq!(stats.frames, 3);
    assert_eq!(stats.rendered, 3);
    assert_eq!(stats.present_failures, 1);
    assert_eq!(presented.borrow().len(), 2);
}

#[test]
fn skip_debt_does_not_carry_into_the_next_run() {
    let clock = ManualClock::default();
    let backend = ScriptedBackend::new(vec![vec![RawEvent::Quit], vec![RawEvent::Quit]]);
    let mut engine = engine(backend, &clock);
    let slow = clock.clone();

    let first = engine.run(|_| {}, |_| slow.advance(100));
    assert_eq!((first.frames, first.rendered, first.skipped), (1, 1, 0));

    let mut renders = 0;
    let second = engine.run(|_| {}, |_| renders += 1);
    assert_eq!(renders, 1);
    assert_eq!(
        second,
        FrameStats {
            frames: 1,
            rendered: 1,
            skipped: 0,
            present_failures: 0,
        }
    );
}

#[test]
fn surface_can_be_written_outside_the_loop() {
    let clock = ManualClock::default();
    let backend = ScriptedBackend::new(vec![vec![RawEvent::Quit]]);
    let presented = backend.presented();
    let mut engine = engine(backend, &clock);

    engine
        .surface_mut()
        .set_pixel(299, 199, Color::BLUE)
        .unwrap();
    assert_eq!(engine.surface().pixel(299, 199), Some(Color::BLUE));

    engine.run(|_| {}, |_| {});
    assert_eq!(presented.borrow()[0].pixel(299, 199), Some(Color::BLUE));
}
