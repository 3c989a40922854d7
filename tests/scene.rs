#![cfg(not(target_arch = "wasm32"))]

//! Background scene driven the way the browser drives it, minus the browser.

use aurora_wasm::config::AuroraConfig;
use aurora_wasm::palette::Preset;
use aurora_wasm::scene::AuroraScene;
use aurora_wasm::schedule::{CountingScheduler, FrameLoop, LoopState};
use aurora_wasm::surface::{DrawCommand, RecordingSurface};
use aurora_wasm::theme::{Theme, ThemeHub};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::cell::Cell;
use std::rc::Rc;

fn scene(width: f64, height: f64) -> AuroraScene {
    AuroraScene::new(width, height, &AuroraConfig::default())
}

/// Deliver `n` frames through `frames`, rendering `scene` into `surface`.
fn pump(
    frames: &mut FrameLoop<CountingScheduler>,
    scene: &mut AuroraScene,
    surface: &mut RecordingSurface,
    n: usize,
) {
    for _ in 0..n {
        frames.on_frame(|| scene.render(surface));
    }
}

#[test]
fn theme_change_is_a_hard_cut_on_the_next_frame() {
    let mut hub = ThemeHub::new(Theme::Light);
    let seen = Rc::new(Cell::new(Theme::Light));
    {
        let seen = seen.clone();
        hub.subscribe(move |t| seen.set(t));
    }

    let mut scene = scene(800.0, 600.0);
    let mut surface = RecordingSurface::new();
    for _ in 0..3 {
        scene.set_theme(seen.get());
        scene.render(&mut surface);
    }
    let light_alpha = surface.paths().last().map(|(_, s)| s.color.a);
    assert_eq!(light_alpha, Some(0.3));
    surface.take();

    hub.set(Theme::Dark);
    scene.set_theme(seen.get());
    scene.render(&mut surface);

    assert_eq!(scene.theme(), Theme::Dark);
    // Every wave of the very next frame uses the dark strokes.
    let alphas: Vec<f64> = surface.paths().map(|(_, s)| s.color.a).collect();
    assert_eq!(alphas, vec![0.05; 5]);
    // The clock was not reset by the switch.
    assert_eq!(scene.frames(), 4);
    assert_eq!(scene.t(), 2.0);
}

#[test]
fn resize_changes_sampling_without_resetting_time() {
    let mut scene = scene(800.0, 600.0);
    let mut surface = RecordingSurface::new();
    scene.render(&mut surface);
    scene.render(&mut surface);
    surface.take();

    scene.resize(400.0, 300.0);
    scene.render(&mut surface);

    let commands = surface.take();
    assert_eq!(
        commands.first(),
        Some(&DrawCommand::Clear {
            width: 400.0,
            height: 300.0
        })
    );
    let first_path = commands.iter().find_map(|c| match c {
        DrawCommand::StrokePath { points, .. } => Some(points.clone()),
        _ => None,
    });
    let points = first_path.expect("a wave was drawn");
    assert_eq!(points.len(), 80);
    assert!(points.iter().all(|&(x, _)| x < 400.0));
    assert_eq!(scene.t(), 1.5);
}

#[test]
fn detached_loop_stops_rendering() {
    let mut scene = scene(200.0, 100.0);
    let mut surface = RecordingSurface::new();
    let mut frames = FrameLoop::new(CountingScheduler::default());
    frames.start();

    pump(&mut frames, &mut scene, &mut surface, 3);
    assert_eq!(scene.frames(), 3);
    assert_eq!(frames.scheduler().requested, 4);

    frames.detach();
    assert_eq!(frames.state(), LoopState::Detached);
    assert_eq!(frames.scheduler().cancelled, vec![4]);

    // A callback that was already in flight does nothing.
    surface.take();
    pump(&mut frames, &mut scene, &mut surface, 2);
    assert!(surface.commands.is_empty());
    assert_eq!(scene.frames(), 3);
    assert_eq!(frames.scheduler().requested, 4);

    frames.detach();
    assert_eq!(frames.scheduler().cancelled.len(), 1);
}

#[test]
fn scheduler_failure_ends_the_loop() {
    let mut scene = scene(200.0, 100.0);
    let mut surface = RecordingSurface::new();
    let mut frames = FrameLoop::new(CountingScheduler {
        fail_after: Some(2),
        ..CountingScheduler::default()
    });
    frames.start();

    pump(&mut frames, &mut scene, &mut surface, 5);
    assert_eq!(scene.frames(), 2);
    assert!(!frames.is_running());
}

#[test]
fn ribbon_preset_thins_out_in_light_mode_only() {
    let config = AuroraConfig {
        preset: Preset::Ribbon,
        ..AuroraConfig::default()
    };
    let mut scene = AuroraScene::new(640.0, 480.0, &config);
    let mut surface = RecordingSurface::new();
    scene.render(&mut surface);

    let light: Vec<(f64, f64)> = surface.paths().map(|(_, s)| (s.width, s.color.a)).collect();
    assert_eq!(light, vec![(1.0, 0.02); 3]);
    let wash = surface.gradients().next().map(|g| g.stops[1].color.to_string());
    assert_eq!(wash.as_deref(), Some("hsla(30, 25%, 75%, 0.08)"));

    surface.take();
    scene.set_theme(Theme::Dark);
    scene.render(&mut surface);
    let dark: Vec<(f64, f64)> = surface.paths().map(|(_, s)| (s.width, s.color.a)).collect();
    assert_eq!(dark, vec![(2.0, 0.05); 5]);
}

#[test]
fn finest_configured_sampling_renders() {
    let config = AuroraConfig::from_json(r#"{"sample_step": 0.5}"#).unwrap();
    let mut scene = AuroraScene::new(3840.0, 2160.0, &config);
    let mut surface = RecordingSurface::new();
    scene.render(&mut surface);
    assert!(surface.paths().all(|(points, _)| points.len() == 7680));

    assert!(AuroraConfig::from_json(r#"{"sample_step": 1e-300}"#).is_err());
}

proptest! {
    #[test]
    fn clock_is_frames_times_step(frames in 0usize..200) {
        let mut scene = scene(100.0, 100.0);
        let mut surface = RecordingSurface::new();
        let mut last = scene.t();
        for _ in 0..frames {
            scene.render(&mut surface);
            prop_assert!(scene.t() > last);
            last = scene.t();
        }
        prop_assert_eq!(scene.t(), frames as f64 * 0.5);
    }

    #[test]
    fn same_inputs_draw_the_same_frames(
        width in 1.0f64..2000.0,
        height in 1.0f64..1200.0,
        frames in 1usize..20,
        dark in any::<bool>(),
    ) {
        let theme = if dark { Theme::Dark } else { Theme::Light };
        let run = || {
            let mut scene = scene(width, height);
            scene.set_theme(theme);
            let mut surface = RecordingSurface::new();
            for _ in 0..frames {
                scene.render(&mut surface);
            }
            surface.commands
        };
        prop_assert_eq!(run(), run());
    }

    #[test]
    fn waves_stay_within_amplitude(
        width in 1.0f64..2000.0,
        height in 1.0f64..1200.0,
        frames in 1usize..50,
    ) {
        let mut scene = scene(width, height);
        let mut surface = RecordingSurface::new();
        for _ in 0..frames {
            scene.render(&mut surface);
        }
        for (points, _) in surface.paths() {
            for &(_, y) in points {
                prop_assert!((y - height / 2.0).abs() <= 150.0 + 1e-9);
            }
        }
    }
}
