//! Terminal jigsaw runner (default binary).
//!
//! Preloads the configured assets behind a loading screen, then runs the
//! puzzle on the terminal canvas backend. Input is crossterm mouse and keys;
//! rendering is the custom framebuffer renderer.
//!
//! Usage: `tui-jigsaw [IMAGE]`, with the rest configured through `JIGSAW_*`
//! environment variables (see `EngineConfig`).

use std::fs::{File, OpenOptions};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tui_jigsaw::assets::{
    AssetBundle, AssetPreloader, AssetRuntime, AudioPlayer, BellOutput, FsAssetSource,
    PreloadEvent, PreloadReport,
};
use tui_jigsaw::engine::{
    Collaborators, EngineConfig, EngineEvent, JsonLinesSink, PuzzleEngine, SessionToken,
};
use tui_jigsaw::input::{InputAction, InputHandler};
use tui_jigsaw::term::{
    draw_fatal, draw_loading, FrameBuffer, TerminalAdapter, TerminalRenderer, Viewport,
};
use tui_jigsaw::types::{PuzzleCommand, PuzzleEvent, TICK_MS};

fn main() -> Result<()> {
    let mut config = EngineConfig::from_env();
    if let Some(image) = std::env::args().nth(1) {
        config = config.with_image(image);
    }
    init_tracing(config.log_path.as_deref())?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_tracing(log_path: Option<&str>) -> Result<()> {
    // stderr would land on the alternate screen; log to a file or not at all.
    let Some(path) = log_path else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("open log file {path}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

fn viewport() -> Viewport {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    Viewport::new(w, h)
}

/// Drain pending terminal events; true if the user asked to quit.
fn quit_requested(input: &mut InputHandler, timeout: Duration) -> Result<bool> {
    if event::poll(timeout)? {
        input.handle_event(&event::read()?);
    }
    Ok(input
        .drain()
        .any(|a| a == InputAction::Command(PuzzleCommand::Quit)))
}

fn run(term: &mut TerminalRenderer, config: EngineConfig) -> Result<()> {
    let preloader = AssetPreloader::new(Arc::new(FsAssetSource::new()), config.manifest())
        .with_policy(config.asset_policy);
    let mut runtime = AssetRuntime::start(preloader).context("start asset runtime")?;

    let Some(report) = load_screen(term, &mut runtime)? else {
        runtime.shutdown();
        return Ok(());
    };

    let result = play(term, &runtime, config, report);
    runtime.shutdown();
    result
}

/// Show progress until every asset has settled. `None` means the user quit.
fn load_screen(
    term: &mut TerminalRenderer,
    runtime: &mut AssetRuntime,
) -> Result<Option<PreloadReport>> {
    let mut fb = FrameBuffer::new(0, 0);
    let mut input = InputHandler::new();
    let mut percent = 0.0;
    let mut failed = Vec::new();
    loop {
        while let Some(event) = runtime.try_recv() {
            match event {
                PreloadEvent::Progress(progress) => percent = progress.overall(),
                PreloadEvent::Failed(message) => failed.push(message),
                PreloadEvent::Settled(report) => return Ok(Some(report)),
            }
        }
        draw_loading(&mut fb, viewport(), percent, &failed);
        term.draw_swap(&mut fb)?;
        if quit_requested(&mut input, Duration::from_millis(TICK_MS as u64))? {
            return Ok(None);
        }
    }
}

fn collaborators(config: &EngineConfig) -> Result<Collaborators> {
    let session = match &config.user {
        Some(user) => SessionToken::new(user.clone()),
        None => SessionToken::anonymous(),
    };
    let mut collab = Collaborators::default().with_session(session);
    if let Some(path) = &config.result_log {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open result log {path}"))?;
        collab = collab.with_sink(JsonLinesSink::new(file));
    }
    Ok(collab)
}

fn audio_player(runtime: &AssetRuntime, bundle: &AssetBundle) -> AudioPlayer {
    let mut player = runtime.audio_player(Arc::new(BellOutput::default()));
    for clip in bundle.audio.values() {
        player.insert(clip.clone());
    }
    player
}

fn sound_for(event: &EngineEvent) -> Option<&'static str> {
    match event {
        EngineEvent::Puzzle(PuzzleEvent::Swapped { .. } | PuzzleEvent::Slid { .. }) => Some("snap"),
        EngineEvent::Puzzle(PuzzleEvent::Hinted { .. }) => Some("hint"),
        EngineEvent::Puzzle(PuzzleEvent::Completed { .. }) => Some("win"),
        _ => None,
    }
}

fn play(
    term: &mut TerminalRenderer,
    runtime: &AssetRuntime,
    config: EngineConfig,
    report: PreloadReport,
) -> Result<()> {
    let image_size = report
        .bundle
        .image(config.puzzle.image.trim())
        .map(|img| img.size())
        .unwrap_or((1, 1));
    let mut adapter = TerminalAdapter::new(viewport(), image_size);
    adapter.set_failures(&report.errors);

    let created = PuzzleEngine::create(
        config.clone(),
        &report.bundle,
        adapter,
        collaborators(&config)?,
    );
    let mut engine = match created {
        Ok(engine) => engine,
        Err(e) => {
            warn!(error = %e, "engine creation failed");
            let mut fb = FrameBuffer::new(0, 0);
            draw_fatal(&mut fb, viewport(), &e.to_string());
            term.draw_swap(&mut fb)?;
            let _ = event::read();
            return Err(e).context("create puzzle");
        }
    };

    let mut audio = audio_player(runtime, &report.bundle);
    let mut input = InputHandler::new();
    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();
    let mut last_second = 0;
    let mut dirty = true;

    'game: loop {
        if dirty {
            term.draw_swap(engine.adapter_mut().framebuffer_mut())?;
            dirty = false;
        }

        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            input.handle_event(&event::read()?);
        }

        if last_tick.elapsed() < tick_duration {
            continue;
        }
        last_tick = Instant::now();
        input.update(TICK_MS);

        let actions: Vec<InputAction> = input.drain().collect();
        for action in actions {
            match action {
                InputAction::Pointer(pointer) => dirty |= engine.pointer(pointer),
                InputAction::Command(PuzzleCommand::Quit) => break 'game,
                InputAction::Command(command) => dirty |= engine.command(command)?,
                InputAction::Resize { width, height } => {
                    engine.adapter_mut().set_viewport(Viewport::new(width, height));
                    engine.resize();
                    term.invalidate();
                    dirty = true;
                }
            }
        }

        dirty |= engine.tick(TICK_MS);
        let second = engine.puzzle().elapsed_ms() / 1000;
        if second != last_second {
            // Keep the clock on the status line moving.
            last_second = second;
            engine.redraw();
            dirty = true;
        }

        for event in engine.drain_events() {
            if let EngineEvent::ResultSubmitted(record) = &event {
                info!(moves = record.move_count, "result recorded");
            }
            if let Some(sound) = sound_for(&event) {
                audio.play_audio(sound);
            }
        }
    }

    audio.stop_all();
    let _detached = engine.destroy();
    Ok(())
}
