use anyhow::Result;
use pixelbox_core::{Engine, EngineConfig, FrameStats};
use pixelbox_sdl2::SdlBackend;

pub mod noise;
pub mod paint;

pub enum DemoType {
    Noise,
    Paint,
}

impl DemoType {
    pub fn title(&self) -> &'static str {
        match self {
            DemoType::Noise => "Pixels",
            DemoType::Paint => "Pixelbox Paint",
        }
    }
}

pub fn run(demo: DemoType, config: EngineConfig) -> Result<()> {
    let backend = SdlBackend::new(&config)?;
    let mut engine = Engine::new(config, backend)?;

    let stats = match demo {
        DemoType::Noise => noise::run(&mut engine),
        DemoType::Paint => paint::run(&mut engine),
    };
    report(&stats);
    Ok(())
}

fn report(stats: &FrameStats) {
    if stats.present_failures > 0 {
        log::warn!("{} frames failed to present", stats.present_failures);
    }
    if stats.frames > 0 {
        log::info!(
            "rendered {:.1}% of {} frames",
            stats.rendered as f64 * 100.0 / stats.frames as f64,
            stats.frames
        );
    }
}
