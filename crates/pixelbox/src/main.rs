use pixelbox::DemoType;
use pixelbox_core::EngineConfig;

const DEFAULT_WIDTH: u32 = 300;
const DEFAULT_HEIGHT: u32 = 200;
const DEFAULT_SCALE: u32 = 4;
const DEFAULT_FPS: u32 = 60;

fn parse_arg(name: &str, value: Option<String>, default: u32) -> u32 {
    match value {
        None => default,
        Some(value) => value.parse().unwrap_or_else(|_| {
            eprintln!("Invalid {} '{}': expected a positive integer", name, value);
            std::process::exit(1);
        }),
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let demo = args.next().unwrap_or_else(|| "noise".to_string());

    let demo = match demo.as_str() {
        "noise" => DemoType::Noise,
        "paint" => DemoType::Paint,
        other => {
            eprintln!("Unknown demo '{}'. Supported: noise, paint", other);
            std::process::exit(1);
        }
    };

    let config = EngineConfig::builder()
        .title(demo.title())
        .width(parse_arg("width", args.next(), DEFAULT_WIDTH))
        .height(parse_arg("height", args.next(), DEFAULT_HEIGHT))
        .scale(parse_arg("scale", args.next(), DEFAULT_SCALE))
        .fps(parse_arg("fps", args.next(), DEFAULT_FPS))
        .build();

    if let Err(err) = pixelbox::run(demo, config) {
        log::error!("{:#}", err);
        eprintln!("pixelbox: {:#}", err);
        std::process::exit(1);
    }
}
