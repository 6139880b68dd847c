use anyhow::Result;
use flyweight::canvas::{RasterCanvas, RecordingCanvas};
use flyweight::config::storage::JsonStorageAdapter;
use flyweight::config::{config, config_set, ConfigStore};
use flyweight::scene::{compose, SceneSettings, SceneStats};
use flyweight::shapes::ShapeRegistry;
use log::LevelFilter;
use simple_logger::SimpleLogger;

fn main() -> Result<()> {
    let matches = clap::Command::new("Flyweight shape demo")
        .version("0.1.0")
        .about("Draws a random scene while sharing one shape instance per kind")
        .arg(
            clap::Arg::new("config")
                .help("Json file with settings overriding the defaults")
                .short('c')
                .long("config"),
        )
        .arg(
            clap::Arg::new("count")
                .help("Number of shapes to draw")
                .short('n')
                .long("count")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            clap::Arg::new("width")
                .help("Canvas width in pixels")
                .long("width")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            clap::Arg::new("height")
                .help("Canvas height in pixels")
                .long("height")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            clap::Arg::new("seed")
                .help("Seed for the scene generator (0 is random)")
                .short('s')
                .long("seed")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            clap::Arg::new("kinds")
                .help("Comma separated shape kinds to pick from")
                .short('k')
                .long("kinds"),
        )
        .arg(
            clap::Arg::new("output")
                .help("PNG file to write the scene to")
                .short('o')
                .long("output"),
        )
        .arg(
            clap::Arg::new("commands")
                .help("Print the draw commands instead of rendering an image")
                .long("commands")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("debug")
                .help("Enable debug logging")
                .short('d')
                .long("debug")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let level = if matches.get_flag("debug") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    SimpleLogger::new().with_level(level).init()?;

    let store = match matches.get_one::<String>("config") {
        Some(path) => ConfigStore::with_storage(Box::new(JsonStorageAdapter::open(path)?))?,
        None => ConfigStore::new()?,
    };

    if let Some(count) = matches.get_one::<usize>("count") {
        config_set!(store, uint "scene.shapes", *count);
    }
    if let Some(width) = matches.get_one::<usize>("width") {
        config_set!(store, uint "canvas.width", *width);
    }
    if let Some(height) = matches.get_one::<usize>("height") {
        config_set!(store, uint "canvas.height", *height);
    }
    if let Some(seed) = matches.get_one::<usize>("seed") {
        config_set!(store, uint "scene.seed", *seed);
    }
    if let Some(kinds) = matches.get_one::<String>("kinds") {
        let kinds = kinds.split(',').map(|k| k.trim().to_string()).collect();
        config_set!(store, map "scene.kinds", kinds);
    }
    if let Some(output) = matches.get_one::<String>("output") {
        config_set!(store, string "output.path", output.clone());
    }

    let settings = SceneSettings::from_config(&store)?;
    let mut registry = ShapeRegistry::new();

    let stats = if matches.get_flag("commands") {
        let mut canvas = RecordingCanvas::new();
        let stats = compose(&mut registry, &mut canvas, &settings)?;
        for command in canvas.commands() {
            println!("{command}");
        }
        stats
    } else {
        let mut canvas = RasterCanvas::new(settings.width, settings.height)?;
        let stats = compose(&mut registry, &mut canvas, &settings)?;
        let output = config!(store, string "output.path");
        canvas.save(&output)?;
        println!("wrote {output}");
        stats
    };

    print_stats(&stats);
    Ok(())
}

fn print_stats(stats: &SceneStats) {
    println!("seed: {}", stats.seed);
    println!("shapes drawn: {}", stats.drawn);
    for (kind, count) in &stats.per_kind {
        println!("  {kind:<14} {count}");
    }
    println!("shape instances created: {}", stats.instances);
}
