//! Random scene composition
//!
//! A scene is a batch of randomly placed, sized and colored shapes, all obtained from one
//! [`ShapeRegistry`]. However many shapes are drawn, the registry never holds more instances
//! than there are distinct kinds in the scene.

use flyweight_canvas::{Canvas, MAX_PIXELS};
use flyweight_config::{config, ConfigStore};
use flyweight_shapes::{ShapeKind, ShapeRegistry};
use flyweight_shared::color::Color;
use flyweight_shared::geo::Coord;
use flyweight_shared::types::{Error, Result};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Colors shapes are drawn with
pub const PALETTE: [Color; 10] = [
    Color::BLACK,
    Color::RED,
    Color::GREEN,
    Color::BLUE,
    Color::YELLOW,
    Color::CYAN,
    Color::MAGENTA,
    Color::GRAY,
    Color::ORANGE,
    Color::PINK,
];

#[derive(Clone, Debug, PartialEq)]
pub struct SceneSettings {
    pub width: u32,
    pub height: u32,
    pub background: Color,
    /// Number of shapes to draw
    pub shapes: usize,
    /// Largest width or height of a single shape
    pub max_size: u32,
    /// 0 picks a random seed
    pub seed: u64,
    pub kinds: Vec<ShapeKind>,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            background: Color::WHITE,
            shapes: 100,
            max_size: 80,
            seed: 0,
            kinds: ShapeKind::ALL.to_vec(),
        }
    }
}

impl SceneSettings {
    /// Reads the `canvas.*` and `scene.*` settings from the store
    pub fn from_config(store: &ConfigStore) -> Result<Self> {
        let kinds = config!(store, map "scene.kinds")
            .iter()
            .map(|kind| ShapeKind::from_str(kind))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let settings = Self {
            width: to_u32("canvas.width", config!(store, uint "canvas.width"))?,
            height: to_u32("canvas.height", config!(store, uint "canvas.height"))?,
            background: Color::from_str(&config!(store, string "canvas.background"))?,
            shapes: config!(store, uint "scene.shapes"),
            max_size: to_u32("scene.max_size", config!(store, uint "scene.max_size"))?,
            seed: config!(store, uint "scene.seed") as u64,
            kinds,
        };

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.kinds.is_empty() {
            return Err(Error::Config("scene needs at least one shape kind".into()).into());
        }
        if self.width == 0 || self.height == 0 {
            return Err(Error::Config(format!(
                "canvas size {}x{} is empty",
                self.width, self.height
            ))
            .into());
        }
        let pixels = u64::from(self.width).checked_mul(u64::from(self.height));
        if !matches!(pixels, Some(pixels) if pixels <= MAX_PIXELS) {
            return Err(Error::Config(format!(
                "canvas size {}x{} exceeds the limit of {MAX_PIXELS} pixels",
                self.width, self.height
            ))
            .into());
        }
        if self.max_size == 0 {
            return Err(Error::Config("scene.max_size must be at least 1".into()).into());
        }

        Ok(())
    }
}

fn to_u32(key: &str, value: usize) -> Result<u32> {
    u32::try_from(value)
        .ok()
        .filter(|v| *v <= Coord::MAX as u32)
        .ok_or_else(|| Error::Config(format!("{key} is too large: {value}")).into())
}

/// What a composed scene cost
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SceneStats {
    /// Number of draw calls made
    pub drawn: usize,
    /// Draw calls per kind
    pub per_kind: BTreeMap<ShapeKind, usize>,
    /// Shape instances held by the registry after drawing
    pub instances: usize,
    /// Seed the scene was generated with
    pub seed: u64,
}

/// Clears the canvas and draws a random scene with shapes from the registry
pub fn compose(
    registry: &mut ShapeRegistry,
    canvas: &mut dyn Canvas,
    settings: &SceneSettings,
) -> Result<SceneStats> {
    settings.validate()?;

    let seed = if settings.seed == 0 {
        rand::rng().random()
    } else {
        settings.seed
    };
    let mut rng = StdRng::seed_from_u64(seed);
    debug!("scene: composing {} shapes with seed {seed}", settings.shapes);

    // validate() keeps all of these within Coord range
    let width = settings.width as Coord;
    let height = settings.height as Coord;
    let max_size = settings.max_size as Coord;

    canvas.clear(settings.background);

    let mut stats = SceneStats {
        seed,
        ..SceneStats::default()
    };

    for _ in 0..settings.shapes {
        let kind = settings.kinds[rng.random_range(0..settings.kinds.len())];
        let x = rng.random_range(0..width);
        let y = rng.random_range(0..height);
        let w = rng.random_range(1..=max_size);
        let h = rng.random_range(1..=max_size);
        let color = PALETTE[rng.random_range(0..PALETTE.len())];

        registry.get_shape(kind).draw(canvas, x, y, w, h, color);

        stats.drawn += 1;
        *stats.per_kind.entry(kind).or_default() += 1;
    }

    stats.instances = registry.len();
    info!(
        "scene: drew {} shapes using {} shape instances",
        stats.drawn, stats.instances
    );

    Ok(stats)
}

#[cfg(test)]
mod test {
    use super::*;
    use flyweight_canvas::{DrawCommand, RecordingCanvas};
    use flyweight_config::config_set;
    use flyweight_config::settings::Setting;

    fn settings(shapes: usize, kinds: &[ShapeKind]) -> SceneSettings {
        SceneSettings {
            shapes,
            seed: 42,
            kinds: kinds.to_vec(),
            ..SceneSettings::default()
        }
    }

    #[test]
    fn many_draws_few_instances() {
        let mut registry = ShapeRegistry::new();
        let mut canvas = RecordingCanvas::new();

        let stats = compose(&mut registry, &mut canvas, &settings(500, &ShapeKind::ALL)).unwrap();

        assert_eq!(stats.drawn, 500);
        assert_eq!(stats.per_kind.values().sum::<usize>(), 500);
        assert_eq!(stats.instances, 3);
        assert_eq!(canvas.commands()[0], DrawCommand::Clear(Color::WHITE));
    }

    #[test]
    fn instances_bounded_by_requested_kinds() {
        let mut registry = ShapeRegistry::new();
        let mut canvas = RecordingCanvas::new();

        let stats = compose(&mut registry, &mut canvas, &settings(50, &[ShapeKind::Line])).unwrap();

        assert_eq!(stats.instances, 1);
        assert_eq!(registry.cached_kinds(), vec![ShapeKind::Line]);
        assert!(!canvas
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::DrawOval(_) | DrawCommand::FillOval(_))));
    }

    #[test]
    fn same_seed_same_scene() {
        let mut first = RecordingCanvas::new();
        let mut second = RecordingCanvas::new();

        compose(&mut ShapeRegistry::new(), &mut first, &settings(20, &ShapeKind::ALL)).unwrap();
        compose(&mut ShapeRegistry::new(), &mut second, &settings(20, &ShapeKind::ALL)).unwrap();

        assert_eq!(first.commands(), second.commands());
    }

    #[test]
    fn empty_kinds_rejected() {
        let result = compose(
            &mut ShapeRegistry::new(),
            &mut RecordingCanvas::new(),
            &settings(10, &[]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn from_config_store() {
        let store = ConfigStore::new().unwrap();
        config_set!(store, uint "scene.shapes", 7);
        config_set!(store, map "scene.kinds", vec!["line".into(), "oval-filled".into()]);
        config_set!(store, string "canvas.background", "#000000".into());

        let settings = SceneSettings::from_config(&store).unwrap();
        assert_eq!(settings.shapes, 7);
        assert_eq!(settings.kinds, vec![ShapeKind::Line, ShapeKind::OvalFilled]);
        assert_eq!(settings.background, Color::BLACK);
        assert_eq!(settings.width, 640);
    }

    #[test]
    fn oversized_canvas_rejected() {
        let huge = SceneSettings {
            width: i32::MAX as u32,
            height: i32::MAX as u32,
            ..settings(1, &ShapeKind::ALL)
        };
        let result = compose(&mut ShapeRegistry::new(), &mut RecordingCanvas::new(), &huge);
        assert!(result.is_err());

        let store = ConfigStore::new().unwrap();
        config_set!(store, uint "canvas.width", i32::MAX as usize);
        config_set!(store, uint "canvas.height", i32::MAX as usize);
        let err = SceneSettings::from_config(&store).unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::Config(_))));
    }

    #[test]
    fn from_config_bad_kind() {
        let store = ConfigStore::new().unwrap();
        store.set("scene.kinds", Setting::Map(vec!["hexagon".into()]));

        assert!(SceneSettings::from_config(&store).is_err());
    }
}
