use clap::Parser;
use ggframe::io::{load_frame, save_frame};
use ggframe::{
    DescriptorMatch, FeatureIndex, FeatureRole, Frame, Keypoint, LocatorConfig, MatchObserver,
    MatchPolicy, PatternLocator, Pos, Rec, Size, DEFAULT_RATIO,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod detector;

use detector::PatchDetector;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "ggframe CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Task {
    #[default]
    FindPattern,
    GridRec,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum PolicyConfig {
    NearestNeighbor,
    RatioTest {
        #[serde(default = "default_ratio")]
        ratio: f32,
    },
}

fn default_ratio() -> f32 {
    DEFAULT_RATIO
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self::RatioTest {
            ratio: DEFAULT_RATIO,
        }
    }
}

impl PolicyConfig {
    fn to_policy(&self) -> ggframe::FrameResult<MatchPolicy> {
        match *self {
            PolicyConfig::NearestNeighbor => Ok(MatchPolicy::NearestNeighbor),
            PolicyConfig::RatioTest { ratio } => MatchPolicy::ratio_test(ratio),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct DetectorConfigJson {
    threshold: u8,
    patch_radius: usize,
    max_keypoints: usize,
}

impl Default for DetectorConfigJson {
    fn default() -> Self {
        let det = PatchDetector::default();
        Self {
            threshold: det.threshold,
            patch_radius: det.patch_radius,
            max_keypoints: det.max_keypoints,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct PosJson {
    row: i32,
    col: i32,
}

#[derive(Debug, Deserialize)]
struct SizeJson {
    height: i32,
    width: i32,
}

impl Default for SizeJson {
    fn default() -> Self {
        Self {
            height: 1,
            width: 1,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    task: Task,
    scene_path: String,
    template_path: String,
    center: PosJson,
    size: SizeJson,
    grid_size: i32,
    policy: PolicyConfig,
    min_matches: usize,
    detector: DetectorConfigJson,
    output_path: Option<String>,
    annotated_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            task: Task::default(),
            scene_path: String::new(),
            template_path: String::new(),
            center: PosJson::default(),
            size: SizeJson::default(),
            grid_size: 1,
            policy: PolicyConfig::default(),
            min_matches: LocatorConfig::default().min_matches,
            detector: DetectorConfigJson::default(),
            output_path: None,
            annotated_path: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct RecRecord {
    top: i32,
    left: i32,
    bottom: i32,
    right: i32,
    width: u32,
    height: u32,
}

impl From<Rec> for RecRecord {
    fn from(value: Rec) -> Self {
        Self {
            top: value.top(),
            left: value.left(),
            bottom: value.bottom(),
            right: value.right(),
            width: value.width(),
            height: value.height(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    rec: RecRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    matches: Option<usize>,
}

/// Records scene keypoints for the annotated image and the accepted match
/// count for the JSON output.
#[derive(Default)]
struct RunRecord {
    scene_keypoints: Vec<Keypoint>,
    accepted: usize,
}

impl MatchObserver for RunRecord {
    fn on_features(&mut self, role: FeatureRole, index: &FeatureIndex) {
        if role == FeatureRole::Scene {
            self.scene_keypoints = index.keypoints().copied().collect();
        }
    }

    fn on_matches(
        &mut self,
        _template: &FeatureIndex,
        _scene: &FeatureIndex,
        accepted: &[DescriptorMatch],
    ) {
        self.accepted = accepted.len();
    }
}

fn find_pattern(
    config: &Config,
    scene: &Frame,
    record: &mut RunRecord,
) -> Result<Output, Box<dyn std::error::Error>> {
    if config.template_path.is_empty() {
        return Err("template_path must be set for find_pattern".into());
    }
    let template = load_frame(&config.template_path)?;
    let detector = PatchDetector {
        threshold: config.detector.threshold,
        patch_radius: config.detector.patch_radius,
        max_keypoints: config.detector.max_keypoints,
    };
    let locator = PatternLocator::new(detector).with_config(LocatorConfig {
        policy: config.policy.to_policy()?,
        min_matches: config.min_matches,
    });
    let rec = locator.find_pattern_observed(scene, &template, record)?;
    Ok(Output {
        rec: rec.into(),
        matches: Some(record.accepted),
    })
}

fn grid_rec(config: &Config, scene: &mut Frame) -> Result<Output, Box<dyn std::error::Error>> {
    scene.set_grid_size(config.grid_size)?;
    let size = Size::hw(config.size.height, config.size.width)?;
    let center = Pos::rc(config.center.row, config.center.col);
    let rec = scene.best_grid_rec_centered_at(center, size);
    Ok(Output {
        rec: rec.into(),
        matches: None,
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("ggframe=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.scene_path.is_empty() {
        return Err("scene_path must be set in the config".into());
    }

    let mut scene = load_frame(&config.scene_path)?;
    let mut record = RunRecord::default();
    let output = match config.task {
        Task::FindPattern => find_pattern(&config, &scene, &mut record)?,
        Task::GridRec => grid_rec(&config, &mut scene)?,
    };

    if let Some(path) = &config.annotated_path {
        if matches!(config.task, Task::GridRec) {
            scene.draw_grid();
        }
        scene.draw_keypoints(&record.scene_keypoints);
        let rec = Rec::tlbr(
            output.rec.top,
            output.rec.left,
            output.rec.bottom,
            output.rec.right,
        );
        scene.draw_rec(rec);
        save_frame(&scene, path)?;
    }

    let json = serde_json::to_string_pretty(&output)?;
    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
