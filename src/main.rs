use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use sketchkit::{init_logging, render_svg, EditorConfig, Script};
use tracing::{info, warn};

const USAGE: &str = "usage: sketchkit <script.json | -> [config.toml | config.json]";

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let mut args = std::env::args().skip(1);
    let script_arg = args.next().context(USAGE)?;
    let config_arg = args.next().map(PathBuf::from);

    let script = if script_arg == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read script from stdin")?;
        Script::from_json(&text)?
    } else {
        Script::load(&PathBuf::from(&script_arg))?
    };

    let config = load_config(config_arg)?;
    info!("SketchKit {} replaying {} step(s)", sketchkit::VERSION, script.steps.len());

    let canvas = script.replay(config);
    print!("{}", render_svg(&canvas));
    Ok(())
}

/// An explicit path must load; the default location falls back to defaults.
fn load_config(path: Option<PathBuf>) -> anyhow::Result<EditorConfig> {
    if let Some(path) = path {
        return EditorConfig::load_from_file(&path)
            .with_context(|| format!("failed to load settings from {}", path.display()));
    }
    match EditorConfig::default_path().and_then(|p| EditorConfig::load_or_default(&p)) {
        Ok(config) => Ok(config),
        Err(e) => {
            warn!("Using default settings: {}", e);
            Ok(EditorConfig::default())
        }
    }
}
