//! edat-replay: apply a recorded action log to a document.
//!
//! Usage: `edat-replay <actions.json> [--config FILE] [--snapshot FILE] [--out FILE]`
//!
//! The action log is a JSON array of actions. Each entry is dispatched in
//! order through the editor; entries that do not parse are skipped.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    if let Err(e) = replay::run(replay::Cli::parse()) {
        eprintln!("edat-replay: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod replay {
    use std::path::{Path, PathBuf};

    use clap::Parser;
    use edat::config::{ConfigError, EditorConfig};
    use edat::format::{self, FileStore, FormatError, MemoryStore, Recovery, SnapshotStore};
    use edat::ids::{SequentialIds, SystemClock};
    use edat::Editor;
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum ReplayError {
        #[error("invalid output path {0:?}")]
        InvalidOutput(PathBuf),

        #[error("configuration: {0}")]
        Config(#[from] ConfigError),

        #[error("snapshot: {0}")]
        Format(#[from] FormatError),

        #[error("I/O error: {0}")]
        Io(#[from] std::io::Error),

        #[error("action log: {0}")]
        Json(#[from] serde_json::Error),
    }

    #[derive(Parser, Debug)]
    #[command(
        name = "edat-replay",
        version,
        about = "Apply a recorded action log to an annotation document"
    )]
    pub struct Cli {
        /// JSON array of actions to dispatch in order
        actions: PathBuf,

        /// Configuration file (defaults to the user config, if any)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Snapshot to start from instead of an empty document
        #[arg(long)]
        snapshot: Option<PathBuf>,

        /// Where to write the resulting snapshot (`.json`)
        #[arg(long)]
        out: Option<PathBuf>,
    }

    pub fn run(args: Cli) -> Result<(), ReplayError> {

        let config = match &args.config {
            Some(path) => EditorConfig::load_from_path(path)?,
            None => EditorConfig::load_from_default_path().unwrap_or_default(),
        };
        env_logger::Builder::from_env(
            env_logger::Env::default()
                .default_filter_or(config.preferences.log_level.to_level_filter().as_str()),
        )
        .init();

        let mut state = config.initial_state();
        if let Some(path) = &args.snapshot {
            // Recovery works on a store; a single file is loaded through a memory one.
            let mut store = MemoryStore::new();
            store.set(&config.auto_save.storage_key, &std::fs::read_to_string(path)?)?;
            match format::recover(&mut store, &config.auto_save.storage_key, state.clone())? {
                Recovery::Recovered(recovered) => state = *recovered,
                Recovery::Discarded(e) => log::warn!("Snapshot {:?} not usable: {}", path, e),
                Recovery::Empty => {}
            }
        }

        let raw = std::fs::read_to_string(&args.actions)?;
        let actions: Vec<serde_json::Value> = serde_json::from_str(&raw)?;

        let mut editor = Editor::from_config(
            &config,
            state,
            Box::new(SequentialIds::from_time()),
            Box::new(SystemClock),
        );
        let mut changed = 0;
        for action in &actions {
            if editor.dispatch_json(&action.to_string()) {
                changed += 1;
            }
        }
        log::info!("Replayed {} actions, {} changed the document", actions.len(), changed);

        let state = editor.state();
        for (index, image) in state.images.iter().enumerate() {
            log::info!("  [{}] {}: {} regions", index, image.name, image.regions.len());
        }
        log::info!(
            "History depth {}, pending devices {}, pending categories {}",
            state.history.len(),
            state.new_devices_to_save.len(),
            state.new_categories_to_save.len()
        );

        if let Some(out) = &args.out {
            let (dir, key) = split_out_path(out)?;
            let mut store = FileStore::new(dir);
            format::save(&mut store, &key, state)?;
            log::info!("Wrote snapshot to {:?}", out);
        }
        Ok(())
    }

    /// Directory and key (file stem) of an output `.json` path.
    fn split_out_path(out: &Path) -> Result<(PathBuf, String), ReplayError> {
        let key = out
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ReplayError::InvalidOutput(out.to_path_buf()))?;
        let dir = out
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok((dir, key.to_string()))
    }

    #[cfg(test)]
    mod tests {
        use clap::CommandFactory;

        use super::*;

        #[test]
        fn test_cli_definition() {
            Cli::command().debug_assert();
        }

        #[test]
        fn test_parse_args() {
            let cli = Cli::try_parse_from([
                "edat-replay",
                "log.json",
                "--out",
                "out/result.json",
                "--config",
                "c.json",
            ])
            .expect("parse");
            assert_eq!(cli.actions, PathBuf::from("log.json"));
            assert_eq!(cli.out, Some(PathBuf::from("out/result.json")));
            assert_eq!(cli.config, Some(PathBuf::from("c.json")));
            assert_eq!(cli.snapshot, None);
        }

        #[test]
        fn test_parse_args_errors() {
            assert!(Cli::try_parse_from(["edat-replay"]).is_err());
            assert!(Cli::try_parse_from(["edat-replay", "log.json", "--out"]).is_err());
            assert!(Cli::try_parse_from(["edat-replay", "log.json", "--bogus", "x"]).is_err());
        }

        #[test]
        fn test_split_out_path() {
            let (dir, key) = split_out_path(Path::new("out/result.json")).expect("split");
            assert_eq!(dir, PathBuf::from("out"));
            assert_eq!(key, "result");

            let (dir, _) = split_out_path(Path::new("result.json")).expect("split");
            assert_eq!(dir, PathBuf::from(""));

            assert!(matches!(
                split_out_path(Path::new("/")),
                Err(ReplayError::InvalidOutput(_))
            ));
        }
    }
}
