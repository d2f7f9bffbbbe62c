#![forbid(unsafe_code)]

//! Flag and environment parsing.

use std::collections::HashMap;

use pretty_assertions::assert_eq;
use treasure_core::Theme;
use treasure_tui::cli::{CliError, Command, Opts};

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_owned()).collect()
}

fn run(list: &[&str], env: &[(&str, &str)]) -> Result<Opts, CliError> {
    let env: HashMap<String, String> = env
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    match Opts::parse_from(&args(list), |key| env.get(key).cloned())? {
        Command::Run(opts) => Ok(opts),
        other => panic!("expected run, got {other:?}"),
    }
}

#[test]
fn no_arguments_gives_defaults() {
    assert_eq!(run(&[], &[]).unwrap(), Opts::default());
}

#[test]
fn flags_set_page_config() {
    let opts = run(
        &[
            "--particles=12",
            "--link-distance=42.5",
            "--delay-ms=50",
            "--seed=7",
            "--theme=dark",
            "--fps=60",
            "--no-mouse",
        ],
        &[],
    )
    .unwrap();
    assert_eq!(opts.page.particle_count, 12);
    assert_eq!(opts.page.link_distance, 42.5);
    assert_eq!(opts.page.search_delay_ms, 50);
    assert_eq!(opts.page.seed, Some(7));
    assert_eq!(opts.page.theme, Theme::Dark);
    assert_eq!(opts.fps, 60);
    assert!(!opts.mouse);
}

#[test]
fn environment_applies_when_flags_are_absent() {
    let opts = run(
        &[],
        &[
            ("TREASURE_MAP_PARTICLES", "5"),
            ("TREASURE_MAP_THEME", "dark"),
            ("TREASURE_MAP_LOG", "/tmp/treasure.log"),
        ],
    )
    .unwrap();
    assert_eq!(opts.page.particle_count, 5);
    assert_eq!(opts.page.theme, Theme::Dark);
    assert_eq!(opts.log_file.as_deref(), Some("/tmp/treasure.log"));
}

#[test]
fn flags_override_environment() {
    let opts = run(&["--particles=9"], &[("TREASURE_MAP_PARTICLES", "5")]).unwrap();
    assert_eq!(opts.page.particle_count, 9);
}

#[test]
fn bad_environment_values_are_ignored() {
    let opts = run(
        &[],
        &[("TREASURE_MAP_SEED", "soon"), ("TREASURE_MAP_FPS", "0")],
    )
    .unwrap();
    assert_eq!(opts.page.seed, None);
    assert_eq!(opts.fps, 30);
}

#[test]
fn bad_flags_are_errors() {
    assert_eq!(
        run(&["--theme=sepia"], &[]),
        Err(CliError::InvalidValue {
            flag: "--theme",
            value: "sepia".into()
        })
    );
    assert_eq!(
        run(&["--frobnicate"], &[]),
        Err(CliError::UnknownArgument("--frobnicate".into()))
    );
    assert_eq!(
        CliError::UnknownArgument("--x".into()).to_string(),
        "Unknown argument: --x"
    );
}
