// tests/step_args.rs

//! Mode branching of the tool-driving steps: the argument vectors handed to
//! the external tools with and without production mode, and the lint skip.

use sitepipe::config::{BuildFlags, Paths, PathsSection};
use sitepipe::steps::scripts::bundler_args;
use sitepipe::steps::serve::server_args;
use sitepipe::steps::styles::sass_args;
use sitepipe_test_utils::builders::StepContextBuilder;

fn paths() -> Paths {
    Paths::new("site", PathsSection::default())
}

fn dev() -> BuildFlags {
    BuildFlags::default()
}

fn production() -> BuildFlags {
    BuildFlags {
        production: true,
        test: true,
    }
}

#[test]
fn defaults_are_development_with_lint_enabled() {
    let flags = BuildFlags::default();
    assert!(!flags.production);
    assert!(flags.test);
}

#[test]
fn sass_compiles_compressed_only_in_production() {
    let paths = paths();

    let args = sass_args(production(), &paths);
    assert!(args.contains(&"--style=compressed".to_string()));
    assert!(args.contains(&"--no-source-map".to_string()));

    let args = sass_args(dev(), &paths);
    assert!(args.contains(&"--style=expanded".to_string()));
    assert!(!args.iter().any(|a| a.contains("compressed")));
}

#[test]
fn sass_reads_the_entry_point_and_writes_the_stylesheet() {
    let args = sass_args(dev(), &paths());
    assert!(args[0].ends_with("homepage.scss"));
    assert!(args[1].ends_with("homepage.css"));
}

#[test]
fn bundler_minifies_only_in_production() {
    let paths = paths();

    let args = bundler_args(production(), &paths);
    assert!(args.contains(&"--minify".to_string()));
    assert!(!args.contains(&"--sourcemap".to_string()));

    let args = bundler_args(dev(), &paths);
    assert!(args.contains(&"--sourcemap".to_string()));
    assert!(!args.contains(&"--minify".to_string()));
}

#[test]
fn bundler_always_bundles_the_entry_point() {
    let args = bundler_args(dev(), &paths());
    assert!(args[0].ends_with("start.js"));
    assert!(args.contains(&"--bundle".to_string()));
    assert!(args.iter().any(|a| a.starts_with("--outfile=") && a.ends_with("main.js")));
}

#[test]
fn server_hides_drafts_only_in_production() {
    assert!(server_args(dev()).contains(&"--buildDrafts=true".to_string()));
    assert!(server_args(production()).contains(&"--buildDrafts=false".to_string()));
}

#[tokio::test]
async fn lint_steps_skip_and_succeed_when_testing_is_disabled() {
    // The configured lint tools don't exist in the test environment; the
    // steps must return before ever spawning them.
    let (ctx, _fs) = StepContextBuilder::new().test(false).build();

    sitepipe::steps::lint::lint_styles(&ctx).await.unwrap();
    sitepipe::steps::lint::lint_scripts(&ctx).await.unwrap();
}
