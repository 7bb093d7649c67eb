// tests/config_loader.rs

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use sitepipe::config::{load_or_default, project_root};
use sitepipe::errors::PipelineError;

#[test]
fn missing_file_means_builtin_defaults() {
    let cfg = load_or_default("/definitely/not/here/Sitepipe.toml").unwrap();

    assert_eq!(cfg.paths.assets_dir, PathBuf::from("assets"));
    assert_eq!(cfg.paths.output_dir, PathBuf::from("static/assets"));
    assert_eq!(cfg.paths.style_entry, "homepage.scss");
    assert_eq!(cfg.paths.script_output, "main.js");
    assert_eq!(cfg.tools.sass, "sass");
    assert_eq!(cfg.tools.server, "hugo");
}

#[test]
fn partial_config_overrides_only_what_it_names() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[paths]
output_dir = "public/assets"
style_entry = "main.scss"

[tools]
sass = "dart-sass"
"#
    )
    .unwrap();

    let cfg = load_or_default(file.path()).unwrap();

    assert_eq!(cfg.paths.output_dir, PathBuf::from("public/assets"));
    assert_eq!(cfg.paths.style_entry, "main.scss");
    // Everything else keeps its default.
    assert_eq!(cfg.paths.assets_dir, PathBuf::from("assets"));
    assert_eq!(cfg.tools.sass, "dart-sass");
    assert_eq!(cfg.tools.bundler, "esbuild");
}

#[test]
fn malformed_toml_is_an_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[paths\noutput_dir = oops").unwrap();

    let err = load_or_default(file.path()).unwrap_err();
    assert!(matches!(err, PipelineError::Toml(_)));
}

#[test]
fn degenerate_output_dir_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[paths]
output_dir = "."
"#
    )
    .unwrap();

    let err = load_or_default(file.path()).unwrap_err();
    match err {
        PipelineError::Config(msg) => assert!(msg.contains("output_dir")),
        other => panic!("expected Config error, got: {other:?}"),
    }
}

#[test]
fn project_root_comes_from_the_config_location() {
    assert_eq!(
        project_root(Path::new("site/Sitepipe.toml")),
        PathBuf::from("site")
    );

    // A bare filename anchors at the working directory.
    let cwd = std::env::current_dir().unwrap();
    assert_eq!(project_root(Path::new("Sitepipe.toml")), cwd);
}
