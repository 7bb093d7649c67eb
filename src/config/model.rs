// src/config/model.rs

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level configuration as read from `Sitepipe.toml`.
///
/// ```toml
/// [paths]
/// assets_dir = "assets"
/// output_dir = "static/assets"
///
/// [tools]
/// sass = "sass"
/// bundler = "esbuild"
/// ```
///
/// All sections are optional; a missing file means built-in defaults that
/// match the conventional site layout.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfigFile {
    /// Input/output layout from `[paths]`.
    #[serde(default)]
    pub paths: PathsSection,

    /// External tool program names from `[tools]`.
    #[serde(default)]
    pub tools: ToolsSection,
}

/// `[paths]` section.
///
/// All paths are interpreted relative to the project root (the directory
/// containing the config file, or the working directory when the config is a
/// bare filename).
#[derive(Debug, Clone, Deserialize)]
pub struct PathsSection {
    /// Root of the source assets. Expected to contain `styles/`, `scripts/`,
    /// `images/` and `fonts/` subdirectories.
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,

    /// Root of the generated output consumed by the site generator.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Sass entry point, relative to `<assets_dir>/styles`.
    #[serde(default = "default_style_entry")]
    pub style_entry: String,

    /// Compiled stylesheet name, relative to `<output_dir>/styles`.
    #[serde(default = "default_style_output")]
    pub style_output: String,

    /// Bundle entry point, relative to `<assets_dir>/scripts`.
    #[serde(default = "default_script_entry")]
    pub script_entry: String,

    /// Bundled script name, relative to `<output_dir>/scripts`.
    #[serde(default = "default_script_output")]
    pub script_output: String,

    /// Extra image source trees (e.g. a vendored design-system package).
    #[serde(default = "default_vendor_images")]
    pub vendor_images: Vec<PathBuf>,

    /// Extra font source trees.
    #[serde(default = "default_vendor_fonts")]
    pub vendor_fonts: Vec<PathBuf>,

    /// Site manifest with `name`/`version`, used for display only.
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("assets")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("static/assets")
}

fn default_style_entry() -> String {
    "homepage.scss".to_string()
}

fn default_style_output() -> String {
    "homepage.css".to_string()
}

fn default_script_entry() -> String {
    "start.js".to_string()
}

fn default_script_output() -> String {
    "main.js".to_string()
}

fn default_vendor_images() -> Vec<PathBuf> {
    vec![PathBuf::from("node_modules/uswds/src/img")]
}

fn default_vendor_fonts() -> Vec<PathBuf> {
    vec![PathBuf::from("node_modules/uswds/src/fonts")]
}

fn default_manifest() -> PathBuf {
    PathBuf::from("package.json")
}

impl Default for PathsSection {
    fn default() -> Self {
        Self {
            assets_dir: default_assets_dir(),
            output_dir: default_output_dir(),
            style_entry: default_style_entry(),
            style_output: default_style_output(),
            script_entry: default_script_entry(),
            script_output: default_script_output(),
            vendor_images: default_vendor_images(),
            vendor_fonts: default_vendor_fonts(),
            manifest: default_manifest(),
        }
    }
}

/// `[tools]` section: program names of the external tools each step drives.
///
/// These are resolved through `PATH` at the time the owning step runs; a
/// missing tool is a tool failure of that step, not a startup error.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolsSection {
    #[serde(default = "default_sass")]
    pub sass: String,

    #[serde(default = "default_bundler")]
    pub bundler: String,

    #[serde(default = "default_eslint")]
    pub eslint: String,

    #[serde(default = "default_scss_lint")]
    pub scss_lint: String,

    /// The static-site generator binary used for the preview server.
    #[serde(default = "default_server")]
    pub server: String,
}

fn default_sass() -> String {
    "sass".to_string()
}

fn default_bundler() -> String {
    "esbuild".to_string()
}

fn default_eslint() -> String {
    "eslint".to_string()
}

fn default_scss_lint() -> String {
    "scss-lint".to_string()
}

fn default_server() -> String {
    "hugo".to_string()
}

impl Default for ToolsSection {
    fn default() -> Self {
        Self {
            sass: default_sass(),
            bundler: default_bundler(),
            eslint: default_eslint(),
            scss_lint: default_scss_lint(),
            server: default_server(),
        }
    }
}

/// Build mode flags, fixed at startup from the CLI.
///
/// Defaults are `{production: false, test: true}`; every task action reads
/// the flags it cares about at invocation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildFlags {
    /// Compressed styles, minified scripts, drafts hidden on the server.
    pub production: bool,
    /// Whether lint steps actually lint; `false` makes them no-ops that
    /// still succeed.
    pub test: bool,
}

impl Default for BuildFlags {
    fn default() -> Self {
        Self {
            production: false,
            test: true,
        }
    }
}

/// Resolved project layout: the `[paths]` section anchored at a project root.
///
/// Accessors return absolute-ish paths for the steps and relative glob
/// strings for the watcher (the watcher matches paths relative to the root).
#[derive(Debug, Clone)]
pub struct Paths {
    root: PathBuf,
    section: PathsSection,
}

impl Paths {
    pub fn new(root: impl Into<PathBuf>, section: PathsSection) -> Self {
        Self {
            root: root.into(),
            section,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn styles_dir(&self) -> PathBuf {
        self.root.join(&self.section.assets_dir).join("styles")
    }

    pub fn scripts_dir(&self) -> PathBuf {
        self.root.join(&self.section.assets_dir).join("scripts")
    }

    pub fn images_dir(&self) -> PathBuf {
        self.root.join(&self.section.assets_dir).join("images")
    }

    pub fn fonts_dir(&self) -> PathBuf {
        self.root.join(&self.section.assets_dir).join("fonts")
    }

    pub fn style_entry(&self) -> PathBuf {
        self.styles_dir().join(&self.section.style_entry)
    }

    pub fn script_entry(&self) -> PathBuf {
        self.scripts_dir().join(&self.section.script_entry)
    }

    pub fn output_root(&self) -> PathBuf {
        self.root.join(&self.section.output_dir)
    }

    pub fn styles_out_dir(&self) -> PathBuf {
        self.output_root().join("styles")
    }

    pub fn style_output(&self) -> PathBuf {
        self.styles_out_dir().join(&self.section.style_output)
    }

    pub fn scripts_out_dir(&self) -> PathBuf {
        self.output_root().join("scripts")
    }

    pub fn script_output(&self) -> PathBuf {
        self.scripts_out_dir().join(&self.section.script_output)
    }

    pub fn images_out_dir(&self) -> PathBuf {
        self.output_root().join("images")
    }

    pub fn fonts_out_dir(&self) -> PathBuf {
        self.output_root().join("fonts")
    }

    /// Image source trees: site assets plus any vendored trees.
    pub fn image_sources(&self) -> Vec<PathBuf> {
        let mut sources = vec![self.images_dir()];
        sources.extend(self.section.vendor_images.iter().map(|p| self.root.join(p)));
        sources
    }

    /// Font source trees: site assets plus any vendored trees.
    pub fn font_sources(&self) -> Vec<PathBuf> {
        let mut sources = vec![self.fonts_dir()];
        sources.extend(self.section.vendor_fonts.iter().map(|p| self.root.join(p)));
        sources
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(&self.section.manifest)
    }

    /// Watch glob for style sources, relative to the project root.
    pub fn styles_glob(&self) -> String {
        format!("{}/styles/**/*.scss", rel_display(&self.section.assets_dir))
    }

    /// Watch glob for script sources, relative to the project root.
    pub fn scripts_glob(&self) -> String {
        format!("{}/scripts/**/*.js", rel_display(&self.section.assets_dir))
    }

    /// Watch glob for image sources, relative to the project root.
    pub fn images_glob(&self) -> String {
        format!("{}/images/**/*", rel_display(&self.section.assets_dir))
    }
}

/// Forward-slashed display of a relative path, for glob construction.
fn rel_display(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
