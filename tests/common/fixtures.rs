//! Temporary configuration directories.
//!
//! [`ConfigSet::standard`] writes a small but complete set: three
//! connections, one custom variable, a site overlay, and two pages. It
//! validates with no errors and no warnings.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub const STANDARD_CONNECTIONS: &str = r##"
connections:
  - id: obs
    module: obs-studio
    label: Streaming PC
    config:
      ip: 10.0.0.5
      password: hunter2
  - id: foh
    module: yamaha-rcp
    label: FOH Mixer
    config:
      ip: 10.0.0.20
  - id: lyrics
    module: renewedvision-propresenter
    config:
      ip: 10.0.0.30
"##;

pub const STANDARD_VARIABLES: &str = r"
custom_variables:
  - name: service_phase
    description: Current phase of the service
    default: preservice
";

pub const STANDARD_PARAMETERS: &str = r"
machines:
  stream-pc:
    ip: 192.168.10.5
assignments:
  obs: stream-pc
connection_settings:
  foh:
    port: 49280
";

pub const STANDARD_MAIN_PAGE: &str = r##"
page:
  number: 1
  name: Main
buttons:
  - position: [0, 0]
    style:
      text_top: Go
      text_bottom: Live
      font_size: 18pt
      color_text: "#FFFFFF"
      color_bg: "#006600"
    actions:
      press:
        - connection: obs
          action: start_stream
    feedbacks:
      - connection: obs
        feedback: streaming
        style_when_true:
          color_bg: "#CC0000"
  - position: [0, 1]
    style:
      text_top: Mute
      text_bottom: Ch 1
      color_bg: "#333333"
    actions:
      press:
        - connection: foh
          action: mute_channel
          options:
            channel: InCh/001
            mute: true
  - position: [3, 7]
    style:
      text_top: END
      color_bg: "#660000"
    step_count: 2
    step_2_timeout_ms: 3000
    actions:
      press:
        - action: set_page
          options:
            page: 2
    step_2_actions:
      press:
        - connection: obs
          action: stop_stream
"##;

pub const STANDARD_SLIDES_PAGE: &str = r##"
page:
  number: 2
  name: Slides
buttons:
  - position: [1, 2]
    style:
      text_top: Next
      color_bg: "#000066"
    actions:
      press:
        - connection: lyrics
          action: next_slide
    feedbacks:
      - connection: lyrics
        feedback: connection_ok
        style_when_false:
          color_bg: "#990000"
"##;

/// A configuration directory that is removed on drop.
pub struct ConfigSet {
    pub dir: TempDir,
}

impl ConfigSet {
    /// Empty directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// The standard set described in the module docs, in YAML.
    #[must_use]
    pub fn standard() -> Self {
        Self::empty()
            .with_file("connections.yaml", STANDARD_CONNECTIONS)
            .with_file("variables.yaml", STANDARD_VARIABLES)
            .with_file("parameters.yaml", STANDARD_PARAMETERS)
            .with_file("pages/page1-main.yaml", STANDARD_MAIN_PAGE)
            .with_file("pages/page2-slides.yaml", STANDARD_SLIDES_PAGE)
    }

    /// Write a file relative to the set root, creating parent directories.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    #[must_use]
    pub fn with_file(self, relative: &str, content: &str) -> Self {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create fixture directory");
        }
        fs::write(&path, content).unwrap_or_else(|_| panic!("Failed to write {path:?}"));
        self
    }

    /// Remove a file relative to the set root.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be removed.
    #[must_use]
    pub fn without_file(self, relative: &str) -> Self {
        fs::remove_file(self.dir.path().join(relative))
            .unwrap_or_else(|_| panic!("Failed to remove {relative}"));
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path as a `&str`, for command-line arguments.
    ///
    /// # Panics
    ///
    /// Panics if the temporary path is not valid UTF-8.
    #[must_use]
    pub fn arg(&self) -> &str {
        self.dir.path().to_str().expect("temp path is not UTF-8")
    }

    /// Path for an output file inside the set.
    #[must_use]
    pub fn output_path(&self, name: &str) -> PathBuf {
        self.dir.path().join("output").join(name)
    }
}
