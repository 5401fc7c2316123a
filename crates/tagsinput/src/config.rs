//! # Configuration
//!
//! Widget defaults are managed by [`confique`], which handles layered loading
//! from TOML files and environment variables.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `TAGSINPUT_FLOAT_FORMAT`, `TAGSINPUT_TAG_STYLE`, etc.
//! 2. **Project Config**: `tagsinput.toml` in the directory passed to [`TagsConfig::load`].
//! 3. **Global Config**: OS-appropriate config directory (via `directories` crate).
//! 4. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `module_name` | `jupyter-widget-tagsinput` | Front-end module reported to the display surface |
//! | `module_version` | `^0.1.0` | Front-end module version range |
//! | `float_format` | `.1f` | Display format of new float tag widgets |
//! | `int_format` | `.3g` | Display format of new int tag widgets |
//! | `allow_duplicates` | `true` | Initial `allow_duplicates` of new widgets |
//! | `tag_style` | `""` | Initial style of new string and numeric tag widgets |
//!
//! Format and style strings are checked when a widget is created from the
//! configuration, not when the configuration is loaded.

use std::path::{Path, PathBuf};

use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::format::NumberFormat;
use crate::style::TagStyle;

pub const CONFIG_FILE_NAME: &str = "tagsinput.toml";

pub const DEFAULT_MODULE_NAME: &str = "jupyter-widget-tagsinput";
pub const DEFAULT_MODULE_VERSION: &str = "^0.1.0";

/// Defaults applied to widgets created by a [`crate::manager::WidgetManager`].
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TagsConfig {
    /// Front-end module that renders the widgets
    #[config(default = "jupyter-widget-tagsinput", env = "TAGSINPUT_MODULE_NAME")]
    pub module_name: String,

    /// Semver range of the front-end module
    #[config(default = "^0.1.0", env = "TAGSINPUT_MODULE_VERSION")]
    pub module_version: String,

    /// d3-format specifier for float tags (e.g. ".1f", ",.2f")
    #[config(default = ".1f", env = "TAGSINPUT_FLOAT_FORMAT")]
    pub float_format: String,

    /// d3-format specifier for int tags (e.g. ".3g", "d")
    #[config(default = ".3g", env = "TAGSINPUT_INT_FORMAT")]
    pub int_format: String,

    /// Initial allow_duplicates flag of new widgets
    #[config(default = true, env = "TAGSINPUT_ALLOW_DUPLICATES")]
    pub allow_duplicates: bool,

    /// Initial style of string and numeric tags: primary, success, info, warning, danger or ""
    #[config(default = "", env = "TAGSINPUT_TAG_STYLE")]
    pub tag_style: String,
}

impl Default for TagsConfig {
    fn default() -> Self {
        Self {
            module_name: DEFAULT_MODULE_NAME.to_string(),
            module_version: DEFAULT_MODULE_VERSION.to_string(),
            float_format: ".1f".to_string(),
            int_format: ".3g".to_string(),
            allow_duplicates: true,
            tag_style: String::new(),
        }
    }
}

impl TagsConfig {
    /// Loads the layered configuration.
    ///
    /// Missing files are skipped; a present but malformed file is an error.
    pub fn load(project_dir: Option<&Path>) -> Result<Self> {
        let mut builder = TagsConfig::builder().env();
        if let Some(dir) = project_dir {
            builder = builder.file(dir.join(CONFIG_FILE_NAME));
        }
        if let Some(path) = global_config_path() {
            builder = builder.file(path);
        }
        Ok(builder.load()?)
    }

    /// A commented TOML file listing every setting with its default.
    pub fn template() -> String {
        confique::toml::template::<TagsConfig>(confique::toml::FormatOptions::default())
    }

    pub fn float_format(&self) -> Result<NumberFormat> {
        NumberFormat::parse(self.float_format.as_str())
    }

    pub fn int_format(&self) -> Result<NumberFormat> {
        NumberFormat::parse(self.int_format.as_str())
    }

    pub fn tag_style(&self) -> Result<TagStyle> {
        self.tag_style.parse()
    }
}

/// Path of the global config file, if the platform has a config directory.
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "tagsinput", "tagsinput")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
