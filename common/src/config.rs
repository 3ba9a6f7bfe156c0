use std::env;

use config::{Config, ConfigError, Environment, File, FileFormat, FileStoredFormat};
use serde::Serialize;

use crate::{log_debug, log_warn};

/// Where the layers of a configuration come from. Later layers override
/// earlier ones:
/// 1. the serialized defaults,
/// 2. a file `<file_stem>.<ext>` in the working directory or an ancestor,
/// 3. an inline string in `<PREFIX>_CONFIG_STR`, whose format is the file
///    extension in `<PREFIX>_CONFIG_STR_FMT`,
/// 4. variables `<PREFIX>_<key>`, nested keys joined by `__`.
#[derive(Debug, Clone, Copy)]
pub struct ConfigLayout<'a> {
    pub file_stem: &'a str,
    pub env_prefix: &'a str,
}

impl<'a> ConfigLayout<'a> {
    pub const fn new(file_stem: &'a str, env_prefix: &'a str) -> Self {
        Self {
            file_stem,
            env_prefix,
        }
    }

    pub fn inline_var(&self) -> String {
        format!("{}_CONFIG_STR", self.env_prefix)
    }

    pub fn inline_format_var(&self) -> String {
        format!("{}_CONFIG_STR_FMT", self.env_prefix)
    }

    pub fn build(&self, defaults: &impl Serialize) -> Result<Config, ConfigError> {
        let mut builder = Config::builder().add_source(Config::try_from(defaults)?);

        let file_path = crate::utils::search_current_ancestor_dirs_for(self.file_stem)
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file_stem.to_owned());
        builder = builder.add_source(File::with_name(&file_path).required(false));

        if let Some((content, format)) = self.inline_source() {
            builder = builder.add_source(File::from_str(&content, format));
        }

        builder = builder.add_source(
            Environment::with_prefix(self.env_prefix)
                .prefix_separator("_")
                .separator("__"),
        );

        builder
            .build()
            .inspect(|c| log_debug!("Loaded raw configurations: {:?}", c))
    }

    fn inline_source(&self) -> Option<(String, FileFormat)> {
        let content = env::var(self.inline_var()).ok()?;
        let Ok(format) = env::var(self.inline_format_var()) else {
            log_warn!(
                "`{}` is set without `{}`, ignoring it",
                self.inline_var(),
                self.inline_format_var()
            );
            return None;
        };
        match parse_format(&format) {
            Some(format) => Some((content, format)),
            None => {
                log_warn!("Unknown format for config string: {}", format);
                None
            }
        }
    }
}

fn parse_format(extension: &str) -> Option<FileFormat> {
    use FileFormat::*;
    [Toml, Json, Json5, Yaml, Ron, Ini]
        .into_iter()
        .find(|f| f.file_extensions().contains(&extension))
}
