use std::path::PathBuf;

/// Encoding choice for env file contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// UTF-8 text input.
    #[default]
    Utf8,
}

/// File-loading options.
///
/// Every field is optional; unset fields are filled exactly once at resolve
/// time, without mutating the caller's value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Env file location. Defaults to an absolute `.env` path in the current
    /// working directory.
    pub path: Option<PathBuf>,
    /// File content encoding. Defaults to [`Encoding::Utf8`].
    pub encoding: Option<Encoding>,
    /// Emit resolver diagnostics. Defaults to `false`.
    pub debug: Option<bool>,
    /// Whether file values replace pre-existing store values of the same key.
    /// Defaults to `true`.
    pub override_existing: Option<bool>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    pub fn override_existing(mut self, override_existing: bool) -> Self {
        self.override_existing = Some(override_existing);
        self
    }

    /// Fill unset fields from argv-derived defaults. Explicit values win.
    pub fn with_flag_defaults(mut self, flags: &FlagDefaults) -> Self {
        self.debug = self.debug.or(Some(flags.debug));
        self
    }

    pub(crate) fn effective(&self) -> EffectiveConfig {
        EffectiveConfig {
            path: self.path.clone().unwrap_or_else(default_env_path),
            encoding: self.encoding.unwrap_or_default(),
            debug: self.debug.unwrap_or(false),
            override_existing: self.override_existing.unwrap_or(true),
        }
    }
}

/// Output-shaping options.
///
/// Every field is optional and defaults to `false` when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Output {
    /// Return key names only instead of a key-value mapping.
    pub keys: Option<bool>,
    /// Return the pre-merge environment snapshot instead of the file's
    /// parsed contents.
    pub process: Option<bool>,
    /// Print the result to stdout as 4-space-indented JSON, in addition to
    /// returning it.
    pub stdout: Option<bool>,
}

impl Output {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(mut self, keys: bool) -> Self {
        self.keys = Some(keys);
        self
    }

    pub fn process(mut self, process: bool) -> Self {
        self.process = Some(process);
        self
    }

    pub fn stdout(mut self, stdout: bool) -> Self {
        self.stdout = Some(stdout);
        self
    }

    /// Fill unset fields from argv-derived defaults. Explicit values win.
    pub fn with_flag_defaults(mut self, flags: &FlagDefaults) -> Self {
        self.keys = self.keys.or(Some(flags.keys));
        self.process = self.process.or(Some(flags.process));
        self.stdout = self.stdout.or(Some(flags.stdout));
        self
    }

    pub(crate) fn effective(&self) -> EffectiveOutput {
        EffectiveOutput {
            keys: self.keys.unwrap_or(false),
            process: self.process.unwrap_or(false),
            stdout: self.stdout.unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EffectiveConfig {
    pub(crate) path: PathBuf,
    pub(crate) encoding: Encoding,
    pub(crate) debug: bool,
    pub(crate) override_existing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EffectiveOutput {
    pub(crate) keys: bool,
    pub(crate) process: bool,
    pub(crate) stdout: bool,
}

/// Option defaults derived from a process argument list.
///
/// Kept separate from the resolver so argv sniffing stays a concern of the
/// hosting entry point. Each flag's presence anywhere in the list turns the
/// matching default on; the flags only take effect for fields the caller left
/// unset (see [`Config::with_flag_defaults`] and [`Output::with_flag_defaults`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlagDefaults {
    pub debug: bool,
    pub keys: bool,
    pub process: bool,
    pub stdout: bool,
}

impl FlagDefaults {
    /// Derive defaults from an explicit argument list.
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut flags = Self::default();
        for arg in args {
            match arg.as_ref() {
                "--debug" => flags.debug = true,
                "--keys" => flags.keys = true,
                "--process" => flags.process = true,
                "--stdout" => flags.stdout = true,
                _ => {}
            }
        }
        flags
    }
}

fn default_env_path() -> PathBuf {
    std::env::current_dir()
        .map(|dir| dir.join(".env"))
        .unwrap_or_else(|_| PathBuf::from(".env"))
}
