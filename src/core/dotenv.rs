//! Dot-env projector.
//!
//! Mirrors downloaded secrets into `<output_dir>/.env`, one
//! `<GROUP>_<NAME>_<EXTENSION>=value` line per entry. An existing file is
//! loaded first so unrelated variables survive the rewrite.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, info_span, trace, warn, Span};

use crate::core::constants::ENV_FILE;
use crate::core::file::File;
use crate::core::fs;
use crate::error::{FileError, Result};

/// `.env` contents keyed by variable name.
#[derive(Debug)]
pub struct DotEnv {
    path: PathBuf,
    data: BTreeMap<String, String>,
    overwritten: Vec<String>,
    span: Span,
}

impl DotEnv {
    pub fn new(output_dir: &Path, parent: &Span) -> Self {
        let path = output_dir.join(ENV_FILE);
        let span = info_span!(parent: parent, "dotenv", path = %path.display());
        Self {
            path,
            data: BTreeMap::new(),
            overwritten: Vec::new(),
            span,
        }
    }

    /// Variable name of a container: `<GROUP>_<NAME>_<EXTENSION>`, uppercased.
    pub fn var_name(file: &File) -> String {
        let entry = file.properties();
        format!("{}_{}_{}", file.group(), entry.name, entry.extension).to_uppercase()
    }

    /// Load the existing file, if any.
    ///
    /// # Errors
    ///
    /// Returns `FileError::Io` if the file exists but can't be read or
    /// isn't UTF-8.
    pub fn load(&mut self) -> Result<()> {
        let _guard = self.span.enter();
        if !fs::exists(&self.path) {
            debug!("no existing dot-env file");
            return Ok(());
        }

        let invalid = |e: Box<dyn std::error::Error + Send + Sync>| FileError::Io {
            path: self.path.clone(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        };

        let raw = fs::read(&self.path)?;
        let contents = String::from_utf8(raw).map_err(|e| invalid(e.into()))?;

        for (key, value) in parse(&contents).map_err(|e| invalid(e.into()))? {
            info!(key = %key, "loaded variable from dot-env file");
            self.data.insert(key, value);
        }
        Ok(())
    }

    /// Set a variable, warning when it replaces an existing value.
    pub fn put(&mut self, key: String, value: String) {
        let _guard = self.span.enter();
        trace!(key = %key, value = %value, "dot-env put");

        if self.data.contains_key(&key) {
            warn!(key = %key, "overwriting dot-env variable");
            self.overwritten.push(key.clone());
        }
        self.data.insert(key, value);
    }

    /// Put every container's payload under its variable name.
    pub fn merge(&mut self, files: &[File]) {
        for file in files {
            let value = String::from_utf8_lossy(file.payload()).into_owned();
            self.put(Self::var_name(file), value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.data
    }

    /// Keys replaced by [`DotEnv::put`], in order.
    pub fn overwritten(&self) -> &[String] {
        &self.overwritten
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrite the file with owner-only permissions.
    ///
    /// # Errors
    ///
    /// Returns `FileError::Io` if the file can't be written.
    pub fn save(&self, dry_run: bool) -> Result<()> {
        let _guard = self.span.enter();
        if dry_run {
            info!(variables = self.data.len(), "dry-run: skipping dot-env write");
            return Ok(());
        }

        info!(variables = self.data.len(), "writing dot-env file");
        fs::write_private(&self.path, self.to_env_string().as_bytes())
    }

    fn to_env_string(&self) -> String {
        self.data
            .iter()
            .map(|(key, value)| format!("{}={}\n", key, quote(value)))
            .collect()
    }
}

/// Quote a value for a POSIX shell.
///
/// Values made of safe characters only are left bare; anything else is
/// single-quoted, with embedded single quotes written as `'"'"'`.
fn quote(value: &str) -> Cow<'_, str> {
    let safe = |ch: char| ch.is_ascii_alphanumeric() || "@%+=:,./-_".contains(ch);
    if !value.is_empty() && value.chars().all(safe) {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(format!("'{}'", value.replace('\'', "'\"'\"'")))
    }
}

/// Parse dot-env text the way a shell would source it.
///
/// `$VAR` and `${VAR}` outside single quotes expand against the process
/// environment, then against variables defined earlier in the file. Lines
/// that don't parse are skipped.
fn parse(contents: &str) -> std::result::Result<Vec<(String, String)>, dotenvy::Error> {
    let mut entries = Vec::new();
    for item in dotenvy::from_read_iter(contents.as_bytes()) {
        match item {
            Ok(pair) => entries.push(pair),
            Err(dotenvy::Error::LineParse(_, position)) => {
                warn!(position, "skipping unparsable dot-env line");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(entries)
}
