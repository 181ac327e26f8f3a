//! External translator invocation.
//!
//! Translator is a java application (location taken from the `DIGASMJAR` environment variable)
//! that turns an assembly source into a hex image and a map file next to the source.

use crate::debugger::map;
use crate::error::Error;
use log::{debug, info};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Environment variable with the translator jar location.
pub const JAR_ENV: &str = "DIGASMJAR";
/// Extension of an image produced by translator.
pub const IMAGE_EXTENSION: &str = "hex";

/// Files produced for a single source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifacts {
    pub source: PathBuf,
    pub image: PathBuf,
    pub map: PathBuf,
}

impl Artifacts {
    fn for_source(source: PathBuf) -> Self {
        Self {
            image: image_path(&source),
            map: map::map_path(&source),
            source,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toolchain {
    program: PathBuf,
    args: Vec<OsString>,
}

impl Toolchain {
    /// Create toolchain running translator `jar` with java virtual machine.
    ///
    /// # Arguments
    ///
    /// * `java`: path to java executable, if `None` then `java` is searched in `PATH`
    /// * `jar`: translator jar file
    pub fn java(java: Option<&Path>, jar: &Path) -> Result<Self, Error> {
        let program = match java {
            Some(java) => java.to_path_buf(),
            None => which::which("java")?,
        };
        Ok(Self::new(program, ["-jar".into(), jar.as_os_str().to_owned()]))
    }

    /// Create toolchain running arbitrary translator program, source path is appended
    /// to `args` at each run.
    pub fn new(program: impl Into<PathBuf>, args: impl IntoIterator<Item = OsString>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().collect(),
        }
    }

    /// Translate source file, return paths of produced image and map.
    pub fn build(&self, source: &Path) -> Result<Artifacts, Error> {
        let source = fs::canonicalize(source)?;
        debug!(
            target: "toolchain",
            "run {} {:?} {}",
            self.program.display(),
            self.args,
            source.display()
        );

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(&source)
            .status()?;
        if !status.success() {
            return Err(Error::Toolchain(status));
        }

        let artifacts = Artifacts::for_source(source);
        info!(target: "toolchain", "image built: {}", artifacts.image.display());
        Ok(artifacts)
    }
}

/// Return path of an image produced for a source file.
pub fn image_path(source: &Path) -> PathBuf {
    source.with_extension(IMAGE_EXTENSION)
}
