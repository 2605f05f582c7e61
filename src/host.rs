//! Capabilities the launcher needs from the machine it runs on.

use std::{
    ffi::OsStr,
    fs, io,
    path::{Path, PathBuf},
    process::Command,
};

use crate::installation_location::get_local_app_data;

pub trait Filesystem {
    fn is_file(&self, path: &Path) -> bool;
    /// `Ok(None)` when the file doesn't exist.
    fn read_to_string(&self, path: &Path) -> io::Result<Option<String>>;
    /// Immediate subdirectories, or `Ok(None)` when `path` isn't a directory.
    fn subdirectories(&self, path: &Path) -> io::Result<Option<Vec<PathBuf>>>;
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

pub trait ProcessStarter {
    /// Starts `executable` and returns without waiting on it.
    fn start_detached(&self, executable: &str, arguments: &OsStr) -> io::Result<()>;
}

pub trait Environment {
    /// Only asked for while bootstrapping.
    fn local_app_data(&self) -> Option<PathBuf>;
}

pub struct OsFilesystem;

impl Filesystem for OsFilesystem {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn subdirectories(&self, path: &Path) -> io::Result<Option<Vec<PathBuf>>> {
        if !path.is_dir() {
            return Ok(None);
        }
        let mut dirs = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                dirs.push(entry.path());
            }
        }
        Ok(Some(dirs))
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        fs::write(path, contents)
    }
}

/// Reads the process environment, recovering local app data from
/// `reference_path` when the variable is missing.
pub struct OsEnvironment<'a> {
    pub reference_path: &'a Path,
}

impl Environment for OsEnvironment<'_> {
    fn local_app_data(&self) -> Option<PathBuf> {
        match get_local_app_data(Some(self.reference_path)) {
            Ok(dir) => Some(dir),
            Err(e) => {
                log::warn!("{e:?}");
                None
            }
        }
    }
}

/// Starts children with the platform's default stdio, environment and working
/// directory, dropping the handle straight away.
pub struct DetachedStarter;

impl ProcessStarter for DetachedStarter {
    fn start_detached(&self, executable: &str, arguments: &OsStr) -> io::Result<()> {
        let mut command = Command::new(executable);
        push_arguments(&mut command, arguments);
        command.spawn()?;
        Ok(())
    }
}

#[cfg(target_os = "windows")]
fn push_arguments(command: &mut Command, arguments: &OsStr) {
    use std::os::windows::process::CommandExt;
    if !arguments.is_empty() {
        command.raw_arg(arguments);
    }
}

#[cfg(unix)]
fn push_arguments(command: &mut Command, arguments: &OsStr) {
    use std::{ffi::OsString, os::unix::ffi::OsStringExt};
    command.args(
        split_command_line(arguments.as_encoded_bytes())
            .into_iter()
            .map(OsString::from_vec),
    );
}

#[cfg(not(any(target_os = "windows", unix)))]
fn push_arguments(command: &mut Command, arguments: &OsStr) {
    command.args(
        split_command_line(arguments.as_encoded_bytes())
            .iter()
            .map(|arg| String::from_utf8_lossy(arg).into_owned()),
    );
}

/// Splits an argument string the way a Windows program would see it:
/// spaces and tabs separate, double quotes group and `\"` is a literal quote.
/// Other backslashes are kept as-is. Works on raw bytes so arguments that
/// aren't UTF-8 pass through untouched.
pub fn split_command_line(arguments: &[u8]) -> Vec<Vec<u8>> {
    let mut args = Vec::new();
    let mut current = Vec::new();
    let mut in_arg = false;
    let mut quoted = false;
    let mut bytes = arguments.iter().copied().peekable();
    while let Some(b) = bytes.next() {
        match b {
            b'\\' if bytes.peek() == Some(&b'"') => {
                bytes.next();
                current.push(b'"');
                in_arg = true;
            }
            b'"' => {
                quoted = !quoted;
                in_arg = true;
            }
            b if b.is_ascii_whitespace() && !quoted => {
                if in_arg {
                    args.push(std::mem::take(&mut current));
                    in_arg = false;
                }
            }
            b => {
                current.push(b);
                in_arg = true;
            }
        }
    }
    if in_arg {
        args.push(current);
    }
    args
}
