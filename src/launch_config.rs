use std::path::PathBuf;

use crate::installation_location::INTERPRETER_NAME;

pub const CONFIG_FILE: &str = "mkdd_bol_editor.txt";

const PLACEHOLDER_INTERPRETER: &str = "path to python";
const PLACEHOLDER_SCRIPT: &str = "path to mkdd_editor";
/// Written alongside a discovered interpreter, where only the script is left
/// for the user to fill in.
const PLACEHOLDER_SCRIPT_WITH_INTERPRETER: &str = "path to mkdd_editor.py";

const BYTE_ORDER_MARK: char = '\u{feff}';

#[cfg(target_os = "windows")]
const LINE_ENDING: &str = "\r\n";
#[cfg(not(target_os = "windows"))]
const LINE_ENDING: &str = "\n";

/// The two-line record kept beside the launcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfig {
    /// line 1: the interpreter to start
    pub executable: String,
    /// line 2: the editor script handed to the interpreter
    pub script: String,
}

impl LaunchConfig {
    /// Returns `None` when fewer than two lines are present. Lines past the
    /// second are ignored.
    ///
    /// A leading byte order mark is dropped, and `\r\n`, `\n` and a lone `\r`
    /// all end a line, since the file is edited by hand.
    pub fn parse(contents: &str) -> Option<Self> {
        let contents = contents.strip_prefix(BYTE_ORDER_MARK).unwrap_or(contents);
        let normalized = contents.replace("\r\n", "\n").replace('\r', "\n");
        let mut lines = normalized.lines();
        let executable = lines.next()?;
        let script = lines.next()?;
        Some(LaunchConfig {
            executable: executable.to_string(),
            script: script.to_string(),
        })
    }

    /// Contents for a first run. `interpreter_installs` holds the
    /// subdirectories of the interpreter install directory, or `None` when
    /// that directory doesn't exist.
    ///
    /// The pick is the last directory name compared upper-cased, the way NTFS
    /// orders a listing, so `Python39` sorts after `Python312`. That is the
    /// last listed install, not the newest version.
    pub fn bootstrap(interpreter_installs: Option<Vec<PathBuf>>) -> Self {
        let picked = interpreter_installs.and_then(|mut installs| {
            installs.sort_by_cached_key(|install| {
                install
                    .file_name()
                    .map(|name| name.to_string_lossy().to_uppercase())
            });
            installs.pop()
        });
        match picked {
            Some(install) => LaunchConfig {
                executable: install.join(INTERPRETER_NAME).to_string_lossy().into_owned(),
                script: PLACEHOLDER_SCRIPT_WITH_INTERPRETER.to_string(),
            },
            None => LaunchConfig::placeholder(),
        }
    }

    pub fn placeholder() -> Self {
        LaunchConfig {
            executable: PLACEHOLDER_INTERPRETER.to_string(),
            script: PLACEHOLDER_SCRIPT.to_string(),
        }
    }

    /// Every line, the last included, is terminated.
    pub fn to_file_contents(&self) -> String {
        format!(
            "{}{LINE_ENDING}{}{LINE_ENDING}",
            self.executable, self.script
        )
    }
}
