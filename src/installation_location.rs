use anyhow::{bail, ensure, Context};
use std::{
    ffi::OsString,
    path::{Component, Path, PathBuf},
    str::FromStr,
};

#[cfg(target_os = "windows")]
pub const INTERPRETER_NAME: &str = "python.exe";
#[cfg(not(target_os = "windows"))]
pub const INTERPRETER_NAME: &str = "python3";

pub const LOCAL_APP_DATA_ENV: &str = "LOCALAPPDATA";
const HOME_ENV: &str = "HOME";

/// Directory under the local application data directory holding one
/// subdirectory per installed interpreter version.
const INTERPRETER_INSTALL_DIRECTORY: [&str; 2] = ["Programs", "Python"];

/// Gets the directory containing the running launcher.
pub fn launcher_directory() -> anyhow::Result<PathBuf> {
    let exe = dunce::canonicalize(
        std::env::current_exe().with_context(|| "failed to obtain current exe path")?,
    )
    .with_context(|| "failed to canonicalize current exe path")?;
    let parent = exe
        .parent()
        .ok_or(anyhow::anyhow!("current exe path has no parent directory"))?;
    Ok(parent.to_path_buf())
}

/// Gets the local application data directory.
///
/// `LOCALAPPDATA` wins when set. Otherwise Windows recovers it from
/// `reference_path` (normally the launcher's own path) and other platforms
/// fall back to `$HOME/.local/share`.
pub fn get_local_app_data(reference_path: Option<&Path>) -> anyhow::Result<PathBuf> {
    local_app_data_from(
        std::env::var_os(LOCAL_APP_DATA_ENV),
        std::env::var_os(HOME_ENV),
        reference_path,
    )
}

fn local_app_data_from(
    local_app_data: Option<OsString>,
    home: Option<OsString>,
    reference_path: Option<&Path>,
) -> anyhow::Result<PathBuf> {
    if let Some(dir) = local_app_data.filter(|dir| !dir.is_empty()) {
        return Ok(dir.into());
    }
    if cfg!(target_os = "windows") {
        let path = reference_path.with_context(|| {
            "can't get local app data: couldn't recover from missing LOCALAPPDATA"
        })?;
        Ok(user_directory_from_path(path)?
            .join("AppData")
            .join("Local"))
    } else if let Some(home) = home {
        Ok(PathBuf::from(home).join(".local").join("share"))
    } else {
        bail!("can't get local app data: LOCALAPPDATA and HOME are both unset")
    }
}

/// Recovers `<root>/Users/<name>` from a path somewhere inside a user profile.
fn user_directory_from_path(path: &Path) -> anyhow::Result<PathBuf> {
    let components: Vec<Component> = path.components().collect();
    let root = components
        .iter()
        .position(|&component| component == Component::RootDir)
        .ok_or(anyhow::anyhow!(
            "path is relative so the user directory cannot be determined"
        ))?;
    ensure!(
        components.len() > root + 2,
        "path is not long enough to determine user directory"
    );
    ensure!(
        // TODO: localized Windows installs may not call this folder "Users"
        components[root + 1] == Component::Normal(&OsString::from_str("Users")?),
        "path is a system path and does not contain /Users/"
    );
    Ok(path.iter().take(root + 3).collect::<PathBuf>())
}

/// Where per-version interpreter installs live under `local_app_data`.
pub fn interpreter_install_directory(local_app_data: &Path) -> PathBuf {
    INTERPRETER_INSTALL_DIRECTORY
        .iter()
        .fold(local_app_data.to_path_buf(), |path, part| path.join(part))
}
