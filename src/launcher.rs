use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{
    host::{Environment, Filesystem, ProcessStarter},
    installation_location::interpreter_install_directory,
    invocation::InvocationArgs,
    launch_config::{LaunchConfig, CONFIG_FILE},
};

/// How to start the editor: an executable plus the argument string as the
/// platform's process start call receives it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    pub executable: String,
    pub arguments: OsString,
}

impl LaunchSpec {
    pub fn new(config: &LaunchConfig, invocation: &InvocationArgs) -> Self {
        let mut arguments = OsString::new();
        match &invocation.data_file {
            Some(data_file) => {
                arguments.push("\"");
                arguments.push(&config.script);
                arguments.push("\" \"");
                arguments.push(data_file);
                arguments.push("\" ");
                arguments.push(invocation.model_flag.as_deref().unwrap_or(""));
            }
            None => arguments.push(&config.script),
        }
        LaunchSpec {
            executable: config.executable.clone(),
            arguments,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// no configuration yet, write this one and stop
    Bootstrap(LaunchConfig),
    Launch(LaunchSpec),
    /// configuration present but incomplete
    Noop,
}

/// Decides what a run does.
///
/// `config_contents` is `None` when the configuration file is missing.
/// `list_installs` is only consulted while bootstrapping and receives the
/// interpreter install directory under `local_app_data`.
pub fn resolve<F>(
    invocation: &InvocationArgs,
    config_contents: Option<&str>,
    local_app_data: Option<&Path>,
    list_installs: F,
) -> Decision
where
    F: FnOnce(&Path) -> Option<Vec<PathBuf>>,
{
    match config_contents {
        Some(contents) => match LaunchConfig::parse(contents) {
            Some(config) => Decision::Launch(LaunchSpec::new(&config, invocation)),
            None => Decision::Noop,
        },
        None => {
            let installs = local_app_data
                .and_then(|dir| list_installs(&interpreter_install_directory(dir)));
            Decision::Bootstrap(LaunchConfig::bootstrap(installs))
        }
    }
}

/// Runs the launcher once against a directory and the host capabilities.
pub struct Launcher<'a, E, F, P> {
    pub directory: &'a Path,
    pub environment: &'a E,
    pub filesystem: &'a F,
    pub starter: &'a P,
}

impl<'a, E: Environment, F: Filesystem, P: ProcessStarter> Launcher<'a, E, F, P> {
    pub fn config_path(&self) -> PathBuf {
        self.directory.join(CONFIG_FILE)
    }

    /// Resolves `args` and carries out the resulting decision.
    pub fn run<I>(&self, args: I) -> anyhow::Result<Decision>
    where
        I: IntoIterator,
        I::Item: Into<OsString>,
    {
        let invocation = InvocationArgs::resolve(args, |path| self.filesystem.is_file(path));
        log::debug!("resolved invocation {:?}", invocation);

        let config_path = self.config_path();
        let config_contents = self
            .filesystem
            .read_to_string(&config_path)
            .with_context(|| format!("failed to read config file {}", config_path.display()))?;
        let local_app_data = match config_contents {
            Some(_) => None,
            None => {
                log::info!("no config at {}, bootstrapping", config_path.display());
                self.environment.local_app_data()
            }
        };

        let decision = resolve(
            &invocation,
            config_contents.as_deref(),
            local_app_data.as_deref(),
            |dir| match self.filesystem.subdirectories(dir) {
                Ok(installs) => installs,
                Err(e) => {
                    log::warn!("couldn't list {}: {e}", dir.display());
                    None
                }
            },
        );

        match &decision {
            Decision::Bootstrap(config) => {
                self.filesystem
                    .write(&config_path, &config.to_file_contents())
                    .with_context(|| {
                        format!("failed to write config file {}", config_path.display())
                    })?;
                log::info!(
                    "wrote {} with interpreter '{}'; edit it before the next run",
                    config_path.display(),
                    config.executable
                );
            }
            Decision::Launch(spec) => {
                log::info!(
                    "Running:\n$ {} {}",
                    spec.executable,
                    spec.arguments.to_string_lossy()
                );
                self.starter
                    .start_detached(&spec.executable, &spec.arguments)
                    .with_context(|| format!("failed to start {}", spec.executable))?;
            }
            Decision::Noop => {
                log::debug!(
                    "{} has fewer than two lines, nothing to do",
                    config_path.display()
                );
            }
        }
        Ok(decision)
    }
}
