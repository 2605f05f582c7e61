// Opened from Explorer, so no console window unless logging goes to stderr.
#![cfg_attr(
    all(target_os = "windows", not(feature = "stderr_log")),
    windows_subsystem = "windows"
)]

use mkdd_bol_editor::{
    host::{DetachedStarter, OsEnvironment, OsFilesystem},
    installation_location::launcher_directory,
    launcher::Launcher,
    logging,
};

fn main() -> anyhow::Result<()> {
    let _logger = match logging::init() {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("logging disabled: {e:?}");
            None
        }
    };

    let directory = launcher_directory()?;
    let environment = OsEnvironment {
        reference_path: &directory,
    };
    let launcher = Launcher {
        directory: &directory,
        environment: &environment,
        filesystem: &OsFilesystem,
        starter: &DetachedStarter,
    };
    let decision = launcher.run(std::env::args_os().skip(1)).inspect_err(|e| {
        log::error!("{e:?}");
    })?;
    log::debug!("finished with {decision:?}");
    Ok(())
}
