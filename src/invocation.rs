use std::{
    ffi::{OsStr, OsString},
    path::Path,
};

pub const DATA_FILE_EXTENSION: &str = ".bol";
pub const MODEL_FLAG: &str = "bmd";

/// What the launcher picked out of its command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationArgs {
    /// kept as the OS handed it over, it needn't be valid UTF-8
    pub data_file: Option<OsString>,
    pub model_flag: Option<String>,
}

impl InvocationArgs {
    /// Scans `args` (program path already removed) left to right. Later
    /// matches overwrite earlier ones and anything unrecognised is ignored.
    pub fn resolve<I, F>(args: I, is_file: F) -> Self
    where
        I: IntoIterator,
        I::Item: Into<OsString>,
        F: Fn(&Path) -> bool,
    {
        let mut resolved = InvocationArgs::default();
        for arg in args {
            let arg: OsString = arg.into();
            if is_data_file_name(&arg) && is_file(Path::new(&arg)) {
                log::debug!("using data file {}", Path::new(&arg).display());
                resolved.data_file = Some(arg);
            } else if arg == MODEL_FLAG {
                resolved.model_flag = Some(MODEL_FLAG.to_string());
            }
        }
        resolved
    }
}

/// Case-sensitive, and a name shorter than the extension never matches.
fn is_data_file_name(arg: &OsStr) -> bool {
    arg.as_encoded_bytes()
        .ends_with(DATA_FILE_EXTENSION.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn everything_exists(_: &Path) -> bool {
        true
    }

    #[test]
    fn picks_existing_bol_file() {
        let dir = tempfile::tempdir().unwrap();
        let bol = dir.path().join("luigi_circuit.bol");
        let txt = dir.path().join("report.txt");
        std::fs::write(&bol, b"").unwrap();
        std::fs::write(&txt, b"").unwrap();

        let args = InvocationArgs::resolve([&txt, &bol], |path: &Path| path.is_file());
        assert_eq!(args.data_file.as_deref(), Some(bol.as_os_str()));
        assert_eq!(args.model_flag, None);
    }

    #[test]
    fn existing_non_bol_file_is_never_selected() {
        let dir = tempfile::tempdir().unwrap();
        let txt = dir.path().join("report.txt");
        std::fs::write(&txt, b"").unwrap();

        let args = InvocationArgs::resolve([&txt], |path: &Path| path.is_file());
        assert_eq!(args, InvocationArgs::default());
    }

    #[test]
    fn missing_bol_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.bol");

        let args = InvocationArgs::resolve([&missing], |path: &Path| path.is_file());
        assert_eq!(args.data_file, None);
    }

    #[test]
    fn directory_named_like_bol_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("track.bol");
        std::fs::create_dir(&folder).unwrap();

        let args = InvocationArgs::resolve([&folder], |path: &Path| path.is_file());
        assert_eq!(args.data_file, None);
    }

    #[test]
    fn extension_is_case_sensitive() {
        let args = InvocationArgs::resolve(["COURSE.BOL", "course.Bol"], everything_exists);
        assert_eq!(args.data_file, None);
    }

    #[test]
    fn last_bol_file_wins() {
        let args = InvocationArgs::resolve(["a.bol", "bmd", "b.bol"], everything_exists);
        assert_eq!(args.data_file.as_deref(), Some(OsStr::new("b.bol")));
        assert_eq!(args.model_flag.as_deref(), Some("bmd"));
    }

    #[test]
    fn only_exact_bmd_sets_model_flag() {
        let args =
            InvocationArgs::resolve(["BMD", "bmd.exe", "-bmd", "bmdx"], |_: &Path| false);
        assert_eq!(args.model_flag, None);

        let args = InvocationArgs::resolve(["bmd"], |_: &Path| false);
        assert_eq!(args.model_flag.as_deref(), Some("bmd"));
    }

    #[test]
    fn short_arguments_do_not_match() {
        let args = InvocationArgs::resolve(["", "b", "bol", ".bo"], everything_exists);
        assert_eq!(args, InvocationArgs::default());
    }

    #[test]
    fn bare_extension_counts_when_it_exists() {
        let args = InvocationArgs::resolve([".bol"], everything_exists);
        assert_eq!(args.data_file.as_deref(), Some(OsStr::new(".bol")));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_arguments_are_scanned_without_panicking() {
        use std::os::unix::ffi::OsStringExt;

        let ignored = OsString::from_vec(b"\xff\xfe.txt".to_vec());
        let course = OsString::from_vec(b"\xffcourse.bol".to_vec());

        let args = InvocationArgs::resolve([ignored, course.clone()], everything_exists);
        assert_eq!(args.data_file, Some(course));
        assert_eq!(args.model_flag, None);
    }
}
