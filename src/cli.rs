use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, Command};

pub const ARG_MAIN: &str = "main";
pub const ARG_TAG: &str = "tag";
pub const ARG_OUTPUT: &str = "output";
pub const ARG_TEMP_DIR: &str = "temp-dir";
pub const ARG_QUIET: &str = "quiet";
pub const ARG_VERBOSE: &str = "verbose";

pub const ENV_MAIN: &str = "TAGWRAP_MAIN_AUDIO";
pub const ENV_TAG: &str = "TAGWRAP_TAG_AUDIO";
pub const ENV_OUTPUT: &str = "TAGWRAP_OUTPUT";
pub const ENV_TEMP_DIR: &str = "TAGWRAP_TEMP_DIR";

pub fn build_cli() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .about("Wrap an audio file with an opening and closing station tag")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new(ARG_MAIN)
                .short('m')
                .long("main")
                .value_name("FILE")
                .help("The programme audio to wrap (mp3 or wav)")
                .env(ENV_MAIN)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(ARG_TAG)
                .short('t')
                .long("tag")
                .value_name("FILE")
                .help("The station tag played before and after the programme")
                .env(ENV_TAG)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(ARG_OUTPUT)
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Where to write the wrapped file; the extension picks the format")
                .env(ENV_OUTPUT)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(ARG_TEMP_DIR)
                .long("temp-dir")
                .value_name("DIR")
                .help("Root for per-run scratch files (defaults to the system temp dir)")
                .env(ENV_TEMP_DIR)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(ARG_QUIET)
                .short('q')
                .long("quiet")
                .help("Suppress the progress bar")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(ARG_VERBOSE)
                .short('v')
                .long("verbose")
                .help("Log at debug level")
                .action(ArgAction::SetTrue),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_long_flags() {
        let matches = build_cli()
            .try_get_matches_from([
                "tagwrap",
                "--main",
                "show.wav",
                "--tag",
                "ident.wav",
                "--output",
                "final.wav",
            ])
            .unwrap();
        assert_eq!(
            matches.get_one::<PathBuf>(ARG_MAIN),
            Some(&PathBuf::from("show.wav"))
        );
        assert_eq!(
            matches.get_one::<PathBuf>(ARG_OUTPUT),
            Some(&PathBuf::from("final.wav"))
        );
        assert!(!matches.get_flag(ARG_QUIET));
    }

    #[test]
    fn accepts_short_flags() {
        let matches = build_cli()
            .try_get_matches_from(["tagwrap", "-m", "a.mp3", "-t", "b.mp3", "-o", "c.mp3", "-q"])
            .unwrap();
        assert_eq!(
            matches.get_one::<PathBuf>(ARG_TAG),
            Some(&PathBuf::from("b.mp3"))
        );
        assert!(matches.get_flag(ARG_QUIET));
    }

    #[test]
    fn path_arguments_are_optional_at_parse_time() {
        // Missing values are reported later, once env fallbacks have
        // had their say.
        let matches = build_cli().try_get_matches_from(["tagwrap", "-v"]).unwrap();
        assert!(matches.get_flag(ARG_VERBOSE));
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(build_cli()
            .try_get_matches_from(["tagwrap", "--frobnicate"])
            .is_err());
    }
}
