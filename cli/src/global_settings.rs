use clap::{arg, Arg, ArgAction, ArgMatches};
use chrono::{Local, NaiveDate};
use ledger_api::settings::ClientSettings;
use std::time::Duration;

pub struct GlobalSettings {
    pub client: ClientSettings,

    // 0 for warnings only, 1 for info, 2 and more for debug
    pub verbosity: u8,

    // Reference date for all relative dates ("a year ago").
    pub today: NaiveDate,
}

impl GlobalSettings {
    /// Return the command line switches to configure the global settings
    pub fn cli() -> impl IntoIterator<Item = Arg> {
        [
            arg!(--server [URL] "Base url of the ledger API")
                .default_value("http://localhost:8080/api")
                .global(true),
            arg!(--timeout [SECONDS] "Maximum duration of each request")
                .value_parser(clap::value_parser!(u64))
                .default_value("30")
                .global(true),
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Show more logs (repeat for more details)")
                .action(ArgAction::Count)
                .global(true),
        ]
    }

    /// Create the settings from the command line arguments.
    pub fn new(args: &ArgMatches) -> Self {
        let mut client = ClientSettings::default();
        if let Some(server) = args.get_one::<String>("server") {
            client = client.with_base_url(server);
        }
        if let Some(timeout) = args.get_one::<u64>("timeout") {
            client = client.with_timeout(Duration::from_secs(*timeout));
        }
        GlobalSettings {
            client,
            verbosity: args.get_count("verbose"),
            today: Local::now().date_naive(),
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbosity {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::args::build_cli;
    use crate::global_settings::GlobalSettings;
    use std::time::Duration;

    #[test]
    fn test_settings() {
        let m = build_cli()
            .try_get_matches_from(["ledger", "tree"])
            .unwrap();
        let g = GlobalSettings::new(&m);
        assert_eq!(g.client.base_url, "http://localhost:8080/api");
        assert_eq!(g.client.timeout, Duration::from_secs(30));
        assert_eq!(g.log_level(), log::LevelFilter::Warn);

        let m = build_cli()
            .try_get_matches_from([
                "ledger", "tree", "--timeout", "5", "--server",
                "https://x.org/api/", "-v",
            ])
            .unwrap();
        let g = GlobalSettings::new(&m);
        assert_eq!(g.client.base_url, "https://x.org/api");
        assert_eq!(g.client.timeout, Duration::from_secs(5));
        assert_eq!(g.log_level(), log::LevelFilter::Info);
    }
}
