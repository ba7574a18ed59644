use crate::global_settings::GlobalSettings;
use clap::{Arg, Command};

pub(crate) fn build_cli() -> Command {
    Command::new("ledger")
        .version("0.1")
        .about("Browse the accounts of a ledger server")
        .subcommand_required(true)
        .subcommand_precedence_over_arg(true) // --x val1 val2 subcommand
        .flatten_help(true) // show help for all subcommands
        .arg_required_else_help(true) // show full help if nothing given
        .args(GlobalSettings::cli())
        .subcommand(
            Command::new("tree").about("Show the tree of accounts"),
        )
        .subcommand(
            Command::new("accounts")
                .about("Show the accounts classified as income or expense")
                .args(crate::accounts_view::Settings::cli()),
        )
        .subcommand(
            Command::new("stats")
                .about("Show statistics for income or expense accounts")
                .args(crate::stats_view::Settings::cli()),
        )
        .subcommand(
            // Use    eval "$(ledger completions zsh)"
            Command::new("completions")
                .about("Generate shell completions")
                .arg(
                    Arg::new("shell")
                        .value_name("SHELL")
                        .help("The shell to generate the completions for")
                        .required(true)
                        .value_parser(clap::builder::EnumValueParser::<
                            clap_complete_command::Shell,
                        >::new()),
                ),
        )
}

#[cfg(test)]
mod test {
    use crate::args::build_cli;

    #[test]
    fn test_cli() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_parse() {
        let m = build_cli()
            .try_get_matches_from([
                "ledger", "--server", "http://h/api", "-vv", "stats",
                "--type", "income", "--months", "3", "101", "102",
            ])
            .unwrap();
        assert_eq!(
            m.get_one::<String>("server").map(String::as_str),
            Some("http://h/api")
        );
        assert_eq!(m.get_count("verbose"), 2);
        let (name, sub) = m.subcommand().unwrap();
        assert_eq!(name, "stats");
        assert_eq!(sub.get_one::<u32>("months"), Some(&3));
        assert_eq!(
            sub.get_many::<String>("ids").unwrap().collect::<Vec<_>>(),
            ["101", "102"]
        );
    }
}
