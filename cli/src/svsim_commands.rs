use clap::{Arg, ArgAction, Command};

fn verbose() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Debug mode")
}

fn subcommand_simulate() -> Command {
    Command::new("simulate")
        .version("0.1")
        .author("BanshoMasutani")
        .about("Simulate mutation histories based on the given TOML file.")
        .arg(
            Arg::new("profile")
                .short('p')
                .long("profile")
                .required(true)
                .value_name("TOML")
                .help("TOML configuration file. See profile.toml for an example."),
        )
}

fn subcommand_evidence() -> Command {
    Command::new("evidence")
        .version("0.1")
        .author("BanshoMasutani")
        .about("Extract adjacency and segment copy numbers of a mutated genome.")
        .arg(verbose())
        .arg(
            Arg::new("reference")
                .short('r')
                .long("reference")
                .required(true)
                .value_name("JSON")
                .help("Reference genome."),
        )
        .arg(
            Arg::new("history")
                .short('g')
                .long("history")
                .required(true)
                .value_name("JSON")
                .help("A history or a genome. The last genome of a history is used."),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .required(false)
                .value_name("TSV")
                .help("Output file. If not given, written to the STDOUT."),
        )
}

fn subcommand_compare() -> Command {
    Command::new("compare")
        .version("0.1")
        .author("BanshoMasutani")
        .about("Compare an inferred adjacency copy-number profile with the true one.")
        .arg(verbose())
        .arg(
            Arg::new("reference")
                .short('r')
                .long("reference")
                .required(true)
                .value_name("JSON")
                .help("Reference genome."),
        )
        .arg(
            Arg::new("truth")
                .short('t')
                .long("truth")
                .required(true)
                .value_name("JSON")
                .help("The true history or genome."),
        )
        .arg(
            Arg::new("inferred")
                .short('i')
                .long("inferred")
                .required(true)
                .value_name("JSON")
                .help("Inferred genome, or a list of {adjacency, phasing, copy_number}."),
        )
}

pub fn svsim_parser() -> Command {
    Command::new("svsim")
        .version("0.1")
        .author("Bansho Masutani <ban-m@g.ecc.u-tokyo.ac.jp>")
        .about("Structural variant history simulator")
        .arg_required_else_help(true)
        .subcommand(subcommand_simulate())
        .subcommand(subcommand_evidence())
        .subcommand(subcommand_compare())
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn parse_commands() {
        svsim_parser().debug_assert();
        let matches = svsim_parser()
            .try_get_matches_from(["svsim", "evidence", "-vv", "-r", "ref.json", "-g", "0.json"])
            .unwrap();
        let (name, sub_m) = matches.subcommand().unwrap();
        assert_eq!(name, "evidence");
        assert_eq!(sub_m.get_count("verbose"), 2);
        let history: &String = sub_m.get_one("history").unwrap();
        assert_eq!(history, "0.json");
        assert!(sub_m.get_one::<String>("output").is_none());
        let result = svsim_parser().try_get_matches_from(["svsim", "compare", "-r", "ref.json"]);
        assert!(result.is_err());
    }
}
