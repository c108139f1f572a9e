use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("sill")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Walkable surfaces from the desktop window stack")
        .long_about(
            "sill resolves the unobstructed top edges of the windows on your desktop into \
             surfaces a desktop companion can stand and walk on, and keeps a pool of \
             colliders in step with them every frame.",
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Extra config file layered over ~/.sill and ./.sill")
                .value_name("PATH")
                .value_parser(clap::value_parser!(std::path::PathBuf))
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        // List subcommand
        .subcommand(
            Command::new("list")
                .about("List windows or monitors")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("windows")
                        .about("List visible windows, frontmost first")
                        .arg(json_arg()),
                )
                .subcommand(
                    Command::new("monitors")
                        .about("List all monitors")
                        .arg(json_arg()),
                ),
        )
        // Borders subcommand
        .subcommand(
            Command::new("borders")
                .about("Resolve the walkable window tops once and print them")
                .arg(json_arg())
                .arg(monitor_arg()),
        )
        // Run subcommand
        .subcommand(
            Command::new("run")
                .about("Run the frame loop and print a report per frame")
                .arg(
                    Arg::new("frames")
                        .long("frames")
                        .short('n')
                        .help("Number of frames to run")
                        .value_parser(clap::value_parser!(u64).range(1..))
                        .default_value("600"),
                )
                .arg(
                    Arg::new("debug-mode")
                        .long("debug-mode")
                        .short('d')
                        .help("Debug drawing mode (overrides config)")
                        .value_parser(["off", "borders", "tops"]),
                )
                .arg(monitor_arg())
                .arg(json_arg()),
        )
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .help("Output in JSON format")
        .action(ArgAction::SetTrue)
}

fn monitor_arg() -> Arg {
    Arg::new("monitor")
        .long("monitor")
        .short('m')
        .help("Monitor index to resolve against (default: config, then first)")
        .value_parser(clap::value_parser!(usize))
}
