use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::ArgMatches;
use sill_config::{DrawMode, SillConfig, load_hierarchy_with};
use sill_core::events;
use sill_core::hooks::UnsupportedHooks;
use sill_core::{
    InputHooks, Playspace, WindowQuery, WindowSource, XcapWindowSource, platform_hooks,
};
use tracing::{error, info};

use crate::table;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    let config = load_config(matches)?;

    match matches.subcommand() {
        Some(("list", sub_matches)) => handle_list_command(sub_matches, &config),
        Some(("borders", sub_matches)) => handle_borders_command(sub_matches, config),
        Some(("run", sub_matches)) => handle_run_command(sub_matches, config),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}

fn load_config(matches: &ArgMatches) -> Result<SillConfig, Box<dyn std::error::Error>> {
    let explicit = matches.get_one::<PathBuf>("config");
    match load_hierarchy_with(explicit.map(PathBuf::as_path)) {
        Ok(config) => Ok(config),
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            error!(event = "cli.config_load_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

fn handle_list_command(
    matches: &ArgMatches,
    config: &SillConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match matches.subcommand() {
        Some(("windows", sub_matches)) => handle_list_windows(sub_matches, config),
        Some(("monitors", sub_matches)) => handle_list_monitors(sub_matches, config),
        _ => {
            error!(event = "cli.list_subcommand_unknown");
            Err("Unknown list subcommand".into())
        }
    }
}

fn window_query(config: &SillConfig) -> WindowQuery<XcapWindowSource> {
    WindowQuery::new(
        XcapWindowSource::new(),
        config.pipeline.title_cache_capacity(),
    )
    .with_min_window_size(config.window.min_window_size())
}

fn handle_list_windows(
    matches: &ArgMatches,
    config: &SillConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    info!(event = "cli.list_windows_started", json_output = json_output);

    match window_query(config).query_windows() {
        Ok(windows) => {
            if json_output {
                println!("{}", serde_json::to_string_pretty(&windows)?);
            } else if windows.is_empty() {
                println!("No visible windows found.");
            } else {
                println!("Visible windows:");
                table::print_windows_table(&windows);
            }

            info!(event = "cli.list_windows_completed", count = windows.len());
            Ok(())
        }
        Err(e) => {
            eprintln!("Failed to list windows: {}", e);
            error!(event = "cli.list_windows_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

fn handle_list_monitors(
    matches: &ArgMatches,
    config: &SillConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    info!(event = "cli.list_monitors_started", json_output = json_output);

    match window_query(config).query_displays() {
        Ok(displays) => {
            if json_output {
                println!("{}", serde_json::to_string_pretty(&displays)?);
            } else if displays.is_empty() {
                println!("No monitors found.");
            } else {
                println!("Monitors:");
                table::print_monitors_table(&displays);
            }

            info!(event = "cli.list_monitors_completed", count = displays.len());
            Ok(())
        }
        Err(e) => {
            eprintln!("Failed to list monitors: {}", e);
            error!(event = "cli.list_monitors_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

/// Switch `playspace` to the `--monitor` index, if one was given.
fn select_monitor<S: WindowSource, H: InputHooks>(
    playspace: &mut Playspace<S, H>,
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(&index) = matches.get_one::<usize>("monitor") else {
        return Ok(());
    };
    if let Err(e) = playspace.change_display(index) {
        eprintln!("Failed to select monitor {}: {}", index, e);
        error!(event = "cli.monitor_select_failed", index = index, error = %e);
        events::log_app_error(&e);
        return Err(e.into());
    }
    Ok(())
}

fn handle_borders_command(
    matches: &ArgMatches,
    config: SillConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    info!(event = "cli.borders_started", json_output = json_output);

    // A single resolve pass needs no input intercepts.
    let mut playspace = Playspace::new(XcapWindowSource::new(), UnsupportedHooks, config);
    select_monitor(&mut playspace, matches)?;
    playspace.tick(Duration::ZERO);

    let segments = playspace.window_top_borders();
    if json_output {
        println!("{}", serde_json::to_string_pretty(segments)?);
    } else {
        let display = playspace.current_display();
        println!(
            "Walkable surfaces on {} ({}x{}):",
            display.name,
            display.screen_width(),
            display.screen_height()
        );
        table::print_segments_table(segments);
    }

    info!(event = "cli.borders_completed", count = segments.len());
    Ok(())
}

fn handle_run_command(
    matches: &ArgMatches,
    config: SillConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    let frames = matches.get_one::<u64>("frames").copied().unwrap_or(600);
    let debug_mode = match matches.get_one::<String>("debug-mode") {
        Some(mode) => mode.parse::<DrawMode>()?,
        None => config.debug.draw_mode(),
    };
    let frame_time = Duration::from_secs_f64(1.0 / f64::from(config.playspace.target_fps()));

    info!(
        event = "cli.run_started",
        frames = frames,
        debug_mode = ?debug_mode,
        target_fps = config.playspace.target_fps()
    );

    // The CLI draws no companion window, so only the keyboard hook can attach.
    let hooks = platform_hooks(None);
    let mut playspace = Playspace::new(XcapWindowSource::new(), hooks, config);
    select_monitor(&mut playspace, matches)?;
    playspace.set_debug_mode(debug_mode);

    let mut last = Instant::now();
    for _ in 0..frames {
        let started = Instant::now();
        let report = playspace.tick(started - last);
        last = started;

        if json_output {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            println!("{}", table::format_frame_line(&report));
        }

        if let Some(remaining) = frame_time.checked_sub(started.elapsed()) {
            std::thread::sleep(remaining);
        }
    }

    playspace.shutdown();
    events::log_app_shutdown();
    info!(event = "cli.run_completed", frames = frames);
    Ok(())
}
