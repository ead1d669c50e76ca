//! Headless runner for the alien formation model.
//!
//! Loads a sprite resource, builds a formation, applies reset, clocks it
//! for a number of edges with optional scripted hits, then dumps the
//! scanned raster as text or a PNG.

use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process;

use chipinvaders_alien::capture;
use chipinvaders_alien::{BoundaryPolicy, Direction, FormationConfig, Simulation, SpriteBitmap};
use sim_core::{Observable, Tickable};

// ---------------------------------------------------------------------------
// CLI argument parsing
// ---------------------------------------------------------------------------

struct CliArgs {
    sprite_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    columns: Option<u16>,
    rows: Option<u16>,
    sprite_width: Option<u16>,
    spacing: Option<u16>,
    frequency: Option<u32>,
    step_width: Option<u16>,
    direction: Option<Direction>,
    max_x: Option<u16>,
    boundary: Option<BoundaryPolicy>,
    scale: Option<u8>,
    ticks: u64,
    hits: Vec<(u16, u16, u64)>,
    screen: (u16, u16),
    screenshot_path: Option<PathBuf>,
}

fn print_usage() {
    eprintln!("Usage: chipinvaders --sprite <file> [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --sprite <file>        Sprite resource (rows of 0/1)");
    eprintln!("  --config <file>        JSON formation config");
    eprintln!("  --cols <n>             Formation columns");
    eprintln!("  --rows <n>             Formation rows");
    eprintln!("  --sprite-width <n>     Lattice sprite width [default: bitmap width x scale]");
    eprintln!("  --spacing <n>          Gap between sprites");
    eprintln!("  --frequency <n>        Idle cycles between movement steps");
    eprintln!("  --step <n>             Pixels per movement step");
    eprintln!("  --direction <inc|dec>  Movement direction");
    eprintln!("  --max-x <n>            Right bound of the position register");
    eprintln!("  --boundary <saturate|wrap>");
    eprintln!("  --scale <n>            Pixel magnification");
    eprintln!("  --ticks <n>            Edges to run after reset [default: 0]");
    eprintln!("  --hit <col,row@tick>   Pulse an entity's hit pin (repeatable)");
    eprintln!("  --screen <WxH>         Raster to scan [default: 320x200]");
    eprintln!("  --screenshot <file>    Save a PNG instead of printing text");
    eprintln!();
    eprintln!("Set CHIPINVADERS_TRACE to print entity 0 state after every edge.");
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> T {
    match value.and_then(|s| s.parse().ok()) {
        Some(v) => v,
        None => {
            eprintln!("Invalid or missing value for {flag}");
            process::exit(1);
        }
    }
}

fn parse_hit(arg: &str) -> Option<(u16, u16, u64)> {
    let (coords, tick) = arg.split_once('@')?;
    let (col, row) = coords.split_once(',')?;
    Some((
        col.trim().parse().ok()?,
        row.trim().parse().ok()?,
        tick.trim().parse().ok()?,
    ))
}

fn parse_screen(arg: &str) -> Option<(u16, u16)> {
    let (w, h) = arg.split_once(['x', 'X'])?;
    Some((w.parse().ok()?, h.parse().ok()?))
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        sprite_path: None,
        config_path: None,
        columns: None,
        rows: None,
        sprite_width: None,
        spacing: None,
        frequency: None,
        step_width: None,
        direction: None,
        max_x: None,
        boundary: None,
        scale: None,
        ticks: 0,
        hits: Vec::new(),
        screen: (320, 200),
        screenshot_path: None,
    };

    let mut i = 1;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--sprite" => {
                i += 1;
                cli.sprite_path = args.get(i).map(PathBuf::from);
            }
            "--config" => {
                i += 1;
                cli.config_path = args.get(i).map(PathBuf::from);
            }
            "--cols" => {
                i += 1;
                cli.columns = Some(parse_value(flag, args.get(i)));
            }
            "--rows" => {
                i += 1;
                cli.rows = Some(parse_value(flag, args.get(i)));
            }
            "--sprite-width" => {
                i += 1;
                cli.sprite_width = Some(parse_value(flag, args.get(i)));
            }
            "--spacing" => {
                i += 1;
                cli.spacing = Some(parse_value(flag, args.get(i)));
            }
            "--frequency" => {
                i += 1;
                cli.frequency = Some(parse_value(flag, args.get(i)));
            }
            "--step" => {
                i += 1;
                cli.step_width = Some(parse_value(flag, args.get(i)));
            }
            "--direction" => {
                i += 1;
                cli.direction = match args.get(i).map(String::as_str) {
                    Some("inc" | "right") => Some(Direction::Increment),
                    Some("dec" | "left") => Some(Direction::Decrement),
                    Some(level @ ("0" | "1")) => Some(Direction::from_bit(level == "1")),
                    _ => {
                        eprintln!("--direction expects inc or dec");
                        process::exit(1);
                    }
                };
            }
            "--max-x" => {
                i += 1;
                cli.max_x = Some(parse_value(flag, args.get(i)));
            }
            "--boundary" => {
                i += 1;
                cli.boundary = match args.get(i).map(String::as_str) {
                    Some("saturate") => Some(BoundaryPolicy::Saturate),
                    Some("wrap") => Some(BoundaryPolicy::Wrap),
                    _ => {
                        eprintln!("--boundary expects saturate or wrap");
                        process::exit(1);
                    }
                };
            }
            "--scale" => {
                i += 1;
                cli.scale = Some(parse_value(flag, args.get(i)));
            }
            "--ticks" => {
                i += 1;
                cli.ticks = parse_value(flag, args.get(i));
            }
            "--hit" => {
                i += 1;
                match args.get(i).and_then(|s| parse_hit(s)) {
                    Some(hit) => cli.hits.push(hit),
                    None => {
                        eprintln!("--hit expects col,row@tick");
                        process::exit(1);
                    }
                }
            }
            "--screen" => {
                i += 1;
                match args.get(i).and_then(|s| parse_screen(s)) {
                    Some(screen) => cli.screen = screen,
                    None => {
                        eprintln!("--screen expects WxH");
                        process::exit(1);
                    }
                }
            }
            "--screenshot" => {
                i += 1;
                cli.screenshot_path = args.get(i).map(PathBuf::from);
            }
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

// ---------------------------------------------------------------------------
// Setup
// ---------------------------------------------------------------------------

fn build_config(cli: &CliArgs, bitmap: &SpriteBitmap) -> Result<FormationConfig, Box<dyn Error>> {
    let mut config = match cli.config_path {
        Some(ref path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("{}: {e}", path.display()))?;
            FormationConfig::from_json(&text).map_err(|e| format!("{}: {e}", path.display()))?
        }
        None => FormationConfig::default(),
    };

    let template = &mut config.template;
    if let Some(v) = cli.frequency {
        template.movement_frequency = v;
    }
    if let Some(v) = cli.step_width {
        template.step_width = v;
    }
    if let Some(v) = cli.direction {
        template.direction = v;
    }
    if let Some(v) = cli.max_x {
        template.max_position_x = v;
    }
    if let Some(v) = cli.boundary {
        template.boundary = v;
    }
    if let Some(v) = cli.scale {
        template.scale = v;
    }

    if let Some(v) = cli.columns {
        config.columns = v;
    }
    if let Some(v) = cli.rows {
        config.rows = v;
    }
    if let Some(v) = cli.spacing {
        config.spacing = v;
    }
    config.sprite_width = match cli.sprite_width {
        Some(v) => v,
        None if cli.config_path.is_some() => config.sprite_width,
        None => {
            let width = bitmap.width() * usize::from(config.template.effective_scale());
            u16::try_from(width).map_err(|_| "sprite too wide for the position register")?
        }
    };

    Ok(config)
}

fn run(cli: &CliArgs) -> Result<(), Box<dyn Error>> {
    let Some(ref sprite_path) = cli.sprite_path else {
        print_usage();
        return Err("--sprite is required".into());
    };

    let text = fs::read_to_string(sprite_path)
        .map_err(|e| format!("{}: {e}", sprite_path.display()))?;
    let bitmap =
        SpriteBitmap::parse(&text).map_err(|e| format!("{}: {e}", sprite_path.display()))?;
    eprintln!(
        "Loaded sprite: {} ({}x{}, {} ink pixels)",
        sprite_path.display(),
        bitmap.width(),
        bitmap.height(),
        bitmap.ink_count()
    );

    let config = build_config(cli, &bitmap)?;
    if !config.lattice_fits() {
        let msg = format!(
            "{}x{} formation with pitch {} overflows the position register",
            config.columns,
            config.rows,
            config.pitch()
        );
        return Err(msg.into());
    }
    eprintln!(
        "Formation: {}x{} pitch {} | frequency {} step {} {:?} max_x {} {:?}",
        config.columns,
        config.rows,
        config.pitch(),
        config.template.movement_frequency,
        config.template.step_width,
        config.template.direction,
        config.template.max_position_x,
        config.template.boundary,
    );

    let mut sim = Simulation::new(&config, bitmap);
    sim.reset();

    // Stimulus edges are given relative to the end of reset.
    let base = sim.tick_count();
    for &(col, row, tick) in &cli.hits {
        if sim.formation().index_of(col, row).is_none() {
            let msg = format!(
                "--hit {col},{row}: outside the {}x{} formation",
                config.columns, config.rows
            );
            return Err(msg.into());
        }
        sim.queue_mut().enqueue_hit(base + tick, col, row);
    }

    let trace = std::env::var("CHIPINVADERS_TRACE").is_ok();
    for _ in 0..cli.ticks {
        sim.tick();
        if trace {
            let field = |path: &str| {
                sim.query(path)
                    .map_or_else(|| "-".to_string(), |v| v.to_string())
            };
            eprintln!(
                "[TRACE] tick={} x={} y={} phase={} alive={} alive_count={}",
                field("tick"),
                field("alien.0.x"),
                field("alien.0.y"),
                field("alien.0.phase"),
                field("alien.0.alive"),
                field("alive_count"),
            );
        }
    }
    eprintln!(
        "Ran {} edges after reset: {}/{} alive",
        cli.ticks,
        sim.formation().alive_count(),
        sim.formation().len()
    );

    let (width, height) = cli.screen;
    if let Some(ref path) = cli.screenshot_path {
        capture::save_screenshot(&sim, width, height, path)?;
        eprintln!("Screenshot saved to {}", path.display());
    } else {
        let frame = sim.render_frame(width, height);
        print!("{}", capture::frame_to_text(&frame, width));
    }

    Ok(())
}

fn main() {
    let cli = parse_args();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
