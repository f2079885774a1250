use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::info;
use natal_chart::{
    BODY_CATALOG, ChartPoint, ChartRequest, HouseSystem, Position, angular_difference,
    compute_angles, compute_natal, compute_positions, compute_synastry, compute_transit,
    deg_to_dms, houses_for_angles, lunar_nodes, match_aspect, normalize_360, sign_position,
};
use natal_config::Settings;
use natal_ephem::{Body, Engine, EngineConfig, Observer};
use natal_time::UtcTime;

mod output;

use output::{
    NatalJson, PositionJson, SynastryJson, TransitJson, print_aspects, print_houses, print_json,
    print_natal, print_positions,
};

#[derive(Parser)]
#[command(name = "natal", about = "Natal, synastry and transit chart calculator")]
struct Cli {
    /// Configuration file (default: natal.toml, then config/natal.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    /// Raise log level (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

/// Time and place of a chart.
#[derive(Args, Clone)]
struct ChartArgs {
    /// Date and time, YYYY-MM-DDThh:mm[:ss][Z|±hh:mm]
    #[arg(long)]
    date: String,
    /// Offset of the --date clock from UTC in hours (e.g. 5.5, -4)
    #[arg(long, allow_hyphen_values = true)]
    utc_offset: Option<f64>,
    /// Latitude in degrees, north positive
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,
    /// Longitude in degrees, east positive
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,
    /// Elevation in metres
    #[arg(long, default_value = "0")]
    elevation: f64,
}

/// Second chart for synastry.
#[derive(Args, Clone)]
struct PartnerArgs {
    /// Partner date and time
    #[arg(long)]
    date_b: String,
    /// Partner clock offset from UTC in hours
    #[arg(long, allow_hyphen_values = true)]
    utc_offset_b: Option<f64>,
    /// Partner latitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    lat_b: f64,
    /// Partner longitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    lon_b: f64,
}

#[derive(Subcommand)]
enum Commands {
    /// Zodiac sign of an ecliptic longitude
    Sign {
        /// Ecliptic longitude in degrees
        #[arg(allow_hyphen_values = true)]
        lon: f64,
    },
    /// Convert degrees to DMS
    Dms {
        /// Angle in decimal degrees
        #[arg(allow_hyphen_values = true)]
        deg: f64,
    },
    /// Normalize an angle to [0, 360)
    Normalize {
        #[arg(allow_hyphen_values = true)]
        deg: f64,
    },
    /// Shortest separation between two longitudes, and the aspect it forms
    Separation {
        #[arg(allow_hyphen_values = true)]
        a: f64,
        #[arg(allow_hyphen_values = true)]
        b: f64,
    },
    /// Sidereal time, obliquity, Ascendant and Midheaven
    Angles {
        #[command(flatten)]
        chart: ChartArgs,
    },
    /// House cusps
    Houses {
        #[command(flatten)]
        chart: ChartArgs,
        /// placidus, koch, campanus, regiomontanus, equal, wholesign
        #[arg(long)]
        system: Option<String>,
    },
    /// Body positions with retrograde flags
    Positions {
        #[command(flatten)]
        chart: ChartArgs,
        /// Mean positions (no nutation)
        #[arg(long)]
        mean: bool,
    },
    /// Mean lunar nodes
    Nodes {
        /// Date and time
        #[arg(long)]
        date: String,
    },
    /// Full natal chart
    Natal {
        #[command(flatten)]
        chart: ChartArgs,
        /// House system (overrides configuration)
        #[arg(long)]
        system: Option<String>,
        /// Leave out the lunar nodes
        #[arg(long)]
        no_nodes: bool,
    },
    /// Cross aspects between two natal charts
    Synastry {
        #[command(flatten)]
        chart: ChartArgs,
        #[command(flatten)]
        partner: PartnerArgs,
    },
    /// Transiting bodies against a natal chart
    Transit {
        #[command(flatten)]
        chart: ChartArgs,
        /// Transit date and time (UTC unless suffixed)
        #[arg(long)]
        transit_date: String,
    },
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("{msg}");
    std::process::exit(1);
}

fn parse_time(date: &str, utc_offset: Option<f64>) -> UtcTime {
    let t: UtcTime = date
        .parse()
        .unwrap_or_else(|e| fail(format!("Invalid date '{date}': {e}")));
    match utc_offset {
        // Clock time is local; seconds are dropped.
        Some(offset) => UtcTime::from_local(t.year, t.month, t.day, t.hour, t.minute, offset)
            .unwrap_or_else(|e| fail(format!("Invalid local time: {e}"))),
        None => t,
    }
}

fn parse_system(name: &str) -> HouseSystem {
    name.parse().unwrap_or_else(|e| {
        eprintln!("{e}");
        fail("Valid: placidus, koch, campanus, regiomontanus, equal, wholesign")
    })
}

fn load_settings(path: Option<&PathBuf>) -> Settings {
    let (settings, used) = Settings::load(path.map(PathBuf::as_path))
        .unwrap_or_else(|e| fail(format!("Failed to load configuration: {e}")));
    if let Some(p) = used {
        info!("configuration from {}", p.display());
    }
    settings
}

fn engine_for(settings: &Settings, mean: bool) -> Engine {
    Engine::new(EngineConfig {
        apparent: settings.apparent && !mean,
        ..EngineConfig::default()
    })
}

impl ChartArgs {
    fn time(&self) -> UtcTime {
        parse_time(&self.date, self.utc_offset)
    }

    fn observer(&self) -> Observer {
        Observer::new(self.lat, self.lon, self.elevation)
    }

    fn request(&self, settings: &Settings) -> ChartRequest {
        settings.apply(ChartRequest::new(self.time(), self.observer()))
    }
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    let settings = load_settings(cli.config.as_ref());

    match cli.command {
        Commands::Sign { lon } => {
            let sp = sign_position(lon);
            println!(
                "{} {} ({}) - {} ({:.4} deg in sign)",
                sp.sign.symbol(),
                sp.sign.name(),
                sp.sign.element().name(),
                sp.formatted(),
                sp.degrees_in_sign
            );
            if sp.defaulted {
                eprintln!("warning: input was not a finite number; defaulted to 0° Aries");
            }
        }

        Commands::Dms { deg } => {
            let dms = deg_to_dms(deg);
            let sign = if deg < 0.0 { "-" } else { "" };
            println!("{sign}{}° {}' {}\"", dms.degrees, dms.minutes, dms.seconds);
        }

        Commands::Normalize { deg } => {
            println!("{:.6}", normalize_360(deg));
        }

        Commands::Separation { a, b } => {
            let sep = angular_difference(a, b);
            println!("Separation: {sep:.4} deg");
            let catalog = settings.aspects;
            let pa = Position::new(ChartPoint::Body(Body::Sun), a, 0.0, false);
            let pb = Position::new(ChartPoint::Body(Body::Moon), b, 0.0, false);
            match match_aspect(&pa, &pb, &catalog) {
                Some(asp) => println!(
                    "Aspect: {} {} (orb {:.2}{})",
                    asp.aspect.symbol,
                    asp.aspect.name(),
                    asp.orb_deg,
                    if asp.exact { ", exact" } else { "" }
                ),
                None => println!("Aspect: none"),
            }
        }

        Commands::Angles { chart } => {
            let t = chart.time();
            let a = compute_angles(t.to_jd(), chart.lat, chart.lon);
            println!("Time:       {t}");
            println!("JD (UTC):   {:.6}", a.frame.jd_utc);
            println!("GMST:       {:.6} deg", a.frame.gmst_deg);
            println!("LST (RAMC): {:.6} deg", a.frame.ramc_deg);
            println!("Obliquity:  {:.6} deg", a.frame.obliquity_deg);
            if a.is_valid() {
                println!(
                    "Ascendant:  {:.6} deg  {}",
                    a.ascendant_deg,
                    sign_position(a.ascendant_deg).formatted()
                );
            } else {
                println!("Ascendant:  undefined at this latitude");
            }
            println!(
                "Midheaven:  {:.6} deg  {}",
                a.midheaven_deg,
                sign_position(a.midheaven_deg).formatted()
            );
        }

        Commands::Houses { chart, system } => {
            let system = system.as_deref().map_or(settings.house_system, parse_system);
            let t = chart.time();
            let angles = compute_angles(t.to_jd(), chart.lat, chart.lon);
            let houses = houses_for_angles(&angles, system);
            if cli.json {
                print_json(&output::HousesJson::new(&houses));
            } else {
                print_houses(&houses);
            }
        }

        Commands::Positions { chart, mean } => {
            let engine = engine_for(&settings, mean);
            let t = chart.time();
            let positions = compute_positions(&engine, &BODY_CATALOG, t.to_jd(), chart.observer());
            if cli.json {
                let rows: Vec<_> = positions.iter().map(|p| PositionJson::new(p, None)).collect();
                print_json(&rows);
            } else {
                println!("Time: {t}");
                print_positions(&positions, None);
            }
        }

        Commands::Nodes { date } => {
            let t = parse_time(&date, None);
            let nodes = lunar_nodes(t.to_jd());
            let [north, south] = nodes.positions();
            if cli.json {
                print_json(&[PositionJson::new(&north, None), PositionJson::new(&south, None)]);
            } else {
                print_positions(&[north, south], None);
            }
        }

        Commands::Natal {
            chart,
            system,
            no_nodes,
        } => {
            let engine = engine_for(&settings, false);
            let mut request = chart.request(&settings);
            if let Some(name) = system.as_deref() {
                request.house_system = parse_system(name);
            }
            if no_nodes {
                request.include_nodes = false;
            }
            let natal = compute_natal(&engine, &request).unwrap_or_else(|e| fail(e));
            if cli.json {
                print_json(&NatalJson::new(&natal));
            } else {
                print_natal(&natal);
            }
        }

        Commands::Synastry { chart, partner } => {
            let engine = engine_for(&settings, false);
            let first = chart.request(&settings);
            let second = settings.apply(ChartRequest::new(
                parse_time(&partner.date_b, partner.utc_offset_b),
                Observer::new(partner.lat_b, partner.lon_b, 0.0),
            ));
            let syn = compute_synastry(&engine, &first, &second).unwrap_or_else(|e| fail(e));
            if cli.json {
                print_json(&SynastryJson::new(&syn));
            } else {
                println!("Chart A: {}", syn.first.time);
                println!("Chart B: {}", syn.second.time);
                println!();
                println!("Synastry aspects (A → B):");
                print_aspects(&syn.aspects);
            }
        }

        Commands::Transit {
            chart,
            transit_date,
        } => {
            let engine = engine_for(&settings, false);
            let request = chart.request(&settings);
            let when = parse_time(&transit_date, None);
            let transit = compute_transit(&engine, &request, when).unwrap_or_else(|e| fail(e));
            if cli.json {
                print_json(&TransitJson::new(&transit));
            } else {
                println!("Natal:   {}", transit.natal.time);
                println!("Transit: {}", transit.time);
                println!();
                println!("Transit positions (natal houses):");
                print_positions(&transit.positions, Some(&transit.placements));
                println!();
                println!("Transit aspects (transit → natal):");
                print_aspects(&transit.aspects);
            }
        }
    }
}
