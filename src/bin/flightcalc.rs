use std::process;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::debug;
use serde::Serialize;
use thiserror::Error;

use flight_calc::cli_api::parse_ias_history;
use flight_calc::constants::{
    EXIT_INVALID_ARGS, EXIT_OUTPUT_FAILED, EXIT_PARSE_FAILED, EXIT_SUCCESS,
};
use flight_calc::{
    Calculator, DensityAltitudeData, DensityAltitudeInputs, FlightCalcError, FlightInputs,
    FlightPerformance, GustData, GustInputs, TurnData, TurnInputs, VNAVData, VnavInputs,
    WindComponents, WindInputs, WindTriangleInputs, WindVector,
};

#[derive(Parser)]
#[command(name = "flightcalc")]
#[command(author = "Flight Calc Team")]
#[command(version)]
#[command(about = "Flight parameter calculator for multi-function displays", long_about = None)]
struct Cli {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "json", global = true)]
    output: OutputFormat,

    /// Print JSON on a single line
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve wind: <track> <heading> <wind_dir> <wind_speed>
    Wind {
        #[arg(allow_hyphen_values = true, value_name = "VALUES")]
        values: Vec<String>,
    },

    /// Turn performance: <tas_kts> <bank_deg> <course_change_deg>
    Turn {
        #[arg(allow_hyphen_values = true, value_name = "VALUES")]
        values: Vec<String>,
    },

    /// Vertical navigation: <current_alt> <target_alt> <distance_nm> <groundspeed> <current_vs>
    Vnav {
        #[arg(allow_hyphen_values = true, value_name = "VALUES")]
        values: Vec<String>,
    },

    /// Density altitude: <pressure_alt_ft> <oat_celsius> <ias_kts> <tas_kts>
    DensityAltitude {
        #[arg(allow_hyphen_values = true, value_name = "VALUES")]
        values: Vec<String>,
    },

    /// Combined wind, envelope, energy and glide from fourteen flight parameters
    Flight {
        #[arg(allow_hyphen_values = true, value_name = "VALUES")]
        values: Vec<String>,

        /// Comma separated IAS samples for the gust factor (kt)
        #[arg(long)]
        ias_history: Option<String>,
    },

    /// Wind from the air and ground vectors: <tas_kts> <gs_kts> <heading> <track>
    WindTriangle {
        #[arg(allow_hyphen_values = true, value_name = "VALUES")]
        values: Vec<String>,

        /// Comma separated IAS samples for the gust factor (kt)
        #[arg(long)]
        ias_history: Option<String>,
    },

    /// Gust factor over IAS samples: [ias_kts ...]
    Gust {
        #[arg(allow_hyphen_values = true, value_name = "IAS")]
        values: Vec<String>,
    },
}

impl Commands {
    fn usage(&self) -> (&'static str, &'static str) {
        match self {
            Commands::Wind { .. } => ("wind", WindInputs::USAGE),
            Commands::Turn { .. } => ("turn", TurnInputs::USAGE),
            Commands::Vnav { .. } => ("vnav", VnavInputs::USAGE),
            Commands::DensityAltitude { .. } => ("density-altitude", DensityAltitudeInputs::USAGE),
            Commands::Flight { .. } => ("flight", FlightInputs::USAGE),
            Commands::WindTriangle { .. } => ("wind-triangle", WindTriangleInputs::USAGE),
            Commands::Gust { .. } => ("gust", GustInputs::USAGE),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
    Csv,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Input(#[from] FlightCalcError),

    #[error("failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Input(err) => err.exit_code(),
            CliError::Encode(_) => EXIT_OUTPUT_FAILED,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => exit_on_clap_error(err),
    };

    let (name, usage) = cli.command.usage();
    let code = match run(cli) {
        Ok(()) => EXIT_SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            if let CliError::Input(FlightCalcError::ArgumentCount { .. }) = &err {
                eprintln!("Usage: flightcalc {name} {usage}");
            }
            err.exit_code()
        }
    };

    process::exit(code);
}

/// Help and version exit 0; malformed option values exit as parse failures
/// and every other command line error as invalid arguments.
fn exit_on_clap_error(err: clap::Error) -> ! {
    let code = match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => EXIT_SUCCESS,
        ErrorKind::InvalidValue | ErrorKind::ValueValidation => EXIT_PARSE_FAILED,
        _ => EXIT_INVALID_ARGS,
    };
    // Nothing more to report if stderr is gone
    let _ = err.print();
    process::exit(code);
}

fn run(cli: Cli) -> Result<(), CliError> {
    let Cli {
        output,
        compact,
        command,
    } = cli;
    debug!("output format {output:?}");

    match command {
        Commands::Wind { values } => {
            let wind = WindInputs::from_args(&values)?.evaluate()?;
            display(&wind, output, compact)
        }
        Commands::Turn { values } => {
            let turn = TurnInputs::from_args(&values)?.evaluate()?;
            display(&turn, output, compact)
        }
        Commands::Vnav { values } => {
            let vnav = VnavInputs::from_args(&values)?.evaluate()?;
            display(&vnav, output, compact)
        }
        Commands::DensityAltitude { values } => {
            let density = DensityAltitudeInputs::from_args(&values)?.evaluate()?;
            display(&density, output, compact)
        }
        Commands::Flight {
            values,
            ias_history,
        } => {
            let mut inputs = FlightInputs::from_args(&values)?;
            if let Some(list) = ias_history {
                inputs = inputs.with_ias_history(parse_ias_history(&list)?)?;
            }
            display(&inputs.evaluate()?, output, compact)
        }
        Commands::WindTriangle {
            values,
            ias_history,
        } => {
            let mut inputs = WindTriangleInputs::from_args(&values)?;
            if let Some(list) = ias_history {
                inputs = inputs.with_ias_history(parse_ias_history(&list)?)?;
            }
            display(&inputs.evaluate()?, output, compact)
        }
        Commands::Gust { values } => {
            let gust = GustInputs::from_args(&values)?.evaluate()?;
            display(&gust, output, compact)
        }
    }
}

enum Row {
    Section(&'static str),
    Field {
        label: &'static str,
        value: String,
        unit: &'static str,
    },
}

fn field(label: &'static str, value: f64, unit: &'static str) -> Row {
    Row::Field {
        label,
        value: format!("{value:.2}"),
        unit,
    }
}

fn flag(label: &'static str, value: bool) -> Row {
    Row::Field {
        label,
        value: if value { "yes" } else { "no" }.to_string(),
        unit: "",
    }
}

/// A result that can be printed as a table or CSV as well as JSON.
trait Report: Serialize {
    const TITLE: &'static str;

    fn rows(&self) -> Vec<Row>;
}

impl Report for WindComponents {
    const TITLE: &'static str = "WIND COMPONENTS";

    fn rows(&self) -> Vec<Row> {
        vec![
            field("Headwind", self.headwind, "kt"),
            field("Crosswind", self.crosswind, "kt"),
            field("Total Wind", self.total_wind, "kt"),
            field("Wind Correction", self.wca, "deg"),
            field("Drift", self.drift, "deg"),
        ]
    }
}

impl Report for TurnData {
    const TITLE: &'static str = "TURN PERFORMANCE";

    fn rows(&self) -> Vec<Row> {
        vec![
            field("Radius", self.radius_nm, "nm"),
            field("Radius", self.radius_ft, "ft"),
            field("Turn Rate", self.turn_rate_dps, "deg/s"),
            field("Lead Distance", self.lead_distance_nm, "nm"),
            field("Lead Distance", self.lead_distance_ft, "ft"),
            field("Time to Turn", self.time_to_turn_sec, "s"),
            field("Load Factor", self.load_factor, "g"),
            field("Std Rate Bank", self.standard_rate_bank, "deg"),
        ]
    }
}

impl Report for VNAVData {
    const TITLE: &'static str = "VERTICAL NAVIGATION";

    fn rows(&self) -> Vec<Row> {
        vec![
            field("Altitude to Lose", self.altitude_to_lose_ft, "ft"),
            field("Path Angle", self.flight_path_angle_deg, "deg"),
            field("Required VS", self.required_vs_fpm, "fpm"),
            field("TOD Distance", self.tod_distance_nm, "nm"),
            field("Time to Constraint", self.time_to_constraint_min, "min"),
            field("Distance / 1000 ft", self.distance_per_1000ft, "nm"),
            field("VS for 3 deg", self.vs_for_3deg, "fpm"),
            flag("Descent", self.is_descent),
        ]
    }
}

impl Report for DensityAltitudeData {
    const TITLE: &'static str = "DENSITY ALTITUDE";

    fn rows(&self) -> Vec<Row> {
        vec![
            field("Density Altitude", self.density_altitude_ft, "ft"),
            field("Pressure Altitude", self.pressure_altitude_ft, "ft"),
            field("Density Ratio", self.air_density_ratio, ""),
            field("Pressure Ratio", self.pressure_ratio, ""),
            field("ISA Deviation", self.temperature_deviation_c, "C"),
            field("Performance Loss", self.performance_loss_pct, "%"),
            field("EAS", self.eas_kts, "kt"),
            field("TAS / IAS", self.tas_to_ias_ratio, ""),
        ]
    }
}

impl Report for WindVector {
    const TITLE: &'static str = "WIND TRIANGLE";

    fn rows(&self) -> Vec<Row> {
        wind_vector_rows(self)
    }
}

fn wind_vector_rows(wind: &WindVector) -> Vec<Row> {
    vec![
        field("Wind Speed", wind.speed_kts, "kt"),
        field("Wind From", wind.direction_from, "deg"),
        field("Headwind", wind.headwind, "kt"),
        field("Crosswind", wind.crosswind, "kt"),
        field("Gust Factor", wind.gust_factor, "kt"),
    ]
}

impl Report for GustData {
    const TITLE: &'static str = "GUST FACTOR";

    fn rows(&self) -> Vec<Row> {
        vec![
            field("Gust Factor", self.gust_factor, "kt"),
            Row::Field {
                label: "Samples",
                value: self.samples.to_string(),
                unit: "",
            },
        ]
    }
}

impl Report for FlightPerformance {
    const TITLE: &'static str = "FLIGHT PERFORMANCE";

    fn rows(&self) -> Vec<Row> {
        let mut rows = vec![Row::Section("WIND")];
        rows.extend(wind_vector_rows(&self.wind));

        rows.push(Row::Section("ENVELOPE"));
        rows.extend([
            field("Stall Margin", self.envelope.stall_margin_pct, "%"),
            field("VMO Margin", self.envelope.vmo_margin_pct, "%"),
            field("MMO Margin", self.envelope.mmo_margin_pct, "%"),
            field("Min Margin", self.envelope.min_margin_pct, "%"),
            field("Corner Speed", self.envelope.corner_speed_kts, "kt"),
            field("Load Factor", self.envelope.load_factor, "g"),
        ]);

        rows.push(Row::Section("ENERGY"));
        rows.extend([
            field("Specific Energy", self.energy.specific_energy_ft, "ft"),
            field("Energy Rate", self.energy.specific_energy_rate, "fpm"),
            Row::Field {
                label: "Trend",
                value: (self.energy.trend as i8).to_string(),
                unit: "",
            },
        ]);

        rows.push(Row::Section("GLIDE"));
        rows.extend([
            field("Max Range", self.glide.max_range_nm, "nm"),
            field("Range with Wind", self.glide.max_range_with_wind_nm, "nm"),
            field("Glide Ratio", self.glide.glide_ratio, ""),
            field("Best Glide Speed", self.glide.best_glide_speed_kts, "kt"),
        ]);
        rows
    }
}

fn display<R: Report>(result: &R, format: OutputFormat, compact: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let json = if compact {
                serde_json::to_string(result)?
            } else {
                serde_json::to_string_pretty(result)?
            };
            println!("{json}");
        }

        OutputFormat::Table => {
            println!("╔════════════════════════════════════════════╗");
            println!("║{:^44}║", R::TITLE);
            println!("╠════════════════════════════════════════════╣");
            for (i, row) in result.rows().into_iter().enumerate() {
                match row {
                    Row::Section(name) => {
                        if i > 0 {
                            println!("╠════════════════════════════════════════════╣");
                        }
                        println!("║ {name:<42} ║");
                    }
                    Row::Field { label, value, unit } => {
                        println!("║ {label:<22}{value:>12} {unit:<7} ║");
                    }
                }
            }
            println!("╚════════════════════════════════════════════╝");
        }

        OutputFormat::Csv => {
            println!("section,metric,value,unit");
            let mut section = "";
            for row in result.rows() {
                match row {
                    Row::Section(name) => section = name,
                    Row::Field { label, value, unit } => {
                        println!("{section},{label},{value},{unit}");
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flight_calc::constants::EXIT_INVALID_VALUE;

    #[test]
    fn test_encode_failure_has_its_own_exit_code() {
        let encode = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = CliError::from(encode);
        assert_eq!(err.exit_code(), EXIT_OUTPUT_FAILED);
        assert_ne!(err.exit_code(), EXIT_INVALID_ARGS);
    }

    #[test]
    fn test_input_errors_keep_their_exit_code() {
        let err = CliError::from(FlightCalcError::ArgumentCount { expected: 4, found: 1 });
        assert_eq!(err.exit_code(), EXIT_INVALID_ARGS);

        let err = CliError::from(FlightCalcError::Parse { name: "track", token: "-x".to_string() });
        assert_eq!(err.exit_code(), EXIT_PARSE_FAILED);
    }

    #[test]
    fn test_hyphen_tokens_reach_the_calculator() {
        let cli = Cli::try_parse_from(["flightcalc", "wind", "90", "85", "270", "-x"]).unwrap();
        let err = run(cli).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_PARSE_FAILED);

        let cli = Cli::try_parse_from(["flightcalc", "wind", "-inf", "85", "270", "15"]).unwrap();
        assert_eq!(run(cli).unwrap_err().exit_code(), EXIT_INVALID_VALUE);
    }
}
