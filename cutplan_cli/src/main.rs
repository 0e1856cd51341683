use clap::{Args, Parser, Subcommand};
use cutplan_core::units::feet_inches_to_cm;
use cutplan_core::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cutplan")]
#[command(version, about = "Body-composition forecast for calorie-deficit planning", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Forecast week by week until a single body-fat target
    Simulate {
        #[command(flatten)]
        body: BodyArgs,

        /// Target body fat percentage
        #[arg(long)]
        target: f64,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Also write the weekly series to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Only print every Nth week in the table (the final week is always shown)
        #[arg(long, default_value_t = 1)]
        every: u32,
    },

    /// Forecast both bounds of a body-fat goal range
    Range {
        #[command(flatten)]
        body: BodyArgs,

        /// Lower bound of the goal range
        #[arg(long, requires = "max", conflicts_with = "goal")]
        min: Option<f64>,

        /// Upper bound of the goal range
        #[arg(long, requires = "min", conflicts_with = "goal")]
        max: Option<f64>,

        /// Named goal preset (essential, athletic, fitness, average)
        #[arg(long)]
        goal: Option<GoalPreset>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List body-fat goal presets
    Goals {
        #[arg(long, default_value = "male")]
        gender: Gender,
    },

    /// Write the default configuration file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Body metrics shared by the forecasting commands
#[derive(Args, Debug)]
struct BodyArgs {
    /// Current body weight
    #[arg(long)]
    weight: f64,

    /// Unit for --weight and for printed weights (lbs, kg)
    #[arg(long)]
    unit: Option<WeightUnit>,

    /// Current body fat percentage (8-40)
    #[arg(long)]
    body_fat: f64,

    /// Age in years (18-75)
    #[arg(long)]
    age: u32,

    #[arg(long)]
    gender: Gender,

    /// Height in centimeters
    #[arg(long, conflicts_with = "height_ft")]
    height_cm: Option<f64>,

    /// Height in feet (combine with --height-in)
    #[arg(long)]
    height_ft: Option<f64>,

    /// Additional inches for --height-ft
    #[arg(long, default_value_t = 0.0)]
    height_in: f64,

    /// Activity multiplier applied to RMR (1.2 sedentary .. 1.9 very active)
    #[arg(long, default_value_t = 1.2)]
    activity: f64,

    /// Daily calorie adjustment, negative for a deficit
    #[arg(long, default_value_t = -500, allow_hyphen_values = true)]
    deficit: i32,

    /// Macro split: balanced, low-carb, high-protein
    #[arg(long, default_value = "balanced")]
    diet: String,
}

impl BodyArgs {
    fn unit(&self, config: &Config) -> WeightUnit {
        self.unit.unwrap_or(config.display.weight_unit)
    }

    fn to_input(&self, unit: WeightUnit, target_bf: f64) -> Result<SimulationInput> {
        let height_cm = match (self.height_cm, self.height_ft) {
            (Some(cm), _) => cm,
            (None, Some(ft)) => feet_inches_to_cm(ft, self.height_in),
            (None, None) => {
                return Err(Error::Validation {
                    field: "height",
                    reason: "pass --height-cm or --height-ft/--height-in".into(),
                })
            }
        };

        Ok(SimulationInput {
            initial_weight: unit.to_lbs(self.weight),
            body_fat_pct: self.body_fat,
            age: self.age,
            gender: self.gender,
            activity_multiplier: self.activity,
            height_cm,
            dietary_approach: DietaryApproach::from_name(&self.diet),
            deficit_value: self.deficit,
            target_bf,
        })
    }
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    cutplan_core::logging::init_with_level(level);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        // 1: the request was rejected, 2: config or file trouble
        std::process::exit(if e.is_validation() { 1 } else { 2 });
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Simulate {
            body,
            target,
            json,
            csv,
            every,
        } => {
            let config = load_config(cli.config.as_deref())?;
            cmd_simulate(&config, &body, target, json, csv.as_deref(), every)
        }
        Commands::Range {
            body,
            min,
            max,
            goal,
            json,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let range = match (min, max, goal) {
                (Some(min), Some(max), _) => GoalRange::new(min, max),
                (_, _, Some(preset)) => preset.range(body.gender),
                _ => {
                    return Err(Error::Validation {
                        field: "range",
                        reason: "pass --min and --max, or --goal".into(),
                    })
                }
            };
            cmd_range(&config, &body, range, json)
        }
        Commands::Goals { gender } => {
            cmd_goals(gender);
            Ok(())
        }
        Commands::InitConfig { force } => cmd_init_config(cli.config, force),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn cmd_simulate(
    config: &Config,
    body: &BodyArgs,
    target: f64,
    json: bool,
    csv: Option<&Path>,
    every: u32,
) -> Result<()> {
    let unit = body.unit(config);
    let input = body.to_input(unit, target)?;
    let result = simulate(&input, &config.model)?;

    if let Some(path) = csv {
        let file = File::create(path)?;
        let rows = write_weekly_csv(&result, BufWriter::new(file), unit)?;
        tracing::info!("Wrote {} rows to {:?}", rows, path);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    display_header(&input, &result, unit);
    display_weeks(&result, unit, every.max(1));
    display_outcome(&result, unit);
    Ok(())
}

fn cmd_range(config: &Config, body: &BodyArgs, range: GoalRange, json: bool) -> Result<()> {
    let unit = body.unit(config);
    // Both runs take their target from the range
    let input = body.to_input(unit, range.max)?;
    let forecast = simulate_goal_range(&input, range, &config.model)?;
    let summary = forecast.summary();

    if json {
        let value = serde_json::json!({
            "range": forecast.range,
            "summary": summary,
            "lower": forecast.lower,
            "upper": forecast.upper,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    display_header(&input, &forecast.lower, unit);
    println!("  Goal range:      {}", range);
    println!();
    println!(
        "  Goal weight:     {:.1}–{:.1} {}",
        unit.from_lbs(summary.goal_weight.min),
        unit.from_lbs(summary.goal_weight.max),
        unit
    );
    println!(
        "  Weeks to goal:   {}–{}",
        summary.weeks_to_goal.min, summary.weeks_to_goal.max
    );
    println!(
        "  Goal date:       {} – {}",
        summary.end_date.min, summary.end_date.max
    );
    println!(
        "  Lean mass:       {:.1}–{:.1} {}",
        unit.from_lbs(summary.lean_mass.min),
        unit.from_lbs(summary.lean_mass.max),
        unit
    );
    println!(
        "  Fat mass:        {:.1}–{:.1} {}",
        unit.from_lbs(summary.fat_mass.min),
        unit.from_lbs(summary.fat_mass.max),
        unit
    );

    if summary.any_truncated {
        println!();
        println!(
            "  ⚠ Goal not reached within {} weeks; showing the partial forecast.",
            config.model.max_weeks
        );
    }

    println!();
    Ok(())
}

fn cmd_goals(gender: Gender) {
    println!("Body fat goal presets ({}):", gender);
    for preset in GoalPreset::ALL {
        let range = preset.range(gender);
        println!("  {:<10} {:<16} {}", format!("{:?}", preset).to_lowercase(), preset.label(), range);
    }
}

fn cmd_init_config(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => Config::default_config_path()?,
    };

    if path.exists() && !force {
        println!("Config already exists at {} (use --force to overwrite)", path.display());
        return Ok(());
    }

    Config::default().save_to(&path)?;
    println!("✓ Wrote default config to {}", path.display());
    Ok(())
}

fn display_header(input: &SimulationInput, result: &SimulationResult, unit: WeightUnit) {
    let initial = &result.initial_stats;

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  CUT FORECAST");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!(
        "  Start:           {:.1} {} at {:.1}% body fat",
        unit.from_lbs(initial.total_weight),
        unit,
        initial.body_fat_percent
    );
    println!(
        "  Lean / fat:      {:.1} / {:.1} {}",
        unit.from_lbs(initial.lean_mass),
        unit.from_lbs(initial.fat_mass),
        unit
    );
    println!(
        "  Baseline:        RMR {:.0} kcal, TDEE {:.0} kcal",
        result.baseline_rmr, result.baseline_tdee
    );
    println!(
        "  Plan:            {} kcal/day, {} macros",
        input.deficit_value, input.dietary_approach
    );
    println!();
}

fn display_weeks(result: &SimulationResult, unit: WeightUnit, every: u32) {
    if result.weekly_data.is_empty() {
        println!("  Already at or below {:.1}% body fat.", result.effective_target_bf);
        println!();
        return;
    }

    println!(
        "  {:>4}  {:<10}  {:>8}  {:>6}  {:>6}  {:>5}  {:>5}  {:>5}",
        "Week", "Date", "Weight", "BF%", "kcal", "P(g)", "C(g)", "F(g)"
    );

    let last = result.weeks();
    for point in &result.weekly_data {
        if point.week % every != 0 && point.week != last {
            continue;
        }
        println!(
            "  {:>4}  {:<10}  {:>8.1}  {:>6.1}  {:>6.0}  {:>5}  {:>5}  {:>5}",
            point.week,
            point.week_date,
            unit.from_lbs(point.total_weight),
            point.body_fat_percent,
            point.target_calories,
            point.macros.protein,
            point.macros.carbs,
            point.macros.fat
        );
    }
    println!();
}

fn display_outcome(result: &SimulationResult, unit: WeightUnit) {
    let last = result.final_state();

    if result.truncated {
        println!(
            "  ⚠ Goal of {:.1}% not reached after {} weeks (stopped at {:.1}%).",
            result.effective_target_bf,
            result.weeks(),
            last.body_fat_percent
        );
    } else {
        println!(
            "  ✓ {:.1}% body fat reached in {} weeks ({}).",
            result.effective_target_bf,
            result.weeks(),
            result.end_date
        );
    }

    if result.effective_target_bf > result.target_bf {
        println!(
            "  ℹ Target raised from {:.1}% to the {:.1}% safety floor.",
            result.target_bf, result.effective_target_bf
        );
    }

    println!(
        "  Final weight:    {:.1} {} ({:.1} {} lost)",
        unit.from_lbs(last.total_weight),
        unit,
        unit.from_lbs(result.total_weight_loss()),
        unit
    );
    println!();
}
