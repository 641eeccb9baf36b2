use clap::{ArgAction, Args, Parser, Subcommand};
use hp_app::{
    AppError, AppResult, Dataset, DatasetSource, HeatPumpModel, RunOptions, RunProgressEvent,
    RunRequest, RunResponse, RunStage, TimeSeriesRunner, project_service, run_service,
};
use hp_plot::{HeatPumpVisualizer, PlotConfig};
use hp_results::store::{DESIGN_STATE_FILE, FAILURES_FILE, MANIFEST_FILE, RESULTS_FILE};
use hp_results::{ResultRow, RunSummary};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "heatpump")]
#[command(about = "Heat pump cycle model driven by hourly operating data", long_about = None)]
struct Cli {
    /// Increase log output (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct DatasetArgs {
    /// Heat source table (CSV)
    #[arg(long, requires = "sink", conflicts_with = "dataset")]
    source: Option<PathBuf>,
    /// Heat sink table (CSV)
    #[arg(long, requires = "source")]
    sink: Option<PathBuf>,
    /// Single table holding both heat source and heat sink columns (CSV)
    #[arg(long)]
    dataset: Option<PathBuf>,
}

impl DatasetArgs {
    fn to_source(&self) -> AppResult<DatasetSource> {
        match (&self.source, &self.sink, &self.dataset) {
            (Some(source), Some(sink), None) => Ok(DatasetSource::Split {
                source: source.clone(),
                sink: sink.clone(),
            }),
            (None, None, Some(path)) => Ok(DatasetSource::Combined(path.clone())),
            _ => Err(AppError::InvalidInput(
                "give either --source and --sink, or --dataset".to_string(),
            )),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write a configuration file with default design values
    InitConfig {
        /// Path of the configuration file (.yaml or .json)
        config_path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Validate a configuration file
    Validate {
        /// Path to the configuration file
        config_path: PathBuf,
    },
    /// Solve the design point and print the connection table
    Design {
        /// Path to the configuration file
        config_path: PathBuf,
        /// Directory for design_state.json and network.json
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Solve every dataset row off-design
    Run {
        /// Path to the configuration file
        config_path: PathBuf,
        #[command(flatten)]
        dataset: DatasetArgs,
        /// Copy the run output into this directory
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Start from a saved design state instead of solving one
        #[arg(long)]
        design_state: Option<PathBuf>,
        /// Render the result chart to this file (.svg or .png)
        #[arg(long)]
        plot: Option<PathBuf>,
        /// Skip cache and force re-run
        #[arg(long)]
        no_cache: bool,
    },
    /// Solve a single dataset row, for debugging
    RunOne {
        /// Path to the configuration file
        config_path: PathBuf,
        #[command(flatten)]
        dataset: DatasetArgs,
        /// Zero-based row index
        #[arg(long)]
        row: usize,
    },
    /// Render a results table as a chart
    Plot {
        /// Results CSV written by `run`
        results_path: PathBuf,
        /// Output file (.svg or .png)
        #[arg(short, long)]
        output: PathBuf,
        /// Figure title
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value_t = 1200)]
        width: u32,
        #[arg(long, default_value_t = 900)]
        height: u32,
    },
    /// Write the network description (components, connections, fixed values) as JSON
    ExportNetwork {
        /// Path to the configuration file
        config_path: PathBuf,
        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// List cached runs for a configuration
    Runs {
        /// Path to the configuration file
        config_path: PathBuf,
    },
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::InitConfig { config_path, force } => cmd_init_config(&config_path, force),
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Design { config_path, out } => cmd_design(&config_path, out.as_deref()),
        Commands::Run {
            config_path,
            dataset,
            out,
            design_state,
            plot,
            no_cache,
        } => cmd_run(
            &config_path,
            dataset.to_source()?,
            RunOptions {
                use_cache: !no_cache,
                design_state,
            },
            out.as_deref(),
            plot.as_deref(),
        ),
        Commands::RunOne {
            config_path,
            dataset,
            row,
        } => cmd_run_one(&config_path, dataset.to_source()?, row),
        Commands::Plot {
            results_path,
            output,
            title,
            width,
            height,
        } => cmd_plot(
            &results_path,
            &output,
            &title,
            PlotConfig::default().with_size(width, height),
        ),
        Commands::ExportNetwork {
            config_path,
            output,
        } => cmd_export_network(&config_path, &output),
        Commands::Runs { config_path } => cmd_runs(&config_path),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn cmd_init_config(config_path: &Path, force: bool) -> AppResult<()> {
    let config = project_service::init_config(config_path, force)?;
    println!(
        "✓ Wrote configuration '{}' to {}",
        config.name,
        config_path.display()
    );
    Ok(())
}

fn cmd_validate(config_path: &Path) -> AppResult<()> {
    println!("Validating configuration: {}", config_path.display());
    let config = project_service::load_config(config_path)?;
    let summary = project_service::summarize(&config);
    println!("✓ Configuration is valid");
    println!("  Name:          {}", summary.name);
    println!("  Working fluid: {}", summary.working_fluid);
    println!("  Condenser:     {:.1} kW", summary.q_cond_kw);
    println!("  Evaporator:    {:.1} kW", summary.q_evap_kw);
    println!("  Config id:     {}", summary.config_id);
    Ok(())
}

fn cmd_design(config_path: &Path, out: Option<&Path>) -> AppResult<()> {
    let config = project_service::load_config(config_path)?;
    let mut model = HeatPumpModel::new(config)?;

    let started = Instant::now();
    let design = model.solve_design()?;
    let (results, diagnostics) = model.evaluate(design.state())?;

    println!("{}", model.report(design.state())?);
    println!("Design point ({:.3}s):", started.elapsed().as_secs_f64());
    println!("  COP:            {:.3}", results.cop);
    println!("  Compressor:     {:.3} kW", results.p_comp.value / 1e3);
    println!("  Evaporator:     {:.3} kW", results.q_evap.value / 1e3);
    println!("  Condenser:      {:.3} kW", results.q_cond.value / 1e3);
    println!(
        "  Iterations:     {} (residual {:.3e})",
        design.state().iterations,
        design.state().residual_norm
    );
    for d in &diagnostics {
        println!("  ! {d}");
    }

    if let Some(dir) = out {
        std::fs::create_dir_all(dir)?;
        let state_path = dir.join(DESIGN_STATE_FILE);
        model.save_design_state(&design, &state_path)?;
        model.save_network_config(&dir.join(run_service::NETWORK_FILE))?;
        println!("✓ Design state written to {}", state_path.display());
    }
    Ok(())
}

fn cmd_run(
    config_path: &Path,
    dataset: DatasetSource,
    options: RunOptions,
    out: Option<&Path>,
    plot: Option<&Path>,
) -> AppResult<()> {
    println!("Running dataset against {}", config_path.display());

    let request = RunRequest {
        config_path,
        dataset,
        options,
    };

    let mut last_emit = Instant::now();
    let mut last_stage = None;
    let response = run_service::ensure_run_with_progress(
        &request,
        Some(&mut |event: RunProgressEvent| {
            let emit_now = last_stage != Some(event.stage)
                || last_emit.elapsed().as_millis() >= 100
                || event.rows.is_some_and(|r| r.done == r.total);
            if emit_now {
                render_cli_progress(&event);
                last_stage = Some(event.stage);
                last_emit = Instant::now();
            }
        }),
    )?;
    clear_progress_line();

    if response.loaded_from_cache {
        println!("✓ Loaded from cache: {}", response.run_id);
    } else {
        println!("✓ Run completed: {}", response.run_id);
    }
    print_run_summary(&response);

    if let Some(dir) = out {
        copy_run_output(&response, dir)?;
        println!("✓ Output written to {}", dir.display());
    } else {
        println!("  Output: {}", response.run_dir.display());
    }

    if let Some(path) = plot {
        let title = format!("{} ({})", response.manifest.config_name, response.run_id);
        render_chart(&response.results, path, &title, PlotConfig::default())?;
    }
    Ok(())
}

fn cmd_run_one(config_path: &Path, dataset: DatasetSource, row: usize) -> AppResult<()> {
    let config = project_service::load_config(config_path)?;
    let dataset: Dataset = dataset.load(&config.dataset)?;
    let model = HeatPumpModel::new(config)?;
    let mut runner = TimeSeriesRunner::new(model, dataset);

    let result = runner.run_one(row)?;
    println!("Row {}:", result.row_index);
    if let Some(ts) = &result.timestamp {
        println!("  Timestamp:  {ts}");
    }
    println!(
        "  Source:     {:.2} -> {:.2} °C",
        result.t_source_in_c, result.t_source_out_c
    );
    println!(
        "  Sink:       {:.2} -> {:.2} °C",
        result.t_sink_in_c, result.t_sink_out_c
    );
    println!("  COP:        {:.3}", result.cop);
    println!("  Compressor: {:.3} kW", result.p_comp_kw);
    println!("  Evaporator: {:.3} kW", result.q_evap_kw);
    println!("  Condenser:  {:.3} kW", result.q_cond_kw);
    if result.warnings > 0 {
        println!("  Warnings:   {}", result.warnings);
    }
    Ok(())
}

fn cmd_plot(results_path: &Path, output: &Path, title: &str, config: PlotConfig) -> AppResult<()> {
    let rows = TimeSeriesRunner::<HeatPumpModel>::load_results(results_path)?;
    render_chart(&rows, output, title, config)
}

fn cmd_export_network(config_path: &Path, output: &Path) -> AppResult<()> {
    let config = project_service::load_config(config_path)?;
    let model = HeatPumpModel::new(config)?;
    model.save_network_config(output)?;
    println!("✓ Network written to {}", output.display());
    Ok(())
}

fn cmd_runs(config_path: &Path) -> AppResult<()> {
    let runs = run_service::list_runs(config_path)?;

    if runs.is_empty() {
        println!("No cached runs found for {}", config_path.display());
    } else {
        println!("Cached runs:");
        for manifest in runs {
            println!(
                "  {} ({})  {}/{} rows solved",
                manifest.run_id, manifest.timestamp, manifest.rows_solved, manifest.rows_total
            );
        }
    }
    Ok(())
}

fn render_chart(rows: &[ResultRow], path: &Path, title: &str, config: PlotConfig) -> AppResult<()> {
    let mut visualizer = HeatPumpVisualizer::new(config);
    visualizer.plot_timeseries(rows, title);
    visualizer.save(path)?;
    println!("✓ Chart written to {}", path.display());
    Ok(())
}

fn copy_run_output(response: &RunResponse, dir: &Path) -> AppResult<()> {
    std::fs::create_dir_all(dir)?;
    hp_results::write_results_csv(&dir.join(RESULTS_FILE), &response.results)?;
    hp_results::write_failures_csv(&dir.join(FAILURES_FILE), &response.failures)?;
    std::fs::write(
        dir.join(MANIFEST_FILE),
        serde_json::to_string_pretty(&response.manifest)?,
    )?;
    for name in [DESIGN_STATE_FILE, run_service::NETWORK_FILE] {
        let from = response.run_dir.join(name);
        if from.exists() {
            std::fs::copy(&from, dir.join(name))?;
        }
    }
    info!(dir = %dir.display(), "run output copied");
    Ok(())
}

fn print_run_summary(response: &RunResponse) {
    let manifest = &response.manifest;
    println!(
        "  Rows: {} total, {} solved, {} failed",
        manifest.rows_total, manifest.rows_solved, manifest.rows_failed
    );
    if let Some(RunSummary {
        mean_cop,
        min_cop,
        max_cop,
        heat_delivered_kwh,
        electricity_kwh,
        rows_with_warnings,
        ..
    }) = response.summary
    {
        println!("  COP: mean {mean_cop:.3}, min {min_cop:.3}, max {max_cop:.3}");
        println!("  Heat delivered: {heat_delivered_kwh:.1} kWh");
        println!("  Electricity:    {electricity_kwh:.1} kWh");
        if rows_with_warnings > 0 {
            println!("  Rows with warnings: {rows_with_warnings}");
        }
    }
    if let Some(seasonal) = response.summary.as_ref().and_then(RunSummary::seasonal_cop) {
        println!("  Seasonal COP: {seasonal:.3}");
    }
    for failure in response.failures.iter().take(5) {
        println!("  ✗ row {}: {}", failure.row_index, failure.reason);
    }
    if response.failures.len() > 5 {
        println!("  ... {} more failed rows", response.failures.len() - 5);
    }
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(100));
    let _ = io::stdout().flush();
}

fn render_cli_progress(event: &RunProgressEvent) {
    match (event.stage, event.rows) {
        (RunStage::SolvingRows, Some(rows)) => {
            let width = 28usize;
            let fraction = rows.fraction();
            let filled = ((fraction * width as f64).round() as usize).min(width);
            print!(
                "\r[{}{}] {:>6.2}%  row {}/{}  failed={}  elapsed={:.1}s",
                "#".repeat(filled),
                "-".repeat(width.saturating_sub(filled)),
                fraction * 100.0,
                rows.done,
                rows.total,
                rows.failed,
                event.elapsed_wall_s
            );
        }
        _ => {
            let spinner = ['|', '/', '-', '\\'];
            let spin_idx = ((event.elapsed_wall_s * 10.0) as usize) % spinner.len();
            let mut line = format!(
                "\r{} {}  elapsed={:.2}s",
                spinner[spin_idx],
                event.stage.label(),
                event.elapsed_wall_s
            );
            if let Some(msg) = &event.message {
                line.push_str(&format!("  {msg}"));
            }
            print!("{line}");
        }
    }
    let _ = io::stdout().flush();
}
