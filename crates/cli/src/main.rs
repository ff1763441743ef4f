//! AgriZone CLI - Field segmentation from NDVI imagery

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use agrizone_core::io::{read_geotiff, write_geotiff};
use agrizone_core::{FieldGeometry, GridProvider, ImageryProvider, Raster};
use agrizone_engine::agronomy::{
    generate_recommendations, generate_report, AnalysisMetadata, Crop, RainfallSummary,
};
use agrizone_engine::zoning::{perform_clustering, ClusterMethod, ClusterParams, SAMPLE_SCALE};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "agrizone")]
#[command(author, version, about = "Field segmentation from NDVI imagery", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about an NDVI raster file
    Info {
        /// Input raster file
        input: PathBuf,
    },
    /// Segment a field into management zones
    Zone {
        #[command(flatten)]
        field: FieldArgs,
        #[command(flatten)]
        clustering: ClusteringArgs,
        /// Output zone raster file
        #[arg(short, long)]
        output: PathBuf,
        /// Print the zoning result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Full analysis: zoning, statistics, recommendations, report
    Report {
        #[command(flatten)]
        field: FieldArgs,
        #[command(flatten)]
        clustering: ClusteringArgs,
        /// Crop type (wheat, maize, rice, soybeans, cotton, sugarcane, other)
        #[arg(long, default_value = "other")]
        crop: String,
        /// Total rainfall over the analysis period, in mm
        #[arg(long)]
        rainfall_total: Option<f64>,
        /// Analysis period start (echoed into the report)
        #[arg(long, default_value = "N/A")]
        start_date: String,
        /// Analysis period end (echoed into the report)
        #[arg(long, default_value = "N/A")]
        end_date: String,
        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct FieldArgs {
    /// Input NDVI raster file
    input: PathBuf,
    /// Field centre X coordinate (raster units)
    #[arg(long)]
    x: f64,
    /// Field centre Y coordinate (raster units)
    #[arg(long)]
    y: f64,
    /// Field radius (raster units)
    #[arg(long, default_value_t = 250.0)]
    radius: f64,
}

#[derive(clap::Args)]
struct ClusteringArgs {
    /// Clustering method: K-Means, DBSCAN, "Mean Shift" or GMM
    #[arg(short, long, default_value = "K-Means")]
    method: String,
    /// Number of zones (K-Means, GMM)
    #[arg(long)]
    num_zones: Option<usize>,
    /// Neighborhood radius (DBSCAN)
    #[arg(long)]
    eps: Option<f64>,
    /// Density threshold (DBSCAN)
    #[arg(long)]
    min_samples: Option<usize>,
    /// Kernel width (Mean Shift)
    #[arg(long)]
    bandwidth: Option<f64>,
}

impl ClusteringArgs {
    fn parse_method(&self) -> Result<ClusterMethod> {
        let params = ClusterParams {
            num_zones: self.num_zones,
            eps_value: self.eps,
            min_samples: self.min_samples,
            bandwidth: self.bandwidth,
        };
        ClusterMethod::from_name(&self.method, &params)
            .context("Invalid clustering configuration")
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        // ── Info ─────────────────────────────────────────────────────
        Commands::Info { input } => {
            let raster = read_ndvi(&input)?;
            let (rows, cols) = raster.shape();
            let bounds = raster.bounds();
            let stats = raster.statistics();

            println!("File: {}", input.display());
            println!("Dimensions: {} x {} ({} cells)", cols, rows, raster.len());
            println!("Cell size: {}", raster.cell_size());
            println!(
                "Bounds: ({:.6}, {:.6}) - ({:.6}, {:.6})",
                bounds.0, bounds.1, bounds.2, bounds.3
            );
            println!("\nStatistics:");
            if let Some(min) = stats.min {
                println!("  Min: {:.4}", min);
            }
            if let Some(max) = stats.max {
                println!("  Max: {:.4}", max);
            }
            if let Some(mean) = stats.mean {
                println!("  Mean: {:.4}", mean);
            }
            println!(
                "  Valid cells: {} ({:.1}%)",
                stats.valid_count,
                100.0 * stats.valid_count as f64 / raster.len() as f64
            );
        }

        // ── Zone ─────────────────────────────────────────────────────
        Commands::Zone {
            field,
            clustering,
            output,
            json,
        } => {
            let raster = read_ndvi(&field.input)?;
            let geometry = FieldGeometry::from_xy(field.x, field.y, field.radius);
            let method = clustering.parse_method()?;
            let provider = GridProvider::new();

            let pb = spinner("Clustering...");
            let zoning = perform_clustering(&provider, &raster, &geometry, method)
                .context("Zoning failed")?;
            pb.finish_and_clear();

            if json {
                println!("{}", serde_json::to_string_pretty(&zoning.info)?);
            } else {
                println!("Method: {}", zoning.info.method);
                println!("Zones: {}", zoning.info.zone_count);
                if let Some(noise) = zoning.info.noise_points {
                    println!("Noise points: {}", noise);
                }
                if zoning.info.fallback {
                    println!("(degenerate result, fell back to K-Means)");
                }
                for (i, desc) in zoning.info.descriptions.iter().enumerate() {
                    println!("  Zone {}: {}", i, desc);
                }
            }

            write_zones(&zoning.zones, &output)?;
            println!("Zone raster saved to: {}", output.display());
            println!("  Processing time: {:.2?}", zoning.elapsed);
        }

        // ── Report ──────────────────────────────────────────────────
        Commands::Report {
            field,
            clustering,
            crop,
            rainfall_total,
            start_date,
            end_date,
            output,
        } => {
            let raster = read_ndvi(&field.input)?;
            let geometry = FieldGeometry::from_xy(field.x, field.y, field.radius);
            let method = clustering.parse_method()?;
            let provider = GridProvider::new();
            let crop: Crop = crop.parse().unwrap_or(Crop::Other);

            let pb = spinner("Analyzing field...");
            let zoning = perform_clustering(&provider, &raster, &geometry, method)
                .context("Zoning failed")?;
            let stats = provider
                .reduce(&raster, &geometry, SAMPLE_SCALE)
                .context("Statistics failed")?;
            pb.finish_and_clear();

            let rainfall = rainfall_total.map(|total| RainfallSummary {
                total,
                average: 0.0,
                maximum: 0.0,
            });
            let recommendations = generate_recommendations(
                &stats,
                zoning.info.zone_count,
                crop,
                rainfall.as_ref(),
            );

            let metadata = AnalysisMetadata {
                latitude: field.y,
                longitude: field.x,
                buffer_size: field.radius,
                start_date,
                end_date,
                clustering_method: zoning.info.method.clone(),
            };
            let report = generate_report(&stats, &zoning.info, &recommendations, &metadata);

            match output {
                Some(path) => {
                    std::fs::write(&path, report).context("Failed to write report")?;
                    println!("Report saved to: {}", path.display());
                }
                None => print!("{}", report),
            }
            info!("Analysis completed in {:.2?}", zoning.elapsed);
        }
    }

    Ok(())
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn read_ndvi(path: &PathBuf) -> Result<Raster<f64>> {
    let pb = spinner("Reading raster...");
    let raster: Raster<f64> = read_geotiff(path).context("Failed to read NDVI raster")?;
    pb.finish_and_clear();
    info!("Input: {} x {}", raster.cols(), raster.rows());
    Ok(raster)
}

fn write_zones(raster: &Raster<i32>, path: &PathBuf) -> Result<()> {
    let pb = spinner("Writing output...");
    write_geotiff(raster, path).context("Failed to write zone raster")?;
    pb.finish_and_clear();
    Ok(())
}
