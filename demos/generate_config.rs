//! Generate a default analyzer configuration file
//!
//! Creates a JSON config with every threshold at its default value

use crop_doctor::AnalyzerConfig;
use std::{env, path::Path, process};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <output_config.json>", args[0]);
        eprintln!();
        eprintln!("Example:");
        eprintln!("  {} config/analyzer.json", args[0]);
        process::exit(1);
    }

    let output_path = Path::new(&args[1]);

    // Create parent directory if needed
    if let Some(parent) = output_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            process::exit(1);
        }
    }

    let config = AnalyzerConfig::default();

    match config.to_json_file(output_path) {
        Ok(_) => {
            let v = &config.validation;
            eprintln!("Configuration saved to {}", output_path.display());
            eprintln!();
            eprintln!("Config summary:");
            eprintln!("  Grid: {0}x{0}, {1:?} resampling", config.grid_size, config.resample);
            eprintln!("  Plant pixels for local statistics: {}", config.min_plant_pixels);
            eprintln!(
                "  Rejection: unique < {:.0}%, pure > {:.0}%, variance < {:.1}",
                v.min_unique_colors_ratio * 100.0,
                v.max_pure_pixel_ratio * 100.0,
                v.min_variance
            );
            eprintln!(
                "             skin > {:.0}%, plant content < {:.0}%",
                v.max_skin_ratio * 100.0,
                v.min_plant_content_ratio * 100.0
            );
            eprintln!("  Filename override: {}", config.filename_override);
        }
        Err(e) => {
            eprintln!("Error saving config: {}", e);
            process::exit(1);
        }
    }
}
