//! Command-line interface for crop_doctor
//!
//! Analyze leaf photographs from the terminal

use crop_doctor::{AnalyzerConfig, ClassificationResult, CropAnalyzer, ImageAnalysis};
use std::{
    env,
    path::{Path, PathBuf},
    process,
};
use tracing_subscriber::EnvFilter;

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut debug_mode = false;
    let mut json_output = false;
    let mut config_path: Option<PathBuf> = None;
    let mut disable_override = false;
    let mut image_paths: Vec<PathBuf> = Vec::new();

    // Parse arguments
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--debug" => debug_mode = true,
            "--json" => json_output = true,
            "--no-filename-override" => disable_override = true,
            "--config" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --config requires a file path");
                    process::exit(1);
                }
                config_path = Some(PathBuf::from(&args[i + 1]));
                i += 1;
            }
            "--help" | "-h" => {
                print_help(&args[0]);
                process::exit(0);
            }
            arg if !arg.starts_with("--") => image_paths.push(PathBuf::from(arg)),
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                eprintln!("Use --help for usage information");
                process::exit(1);
            }
        }
        i += 1;
    }

    if image_paths.is_empty() {
        print_help(&args[0]);
        process::exit(1);
    }

    let default_filter = if debug_mode { "crop_doctor=debug" } else { "crop_doctor=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &config_path {
        Some(path) => match AnalyzerConfig::from_json_file(path) {
            Ok(config) => config,
            Err(error) => {
                eprintln!("Error: {}", error);
                process::exit(1);
            }
        },
        None => AnalyzerConfig::default(),
    };
    if disable_override {
        config.filename_override = false;
    }

    let analyzer = match CropAnalyzer::new(config) {
        Ok(analyzer) => analyzer,
        Err(error) => {
            eprintln!("Error: {}", error);
            process::exit(1);
        }
    };

    let mut failures = 0;
    for path in &image_paths {
        if let Err(message) = analyze_one(&analyzer, path, debug_mode, json_output) {
            eprintln!("{}: {}", path.display(), message);
            failures += 1;
        }
    }

    if failures > 0 {
        process::exit(1);
    }
}

fn analyze_one(
    analyzer: &CropAnalyzer,
    path: &Path,
    debug_mode: bool,
    json_output: bool,
) -> Result<(), String> {
    if !path.exists() {
        return Err("file does not exist".to_string());
    }

    let bytes = std::fs::read(path).map_err(|e| format!("could not read file: {}", e))?;
    let filename = path.file_name().and_then(|n| n.to_str());

    let (result, analysis) = analyzer
        .analyze_bytes_debug(&bytes, filename)
        .map_err(|error| format!("analysis failed: {}\nSuggestion: {}", error, error.user_message()))?;

    if json_output {
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| format!("could not serialize result: {}", e))?;
        println!("{}", json);
    } else {
        print_result(path, &result);
    }

    if debug_mode {
        print_debug(analyzer, &analysis);
    }

    Ok(())
}

fn print_help(program_name: &str) {
    eprintln!("Usage: {} [OPTIONS] <image_path>...", program_name);
    eprintln!();
    eprintln!("Screen crop leaf photographs for common diseases.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config FILE            Load analyzer settings from a JSON file");
    eprintln!("  --no-filename-override   Ignore \"healthy\" in file names");
    eprintln!("  --json                   Print results as JSON");
    eprintln!("  --debug                  Print extracted color features");
    eprintln!("  --help, -h               Show this help message");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} leaf.jpg", program_name);
    eprintln!("  {} --json --config analyzer.json leaf1.jpg leaf2.png", program_name);
}

fn print_result(path: &Path, result: &ClassificationResult) {
    println!("=== {} ===", path.display());
    println!("Disease:     {}", result.disease);
    if !result.scientific_name.is_empty() {
        println!("Scientific:  {}", result.scientific_name);
    }
    println!("Pathogen:    {}", result.pathogen);
    println!("Crop:        {}", result.crop);
    println!("Severity:    {:?}", result.severity);
    println!("Confidence:  {:.1}%", result.confidence * 100.0);
    println!(
        "Indices:     health {:.1}%  chlorosis {:.1}%  necrosis {:.1}%",
        result.analysis.health_index, result.analysis.chlorosis_index, result.analysis.necrosis_index
    );

    let sections = [
        ("Pesticides", &result.recommendations.pesticides),
        ("Prevention", &result.recommendations.preventive_steps),
        ("Organic", &result.recommendations.organic_solutions),
    ];
    for (title, items) in sections {
        if items.is_empty() {
            continue;
        }
        println!("{}:", title);
        for item in items {
            println!("  - {}", item);
        }
    }
    println!();
}

fn print_debug(analyzer: &CropAnalyzer, analysis: &ImageAnalysis) {
    eprintln!("--- features ---");
    eprintln!(
        "mean rgb:        ({:.1}, {:.1}, {:.1})",
        analysis.mean_rgb[0], analysis.mean_rgb[1], analysis.mean_rgb[2]
    );
    eprintln!("hue/saturation:  {:.1}° / {:.3}", analysis.hue, analysis.saturation);
    eprintln!(
        "variance:        {:.2} over {:?} ({} plant pixels)",
        analysis.variance, analysis.variance_scope, analysis.plant_pixel_count
    );
    eprintln!("unique colors:   {:.4}", analysis.unique_colors_ratio);
    eprintln!("pure pixels:     {:.4}", analysis.pure_pixel_ratio);
    eprintln!(
        "green/brown/yellow/white/skin: {:.4} / {:.4} / {:.4} / {:.4} / {:.4}",
        analysis.pixel_healthy_ratio,
        analysis.pixel_brown_ratio,
        analysis.pixel_yellow_ratio,
        analysis.white_indicator,
        analysis.skin_ratio
    );
    match analyzer.classifier().gate().check(analysis) {
        Some(reason) => eprintln!("rejected:        {}", reason.description()),
        None => eprintln!("rejected:        no"),
    }
    eprintln!();
}
