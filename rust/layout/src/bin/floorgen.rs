// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: generate floor plan variants and export them as JSON
//!
//! Usage:
//!   floorgen <TYPE> <shape> <area_m2> <budget> [options]
//!
//! With no arguments a 336 m² rectangular house parcel at a 350,000 budget
//! is used.

use floorgen_layout::{
    parcel_dims_from_area, Archetype, BatchRequest, LayoutConfig, LayoutEngine, ParcelShape,
    Variant,
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

struct CliArgs {
    archetype: Archetype,
    shape: ParcelShape,
    area: f64,
    budget: f64,
    variants: usize,
    seed: Option<u64>,
    bedrooms: u32,
    baths: u32,
    with_study: bool,
    output: PathBuf,
    config: Option<PathBuf>,
    verbose: bool,
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return;
    }

    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            print_usage();
            process::exit(1);
        }
    };

    let default_filter = if cli.verbose { "floorgen_layout=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    if let Err(msg) = run(&cli) {
        eprintln!("Error: {}", msg);
        process::exit(1);
    }
}

fn run(cli: &CliArgs) -> Result<(), String> {
    let config = match &cli.config {
        Some(path) => LayoutConfig::from_path(path).map_err(|e| e.to_string())?,
        None => LayoutConfig::default(),
    };
    let engine = LayoutEngine::new(config);

    let (width, height) = parcel_dims_from_area(cli.area);
    let mut batch = BatchRequest::for_archetype(engine.config(), cli.archetype).map_err(|e| e.to_string())?;
    batch.shape = cli.shape;
    batch.width = width;
    batch.height = height;
    batch.budget = cli.budget;
    batch.seed = cli.seed;
    batch.variants = cli.variants;
    batch.house.bedrooms = cli.bedrooms;
    batch.house.baths = cli.baths;
    batch.house.with_study = cli.with_study;

    println!("Floor plan generator");
    println!("====================");
    println!("  Type:    {}", cli.archetype);
    println!(
        "  Parcel:  {} {:.1}×{:.1} m ≈ {} m²",
        cli.shape, width, height, cli.area
    );
    println!("  Budget:  {}", cli.budget);
    println!("  Designs: {}", cli.variants);

    let variants = engine.generate_variants(&batch).map_err(|e| e.to_string())?;

    fs::create_dir_all(&cli.output)
        .map_err(|e| format!("Failed to create {}: {}", cli.output.display(), e))?;

    for variant in &variants {
        let path = write_variant(&cli.output, cli.archetype, variant)?;
        println!();
        println!("Design {}/{} (seed {})", variant.index, variants.len(), variant.seed);
        println!("  {}", variant.title);
        print_breakdown(variant);
        println!("  Saved: {}", path.display());
    }

    println!();
    println!("Finished generating {} designs.", variants.len());
    Ok(())
}

fn write_variant(dir: &Path, archetype: Archetype, variant: &Variant) -> Result<PathBuf, String> {
    let name = format!(
        "{}_floorplan_design_{}.json",
        archetype.as_str().to_ascii_lowercase(),
        variant.index
    );
    let path = dir.join(name);
    let json = serde_json::to_string_pretty(variant).map_err(|e| e.to_string())?;
    fs::write(&path, json).map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
    Ok(path)
}

fn print_breakdown(variant: &Variant) {
    let summary = &variant.layout.summary;
    println!("  {}", "-".repeat(44));
    for share in &summary.breakdown {
        println!("  {:25} {:7.1} m² ({:5.1}%)", share.name, share.area, share.percent);
    }
    println!("  {}", "-".repeat(44));
    println!("  {:25} {:7.1} m² (100.0%)", "TOTAL", summary.usable_area);
    println!(
        "  Footprint {:.1} m², efficiency {:.1}%, estimated cost {:.0} ({})",
        summary.footprint_area,
        summary.efficiency,
        summary.estimated_cost,
        if summary.within_budget { "within budget" } else { "over budget" }
    );
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut cli = CliArgs {
        archetype: Archetype::House,
        shape: ParcelShape::Rectangle,
        area: 336.0,
        budget: 350_000.0,
        variants: floorgen_layout::DEFAULT_VARIANTS,
        seed: None,
        bedrooms: 3,
        baths: 2,
        with_study: true,
        output: PathBuf::from("floorplans_output"),
        config: None,
        verbose: false,
    };

    let positional: Vec<&String> = args
        .iter()
        .skip(1)
        .take_while(|a| !a.starts_with("--"))
        .collect();
    match positional.len() {
        0 => {}
        4 => {
            cli.archetype = positional[0].parse().map_err(|e| format!("{}", e))?;
            cli.shape = ParcelShape::parse_or_default(positional[1]);
            cli.area = parse_value(positional[2], "area")?;
            cli.budget = parse_value(positional[3], "budget")?;
        }
        n => return Err(format!("Expected 4 positional arguments, got {}", n)),
    }

    let mut i = 1 + positional.len();
    while i < args.len() {
        match args[i].as_str() {
            "--variants" => {
                i += 1;
                cli.variants = parse_value(option_value(args, i)?, "variants")?;
            }
            "--seed" => {
                i += 1;
                cli.seed = Some(parse_value(option_value(args, i)?, "seed")?);
            }
            "--bedrooms" => {
                i += 1;
                cli.bedrooms = parse_value(option_value(args, i)?, "bedrooms")?;
            }
            "--baths" => {
                i += 1;
                cli.baths = parse_value(option_value(args, i)?, "baths")?;
            }
            "--no-study" => {
                cli.with_study = false;
            }
            "--output" => {
                i += 1;
                cli.output = PathBuf::from(option_value(args, i)?);
            }
            "--config" => {
                i += 1;
                cli.config = Some(PathBuf::from(option_value(args, i)?));
            }
            "--verbose" => {
                cli.verbose = true;
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    if cli.area <= 0.0 {
        return Err("Area must be greater than 0".to_string());
    }
    if cli.budget <= 0.0 {
        return Err("Budget must be greater than 0".to_string());
    }
    Ok(cli)
}

fn option_value(args: &[String], i: usize) -> Result<&str, String> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| format!("Missing value for {}", args[i - 1]))
}

fn parse_value<T: std::str::FromStr>(value: &str, name: &str) -> Result<T, String> {
    value
        .parse()
        .map_err(|_| format!("Invalid {} value: {}", name, value))
}

fn print_usage() {
    println!(
        r#"floorgen - Generate floor plan variants as JSON

USAGE:
    floorgen <TYPE> <shape> <area_m2> <budget> [OPTIONS]

ARGUMENTS:
    <TYPE>      HOUSE, HOSPITAL, COMPANY or SCHOOL
    <shape>     rectangle, square, lshape, triangle, irregular or courtyard
    <area_m2>   Parcel area in m² (1.7:1 aspect ratio is assumed)
    <budget>    Construction budget

OPTIONS:
    --variants <N>     Number of designs (default: 6)
    --seed <S>         Base seed; design i uses S + i (default: random)
    --bedrooms <N>     House bedrooms including the master (default: 3)
    --baths <N>        House bathrooms, at least 2 are provided (default: 2)
    --no-study         Leave out the house study
    --output <DIR>     Output directory (default: floorplans_output)
    --config <FILE>    JSON layout tables replacing the built-in ones
    --verbose          Log pipeline details
    -h, --help         Print this help

EXAMPLES:
    floorgen HOUSE rectangle 336 350000 --seed 42
    floorgen SCHOOL lshape 3000 1500000 --variants 3
"#
    );
}
