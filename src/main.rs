//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

mod cli;
mod prompt;
#[cfg(test)]
mod prompt_test;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use dotenv::dotenv;
use env_logger::Builder;
use log::Record;
use std::env;
use std::io::Write;
use std::process;
use tiler_service::ProgressStyle;

fn init_logger(args: &ArgMatches<'_>) {
    let mut builder = Builder::new();
    builder.format(|buf, record: &Record<'_>| {
        let t = time::now();
        let timestamp = time::strftime("%Y-%m-%d %H:%M:%S", &t).unwrap_or_default();
        writeln!(
            buf,
            "{}.{:03} {} {}",
            timestamp,
            t.tm_nsec / 1_000_000,
            record.level(),
            record.args()
        )
    });

    let rust_log = match (args.value_of("loglevel"), env::var("RUST_LOG")) {
        (None, Ok(rust_log_env)) => rust_log_env,
        (loglevel, _) => match loglevel.unwrap_or("info") {
            "debug" => "debug,tokio=info,usvg=info,fontdb=info".to_string(),
            loglevel => loglevel.to_string(),
        },
    };
    builder.parse_filters(&rust_log);

    builder.init();
}

fn generate(args: &ArgMatches<'_>) -> Result<(), String> {
    let config = cli::config_from_args(args)?;
    let service = cli::service_from_args(&config, args)?;
    let progress = args
        .value_of("progress")
        .map_or(Ok(ProgressStyle::Line), |s| s.parse::<ProgressStyle>())?;
    let summary = service.generate(progress)?;
    if !summary.stats.is_empty() {
        debug!("Render statistics:\n{}", summary.stats.as_csv());
    }
    println!("{}", summary);
    Ok(())
}

fn count(args: &ArgMatches<'_>) -> Result<(), String> {
    let config = cli::config_from_args(args)?;
    let service = cli::service_from_args(&config, args)?;
    let images = service.load_images();
    for image in &images {
        if image.scene.is_none() {
            println!("{}: skipped", image.spec.name());
            continue;
        }
        for level in image.levels(service.tile_size) {
            println!(
                "{} zoom {}: {} columns x {} rows = {} tiles",
                image.spec.name(),
                level.zoom,
                level.cols,
                level.rows,
                level.tile_count()
            );
        }
    }
    println!("Total tiles to generate: {}", service.tile_count(&images));
    Ok(())
}

const INPUT_ARGS: &str = "-c, --config=[FILE] 'Load from custom config file'
                          --output=[DIR] 'Output directory (Default: tiles)'
                          --tilesize=[PIXELS] 'Tile width and height (Default: 512)'
                          --workers=[NUM] 'Number of tiles rendered in parallel'
                          --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'";

fn image_args<'a, 'b>() -> Vec<Arg<'a, 'b>> {
    vec![
        Arg::from_usage("--image=[FILE]... 'SVG image, repeat for each image'")
            .number_of_values(1),
        Arg::from_usage("--zoom=[RANGE]... 'Zoom range <min>-<max> of the preceding image'")
            .number_of_values(1),
    ]
}

pub fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("svg_tiler")
        .version(crate_version!())
        .about("Slice SVG images into pyramids of PNG tiles")
        .subcommand(
            SubCommand::with_name("generate")
                .setting(AppSettings::AllowLeadingHyphen)
                .args_from_usage(INPUT_ARGS)
                .args(&image_args())
                .args_from_usage(
                    "--progress=[line|bar|none] 'Progress display (Default: line)'
                     --dry-run=[false|true] 'Render without writing tiles'",
                )
                .about("Generate tiles"),
        )
        .subcommand(
            SubCommand::with_name("count")
                .setting(AppSettings::AllowLeadingHyphen)
                .args_from_usage(INPUT_ARGS)
                .args(&image_args())
                .about("Print the tile grid of every zoom level"),
        )
        .subcommand(
            SubCommand::with_name("genconfig")
                .setting(AppSettings::AllowLeadingHyphen)
                .args_from_usage(
                    "--output=[DIR] 'Output directory (Default: tiles)'
                     --tilesize=[PIXELS] 'Tile width and height (Default: 512)'
                     --workers=[NUM] 'Number of tiles rendered in parallel'
                     --loglevel=[error|warn|info|debug|trace] 'Log level (Default: info)'",
                )
                .args(&image_args())
                .about("Generate configuration template"),
        )
}

fn main() {
    dotenv().ok();
    let mut app = app();

    let result = match app.get_matches_from_safe_borrow(env::args()) {
        //app.get_matches() prohibits later call of app.print_help()
        Result::Err(e) => {
            println!("{}", e);
            Ok(())
        }
        Result::Ok(matches) => match matches.subcommand() {
            ("generate", Some(sub_m)) => {
                init_logger(sub_m);
                generate(sub_m)
            }
            ("count", Some(sub_m)) => {
                init_logger(sub_m);
                count(sub_m)
            }
            ("genconfig", Some(sub_m)) => {
                init_logger(sub_m);
                cli::gen_config(sub_m).map(|config| println!("{}", config))
            }
            _ => {
                let _ = app.print_help();
                println!("");
                Ok(())
            }
        },
    };
    if let Err(e) = result {
        println!("Error - {}", e);
        process::exit(1);
    }
}
