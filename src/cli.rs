//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

use crate::prompt::Prompt;
use clap::ArgMatches;
use std::io;
use std::str::FromStr;
use tiler_core::core::config::{ImageCfg, DEFAULT_CONFIG};
use tiler_core::core::{parse_config, read_config, ApplicationCfg, Config};
use tiler_core::output::{Nooutput, TileOutput};
use tiler_service::TileService;

/// Run configuration from config file, `--image` arguments or interactive input
pub fn config_from_args(args: &ArgMatches<'_>) -> Result<ApplicationCfg, String> {
    let mut config = if let Some(cfgpath) = args.value_of("config") {
        info!("Reading configuration from '{}'", cfgpath);
        for argname in &["image", "zoom"] {
            if args.is_present(argname) {
                warn!("Ignoring argument `{}`", argname);
            }
        }
        read_config(cfgpath)?
    } else if args.is_present("image") {
        images_from_args(args)?
    } else {
        let stdin = io::stdin();
        let mut prompt = Prompt::new(stdin.lock(), io::stdout());
        prompt.collect()?
    };
    if let Some(dir) = args.value_of("output") {
        config.output.dir = dir.to_string();
    }
    if let Some(size) = args.value_of("tilesize") {
        config.render.tile_size = u32::from_str(size)
            .map_err(|_| format!("Error parsing 'tilesize' as integer value: {}", size))?;
    }
    if let Some(workers) = args.value_of("workers") {
        let workers = usize::from_str(workers)
            .map_err(|_| format!("Error parsing 'workers' as integer value: {}", workers))?;
        config.render.workers = Some(workers);
    }
    Ok(config)
}

/// Images paired with zoom ranges in argument order
fn images_from_args(args: &ArgMatches<'_>) -> Result<ApplicationCfg, String> {
    let images = args
        .values_of("image")
        .map(|v| v.collect::<Vec<_>>())
        .unwrap_or_default();
    let zooms = args
        .values_of("zoom")
        .map(|v| v.collect::<Vec<_>>())
        .unwrap_or_default();
    if images.len() != zooms.len() {
        return Err(format!(
            "Each --image needs a --zoom range ({} images, {} zoom ranges)",
            images.len(),
            zooms.len()
        ));
    }
    let mut config: ApplicationCfg = parse_config(DEFAULT_CONFIG.to_string(), "")?;
    config.images = images
        .iter()
        .zip(zooms)
        .map(|(path, zoom)| ImageCfg {
            path: path.to_string(),
            zoom: Some(zoom.to_string()),
            minzoom: None,
            maxzoom: None,
        })
        .collect();
    Ok(config)
}

pub fn service_from_args(
    config: &ApplicationCfg,
    args: &ArgMatches<'_>,
) -> Result<TileService, String> {
    let mut service = TileService::from_config(config)?;
    let dry_run = args
        .value_of("dry-run")
        .map_or(Ok(false), |s| bool::from_str(s))
        .map_err(|_| "Error parsing 'dry-run' as boolean value".to_string())?;
    if dry_run {
        info!("Dry run, no tiles will be written");
        service.output = TileOutput::Nooutput(Nooutput);
    }
    Ok(service)
}

pub fn gen_config(args: &ArgMatches<'_>) -> Result<String, String> {
    if args.is_present("image") {
        let config = config_from_args(args)?;
        let service = service_from_args(&config, args)?;
        Ok(service.gen_runtime_config())
    } else {
        Ok(TileService::gen_config())
    }
}
