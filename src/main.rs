use std::env;
use std::fs;
use std::process::ExitCode;

use outlet_locator::logging::init_logger;
use outlet_locator::utils::graph_loader::load_road_graph;
use outlet_locator::utils::ingest::{DemandRequest, NoRegionResolver, PopulationTable};
use outlet_locator::{OptimizerConfig, OptimizerError, OutletOptimizer};

const USAGE: &str =
    "usage: outlet_locator <request.json> [config.json] [--vertices FILE --edges FILE]";

struct Args {
    request_path: String,
    config_path: Option<String>,
    vertices_path: Option<String>,
    edges_path: Option<String>,
}

fn parse_args() -> Option<Args> {
    let mut positional = Vec::new();
    let mut vertices_path = None;
    let mut edges_path = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--vertices" => vertices_path = Some(args.next()?),
            "--edges" => edges_path = Some(args.next()?),
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    Some(Args {
        request_path: positional.next()?,
        config_path: positional.next(),
        vertices_path,
        edges_path,
    })
}

fn main() -> ExitCode {
    let Some(args) = parse_args() else {
        eprintln!("{}", USAGE);
        return ExitCode::FAILURE;
    };

    let config = match &args.config_path {
        Some(path) => match OptimizerConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => OptimizerConfig::default(),
    };

    if let Err(e) = init_logger(&config) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    let request = match fs::read_to_string(&args.request_path)
        .map_err(OptimizerError::from)
        .and_then(|json_str| DemandRequest::from_json(&json_str))
    {
        Ok(request) => request,
        Err(e) => {
            log::error!("Invalid request {}: {}", args.request_path, e);
            return ExitCode::FAILURE;
        }
    };
    log::info!("Received {} demand centers", request.demand_centers.len());

    let graph = match (&args.vertices_path, &args.edges_path) {
        (Some(vertices), Some(edges)) => load_road_graph(vertices, edges),
        _ => None,
    };

    let optimizer = OutletOptimizer::new(config);
    let response =
        match optimizer.run_request(&request, graph.as_ref(), &NoRegionResolver, &PopulationTable::new())
        {
            Ok(response) => response,
            Err(e) => {
                log::error!("Optimization failed: {}", e);
                return ExitCode::FAILURE;
            }
        };

    for outlet in &response.optimized_outlets {
        let served: Vec<u32> = response
            .assignments
            .iter()
            .filter(|a| a.outlet_id == outlet.id)
            .map(|a| a.demand_id)
            .collect();
        log::info!(
            "Outlet {} at ({:.4}, {:.4}) serves demand points {:?}",
            outlet.id,
            outlet.location.lat,
            outlet.location.lon,
            served
        );
    }

    match serde_json::to_string_pretty(&response) {
        Ok(json_str) => {
            println!("{}", json_str);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to serialize response: {}", e);
            ExitCode::FAILURE
        }
    }
}
