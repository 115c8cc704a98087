use geoflow_adapters::{default_definitions, demo_features, keys, GetFeaturesResponse, FEATURES_GET};
use geoflow_core::PipelineEngine;

fn main() {
    env_logger::init();
    // CLI mínima: `geoflow get [--scope <S>] [--token <T>] [--bbox x0,y0,x1,y1] [--attrs a,b]`
    //             `geoflow list`
    let args: Vec<String> = std::env::args().collect();

    let engine: PipelineEngine<GetFeaturesResponse> = match PipelineEngine::build(default_definitions()) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("[geoflow] definition error: {e}");
            std::process::exit(5);
        }
    };

    if args.len() >= 2 && args[1] == "list" {
        let mut stamps: Vec<String> = engine.registry().stamps().map(|s| s.to_string()).collect();
        stamps.sort();
        for stamp in stamps {
            println!("{stamp}");
        }
        std::process::exit(0);
    }

    if args.len() >= 2 && args[1] == "get" {
        let mut scope: Option<String> = None;
        let mut token: Option<String> = None;
        let mut bbox: Option<[f64; 4]> = None;
        let mut attrs: Option<Vec<String>> = None;
        let mut i = 2;
        while i < args.len() {
            match args[i].as_str() {
                "--scope" => {
                    i += 1;
                    if i < args.len() { scope = Some(args[i].clone()); }
                }
                "--token" => {
                    i += 1;
                    if i < args.len() { token = Some(args[i].clone()); }
                }
                "--bbox" => {
                    i += 1;
                    if i < args.len() {
                        let parts: Vec<f64> = args[i].split(',').filter_map(|p| p.trim().parse().ok()).collect();
                        match <[f64; 4]>::try_from(parts) {
                            Ok(b) => bbox = Some(b),
                            Err(_) => {
                                eprintln!("[geoflow get] bbox debe ser x0,y0,x1,y1");
                                std::process::exit(2);
                            }
                        }
                    }
                }
                "--attrs" => {
                    i += 1;
                    if i < args.len() {
                        attrs = Some(args[i].split(',').map(|p| p.trim().to_string()).collect());
                    }
                }
                _ => {}
            }
            i += 1;
        }

        let mut ctx = engine.new_context();
        ctx.put(keys::LAYER_ID, serde_json::json!(scope.as_deref().unwrap_or("demo")));
        ctx.put(keys::LAYER_FEATURES, demo_features());
        if let Some(tok) = token {
            ctx.put(keys::SECURITY_TOKEN, serde_json::json!(tok));
        }
        if let Some(b) = bbox {
            ctx.put(keys::BBOX, serde_json::json!(b));
        }
        if let Some(a) = attrs {
            ctx.put(keys::ATTRIBUTE_FILTER, serde_json::json!(a));
        }

        let mut response = GetFeaturesResponse::default();
        match engine.execute_by_name(FEATURES_GET, scope.as_deref(), &mut ctx, &mut response) {
            Ok(()) => {
                match serde_json::to_string_pretty(&response) {
                    Ok(body) => println!("{body}"),
                    Err(e) => {
                        eprintln!("[geoflow get] serialize error: {e}");
                        std::process::exit(5);
                    }
                }
                if let Some(audit) = ctx.get_optional(keys::SECURITY_AUDIT) {
                    eprintln!("[geoflow get] audit: {audit}");
                }
                std::process::exit(0);
            }
            Err(e) => {
                eprintln!("[geoflow get] pipeline error: {e}");
                std::process::exit(4);
            }
        }
    }

    println!("geoflow-cli: use 'get' or 'list' subcommands");
    std::process::exit(2);
}
