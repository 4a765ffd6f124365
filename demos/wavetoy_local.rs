// demos/wavetoy_local.rs
// cargo run --example wavetoy_local [config.json]
// Runs the two-rank solver with both ranks as threads of this process and
// prints each rank's completion line and the stitched field's centre value.

use std::process;

use wavetoy::prelude::*;

fn main() {
    let config = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| WaveError::Config(format!("{path}: {e}")))
            .and_then(|s| WaveConfig::from_json(&s))
        {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        },
        None => WaveConfig::default(),
    };

    let reports = match run_in_process(&config, 2) {
        Ok(reports) => reports,
        Err(e) => {
            eprintln!("run failed: {e}");
            process::exit(1);
        }
    };
    for r in &reports {
        println!("Process {} of {} finished (max |u| = {:e})", r.rank + 1, r.size, r.max_abs);
    }
    let global = match stitch(&reports, config.nx, config.ny) {
        Ok(global) => global,
        Err(e) => {
            eprintln!("stitch failed: {e}");
            process::exit(1);
        }
    };
    let (ci, cj) = (config.nx.div_ceil(2), config.ny.div_ceil(2));
    println!("u at grid point ({ci}, {cj}) = {:e}", global[ci - 1][cj - 1]);
}
