// demos/wavetoy_mpi.rs
// cargo mpirun -n 2 --features mpi-support --example wavetoy_mpi
// Solves the 2D wave equation on a 100 x 100 grid split across two MPI
// ranks. Each rank prints a completion line; rank 0 also announces the
// start of the time loop.

#[cfg(feature = "mpi-support")]
fn main() {
    use std::process;
    use wavetoy::algs::communicator::{Communicator, MpiComm};
    use wavetoy::algs::driver::WaveSolver;
    use wavetoy::config::WaveConfig;

    let comm = match MpiComm::new() {
        Ok(comm) => comm,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };
    let rank = comm.rank();
    let size = comm.size();
    if size != 2 {
        if rank == 0 {
            eprintln!("Run with exactly 2 MPI ranks");
        }
        process::exit(1);
    }

    let config = WaveConfig::default();
    let mut solver = match WaveSolver::new(config, &comm) {
        Ok(solver) => solver,
        Err(e) => {
            eprintln!("[rank {rank}] setup failed: {e}");
            process::exit(1);
        }
    };
    if rank == 0 {
        let cfg = solver.config();
        println!("Starting {} steps on {} x {} points", cfg.steps, cfg.nx, cfg.ny);
    }
    match solver.run() {
        Ok(report) => println!(
            "Process {} of {} finished (max |u| = {:e})",
            rank + 1,
            size,
            report.max_abs
        ),
        Err(e) => {
            eprintln!("[rank {rank}] run failed: {e}");
            process::exit(1);
        }
    }
}

#[cfg(not(feature = "mpi-support"))]
fn main() {
    eprintln!("This example requires the 'mpi-support' feature to run.");
}
