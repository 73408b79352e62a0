//! Ehrenfest Urn Example
//!
//! Starts with every particle in box A and watches the system relax towards
//! an even split, then compares the fluctuation spread with the binomial
//! prediction `sqrt(n)`.

use pchem::{Ehrenfest, EhrenfestParams, FluctuationHistogram};

fn main() -> Result<(), pchem::PchemError> {
    println!("Running Ehrenfest urn simulation...\n");

    let params = EhrenfestParams {
        n_a: 100,
        n_b: 0,
        n_steps: 5000,
        width: 100.0,
        height: 100.0,
        seed: Some(42),
    };

    println!("Configuration:");
    println!("  Particles in A: {}", params.n_a);
    println!("  Particles in B: {}", params.n_b);
    println!("  Steps:          {}", params.n_steps);
    println!();

    let mut last = None;
    for frame in Ehrenfest::from_params(&params)? {
        if frame.step % 500 == 0 {
            println!(
                "  step {:>5}: N_A = {:>3}, N_B = {:>3}",
                frame.step, frame.count_a, frame.count_b
            );
        }
        last = Some(frame);
    }

    let Some(last) = last else {
        return Ok(());
    };

    // Discard the relaxation phase before measuring the equilibrium spread.
    let mut settled = FluctuationHistogram::new(params.n());
    for &f in &last.fluctuations[last.fluctuations.len() / 2..] {
        settled.record(f);
    }
    let mean = settled.mean().unwrap_or(0.0);
    let std = settled.std_dev().unwrap_or(0.0);

    let summary = last.summary();
    println!("\nWHOLE RUN");
    println!("=========");
    println!("  Mean N_B - N_A:     {:.3}", summary.fluctuation_mean);
    println!("  Std N_B - N_A:      {:.3}", summary.fluctuation_std);

    println!("\nEQUILIBRIUM (second half of the run)");
    println!("====================================");
    println!("  Mean N_B - N_A:     {:.3}", mean);
    println!("  Std N_B - N_A:      {:.3}", std);
    println!("  Binomial sqrt(n):   {:.3}", (params.n() as f64).sqrt());
    println!("\nDone!");

    Ok(())
}
