use crate::generator::template::ricker;
use crate::workflow::config::WorkflowConfig;
use anyhow::{ensure, Context};
use ndarray::Array2;
use radoncore::gather::nearest_index;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Sparse Radon panel `[slowness × time]` with a Ricker wavelet at every pick.
pub fn build_radon_model(config: &WorkflowConfig) -> anyhow::Result<Array2<f64>> {
    let time = config.time_axis();
    let slowness = config.slowness_axis();
    ensure!(!time.is_empty(), "workflow needs at least one time sample");
    ensure!(!slowness.is_empty(), "workflow needs at least one slowness value");

    let mut model = Array2::zeros((slowness.len(), time.len()));
    for pick in &config.picks {
        let row = nearest_index(&slowness, pick.slowness)
            .with_context(|| format!("placing pick at slowness {}", pick.slowness))?;
        for (sample, &t) in time.iter().enumerate() {
            model[[row, sample]] += pick.amplitude * ricker(t - pick.time, config.wavelet_frequency);
        }
    }
    Ok(model)
}

/// Adds seeded uniform noise scaled to the peak absolute amplitude of `data`.
pub fn add_noise(data: &mut Array2<f64>, level: f64, seed: u64) {
    if level <= 0.0 {
        return;
    }
    let peak = data.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    let bound = level * peak;
    if bound <= 0.0 {
        return;
    }
    let mut rng = StdRng::seed_from_u64(seed);
    data.mapv_inplace(|v| v + rng.gen_range(-bound..bound));
}
