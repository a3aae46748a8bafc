use ndarray::{Array1, Array2, ArrayView2};
use num_complex::Complex64;
use rayon::prelude::*;

use crate::geometry::{Survey, TimeShiftMatrix};
use crate::prelude::{RadonError, RadonResult};
use crate::processing::hermitian::HermitianReconstructor;
use crate::processing::operator::FrequencyOperator;
use crate::processing::spectrum::SpectrumBuffer;
use crate::telemetry::log::LogManager;

/// Synthesizes move-out data `[Nd × Nt]` from a Radon panel `[Np × Nt]` by
/// applying `A(f)` to every forward-frequency column.
pub struct RadonForwardEngine {
    survey: Survey,
    shifts: TimeShiftMatrix,
    logger: LogManager,
}

impl RadonForwardEngine {
    pub fn new(survey: Survey) -> RadonResult<Self> {
        let shifts = survey.time_shifts()?;
        Ok(Self {
            survey,
            shifts,
            logger: LogManager::new("radon-forward"),
        })
    }

    pub fn survey(&self) -> &Survey {
        &self.survey
    }

    /// Full `[Nd × F]` data spectrum before the inverse transform and truncation.
    pub fn spectrum(&self, radon: ArrayView2<f64>) -> RadonResult<Array2<Complex64>> {
        let expected = self.survey.radon_shape();
        if radon.dim() != expected {
            return Err(RadonError::ShapeMismatch(format!(
                "radon matrix is {:?}, expected {:?} (slowness × samples)",
                radon.dim(),
                expected
            )));
        }

        let time = self.survey.time();
        let length = time.transform_length();
        let computed = time.computed_bins();
        self.logger.record(&format!(
            "forward synthesis: {} slowness values onto {} traces, {} bins of {}",
            expected.0,
            self.shifts.distance_count(),
            computed,
            length
        ));

        let radon_spectrum = SpectrumBuffer::new(length).analyze(radon);
        let columns: Vec<Array1<Complex64>> = (0..computed)
            .into_par_iter()
            .map(|bin| {
                let frequency = time.bin_frequency(bin, length);
                FrequencyOperator::at(&self.shifts, frequency).dot(&radon_spectrum.column(bin))
            })
            .collect();

        let mut spectrum = Array2::<Complex64>::zeros((self.shifts.distance_count(), length));
        for (bin, column) in columns.into_iter().enumerate() {
            spectrum.column_mut(bin).assign(&column);
        }
        HermitianReconstructor::mirror(&mut spectrum, computed);
        Ok(spectrum)
    }

    /// Data panel `[Nd × Nt]`.
    pub fn synthesize(&self, radon: ArrayView2<f64>) -> RadonResult<Array2<f64>> {
        let spectrum = self.spectrum(radon)?;
        let time = self.survey.time();
        Ok(SpectrumBuffer::new(time.transform_length()).synthesize(spectrum.view(), time.len()))
    }
}
