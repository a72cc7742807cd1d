use anyhow::{bail, Context, Result};
use itertools::Itertools;
use ndarray::{Array3, Axis};
use ndarray_npy::{read_npy, ReadNpyError, ReadableElement};
use num_traits::AsPrimitive;
use std::io;
use std::path::Path;

/// The per-particle quantities stored along the last axis of a step-series
/// array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    /// Longitudinal position, m
    Position,
    /// Energy deviation, eV
    EnergyDeviation,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::Position, Channel::EnergyDeviation];

    pub fn index(self) -> usize {
        match self {
            Channel::Position => 0,
            Channel::EnergyDeviation => 1,
        }
    }
}

type Reader = fn(&Path) -> Result<Array3<f64>, ReadNpyError>;

// Tried in order until the file's descriptor matches.
const READERS: [Reader; 10] = [
    read_widened::<f64>,
    read_widened::<f32>,
    read_widened::<i64>,
    read_widened::<i32>,
    read_widened::<i16>,
    read_widened::<i8>,
    read_widened::<u64>,
    read_widened::<u32>,
    read_widened::<u16>,
    read_widened::<u8>,
];

fn read_widened<T>(path: &Path) -> Result<Array3<f64>, ReadNpyError>
where
    T: ReadableElement + AsPrimitive<f64>,
{
    let data: Array3<T> = read_npy(path)?;
    Ok(data.mapv(|v| v.as_()))
}

/// Simulation output indexed as `[step, particle, channel]`.
pub struct StepSeries {
    data: Array3<f64>,
}

impl StepSeries {
    pub fn new(data: Array3<f64>) -> Result<StepSeries> {
        let n_channels = data.len_of(Axis(2));
        if n_channels < Channel::ALL.len() {
            bail!(
                "Step series needs at least {} channels, found {}",
                Channel::ALL.len(),
                n_channels
            );
        }
        Ok(StepSeries { data })
    }

    pub fn from_shape_vec(shape: (usize, usize, usize), values: Vec<f64>) -> Result<StepSeries> {
        let data = Array3::from_shape_vec(shape, values)
            .context("Step series values do not match the requested shape")?;
        StepSeries::new(data)
    }

    /// Reads a `.npy` file of any float or integer element type, widened
    /// to f64.
    pub fn load(path: &Path) -> Result<StepSeries> {
        for read in READERS.iter() {
            match read(path) {
                Ok(data) => return StepSeries::new(data),
                Err(ReadNpyError::WrongDescriptor(_)) => continue,
                Err(e) => {
                    return Err(e).with_context(|| {
                        format!("Could not read step series from {}", path.display())
                    })
                }
            }
        }
        bail!(
            "Could not read step series from {}: element type is not numeric",
            path.display()
        )
    }

    pub fn n_steps(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    pub fn n_particles(&self) -> usize {
        self.data.len_of(Axis(1))
    }

    /// One series per particle, each holding that particle's channel value
    /// at every step in order.
    pub fn channel_series(&self, channel: Channel) -> Vec<Vec<f64>> {
        self.data
            .index_axis(Axis(2), channel.index())
            .axis_iter(Axis(1))
            .map(|particle| particle.to_vec())
            .collect()
    }

    /// Writes every particle's raw sequence, position channel first, one
    /// line per particle.
    pub fn echo<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        for channel in Channel::ALL.iter() {
            for particle in self.channel_series(*channel) {
                writeln!(out, "[{}]", particle.iter().join(" "))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray_npy::write_npy;

    fn build_test_series() -> StepSeries {
        // 3 steps, 2 particles, 2 channels.
        // channel 0 is [[0, 1], [2, 3], [4, 5]], channel 1 is 10x that.
        let values = vec![
            0., 0., 1., 10., //
            2., 20., 3., 30., //
            4., 40., 5., 50.,
        ];
        StepSeries::from_shape_vec((3, 2, 2), values).unwrap()
    }

    #[test]
    fn position_series_per_particle() {
        let series = build_test_series();
        let pos = series.channel_series(Channel::Position);
        assert_eq!(pos, vec![vec![0., 2., 4.], vec![1., 3., 5.]]);
    }

    #[test]
    fn energy_series_per_particle() {
        let series = build_test_series();
        let energy = series.channel_series(Channel::EnergyDeviation);
        assert_eq!(energy, vec![vec![0., 20., 40.], vec![10., 30., 50.]]);
    }

    #[test]
    fn series_count_and_length() {
        let n_steps = 7;
        let n_prtls = 5;
        let values: Vec<f64> = (0..n_steps * n_prtls * 3).map(|v| v as f64).collect();
        let series = StepSeries::from_shape_vec((n_steps, n_prtls, 3), values).unwrap();
        for channel in Channel::ALL.iter() {
            let all = series.channel_series(*channel);
            assert_eq!(all.len(), n_prtls);
            for particle in all {
                assert_eq!(particle.len(), n_steps);
            }
        }
    }

    #[test]
    fn single_channel_is_rejected() {
        let err = StepSeries::from_shape_vec((2, 2, 1), vec![0.; 4]);
        assert!(err.is_err());
    }

    #[test]
    fn echo_prints_positions_then_energies() {
        let series = build_test_series();
        let mut out = Vec::new();
        series.echo(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["[0 2 4]", "[1 3 5]", "[0 20 40]", "[10 30 50]"]);
    }

    #[test]
    fn load_widens_single_precision() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("steps.npy");
        let data = Array3::<f32>::from_shape_fn((4, 3, 2), |(i, j, k)| (i * 6 + j * 2 + k) as f32);
        write_npy(&path, &data).unwrap();

        let series = StepSeries::load(&path).unwrap();
        assert_eq!(series.n_steps(), 4);
        assert_eq!(series.n_particles(), 3);
        assert_eq!(series.channel_series(Channel::Position)[1], vec![2., 8., 14., 20.]);
    }

    #[test]
    fn load_widens_integers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("steps_i64.npy");
        let data =
            Array3::<i64>::from_shape_fn((3, 2, 2), |(i, j, k)| (i * 4 + j * 2 + k) as i64 - 5);
        write_npy(&path, &data).unwrap();

        let series = StepSeries::load(&path).unwrap();
        assert_eq!(series.n_steps(), 3);
        assert_eq!(series.channel_series(Channel::Position)[0], vec![-5., -1., 3.]);
        assert_eq!(series.channel_series(Channel::EnergyDeviation)[1], vec![-2., 2., 6.]);

        let path = dir.path().join("steps_u8.npy");
        write_npy(&path, &Array3::<u8>::from_elem((2, 1, 2), 7)).unwrap();
        let series = StepSeries::load(&path).unwrap();
        assert_eq!(series.channel_series(Channel::Position), vec![vec![7., 7.]]);

        let path = dir.path().join("steps_i32.npy");
        write_npy(&path, &Array3::<i32>::zeros((1, 2, 2))).unwrap();
        assert_eq!(StepSeries::load(&path).unwrap().n_particles(), 2);
    }

    #[test]
    fn load_rejects_non_numeric_elements() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flags.npy");
        write_npy(&path, &Array3::<bool>::from_elem((2, 2, 2), true)).unwrap();
        assert!(StepSeries::load(&path).is_err());
    }

    #[test]
    fn load_rejects_wrong_rank() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flat.npy");
        let data = ndarray::Array2::<f64>::zeros((3, 2));
        write_npy(&path, &data).unwrap();
        assert!(StepSeries::load(&path).is_err());
    }
}
