//! Short-term versus long-term trading volume.

use crate::domain::config::VolumeWindows;

/// Mean of the last `short` volumes over the mean of the last `long`.
///
/// Returns 0 ("no abnormal volume") with fewer than `long` observations or
/// when the long mean is 0.
pub fn volume_ratio(volumes: &[f64], windows: VolumeWindows) -> f64 {
    let VolumeWindows { short, long } = windows;
    if short == 0 || long == 0 || volumes.len() < long {
        return 0.0;
    }
    let mean = |n: usize| volumes[volumes.len() - n..].iter().sum::<f64>() / n as f64;
    let long_mean = mean(long);
    if long_mean == 0.0 {
        return 0.0;
    }
    mean(short.min(volumes.len())) / long_mean
}
