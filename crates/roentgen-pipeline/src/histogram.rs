//! Intensity histogram and the exposure anomaly check.
//!
//! A radiograph dominated by its darkest or brightest intensities was
//! likely under- or overexposed, or captured with an obstruction in the
//! beam path. The check is a heuristic over bucket counts: it reads the
//! image and never modifies it.

use image::GrayImage;
use serde::{Deserialize, Serialize};

use crate::types::AnomalyParams;

/// Outcome of an anomaly check, ready for host-side rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnomalyReport {
    /// Pixel count per intensity bucket, darkest bucket first.
    pub histogram: Vec<u64>,
    /// Pixel count of the darkest bucket.
    pub dark_count: u64,
    /// Pixel count of the brightest bucket.
    pub bright_count: u64,
    /// Whether either boundary bucket exceeded its threshold.
    pub anomalous: bool,
}

/// Count pixel intensities into `bins` uniform buckets.
///
/// The bucket of value `v` is `v * bins / 256`. A zero `bins` is treated
/// as one. Counts are `u64`, so they cannot saturate on any image whose
/// pixels fit in memory.
#[must_use = "returns the computed histogram"]
pub fn histogram(image: &GrayImage, bins: u32) -> Vec<u64> {
    let bins = bins.max(1);
    let mut counts = vec![0_u64; as_index(u64::from(bins))];
    for pixel in image.pixels() {
        let bucket = u64::from(pixel[0]) * u64::from(bins) / 256;
        counts[as_index(bucket)] += 1;
    }
    counts
}

/// Flag over-dark or over-bright exposure from the boundary buckets.
///
/// The darkest bucket's count is compared against `params.dark_threshold`
/// and the brightest against `params.bright_threshold`; strictly
/// exceeding either marks the image anomalous. The full histogram rides
/// along in the report so a host can plot it.
#[must_use = "returns the report without modifying the image"]
pub fn check_anomaly(image: &GrayImage, params: &AnomalyParams) -> AnomalyReport {
    let histogram = histogram(image, params.bins);
    let dark_count = histogram.first().copied().unwrap_or(0);
    let bright_count = histogram.last().copied().unwrap_or(0);
    let anomalous = dark_count > params.dark_threshold || bright_count > params.bright_threshold;
    AnomalyReport {
        histogram,
        dark_count,
        bright_count,
        anomalous,
    }
}

/// Bucket number as a vector index. The bucket is always below `bins`.
#[allow(clippy::cast_possible_truncation)]
const fn as_index(v: u64) -> usize {
    v as usize
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use image::Luma;

    use super::*;

    #[test]
    fn histogram_counts_every_pixel() {
        let img = GrayImage::new(10, 10); // all black
        let counts = histogram(&img, 10);
        assert_eq!(counts.len(), 10);
        assert_eq!(counts[0], 100);
        assert_eq!(counts.iter().sum::<u64>(), 100);
    }

    #[test]
    fn bucket_boundaries_follow_the_bin_width() {
        // With ten bins, 25 still lands in bucket 0, 26 starts bucket 1,
        // and 255 tops out bucket 9.
        let img = GrayImage::from_raw(3, 1, vec![25, 26, 255]).unwrap();
        let counts = histogram(&img, 10);
        assert_eq!(counts[0], 1);
        assert_eq!(counts[1], 1);
        assert_eq!(counts[9], 1);
        assert_eq!(counts.iter().sum::<u64>(), 3);
    }

    #[test]
    fn zero_bins_is_treated_as_one() {
        let img = GrayImage::from_pixel(8, 8, Luma([200]));
        let counts = histogram(&img, 0);
        assert_eq!(counts, vec![64]);
    }

    #[test]
    fn dark_frame_is_anomalous() {
        let img = GrayImage::new(40, 40); // 1600 black pixels
        let report = check_anomaly(&img, &AnomalyParams::default());
        assert!(report.anomalous);
        assert_eq!(report.dark_count, 1600);
        assert_eq!(report.bright_count, 0);
    }

    #[test]
    fn bright_frame_is_anomalous() {
        let img = GrayImage::from_pixel(40, 40, Luma([255]));
        let report = check_anomaly(&img, &AnomalyParams::default());
        assert!(report.anomalous);
        assert_eq!(report.bright_count, 1600);
        assert_eq!(report.dark_count, 0);
    }

    #[test]
    fn midtone_frame_is_clean() {
        let img = GrayImage::from_pixel(100, 100, Luma([128]));
        let report = check_anomaly(&img, &AnomalyParams::default());
        assert!(!report.anomalous);
        assert_eq!(report.histogram[5], 10_000);
        assert_eq!(report.dark_count, 0);
        assert_eq!(report.bright_count, 0);
    }

    #[test]
    fn threshold_is_strictly_greater_than() {
        // Exactly at the threshold is still clean.
        let img = GrayImage::new(40, 25); // 1000 black pixels
        let report = check_anomaly(&img, &AnomalyParams::default());
        assert_eq!(report.dark_count, 1000);
        assert!(!report.anomalous);
    }

    #[test]
    fn report_serializes_for_host_consumption() {
        let img = GrayImage::new(4, 4);
        let report = check_anomaly(&img, &AnomalyParams::default());
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"histogram\""));
        assert!(json.contains("\"dark_count\":16"));
        assert!(json.contains("\"anomalous\":false"));
    }
}
