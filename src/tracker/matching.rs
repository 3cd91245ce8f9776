//! Association of detections to tracks.

use ndarray::Array2;

use crate::tracker::track::Point;

/// Compute the Euclidean distance matrix between track positions and detections.
///
/// Returns a matrix of shape (M, N) where M is the length of `track_points`
/// and N is the length of `det_points`.
pub fn euclidean_distance(track_points: &[Point], det_points: &[Point]) -> Array2<f32> {
    let mut dists = Array2::zeros((track_points.len(), det_points.len()));
    for (i, t) in track_points.iter().enumerate() {
        for (j, d) in det_points.iter().enumerate() {
            dists[[i, j]] = (d.cast::<f64>() - t.cast::<f64>()).norm() as f32;
        }
    }
    dists
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentResult {
    /// `(track, detection)` pairs in detection order
    pub matches: Vec<(usize, usize)>,
    pub unmatched_tracks: Vec<usize>,
    pub unmatched_detections: Vec<usize>,
}

/// Greedy first-fit assignment.
///
/// Detections are taken in column order. Each one goes to the first track
/// (lowest row) that is still free and strictly closer than `thresh`. Earlier
/// detections are never revisited, so a later, closer detection can lose its
/// track. This is a known approximation that holds up for sparse objects.
pub fn first_fit_assignment(cost_matrix: &Array2<f32>, thresh: f32) -> AssignmentResult {
    let (num_rows, num_cols) = cost_matrix.dim();

    let mut taken = vec![false; num_rows];
    let mut matches = Vec::new();
    let mut unmatched_detections = Vec::new();

    for col in 0..num_cols {
        let hit = (0..num_rows).find(|&row| !taken[row] && cost_matrix[[row, col]] < thresh);
        match hit {
            Some(row) => {
                taken[row] = true;
                matches.push((row, col));
            }
            None => unmatched_detections.push(col),
        }
    }

    let unmatched_tracks = taken
        .iter()
        .enumerate()
        .filter_map(|(i, &t)| if t { None } else { Some(i) })
        .collect();

    AssignmentResult {
        matches,
        unmatched_tracks,
        unmatched_detections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_euclidean_distance() {
        let tracks = [Point::new(0, 0), Point::new(10, 10)];
        let dets = [Point::new(3, 4)];
        let d = euclidean_distance(&tracks, &dets);
        assert_eq!(d.dim(), (2, 1));
        assert!((d[[0, 0]] - 5.0).abs() < 1e-6);
        assert!((d[[1, 0]] - (49.0f32 + 36.0).sqrt()).abs() < 1e-5);
    }

    #[test]
    fn test_empty_inputs() {
        let none = first_fit_assignment(&Array2::zeros((0, 3)), 30.0);
        assert!(none.matches.is_empty());
        assert_eq!(none.unmatched_detections, vec![0, 1, 2]);

        let no_dets = first_fit_assignment(&Array2::zeros((2, 0)), 30.0);
        assert_eq!(no_dets.unmatched_tracks, vec![0, 1]);
        assert!(no_dets.unmatched_detections.is_empty());
    }

    #[test]
    fn test_threshold_is_strict() {
        let cost = array![[30.0f32]];
        let result = first_fit_assignment(&cost, 30.0);
        assert!(result.matches.is_empty());
        assert_eq!(result.unmatched_detections, vec![0]);
    }

    #[test]
    fn test_first_fit_not_nearest() {
        // Detection 0 is within range of both tracks; it takes track 0 even
        // though track 1 is closer. Detection 1 then only has track 1 left.
        let cost = array![[25.0f32, 1.0], [2.0, 28.0]];
        let result = first_fit_assignment(&cost, 30.0);
        assert_eq!(result.matches, vec![(0, 0), (1, 1)]);
        assert!(result.unmatched_tracks.is_empty());
    }

    #[test]
    fn test_greedy_can_strand_a_detection() {
        let cost = array![[10.0f32, 5.0], [100.0, 100.0]];
        let result = first_fit_assignment(&cost, 30.0);
        assert_eq!(result.matches, vec![(0, 0)]);
        assert_eq!(result.unmatched_detections, vec![1]);
        assert_eq!(result.unmatched_tracks, vec![1]);
    }

    #[test]
    fn test_deterministic() {
        let cost = array![[5.0f32, 6.0, 7.0], [5.0, 6.0, 7.0], [50.0, 1.0, 2.0]];
        let a = first_fit_assignment(&cost, 30.0);
        let b = first_fit_assignment(&cost, 30.0);
        assert_eq!(a, b);
        assert_eq!(a.matches, vec![(0, 0), (1, 1), (2, 2)]);
    }
}
