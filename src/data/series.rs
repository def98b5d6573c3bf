use super::model::RunLog;

/// Zip two columns into points, keeping at most the first `limit` rows.
pub fn clamp(xs: &[f64], ys: &[f64], limit: usize) -> Vec<[f64; 2]> {
    xs.iter()
        .zip(ys)
        .take(limit)
        .map(|(&x, &y)| [x, y])
        .collect()
}

/// The `(epoch, metric)` curve of a run, clamped to `last_epoch` rows.
pub fn run_curve(run: &RunLog, last_epoch: usize) -> Vec<[f64; 2]> {
    clamp(&run.columns.epoch, &run.columns.metric, last_epoch)
}

/// Element-wise mean of the metric over `runs`.
///
/// Runs of different length are averaged over their common prefix; the x
/// values come from the first run. Returns `None` for an empty slice.
pub fn mean_curve(runs: &[RunLog], last_epoch: usize) -> Option<Vec<[f64; 2]>> {
    let first = runs.first()?;
    let len = runs
        .iter()
        .map(|r| r.columns.len())
        .min()
        .unwrap_or(0)
        .min(last_epoch);

    let n = runs.len() as f64;
    let curve = (0..len)
        .map(|i| {
            let sum: f64 = runs.iter().map(|r| r.columns.metric[i]).sum();
            [first.columns.epoch[i], sum / n]
        })
        .collect();
    Some(curve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Columns;

    fn run(name: &str, metric: &[f64]) -> RunLog {
        let mut columns = Columns::default();
        for (i, &m) in metric.iter().enumerate() {
            columns.push(i as f64, m, 0.0);
        }
        RunLog::new(name.to_string(), columns)
    }

    #[test]
    fn test_clamp_limits_points() {
        let r = run("0.csv", &[5.0, 4.0, 3.0, 2.0, 1.0]);
        assert_eq!(run_curve(&r, 3).len(), 3);
        assert_eq!(run_curve(&r, 2_000_000).len(), 5);
        assert_eq!(run_curve(&r, 2)[1], [1.0, 4.0]);
    }

    #[test]
    fn test_mean_over_common_prefix() {
        let runs = vec![run("0.csv", &[1.0, 2.0, 3.0]), run("0.vd.csv", &[3.0, 4.0])];
        let mean = mean_curve(&runs, 100).unwrap();
        assert_eq!(mean, vec![[0.0, 2.0], [1.0, 3.0]]);
        assert_eq!(mean_curve(&runs, 1).unwrap().len(), 1);
    }

    #[test]
    fn test_mean_of_nothing() {
        assert!(mean_curve(&[], 10).is_none());
    }
}
