//! Writes a synthetic `files/` tree for trying the viewer:
//!
//! ```text
//! files/
//!   train.csv, test.csv, points.csv
//!   validation/<group>/<n>.csv, <n>.vd.csv
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

#[derive(Serialize)]
struct CurveRow {
    epoch: u32,
    error: f64,
    accuracy: f64,
}

#[derive(Serialize)]
struct PointRow {
    px: f64,
    py: f64,
    tx: f64,
    ty: f64,
}

/// Deterministic splitmix64 noise source.
struct Noise(u64);

impl Noise {
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^= z >> 31;
        (z >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `[-scale, scale)`.
    fn jitter(&mut self, scale: f64) -> f64 {
        (self.next_f64() * 2.0 - 1.0) * scale
    }
}

/// Exponentially decaying error towards `floor`, accuracy rising to match.
fn learning_curve(epochs: u32, rate: f64, floor: f64, noise: &mut Noise) -> Vec<CurveRow> {
    (0..epochs)
        .map(|epoch| {
            let error = floor + (1.0 - floor) * (-rate * epoch as f64).exp() + noise.jitter(0.01);
            CurveRow {
                epoch,
                error: error.max(0.0),
                accuracy: (1.0 - error).clamp(0.0, 1.0),
            }
        })
        .collect()
}

fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let out: PathBuf = std::env::args().nth(1).unwrap_or_else(|| "files".into()).into();
    let validation = out.join("validation");
    let mut noise = Noise(42);

    let rates = [0.005, 0.02, 0.08];
    let momenta = [0.0, 0.5, 0.9];
    let mut groups = 0;
    for &rate in &rates {
        for &momentum in &momenta {
            let dir = validation.join(format!("t200_e{rate}_m{momentum}"));
            fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
            let floor = 0.05 + 0.1 * (1.0 - momentum);
            for run in 0..3 {
                write_rows(
                    &dir.join(format!("{run}.csv")),
                    &learning_curve(400, rate, floor, &mut noise),
                )?;
                write_rows(
                    &dir.join(format!("{run}.vd.csv")),
                    &learning_curve(400, rate * 0.8, floor + 0.05, &mut noise),
                )?;
            }
            groups += 1;
        }
    }

    // An empty group and a header-only run log exercise the skip rules.
    let empty = validation.join("t200_e0.5_m0.99");
    fs::create_dir_all(&empty)?;
    fs::write(empty.join("0.csv"), "epoch,error,accuracy\n")?;
    groups += 1;

    write_rows(&out.join("train.csv"), &learning_curve(1000, 0.01, 0.02, &mut noise))?;
    write_rows(&out.join("test.csv"), &learning_curve(1000, 0.008, 0.06, &mut noise))?;

    let points: Vec<PointRow> = (0..200)
        .map(|i| {
            let x = i as f64 / 199.0;
            let y = (6.0 * x).sin() * x;
            PointRow {
                px: x,
                py: y + noise.jitter(0.05),
                tx: x,
                ty: y,
            }
        })
        .collect();
    write_rows(&out.join("points.csv"), &points)?;

    println!("Wrote {groups} experiment groups and error/point logs to {}", out.display());
    Ok(())
}
