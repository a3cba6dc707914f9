//! Writes deterministic sample telemetry logs (`log.csv` and `data.csv`)
//! so the chart renderer can be exercised without a live engine run.

use anyhow::Result;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn write_engine_log(rng: &mut SimpleRng) -> Result<()> {
    let mut writer = csv::Writer::from_path("log.csv")?;
    writer.write_record([
        "time",
        "mouseX",
        "mouseY",
        "uuidType",
        "fps",
        "entities",
        "drawCalls",
        "pointAmount",
        "linesAmount",
        "polyAmount",
    ])?;

    let mut points = 0u32;
    let mut lines = 0u32;
    let mut polys = 0u32;

    for frame in 0..600u32 {
        let time = frame as f64 / 60.0;
        let mouse_x = 640.0 + 400.0 * (time * 0.7).sin() + rng.gauss(0.0, 4.0);
        let mouse_y = 360.0 + 250.0 * (time * 0.4).cos() + rng.gauss(0.0, 4.0);

        // A click lands on something roughly once a second.
        let uuid_type = if frame % 60 == 17 {
            let code = (rng.next_u64() % 3) as i64;
            match code {
                0 => points += 1,
                1 => lines += 1,
                _ => polys += 1,
            }
            code
        } else {
            -1
        };

        let entities = points + lines + polys;
        let fps = (60.0 - entities as f64 * 0.8 + rng.gauss(0.0, 1.5)).max(5.0);

        writer.write_record([
            format!("{time:.4}"),
            format!("{mouse_x:.1}"),
            format!("{mouse_y:.1}"),
            uuid_type.to_string(),
            format!("{fps:.2}"),
            entities.to_string(),
            (entities * 2).to_string(),
            points.to_string(),
            lines.to_string(),
            polys.to_string(),
        ])?;
    }

    writer.flush()?;
    println!("Wrote 600 frames to log.csv");
    Ok(())
}

fn write_nav_log(rng: &mut SimpleRng) -> Result<()> {
    let mut writer = csv::Writer::from_path("data.csv")?;
    writer.write_record([
        "rows",
        "cols",
        "pathAmount",
        "obsAmount",
        "sample",
        "run",
        "pathTime",
        "pathDist",
        "objPoints",
        "sumTime",
    ])?;

    let grids = [(32u32, 32u32), (64, 64)];
    let path_amounts = [16u32, 64];
    let obs_amounts = [32u32, 128];
    let mut rows_written = 0u32;

    for &(rows, cols) in &grids {
        for &path_amount in &path_amounts {
            for &obs_amount in &obs_amounts {
                for sample in 0..4u32 {
                    for run in 0..3u32 {
                        // Cost scales with grid area, path count and clutter.
                        let base = (rows * cols) as f64
                            * path_amount as f64
                            * (1.0 + obs_amount as f64 / 64.0);
                        let path_time = (base * 40.0 * (1.0 + rng.gauss(0.0, 0.1))).max(1.0);
                        let path_dist =
                            path_amount as f64 * rows as f64 * (0.8 + rng.next_f64() * 0.6);
                        let obj_points = obs_amount * 4;
                        // The Minkowski sum is only recomputed on the first
                        // sample of a run.
                        let sum_time = if sample == 0 {
                            obj_points as f64 * 2e-5 * (1.0 + rng.gauss(0.0, 0.05))
                        } else {
                            0.0
                        };

                        writer.write_record([
                            rows.to_string(),
                            cols.to_string(),
                            path_amount.to_string(),
                            obs_amount.to_string(),
                            sample.to_string(),
                            run.to_string(),
                            format!("{path_time:.0}"),
                            format!("{path_dist:.2}"),
                            obj_points.to_string(),
                            format!("{sum_time:.6}"),
                        ])?;
                        rows_written += 1;
                    }
                }
            }
        }
    }

    writer.flush()?;
    println!("Wrote {rows_written} samples to data.csv");
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    write_engine_log(&mut rng)?;
    write_nav_log(&mut rng)?;
    Ok(())
}
