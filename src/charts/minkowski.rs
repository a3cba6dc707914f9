use std::path::Path;

use anyhow::Result;
use log::{info, warn};
use plotters::prelude::*;

use super::{mean_line, padded_range, CAPTION_FONT};
use crate::data::model::NavSample;

/// Render the Minkowski sum timing chart.
pub fn render(samples: &[NavSample], out_path: &Path) -> Result<()> {
    let line = mean_line(sum_time_points(samples));
    if line.is_empty() {
        warn!(
            "no Minkowski sum samples; skipping {}",
            out_path.display()
        );
        return Ok(());
    }

    let (x_min, x_max) = padded_range(line.iter().map(|(x, _)| *x));
    let (y_min, y_max) = padded_range(line.iter().map(|(_, y)| *y));

    let root = BitMapBackend::new(out_path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Minkowski Sum", CAPTION_FONT)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Quantidade de Pontos")
        .y_desc("Tempo de Processamento (s)")
        .draw()?;

    chart.draw_series(LineSeries::new(line, BLUE.stroke_width(2)))?;

    root.present()?;
    info!("wrote {}", out_path.display());
    Ok(())
}

/// `(objPoints, sumTime)` pairs for frames that recomputed the sum; a
/// zero `sumTime` marks frames that did not.
fn sum_time_points(samples: &[NavSample]) -> Vec<(f64, f64)> {
    samples
        .iter()
        .filter(|s| s.sum_time != 0.0)
        .map(|s| (s.obj_points as f64, s.sum_time))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sum_time_rows_are_filtered_out() {
        let mut s = NavSample {
            rows: 64,
            cols: 64,
            path_amount: 8,
            obs_amount: 32,
            sample: 0,
            run: 0,
            path_time: 0.0,
            path_dist: 0.0,
            obj_points: 24,
            sum_time: 0.0,
        };
        let idle = s.clone();
        s.sum_time = 0.25;

        let points = sum_time_points(&[idle, s]);
        assert_eq!(points, vec![(24.0, 0.25)]);
    }
}
