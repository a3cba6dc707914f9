use serde::Deserialize;

// ---------------------------------------------------------------------------
// EngineSample – one row of the interactive engine log (log.csv)
// ---------------------------------------------------------------------------

/// One frame of engine telemetry. Field names map to the camelCase CSV
/// headers written by the engine's state logger.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EngineSample {
    /// Execution time since startup, seconds.
    pub time: f64,
    #[serde(rename = "mouseX")]
    pub mouse_x: f64,
    #[serde(rename = "mouseY")]
    pub mouse_y: f64,
    /// Geometry code of the entity clicked this frame; -1 when no click
    /// landed on anything.
    #[serde(rename = "uuidType")]
    pub uuid_type: i64,
    /// CPU-side frames per second.
    pub fps: f64,
    pub entities: u32,
    #[serde(rename = "drawCalls")]
    pub draw_calls: u32,
    #[serde(rename = "pointAmount")]
    pub point_amount: u32,
    #[serde(rename = "linesAmount")]
    pub lines_amount: u32,
    #[serde(rename = "polyAmount")]
    pub poly_amount: u32,
}

// ---------------------------------------------------------------------------
// NavSample – one row of the navigation benchmark log (data.csv)
// ---------------------------------------------------------------------------

/// One pathfinding sample from a navigation benchmark run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NavSample {
    /// Grid dimensions.
    pub rows: u32,
    pub cols: u32,
    #[serde(rename = "pathAmount")]
    pub path_amount: u32,
    #[serde(rename = "obsAmount")]
    pub obs_amount: u32,
    /// Sample index within a run.
    pub sample: u32,
    /// Benchmark repetition index.
    pub run: u32,
    /// Per-frame Dijkstra time, nanoseconds.
    #[serde(rename = "pathTime")]
    pub path_time: f64,
    /// Summed length of the paths found this frame.
    #[serde(rename = "pathDist")]
    pub path_dist: f64,
    /// Obstacle vertex count fed to the Minkowski sum.
    #[serde(rename = "objPoints")]
    pub obj_points: u32,
    /// Minkowski sum processing time, seconds. Zero on frames where the
    /// sum was not recomputed.
    #[serde(rename = "sumTime")]
    pub sum_time: f64,
}

impl NavSample {
    /// Configuration label shared by every sample of the same benchmark
    /// setup: `"{rows}x{cols}|{pathAmount}/{obsAmount}"`.
    pub fn config_key(&self) -> String {
        format!(
            "{}x{}|{}/{}",
            self.rows, self.cols, self.path_amount, self.obs_amount
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_key_uses_fixed_separators() {
        let s = NavSample {
            rows: 64,
            cols: 32,
            path_amount: 8,
            obs_amount: 128,
            sample: 0,
            run: 1,
            path_time: 0.0,
            path_dist: 0.0,
            obj_points: 0,
            sum_time: 0.0,
        };
        assert_eq!(s.config_key(), "64x32|8/128");
    }
}
