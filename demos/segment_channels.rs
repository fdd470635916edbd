//! Segment synthetic motion-capture channels
//!
//! Builds a few joint channels with posture changes, runs the analyzer and a
//! small parameter sweep, and prints the detected boundaries.
//!
//! ```bash
//! cargo run --example segment_channels
//! ```

use motion_analysis::{
    sparsest_cell, Channel, MotionAnalyzer, MotionResult, ParameterSweep, PipelineConfig,
    SweepGrid,
};

const FRAME_RATE: u32 = 30;

fn posture_channel(label: &str, frames: usize, changes: &[(usize, f64)], sway: f64) -> Channel {
    let samples = (0..frames)
        .map(|i| {
            let level = changes
                .iter()
                .take_while(|(frame, _)| i >= *frame)
                .last()
                .map_or(0.0, |(_, level)| *level);
            level + sway * (i as f64 * 0.21).sin()
        })
        .collect();
    Channel::new(label, samples)
}

fn main() -> MotionResult<()> {
    let channels = vec![
        posture_channel("hips_y", 900, &[(120, 0.4), (450, -0.2), (700, 0.1)], 0.01),
        posture_channel("knee_l", 900, &[(130, 1.2), (460, 0.3)], 0.02),
        posture_channel("shoulder_r", 900, &[(300, 0.8), (710, 0.0)], 0.015),
        Channel::new("root_rot", vec![0.0; 900]),
    ];

    println!("=== Motion Analysis ===\n");

    let config = PipelineConfig::from_motion_duration(0.05, 2.0, FRAME_RATE);
    let analysis = MotionAnalyzer::new(config).analyze(&channels)?;

    for result in &analysis.channels {
        println!(
            "  {:<12} {:>3} inflections",
            result.label,
            result.inflections.len()
        );
    }
    for label in &analysis.skipped {
        println!("  {label:<12} skipped (flat)");
    }
    println!("\nBoundaries (frames): {:?}", analysis.boundaries);
    let seconds: Vec<String> = analysis
        .boundaries
        .iter()
        .map(|&f| format!("{:.2}s", f as f64 / f64::from(FRAME_RATE)))
        .collect();
    println!("Boundaries (time):   {}", seconds.join(", "));

    println!("\n=== Parameter Sweep ===\n");

    let cells = ParameterSweep::new(SweepGrid::default()).run(&channels)?;
    println!("threshold,min_separation,boundaries");
    for cell in &cells {
        println!(
            "{:.2},{},{}",
            cell.threshold,
            cell.min_separation,
            cell.boundary_count()
        );
    }

    if let Some(best) = sparsest_cell(&cells, 3) {
        println!(
            "\nSparsest cell with 3+ boundaries: threshold {:.2}, separation {} -> {:?}",
            best.threshold, best.min_separation, best.boundaries
        );
    }

    Ok(())
}
