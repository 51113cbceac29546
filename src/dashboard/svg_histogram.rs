//! The static histogram, drawn on the server as an inline SVG.
//!
//! Species are layered on top of each other with translucent bars over a
//! light grid, so overlapping distributions stay visible without any script.

use maud::{Markup, html};

use crate::{
    dashboard::{charts::species_color, histogram::Histogram},
    dataset::Measurement,
};

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 380.0;
const MARGIN_LEFT: f64 = 64.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 24.0;
const MARGIN_BOTTOM: f64 = 56.0;

const PLOT_WIDTH: f64 = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
const PLOT_HEIGHT: f64 = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

const X_TICK_COUNT: usize = 5;
const GRID_COLOR: &str = "#e5e7eb";
const TEXT_COLOR: &str = "#374151";

/// The smallest step of the form 1, 2 or 5 times a power of ten that splits
/// `0..=max` into at most five intervals.
fn nice_step(max: u64) -> u64 {
    let mut magnitude = 1;

    loop {
        for factor in [1, 2, 5] {
            let step = factor * magnitude;
            if max.div_ceil(step) <= 5 {
                return step;
            }
        }

        magnitude *= 10;
    }
}

/// The count ticks on the y-axis, from zero to at least `max_count`.
fn count_ticks(max_count: u64) -> Vec<u64> {
    let step = nice_step(max_count.max(1));
    let top = max_count.max(1).div_ceil(step) * step;

    (0..=top).step_by(step as usize).collect()
}

/// Renders `histogram` as an SVG with a legend for each species.
///
/// # Arguments
/// * `histogram` - The binned measurement
/// * `attribute` - The measurement that was binned, used for the axis label
/// * `all_species` - The species of the whole dataset, for stable colours
pub(super) fn histogram_svg(
    histogram: &Histogram,
    attribute: Measurement,
    all_species: &[String],
) -> Markup {
    let edges = histogram.edges();
    let (min, max) = (edges[0], edges[edges.len() - 1]);
    let bin_width = PLOT_WIDTH / histogram.bin_count() as f64;

    let y_ticks = count_ticks(histogram.max_count());
    let y_top = y_ticks.last().copied().unwrap_or(1).max(1) as f64;

    let x_position = |value: f64| MARGIN_LEFT + (value - min) / (max - min) * PLOT_WIDTH;
    let y_position = |count: f64| MARGIN_TOP + PLOT_HEIGHT - count / y_top * PLOT_HEIGHT;

    let x_ticks: Vec<f64> = (0..=X_TICK_COUNT)
        .map(|i| min + (max - min) * i as f64 / X_TICK_COUNT as f64)
        .collect();

    html!(
        svg
            xmlns="http://www.w3.org/2000/svg"
            viewBox={"0 0 " (WIDTH) " " (HEIGHT)}
            role="img"
            aria-label={"Histogram of " (attribute.label()) " by species"}
            class="w-full h-auto rounded bg-white"
        {
            g class="grid"
            {
                @for tick in &y_ticks {
                    @let y = y_position(*tick as f64);
                    line
                        x1=(MARGIN_LEFT) x2=(MARGIN_LEFT + PLOT_WIDTH)
                        y1=(y) y2=(y)
                        stroke=(GRID_COLOR)
                    {}
                    text
                        x=(MARGIN_LEFT - 8.0) y=(y + 4.0)
                        text-anchor="end" font-size="12" fill=(TEXT_COLOR)
                    { (tick) }
                }

                @for tick in &x_ticks {
                    @let x = x_position(*tick);
                    line
                        x1=(x) x2=(x)
                        y1=(MARGIN_TOP) y2=(MARGIN_TOP + PLOT_HEIGHT)
                        stroke=(GRID_COLOR)
                    {}
                    text
                        x=(x) y=(MARGIN_TOP + PLOT_HEIGHT + 18.0)
                        text-anchor="middle" font-size="12" fill=(TEXT_COLOR)
                    { (format!("{tick:.1}")) }
                }
            }

            @for group in histogram.groups() {
                g
                    class="bars"
                    data-species=(group.species)
                    fill=(species_color(all_species, &group.species))
                    fill-opacity="0.5"
                    stroke="white"
                    stroke-width="0.5"
                {
                    @for (bin, count) in group.counts.iter().enumerate() {
                        @if *count > 0 {
                            @let top = y_position(*count as f64);
                            rect
                                x=(MARGIN_LEFT + bin as f64 * bin_width)
                                y=(top)
                                width=(bin_width)
                                height=(MARGIN_TOP + PLOT_HEIGHT - top)
                            {
                                title { (group.species) ": " (count) }
                            }
                        }
                    }
                }
            }

            text
                x=(MARGIN_LEFT + PLOT_WIDTH / 2.0) y=(HEIGHT - 12.0)
                text-anchor="middle" font-size="13" fill=(TEXT_COLOR)
            { (attribute.label()) }

            text
                x="16" y=(MARGIN_TOP + PLOT_HEIGHT / 2.0)
                transform={"rotate(-90 16 " (MARGIN_TOP + PLOT_HEIGHT / 2.0) ")"}
                text-anchor="middle" font-size="13" fill=(TEXT_COLOR)
            { "Count" }

            g class="legend"
            {
                @for (i, group) in histogram.groups().iter().enumerate() {
                    @let y = MARGIN_TOP + 8.0 + i as f64 * 18.0;
                    rect
                        x=(WIDTH - MARGIN_RIGHT - 110.0) y=(y)
                        width="12" height="12"
                        fill=(species_color(all_species, &group.species))
                        fill-opacity="0.5"
                    {}
                    text
                        x=(WIDTH - MARGIN_RIGHT - 92.0) y=(y + 10.0)
                        font-size="12" fill=(TEXT_COLOR)
                    { (group.species) }
                }
            }
        }
    )
}
