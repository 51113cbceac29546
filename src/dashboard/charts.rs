//! Chart generation and rendering for the dashboard outputs.
//!
//! This module creates the interactive ECharts visualizations:
//! - **Histogram**: Stacked bar chart of a measurement, one series per species
//! - **Scatterplot**: One measurement against another, coloured by species and
//!   shaped by sex, with the island shown in the tooltip
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered as a fragment holding the chart container and the script that
//! initializes it.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisPointer, AxisPointerType, AxisType, Emphasis, EmphasisFocus, ItemStyle, Symbol,
        Tooltip, Trigger,
    },
    series::{Scatter, bar},
};
use maud::{Markup, PreEscaped, html};
use serde_json::json;

use crate::{
    dashboard::histogram::Histogram,
    dataset::{Measurement, Penguin, Sex},
};

/// Series colours, assigned to species in dataset order.
const SPECIES_PALETTE: [&str; 6] = [
    "#636efa", "#ef553b", "#00cc96", "#ab63fa", "#ffa15a", "#19d3f3",
];

/// The fill colour for `species`, keyed by its position in `all_species`.
pub(super) fn species_color(all_species: &[String], species: &str) -> &'static str {
    let index = all_species
        .iter()
        .position(|name| name == species)
        .unwrap_or(0);

    SPECIES_PALETTE[index % SPECIES_PALETTE.len()]
}

/// An output chart with its HTML container ID and ECharts configuration.
pub(super) struct OutputChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
    /// JavaScript function source to use as the tooltip formatter
    pub tooltip_formatter: Option<String>,
}

/// Renders a chart container and the script that draws the chart into it.
///
/// The fragment replaces the previous chart when htmx swaps it in, which
/// runs the script again.
///
/// # Arguments
/// * `chart` - The chart to render
///
/// # Returns
/// Maud markup containing the chart container div and its initialization script.
pub(super) fn chart_view(chart: &OutputChart) -> Markup {
    html!(
        div
            id=(chart.id)
            data-chart="echarts"
            class="w-full min-h-[380px] rounded dark:bg-gray-100"
        {}

        script { (chart_script(chart)) }
    )
}

/// Generates JavaScript initialization code for a chart, with dark mode
/// support.
fn chart_script(chart: &OutputChart) -> PreEscaped<String> {
    let tooltip_formatter = chart
        .tooltip_formatter
        .as_ref()
        .map(|formatter| {
            format!("option.tooltip = Object.assign(option.tooltip || {{}}, {{ formatter: {formatter} }});")
        })
        .unwrap_or_default();

    PreEscaped(format!(
        r#"(function() {{
            const chartDom = document.getElementById("{}");
            const chart = echarts.init(chartDom);
            const option = {};
            {}
            chart.setOption(option);

            const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
            const updateTheme = () => {{
                const isDarkMode = darkModeMediaQuery.matches;
                chart.setTheme(isDarkMode ? 'dark' : 'default');
            }}
            darkModeMediaQuery.addEventListener('change', updateTheme);
            updateTheme();
        }})();"#,
        chart.id, chart.options, tooltip_formatter
    ))
}

/// Script that resizes every chart on the page with the window.
pub(super) fn resize_charts_script() -> PreEscaped<String> {
    PreEscaped(
        r#"window.addEventListener('resize', function() {
            document.querySelectorAll('[data-chart]').forEach(function(chartDom) {
                const chart = echarts.getInstanceByDom(chartDom);
                if (chart) {
                    chart.resize();
                }
            });
        });"#
            .to_owned(),
    )
}

/// Builds the stacked bar histogram, one series per species.
///
/// # Arguments
/// * `histogram` - The binned measurement
/// * `attribute` - The measurement that was binned, used for the axis name
/// * `all_species` - The species of the whole dataset, for stable colours
pub(super) fn histogram_chart(
    histogram: &Histogram,
    attribute: Measurement,
    all_species: &[String],
) -> Chart {
    let mut chart = Chart::new()
        .title(Title::new().text("Histogram: Species").left(20).top("1%"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow)),
        )
        .legend(Legend::new().left(250).top("1%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top(70)
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .name(attribute.label())
                .data(histogram.bin_labels()),
        )
        .y_axis(Axis::new().type_(AxisType::Value).name("Count"));

    for group in histogram.groups() {
        let counts: Vec<i64> = group.counts.iter().map(|&count| count as i64).collect();

        chart = chart.series(
            bar::Bar::new()
                .name(group.species.as_str())
                .stack("Species")
                .item_style(
                    ItemStyle::new()
                        .color(species_color(all_species, &group.species))
                        .opacity(0.5),
                )
                .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                .data(counts),
        );
    }

    chart
}

/// The scatterplot series a penguin belongs to.
#[derive(Debug, Clone, PartialEq)]
struct ScatterGroup<'a> {
    species: &'a str,
    sex: Option<Sex>,
    points: Vec<Vec<f64>>,
}

impl ScatterGroup<'_> {
    fn name(&self) -> String {
        format!("{}, {}", self.species, self.sex.map_or("NA", Sex::label))
    }
}

fn sex_symbol(sex: Option<Sex>) -> Symbol {
    match sex {
        Some(Sex::Female) => Symbol::Circle,
        Some(Sex::Male) => Symbol::Diamond,
        None => Symbol::Rect,
    }
}

/// Groups the rows that have both coordinates into series by species and sex.
///
/// Each point is `[x, y, island index]`, the island index points into
/// `islands`.
fn scatter_groups<'a>(
    rows: &'a [Penguin],
    x: Measurement,
    y: Measurement,
    islands: &[String],
) -> Vec<ScatterGroup<'a>> {
    let mut groups: Vec<ScatterGroup> = Vec::new();

    for penguin in rows {
        let (Some(x_value), Some(y_value)) = (x.value(penguin), y.value(penguin)) else {
            continue;
        };

        let island_index = islands
            .iter()
            .position(|island| *island == penguin.island)
            .unwrap_or(0);
        let point = vec![x_value, y_value, island_index as f64];

        match groups
            .iter_mut()
            .find(|group| group.species == penguin.species && group.sex == penguin.sex)
        {
            Some(group) => group.points.push(point),
            None => groups.push(ScatterGroup {
                species: &penguin.species,
                sex: penguin.sex,
                points: vec![point],
            }),
        }
    }

    groups
}

/// Builds the scatterplot of `x` against `y`.
///
/// # Arguments
/// * `rows` - The filtered rows
/// * `x` - The measurement on the x-axis
/// * `y` - The measurement on the y-axis
/// * `all_species` - The species of the whole dataset, for stable colours
/// * `islands` - The islands of the whole dataset, looked up by the tooltip
///
/// # Returns
/// The chart, or `None` if no row has both measurements.
pub(super) fn scatter_chart(
    rows: &[Penguin],
    x: Measurement,
    y: Measurement,
    all_species: &[String],
    islands: &[String],
) -> Option<Chart> {
    let groups = scatter_groups(rows, x, y, islands);

    if groups.is_empty() {
        return None;
    }

    let mut chart = Chart::new()
        .title(Title::new().text("Scatterplot: Species").left(20).top("1%"))
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().left(250).top("1%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top(90)
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Value)
                .name(x.label())
                .scale(true),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .name(y.label())
                .scale(true),
        );

    for group in groups {
        chart = chart.series(
            Scatter::new()
                .name(group.name())
                .symbol(sex_symbol(group.sex))
                .item_style(
                    ItemStyle::new()
                        .color(species_color(all_species, group.species))
                        .opacity(0.7),
                )
                .data(group.points),
        );
    }

    Some(chart)
}

/// JavaScript tooltip formatter for the scatterplot that names both axes and
/// the island of the hovered point.
pub(super) fn scatter_tooltip_formatter(x: Measurement, y: Measurement, islands: &[String]) -> String {
    format!(
        r#"function(params) {{
            const islands = {};
            const [x, y, island] = params.value;
            return params.marker + params.seriesName
                + '<br/>' + {} + ': ' + x
                + '<br/>' + {} + ': ' + y
                + '<br/>Island: ' + islands[island];
        }}"#,
        json!(islands),
        json!(x.label()),
        json!(y.label()),
    )
}
