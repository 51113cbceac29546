//! The dashboard page: the sidebar of controls and the cards that hold the
//! outputs.
//!
//! The page itself renders no data. Each output card requests its content
//! from its own endpoint once the page loads, and again whenever one of the
//! controls it depends on changes.

use maud::{Markup, html};

use crate::{
    app_state::DashboardConfig,
    controls::{Control, Controls, MAX_BIN_COUNT, STATIC_BIN_COUNT_RANGE},
    dashboard::{charts::resize_charts_script, outputs::Output},
    dataset::{Dataset, Measurement},
    endpoints,
    html::{
        CARD_STYLE, ECHARTS_SCRIPT, FORM_CHECKBOX_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        HeadElement, LINK_STYLE, base, loading_indicator,
    },
};

const SIDEBAR_STYLE: &str = "flex flex-col gap-4 w-full lg:w-72 lg:shrink-0 p-4 rounded-lg \
    bg-white dark:bg-gray-800 text-gray-900 dark:text-white";

/// A select input listing `options`, with `selected` chosen.
fn attribute_select(
    control: Control,
    label: &str,
    options: &[Measurement],
    selected: Measurement,
) -> Markup {
    html! {
        div {
            label for=(control.element_id()) class=(FORM_LABEL_STYLE) { (label) }
            select
                id=(control.element_id())
                name=(control.field_name())
                class=(FORM_TEXT_INPUT_STYLE)
            {
                @for measurement in options {
                    option
                        value=(measurement.column_name())
                        selected[*measurement == selected]
                    { (measurement.label()) }
                }
            }
        }
    }
}

/// A group of inline checkboxes, one per category, all sent under the same
/// field name.
fn checkbox_group(control: Control, legend: &str, choices: &[String], checked: &[String]) -> Markup {
    html! {
        fieldset id=(control.element_id()) {
            legend class=(FORM_LABEL_STYLE) { (legend) }
            div class="flex flex-wrap gap-x-4 gap-y-2" {
                @for choice in choices {
                    label class="flex items-center gap-2 text-sm" {
                        input
                            type="checkbox"
                            name=(control.field_name())
                            value=(choice)
                            checked[checked.contains(choice)]
                            class=(FORM_CHECKBOX_STYLE);
                        (choice)
                    }
                }
            }
        }
    }
}

fn sidebar(dataset: &Dataset, config: &DashboardConfig, controls: &Controls) -> Markup {
    let y_attributes: Vec<Measurement> = Measurement::ALL.iter().rev().copied().collect();
    let static_bins = Control::StaticBinCount;
    let interactive_bins = Control::InteractiveBinCount;

    html! {
        aside id="sidebar" class=(SIDEBAR_STYLE) {
            h2 class="text-2xl font-bold" { "Sidebar" }

            form id="controls" class="flex flex-col gap-4" onsubmit="return false;" {
                (attribute_select(
                    Control::Attribute,
                    "Select Attribute",
                    &Measurement::ALL,
                    controls.selected_attribute,
                ))

                div {
                    label for=(interactive_bins.element_id()) class=(FORM_LABEL_STYLE) {
                        "Interactive Histogram Bins"
                    }
                    input
                        id=(interactive_bins.element_id())
                        name=(interactive_bins.field_name())
                        type="number"
                        min="1"
                        max=(MAX_BIN_COUNT)
                        value=(controls.interactive_bin_count)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div {
                    label for=(static_bins.element_id()) class=(FORM_LABEL_STYLE) {
                        "Static Histogram Bins: "
                        output id="static-bin-count-value" { (controls.static_bin_count) }
                    }
                    input
                        id=(static_bins.element_id())
                        name=(static_bins.field_name())
                        type="range"
                        min=(STATIC_BIN_COUNT_RANGE.start())
                        max=(STATIC_BIN_COUNT_RANGE.end())
                        value=(controls.static_bin_count)
                        oninput="document.getElementById('static-bin-count-value').value = this.value"
                        class="w-full";
                }

                (checkbox_group(
                    Control::Species,
                    "Select Species",
                    dataset.species(),
                    &controls.selected_species,
                ))

                (checkbox_group(
                    Control::Islands,
                    "Select Island",
                    dataset.islands(),
                    &controls.selected_islands,
                ))

                (attribute_select(
                    Control::ScatterYAttribute,
                    "Scatterplot y-axis Attribute",
                    &y_attributes,
                    controls.scatter_y_attribute,
                ))
            }

            hr class="border-gray-300 dark:border-gray-600";

            a href=(config.source_link) target="_blank" rel="noopener" class=(LINK_STYLE) { "GitHub" }
        }
    }
}

/// Toggles a card between its place in the grid and filling the window.
///
/// The charts only notice the new size on a window resize event.
const TOGGLE_FULL_SCREEN: &str = "const card = this.closest('section'); \
    const expanded = card.classList.toggle('full-screen'); \
    this.setAttribute('aria-pressed', expanded); \
    window.dispatchEvent(new Event('resize'));";

/// A card whose body is filled in by the output's endpoint.
fn output_card(output: Output) -> Markup {
    html! {
        section class=(CARD_STYLE) data-output=(output.element_id()) {
            div class="mb-2 flex items-center justify-between gap-2" {
                h3 class="text-lg font-semibold text-gray-900 dark:text-white" { (output.title()) }

                button
                    type="button"
                    class="full-screen-toggle text-sm text-gray-500 hover:text-gray-900 dark:text-gray-400 dark:hover:text-white"
                    aria-label={"Expand " (output.title())}
                    aria-pressed="false"
                    onclick=(TOGGLE_FULL_SCREEN)
                { "Expand" }
            }

            div
                id=(output.element_id())
                hx-post=(output.endpoint())
                hx-include="#controls"
                hx-trigger=(output.hx_trigger())
                hx-target-error="#alert-container"
                class="min-w-0"
            {
                (loading_indicator())
            }
        }
    }
}

/// Renders the full dashboard page with the sidebar in its initial state.
///
/// # Arguments
/// * `dataset` - The dataset, used for the species and island choices
/// * `config` - The page title and source link
pub(super) fn dashboard_view(dataset: &Dataset, config: &DashboardConfig) -> Markup {
    let controls = Controls::initial(dataset);

    let content = html! {
        header class="px-4 pt-4 lg:px-6" {
            h1 class="text-3xl font-bold text-gray-900 dark:text-white" { (config.title) }
        }

        div class="flex flex-col lg:flex-row gap-4 p-4 lg:p-6" {
            (sidebar(dataset, config, &controls))

            main class="flex flex-col gap-4 flex-1 min-w-0" {
                div class="grid grid-cols-1 xl:grid-cols-2 gap-4" {
                    (output_card(Output::DataTable))
                    (output_card(Output::DataGrid))
                }

                div class="grid grid-cols-1 xl:grid-cols-2 gap-4" {
                    (output_card(Output::InteractiveHistogram))
                    (output_card(Output::StaticHistogram))
                }

                (output_card(Output::Scatterplot))
            }
        }
    };

    let head_elements = [
        HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned()),
        HeadElement::StyleLink(format!("{}/dashboard.css", endpoints::STATIC)),
        HeadElement::ScriptSource(resize_charts_script()),
    ];

    base(&config.title, &head_elements, &content)
}
