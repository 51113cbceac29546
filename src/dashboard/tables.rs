//! Table views of the filtered rows.
//!
//! Provides the plain scrolling table and the sortable, paginated data grid.

use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    dataset::{Column, Penguin},
    endpoints,
    filter::FilteredView,
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE},
    pagination::{
        PaginationConfig, PaginationIndicator, create_pagination_indicators, page_count, page_rows,
    },
};

const TABLE_STYLE: &str = "w-full text-sm text-left text-gray-500 dark:text-gray-400";
const TABLE_HEADER_CELL_STYLE: &str = "px-3 py-3 whitespace-nowrap sticky top-0 bg-gray-50 dark:bg-gray-700";
const SORT_LINK_STYLE: &str = "cursor-pointer hover:text-blue-600 dark:hover:text-blue-400";
const PAGE_LINK_STYLE: &str = "block px-3 py-2 rounded-sm text-blue-600 hover:underline cursor-pointer";

/// The direction of the data grid's sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl SortOrder {
    fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    fn reversed(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// The query parameters of the data grid: the sort and the page to show.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GridParams {
    /// The column to sort by, dataset order if absent.
    pub sort: Option<Column>,
    /// The sort direction.
    #[serde(default)]
    pub order: SortOrder,
    /// The page to show, 1-based.
    pub page: Option<u64>,
}

impl GridParams {
    fn url(&self, sort: Option<Column>, order: SortOrder, page: u64) -> String {
        match sort {
            Some(column) => format!(
                "{}?sort={}&order={}&page={page}",
                endpoints::DATA_GRID,
                column.name(),
                order.as_str()
            ),
            None => format!("{}?page={page}", endpoints::DATA_GRID),
        }
    }

    /// The link that sorts by `column`, toggling the direction if the grid is
    /// already sorted by it. Sorting returns to the first page.
    fn sort_url(&self, column: Column) -> String {
        let order = if self.sort == Some(column) {
            self.order.reversed()
        } else {
            SortOrder::Asc
        };

        self.url(Some(column), order, 1)
    }

    fn page_url(&self, page: u64) -> String {
        self.url(self.sort, self.order, page)
    }
}

/// Sorts `rows` by `column`. Missing values sort last in both directions and
/// ties keep dataset order.
fn sort_rows(rows: &mut [&Penguin], column: Column, order: SortOrder) {
    rows.sort_by(|a, b| {
        let ordering = column.compare(a, b);

        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc if column.is_missing(a) || column.is_missing(b) => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

fn header_row() -> Markup {
    html! {
        tr {
            @for column in Column::ALL {
                th scope="col" class=(TABLE_HEADER_CELL_STYLE) { (column.label()) }
            }
        }
    }
}

fn penguin_row(penguin: &Penguin) -> Markup {
    html! {
        tr class=(TABLE_ROW_STYLE) {
            @for column in Column::ALL {
                td class=(TABLE_CELL_STYLE) { (column.cell_text(penguin)) }
            }
        }
    }
}

/// Renders every filtered row in a table with a fixed-height scroll area.
///
/// # Arguments
/// * `view` - The filtered rows
///
/// # Returns
/// Maud markup containing the row count and the table.
pub(super) fn data_table(view: &FilteredView) -> Markup {
    html! {
        p class="mb-2 text-sm text-gray-600 dark:text-gray-400" { (view.len()) " rows" }

        div class="overflow-auto h-[185px] rounded-lg shadow" {
            table class=(TABLE_STYLE) {
                thead class=(TABLE_HEADER_STYLE) { (header_row()) }
                tbody {
                    @for penguin in view.rows() {
                        (penguin_row(penguin))
                    }
                }
            }
        }
    }
}

/// Renders one page of the filtered rows with sortable column headers and a
/// pagination bar.
///
/// Requested pages past the end show the last page.
///
/// # Arguments
/// * `view` - The filtered rows
/// * `params` - The sort and page from the query string
/// * `config` - The page size and the number of page links to show
/// * `target` - The selector of the grid's container, which sort and page
///   links re-render
pub(super) fn data_grid(
    view: &FilteredView,
    params: &GridParams,
    config: &PaginationConfig,
    target: &str,
) -> Markup {
    let mut rows: Vec<&Penguin> = view.rows().iter().collect();

    if let Some(column) = params.sort {
        sort_rows(&mut rows, column, params.order);
    }

    let page_count = page_count(rows.len(), config.page_size);
    let page = params
        .page
        .unwrap_or(config.default_page)
        .clamp(1, page_count);
    let range = page_rows(page, config.page_size, rows.len());
    let indicators = create_pagination_indicators(page, page_count, config.max_pages);

    html! {
        p class="mb-2 text-sm text-gray-600 dark:text-gray-400" {
            "Rows " (range.start + 1) " to " (range.end) " of " (rows.len())
        }

        div class="overflow-x-auto rounded-lg shadow" {
            table class=(TABLE_STYLE) {
                thead class=(TABLE_HEADER_STYLE) {
                    tr {
                        @for column in Column::ALL {
                            th
                                scope="col"
                                class=(TABLE_HEADER_CELL_STYLE)
                                aria-sort=(aria_sort(params, column))
                            {
                                a
                                    role="button"
                                    class=(SORT_LINK_STYLE)
                                    hx-post=(params.sort_url(column))
                                    hx-include="#controls"
                                    hx-target=(target)
                                    hx-target-error="#alert-container"
                                {
                                    (column.label())
                                    @if params.sort == Some(column) {
                                        @match params.order {
                                            SortOrder::Asc => { " ▲" },
                                            SortOrder::Desc => { " ▼" },
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
                tbody {
                    @for penguin in &rows[range] {
                        (penguin_row(penguin))
                    }
                }
            }
        }

        (pagination_view(params, &indicators, target))
    }
}

fn aria_sort(params: &GridParams, column: Column) -> &'static str {
    match (params.sort == Some(column), params.order) {
        (false, _) => "none",
        (true, SortOrder::Asc) => "ascending",
        (true, SortOrder::Desc) => "descending",
    }
}

fn page_link(params: &GridParams, page: u64, text: &str, target: &str) -> Markup {
    html! {
        a
            role="button"
            class=(PAGE_LINK_STYLE)
            hx-post=(params.page_url(page))
            hx-include="#controls"
            hx-target=(target)
            hx-target-error="#alert-container"
        { (text) }
    }
}

fn pagination_view(params: &GridParams, indicators: &[PaginationIndicator], target: &str) -> Markup {
    html! {
        nav class="pagination flex justify-center mt-2" aria-label="Data grid pages"
        {
            ul class="flex items-center gap-1"
            {
                @for indicator in indicators {
                    li {
                        @match indicator {
                            PaginationIndicator::Page(page) => {
                                (page_link(params, *page, &page.to_string(), target))
                            },
                            PaginationIndicator::CurrPage(page) => {
                                p
                                    aria-current="page"
                                    class="block px-3 py-2 rounded-sm font-bold text-black dark:text-white"
                                { (page) }
                            },
                            PaginationIndicator::Ellipsis => {
                                span class="px-2 text-gray-500" { "..." }
                            },
                            PaginationIndicator::NextButton(page) => {
                                (page_link(params, *page, "Next", target))
                            },
                            PaginationIndicator::BackButton(page) => {
                                (page_link(params, *page, "Back", target))
                            },
                        }
                    }
                }
            }
        }
    }
}
