//! Placeholders
//!
//! Pulsing outlines shown while a query has no data yet. Each one mirrors
//! the layout of the widget it stands in for so the page does not jump
//! when data arrives.

use leptos::*;

/// Column headings of the orders table
pub const ORDER_COLUMNS: [&str; 7] = ["Order", "Customer", "Items", "Total", "Status", "Payment", "Placed"];

const BAR_WIDTHS: [&str; 4] = ["w-3/4", "w-1/2", "w-2/3", "w-5/12"];

/// Varies placeholder bar widths so rows don't look stamped out
fn bar_width(row: usize, col: usize) -> &'static str {
    BAR_WIDTHS[(row * 3 + col) % BAR_WIDTHS.len()]
}

#[component]
pub fn Spinner(#[prop(optional)] label: Option<&'static str>) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center py-12 space-y-3">
            <div class="loading-spinner w-8 h-8" />
            {label.map(|l| view! { <span class="text-sm text-gray-400">{l}</span> })}
        </div>
    }
}

/// Same box as `StatCard`: label and icon row, big value, caption
#[component]
pub fn StatCardSkeleton() -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-lg p-4 border border-gray-700 animate-pulse">
            <div class="flex items-center justify-between">
                <div class="h-4 bg-gray-700 rounded w-1/3" />
                <div class="h-6 w-6 bg-gray-700 rounded-full" />
            </div>
            <div class="h-9 bg-gray-700 rounded w-1/2 mt-2" />
            <div class="h-4 bg-gray-700 rounded w-2/3 mt-2" />
        </div>
    }
}

#[component]
pub fn StatGridSkeleton(#[prop(default = 4)] count: usize) -> impl IntoView {
    view! {
        <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-4">
            {(0..count).map(|_| view! { <StatCardSkeleton /> }).collect_view()}
        </div>
    }
}

/// Real column headings over placeholder rows
#[component]
pub fn OrderTableSkeleton(#[prop(default = 6)] rows: usize) -> impl IntoView {
    view! {
        <table class="w-full text-sm">
            <thead class="bg-gray-900/50 text-gray-400 text-left">
                <tr>
                    {ORDER_COLUMNS.iter().map(|c| view! { <th class="px-4 py-3">{*c}</th> }).collect_view()}
                </tr>
            </thead>
            <tbody class="animate-pulse">
                {(0..rows).map(|row| view! {
                    <tr class="border-t border-gray-700">
                        {(0..ORDER_COLUMNS.len()).map(|col| view! {
                            <td class="px-4 py-4">
                                <div class=format!("h-3 bg-gray-700 rounded {}", bar_width(row, col)) />
                            </td>
                        }).collect_view()}
                    </tr>
                }).collect_view()}
            </tbody>
        </table>
    }
}

/// Same height as `RevenueChart` with a few ghost bars
#[component]
pub fn RevenueChartSkeleton() -> impl IntoView {
    const HEIGHTS: [&str; 7] = ["h-1/3", "h-1/2", "h-2/3", "h-2/5", "h-3/4", "h-1/2", "h-5/6"];
    view! {
        <div class="bg-gray-800 rounded-lg p-6 animate-pulse">
            <div class="h-6 bg-gray-700 rounded w-1/4 mb-4" />
            <div class="h-64 md:h-80 flex items-end space-x-3 pl-16 pb-8">
                {HEIGHTS.iter().map(|h| view! {
                    <div class=format!("flex-1 bg-gray-700 rounded-t {}", h) />
                }).collect_view()}
            </div>
        </div>
    }
}

/// Card-style rows for bookings, transcripts and menu lists
#[component]
pub fn RowsSkeleton(#[prop(default = 3)] count: usize) -> impl IntoView {
    view! {
        <div class="space-y-3 animate-pulse">
            {(0..count).map(|row| view! {
                <div class="bg-gray-700/60 rounded-lg h-14 px-4 flex items-center space-x-4">
                    <div class="h-8 w-8 bg-gray-600 rounded-full" />
                    <div class=format!("h-3 bg-gray-600 rounded {}", bar_width(row, 0)) />
                </div>
            }).collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_widths_vary_across_rows_and_columns() {
        assert_ne!(bar_width(0, 0), bar_width(0, 1));
        assert_ne!(bar_width(0, 0), bar_width(1, 0));
        let widths: std::collections::HashSet<_> = (0..4).map(|r| bar_width(r, 0)).collect();
        assert_eq!(widths.len(), BAR_WIDTHS.len());
    }
}
