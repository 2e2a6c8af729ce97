use checkout::prelude::SummaryPane;
use leptos::prelude::*;

pub(super) fn format_item_count(unit_count: u64) -> String {
    let label = if unit_count == 1 { "item" } else { "items" };

    format!("{unit_count} {label}")
}

#[component]
pub(super) fn SummaryPanel(pane: SummaryPane) -> impl IntoView {
    view! {
        <aside class="summary-panel" aria-labelledby="summary-title">
            <h2 id="summary-title" class="panel-title">
                "Order Summary"
            </h2>
            <p class="summary-count">{format_item_count(pane.unit_count)}</p>
            <ul class="summary-lines">
                {pane
                    .lines
                    .into_iter()
                    .map(|line| {
                        view! {
                            <li class="summary-line" data-item-id=line.id>
                                <img class="summary-image" src=line.image alt=line.name.clone() />
                                <div class="summary-line-text">
                                    <span class="summary-name">{line.name}</span>
                                    <span class="summary-quantity">
                                        {format!("{} × {}", line.quantity, line.unit_price)}
                                    </span>
                                </div>
                                <span class="summary-line-total">{line.line_total}</span>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
            <p class="summary-total-row">
                <span>"Total"</span>
                <span>{pane.total}</span>
            </p>
        </aside>
    }
}
