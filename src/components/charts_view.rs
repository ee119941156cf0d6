//! Charts View Component
//!
//! Bar and line chart of events per month.

use std::rc::Rc;

use leptos::html;
use leptos::prelude::*;

use crate::context::use_app_context;
use crate::error::WidgetError;
use crate::projection::{attach_charts, ChartPanel};
use crate::reactive::ReadinessGate;
use crate::widgets::ChartWidget;

fn mount_panel(bar: &web_sys::HtmlCanvasElement, line: &web_sys::HtmlCanvasElement) -> Result<ChartPanel, WidgetError> {
    Ok(ChartPanel {
        bar: Rc::new(ChartWidget::mount(bar, "bar")?),
        line: Rc::new(ChartWidget::mount(line, "line")?),
    })
}

#[component]
pub fn ChartsView() -> impl IntoView {
    let ctx = use_app_context();
    let (error, set_error) = signal::<Option<String>>(None);
    let bar_canvas = NodeRef::<html::Canvas>::new();
    let line_canvas = NodeRef::<html::Canvas>::new();

    let gate: ReadinessGate<ChartPanel> = ReadinessGate::new();
    let projection = attach_charts(&ctx.dashboard().events, gate.clone());
    on_cleanup(move || projection.detach());

    Effect::new(move |_| {
        let (Some(bar), Some(line)) = (bar_canvas.get(), line_canvas.get()) else {
            return;
        };
        if gate.is_open() {
            return;
        }
        match mount_panel(&bar, &line) {
            Ok(panel) => {
                gate.open(Rc::new(panel));
            }
            Err(e) => {
                log::error!("[ChartsView] {}", e);
                set_error.set(Some(e.to_string()));
            }
        }
    });

    view! {
        <section class="charts-view">
            <h1>"Events per month"</h1>
            {move || error.get().map(|e| view! { <p class="widget-error">{e}</p> })}
            <div class="chart-grid">
                <canvas class="chart" node_ref=bar_canvas></canvas>
                <canvas class="chart" node_ref=line_canvas></canvas>
            </div>
        </section>
    }
}
