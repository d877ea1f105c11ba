//! Inline SVG chart renderers. Multi-series lines gap at missing values
//! instead of interpolating across them; scatter plots draw raw pairs.

use yew::prelude::*;

use crate::charts::{contiguous_runs, value_range, ComparisonChart};
use crate::format::format_value;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 400.0;
const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 16.0;
const MARGIN_BOTTOM: f64 = 52.0;

fn scale(v: f64, lo: f64, hi: f64, out_lo: f64, out_hi: f64) -> f64 {
    if hi == lo {
        return (out_lo + out_hi) / 2.0;
    }
    out_lo + (v - lo) / (hi - lo) * (out_hi - out_lo)
}

fn x_pos(index: usize, count: usize) -> f64 {
    if count <= 1 {
        return (MARGIN_LEFT + WIDTH - MARGIN_RIGHT) / 2.0;
    }
    scale(
        index as f64,
        0.0,
        (count - 1) as f64,
        MARGIN_LEFT,
        WIDTH - MARGIN_RIGHT,
    )
}

fn y_pos(value: f64, lo: f64, hi: f64) -> f64 {
    // SVG y grows downward.
    scale(value, lo, hi, HEIGHT - MARGIN_BOTTOM, MARGIN_TOP)
}

fn y_gridlines(lo: f64, hi: f64) -> Html {
    (0..=4)
        .map(|step| {
            let value = lo + (hi - lo) * step as f64 / 4.0;
            let y = y_pos(value, lo, hi);
            html! {
                <g>
                    <line x1={MARGIN_LEFT.to_string()} x2={(WIDTH - MARGIN_RIGHT).to_string()}
                        y1={y.to_string()} y2={y.to_string()} class="chart-grid" />
                    <text x={(MARGIN_LEFT - 8.0).to_string()} y={(y + 4.0).to_string()}
                        text-anchor="end" class="chart-tick">
                        { format_value(value) }
                    </text>
                </g>
            }
        })
        .collect()
}

fn x_tick_labels(dates: &[String]) -> Html {
    // At most ~8 labels; always include the last date.
    let count = dates.len();
    let step = count.div_ceil(8).max(1);
    dates
        .iter()
        .enumerate()
        .filter(|(i, _)| i % step == 0 || *i == count - 1)
        .map(|(i, date)| {
            let x = x_pos(i, count);
            html! {
                <text x={x.to_string()} y={(HEIGHT - MARGIN_BOTTOM + 20.0).to_string()}
                    text-anchor="middle" class="chart-tick">
                    { date.clone() }
                </text>
            }
        })
        .collect()
}

#[derive(Properties, PartialEq)]
pub struct LineChartProps {
    pub chart: ComparisonChart,
    pub y_label: AttrValue,
}

#[function_component(LineChart)]
pub fn line_chart(props: &LineChartProps) -> Html {
    let chart = &props.chart;
    let Some((lo, hi)) = value_range(chart.series.iter().map(|s| s.values.as_slice())) else {
        return html! { <p class="muted">{ "Nothing to plot." }</p> };
    };
    let count = chart.dates.len();

    let series = chart
        .series
        .iter()
        .map(|s| {
            let runs = contiguous_runs(&s.values);
            let lines: Html = runs
                .iter()
                .filter(|run| run.len() > 1)
                .map(|run| {
                    let points: String = run
                        .iter()
                        .map(|(i, v)| format!("{:.1},{:.1}", x_pos(*i, count), y_pos(*v, lo, hi)))
                        .collect::<Vec<_>>()
                        .join(" ");
                    html! { <polyline {points} fill="none" stroke={s.color} stroke-width="2" /> }
                })
                .collect();
            let dots: Html = runs
                .iter()
                .flatten()
                .map(|(i, v)| {
                    html! {
                        <circle cx={x_pos(*i, count).to_string()}
                            cy={y_pos(*v, lo, hi).to_string()}
                            r="3.5" fill={s.color} />
                    }
                })
                .collect();
            html! { <g>{ lines }{ dots }</g> }
        })
        .collect::<Html>();

    html! {
        <div class="chart">
            <div class="chart-legend">
                { for chart.series.iter().map(|s| html! {
                    <span class="legend-item">
                        <span class="legend-swatch" style={format!("background:{}", s.color)}></span>
                        { s.label.clone() }
                    </span>
                })}
            </div>
            <svg viewBox={format!("0 0 {WIDTH} {HEIGHT}")} class="chart-svg" role="img">
                { y_gridlines(lo, hi) }
                { x_tick_labels(&chart.dates) }
                <text x={(WIDTH / 2.0).to_string()} y={(HEIGHT - 8.0).to_string()}
                    text-anchor="middle" class="chart-axis-label">{ "Date" }</text>
                <text x="16" y={(HEIGHT / 2.0).to_string()} text-anchor="middle"
                    transform={format!("rotate(-90 16 {})", HEIGHT / 2.0)}
                    class="chart-axis-label">{ props.y_label.to_string() }</text>
                { series }
            </svg>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ScatterChartProps {
    /// Paired samples; both vectors index the same reading.
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub x_label: AttrValue,
    pub y_label: AttrValue,
    pub color: AttrValue,
}

fn axis_range(values: &[f64]) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(*v);
        max = max.max(*v);
    }
    if min > max {
        return None;
    }
    if min == max {
        min -= 1.0;
        max += 1.0;
    }
    let pad = (max - min) * 0.05;
    Some((min - pad, max + pad))
}

#[function_component(ScatterChart)]
pub fn scatter_chart(props: &ScatterChartProps) -> Html {
    let n = props.xs.len().min(props.ys.len());
    let (Some((x_lo, x_hi)), Some((y_lo, y_hi))) =
        (axis_range(&props.xs[..n]), axis_range(&props.ys[..n]))
    else {
        return html! { <p class="muted">{ "Nothing to plot." }</p> };
    };

    let dots: Html = (0..n)
        .map(|i| {
            let cx = scale(props.xs[i], x_lo, x_hi, MARGIN_LEFT, WIDTH - MARGIN_RIGHT);
            let cy = y_pos(props.ys[i], y_lo, y_hi);
            html! {
                <circle cx={cx.to_string()} cy={cy.to_string()} r="4"
                    fill={props.color.clone()} fill-opacity="0.8" />
            }
        })
        .collect();

    let x_ticks: Html = (0..=4)
        .map(|step| {
            let value = x_lo + (x_hi - x_lo) * step as f64 / 4.0;
            let x = scale(value, x_lo, x_hi, MARGIN_LEFT, WIDTH - MARGIN_RIGHT);
            html! {
                <text x={x.to_string()} y={(HEIGHT - MARGIN_BOTTOM + 20.0).to_string()}
                    text-anchor="middle" class="chart-tick">
                    { format_value(value) }
                </text>
            }
        })
        .collect();

    html! {
        <div class="chart">
            <svg viewBox={format!("0 0 {WIDTH} {HEIGHT}")} class="chart-svg" role="img">
                { y_gridlines(y_lo, y_hi) }
                { x_ticks }
                <text x={(WIDTH / 2.0).to_string()} y={(HEIGHT - 8.0).to_string()}
                    text-anchor="middle" class="chart-axis-label">{ props.x_label.to_string() }</text>
                <text x="16" y={(HEIGHT / 2.0).to_string()} text-anchor="middle"
                    transform={format!("rotate(-90 16 {})", HEIGHT / 2.0)}
                    class="chart-axis-label">{ props.y_label.to_string() }</text>
                { dots }
            </svg>
        </div>
    }
}
