use web_sys::Element;
use yew::prelude::*;

use crate::components::navigation;
use crate::data::{self, FormResult, StandingsRow, Zone};
use crate::motion;
use crate::observer::{use_pointer, use_scroll};

const ZONES: [Zone; 3] = [Zone::Champions, Zone::Europa, Zone::Conference];

/// Viewport marks (fraction of height) where each reveal starts and ends.
const HEADER_REVEAL: (f64, f64) = (0.85, 0.5);
const TABLE_REVEAL: (f64, f64) = (0.8, 0.4);
const ROWS_REVEAL: (f64, f64) = (0.75, 0.3);
const ROW_STAGGER: f64 = 0.5;
const PARALLAX_DEGREES: f64 = 2.0;

/// The header reveal follows the container's top edge, not the header's own.
fn header_progress(container_top: f64, viewport_height: f64) -> f64 {
    motion::entrance(container_top, viewport_height, HEADER_REVEAL.0, HEADER_REVEAL.1)
}

fn header_style(progress: f64) -> String {
    let rest = 1.0 - progress;
    format!(
        "opacity: {:.3}; transform: translate3d(0, {:.1}px, {:.1}px) rotateX({:.1}deg);",
        progress,
        -80.0 * rest,
        -200.0 * rest,
        -25.0 * rest
    )
}

fn table_style(progress: f64, pointer: (f64, f64)) -> String {
    let rest = 1.0 - progress;
    format!(
        "opacity: {:.3}; transform: translate3d(0, {:.1}px, {:.1}px) rotateX({:.2}deg) rotateY({:.2}deg);",
        progress,
        50.0 * rest,
        -100.0 * rest,
        15.0 * rest - pointer.1 * PARALLAX_DEGREES,
        pointer.0 * PARALLAX_DEGREES
    )
}

fn row_style(progress: f64) -> String {
    let rest = 1.0 - motion::back_out(progress, 1.2);
    format!(
        "opacity: {:.3}; transform: translate3d({:.1}px, 0, {:.1}px) rotateY({:.1}deg);",
        progress,
        -80.0 * rest,
        -50.0 * rest,
        -20.0 * rest
    )
}

fn goal_difference_class(goal_difference: i32) -> &'static str {
    match goal_difference {
        gd if gd > 0 => "gd-positive",
        gd if gd < 0 => "gd-negative",
        _ => "gd-even",
    }
}

#[derive(Properties, PartialEq)]
struct FormBadgeProps {
    result: FormResult,
}

#[function_component(FormBadge)]
fn form_badge(props: &FormBadgeProps) -> Html {
    html! {
        <div class={classes!("form-badge", props.result.badge_class())}>{props.result.letter()}</div>
    }
}

#[derive(Properties, PartialEq)]
struct RowProps {
    row: StandingsRow,
    node: NodeRef,
}

#[function_component(StandingsRowView)]
fn standings_row_view(props: &RowProps) -> Html {
    let row = &props.row;
    html! {
        <div ref={props.node.clone()} class="standings-row">
            <span class="zone-stripe" style={format!("background: {};", row.zone.accent())}></span>
            <div class="cell-center"><div class="pos-badge">{row.pos}</div></div>
            <div class="cell-club">{&row.club}</div>
            <div class="cell-center stat">{row.played}</div>
            <div class="cell-center stat won">{row.won}</div>
            <div class="cell-center stat drawn">{row.drawn}</div>
            <div class="cell-center stat lost">{row.lost}</div>
            <div class="cell-center stat">{row.goals_for}</div>
            <div class="cell-center stat">{row.goals_against}</div>
            <div class={classes!("cell-center", "stat", "gd", goal_difference_class(row.goal_difference))}>
                {row.signed_goal_difference()}
            </div>
            <div class="cell-center"><div class="points-badge">{row.points}</div></div>
            <div class="cell-center form-row">
                { for row.form.iter().map(|result| html! { <FormBadge result={*result} /> }) }
            </div>
        </div>
    }
}

#[function_component(Standings)]
pub fn standings() -> Html {
    let rows = use_memo(|_| data::standings(), ());
    let row_refs = use_memo(|count| (0..*count).map(|_| NodeRef::default()).collect::<Vec<_>>(), rows.len());
    let container_ref = use_node_ref();
    let header_ref = use_node_ref();
    let table_ref = use_node_ref();
    let table_progress = use_mut_ref(|| 0.0_f64);
    let pointer = use_mut_ref(|| (0.0_f64, 0.0_f64));

    {
        let container_ref = container_ref.clone();
        let header_ref = header_ref.clone();
        let table_ref = table_ref.clone();
        let row_refs = row_refs.clone();
        let table_progress = table_progress.clone();
        let pointer = pointer.clone();
        use_scroll(move |snapshot| {
            let (Some(container), Some(header), Some(table)) = (
                container_ref.cast::<Element>(),
                header_ref.cast::<Element>(),
                table_ref.cast::<Element>(),
            ) else {
                return;
            };
            let height = snapshot.viewport_height;

            let progress = header_progress(container.get_bounding_client_rect().top(), height);
            let _ = header.set_attribute("style", &header_style(progress));

            let table_top = table.get_bounding_client_rect().top();
            let progress = motion::entrance(table_top, height, TABLE_REVEAL.0, TABLE_REVEAL.1);
            *table_progress.borrow_mut() = progress;
            let _ = table.set_attribute("style", &table_style(progress, *pointer.borrow()));

            let rows_progress = motion::entrance(table_top, height, ROWS_REVEAL.0, ROWS_REVEAL.1);
            let count = row_refs.len();
            for (index, node) in row_refs.iter().enumerate() {
                if let Some(row) = node.cast::<Element>() {
                    let progress = motion::staggered(rows_progress, index, count, ROW_STAGGER);
                    let _ = row.set_attribute("style", &row_style(progress));
                }
            }
        });
    }

    {
        let table_ref = table_ref.clone();
        use_pointer(move |snapshot| {
            let vector = motion::parallax(
                snapshot.client_x,
                snapshot.client_y,
                snapshot.viewport_width,
                snapshot.viewport_height,
            );
            *pointer.borrow_mut() = vector;
            if let Some(table) = table_ref.cast::<Element>() {
                let _ = table.set_attribute("style", &table_style(*table_progress.borrow(), vector));
            }
        });
    }

    html! {
        <section id={navigation::MATCHES_SECTION} class="standings-section">
            <div ref={container_ref} class="standings-container">
                <div ref={header_ref} class="standings-header" style={header_style(0.0)}>
                    <h1>{"LaLiga Standings"}</h1>
                    <div class="season-pill"><p>{"2024/2025 Season"}</p></div>
                </div>

                <div ref={table_ref} class="standings-table" style={table_style(0.0, (0.0, 0.0))}>
                    <div class="standings-head">
                        { for ["POS", "CLUB", "MP", "W", "D", "L", "GF", "GA", "GD", "PTS", "FORM"].iter().map(|label| html! {
                            <div class={if *label == "CLUB" { "" } else { "cell-center" }}>{*label}</div>
                        }) }
                    </div>

                    <div class="standings-rows">
                        { for rows.iter().zip(row_refs.iter()).map(|(row, node)| html! {
                            <StandingsRowView key={row.pos} row={row.clone()} node={node.clone()} />
                        }) }
                    </div>

                    <div class="standings-legend">
                        { for ZONES.iter().filter_map(|zone| zone.label().map(|label| (zone, label))).map(|(zone, label)| html! {
                            <div class="legend-item">
                                <span class="legend-dot" style={format!("background: {};", zone.accent())}></span>
                                <span>{label}</span>
                            </div>
                        }) }
                    </div>
                </div>
            </div>
            <style>
                {r#"
                    .standings-section {
                        min-height: 100vh;
                        padding: 5rem 1rem;
                        overflow: hidden;
                        background: linear-gradient(to bottom, var(--primary), var(--primary), var(--accent));
                    }
                    .standings-container {
                        max-width: 80rem;
                        margin: 0 auto;
                        perspective: 1500px;
                        transform-style: preserve-3d;
                    }
                    .standings-header {
                        text-align: center;
                        margin-bottom: 4rem;
                        transform-style: preserve-3d;
                    }
                    .standings-header h1 {
                        font-size: 4.5rem;
                        font-weight: 900;
                        color: #fff;
                        letter-spacing: -0.025em;
                    }
                    .season-pill {
                        display: inline-block;
                        margin-top: 1.5rem;
                        padding: 0.5rem 1.5rem;
                        border-radius: 9999px;
                        border: 1px solid rgba(252, 197, 43, 0.3);
                        background: rgba(153, 0, 64, 0.3);
                        color: rgba(255, 255, 255, 0.9);
                        font-size: 1.125rem;
                    }
                    .standings-table {
                        position: relative;
                        padding: 2rem;
                        border-radius: 1.5rem;
                        border: 1px solid rgba(255, 255, 255, 0.1);
                        background: rgba(255, 255, 255, 0.05);
                        backdrop-filter: blur(40px);
                        box-shadow: 0 25px 50px -12px rgba(0, 0, 0, 0.25);
                        transform-style: preserve-3d;
                        transition: transform 1s cubic-bezier(0.22, 1, 0.36, 1);
                    }
                    .standings-head,
                    .standings-row {
                        display: grid;
                        grid-template-columns: 60px 1fr 60px 60px 60px 60px 80px 80px 80px 90px 180px;
                        gap: 0.75rem;
                        padding: 1.25rem 2rem;
                    }
                    .standings-head {
                        margin-bottom: 1rem;
                        border-radius: 1rem;
                        border: 1px solid rgba(252, 197, 43, 0.1);
                        background: linear-gradient(90deg, rgba(153, 0, 64, 0.4), rgba(153, 0, 64, 0.2));
                        color: #fff;
                        font-weight: 700;
                        font-size: 0.875rem;
                    }
                    .standings-rows {
                        display: flex;
                        flex-direction: column;
                        gap: 0.5rem;
                    }
                    .standings-row {
                        position: relative;
                        padding: 1.5rem 2rem;
                        border-radius: 1rem;
                        border: 1px solid rgba(255, 255, 255, 0.1);
                        background: linear-gradient(90deg, rgba(255, 255, 255, 0.1), rgba(255, 255, 255, 0.05), transparent);
                        transform-style: preserve-3d;
                        cursor: pointer;
                        transition: border-color 0.3s ease, box-shadow 0.3s ease, scale 0.3s ease;
                    }
                    .standings-row:hover {
                        scale: 1.03;
                        border-color: rgba(252, 197, 43, 0.3);
                        box-shadow: 0 25px 50px -12px rgba(0, 0, 0, 0.4);
                    }
                    .zone-stripe {
                        position: absolute;
                        left: 0;
                        top: 0;
                        bottom: 0;
                        width: 4px;
                        border-radius: 1rem 0 0 1rem;
                    }
                    .cell-center {
                        display: flex;
                        align-items: center;
                        justify-content: center;
                    }
                    .cell-club {
                        display: flex;
                        align-items: center;
                        color: #fff;
                        font-weight: 700;
                        font-size: 1.125rem;
                        transition: color 0.3s ease;
                    }
                    .standings-row:hover .cell-club {
                        color: var(--secondary);
                    }
                    .pos-badge {
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        width: 3rem;
                        height: 3rem;
                        border-radius: 0.75rem;
                        background: linear-gradient(135deg, var(--secondary), #eab308, #ca8a04);
                        color: var(--primary);
                        font-weight: 900;
                        font-size: 1.125rem;
                    }
                    .stat {
                        color: rgba(255, 255, 255, 0.9);
                        font-weight: 600;
                    }
                    .stat.won, .gd-positive { color: #4ade80; }
                    .stat.drawn, .gd-even { color: #9ca3af; }
                    .stat.lost, .gd-negative { color: #f87171; }
                    .gd { font-weight: 700; }
                    .points-badge {
                        padding: 0.75rem 1.25rem;
                        border-radius: 0.75rem;
                        border: 1px solid rgba(252, 197, 43, 0.2);
                        background: linear-gradient(135deg, var(--accent), rgba(153, 0, 64, 0.8));
                        color: #fff;
                        font-weight: 900;
                        font-size: 1.25rem;
                    }
                    .form-row {
                        gap: 0.375rem;
                    }
                    .form-badge {
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        width: 1.75rem;
                        height: 1.75rem;
                        border-radius: 50%;
                        color: #fff;
                        font-size: 0.75rem;
                        font-weight: 700;
                        transition: transform 0.2s ease;
                    }
                    .form-badge:hover { transform: scale(1.25); }
                    .form-win { background: #22c55e; }
                    .form-draw { background: #6b7280; }
                    .form-loss { background: #ef4444; }
                    .standings-legend {
                        display: flex;
                        flex-wrap: wrap;
                        justify-content: center;
                        gap: 2rem;
                        margin-top: 2.5rem;
                        padding-top: 2rem;
                        border-top: 1px solid rgba(255, 255, 255, 0.1);
                        font-size: 0.875rem;
                    }
                    .legend-item {
                        display: flex;
                        align-items: center;
                        gap: 0.75rem;
                        padding: 0.5rem 1rem;
                        border-radius: 0.75rem;
                        border: 1px solid rgba(255, 255, 255, 0.1);
                        background: rgba(255, 255, 255, 0.05);
                        color: rgba(255, 255, 255, 0.9);
                    }
                    .legend-dot {
                        width: 0.75rem;
                        height: 0.75rem;
                        border-radius: 50%;
                    }
                    @media (max-width: 768px) {
                        .standings-head {
                            display: none;
                        }
                        .standings-row {
                            grid-template-columns: 1fr;
                        }
                    }
                "#}
            </style>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revealed_elements_sit_at_rest() {
        assert!(header_style(1.0).starts_with("opacity: 1.000;"));
        assert!(table_style(1.0, (0.0, 0.0)).contains("rotateX(0.00deg) rotateY(0.00deg)"));
        assert!(row_style(1.0).starts_with("opacity: 1.000;"));
    }

    #[test]
    fn hidden_elements_start_offset() {
        assert!(header_style(0.0).contains("rotateX(-25.0deg)"));
        assert!(row_style(0.0).contains("translate3d(-80.0px"));
    }

    #[test]
    fn header_reveal_spans_container_from_85_to_50_percent() {
        let height = 1000.0;
        assert_eq!(header_progress(900.0, height), 0.0);
        assert_eq!(header_progress(850.0, height), 0.0);
        assert!((header_progress(675.0, height) - 0.5).abs() < 1e-9);
        assert_eq!(header_progress(500.0, height), 1.0);
        assert_eq!(header_progress(-200.0, height), 1.0);
    }

    #[test]
    fn pointer_tilts_the_table() {
        let style = table_style(1.0, (1.0, -1.0));
        assert!(style.contains("rotateX(2.00deg) rotateY(2.00deg)"));
    }

    #[test]
    fn goal_difference_colour_follows_sign() {
        assert_eq!(goal_difference_class(63), "gd-positive");
        assert_eq!(goal_difference_class(0), "gd-even");
        assert_eq!(goal_difference_class(-3), "gd-negative");
    }
}
