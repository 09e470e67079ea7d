use dashgraph::api::{PlotResponse, PlotTarget};
use dashgraph::core::{ContainerId, GraphOptions, ViewId};
use dashgraph::render::NullRenderer;
use dashgraph::viewport::StaticViewport;
use dashgraph::{Dashboard, DashboardConfig, Effect};

fn dashboard() -> Dashboard<NullRenderer, StaticViewport> {
    Dashboard::new(
        NullRenderer::default(),
        StaticViewport::new(),
        DashboardConfig::default(),
    )
}

fn auto_refresh_options(seconds: u32) -> GraphOptions {
    GraphOptions {
        refresh_interval: Some(seconds),
        ..GraphOptions::default()
    }
}

fn success_response() -> PlotResponse {
    PlotResponse::from_json(
        r#"{
            "type": 2,
            "stack_mode": 1,
            "name": "cpu",
            "start": "2024-05-01T00:00:00Z",
            "end": "2024-05-01T01:00:00Z",
            "series": [{"name": "cpu.user", "stack_id": 0, "plots": [[1714521600, 0.5]]}]
        }"#,
    )
    .expect("valid response")
}

fn pending_fetches(effects: &[Effect]) -> Vec<(ViewId, u64)> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::FetchPlots {
                view, generation, ..
            } => Some((*view, *generation)),
            _ => None,
        })
        .collect()
}

#[test]
fn refresh_is_armed_after_a_successful_render() {
    let mut dashboard = dashboard();
    let view = dashboard.bind_view(PlotTarget::Saved("cpu".to_owned()), auto_refresh_options(30));

    dashboard.refresh(view, 0).expect("draw");
    let fetches = pending_fetches(&dashboard.take_effects());
    assert_eq!(fetches, vec![(view, 1)]);

    dashboard
        .complete_fetch(view, 1, Ok(success_response()), 1_000)
        .expect("complete");
    assert_eq!(dashboard.next_deadline(), Some(31_000));
}

#[test]
fn refresh_fire_issues_a_new_fetch_for_a_visible_view() {
    let mut dashboard = dashboard();
    let view = dashboard.bind_view(PlotTarget::Saved("cpu".to_owned()), auto_refresh_options(30));
    dashboard.viewport_mut().place(view, None, true);

    dashboard.refresh(view, 0).expect("draw");
    dashboard.take_effects();
    dashboard
        .complete_fetch(view, 1, Ok(success_response()), 0)
        .expect("complete");

    dashboard.run_until(30_000);
    assert_eq!(pending_fetches(&dashboard.take_effects()), vec![(view, 2)]);
}

#[test]
fn refresh_fire_postpones_a_hidden_view() {
    let mut dashboard = dashboard();
    let container = ContainerId::new(1);
    let view = dashboard.bind_view(PlotTarget::Saved("cpu".to_owned()), auto_refresh_options(30));
    dashboard.viewport_mut().place(view, Some(container), true);

    dashboard.refresh(view, 0).expect("draw");
    dashboard.take_effects();
    dashboard
        .complete_fetch(view, 1, Ok(success_response()), 0)
        .expect("complete");

    // The view scrolls out before the refresh fires.
    dashboard.viewport_mut().set_visible(view, false);
    dashboard.run_until(30_000);

    assert!(pending_fetches(&dashboard.take_effects()).is_empty());
    assert!(dashboard.is_queued(view));
}

#[test]
fn manual_redraw_cancels_the_pending_refresh() {
    let mut dashboard = dashboard();
    let view = dashboard.bind_view(PlotTarget::Saved("cpu".to_owned()), auto_refresh_options(30));

    dashboard.refresh(view, 0).expect("draw");
    dashboard.take_effects();
    dashboard
        .complete_fetch(view, 1, Ok(success_response()), 0)
        .expect("complete");
    assert_eq!(dashboard.next_deadline(), Some(30_000));

    // A manual refresh cancels the timer before fetching again.
    dashboard.refresh(view, 5_000).expect("draw");
    assert_eq!(dashboard.next_deadline(), None);
    assert_eq!(pending_fetches(&dashboard.take_effects()), vec![(view, 2)]);
}

#[test]
fn rearming_keeps_exactly_one_pending_refresh() {
    let mut dashboard = dashboard();
    let view = dashboard.bind_view(PlotTarget::Saved("cpu".to_owned()), auto_refresh_options(30));
    dashboard.viewport_mut().place(view, None, true);

    dashboard.refresh(view, 0).expect("draw");
    dashboard.take_effects();
    dashboard
        .complete_fetch(view, 1, Ok(success_response()), 0)
        .expect("complete");

    // First refresh cycle: fire, fetch, complete, re-arm.
    dashboard.run_until(30_000);
    assert_eq!(pending_fetches(&dashboard.take_effects()).len(), 1);
    dashboard
        .complete_fetch(view, 2, Ok(success_response()), 30_500)
        .expect("complete");

    // Exactly one timer is pending, at the new deadline.
    assert_eq!(dashboard.next_deadline(), Some(60_500));
    dashboard.run_until(120_000);
    assert_eq!(pending_fetches(&dashboard.take_effects()).len(), 1);
}

#[test]
fn removing_the_refresh_option_stops_the_cycle() {
    let mut dashboard = dashboard();
    let view = dashboard.bind_view(PlotTarget::Saved("cpu".to_owned()), auto_refresh_options(30));
    dashboard.viewport_mut().place(view, None, true);

    dashboard.refresh(view, 0).expect("draw");
    dashboard.take_effects();
    dashboard
        .complete_fetch(view, 1, Ok(success_response()), 0)
        .expect("complete");

    dashboard
        .update_options(
            view,
            dashgraph::core::OptionsPatch {
                refresh_interval: dashgraph::core::Patch::Set(0),
                ..dashgraph::core::OptionsPatch::default()
            },
        )
        .expect("update options");

    dashboard.run_until(30_000);
    dashboard.take_effects();
    dashboard
        .complete_fetch(view, 2, Ok(success_response()), 30_500)
        .expect("complete");

    // No refresh interval left, so nothing is re-armed.
    assert_eq!(dashboard.next_deadline(), None);
}

#[test]
fn destroying_a_view_cancels_its_refresh_timer() {
    let mut dashboard = dashboard();
    let view = dashboard.bind_view(PlotTarget::Saved("cpu".to_owned()), auto_refresh_options(30));

    dashboard.refresh(view, 0).expect("draw");
    dashboard.take_effects();
    dashboard
        .complete_fetch(view, 1, Ok(success_response()), 0)
        .expect("complete");
    assert_eq!(dashboard.next_deadline(), Some(30_000));

    dashboard.destroy_view(view).expect("destroy");
    assert_eq!(dashboard.next_deadline(), None);
}
