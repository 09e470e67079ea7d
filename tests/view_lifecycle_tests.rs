use dashgraph::api::{DrawRequest, PlotTarget};
use dashgraph::core::{ContainerId, GraphOptions};
use dashgraph::render::NullRenderer;
use dashgraph::viewport::StaticViewport;
use dashgraph::{Dashboard, DashboardConfig, GraphError};

fn dashboard() -> Dashboard<NullRenderer, StaticViewport> {
    Dashboard::new(
        NullRenderer::default(),
        StaticViewport::new(),
        DashboardConfig::default(),
    )
}

#[test]
fn bound_views_get_distinct_identities() {
    let mut dashboard = dashboard();
    let first = dashboard.bind_view(PlotTarget::Saved("a".to_owned()), GraphOptions::default());
    let second = dashboard.bind_view(PlotTarget::Saved("a".to_owned()), GraphOptions::default());

    assert_ne!(first, second);
    assert_eq!(dashboard.view_ids(), vec![first, second]);
}

#[test]
fn operations_on_unknown_views_error() {
    let mut dashboard = dashboard();
    let view = dashboard.bind_view(PlotTarget::Saved("a".to_owned()), GraphOptions::default());
    dashboard.destroy_view(view).expect("destroy");

    assert!(matches!(
        dashboard.destroy_view(view),
        Err(GraphError::UnknownView(_))
    ));
    assert!(matches!(
        dashboard.request_draw(view, DrawRequest::immediate(), 0),
        Err(GraphError::UnknownView(_))
    ));
    assert!(matches!(
        dashboard.refresh(view, 0),
        Err(GraphError::UnknownView(_))
    ));
}

#[test]
fn destroying_a_queued_view_nulls_its_slot() {
    let mut dashboard = dashboard();
    let container = ContainerId::new(1);
    let view = dashboard.bind_view(PlotTarget::Saved("a".to_owned()), GraphOptions::default());
    dashboard.viewport_mut().place(view, Some(container), false);

    dashboard
        .request_draw(view, DrawRequest::postponed(), 0)
        .expect("request draw");
    assert!(dashboard.is_queued(view));

    dashboard.destroy_view(view).expect("destroy");
    assert!(!dashboard.is_queued(view));

    // The tombstoned queue drains on the next pass and unwatches itself.
    dashboard.flush(false, 0);
    dashboard.run_until(1_000);
    assert!(dashboard.watched_containers().is_empty());
}

#[test]
fn dashboards_are_independent() {
    let mut first = dashboard();
    let mut second = dashboard();

    let container = ContainerId::new(1);
    let view = first.bind_view(PlotTarget::Saved("a".to_owned()), GraphOptions::default());
    first.viewport_mut().place(view, Some(container), false);
    first
        .request_draw(view, DrawRequest::postponed(), 0)
        .expect("request draw");

    assert!(first.is_queued(view));
    assert!(second.watched_containers().is_empty());
    assert_eq!(second.next_deadline(), None);
}
