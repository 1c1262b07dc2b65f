use slint::{ComponentHandle, ModelRc, SharedString, VecModel};
use slint_flow_editor::{CursorShape, FlowEditorController, NodeAction};
use std::rc::Rc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

slint::include_modules!();

/// Push zoom label, mode, cursor and grid into the window.
fn update_chrome(window: &MainWindow, ctrl: &FlowEditorController) {
    window.set_zoom_label(ctrl.scale_label());
    window.set_mode_label(SharedString::from(ctrl.mode().label()));
    window.set_cursor_shape(match ctrl.cursor() {
        CursorShape::Default => 0,
        CursorShape::Grab => 1,
        CursorShape::Grabbing => 2,
    });
    window.set_grid_commands(ctrl.grid_commands(window.get_canvas_width(), window.get_canvas_height()));
}

fn node_action(index: i32) -> Option<NodeAction> {
    match index {
        0 => Some(NodeAction::Delete),
        1 => Some(NodeAction::Power),
        2 => Some(NodeAction::Play),
        3 => Some(NodeAction::More),
        _ => None,
    }
}

fn main() -> Result<(), slint::PlatformError> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,slint_flow_editor=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting flow builder");

    let window = MainWindow::new()?;
    let ctrl = FlowEditorController::new();
    let w = window.as_weak();

    // Models - bound once, kept in sync on every refresh
    let nodes = Rc::new(VecModel::<NodeRow>::default());
    ctrl.bind_node_model(nodes.clone(), |view| NodeRow {
        id: view.id.as_str().into(),
        kind: view.kind.as_str().into(),
        title: view.title.as_str().into(),
        x: view.x,
        y: view.y,
        width: view.width,
        height: view.height,
        icon_color: view.icon_color,
        show_output: view.show_output,
    });
    window.set_nodes(ModelRc::from(nodes));

    let connectors = Rc::new(VecModel::<ConnectorRow>::default());
    ctrl.bind_connector_model(connectors.clone(), |c| ConnectorRow {
        source: c.source.as_str().into(),
        commands: c.commands().into(),
    });
    window.set_connectors(ModelRc::from(connectors));

    let pending = Rc::new(VecModel::<ConnectorRow>::default());
    ctrl.bind_pending_cable_model(pending.clone(), |c| ConnectorRow {
        source: c.source.as_str().into(),
        commands: c.commands().into(),
    });
    window.set_pending_cable(ModelRc::from(pending));

    let catalog = Rc::new(VecModel::<CatalogRow>::default());
    ctrl.bind_catalog_model(catalog.clone(), |a| CatalogRow {
        kind: a.kind.into(),
        title: a.title.into(),
        description: a.description.into(),
        icon: a.icon.name().into(),
        icon_color: a.icon_color(),
    });
    window.set_catalog(ModelRc::from(catalog));

    // Node and cable dragging
    window.on_node_pointer_down(ctrl.node_pointer_down_callback());
    window.on_cable_pointer_down(ctrl.cable_pointer_down_callback());

    window.on_pointer_released({
        let ctrl = ctrl.clone();
        let w = w.clone();
        move |x, y| {
            if let Some(outcome) = ctrl.pointer_released(x, y) {
                tracing::info!(?outcome, "drag finished");
            }
            if let Some(w) = w.upgrade() {
                update_chrome(&w, &ctrl);
            }
        }
    });

    window.on_pointer_moved({
        let ctrl = ctrl.clone();
        let w = w.clone();
        move |x, y| {
            ctrl.pointer_moved(x, y);
            if let Some(w) = w.upgrade() {
                update_chrome(&w, &ctrl);
            }
        }
    });

    window.on_canvas_pointer_down({
        let ctrl = ctrl.clone();
        let w = w.clone();
        move |x, y| {
            ctrl.canvas_pointer_down(x, y);
            if let Some(w) = w.upgrade() {
                update_chrome(&w, &ctrl);
            }
        }
    });

    // Sidebar
    window.on_add_node(ctrl.add_node_callback());
    window.on_search(ctrl.search_callback());

    window.on_node_action({
        let ctrl = ctrl.clone();
        move |id, index| {
            if let Some(action) = node_action(index) {
                ctrl.node_action(&id, action);
            }
        }
    });

    // Zoom and pan
    window.on_wheel({
        let ctrl = ctrl.clone();
        let w = w.clone();
        move |x, y, delta_y| {
            let consumed = ctrl.wheel(x, y, delta_y);
            if let Some(w) = w.upgrade() {
                update_chrome(&w, &ctrl);
            }
            consumed
        }
    });

    window.on_key_pressed({
        let ctrl = ctrl.clone();
        let w = w.clone();
        move |text| {
            let consumed = ctrl.key_pressed(&text);
            if let Some(w) = w.upgrade() {
                update_chrome(&w, &ctrl);
            }
            consumed
        }
    });

    window.on_key_released({
        let ctrl = ctrl.clone();
        let w = w.clone();
        move |text| {
            let consumed = ctrl.key_released(&text);
            if let Some(w) = w.upgrade() {
                update_chrome(&w, &ctrl);
            }
            consumed
        }
    });

    let view_action = |action: fn(&FlowEditorController)| {
        let ctrl = ctrl.clone();
        let w = w.clone();
        move || {
            action(&ctrl);
            if let Some(w) = w.upgrade() {
                update_chrome(&w, &ctrl);
            }
        }
    };
    window.on_zoom_in(view_action(FlowEditorController::zoom_in));
    window.on_zoom_out(view_action(FlowEditorController::zoom_out));
    window.on_reset_view(view_action(FlowEditorController::reset_view));
    window.on_fit_to_screen(view_action(FlowEditorController::fit_to_screen));

    window.on_canvas_resized({
        let ctrl = ctrl.clone();
        let w = w.clone();
        move |width, height| {
            ctrl.set_container_size(width, height);
            if let Some(w) = w.upgrade() {
                update_chrome(&w, &ctrl);
            }
        }
    });

    update_chrome(&window, &ctrl);
    window.run()
}
