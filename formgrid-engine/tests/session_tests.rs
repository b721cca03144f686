//! Integration tests for form editing sessions.
//!
//! Each test drives a `FormSurface` the way a host UI would: pointer events,
//! candidate clicks and menu selections, plus the layout deliveries a
//! drag-and-drop substrate sends after a drag or resize. Assertions go
//! through the public document and frame only.
//!
//! Set `RUST_LOG=formgrid_engine=trace` to see the engine's event log.

use formgrid_api::{FieldType, GridEvent, GridPosition, GridRect, GridTarget, ItemId};
use formgrid_engine::{
    Breakpoint, BreakpointPolicy, BreakpointTable, Document, EngineConfig, EventOutcome,
    FormSurface, GridConfig, GridError, Item, Rect, ResponsiveConfig, SequentialIds,
};
use indexmap::IndexMap;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Test harness that replays host events against one surface.
struct Session {
    surface: FormSurface,
}

impl Session {
    /// The sample form on a 4-column, 370px container (80px columns).
    fn sample() -> Self {
        let document = Document::sample(&mut SequentialIds::new("seed"));
        Self::with(grid_config(), document)
    }

    fn with(config: EngineConfig, document: Document) -> Self {
        init_tracing();
        let surface = FormSurface::with_id_generator(config, document, SequentialIds::default())
            .expect("Failed to create surface");
        Self { surface }
    }

    fn send(&mut self, event: GridEvent) -> EventOutcome {
        let result = self.surface.handle(event.clone());
        match result {
            Ok(outcome) => outcome,
            Err(err) => panic!("Event {:?} failed: {}", event, err),
        }
    }

    fn hover(&mut self, x: f32, y: f32) -> EventOutcome {
        self.send(GridEvent::PointerMoved { x, y })
    }

    /// Hover, click the overlay and pick a type. Returns the new item's id.
    fn place(&mut self, x: f32, y: f32, field_type: FieldType) -> ItemId {
        self.hover(x, y);
        self.send(GridEvent::CandidateClicked);
        let outcome = self.send(GridEvent::MenuSelected(field_type));
        assert!(outcome.document_changed, "No insert at ({}, {})", x, y);
        outcome.inserted.expect("Selection did not insert")
    }

    /// The candidate cell of whichever grid shows one.
    fn candidate(&self) -> Option<(GridTarget, GridPosition)> {
        let frame = self.surface.frame();
        frame
            .active_candidate()
            .map(|(target, overlay)| (target.clone(), overlay.position))
    }

    fn expect_candidate(&self, target: GridTarget, position: GridPosition) {
        assert_eq!(self.candidate(), Some((target, position)));
    }

    fn layout_of(&self, id: &ItemId) -> GridPosition {
        let frame = self.surface.frame();
        let placed = frame
            .find_item(id)
            .unwrap_or_else(|| panic!("Item {} is not rendered", id));
        placed.cell.position()
    }
}

fn grid_config() -> EngineConfig {
    EngineConfig {
        grid: GridConfig::default().with_width(370.0),
        responsive: None,
    }
}

fn responsive_config(width: f32, policy: BreakpointPolicy) -> EngineConfig {
    let mut default_layouts = IndexMap::new();
    default_layouts.insert(
        "s".to_string(),
        vec![
            GridRect::new("seed-1", 0, 0, 2, 1),
            GridRect::new("seed-2", 0, 1, 2, 1),
        ],
    );
    EngineConfig {
        grid: GridConfig::default().with_width(width),
        responsive: Some(ResponsiveConfig {
            breakpoints: BreakpointTable::new([
                ("s", Breakpoint::new(0.0, 2)),
                ("l", Breakpoint::new(700.0, 4)),
            ])
            .unwrap(),
            default_layouts,
            policy,
        }),
    }
}

// =============================================================================
// Placement
// =============================================================================

#[test]
fn placing_a_header_in_a_free_cell() {
    let mut session = Session::sample();

    assert!(session.hover(200.0, 90.0).redraw);
    session.expect_candidate(GridTarget::Root, GridPosition::cell(2, 1));
    let overlay = session.surface.frame().candidate.unwrap();
    assert_eq!(overlay.bounds, Rect::new(190.0, 80.0, 80.0, 60.0));
    assert_eq!(overlay.label, "Add New Field");

    session.send(GridEvent::CandidateClicked);
    let outcome = session.send(GridEvent::MenuSelected(FieldType::Header));
    let id = outcome.inserted.unwrap();

    let doc = session.surface.document();
    assert_eq!(doc.items().len(), 5);
    assert_eq!(doc.find(&id).unwrap().field_type(), FieldType::Header);
    assert_eq!(doc.layout().last().unwrap(), &GridRect::new(id.clone(), 2, 1, 1, 1));
    assert_eq!(session.layout_of(&id), GridPosition::cell(2, 1));
    assert_eq!(session.candidate(), None);
}

#[test]
fn newly_placed_item_blocks_its_cell() {
    let mut session = Session::sample();
    session.place(200.0, 90.0, FieldType::Checklist);

    session.hover(200.0, 90.0);
    assert_eq!(session.candidate(), None);
}

#[test]
fn occupied_cell_shows_no_candidate() {
    let ids = ["a", "b", "c", "d"];
    let items = ids
        .iter()
        .map(|id| Item::new((*id).into(), FieldType::TextField))
        .collect();
    let layout = vec![
        GridRect::new("a", 0, 0, 1, 1),
        GridRect::new("b", 1, 0, 3, 1),
        GridRect::new("c", 3, 1, 1, 1),
        GridRect::new("d", 0, 1, 2, 2),
    ];
    let document = Document::from_seed(items, layout).unwrap();
    let mut session = Session::with(grid_config(), document);

    // Maps to (0, 1), inside the 2x2 rect.
    session.hover(20.0, 90.0);
    assert_eq!(session.candidate(), None);
    // (1, 2) is covered by the same rect.
    session.hover(110.0, 160.0);
    assert_eq!(session.candidate(), None);
    // (2, 2) is free.
    session.hover(200.0, 160.0);
    session.expect_candidate(GridTarget::Root, GridPosition::cell(2, 2));
}

#[test]
fn pointer_below_content_offers_new_rows() {
    let mut session = Session::sample();
    // Row 5, far below the last item.
    session.hover(20.0, 370.0);
    session.expect_candidate(GridTarget::Root, GridPosition::cell(0, 5));
}

#[test]
fn dismissing_the_menu_inserts_nothing() {
    let mut session = Session::sample();
    session.hover(200.0, 90.0);
    session.send(GridEvent::CandidateClicked);
    assert!(session.surface.frame().menu.is_some());

    let outcome = session.send(GridEvent::MenuDismissed);
    assert!(outcome.redraw);
    assert!(!outcome.document_changed);
    assert!(session.surface.frame().menu.is_none());
    assert_eq!(session.surface.document().items().len(), 4);
}

// =============================================================================
// Sections
// =============================================================================

#[test]
fn fields_placed_inside_a_section_land_in_its_grid() {
    let mut session = Session::sample();
    // Cell (2, 2): a 1x1 section.
    let section = session.place(200.0, 160.0, FieldType::Section);

    // Grow it to 2x2 the way the substrate reports a resize.
    let mut layout = session.surface.document().layout().to_vec();
    layout.last_mut().unwrap().set_position(GridPosition::new(2, 2, 2, 2));
    session.send(GridEvent::ResizeStarted {
        target: GridTarget::Root,
    });
    let outcome = session.send(GridEvent::ResizeStopped {
        target: GridTarget::Root,
        layout,
    });
    assert!(outcome.document_changed);

    // Section box is (190, 150, 170, 130); nested columns are 70px wide.
    let nested = GridTarget::Section(section.clone());
    session.hover(190.0 + 100.0, 150.0 + 20.0);
    session.expect_candidate(nested.clone(), GridPosition::cell(1, 0));

    session.send(GridEvent::CandidateClicked);
    let child = session
        .send(GridEvent::MenuSelected(FieldType::TextField))
        .inserted
        .unwrap();

    let doc = session.surface.document();
    let parent = doc.find(&section).unwrap();
    assert_eq!(parent.children().unwrap().len(), 1);
    assert_eq!(
        parent.child_layout().unwrap(),
        &[GridRect::new(child.clone(), 1, 0, 1, 1)]
    );
    // The top-level grid did not grow an item.
    assert_eq!(doc.items().len(), 5);

    let placed = session.surface.frame();
    let placed = placed.find_item(&child).unwrap();
    assert_eq!(placed.bounds, Rect::new(280.0, 160.0, 70.0, 60.0));
}

#[test]
fn shrinking_a_section_refits_its_children() {
    let mut session = Session::sample();
    let section = session.place(200.0, 160.0, FieldType::Section);
    let mut layout = session.surface.document().layout().to_vec();
    layout.last_mut().unwrap().set_position(GridPosition::new(2, 2, 2, 2));
    session.send(GridEvent::LayoutChanged {
        target: GridTarget::Root,
        layout: layout.clone(),
    });
    let child = session.place(290.0, 170.0, FieldType::Header);

    layout.last_mut().unwrap().set_position(GridPosition::new(2, 2, 1, 2));
    session.send(GridEvent::LayoutChanged {
        target: GridTarget::Root,
        layout,
    });

    let nested = session
        .surface
        .document()
        .layout_for(&GridTarget::Section(section))
        .unwrap()
        .to_vec();
    assert_eq!(nested, vec![GridRect::new(child, 0, 0, 1, 1)]);
}

#[test]
fn drag_in_unknown_section_is_reported() {
    let mut session = Session::sample();
    let err = session
        .surface
        .handle(GridEvent::DragStarted {
            target: GridTarget::Section("missing".into()),
        })
        .unwrap_err();
    assert!(matches!(err, GridError::NotFound(_)));
}

// =============================================================================
// Drag and resize
// =============================================================================

#[test]
fn drag_stop_moves_the_item_in_the_document() {
    let mut session = Session::sample();
    let before = session.surface.document().clone();
    let header = before.items()[0].id().clone();

    session.hover(200.0, 90.0);
    session.send(GridEvent::DragStarted {
        target: GridTarget::Root,
    });
    assert_eq!(session.candidate(), None);
    // Hover during a drag does nothing.
    assert!(!session.hover(200.0, 90.0).redraw);

    let mut layout = before.layout().to_vec();
    layout[0].set_position(GridPosition::cell(2, 2));
    let outcome = session.send(GridEvent::DragStopped {
        target: GridTarget::Root,
        layout,
    });

    assert!(outcome.document_changed);
    assert_eq!(session.layout_of(&header), GridPosition::cell(2, 2));
    assert_eq!(before.layout()[0].position(), GridPosition::cell(0, 0));

    // The cell it left is free again.
    session.hover(20.0, 20.0);
    session.expect_candidate(GridTarget::Root, GridPosition::cell(0, 0));
}

#[test]
fn layout_with_unknown_ids_is_rejected() {
    let mut session = Session::sample();
    let mut layout = session.surface.document().layout().to_vec();
    layout.push(GridRect::new("stranger", 0, 5, 1, 1));
    let err = session
        .surface
        .handle(GridEvent::LayoutChanged {
            target: GridTarget::Root,
            layout,
        })
        .unwrap_err();
    assert!(matches!(err, GridError::NotFound(_)));
    assert_eq!(session.surface.document().layout().len(), 4);
}

// =============================================================================
// Responsive mode
// =============================================================================

#[test]
fn narrowing_resets_to_the_small_layout() {
    let document = Document::sample(&mut SequentialIds::new("seed"));
    let mut session = Session::with(responsive_config(900.0, BreakpointPolicy::Reset), document);
    assert_eq!(session.surface.breakpoint().unwrap().name, "l");

    let outcome = session.send(GridEvent::WidthChanged { width: 699.0 });
    assert!(outcome.document_changed);
    assert_eq!(session.surface.breakpoint().unwrap().columns, 2);
    assert_eq!(session.surface.frame().columns, 2);

    let doc = session.surface.document();
    assert_eq!(doc.layout()[0], GridRect::new("seed-1", 0, 0, 2, 1));
    assert_eq!(doc.layout()[1], GridRect::new("seed-2", 0, 1, 2, 1));
    assert!(doc.layout().iter().all(|rect| rect.right() <= 2));
}

#[test]
fn mounting_narrow_starts_from_the_small_layout() {
    let document = Document::sample(&mut SequentialIds::new("seed"));
    let mut session = Session::with(responsive_config(500.0, BreakpointPolicy::Reset), document);
    assert_eq!(session.surface.breakpoint().unwrap().name, "s");

    let doc = session.surface.document();
    assert_eq!(doc.layout()[0], GridRect::new("seed-1", 0, 0, 2, 1));
    assert!(doc.layout().iter().all(|rect| rect.right() <= 2), "{:?}", doc.layout());

    // 235px columns: x = 480 is the last column.
    session.hover(480.0, 300.0);
    session.expect_candidate(GridTarget::Root, GridPosition::cell(1, 4));
}

#[test]
fn menu_left_open_across_a_breakpoint_inserts_nothing() {
    let document = Document::sample(&mut SequentialIds::new("seed"));
    let mut session = Session::with(responsive_config(900.0, BreakpointPolicy::Reset), document);
    session.hover(700.0, 180.0);
    session.expect_candidate(GridTarget::Root, GridPosition::cell(3, 2));
    session.send(GridEvent::CandidateClicked);

    session.send(GridEvent::WidthChanged { width: 500.0 });
    let outcome = session.send(GridEvent::MenuSelected(FieldType::Header));
    assert_eq!(outcome.inserted, None);
    assert_eq!(session.surface.document().items().len(), 4);
}

#[test]
fn preserve_brings_back_the_wide_layout() {
    let document = Document::sample(&mut SequentialIds::new("seed"));
    let mut session =
        Session::with(responsive_config(900.0, BreakpointPolicy::Preserve), document);
    let wide = session.surface.document().layout().to_vec();

    session.send(GridEvent::WidthChanged { width: 500.0 });
    assert_ne!(session.surface.document().layout(), wide.as_slice());

    session.send(GridEvent::WidthChanged { width: 700.0 });
    assert_eq!(session.surface.breakpoint().unwrap().name, "l");
    assert_eq!(session.surface.document().layout(), wide.as_slice());
}

#[test]
fn config_from_json_drives_a_surface() {
    let json = r#"{
        "grid": { "columns": 4, "rowHeight": 60, "containerWidth": 370 },
        "responsive": {
            "breakpoints": {
                "s": { "minWidth": 0, "columns": 2 },
                "l": { "minWidth": 700, "columns": 4 }
            }
        }
    }"#;
    let config = EngineConfig::from_json(json).unwrap();
    let document = Document::sample(&mut SequentialIds::new("seed"));
    let session = Session::with(config, document);
    assert_eq!(session.surface.breakpoint().unwrap().name, "s");
    assert_eq!(session.surface.root().config().columns, 2);
}
