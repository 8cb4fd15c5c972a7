//! Drawing session: the state machine driving interactive fog editing.
//!
//! The session consumes discrete pointer and key events from the host and
//! returns `Action`s describing committed shape deltas. It owns only the
//! ephemeral interaction state (the in-progress shape, the hover selection,
//! and the current alignment guides); the committed shape collection stays
//! with the host and is passed in by reference on every event.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use tracing::debug;

use crate::bounds::shape_bounding_boxes;
use crate::consts::BRUSH_DEDUPE_EPSILON;
use crate::fog;
use crate::guides::{
    find_best_guides, guides_from_bounding_boxes, guides_from_grid, GridSettings, Guide,
    GuideOrientation,
};
use crate::shape::{Shape, ShapeColor, ShapeEdit, ShapeId, ShapeMap};
use crate::simplify::simplify_points;
use crate::vec2::Vec2;

/// Which fog tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Freehand fog painting.
    #[default]
    Brush,
    /// Axis-aligned rectangle drag.
    Rectangle,
    /// Click-by-click polygon building.
    Polygon,
    /// Flip visibility of hovered shapes.
    Toggle,
    /// Delete hovered shapes.
    Remove,
}

impl Tool {
    /// Whether alignment guides and snapping apply to this tool.
    #[must_use]
    pub fn snaps(self) -> bool {
        matches!(self, Self::Rectangle | Self::Polygon)
    }
}

/// Per-session tool settings, owned by the host toolbar.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolSettings {
    /// The active tool.
    pub tool: Tool,
    /// Cut mode: drawn shapes reveal instead of hide.
    pub use_fog_cut: bool,
    /// Skip subtraction against existing fog, letting layers stack.
    pub multilayer: bool,
    /// Preview mode: hidden shapes are not shown while editing.
    pub preview: bool,
}

/// Map and view parameters the session needs to normalize and snap points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapSettings {
    /// Map pixel dimensions.
    pub map_size: Vec2,
    /// Current view zoom scale.
    pub stage_scale: f64,
    /// Whether grid lines participate in snapping.
    pub snap_to_grid: bool,
    /// Snap threshold in grid-cell units.
    pub snapping_sensitivity: f64,
    /// Grid geometry in map pixel space.
    pub grid: GridSettings,
}

impl MapSettings {
    /// Grid cell size in normalized map coordinates.
    #[must_use]
    pub fn cell_normalized_size(&self) -> Vec2 {
        self.grid.cell_pixel_size.div(self.map_size)
    }
}

/// A keyboard key the session reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Backspace,
    Delete,
}

/// A discrete input event delivered by the host.
///
/// Positions are raw pointer coordinates in map pixel space; the session
/// normalizes them against the current map dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    /// Primary button pressed, a drag gesture may follow.
    DragStart { position: Vec2 },
    /// Pointer moved with the primary button held.
    Drag { position: Vec2 },
    /// Primary button released.
    DragEnd,
    /// Pointer moved regardless of button state.
    PointerMove { position: Vec2 },
    /// A click or tap completed at the given position.
    Click { position: Vec2 },
    /// A key was pressed.
    KeyDown(Key),
    /// The pointer is over the given committed shape.
    ShapeHover { id: ShapeId },
}

/// A shape delta emitted at a commit point, applied by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// New fog shapes to insert.
    ShapesAdd(Vec<Shape>),
    /// Shapes describing regions to cut out of existing fog.
    ShapesCut(Vec<Shape>),
    /// Shapes to delete.
    ShapesRemove(Vec<ShapeId>),
    /// Visibility patches to apply.
    ShapesEdit(Vec<ShapeEdit>),
}

/// The active drawing gesture, carrying the in-progress shape.
///
/// For `PolygonBuilding` the last point is a live placeholder tracking the
/// pointer; only the points before it are confirmed clicks and only those
/// are committed.
#[derive(Debug, Clone, Default)]
enum DrawingState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Freehand points accumulating between drag-start and drag-end.
    Brushing { shape: Shape },
    /// An axis-aligned rectangle being sized from its anchor corner.
    RectangleDragging { shape: Shape },
    /// A polygon collecting vertices click by click.
    PolygonBuilding { shape: Shape },
}

/// The fog drawing session.
pub struct Session {
    map: MapSettings,
    tools: ToolSettings,
    state: DrawingState,
    pointer_down: bool,
    hovered: Vec<ShapeId>,
    guides: Vec<Guide>,
}

impl Session {
    #[must_use]
    pub fn new(map: MapSettings, tools: ToolSettings) -> Self {
        Self {
            map,
            tools,
            state: DrawingState::Idle,
            pointer_down: false,
            hovered: Vec::new(),
            guides: Vec::new(),
        }
    }

    /// Replace the map/view parameters (zoom, grid, snapping).
    pub fn set_map_settings(&mut self, map: MapSettings) {
        self.map = map;
    }

    /// Replace the tool settings, retinting any in-progress shape so the
    /// cut-mode color updates live.
    pub fn set_tool_settings(&mut self, tools: ToolSettings) {
        self.tools = tools;
        let color = self.drawing_color();
        match &mut self.state {
            DrawingState::Brushing { shape }
            | DrawingState::RectangleDragging { shape }
            | DrawingState::PolygonBuilding { shape } => shape.color = color,
            DrawingState::Idle => {}
        }
    }

    /// The in-progress shape, if a drawing gesture is active.
    #[must_use]
    pub fn drawing_shape(&self) -> Option<&Shape> {
        match &self.state {
            DrawingState::Idle => None,
            DrawingState::Brushing { shape }
            | DrawingState::RectangleDragging { shape }
            | DrawingState::PolygonBuilding { shape } => Some(shape),
        }
    }

    /// The current alignment guides for the renderer.
    #[must_use]
    pub fn guides(&self) -> &[Guide] {
        &self.guides
    }

    /// Feed one input event through the state machine.
    ///
    /// `shapes` is the host's committed collection, consulted for subtraction
    /// regions, guide bounding boxes, and visibility toggling. Unhandled
    /// (state, event) combinations are no-ops.
    pub fn handle(&mut self, event: SessionEvent, shapes: &ShapeMap) -> Vec<Action> {
        match event {
            SessionEvent::DragStart { position } => {
                self.pointer_down = true;
                self.on_drag_start(position);
                Vec::new()
            }
            SessionEvent::Drag { position } => {
                self.on_drag(position);
                Vec::new()
            }
            SessionEvent::DragEnd => self.on_drag_end(shapes),
            SessionEvent::PointerMove { position } => {
                self.on_pointer_move(position, shapes);
                Vec::new()
            }
            SessionEvent::Click { position } => {
                self.on_click(position);
                Vec::new()
            }
            SessionEvent::KeyDown(key) => self.on_key_down(key, shapes),
            SessionEvent::ShapeHover { id } => {
                self.on_shape_hover(id);
                Vec::new()
            }
        }
    }

    // --- Event handlers ---

    fn on_drag_start(&mut self, position: Vec2) {
        match self.tools.tool {
            Tool::Brush => {
                let point = self.brush_position(position, true);
                let shape = Shape::new_fog(vec![point], self.drawing_color());
                self.state = DrawingState::Brushing { shape };
            }
            Tool::Rectangle => {
                let anchor = self.brush_position(position, true);
                let shape = Shape::new_fog(vec![anchor; 4], self.drawing_color());
                self.state = DrawingState::RectangleDragging { shape };
            }
            Tool::Polygon | Tool::Toggle | Tool::Remove => {}
        }
    }

    fn on_drag(&mut self, position: Vec2) {
        let point = self.brush_position(position, true);
        match &mut self.state {
            DrawingState::Brushing { shape } => {
                let last = shape.points.last().copied();
                if !last.is_some_and(|p| p.close_to(point, BRUSH_DEDUPE_EPSILON)) {
                    shape.points.push(point);
                }
            }
            DrawingState::RectangleDragging { shape } => {
                let anchor = shape.points[0];
                shape.points = vec![
                    anchor,
                    Vec2::new(point.x, anchor.y),
                    point,
                    Vec2::new(anchor.x, point.y),
                ];
            }
            DrawingState::Idle | DrawingState::PolygonBuilding { .. } => {}
        }
    }

    fn on_drag_end(&mut self, shapes: &ShapeMap) -> Vec<Action> {
        let mut actions = Vec::new();
        match std::mem::take(&mut self.state) {
            DrawingState::Brushing { shape } | DrawingState::RectangleDragging { shape } => {
                actions.extend(self.commit(shape, true, shapes));
            }
            state @ DrawingState::PolygonBuilding { .. } => {
                // Polygons commit on Enter, not on button release.
                self.state = state;
            }
            DrawingState::Idle => {}
        }
        actions.extend(self.consume_hover(shapes));
        self.pointer_down = false;
        self.guides.clear();
        actions
    }

    fn on_pointer_move(&mut self, position: Vec2, shapes: &ShapeMap) {
        if self.tools.tool.snaps() {
            self.refresh_guides(position, shapes);
        }
        if self.tools.tool == Tool::Polygon {
            let point = self.brush_position(position, true);
            if let DrawingState::PolygonBuilding { shape } = &mut self.state {
                if let Some(last) = shape.points.last_mut() {
                    *last = point;
                }
            }
        }
    }

    fn on_click(&mut self, position: Vec2) {
        if self.tools.tool != Tool::Polygon {
            return;
        }
        let point = self.brush_position(position, true);
        match &mut self.state {
            DrawingState::PolygonBuilding { shape } => {
                // Confirm the click and start a fresh placeholder at the
                // same spot, so the committed vertex set is exactly the
                // clicked positions whatever the move-event timing.
                if let Some(last) = shape.points.last_mut() {
                    *last = point;
                }
                shape.points.push(point);
            }
            DrawingState::Idle => {
                let shape = Shape::new_fog(vec![point, point], self.drawing_color());
                self.state = DrawingState::PolygonBuilding { shape };
            }
            DrawingState::Brushing { .. } | DrawingState::RectangleDragging { .. } => {}
        }
    }

    fn on_key_down(&mut self, key: Key, shapes: &ShapeMap) -> Vec<Action> {
        match key {
            Key::Enter => {
                if self.tools.tool != Tool::Polygon {
                    return Vec::new();
                }
                match std::mem::take(&mut self.state) {
                    DrawingState::PolygonBuilding { mut shape } => {
                        // Drop the live placeholder; commit confirmed clicks.
                        shape.points.pop();
                        self.commit(shape, false, shapes).into_iter().collect()
                    }
                    state => {
                        self.state = state;
                        Vec::new()
                    }
                }
            }
            Key::Escape => {
                if !matches!(self.state, DrawingState::Idle) {
                    debug!("drawing cancelled");
                    self.state = DrawingState::Idle;
                }
                Vec::new()
            }
            Key::Backspace | Key::Delete => {
                if self.tools.tool != Tool::Polygon {
                    return Vec::new();
                }
                if let DrawingState::PolygonBuilding { shape } = &mut self.state {
                    if shape.points.len() > 3 {
                        // Remove the last confirmed click, keep the placeholder.
                        let placeholder = shape.points.len() - 1;
                        shape.points.remove(placeholder - 1);
                    } else {
                        debug!("polygon below minimum vertices, cancelled");
                        self.state = DrawingState::Idle;
                    }
                }
                Vec::new()
            }
        }
    }

    fn on_shape_hover(&mut self, id: ShapeId) {
        let hovering_tool = matches!(self.tools.tool, Tool::Toggle | Tool::Remove);
        if hovering_tool && self.pointer_down && !self.hovered.contains(&id) {
            self.hovered.push(id);
        }
    }

    // --- Commit pipeline ---

    /// Finalize a drawn shape: smooth brush and rectangle geometry,
    /// subtract against the opposing-state region (unless multilayer), and
    /// frame the survivors as a cut or an add.
    ///
    /// Smoothing runs before the subtraction so the drawn stroke is
    /// simplified once and the cut seams it gains against existing fog
    /// survive exactly; seam vertices are never coarsened away.
    fn commit(&self, mut shape: Shape, smooth: bool, shapes: &ShapeMap) -> Option<Action> {
        let cut = self.tools.use_fog_cut;

        if smooth {
            let cell = self.map.cell_normalized_size();
            let scale = self.map.stage_scale.max(1.0) / 2.0;
            shape.points = simplify_points(&shape.points, cell, scale);
        }

        let mut committed = vec![shape];
        if !self.tools.multilayer {
            let opposing: Vec<Shape> = shapes
                .values()
                .filter(|s| if cut { !s.visible } else { s.visible })
                .cloned()
                .collect();
            let region = fog::merge_fog_shapes(&opposing, !cut);
            let mut candidates = ShapeMap::new();
            for s in committed {
                candidates.insert(s.id, s);
            }
            committed = fog::subtract_shapes(&region, &candidates).into_values().collect();
        }

        committed.retain(Shape::is_valid_polygon);
        if committed.is_empty() {
            return None;
        }

        debug!(shapes = committed.len(), cut, "fog commit");
        if cut {
            Some(Action::ShapesCut(committed))
        } else {
            for s in &mut committed {
                s.color = ShapeColor::Black;
            }
            Some(Action::ShapesAdd(committed))
        }
    }

    /// Consume the hover selection accumulated by the toggle/remove tools.
    fn consume_hover(&mut self, shapes: &ShapeMap) -> Option<Action> {
        if self.hovered.is_empty() {
            return None;
        }
        let hovered = std::mem::take(&mut self.hovered);
        match self.tools.tool {
            Tool::Remove => Some(Action::ShapesRemove(hovered)),
            Tool::Toggle => {
                let edits: Vec<ShapeEdit> = hovered
                    .into_iter()
                    .filter_map(|id| {
                        shapes.get(&id).map(|s| ShapeEdit { id, visible: !s.visible })
                    })
                    .collect();
                (!edits.is_empty()).then_some(Action::ShapesEdit(edits))
            }
            Tool::Brush | Tool::Rectangle | Tool::Polygon => None,
        }
    }

    // --- Positions and guides ---

    fn drawing_color(&self) -> ShapeColor {
        if self.tools.use_fog_cut { ShapeColor::Red } else { ShapeColor::Black }
    }

    /// Normalize a pixel position against the map, optionally snapped to the
    /// current guides. Snapping only applies to the tools that show guides.
    fn brush_position(&self, pixel: Vec2, snapping: bool) -> Vec2 {
        let mut position = pixel.div(self.map.map_size);
        if snapping && self.tools.tool.snaps() {
            for guide in &self.guides {
                match guide.orientation {
                    GuideOrientation::Vertical => position.x = guide.axis_value(),
                    GuideOrientation::Horizontal => position.y = guide.axis_value(),
                }
            }
        }
        position
    }

    /// Recompute the guide set around the unsnapped pointer position.
    fn refresh_guides(&mut self, pixel: Vec2, shapes: &ShapeMap) {
        let position = self.brush_position(pixel, false);

        let mut candidates = Vec::new();
        if self.map.snap_to_grid {
            candidates.extend(guides_from_grid(
                pixel,
                &self.map.grid,
                self.map.snapping_sensitivity,
                self.map.map_size,
            ));
        }

        let snappable: Vec<Shape> = shapes
            .values()
            .filter(|s| !self.tools.preview || s.visible)
            .cloned()
            .collect();
        candidates.extend(guides_from_bounding_boxes(
            position,
            &shape_bounding_boxes(&snappable),
            self.map.cell_normalized_size(),
            self.map.snapping_sensitivity,
        ));

        self.guides = find_best_guides(position, &candidates);
    }
}
