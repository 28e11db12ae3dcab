//! Mutable scene state on top of an immutable board.
//!
//! A scene owns one board plus everything the viewer can change: the height
//! of the number markers and the roads and settlements placed so far. Input
//! handlers take the scene explicitly, and [`Scene::redraw`] is a pure
//! function of its current state.

use crate::assignment::LayoutError;
use crate::board::{Board, BoardConfig};
use crate::hex::{CornerKey, EdgeKey};
use crate::render::{emit_board, Color, CommandRecorder, DrawCommand, Renderer, MARKER_ELEVATION};
use crate::vertex::VertexCoordinate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// How far one key press moves the number markers
pub const MARKER_STEP: f64 = 0.1;

/// Elevation of settlement blocks
pub const SETTLEMENT_ELEVATION: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("corner {0:?} is not on the board")]
    OffBoard(CornerKey),

    #[error("corners {0:?} and {1:?} do not share an edge")]
    NotAdjacent(CornerKey, CornerKey),

    #[error("corner {0:?} already has a settlement")]
    CornerOccupied(CornerKey),

    #[error("edge {0:?} already has a road")]
    EdgeOccupied(EdgeKey),
}

/// Something a key press can do to the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyAction {
    RaiseMarkers,
    LowerMarkers,
}

impl KeyAction {
    /// Action bound to a key, if any
    pub fn for_key(key: char) -> Option<KeyAction> {
        match key {
            'i' => Some(KeyAction::RaiseMarkers),
            'k' => Some(KeyAction::LowerMarkers),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Scene {
    board: Board,
    marker_elevation: f64,
    settlements: BTreeMap<CornerKey, Color>,
    roads: BTreeMap<EdgeKey, Color>,
}

impl Scene {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            marker_elevation: MARKER_ELEVATION,
            settlements: BTreeMap::new(),
            roads: BTreeMap::new(),
        }
    }

    /// Generate a fresh board and wrap it in a scene
    pub fn generate<R: Rng + ?Sized>(config: &BoardConfig, rng: &mut R) -> Result<Self, LayoutError> {
        Ok(Self::new(Board::generate_with_rng(config, rng)?))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn marker_elevation(&self) -> f64 {
        self.marker_elevation
    }

    pub fn settlements(&self) -> impl Iterator<Item = (&CornerKey, &Color)> {
        self.settlements.iter()
    }

    pub fn roads(&self) -> impl Iterator<Item = (&EdgeKey, &Color)> {
        self.roads.iter()
    }

    pub fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::RaiseMarkers => self.marker_elevation += MARKER_STEP,
            KeyAction::LowerMarkers => self.marker_elevation -= MARKER_STEP,
        }
    }

    /// Handle a key press. Returns whether the scene changed and needs a redraw.
    pub fn handle_key(&mut self, key: char) -> bool {
        match KeyAction::for_key(key) {
            Some(action) => {
                self.apply(action);
                true
            }
            None => false,
        }
    }

    /// Put a settlement on a board corner
    pub fn place_settlement(
        &mut self,
        vertex: &VertexCoordinate,
        color: Color,
    ) -> Result<CornerKey, SceneError> {
        let key = self.board_corner(vertex)?;
        if self.settlements.contains_key(&key) {
            return Err(SceneError::CornerOccupied(key));
        }
        self.settlements.insert(key, color);
        Ok(key)
    }

    /// Put a road between two corners one edge apart
    pub fn place_road(
        &mut self,
        from: &VertexCoordinate,
        to: &VertexCoordinate,
        color: Color,
    ) -> Result<EdgeKey, SceneError> {
        let a = self.board_corner(from)?;
        let b = self.board_corner(to)?;
        let edge = EdgeKey::between(a, b).ok_or(SceneError::NotAdjacent(a, b))?;
        if self.roads.contains_key(&edge) {
            return Err(SceneError::EdgeOccupied(edge));
        }
        self.roads.insert(edge, color);
        Ok(edge)
    }

    fn board_corner(&self, vertex: &VertexCoordinate) -> Result<CornerKey, SceneError> {
        let key = vertex.key();
        if self.board.has_corner(&key) {
            Ok(key)
        } else {
            Err(SceneError::OffBoard(key))
        }
    }

    /// Draw the whole scene: tiles, then roads, then settlements.
    pub fn redraw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        emit_board(&self.board, self.marker_elevation, renderer);
        for (edge, color) in &self.roads {
            let [a, b] = edge.endpoints();
            renderer.draw_segment(self.board.corner_point(&a), self.board.corner_point(&b), *color);
        }
        for (corner, color) in &self.settlements {
            renderer.draw_marker(self.board.corner_point(corner), SETTLEMENT_ELEVATION, *color);
        }
    }

    /// Redraw into a list of commands
    pub fn frame(&self) -> Vec<DrawCommand> {
        let mut recorder = CommandRecorder::new();
        self.redraw(&mut recorder);
        recorder.into_commands()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardVariant;
    use crate::hex::{Corner, Direction};
    use crate::layout::TilePath;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scene() -> Scene {
        let mut rng = StdRng::seed_from_u64(99);
        Scene::generate(&BoardConfig::new(BoardVariant::Corners), &mut rng).unwrap()
    }

    fn vertex(steps: &[Direction], corner: i64) -> VertexCoordinate {
        VertexCoordinate::new(TilePath::from(steps), Corner::wrapping(corner))
    }

    const RED: Color = Color::rgb(0xD32F2F);

    #[test]
    fn test_key_presses_move_markers() {
        let mut scene = scene();
        assert!(scene.handle_key('i'));
        assert!(scene.handle_key('i'));
        assert!(scene.handle_key('k'));
        assert!((scene.marker_elevation() - (MARKER_ELEVATION + MARKER_STEP)).abs() < 1e-9);
    }

    #[test]
    fn test_unbound_key_is_ignored() {
        let mut scene = scene();
        let before = scene.frame();
        assert!(!scene.handle_key('x'));
        assert_eq!(scene.frame(), before);
    }

    #[test]
    fn test_redraw_reflects_marker_height() {
        let mut scene = scene();
        scene.handle_key('i');
        let raised = scene
            .frame()
            .into_iter()
            .filter_map(|c| match c {
                DrawCommand::Marker { elevation, .. } => Some(elevation),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(raised.len(), 18);
        assert!(raised
            .iter()
            .all(|e| (e - (MARKER_ELEVATION + MARKER_STEP)).abs() < 1e-9));
    }

    #[test]
    fn test_settlement_shared_corner_is_occupied() {
        let mut scene = scene();
        let key = scene.place_settlement(&vertex(&[], 0), RED).unwrap();
        assert_eq!(
            scene.place_settlement(&vertex(&[Direction::NE], 4), RED),
            Err(SceneError::CornerOccupied(key))
        );
    }

    #[test]
    fn test_settlement_off_board() {
        let mut scene = scene();
        let far = vertex(&[Direction::N, Direction::N, Direction::N, Direction::N], 1);
        assert!(matches!(
            scene.place_settlement(&far, RED),
            Err(SceneError::OffBoard(_))
        ));
    }

    #[test]
    fn test_road_between_adjacent_corners() {
        let mut scene = scene();
        let edge = scene
            .place_road(&vertex(&[], 0), &vertex(&[], 1), RED)
            .unwrap();
        // Same edge named from the northeast neighbour
        assert_eq!(
            scene.place_road(&vertex(&[Direction::NE], 3), &vertex(&[Direction::NE], 4), RED),
            Err(SceneError::EdgeOccupied(edge))
        );
    }

    #[test]
    fn test_road_needs_adjacent_corners() {
        let mut scene = scene();
        assert!(matches!(
            scene.place_road(&vertex(&[], 0), &vertex(&[], 2), RED),
            Err(SceneError::NotAdjacent(_, _))
        ));
    }

    #[test]
    fn test_road_needs_two_distinct_corners() {
        let mut scene = scene();
        let corner = vertex(&[], 0);
        assert!(matches!(
            scene.place_road(&corner, &corner, RED),
            Err(SceneError::NotAdjacent(a, b)) if a == b
        ));
        // Same corner named from two different tiles
        assert!(matches!(
            scene.place_road(&corner, &vertex(&[Direction::NE], 4), RED),
            Err(SceneError::NotAdjacent(_, _))
        ));
        assert_eq!(scene.roads().count(), 0);
    }

    #[test]
    fn test_pieces_are_drawn_at_resolved_corners() {
        let mut scene = scene();
        let from = vertex(&[Direction::S], 2);
        let to = vertex(&[Direction::S], 3);
        scene.place_road(&from, &to, RED).unwrap();
        scene.place_settlement(&to, RED).unwrap();

        let layout = *scene.board().layout();
        let frame = scene.frame();
        let segment = frame.iter().find_map(|c| match c {
            DrawCommand::Segment { from, to, .. } => Some((*from, *to)),
            _ => None,
        });
        let (a, b) = segment.unwrap();
        let expected = [from.resolve(&layout), to.resolve(&layout)];
        assert!(expected.iter().any(|p| p.approx_eq(a)));
        assert!(expected.iter().any(|p| p.approx_eq(b)));

        let settlement = frame.last().unwrap();
        assert!(matches!(
            settlement,
            DrawCommand::Marker { at, elevation, color }
                if at.approx_eq(to.resolve(&layout))
                    && *elevation == SETTLEMENT_ELEVATION
                    && *color == RED
        ));
    }
}
