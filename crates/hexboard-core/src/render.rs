//! Draw-command emission.
//!
//! The core never talks to a graphics API. It resolves every position to a
//! planar point and hands it to a [`Renderer`]; the renderer decides how a
//! hex, label, segment or marker actually looks.

use crate::assignment::{NumberToken, Resource, Tile, TileType};
use crate::board::Board;
use crate::geometry::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Elevation of number markers above the tile tops
pub const MARKER_ELEVATION: f64 = 0.2;

/// An opaque RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(u32);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid colour {0:?}, expected #RRGGBB")]
pub struct ColorParseError(pub String);

impl Color {
    pub const WHITE: Color = Color::rgb(0xFFFFFF);
    pub const BLACK: Color = Color::rgb(0x000000);
    pub const ROBBER: Color = Color::rgb(0x847545);

    pub const fn rgb(hex: u32) -> Self {
        Self(hex & 0xFF_FFFF)
    }

    pub const fn value(&self) -> u32 {
        self.0
    }

    pub fn parse(s: &str) -> Result<Self, ColorParseError> {
        let digits = s
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.chars().all(|c| c.is_ascii_hexdigit()))
            .ok_or_else(|| ColorParseError(s.to_string()))?;
        u32::from_str_radix(digits, 16)
            .map(Color::rgb)
            .map_err(|_| ColorParseError(s.to_string()))
    }

    /// Fill colour for a resource tile
    pub fn for_resource(resource: Resource) -> Self {
        match resource {
            Resource::Sheep => Color::rgb(0x66BB6A),
            Resource::Ore => Color::rgb(0x455A64),
            Resource::Brick => Color::rgb(0xF57C00),
            Resource::Wheat => Color::rgb(0xFFEE58),
            Resource::Wood => Color::rgb(0x1B5E20),
        }
    }

    /// Fill colour for any tile
    pub fn for_tile(tile_type: TileType) -> Self {
        match tile_type {
            TileType::Resource(r) => Color::for_resource(r),
            TileType::Desert => Color::ROBBER,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Color::parse(&s)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> String {
        color.to_string()
    }
}

/// How a number label is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelStyle {
    Normal,
    /// 6 and 8, the rolls with five pips
    Hot,
}

impl LabelStyle {
    /// Highlight the five-pip rolls. A plain `roll >= n` cut would also
    /// catch the rare 9 through 12, so the pip count is used instead.
    pub fn for_roll(number: NumberToken) -> Self {
        if number.pips() >= 5 {
            LabelStyle::Hot
        } else {
            LabelStyle::Normal
        }
    }
}

/// Sink for resolved draw requests
pub trait Renderer {
    /// A hex tile of circumradius `radius` centered at `center`
    fn draw_hex(&mut self, center: Vec2, radius: f64, color: Color);

    fn draw_label(&mut self, position: Vec2, text: &str, style: LabelStyle);

    /// A road between two corners
    fn draw_segment(&mut self, from: Vec2, to: Vec2, color: Color);

    /// A disc or block at a point, raised by `elevation`
    fn draw_marker(&mut self, at: Vec2, elevation: f64, color: Color);
}

/// A single draw request as data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Hex {
        center: Vec2,
        radius: f64,
        color: Color,
    },
    Label {
        position: Vec2,
        text: String,
        style: LabelStyle,
    },
    Segment {
        from: Vec2,
        to: Vec2,
        color: Color,
    },
    Marker {
        at: Vec2,
        elevation: f64,
        color: Color,
    },
}

impl DrawCommand {
    /// Replay this command onto a renderer
    pub fn apply<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        match self {
            DrawCommand::Hex {
                center,
                radius,
                color,
            } => renderer.draw_hex(*center, *radius, *color),
            DrawCommand::Label {
                position,
                text,
                style,
            } => renderer.draw_label(*position, text, *style),
            DrawCommand::Segment { from, to, color } => renderer.draw_segment(*from, *to, *color),
            DrawCommand::Marker {
                at,
                elevation,
                color,
            } => renderer.draw_marker(*at, *elevation, *color),
        }
    }
}

/// Renderer that records commands instead of drawing them
#[derive(Debug, Clone, Default)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}

impl Renderer for CommandRecorder {
    fn draw_hex(&mut self, center: Vec2, radius: f64, color: Color) {
        self.commands.push(DrawCommand::Hex {
            center,
            radius,
            color,
        });
    }

    fn draw_label(&mut self, position: Vec2, text: &str, style: LabelStyle) {
        self.commands.push(DrawCommand::Label {
            position,
            text: text.to_string(),
            style,
        });
    }

    fn draw_segment(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.commands.push(DrawCommand::Segment { from, to, color });
    }

    fn draw_marker(&mut self, at: Vec2, elevation: f64, color: Color) {
        self.commands.push(DrawCommand::Marker {
            at,
            elevation,
            color,
        });
    }
}

/// Draw one tile: its hex, and unless it holds the robber, a white number
/// marker with the roll on top.
pub fn emit_tile<R: Renderer + ?Sized>(tile: &Tile, radius: f64, elevation: f64, renderer: &mut R) {
    renderer.draw_hex(tile.position, radius, Color::for_tile(tile.tile_type));
    if let Some(roll) = tile.number.roll() {
        renderer.draw_marker(tile.position, elevation, Color::WHITE);
        renderer.draw_label(
            tile.position,
            &roll.to_string(),
            LabelStyle::for_roll(tile.number),
        );
    }
}

/// Draw every tile of a board in slot order
pub fn emit_board<R: Renderer + ?Sized>(board: &Board, elevation: f64, renderer: &mut R) {
    let radius = board.layout().length;
    for tile in board.tiles() {
        emit_tile(tile, radius, elevation, renderer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardConfig, BoardVariant};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_color_parse_and_display() {
        let color = Color::parse("#66bb6a").unwrap();
        assert_eq!(color, Color::for_resource(Resource::Sheep));
        assert_eq!(color.to_string(), "#66BB6A");
        assert!(Color::parse("66BB6A").is_err());
        assert!(Color::parse("#66BB6").is_err());
        assert!(Color::parse("#GGGGGG").is_err());
    }

    #[test]
    fn test_color_json_is_a_hex_string() {
        assert_eq!(serde_json::to_string(&Color::ROBBER).unwrap(), r##""#847545""##);
        let back: Color = serde_json::from_str(r##""#1B5E20""##).unwrap();
        assert_eq!(back, Color::for_resource(Resource::Wood));
    }

    #[test]
    fn test_label_style() {
        assert_eq!(LabelStyle::for_roll(NumberToken::Roll(6)), LabelStyle::Hot);
        assert_eq!(LabelStyle::for_roll(NumberToken::Roll(8)), LabelStyle::Hot);
        assert_eq!(LabelStyle::for_roll(NumberToken::Roll(5)), LabelStyle::Normal);
        assert_eq!(LabelStyle::for_roll(NumberToken::Roll(9)), LabelStyle::Normal);
        assert_eq!(LabelStyle::for_roll(NumberToken::Roll(12)), LabelStyle::Normal);
        assert_eq!(LabelStyle::for_roll(NumberToken::Robber), LabelStyle::Normal);
    }

    #[test]
    fn test_emit_board_counts() {
        let mut rng = StdRng::seed_from_u64(11);
        let board =
            Board::generate_with_rng(&BoardConfig::new(BoardVariant::Prism), &mut rng).unwrap();
        let mut recorder = CommandRecorder::new();
        emit_board(&board, MARKER_ELEVATION, &mut recorder);

        let commands = recorder.into_commands();
        let count = |pred: fn(&DrawCommand) -> bool| commands.iter().filter(|c| pred(c)).count();
        assert_eq!(count(|c| matches!(c, DrawCommand::Hex { .. })), 19);
        assert_eq!(count(|c| matches!(c, DrawCommand::Marker { .. })), 18);
        assert_eq!(count(|c| matches!(c, DrawCommand::Label { .. })), 18);
        assert_eq!(
            count(|c| matches!(c, DrawCommand::Hex { color, .. } if *color == Color::ROBBER)),
            1
        );
    }

    #[test]
    fn test_robber_tile_has_no_label() {
        let mut rng = StdRng::seed_from_u64(12);
        let board = Board::generate_with_rng(&BoardConfig::default(), &mut rng).unwrap();
        let mut recorder = CommandRecorder::new();
        emit_tile(board.robber_tile(), 1.0, MARKER_ELEVATION, &mut recorder);
        assert_eq!(
            recorder.commands(),
            &[DrawCommand::Hex {
                center: board.robber_tile().position,
                radius: 1.0,
                color: Color::ROBBER,
            }]
        );
    }

    #[test]
    fn test_replay_reproduces_commands() {
        let original = vec![
            DrawCommand::Segment {
                from: Vec2::ZERO,
                to: Vec2::new(1.0, 0.0),
                color: Color::BLACK,
            },
            DrawCommand::Label {
                position: Vec2::ZERO,
                text: "8".to_string(),
                style: LabelStyle::Hot,
            },
        ];
        let mut recorder = CommandRecorder::new();
        for command in &original {
            command.apply(&mut recorder);
        }
        assert_eq!(recorder.into_commands(), original);
    }

    #[test]
    fn test_command_json_is_tagged() {
        let json = serde_json::to_value(DrawCommand::Marker {
            at: Vec2::new(1.0, 2.0),
            elevation: 0.2,
            color: Color::WHITE,
        })
        .unwrap();
        assert_eq!(json["kind"], "marker");
        assert_eq!(json["color"], "#FFFFFF");
        assert_eq!(json["at"]["y"], 2.0);
    }
}
