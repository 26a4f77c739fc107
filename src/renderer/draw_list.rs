//! Draw list generation from simulation snapshots
//!
//! Turns a `Snapshot` into backend-agnostic draw commands, back to front.
//! Screen layout follows the 800x600 design and is anchored to the field
//! center so other field sizes still line up.

use glam::Vec2;
use serde::Serialize;

use super::assets::{AssetError, AssetResolver};
use crate::consts::STARTING_LIVES;
use crate::settings::Settings;
use crate::sim::{GameStatus, Snapshot};

/// Colors for HUD text and the pointer trail
pub mod colors {
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const TRAIL: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}

/// HUD font
pub const HUD_FONT: &str = "gang_of_three";
pub const HUD_TEXT_SIZE: f32 = 32.0;

/// Title banner (pixels)
const TITLE_SIZE: Vec2 = Vec2::new(641.0, 127.0);
const GAMEOVER_SIZE: Vec2 = Vec2::new(490.0, 85.0);
/// "Slice to start" ring drawn behind the start fruit
const START_ZONE_SIZE: f32 = 195.0;
const START_ZONE_OFFSET: Vec2 = Vec2::new(200.0, 100.0);
const LIFE_ICON_SIZE: f32 = 26.0;
const LIFE_ICON_SPACING: f32 = 30.0;
const LIFE_ICON_ORIGIN: Vec2 = Vec2::new(16.0, 10.0);
/// Trail curves start this thick and grow by one per segment
const TRAIL_BASE_WEIGHT: f32 = 3.0;

/// A single backend-agnostic draw operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    /// Image centered at `center`, rotated about it
    Image {
        asset: String,
        path: String,
        center: Vec2,
        size: Vec2,
        rotation: f32,
    },
    /// Text with its baseline starting at `pos`
    Text {
        font: String,
        text: String,
        pos: Vec2,
        size: f32,
        color: [f32; 4],
    },
    /// Catmull-Rom segment through four control points
    Curve {
        points: [Vec2; 4],
        weight: f32,
        color: [f32; 4],
    },
}

/// Accumulates commands while resolving assets
struct DrawList<'a> {
    assets: &'a dyn AssetResolver,
    commands: Vec<DrawCommand>,
}

impl<'a> DrawList<'a> {
    fn image(&mut self, name: &str, top_left: Vec2, size: Vec2) -> Result<(), AssetError> {
        self.image_rotated(name, top_left + size / 2.0, size, 0.0)
    }

    fn image_rotated(
        &mut self,
        name: &str,
        center: Vec2,
        size: Vec2,
        rotation: f32,
    ) -> Result<(), AssetError> {
        let image = self.assets.require_image(name)?;
        self.commands.push(DrawCommand::Image {
            asset: name.to_string(),
            path: image.path.clone(),
            center,
            size,
            rotation,
        });
        Ok(())
    }

    fn text(&mut self, text: String, pos: Vec2) -> Result<(), AssetError> {
        let font = self.assets.require_font(HUD_FONT)?;
        self.commands.push(DrawCommand::Text {
            font: font.path.clone(),
            text,
            pos,
            size: HUD_TEXT_SIZE,
            color: colors::WHITE,
        });
        Ok(())
    }
}

/// Build the full frame for a snapshot
pub fn build_draw_list(
    snapshot: &Snapshot,
    settings: &Settings,
    assets: &dyn AssetResolver,
) -> Result<Vec<DrawCommand>, AssetError> {
    let field = Vec2::new(settings.field_width, settings.field_height);
    let mut list = DrawList {
        assets,
        commands: Vec::new(),
    };

    background(&mut list, field)?;

    let session = &snapshot.session;
    match session.status {
        GameStatus::Menu => {
            list.image(
                "title",
                Vec2::new((field.x - TITLE_SIZE.x) / 2.0, field.y / 2.0 - 100.0),
                TITLE_SIZE,
            )?;
            start_zone(&mut list, field)?;
        }
        GameStatus::GameOver => {
            list.image(
                "gameover",
                Vec2::new((field.x - GAMEOVER_SIZE.x) / 2.0, field.y / 2.0 - 100.0),
                GAMEOVER_SIZE,
            )?;
            let left = field.x / 2.0 - 220.0;
            list.text(
                format!("Score: {}", session.score),
                Vec2::new(left, field.y / 2.0 + 50.0),
            )?;
            list.text(
                format!("Best Score: {}", session.best_score),
                Vec2::new(left, field.y / 2.0 + 100.0),
            )?;
            start_zone(&mut list, field)?;
        }
        GameStatus::Playing => {
            for i in 0..STARTING_LIVES {
                let name = if i < session.lives { "live_on" } else { "live_off" };
                let pos = LIFE_ICON_ORIGIN + Vec2::new(i as f32 * LIFE_ICON_SPACING, 0.0);
                list.image(name, pos, Vec2::splat(LIFE_ICON_SIZE))?;
            }
            list.text(
                format!("Score: {}", session.score),
                Vec2::new(field.x - 180.0, 30.0),
            )?;
        }
    }

    for obj in &snapshot.objects {
        list.image_rotated(&obj.asset, obj.pos, obj.size, obj.rotation)?;
    }

    if settings.trail {
        list.commands.extend(trail_curves(&snapshot.trail));
    }

    Ok(list.commands)
}

/// Tile the background image over the field
fn background(list: &mut DrawList<'_>, field: Vec2) -> Result<(), AssetError> {
    let image = list.assets.require_image("background")?;
    if image.width == 0 || image.height == 0 {
        return Err(AssetError::EmptyImage("background".to_string()));
    }
    let tile = Vec2::new(image.width as f32, image.height as f32);

    let mut x = 0.0;
    while x < field.x {
        let mut y = 0.0;
        while y < field.y {
            list.image("background", Vec2::new(x, y), tile)?;
            y += tile.y;
        }
        x += tile.x;
    }
    Ok(())
}

/// Ring marking where the start fruit sits
fn start_zone(list: &mut DrawList<'_>, field: Vec2) -> Result<(), AssetError> {
    let top_left = (field - Vec2::splat(START_ZONE_SIZE)) / 2.0 + START_ZONE_OFFSET;
    list.image("newgame", top_left, Vec2::splat(START_ZONE_SIZE))
}

/// Overlapping 4-point curves along the trail, thicker toward the newest sample
pub fn trail_curves(trail: &[Vec2]) -> Vec<DrawCommand> {
    trail
        .windows(4)
        .enumerate()
        .map(|(i, w)| DrawCommand::Curve {
            points: [w[0], w[1], w[2], w[3]],
            weight: TRAIL_BASE_WEIGHT + i as f32,
            color: colors::TRAIL,
        })
        .collect()
}
