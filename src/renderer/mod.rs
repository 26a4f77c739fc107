//! Render adapter
//!
//! Reads simulation snapshots and produces draw commands. Pixels are the
//! backend's job; asset lookup is injected through `AssetResolver`.

pub mod assets;
pub mod draw_list;

pub use assets::{AssetError, AssetManifest, AssetResolver, FontAsset, ImageAsset};
pub use draw_list::{DrawCommand, build_draw_list, trail_curves};
