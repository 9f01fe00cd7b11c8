//! Render / input collaborator. The game never draws; it asks a `Stage` to show and
//! destroy things, and the stage reports pointer hits back by item id.

use crate::registry::ItemId;

/// Opaque display-object handle issued by a stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub size_px: f64,
    pub color: &'static str,
}

impl TextStyle {
    pub const LABEL: TextStyle = TextStyle {
        size_px: 24.0,
        color: "#fff",
    };
}

pub trait Stage {
    /// Drawable width and height in canvas pixels.
    fn bounds(&self) -> (f64, f64);
    fn add_image_at(&mut self, x: f64, y: f64, key: &str) -> Handle;
    fn add_text(&mut self, x: f64, y: f64, text: &str, style: TextStyle) -> Handle;
    /// Route pointer-downs on `handle` to `item`.
    fn on_pointer_down(&mut self, handle: Handle, item: ItemId);
    /// Remove the display object; no events fire for it afterwards.
    fn destroy(&mut self, handle: Handle);
}
