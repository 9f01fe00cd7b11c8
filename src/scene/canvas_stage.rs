// Retained display list backing the browser canvas. Pure data so hit-testing runs
// natively; drawing lives in `screens`.
use crate::registry::ItemId;
use crate::stage::{Handle, Stage, TextStyle};

#[derive(Clone, Debug, PartialEq)]
pub enum SpriteKind {
    Image { key: String, size: f64 },
    Text { text: String, style: TextStyle },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub handle: Handle,
    pub x: f64,
    pub y: f64,
    pub kind: SpriteKind,
    /// Item that receives pointer-downs on this sprite.
    pub item: Option<ItemId>,
}

pub struct CanvasStage {
    width: f64,
    height: f64,
    item_size: f64,
    sprites: Vec<Sprite>,
    next_handle: u32,
}

impl CanvasStage {
    pub fn new(width: f64, height: f64, item_size: f64) -> Self {
        Self {
            width,
            height,
            item_size,
            sprites: Vec::new(),
            next_handle: 0,
        }
    }

    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    /// Topmost interactive image under the pointer.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<ItemId> {
        self.sprites.iter().rev().find_map(|s| match (&s.kind, s.item) {
            (SpriteKind::Image { size, .. }, Some(item))
                if (x - s.x).abs() <= size / 2.0 && (y - s.y).abs() <= size / 2.0 =>
            {
                Some(item)
            }
            _ => None,
        })
    }

    fn push(&mut self, x: f64, y: f64, kind: SpriteKind) -> Handle {
        let handle = Handle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        self.sprites.push(Sprite {
            handle,
            x,
            y,
            kind,
            item: None,
        });
        handle
    }
}

impl Stage for CanvasStage {
    fn bounds(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn add_image_at(&mut self, x: f64, y: f64, key: &str) -> Handle {
        let size = self.item_size;
        self.push(
            x,
            y,
            SpriteKind::Image {
                key: key.to_owned(),
                size,
            },
        )
    }

    fn add_text(&mut self, x: f64, y: f64, text: &str, style: TextStyle) -> Handle {
        self.push(
            x,
            y,
            SpriteKind::Text {
                text: text.to_owned(),
                style,
            },
        )
    }

    fn on_pointer_down(&mut self, handle: Handle, item: ItemId) {
        if let Some(sprite) = self.sprites.iter_mut().find(|s| s.handle == handle) {
            sprite.item = Some(item);
        }
    }

    fn destroy(&mut self, handle: Handle) {
        self.sprites.retain(|s| s.handle != handle);
    }
}
