//! Start / play / game-over screen layout and drawing.
//!
//! Layout is computed by plain functions so button hit boxes can be tested natively;
//! the `draw_*` functions only paint what the layout says.

use std::collections::HashMap;

use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::canvas_stage::{CanvasStage, SpriteKind};
use super::effects::Sparkle;
use crate::registry::ItemId;
use crate::scoring::FinalScore;

pub type Images = HashMap<&'static str, HtmlImageElement>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Button {
    pub cx: f64,
    pub cy: f64,
    pub w: f64,
    pub h: f64,
    pub label: &'static str,
}

impl Button {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (x - self.cx).abs() <= self.w / 2.0 && (y - self.cy).abs() <= self.h / 2.0
    }
}

pub fn play_button(width: f64, height: f64) -> Button {
    Button {
        cx: width / 2.0,
        cy: height * 0.75,
        w: 120.0,
        h: 50.0,
        label: "Play",
    }
}

/// Vertical positions of everything on the game-over screen.
#[derive(Clone, Debug, PartialEq)]
pub struct GameOverLayout {
    pub cx: f64,
    pub title_y: f64,
    pub score_y: f64,
    pub perfect_y: Option<f64>,
    pub elapsed_y: f64,
    pub heading_y: f64,
    pub rows_y: Vec<f64>,
    pub play_again: Button,
}

pub fn game_over_layout(width: f64, perfect: bool, rows: usize) -> GameOverLayout {
    let cx = width / 2.0;
    let mut y = 50.0;
    let title_y = y;
    y += 100.0;
    let score_y = y;
    y += 50.0;
    let perfect_y = perfect.then(|| {
        let py = y;
        y += 50.0;
        py
    });
    let elapsed_y = y;
    y += 100.0;
    let heading_y = y;
    y += 50.0;
    let rows_y = (0..rows).map(|i| y + i as f64 * 24.0).collect();
    y += rows as f64 * 24.0;
    GameOverLayout {
        cx,
        title_y,
        score_y,
        perfect_y,
        elapsed_y,
        heading_y,
        rows_y,
        play_again: Button {
            cx,
            cy: y + 50.0,
            w: 200.0,
            h: 50.0,
            label: "Play Again",
        },
    }
}

fn text(ctx: &CanvasRenderingContext2d, s: &str, x: f64, y: f64, px: f64, color: &str) {
    ctx.set_font(&format!("{px}px sans-serif"));
    ctx.set_fill_style_str(color);
    ctx.fill_text(s, x, y).ok();
}

fn draw_button(ctx: &CanvasRenderingContext2d, b: &Button) {
    ctx.set_fill_style_str("#333");
    ctx.fill_rect(b.cx - b.w / 2.0, b.cy - b.h / 2.0, b.w, b.h);
    text(ctx, b.label, b.cx, b.cy, 32.0, "#0f0");
}

/// Draw `key` stretched over the rect, or fill `fallback` until the image loads.
fn draw_image_or(
    ctx: &CanvasRenderingContext2d,
    images: &Images,
    key: &str,
    (x, y, w, h): (f64, f64, f64, f64),
    fallback: &str,
) {
    match images.get(key) {
        Some(img) if img.complete() && img.natural_width() > 0 => {
            ctx.draw_image_with_html_image_element_and_dw_and_dh(img, x, y, w, h)
                .ok();
        }
        _ => {
            ctx.set_fill_style_str(fallback);
            ctx.fill_rect(x, y, w, h);
        }
    }
}

fn prepare(ctx: &CanvasRenderingContext2d) {
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_global_alpha(1.0);
    ctx.set_shadow_blur(0.0);
}

pub fn draw_start(ctx: &CanvasRenderingContext2d, images: &Images, width: f64, height: f64) {
    prepare(ctx);
    draw_image_or(ctx, images, "startscreen", (0.0, 0.0, width, height), "#1b2b3a");
    let button = play_button(width, height);
    let title_y = button.cy - 100.0;
    ctx.set_fill_style_str("#fff");
    ctx.fill_rect(0.0, title_y - 30.0, width, 60.0);
    text(ctx, "Holiday Finder Game", width / 2.0, title_y, 48.0, "#000");
    draw_button(ctx, &button);
}

pub struct PlayView<'a> {
    pub stage: &'a CanvasStage,
    pub target: Option<ItemId>,
    pub sparkles: &'a [Sparkle],
    pub elapsed: u32,
    pub score: u64,
    pub now: f64,
}

pub fn draw_play(
    ctx: &CanvasRenderingContext2d,
    images: &Images,
    width: f64,
    height: f64,
    view: &PlayView<'_>,
) {
    prepare(ctx);
    draw_image_or(ctx, images, "background", (0.0, 0.0, width, height), "#203a2a");

    for sprite in view.stage.sprites() {
        match &sprite.kind {
            SpriteKind::Image { key, size } => {
                let glowing = view.target.is_some() && sprite.item == view.target;
                if glowing {
                    ctx.set_shadow_color("rgba(255,230,120,0.95)");
                    ctx.set_shadow_blur(28.0);
                }
                let half = size / 2.0;
                draw_image_or(
                    ctx,
                    images,
                    key,
                    (sprite.x - half, sprite.y - half, *size, *size),
                    "#c0392b",
                );
                ctx.set_shadow_blur(0.0);
            }
            SpriteKind::Text { text: s, style } => {
                text(ctx, s, sprite.x, sprite.y, style.size_px, style.color);
            }
        }
    }

    for sparkle in view.sparkles {
        let size = 100.0 * Sparkle::SCALE;
        ctx.set_global_alpha(sparkle.alpha(view.now));
        draw_image_or(
            ctx,
            images,
            "sparkle",
            (sparkle.x - size / 2.0, sparkle.y - size / 2.0, size, size),
            "#fff6a0",
        );
    }
    ctx.set_global_alpha(1.0);

    ctx.set_text_align("left");
    text(ctx, &format!("Time: {}s", view.elapsed), 10.0, 22.0, 24.0, "#fff");
    text(ctx, &format!("Score: {}", view.score), 10.0, 52.0, 24.0, "#fff");
    ctx.set_text_align("center");
}

pub fn draw_game_over(
    ctx: &CanvasRenderingContext2d,
    width: f64,
    height: f64,
    result: Option<FinalScore>,
    high_scores: &[u64],
) {
    prepare(ctx);
    ctx.set_fill_style_str("#000");
    ctx.fill_rect(0.0, 0.0, width, height);

    let perfect = result.is_some_and(|r| r.perfect);
    let layout = game_over_layout(width, perfect, high_scores.len());
    let score = result.map(|r| r.score).unwrap_or_default();
    let elapsed = result.map(|r| r.elapsed).unwrap_or_default();

    text(ctx, "Game Over!", layout.cx, layout.title_y, 48.0, "#fff");
    text(ctx, &format!("Your Score: {score}"), layout.cx, layout.score_y, 32.0, "#fff");
    if let Some(y) = layout.perfect_y {
        text(ctx, "Perfect Game!", layout.cx, y, 32.0, "#ff0");
    }
    text(ctx, &format!("Elapsed Time: {elapsed}s"), layout.cx, layout.elapsed_y, 32.0, "#fff");
    text(ctx, "High Scores:", layout.cx, layout.heading_y, 36.0, "#fff");
    for (i, (score, y)) in high_scores.iter().zip(&layout.rows_y).enumerate() {
        text(ctx, &format!("{}. {}", i + 1, score), layout.cx, *y, 18.0, "#fff");
    }
    draw_button(ctx, &layout.play_again);
}
