//! The card table, drawn on a Braille canvas.
//!
//! Stage coordinates grow downward; the canvas grows upward, so every point
//! is mirrored through the stage height on the way in.

use crate::game::card::{CardSprite, Face};
use crate::game::fan::CARD_SIZE;
use crate::game::geometry::{Point, Size};
use crate::game::TableView;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Context, Line as CanvasLine};
use ratatui::widgets::{Block, Borders};

/// Part of the stage worth showing: the fan and the enlarged card.
const FOCUS: Size = Size::new(400.0, 400.0);

/// Labels are dropped while a card is nearly edge-on.
const LABEL_MIN_SQUASH: f64 = 0.3;

pub fn render(frame: &mut Frame, area: Rect, view: &TableView) {
    let block = Block::default()
        .title(" Table ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_style(Theme::border());
    let inner = block.inner(area);

    let stage_height = view.size.height;
    let focus_center = Point::new(view.size.width / 2.0, stage_height / 2.0);
    let (x_bounds, y_bounds) = fit_bounds(inner, focus_center, FOCUS);

    let canvas = Canvas::default()
        .block(block)
        .background_color(Theme::TABLE_BG)
        .marker(Marker::Braille)
        .x_bounds(x_bounds)
        .y_bounds(y_bounds)
        .paint(|ctx| {
            for sprite in view.sprites.iter().filter(|s| !s.hidden) {
                draw_card(ctx, sprite, stage_height);
                ctx.layer();
            }
        });
    frame.render_widget(canvas, area);
}

fn draw_card(ctx: &mut Context, sprite: &CardSprite, stage_height: f64) {
    let corners = card_corners(sprite);
    let color = match sprite.face {
        Face::Back => Theme::CARD_BACK,
        Face::Front => Theme::CARD_FRONT,
    };
    let to_canvas = |p: Point| (p.x, stage_height - p.y);

    for i in 0..corners.len() {
        let (x1, y1) = to_canvas(corners[i]);
        let (x2, y2) = to_canvas(corners[(i + 1) % corners.len()]);
        ctx.draw(&CanvasLine::new(x1, y1, x2, y2, Theme::CARD_EDGE));
    }

    // Back face pattern: a cross between opposite corners.
    if sprite.face == Face::Back {
        for (a, b) in [(0, 2), (1, 3)] {
            let (x1, y1) = to_canvas(corners[a]);
            let (x2, y2) = to_canvas(corners[b]);
            ctx.draw(&CanvasLine::new(x1, y1, x2, y2, color));
        }
    }

    if sprite.squash >= LABEL_MIN_SQUASH {
        let (x, y) = to_canvas(sprite.pose.position());
        let label = Span::styled(sprite.face.asset(), Theme::card_label().fg(color));
        ctx.print(x, y, label);
    }
}

/// Card outline in stage coordinates, clockwise from the top-left.
fn card_corners(sprite: &CardSprite) -> [Point; 4] {
    let half_w = CARD_SIZE.width / 2.0 * sprite.squash;
    let half_h = CARD_SIZE.height / 2.0;
    let transform = sprite.pose.transform;
    let center = sprite.pose.center;
    [(-half_w, -half_h), (half_w, -half_h), (half_w, half_h), (-half_w, half_h)].map(|(x, y)| {
        let p = transform.apply(Point::new(x, y));
        center.offset(p.x, p.y)
    })
}

/// Canvas bounds that show all of `focus` around `center` without
/// stretching, assuming a terminal cell is about twice as tall as wide.
fn fit_bounds(area: Rect, center: Point, focus: Size) -> ([f64; 2], [f64; 2]) {
    let cols = f64::from(area.width.max(1));
    let rows = f64::from(area.height.max(1)) * 2.0;
    let unit = (focus.width / cols).max(focus.height / rows);
    let half_w = cols * unit / 2.0;
    let half_h = rows * unit / 2.0;
    (
        [center.x - half_w, center.x + half_w],
        [center.y - half_h, center.y + half_h],
    )
}
