//! Draw overlay outlines onto an RGB image.

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use peg_target::OverlayRect;

/// Draw each rectangle as a 1-px outline through both of its corners,
/// clipped to the image. Later rectangles paint over earlier ones.
pub fn draw_overlay(img: &mut RgbImage, rects: &[OverlayRect]) {
    let (w, h) = img.dimensions();
    for rect in rects {
        if let Some(outline) = outline_rect(rect, w, h) {
            draw_hollow_rect_mut(img, outline, Rgb(rect.color.rgb()));
        }
    }
}

/// Rectangle whose border passes through `top_left` and `bottom_right`.
///
/// Corners are pulled in to one pixel outside a `w`×`h` image, so an edge
/// off the image stays off it. `None` when the corners are inverted.
fn outline_rect(rect: &OverlayRect, w: u32, h: u32) -> Option<Rect> {
    let (x0, y0) = (rect.top_left.x, rect.top_left.y);
    let (x1, y1) = (rect.bottom_right.x, rect.bottom_right.y);
    if x1 < x0 || y1 < y0 {
        return None;
    }
    let clamp_x = |v: i32| i64::from(v).clamp(-1, i64::from(w));
    let clamp_y = |v: i32| i64::from(v).clamp(-1, i64::from(h));
    let (x0, x1) = (clamp_x(x0), clamp_x(x1));
    let (y0, y1) = (clamp_y(y0), clamp_y(y1));
    let width = u32::try_from(x1 - x0 + 1).ok()?;
    let height = u32::try_from(y1 - y0 + 1).ok()?;
    let left = i32::try_from(x0).ok()?;
    let top = i32::try_from(y0).ok()?;
    Some(Rect::at(left, top).of_size(width, height))
}
