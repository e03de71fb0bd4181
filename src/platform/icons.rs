//! Icon generation.
//!
//! Draws the window icon in code so no image assets need to ship.

use eframe::egui::IconData;

/// Icon size in pixels.
pub const ICON_SIZE: u32 = 32;

/// Generate the window icon (white speaker on a blue disc).
pub fn create_window_icon() -> IconData {
    IconData {
        rgba: generate_speaker_icon(),
        width: ICON_SIZE,
        height: ICON_SIZE,
    }
}

/// Generate a speaker icon as RGBA data.
fn generate_speaker_icon() -> Vec<u8> {
    let size = ICON_SIZE as usize;
    let mut rgba = vec![0u8; size * size * 4];

    let center = size as f32 / 2.0;
    let radius = size as f32 / 2.0 - 1.0;
    let (r, g, b) = (33u8, 150u8, 243u8);

    for y in 0..size {
        for x in 0..size {
            let idx = (y * size + x) * 4;
            let dx = x as f32 + 0.5 - center;
            let dy = y as f32 + 0.5 - center;
            let dist = (dx * dx + dy * dy).sqrt();

            if dist < radius {
                rgba[idx..idx + 4].copy_from_slice(&[r, g, b, 255]);
            } else if dist < radius + 1.0 {
                // Anti-aliased edge
                let alpha = ((radius + 1.0 - dist) * 255.0) as u8;
                rgba[idx..idx + 4].copy_from_slice(&[r, g, b, alpha]);
            }
        }
    }

    draw_speaker_shape(&mut rgba, size);
    rgba
}

/// Draw a simplified speaker: a box with a cone widening to the right.
fn draw_speaker_shape(rgba: &mut [u8], size: usize) {
    let center_y = size as i32 / 2;
    let box_left = size as i32 * 9 / 32;
    let box_right = size as i32 * 13 / 32;
    let cone_right = size as i32 * 21 / 32;
    let box_half = size as i32 * 3 / 32;

    for x in box_left..cone_right {
        let half = if x < box_right {
            box_half
        } else {
            box_half + (x - box_right) * 3 / 4
        };
        for y in (center_y - half)..(center_y + half) {
            set_white(rgba, size, x, y);
        }
    }

    // Sound wave
    for y in (center_y - box_half * 2)..(center_y + box_half * 2) {
        set_white(rgba, size, cone_right + 3, y);
    }
}

fn set_white(rgba: &mut [u8], size: usize, x: i32, y: i32) {
    if x < 0 || y < 0 || x as usize >= size || y as usize >= size {
        return;
    }
    let idx = (y as usize * size + x as usize) * 4;
    if rgba[idx + 3] > 0 {
        rgba[idx..idx + 3].copy_from_slice(&[255, 255, 255]);
    }
}
