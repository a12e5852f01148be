//! Scanline flood fill on a raw RGBA buffer.

use image::RgbaImage;

use crate::color::Rgba;

pub const DEFAULT_FILL_TOLERANCE: u8 = 30;

/// True when every channel (R, G, B, A) of `a` and `b` differs by at most `tolerance`.
pub fn color_match(a: Rgba, b: Rgba, tolerance: u8) -> bool {
    a.channels()
        .iter()
        .zip(b.channels())
        .all(|(&x, y)| x.abs_diff(y) <= tolerance)
}

/// Four-connected flood fill starting at `(start_x, start_y)`.
///
/// Every pixel reachable from the start through pixels matching the start
/// pixel's color (within `tolerance`) is set to `fill`. Returns whether the
/// buffer changed. Starting outside the buffer, or on a pixel that already
/// matches `fill`, is a no-op.
///
/// Seeds are kept on an explicit stack, one per contiguous run of matching
/// pixels on the neighbouring rows, so stack growth is bounded by the number
/// of runs rather than the number of pixels.
pub fn flood_fill(
    buffer: &mut RgbaImage,
    start_x: i64,
    start_y: i64,
    fill: Rgba,
    tolerance: u8,
) -> bool {
    let (width, height) = (buffer.width() as usize, buffer.height() as usize);
    if start_x < 0 || start_y < 0 || start_x as usize >= width || start_y as usize >= height {
        return false;
    }
    let data: &mut [u8] = buffer;

    let read = |data: &[u8], x: usize, y: usize| -> Rgba {
        let i = (y * width + x) * 4;
        Rgba::new(data[i], data[i + 1], data[i + 2], data[i + 3])
    };

    let target = read(data, start_x as usize, start_y as usize);
    if color_match(target, fill, tolerance) {
        return false;
    }
    let matches = |data: &[u8], x: usize, y: usize| color_match(target, read(data, x, y), tolerance);
    let fill_bytes = fill.channels();

    let mut stack = vec![(start_x as usize, start_y as usize)];
    while let Some((seed_x, y)) = stack.pop() {
        // Already filled by an earlier run.
        if !matches(data, seed_x, y) {
            continue;
        }

        let mut x = seed_x;
        while x > 0 && matches(data, x - 1, y) {
            x -= 1;
        }

        let mut reach_above = false;
        let mut reach_below = false;
        while x < width && matches(data, x, y) {
            let i = (y * width + x) * 4;
            data[i..i + 4].copy_from_slice(&fill_bytes);

            if y > 0 {
                if matches(data, x, y - 1) {
                    if !reach_above {
                        stack.push((x, y - 1));
                        reach_above = true;
                    }
                } else {
                    reach_above = false;
                }
            }

            if y + 1 < height {
                if matches(data, x, y + 1) {
                    if !reach_below {
                        stack.push((x, y + 1));
                        reach_below = true;
                    }
                } else {
                    reach_below = false;
                }
            }

            x += 1;
        }
    }

    true
}
