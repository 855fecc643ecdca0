/// Minimal 4x5 bitmap font for the status overlay. Each glyph is 4 pixels
/// wide, 5 rows tall. Bits are MSB-left within each u8 (only top 4 bits used).
const GLYPHS: &[(&[u8; 5], u8)] = &[
    // '0'
    (&[0x60, 0x90, 0x90, 0x90, 0x60], b'0'),
    // '1'
    (&[0x20, 0x60, 0x20, 0x20, 0x70], b'1'),
    // '2'
    (&[0x60, 0x90, 0x20, 0x40, 0xF0], b'2'),
    // '3'
    (&[0x60, 0x90, 0x20, 0x90, 0x60], b'3'),
    // '4'
    (&[0x90, 0x90, 0xF0, 0x10, 0x10], b'4'),
    // '5'
    (&[0xF0, 0x80, 0xE0, 0x10, 0xE0], b'5'),
    // '6'
    (&[0x60, 0x80, 0xE0, 0x90, 0x60], b'6'),
    // '7'
    (&[0xF0, 0x10, 0x20, 0x40, 0x40], b'7'),
    // '8'
    (&[0x60, 0x90, 0x60, 0x90, 0x60], b'8'),
    // '9'
    (&[0x60, 0x90, 0x70, 0x10, 0x60], b'9'),
    // '.'
    (&[0x00, 0x00, 0x00, 0x00, 0x40], b'.'),
    // ':'
    (&[0x00, 0x40, 0x00, 0x40, 0x00], b':'),
    // ' '
    (&[0x00, 0x00, 0x00, 0x00, 0x00], b' '),
    // Region names
    (&[0xE0, 0x90, 0xE0, 0x80, 0x80], b'P'),
    (&[0x60, 0x90, 0xF0, 0x90, 0x90], b'A'),
    (&[0x80, 0x80, 0x80, 0x80, 0xF0], b'L'),
    (&[0x90, 0xD0, 0xB0, 0x90, 0x90], b'N'),
    (&[0xF0, 0x40, 0x40, 0x40, 0x40], b'T'),
    (&[0x70, 0x80, 0x60, 0x10, 0xE0], b'S'),
    (&[0x70, 0x80, 0x80, 0x80, 0x70], b'C'),
    // Port status directions
    (&[0x10, 0x20, 0x40, 0x20, 0x10], b'<'),
    (&[0x40, 0x20, 0x10, 0x20, 0x40], b'>'),
    (&[0x60, 0x90, 0x00, 0x00, 0x00], b'^'),
    (&[0x00, 0x90, 0x90, 0x90, 0x60], b'v'),
];

const GLYPH_W: usize = 4;
const GLYPH_H: usize = 5;

const TEXT: [u8; 3] = [255, 255, 255];
const HIGHLIGHT: [u8; 3] = [255, 200, 0];

fn glyph_for(ch: u8) -> &'static [u8; 5] {
    for &(data, c) in GLYPHS {
        if c == ch {
            return data;
        }
    }
    // fallback: space
    &[0x00, 0x00, 0x00, 0x00, 0x00]
}

/// Draw text onto an RGB24 framebuffer with its top-left corner at (x0, y0).
/// Bytes with the high bit set are drawn in the highlight colour.
pub fn draw_text(buffer: &mut [u8], width: usize, x0: usize, y0: usize, text: &[u8]) {
    for (ci, &byte) in text.iter().enumerate() {
        let color = if byte & 0x80 != 0 { HIGHLIGHT } else { TEXT };
        let glyph = glyph_for(byte & 0x7F);
        let gx = x0 + ci * (GLYPH_W + 1);

        for (row, &bits) in glyph.iter().enumerate() {
            let py = y0 + row;
            for col in 0..GLYPH_W {
                if bits & (0x80 >> col) != 0 {
                    let px = gx + col;
                    if px >= width {
                        continue;
                    }
                    let offset = (py * width + px) * 3;
                    if offset + 2 < buffer.len() {
                        buffer[offset..offset + 3].copy_from_slice(&color);
                    }
                }
            }
        }
    }
}

/// Draw an FPS string (e.g. "49.9 PAL") at the top-left corner.
pub fn draw_fps(buffer: &mut [u8], width: usize, text: &str) {
    draw_text(buffer, width, 2, 2, text.as_bytes());
}

/// "1:<^> 2:   " style line for the given port status strings.
pub fn status_line(ports: &[[u8; 3]]) -> Vec<u8> {
    let mut line = Vec::with_capacity(ports.len() * 6);
    for (port, status) in ports.iter().enumerate() {
        if port > 0 {
            line.push(b' ');
        }
        line.push(b'1' + port as u8);
        line.push(b':');
        line.extend_from_slice(status);
    }
    line
}

/// Draw the port status line below the FPS text.
pub fn draw_ports(buffer: &mut [u8], width: usize, ports: &[[u8; 3]]) {
    draw_text(buffer, width, 2, 3 + GLYPH_H, &status_line(ports));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(buffer: &[u8], width: usize, x: usize, y: usize) -> [u8; 3] {
        let offset = (y * width + x) * 3;
        [buffer[offset], buffer[offset + 1], buffer[offset + 2]]
    }

    #[test]
    fn status_line_layout() {
        let line = status_line(&[*b"<^ ", *b"   "]);
        assert_eq!(line, b"1:<^  2:   ".to_vec());
    }

    #[test]
    fn digit_is_drawn_in_text_colour() {
        let width = 16;
        let mut buffer = vec![0u8; width * 8 * 3];
        draw_text(&mut buffer, width, 0, 0, b"1");
        // '1' top row is 0x20: only column 2 lit.
        assert_eq!(pixel(&buffer, width, 2, 0), TEXT);
        assert_eq!(pixel(&buffer, width, 1, 0), [0, 0, 0]);
    }

    #[test]
    fn high_bit_is_highlighted() {
        let width = 16;
        let mut buffer = vec![0u8; width * 8 * 3];
        draw_text(&mut buffer, width, 0, 0, &[b'1' | 0x80]);
        assert_eq!(pixel(&buffer, width, 2, 0), HIGHLIGHT);
    }

    #[test]
    fn text_is_clipped_at_the_edge() {
        let width = 6;
        let mut buffer = vec![0u8; width * 6 * 3];
        draw_text(&mut buffer, width, 4, 0, b"1");
        // Row 1 of '1' lights glyph columns 1 and 2 (x=5 and x=6).
        assert_eq!(pixel(&buffer, width, 5, 1), TEXT);
        // Nothing past the right edge wraps onto the next row.
        assert_eq!(pixel(&buffer, width, 0, 1), [0, 0, 0]);
        assert_eq!(pixel(&buffer, width, 0, 2), [0, 0, 0]);
    }
}
