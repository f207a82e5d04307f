use std::io::Write;

use crate::error::Result;
use crate::geometry::Rect;
use crate::surface::ZonePatch;
use crate::width::display_width;

/// Painter runtime parameters.
#[derive(Debug, Clone, Default)]
pub struct PainterSettings {
    pub restore_cursor: Option<(u16, u16)>,
}

/// ANSI escape code painter writing zone patches to a terminal handle.
pub struct ZonePainter {
    settings: PainterSettings,
}

impl ZonePainter {
    pub fn new(settings: PainterSettings) -> Self {
        Self { settings }
    }

    pub fn with_default() -> Self {
        Self::new(PainterSettings::default())
    }

    pub fn settings_mut(&mut self) -> &mut PainterSettings {
        &mut self.settings
    }

    pub fn paint(&mut self, writer: &mut impl Write, patches: &[ZonePatch]) -> Result<()> {
        for patch in patches {
            paint_zone(writer, patch)?;
        }

        if let Some((row, col)) = self.settings.restore_cursor {
            write!(writer, "\x1b[{};{}H", row + 1, col + 1)?;
        }

        writer.flush()?;
        Ok(())
    }
}

fn paint_zone(writer: &mut impl Write, patch: &ZonePatch) -> Result<()> {
    let Rect {
        x,
        y,
        width,
        height,
    } = patch.rect;

    if width == 0 || height == 0 {
        return Ok(());
    }

    let mut lines = wrap_to_width(&patch.content, width);
    lines.truncate(height as usize);
    while lines.len() < height as usize {
        lines.push(String::new());
    }

    for (offset, line) in lines.iter_mut().enumerate() {
        pad_line(line, width);
        write!(writer, "\x1b[{};{}H", y + offset as u16 + 1, x + 1)?;
        write!(writer, "{}", line)?;
    }

    Ok(())
}

fn wrap_to_width(content: &str, width: u16) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for raw in content.split('\n') {
        if raw.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        for ch in raw.chars() {
            current.push(ch);
            if display_width(&current) as u16 > width {
                current.pop();
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                current.push(ch);
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

fn pad_line(line: &mut String, width: u16) {
    let mut display = display_width(line) as u16;
    while display < width {
        line.push(' ');
        display += 1;
    }

    if display > width {
        // A single glyph can overshoot a narrow zone; trim back down.
        while (display_width(line) as u16) > width {
            line.pop();
        }
        while (display_width(line) as u16) < width {
            line.push(' ');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_splits_at_width() {
        let lines = wrap_to_width("helloworld", 5);
        assert_eq!(lines, vec!["hello".to_string(), "world".to_string()]);
    }

    #[test]
    fn wrap_preserves_newlines() {
        let lines = wrap_to_width("a\n\nb", 5);
        assert_eq!(
            lines,
            vec!["a".to_string(), String::new(), "b".to_string()]
        );
    }

    #[test]
    fn pad_fills_to_width() {
        let mut line = "hi".to_string();
        pad_line(&mut line, 4);
        assert_eq!(line, "hi  ");
    }

    #[test]
    fn painter_writes_cursor_sequences() {
        let patch = ZonePatch {
            zone: "zone1".to_string(),
            rect: Rect::new(2, 3, 5, 2),
            content: "hi".to_string(),
        };

        let mut output = Vec::new();
        let mut painter = ZonePainter::with_default();
        painter.paint(&mut output, &[patch]).unwrap();

        let rendered = String::from_utf8(output).unwrap();
        assert!(rendered.contains("\u{1b}[4;3Hhi"));
        assert!(rendered.contains("\u{1b}[5;3H"));
    }

    #[test]
    fn painter_restores_cursor_when_asked() {
        let mut painter = ZonePainter::with_default();
        painter.settings_mut().restore_cursor = Some((0, 0));

        let mut output = Vec::new();
        painter.paint(&mut output, &[]).unwrap();

        let rendered = String::from_utf8(output).unwrap();
        assert!(rendered.contains("\u{1b}[1;1H"));
    }
}
