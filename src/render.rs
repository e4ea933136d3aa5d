//! Text render adapter
//!
//! Rasterizes a [`FrameSnapshot`] into a character grid by sampling the centre
//! of each cell. Used by the headless driver and handy in test failures.

use crate::sim::{FrameSnapshot, Renderer, RunPhase};

const PLAYER_CELL: char = '@';
const OBSTACLE_CELL: char = '#';
const EMPTY_CELL: char = ' ';

/// Renders frames to a fixed-size block of text
#[derive(Debug, Clone)]
pub struct TextRenderer {
    cols: usize,
    rows: usize,
    text: String,
    frames: u64,
}

impl TextRenderer {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
            text: String::new(),
            frames: 0,
        }
    }

    /// Text of the most recently rendered frame
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn cell(&self, frame: &FrameSnapshot, col: usize, row: usize) -> char {
        let x = (col as f32 + 0.5) * frame.width / self.cols as f32;
        let y = (row as f32 + 0.5) * frame.height / self.rows as f32;

        if frame.player.rect.contains(x, y) {
            return PLAYER_CELL;
        }
        let blocked = frame
            .obstacles
            .iter()
            .any(|o| o.top_rect().contains(x, y) || o.bottom_rect().contains(x, y));
        if blocked { OBSTACLE_CELL } else { EMPTY_CELL }
    }

    fn status_line(frame: &FrameSnapshot) -> String {
        let phase = match frame.phase {
            RunPhase::Ready => "READY".to_string(),
            RunPhase::Running => "RUNNING".to_string(),
            RunPhase::Ended => match frame.crash {
                Some(cause) => format!("GAME OVER ({cause:?})"),
                None => "GAME OVER".to_string(),
            },
        };
        format!(
            "Score: {}  Best: {}  Frame: {}  {}",
            frame.score, frame.best_score, frame.frame, phase
        )
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(40, 30)
    }
}

impl Renderer for TextRenderer {
    fn render(&mut self, frame: &FrameSnapshot) {
        let border = format!("+{}+", "-".repeat(self.cols));
        let mut out = String::with_capacity((self.cols + 3) * (self.rows + 3));

        out.push_str(&Self::status_line(frame));
        out.push('\n');
        out.push_str(&border);
        out.push('\n');
        for row in 0..self.rows {
            out.push('|');
            for col in 0..self.cols {
                out.push(self.cell(frame, col, row));
            }
            out.push_str("|\n");
        }
        out.push_str(&border);

        self.text = out;
        self.frames += 1;
    }
}
