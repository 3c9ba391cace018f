use crate::lang::Line;

/// The executable lines of a source file, in file order.
///
/// Blank lines and comments are dropped but every kept line remembers its
/// line number in the file for diagnostics.
#[derive(Debug, Clone, Default)]
pub struct Listing {
    lines: Vec<Line>,
}

impl Listing {
    pub fn from_source(source: &str) -> Listing {
        let lines = source
            .lines()
            .enumerate()
            .filter_map(|(index, line)| Line::from_str(index + 1, line))
            .collect();
        Listing { lines }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<Line> {
        self.lines
    }
}
