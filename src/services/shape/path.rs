// SVG path string builder

use crate::models::geometry::Point;

/// Format a coordinate for path data: at most two decimals, no `-0`.
pub fn fmt_coord(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{}", rounded)
}

/// Accumulates path commands separated by single spaces.
#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    commands: Vec<String>,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, point: Point) -> &mut Self {
        self.commands
            .push(format!("M {} {}", fmt_coord(point.x), fmt_coord(point.y)));
        self
    }

    pub fn line_to(&mut self, point: Point) -> &mut Self {
        self.commands
            .push(format!("L {} {}", fmt_coord(point.x), fmt_coord(point.y)));
        self
    }

    /// Circular arc of `radius`. `clockwise` selects sweep flag 1, used for
    /// convex corners of a clockwise outline; concave corners use 0.
    pub fn arc_to(&mut self, radius: f64, clockwise: bool, point: Point) -> &mut Self {
        let r = fmt_coord(radius);
        self.commands.push(format!(
            "A {} {} 0 0 {} {} {}",
            r,
            r,
            if clockwise { 1 } else { 0 },
            fmt_coord(point.x),
            fmt_coord(point.y)
        ));
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.commands.push("Z".to_string());
        self
    }

    /// Append every command of another builder.
    pub fn extend(&mut self, other: PathBuilder) -> &mut Self {
        self.commands.extend(other.commands);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn build(&self) -> String {
        self.commands.join(" ")
    }
}
