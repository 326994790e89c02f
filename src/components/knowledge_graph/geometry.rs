#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance(self, other: Point) -> f64 {
		(other.x - self.x).hypot(other.y - self.y)
	}
}

/// Straight edge between two node centres, ready to draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeGeometry {
	pub start: Point,
	/// Target centre pulled back by the node radius.
	pub end: Point,
	pub arrow: [Point; 3],
	pub label_at: Point,
}

/// Pull `to` back towards `from` by `radius` along the line.
pub fn shorten(from: Point, to: Point, radius: f64) -> (Point, f64) {
	let angle = (to.y - from.y).atan2(to.x - from.x);
	(
		Point::new(to.x - radius * angle.cos(), to.y - radius * angle.sin()),
		angle,
	)
}

/// Triangle with its tip at `tip`, sides at `angle ± spread`.
pub fn arrowhead(tip: Point, angle: f64, length: f64, spread: f64) -> [Point; 3] {
	[
		tip,
		Point::new(
			tip.x - length * (angle - spread).cos(),
			tip.y - length * (angle - spread).sin(),
		),
		Point::new(
			tip.x - length * (angle + spread).cos(),
			tip.y - length * (angle + spread).sin(),
		),
	]
}

/// Midpoint pushed sideways; even link indices go one way, odd the other.
pub fn label_anchor(from: Point, to: Point, index: usize, offset: f64) -> Point {
	let angle = (to.y - from.y).atan2(to.x - from.x);
	let side = if index % 2 == 0 { 1.0 } else { -1.0 };
	Point::new(
		(from.x + to.x) / 2.0 - side * offset * angle.sin(),
		(from.y + to.y) / 2.0 + side * offset * angle.cos(),
	)
}

/// A self-loop has zero length; `atan2(0, 0)` is 0, so it points right.
pub fn edge(
	from: Point,
	to: Point,
	index: usize,
	radius: f64,
	arrow_length: f64,
	arrow_spread: f64,
	label_offset: f64,
) -> EdgeGeometry {
	let (end, angle) = shorten(from, to, radius);
	EdgeGeometry {
		start: from,
		end,
		arrow: arrowhead(end, angle, arrow_length, arrow_spread),
		label_at: label_anchor(from, to, index, label_offset),
	}
}

/// Font size that stays the same on screen at zoom `k`.
pub fn scaled_font(base_px: f64, k: f64) -> f64 {
	base_px / k.max(f64::EPSILON)
}
