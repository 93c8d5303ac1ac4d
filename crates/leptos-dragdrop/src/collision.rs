//! Collision Detection
//!
//! Maps a pointer position (and the dragged element's rectangle) onto the
//! droppable rectangles under it. Strategies are tried in order and the
//! first one yielding any candidate wins:
//! 1. pointer containment
//! 2. rectangle intersection
//! 3. closest corners

/// Viewport coordinate
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Axis-aligned rectangle in viewport coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Zero-sized rectangle at a point
    pub fn at(point: Point) -> Self {
        Self::new(point.x, point.y, 0.0, 0.0)
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Top-left, top-right, bottom-left, bottom-right
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left, self.top),
            Point::new(self.right(), self.top),
            Point::new(self.left, self.bottom()),
            Point::new(self.right(), self.bottom()),
        ]
    }

    /// Edges inclusive
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right() && p.y >= self.top && p.y <= self.bottom()
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.left + dx, self.top + dy, self.width, self.height)
    }

    pub fn intersection_area(&self, other: &Rect) -> f64 {
        let w = self.right().min(other.right()) - self.left.max(other.left);
        let h = self.bottom().min(other.bottom()) - self.top.max(other.top);
        if w > 0.0 && h > 0.0 {
            w * h
        } else {
            0.0
        }
    }
}

/// A registered drop zone
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Droppable<K> {
    pub key: K,
    pub rect: Rect,
}

/// Candidate produced by a strategy. Lower score is better except for
/// rectangle intersection, where the list is already sorted best-first.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Collision<K> {
    pub key: K,
    pub rect: Rect,
    pub score: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    PointerWithin,
    RectIntersection,
    ClosestCorners,
}

/// Winning strategy plus its candidates, best first
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution<K> {
    pub strategy: Strategy,
    pub collisions: Vec<Collision<K>>,
}

impl<K: Copy> Resolution<K> {
    pub fn best(&self) -> Option<Collision<K>> {
        self.collisions.first().copied()
    }
}

fn mean_corner_distance(point: Point, rect: &Rect) -> f64 {
    rect.corners().iter().map(|c| c.distance(&point)).sum::<f64>() / 4.0
}

/// Droppables whose rectangle contains the pointer, nearest corners first
pub fn pointer_within<K: Copy>(pointer: Point, droppables: &[Droppable<K>]) -> Vec<Collision<K>> {
    let mut hits: Vec<_> = droppables
        .iter()
        .filter(|d| d.rect.contains(pointer))
        .map(|d| Collision {
            key: d.key,
            rect: d.rect,
            score: mean_corner_distance(pointer, &d.rect),
        })
        .collect();
    hits.sort_by(|a, b| a.score.total_cmp(&b.score));
    hits
}

/// Droppables overlapping the active rectangle, largest overlap ratio first.
/// The score is the intersection-over-union ratio.
pub fn rect_intersection<K: Copy>(active: &Rect, droppables: &[Droppable<K>]) -> Vec<Collision<K>> {
    let mut hits: Vec<_> = droppables
        .iter()
        .filter_map(|d| {
            let inter = active.intersection_area(&d.rect);
            if inter <= 0.0 {
                return None;
            }
            let union = active.area() + d.rect.area() - inter;
            Some(Collision {
                key: d.key,
                rect: d.rect,
                score: inter / union,
            })
        })
        .collect();
    hits.sort_by(|a, b| b.score.total_cmp(&a.score));
    hits
}

/// Every droppable, ranked by mean distance between matching corners
pub fn closest_corners<K: Copy>(active: &Rect, droppables: &[Droppable<K>]) -> Vec<Collision<K>> {
    let active_corners = active.corners();
    let mut hits: Vec<_> = droppables
        .iter()
        .map(|d| {
            let score = active_corners
                .iter()
                .zip(d.rect.corners().iter())
                .map(|(a, b)| a.distance(b))
                .sum::<f64>()
                / 4.0;
            Collision { key: d.key, rect: d.rect, score }
        })
        .collect();
    hits.sort_by(|a, b| a.score.total_cmp(&b.score));
    hits
}

/// Run the strategies in priority order. Without a known active rectangle a
/// zero-sized one at the pointer stands in.
pub fn resolve<K: Copy>(
    pointer: Point,
    active: Option<Rect>,
    droppables: &[Droppable<K>],
) -> Option<Resolution<K>> {
    let within = pointer_within(pointer, droppables);
    if !within.is_empty() {
        return Some(Resolution { strategy: Strategy::PointerWithin, collisions: within });
    }

    let active = active.unwrap_or_else(|| Rect::at(pointer));
    let overlapping = rect_intersection(&active, droppables);
    if !overlapping.is_empty() {
        return Some(Resolution { strategy: Strategy::RectIntersection, collisions: overlapping });
    }

    let nearest = closest_corners(&active, droppables);
    if !nearest.is_empty() {
        return Some(Resolution { strategy: Strategy::ClosestCorners, collisions: nearest });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(key: u32, left: f64, top: f64, width: f64, height: f64) -> Droppable<u32> {
        Droppable { key, rect: Rect::new(left, top, width, height) }
    }

    #[test]
    fn test_pointer_containment_wins() {
        // column 1 holds card 10; pointer is over the card
        let zones = vec![zone(1, 0.0, 0.0, 200.0, 600.0), zone(10, 10.0, 10.0, 180.0, 60.0)];
        let res = resolve(Point::new(50.0, 40.0), None, &zones).unwrap();

        assert_eq!(res.strategy, Strategy::PointerWithin);
        assert_eq!(res.collisions.len(), 2);
        // the card's corners are closer than the column's
        assert_eq!(res.best().unwrap().key, 10);
    }

    #[test]
    fn test_falls_back_to_intersection() {
        let zones = vec![zone(1, 0.0, 0.0, 100.0, 100.0), zone(2, 300.0, 0.0, 100.0, 100.0)];
        // pointer in the gutter, dragged card still overlaps zone 1
        let active = Rect::new(60.0, 10.0, 100.0, 50.0);
        let res = resolve(Point::new(150.0, 30.0), Some(active), &zones).unwrap();

        assert_eq!(res.strategy, Strategy::RectIntersection);
        assert_eq!(res.collisions.len(), 1);
        assert_eq!(res.best().unwrap().key, 1);
    }

    #[test]
    fn test_falls_back_to_closest_corners() {
        let zones = vec![zone(1, 0.0, 0.0, 100.0, 100.0), zone(2, 500.0, 0.0, 100.0, 100.0)];
        let active = Rect::new(380.0, 0.0, 100.0, 100.0);
        let res = resolve(Point::new(430.0, 50.0), Some(active), &zones).unwrap();

        assert_eq!(res.strategy, Strategy::ClosestCorners);
        assert_eq!(res.best().unwrap().key, 2);
        assert_eq!(res.collisions.len(), 2);
    }

    #[test]
    fn test_no_droppables() {
        let zones: Vec<Droppable<u32>> = Vec::new();
        assert!(resolve(Point::new(0.0, 0.0), None, &zones).is_none());
    }

    #[test]
    fn test_intersection_ranked_by_ratio() {
        let zones = vec![zone(1, 0.0, 0.0, 100.0, 100.0), zone(2, 90.0, 0.0, 100.0, 100.0)];
        let active = Rect::new(50.0, 0.0, 100.0, 100.0);
        let hits = rect_intersection(&active, &zones);

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].key, 2);
        assert!(hits[0].score > hits[1].score);
    }

    #[test]
    fn test_rect_geometry() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.center(), Point::new(25.0, 40.0));
        assert!(r.contains(Point::new(10.0, 20.0)));
        assert!(r.contains(Point::new(40.0, 60.0)));
        assert!(!r.contains(Point::new(40.1, 60.0)));
        assert_eq!(r.intersection_area(&Rect::new(40.0, 20.0, 10.0, 10.0)), 0.0);
        assert_eq!(r.translate(5.0, -5.0).top, 15.0);
    }
}
