use super::types::{Boundary, Circle, Point, Rectangle, Workspace};

/// The reference arena: a 10 x 7 field with two circular and three
/// rectangular obstacles.
pub fn canonical_workspace() -> Workspace {
    Workspace {
        start: Point::new(1.0, 5.0),
        goal: Point::new(9.0, 1.0),
        bounds: Boundary {
            x_min: 0.0,
            x_max: 10.0,
            y_min: 0.0,
            y_max: 7.0,
        },
        circles: vec![
            Circle { x_center: 6.0, y_center: 2.0, radius: 0.9 },
            Circle { x_center: 4.5, y_center: 5.5, radius: 0.6 },
        ],
        rectangles: vec![
            Rectangle { x_center: 2.5, y_center: 2.0, width: 1.4, height: 1.4 },
            Rectangle { x_center: 4.0, y_center: 3.5, width: 1.0, height: 0.4 },
            Rectangle { x_center: 7.5, y_center: 4.0, width: 1.4, height: 1.0 },
        ],
    }
}
