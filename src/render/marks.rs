use crate::layout::Placement;

/// A straight stroke in millimetres, bottom-left page origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: (f64, f64),
    pub to: (f64, f64),
}

/// Two ticks per card corner, each pointing away from the card.
pub fn cut_mark_segments(placement: &Placement, length_mm: f64) -> Vec<Segment> {
    let left = placement.x_mm;
    let right = placement.x_mm + placement.width_mm;
    let bottom = placement.y_mm;
    let top = placement.y_mm + placement.height_mm;

    let corners = [
        (left, bottom, -1.0, -1.0),
        (right, bottom, 1.0, -1.0),
        (left, top, -1.0, 1.0),
        (right, top, 1.0, 1.0),
    ];

    corners
        .iter()
        .flat_map(|&(x, y, dx, dy)| {
            [
                Segment {
                    from: (x, y),
                    to: (x + dx * length_mm, y),
                },
                Segment {
                    from: (x, y),
                    to: (x, y + dy * length_mm),
                },
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> Placement {
        Placement {
            column: 0,
            row: 0,
            x_mm: 10.0,
            y_mm: 20.0,
            width_mm: 63.0,
            height_mm: 88.0,
        }
    }

    #[test]
    fn eight_ticks_per_card() {
        assert_eq!(cut_mark_segments(&card(), 3.0).len(), 8);
    }

    #[test]
    fn ticks_start_at_corners_and_stay_outside_the_card() {
        let card = card();
        let inside = |(x, y): (f64, f64)| {
            x > card.x_mm
                && x < card.x_mm + card.width_mm
                && y > card.y_mm
                && y < card.y_mm + card.height_mm
        };

        for segment in cut_mark_segments(&card, 3.0) {
            let (fx, fy) = segment.from;
            assert!(fx == 10.0 || fx == 73.0);
            assert!(fy == 20.0 || fy == 108.0);
            assert!(!inside(segment.to));
            let length = ((segment.to.0 - fx).powi(2) + (segment.to.1 - fy).powi(2)).sqrt();
            assert!((length - 3.0).abs() < 1e-9);
        }
    }
}
