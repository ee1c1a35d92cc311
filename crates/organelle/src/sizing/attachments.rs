//! Packing of attachment decorations around a glyph border.
//!
//! The border is cut into fixed-size slots along each side's usable length
//! (the side minus both corner radii). Attachments are shared between the
//! sides in proportion to their slot counts and laid out clockwise from the
//! top-left corner.

use organelle_core::geometry::{Point, Size};

/// Length of border reserved for one attachment.
pub const SLOT_SIZE: f32 = 24.0;

/// Whole slots fitting on a side of `length` with rounded corners.
pub fn side_capacity(length: f32, corner_radius: f32) -> usize {
    let usable = length - 2.0 * corner_radius;
    if usable <= 0.0 {
        0
    } else {
        (usable / SLOT_SIZE).floor() as usize
    }
}

/// Slot counts of the top, right, bottom and left sides.
pub fn side_capacities(size: Size, corner_radius: f32) -> [usize; 4] {
    let horizontal = side_capacity(size.width(), corner_radius);
    let vertical = side_capacity(size.height(), corner_radius);
    [horizontal, vertical, horizontal, vertical]
}

pub fn capacity(size: Size, corner_radius: f32) -> usize {
    side_capacities(size, corner_radius).iter().sum()
}

/// Grows `size` one slot of width at a time until `count` attachments fit.
///
/// The height follows the width through `ratio` but never shrinks.
pub fn grow_to_fit(size: Size, corner_radius: f32, ratio: f32, count: usize) -> Size {
    let mut size = size;
    while capacity(size, corner_radius) < count {
        let width = size.width() + SLOT_SIZE;
        let height = if ratio > 0.0 {
            size.height().max(width / ratio)
        } else {
            size.height()
        };
        size = Size::new(width, height);
    }
    size
}

/// Shares `count` attachments between sides proportionally to `capacities`,
/// by largest remainder. `count` must not exceed the total capacity.
pub fn distribute(count: usize, capacities: [usize; 4]) -> [usize; 4] {
    let total: usize = capacities.iter().sum();
    if total == 0 || count == 0 {
        return [0; 4];
    }
    let count = count.min(total);

    let mut shares = [0usize; 4];
    let mut remainders = [0usize; 4];
    for side in 0..4 {
        let exact = count * capacities[side];
        shares[side] = exact / total;
        remainders[side] = exact % total;
    }

    let mut left = count - shares.iter().sum::<usize>();
    let mut order: Vec<usize> = (0..4).collect();
    // Ties go to the longer side, then to the earlier one
    order.sort_by(|&a, &b| {
        remainders[b]
            .cmp(&remainders[a])
            .then(capacities[b].cmp(&capacities[a]))
    });
    for side in order {
        if left == 0 {
            break;
        }
        if shares[side] < capacities[side] && remainders[side] > 0 {
            shares[side] += 1;
            left -= 1;
        }
    }
    shares
}

/// Centers of `count` attachments on the border of a box at the origin.
///
/// Order: top row left to right, right column top to bottom, bottom row
/// right to left, left column bottom to top. Within a side the attachments
/// are spread evenly over its usable length.
pub fn slot_centers(size: Size, corner_radius: f32, count: usize) -> Vec<Point> {
    let shares = distribute(count, side_capacities(size, corner_radius));
    let (width, height) = (size.width(), size.height());

    let spread = |length: f32, n: usize| -> Vec<f32> {
        let usable = length - 2.0 * corner_radius;
        let step = usable / n as f32;
        (0..n)
            .map(|index| corner_radius + step * (index as f32 + 0.5))
            .collect()
    };

    let mut centers = Vec::with_capacity(count);
    centers.extend(spread(width, shares[0]).into_iter().map(|x| Point::new(x, 0.0)));
    centers.extend(spread(height, shares[1]).into_iter().map(|y| Point::new(width, y)));
    centers.extend(
        spread(width, shares[2])
            .into_iter()
            .rev()
            .map(|x| Point::new(x, height)),
    );
    centers.extend(
        spread(height, shares[3])
            .into_iter()
            .rev()
            .map(|y| Point::new(0.0, y)),
    );
    centers
}
