//! Compaction Re-layouter: fallback grid layout built from room areas alone.
//!
//! Original positions are discarded. Rooms are packed row-major into a near-square
//! grid of uniform-height bands. Within a band every room first gets
//! `MIN_ROOM_WIDTH`, and the rest of the band is shared out in proportion to area.
//! Every band spans the full interior width, so the result is overlap-free and
//! connected by construction.

use crate::layout::model::{interior_size, round2, Room, PADDING};

/// Width reserved for each room in a band before area weights apply.
pub const MIN_ROOM_WIDTH: f64 = 1.0;

/// Grid dimensions `(columns, rows)` for `count` rooms.
pub fn grid_shape(count: usize) -> (usize, usize) {
    if count == 0 {
        return (1, 0);
    }
    let columns = ((count as f64).sqrt().ceil() as usize).max(1);
    let rows = count.div_ceil(columns);
    (columns, rows)
}

/// Re-lays `rooms` out as a connected grid. Names and order are preserved.
pub fn compact(rooms: &[Room]) -> Vec<Room> {
    let (columns, rows) = grid_shape(rooms.len());
    if rows == 0 {
        return Vec::new();
    }

    let (usable_width, usable_height) = interior_size();
    let row_height = usable_height / rows as f64;
    let mut relaid = Vec::with_capacity(rooms.len());

    for (row, row_rooms) in rooms.chunks(columns).enumerate() {
        let weight_sum: f64 = row_rooms.iter().map(Room::weight).sum();
        let min_width = MIN_ROOM_WIDTH.min(usable_width / row_rooms.len() as f64);
        let shared_width = usable_width - min_width * row_rooms.len() as f64;
        let y = PADDING + row as f64 * row_height;
        let mut cursor_x = PADDING;

        for (index, room) in row_rooms.iter().enumerate() {
            // The last room absorbs drift so the row always ends on the right edge.
            let width = if index == row_rooms.len() - 1 {
                PADDING + usable_width - cursor_x
            } else {
                min_width + shared_width * room.weight() / weight_sum
            };

            relaid.push(Room {
                name: room.name.clone(),
                x: round2(cursor_x),
                y: round2(y),
                width: round2(width),
                height: round2(row_height.max(1.0)),
            });

            cursor_x += width;
        }
    }

    relaid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::model::{CANVAS_HEIGHT, CANVAS_WIDTH};
    use crate::layout::topology::{has_overlap, is_single_cluster};

    fn rooms_with_sizes(sizes: &[(f64, f64)]) -> Vec<Room> {
        sizes
            .iter()
            .enumerate()
            .map(|(i, &(width, height))| Room {
                name: format!("Room {}", i + 1),
                x: (i * 7) as f64,
                y: (i * 3) as f64,
                width,
                height,
            })
            .collect()
    }

    #[test]
    fn test_grid_shape() {
        assert_eq!(grid_shape(0), (1, 0));
        assert_eq!(grid_shape(1), (1, 1));
        assert_eq!(grid_shape(2), (2, 1));
        assert_eq!(grid_shape(3), (2, 2));
        assert_eq!(grid_shape(5), (3, 2));
        assert_eq!(grid_shape(9), (3, 3));
        assert_eq!(grid_shape(10), (4, 3));
    }

    #[test]
    fn test_empty_input() {
        assert!(compact(&[]).is_empty());
    }

    #[test]
    fn test_single_room_fills_interior() {
        let out = compact(&rooms_with_sizes(&[(3.0, 4.0)]));
        assert_eq!(out.len(), 1);
        assert_eq!((out[0].x, out[0].y), (PADDING, PADDING));
        assert_eq!(out[0].width, CANVAS_WIDTH - 2.0 * PADDING);
        assert_eq!(out[0].height, CANVAS_HEIGHT - 2.0 * PADDING);
    }

    #[test]
    fn test_widths_follow_area_weights() {
        // 1 unit each, then weights 100 and 300 split the remaining 918 1:3.
        let out = compact(&rooms_with_sizes(&[(10.0, 10.0), (30.0, 10.0)]));
        assert_eq!(out[0].width, 230.5);
        assert_eq!(out[1].x, 270.5);
        assert_eq!(out[1].width, 689.5);
        assert_eq!(out[0].y, out[1].y);
    }

    #[test]
    fn test_tiny_rooms_weigh_at_least_one() {
        let out = compact(&rooms_with_sizes(&[(0.1, 0.1), (0.5, 0.5)]));
        assert_eq!(out[0].width, 460.0);
        assert_eq!(out[1].width, 460.0);
    }

    #[test]
    fn test_rows_span_full_width_and_share_boundaries() {
        let sizes: Vec<(f64, f64)> = (1..=7).map(|i| (i as f64 * 3.0, 11.0)).collect();
        let out = compact(&rooms_with_sizes(&sizes));
        let (columns, rows) = grid_shape(out.len());
        let row_height = (CANVAS_HEIGHT - 2.0 * PADDING) / rows as f64;

        for (row, chunk) in out.chunks(columns).enumerate() {
            assert!((chunk[0].x - PADDING).abs() < 0.01);
            let last = chunk.last().unwrap();
            assert!((last.right() - (CANVAS_WIDTH - PADDING)).abs() < 0.02);
            for pair in chunk.windows(2) {
                assert!((pair[0].right() - pair[1].x).abs() < 0.02, "gap in row {row}");
            }
            for room in chunk {
                assert!((room.y - (PADDING + row as f64 * row_height)).abs() < 0.01);
            }
        }
    }

    #[test]
    fn test_disjoint_and_connected_for_many_sizes() {
        for n in 1..=30 {
            let sizes: Vec<(f64, f64)> = (0..n)
                .map(|i| (((i * 37) % 11 + 1) as f64 * 4.5, ((i * 13) % 7 + 1) as f64 * 3.0))
                .collect();
            let out = compact(&rooms_with_sizes(&sizes));
            assert_eq!(out.len(), n);
            assert!(!has_overlap(&out), "overlap with n = {n}");
            assert!(is_single_cluster(&out), "disconnected with n = {n}");
        }
    }

    #[test]
    fn test_skewed_weights_do_not_overlap() {
        let out = compact(&rooms_with_sizes(&[(1.0, 1.0), (1000.0, 1000.0)]));
        assert!(out[0].width >= MIN_ROOM_WIDTH);
        assert!(out[0].right() <= out[1].x + 0.01);
        assert!((out[1].right() - (CANVAS_WIDTH - PADDING)).abs() < 0.02);
        assert!(!has_overlap(&out));
        assert!(is_single_cluster(&out));
    }

    #[test]
    fn test_dominant_room_in_every_row_does_not_overlap() {
        // 30 rooms -> 6 columns; the first room of each row dwarfs its neighbours.
        let sizes: Vec<(f64, f64)> = (0..30)
            .map(|i| if i % 6 == 0 { (5000.0, 5000.0) } else { (0.5, 0.5) })
            .collect();
        let out = compact(&rooms_with_sizes(&sizes));
        for room in &out {
            assert!(room.width >= MIN_ROOM_WIDTH - 0.01, "{room:?}");
        }
        assert!(!has_overlap(&out));
        assert!(is_single_cluster(&out));
    }

    #[test]
    fn test_names_and_order_preserved() {
        let rooms = rooms_with_sizes(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
        let out = compact(&rooms);
        let names: Vec<&str> = out.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Room 1", "Room 2", "Room 3"]);
    }
}
