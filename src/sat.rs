#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

/// The table has one more row and column than the image it sums, with the
/// first row and column left at zero, so `table[y * table_width + x]` is the
/// number of set cells above and to the left of `(x, y)`.
pub fn table_len(width: u32, height: u32) -> usize {
    (width as usize + 1) * (height as usize + 1)
}

pub fn region_is_empty(table: &[u32], table_width: usize, at: Point, rect: Rect) -> bool {
    let (x, y) = (at.x as usize, at.y as usize);
    let (width, height) = (rect.width as usize, rect.height as usize);

    let tl = table[y * table_width + x];
    let tr = table[y * table_width + x + width];

    let bl = table[(y + height) * table_width + x];
    let br = table[(y + height) * table_width + x + width];

    tl as i64 + br as i64 - tr as i64 - bl as i64 == 0
}

/// Recomputes the table from `start_row` down. Rows above `start_row` must
/// already be up to date.
///
/// https://blog.demofox.org/2018/04/16/prefix-sums-and-summed-area-tables/
pub fn to_summed_area_table(cells: &[u8], width: usize, table: &mut [u32], start_row: usize) {
    let table_width = width + 1;

    cells
        .chunks_exact(width)
        .enumerate()
        .skip(start_row)
        .for_each(|(y, row)| {
            let (above, below) = table.split_at_mut((y + 1) * table_width);
            let prev_row = &above[y * table_width..];
            let out_row = &mut below[..table_width];

            let mut sum = 0;
            out_row[0] = 0;
            row.iter()
                .zip(prev_row.iter().skip(1))
                .zip(out_row.iter_mut().skip(1))
                .for_each(|((cell, prev_row_el), el)| {
                    sum += (*cell != 0) as u32;
                    *el = sum + prev_row_el;
                });
        });
}
