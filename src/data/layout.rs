use std::ops::Range;

// ---------------------------------------------------------------------------
// Grid sizing policy
// ---------------------------------------------------------------------------

/// How the side of each figure's square grid is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum GridSizing {
    /// `ceil(sqrt(total_groups / figures))`, shared by every figure.
    #[default]
    Legacy,
    /// `ceil(sqrt(chunk_len))`, computed per figure from its own chunk.
    PerFigure,
}

/// Split `group_count` items into `figures` contiguous ranges of
/// `group_count / figures` items; the last range runs to the end.
pub fn partition(group_count: usize, figures: usize) -> Vec<Range<usize>> {
    if figures == 0 {
        return Vec::new();
    }
    let step = group_count / figures;
    (0..figures)
        .map(|f| {
            let end = if f + 1 < figures { (f + 1) * step } else { group_count };
            f * step..end
        })
        .collect()
}

/// Side of the shared legacy grid.
pub fn legacy_side(group_count: usize, figures: usize) -> usize {
    if figures == 0 {
        return 0;
    }
    (group_count as f64 / figures as f64).sqrt().ceil() as usize
}

fn square_side(len: usize) -> usize {
    (len as f64).sqrt().ceil() as usize
}

// ---------------------------------------------------------------------------
// Grid<T> – fixed rows × cols arena of cells
// ---------------------------------------------------------------------------

/// A rectangular arena sized once, addressed by `(row, col)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<Option<T>>,
}

impl<T> Grid<T> {
    pub fn new(rows: usize, cols: usize) -> Self {
        Grid {
            rows,
            cols,
            cells: (0..rows * cols).map(|_| None).collect(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.offset(row, col).and_then(|i| self.cells[i].as_ref())
    }

    /// Store `value` at `(row, col)`. Returns it back if the cell is out of range.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<(), T> {
        match self.offset(row, col) {
            Some(i) => {
                self.cells[i] = Some(value);
                Ok(())
            }
            None => Err(value),
        }
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Occupied cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &T)> {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, c)| c.as_ref().map(|v| ((i / cols, i % cols), v)))
    }

    fn offset(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }
}

// ---------------------------------------------------------------------------
// FigureLayout – which group goes into which cell of which figure
// ---------------------------------------------------------------------------

/// One output figure: a grid whose cells hold indices into the group list.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureLayout {
    pub index: usize,
    pub groups: Range<usize>,
    pub cells: Grid<usize>,
}

/// Lay `group_count` groups out over `figures` figures.
///
/// Within a figure the n-th group lands at `(n / side, n % side)`. A legacy
/// grid that is too small for the final chunk grows extra rows.
pub fn layout_figures(
    group_count: usize,
    figures: usize,
    sizing: GridSizing,
) -> Vec<FigureLayout> {
    let shared = legacy_side(group_count, figures);

    partition(group_count, figures)
        .into_iter()
        .enumerate()
        .map(|(index, groups)| {
            let len = groups.len();
            let side = match sizing {
                GridSizing::Legacy => shared,
                GridSizing::PerFigure => square_side(len),
            };
            let cols = if len > 0 { side.max(1) } else { side };
            let mut rows = side;
            if cols > 0 && rows * cols < len {
                rows = len.div_ceil(cols);
                log::warn!(
                    "Figure {index}: {len} groups do not fit a {side}x{side} grid, \
                     using {rows}x{cols}"
                );
            }

            let mut cells = Grid::new(rows, cols);
            for (local, group) in groups.clone().enumerate() {
                if let Err(group) = cells.set(local / cols, local % cols, group) {
                    log::error!("Figure {index}: no cell for group {group} at local index {local}");
                    debug_assert!(false, "grid {rows}x{cols} too small for {len} groups");
                }
            }
            log::debug!(
                "Figure {index}: {} of {} cells used",
                cells.occupied(),
                rows * cols
            );
            for ((row, col), group) in cells.iter() {
                log::trace!("figure {index}: group {group} at ({row}, {col})");
            }
            FigureLayout {
                index,
                groups,
                cells,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// FigureSpacing – margins and gaps as fractions of the figure
// ---------------------------------------------------------------------------

/// Subplot spacing in figure-relative units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureSpacing {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    /// Vertical gap as a fraction of the cell height.
    pub hspace: f32,
    /// Horizontal gap as a fraction of the cell width.
    pub wspace: f32,
}

impl Default for FigureSpacing {
    fn default() -> Self {
        FigureSpacing {
            left: 0.03,
            right: 0.98,
            top: 0.97,
            bottom: 0.04,
            hspace: 0.4,
            wspace: 0.2,
        }
    }
}

/// Pixel geometry of one figure's cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellGeometry {
    pub margin_left: f32,
    pub margin_top: f32,
    pub cell_width: f32,
    pub cell_height: f32,
    pub gap_x: f32,
    pub gap_y: f32,
}

impl FigureSpacing {
    /// Split a `width × height` figure into `rows × cols` cells.
    pub fn geometry(&self, width: f32, height: f32, rows: usize, cols: usize) -> CellGeometry {
        let inner_w = (self.right - self.left) * width;
        let inner_h = (self.top - self.bottom) * height;
        let cell_width = if cols > 0 {
            inner_w / (cols as f32 + self.wspace * (cols as f32 - 1.0))
        } else {
            0.0
        };
        let cell_height = if rows > 0 {
            inner_h / (rows as f32 + self.hspace * (rows as f32 - 1.0))
        } else {
            0.0
        };
        CellGeometry {
            margin_left: self.left * width,
            margin_top: (1.0 - self.top) * height,
            cell_width,
            cell_height,
            gap_x: self.wspace * cell_width,
            gap_y: self.hspace * cell_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_last_chunk_absorbs_remainder() {
        let chunks = partition(10, 3);
        let sizes: Vec<usize> = chunks.iter().map(|r| r.len()).collect();
        assert_eq!(sizes, vec![3, 3, 4]);
        assert_eq!(chunks[2], 6..10);
    }

    #[test]
    fn test_more_figures_than_groups() {
        let sizes: Vec<usize> = partition(2, 3).iter().map(|r| r.len()).collect();
        assert_eq!(sizes, vec![0, 0, 2]);
    }

    #[test]
    fn test_single_figure_side_is_ceil_sqrt() {
        for (groups, side) in [(1, 1), (2, 2), (4, 2), (5, 3), (9, 3), (10, 4)] {
            let figs = layout_figures(groups, 1, GridSizing::Legacy);
            assert_eq!(figs.len(), 1);
            assert_eq!(figs[0].cells.rows(), side, "groups = {groups}");
            assert_eq!(figs[0].cells.cols(), side, "groups = {groups}");
        }
    }

    #[test]
    fn test_cells_are_row_major_by_local_index() {
        let figs = layout_figures(10, 2, GridSizing::Legacy);
        // side = ceil(sqrt(5)) = 3
        let second = &figs[1];
        assert_eq!(second.groups, 5..10);
        assert_eq!(second.cells.get(0, 0), Some(&5));
        assert_eq!(second.cells.get(0, 2), Some(&7));
        assert_eq!(second.cells.get(1, 0), Some(&8));
        assert_eq!(second.cells.get(1, 1), Some(&9));
        assert_eq!(second.cells.get(2, 0), None);
    }

    #[test]
    fn test_two_groups_one_figure_is_two_by_two() {
        let figs = layout_figures(2, 1, GridSizing::Legacy);
        let grid = &figs[0].cells;
        assert_eq!((grid.rows(), grid.cols()), (2, 2));
        assert_eq!(grid.occupied(), 2);
        assert_eq!(grid.get(0, 1), Some(&1));
    }

    #[test]
    fn test_legacy_grid_grows_rows_when_too_small() {
        // 9 groups over 5 figures: chunks 1,1,1,1,5 and a shared side of 2
        let figs = layout_figures(9, 5, GridSizing::Legacy);
        assert_eq!(figs[0].cells.rows(), 2);
        let last = &figs[4].cells;
        assert_eq!(last.cols(), 2);
        assert_eq!(last.rows(), 3);
        assert_eq!(last.occupied(), 5);
        assert_eq!(last.get(2, 0), Some(&8));
    }

    #[test]
    fn test_every_group_gets_a_cell() {
        for sizing in [GridSizing::Legacy, GridSizing::PerFigure] {
            for groups in 0..40 {
                for figures in 1..=groups.max(1) {
                    let placed: usize = layout_figures(groups, figures, sizing)
                        .iter()
                        .map(|f| f.cells.occupied())
                        .sum();
                    assert_eq!(placed, groups, "{groups} groups over {figures} figures");
                }
            }
        }
    }

    #[test]
    fn test_per_figure_sizing_uses_chunk_len() {
        let figs = layout_figures(10, 3, GridSizing::PerFigure);
        let sides: Vec<usize> = figs.iter().map(|f| f.cells.cols()).collect();
        assert_eq!(sides, vec![2, 2, 2]);
        let figs = layout_figures(9, 5, GridSizing::PerFigure);
        assert_eq!(figs[0].cells.rows(), 1);
        assert_eq!(figs[4].cells.rows(), 3);
    }

    #[test]
    fn test_no_groups_gives_empty_grid() {
        let figs = layout_figures(0, 1, GridSizing::Legacy);
        assert_eq!(figs[0].cells.rows(), 0);
        assert_eq!(figs[0].cells.occupied(), 0);
    }

    #[test]
    fn test_grid_rejects_out_of_range_cell() {
        let mut grid = Grid::new(1, 2);
        assert_eq!(grid.set(1, 0, "x"), Err("x"));
        assert!(grid.set(0, 1, "y").is_ok());
        let cells: Vec<_> = grid.iter().collect();
        assert_eq!(cells, vec![((0, 1), &"y")]);
    }

    #[test]
    fn test_spacing_fills_inner_area() {
        let spacing = FigureSpacing::default();
        let g = spacing.geometry(1000.0, 1000.0, 2, 3);
        let used_w = 3.0 * g.cell_width + 2.0 * g.gap_x;
        let used_h = 2.0 * g.cell_height + g.gap_y;
        assert!((used_w - 950.0).abs() < 1e-3);
        assert!((used_h - 930.0).abs() < 1e-3);
        assert!((g.margin_top - 30.0).abs() < 1e-3);
    }
}
