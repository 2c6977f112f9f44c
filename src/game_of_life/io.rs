//! Plain-text live-cell format: one `x,y` record per living cell

use super::{CellState, Grid};
use crate::error::{EngineError, EngineResult};
use anyhow::{Context, Result};
use itertools::Itertools;
use std::path::Path;

/// Render every living cell as an `x,y` line
pub fn export_live_cells(grid: &Grid) -> String {
    grid.live_cells()
        .into_iter()
        .map(|(x, y)| format!("{},{}\n", x, y))
        .join("")
}

/// Parse a single `x,y` record
fn parse_record(line_number: usize, line: &str) -> EngineResult<(i64, i64)> {
    let failure = |reason: String| EngineError::ParseFailure {
        line_number,
        line: line.to_string(),
        reason,
    };

    let (x, y) = line
        .split(',')
        .map(str::trim)
        .collect_tuple()
        .ok_or_else(|| failure("expected exactly two comma-separated values".to_string()))?;

    let x = x.parse::<i64>().map_err(|e| failure(format!("bad x coordinate: {}", e)))?;
    let y = y.parse::<i64>().map_err(|e| failure(format!("bad y coordinate: {}", e)))?;
    Ok((x, y))
}

/// Write every record in `content` alive, in order.
///
/// Import is additive: cells already alive stay alive. The first malformed
/// record aborts the import; records before it remain applied.
pub fn import_live_cells(grid: &mut Grid, content: &str) -> EngineResult<usize> {
    let mut applied = 0;
    for (i, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (x, y) = parse_record(i + 1, line).inspect_err(|e| {
            tracing::warn!(applied, error = %e, "live-cell import aborted");
        })?;
        grid.set(x, y, CellState::Alive);
        applied += 1;
    }
    Ok(applied)
}

/// Save the live cells of a grid to a text file
pub fn save_live_cells<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    let content = export_live_cells(grid);

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write live cells to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Import live cells from a text file into a grid
pub fn load_live_cells<P: AsRef<Path>>(grid: &mut Grid, path: P) -> Result<usize> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read live-cell file: {}", path.as_ref().display()))?;

    import_live_cells(grid, &content)
        .with_context(|| format!("Failed to import live cells from: {}", path.as_ref().display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::Pattern;
    use tempfile::tempdir;

    #[test]
    fn test_export_format() {
        let mut grid = Grid::new(5, 5);
        grid.set(1, 0, CellState::Alive);
        grid.set(4, 3, CellState::Alive);

        assert_eq!(export_live_cells(&grid), "1,0\n4,3\n");
        assert_eq!(export_live_cells(&Grid::new(3, 3)), "");
    }

    #[test]
    fn test_import_is_additive() {
        let mut grid = Grid::new(5, 5);
        grid.set(0, 0, CellState::Alive);

        let applied = import_live_cells(&mut grid, "2,2\n\n 3 , 4 \n").unwrap();

        assert_eq!(applied, 2);
        assert_eq!(grid.live_cells(), vec![(0, 0), (2, 2), (3, 4)]);
        assert!(grid.neighbor_cache_consistent());
    }

    #[test]
    fn test_import_clamps_out_of_range() {
        let mut grid = Grid::new(5, 5);
        import_live_cells(&mut grid, "-5,3\n10,10\n").unwrap();
        assert_eq!(grid.live_cells(), vec![(0, 3), (4, 4)]);
    }

    #[test]
    fn test_malformed_line_aborts_without_rollback() {
        let mut grid = Grid::new(5, 5);
        let err = import_live_cells(&mut grid, "1,1\n2;2\n3,3\n").unwrap_err();

        match err {
            EngineError::ParseFailure { line_number, line, .. } => {
                assert_eq!(line_number, 2);
                assert_eq!(line, "2;2");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(grid.live_cells(), vec![(1, 1)]);
    }

    #[test]
    fn test_import_rejects_bad_records() {
        for bad in ["1,2,3", "x,2", "4"] {
            let mut grid = Grid::new(5, 5);
            assert!(import_live_cells(&mut grid, bad).is_err(), "accepted {:?}", bad);
            assert!(grid.is_empty());
        }
    }

    #[test]
    fn test_round_trip() {
        let mut original = Grid::new(60, 60);
        Pattern::GliderGun.place(&mut original, (5, 5));

        let mut restored = Grid::new(60, 60);
        import_live_cells(&mut restored, &export_live_cells(&original)).unwrap();

        assert_eq!(restored.live_cells(), original.live_cells());
    }

    #[test]
    fn test_file_operations() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("nested/cells.txt");

        let mut grid = Grid::new(20, 20);
        Pattern::Glider.place(&mut grid, (2, 2));
        save_live_cells(&grid, &file_path).unwrap();

        let mut loaded = Grid::new(20, 20);
        let applied = load_live_cells(&mut loaded, &file_path).unwrap();

        assert_eq!(applied, 5);
        assert_eq!(loaded.live_cells(), grid.live_cells());
        assert!(load_live_cells(&mut loaded, temp_dir.path().join("missing.txt")).is_err());
    }
}
