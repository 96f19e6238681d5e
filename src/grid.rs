use crate::tiles::{floor_variant, wall_variant, TileIndex};

/// One square of the static map
#[derive(Debug, Clone, Copy)]
pub struct Cell {
    pub is_obstacle: bool,
    /// Decorative variant consumed only by the renderer
    pub tile: TileIndex,
}

/// Entity spawn markers found while parsing map text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnKind {
    Player,
    Hostile,
    Exit,
}

#[derive(Debug, Clone, Copy)]
pub struct Spawn {
    pub kind: SpawnKind,
    pub column: i32,
    pub row: i32,
}

/// Static 2D obstacle map, built once from map text and immutable afterwards
#[derive(Clone)]
pub struct Grid {
    pub cols: i32,
    pub rows: i32,
    cells: Vec<Cell>,
}

/// Map legend:
/// - `W` or `#`: wall
/// - `.` or space: floor
/// - `P`: player spawn (floor underneath)
/// - `H`: hostile spawn
/// - `E`: exit marker
const WALL_CHARS: [char; 2] = ['W', '#'];
const FLOOR_CHARS: [char; 2] = ['.', ' '];

impl Grid {
    /// Parse line-oriented map text into a grid plus its spawn list.
    ///
    /// Rows are the non-empty lines of the text; all rows must have the same
    /// width. An empty map, ragged rows, or an unknown symbol are load-time
    /// errors - parsing never happens on the hot path.
    pub fn from_map_text(text: &str) -> Result<(Grid, Vec<Spawn>), Box<dyn std::error::Error>> {
        let lines: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty())
            .collect();

        if lines.is_empty() {
            return Err("map text contains no rows".into());
        }

        let cols = lines[0].chars().count() as i32;
        let rows = lines.len() as i32;

        let mut obstacles = Vec::with_capacity((cols * rows) as usize);
        let mut spawns = Vec::new();

        for (y, line) in lines.iter().enumerate() {
            let width = line.chars().count() as i32;
            if width != cols {
                return Err(format!(
                    "map row {} is {} cells wide, expected {}",
                    y, width, cols
                )
                .into());
            }

            for (x, ch) in line.chars().enumerate() {
                let spawn_kind = match ch {
                    'P' => Some(SpawnKind::Player),
                    'H' => Some(SpawnKind::Hostile),
                    'E' => Some(SpawnKind::Exit),
                    _ => None,
                };

                if let Some(kind) = spawn_kind {
                    spawns.push(Spawn {
                        kind,
                        column: x as i32,
                        row: y as i32,
                    });
                    obstacles.push(false);
                } else if WALL_CHARS.contains(&ch) {
                    obstacles.push(true);
                } else if FLOOR_CHARS.contains(&ch) {
                    obstacles.push(false);
                } else {
                    return Err(format!("unknown map symbol '{}' at ({}, {})", ch, x, y).into());
                }
            }
        }

        Ok((Grid::from_obstacles(cols, rows, obstacles), spawns))
    }

    /// Build a grid from per-cell obstacle flags (row-major), assigning
    /// decorative tiles from the neighborhood.
    pub fn from_obstacles(cols: i32, rows: i32, obstacles: Vec<bool>) -> Self {
        let at = |x: i32, y: i32| -> bool {
            if x < 0 || x >= cols || y < 0 || y >= rows {
                return false;
            }
            obstacles[(x + y * cols) as usize]
        };

        let mut cells = Vec::with_capacity(obstacles.len());
        for y in 0..rows {
            for x in 0..cols {
                let tile = if at(x, y) {
                    wall_variant(at(x, y - 1), at(x, y + 1), at(x - 1, y), at(x + 1, y))
                } else {
                    floor_variant(x, y)
                };
                cells.push(Cell {
                    is_obstacle: at(x, y),
                    tile,
                });
            }
        }

        Grid { cols, rows, cells }
    }

    /// Build a grid from a list of obstacle cell ids (used by save states)
    pub fn from_obstacle_cells(cols: i32, rows: i32, blocked: &[i32]) -> Self {
        let mut obstacles = vec![false; (cols * rows) as usize];
        for &cell_id in blocked {
            if cell_id >= 0 && cell_id < cols * rows {
                obstacles[cell_id as usize] = true;
            }
        }
        Grid::from_obstacles(cols, rows, obstacles)
    }

    /// Check whether the cell at (column, row) blocks movement.
    ///
    /// Out-of-range coordinates are open boundary: never an obstacle, never a
    /// fault. The collision broad phase probes a 2-cell neighborhood around
    /// the mover and relies on this when an actor stands near a map edge.
    pub fn is_obstacle(&self, column: i32, row: i32) -> bool {
        if column < 0 || column >= self.cols || row < 0 || row >= self.rows {
            return false;
        }
        self.cells[self.cell_id(column, row) as usize].is_obstacle
    }

    pub fn cell(&self, column: i32, row: i32) -> Option<&Cell> {
        if column < 0 || column >= self.cols || row < 0 || row >= self.rows {
            return None;
        }
        Some(&self.cells[self.cell_id(column, row) as usize])
    }

    /// Convert (column, row) coordinates to a cell id
    pub fn cell_id(&self, column: i32, row: i32) -> i32 {
        column + row * self.cols
    }

    /// All obstacle cell ids, in row-major order (used by save states)
    pub fn obstacle_cells(&self) -> Vec<i32> {
        let mut blocked = Vec::new();
        for y in 0..self.rows {
            for x in 0..self.cols {
                if self.is_obstacle(x, y) {
                    blocked.push(self.cell_id(x, y));
                }
            }
        }
        blocked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_row() {
        let (grid, spawns) = Grid::from_map_text(".W.").unwrap();
        assert_eq!(grid.cols, 3);
        assert_eq!(grid.rows, 1);
        assert_eq!(grid.is_obstacle(0, 0), false);
        assert_eq!(grid.is_obstacle(1, 0), true);
        assert_eq!(grid.is_obstacle(2, 0), false);
        assert!(spawns.is_empty());
    }

    #[test]
    fn test_parse_spawns() {
        let text = "WWWW\nWP.W\nWHEW\nWWWW";
        let (grid, spawns) = Grid::from_map_text(text).unwrap();
        assert_eq!(grid.cols, 4);
        assert_eq!(grid.rows, 4);
        assert_eq!(spawns.len(), 3);
        assert_eq!(spawns[0].kind, SpawnKind::Player);
        assert_eq!((spawns[0].column, spawns[0].row), (1, 1));
        assert_eq!(spawns[1].kind, SpawnKind::Hostile);
        assert_eq!(spawns[2].kind, SpawnKind::Exit);
        // Spawn cells are floor
        assert!(!grid.is_obstacle(1, 1));
        assert!(!grid.is_obstacle(1, 2));
    }

    #[test]
    fn test_parse_empty_map_fails() {
        assert!(Grid::from_map_text("").is_err());
        assert!(Grid::from_map_text("\n\n").is_err());
    }

    #[test]
    fn test_parse_ragged_rows_fail() {
        assert!(Grid::from_map_text("WWW\nWW").is_err());
    }

    #[test]
    fn test_parse_unknown_symbol_fails() {
        assert!(Grid::from_map_text("W?W").is_err());
    }

    #[test]
    fn test_out_of_range_is_open() {
        let (grid, _) = Grid::from_map_text("WW\nWW").unwrap();
        assert!(!grid.is_obstacle(-1, 0));
        assert!(!grid.is_obstacle(0, -1));
        assert!(!grid.is_obstacle(2, 0));
        assert!(!grid.is_obstacle(0, 2));
        assert!(grid.cell(-1, -1).is_none());
    }

    #[test]
    fn test_from_obstacle_cells_round_trip() {
        let (grid, _) = Grid::from_map_text("W..\n.W.\n..W").unwrap();
        let blocked = grid.obstacle_cells();
        assert_eq!(blocked, vec![0, 4, 8]);

        let restored = Grid::from_obstacle_cells(grid.cols, grid.rows, &blocked);
        for y in 0..grid.rows {
            for x in 0..grid.cols {
                assert_eq!(restored.is_obstacle(x, y), grid.is_obstacle(x, y));
            }
        }
    }
}
